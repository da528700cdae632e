//! WebSocket protocol messages for the Palmer server.
//!
//! Defines the message types exchanged between client and server.

use palmer::RenderedOutput;
use palmer_core::{InputDef, InputValue};
use serde::{Deserialize, Serialize};

/// Messages sent from client to server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Request the full dashboard state.
    GetState,

    /// Write a new value to an input.
    InputUpdate {
        /// Input name (e.g. `selected_species_list`).
        name: String,
        /// New value; number, text or list of labels.
        value: InputValue,
    },

    /// Restore every input to its default.
    ResetInputs,
}

/// Messages sent from server to client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Full dashboard state (sent on connection, on request and after a reset).
    DashboardState {
        /// Page title.
        title: String,
        /// Every input with its current value.
        inputs: Vec<InputDef>,
        /// Every output, in page order.
        outputs: Vec<RenderedOutput>,
    },

    /// An output was re-rendered after an input change.
    OutputUpdated {
        output: RenderedOutput,
    },

    /// An input update was rejected; the input kept its previous value.
    InputRejected {
        /// Input name as sent by the client.
        name: String,
        /// Error message.
        error: String,
    },

    /// General error.
    Error {
        message: String,
    },
}
