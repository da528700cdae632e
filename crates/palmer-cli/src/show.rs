//! Show command: render outputs in the terminal.

use clap::ValueEnum;
use palmer::RenderedOutput;
use palmer_core::OutputId;

use crate::colors;
use crate::dashboard::{FilterArgs, open_session};

/// Representation printed by `show`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Text,
    Html,
    Json,
}

/// Render one or every output with the inputs given on the command line.
pub fn execute(filters: &FilterArgs, output: Option<&str>, format: Format) -> anyhow::Result<()> {
    let ids = match output {
        Some(name) => vec![name.parse::<OutputId>()?],
        None => OutputId::ALL.to_vec(),
    };

    let session = open_session(filters, "Palmer Penguins")?;
    let outputs: Vec<RenderedOutput> = ids.into_iter().map(|id| session.render_output(id)).collect();

    match format {
        Format::Json => {
            let value = match outputs.as_slice() {
                [single] => serde_json::to_value(single)?,
                many => serde_json::to_value(many)?,
            };
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        Format::Html => {
            for rendered in &outputs {
                println!("{}", rendered.html);
            }
        }
        Format::Text => {
            let view = session.filtered_data();
            println!(
                "{}{} of {} rows selected{}",
                colors::DIM,
                view.len(),
                view.dataset().len(),
                colors::RESET
            );
            for rendered in &outputs {
                println!("\n{}{}{} ({})", colors::BOLD, rendered.title, colors::RESET, rendered.id);
                println!("{}", colors::rule());
                println!("{}", rendered.text);
            }
        }
    }

    Ok(())
}
