//! Dashboard session management.
//!
//! A session is one client's view of the dashboard: its own input values and
//! its own incremental view engine over the shared, immutable dataset.

use std::sync::Arc;

use palmer::charts::{AttributeHistogram, DistributionChart, ScatterPlot};
use palmer::{DataGrid, DataTable, RenderedOutput, render_all, render_output};
use palmer_core::{
    Dataset, FilteredView, InputDef, InputRegistry, InputValue, OutputGraph, OutputId, ViewEngine,
};
use uuid::Uuid;

use crate::error::ServerResult;
use crate::protocol::{ClientMessage, ServerMessage};

/// State of one connected dashboard.
pub struct DashboardSession {
    id: Uuid,
    title: String,
    registry: InputRegistry,
    engine: ViewEngine,
    graph: OutputGraph,
}

impl DashboardSession {
    /// Create a session with every input at its default.
    pub fn new(dataset: Arc<Dataset>, title: impl Into<String>) -> ServerResult<Self> {
        let registry = InputRegistry::new();
        let engine = ViewEngine::new(dataset, registry.state());
        let graph = OutputGraph::dashboard()?;
        let id = Uuid::new_v4();

        tracing::debug!("Created session {} over {} rows", id, engine.dataset().len());

        Ok(Self {
            id,
            title: title.into(),
            registry,
            engine,
            graph,
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Every input with its current value.
    pub fn inputs(&self) -> Vec<InputDef> {
        self.registry.definitions()
    }

    /// Full dashboard state: inputs plus every rendered output.
    pub fn get_state(&self) -> ServerMessage {
        ServerMessage::DashboardState {
            title: self.title.clone(),
            inputs: self.inputs(),
            outputs: self.render_all(),
        }
    }

    /// Validate and apply an input value.
    ///
    /// Returns the outputs that depend on the input, re-rendered. Writing the
    /// current value again re-renders nothing.
    pub fn update_input(&mut self, name: &str, value: &InputValue) -> ServerResult<Vec<RenderedOutput>> {
        let affected = self.apply_input(name, value)?;
        Ok(affected
            .into_iter()
            .map(|id| self.render_output(id))
            .collect())
    }

    /// Validate and apply an input value without rendering anything.
    ///
    /// Returns the outputs that depend on the input, in page order; empty when
    /// the value equals the current one.
    pub fn apply_input(&mut self, name: &str, value: &InputValue) -> ServerResult<Vec<OutputId>> {
        let Some(change) = self.registry.set_value(name, value)? else {
            tracing::debug!("Input {} unchanged", name);
            return Ok(Vec::new());
        };

        self.engine.apply(&change);
        let affected = self.graph.invalidated_outputs(change.name());
        tracing::debug!("Input {} changed, {} outputs affected", name, affected.len());
        Ok(affected)
    }

    /// Restore every input to its default.
    ///
    /// Returns the outputs affected by the inputs that actually changed, in page order.
    pub fn reset_inputs(&mut self) -> Vec<OutputId> {
        let mut affected = Vec::new();
        for change in self.registry.reset() {
            self.engine.apply(&change);
            affected.extend(self.graph.invalidated_outputs(change.name()));
        }
        affected.sort();
        affected.dedup();
        affected
    }

    /// Render a single output from the current inputs.
    pub fn render_output(&self, id: OutputId) -> RenderedOutput {
        render_output(id, &self.engine.filtered_data(), &self.engine.display())
    }

    /// Render every output, in page order.
    pub fn render_all(&self) -> Vec<RenderedOutput> {
        render_all(&self.engine.filtered_data(), &self.engine.display())
    }

    /// The dataset restricted to the selected species and islands.
    pub fn filtered_data(&self) -> FilteredView {
        self.engine.filtered_data()
    }

    /// Number of times the filtered view was actually recomputed.
    pub fn recomputations(&self) -> u64 {
        self.engine.recomputations()
    }

    pub fn penguins_datatable(&self) -> DataTable {
        DataTable::new(self.filtered_data())
    }

    pub fn penguins_datagrid(&self) -> DataGrid {
        DataGrid::new(self.filtered_data())
    }

    pub fn histogram_plot(&self) -> AttributeHistogram {
        let display = self.engine.display();
        AttributeHistogram::new(&self.filtered_data(), display.attribute, display.plotly_bins)
    }

    pub fn scatter_plot(&self) -> ScatterPlot {
        ScatterPlot::new(&self.filtered_data(), self.engine.display().attribute)
    }

    pub fn distribution_plot(&self) -> DistributionChart {
        let display = self.engine.display();
        DistributionChart::new(&self.filtered_data(), display.attribute, display.seaborn_bins)
    }

    /// Handle a client message, returning the replies in send order.
    pub fn handle(&mut self, msg: ClientMessage) -> Vec<ServerMessage> {
        match msg {
            ClientMessage::GetState => vec![self.get_state()],

            ClientMessage::InputUpdate { name, value } => match self.update_input(&name, &value) {
                Ok(outputs) => outputs
                    .into_iter()
                    .map(|output| ServerMessage::OutputUpdated { output })
                    .collect(),
                Err(e) => {
                    tracing::warn!("Rejected update of input {}: {}", name, e);
                    vec![ServerMessage::InputRejected {
                        name,
                        error: e.to_string(),
                    }]
                }
            },

            ClientMessage::ResetInputs => {
                let affected = self.reset_inputs();
                tracing::debug!("Reset inputs, {} outputs affected", affected.len());
                vec![self.get_state()]
            }
        }
    }
}
