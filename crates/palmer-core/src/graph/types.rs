//! Types for the output dependency graph.

use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;

use petgraph::graph::{DiGraph, NodeIndex};
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::inputs::InputName;

/// A rendered view of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum OutputId {
    #[serde(rename = "penguins_datatable")]
    DataTable,
    #[serde(rename = "penguins_datagrid")]
    DataGrid,
    #[serde(rename = "histogram_plot")]
    Histogram,
    #[serde(rename = "scatter_plot")]
    Scatter,
    #[serde(rename = "distribution_plot")]
    Distribution,
}

impl OutputId {
    /// Every output, in page order.
    pub const ALL: [OutputId; 5] = [
        OutputId::DataTable,
        OutputId::DataGrid,
        OutputId::Histogram,
        OutputId::Scatter,
        OutputId::Distribution,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OutputId::DataTable => "penguins_datatable",
            OutputId::DataGrid => "penguins_datagrid",
            OutputId::Histogram => "histogram_plot",
            OutputId::Scatter => "scatter_plot",
            OutputId::Distribution => "distribution_plot",
        }
    }
}

impl fmt::Display for OutputId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| Error::UnknownOutput(s.to_string()))
    }
}

/// A node of the output graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum NodeId {
    /// A user-controlled input.
    Input(InputName),
    /// The filtered view of the dataset.
    FilteredData,
    /// A rendered output.
    Output(OutputId),
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeId::Input(name) => write!(f, "input.{}", name),
            NodeId::FilteredData => f.write_str("filtered_data"),
            NodeId::Output(id) => write!(f, "output.{}", id),
        }
    }
}

/// Static graph of which inputs each output reads, directly or through the
/// filtered view.
pub struct OutputGraph {
    /// The directed graph: edges go from producer to consumer
    graph: DiGraph<NodeId, ()>,
    /// Node ID to node index mapping
    node_indices: FxHashMap<NodeId, NodeIndex>,
}

impl OutputGraph {
    /// Create a new empty graph.
    pub fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            node_indices: FxHashMap::default(),
        }
    }

    /// The wiring of the penguin dashboard.
    pub fn dashboard() -> Result<Self> {
        use InputName::*;

        let mut graph = Self::new();

        graph.add_edge(NodeId::Input(SelectedSpeciesList), NodeId::FilteredData);
        graph.add_edge(NodeId::Input(SelectedIslandList), NodeId::FilteredData);

        for output in OutputId::ALL {
            graph.add_edge(NodeId::FilteredData, NodeId::Output(output));
        }

        for chart in [OutputId::Histogram, OutputId::Scatter, OutputId::Distribution] {
            graph.add_edge(NodeId::Input(SelectedAttribute), NodeId::Output(chart));
        }
        graph.add_edge(
            NodeId::Input(PlotlyBinCount),
            NodeId::Output(OutputId::Histogram),
        );
        graph.add_edge(
            NodeId::Input(SeabornBinCount),
            NodeId::Output(OutputId::Distribution),
        );

        graph.detect_cycles()?;
        Ok(graph)
    }

    /// Add a node if it is not present yet.
    pub fn add_node(&mut self, id: NodeId) -> NodeIndex {
        if let Some(&idx) = self.node_indices.get(&id) {
            return idx;
        }
        let idx = self.graph.add_node(id);
        self.node_indices.insert(id, idx);
        idx
    }

    /// Record that `consumer` reads `producer`.
    pub fn add_edge(&mut self, producer: NodeId, consumer: NodeId) {
        let from = self.add_node(producer);
        let to = self.add_node(consumer);
        self.graph.update_edge(from, to, ());
    }

    /// Detect cycles in the graph and return a helpful error message.
    pub fn detect_cycles(&self) -> Result<()> {
        use petgraph::algo::kosaraju_scc;

        for scc in kosaraju_scc(&self.graph) {
            if scc.len() > 1 {
                let names: Vec<String> = scc.iter().map(|&idx| self.graph[idx].to_string()).collect();
                return Err(Error::CyclicDependency(format!(
                    "{} → {}",
                    names.join(" → "),
                    names[0]
                )));
            }
        }

        Ok(())
    }

    /// Nodes in topological order (producers before consumers).
    pub fn topological_order(&self) -> Result<Vec<NodeId>> {
        use petgraph::algo::toposort;

        toposort(&self.graph, None)
            .map(|nodes| nodes.into_iter().map(|idx| self.graph[idx]).collect())
            .map_err(|cycle| {
                Error::CyclicDependency(format!("cycle at {}", self.graph[cycle.node_id()]))
            })
    }

    /// Nodes that must be refreshed when `changed` is modified.
    ///
    /// Returns the changed node plus all its transitive dependents,
    /// in topological order.
    pub fn invalidated_by(&self, changed: NodeId) -> Vec<NodeId> {
        let Some(&start) = self.node_indices.get(&changed) else {
            return Vec::new();
        };

        let mut invalidated = FxHashSet::default();
        invalidated.insert(start);
        let mut queue = VecDeque::from([start]);

        while let Some(idx) = queue.pop_front() {
            for neighbor in self.graph.neighbors(idx) {
                if invalidated.insert(neighbor) {
                    queue.push_back(neighbor);
                }
            }
        }

        self.topological_order()
            .unwrap_or_default()
            .into_iter()
            .filter(|id| {
                self.node_indices
                    .get(id)
                    .is_some_and(|idx| invalidated.contains(idx))
            })
            .collect()
    }

    /// Outputs that must re-render after `input` changed, in page order.
    pub fn invalidated_outputs(&self, input: InputName) -> Vec<OutputId> {
        let mut outputs: Vec<OutputId> = self
            .invalidated_by(NodeId::Input(input))
            .into_iter()
            .filter_map(|node| match node {
                NodeId::Output(id) => Some(id),
                _ => None,
            })
            .collect();
        outputs.sort();
        outputs
    }

    /// Direct dependencies of a node (what it reads).
    pub fn dependencies(&self, id: NodeId) -> Vec<NodeId> {
        self.node_indices
            .get(&id)
            .map(|&idx| {
                self.graph
                    .neighbors_directed(idx, petgraph::Direction::Incoming)
                    .map(|n| self.graph[n])
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Direct dependents of a node (what reads it).
    pub fn dependents(&self, id: NodeId) -> Vec<NodeId> {
        self.node_indices
            .get(&id)
            .map(|&idx| self.graph.neighbors(idx).map(|n| self.graph[n]).collect())
            .unwrap_or_default()
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    /// Check if the graph is empty.
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }
}

impl Default for OutputGraph {
    fn default() -> Self {
        Self::new()
    }
}
