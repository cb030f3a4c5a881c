//! Graph construction module

use std::collections::HashMap;

use crate::events::{AnalysisEvent, EventSink};
use crate::graph::{Edge, Graph, Method, Node};

/// Builder for batch construction of a Graph from parsed input
///
/// Unlike [`Graph::add_edge`], edges whose endpoints are unknown are dropped
/// with a report instead of failing the whole build.
pub struct GraphBuilder {
    /// Mapping from node names to positions in `nodes`
    name_to_index: HashMap<String, usize>,

    /// Nodes in insertion order
    nodes: Vec<Node>,

    /// Edges in insertion order, duplicates kept
    edges: Vec<Edge>,
}

impl GraphBuilder {
    /// Create a new graph builder with the given node capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            name_to_index: HashMap::with_capacity(capacity),
            nodes: Vec::with_capacity(capacity),
            edges: Vec::new(),
        }
    }

    /// Add a node; a name that was already added is ignored
    pub fn add_node(&mut self, name: &str) -> &Node {
        let next = self.nodes.len();
        let idx = *self.name_to_index.entry(name.to_string()).or_insert(next);
        if idx == next {
            self.nodes.push(Node::new(name));
        }
        &self.nodes[idx]
    }

    pub fn contains(&self, name: &str) -> bool {
        self.name_to_index.contains_key(name)
    }

    /// Add a call edge between two known nodes
    ///
    /// Returns `false` and reports the edge when an endpoint is unknown.
    pub fn add_edge(
        &mut self,
        source: &str,
        destination: &str,
        method: Method,
        source_method: Method,
        sink: &mut dyn EventSink,
    ) -> bool {
        let (src, dst) = match (
            self.name_to_index.get(source),
            self.name_to_index.get(destination),
        ) {
            (Some(&src), Some(&dst)) => (src, dst),
            _ => {
                sink.emit(AnalysisEvent::EdgeSkipped {
                    source: source.to_string(),
                    destination: destination.to_string(),
                    reason: "endpoint is not among the graph's nodes".to_string(),
                });
                return false;
            }
        };

        self.edges.push(Edge::new(
            self.nodes[src].clone(),
            self.nodes[dst].clone(),
            method,
            source_method,
        ));
        true
    }

    /// Build the graph
    pub fn build(self) -> Graph {
        Graph::from_parts(self.nodes, self.edges)
    }
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::with_capacity(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_nodes_are_added_once() {
        let mut builder = GraphBuilder::default();
        builder.add_node("A");
        builder.add_node("B");
        builder.add_node("A");

        let graph = builder.build();
        let names: Vec<&str> = graph.nodes().iter().map(Node::name).collect();
        assert_eq!(names, vec!["A", "B"]);
    }

    #[test]
    fn edges_to_unknown_nodes_are_dropped() {
        let mut builder = GraphBuilder::default();
        builder.add_node("A");
        builder.add_node("B");
        let mut events: Vec<AnalysisEvent> = Vec::new();

        assert!(builder.add_edge("A", "B", Method::default(), Method::default(), &mut events));
        assert!(builder.add_edge("A", "B", Method::default(), Method::default(), &mut events));
        assert!(!builder.add_edge("A", "C", Method::default(), Method::default(), &mut events));

        let graph = builder.build();
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(events.len(), 1);
    }
}
