//! Nodes, edges and the dependency graph that owns them

use std::fmt;
use std::hash::{Hash, Hasher};

use itertools::Itertools;

use crate::error::{AnalysisError, EndpointRole, Result};
use crate::events::{AnalysisEvent, EventSink};
use crate::graph::algorithms;

/// A class (or module) in the dependency graph, identified by its name
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Node {
    name: String,
}

impl Node {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl PartialEq<str> for Node {
    fn eq(&self, other: &str) -> bool {
        self.name == other
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Node: {}", self.name)
    }
}

/// A single method parameter
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Parameter {
    pub type_name: String,
    pub name: String,
}

/// Descriptor of the method behind a call edge
#[derive(Debug, Clone, Default)]
pub struct Method {
    pub name: String,
    pub parameters: Vec<Parameter>,
    pub return_type: String,
    pub declaring_class: String,
    pub signature: String,
}

impl Method {
    pub fn new(name: impl Into<String>, declaring_class: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            declaring_class: declaring_class.into(),
            ..Self::default()
        }
    }
}

// The signature string is derived from the other fields and is not compared.
impl PartialEq for Method {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.parameters == other.parameters
            && self.return_type == other.return_type
            && self.declaring_class == other.declaring_class
    }
}

impl Eq for Method {}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let params = self.parameters.iter().map(|p| p.type_name.as_str()).join(", ");
        write!(
            f,
            "{}({}): {} @ {}",
            self.name, params, self.return_type, self.declaring_class
        )
    }
}

/// Identity of an edge: its (source, destination) name pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeKey<'a> {
    pub source: &'a str,
    pub destination: &'a str,
}

/// A directed call edge between two nodes
///
/// Equality and hashing only look at the endpoints, so two calls between the
/// same pair of classes are duplicates for set operations even when their
/// method metadata differs.
#[derive(Debug, Clone)]
pub struct Edge {
    source: Node,
    destination: Node,
    method: Method,
    source_method: Method,
    weight: f64,
}

impl Edge {
    pub fn new(source: Node, destination: Node, method: Method, source_method: Method) -> Self {
        Self {
            source,
            destination,
            method,
            source_method,
            weight: 1.0,
        }
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    pub fn source(&self) -> &Node {
        &self.source
    }

    pub fn destination(&self) -> &Node {
        &self.destination
    }

    /// The method being called on the destination
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// The method on the source that makes the call
    pub fn source_method(&self) -> &Method {
        &self.source_method
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn key(&self) -> EdgeKey<'_> {
        EdgeKey {
            source: self.source.name(),
            destination: self.destination.name(),
        }
    }
}

impl PartialEq for Edge {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Edge {}

impl Hash for Edge {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Edge: {} -> {}, Weight: {}, Method: {}",
            self.source.name(),
            self.destination.name(),
            self.weight,
            self.method
        )
    }
}

/// Directed multigraph of classes and the calls between them
///
/// Node order is insertion order. Node names are assumed unique; lookups
/// return the first match.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assemble a graph from already parsed parts without checking that
    /// edge endpoints exist
    pub fn from_parts(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        Self { nodes, edges }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges, duplicates included
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Number of distinct (source, destination) pairs
    pub fn unique_edge_count(&self) -> usize {
        self.edges.iter().unique().count()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains_node(&self, name: &str) -> bool {
        self.nodes.iter().any(|n| n.name() == name)
    }

    pub fn add_node(&mut self, node: Node) {
        self.nodes.push(node);
    }

    /// Append an edge whose endpoints are both present in the graph
    pub fn add_edge(&mut self, edge: Edge) -> Result<()> {
        if !self.contains_node(edge.source().name()) {
            return Err(AnalysisError::MissingEndpoint {
                role: EndpointRole::Source,
                name: edge.source().name().to_string(),
            });
        }
        if !self.contains_node(edge.destination().name()) {
            return Err(AnalysisError::MissingEndpoint {
                role: EndpointRole::Destination,
                name: edge.destination().name().to_string(),
            });
        }
        self.edges.push(edge);
        Ok(())
    }

    /// First node with the given name, without reporting a miss
    pub fn find_node(&self, name: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.name() == name)
    }

    /// First node with the given name; a miss is reported to the sink
    pub fn get_node_by_name(&self, name: &str, sink: &mut dyn EventSink) -> Option<&Node> {
        let node = self.find_node(name);
        if node.is_none() {
            sink.emit(AnalysisEvent::NodeNotFound {
                name: name.to_string(),
            });
        }
        node
    }

    /// Nodes that are neither the source nor the destination of any edge
    pub fn count_isolated_nodes(&self) -> usize {
        let touched = algorithms::touched_nodes(self);
        self.nodes
            .iter()
            .filter(|n| !touched.contains(n.name()))
            .count()
    }

    /// Sum of in-degrees divided by the number of nodes
    pub fn average_edge_count(&self) -> Result<f64> {
        if self.nodes.is_empty() {
            return Err(AnalysisError::EmptyGraph {
                metric: "average edges per node",
            });
        }
        let total: usize = self.incoming_edges_per_node().iter().sum();
        Ok(total as f64 / self.nodes.len() as f64)
    }

    /// In-degree of every distinct node, in node order
    pub fn incoming_edges_per_node(&self) -> Vec<usize> {
        algorithms::degree_tally(self, Edge::destination)
    }

    /// Out-degree of every distinct node, in node order
    pub fn outgoing_edges_per_node(&self) -> Vec<usize> {
        algorithms::degree_tally(self, Edge::source)
    }

    pub fn median_incoming_edges_per_node(&self) -> Result<f64> {
        algorithms::median(&self.incoming_edges_per_node()).ok_or(AnalysisError::EmptyGraph {
            metric: "median incoming edges per node",
        })
    }

    pub fn median_outgoing_edges_per_node(&self) -> Result<f64> {
        algorithms::median(&self.outgoing_edges_per_node()).ok_or(AnalysisError::EmptyGraph {
            metric: "median outgoing edges per node",
        })
    }
}

impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Graph with {} nodes and {} edges.",
            self.nodes.len(),
            self.edges.len()
        )
    }
}
