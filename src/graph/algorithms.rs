//! Graph algorithms for analysis

use std::collections::{HashMap, HashSet};

use itertools::Itertools;
use petgraph::graph::{DiGraph, NodeIndex};

use crate::events::{AnalysisEvent, EventSink};
use crate::graph::{Edge, Graph, Node};

/// Adjacency view handed to partitioners: node weight is the node name,
/// edge weight is the call weight
pub type Adjacency = DiGraph<String, f64>;

/// Names of all nodes touched by at least one edge
pub fn touched_nodes(graph: &Graph) -> HashSet<&str> {
    graph
        .edges()
        .iter()
        .flat_map(|e| [e.source().name(), e.destination().name()])
        .collect()
}

/// Count, for every distinct node, the edges whose `endpoint` is that node
///
/// Counts start at zero for every node and follow node order; a name that
/// appears twice in the node list gets a single slot. Duplicate edges each
/// count. Endpoints missing from the node list are not tallied.
pub fn degree_tally<'a>(graph: &'a Graph, endpoint: impl Fn(&'a Edge) -> &'a Node) -> Vec<usize> {
    let mut index: HashMap<&str, usize> = HashMap::with_capacity(graph.node_count());
    for node in graph.nodes() {
        let next = index.len();
        index.entry(node.name()).or_insert(next);
    }

    let mut counts = vec![0usize; index.len()];
    for edge in graph.edges() {
        if let Some(&slot) = index.get(endpoint(edge).name()) {
            counts[slot] += 1;
        }
    }
    counts
}

/// Median with the even/odd midpoint rule, `None` for an empty sample
pub fn median(values: &[usize]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let sorted: Vec<usize> = values.iter().copied().sorted_unstable().collect();
    let n = sorted.len();
    if n % 2 == 1 {
        Some(sorted[n / 2] as f64)
    } else {
        Some((sorted[n / 2 - 1] + sorted[n / 2]) as f64 / 2.0)
    }
}

/// Build a petgraph view of the graph
///
/// Parallel edges are kept. Edges with an endpoint missing from the node
/// list are skipped and reported.
pub fn to_adjacency(graph: &Graph, sink: &mut dyn EventSink) -> Adjacency {
    let mut adjacency = Adjacency::with_capacity(graph.node_count(), graph.edge_count());
    let mut index: HashMap<&str, NodeIndex> = HashMap::with_capacity(graph.node_count());

    for node in graph.nodes() {
        if !index.contains_key(node.name()) {
            let idx = adjacency.add_node(node.name().to_string());
            index.insert(node.name(), idx);
        }
    }

    for edge in graph.edges() {
        let key = edge.key();
        match (index.get(key.source), index.get(key.destination)) {
            (Some(&src), Some(&dst)) => {
                adjacency.add_edge(src, dst, edge.weight());
            }
            _ => sink.emit(AnalysisEvent::EdgeSkipped {
                source: key.source.to_string(),
                destination: key.destination.to_string(),
                reason: "endpoint is not a node of the graph".to_string(),
            }),
        }
    }

    adjacency
}
