//! Cluster analysis module

pub mod detection;
pub mod adapter;
pub mod inter_cluster;
pub mod metrics;

use std::fmt;

use crate::graph::{Edge, Node};

/// Node names of one community, as produced by a partitioner
pub type Community = Vec<String>;

/// Grouping of node names into communities, in the partitioner's order
pub type Partition = Vec<Community>;

/// A detected community in the dependency graph
#[derive(Debug, Clone, PartialEq)]
pub struct Cluster {
    /// 1-based identifier, assigned in partition order
    pub id: u32,

    /// Member nodes
    pub nodes: Vec<Node>,

    /// Edges with both endpoints inside this cluster
    pub intra_cluster_edges: Vec<Edge>,
}

impl Cluster {
    /// Create a cluster with no intra-cluster edges yet
    pub fn new(id: u32, nodes: Vec<Node>) -> Self {
        Self {
            id,
            nodes,
            intra_cluster_edges: Vec::new(),
        }
    }

    pub fn with_intra_cluster_edges(mut self, edges: Vec<Edge>) -> Self {
        self.intra_cluster_edges = edges;
        self
    }

    /// Number of member nodes
    pub fn size(&self) -> usize {
        self.nodes.len()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.nodes.iter().any(|n| n.name() == name)
    }
}

impl fmt::Display for Cluster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Cluster {}: {} nodes, {} intra-cluster edges",
            self.id,
            self.nodes.len(),
            self.intra_cluster_edges.len()
        )
    }
}

/// All clusters of one analysis run plus the edges running between them
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClustersInformation {
    pub clusters: Vec<Cluster>,

    /// Edges whose endpoints sit in different clusters, in graph edge order
    pub inter_cluster_edges: Vec<Edge>,
}

impl ClustersInformation {
    /// Wrap clusters; inter-cluster edges are filled in by the classifier
    pub fn new(clusters: Vec<Cluster>) -> Self {
        Self {
            clusters,
            inter_cluster_edges: Vec::new(),
        }
    }

    pub fn cluster_count(&self) -> usize {
        self.clusters.len()
    }

    pub fn intra_cluster_edge_count(&self) -> usize {
        self.clusters.iter().map(|c| c.intra_cluster_edges.len()).sum()
    }

    pub fn inter_cluster_edge_count(&self) -> usize {
        self.inter_cluster_edges.len()
    }

    /// First cluster, in cluster order, that lists the node
    pub fn cluster_of(&self, name: &str) -> Option<&Cluster> {
        self.clusters.iter().find(|c| c.contains(name))
    }
}

impl fmt::Display for ClustersInformation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Clusters Information: {} clusters, {} inter-cluster edges",
            self.clusters.len(),
            self.inter_cluster_edges.len()
        )
    }
}
