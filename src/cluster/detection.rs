//! Community detection: pluggable partitioners and level selection

use std::collections::HashMap;
use std::fmt;

use petgraph::visit::EdgeRef;
use serde::{Deserialize, Serialize};

use crate::cluster::metrics::modularity;
use crate::cluster::Partition;
use crate::error::{AnalysisError, Result};
use crate::events::{AnalysisEvent, EventSink};
use crate::graph::Adjacency;

/// Community detection algorithms the analysis knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    Louvain,
    GirvanNewman,
    Leiden,
    Infomap,
    ConnectedComponents,
}

impl Algorithm {
    /// Directory name used for this algorithm's results
    pub fn dir_name(&self) -> &'static str {
        match self {
            Self::Louvain => "louvain",
            Self::GirvanNewman => "girvan_newman",
            Self::Leiden => "leiden",
            Self::Infomap => "infomap",
            Self::ConnectedComponents => "connected_components",
        }
    }

    /// Whether the partition has to come from an external tool
    pub fn is_external(&self) -> bool {
        !matches!(self, Self::ConnectedComponents)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Louvain => "Louvain",
            Self::GirvanNewman => "Girvan-Newman",
            Self::Leiden => "Leiden",
            Self::Infomap => "Infomap",
            Self::ConnectedComponents => "connected components",
        };
        write!(f, "{}", s)
    }
}

/// Source of a partition for a graph
///
/// The analysis only depends on this contract: every name in the returned
/// partition must be a node of the graph, and each node should appear in
/// exactly one community.
pub trait Partitioner {
    fn algorithm(&self) -> Algorithm;

    fn partition(&self, adjacency: &Adjacency, sink: &mut dyn EventSink) -> Result<Partition>;
}

/// Partition computed by an external community-detection run
/// (Louvain, Leiden, Infomap) and loaded from disk
#[derive(Debug, Clone)]
pub struct PrecomputedPartition {
    algorithm: Algorithm,
    groups: Partition,
}

impl PrecomputedPartition {
    pub fn new(algorithm: Algorithm, groups: Partition) -> Self {
        Self { algorithm, groups }
    }
}

impl Partitioner for PrecomputedPartition {
    fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    fn partition(&self, _adjacency: &Adjacency, _sink: &mut dyn EventSink) -> Result<Partition> {
        Ok(self.groups.clone())
    }
}

/// Dendrogram levels of an external Girvan-Newman run; one level is picked
/// by modularity
#[derive(Debug, Clone)]
pub struct GirvanNewmanLevels {
    levels: Vec<Partition>,
}

impl GirvanNewmanLevels {
    pub fn new(levels: Vec<Partition>) -> Self {
        Self { levels }
    }
}

impl Partitioner for GirvanNewmanLevels {
    fn algorithm(&self) -> Algorithm {
        Algorithm::GirvanNewman
    }

    fn partition(&self, adjacency: &Adjacency, sink: &mut dyn EventSink) -> Result<Partition> {
        let everything: Partition = vec![adjacency.node_weights().cloned().collect()];
        sink.emit(AnalysisEvent::BaseModularity(modularity(adjacency, &everything)));

        select_level(adjacency, &self.levels, sink).cloned()
    }
}

/// Pick a hierarchy level by modularity
///
/// Levels are scanned in order against a running maximum that starts at 0.
/// A level is adopted only when its modularity is strictly greater than the
/// running maximum, so on a plateau the earliest level wins. When no level
/// beats 0 the last level is returned.
pub fn select_level<'a>(
    adjacency: &Adjacency,
    levels: &'a [Partition],
    sink: &mut dyn EventSink,
) -> Result<&'a Partition> {
    let mut max_modularity = 0.0f64;
    let mut optimal: Option<(usize, &Partition)> = None;

    for (i, level) in levels.iter().enumerate() {
        let level_no = i + 1;
        let current = modularity(adjacency, level);
        sink.emit(AnalysisEvent::LevelModularity {
            level: level_no,
            value: current,
        });

        if current > max_modularity {
            max_modularity = current;
            optimal = Some((level_no, level));
        }
    }

    match optimal {
        Some((level, partition)) => {
            sink.emit(AnalysisEvent::LevelSelected { level });
            Ok(partition)
        }
        None => {
            let last = levels.last().ok_or(AnalysisError::NoPartitionLevels)?;
            sink.emit(AnalysisEvent::NoImprovingLevel);
            Ok(last)
        }
    }
}

/// Union-Find structure for connected component analysis
pub struct DisjointSets {
    /// Parent pointers (parent[i] = parent of node i)
    parent: Vec<usize>,

    /// Size of each set (for union by size)
    size: Vec<usize>,
}

impl DisjointSets {
    /// Create a new DisjointSets with every element in its own set
    pub fn new(size: usize) -> Self {
        Self {
            parent: (0..size).collect(),
            size: vec![1; size],
        }
    }

    /// Find the root of the set containing x with path compression
    pub fn find(&mut self, x: usize) -> usize {
        let px = self.parent[x];
        if px != x {
            self.parent[x] = self.find(px);
        }
        self.parent[x]
    }

    /// Union the sets containing x and y
    pub fn union(&mut self, x: usize, y: usize) {
        let root_x = self.find(x);
        let root_y = self.find(y);

        if root_x == root_y {
            return;
        }

        // attach smaller tree under root of larger tree
        if self.size[root_x] > self.size[root_y] {
            self.parent[root_y] = root_x;
            self.size[root_x] += self.size[root_y];
        } else {
            self.parent[root_x] = root_y;
            self.size[root_y] += self.size[root_x];
        }
    }
}

/// Built-in partitioner: weakly connected components
///
/// Components are ordered by the first appearance of a member in node
/// order, and members keep node order, so the result is deterministic.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConnectedComponents;

impl Partitioner for ConnectedComponents {
    fn algorithm(&self) -> Algorithm {
        Algorithm::ConnectedComponents
    }

    fn partition(&self, adjacency: &Adjacency, _sink: &mut dyn EventSink) -> Result<Partition> {
        let mut sets = DisjointSets::new(adjacency.node_count());
        for edge in adjacency.edge_references() {
            sets.union(edge.source().index(), edge.target().index());
        }

        let mut group_of_root: HashMap<usize, usize> = HashMap::new();
        let mut groups: Partition = Vec::new();
        for idx in adjacency.node_indices() {
            let root = sets.find(idx.index());
            let slot = *group_of_root.entry(root).or_insert_with(|| {
                groups.push(Vec::new());
                groups.len() - 1
            });
            groups[slot].push(adjacency[idx].clone());
        }

        Ok(groups)
    }
}
