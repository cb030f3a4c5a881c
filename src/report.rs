//! Structural statistics over a clustered graph

use serde::{Deserialize, Serialize};

use crate::cluster::ClustersInformation;
use crate::error::{AnalysisError, Result};
use crate::events::{AnalysisEvent, EventSink, Stage};
use crate::graph::algorithms::median;
use crate::graph::Graph;

/// Graph-level statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphStats {
    pub node_count: usize,
    /// Edges including duplicates
    pub edge_count: usize,
    pub unique_edge_count: usize,
    pub isolated_node_count: usize,
    pub average_edges_per_node: f64,
    pub median_incoming_edges_per_node: f64,
    pub median_outgoing_edges_per_node: f64,
}

impl GraphStats {
    pub fn compute(graph: &Graph) -> Result<Self> {
        Ok(Self {
            node_count: graph.node_count(),
            edge_count: graph.edge_count(),
            unique_edge_count: graph.unique_edge_count(),
            isolated_node_count: graph.count_isolated_nodes(),
            average_edges_per_node: graph.average_edge_count()?,
            median_incoming_edges_per_node: graph.median_incoming_edges_per_node()?,
            median_outgoing_edges_per_node: graph.median_outgoing_edges_per_node()?,
        })
    }
}

/// Cluster size summary, either over all clusters or over those with more
/// than `threshold` nodes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SizeSummary {
    pub threshold: Option<usize>,
    pub cluster_count: usize,
    pub average_size: f64,
    pub median_size: f64,
}

/// Per-cluster line of the report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterLine {
    pub id: u32,
    pub node_count: usize,
    pub intra_cluster_edge_count: usize,
}

/// Cluster-level statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterStats {
    pub cluster_count: usize,
    pub intra_cluster_edge_count: usize,
    pub inter_cluster_edge_count: usize,
    /// intra + inter
    pub total_edge_count: usize,
    /// Whether `total_edge_count` equals the graph's edge count
    pub consistent: bool,
    pub all_clusters: SizeSummary,
    pub above_thresholds: Vec<SizeSummary>,
    pub clusters: Vec<ClusterLine>,
    /// Share of inter-cluster edges in percent, absent when there are no edges
    pub inter_cluster_percentage: Option<f64>,
}

fn sizes(clusters: &ClustersInformation, threshold: Option<usize>) -> Vec<usize> {
    clusters
        .clusters
        .iter()
        .map(|c| c.size())
        .filter(|&size| threshold.map_or(true, |t| size > t))
        .collect()
}

fn empty_sample(threshold: Option<usize>, metric: &'static str) -> AnalysisError {
    match threshold {
        Some(threshold) => AnalysisError::NoQualifyingClusters { threshold, metric },
        None => AnalysisError::NoClusters { metric },
    }
}

/// Number of clusters with more than `threshold` nodes
pub fn clusters_larger_than(clusters: &ClustersInformation, threshold: usize) -> usize {
    clusters
        .clusters
        .iter()
        .filter(|c| c.size() > threshold)
        .count()
}

/// Mean cluster size, over all clusters or those above a size threshold
pub fn average_cluster_size(clusters: &ClustersInformation, threshold: Option<usize>) -> Result<f64> {
    let sizes = sizes(clusters, threshold);
    if sizes.is_empty() {
        return Err(empty_sample(threshold, "average cluster size"));
    }
    Ok(sizes.iter().sum::<usize>() as f64 / sizes.len() as f64)
}

/// Median cluster size, over all clusters or those above a size threshold
pub fn median_cluster_size(clusters: &ClustersInformation, threshold: Option<usize>) -> Result<f64> {
    median(&sizes(clusters, threshold)).ok_or_else(|| empty_sample(threshold, "median cluster size"))
}

impl SizeSummary {
    pub fn compute(clusters: &ClustersInformation, threshold: Option<usize>) -> Result<Self> {
        Ok(Self {
            threshold,
            cluster_count: match threshold {
                Some(t) => clusters_larger_than(clusters, t),
                None => clusters.cluster_count(),
            },
            average_size: average_cluster_size(clusters, threshold)?,
            median_size: median_cluster_size(clusters, threshold)?,
        })
    }
}

impl ClusterStats {
    pub fn compute(
        graph: &Graph,
        clusters: &ClustersInformation,
        thresholds: &[usize],
        sink: &mut dyn EventSink,
    ) -> Result<Self> {
        let intra = clusters.intra_cluster_edge_count();
        let inter = clusters.inter_cluster_edge_count();
        let total = intra + inter;

        let consistent = total == graph.edge_count();
        if !consistent {
            sink.emit(AnalysisEvent::EdgeCountMismatch {
                classified: total,
                total: graph.edge_count(),
            });
        }

        let all_clusters = SizeSummary::compute(clusters, None)?;
        let above_thresholds = thresholds
            .iter()
            .map(|&t| SizeSummary::compute(clusters, Some(t)))
            .collect::<Result<Vec<_>>>()?;

        let inter_cluster_percentage = if total > 0 {
            Some(inter as f64 / total as f64 * 100.0)
        } else {
            None
        };

        Ok(Self {
            cluster_count: clusters.cluster_count(),
            intra_cluster_edge_count: intra,
            inter_cluster_edge_count: inter,
            total_edge_count: total,
            consistent,
            all_clusters,
            above_thresholds,
            clusters: clusters
                .clusters
                .iter()
                .map(|c| ClusterLine {
                    id: c.id,
                    node_count: c.size(),
                    intra_cluster_edge_count: c.intra_cluster_edges.len(),
                })
                .collect(),
            inter_cluster_percentage,
        })
    }
}

/// Full statistics report of one analysis run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub graph: GraphStats,
    pub clusters: ClusterStats,
}

impl AnalysisReport {
    /// Compute every statistic; reading the inputs has no side effects
    /// beyond events
    pub fn compute(
        graph: &Graph,
        clusters: &ClustersInformation,
        thresholds: &[usize],
        sink: &mut dyn EventSink,
    ) -> Result<Self> {
        sink.emit(AnalysisEvent::StageStarted(Stage::Report));
        let report = Self {
            graph: GraphStats::compute(graph)?,
            clusters: ClusterStats::compute(graph, clusters, thresholds, sink)?,
        };
        sink.emit(AnalysisEvent::StageFinished(Stage::Report));
        Ok(report)
    }

    /// Human-readable report lines
    pub fn lines(&self) -> Vec<String> {
        let g = &self.graph;
        let c = &self.clusters;
        let mut lines = vec![
            format!("Number of nodes in the graph: {}", g.node_count),
            format!("Number of edges (with duplicates): {}", g.edge_count),
            format!("Number of unique edges: {}", g.unique_edge_count),
            format!("Number of isolated nodes: {}", g.isolated_node_count),
            format!("Average edges per node: {}", g.average_edges_per_node),
            format!(
                "Median number of incoming edges per node: {}",
                g.median_incoming_edges_per_node
            ),
            format!(
                "Median number of outgoing edges per node: {}",
                g.median_outgoing_edges_per_node
            ),
            format!("Number of clusters: {}", c.cluster_count),
            format!("Number of intra-cluster edges: {}", c.intra_cluster_edge_count),
            format!("Number of inter-cluster edges: {}", c.inter_cluster_edge_count),
            format!(
                "Total number of edges (intra + inter-cluster): {}",
                c.total_edge_count
            ),
        ];

        for s in &c.above_thresholds {
            if let Some(t) = s.threshold {
                lines.push(format!("Clusters with more than {} nodes: {}", t, s.cluster_count));
            }
        }

        lines.push(format!(
            "Average number of nodes in all clusters: {}",
            c.all_clusters.average_size
        ));
        for s in &c.above_thresholds {
            if let Some(t) = s.threshold {
                lines.push(format!(
                    "Average number of nodes in clusters with more than {} nodes: {}",
                    t, s.average_size
                ));
            }
        }

        lines.push(format!(
            "Median number of nodes in all clusters: {}",
            c.all_clusters.median_size
        ));
        for s in &c.above_thresholds {
            if let Some(t) = s.threshold {
                lines.push(format!(
                    "Median number of nodes in clusters with more than {} nodes: {}",
                    t, s.median_size
                ));
            }
        }

        for line in &c.clusters {
            lines.push(format!(
                "Cluster {}: {} nodes, {} intra-cluster edges",
                line.id, line.node_count, line.intra_cluster_edge_count
            ));
        }

        if let Some(pct) = c.inter_cluster_percentage {
            lines.push(format!("Percentage of inter-cluster edges: {:.2}%", pct));
        }

        lines
    }

    /// Send every report line to the sink
    pub fn emit(&self, sink: &mut dyn EventSink) {
        for line in self.lines() {
            sink.emit(AnalysisEvent::ReportLine(line));
        }
    }
}
