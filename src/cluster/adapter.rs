//! Turning a partition of node names into clusters bound to the graph

use std::collections::HashSet;

use rayon::prelude::*;

use crate::cluster::detection::Partitioner;
use crate::cluster::inter_cluster::find_inter_cluster_edges;
use crate::cluster::metrics::modularity;
use crate::cluster::{Cluster, ClustersInformation, Partition};
use crate::error::{AnalysisError, Result};
use crate::events::{AnalysisEvent, EventSink, Stage};
use crate::graph::algorithms::to_adjacency;
use crate::graph::{Graph, Node};

/// Build one cluster per community, ids starting at 1 in partition order
///
/// Every name must resolve to a node of the graph. Intra-cluster edges are
/// the graph edges whose source and destination names are both in the
/// community. Inter-cluster edges are left empty.
pub fn build_clusters(
    graph: &Graph,
    partition: &Partition,
    sink: &mut dyn EventSink,
) -> Result<ClustersInformation> {
    sink.emit(AnalysisEvent::StageStarted(Stage::Adapt));

    // Resolve names up front so misses can be reported in order
    let mut resolved: Vec<(u32, Vec<Node>, HashSet<&str>)> = Vec::with_capacity(partition.len());
    for (idx, community) in partition.iter().enumerate() {
        let id = idx as u32 + 1;
        let mut nodes = Vec::with_capacity(community.len());
        let mut names: HashSet<&str> = HashSet::with_capacity(community.len());
        for name in community {
            // a community is a set; repeated names count once
            if !names.insert(name.as_str()) {
                continue;
            }
            let node = graph.get_node_by_name(name, sink).ok_or_else(|| {
                AnalysisError::UnknownPartitionNode {
                    cluster_id: id,
                    name: name.clone(),
                }
            })?;
            nodes.push(node.clone());
        }
        resolved.push((id, nodes, names));
    }

    // Each cluster writes only its own edge list
    let clusters: Vec<Cluster> = resolved
        .into_par_iter()
        .map(|(id, nodes, names)| {
            let intra_cluster_edges = graph
                .edges()
                .iter()
                .filter(|e| {
                    names.contains(e.source().name()) && names.contains(e.destination().name())
                })
                .cloned()
                .collect();
            Cluster::new(id, nodes).with_intra_cluster_edges(intra_cluster_edges)
        })
        .collect();

    sink.emit(AnalysisEvent::StageFinished(Stage::Adapt));
    Ok(ClustersInformation::new(clusters))
}

/// Partition the graph, build its clusters and classify inter-cluster edges
pub fn identify_clusters(
    graph: &Graph,
    partitioner: &dyn Partitioner,
    sink: &mut dyn EventSink,
) -> Result<ClustersInformation> {
    sink.emit(AnalysisEvent::StageStarted(Stage::Partition));
    let adjacency = to_adjacency(graph, sink);
    let partition = partitioner.partition(&adjacency, sink)?;
    sink.emit(AnalysisEvent::Modularity {
        algorithm: partitioner.algorithm().to_string(),
        value: modularity(&adjacency, &partition),
    });
    sink.emit(AnalysisEvent::StageFinished(Stage::Partition));

    let mut clusters = build_clusters(graph, &partition, sink)?;

    sink.emit(AnalysisEvent::StageStarted(Stage::Classify));
    clusters.inter_cluster_edges = find_inter_cluster_edges(graph, &clusters, sink);
    sink.emit(AnalysisEvent::StageFinished(Stage::Classify));

    Ok(clusters)
}
