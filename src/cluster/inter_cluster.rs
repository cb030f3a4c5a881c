//! Classification of edges that cross cluster boundaries

use crate::cluster::{Cluster, ClustersInformation};
use crate::events::{AnalysisEvent, EventSink};
use crate::graph::{Edge, Graph};

/// Cluster a node belongs to, by linear scan over the clusters
///
/// When a node is listed in several clusters the first one in cluster order
/// wins. A miss is reported to the sink.
pub fn find_cluster_of_node<'a>(
    clusters: &'a ClustersInformation,
    name: &str,
    sink: &mut dyn EventSink,
) -> Option<&'a Cluster> {
    let cluster = clusters.cluster_of(name);
    if cluster.is_none() {
        sink.emit(AnalysisEvent::ClusterNotFound {
            node: name.to_string(),
        });
    }
    cluster
}

/// Edges of the graph whose endpoints lie in different clusters
///
/// Graph edge order and duplicates are preserved. An endpoint without a
/// cluster never matches anything, so its edges are always inter-cluster.
pub fn find_inter_cluster_edges(
    graph: &Graph,
    clusters: &ClustersInformation,
    sink: &mut dyn EventSink,
) -> Vec<Edge> {
    let mut inter_cluster_edges = Vec::new();
    for edge in graph.edges() {
        let src = find_cluster_of_node(clusters, edge.source().name(), sink).map(|c| c.id);
        let dst = find_cluster_of_node(clusters, edge.destination().name(), sink).map(|c| c.id);

        let crosses = match (src, dst) {
            (Some(a), Some(b)) => a != b,
            _ => true,
        };
        if crosses {
            inter_cluster_edges.push(edge.clone());
        }
    }
    inter_cluster_edges
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::NullSink;
    use crate::graph::{Method, Node};

    fn call(src: &str, dst: &str) -> Edge {
        Edge::new(
            Node::new(src),
            Node::new(dst),
            Method::new("call", dst),
            Method::new("caller", src),
        )
    }

    fn graph(nodes: &[&str], edges: &[(&str, &str)]) -> Graph {
        Graph::from_parts(
            nodes.iter().map(|n| Node::new(*n)).collect(),
            edges.iter().map(|(s, d)| call(s, d)).collect(),
        )
    }

    fn clusters(groups: &[&[&str]]) -> ClustersInformation {
        ClustersInformation::new(
            groups
                .iter()
                .enumerate()
                .map(|(i, g)| Cluster::new(i as u32 + 1, g.iter().map(|n| Node::new(*n)).collect()))
                .collect(),
        )
    }

    #[test]
    fn only_crossing_edges_are_kept() {
        let g = graph(&["A", "B", "C", "D"], &[("A", "B"), ("C", "D"), ("B", "C")]);
        let info = clusters(&[&["A", "B"], &["C", "D"]]);

        let inter = find_inter_cluster_edges(&g, &info, &mut NullSink);
        assert_eq!(inter, vec![call("B", "C")]);
    }

    #[test]
    fn duplicates_keep_graph_order() {
        let g = graph(&["A", "B"], &[("B", "A"), ("A", "B"), ("B", "A")]);
        let info = clusters(&[&["A"], &["B"]]);

        let inter = find_inter_cluster_edges(&g, &info, &mut NullSink);
        let keys: Vec<(&str, &str)> = inter
            .iter()
            .map(|e| (e.source().name(), e.destination().name()))
            .collect();
        assert_eq!(keys, vec![("B", "A"), ("A", "B"), ("B", "A")]);
    }

    #[test]
    fn unclustered_endpoint_makes_edge_inter_cluster() {
        let g = graph(&["A", "B", "C"], &[("A", "C"), ("C", "C")]);
        let info = clusters(&[&["A", "B"]]);
        let mut events: Vec<AnalysisEvent> = Vec::new();

        let inter = find_inter_cluster_edges(&g, &info, &mut events);

        assert_eq!(inter.len(), 2);
        assert_eq!(
            events
                .iter()
                .filter(|e| matches!(e, AnalysisEvent::ClusterNotFound { node } if node == "C"))
                .count(),
            3
        );
    }

    #[test]
    fn overlapping_node_uses_first_cluster() {
        // B is listed in both clusters; it resolves to cluster 1
        let g = graph(&["A", "B", "C"], &[("A", "B"), ("B", "C")]);
        let info = clusters(&[&["A", "B"], &["B", "C"]]);

        let inter = find_inter_cluster_edges(&g, &info, &mut NullSink);
        assert_eq!(inter, vec![call("B", "C")]);
    }
}
