//! Results persistence module

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::to_string_pretty;

use crate::cluster::ClustersInformation;
use crate::data::records::{ClustersRecord, GraphRecord};
use crate::graph::Graph;
use crate::report::AnalysisReport;

fn write_json<T: Serialize>(value: &T, path: &Path) -> Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    let mut file = File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    file.write_all(to_string_pretty(value)?.as_bytes())?;
    Ok(())
}

/// Save the detailed graph report (same shape as the input graph)
pub fn save_graph_report(graph: &Graph, path: &Path) -> Result<()> {
    write_json(&GraphRecord::from(graph), path)?;
    log::info!("Detailed graph report saved to {}", path.display());
    Ok(())
}

/// Save the detailed clusters report
pub fn save_clusters_report(clusters: &ClustersInformation, path: &Path) -> Result<()> {
    write_json(&ClustersRecord::from(clusters), path)?;
    log::info!("Detailed clusters report saved to {}", path.display());
    Ok(())
}

/// Save the statistics summary
pub fn save_summary(report: &AnalysisReport, path: &Path) -> Result<()> {
    write_json(report, path)?;
    log::info!("Summary saved to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{load_clusters, load_graph};
    use crate::cluster::Cluster;
    use crate::events::{AnalysisEvent, NullSink};
    use crate::graph::{Edge, Method, Node, Parameter};

    fn call(src: &str, dst: &str) -> Edge {
        let mut method = Method::new("handle", dst);
        method.return_type = "void".into();
        Edge::new(Node::new(src), Node::new(dst), method, Method::new("send", src))
    }

    #[test]
    fn clusters_report_round_trips() {
        let mut info = ClustersInformation::new(vec![
            Cluster::new(1, vec![Node::new("A"), Node::new("B")])
                .with_intra_cluster_edges(vec![call("A", "B")]),
            Cluster::new(2, vec![Node::new("C")]),
        ]);
        info.inter_cluster_edges = vec![call("B", "C"), call("B", "C")];

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clusters").join("clusters.json");
        save_clusters_report(&info, &path).unwrap();

        let reloaded = load_clusters(&path).unwrap();
        assert_eq!(reloaded, info);
        assert_eq!(reloaded.clusters[0].intra_cluster_edges[0].method().return_type, "void");
    }

    #[test]
    fn graph_report_has_input_shape() {
        let graph = Graph::from_parts(vec![Node::new("A"), Node::new("B")], vec![call("A", "B")]);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("graph.json");

        save_graph_report(&graph, &path).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["nodes"][1]["name"], "B");
        assert_eq!(value["edges"][0]["source"], "A");
        assert_eq!(value["edges"][0]["source_method"]["method_name"], "send");
    }

    #[test]
    fn graph_report_reloads_as_the_same_graph() {
        let mut total = Method::new("total", "Invoice");
        total.return_type = "double".into();
        total.parameters = vec![Parameter {
            type_name: "int".into(),
            name: "count".into(),
        }];
        total.signature = "double total(int count)".into();
        let checkout = Edge::new(
            Node::new("Cart"),
            Node::new("Invoice"),
            total,
            Method::new("checkout", "Cart"),
        );
        let graph = Graph::from_parts(
            vec![Node::new("Cart"), Node::new("Invoice"), Node::new("Audit")],
            vec![checkout.clone(), call("Invoice", "Cart"), checkout],
        );
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("graph.json");

        save_graph_report(&graph, &path).unwrap();
        let mut events: Vec<AnalysisEvent> = Vec::new();
        let reloaded = load_graph(&path, &mut events);

        assert!(events.is_empty(), "{events:?}");
        assert_eq!(reloaded.nodes(), graph.nodes());
        assert_eq!(reloaded.count_isolated_nodes(), 1);
        assert_eq!(reloaded.edge_count(), 3);
        assert_eq!(reloaded.unique_edge_count(), 2);

        let metadata = |g: &Graph| {
            let mut rows: Vec<_> = g
                .edges()
                .iter()
                .map(|e| {
                    (
                        e.source().name().to_string(),
                        e.destination().name().to_string(),
                        e.method().clone(),
                        e.method().signature.clone(),
                        e.source_method().clone(),
                    )
                })
                .collect();
            rows.sort_by(|a, b| (&a.0, &a.1).cmp(&(&b.0, &b.1)));
            rows
        };
        assert_eq!(metadata(&reloaded), metadata(&graph));
        assert_eq!(reloaded.edges()[0].method().parameters[0].type_name, "int");

        // Reloading the saved report is stable
        let again_path = dir.path().join("again.json");
        save_graph_report(&reloaded, &again_path).unwrap();
        assert_eq!(load_graph(&again_path, &mut NullSink).nodes(), graph.nodes());
    }
}
