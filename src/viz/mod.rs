//! Visualization generation module

use std::collections::{HashMap, HashSet};
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use anyhow::Result;
use serde_json::{json, Value};

use crate::cluster::ClustersInformation;
use crate::graph::Graph;

/// vis-network options: large labels, arrowheads and Barnes-Hut physics
const NETWORK_OPTIONS: &str = r#"{
    "nodes": {
        "font": {
            "size": 75,
            "face": "sans-serif"
        }
    },
    "edges": {
        "width": 8,
        "arrows": {
            "to": {
                "enabled": true,
                "scaleFactor": 2.5
            }
        }
    },
    "physics": {
        "barnesHut": {
            "gravitationalConstant": -80000,
            "centralGravity": 0.3,
            "springLength": 95,
            "damping": 0.09
        },
        "minVelocity": 0.75
    }
}"#;

const INTER_CLUSTER_COLOR: &str = "red";
const PLAIN_COLOR: &str = "black";

/// Generate the interactive graph pages into `plot_dir`
pub fn generate_visualizations(
    clusters: &ClustersInformation,
    graph: &Graph,
    plot_dir: &Path,
    single_node_cluster_color_black: bool,
) -> Result<()> {
    log::info!("Generating visualizations for {} clusters", clusters.clusters.len());

    fs::create_dir_all(plot_dir)?;

    generate_plain_graph(graph, &plot_dir.join("graph_without_clusters.html"))?;
    generate_clustered_graph(
        clusters,
        &plot_dir.join("graph_with_clusters.html"),
        single_node_cluster_color_black,
    )?;

    log::info!("Visualizations generated successfully");

    Ok(())
}

/// Every node and edge in black
fn generate_plain_graph(graph: &Graph, path: &Path) -> Result<()> {
    let mut seen = HashSet::new();
    let nodes: Vec<Value> = graph
        .nodes()
        .iter()
        .filter(|n| seen.insert(n.name()))
        .map(|n| json!({ "id": n.name(), "label": n.name(), "color": PLAIN_COLOR }))
        .collect();

    let edges: Vec<Value> = graph
        .edges()
        .iter()
        .map(|e| json!({ "from": e.source().name(), "to": e.destination().name(), "color": PLAIN_COLOR }))
        .collect();

    write_network_page(path, "Graph without clusters", &nodes, &edges)
}

/// Nodes and intra-cluster edges in their cluster colour, inter-cluster
/// edges in red
fn generate_clustered_graph(
    clusters: &ClustersInformation,
    path: &Path,
    single_node_cluster_color_black: bool,
) -> Result<()> {
    let colors = cluster_colors(clusters, single_node_cluster_color_black);

    let mut seen = HashSet::new();
    let mut nodes = Vec::new();
    let mut edges = Vec::new();

    for cluster in &clusters.clusters {
        let color = &colors[&cluster.id];
        for node in &cluster.nodes {
            if seen.insert(node.name()) {
                nodes.push(json!({ "id": node.name(), "label": node.name(), "color": color }));
            }
        }
    }

    for cluster in &clusters.clusters {
        let color = &colors[&cluster.id];
        for edge in &cluster.intra_cluster_edges {
            edges.push(json!({
                "from": edge.source().name(),
                "to": edge.destination().name(),
                "color": color,
            }));
        }
    }

    for edge in &clusters.inter_cluster_edges {
        edges.push(json!({
            "from": edge.source().name(),
            "to": edge.destination().name(),
            "color": INTER_CLUSTER_COLOR,
            "title": "Inter-cluster edge",
        }));
    }

    write_network_page(path, "Graph with clusters", &nodes, &edges)
}

/// Colour per cluster id
///
/// Colours are sampled from the HSV hue wheel at `n` even steps; the first
/// 10% of the wheel (reds, reserved for inter-cluster edges) is skipped.
/// Single-node clusters are black when requested.
pub fn cluster_colors(
    clusters: &ClustersInformation,
    single_node_cluster_color_black: bool,
) -> HashMap<u32, String> {
    let total = clusters.clusters.len();
    let safe_start = (total as f64 * 0.1) as usize;
    let safe_span = total.saturating_sub(safe_start).max(1);

    clusters
        .clusters
        .iter()
        .enumerate()
        .map(|(idx, cluster)| {
            let color = if single_node_cluster_color_black && cluster.size() == 1 {
                PLAIN_COLOR.to_string()
            } else {
                let safe_idx = safe_start + idx % safe_span;
                let (r, g, b) = hsv_to_rgb(safe_idx as f64 / total as f64);
                format!(
                    "rgba({}, {}, {}, 0.9)",
                    (r * 255.0) as u8,
                    (g * 255.0) as u8,
                    (b * 255.0) as u8
                )
            };
            (cluster.id, color)
        })
        .collect()
}

/// Fully saturated, full value colour for a hue in [0, 1]
fn hsv_to_rgb(hue: f64) -> (f64, f64, f64) {
    let h = (hue.rem_euclid(1.0)) * 6.0;
    let f = h - h.floor();
    let (q, t) = (1.0 - f, f);
    match h.floor() as u32 % 6 {
        0 => (1.0, t, 0.0),
        1 => (q, 1.0, 0.0),
        2 => (0.0, 1.0, t),
        3 => (0.0, q, 1.0),
        4 => (t, 0.0, 1.0),
        _ => (1.0, 0.0, q),
    }
}

fn write_network_page(path: &Path, title: &str, nodes: &[Value], edges: &[Value]) -> Result<()> {
    let mut file = File::create(path)?;

    writeln!(file, "<!DOCTYPE html>")?;
    writeln!(file, "<html lang=\"en\">")?;
    writeln!(file, "<head>")?;
    writeln!(file, "  <meta charset=\"UTF-8\">")?;
    writeln!(file, "  <title>{}</title>", title)?;
    writeln!(
        file,
        "  <script src=\"https://unpkg.com/vis-network/standalone/umd/vis-network.min.js\"></script>"
    )?;
    writeln!(file, "  <style>")?;
    writeln!(file, "    #network {{ width: 100%; height: 800px; border: 1px solid lightgray; }}")?;
    writeln!(file, "  </style>")?;
    writeln!(file, "</head>")?;
    writeln!(file, "<body>")?;
    writeln!(file, "  <div id=\"network\"></div>")?;
    writeln!(file, "  <script type=\"text/javascript\">")?;
    writeln!(file, "    var nodes = new vis.DataSet({});", serde_json::to_string(nodes)?)?;
    writeln!(file, "    var edges = new vis.DataSet({});", serde_json::to_string(edges)?)?;
    writeln!(file, "    var options = {};", NETWORK_OPTIONS)?;
    writeln!(file, "    var container = document.getElementById(\"network\");")?;
    writeln!(
        file,
        "    var network = new vis.Network(container, {{ nodes: nodes, edges: edges }}, options);"
    )?;
    writeln!(file, "  </script>")?;
    writeln!(file, "</body>")?;
    writeln!(file, "</html>")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cluster::Cluster;
    use crate::graph::{Edge, Method, Node};

    fn call(src: &str, dst: &str) -> Edge {
        Edge::new(Node::new(src), Node::new(dst), Method::default(), Method::default())
    }

    fn sample() -> (Graph, ClustersInformation) {
        let graph = Graph::from_parts(
            vec![Node::new("A"), Node::new("B"), Node::new("C")],
            vec![call("A", "B"), call("B", "C")],
        );
        let mut info = ClustersInformation::new(vec![
            Cluster::new(1, vec![Node::new("A"), Node::new("B")])
                .with_intra_cluster_edges(vec![call("A", "B")]),
            Cluster::new(2, vec![Node::new("C")]),
        ]);
        info.inter_cluster_edges = vec![call("B", "C")];
        (graph, info)
    }

    #[test]
    fn single_node_clusters_can_be_black() {
        let (_, info) = sample();
        let colors = cluster_colors(&info, true);
        assert_eq!(colors[&2], "black");
        assert!(colors[&1].starts_with("rgba("));

        let colors = cluster_colors(&info, false);
        assert_ne!(colors[&2], "black");
    }

    fn pairs(count: u32) -> ClustersInformation {
        ClustersInformation::new(
            (1..=count)
                .map(|id| Cluster::new(id, vec![Node::new(format!("N{}", id)), Node::new(format!("M{}", id))]))
                .collect(),
        )
    }

    #[test]
    fn few_clusters_get_distinct_colours() {
        let colors = cluster_colors(&pairs(5), false);
        let distinct: HashSet<&String> = colors.values().collect();
        assert_eq!(distinct.len(), 5);
    }

    #[test]
    fn red_end_of_the_wheel_is_skipped() {
        let colors = cluster_colors(&pairs(10), false);
        assert!(colors.values().all(|c| c != "rgba(255, 0, 0, 0.9)"));
    }

    #[test]
    fn hue_wheel_corners() {
        assert_eq!(hsv_to_rgb(0.0), (1.0, 0.0, 0.0));
        assert_eq!(hsv_to_rgb(1.0 / 3.0).1, 1.0);
    }

    #[test]
    fn pages_are_written() {
        let (graph, info) = sample();
        let dir = tempfile::tempdir().unwrap();
        let plot_dir = dir.path().join("plot");

        generate_visualizations(&info, &graph, &plot_dir, true).unwrap();

        let plain = fs::read_to_string(plot_dir.join("graph_without_clusters.html")).unwrap();
        assert!(plain.contains("\"from\":\"A\""));
        assert!(!plain.contains("Inter-cluster edge"));

        let clustered = fs::read_to_string(plot_dir.join("graph_with_clusters.html")).unwrap();
        assert!(clustered.contains("Inter-cluster edge"));
        assert!(clustered.contains("\"color\":\"red\""));
    }
}
