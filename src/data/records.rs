//! On-disk JSON shapes for graphs and cluster reports

use serde::{Deserialize, Serialize};

use crate::cluster::{Cluster, ClustersInformation};
use crate::error::{AnalysisError, Result};
use crate::events::EventSink;
use crate::graph::{Edge, Graph, GraphBuilder, Method, Node, Parameter};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArgumentRecord {
    #[serde(rename = "type", default)]
    pub type_name: String,
    #[serde(default)]
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MethodRecord {
    #[serde(default)]
    pub return_type: String,
    #[serde(default)]
    pub method_name: String,
    #[serde(default)]
    pub declaring_class: String,
    #[serde(default)]
    pub arguments: Vec<ArgumentRecord>,
    #[serde(default)]
    pub method_signature: String,
}

impl From<&Method> for MethodRecord {
    fn from(method: &Method) -> Self {
        Self {
            return_type: method.return_type.clone(),
            method_name: method.name.clone(),
            declaring_class: method.declaring_class.clone(),
            arguments: method
                .parameters
                .iter()
                .map(|p| ArgumentRecord {
                    type_name: p.type_name.clone(),
                    value: p.name.clone(),
                })
                .collect(),
            method_signature: method.signature.clone(),
        }
    }
}

impl From<MethodRecord> for Method {
    fn from(record: MethodRecord) -> Self {
        Self {
            name: record.method_name,
            parameters: record
                .arguments
                .into_iter()
                .map(|a| Parameter {
                    type_name: a.type_name,
                    name: a.value,
                })
                .collect(),
            return_type: record.return_type,
            declaring_class: record.declaring_class,
            signature: record.method_signature,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    #[serde(default)]
    pub name: String,
}

impl From<&Node> for NodeRecord {
    fn from(node: &Node) -> Self {
        Self {
            name: node.name().to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EdgeRecord {
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub destination: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_method: Option<MethodRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_method: Option<MethodRecord>,
}

impl From<&Edge> for EdgeRecord {
    fn from(edge: &Edge) -> Self {
        Self {
            source: edge.source().name().to_string(),
            destination: edge.destination().name().to_string(),
            link_method: Some(edge.method().into()),
            source_method: Some(edge.source_method().into()),
        }
    }
}

impl EdgeRecord {
    /// Both method descriptors, or the name of the first missing one
    fn methods(self) -> Result<(String, String, Method, Method)> {
        let Self {
            source,
            destination,
            link_method,
            source_method,
        } = self;
        let missing = |field: &'static str| AnalysisError::MissingMethod {
            from: source.clone(),
            to: destination.clone(),
            field,
        };
        let method = link_method.ok_or_else(|| missing("link_method"))?;
        let source_method = source_method.ok_or_else(|| missing("source_method"))?;
        Ok((source, destination, method.into(), source_method.into()))
    }

    /// Standalone edge with fresh endpoint nodes
    pub fn into_edge(self) -> Result<Edge> {
        let (source, destination, method, source_method) = self.methods()?;
        Ok(Edge::new(
            Node::new(source),
            Node::new(destination),
            method,
            source_method,
        ))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphRecord {
    #[serde(default)]
    pub nodes: Vec<NodeRecord>,
    #[serde(default)]
    pub edges: Vec<EdgeRecord>,
}

impl From<&Graph> for GraphRecord {
    fn from(graph: &Graph) -> Self {
        Self {
            nodes: graph.nodes().iter().map(NodeRecord::from).collect(),
            edges: graph.edges().iter().map(EdgeRecord::from).collect(),
        }
    }
}

impl GraphRecord {
    /// Build the graph; edges whose endpoints are not listed as nodes are
    /// dropped and reported, edges without method metadata are rejected
    pub fn into_graph(self, sink: &mut dyn EventSink) -> Result<Graph> {
        let mut builder = GraphBuilder::with_capacity(self.nodes.len());
        for node in &self.nodes {
            builder.add_node(&node.name);
        }
        for edge in self.edges {
            let (source, destination, method, source_method) = edge.methods()?;
            builder.add_edge(&source, &destination, method, source_method, sink);
        }
        Ok(builder.build())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClusterRecord {
    pub id: u32,
    #[serde(default)]
    pub nodes: Vec<NodeRecord>,
    #[serde(default)]
    pub intra_cluster_edges: Vec<EdgeRecord>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClustersRecord {
    #[serde(default)]
    pub clusters: Vec<ClusterRecord>,
    #[serde(default)]
    pub inter_cluster_edges: Vec<EdgeRecord>,
}

impl From<&ClustersInformation> for ClustersRecord {
    fn from(info: &ClustersInformation) -> Self {
        Self {
            clusters: info
                .clusters
                .iter()
                .map(|c| ClusterRecord {
                    id: c.id,
                    nodes: c.nodes.iter().map(NodeRecord::from).collect(),
                    intra_cluster_edges: c.intra_cluster_edges.iter().map(EdgeRecord::from).collect(),
                })
                .collect(),
            inter_cluster_edges: info.inter_cluster_edges.iter().map(EdgeRecord::from).collect(),
        }
    }
}

impl ClustersRecord {
    pub fn into_clusters_information(self) -> Result<ClustersInformation> {
        let clusters = self
            .clusters
            .into_iter()
            .map(|c| {
                let edges = c
                    .intra_cluster_edges
                    .into_iter()
                    .map(EdgeRecord::into_edge)
                    .collect::<Result<Vec<_>>>()?;
                let nodes = c.nodes.into_iter().map(|n| Node::new(n.name)).collect();
                Ok(Cluster::new(c.id, nodes).with_intra_cluster_edges(edges))
            })
            .collect::<Result<Vec<_>>>()?;

        let mut info = ClustersInformation::new(clusters);
        info.inter_cluster_edges = self
            .inter_cluster_edges
            .into_iter()
            .map(EdgeRecord::into_edge)
            .collect::<Result<Vec<_>>>()?;
        Ok(info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{AnalysisEvent, NullSink};

    const SAMPLE: &str = r#"{
        "nodes": [{"name": "Order"}, {"name": "Invoice"}],
        "edges": [
            {
                "source": "Order",
                "destination": "Invoice",
                "link_method": {
                    "method_name": "total",
                    "return_type": "double",
                    "declaring_class": "Invoice",
                    "method_signature": "total(int)",
                    "arguments": [{"type": "int", "value": "count"}]
                },
                "source_method": {"method_name": "checkout", "declaring_class": "Order"}
            }
        ]
    }"#;

    #[test]
    fn parses_input_graph() {
        let record: GraphRecord = serde_json::from_str(SAMPLE).unwrap();
        let graph = record.into_graph(&mut NullSink).unwrap();

        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 1);
        let edge = &graph.edges()[0];
        assert_eq!(edge.method().name, "total");
        assert_eq!(edge.method().parameters[0].name, "count");
        assert_eq!(edge.method().parameters[0].type_name, "int");
        assert_eq!(edge.source_method().return_type, "");
        assert_eq!(edge.weight(), 1.0);
    }

    #[test]
    fn missing_link_method_is_rejected() {
        let json = r#"{
            "nodes": [{"name": "A"}, {"name": "B"}],
            "edges": [{"source": "A", "destination": "B", "source_method": {}}]
        }"#;
        let record: GraphRecord = serde_json::from_str(json).unwrap();

        let err = record.into_graph(&mut NullSink).unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::MissingMethod { field: "link_method", .. }
        ));
    }

    #[test]
    fn dangling_edges_are_skipped() {
        let json = r#"{
            "nodes": [{"name": "A"}],
            "edges": [{"source": "A", "destination": "Gone", "link_method": {}, "source_method": {}}]
        }"#;
        let record: GraphRecord = serde_json::from_str(json).unwrap();
        let mut events: Vec<AnalysisEvent> = Vec::new();

        let graph = record.into_graph(&mut events).unwrap();
        assert_eq!(graph.edge_count(), 0);
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn method_record_uses_report_field_names() {
        let record: GraphRecord = serde_json::from_str(SAMPLE).unwrap();
        let graph = record.into_graph(&mut NullSink).unwrap();

        let value = serde_json::to_value(GraphRecord::from(&graph)).unwrap();
        let link = &value["edges"][0]["link_method"];
        assert_eq!(link["method_name"], "total");
        assert_eq!(link["arguments"][0]["type"], "int");
        assert_eq!(link["arguments"][0]["value"], "count");
        assert_eq!(link["method_signature"], "total(int)");
    }
}
