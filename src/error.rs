//! Error types for the analysis core

use std::fmt;

/// Which end of an edge a lookup failed for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointRole {
    Source,
    Destination,
}

impl fmt::Display for EndpointRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Source => write!(f, "source"),
            Self::Destination => write!(f, "destination"),
        }
    }
}

/// Errors that abort an analysis run
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("graph does not have the {role} node `{name}` in its nodes")]
    MissingEndpoint { role: EndpointRole, name: String },

    #[error("edge {from} -> {to} has no {field}")]
    MissingMethod {
        from: String,
        to: String,
        field: &'static str,
    },

    #[error("cluster {cluster_id} references node `{name}` which is not in the graph")]
    UnknownPartitionNode { cluster_id: u32, name: String },

    #[error("graph has no nodes, cannot compute {metric}")]
    EmptyGraph { metric: &'static str },

    #[error("there are no clusters, cannot compute {metric}")]
    NoClusters { metric: &'static str },

    #[error("no cluster has more than {threshold} nodes, cannot compute {metric}")]
    NoQualifyingClusters {
        threshold: usize,
        metric: &'static str,
    },

    #[error("partition level sequence is empty")]
    NoPartitionLevels,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
