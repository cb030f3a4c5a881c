//! Core library functions for the UML dependency cluster analyzer

pub mod analysis;
pub mod cluster;
pub mod config;
pub mod data;
pub mod error;
pub mod events;
pub mod graph;
pub mod report;
pub mod storage;
pub mod viz;

pub use cluster::{Cluster, ClustersInformation, Partition};
pub use error::{AnalysisError, Result};
pub use events::{AnalysisEvent, EventSink, LogSink};
pub use graph::{Edge, Graph, Method, Node};
