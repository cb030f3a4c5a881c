//! JSON file handling for graph and partition data

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;

use crate::cluster::{ClustersInformation, Partition};
use crate::data::records::{ClustersRecord, GraphRecord};
use crate::events::{AnalysisEvent, EventSink};
use crate::graph::Graph;

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    if !path.exists() {
        return Err(anyhow::anyhow!("File does not exist: {}", path.display()));
    }
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let value = serde_json::from_str(&text)
        .with_context(|| format!("Error decoding JSON from {}", path.display()))?;
    Ok(value)
}

/// Load a dependency graph
///
/// Loading never fails: a missing, unreadable or malformed file is reported
/// to the sink and yields an empty graph.
pub fn load_graph(path: &Path, sink: &mut dyn EventSink) -> Graph {
    let parsed = read_json::<GraphRecord>(path)
        .and_then(|record| record.into_graph(sink).map_err(anyhow::Error::from));

    match parsed {
        Ok(graph) => graph,
        Err(err) => {
            sink.emit(AnalysisEvent::InputRejected {
                path: path.display().to_string(),
                reason: format!("{:#}", err),
            });
            Graph::new()
        }
    }
}

/// Load a partition written by an external community-detection tool:
/// a JSON array of arrays of node names
pub fn load_partition(path: &Path) -> Result<Partition> {
    read_json(path).context("Failed to load partition")
}

/// Load the levels of an external hierarchical run: a JSON array of
/// partitions, coarsest first
pub fn load_levels(path: &Path) -> Result<Vec<Partition>> {
    read_json(path).context("Failed to load partition levels")
}

/// Re-read a clusters report
pub fn load_clusters(path: &Path) -> Result<ClustersInformation> {
    let record: ClustersRecord = read_json(path)?;
    let info = record
        .into_clusters_information()
        .with_context(|| format!("Invalid clusters report {}", path.display()))?;
    Ok(info)
}
