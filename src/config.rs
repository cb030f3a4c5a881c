//! Configuration management for the cluster analyzer

use std::path::{Path, PathBuf};

use crate::cluster::detection::Algorithm;

/// Configuration of one analysis run
#[derive(Debug, Clone)]
pub struct Config {
    /// Root of the project's analysis data (contains `graph/graph.json`)
    pub data_path: PathBuf,

    /// Community detection algorithm the clusters come from
    pub algorithm: Algorithm,

    /// Partition (or partition levels) written by an external tool
    pub partition_path: Option<PathBuf>,

    /// Cluster size thresholds for the restricted statistics
    pub size_thresholds: Vec<usize>,

    /// Draw single-node clusters in black
    pub single_node_cluster_color_black: bool,

    /// Skip the HTML visualizations
    pub skip_viz: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("data"),
            algorithm: Algorithm::Louvain,
            partition_path: None,
            size_thresholds: vec![2, 5],
            single_node_cluster_color_black: true,
            skip_viz: false,
        }
    }
}

impl Config {
    /// Create a new configuration for a data directory and algorithm
    pub fn new(data_path: impl Into<PathBuf>, algorithm: Algorithm) -> Self {
        Self {
            data_path: data_path.into(),
            algorithm,
            ..Self::default()
        }
    }

    pub fn paths(&self) -> AnalysisPaths {
        AnalysisPaths::new(&self.data_path, self.algorithm)
    }
}

/// File layout of one analysis run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisPaths {
    pub graph_input: PathBuf,
    pub clusters_dir: PathBuf,
    pub clusters_report: PathBuf,
    pub graph_report: PathBuf,
    pub summary: PathBuf,
    pub log_file: PathBuf,
    pub plot_dir: PathBuf,
}

impl AnalysisPaths {
    pub fn new(data_path: &Path, algorithm: Algorithm) -> Self {
        let clusters_dir = data_path.join("clusters").join(algorithm.dir_name());
        Self {
            graph_input: data_path.join("graph").join("graph.json"),
            clusters_report: clusters_dir.join("clusters.json"),
            graph_report: clusters_dir.join("graph.json"),
            summary: clusters_dir.join("summary.json"),
            log_file: clusters_dir.join("analysis.log"),
            plot_dir: clusters_dir.join("plot"),
            clusters_dir,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outputs_are_grouped_per_algorithm() {
        let config = Config::new("/tmp/joda", Algorithm::GirvanNewman);
        let paths = config.paths();

        assert_eq!(paths.graph_input, PathBuf::from("/tmp/joda/graph/graph.json"));
        assert_eq!(
            paths.clusters_report,
            PathBuf::from("/tmp/joda/clusters/girvan_newman/clusters.json")
        );
        assert_eq!(paths.plot_dir, PathBuf::from("/tmp/joda/clusters/girvan_newman/plot"));
    }

    #[test]
    fn default_thresholds() {
        assert_eq!(Config::default().size_thresholds, vec![2, 5]);
    }
}
