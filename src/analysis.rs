//! End-to-end analysis run: load, partition, classify, persist, report

use std::fs;

use anyhow::{anyhow, Context, Result};

use crate::cluster::adapter::identify_clusters;
use crate::cluster::detection::{
    Algorithm, ConnectedComponents, GirvanNewmanLevels, Partitioner, PrecomputedPartition,
};
use crate::cluster::ClustersInformation;
use crate::config::Config;
use crate::data::{load_graph, load_levels, load_partition};
use crate::events::{AnalysisEvent, EventSink, Stage};
use crate::graph::Graph;
use crate::report::AnalysisReport;
use crate::storage;
use crate::viz;

/// Everything one run produced
#[derive(Debug)]
pub struct AnalysisOutcome {
    pub graph: Graph,
    pub clusters: ClustersInformation,
    pub report: AnalysisReport,
}

/// Partitioner for the configured algorithm
///
/// Connected components are computed in-process; every other algorithm
/// reads the result of an external run from `partition_path`.
pub fn load_partitioner(config: &Config) -> Result<Box<dyn Partitioner>> {
    if !config.algorithm.is_external() {
        return Ok(Box::new(ConnectedComponents));
    }

    let path = config.partition_path.as_ref().ok_or_else(|| {
        anyhow!(
            "the {} algorithm needs a partition file produced by an external tool",
            config.algorithm
        )
    })?;

    let partitioner: Box<dyn Partitioner> = match config.algorithm {
        Algorithm::GirvanNewman => Box::new(GirvanNewmanLevels::new(load_levels(path)?)),
        algorithm => Box::new(PrecomputedPartition::new(algorithm, load_partition(path)?)),
    };
    Ok(partitioner)
}

/// Run the whole pipeline for one configuration
///
/// Graph and cluster reports are written before statistics are computed, so
/// a statistic that cannot be computed does not lose them.
pub fn run_analysis(
    config: &Config,
    partitioner: &dyn Partitioner,
    sink: &mut dyn EventSink,
) -> Result<AnalysisOutcome> {
    let paths = config.paths();
    fs::create_dir_all(&paths.clusters_dir)
        .with_context(|| format!("Failed to create {}", paths.clusters_dir.display()))?;

    sink.emit(AnalysisEvent::StageStarted(Stage::Load));
    let graph = load_graph(&paths.graph_input, sink);
    sink.emit(AnalysisEvent::StageFinished(Stage::Load));

    if graph.is_empty() {
        return Err(anyhow!(
            "graph at {} is empty or could not be loaded",
            paths.graph_input.display()
        ));
    }
    log::info!("Loaded {}", graph);

    let clusters = identify_clusters(&graph, partitioner, sink)?;
    log::info!("{}", clusters);

    storage::save_graph_report(&graph, &paths.graph_report)?;
    storage::save_clusters_report(&clusters, &paths.clusters_report)?;

    if !config.skip_viz {
        viz::generate_visualizations(
            &clusters,
            &graph,
            &paths.plot_dir,
            config.single_node_cluster_color_black,
        )?;
    }

    let report = AnalysisReport::compute(&graph, &clusters, &config.size_thresholds, sink)?;
    report.emit(sink);
    storage::save_summary(&report, &paths.summary)?;

    Ok(AnalysisOutcome {
        graph,
        clusters,
        report,
    })
}
