use std::fs::{self, File};
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use uml_cluster_analyzer::analysis::{load_partitioner, run_analysis};
use uml_cluster_analyzer::cluster::detection::Algorithm;
use uml_cluster_analyzer::config::Config;
use uml_cluster_analyzer::LogSink;

#[derive(Parser, Debug)]
#[clap(
    name = "uml-cluster-analyzer",
    about = "Cluster analysis of UML class/method dependency graphs"
)]
struct Cli {
    /// Analysis data directory (reads graph/graph.json)
    #[clap(long, default_value = "data")]
    data_path: PathBuf,

    /// Community detection algorithm the clusters come from
    #[clap(long, value_enum, default_value = "louvain")]
    algorithm: Algorithm,

    /// Partition JSON from an external tool (partition levels for girvan-newman)
    #[clap(long)]
    partition: Option<PathBuf>,

    /// Cluster size thresholds for the restricted statistics
    #[clap(long, value_delimiter = ',', default_value = "2,5")]
    thresholds: Vec<usize>,

    /// Colour single-node clusters like the other clusters
    #[clap(long)]
    color_single_node_clusters: bool,

    /// Skip visualizations
    #[clap(long)]
    skip_viz: bool,

    /// Number of worker threads (0 = use all available cores)
    #[clap(long, default_value = "0")]
    threads: usize,

    /// Also write the log to analysis.log in the clusters directory
    #[clap(long)]
    log_file: bool,

    /// Verbose logging
    #[clap(long, short)]
    verbose: bool,
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Cli::parse();

    let config = Config {
        data_path: args.data_path,
        algorithm: args.algorithm,
        partition_path: args.partition,
        size_thresholds: args.thresholds,
        single_node_cluster_color_black: !args.color_single_node_clusters,
        skip_viz: args.skip_viz,
    };
    let paths = config.paths();

    // Configure logging
    let log_level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    let mut logger = env_logger::Builder::new();
    logger.filter_level(log_level).format_timestamp_millis();
    if args.log_file {
        fs::create_dir_all(&paths.clusters_dir)?;
        let file = File::create(&paths.log_file)?;
        logger.target(env_logger::Target::Pipe(Box::new(file)));
    }
    logger.init();

    if args.log_file {
        log::info!("Logging setup complete. Logs will be saved to {}", paths.log_file.display());
    }

    // Set number of threads
    let num_threads = if args.threads > 0 {
        args.threads
    } else {
        // If threads = 0, use all available cores
        num_cpus::get()
    };

    log::info!("Using {} worker threads", num_threads);
    rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build_global()?;

    log::info!("Starting cluster analysis ({})", config.algorithm);
    log::info!("Input: {}", paths.graph_input.display());
    log::info!("Output: {}", paths.clusters_dir.display());

    let partitioner = load_partitioner(&config)?;
    let outcome = run_analysis(&config, partitioner.as_ref(), &mut LogSink)?;

    log::info!(
        "Analysis complete: {} clusters, {} inter-cluster edges. Results saved to {}",
        outcome.clusters.cluster_count(),
        outcome.clusters.inter_cluster_edge_count(),
        paths.clusters_dir.display()
    );

    Ok(())
}
