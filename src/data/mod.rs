//! Input data handling: JSON records and loaders

pub mod records;
pub mod json;

pub use json::{load_clusters, load_graph, load_levels, load_partition};
