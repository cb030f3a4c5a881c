//! Dependency graph model and algorithms module

pub mod model;
pub mod builder;
pub mod algorithms;

pub use algorithms::Adjacency;
pub use builder::GraphBuilder;
pub use model::{Edge, EdgeKey, Graph, Method, Node, Parameter};
