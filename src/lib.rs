pub mod disjoint_set;
pub mod factor;
pub mod factor_graph;
pub mod features;

use thiserror::Error;

/// A discrete variable value.
pub type ClassVal = u32;
/// Index of a variable in a graph.
pub type VarId = usize;
/// Index of a factor in a graph's factor list.
pub type FactorId = usize;
/// Handle of a shared data source in a graph's source arena.
pub type SourceId = usize;

type Result<T> = std::result::Result<T, FactorlibError>;

#[derive(Error, Debug)]
pub enum FactorlibError {
    #[error("Index {index} out of range, bound is {bound}.")]
    IndexOutOfRange { index: usize, bound: usize },
    #[error("Dimension mismatch: got {got}, expected {expected}.")]
    DimensionMismatch { got: usize, expected: usize },
    #[error("Invalid size {0}, must be at least 1.")]
    InvalidSize(usize),
    #[error("Variable {0} appears more than once in a factor scope.")]
    RepeatedScopeVar(VarId),
    #[error("Graph topology has not been built, run connect_components first.")]
    StaleTopology,
}

pub use disjoint_set::DisjointSet;
pub use factor::{Factor, FactorSource};
pub use factor_graph::FactorGraph;
pub use features::{FeatureClass, FeatureType, Features, Observation};
