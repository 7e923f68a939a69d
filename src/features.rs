//! Boundary contracts towards generic dataset machinery and labels.

use crate::ClassVal;

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum FeatureType {
    Any,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum FeatureClass {
    Any,
}

/// Lets generic dataset code enumerate factor graphs uniformly with other
/// example types. A factor graph is not a fixed-shape feature vector, so the
/// type and class tags are degenerate.
pub trait Features {
    /// Number of sub-units in one example; for a factor graph, its factors.
    fn num_vectors(&self) -> usize;

    fn feature_type(&self) -> FeatureType {
        FeatureType::Any
    }

    fn feature_class(&self) -> FeatureClass {
        FeatureClass::Any
    }
}

/// A fully observed assignment over all variables of a graph.
pub trait Observation {
    fn assignment(&self) -> &[ClassVal];
}

impl Observation for Vec<ClassVal> {
    fn assignment(&self) -> &[ClassVal] {
        self.as_slice()
    }
}
