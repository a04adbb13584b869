/// Acceleration structure construction and flattening.

mod flat;
mod tree;

pub use flat::{ContentRecord, FlatNode, FlatStructure};

use crate::config::AccelConfig;
use crate::geometry::Primitive;
use tree::SpatialTree;

/// Entry point of the build pipeline: skeleton, insertion, pruning, flattening.
pub struct AccelerationStructure;

impl AccelerationStructure {
    /// Build the flat structure over `primitives`.
    ///
    /// Never fails: an empty slice gives empty node and content arrays, and
    /// degenerate primitives are placed like any other. The intermediate tree
    /// is dropped once flattened.
    pub fn build(primitives: &[Primitive], config: &AccelConfig) -> FlatStructure {
        let tree = SpatialTree::build(primitives, config.tree_kind, config.max_depth);
        FlatStructure::from_tree(&tree, primitives, config.content_layout())
    }
}
