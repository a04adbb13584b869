/// Flat, pointer-free form of a SpatialTree for GPU traversal.
///
/// Nodes are emitted in pre-order (root at index 0, every child after its
/// parent). Each node owns a contiguous run of the shared content sequence.

use std::ops::Range;
use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use crate::config::ContentLayout;
use crate::geometry::{BoundingBox, Primitive};
use super::tree::{SpatialTree, TreeNode};

/// GPU node record (48 bytes, matches the shader struct).
///
/// Bounds are padded to vec4. `left` / `right` index the node array or hold
/// `NO_CHILD`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct FlatNode {
    pub bound_min: [f32; 4],
    pub bound_max: [f32; 4],
    pub left: i32,
    pub right: i32,
    pub contents_offset: u32,
    pub contents_count: u32,
}

impl FlatNode {
    /// Sentinel for an absent child
    pub const NO_CHILD: i32 = -1;

    fn new(bounds: &BoundingBox, contents_offset: u32, contents_count: u32) -> Self {
        Self {
            bound_min: bounds.min().extend(0.0).to_array(),
            bound_max: bounds.max().extend(0.0).to_array(),
            left: Self::NO_CHILD,
            right: Self::NO_CHILD,
            contents_offset,
            contents_count,
        }
    }

    /// Both children absent
    pub fn is_leaf(&self) -> bool {
        self.left == Self::NO_CHILD && self.right == Self::NO_CHILD
    }

    pub fn left_child(&self) -> Option<usize> {
        usize::try_from(self.left).ok()
    }

    pub fn right_child(&self) -> Option<usize> {
        usize::try_from(self.right).ok()
    }

    /// Node box rebuilt from the stored corners
    pub fn bounds(&self) -> BoundingBox {
        BoundingBox::from_corners(
            Vec3::from_slice(&self.bound_min[..3]),
            Vec3::from_slice(&self.bound_max[..3]),
        )
    }

    /// Range of this node's entries in the content sequence
    pub fn contents_range(&self) -> Range<usize> {
        let start = self.contents_offset as usize;
        start..start + self.contents_count as usize
    }
}

/// One entry of the content sequence: primitive index and its type tag
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Pod, Zeroable)]
pub struct ContentRecord {
    pub index: u32,
    pub primitive_type: u32,
}

/// Flattened tree: node records plus the shared content sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct FlatStructure {
    nodes: Vec<FlatNode>,
    contents: Vec<ContentRecord>,
    layout: ContentLayout,
}

impl FlatStructure {
    /// Flatten `tree`, whose indices refer to `primitives`.
    pub(crate) fn from_tree(
        tree: &SpatialTree,
        primitives: &[Primitive],
        layout: ContentLayout,
    ) -> Self {
        let mut nodes = Vec::with_capacity(tree.node_count());
        let mut contents = Vec::with_capacity(primitives.len());

        build_flat(tree.root(), primitives, &mut nodes, &mut contents);

        crate::engine_info!(
            tree.kind().log_source(),
            "Flattened tree: {} nodes, {} content entries",
            nodes.len(),
            contents.len()
        );

        Self { nodes, contents, layout }
    }

    pub fn nodes(&self) -> &[FlatNode] {
        &self.nodes
    }

    pub fn contents(&self) -> &[ContentRecord] {
        &self.contents
    }

    pub fn layout(&self) -> ContentLayout {
        self.layout
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn content_count(&self) -> usize {
        self.contents.len()
    }

    /// True for a scene without primitives
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Content entries owned by one node
    pub fn contents_of(&self, node: &FlatNode) -> &[ContentRecord] {
        &self.contents[node.contents_range()]
    }

    /// Node array as bytes
    pub fn nodes_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.nodes)
    }

    /// Content sequence as bytes, serialized per the layout
    pub fn contents_bytes(&self) -> Vec<u8> {
        match self.layout {
            ContentLayout::Indices => {
                let indices: Vec<u32> = self.contents.iter().map(|c| c.index).collect();
                bytemuck::cast_slice(&indices).to_vec()
            }
            ContentLayout::TypedIndices => bytemuck::cast_slice(&self.contents).to_vec(),
        }
    }
}

/// Pre-order serialization of `node`. Returns its index, or `NO_CHILD`.
fn build_flat(
    node: Option<&TreeNode>,
    primitives: &[Primitive],
    nodes: &mut Vec<FlatNode>,
    contents: &mut Vec<ContentRecord>,
) -> i32 {
    let Some(node) = node else {
        return FlatNode::NO_CHILD;
    };

    let index = nodes.len();
    let offset = contents.len() as u32;
    contents.extend(node.primitives.iter().map(|&i| ContentRecord {
        index: i,
        primitive_type: primitives[i as usize].primitive_type().tag(),
    }));
    nodes.push(FlatNode::new(&node.bounds, offset, node.primitives.len() as u32));

    // Children are appended after the parent; patch the links by index
    let left = build_flat(node.left.as_deref(), primitives, nodes, contents);
    nodes[index].left = left;
    let right = build_flat(node.right.as_deref(), primitives, nodes, contents);
    nodes[index].right = right;

    index as i32
}

#[cfg(test)]
#[path = "flat_tests.rs"]
mod tests;
