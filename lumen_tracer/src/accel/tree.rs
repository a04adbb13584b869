/// SpatialTree — binary median-split tree over scene primitives.
///
/// Built in three passes over a static skeleton:
/// 1. An empty skeleton is split at the median primitive center, cycling the
///    split axis X, Y, Z with depth, down to `max_depth`.
/// 2. Each primitive is placed in the first node (left before right) whose
///    box fully contains it. A primitive straddling both children stays in
///    the parent.
/// 3. Childless nodes that received no primitives are pruned bottom-up.
///
/// Both tree kinds share these passes; the kind only selects the log source
/// and, at flattening time, the default content layout.

use glam::Vec3;
use crate::config::TreeKind;
use crate::geometry::{Axis, BoundingBox, Primitive};

/// A node of the tree under construction.
pub(crate) struct TreeNode {
    /// Region covered by this node
    pub(crate) bounds: BoundingBox,
    /// Lower half along the split axis
    pub(crate) left: Option<Box<TreeNode>>,
    /// Upper half along the split axis
    pub(crate) right: Option<Box<TreeNode>>,
    /// Indices of primitives held directly by this node
    pub(crate) primitives: Vec<u32>,
}

impl TreeNode {
    fn new(bounds: BoundingBox) -> Self {
        Self {
            bounds,
            left: None,
            right: None,
            primitives: Vec::new(),
        }
    }

    /// No children and no primitives
    fn is_empty_leaf(&self) -> bool {
        self.primitives.is_empty() && self.left.is_none() && self.right.is_none()
    }

    /// Number of nodes in this subtree (self included)
    pub(crate) fn node_count(&self) -> usize {
        1 + self.left.as_deref().map_or(0, TreeNode::node_count)
            + self.right.as_deref().map_or(0, TreeNode::node_count)
    }
}

/// Pruned tree, ready to be flattened.
pub(crate) struct SpatialTree {
    root: Option<Box<TreeNode>>,
    kind: TreeKind,
}

impl SpatialTree {
    /// Build the tree over `primitives` (indices are positions in the slice).
    ///
    /// The root box is the smallest box enclosing every primitive. An empty
    /// slice yields a tree with no root.
    pub(crate) fn build(primitives: &[Primitive], kind: TreeKind, max_depth: u32) -> Self {
        let source = kind.log_source();

        let bounds = primitives.iter().map(Primitive::bounding_box);
        let Some(world) = BoundingBox::enclosing(bounds) else {
            crate::engine_debug!(source, "No primitives, tree has no root");
            return Self { root: None, kind };
        };

        let mut root = Box::new(TreeNode::new(world));

        // Centers are reordered in place by the median selection
        let mut centers: Vec<Vec3> = primitives.iter().map(Primitive::center).collect();
        let skeleton_nodes = build_empty_skeleton(&mut root, 0, &mut centers, max_depth);
        crate::engine_debug!(
            source,
            "Skeleton built: {} nodes (max_depth {})",
            skeleton_nodes,
            max_depth
        );

        for (index, primitive) in primitives.iter().enumerate() {
            let index = index as u32;
            if !insert_primitive(Some(&mut root), primitive, index) {
                // Not taken while the root box encloses every primitive
                crate::engine_warn!(
                    source,
                    "Primitive {} not contained in root box, kept at root",
                    index
                );
                root.primitives.push(index);
            }
        }

        crate::engine_trace!(source, "Root holds {} straddling primitives", root.primitives.len());

        let pruned = prune(&mut root);
        crate::engine_debug!(
            source,
            "Pruned {} empty nodes, {} remain",
            pruned,
            skeleton_nodes - pruned
        );

        Self { root: Some(root), kind }
    }

    pub(crate) fn root(&self) -> Option<&TreeNode> {
        self.root.as_deref()
    }

    pub(crate) fn kind(&self) -> TreeKind {
        self.kind
    }

    pub(crate) fn node_count(&self) -> usize {
        self.root().map_or(0, TreeNode::node_count)
    }
}

/// Recursively split `node` at the median of `centers` along the depth axis.
///
/// `centers` holds the centers of the primitives falling in this node's
/// range; it is partially reordered so the median sits at `len / 2`.
/// Returns the number of nodes in the subtree rooted at `node`.
fn build_empty_skeleton(
    node: &mut TreeNode,
    depth: u32,
    centers: &mut [Vec3],
    max_depth: u32,
) -> usize {
    if depth >= max_depth || centers.is_empty() {
        return 1;
    }

    let axis = Axis::from_depth(depth);
    let i = axis.index();
    let median = centers.len() / 2;
    centers.select_nth_unstable_by(median, |a, b| a[i].total_cmp(&b[i]));
    let split = centers[median][i];

    let (lower, upper) = node.bounds.split(axis, split);
    let mut left = Box::new(TreeNode::new(lower));
    let mut right = Box::new(TreeNode::new(upper));

    let (left_centers, right_centers) = centers.split_at_mut(median);
    let count = 1
        + build_empty_skeleton(&mut left, depth + 1, left_centers, max_depth)
        + build_empty_skeleton(&mut right, depth + 1, right_centers, max_depth);

    node.left = Some(left);
    node.right = Some(right);
    count
}

/// Place `index` in the first node, left before right, whose box contains
/// the primitive. Returns false if `slot` is absent or does not contain it.
fn insert_primitive(slot: Option<&mut TreeNode>, primitive: &Primitive, index: u32) -> bool {
    let Some(node) = slot else {
        return false;
    };
    if !primitive.is_contained_in(&node.bounds) {
        return false;
    }

    if insert_primitive(node.left.as_deref_mut(), primitive, index)
        || insert_primitive(node.right.as_deref_mut(), primitive, index)
    {
        return true;
    }

    node.primitives.push(index);
    true
}

/// Post-order removal of childless nodes holding no primitives.
///
/// The node itself is never removed. Returns the number of detached nodes.
fn prune(node: &mut TreeNode) -> usize {
    let mut removed = 0;

    for slot in [&mut node.left, &mut node.right] {
        let empty = match slot.as_deref_mut() {
            Some(child) => {
                removed += prune(child);
                child.is_empty_leaf()
            }
            None => false,
        };
        if empty {
            *slot = None;
            removed += 1;
        }
    }

    removed
}

#[cfg(test)]
#[path = "tree_tests.rs"]
mod tests;
