//! Integration tests for acceleration structure construction
//!
//! These tests build flat structures through the public API and check the
//! structural properties every GPU traversal relies on.
//! No GPU required.
//!
//! Run with: cargo test --test acceleration_integration_tests

use lumen_tracer::glam::Vec3;
use lumen_tracer::lumen::accel::{AccelerationStructure, FlatNode, FlatStructure};
use lumen_tracer::lumen::geometry::{BoundingBox, Primitive, Sphere, Triangle};
use lumen_tracer::lumen::{AccelConfig, ContentLayout, TreeKind};

// ============================================================================
// SCENE GENERATION
// ============================================================================

/// Small deterministic generator (64-bit LCG)
struct Lcg(u64);

impl Lcg {
    fn next_f32(&mut self, lo: f32, hi: f32) -> f32 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        let unit = (self.0 >> 40) as f32 / (1u64 << 24) as f32;
        lo + unit * (hi - lo)
    }

    fn next_vec3(&mut self, lo: f32, hi: f32) -> Vec3 {
        Vec3::new(self.next_f32(lo, hi), self.next_f32(lo, hi), self.next_f32(lo, hi))
    }
}

/// Mixed scene of spheres, triangles and boxes
fn mixed_scene(seed: u64, count: usize) -> Vec<Primitive> {
    let mut rng = Lcg(seed);
    (0..count)
        .map(|i| {
            let center = rng.next_vec3(-50.0, 50.0);
            match i % 3 {
                0 => Sphere::new(center, rng.next_f32(0.1, 3.0)).into(),
                1 => Triangle::new(
                    center,
                    center + rng.next_vec3(-4.0, 4.0),
                    center + rng.next_vec3(-4.0, 4.0),
                ).into(),
                _ => BoundingBox::new(center, rng.next_vec3(0.5, 6.0)).into(),
            }
        })
        .collect()
}

fn tri(a: [f32; 3], b: [f32; 3], c: [f32; 3]) -> Primitive {
    Triangle::new(Vec3::from(a), Vec3::from(b), Vec3::from(c)).into()
}

// ============================================================================
// PROPERTY CHECKS
// ============================================================================

fn assert_structure_properties(primitives: &[Primitive], flat: &FlatStructure) {
    let nodes = flat.nodes();
    let mut placements = vec![0usize; primitives.len()];

    for (index, node) in nodes.iter().enumerate() {
        let bounds = node.bounds();

        for record in flat.contents_of(node) {
            let primitive = &primitives[record.index as usize];
            assert!(
                primitive.is_contained_in(&bounds),
                "primitive {} escapes node {}", record.index, index
            );
            assert_eq!(record.primitive_type, primitive.primitive_type().tag());
            placements[record.index as usize] += 1;
        }

        for child in [node.left_child(), node.right_child()].into_iter().flatten() {
            assert!(child > index, "child {} precedes parent {}", child, index);
            assert!(child < nodes.len());
            assert!(bounds.contains(&nodes[child].bounds()));
        }

        if node.is_leaf() {
            assert!(node.contents_count > 0, "empty leaf at {}", index);
        }
        assert_eq!(node.bound_min[3], 0.0);
        assert_eq!(node.bound_max[3], 0.0);
    }

    assert!(placements.iter().all(|&n| n == 1), "every primitive is placed exactly once");
    assert_eq!(flat.content_count(), primitives.len());
}

// ============================================================================
// TESTS
// ============================================================================

#[test]
fn test_integration_properties_on_mixed_scenes() {
    for (seed, count, depth) in [(1, 10, 2), (7, 100, 4), (42, 500, 6), (99, 64, 10)] {
        let primitives = mixed_scene(seed, count);
        let config = AccelConfig::default().with_max_depth(depth);
        let flat = AccelerationStructure::build(&primitives, &config);

        assert!(!flat.is_empty());
        assert_structure_properties(&primitives, &flat);
    }
}

#[test]
fn test_integration_root_encloses_scene() {
    let primitives = mixed_scene(5, 50);
    let flat = AccelerationStructure::build(&primitives, &AccelConfig::default());

    let root = flat.nodes()[0].bounds();
    let scene = BoundingBox::enclosing(primitives.iter().map(Primitive::bounding_box)).unwrap();
    assert_eq!(root, scene);
}

#[test]
fn test_integration_build_is_deterministic() {
    let primitives = mixed_scene(2024, 300);
    let config = AccelConfig::default().with_max_depth(7);

    let first = AccelerationStructure::build(&primitives, &config);
    let second = AccelerationStructure::build(&primitives, &config);

    assert_eq!(first.nodes_bytes(), second.nodes_bytes());
    assert_eq!(first.contents_bytes(), second.contents_bytes());
}

#[test]
fn test_integration_straddling_triangle_promoted_to_root() {
    let primitives = vec![
        tri([-2.0, 0.0, 0.0], [-1.0, 0.0, 0.0], [-1.0, 1.0, 0.0]),
        tri([-0.5, 0.0, 0.0], [0.5, 0.0, 0.0], [0.0, 1.0, 0.0]),
        tri([1.0, 0.0, 0.0], [2.0, 0.0, 0.0], [2.0, 1.0, 0.0]),
        tri([-2.0, 0.0, 0.0], [-2.0, 1.0, 0.0], [-1.0, 1.0, 0.0]),
        tri([1.0, 0.0, 0.0], [1.0, 1.0, 0.0], [2.0, 1.0, 0.0]),
    ];
    let flat = AccelerationStructure::build(&primitives, &AccelConfig::default().with_max_depth(1));
    let nodes = flat.nodes();

    assert_eq!(nodes.len(), 3);
    let root_contents: Vec<u32> = flat.contents_of(&nodes[0]).iter().map(|c| c.index).collect();
    assert_eq!(root_contents, vec![1]);

    let left: Vec<u32> = flat.contents_of(&nodes[nodes[0].left as usize]).iter().map(|c| c.index).collect();
    let right: Vec<u32> = flat.contents_of(&nodes[nodes[0].right as usize]).iter().map(|c| c.index).collect();
    assert_eq!(left, vec![0, 3]);
    assert_eq!(right, vec![2, 4]);
}

#[test]
fn test_integration_max_depth_zero() {
    let primitives = mixed_scene(3, 20);
    let flat = AccelerationStructure::build(&primitives, &AccelConfig::default().with_max_depth(0));

    assert_eq!(flat.node_count(), 1);
    let root = flat.nodes()[0];
    assert_eq!(root.left, FlatNode::NO_CHILD);
    assert_eq!(root.right, FlatNode::NO_CHILD);
    assert_eq!(root.contents_count as usize, primitives.len());

    let order: Vec<u32> = flat.contents().iter().map(|c| c.index).collect();
    assert_eq!(order, (0..20).collect::<Vec<u32>>());
}

#[test]
fn test_integration_empty_scene() {
    for kind in [TreeKind::Bvh, TreeKind::KdTree] {
        let flat = AccelerationStructure::build(&[], &AccelConfig::default().with_tree_kind(kind));
        assert!(flat.is_empty());
        assert!(flat.nodes_bytes().is_empty());
        assert!(flat.contents_bytes().is_empty());
    }
}

#[test]
fn test_integration_degenerate_primitives() {
    let primitives: Vec<Primitive> = vec![
        Sphere::new(Vec3::ONE, 0.0).into(),
        Sphere::new(Vec3::ONE, 0.0).into(),
        tri([1.0, 1.0, 1.0], [1.0, 1.0, 1.0], [1.0, 1.0, 1.0]),
        tri([0.0, 0.0, 0.0], [1.0, 1.0, 1.0], [2.0, 2.0, 2.0]),
        BoundingBox::new(Vec3::ONE, Vec3::ZERO).into(),
    ];
    let flat = AccelerationStructure::build(&primitives, &AccelConfig::default().with_max_depth(8));
    assert_structure_properties(&primitives, &flat);
}

#[test]
fn test_integration_kd_tree_matches_bvh_nodes() {
    let primitives = mixed_scene(11, 120);
    let bvh = AccelerationStructure::build(&primitives, &AccelConfig::default().with_max_depth(5));
    let kd = AccelerationStructure::build(
        &primitives,
        &AccelConfig::default().with_tree_kind(TreeKind::KdTree).with_max_depth(5),
    );

    assert_eq!(bvh.nodes_bytes(), kd.nodes_bytes());
    assert_eq!(bvh.layout(), ContentLayout::TypedIndices);
    assert_eq!(kd.layout(), ContentLayout::Indices);
    assert_eq!(bvh.contents_bytes().len(), 8 * primitives.len());
    assert_eq!(kd.contents_bytes().len(), 4 * primitives.len());
}
