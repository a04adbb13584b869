//! Acceleration structure and upload configuration
//!
//! `AccelConfig` selects the tree policy, its depth, the content record
//! layout and the binding slots at which the GPU consumer expects each
//! payload.

use crate::error::{Error, Result};

/// Largest accepted `max_depth` (a full skeleton has 2^(d+1) - 1 nodes)
pub const MAX_TREE_DEPTH: u32 = 24;

/// Depth used when none is configured
pub const DEFAULT_MAX_DEPTH: u32 = 3;

// ===== TREE KIND =====

/// Tree construction policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TreeKind {
    /// Bounding-volume hierarchy (nodes carry type-tagged contents)
    #[default]
    Bvh,
    /// k-d tree (bare primitive indices)
    KdTree,
}

impl TreeKind {
    /// Content layout used when the config does not override it
    pub fn default_content_layout(&self) -> ContentLayout {
        match self {
            TreeKind::Bvh => ContentLayout::TypedIndices,
            TreeKind::KdTree => ContentLayout::Indices,
        }
    }

    /// Log source for messages emitted while building this kind of tree
    pub fn log_source(&self) -> &'static str {
        match self {
            TreeKind::Bvh => "lumen::Bvh",
            TreeKind::KdTree => "lumen::KdTree",
        }
    }
}

// ===== CONTENT LAYOUT =====

/// Serialized form of the per-node primitive index sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentLayout {
    /// One `u32` primitive index per entry
    Indices,
    /// `(u32 index, u32 type tag)` per entry
    TypedIndices,
}

impl ContentLayout {
    /// Size of one serialized entry in bytes
    pub fn stride(&self) -> usize {
        match self {
            ContentLayout::Indices => 4,
            ContentLayout::TypedIndices => 8,
        }
    }
}

// ===== BINDING SLOTS =====

/// Binding slots of every payload handed to the graphics device.
///
/// Uniform and storage slots are separate namespaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BindingSlots {
    /// Uniform: per-type primitive counts
    pub primitive_counts: u32,
    /// Storage: packed primitive geometry
    pub primitives: u32,
    /// Storage: packed materials
    pub materials: u32,
    /// Uniform: point light count
    pub light_count: u32,
    /// Storage: packed point lights
    pub lights: u32,
    /// Storage: flat tree nodes
    pub nodes: u32,
    /// Storage: per-node primitive index sequence
    pub contents: u32,
}

impl Default for BindingSlots {
    fn default() -> Self {
        Self {
            primitive_counts: 3,
            primitives: 4,
            materials: 5,
            light_count: 5,
            lights: 6,
            nodes: 7,
            contents: 8,
        }
    }
}

// ===== ACCEL CONFIG =====

/// Configuration of a scene's acceleration structure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccelConfig {
    /// Builder policy
    pub tree_kind: TreeKind,
    /// Maximum skeleton depth (root = 0)
    pub max_depth: u32,
    /// Content layout override (None = `tree_kind` default)
    pub content_layout: Option<ContentLayout>,
    /// Binding slots for uploaded payloads
    pub bindings: BindingSlots,
    /// Triangles accepted per scene (None = unlimited)
    pub triangle_limit: Option<usize>,
}

impl Default for AccelConfig {
    fn default() -> Self {
        Self {
            tree_kind: TreeKind::default(),
            max_depth: DEFAULT_MAX_DEPTH,
            content_layout: None,
            bindings: BindingSlots::default(),
            triangle_limit: None,
        }
    }
}

impl AccelConfig {
    pub fn with_tree_kind(mut self, tree_kind: TreeKind) -> Self {
        self.tree_kind = tree_kind;
        self
    }

    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_content_layout(mut self, layout: ContentLayout) -> Self {
        self.content_layout = Some(layout);
        self
    }

    pub fn with_bindings(mut self, bindings: BindingSlots) -> Self {
        self.bindings = bindings;
        self
    }

    pub fn with_triangle_limit(mut self, limit: usize) -> Self {
        self.triangle_limit = Some(limit);
        self
    }

    /// Effective content layout
    pub fn content_layout(&self) -> ContentLayout {
        self.content_layout
            .unwrap_or_else(|| self.tree_kind.default_content_layout())
    }

    /// Check the configuration before a build
    ///
    /// # Errors
    ///
    /// Returns `InitializationFailed` if `max_depth` exceeds `MAX_TREE_DEPTH`
    /// or if two payloads of the same kind share a binding slot.
    pub fn validate(&self) -> Result<()> {
        if self.max_depth > MAX_TREE_DEPTH {
            return Err(Error::InitializationFailed(format!(
                "max_depth {} exceeds the limit of {}", self.max_depth, MAX_TREE_DEPTH
            )));
        }
        self.bindings.validate()
    }
}

impl BindingSlots {
    /// Uniform slots in upload order
    pub fn uniform_slots(&self) -> [(&'static str, u32); 2] {
        [
            ("primitive_counts", self.primitive_counts),
            ("light_count", self.light_count),
        ]
    }

    /// Storage slots in upload order
    pub fn storage_slots(&self) -> [(&'static str, u32); 5] {
        [
            ("primitives", self.primitives),
            ("materials", self.materials),
            ("lights", self.lights),
            ("nodes", self.nodes),
            ("contents", self.contents),
        ]
    }

    fn validate(&self) -> Result<()> {
        fn check_distinct(kind: &str, slots: &[(&'static str, u32)]) -> Result<()> {
            for (i, (name, slot)) in slots.iter().enumerate() {
                if let Some((other, _)) = slots[i + 1..].iter().find(|(_, s)| s == slot) {
                    return Err(Error::InitializationFailed(format!(
                        "{} and {} share {} binding {}", name, other, kind, slot
                    )));
                }
            }
            Ok(())
        }

        check_distinct("uniform", &self.uniform_slots())?;
        check_distinct("storage", &self.storage_slots())
    }
}
