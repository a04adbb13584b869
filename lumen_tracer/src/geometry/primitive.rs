/// Scene primitives.
///
/// The variant set is closed (sphere, triangle, box), so primitives are a
/// plain enum dispatched by `match` rather than a trait object. All queries
/// are pure and the geometry is immutable once created.

use glam::Vec3;
use super::bounding_box::{Axis, BoundingBox};

// ===== PRIMITIVE TYPE =====

/// Geometry type tag, as stored next to primitive indices in GPU buffers.
///
/// The numbering is this crate's own GPU contract (Sphere 0, Triangle 1, Box 2).
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    Sphere = 0,
    Triangle = 1,
    Box = 2,
}

impl PrimitiveType {
    /// Raw tag value written to GPU buffers
    pub fn tag(&self) -> u32 {
        *self as u32
    }
}

// ===== SPHERE =====

/// Sphere given by center and radius
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    pub center: Vec3,
    pub radius: f32,
}

impl Sphere {
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }
}

// ===== TRIANGLE =====

/// Triangle given by its three vertices
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub vertices: [Vec3; 3],
}

impl Triangle {
    pub fn new(v0: Vec3, v1: Vec3, v2: Vec3) -> Self {
        Self { vertices: [v0, v1, v2] }
    }
}

// ===== PRIMITIVE =====

/// A scene primitive
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Primitive {
    Sphere(Sphere),
    Triangle(Triangle),
    Box(BoundingBox),
}

impl Primitive {
    /// Point used to partition primitives when building the tree skeleton.
    ///
    /// Triangle: vertex mean. Sphere and box: their center.
    pub fn center(&self) -> Vec3 {
        match self {
            Primitive::Sphere(sphere) => sphere.center,
            Primitive::Triangle(triangle) => {
                let [v0, v1, v2] = triangle.vertices;
                (v0 + v1 + v2) / 3.0
            }
            Primitive::Box(aabb) => aabb.center(),
        }
    }

    /// `(min, max)` extent of the primitive along one axis
    pub fn axis_bounds(&self, axis: Axis) -> (f32, f32) {
        let i = axis.index();
        match self {
            Primitive::Sphere(sphere) => {
                let radius = sphere.radius.abs();
                (sphere.center[i] - radius, sphere.center[i] + radius)
            }
            Primitive::Triangle(triangle) => {
                let [v0, v1, v2] = triangle.vertices;
                (v0[i].min(v1[i]).min(v2[i]), v0[i].max(v1[i]).max(v2[i]))
            }
            Primitive::Box(aabb) => aabb.axis_bounds(axis),
        }
    }

    /// Type tag of this primitive
    pub fn primitive_type(&self) -> PrimitiveType {
        match self {
            Primitive::Sphere(_) => PrimitiveType::Sphere,
            Primitive::Triangle(_) => PrimitiveType::Triangle,
            Primitive::Box(_) => PrimitiveType::Box,
        }
    }

    /// Tight axis-aligned box around the primitive
    pub fn bounding_box(&self) -> BoundingBox {
        let mut min = Vec3::ZERO;
        let mut max = Vec3::ZERO;
        for axis in Axis::ALL {
            let (lo, hi) = self.axis_bounds(axis);
            min[axis.index()] = lo;
            max[axis.index()] = hi;
        }
        BoundingBox::from_corners(min, max)
    }

    /// Whether the full extent of the primitive lies inside `aabb`.
    ///
    /// Every axis interval must be enclosed (boundaries inclusive); touching
    /// or overlapping the box is not enough.
    pub fn is_contained_in(&self, aabb: &BoundingBox) -> bool {
        Axis::ALL.iter().all(|&axis| {
            let (lo, hi) = self.axis_bounds(axis);
            let (box_lo, box_hi) = aabb.axis_bounds(axis);
            !(lo < box_lo || hi > box_hi)
        })
    }
}

impl From<Sphere> for Primitive {
    fn from(sphere: Sphere) -> Self {
        Primitive::Sphere(sphere)
    }
}

impl From<Triangle> for Primitive {
    fn from(triangle: Triangle) -> Self {
        Primitive::Triangle(triangle)
    }
}

impl From<BoundingBox> for Primitive {
    fn from(aabb: BoundingBox) -> Self {
        Primitive::Box(aabb)
    }
}

#[cfg(test)]
#[path = "primitive_tests.rs"]
mod tests;
