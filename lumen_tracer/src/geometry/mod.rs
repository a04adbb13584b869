//! Geometry module
//!
//! Scene primitives (sphere, triangle, axis-aligned box) and the bounding
//! box value type used both as a primitive and as a tree node region.

mod bounding_box;
mod primitive;

pub use bounding_box::{Axis, BoundingBox};
pub use primitive::{Primitive, PrimitiveType, Sphere, Triangle};
