/// Axis-aligned bounding box and axis selector.
///
/// A BoundingBox is described by a center and full extents (`lengths`):
/// on every axis its interval is `center ± length / 2`. It is stored as its
/// two corners so that splitting a box at a plane yields children whose
/// bounds are bit-exact sub-intervals of the parent.

use glam::Vec3;

// ===== AXIS =====

/// Coordinate axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// All three axes in X, Y, Z order
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Split axis used at a given tree depth (cycles X, Y, Z)
    pub fn from_depth(depth: u32) -> Axis {
        Self::ALL[(depth % 3) as usize]
    }

    /// Component index (0 = X, 1 = Y, 2 = Z)
    pub fn index(&self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

// ===== BOUNDING BOX =====

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    /// Minimum corner (x, y, z)
    min: Vec3,
    /// Maximum corner (x, y, z)
    max: Vec3,
}

impl BoundingBox {
    /// Create a box from its center and full extents along each axis
    pub fn new(center: Vec3, lengths: Vec3) -> Self {
        let half = lengths * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Create a box from its minimum and maximum corners
    pub fn from_corners(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Smallest box enclosing all the given boxes, or None if there are none
    pub fn enclosing<I>(boxes: I) -> Option<Self>
    where
        I: IntoIterator<Item = BoundingBox>,
    {
        boxes.into_iter().reduce(|acc, b| acc.union(&b))
    }

    /// Smallest box enclosing both `self` and `other`
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        BoundingBox {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Minimum corner
    pub fn min(&self) -> Vec3 {
        self.min
    }

    /// Maximum corner
    pub fn max(&self) -> Vec3 {
        self.max
    }

    /// Center point
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Full extents along each axis
    pub fn lengths(&self) -> Vec3 {
        self.max - self.min
    }

    /// `(min, max)` interval of the box on one axis
    pub fn axis_bounds(&self, axis: Axis) -> (f32, f32) {
        let i = axis.index();
        (self.min[i], self.max[i])
    }

    /// Test if this box fully contains another box (boundaries inclusive)
    pub fn contains(&self, other: &BoundingBox) -> bool {
        self.min.x <= other.min.x
            && self.max.x >= other.max.x
            && self.min.y <= other.min.y
            && self.max.y >= other.max.y
            && self.min.z <= other.min.z
            && self.max.z >= other.max.z
    }

    /// Split the box at `value` along `axis` into (lower, upper) halves.
    ///
    /// `value` is clamped into the box's interval on that axis so both halves
    /// always stay inside the parent.
    pub fn split(&self, axis: Axis, value: f32) -> (BoundingBox, BoundingBox) {
        let i = axis.index();
        let value = value.max(self.min[i]).min(self.max[i]);

        let mut lower = *self;
        let mut upper = *self;
        lower.max[i] = value;
        upper.min[i] = value;
        (lower, upper)
    }
}

#[cfg(test)]
#[path = "bounding_box_tests.rs"]
mod tests;
