/// Axis-aligned bounding box with an explicit empty state.
///
/// Empty bounds absorb in unions (`empty ∪ x == x`). Non-empty bounds
/// always satisfy `min <= max` componentwise.

use glam::{Mat4, Vec3};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    min: Vec3,
    max: Vec3,
    empty: bool,
}

impl Bounds {
    /// Bounds containing nothing
    pub const fn empty() -> Self {
        Self { min: Vec3::ZERO, max: Vec3::ZERO, empty: true }
    }

    /// Box spanning two corners (in any order)
    pub fn new(a: Vec3, b: Vec3) -> Self {
        Self { min: a.min(b), max: a.max(b), empty: false }
    }

    /// Box around `center` extending `half_extents` on each side
    pub fn from_center_half_extents(center: Vec3, half_extents: Vec3) -> Self {
        let half_extents = half_extents.abs();
        Self::new(center - half_extents, center + half_extents)
    }

    pub fn is_empty(&self) -> bool {
        self.empty
    }

    /// Minimum corner (zero for empty bounds)
    pub fn min(&self) -> Vec3 {
        self.min
    }

    /// Maximum corner (zero for empty bounds)
    pub fn max(&self) -> Vec3 {
        self.max
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    pub fn half_extents(&self) -> Vec3 {
        self.size() * 0.5
    }

    /// Largest of the three half-extents (zero for empty bounds)
    pub fn largest_half_extent(&self) -> f32 {
        self.half_extents().max_element()
    }

    /// Smallest box containing both
    pub fn union(self, other: Bounds) -> Bounds {
        match (self.empty, other.empty) {
            (true, _) => other,
            (_, true) => self,
            _ => Bounds::new(self.min.min(other.min), self.max.max(other.max)),
        }
    }

    /// Grow to include `point`
    pub fn union_point(self, point: Vec3) -> Bounds {
        if self.empty {
            Bounds::new(point, point)
        } else {
            Bounds::new(self.min.min(point), self.max.max(point))
        }
    }

    /// The 8 corners, bit i of the index selecting max on axis i
    pub fn corners(&self) -> [Vec3; 8] {
        std::array::from_fn(|i| {
            Vec3::new(
                if i & 1 == 0 { self.min.x } else { self.max.x },
                if i & 2 == 0 { self.min.y } else { self.max.y },
                if i & 4 == 0 { self.min.z } else { self.max.z },
            )
        })
    }

    /// Conservative AABB of this box under `matrix`
    ///
    /// All 8 corners are transformed and the box re-derived from them.
    /// Empty bounds stay empty.
    pub fn transformed(&self, matrix: &Mat4) -> Bounds {
        if self.empty {
            return *self;
        }
        self.corners()
            .iter()
            .fold(Bounds::empty(), |b, &corner| b.union_point(matrix.transform_point3(corner)))
    }

    pub fn contains_point(&self, point: Vec3) -> bool {
        !self.empty && point.cmpge(self.min).all() && point.cmple(self.max).all()
    }

    /// Whether `other` lies entirely inside (empty is inside everything)
    pub fn contains(&self, other: &Bounds) -> bool {
        other.empty || (!self.empty && other.min.cmpge(self.min).all() && other.max.cmple(self.max).all())
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
#[path = "bounds_tests.rs"]
mod tests;
