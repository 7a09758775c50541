use core::ops::AddAssign;

use bytemuck::{Pod, Zeroable};
use glam::{Vec3, Vec4, Vec4Swizzles};

use crate::Axis;

/// Axis-aligned bounding box; only `xyz` of both corners is used, `w` is
/// padding.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct BoundingBox {
    pub min: Vec4,
    pub max: Vec4,
}

impl BoundingBox {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self {
            min: min.extend(0.0),
            max: max.extend(0.0),
        }
    }

    pub fn min(&self) -> Vec3 {
        self.min.xyz()
    }

    pub fn max(&self) -> Vec3 {
        self.max.xyz()
    }

    pub fn extent(&self) -> Vec3 {
        self.max() - self.min()
    }

    /// Perimeter-like measure, `2 * (dx + dy + dz)`, used by the kd-tree's
    /// cost model in place of the surface area.
    pub fn measure(&self) -> f32 {
        let extent = self.extent();

        2.0 * (extent.x + extent.y + extent.z)
    }

    /// Returns whether none of the axes has its minimum above its maximum.
    pub fn is_valid(&self) -> bool {
        let extent = self.extent();

        extent.x >= 0.0 && extent.y >= 0.0 && extent.z >= 0.0
    }

    /// Returns whether `p` lies within `min ..< max` on every axis.
    pub fn contains(&self, p: Vec3) -> bool {
        p.cmpge(self.min()).all() && p.cmplt(self.max()).all()
    }

    /// Returns whether `value` lies within `min ..< max` on given axis.
    pub fn contains_on(&self, axis: Axis, value: f32) -> bool {
        value >= self.min[axis] && value < self.max[axis]
    }

    /// Returns whether `value` lies strictly between the box's faces on
    /// given axis.
    pub fn straddled_by(&self, axis: Axis, value: f32) -> bool {
        value > self.min[axis] && value < self.max[axis]
    }

    /// Cuts this box in two along given plane; the halves share the plane.
    pub fn split(&self, axis: Axis, at: f32) -> (Self, Self) {
        let mut left = *self;
        let mut right = *self;

        left.max[axis] = at;
        right.min[axis] = at;

        (left, right)
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::new(Vec3::MAX, Vec3::MIN)
    }
}

impl AddAssign<Vec3> for BoundingBox {
    fn add_assign(&mut self, rhs: Vec3) {
        *self = Self::new(self.min().min(rhs), self.max().max(rhs));
    }
}

impl FromIterator<Vec3> for BoundingBox {
    fn from_iter<T>(iter: T) -> Self
    where
        T: IntoIterator<Item = Vec3>,
    {
        let mut this = Self::default();

        for item in iter {
            this += item;
        }

        this
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use glam::vec3;

    use super::*;

    #[test]
    fn measure() {
        let target = BoundingBox::new(vec3(0.0, 0.0, 0.0), vec3(1.0, 2.0, 3.0));

        assert_relative_eq!(12.0, target.measure());
    }

    #[test]
    fn from_points() {
        let target: BoundingBox = [
            vec3(1.0, -2.0, 0.5),
            vec3(-1.0, 3.0, 0.0),
            vec3(0.0, 0.0, 4.0),
        ]
        .into_iter()
        .collect();

        assert_eq!(vec3(-1.0, -2.0, 0.0), target.min());
        assert_eq!(vec3(1.0, 3.0, 4.0), target.max());
        assert!(target.is_valid());
        assert!(!BoundingBox::default().is_valid());
    }

    #[test]
    fn split() {
        let target = BoundingBox::new(Vec3::ZERO, Vec3::splat(4.0));
        let (left, right) = target.split(Axis::Y, 1.5);

        assert_eq!(vec3(4.0, 1.5, 4.0), left.max());
        assert_eq!(vec3(0.0, 1.5, 0.0), right.min());
        assert_eq!(left.max[Axis::Y], right.min[Axis::Y]);
        assert_eq!(target.min(), left.min());
        assert_eq!(target.max(), right.max());
    }

    #[test]
    fn contains() {
        let target = BoundingBox::new(Vec3::ZERO, Vec3::ONE);

        assert!(target.contains(Vec3::ZERO));
        assert!(target.contains(Vec3::splat(0.5)));
        assert!(!target.contains(Vec3::ONE));
        assert!(!target.contains(vec3(0.5, -0.1, 0.5)));

        assert!(target.contains_on(Axis::X, 0.0));
        assert!(!target.contains_on(Axis::X, 1.0));
        assert!(!target.straddled_by(Axis::X, 0.0));
        assert!(target.straddled_by(Axis::X, 0.25));
    }
}
