use crate::{Interval, Vec3};

/// Axis-Aligned Bounding Box.
///
/// An AABB is defined by three intervals (one per axis) that bound a 3D volume.
/// The renderer uses one as the global box that every accepted hit point
/// must fall inside.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Aabb {
    pub x: Interval,
    pub y: Interval,
    pub z: Interval,
}

impl Aabb {
    /// Create a new AABB from three intervals.
    pub fn new(x: Interval, y: Interval, z: Interval) -> Self {
        Self { x, y, z }
    }

    /// Create an AABB from two corner points.
    pub fn from_points(a: Vec3, b: Vec3) -> Self {
        let x = Interval::new(a.x.min(b.x), a.x.max(b.x));
        let y = Interval::new(a.y.min(b.y), a.y.max(b.y));
        let z = Interval::new(a.z.min(b.z), a.z.max(b.z));
        Self { x, y, z }
    }

    /// Smallest corner.
    pub fn min(&self) -> Vec3 {
        Vec3::new(self.x.min, self.y.min, self.z.min)
    }

    /// Largest corner.
    pub fn max(&self) -> Vec3 {
        Vec3::new(self.x.max, self.y.max, self.z.max)
    }

    /// Test whether every coordinate of `p` lies inside the box, allowing
    /// each face to be overshot by at most `eps`.
    pub fn contains_within(&self, p: Vec3, eps: f32) -> bool {
        self.x.contains_within(p.x, eps)
            && self.y.contains_within(p.y, eps)
            && self.z.contains_within(p.z, eps)
    }

    /// Clamp `p` component-wise into the box.
    pub fn clamp(&self, p: Vec3) -> Vec3 {
        Vec3::new(self.x.clamp(p.x), self.y.clamp(p.y), self.z.clamp(p.z))
    }

    pub const UNIVERSE: Aabb = Aabb {
        x: Interval::UNIVERSE,
        y: Interval::UNIVERSE,
        z: Interval::UNIVERSE,
    };
}
