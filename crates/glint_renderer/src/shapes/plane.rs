//! Infinite one-sided plane.

use super::{plane_distance, Surface};
use glint_math::{Ray, Vec3};

/// An infinite plane through `point`, visible from the side its normal faces.
#[derive(Debug, Clone, Copy)]
pub struct Plane {
    point: Vec3,
    normal: Vec3,
}

impl Plane {
    /// Create a new plane. `normal` is normalized.
    pub fn new(point: Vec3, normal: Vec3) -> Self {
        Self {
            point,
            normal: normal.normalize(),
        }
    }

    pub fn normal(&self) -> Vec3 {
        self.normal
    }
}

impl Surface for Plane {
    fn intersect(&self, ray: &Ray) -> f32 {
        plane_distance(ray, self.point, self.normal)
    }

    fn closest_normal(&self, _point: Vec3) -> Vec3 {
        self.normal
    }
}
