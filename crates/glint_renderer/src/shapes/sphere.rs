//! Sphere primitive for ray tracing.

use super::Surface;
use glint_math::{Ray, Vec3};

/// A sphere primitive.
#[derive(Debug, Clone, Copy)]
pub struct Sphere {
    center: Vec3,
    radius: f32,
}

impl Sphere {
    /// Create a new sphere.
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self {
            center,
            radius: radius.max(0.0),
        }
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }
}

impl Surface for Sphere {
    fn intersect(&self, ray: &Ray) -> f32 {
        let oc = self.center - ray.origin();
        let a = ray.direction().length_squared();
        let h = ray.direction().dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = h * h - a * c;
        if discriminant < 0.0 {
            return f32::INFINITY;
        }

        let sqrtd = discriminant.sqrt();

        // Entry point first; an origin inside the sphere only has the exit
        let near = (h - sqrtd) / a;
        if near > 0.0 {
            return near;
        }
        let far = (h + sqrtd) / a;
        if far > 0.0 {
            far
        } else {
            f32::INFINITY
        }
    }

    fn closest_normal(&self, point: Vec3) -> Vec3 {
        (point - self.center).normalize()
    }
}
