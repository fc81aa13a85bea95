//! Primitive geometry.
//!
//! Every shape answers two questions: how far along a ray is its surface,
//! and what is the unit normal at a point on that surface. [`Geometry`]
//! is the closed set of shapes a [`Scene`](crate::Scene) can hold; it
//! forwards both queries to the variant's own [`Surface`] impl.

mod cuboid;
mod plane;
mod shade;
mod sphere;

pub use cuboid::Cuboid;
pub use plane::Plane;
pub use shade::{Facing, Shade};
pub use sphere::Sphere;

use crate::material::MaterialId;
use glint_math::{Ray, Vec3};

/// Tolerance for parallel-ray rejection and face membership tests.
pub const EPS: f32 = 1e-6;

/// Ray intersection and normal queries shared by all shapes.
pub trait Surface: Send + Sync {
    /// Smallest strictly-positive distance along `ray` to the surface,
    /// or `f32::INFINITY` if there is no forward hit.
    fn intersect(&self, ray: &Ray) -> f32;

    /// Unit surface normal at `point`, which is expected to lie on the
    /// surface.
    fn closest_normal(&self, point: Vec3) -> Vec3;
}

/// The closed set of shapes a scene can hold.
#[derive(Debug, Clone)]
pub enum Geometry {
    Plane(Plane),
    Sphere(Sphere),
    Cuboid(Cuboid),
    Shade(Shade),
}

impl Surface for Geometry {
    #[inline]
    fn intersect(&self, ray: &Ray) -> f32 {
        match self {
            Geometry::Plane(s) => s.intersect(ray),
            Geometry::Sphere(s) => s.intersect(ray),
            Geometry::Cuboid(s) => s.intersect(ray),
            Geometry::Shade(s) => s.intersect(ray),
        }
    }

    #[inline]
    fn closest_normal(&self, point: Vec3) -> Vec3 {
        match self {
            Geometry::Plane(s) => s.closest_normal(point),
            Geometry::Sphere(s) => s.closest_normal(point),
            Geometry::Cuboid(s) => s.closest_normal(point),
            Geometry::Shade(s) => s.closest_normal(point),
        }
    }
}

impl From<Plane> for Geometry {
    fn from(s: Plane) -> Self {
        Geometry::Plane(s)
    }
}

impl From<Sphere> for Geometry {
    fn from(s: Sphere) -> Self {
        Geometry::Sphere(s)
    }
}

impl From<Cuboid> for Geometry {
    fn from(s: Cuboid) -> Self {
        Geometry::Cuboid(s)
    }
}

impl From<Shade> for Geometry {
    fn from(s: Shade) -> Self {
        Geometry::Shade(s)
    }
}

/// A shape bound to one of its scene's materials.
#[derive(Debug, Clone)]
pub struct Primitive {
    geometry: Geometry,
    material: MaterialId,
}

impl Primitive {
    pub(crate) fn new(geometry: Geometry, material: MaterialId) -> Self {
        Self { geometry, material }
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn material(&self) -> MaterialId {
        self.material
    }
}

impl Surface for Primitive {
    #[inline]
    fn intersect(&self, ray: &Ray) -> f32 {
        self.geometry.intersect(ray)
    }

    #[inline]
    fn closest_normal(&self, point: Vec3) -> Vec3 {
        self.geometry.closest_normal(point)
    }
}

/// Distance along `ray` to the plane through `point` with unit normal `n`.
///
/// Only rays travelling against the normal can hit; rays that are
/// parallel (within [`EPS`]) or arrive from behind return infinity, as
/// do hits behind the origin.
#[inline]
pub(crate) fn plane_distance(ray: &Ray, point: Vec3, n: Vec3) -> f32 {
    let cos_theta = ray.direction().dot(n);
    if cos_theta > -EPS {
        return f32::INFINITY;
    }
    let t = (point - ray.origin()).dot(n) / cos_theta;
    if t > 0.0 {
        t
    } else {
        f32::INFINITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geometry_dispatch() {
        let shapes: Vec<Geometry> = vec![
            Plane::new(Vec3::ZERO, Vec3::Y).into(),
            Sphere::new(Vec3::new(0.0, 5.0, 0.0), 1.0).into(),
            Cuboid::new(Vec3::new(0.0, 5.0, 0.0), Vec3::splat(2.0)).into(),
        ];
        let ray = Ray::new(Vec3::new(0.0, 10.0, 0.0), Vec3::NEG_Y);

        assert!((shapes[0].intersect(&ray) - 10.0).abs() < 1e-5);
        assert!((shapes[1].intersect(&ray) - 4.0).abs() < 1e-5);
        assert!((shapes[2].intersect(&ray) - 4.0).abs() < 1e-5);
        assert_eq!(shapes[0].closest_normal(Vec3::ZERO), Vec3::Y);
    }

    #[test]
    fn test_plane_distance_rejects_parallel_and_backward() {
        let parallel = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::X);
        assert_eq!(plane_distance(&parallel, Vec3::ZERO, Vec3::Y), f32::INFINITY);

        let away = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::Y);
        assert_eq!(plane_distance(&away, Vec3::ZERO, Vec3::Y), f32::INFINITY);

        let toward = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::NEG_Y);
        assert!((plane_distance(&toward, Vec3::ZERO, Vec3::Y) - 1.0).abs() < 1e-6);
    }
}
