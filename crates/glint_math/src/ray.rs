use crate::Vec3;

/// A ray in 3D space with an origin and a unit-length direction.
///
/// The direction is normalized once at construction. Rays are never
/// mutated in place; integrators build a fresh ray for every bounce.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Create a new ray. `direction` does not need to be normalized.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    /// Create a ray that starts `offset` units along `direction` from `point`.
    ///
    /// Used when spawning secondary rays from a surface so the new ray does
    /// not immediately re-hit the surface it left.
    pub fn offset_from(point: Vec3, direction: Vec3, offset: f32) -> Self {
        let direction = direction.normalize();
        Self {
            origin: point + direction * offset,
            direction,
        }
    }

    /// Get the origin point of the ray.
    #[inline]
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Get the unit direction of the ray.
    #[inline]
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    /// Get the point along the ray at parameter t.
    ///
    /// Returns: origin + t * direction
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ray_creation_normalizes() {
        let origin = Vec3::new(1.0, 2.0, 3.0);
        let ray = Ray::new(origin, Vec3::new(0.0, 4.0, 0.0));

        assert_eq!(ray.origin, origin);
        assert_eq!(ray.direction, Vec3::Y);
    }

    #[test]
    fn test_ray_at() {
        let ray = Ray::new(Vec3::ZERO, Vec3::X);

        assert_eq!(ray.at(0.0), Vec3::ZERO);
        assert_eq!(ray.at(1.0), Vec3::X);
        assert_eq!(ray.at(2.0), Vec3::new(2.0, 0.0, 0.0));
        assert_eq!(ray.at(-1.0), Vec3::new(-1.0, 0.0, 0.0));
    }

    #[test]
    fn test_ray_offset_from() {
        let ray = Ray::offset_from(Vec3::ZERO, Vec3::new(0.0, 0.0, -2.0), 0.5);

        assert_eq!(ray.direction(), Vec3::NEG_Z);
        assert_eq!(ray.origin(), Vec3::new(0.0, 0.0, -0.5));
    }
}
