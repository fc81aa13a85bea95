//! Axis-aligned box.

use super::{plane_distance, Surface, EPS};
use glint_math::{Ray, Vec3};

/// Outward normals of the six faces, in lookup order.
const FACE_NORMALS: [Vec3; 6] = [
    Vec3::X,
    Vec3::NEG_X,
    Vec3::Y,
    Vec3::NEG_Y,
    Vec3::Z,
    Vec3::NEG_Z,
];

/// An axis-aligned box given by its center and full extents along x, y, z.
#[derive(Debug, Clone, Copy)]
pub struct Cuboid {
    center: Vec3,
    half: Vec3,
}

impl Cuboid {
    /// Create a new cuboid. `size` holds the full edge lengths.
    pub fn new(center: Vec3, size: Vec3) -> Self {
        Self {
            center,
            half: size.abs() * 0.5,
        }
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    /// A point on each face plane, matching `FACE_NORMALS`.
    fn face_point(&self, face: usize) -> Vec3 {
        self.center + FACE_NORMALS[face] * self.half
    }

    /// Distance from `d` (relative to the center) to each face plane.
    fn face_gaps(&self, d: Vec3) -> [f32; 6] {
        [
            (d.x - self.half.x).abs(),
            (d.x + self.half.x).abs(),
            (d.y - self.half.y).abs(),
            (d.y + self.half.y).abs(),
            (d.z - self.half.z).abs(),
            (d.z + self.half.z).abs(),
        ]
    }

    fn within_extent(&self, p: Vec3) -> bool {
        let d = (p - self.center).abs();
        let limit = self.half + Vec3::splat(EPS);
        d.cmplt(limit).all()
    }
}

impl Surface for Cuboid {
    fn intersect(&self, ray: &Ray) -> f32 {
        let mut dist = f32::INFINITY;
        for (face, n) in FACE_NORMALS.iter().enumerate() {
            let t = plane_distance(ray, self.face_point(face), *n);
            if t < dist && self.within_extent(ray.at(t)) {
                dist = t;
            }
        }
        dist
    }

    /// Normal of the face `point` lies on. A point outside every face band
    /// (an edge hit that drifted, or a point off the box) gets the normal of
    /// the nearest face plane.
    fn closest_normal(&self, point: Vec3) -> Vec3 {
        let gaps = self.face_gaps(point - self.center);
        if let Some(face) = gaps.iter().position(|gap| *gap < EPS) {
            return FACE_NORMALS[face];
        }

        let nearest = gaps
            .iter()
            .enumerate()
            .min_by(|a, b| a.1.total_cmp(b.1))
            .map(|(face, _)| face)
            .unwrap_or(0);
        FACE_NORMALS[nearest]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_box() -> Cuboid {
        Cuboid::new(Vec3::ZERO, Vec3::new(2.0, 4.0, 6.0))
    }

    #[test]
    fn test_cuboid_hit_each_axis() {
        let cuboid = unit_box();

        let cases = [
            (Vec3::new(5.0, 0.0, 0.0), Vec3::NEG_X, 4.0, Vec3::X),
            (Vec3::new(-5.0, 0.5, 0.5), Vec3::X, 4.0, Vec3::NEG_X),
            (Vec3::new(0.0, 10.0, 0.0), Vec3::NEG_Y, 8.0, Vec3::Y),
            (Vec3::new(0.5, -10.0, 1.0), Vec3::Y, 8.0, Vec3::NEG_Y),
            (Vec3::new(0.0, 0.0, 7.0), Vec3::NEG_Z, 4.0, Vec3::Z),
            (Vec3::new(0.0, 1.0, -7.0), Vec3::Z, 4.0, Vec3::NEG_Z),
        ];
        for (origin, dir, expected_t, expected_n) in cases {
            let ray = Ray::new(origin, dir);
            let t = cuboid.intersect(&ray);
            assert!((t - expected_t).abs() < 1e-5, "origin={origin} t={t}");
            assert_eq!(cuboid.closest_normal(ray.at(t)), expected_n);
        }
    }

    #[test]
    fn test_cuboid_miss_outside_face_extent() {
        let cuboid = unit_box();
        // Passes beside the box along -x
        let ray = Ray::new(Vec3::new(5.0, 2.5, 0.0), Vec3::NEG_X);
        assert_eq!(cuboid.intersect(&ray), f32::INFINITY);
    }

    #[test]
    fn test_cuboid_normal_is_axis_aligned_unit() {
        let cuboid = Cuboid::new(Vec3::new(-1.0, 0.8, -1.0), Vec3::new(0.6, 1.6, 0.8));
        let origins = [
            Vec3::new(1.0, 1.0, -1.1),
            Vec3::new(-1.0, 2.5, -0.8),
            Vec3::new(-0.9, 0.5, 1.0),
            Vec3::new(-3.0, 0.2, -1.2),
        ];
        for origin in origins {
            let ray = Ray::new(origin, cuboid.center() - origin);
            let t = cuboid.intersect(&ray);
            assert!(t.is_finite());
            let n = cuboid.closest_normal(ray.at(t));
            assert!((n.length() - 1.0).abs() < 1e-6);
            let axis_count = n.to_array().iter().filter(|c| c.abs() == 1.0).count();
            assert_eq!(axis_count, 1, "normal {n} is not an axis");
        }
    }

    #[test]
    fn test_cuboid_normal_fallback_picks_nearest_face() {
        let cuboid = unit_box();
        // Slightly outside the +y face, beyond the epsilon band
        assert_eq!(cuboid.closest_normal(Vec3::new(0.1, 2.01, 0.2)), Vec3::Y);
        // Inside the box, closest to -z
        assert_eq!(cuboid.closest_normal(Vec3::new(0.0, 0.0, -2.9)), Vec3::NEG_Z);
    }

    #[test]
    fn test_cuboid_from_inside_is_invisible() {
        let cuboid = unit_box();
        let ray = Ray::new(Vec3::ZERO, Vec3::X);
        assert_eq!(cuboid.intersect(&ray), f32::INFINITY);
    }
}
