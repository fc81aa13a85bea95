//! Hexagonal lamp shade.
//!
//! A shade is the open, six-sided pyramid hanging below an apex: the apex
//! plus a regular hexagon of radius `r` lying `r / 2` below it, split into
//! six triangular facets. The outward variant is seen from outside the
//! shade, the inward variant (same vertices, flipped normals) from under it.

use super::{plane_distance, Surface};
use glint_math::{Ray, Vec3};

/// Vertex indices of the six facets. Vertex 0 is the apex.
const FACETS: [[usize; 3]; 6] = [
    [0, 1, 2],
    [0, 2, 3],
    [0, 3, 4],
    [0, 4, 5],
    [0, 5, 6],
    [0, 6, 1],
];

/// Which side of the shell faces the viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facing {
    Outward,
    Inward,
}

#[derive(Debug, Clone)]
pub struct Shade {
    vertices: [Vec3; 7],
    normals: [Vec3; 6],
    facing: Facing,
}

impl Shade {
    /// Create a shade hanging from `apex` with hexagon radius `radius`.
    pub fn new(apex: Vec3, radius: f32, facing: Facing) -> Self {
        let h = -radius / 2.0;
        let s = radius / 2.0 * 3.0_f32.sqrt();
        let vertices = [
            apex,
            apex + Vec3::new(radius, h, 0.0),
            apex + Vec3::new(radius / 2.0, h, -s),
            apex + Vec3::new(-radius / 2.0, h, -s),
            apex + Vec3::new(-radius, h, 0.0),
            apex + Vec3::new(-radius / 2.0, h, s),
            apex + Vec3::new(radius / 2.0, h, s),
        ];

        let sign = match facing {
            Facing::Outward => 1.0,
            Facing::Inward => -1.0,
        };
        let normals = FACETS.map(|[a, b, c]| {
            let e1 = vertices[b] - vertices[a];
            let e2 = vertices[c] - vertices[a];
            sign * e1.cross(e2).normalize()
        });

        Self {
            vertices,
            normals,
            facing,
        }
    }

    /// Outer shell of a shade.
    pub fn outward(apex: Vec3, radius: f32) -> Self {
        Self::new(apex, radius, Facing::Outward)
    }

    /// Inner shell of a shade.
    pub fn inward(apex: Vec3, radius: f32) -> Self {
        Self::new(apex, radius, Facing::Inward)
    }

    pub fn facing(&self) -> Facing {
        self.facing
    }

    fn triangle(&self, facet: usize) -> [Vec3; 3] {
        FACETS[facet].map(|i| self.vertices[i])
    }

    fn contains(&self, facet: usize, p: Vec3) -> bool {
        let [a, b, c] = self.triangle(facet);
        point_in_triangle(a, b, c, p)
    }
}

/// Whether `p` and `c` lie on the same side of the line through `a` and `b`.
#[inline]
fn same_side(a: Vec3, b: Vec3, c: Vec3, p: Vec3) -> bool {
    let ab = b - a;
    ab.cross(c - a).dot(ab.cross(p - a)) >= 0.0
}

/// Inside test for a point already known to lie in the triangle's plane.
fn point_in_triangle(a: Vec3, b: Vec3, c: Vec3, p: Vec3) -> bool {
    same_side(a, b, c, p) && same_side(b, c, a, p) && same_side(c, a, b, p)
}

impl Surface for Shade {
    fn intersect(&self, ray: &Ray) -> f32 {
        let apex = self.vertices[0];
        let mut dist = f32::INFINITY;
        for (facet, n) in self.normals.iter().enumerate() {
            let t = plane_distance(ray, apex, *n);
            if t < dist && self.contains(facet, ray.at(t)) {
                dist = t;
            }
        }
        dist
    }

    /// Normal of the facet containing `point`. Points on no facet get the
    /// normal of the facet whose centroid is nearest.
    fn closest_normal(&self, point: Vec3) -> Vec3 {
        if let Some(facet) = (0..FACETS.len()).find(|&f| self.contains(f, point)) {
            return self.normals[facet];
        }

        let nearest = (0..FACETS.len())
            .map(|f| {
                let [a, b, c] = self.triangle(f);
                (f, ((a + b + c) / 3.0).distance_squared(point))
            })
            .min_by(|x, y| x.1.total_cmp(&y.1))
            .map(|(f, _)| f)
            .unwrap_or(0);
        self.normals[nearest]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outward_normals_point_up_and_out() {
        let shade = Shade::outward(Vec3::new(0.0, 2.0, 0.0), 0.5);
        for (facet, n) in shade.normals.iter().enumerate() {
            let [a, b, c] = shade.triangle(facet);
            let centroid = (a + b + c) / 3.0;
            let radial = Vec3::new(centroid.x, 0.0, centroid.z);
            assert!((n.length() - 1.0).abs() < 1e-5);
            assert!(n.y > 0.0);
            assert!(n.dot(radial) > 0.0);
        }
    }

    #[test]
    fn test_inward_normals_are_flipped() {
        let apex = Vec3::new(1.35, 1.5, -1.2);
        let outer = Shade::outward(apex, 0.5);
        let inner = Shade::inward(apex, 0.5);
        for (o, i) in outer.normals.iter().zip(inner.normals.iter()) {
            assert!((*o + *i).length() < 1e-6);
        }
        assert_eq!(inner.facing(), Facing::Inward);
    }

    #[test]
    fn test_outward_hit_from_above() {
        let apex = Vec3::new(0.0, 2.0, 0.0);
        let shade = Shade::outward(apex, 0.5);
        // Straight down, a little off the apex so it lands inside facet 0
        let ray = Ray::new(Vec3::new(0.2, 5.0, -0.05), Vec3::NEG_Y);

        let t = shade.intersect(&ray);
        assert!(t.is_finite());
        let p = ray.at(t);
        assert!(p.y < apex.y && p.y > apex.y - 0.25);
        assert_eq!(shade.closest_normal(p), shade.normals[0]);
    }

    #[test]
    fn test_outward_invisible_from_below_inward_visible() {
        let apex = Vec3::new(0.0, 2.0, 0.0);
        let ray = Ray::new(Vec3::new(0.05, 0.0, 0.02), Vec3::Y);

        assert_eq!(Shade::outward(apex, 0.5).intersect(&ray), f32::INFINITY);

        let inner = Shade::inward(apex, 0.5);
        let t = inner.intersect(&ray);
        assert!(t.is_finite());
        assert!(inner.closest_normal(ray.at(t)).y < 0.0);
    }

    #[test]
    fn test_miss_beside_shade() {
        let shade = Shade::outward(Vec3::new(0.0, 2.0, 0.0), 0.5);
        let ray = Ray::new(Vec3::new(1.0, 5.0, 0.0), Vec3::NEG_Y);
        assert_eq!(shade.intersect(&ray), f32::INFINITY);
    }

    #[test]
    fn test_point_in_triangle() {
        let (a, b, c) = (Vec3::ZERO, Vec3::X, Vec3::Y);
        assert!(point_in_triangle(a, b, c, Vec3::new(0.25, 0.25, 0.0)));
        assert!(!point_in_triangle(a, b, c, Vec3::new(0.75, 0.75, 0.0)));
        assert!(!point_in_triangle(a, b, c, Vec3::new(-0.1, 0.5, 0.0)));
    }
}
