//! Importance sampling of the two-lobe material model.
//!
//! One lobe is picked at random with probability proportional to its mean
//! reflectance, a direction is drawn from that lobe, and the weight is the
//! lobe's reflectance divided by the probability of having picked it.

use std::f32::consts::TAU;

use crate::material::{any_positive, mean, Color, Material};
use glint_math::Vec3;
use rand::{Rng, RngCore};

/// Outgoing direction and throughput weight drawn from a material.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BsdfSample {
    pub direction: Vec3,
    pub weight: Color,
}

/// Reflect a vector about a normal.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Mirror direction of `wi` (pointing away from the surface) about `n`.
#[inline]
pub fn mirror(wi: Vec3, n: Vec3) -> Vec3 {
    n * 2.0 * n.dot(wi) - wi
}

/// Direction at polar angle θ (given as cos²θ) and azimuth `phi` around `w`.
pub fn axis_angle(w: Vec3, cos2theta: f32, phi: f32) -> Vec3 {
    let cos_theta = cos2theta.sqrt();
    let sin_theta = (1.0 - cos2theta).max(0.0).sqrt();
    // Reference axis far from w so the cross product stays well defined
    let reference = if w.x.abs() > 0.1 { Vec3::Y } else { Vec3::X };
    let u = reference.cross(w).normalize();
    let v = w.cross(u);
    (u * phi.cos() * sin_theta + v * phi.sin() * sin_theta + w * cos_theta).normalize()
}

/// Draw an outgoing direction for light arriving along `-wi` at a surface
/// with normal `n`.
///
/// `wi` points from the surface back towards where the ray came from.
pub fn sample(material: &Material, n: Vec3, wi: Vec3, rng: &mut dyn RngCore) -> BsdfSample {
    let diffuse_mean = mean(material.diffuse);
    let total = diffuse_mean + mean(material.specular);
    if total <= 0.0 {
        return BsdfSample {
            direction: mirror(wi, n),
            weight: Color::ZERO,
        };
    }
    let r = diffuse_mean / total;

    if rng.gen::<f32>() < r {
        let cos2theta = rng.gen::<f32>();
        let phi = rng.gen::<f32>() * TAU;
        let weight = if any_positive(material.diffuse) {
            material.diffuse / r
        } else {
            Color::ZERO
        };
        return BsdfSample {
            direction: axis_angle(n, cos2theta, phi),
            weight,
        };
    }

    let specular_weight = if any_positive(material.specular) {
        material.specular / (1.0 - r)
    } else {
        Color::ZERO
    };
    let reflected = mirror(wi, n);

    if material.is_mirror() {
        return BsdfSample {
            direction: reflected,
            weight: specular_weight,
        };
    }

    let cos2theta = rng.gen::<f32>().powf(2.0 / (material.shininess + 2.0));
    let phi = rng.gen::<f32>() * TAU;
    let direction = axis_angle(reflected, cos2theta, phi);
    let weight = if n.dot(direction) > 0.0 {
        specular_weight
    } else {
        Color::ZERO
    };
    BsdfSample { direction, weight }
}
