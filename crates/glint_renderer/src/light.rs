//! Point lights for direct illumination.

use crate::material::Color;
use glint_math::Vec3;

/// A point light sampled by the ray tracer's shadow rays.
///
/// Lights are not geometry. A light only counts as visible from a surface
/// point when the shadow ray towards it lands on an emissive primitive, so
/// each light is normally placed inside or on an emitter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    pub position: Vec3,
    pub intensity: Color,
}

impl PointLight {
    pub fn new(position: Vec3, intensity: Color) -> Self {
        Self {
            position,
            intensity,
        }
    }

    /// Intensity reaching `point` after inverse-square falloff.
    pub fn irradiance_at(&self, point: Vec3) -> Color {
        self.intensity / (self.position - point).length_squared()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inverse_square_falloff() {
        let light = PointLight::new(Vec3::new(0.0, 3.0, 0.0), Color::splat(2.0));
        let near = light.irradiance_at(Vec3::new(0.0, 2.0, 0.0));
        let far = light.irradiance_at(Vec3::new(0.0, 1.0, 0.0));

        assert_eq!(near, Color::splat(2.0));
        assert_eq!(far, Color::splat(0.5));
    }
}
