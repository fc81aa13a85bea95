//! Surface reflectance parameters.

use glint_math::Vec3;

/// Color type alias (un-normalized RGB energy, channels >= 0)
pub type Color = Vec3;

/// True if any channel of `color` is strictly positive.
///
/// Used throughout the integrators as the "does this carry energy" test.
#[inline]
pub fn any_positive(color: Color) -> bool {
    color.cmpgt(Color::ZERO).any()
}

/// Mean of the three channels.
#[inline]
pub fn mean(color: Color) -> f32 {
    color.element_sum() / 3.0
}

/// Stable handle to a material owned by a [`Scene`](crate::Scene).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MaterialId(pub(crate) usize);

impl MaterialId {
    /// Index of the material in its scene's material arena.
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Two-lobe (diffuse + Phong) material with an emissive flag.
///
/// Emissive materials use `diffuse` as their emitted radiance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    /// Diffuse reflectance, or emitted radiance for emitters
    pub diffuse: Color,
    /// Specular reflectance
    pub specular: Color,
    /// Phong exponent. Negative values mark a perfect mirror.
    pub shininess: f32,
    /// Whether the surface is a light source
    pub emissive: bool,
}

impl Material {
    /// Shininess value used to mark perfect mirrors.
    pub const MIRROR: f32 = -1.0;

    /// Create a purely diffuse material.
    pub fn diffuse(diffuse: Color) -> Self {
        Self {
            diffuse,
            specular: Color::ZERO,
            shininess: 0.0,
            emissive: false,
        }
    }

    /// Create an emitter whose radiance is `emission`.
    pub fn emitter(emission: Color) -> Self {
        Self {
            emissive: true,
            ..Self::diffuse(emission)
        }
    }

    /// Create a diffuse + glossy material.
    pub fn glossy(diffuse: Color, specular: Color, shininess: f32) -> Self {
        Self {
            diffuse,
            specular,
            shininess,
            emissive: false,
        }
    }

    /// Create a material whose specular lobe is a perfect mirror.
    pub fn mirror(diffuse: Color, specular: Color) -> Self {
        Self::glossy(diffuse, specular, Self::MIRROR)
    }

    /// Whether the specular lobe is a perfect mirror.
    #[inline]
    pub fn is_mirror(&self) -> bool {
        self.shininess < 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_any_positive() {
        assert!(!any_positive(Color::ZERO));
        assert!(any_positive(Color::new(0.0, 0.0, 0.01)));
        assert!(!any_positive(Color::new(-1.0, 0.0, 0.0)));
    }

    #[test]
    fn test_mean() {
        assert!((mean(Color::new(0.3, 0.6, 0.9)) - 0.6).abs() < 1e-6);
    }

    #[test]
    fn test_constructors() {
        let d = Material::diffuse(Color::new(0.5, 0.5, 0.5));
        assert_eq!(d.specular, Color::ZERO);
        assert!(!d.emissive);
        assert!(!d.is_mirror());

        let e = Material::emitter(Color::new(1.0, 1.0, 0.5));
        assert!(e.emissive);
        assert_eq!(e.diffuse, Color::new(1.0, 1.0, 0.5));

        let m = Material::mirror(Color::ZERO, Color::splat(0.6));
        assert!(m.is_mirror());
        assert!(!m.emissive);
    }
}
