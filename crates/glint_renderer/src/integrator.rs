//! Radiance estimators.
//!
//! Two integrators are available for a session:
//! - A Whitted-style ray tracer with point-light Phong shading, shadow
//!   rays and mirror reflections
//! - A Monte Carlo path tracer driven by [`bsdf::sample`]
//!
//! Both loops are iterative with a fixed depth cap. Nothing here fails:
//! misses and absorbed paths simply return black.

use std::fmt;

use crate::bsdf::{self, reflect};
use crate::material::{any_positive, Color};
use crate::scene::Scene;
use crate::shapes::Surface;
use glint_math::Ray;
use rand::RngCore;

/// Maximum bounces followed by [`ray_trace`].
pub const RAY_TRACE_DEPTH: u32 = 10;
/// Maximum bounces followed by [`path_trace`].
pub const PATH_TRACE_DEPTH: u32 = 5;

const SHADOW_OFFSET: f32 = 0.01;
const REFLECT_OFFSET: f32 = 1e-5;
const BOUNCE_OFFSET: f32 = 0.01;

/// Light transport algorithm used by a render session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Integrator {
    /// Deterministic Whitted-style ray tracing
    #[default]
    RayTrace,
    /// Unbiased Monte Carlo path tracing
    PathTrace,
}

impl Integrator {
    /// Pick the integrator from the path-tracing switch.
    pub fn from_path_tracing(path_tracing: bool) -> Self {
        if path_tracing {
            Self::PathTrace
        } else {
            Self::RayTrace
        }
    }

    /// Estimate the radiance arriving along `ray`.
    pub fn radiance(&self, scene: &Scene, ray: Ray, rng: &mut dyn RngCore) -> Color {
        match self {
            Self::RayTrace => ray_trace(scene, ray),
            Self::PathTrace => path_trace(scene, ray, rng),
        }
    }
}

impl fmt::Display for Integrator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RayTrace => write!(f, "ray trace"),
            Self::PathTrace => write!(f, "path trace"),
        }
    }
}

/// Whitted-style ray tracing.
///
/// At each hit, every point light whose shadow ray lands on an emissive
/// primitive contributes Phong diffuse and specular terms with
/// inverse-square falloff. Half of the specular reflectance is carried
/// into a perfect mirror bounce.
pub fn ray_trace(scene: &Scene, mut ray: Ray) -> Color {
    let mut color = Color::ZERO;
    let mut throughput = Color::ONE;

    for _ in 0..RAY_TRACE_DEPTH {
        let Some(hit) = scene.intersect(&ray) else {
            return color;
        };
        let material = scene.material_of(hit.primitive);
        let pos = hit.point;
        let n = hit.normal();

        let mut direct = Color::ZERO;
        for light in scene.lights() {
            let to_light = light.position - pos;
            let shadow = Ray::new(pos + SHADOW_OFFSET * to_light, to_light);
            let visible = scene
                .intersect(&shadow)
                .is_some_and(|blocker| scene.material_of(blocker.primitive).emissive);
            if !visible {
                continue;
            }

            let l = to_light.normalize();
            let irradiance = light.irradiance_at(pos);
            direct += material.diffuse * irradiance * l.dot(n).max(0.0);

            if !material.is_mirror() {
                let reflected_light = n * 2.0 * n.dot(l) - l;
                let highlight = reflected_light.dot(-ray.direction()).max(0.0);
                direct += material.specular * irradiance * highlight.powf(material.shininess);
            }
        }
        direct += scene.ambient() * material.diffuse;

        let reflectance = material.specular * 0.5;
        color += throughput * (Color::ONE - reflectance) * direct;
        throughput *= reflectance;
        if !any_positive(throughput) {
            return color;
        }

        ray = Ray::offset_from(pos, reflect(ray.direction(), n), REFLECT_OFFSET);
    }

    color
}

/// Monte Carlo path tracing.
///
/// Paths end on the first emissive hit, which returns the accumulated
/// throughput times the emitted radiance. Misses, absorbed samples and
/// paths longer than [`PATH_TRACE_DEPTH`] are black.
pub fn path_trace(scene: &Scene, mut ray: Ray, rng: &mut dyn RngCore) -> Color {
    let mut throughput = Color::ONE;

    for _ in 0..PATH_TRACE_DEPTH {
        let Some(hit) = scene.intersect(&ray) else {
            return Color::ZERO;
        };
        let material = scene.material_of(hit.primitive);
        if material.emissive {
            return throughput * material.diffuse;
        }

        let sample = bsdf::sample(
            material,
            hit.primitive.closest_normal(hit.point),
            -ray.direction(),
            rng,
        );
        if !any_positive(sample.weight) {
            return sample.weight;
        }
        throughput *= sample.weight;
        ray = Ray::offset_from(hit.point, sample.direction, BOUNCE_OFFSET);
    }

    Color::ZERO
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::light::PointLight;
    use crate::material::Material;
    use crate::shapes::{Plane, Sphere};
    use glint_math::Vec3;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Ground plane, red sphere on a stand-off, and a small emitter with
    /// a point light straight above the sphere.
    fn shadow_scene() -> Scene {
        let mut scene = Scene::new().with_ambient(Color::splat(0.05));
        let gray = scene.add_material("gray", Material::diffuse(Color::splat(0.5)));
        let red = scene.add_material("red", Material::diffuse(Color::new(1.0, 0.0, 0.0)));
        let bulb = scene.add_material("bulb", Material::emitter(Color::splat(3.0)));

        scene
            .add_primitive(Plane::new(Vec3::ZERO, Vec3::Y), gray)
            .unwrap();
        scene
            .add_primitive(Sphere::new(Vec3::new(0.0, 1.0, -2.0), 0.5), red)
            .unwrap();
        scene
            .add_primitive(Sphere::new(Vec3::new(0.0, 2.5, -2.0), 0.1), bulb)
            .unwrap();
        scene.add_light(PointLight::new(Vec3::new(0.0, 2.5, -2.0), Color::splat(2.0)));
        scene
    }

    #[test]
    fn test_lit_sphere_brighter_than_shadowed_plane() {
        let scene = shadow_scene();

        // Straight down onto the top of the sphere
        let lit = ray_trace(&scene, Ray::new(Vec3::new(0.0, 2.0, -2.0), Vec3::NEG_Y));
        // Onto the floor directly under the sphere
        let origin = Vec3::new(1.5, 0.5, -2.0);
        let shadowed = ray_trace(
            &scene,
            Ray::new(origin, Vec3::new(0.0, 0.0, -2.0) - origin),
        );

        // Diffuse 2 / 1^2 plus ambient
        assert!((lit - Color::new(2.05, 0.0, 0.0)).length() < 1e-3, "lit={lit}");
        // Ambient only
        assert!((shadowed - Color::splat(0.025)).length() < 1e-4, "shadowed={shadowed}");
        assert!(lit.element_sum() > shadowed.element_sum());
    }

    #[test]
    fn test_ray_trace_miss_is_black() {
        let scene = shadow_scene();
        let ray = Ray::new(Vec3::new(0.0, 1.0, -1.0), Vec3::Z);
        assert_eq!(ray_trace(&scene, ray), Color::ZERO);
    }

    #[test]
    fn test_ray_trace_follows_mirror() {
        let mut scene = Scene::new();
        let mirror = scene.add_material("mirror", Material::mirror(Color::ZERO, Color::ONE));
        let wall = scene.add_material("wall", Material::diffuse(Color::new(0.0, 1.0, 0.0)));
        scene.set_ambient(Color::ONE);
        // Mirror floor, green back wall
        scene
            .add_primitive(Plane::new(Vec3::ZERO, Vec3::Y), mirror)
            .unwrap();
        scene
            .add_primitive(Plane::new(Vec3::new(0.0, 0.0, -4.0), Vec3::Z), wall)
            .unwrap();

        let origin = Vec3::new(0.0, 1.0, -1.0);
        let ray = Ray::new(origin, Vec3::new(0.0, -1.0, -1.0));
        let color = ray_trace(&scene, ray);

        // Half the mirror's reflectance reaches the wall's ambient term
        assert!((color - Color::new(0.0, 0.5, 0.0)).length() < 1e-4, "color={color}");
    }

    #[test]
    fn test_path_trace_emissive_hit() {
        let mut scene = Scene::new();
        let light = scene.add_material("light", Material::emitter(Color::new(1.0, 1.0, 0.5)));
        scene
            .add_primitive(Sphere::new(Vec3::new(0.0, 1.5, -2.0), 0.5), light)
            .unwrap();

        let mut rng = StdRng::seed_from_u64(42);
        let ray = Ray::new(Vec3::new(0.0, 1.5, -0.5), Vec3::NEG_Z);
        assert_eq!(path_trace(&scene, ray, &mut rng), Color::new(1.0, 1.0, 0.5));
    }

    #[test]
    fn test_path_trace_miss_is_black() {
        let scene = Scene::new();
        let mut rng = StdRng::seed_from_u64(42);
        let ray = Ray::new(Vec3::new(0.0, 1.5, -0.5), Vec3::NEG_Z);
        assert_eq!(path_trace(&scene, ray, &mut rng), Color::ZERO);
    }

    #[test]
    fn test_path_trace_absorbing_surface_is_black() {
        let mut scene = Scene::new();
        let black = scene.add_material("black", Material::diffuse(Color::ZERO));
        scene
            .add_primitive(Plane::new(Vec3::ZERO, Vec3::Y), black)
            .unwrap();

        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..20 {
            let ray = Ray::new(Vec3::new(0.0, 1.0, -1.0), Vec3::new(0.0, -1.0, -0.5));
            assert_eq!(path_trace(&scene, ray, &mut rng), Color::ZERO);
        }
    }

    #[test]
    fn test_path_trace_estimate_is_bounded() {
        let mut scene = shadow_scene();
        let ceiling = scene.add_material("ceiling", Material::emitter(Color::ONE));
        scene
            .add_primitive(Plane::new(Vec3::new(0.0, 3.0, 0.0), Vec3::NEG_Y), ceiling)
            .unwrap();

        let mut rng = StdRng::seed_from_u64(5);
        let ray = Ray::new(Vec3::new(1.0, 1.0, -1.0), Vec3::new(0.0, -1.0, -0.2));
        let mut total = Color::ZERO;
        for _ in 0..200 {
            let c = path_trace(&scene, ray, &mut rng);
            assert!(c.min_element() >= 0.0);
            total += c;
        }
        // Gray floor under a white sky reflects some light
        assert!(total.x > 0.0);
        assert!(total.x / 200.0 < 3.0);
    }

    #[test]
    fn test_integrator_dispatch() {
        let scene = shadow_scene();
        let mut rng = StdRng::seed_from_u64(1);
        let ray = Ray::new(Vec3::new(0.0, 2.0, -2.0), Vec3::NEG_Y);

        let traced = Integrator::from_path_tracing(false).radiance(&scene, ray, &mut rng);
        assert_eq!(traced, ray_trace(&scene, ray));
        assert_eq!(Integrator::from_path_tracing(true), Integrator::PathTrace);
        assert_eq!(Integrator::PathTrace.to_string(), "path trace");
    }
}
