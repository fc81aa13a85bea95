//! Scene storage and nearest-hit queries.
//!
//! The scene is an arena: it owns every primitive, material and light, and
//! primitives refer to materials by [`MaterialId`]. Handles are checked
//! when a primitive is added, so later lookups cannot dangle.

use std::collections::HashMap;

use crate::error::SceneError;
use crate::light::PointLight;
use crate::material::{Color, Material, MaterialId};
use crate::shapes::{Geometry, Primitive, Surface, EPS};
use glint_math::{Aabb, Ray, Vec3};

/// Nearest visible intersection returned by [`Scene::intersect`].
#[derive(Debug, Clone, Copy)]
pub struct Hit<'a> {
    /// The primitive that was hit
    pub primitive: &'a Primitive,
    /// Hit point, clamped into the scene bounds
    pub point: Vec3,
    /// Distance along the ray
    pub distance: f32,
}

impl Hit<'_> {
    /// Surface normal of the hit primitive at the hit point.
    pub fn normal(&self) -> Vec3 {
        self.primitive.closest_normal(self.point)
    }
}

/// A static scene: primitives, named materials, point lights and an
/// ambient term.
#[derive(Debug, Clone)]
pub struct Scene {
    primitives: Vec<Primitive>,
    materials: Vec<Material>,
    names: HashMap<String, MaterialId>,
    lights: Vec<PointLight>,
    ambient: Color,
    bounds: Aabb,
}

impl Scene {
    /// Lower corner of the default scene bounds.
    pub const ROOM_MIN: Vec3 = Vec3::new(-2.0, 0.0, -4.0);
    /// Upper corner of the default scene bounds.
    pub const ROOM_MAX: Vec3 = Vec3::new(2.0, 3.0, 0.0);

    /// Create an empty scene bounded by the default room box.
    pub fn new() -> Self {
        Self {
            primitives: Vec::new(),
            materials: Vec::new(),
            names: HashMap::new(),
            lights: Vec::new(),
            ambient: Color::ZERO,
            bounds: Aabb::from_points(Self::ROOM_MIN, Self::ROOM_MAX),
        }
    }

    /// Replace the box that accepted hit points must lie in.
    pub fn with_bounds(mut self, bounds: Aabb) -> Self {
        self.bounds = bounds;
        self
    }

    /// Set the ambient light.
    pub fn with_ambient(mut self, ambient: Color) -> Self {
        self.ambient = ambient;
        self
    }

    /// Register a material under `name` and return its handle.
    ///
    /// Registering a name twice points the name at the new material;
    /// primitives already using the old one keep it.
    pub fn add_material(&mut self, name: impl Into<String>, material: Material) -> MaterialId {
        let id = MaterialId(self.materials.len());
        self.materials.push(material);
        self.names.insert(name.into(), id);
        id
    }

    /// Look up a material handle by name.
    pub fn material_id(&self, name: &str) -> Option<MaterialId> {
        self.names.get(name).copied()
    }

    /// Get a material by handle.
    pub fn material(&self, id: MaterialId) -> Option<&Material> {
        self.materials.get(id.0)
    }

    /// Material of a primitive owned by this scene.
    #[inline]
    pub fn material_of(&self, primitive: &Primitive) -> &Material {
        &self.materials[primitive.material().0]
    }

    /// Add a primitive using the material `material`.
    ///
    /// Returns the primitive's index.
    pub fn add_primitive(
        &mut self,
        geometry: impl Into<Geometry>,
        material: MaterialId,
    ) -> Result<usize, SceneError> {
        if material.0 >= self.materials.len() {
            return Err(SceneError::UnknownMaterial(material));
        }
        self.primitives.push(Primitive::new(geometry.into(), material));
        Ok(self.primitives.len() - 1)
    }

    /// Add a primitive using the material registered as `name`.
    pub fn add_named(
        &mut self,
        geometry: impl Into<Geometry>,
        name: &str,
    ) -> Result<usize, SceneError> {
        let id = self
            .material_id(name)
            .ok_or_else(|| SceneError::MissingMaterial(name.to_string()))?;
        self.add_primitive(geometry, id)
    }

    /// Add a point light.
    pub fn add_light(&mut self, light: PointLight) {
        self.lights.push(light);
    }

    pub fn set_ambient(&mut self, ambient: Color) {
        self.ambient = ambient;
    }

    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    pub fn lights(&self) -> &[PointLight] {
        &self.lights
    }

    pub fn ambient(&self) -> Color {
        self.ambient
    }

    pub fn bounds(&self) -> Aabb {
        self.bounds
    }

    /// Find the nearest primitive hit by `ray`.
    ///
    /// Candidates whose hit point falls outside the scene bounds are
    /// skipped. The returned point is clamped into the bounds.
    pub fn intersect(&self, ray: &Ray) -> Option<Hit<'_>> {
        let mut closest: Option<(&Primitive, Vec3)> = None;
        let mut dist = f32::INFINITY;

        for primitive in &self.primitives {
            let t = primitive.intersect(ray);
            if t < dist {
                let point = ray.at(t);
                if self.bounds.contains_within(point, EPS) {
                    dist = t;
                    closest = Some((primitive, point));
                }
            }
        }

        closest.map(|(primitive, point)| Hit {
            primitive,
            point: self.bounds.clamp(point),
            distance: dist,
        })
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}
