//! Glint renderer - progressive CPU ray tracing and path tracing
//!
//! Renders a small analytic scene (planes, spheres, boxes and hexagonal
//! lamp shades) progressively: every pass refines a patch of pixels and
//! writes the running mean into a display buffer.
//!
//! Two integrators are available:
//! - Whitted-style ray tracing with point lights, shadows and mirrors
//! - Monte Carlo path tracing with a diffuse + Phong BSDF

mod accumulator;
mod bsdf;
mod camera;
mod error;
mod integrator;
mod light;
mod material;
mod scene;
mod session;
pub mod shapes;

pub use accumulator::{color_to_rgba, linear_to_gamma, tone_map, Accumulator, PixelState};
pub use bsdf::{axis_angle, mirror, reflect, sample, BsdfSample};
pub use camera::{Camera, Orbit};
pub use error::{RenderError, RenderResult, SceneError};
pub use integrator::{path_trace, ray_trace, Integrator, PATH_TRACE_DEPTH, RAY_TRACE_DEPTH};
pub use light::PointLight;
pub use material::{Color, Material, MaterialId};
pub use scene::{Hit, Scene};
pub use session::{Presenter, RenderConfig, Session, DEFAULT_PATCH_SIZE};
pub use shapes::{Cuboid, Facing, Geometry, Plane, Primitive, Shade, Sphere, Surface};

/// Re-export Vec3 and common math types from glint_math
pub use glint_math::{Aabb, Interval, Ray, Vec3};
