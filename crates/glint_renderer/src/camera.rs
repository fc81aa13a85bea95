//! Pinhole camera with orbit controls.
//!
//! Primary rays only depend on the position, the look/right/up basis, the
//! vertical field of view and the aspect ratio. The orbit state and the
//! view/projection matrices exist for interactive front ends.

use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, PI, TAU};

use glint_math::{Mat4, Ray, Vec3};

const ROTATE_RATIO: f32 = 0.25 * PI / 180.0;
const TRANSLATE_RATIO: f32 = 0.001;
const ZOOM_RATIO: f32 = 0.05;

/// Spherical coordinates of the camera around its target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orbit {
    pub radius: f32,
    /// Azimuth around +Y, measured from +Z
    pub phi: f32,
    /// Polar angle from +Y
    pub theta: f32,
    pub target: Vec3,
}

/// Camera for generating rays into the scene.
#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Vec3,
    pub look: Vec3,
    pub right: Vec3,
    pub up: Vec3,
    /// Vertical field of view in radians
    pub fov_y: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,

    orbit: Orbit,
    saved: Orbit,
}

impl Camera {
    /// Create a camera one unit in front of the origin, looking down -Z.
    pub fn new(aspect: f32) -> Self {
        let orbit = Orbit {
            radius: 1.0,
            phi: 0.0,
            theta: FRAC_PI_2,
            target: Vec3::ZERO,
        };
        let mut camera = Self {
            position: Vec3::Z,
            look: Vec3::NEG_Z,
            right: Vec3::X,
            up: Vec3::Y,
            fov_y: FRAC_PI_4,
            aspect,
            near: 1.0,
            far: 1000.0,
            orbit,
            saved: orbit,
        };
        camera.apply_orbit();
        camera
    }

    /// Set lens settings.
    pub fn with_lens(mut self, fov_y: f32, near: f32, far: f32) -> Self {
        self.fov_y = fov_y;
        self.near = near;
        self.far = far;
        self
    }

    /// Place the camera on an orbit around `target`. The orbit is also
    /// remembered as the [`reset`](Self::reset) position.
    pub fn with_orbit(mut self, radius: f32, phi: f32, theta: f32, target: Vec3) -> Self {
        self.set_spherical(radius, phi, theta, target);
        self.saved = self.orbit;
        self
    }

    /// Cartesian offset of spherical coordinates, with +Y as the pole.
    pub fn spherical_to_cartesian(radius: f32, phi: f32, theta: f32) -> Vec3 {
        Vec3::new(
            theta.sin() * phi.sin(),
            theta.cos(),
            theta.sin() * phi.cos(),
        ) * radius
    }

    /// Point the camera at `target` from `position`.
    pub fn look_at(&mut self, position: Vec3, target: Vec3) {
        self.position = position;
        self.orbit.target = target;
        self.look = (target - position).normalize();
        self.right = self.look.cross(Vec3::Y).normalize();
        self.up = self.right.cross(self.look).normalize();
    }

    /// Move the camera onto the given orbit.
    pub fn set_spherical(&mut self, radius: f32, phi: f32, theta: f32, target: Vec3) {
        self.orbit = Orbit {
            radius,
            phi,
            theta,
            target,
        };
        self.apply_orbit();
    }

    fn apply_orbit(&mut self) {
        let Orbit {
            radius,
            phi,
            theta,
            target,
        } = self.orbit;
        self.look_at(target + Self::spherical_to_cartesian(radius, phi, theta), target);
    }

    /// Orbit around the target by a mouse delta in pixels.
    pub fn rotate(&mut self, dx: f32, dy: f32) {
        self.orbit.phi = (self.orbit.phi - ROTATE_RATIO * dx).rem_euclid(TAU);
        self.orbit.theta = (self.orbit.theta - ROTATE_RATIO * dy).clamp(0.1, PI - 0.1);
        self.apply_orbit();
    }

    /// Pan the target in the view plane by a mouse delta in pixels.
    pub fn translate(&mut self, dx: f32, dy: f32) {
        let step = TRANSLATE_RATIO * self.orbit.radius;
        self.orbit.target += step * (dy * self.up - dx * self.right);
        self.apply_orbit();
    }

    /// Move towards (positive `dy`) or away from the target.
    pub fn zoom(&mut self, dy: f32) {
        self.orbit.radius = (self.orbit.radius / (ZOOM_RATIO * dy).exp()).clamp(0.1, 150.0);
        self.apply_orbit();
    }

    /// Return to the orbit given at construction.
    pub fn reset(&mut self) {
        self.orbit = self.saved;
        self.apply_orbit();
    }

    /// Update aspect ratio (e.g., on window resize)
    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
    }

    pub fn orbit(&self) -> Orbit {
        self.orbit
    }

    /// Get the view matrix (world → camera space)
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.look, self.up)
    }

    /// Get the projection matrix (camera → clip space, z in [-1, 1])
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov_y, self.aspect, self.near, self.far)
    }

    /// Get the combined view-projection matrix
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Primary ray through normalized screen coordinates.
    ///
    /// `sx` and `sy` are in [0, 1]; (0, 0) is the bottom-left corner of the
    /// view and (0.5, 0.5) is straight down the look direction.
    pub fn generate_ray(&self, sx: f32, sy: f32) -> Ray {
        let tx = sx * 2.0 - 1.0;
        let ty = sy * 2.0 - 1.0;
        let dy = (self.fov_y / 2.0).tan();
        let dx = dy * self.aspect;
        Ray::new(
            self.position,
            self.look + ty * dy * self.up + tx * dx * self.right,
        )
    }
}
