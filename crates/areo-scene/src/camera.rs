//! Damped orbit camera: rotate around a target, zoom, and pan.
//!
//! Input handlers queue motion with [`OrbitCamera::rotate`],
//! [`OrbitCamera::zoom`], and [`OrbitCamera::pan`]; [`OrbitCamera::update`]
//! runs once per frame before rendering. With damping enabled only a fraction
//! of the queued rotation and pan is applied per frame and the remainder
//! decays, which gives the camera its glide.

use std::f32::consts::PI;

use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

/// Keeps the camera off the exact poles where the up vector degenerates.
const POLAR_EPSILON: f32 = 1e-6;

/// Smallest orbit radius; at zero the eye sits on the target and zooming
/// can no longer scale it back out.
const MIN_ORBIT_RADIUS: f32 = 1e-3;

/// Initial camera placement from a scene description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSpec {
    pub position: Vec3,
    pub target: Vec3,
    pub fov_y_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub damping: bool,
    pub enable_pan: bool,
    pub min_distance: f32,
    pub max_distance: f32,
}

impl Default for CameraSpec {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 3.0),
            target: Vec3::ZERO,
            fov_y_degrees: 75.0,
            near: 0.1,
            far: 1000.0,
            damping: true,
            enable_pan: true,
            min_distance: 0.01,
            max_distance: 100.0,
        }
    }
}

/// Perspective camera orbiting `target` in spherical coordinates.
#[derive(Debug, Clone)]
pub struct OrbitCamera {
    pub target: Vec3,
    position: Vec3,
    /// `Some(f)` applies fraction `f` of pending motion per update.
    pub damping_factor: Option<f32>,
    pub enable_pan: bool,
    pub min_distance: f32,
    pub max_distance: f32,
    pub fov_y: f32,
    pub aspect_ratio: f32,
    pub near: f32,
    pub far: f32,
    theta_delta: f32,
    phi_delta: f32,
    scale: f32,
    pan_offset: Vec3,
}

impl OrbitCamera {
    /// Creates a camera at `spec.position` looking at `spec.target`.
    ///
    /// # Arguments
    ///
    /// * `damping_factor` - Fraction of queued motion applied per update when
    ///   `spec.damping` is set.
    /// * `aspect_ratio` - Viewport width divided by height.
    pub fn new(spec: &CameraSpec, damping_factor: f32, aspect_ratio: f32) -> Self {
        Self {
            target: spec.target,
            position: spec.position,
            damping_factor: spec.damping.then_some(damping_factor.clamp(f32::EPSILON, 1.0)),
            enable_pan: spec.enable_pan,
            min_distance: spec.min_distance,
            max_distance: spec.max_distance,
            fov_y: spec.fov_y_degrees.to_radians(),
            aspect_ratio,
            near: spec.near,
            far: spec.far,
            theta_delta: 0.0,
            phi_delta: 0.0,
            scale: 1.0,
            pan_offset: Vec3::ZERO,
        }
    }

    /// Returns the eye position in world space.
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Returns the current orbit radius (eye to target).
    pub fn distance(&self) -> f32 {
        self.position.distance(self.target)
    }

    /// Queue an orbit: `azimuth` around the Y axis, `polar` toward the poles.
    pub fn rotate(&mut self, azimuth: f32, polar: f32) {
        self.theta_delta -= azimuth;
        self.phi_delta -= polar;
    }

    /// Move toward the target by `factor` (> 1 zooms in, < 1 zooms out).
    pub fn zoom(&mut self, factor: f32) {
        if factor > 0.0 {
            self.scale /= factor;
        }
    }

    /// Queue a pan in screen space, scaled by the current distance.
    pub fn pan(&mut self, right: f32, up: f32) {
        if !self.enable_pan {
            return;
        }
        let forward = (self.target - self.position).normalize_or_zero();
        let right_axis = forward.cross(Vec3::Y).normalize_or_zero();
        let up_axis = right_axis.cross(forward);
        let distance = self.distance();
        self.pan_offset += (right_axis * right + up_axis * up) * distance;
    }

    /// Apply queued motion. Returns `true` if the camera moved.
    pub fn update(&mut self) -> bool {
        let before = self.position;
        let offset = self.position - self.target;
        let radius = offset.length();
        let mut theta = offset.x.atan2(offset.z);
        let mut phi = if radius > 0.0 {
            (offset.y / radius).clamp(-1.0, 1.0).acos()
        } else {
            PI / 2.0
        };

        let step = self.damping_factor.unwrap_or(1.0);
        theta += self.theta_delta * step;
        phi = (phi + self.phi_delta * step).clamp(POLAR_EPSILON, PI - POLAR_EPSILON);
        let floor = self.min_distance.max(MIN_ORBIT_RADIUS);
        let radius = (radius * self.scale).clamp(floor, self.max_distance.max(floor));
        self.target += self.pan_offset * step;

        let (sin_phi, cos_phi) = phi.sin_cos();
        let (sin_theta, cos_theta) = theta.sin_cos();
        self.position = self.target
            + Vec3::new(
                radius * sin_phi * sin_theta,
                radius * cos_phi,
                radius * sin_phi * cos_theta,
            );

        let decay = 1.0 - step;
        self.theta_delta *= decay;
        self.phi_delta *= decay;
        self.pan_offset *= decay;
        self.scale = 1.0;

        before.distance_squared(self.position) > 1e-12
    }

    /// Whether queued rotation or pan is still being applied.
    pub fn is_settling(&self) -> bool {
        self.theta_delta.abs() > 1e-6
            || self.phi_delta.abs() > 1e-6
            || self.pan_offset.length_squared() > 1e-12
    }

    /// Update the aspect ratio after a resize. A zero height is ignored.
    pub fn set_aspect_ratio(&mut self, width: f32, height: f32) {
        if height > 0.0 {
            self.aspect_ratio = width / height;
        }
    }

    /// Returns the right-handed view matrix looking at the target.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, Vec3::Y)
    }

    /// Returns the right-handed perspective projection.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect_ratio, self.near, self.far)
    }

    /// Returns `projection * view`.
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}
