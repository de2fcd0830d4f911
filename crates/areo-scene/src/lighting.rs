//! Light descriptions handed to the renderer.

use areo_mesh::layer::rgb_to_f32;
use glam::Vec3;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Light {
    /// Uniform fill light.
    Ambient { color: u32, intensity: f32 },
    /// Omnidirectional light. When `attached_to_camera` is set, `position`
    /// is an offset from the camera rather than a world position.
    Point {
        position: Vec3,
        color: u32,
        intensity: f32,
        attached_to_camera: bool,
    },
}

impl Light {
    /// White ambient light.
    pub fn ambient(intensity: f32) -> Self {
        Self::Ambient {
            color: 0xFFFFFF,
            intensity,
        }
    }

    /// White point light fixed in the world at `position`.
    pub fn point(position: Vec3, intensity: f32) -> Self {
        Self::Point {
            position,
            color: 0xFFFFFF,
            intensity,
            attached_to_camera: false,
        }
    }

    /// A white light riding along with the camera.
    pub fn headlamp(intensity: f32) -> Self {
        Self::Point {
            position: Vec3::ZERO,
            color: 0xFFFFFF,
            intensity,
            attached_to_camera: true,
        }
    }

    /// World-space position for point lights given the current camera position.
    pub fn world_position(&self, camera_position: Vec3) -> Option<Vec3> {
        match self {
            Self::Ambient { .. } => None,
            Self::Point {
                position,
                attached_to_camera: true,
                ..
            } => Some(camera_position + *position),
            Self::Point { position, .. } => Some(*position),
        }
    }

    /// Colour scaled by intensity.
    pub fn radiance(&self) -> Vec3 {
        let (color, intensity) = match self {
            Self::Ambient { color, intensity } | Self::Point { color, intensity, .. } => {
                (*color, *intensity)
            }
        };
        Vec3::from_array(rgb_to_f32(color)) * intensity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headlamp_follows_camera() {
        let camera = Vec3::new(0.0, 0.0, 3.0);
        assert_eq!(Light::headlamp(1.0).world_position(camera), Some(camera));
        let fixed = Light::point(Vec3::new(2.0, 2.0, 5.0), 1.0);
        assert_eq!(fixed.world_position(camera), Some(Vec3::new(2.0, 2.0, 5.0)));
        assert_eq!(Light::ambient(1.5).world_position(camera), None);
    }

    #[test]
    fn test_radiance_scales_color() {
        let light = Light::ambient(1.5);
        assert!((light.radiance() - Vec3::splat(1.5)).length() < 1e-6);
    }
}
