//! Wave path generation.
//!
//! Each angular sample becomes one quadratic Bézier from a source at the top
//! pole, bent through a control point, to an end point on an ellipse whose
//! depth factor depends on the wave kind.

use std::f32::consts::PI;

use glam::Vec3;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::bezier::QuadraticBezier;

/// Points per generated path (50 divisions, both ends included).
pub const DEFAULT_SAMPLES: usize = 51;

/// Angles fanning out from the pole over the hemisphere cutaway.
pub const HEMISPHERE_ANGLES: [f32; 11] = [
    -PI / 4.0,
    -PI / 6.0,
    0.0,
    PI / 6.0,
    PI / 4.0,
    PI / 5.0,
    -PI / 5.0,
    -PI / 3.0,
    -PI / 2.0,
    PI / 3.0,
    PI / 2.0,
];

/// Angles symmetric around zero used by the slanted cross-section.
pub const SYMMETRIC_ANGLES: [f32; 9] = [
    -PI / 5.0,
    -PI / 6.0,
    -PI / 12.0,
    -PI / 24.0,
    0.0,
    PI / 24.0,
    PI / 12.0,
    PI / 6.0,
    PI / 5.0,
];

/// Seismic body-wave type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WaveKind {
    /// Compressional; crosses solids and liquids, so it reaches the inner core.
    P,
    /// Shear; cannot cross the liquid outer core.
    S,
}

impl WaveKind {
    pub const ALL: [WaveKind; 2] = [WaveKind::P, WaveKind::S];

    /// Profile used when the caller does not supply one.
    pub fn default_profile(self) -> WaveProfile {
        match self {
            Self::P => WaveProfile {
                start: Vec3::Y,
                control: Vec3::new(0.0, 0.5, 0.0),
                end_x_scale: 1.0,
                end_y: 0.0,
                end_z_scale: 0.3,
            },
            // Control level with the source keeps the whole curve above
            // r = 0.62, outside the liquid core.
            Self::S => WaveProfile {
                start: Vec3::Y,
                control: Vec3::Y,
                end_x_scale: 0.8,
                end_y: 0.0,
                end_z_scale: 0.8,
            },
        }
    }

    /// Profile for the cross-section drawn in a plane slightly below the
    /// equator, entering from the +Z rim.
    pub fn slanted_profile(self) -> WaveProfile {
        match self {
            Self::P => WaveProfile {
                start: Vec3::new(0.0, -0.11, 1.0),
                control: Vec3::new(0.0, -0.11, 0.0),
                end_x_scale: 2.0,
                end_y: -0.11,
                end_z_scale: -0.8,
            },
            Self::S => WaveProfile {
                start: Vec3::new(0.0, -0.09, 1.0),
                control: Vec3::new(0.0, -0.09, 0.6),
                end_x_scale: 2.0,
                end_y: -0.09,
                end_z_scale: -0.2,
            },
        }
    }

    /// Default line colour, `0xRRGGBB`.
    pub fn default_color(self) -> u32 {
        match self {
            Self::P => 0xFF4500,
            Self::S => 0x00CED1,
        }
    }
}

impl std::fmt::Display for WaveKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::P => f.write_str("P"),
            Self::S => f.write_str("S"),
        }
    }
}

/// Tunable path shape. The end point for angle θ is
/// `(sin θ · end_x_scale, end_y, cos θ · end_z_scale)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaveProfile {
    pub start: Vec3,
    pub control: Vec3,
    pub end_x_scale: f32,
    pub end_y: f32,
    pub end_z_scale: f32,
}

impl WaveProfile {
    /// Magnitude of the depth scaling applied to the end point.
    pub fn depth_factor(&self) -> f32 {
        self.end_z_scale.abs()
    }

    /// Returns the end point for `angle` (radians).
    pub fn end_point(&self, angle: f32) -> Vec3 {
        let (sin, cos) = angle.sin_cos();
        Vec3::new(sin * self.end_x_scale, self.end_y, cos * self.end_z_scale)
    }

    /// Returns the curve definition for `angle`.
    pub fn sample_at(&self, angle: f32) -> WaveSample {
        WaveSample {
            angle,
            start: self.start,
            control: self.control,
            end: self.end_point(angle),
        }
    }
}

/// Curve definition for a single angular sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaveSample {
    pub angle: f32,
    pub start: Vec3,
    pub control: Vec3,
    pub end: Vec3,
}

impl WaveSample {
    /// Returns the Bézier through this sample's three points.
    pub fn curve(&self) -> QuadraticBezier {
        QuadraticBezier::new(self.start, self.control, self.end)
    }
}

/// Points sampled along one wave's curve. Never modified after generation;
/// animation works on a copy.
#[derive(Debug, Clone, PartialEq)]
pub struct WavePath {
    pub kind: WaveKind,
    pub angle: f32,
    points: Vec<Vec3>,
}

impl WavePath {
    /// Returns the sampled points, source first.
    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    /// Returns the number of sampled points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Returns the source point, if any.
    pub fn first(&self) -> Option<Vec3> {
        self.points.first().copied()
    }

    /// Returns the end point on the depth ellipse, if any.
    pub fn last(&self) -> Option<Vec3> {
        self.points.last().copied()
    }

    /// Smallest distance from the planet centre reached along the path.
    pub fn closest_approach(&self) -> f32 {
        self.points
            .iter()
            .map(|p| p.length())
            .fold(f32::INFINITY, f32::min)
    }
}

/// Generate one path per angle for `kind` using its default profile and
/// [`DEFAULT_SAMPLES`] points. Output order follows `angles`; an empty slice
/// yields an empty vector.
pub fn generate_wave_paths(kind: WaveKind, angles: &[f32]) -> Vec<WavePath> {
    generate_wave_paths_with(&kind.default_profile(), kind, angles, DEFAULT_SAMPLES)
}

/// Generate one path per angle from an explicit profile and sample count.
pub fn generate_wave_paths_with(
    profile: &WaveProfile,
    kind: WaveKind,
    angles: &[f32],
    samples: usize,
) -> Vec<WavePath> {
    let paths: Vec<WavePath> = angles
        .iter()
        .map(|&angle| WavePath {
            kind,
            angle,
            points: profile.sample_at(angle).curve().sample(samples),
        })
        .collect();
    debug!(
        "Generated {} {kind}-wave paths ({samples} points each, depth factor {:.2})",
        paths.len(),
        profile.depth_factor()
    );
    paths
}
