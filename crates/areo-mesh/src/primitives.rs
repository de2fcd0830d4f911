//! Primitive tessellators: UV sphere (with angular bounds), capped cylinder,
//! flat circle, and axis-aligned box.
//!
//! Conventions match the usual scene-graph primitives so meshes drop straight
//! into a Y-up renderer: spheres sweep azimuth `phi` around +Y and polar angle
//! `theta` down from the +Y pole, cylinders stand on the Y axis centred at the
//! origin, and circles lie in the XY plane facing +Z.

use std::f32::consts::{FRAC_PI_2, PI, TAU};

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::geometry::Geometry;

/// Segment counts for curved surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tessellation {
    /// Segments around the Y axis (spheres, cylinders, circles).
    pub radial_segments: u32,
    /// Segments from pole to pole (spheres only).
    pub polar_segments: u32,
}

impl Default for Tessellation {
    fn default() -> Self {
        Self {
            radial_segments: 64,
            polar_segments: 64,
        }
    }
}

impl Tessellation {
    pub fn new(radial_segments: u32, polar_segments: u32) -> Self {
        Self {
            radial_segments: radial_segments.max(3),
            polar_segments: polar_segments.max(2),
        }
    }
}

/// Angular extent of a sphere patch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SphereBounds {
    pub phi_start: f32,
    pub phi_length: f32,
    pub theta_start: f32,
    pub theta_length: f32,
}

impl SphereBounds {
    /// The whole sphere.
    pub const FULL: Self = Self {
        phi_start: 0.0,
        phi_length: TAU,
        theta_start: 0.0,
        theta_length: PI,
    };

    /// The `y >= 0` half: polar angle restricted to `[0, π/2]`.
    pub const UPPER_HEMISPHERE: Self = Self {
        phi_start: 0.0,
        phi_length: TAU,
        theta_start: 0.0,
        theta_length: FRAC_PI_2,
    };

    /// The `x <= 0` half left after slicing the `x > 0` side away.
    pub const CUTAWAY_HALF: Self = Self {
        phi_start: -FRAC_PI_2,
        phi_length: PI,
        theta_start: 0.0,
        theta_length: PI,
    };

    fn theta_end(&self) -> f32 {
        self.theta_start + self.theta_length
    }
}

impl Default for SphereBounds {
    fn default() -> Self {
        Self::FULL
    }
}

/// Tessellate a UV sphere patch of `radius`.
///
/// Produces `(radial + 1) * (polar + 1)` vertices. Degenerate triangles at a
/// closed pole are skipped.
pub fn sphere(radius: f32, bounds: SphereBounds, tess: Tessellation) -> Geometry {
    let ws = tess.radial_segments.max(3);
    let hs = tess.polar_segments.max(2);
    let row = ws + 1;
    let mut g = Geometry::with_capacity((row * (hs + 1)) as usize, (ws * hs * 6) as usize);
    let theta_end = bounds.theta_end().min(PI);

    for iy in 0..=hs {
        let v = iy as f32 / hs as f32;
        // Pole vertices take the centre of their segment so the texture
        // does not shear toward one edge.
        let u_offset = if iy == 0 && bounds.theta_start == 0.0 {
            0.5 / ws as f32
        } else if iy == hs && theta_end == PI {
            -0.5 / ws as f32
        } else {
            0.0
        };
        let theta = bounds.theta_start + v * bounds.theta_length;
        let (sin_t, cos_t) = theta.sin_cos();

        for ix in 0..=ws {
            let u = ix as f32 / ws as f32;
            let phi = bounds.phi_start + u * bounds.phi_length;
            let (sin_p, cos_p) = phi.sin_cos();
            let position = Vec3::new(
                -radius * cos_p * sin_t,
                radius * cos_t,
                radius * sin_p * sin_t,
            );
            g.push_vertex(position, position.normalize_or_zero(), [u + u_offset, 1.0 - v]);
        }
    }

    for iy in 0..hs {
        for ix in 0..ws {
            let a = iy * row + ix + 1;
            let b = iy * row + ix;
            let c = (iy + 1) * row + ix;
            let d = (iy + 1) * row + ix + 1;
            if iy != 0 || bounds.theta_start > 0.0 {
                g.push_triangle(a, b, d);
            }
            if iy != hs - 1 || theta_end < PI {
                g.push_triangle(b, c, d);
            }
        }
    }

    g
}

/// Tessellate a closed cylinder on the Y axis spanning `[-height/2, height/2]`.
pub fn cylinder(radius: f32, height: f32, radial_segments: u32) -> Geometry {
    let segments = radial_segments.max(3);
    let row = segments + 1;
    let half = height * 0.5;
    let mut g = Geometry::with_capacity((row * 4 + 2) as usize, (segments * 12) as usize);

    // Side wall: two rings, top first.
    for (ring, y) in [half, -half].into_iter().enumerate() {
        for ix in 0..=segments {
            let u = ix as f32 / segments as f32;
            let (sin, cos) = (u * TAU).sin_cos();
            g.push_vertex(
                Vec3::new(radius * sin, y, radius * cos),
                Vec3::new(sin, 0.0, cos),
                [u, 1.0 - ring as f32],
            );
        }
    }
    for ix in 0..segments {
        let a = ix;
        let b = row + ix;
        let c = row + ix + 1;
        let d = ix + 1;
        g.push_triangle(a, b, d);
        g.push_triangle(b, c, d);
    }

    for sign in [1.0_f32, -1.0] {
        let normal = Vec3::new(0.0, sign, 0.0);
        let center = g.push_vertex(Vec3::new(0.0, half * sign, 0.0), normal, [0.5, 0.5]);
        let first = center + 1;
        for ix in 0..=segments {
            let (sin, cos) = (ix as f32 / segments as f32 * TAU).sin_cos();
            g.push_vertex(
                Vec3::new(radius * sin, half * sign, radius * cos),
                normal,
                [cos * 0.5 + 0.5, sin * 0.5 * sign + 0.5],
            );
        }
        for ix in 0..segments {
            let i = first + ix;
            if sign > 0.0 {
                g.push_triangle(i, i + 1, center);
            } else {
                g.push_triangle(i + 1, i, center);
            }
        }
    }

    g
}

/// Tessellate a filled circle in the XY plane facing +Z.
pub fn circle(radius: f32, segments: u32) -> Geometry {
    let segments = segments.max(3);
    let mut g = Geometry::with_capacity(segments as usize + 2, segments as usize * 3);
    let center = g.push_vertex(Vec3::ZERO, Vec3::Z, [0.5, 0.5]);

    for s in 0..=segments {
        let (sin, cos) = (s as f32 / segments as f32 * TAU).sin_cos();
        g.push_vertex(
            Vec3::new(radius * cos, radius * sin, 0.0),
            Vec3::Z,
            [(cos + 1.0) * 0.5, (sin + 1.0) * 0.5],
        );
    }
    for i in 1..=segments {
        g.push_triangle(i, i + 1, center);
    }

    g
}

/// Tessellate an axis-aligned box centred at the origin, one quad per face.
pub fn cuboid(size: Vec3) -> Geometry {
    let h = size * 0.5;
    // (normal, u axis, v axis) per face; corners are normal ± u ± v.
    let faces = [
        (Vec3::X, Vec3::NEG_Z, Vec3::Y),
        (Vec3::NEG_X, Vec3::Z, Vec3::Y),
        (Vec3::Y, Vec3::X, Vec3::NEG_Z),
        (Vec3::NEG_Y, Vec3::X, Vec3::Z),
        (Vec3::Z, Vec3::X, Vec3::Y),
        (Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y),
    ];
    let mut g = Geometry::with_capacity(24, 36);

    for (normal, u_axis, v_axis) in faces {
        let corner = |su: f32, sv: f32| (normal + u_axis * su + v_axis * sv) * h;
        let a = g.push_vertex(corner(-1.0, -1.0), normal, [0.0, 0.0]);
        let b = g.push_vertex(corner(1.0, -1.0), normal, [1.0, 0.0]);
        let c = g.push_vertex(corner(1.0, 1.0), normal, [1.0, 1.0]);
        let d = g.push_vertex(corner(-1.0, 1.0), normal, [0.0, 1.0]);
        g.push_triangle(a, b, c);
        g.push_triangle(a, c, d);
    }

    g
}
