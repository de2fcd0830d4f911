//! Quadratic Bézier curves in 3D.

use glam::Vec3;

/// A quadratic Bézier curve `B(t) = (1-t)²·start + 2t(1-t)·control + t²·end`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadraticBezier {
    pub start: Vec3,
    pub control: Vec3,
    pub end: Vec3,
}

impl QuadraticBezier {
    /// Creates a curve from its two end points and one control point.
    pub fn new(start: Vec3, control: Vec3, end: Vec3) -> Self {
        Self {
            start,
            control,
            end,
        }
    }

    /// Evaluate the curve at `t` in `[0, 1]`.
    ///
    /// The endpoints are returned verbatim so `t = 0` and `t = 1` reproduce
    /// `start` and `end` without rounding.
    pub fn point_at(&self, t: f32) -> Vec3 {
        if t <= 0.0 {
            return self.start;
        }
        if t >= 1.0 {
            return self.end;
        }
        let s = 1.0 - t;
        self.start * (s * s) + self.control * (2.0 * s * t) + self.end * (t * t)
    }

    /// Tangent (first derivative) at `t`.
    pub fn tangent_at(&self, t: f32) -> Vec3 {
        let t = t.clamp(0.0, 1.0);
        (self.control - self.start) * (2.0 * (1.0 - t)) + (self.end - self.control) * (2.0 * t)
    }

    /// Sample `count` points at uniform parameter steps from `t = 0` to
    /// `t = 1` inclusive. `count` of 0 gives nothing; 1 gives the start.
    pub fn sample(&self, count: usize) -> Vec<Vec3> {
        match count {
            0 => Vec::new(),
            1 => vec![self.start],
            _ => {
                let divisions = (count - 1) as f32;
                (0..count)
                    .map(|i| self.point_at(i as f32 / divisions))
                    .collect()
            }
        }
    }

    /// Length of the sampled polyline with `count` points.
    pub fn approximate_length(&self, count: usize) -> f32 {
        self.sample(count)
            .windows(2)
            .map(|w| w[0].distance(w[1]))
            .sum()
    }
}
