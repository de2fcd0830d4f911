//! Cosmetic per-frame oscillation of wave paths.
//!
//! The displayed copy of a path is offset vertically by
//! `sin(elapsed · speed + i · INDEX_PHASE_STEP) · amplitude` for point `i`.
//! The offset depends only on `elapsed`, so calling once or many times for the
//! same instant gives the same result and the logical path is never touched.
//! This replaces adding a small sine to the points every frame, which drifts
//! with the frame rate and never returns to the base path.

use glam::Vec3;

use crate::wave::{WaveKind, WavePath};

/// Default peak vertical offset.
pub const DEFAULT_AMPLITUDE: f32 = 0.002;

/// Phase difference between consecutive points.
pub const INDEX_PHASE_STEP: f32 = 0.01;

/// Write `base` plus the oscillation at `elapsed` into `display`.
///
/// Only the y coordinate is perturbed. Extra points in either slice are left
/// alone.
pub fn perturb(display: &mut [Vec3], base: &[Vec3], elapsed: f32, speed: f32, amplitude: f32) {
    for (i, (out, origin)) in display.iter_mut().zip(base).enumerate() {
        let phase = elapsed * speed + i as f32 * INDEX_PHASE_STEP;
        *out = Vec3::new(origin.x, origin.y + phase.sin() * amplitude, origin.z);
    }
}

/// A wave path paired with the copy handed to the renderer each frame.
#[derive(Debug, Clone)]
pub struct AnimatedWave {
    path: WavePath,
    display: Vec<Vec3>,
    pub speed: f32,
    pub amplitude: f32,
    elapsed: f32,
}

impl AnimatedWave {
    /// Wraps `path`; the display copy starts unperturbed.
    pub fn new(path: WavePath, speed: f32, amplitude: f32) -> Self {
        let display = path.points().to_vec();
        Self {
            path,
            display,
            speed,
            amplitude,
            elapsed: 0.0,
        }
    }

    /// Returns the wave type of the underlying path.
    pub fn kind(&self) -> WaveKind {
        self.path.kind
    }

    /// The unperturbed path.
    pub fn path(&self) -> &WavePath {
        &self.path
    }

    /// Points as last perturbed.
    pub fn display_points(&self) -> &[Vec3] {
        &self.display
    }

    /// Wave clock value of the last update.
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Recompute the displayed points for wave clock `elapsed`.
    pub fn perturb(&mut self, elapsed: f32) {
        self.elapsed = elapsed;
        perturb(
            &mut self.display,
            self.path.points(),
            elapsed,
            self.speed,
            self.amplitude,
        );
    }

    /// Vertical displacement of point `i` from the logical path.
    pub fn offset_at(&self, i: usize) -> Option<f32> {
        Some(self.display.get(i)?.y - self.path.points().get(i)?.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wave::generate_wave_paths;

    fn wave() -> AnimatedWave {
        let path = generate_wave_paths(WaveKind::P, &[0.3]).remove(0);
        AnimatedWave::new(path, 2.5, DEFAULT_AMPLITUDE)
    }

    #[test]
    fn test_offsets_follow_formula() {
        let mut w = wave();
        w.perturb(1.7);
        for i in [0, 10, 50] {
            let expected = (1.7 * 2.5 + i as f32 * INDEX_PHASE_STEP).sin() * DEFAULT_AMPLITUDE;
            assert!((w.offset_at(i).unwrap() - expected).abs() < 1e-6);
        }
        assert!(w.offset_at(51).is_none());
    }

    #[test]
    fn test_only_y_changes() {
        let mut w = wave();
        w.perturb(0.9);
        for (shown, logical) in w.display_points().iter().zip(w.path().points()) {
            assert_eq!(shown.x, logical.x);
            assert_eq!(shown.z, logical.z);
        }
    }

    #[test]
    fn test_displacement_depends_on_time_not_call_count() {
        let mut repeated = wave();
        repeated.perturb(0.1);
        repeated.perturb(0.2);
        repeated.perturb(0.2);
        repeated.perturb(0.2);

        let mut once = wave();
        once.perturb(0.2);

        assert_eq!(repeated.display_points(), once.display_points());
    }

    #[test]
    fn test_later_call_does_not_reset_to_logical_path() {
        let mut w = wave();
        w.perturb(0.5);
        w.perturb(0.6);
        assert!(w.offset_at(0).unwrap().abs() > 0.0);
        assert_eq!(w.elapsed(), 0.6);
        // The logical path itself is untouched.
        assert_eq!(w.path().first(), Some(Vec3::Y));
    }

    #[test]
    fn test_perturb_bounded_by_amplitude() {
        let mut w = wave();
        for step in 0..100 {
            w.perturb(step as f32 * 0.01);
            for i in 0..w.display_points().len() {
                assert!(w.offset_at(i).unwrap().abs() <= DEFAULT_AMPLITUDE + 1e-7);
            }
        }
    }

    #[test]
    fn test_free_function_tolerates_length_mismatch() {
        let base = [Vec3::ZERO; 3];
        let mut display = [Vec3::ONE; 5];
        perturb(&mut display, &base, 0.0, 1.0, 1.0);
        assert_eq!(display[3], Vec3::ONE);
        assert!((display[1].y - 0.01_f32.sin()).abs() < 1e-7);
    }
}
