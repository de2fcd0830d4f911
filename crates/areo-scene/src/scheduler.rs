//! Fixed-timestep frame scheduler.
//!
//! Accumulates real frame time and runs the per-frame callback at a fixed
//! 60 Hz. The callback can stop the scheduler by returning
//! [`ControlFlow::Break`]; the owner can pause, resume or stop it between
//! frames. Once stopped it never runs another frame.

use std::ops::ControlFlow;
use std::time::Instant;

use tracing::{debug, warn};

/// Fixed simulation step: 60 Hz.
pub const FIXED_DT: f64 = 1.0 / 60.0;

/// Longest frame time accepted in one call. Longer stalls are clamped and the
/// lost time is dropped instead of replayed.
pub const MAX_FRAME_TIME: f64 = 0.25;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Running,
    Paused,
    Stopped,
}

/// Passed to the per-frame callback.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInfo {
    /// Zero-based index of this frame since the scheduler was created.
    pub index: u64,
    pub dt: f64,
    /// Simulated time at the start of this frame.
    pub elapsed: f64,
}

#[derive(Debug)]
pub struct FrameScheduler {
    previous_time: Option<Instant>,
    accumulator: f64,
    elapsed: f64,
    frame_count: u64,
    state: SchedulerState,
}

impl FrameScheduler {
    /// Creates a running scheduler with nothing accumulated.
    pub fn new() -> Self {
        Self {
            previous_time: None,
            accumulator: 0.0,
            elapsed: 0.0,
            frame_count: 0,
            state: SchedulerState::Running,
        }
    }

    /// Returns the current run state.
    pub fn state(&self) -> SchedulerState {
        self.state
    }

    pub fn is_stopped(&self) -> bool {
        self.state == SchedulerState::Stopped
    }

    /// Returns the number of fixed steps run so far.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Simulated seconds run so far.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Fraction of a step left in the accumulator, in `[0, 1)`.
    pub fn alpha(&self) -> f64 {
        if self.accumulator > 0.0 {
            self.accumulator / FIXED_DT
        } else {
            0.0
        }
    }

    /// Stop stepping until [`resume`](Self::resume). No effect unless running.
    pub fn pause(&mut self) {
        if self.state == SchedulerState::Running {
            self.state = SchedulerState::Paused;
            debug!("Frame scheduler paused at frame {}", self.frame_count);
        }
    }

    /// Continue after [`pause`](Self::pause).
    pub fn resume(&mut self) {
        if self.state == SchedulerState::Paused {
            self.state = SchedulerState::Running;
            // Wall-clock time spent paused is not replayed.
            self.previous_time = None;
            debug!("Frame scheduler resumed at frame {}", self.frame_count);
        }
    }

    /// Stop for good; later calls run no frames.
    pub fn stop(&mut self) {
        if self.state != SchedulerState::Stopped {
            self.state = SchedulerState::Stopped;
            self.accumulator = 0.0;
            debug!("Frame scheduler stopped after {} frames", self.frame_count);
        }
    }

    /// Add `frame_time` seconds and run as many fixed steps as fit.
    ///
    /// Returns the number of frames run. Paused and stopped schedulers run
    /// nothing and accumulate nothing.
    pub fn advance(
        &mut self,
        frame_time: f64,
        mut on_frame: impl FnMut(FrameInfo) -> ControlFlow<()>,
    ) -> u32 {
        if self.state != SchedulerState::Running {
            return 0;
        }

        let mut frame_time = frame_time.max(0.0);
        if frame_time > MAX_FRAME_TIME {
            warn!(
                "Frame time {:.1}ms exceeds maximum, clamping to {:.1}ms",
                frame_time * 1000.0,
                MAX_FRAME_TIME * 1000.0
            );
            frame_time = MAX_FRAME_TIME;
        }
        self.accumulator += frame_time;

        let mut ran = 0;
        while self.accumulator >= FIXED_DT {
            if self.step(&mut on_frame).is_break() {
                self.stop();
                break;
            }
            self.accumulator -= FIXED_DT;
            ran += 1;
        }
        ran
    }

    /// Like [`advance`](Self::advance), measuring frame time from the wall
    /// clock since the previous call.
    pub fn tick(&mut self, on_frame: impl FnMut(FrameInfo) -> ControlFlow<()>) -> u32 {
        let now = Instant::now();
        let frame_time = self
            .previous_time
            .map_or(0.0, |previous| now.duration_since(previous).as_secs_f64());
        self.previous_time = Some(now);
        self.advance(frame_time, on_frame)
    }

    /// Run exactly `frames` fixed steps regardless of wall-clock time, for
    /// headless runs. Stops early if the scheduler is not running or the
    /// callback breaks.
    pub fn run_frames(
        &mut self,
        frames: u64,
        mut on_frame: impl FnMut(FrameInfo) -> ControlFlow<()>,
    ) -> u64 {
        let mut ran = 0;
        while ran < frames && self.state == SchedulerState::Running {
            if self.step(&mut on_frame).is_break() {
                self.stop();
                break;
            }
            ran += 1;
        }
        ran
    }

    fn step(&mut self, on_frame: &mut impl FnMut(FrameInfo) -> ControlFlow<()>) -> ControlFlow<()> {
        let info = FrameInfo {
            index: self.frame_count,
            dt: FIXED_DT,
            elapsed: self.elapsed,
        };
        let flow = on_frame(info);
        if flow.is_continue() {
            self.elapsed += FIXED_DT;
            self.frame_count += 1;
        }
        flow
    }
}

impl Default for FrameScheduler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(counter: &mut u32) -> impl FnMut(FrameInfo) -> ControlFlow<()> + '_ {
        move |_| {
            *counter += 1;
            ControlFlow::Continue(())
        }
    }

    #[test]
    fn test_fixed_dt_value() {
        assert!((FIXED_DT - 1.0 / 60.0).abs() < f64::EPSILON * 10.0);
    }

    #[test]
    fn test_single_step() {
        let mut scheduler = FrameScheduler::new();
        let mut frames = 0;
        assert_eq!(scheduler.advance(FIXED_DT, count(&mut frames)), 1);
        assert_eq!(frames, 1);
        assert!(scheduler.alpha() < 1e-9);
    }

    #[test]
    fn test_partial_step_accumulates() {
        let mut scheduler = FrameScheduler::new();
        let mut frames = 0;
        scheduler.advance(0.5 * FIXED_DT, count(&mut frames));
        assert_eq!(frames, 0);
        assert!((scheduler.alpha() - 0.5).abs() < 1e-9);
        scheduler.advance(0.6 * FIXED_DT, count(&mut frames));
        assert_eq!(frames, 1);
    }

    #[test]
    fn test_frame_info_sequence() {
        let mut scheduler = FrameScheduler::new();
        let mut seen = Vec::new();
        scheduler.advance(3.5 * FIXED_DT, |info| {
            seen.push(info);
            ControlFlow::Continue(())
        });
        assert_eq!(seen.len(), 3);
        for (i, info) in seen.iter().enumerate() {
            assert_eq!(info.index, i as u64);
            assert!((info.elapsed - i as f64 * FIXED_DT).abs() < 1e-12);
            assert_eq!(info.dt, FIXED_DT);
        }
        assert!((scheduler.elapsed() - 3.0 * FIXED_DT).abs() < 1e-12);
    }

    #[test]
    fn test_max_frame_time_clamp() {
        let mut scheduler = FrameScheduler::new();
        let mut frames = 0;
        scheduler.advance(1.0, count(&mut frames));
        let max_frames = (MAX_FRAME_TIME / FIXED_DT).ceil() as u32;
        assert!(frames > 0);
        assert!(frames <= max_frames, "expected at most {max_frames}, got {frames}");
    }

    #[test]
    fn test_negative_frame_time_ignored() {
        let mut scheduler = FrameScheduler::new();
        let mut frames = 0;
        scheduler.advance(-1.0, count(&mut frames));
        assert_eq!(frames, 0);
        assert_eq!(scheduler.alpha(), 0.0);
    }

    #[test]
    fn test_pause_does_not_accumulate() {
        let mut scheduler = FrameScheduler::new();
        let mut frames = 0;
        scheduler.pause();
        assert_eq!(scheduler.state(), SchedulerState::Paused);
        assert_eq!(scheduler.advance(10.0 * FIXED_DT, count(&mut frames)), 0);
        assert_eq!(scheduler.run_frames(5, count(&mut frames)), 0);
        scheduler.resume();
        assert_eq!(scheduler.state(), SchedulerState::Running);
        assert_eq!(scheduler.advance(0.0, count(&mut frames)), 0);
        assert_eq!(frames, 0);
        scheduler.advance(FIXED_DT, count(&mut frames));
        assert_eq!(frames, 1);
    }

    #[test]
    fn test_break_stops_scheduler() {
        let mut scheduler = FrameScheduler::new();
        let mut calls = 0;
        let ran = scheduler.run_frames(100, |info| {
            calls += 1;
            if info.index == 4 {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        });
        assert_eq!(ran, 4);
        assert_eq!(calls, 5);
        assert!(scheduler.is_stopped());
        assert_eq!(scheduler.frame_count(), 4);
    }

    #[test]
    fn test_stopped_is_terminal() {
        let mut scheduler = FrameScheduler::new();
        let mut frames = 0;
        scheduler.stop();
        scheduler.resume();
        assert_eq!(scheduler.state(), SchedulerState::Stopped);
        assert_eq!(scheduler.advance(1.0, count(&mut frames)), 0);
        assert_eq!(scheduler.run_frames(10, count(&mut frames)), 0);
        assert_eq!(frames, 0);
    }

    #[test]
    fn test_run_frames_exact() {
        let mut scheduler = FrameScheduler::new();
        let mut frames = 0;
        assert_eq!(scheduler.run_frames(120, count(&mut frames)), 120);
        assert_eq!(frames, 120);
        assert!((scheduler.elapsed() - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_deterministic_sequence() {
        let frame_times = [0.017, 0.015, 0.020, 0.016, 0.033, 0.008, 0.018];
        let mut a = FrameScheduler::new();
        let mut b = FrameScheduler::new();
        for &ft in &frame_times {
            let ran_a = a.advance(ft, |_| ControlFlow::Continue(()));
            let ran_b = b.advance(ft, |_| ControlFlow::Continue(()));
            assert_eq!(ran_a, ran_b);
            assert!((a.alpha() - b.alpha()).abs() < 1e-15);
        }
        assert_eq!(a.frame_count(), b.frame_count());
    }

    #[test]
    fn test_first_tick_runs_nothing() {
        let mut scheduler = FrameScheduler::default();
        let mut frames = 0;
        scheduler.tick(count(&mut frames));
        assert_eq!(frames, 0);
    }
}
