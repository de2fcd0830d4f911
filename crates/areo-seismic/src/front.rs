//! Expanding spherical wavefronts centred on the planet origin.
//!
//! A front grows by a fixed step every frame until it reaches its stop radius
//! (the planet surface for P-waves, the core boundary for S-waves), then
//! holds there flagged as arrived so the renderer can recolour it.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::wave::WaveKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FrontState {
    Propagating,
    Arrived,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaveFront {
    pub kind: WaveKind,
    pub radius: f32,
    /// Radius gained per frame.
    pub speed: f32,
    pub stop_radius: f32,
    pub state: FrontState,
}

impl WaveFront {
    /// Creates a front at `initial_radius`, already arrived if that is past
    /// `stop_radius`.
    pub fn new(kind: WaveKind, initial_radius: f32, speed: f32, stop_radius: f32) -> Self {
        let state = if initial_radius < stop_radius {
            FrontState::Propagating
        } else {
            FrontState::Arrived
        };
        Self {
            kind,
            radius: initial_radius,
            speed,
            stop_radius,
            state,
        }
    }

    /// P-wave front that crosses every layer and keeps going past the surface.
    pub fn primary() -> Self {
        Self::new(WaveKind::P, 0.1, 0.01, 1.5)
    }

    /// S-wave front that halts at the mantle boundary.
    pub fn secondary() -> Self {
        Self::new(WaveKind::S, 0.1, 0.008, 0.7)
    }

    /// Advance by `frames` frames. Returns `true` if this call made the front
    /// arrive.
    pub fn advance(&mut self, frames: u32) -> bool {
        if self.state == FrontState::Arrived {
            return false;
        }
        for _ in 0..frames {
            if self.radius >= self.stop_radius {
                break;
            }
            self.radius += self.speed;
        }
        if self.radius >= self.stop_radius {
            self.state = FrontState::Arrived;
            debug!(
                "{}-wave front arrived at r={:.3} (stop {:.3})",
                self.kind, self.radius, self.stop_radius
            );
            return true;
        }
        false
    }

    /// Returns `true` once the front has reached its stop radius.
    pub fn has_arrived(&self) -> bool {
        self.state == FrontState::Arrived
    }

    /// Uniform scale applied to a unit wireframe sphere.
    pub fn scale(&self) -> f32 {
        self.radius
    }

    /// Colour to draw the front with: its own until arrival, then red.
    pub fn color(&self) -> u32 {
        match (self.state, self.kind) {
            (FrontState::Arrived, _) => 0xFF0000,
            (FrontState::Propagating, WaveKind::P) => 0x0000FF,
            (FrontState::Propagating, WaveKind::S) => 0x00FF00,
        }
    }
}
