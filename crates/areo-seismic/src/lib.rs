//! Idealized seismic wave geometry: Bézier wave paths through a layered
//! planet, their cosmetic per-frame animation, and expanding wavefronts.
//!
//! Nothing here models wave speeds. The shapes are illustrative constants
//! chosen so P-waves reach the inner core while S-waves stop short of the
//! liquid outer core.

pub mod animate;
pub mod bezier;
pub mod front;
pub mod wave;

pub use animate::{AnimatedWave, DEFAULT_AMPLITUDE, INDEX_PHASE_STEP, perturb};
pub use bezier::QuadraticBezier;
pub use front::{FrontState, WaveFront};
pub use wave::{
    DEFAULT_SAMPLES, WaveKind, WavePath, WaveProfile, WaveSample, generate_wave_paths,
    generate_wave_paths_with,
};
