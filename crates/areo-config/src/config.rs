//! Configuration structs with defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const CONFIG_FILE: &str = "config.ron";
const APP_NAME: &str = "areo";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Viewport settings handed to the renderer.
    pub window: WindowConfig,
    /// Tessellation density.
    pub render: RenderConfig,
    /// Which scene to build.
    pub scene: SceneConfig,
    /// Per-frame animation tuning.
    pub animation: AnimationConfig,
    /// Headless output settings.
    pub output: OutputConfig,
    /// Logging and diagnostics.
    pub debug: DebugConfig,
}

/// Viewport configuration. Only the aspect ratio and title reach the scene.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    pub title: String,
}

/// Tessellation settings for generated geometry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RenderConfig {
    /// Azimuthal segments for spheres, cylinders, and circles.
    pub radial_segments: u32,
    /// Polar segments for spheres.
    pub polar_segments: u32,
    /// Points sampled along each wave path (including both ends).
    pub wave_samples: usize,
}

/// The built-in scene layouts.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
pub enum SceneVariant {
    /// Nested full spheres with expanding P/S wavefronts and shadow zones.
    LayeredSpheres,
    /// Half-cut sphere exposing a spinning emissive core.
    CutawaySphere,
    /// Half-cut sphere with a concentric layer texture on the cut face.
    CrossSection,
    /// Hemisphere with layer discs and slanted wave paths.
    SeismicCrossSection,
    /// Hemisphere with layer discs and animated P/S wave paths.
    #[default]
    SeismicHemisphere,
}

/// Scene selection.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SceneConfig {
    /// Preset used when no scene file is given.
    pub variant: SceneVariant,
    /// Optional RON scene description overriding the preset.
    pub scene_file: Option<PathBuf>,
}

/// Wave animation tuning.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AnimationConfig {
    /// Wave clock units advanced per second of simulation time.
    pub wave_clock_rate: f32,
    /// Peak vertical offset applied to wave path points.
    pub wave_amplitude: f32,
    /// Oscillation speed factor for P-wave paths.
    pub p_wave_speed: f32,
    /// Oscillation speed factor for S-wave paths.
    pub s_wave_speed: f32,
    /// Orbit camera damping factor in `(0, 1]`.
    pub camera_damping: f32,
}

/// Headless run settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory receiving exported artifacts.
    pub directory: PathBuf,
    /// Number of frames simulated before export.
    pub frames: u64,
    /// Edge length in pixels of the generated cut-surface texture.
    pub texture_size: u32,
}

/// Diagnostics settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub log_level: String,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            title: "Areo - Mars interior".to_string(),
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            radial_segments: 64,
            polar_segments: 64,
            wave_samples: 51,
        }
    }
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            // 0.01 per frame at 60 Hz.
            wave_clock_rate: 0.6,
            wave_amplitude: 0.002,
            p_wave_speed: 2.5,
            s_wave_speed: 1.5,
            camera_damping: 0.25,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("areo-out"),
            frames: 120,
            texture_size: 512,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Platform configuration directory for Areo (e.g. `~/.config/areo`).
pub fn default_config_dir() -> Result<PathBuf, ConfigError> {
    dirs::config_dir()
        .map(|base| base.join(APP_NAME))
        .ok_or(ConfigError::NoConfigDir)
}

impl Config {
    /// Aspect ratio of the configured viewport.
    pub fn aspect_ratio(&self) -> f32 {
        self.window.width.max(1) as f32 / self.window.height.max(1) as f32
    }

    /// Read `config.ron` from `config_dir`, writing defaults there if it is missing.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE);

        if config_path.exists() {
            let config = Self::read(&config_path)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Write `config.ron` into `config_dir`, creating the directory if needed.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(|source| ConfigError::WriteError {
            path: config_dir.to_path_buf(),
            source,
        })?;

        let config_path = config_dir.join(CONFIG_FILE);
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .enumerate_arrays(false);
        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(|source| ConfigError::WriteError {
            path: config_path.clone(),
            source,
        })
    }

    /// Re-read `config.ron`; `Some` only when it differs from `self`.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let new_config = Self::read(&config_dir.join(CONFIG_FILE))?;

        if &new_config != self {
            log::info!("Reloaded changed config from {}", config_dir.display());
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }

    fn read(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
            path: path.to_path_buf(),
            source,
        })?;
        ron::from_str(&contents).map_err(|source| ConfigError::ParseError {
            path: path.to_path_buf(),
            source,
        })
    }
}
