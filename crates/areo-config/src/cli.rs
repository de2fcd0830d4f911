//! Command-line arguments shared by Areo binaries.

use std::path::PathBuf;

use clap::Parser;

use crate::{Config, SceneVariant};

/// Areo command-line arguments.
///
/// Every flag is optional; set flags win over `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "areo", about = "Mars interior and seismic wave-path generator")]
pub struct CliArgs {
    /// Built-in scene to generate.
    #[arg(long, value_enum)]
    pub variant: Option<SceneVariant>,

    /// RON scene description to load instead of a preset.
    #[arg(long)]
    pub scene: Option<PathBuf>,

    /// Number of frames to simulate before export.
    #[arg(long)]
    pub frames: Option<u64>,

    /// Directory receiving exported artifacts.
    #[arg(long)]
    pub out_dir: Option<PathBuf>,

    /// Azimuthal and polar segment count for curved surfaces.
    #[arg(long)]
    pub segments: Option<u32>,

    /// Tracing filter directive, e.g. `debug` or `areo_scene=trace`.
    #[arg(long)]
    pub log_level: Option<String>,

    /// Directory holding `config.ron` instead of the platform default.
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Overwrite every setting the command line names.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(variant) = args.variant {
            self.scene.variant = variant;
        }
        if let Some(ref path) = args.scene {
            self.scene.scene_file = Some(path.clone());
        }
        if let Some(frames) = args.frames {
            self.output.frames = frames;
        }
        if let Some(ref dir) = args.out_dir {
            self.output.directory = dir.clone();
        }
        if let Some(segments) = args.segments {
            self.render.radial_segments = segments;
            self.render.polar_segments = segments;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_override() {
        let mut config = Config::default();
        let args = CliArgs {
            variant: Some(SceneVariant::CutawaySphere),
            segments: Some(16),
            ..Default::default()
        };
        config.apply_cli_overrides(&args);
        assert_eq!(config.scene.variant, SceneVariant::CutawaySphere);
        assert_eq!(config.render.radial_segments, 16);
        assert_eq!(config.render.polar_segments, 16);
        // Non-overridden fields retain defaults
        assert_eq!(config.output.frames, 120);
        assert_eq!(config.render.wave_samples, 51);
    }

    #[test]
    fn test_cli_no_override() {
        let original = Config::default();
        let mut config = Config::default();
        config.apply_cli_overrides(&CliArgs::default());
        assert_eq!(config, original);
    }

    #[test]
    fn test_cli_parses_variant_names() {
        let args = CliArgs::parse_from([
            "areo",
            "--variant",
            "layered-spheres",
            "--frames",
            "10",
            "--out-dir",
            "out",
        ]);
        assert_eq!(args.variant, Some(SceneVariant::LayeredSpheres));
        assert_eq!(args.frames, Some(10));
        assert_eq!(args.out_dir, Some(PathBuf::from("out")));
    }
}
