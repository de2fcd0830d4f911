//! Headless Areo generator.
//!
//! Loads `config.ron` (creating it on first run), applies CLI overrides,
//! builds the selected scene, steps it through the fixed-timestep scheduler,
//! and writes the result to the output directory:
//!
//! - `scene.obj`: layer meshes and wave polylines
//! - `summary.json`: per-layer, per-wave and per-front report
//! - `cut_surface.png`: the layer ring texture, when the scene has a cut face
//!
//! Run with: `cargo run -p areo-demo -- --variant seismic-hemisphere --frames 120`

use std::fs;
use std::ops::ControlFlow;
use std::path::{Path, PathBuf};

use areo_config::{CliArgs, Config, default_config_dir};
use areo_scene::{FrameScheduler, SceneContext, SceneError, save_obj};
use clap::Parser;
use tracing::{error, info};

#[derive(Debug, thiserror::Error)]
enum DemoError {
    #[error(transparent)]
    Scene(#[from] SceneError),

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize summary: {0}")]
    Summary(#[from] serde_json::Error),
}

/// Files written by a run.
#[derive(Debug)]
struct Artifacts {
    obj: PathBuf,
    summary: PathBuf,
    texture: Option<PathBuf>,
}

fn main() {
    let args = CliArgs::parse();

    let config_dir = match args.config.clone() {
        Some(dir) => Some(dir),
        None => match default_config_dir() {
            Ok(dir) => Some(dir),
            Err(e) => {
                eprintln!("{e}, using defaults");
                None
            }
        },
    };

    let mut config = match &config_dir {
        Some(dir) => Config::load_or_create(dir).unwrap_or_else(|e| {
            eprintln!("Failed to load config: {e}, using defaults");
            Config::default()
        }),
        None => Config::default(),
    };
    config.apply_cli_overrides(&args);

    let log_dir = config_dir.as_ref().map(|dir| dir.join("logs"));
    areo_log::init_logging(log_dir.as_deref(), cfg!(debug_assertions), Some(&config));

    info!(
        "Areo: variant {:?}, {} frames, {}x{} segments",
        config.scene.variant,
        config.output.frames,
        config.render.radial_segments,
        config.render.polar_segments
    );

    match run(&config) {
        Ok(artifacts) => {
            info!("Wrote {}", artifacts.obj.display());
            info!("Wrote {}", artifacts.summary.display());
            if let Some(texture) = artifacts.texture {
                info!("Wrote {}", texture.display());
            }
        }
        Err(e) => {
            error!("{e}");
            std::process::exit(1);
        }
    }
}

fn run(config: &Config) -> Result<Artifacts, DemoError> {
    let mut ctx = SceneContext::from_config(config)?;

    let mut scheduler = FrameScheduler::new();
    let frames = scheduler.run_frames(config.output.frames, |frame| {
        ctx.update(frame.dt as f32);
        ControlFlow::Continue(())
    });
    info!(
        "Simulated {frames} frames ({:.2}s, wave clock {:.3})",
        scheduler.elapsed(),
        ctx.wave_clock()
    );

    write_artifacts(&ctx, &config.output.directory)
}

fn write_artifacts(ctx: &SceneContext, out_dir: &Path) -> Result<Artifacts, DemoError> {
    fs::create_dir_all(out_dir).map_err(|source| DemoError::Write {
        path: out_dir.to_path_buf(),
        source,
    })?;

    let obj = out_dir.join("scene.obj");
    save_obj(ctx, &obj)?;

    let texture = match ctx.cut_texture() {
        Some(tex) => {
            let path = out_dir.join("cut_surface.png");
            tex.save_png(&path)?;
            Some(path)
        }
        None => None,
    };

    let summary = out_dir.join("summary.json");
    let json = serde_json::to_string_pretty(&ctx.summary())?;
    fs::write(&summary, json).map_err(|source| DemoError::Write {
        path: summary.clone(),
        source,
    })?;

    Ok(Artifacts {
        obj,
        summary,
        texture,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use areo_config::SceneVariant;

    fn config(variant: SceneVariant, out_dir: &Path) -> Config {
        let mut config = Config::default();
        config.scene.variant = variant;
        config.output.directory = out_dir.to_path_buf();
        config.output.frames = 10;
        config.output.texture_size = 64;
        config.render.radial_segments = 8;
        config.render.polar_segments = 4;
        config
    }

    #[test]
    fn test_cross_section_writes_all_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out");
        let artifacts = run(&config(SceneVariant::CrossSection, &out)).unwrap();
        assert!(artifacts.obj.exists());
        assert!(artifacts.summary.exists());
        let texture = artifacts.texture.unwrap();
        assert_eq!(texture, out.join("cut_surface.png"));
        assert!(texture.exists());
    }

    #[test]
    fn test_summary_is_valid_json() {
        let dir = tempfile::tempdir().unwrap();
        let artifacts = run(&config(SceneVariant::SeismicHemisphere, dir.path())).unwrap();
        assert!(artifacts.texture.is_none());

        let text = fs::read_to_string(&artifacts.summary).unwrap();
        let json: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(json["name"], "seismic-hemisphere");
        assert_eq!(json["frames"], 10);
        assert_eq!(json["waves"].as_array().unwrap().len(), 22);
        assert_eq!(json["layers"][0]["role"], "shell");
    }

    #[test]
    fn test_missing_scene_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config(SceneVariant::LayeredSpheres, dir.path());
        config.scene.scene_file = Some(dir.path().join("missing.ron"));
        let err = run(&config).unwrap_err();
        assert!(matches!(err, DemoError::Scene(SceneError::Io { .. })));
    }
}
