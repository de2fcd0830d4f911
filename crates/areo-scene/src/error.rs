//! Scene loading and validation errors.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    #[error("layer `{name}` has non-positive radius {radius}")]
    NonPositiveRadius { name: String, radius: f32 },

    #[error("layer `{name}` has non-positive height {height}")]
    NonPositiveHeight { name: String, height: f32 },

    /// Interior layers must shrink from crust to inner core.
    #[error("layer `{inner}` (r={inner_radius}) must be smaller than `{outer}` (r={outer_radius})")]
    LayerOrder {
        outer: String,
        outer_radius: f32,
        inner: String,
        inner_radius: f32,
    },

    #[error("layer `{name}` (r={radius}) extends beyond the shell (r={shell_radius})")]
    OutsideShell {
        name: String,
        radius: f32,
        shell_radius: f32,
    },

    #[error("scene `{0}` has nothing to draw")]
    EmptyScene(String),

    #[error("failed to read scene {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse scene {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },

    #[error("failed to serialize scene: {0}")]
    Serialize(#[from] ron::Error),

    #[error("failed to encode texture: {0}")]
    Texture(#[from] png::EncodingError),
}
