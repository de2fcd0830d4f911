//! Scene assembly for Areo: data-driven scene descriptions and presets, the
//! context object that owns everything built from one, a fixed-timestep frame
//! scheduler, orbit camera, lights, the layer cross-section texture, and OBJ
//! export.

pub mod camera;
pub mod context;
pub mod description;
mod error;
pub mod export;
pub mod lighting;
pub mod presets;
pub mod scheduler;
pub mod texture;

pub use camera::{CameraSpec, OrbitCamera};
pub use context::{
    ContextOptions, LayerInstance, LayerRole, SceneContext, SceneSummary, WaveLine,
};
pub use description::{BaseDisc, CutSurface, LayerSpec, SceneDescription, WaveSet};
pub use error::SceneError;
pub use export::{ObjStats, save_obj, write_obj};
pub use lighting::Light;
pub use scheduler::{FIXED_DT, FrameInfo, FrameScheduler, MAX_FRAME_TIME, SchedulerState};
pub use texture::{
    ImageTextureLoader, LayerTexture, LoadedTexture, TextureLoader, generate_layer_texture,
};
