//! Scene context: everything built from a [`SceneDescription`], plus the
//! per-frame state that changes while it is shown.
//!
//! Construction is the only place layer meshes and wave paths are generated.
//! [`SceneContext::update`] touches rotations, wave display copies,
//! wavefronts and the camera, never geometry.

use std::f32::consts::FRAC_PI_2;

use areo_config::Config;
use areo_mesh::{
    Appearance, Geometry, LayerMesh, LayerShape, LineVertex, SphereBounds, Surface, Tessellation,
    TextureRef, circle, layer::rgb_to_f32, sphere,
};
use areo_seismic::{
    AnimatedWave, DEFAULT_SAMPLES, WaveFront, WaveKind, generate_wave_paths_with,
};
use glam::{Mat4, Quat};
use serde::Serialize;
use tracing::{debug, info};

use crate::camera::OrbitCamera;
use crate::description::{LayerSpec, SceneDescription};
use crate::error::SceneError;
use crate::lighting::Light;
use crate::texture::{LayerTexture, generate_layer_texture};

/// Texture id the cut surface references for its generated ring texture.
pub const CUT_SURFACE_TEXTURE: &str = "cut_surface.png";

/// Segments of the unit sphere drawn for wavefronts.
const WAVEFRONT_SEGMENTS: u32 = 16;

/// Build and animation settings taken from [`Config`].
#[derive(Debug, Clone, PartialEq)]
pub struct ContextOptions {
    pub tessellation: Tessellation,
    pub wave_samples: usize,
    /// Wave clock units per second.
    pub wave_clock_rate: f32,
    pub wave_amplitude: f32,
    pub p_wave_speed: f32,
    pub s_wave_speed: f32,
    pub camera_damping: f32,
    pub aspect_ratio: f32,
    pub texture_size: u32,
}

impl From<&Config> for ContextOptions {
    fn from(config: &Config) -> Self {
        Self {
            tessellation: Tessellation::new(
                config.render.radial_segments,
                config.render.polar_segments,
            ),
            wave_samples: config.render.wave_samples.max(2),
            wave_clock_rate: config.animation.wave_clock_rate,
            wave_amplitude: config.animation.wave_amplitude,
            p_wave_speed: config.animation.p_wave_speed,
            s_wave_speed: config.animation.s_wave_speed,
            camera_damping: config.animation.camera_damping,
            aspect_ratio: config.aspect_ratio(),
            texture_size: config.output.texture_size.max(1),
        }
    }
}

impl Default for ContextOptions {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl ContextOptions {
    /// Returns the oscillation speed for `kind`.
    pub fn wave_speed(&self, kind: WaveKind) -> f32 {
        match kind {
            WaveKind::P => self.p_wave_speed,
            WaveKind::S => self.s_wave_speed,
        }
    }
}

/// What part of the scene a layer plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerRole {
    Shell,
    Interior,
    Base,
    CutSurface,
    Overlay,
}

/// A built layer with its current orientation.
#[derive(Debug, Clone)]
pub struct LayerInstance {
    pub name: String,
    pub role: LayerRole,
    pub mesh: LayerMesh,
    /// Current rotation about Y, radians.
    pub rotation_y: f32,
    pub spin_per_frame: f32,
}

impl LayerInstance {
    fn new(name: impl Into<String>, role: LayerRole, mesh: LayerMesh) -> Self {
        Self {
            name: name.into(),
            role,
            mesh,
            rotation_y: 0.0,
            spin_per_frame: 0.0,
        }
    }

    fn from_spec(spec: &LayerSpec, role: LayerRole, tess: &Tessellation) -> Self {
        Self {
            spin_per_frame: spec.spin_per_frame,
            ..Self::new(&spec.name, role, spec.build(tess))
        }
    }

    /// Returns the model matrix for the current spin.
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_rotation_y(self.rotation_y)
    }

    /// The mesh geometry with the current rotation baked in.
    pub fn world_geometry(&self) -> Geometry {
        let mut geometry = self.mesh.geometry.clone();
        if self.rotation_y != 0.0 {
            geometry.rotate(Quat::from_rotation_y(self.rotation_y));
        }
        geometry
    }
}

/// A wave path with the colour it is drawn in.
#[derive(Debug, Clone)]
pub struct WaveLine {
    pub wave: AnimatedWave,
    pub color: u32,
}

/// Owns every built object of one scene and its per-frame state.
pub struct SceneContext {
    name: String,
    layers: Vec<LayerInstance>,
    waves: Vec<WaveLine>,
    animate_waves: bool,
    wavefronts: Vec<WaveFront>,
    wavefront_geometry: Geometry,
    cut_texture: Option<LayerTexture>,
    camera: OrbitCamera,
    lights: Vec<Light>,
    options: ContextOptions,
    elapsed: f32,
    frame_count: u64,
}

impl SceneContext {
    /// Validate `description` and build everything it describes.
    pub fn new(description: &SceneDescription, options: ContextOptions) -> Result<Self, SceneError> {
        description.validate()?;
        let tess = options.tessellation;

        let mut layers = Vec::new();
        if let Some(shell) = &description.shell {
            layers.push(LayerInstance::from_spec(shell, LayerRole::Shell, &tess));
        }
        for spec in &description.layers {
            layers.push(LayerInstance::from_spec(spec, LayerRole::Interior, &tess));
        }
        if let Some(base) = &description.base_disc {
            let mut geometry = circle(base.radius, tess.radial_segments);
            geometry.rotate(Quat::from_rotation_x(-FRAC_PI_2));
            let mesh = flat_mesh(base.radius, geometry, base.appearance.clone());
            layers.push(LayerInstance::new("base", LayerRole::Base, mesh));
        }

        let mut cut_texture = None;
        if let Some(cut) = &description.cut_surface {
            let mut geometry = circle(cut.radius, tess.radial_segments);
            geometry.rotate(Quat::from_rotation_y(cut.rotation_y));
            let appearance = Appearance {
                surface: Surface::Texture {
                    map: TextureRef::new(CUT_SURFACE_TEXTURE),
                    fallback: cut.ring_colors.last().copied().unwrap_or(0x808080),
                },
                double_sided: true,
                ..Appearance::default()
            };
            let mesh = flat_mesh(cut.radius, geometry, appearance);
            layers.push(LayerInstance::new("cut surface", LayerRole::CutSurface, mesh));
            cut_texture = Some(generate_layer_texture(options.texture_size, &cut.ring_colors));
        }

        for spec in &description.overlays {
            layers.push(LayerInstance::from_spec(spec, LayerRole::Overlay, &tess));
        }

        for layer in &layers {
            debug!(
                "Built layer `{}` ({:?}): r={:.3}, {} vertices",
                layer.name,
                layer.role,
                layer.mesh.shape.radius(),
                layer.mesh.vertex_count()
            );
        }

        let mut waves = Vec::new();
        let mut animate_waves = false;
        if let Some(set) = &description.waves {
            animate_waves = set.animated;
            let samples = if options.wave_samples >= 2 {
                options.wave_samples
            } else {
                DEFAULT_SAMPLES
            };
            for kind in WaveKind::ALL {
                let paths = generate_wave_paths_with(set.profile(kind), kind, &set.angles, samples);
                waves.extend(paths.into_iter().map(|path| WaveLine {
                    wave: AnimatedWave::new(path, options.wave_speed(kind), options.wave_amplitude),
                    color: set.color(kind),
                }));
            }
        }

        let camera = OrbitCamera::new(
            &description.camera,
            options.camera_damping,
            options.aspect_ratio,
        );

        info!(
            "Built scene `{}`: {} layers, {} wave paths, {} wavefronts",
            description.name,
            layers.len(),
            waves.len(),
            description.wavefronts.len()
        );

        Ok(Self {
            name: description.name.clone(),
            layers,
            waves,
            animate_waves,
            wavefronts: description.wavefronts.clone(),
            wavefront_geometry: sphere(
                1.0,
                SphereBounds::FULL,
                Tessellation::new(WAVEFRONT_SEGMENTS, WAVEFRONT_SEGMENTS),
            ),
            cut_texture,
            camera,
            lights: description.lights.clone(),
            options,
            elapsed: 0.0,
            frame_count: 0,
        })
    }

    /// Build from the scene the configuration selects.
    pub fn from_config(config: &Config) -> Result<Self, SceneError> {
        let description = SceneDescription::from_config(config)?;
        Self::new(&description, ContextOptions::from(config))
    }

    /// Advance one frame of `dt` seconds.
    pub fn update(&mut self, dt: f32) {
        self.elapsed += dt;
        self.frame_count += 1;

        for layer in &mut self.layers {
            layer.rotation_y += layer.spin_per_frame;
        }

        if self.animate_waves {
            let clock = self.wave_clock();
            for line in &mut self.waves {
                line.wave.perturb(clock);
            }
        }

        for front in &mut self.wavefronts {
            front.advance(1);
        }

        self.camera.update();
    }

    /// Returns the scene name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Layers in draw order: shell, interior (outer to inner), base, cut
    /// surface, overlays.
    pub fn layers(&self) -> &[LayerInstance] {
        &self.layers
    }

    /// Returns the first layer called `name`.
    pub fn layer(&self, name: &str) -> Option<&LayerInstance> {
        self.layers.iter().find(|layer| layer.name == name)
    }

    /// Returns the wave lines, every P path followed by every S path.
    pub fn waves(&self) -> &[WaveLine] {
        &self.waves
    }

    /// Returns the expanding wavefronts in description order.
    pub fn wavefronts(&self) -> &[WaveFront] {
        &self.wavefronts
    }

    /// Unit wireframe sphere; scale by [`WaveFront::scale`] to draw a front.
    pub fn wavefront_geometry(&self) -> &Geometry {
        &self.wavefront_geometry
    }

    /// Returns the generated ring texture, if the scene has a cut surface.
    pub fn cut_texture(&self) -> Option<&LayerTexture> {
        self.cut_texture.as_ref()
    }

    pub fn camera(&self) -> &OrbitCamera {
        &self.camera
    }

    /// Gives input handlers access to queue camera motion.
    pub fn camera_mut(&mut self) -> &mut OrbitCamera {
        &mut self.camera
    }

    /// Returns the scene lights in description order.
    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    /// Returns the build and animation settings the context was created with.
    pub fn options(&self) -> &ContextOptions {
        &self.options
    }

    /// Seconds of simulated time.
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Returns the number of completed [`update`](Self::update) calls.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Time fed to the wave oscillation.
    pub fn wave_clock(&self) -> f32 {
        self.elapsed * self.options.wave_clock_rate
    }

    /// Wave paths as a line list: two vertices per segment.
    pub fn line_vertices(&self) -> Vec<LineVertex> {
        let mut vertices = Vec::new();
        for line in &self.waves {
            let color = rgb_to_f32(line.color);
            for segment in line.wave.display_points().windows(2) {
                vertices.extend(segment.iter().map(|p| LineVertex {
                    position: p.to_array(),
                    color,
                }));
            }
        }
        vertices
    }

    /// Returns a serialisable report of the current state.
    pub fn summary(&self) -> SceneSummary {
        SceneSummary {
            name: self.name.clone(),
            frames: self.frame_count,
            elapsed: self.elapsed,
            layers: self
                .layers
                .iter()
                .map(|layer| LayerSummary {
                    name: layer.name.clone(),
                    role: layer.role,
                    radius: layer.mesh.shape.radius(),
                    bounding_radius: layer.mesh.bounding_radius(),
                    vertices: layer.mesh.vertex_count(),
                    triangles: layer.mesh.geometry.triangle_count(),
                    rotation_y: layer.rotation_y,
                })
                .collect(),
            waves: self
                .waves
                .iter()
                .map(|line| WaveSummary {
                    kind: line.wave.kind(),
                    angle: line.wave.path().angle,
                    points: line.wave.path().len(),
                    closest_approach: line.wave.path().closest_approach(),
                })
                .collect(),
            wavefronts: self
                .wavefronts
                .iter()
                .map(|front| FrontSummary {
                    kind: front.kind,
                    radius: front.radius,
                    arrived: front.has_arrived(),
                })
                .collect(),
            camera_position: self.camera.position().to_array(),
        }
    }
}

/// Flat circle wrapped as a layer mesh.
fn flat_mesh(radius: f32, geometry: Geometry, appearance: Appearance) -> LayerMesh {
    LayerMesh {
        shape: LayerShape::Disc {
            radius,
            height: 0.0,
        },
        geometry,
        appearance,
    }
}

/// Snapshot of a scene for reports.
#[derive(Debug, Clone, Serialize)]
pub struct SceneSummary {
    pub name: String,
    pub frames: u64,
    pub elapsed: f32,
    pub layers: Vec<LayerSummary>,
    pub waves: Vec<WaveSummary>,
    pub wavefronts: Vec<FrontSummary>,
    pub camera_position: [f32; 3],
}

#[derive(Debug, Clone, Serialize)]
pub struct LayerSummary {
    pub name: String,
    pub role: LayerRole,
    pub radius: f32,
    pub bounding_radius: f32,
    pub vertices: usize,
    pub triangles: usize,
    pub rotation_y: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct WaveSummary {
    pub kind: WaveKind,
    pub angle: f32,
    pub points: usize,
    pub closest_approach: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct FrontSummary {
    pub kind: WaveKind,
    pub radius: f32,
    pub arrived: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use areo_config::SceneVariant;

    fn context(variant: SceneVariant) -> SceneContext {
        let options = ContextOptions {
            tessellation: Tessellation::new(16, 8),
            ..ContextOptions::default()
        };
        SceneContext::new(&SceneDescription::preset(variant), options).unwrap()
    }

    #[test]
    fn test_invalid_description_is_rejected() {
        let description = SceneDescription::new("empty");
        assert!(matches!(
            SceneContext::new(&description, ContextOptions::default()),
            Err(SceneError::EmptyScene(_))
        ));
    }

    #[test]
    fn test_layers_are_outer_to_inner() {
        let ctx = context(SceneVariant::SeismicHemisphere);
        let interior: Vec<f32> = ctx
            .layers()
            .iter()
            .filter(|l| l.role == LayerRole::Interior)
            .map(|l| l.mesh.bounding_radius())
            .collect();
        assert_eq!(interior.len(), 3);
        assert!(interior.windows(2).all(|w| w[0] > w[1]));
        assert_eq!(ctx.layers()[0].role, LayerRole::Shell);
    }

    #[test]
    fn test_wave_counts_and_lengths() {
        let ctx = context(SceneVariant::SeismicHemisphere);
        assert_eq!(ctx.waves().len(), 22);
        assert!(ctx.waves().iter().all(|w| w.wave.path().len() == 51));
        assert_eq!(ctx.line_vertices().len(), 22 * 50 * 2);
    }

    #[test]
    fn test_update_does_not_rebuild_geometry() {
        let mut ctx = context(SceneVariant::SeismicHemisphere);
        let before: Vec<Geometry> = ctx.layers().iter().map(|l| l.mesh.geometry.clone()).collect();
        let paths: Vec<_> = ctx.waves().iter().map(|w| w.wave.path().clone()).collect();
        for _ in 0..30 {
            ctx.update(1.0 / 60.0);
        }
        let after: Vec<Geometry> = ctx.layers().iter().map(|l| l.mesh.geometry.clone()).collect();
        assert_eq!(before, after);
        for (line, path) in ctx.waves().iter().zip(&paths) {
            assert_eq!(line.wave.path(), path);
        }
    }

    #[test]
    fn test_animated_waves_follow_wave_clock() {
        let mut ctx = context(SceneVariant::SeismicHemisphere);
        for _ in 0..60 {
            ctx.update(1.0 / 60.0);
        }
        let clock = ctx.wave_clock();
        assert!((clock - 0.6).abs() < 1e-4);
        let line = &ctx.waves()[0];
        let expected = (clock * line.wave.speed).sin() * ctx.options().wave_amplitude;
        let offset = line.wave.offset_at(0).unwrap();
        assert!((offset - expected).abs() < 1e-6);
    }

    #[test]
    fn test_static_waves_stay_on_path() {
        let mut ctx = context(SceneVariant::SeismicCrossSection);
        ctx.update(0.5);
        for line in ctx.waves() {
            assert_eq!(line.wave.display_points(), line.wave.path().points());
        }
        assert_eq!(ctx.waves()[0].color, 0x000000);
    }

    #[test]
    fn test_core_spins_each_frame() {
        let mut ctx = context(SceneVariant::CutawaySphere);
        for _ in 0..10 {
            ctx.update(1.0 / 60.0);
        }
        let core = ctx.layer("core").unwrap();
        assert!((core.rotation_y - 0.05).abs() < 1e-6);
        assert_eq!(ctx.layer("mars").unwrap().rotation_y, 0.0);
    }

    #[test]
    fn test_wavefronts_advance() {
        let mut ctx = context(SceneVariant::LayeredSpheres);
        for _ in 0..100 {
            ctx.update(1.0 / 60.0);
        }
        let fronts = ctx.wavefronts();
        assert!(!fronts[0].has_arrived());
        assert!((fronts[0].radius - 1.1).abs() < 1e-3);
        assert!(fronts[1].has_arrived());
    }

    #[test]
    fn test_cross_section_has_texture_and_disc() {
        let ctx = context(SceneVariant::CrossSection);
        let texture = ctx.cut_texture().unwrap();
        assert_eq!(texture.width(), ctx.options().texture_size);
        let cut = ctx.layer("cut surface").unwrap();
        assert_eq!(cut.role, LayerRole::CutSurface);
        assert!((cut.mesh.bounding_radius() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_base_disc_faces_up() {
        let ctx = context(SceneVariant::SeismicHemisphere);
        let base = ctx.layer("base").unwrap();
        assert!(base.mesh.geometry.positions.iter().all(|p| p.y.abs() < 1e-5));
        assert!(base.mesh.geometry.normals.iter().all(|n| (n.y - 1.0).abs() < 1e-5));
    }

    #[test]
    fn test_summary_reports_every_part() {
        let ctx = context(SceneVariant::LayeredSpheres);
        let summary = ctx.summary();
        assert_eq!(summary.layers.len(), 5);
        assert_eq!(summary.wavefronts.len(), 2);
        assert!(summary.waves.is_empty());
        assert_eq!(summary.camera_position, [0.0, 0.0, 3.0]);
    }
}
