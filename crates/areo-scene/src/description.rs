//! Data-driven scene description.
//!
//! One [`SceneDescription`] lists everything a visualization shows: the
//! layers (outer to inner), translucent overlays, an optional base disc and
//! cut-surface disc, the wave set and wavefronts, camera, and lights. It is
//! plain data, serialisable as RON, and validated before anything is built.

use std::fs;
use std::path::Path;

use areo_config::{Config, SceneVariant};
use areo_mesh::{Appearance, LayerMesh, SphereBounds, Tessellation, build_layer_with};
use areo_seismic::{WaveFront, WaveKind, WaveProfile};
use glam::Vec3;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::camera::CameraSpec;
use crate::error::SceneError;
use crate::lighting::Light;
use crate::presets;

/// `false` for zero, negative and NaN.
fn is_positive(value: f32) -> bool {
    value > 0.0
}

/// One planetary layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerSpec {
    pub name: String,
    pub radius: f32,
    /// `Some(h)` builds a disc of height `h`; `None` a sphere.
    #[serde(default)]
    pub height: Option<f32>,
    #[serde(default)]
    pub bounds: SphereBounds,
    #[serde(default)]
    pub appearance: Appearance,
    /// Translation applied after building.
    #[serde(default)]
    pub offset: Vec3,
    /// Rotation about Y added every frame, in radians.
    #[serde(default)]
    pub spin_per_frame: f32,
}

impl LayerSpec {
    /// Full sphere layer at the origin.
    pub fn sphere(name: impl Into<String>, radius: f32, appearance: Appearance) -> Self {
        Self {
            name: name.into(),
            radius,
            height: None,
            bounds: SphereBounds::FULL,
            appearance,
            offset: Vec3::ZERO,
            spin_per_frame: 0.0,
        }
    }

    /// Capped cylinder layer of the given height.
    pub fn disc(name: impl Into<String>, radius: f32, height: f32, appearance: Appearance) -> Self {
        Self {
            height: Some(height),
            ..Self::sphere(name, radius, appearance)
        }
    }

    pub fn with_bounds(mut self, bounds: SphereBounds) -> Self {
        self.bounds = bounds;
        self
    }

    pub fn with_offset(mut self, offset: Vec3) -> Self {
        self.offset = offset;
        self
    }

    pub fn with_spin(mut self, spin_per_frame: f32) -> Self {
        self.spin_per_frame = spin_per_frame;
        self
    }

    /// Build the mesh for this layer.
    pub fn build(&self, tess: &Tessellation) -> LayerMesh {
        let mesh = build_layer_with(
            self.radius,
            self.height,
            self.bounds,
            self.appearance.clone(),
            *tess,
        );
        if self.offset == Vec3::ZERO {
            mesh
        } else {
            mesh.translated(self.offset)
        }
    }

    fn check_dimensions(&self) -> Result<(), SceneError> {
        if !is_positive(self.radius) {
            return Err(SceneError::NonPositiveRadius {
                name: self.name.clone(),
                radius: self.radius,
            });
        }
        if let Some(height) = self.height
            && !is_positive(height)
        {
            return Err(SceneError::NonPositiveHeight {
                name: self.name.clone(),
                height,
            });
        }
        Ok(())
    }
}

/// Seismic wave paths to generate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaveSet {
    /// Angular samples in radians, used for both kinds.
    pub angles: Vec<f32>,
    pub p_profile: WaveProfile,
    pub s_profile: WaveProfile,
    pub p_color: u32,
    pub s_color: u32,
    /// Whether the displayed paths oscillate.
    #[serde(default)]
    pub animated: bool,
}

impl WaveSet {
    /// Wave set over `angles` with the default P and S profiles and colours.
    pub fn new(angles: &[f32]) -> Self {
        Self {
            angles: angles.to_vec(),
            p_profile: WaveKind::P.default_profile(),
            s_profile: WaveKind::S.default_profile(),
            p_color: WaveKind::P.default_color(),
            s_color: WaveKind::S.default_color(),
            animated: false,
        }
    }

    pub fn profile(&self, kind: WaveKind) -> &WaveProfile {
        match kind {
            WaveKind::P => &self.p_profile,
            WaveKind::S => &self.s_profile,
        }
    }

    pub fn color(&self, kind: WaveKind) -> u32 {
        match kind {
            WaveKind::P => self.p_color,
            WaveKind::S => self.s_color,
        }
    }
}

/// Flat circle closing the bottom of a hemisphere, facing +Y at `y = 0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseDisc {
    pub radius: f32,
    #[serde(default)]
    pub appearance: Appearance,
}

/// Flat disc carrying the generated concentric layer texture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CutSurface {
    pub radius: f32,
    /// Ring colours from the core outwards, `0xRRGGBB`.
    pub ring_colors: Vec<u32>,
    /// Rotation about Y applied to the disc, radians.
    #[serde(default)]
    pub rotation_y: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneDescription {
    pub name: String,
    /// Outer shell the interior layers sit inside.
    #[serde(default)]
    pub shell: Option<LayerSpec>,
    /// Interior layers, outermost first.
    #[serde(default)]
    pub layers: Vec<LayerSpec>,
    /// Translucent layers drawn on top; exempt from ordering rules.
    #[serde(default)]
    pub overlays: Vec<LayerSpec>,
    #[serde(default)]
    pub base_disc: Option<BaseDisc>,
    #[serde(default)]
    pub cut_surface: Option<CutSurface>,
    #[serde(default)]
    pub waves: Option<WaveSet>,
    #[serde(default)]
    pub wavefronts: Vec<WaveFront>,
    #[serde(default)]
    pub camera: CameraSpec,
    #[serde(default)]
    pub lights: Vec<Light>,
}

impl SceneDescription {
    /// An empty description; fails validation until something is added.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            shell: None,
            layers: Vec::new(),
            overlays: Vec::new(),
            base_disc: None,
            cut_surface: None,
            waves: None,
            wavefronts: Vec::new(),
            camera: CameraSpec::default(),
            lights: Vec::new(),
        }
    }

    /// Built-in description for `variant`.
    pub fn preset(variant: SceneVariant) -> Self {
        match variant {
            SceneVariant::LayeredSpheres => presets::layered_spheres(),
            SceneVariant::CutawaySphere => presets::cutaway_sphere(),
            SceneVariant::CrossSection => presets::cross_section(),
            SceneVariant::SeismicCrossSection => presets::seismic_cross_section(),
            SceneVariant::SeismicHemisphere => presets::seismic_hemisphere(),
        }
    }

    /// The scene file named in `config` if any, otherwise the configured
    /// preset.
    pub fn from_config(config: &Config) -> Result<Self, SceneError> {
        match &config.scene.scene_file {
            Some(path) => Self::load(path),
            None => Ok(Self::preset(config.scene.variant)),
        }
    }

    /// Read and validate a RON scene file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SceneError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| SceneError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let description: Self = ron::from_str(&contents).map_err(|source| SceneError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        description.validate()?;
        info!("Loaded scene `{}` from {}", description.name, path.display());
        Ok(description)
    }

    /// Write as pretty RON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SceneError> {
        let path = path.as_ref();
        let contents = self.to_ron()?;
        fs::write(path, contents).map_err(|source| SceneError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Serialises as pretty RON.
    pub fn to_ron(&self) -> Result<String, SceneError> {
        Ok(ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())?)
    }

    /// Every layer in draw order: shell, interior layers, overlays.
    pub fn all_layers(&self) -> impl Iterator<Item = &LayerSpec> {
        self.shell.iter().chain(&self.layers).chain(&self.overlays)
    }

    /// Check dimensions and nesting.
    ///
    /// Every layer needs a positive radius (and height, for discs). Interior
    /// layers must strictly shrink from first to last and fit inside the
    /// shell. Overlays are not ordered. A scene with nothing to draw is
    /// rejected.
    pub fn validate(&self) -> Result<(), SceneError> {
        for layer in self.all_layers() {
            layer.check_dimensions()?;
        }

        for pair in self.layers.windows(2) {
            let (outer, inner) = (&pair[0], &pair[1]);
            if inner.radius >= outer.radius {
                return Err(SceneError::LayerOrder {
                    outer: outer.name.clone(),
                    outer_radius: outer.radius,
                    inner: inner.name.clone(),
                    inner_radius: inner.radius,
                });
            }
        }

        if let Some(shell) = &self.shell {
            for layer in &self.layers {
                if layer.radius > shell.radius {
                    return Err(SceneError::OutsideShell {
                        name: layer.name.clone(),
                        radius: layer.radius,
                        shell_radius: shell.radius,
                    });
                }
            }
        }

        if let Some(cut) = &self.cut_surface
            && !is_positive(cut.radius)
        {
            return Err(SceneError::NonPositiveRadius {
                name: "cut surface".to_string(),
                radius: cut.radius,
            });
        }
        if let Some(base) = &self.base_disc
            && !is_positive(base.radius)
        {
            return Err(SceneError::NonPositiveRadius {
                name: "base disc".to_string(),
                radius: base.radius,
            });
        }

        let has_waves = self.waves.as_ref().is_some_and(|w| !w.angles.is_empty());
        if self.all_layers().next().is_none()
            && self.base_disc.is_none()
            && self.cut_surface.is_none()
            && !has_waves
            && self.wavefronts.is_empty()
        {
            return Err(SceneError::EmptyScene(self.name.clone()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SceneDescription {
        let mut scene = SceneDescription::new("sample");
        scene.layers = vec![
            LayerSpec::sphere("crust", 1.0, Appearance::color(0x8B4513)),
            LayerSpec::sphere("mantle", 0.7, Appearance::color(0xFF4500)),
            LayerSpec::sphere("core", 0.4, Appearance::color(0xFFD700)),
        ];
        scene
    }

    #[test]
    fn test_valid_scene_passes() {
        assert!(sample().validate().is_ok());
    }

    #[test]
    fn test_empty_scene_rejected() {
        let err = SceneDescription::new("nothing").validate().unwrap_err();
        assert!(matches!(err, SceneError::EmptyScene(name) if name == "nothing"));
    }

    #[test]
    fn test_non_positive_radius_rejected() {
        let mut scene = sample();
        scene.layers[2].radius = 0.0;
        let err = scene.validate().unwrap_err();
        assert!(matches!(err, SceneError::NonPositiveRadius { ref name, .. } if name == "core"));

        let mut scene = sample();
        scene.layers[1].radius = f32::NAN;
        assert!(scene.validate().is_err());
    }

    #[test]
    fn test_non_positive_height_rejected() {
        let mut scene = sample();
        scene
            .layers
            .push(LayerSpec::disc("plate", 0.3, -0.1, Appearance::default()));
        let err = scene.validate().unwrap_err();
        assert!(matches!(err, SceneError::NonPositiveHeight { .. }));

        let mut scene = sample();
        scene
            .layers
            .push(LayerSpec::disc("plate", 0.3, f32::NAN, Appearance::default()));
        assert!(matches!(scene.validate(), Err(SceneError::NonPositiveHeight { .. })));
    }

    #[test]
    fn test_nan_disc_radii_rejected() {
        let mut scene = sample();
        scene.base_disc = Some(BaseDisc {
            radius: f32::NAN,
            appearance: Appearance::default(),
        });
        let err = scene.validate().unwrap_err();
        assert!(matches!(err, SceneError::NonPositiveRadius { ref name, .. } if name == "base disc"));

        let mut scene = sample();
        scene.cut_surface = Some(CutSurface {
            radius: f32::NAN,
            ring_colors: vec![0xFFFFFF],
            rotation_y: 0.0,
        });
        let err = scene.validate().unwrap_err();
        assert!(matches!(err, SceneError::NonPositiveRadius { ref name, .. } if name == "cut surface"));
    }

    #[test]
    fn test_layer_order_enforced() {
        let mut scene = sample();
        scene.layers.swap(1, 2);
        let err = scene.validate().unwrap_err();
        assert!(matches!(
            err,
            SceneError::LayerOrder { ref outer, ref inner, .. } if outer == "crust" && inner == "core"
        ));

        let mut scene = sample();
        scene.layers[1].radius = 1.0;
        assert!(matches!(scene.validate(), Err(SceneError::LayerOrder { .. })));
    }

    #[test]
    fn test_layers_must_fit_in_shell() {
        let mut scene = sample();
        scene.shell = Some(LayerSpec::sphere("shell", 0.9, Appearance::default()));
        let err = scene.validate().unwrap_err();
        assert!(matches!(err, SceneError::OutsideShell { ref name, .. } if name == "crust"));
    }

    #[test]
    fn test_overlays_exempt_from_order() {
        let mut scene = sample();
        scene.overlays = vec![
            LayerSpec::sphere("shadow", 1.5, Appearance::color(0x000000)),
            LayerSpec::sphere("shadow2", 1.5, Appearance::color(0x0000FF)),
        ];
        assert!(scene.validate().is_ok());
    }

    #[test]
    fn test_waves_alone_are_drawable() {
        let mut scene = SceneDescription::new("waves");
        scene.waves = Some(WaveSet::new(&[0.0]));
        assert!(scene.validate().is_ok());
        scene.waves = Some(WaveSet::new(&[]));
        assert!(scene.validate().is_err());
    }

    #[test]
    fn test_all_presets_validate() {
        for variant in [
            SceneVariant::LayeredSpheres,
            SceneVariant::CutawaySphere,
            SceneVariant::CrossSection,
            SceneVariant::SeismicCrossSection,
            SceneVariant::SeismicHemisphere,
        ] {
            let scene = SceneDescription::preset(variant);
            assert!(scene.validate().is_ok(), "{variant:?} failed validation");
        }
    }

    #[test]
    fn test_ron_roundtrip_preserves_preset() {
        let scene = SceneDescription::preset(SceneVariant::SeismicCrossSection);
        let ron = scene.to_ron().unwrap();
        let parsed: SceneDescription = ron::from_str(&ron).unwrap();
        assert_eq!(parsed, scene);
    }

    #[test]
    fn test_minimal_ron_uses_defaults() {
        let ron = r#"(
            name: "minimal",
            layers: [(name: "core", radius: 0.5)],
        )"#;
        let scene: SceneDescription = ron::from_str(ron).unwrap();
        assert!(scene.validate().is_ok());
        assert_eq!(scene.layers[0].height, None);
        assert_eq!(scene.layers[0].bounds, SphereBounds::FULL);
        assert_eq!(scene.camera, CameraSpec::default());
        assert!(scene.lights.is_empty());
    }

    #[test]
    fn test_build_applies_offset() {
        let layer = LayerSpec::disc("crust", 0.7, 0.2, Appearance::default())
            .with_offset(Vec3::new(0.0, 0.1, 0.0));
        let mesh = layer.build(&Tessellation::default());
        let (lo, hi) = mesh.geometry.aabb().unwrap();
        assert!(lo.y.abs() < 1e-5);
        assert!((hi.y - 0.2).abs() < 1e-5);
        assert!((mesh.bounding_radius() - 0.7).abs() < 1e-5);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scene.ron");
        let scene = sample();
        scene.save(&path).unwrap();
        assert_eq!(SceneDescription::load(&path).unwrap(), scene);
    }

    #[test]
    fn test_load_reports_parse_and_io_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.ron");
        assert!(matches!(
            SceneDescription::load(&missing),
            Err(SceneError::Io { .. })
        ));

        let broken = dir.path().join("broken.ron");
        std::fs::write(&broken, "(name: ").unwrap();
        assert!(matches!(
            SceneDescription::load(&broken),
            Err(SceneError::Parse { .. })
        ));
    }

    #[test]
    fn test_from_config_uses_variant() {
        let mut config = Config::default();
        config.scene.variant = SceneVariant::CrossSection;
        let scene = SceneDescription::from_config(&config).unwrap();
        assert!(scene.cut_surface.is_some());
    }
}
