//! Built-in scene descriptions, one per [`SceneVariant`](areo_config::SceneVariant).

use std::f32::consts::FRAC_PI_2;

use areo_mesh::{Appearance, SphereBounds, TextureRef};
use areo_seismic::wave::{HEMISPHERE_ANGLES, SYMMETRIC_ANGLES};
use areo_seismic::{WaveFront, WaveKind};
use glam::Vec3;

use crate::description::{BaseDisc, CutSurface, LayerSpec, SceneDescription, WaveSet};
use crate::lighting::Light;

pub const MARS_TEXTURE: &str = "mars.jpg";
pub const MARS_BUMP_MAP: &str = "2k_mars_normal_map.jpg";

const MARS_RED: u32 = 0xC1440E;

/// Ring colours of the cut-surface texture, core outwards.
pub const CUT_SURFACE_COLORS: [u32; 5] = [0x8B0000, 0xB22222, 0xD2691E, 0xF4A460, 0xFFD700];

fn mars_surface(bump: bool) -> Appearance {
    let mut look = Appearance::textured(MARS_TEXTURE, MARS_RED);
    if bump {
        look.bump_map = Some(TextureRef::new(MARS_BUMP_MAP));
    }
    look
}

fn hemisphere_shell() -> LayerSpec {
    LayerSpec::sphere("mars", 1.0, mars_surface(true)).with_bounds(SphereBounds::UPPER_HEMISPHERE)
}

fn grey_base() -> BaseDisc {
    BaseDisc {
        radius: 1.0,
        appearance: Appearance {
            double_sided: true,
            ..Appearance::color(0x808080)
        },
    }
}

/// Camera light plus a fixed key light.
fn key_and_headlamp(key_intensity: f32) -> Vec<Light> {
    vec![
        Light::point(Vec3::new(2.0, 2.0, 5.0), key_intensity),
        Light::headlamp(1.0),
    ]
}

/// Nested textured spheres with expanding P/S wavefronts and shadow zones.
pub fn layered_spheres() -> SceneDescription {
    let mut scene = SceneDescription::new("layered-spheres");
    scene.layers = vec![
        LayerSpec::sphere("crust", 1.0, mars_surface(false)),
        LayerSpec::sphere("mantle", 0.7, Appearance::textured("mantle.jpg", 0xFF4500)),
        LayerSpec::sphere("core", 0.4, Appearance::textured("core.jpg", 0xFFD700)),
    ];
    scene.overlays = vec![
        LayerSpec::sphere(
            "s-wave shadow zone",
            1.5,
            Appearance {
                opacity: 0.5,
                ..Appearance::color(0x000000)
            },
        ),
        LayerSpec::sphere(
            "p-wave shadow zone",
            1.5,
            Appearance {
                opacity: 0.3,
                ..Appearance::color(0x0000FF)
            },
        ),
    ];
    scene.wavefronts = vec![WaveFront::primary(), WaveFront::secondary()];
    scene.lights = vec![Light::point(Vec3::new(5.0, 5.0, 5.0), 1.0)];
    scene
}

/// Mars with the `x > 0` half sliced away and a glowing core spinning inside.
pub fn cutaway_sphere() -> SceneDescription {
    let mut scene = SceneDescription::new("cutaway-sphere");
    scene.shell =
        Some(LayerSpec::sphere("mars", 1.0, mars_surface(true)).with_bounds(SphereBounds::CUTAWAY_HALF));
    scene.layers = vec![
        LayerSpec::sphere(
            "core",
            0.5,
            Appearance {
                emissive: Some(0xFF3300),
                ..Appearance::color(0xFF6600)
            },
        )
        .with_spin(0.005),
    ];
    scene.lights = vec![
        Light::point(Vec3::new(2.0, 2.0, 5.0), 0.5),
        Light::headlamp(1.0),
    ];
    scene
}

/// Sliced Mars whose flat face shows concentric layer rings.
pub fn cross_section() -> SceneDescription {
    let mut scene = SceneDescription::new("cross-section");
    scene.shell =
        Some(LayerSpec::sphere("mars", 1.0, mars_surface(false)).with_bounds(SphereBounds::CUTAWAY_HALF));
    scene.cut_surface = Some(CutSurface {
        radius: 1.0,
        ring_colors: CUT_SURFACE_COLORS.to_vec(),
        rotation_y: -FRAC_PI_2,
    });
    scene.lights = vec![
        Light::ambient(1.5),
        Light::point(Vec3::new(2.0, 2.0, 5.0), 2.0),
    ];
    scene
}

/// Upper hemisphere with stacked layer discs and a slanted fan of wave paths.
pub fn seismic_cross_section() -> SceneDescription {
    let mut scene = SceneDescription::new("seismic-cross-section");
    scene.shell = Some(hemisphere_shell());
    scene.layers = vec![
        LayerSpec::disc("crust", 1.0, 0.1, Appearance::textured("crust.png", 0x8B4513)),
        LayerSpec::disc(
            "outer core",
            0.61,
            0.15,
            Appearance::textured("outer_core.png", 0xFF8C00),
        ),
        LayerSpec::disc("inner core", 0.51, 0.2, Appearance::textured("core.png", 0xFFD700)),
    ];
    scene.base_disc = Some(grey_base());
    scene.waves = Some(WaveSet {
        p_profile: WaveKind::P.slanted_profile(),
        s_profile: WaveKind::S.slanted_profile(),
        p_color: 0x000000,
        ..WaveSet::new(&SYMMETRIC_ANGLES)
    });
    scene.lights = key_and_headlamp(1.0);
    scene
}

/// Upper hemisphere with layer discs and animated wave paths fanning from
/// the pole.
pub fn seismic_hemisphere() -> SceneDescription {
    let mut scene = SceneDescription::new("seismic-hemisphere");
    scene.shell = Some(hemisphere_shell());
    scene.layers = vec![
        LayerSpec::disc("crust", 0.7, 0.2, Appearance::textured("crust.png", 0x8B4513)),
        LayerSpec::disc(
            "outer core",
            0.6,
            0.15,
            Appearance::textured("outer_core.png", 0xFF8C00),
        ),
        LayerSpec::disc("inner core", 0.4, 0.2, Appearance::textured("core.png", 0xFFD700)),
    ];
    scene.base_disc = Some(grey_base());
    scene.waves = Some(WaveSet {
        animated: true,
        ..WaveSet::new(&HEMISPHERE_ANGLES)
    });
    scene.lights = key_and_headlamp(1.0);
    scene
}

#[cfg(test)]
mod tests {
    use super::*;

    fn interior_radii(scene: &SceneDescription) -> Vec<f32> {
        scene.layers.iter().map(|l| l.radius).collect()
    }

    #[test]
    fn test_layered_spheres() {
        let scene = layered_spheres();
        assert_eq!(interior_radii(&scene), vec![1.0, 0.7, 0.4]);
        assert_eq!(scene.wavefronts.len(), 2);
        assert!(scene.overlays.iter().all(|o| o.appearance.is_transparent()));
        assert!(scene.waves.is_none());
    }

    #[test]
    fn test_cutaway_core_spins() {
        let scene = cutaway_sphere();
        let shell = scene.shell.as_ref().unwrap();
        assert_eq!(shell.bounds, SphereBounds::CUTAWAY_HALF);
        assert_eq!(shell.appearance.textures().count(), 2);
        assert_eq!(scene.layers[0].spin_per_frame, 0.005);
        assert_eq!(scene.layers[0].appearance.emissive, Some(0xFF3300));
    }

    #[test]
    fn test_cross_section_rings() {
        let scene = cross_section();
        let cut = scene.cut_surface.as_ref().unwrap();
        assert_eq!(cut.ring_colors, CUT_SURFACE_COLORS.to_vec());
        assert!(scene.layers.is_empty());
    }

    #[test]
    fn test_seismic_cross_section_uses_slanted_profiles() {
        let scene = seismic_cross_section();
        assert_eq!(interior_radii(&scene), vec![1.0, 0.61, 0.51]);
        let waves = scene.waves.as_ref().unwrap();
        assert_eq!(waves.angles.len(), 9);
        assert_eq!(waves.p_profile, WaveKind::P.slanted_profile());
        assert_eq!(waves.color(WaveKind::P), 0x000000);
        assert!(!waves.animated);
    }

    #[test]
    fn test_seismic_hemisphere_is_animated() {
        let scene = seismic_hemisphere();
        assert_eq!(interior_radii(&scene), vec![0.7, 0.6, 0.4]);
        let waves = scene.waves.as_ref().unwrap();
        assert_eq!(waves.angles.len(), 11);
        assert_eq!(waves.s_profile, WaveKind::S.default_profile());
        assert!(waves.animated);
        assert!(scene.base_disc.as_ref().unwrap().appearance.double_sided);
    }
}
