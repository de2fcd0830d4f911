//! Layer builder: turns a radius (and optional height) into the solid of
//! revolution representing one planetary layer.
//!
//! Spheres stand for full or partial shells; discs (short cylinders) stand for
//! layers drawn across the flat face of a hemisphere cutaway.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::geometry::Geometry;
use crate::primitives::{SphereBounds, Tessellation, cylinder, sphere};

/// Opaque handle naming an image resource. Resolution is the texture
/// loader's job; the builder only carries it along.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextureRef(pub String);

impl TextureRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Base colour source of a surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Surface {
    /// `0xRRGGBB` colour.
    Color(u32),
    /// Texture map, with a fallback colour used while it is unavailable.
    Texture { map: TextureRef, fallback: u32 },
}

/// How a layer should be shaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Appearance {
    pub surface: Surface,
    pub bump_map: Option<TextureRef>,
    /// `0xRRGGBB` self-illumination.
    pub emissive: Option<u32>,
    /// 1.0 is opaque.
    pub opacity: f32,
    pub double_sided: bool,
    pub wireframe: bool,
}

impl Default for Appearance {
    fn default() -> Self {
        Self {
            surface: Surface::Color(0x808080),
            bump_map: None,
            emissive: None,
            opacity: 1.0,
            double_sided: false,
            wireframe: false,
        }
    }
}

impl Appearance {
    /// Opaque single-colour appearance.
    pub fn color(rgb: u32) -> Self {
        Self {
            surface: Surface::Color(rgb),
            ..Self::default()
        }
    }

    /// Textured appearance drawn in `fallback` until the map loads.
    pub fn textured(map: impl Into<String>, fallback: u32) -> Self {
        Self {
            surface: Surface::Texture {
                map: TextureRef::new(map),
                fallback,
            },
            ..Self::default()
        }
    }

    pub fn is_transparent(&self) -> bool {
        self.opacity < 1.0
    }

    /// Base colour as linear-ish `[r, g, b]` in `0..=1`.
    pub fn base_rgb(&self) -> [f32; 3] {
        let rgb = match &self.surface {
            Surface::Color(rgb) => *rgb,
            Surface::Texture { fallback, .. } => *fallback,
        };
        rgb_to_f32(rgb)
    }

    /// Every texture this appearance references.
    pub fn textures(&self) -> impl Iterator<Item = &TextureRef> {
        let map = match &self.surface {
            Surface::Texture { map, .. } => Some(map),
            Surface::Color(_) => None,
        };
        map.into_iter().chain(self.bump_map.as_ref())
    }
}

/// Split `0xRRGGBB` into `[r, g, b]` floats.
pub fn rgb_to_f32(rgb: u32) -> [f32; 3] {
    [
        ((rgb >> 16) & 0xFF) as f32 / 255.0,
        ((rgb >> 8) & 0xFF) as f32 / 255.0,
        (rgb & 0xFF) as f32 / 255.0,
    ]
}

/// The solid a layer was built as.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LayerShape {
    Sphere { radius: f32, bounds: SphereBounds },
    Disc { radius: f32, height: f32 },
}

impl LayerShape {
    /// Returns the layer radius for either shape.
    pub fn radius(&self) -> f32 {
        match self {
            Self::Sphere { radius, .. } | Self::Disc { radius, .. } => *radius,
        }
    }
}

/// A built layer: geometry plus the appearance it should be drawn with.
#[derive(Debug, Clone)]
pub struct LayerMesh {
    pub shape: LayerShape,
    pub geometry: Geometry,
    pub appearance: Appearance,
}

impl LayerMesh {
    /// Largest distance of any vertex from the layer axis (Y).
    pub fn bounding_radius(&self) -> f32 {
        self.geometry.radial_extent()
    }

    /// Returns the number of vertices in the mesh.
    pub fn vertex_count(&self) -> usize {
        self.geometry.vertex_count()
    }

    /// Move the layer, e.g. to sit on a hemisphere base.
    pub fn translated(mut self, offset: Vec3) -> Self {
        self.geometry.translate(offset);
        self
    }
}

/// Build a layer with default tessellation.
///
/// `height == None` yields a full sphere of `radius`; `Some(h)` yields a disc
/// of `radius` and height `h` centred at `y = 0`. Inputs are expected to be
/// positive; there is no failure path.
pub fn build_layer(radius: f32, height: Option<f32>, appearance: Appearance) -> LayerMesh {
    build_layer_with(
        radius,
        height,
        SphereBounds::FULL,
        appearance,
        Tessellation::default(),
    )
}

/// Build a layer with explicit sphere bounds and tessellation. `bounds` is
/// ignored for discs.
pub fn build_layer_with(
    radius: f32,
    height: Option<f32>,
    bounds: SphereBounds,
    appearance: Appearance,
    tess: Tessellation,
) -> LayerMesh {
    let (shape, geometry) = match height {
        None => (
            LayerShape::Sphere { radius, bounds },
            sphere(radius, bounds, tess),
        ),
        Some(height) => (
            LayerShape::Disc { radius, height },
            cylinder(radius, height, tess.radial_segments),
        ),
    };
    LayerMesh {
        shape,
        geometry,
        appearance,
    }
}
