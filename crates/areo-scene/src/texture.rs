//! Layer cross-section texture and texture loading.
//!
//! The cut face of a sliced planet is painted as concentric rings, one per
//! layer, core at the centre. Image-backed textures go through a
//! [`TextureLoader`]; a failed load is never fatal and yields a flat
//! placeholder in the layer's fallback colour.

use std::path::{Path, PathBuf};

use areo_mesh::TextureRef;
use image::{Rgba, RgbaImage};
use tracing::{debug, warn};

use crate::error::SceneError;

/// Side length of placeholder textures.
pub const PLACEHOLDER_SIZE: u32 = 4;

fn rgba(rgb: u32) -> Rgba<u8> {
    Rgba([(rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8, 255])
}

/// Square RGBA8 texture.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerTexture {
    image: RgbaImage,
}

impl LayerTexture {
    /// Wraps an already decoded image.
    pub fn from_image(image: RgbaImage) -> Self {
        Self { image }
    }

    /// Uniform texture in `rgb`.
    pub fn solid(size: u32, rgb: u32) -> Self {
        Self {
            image: RgbaImage::from_pixel(size, size, rgba(rgb)),
        }
    }

    /// Returns the width in pixels.
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Returns the height in pixels.
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Returns the RGBA value at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are outside the texture.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        self.image.get_pixel(x, y).0
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Raw RGBA bytes, row-major, for upload.
    pub fn as_bytes(&self) -> &[u8] {
        self.image.as_raw()
    }

    /// Encodes the texture as an 8-bit RGBA PNG.
    pub fn encode_png(&self) -> Result<Vec<u8>, SceneError> {
        let mut buf = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut buf, self.width(), self.height());
            encoder.set_color(png::ColorType::Rgba);
            encoder.set_depth(png::BitDepth::Eight);
            let mut writer = encoder.write_header()?;
            writer.write_image_data(self.as_bytes())?;
            writer.finish()?;
        }
        Ok(buf)
    }

    /// Encodes the texture as PNG and writes it to `path`.
    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<(), SceneError> {
        let path = path.as_ref();
        let bytes = self.encode_png()?;
        std::fs::write(path, bytes).map_err(|source| SceneError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Paint `colors` as concentric rings on a `size`×`size` canvas.
///
/// Ring `i` of `n` reaches out to radius `size/2 · (i+1)/n`, so `colors[0]`
/// fills the centre and the last colour the outer band. Pixels outside the
/// disc are transparent. No colours yields a fully transparent texture.
pub fn generate_layer_texture(size: u32, colors: &[u32]) -> LayerTexture {
    let half = size as f32 / 2.0;
    let rings = colors.len();
    let image = RgbaImage::from_fn(size, size, |x, y| {
        let dx = x as f32 + 0.5 - half;
        let dy = y as f32 + 0.5 - half;
        let distance = (dx * dx + dy * dy).sqrt();
        if rings == 0 || distance > half {
            return Rgba([0, 0, 0, 0]);
        }
        let ring = ((distance / half * rings as f32).ceil() as usize).saturating_sub(1);
        rgba(colors[ring.min(rings - 1)])
    });
    debug!("Generated {size}x{size} layer texture with {rings} rings");
    LayerTexture { image }
}

/// A texture as handed to the renderer.
#[derive(Debug, Clone)]
pub struct LoadedTexture {
    pub texture: LayerTexture,
    /// `true` if loading failed and this is a flat fallback.
    pub placeholder: bool,
}

/// Resolves [`TextureRef`]s to pixels.
pub trait TextureLoader {
    /// Never fails; a missing or unreadable image yields a placeholder in
    /// `fallback` colour.
    fn load(&self, texture: &TextureRef, fallback: u32) -> LoadedTexture;
}

/// Loads textures from image files under a root directory.
#[derive(Debug, Clone)]
pub struct ImageTextureLoader {
    root: PathBuf,
}

impl ImageTextureLoader {
    /// Creates a loader resolving texture ids relative to `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Returns the file path `texture` maps to.
    pub fn resolve(&self, texture: &TextureRef) -> PathBuf {
        self.root.join(texture.as_str())
    }
}

impl TextureLoader for ImageTextureLoader {
    fn load(&self, texture: &TextureRef, fallback: u32) -> LoadedTexture {
        let path = self.resolve(texture);
        match image::open(&path) {
            Ok(img) => LoadedTexture {
                texture: LayerTexture::from_image(img.to_rgba8()),
                placeholder: false,
            },
            Err(e) => {
                warn!(
                    "Failed to load texture '{}' from {}: {e}; using placeholder #{fallback:06X}",
                    texture.as_str(),
                    path.display()
                );
                LoadedTexture {
                    texture: LayerTexture::solid(PLACEHOLDER_SIZE, fallback),
                    placeholder: true,
                }
            }
        }
    }
}
