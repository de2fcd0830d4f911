//! Procedural geometry for planetary layers: primitive tessellation, the
//! layer builder, and GPU vertex formats for handing meshes to a renderer.

pub mod geometry;
pub mod layer;
pub mod primitives;
pub mod vertex_format;

pub use geometry::Geometry;
pub use layer::{Appearance, LayerMesh, LayerShape, Surface, TextureRef, build_layer, build_layer_with};
pub use primitives::{SphereBounds, Tessellation, circle, cuboid, cylinder, sphere};
pub use vertex_format::{
    LINE_VERTEX_LAYOUT, LineVertex, MESH_VERTEX_LAYOUT, MeshVertex, line_vertex_buffer_layout,
    mesh_vertex_buffer_layout,
};
