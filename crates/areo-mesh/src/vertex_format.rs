//! GPU vertex formats and their canonical `wgpu::VertexBufferLayout`s.
//!
//! | Format         | Location | Offset | Format    | Field    |
//! |----------------|----------|--------|-----------|----------|
//! | [`MeshVertex`] | 0        | 0      | Float32x3 | position |
//! |                | 1        | 12     | Float32x3 | normal   |
//! |                | 2        | 24     | Float32x2 | uv       |
//! | [`LineVertex`] | 0        | 0      | Float32x3 | position |
//! |                | 1        | 12     | Float32x3 | color    |

use std::mem;

use bytemuck::{Pod, Zeroable};
use static_assertions::const_assert_eq;
use wgpu::{VertexAttribute, VertexBufferLayout, VertexFormat, VertexStepMode};

/// Interleaved vertex for lit, textured layer surfaces.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

/// Vertex for unlit polylines such as wave paths.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct LineVertex {
    pub position: [f32; 3],
    /// Linear RGB.
    pub color: [f32; 3],
}

const_assert_eq!(mem::size_of::<MeshVertex>(), 32);
const_assert_eq!(mem::size_of::<LineVertex>(), 24);

pub const MESH_VERTEX_ATTRIBUTES: [VertexAttribute; 3] = [
    VertexAttribute {
        format: VertexFormat::Float32x3,
        offset: 0,
        shader_location: 0,
    },
    VertexAttribute {
        format: VertexFormat::Float32x3,
        offset: 12,
        shader_location: 1,
    },
    VertexAttribute {
        format: VertexFormat::Float32x2,
        offset: 24,
        shader_location: 2,
    },
];

pub const LINE_VERTEX_ATTRIBUTES: [VertexAttribute; 2] = [
    VertexAttribute {
        format: VertexFormat::Float32x3,
        offset: 0,
        shader_location: 0,
    },
    VertexAttribute {
        format: VertexFormat::Float32x3,
        offset: 12,
        shader_location: 1,
    },
];

/// Layout for every pipeline drawing [`MeshVertex`] buffers.
pub const MESH_VERTEX_LAYOUT: VertexBufferLayout<'static> = VertexBufferLayout {
    array_stride: mem::size_of::<MeshVertex>() as u64,
    step_mode: VertexStepMode::Vertex,
    attributes: &MESH_VERTEX_ATTRIBUTES,
};

/// Layout for every pipeline drawing [`LineVertex`] buffers.
pub const LINE_VERTEX_LAYOUT: VertexBufferLayout<'static> = VertexBufferLayout {
    array_stride: mem::size_of::<LineVertex>() as u64,
    step_mode: VertexStepMode::Vertex,
    attributes: &LINE_VERTEX_ATTRIBUTES,
};

/// Returns [`MESH_VERTEX_LAYOUT`].
pub fn mesh_vertex_buffer_layout() -> VertexBufferLayout<'static> {
    MESH_VERTEX_LAYOUT
}

/// Returns [`LINE_VERTEX_LAYOUT`].
pub fn line_vertex_buffer_layout() -> VertexBufferLayout<'static> {
    LINE_VERTEX_LAYOUT
}
