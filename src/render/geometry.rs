//! Vertex formats and shape data.

use crate::abs::{Vertex, VertexAttribute};

/// A vertex with a position and an RGB color.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ColorVertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

impl Vertex for ColorVertex {
    fn attributes() -> &'static [VertexAttribute] {
        const ATTRIBUTES: [VertexAttribute; 2] =
            [VertexAttribute::new(0, 3, 0), VertexAttribute::new(1, 3, 12)];
        &ATTRIBUTES
    }
}

/// A vertex with a position, an RGB color and texture coordinates.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct TexturedVertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
    pub uv: [f32; 2],
}

impl Vertex for TexturedVertex {
    fn attributes() -> &'static [VertexAttribute] {
        const ATTRIBUTES: [VertexAttribute; 3] = [
            VertexAttribute::new(0, 3, 0),
            VertexAttribute::new(1, 3, 12),
            VertexAttribute::new(2, 2, 24),
        ];
        &ATTRIBUTES
    }
}

const fn cv(position: [f32; 3], color: [f32; 3]) -> ColorVertex {
    ColorVertex { position, color }
}

const fn tv(position: [f32; 3], color: [f32; 3], uv: [f32; 2]) -> TexturedVertex {
    TexturedVertex {
        position,
        color,
        uv,
    }
}

/// `sqrt(3)`, the height of an equilateral triangle with side 2.
const SQRT_3: f32 = 1.732_050_8;

/// An equilateral triangle split into three smaller ones around a hole in the middle.
pub const TRIANGLE_VERTICES: [ColorVertex; 6] = [
    // lower left corner
    cv([-0.5, -0.5 * SQRT_3 / 3.0, 0.0], [0.8, 0.3, 0.02]),
    // lower right corner
    cv([0.5, -0.5 * SQRT_3 / 3.0, 0.0], [0.8, 0.3, 0.02]),
    // upper corner
    cv([0.0, 0.5 * SQRT_3 * 2.0 / 3.0, 0.0], [1.0, 0.6, 0.32]),
    // inner left
    cv([-0.5 / 2.0, 0.5 * SQRT_3 / 6.0, 0.0], [0.9, 0.45, 0.17]),
    // inner right
    cv([0.5 / 2.0, 0.5 * SQRT_3 / 6.0, 0.0], [0.9, 0.45, 0.17]),
    // inner down
    cv([0.0, -0.5 * SQRT_3 / 3.0, 0.0], [0.8, 0.3, 0.02]),
];

pub const TRIANGLE_INDICES: [u32; 9] = [
    0, 3, 5, // lower left
    3, 2, 4, // upper
    5, 4, 1, // lower right
];

pub const SQUARE_VERTICES: [TexturedVertex; 4] = [
    tv([-0.5, -0.5, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0]),
    tv([-0.5, 0.5, 0.0], [0.0, 1.0, 0.0], [0.0, 1.0]),
    tv([0.5, 0.5, 0.0], [0.0, 0.0, 1.0], [1.0, 1.0]),
    tv([0.5, -0.5, 0.0], [1.0, 1.0, 1.0], [1.0, 0.0]),
];

pub const SQUARE_INDICES: [u32; 6] = [
    0, 2, 1, // upper
    0, 3, 2, // lower
];

/// A square-based pyramid standing on the XZ plane.
///
/// The texture repeats across the base, which is why the base corners use 0 and 5
/// as texture coordinates.
pub const PYRAMID_VERTICES: [TexturedVertex; 5] = [
    tv([-0.5, 0.0, 0.5], [0.83, 0.70, 0.44], [0.0, 0.0]),
    tv([-0.5, 0.0, -0.5], [0.83, 0.70, 0.44], [5.0, 0.0]),
    tv([0.5, 0.0, -0.5], [0.83, 0.70, 0.44], [0.0, 0.0]),
    tv([0.5, 0.0, 0.5], [0.83, 0.70, 0.44], [5.0, 0.0]),
    tv([0.0, 0.8, 0.0], [0.92, 0.86, 0.76], [2.5, 5.0]),
];

pub const PYRAMID_INDICES: [u32; 18] = [
    0, 1, 2, // base
    0, 2, 3, // base
    0, 1, 4, // sides
    1, 2, 4, //
    2, 3, 4, //
    3, 0, 4, //
];
