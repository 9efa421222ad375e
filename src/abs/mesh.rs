//! Mesh management module.
//!
//! This module defines the [`Mesh`] struct which ties a [`VertexArray`], a
//! [`VertexBuffer`] and an [`ElementBuffer`] together.
//! Vertices should implement the [`Vertex`] trait.

use std::sync::Arc;

use glow::HasContext;

use crate::abs::{ElementBuffer, VertexArray, VertexBuffer};

/// One float attribute inside a vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexAttribute {
    /// The `layout (location = N)` slot in the vertex shader.
    pub location: u32,
    /// Number of `f32` components.
    pub components: i32,
    /// Byte offset from the start of the vertex.
    pub offset: i32,
}

impl VertexAttribute {
    pub const fn new(location: u32, components: i32, offset: i32) -> Self {
        Self {
            location,
            components,
            offset,
        }
    }
}

/// Trait that defines the memory layout of a vertex.
pub trait Vertex: bytemuck::Pod {
    /// The float attributes of the vertex, in location order.
    fn attributes() -> &'static [VertexAttribute];

    /// Distance in bytes between two consecutive vertices.
    fn stride() -> i32 {
        std::mem::size_of::<Self>() as i32
    }
}

/// Represents a mesh stored on the GPU side.
pub struct Mesh {
    gl: Arc<glow::Context>,
    draw_mode: u32,
    vao: VertexArray,
    _vbo: VertexBuffer,
    ebo: ElementBuffer,
}

impl Mesh {
    /// Uploads the given vertex and index data and records the attribute layout.
    pub fn new<V: Vertex>(
        gl: &Arc<glow::Context>,
        vertices: &[V],
        indices: &[u32],
        draw_mode: u32,
    ) -> Result<Self, String> {
        let vao = VertexArray::new(gl)?;
        vao.bind();

        let vbo = VertexBuffer::new(gl, vertices)?;
        let ebo = ElementBuffer::new(gl, indices)?;

        for attrib in V::attributes() {
            vao.link_attrib(
                &vbo,
                attrib.location,
                attrib.components,
                glow::FLOAT,
                V::stride(),
                attrib.offset,
            );
        }

        // The VAO has to be unbound first, otherwise it forgets the EBO.
        vao.unbind();
        vbo.unbind();
        ebo.unbind();

        Ok(Self {
            gl: Arc::clone(gl),
            draw_mode,
            vao,
            _vbo: vbo,
            ebo,
        })
    }

    /// Draws the mesh with the currently active shader program.
    pub fn draw(&self) {
        self.vao.bind();
        unsafe {
            self.gl
                .draw_elements(self.draw_mode, self.ebo.len() as i32, glow::UNSIGNED_INT, 0);
        }
        self.vao.unbind();
    }
}
