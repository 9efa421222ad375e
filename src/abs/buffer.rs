//! Vertex array, vertex buffer and element buffer objects.
//!
//! Each wrapper owns exactly one GL handle and deletes it when dropped.

use std::sync::Arc;

use glow::HasContext;

/// A vertex buffer object holding vertex data on the GPU side.
pub struct VertexBuffer {
    gl: Arc<glow::Context>,
    id: glow::Buffer,
}

impl VertexBuffer {
    /// Creates a buffer and uploads `vertices` into it.
    ///
    /// The buffer is left bound to `GL_ARRAY_BUFFER`.
    pub fn new<V: bytemuck::Pod>(gl: &Arc<glow::Context>, vertices: &[V]) -> Result<Self, String> {
        unsafe {
            let id = gl.create_buffer()?;
            gl.bind_buffer(glow::ARRAY_BUFFER, Some(id));
            gl.buffer_data_u8_slice(
                glow::ARRAY_BUFFER,
                bytemuck::cast_slice(vertices),
                glow::STATIC_DRAW,
            );
            Ok(Self {
                gl: Arc::clone(gl),
                id,
            })
        }
    }

    pub fn bind(&self) {
        unsafe {
            self.gl.bind_buffer(glow::ARRAY_BUFFER, Some(self.id));
        }
    }

    pub fn unbind(&self) {
        unsafe {
            self.gl.bind_buffer(glow::ARRAY_BUFFER, None);
        }
    }
}

impl Drop for VertexBuffer {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_buffer(self.id);
        }
    }
}

/// An element buffer object holding `u32` indices.
pub struct ElementBuffer {
    gl: Arc<glow::Context>,
    id: glow::Buffer,
    len: usize,
}

impl ElementBuffer {
    /// Creates a buffer and uploads `indices` into it.
    ///
    /// The buffer stays bound to `GL_ELEMENT_ARRAY_BUFFER`, which records it in the
    /// currently bound vertex array.
    pub fn new(gl: &Arc<glow::Context>, indices: &[u32]) -> Result<Self, String> {
        unsafe {
            let id = gl.create_buffer()?;
            gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, Some(id));
            gl.buffer_data_u8_slice(
                glow::ELEMENT_ARRAY_BUFFER,
                bytemuck::cast_slice(indices),
                glow::STATIC_DRAW,
            );
            Ok(Self {
                gl: Arc::clone(gl),
                id,
                len: indices.len(),
            })
        }
    }

    /// Number of indices stored in the buffer.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn unbind(&self) {
        unsafe {
            self.gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, None);
        }
    }
}

impl Drop for ElementBuffer {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_buffer(self.id);
        }
    }
}

/// A vertex array object recording attribute layouts and the bound element buffer.
pub struct VertexArray {
    gl: Arc<glow::Context>,
    id: glow::VertexArray,
}

impl VertexArray {
    pub fn new(gl: &Arc<glow::Context>) -> Result<Self, String> {
        let id = unsafe { gl.create_vertex_array()? };
        Ok(Self {
            gl: Arc::clone(gl),
            id,
        })
    }

    /// Describes attribute `layout` as `components` values of `data_type` inside `vbo`.
    ///
    /// The vertex array has to be bound. `stride` and `offset` are in bytes.
    pub fn link_attrib(
        &self,
        vbo: &VertexBuffer,
        layout: u32,
        components: i32,
        data_type: u32,
        stride: i32,
        offset: i32,
    ) {
        vbo.bind();
        unsafe {
            self.gl
                .vertex_attrib_pointer_f32(layout, components, data_type, false, stride, offset);
            self.gl.enable_vertex_attrib_array(layout);
        }
        vbo.unbind();
    }

    pub fn bind(&self) {
        unsafe {
            self.gl.bind_vertex_array(Some(self.id));
        }
    }

    pub fn unbind(&self) {
        unsafe {
            self.gl.bind_vertex_array(None);
        }
    }
}

impl Drop for VertexArray {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_vertex_array(self.id);
        }
    }
}
