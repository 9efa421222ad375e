//! Structs and functions for handling textures.
//!
//! The module provides the [`Texture`] struct which is a CPU representation of a GPU texture.

use std::sync::Arc;

use glow::HasContext;
use image::{DynamicImage, GenericImageView};

use crate::abs::ShaderProgram;

/// Represents a 2D texture stored on the GPU side, tied to one texture unit.
pub struct Texture {
    gl: Arc<glow::Context>,
    id: glow::Texture,
    unit: u32,
}

impl Texture {
    /// Creates a new texture on texture unit `unit` from the given [`image::DynamicImage`].
    ///
    /// Pixels are uploaded as RGBA8 row by row from the first row of `image`, which OpenGL
    /// treats as the bottom of the texture.
    pub fn new(gl: &Arc<glow::Context>, image: &DynamicImage, unit: u32) -> Result<Self, String> {
        let (width, height) = image.dimensions();
        let data = image.to_rgba8().into_raw();
        unsafe {
            let texture = gl.create_texture()?;
            gl.active_texture(glow::TEXTURE0 + unit);
            gl.bind_texture(glow::TEXTURE_2D, Some(texture));

            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_MIN_FILTER,
                glow::NEAREST as i32,
            );
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_MAG_FILTER,
                glow::NEAREST as i32,
            );
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_S, glow::REPEAT as i32);
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_T, glow::REPEAT as i32);

            gl.pixel_store_i32(glow::UNPACK_ALIGNMENT, 1);
            gl.tex_image_2d(
                glow::TEXTURE_2D,
                0,
                glow::RGBA as i32,
                width as i32,
                height as i32,
                0,
                glow::RGBA,
                glow::UNSIGNED_BYTE,
                glow::PixelUnpackData::Slice(Some(data.as_slice())),
            );
            gl.generate_mipmap(glow::TEXTURE_2D);
            gl.bind_texture(glow::TEXTURE_2D, None);

            Ok(Self {
                gl: Arc::clone(gl),
                id: texture,
                unit,
            })
        }
    }

    /// Points the sampler uniform `uniform` of `program` at texture unit `unit`.
    ///
    /// This activates `program`.
    pub fn tex_unit(&self, program: &ShaderProgram, uniform: &str, unit: u32) {
        program.use_program();
        program.set_uniform(uniform, unit as i32);
    }

    /// The texture unit this texture binds to.
    pub fn unit(&self) -> u32 {
        self.unit
    }

    /// Binds the texture to its texture unit.
    pub fn bind(&self) {
        unsafe {
            self.gl.active_texture(glow::TEXTURE0 + self.unit);
            self.gl.bind_texture(glow::TEXTURE_2D, Some(self.id));
        }
    }

    pub fn unbind(&self) {
        unsafe {
            self.gl.active_texture(glow::TEXTURE0 + self.unit);
            self.gl.bind_texture(glow::TEXTURE_2D, None);
        }
    }
}

impl Drop for Texture {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_texture(self.id);
        }
    }
}
