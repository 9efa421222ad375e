//! Thin owners around OpenGL objects: the window and context, shader programs,
//! vertex arrays and buffers, meshes and textures.

pub mod app;
pub mod buffer;
pub mod mesh;
pub mod shader;
pub mod texture;

pub use app::*;
pub use buffer::*;
pub use mesh::*;
pub use shader::*;
pub use texture::*;
