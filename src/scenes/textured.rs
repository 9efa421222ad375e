//! Texturing: a square sampling a PNG through texture unit 0.

use glow::HasContext;

use super::{Scene, StageContext, triangle::SCALE};
use crate::{
    abs::{Mesh, ShaderProgram, Texture},
    render::geometry::{SQUARE_INDICES, SQUARE_VERTICES},
};

pub const TEXTURE_PATH: &str = "textures/brick.png";

pub struct TexturedSquare {
    program: ShaderProgram,
    mesh: Mesh,
    texture: Texture,
    clear_color: [f32; 4],
}

impl TexturedSquare {
    pub fn new(ctx: &StageContext) -> anyhow::Result<Self> {
        let program = ctx.assets.load_program(&ctx.gl, "texture")?;
        let mesh = Mesh::new(&ctx.gl, &SQUARE_VERTICES, &SQUARE_INDICES, glow::TRIANGLES)
            .map_err(anyhow::Error::msg)?;
        let image = ctx.assets.load_image(TEXTURE_PATH)?;
        let texture = Texture::new(&ctx.gl, &image, 0).map_err(anyhow::Error::msg)?;
        texture.tex_unit(&program, "tex0", texture.unit());

        Ok(Self {
            program,
            mesh,
            texture,
            clear_color: ctx.config.clear_color,
        })
    }
}

impl Scene for TexturedSquare {
    fn render(&mut self, gl: &glow::Context) {
        let [r, g, b, a] = self.clear_color;
        unsafe {
            gl.disable(glow::DEPTH_TEST);
            gl.clear_color(r, g, b, a);
            gl.clear(glow::COLOR_BUFFER_BIT);
        }

        self.program.use_program();
        self.program.set_uniform("scale", SCALE);
        self.texture.bind();
        self.mesh.draw();
        self.texture.unbind();
    }
}
