//! Indexed drawing: three triangles sharing vertices, scaled through a uniform.

use glow::HasContext;

use super::{Scene, StageContext};
use crate::{
    abs::{Mesh, ShaderProgram},
    render::geometry::{TRIANGLE_INDICES, TRIANGLE_VERTICES},
};

/// Value of the `scale` uniform; the shader grows every vertex by this fraction.
pub const SCALE: f32 = 0.5;

pub struct Triangle {
    program: ShaderProgram,
    mesh: Mesh,
    clear_color: [f32; 4],
}

impl Triangle {
    pub fn new(ctx: &StageContext) -> anyhow::Result<Self> {
        let program = ctx.assets.load_program(&ctx.gl, "triangle")?;
        let mesh = Mesh::new(&ctx.gl, &TRIANGLE_VERTICES, &TRIANGLE_INDICES, glow::TRIANGLES)
            .map_err(anyhow::Error::msg)?;
        Ok(Self {
            program,
            mesh,
            clear_color: ctx.config.clear_color,
        })
    }
}

impl Scene for Triangle {
    fn render(&mut self, gl: &glow::Context) {
        let [r, g, b, a] = self.clear_color;
        unsafe {
            gl.disable(glow::DEPTH_TEST);
            gl.clear_color(r, g, b, a);
            gl.clear(glow::COLOR_BUFFER_BIT);
        }

        self.program.use_program();
        self.program.set_uniform("scale", SCALE);
        self.mesh.draw();
    }
}
