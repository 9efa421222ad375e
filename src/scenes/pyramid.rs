//! Going 3D: a textured pyramid spinning in front of a fixed perspective projection.

use glam::{Mat4, Vec3};
use glow::HasContext;

use super::{Scene, SceneSwitch, StageContext, textured::TEXTURE_PATH};
use crate::{
    abs::{Mesh, ShaderProgram, Texture},
    input::UpdateContext,
    render::geometry::{PYRAMID_INDICES, PYRAMID_VERTICES},
};

/// Time between two rotation steps, in seconds.
const SPIN_TICK: f32 = 1.0 / 60.0;
/// Degrees turned per rotation step.
const SPIN_STEP: f32 = 0.5;

/// Turns at a fixed rate regardless of the frame rate.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Spin {
    degrees: f32,
    pending: f32,
}

impl Spin {
    pub fn advance(&mut self, delta_time: f32) {
        self.pending += delta_time;
        while self.pending >= SPIN_TICK {
            self.pending -= SPIN_TICK;
            self.degrees = (self.degrees + SPIN_STEP) % 360.0;
        }
    }

    pub fn model(&self) -> Mat4 {
        Mat4::from_axis_angle(Vec3::Y, self.degrees.to_radians())
    }
}

pub struct SpinningPyramid {
    program: ShaderProgram,
    mesh: Mesh,
    texture: Texture,
    spin: Spin,
    aspect: f32,
    fov: f32,
    near: f32,
    far: f32,
    clear_color: [f32; 4],
}

impl SpinningPyramid {
    pub fn new(ctx: &StageContext) -> anyhow::Result<Self> {
        let program = ctx.assets.load_program(&ctx.gl, "pyramid")?;
        let mesh = Mesh::new(&ctx.gl, &PYRAMID_VERTICES, &PYRAMID_INDICES, glow::TRIANGLES)
            .map_err(anyhow::Error::msg)?;
        let image = ctx.assets.load_image(TEXTURE_PATH)?;
        let texture = Texture::new(&ctx.gl, &image, 0).map_err(anyhow::Error::msg)?;
        texture.tex_unit(&program, "tex0", texture.unit());

        let (width, height) = ctx.window_size;
        Ok(Self {
            program,
            mesh,
            texture,
            spin: Spin::default(),
            aspect: width as f32 / height.max(1) as f32,
            fov: ctx.config.camera.fov,
            near: ctx.config.camera.near,
            far: ctx.config.camera.far,
            clear_color: ctx.config.clear_color,
        })
    }
}

impl Scene for SpinningPyramid {
    fn update(&mut self, ctx: &UpdateContext) -> SceneSwitch {
        self.spin.advance(ctx.delta_time);
        SceneSwitch::None
    }

    fn render(&mut self, gl: &glow::Context) {
        let [r, g, b, a] = self.clear_color;
        unsafe {
            gl.enable(glow::DEPTH_TEST);
            gl.clear_color(r, g, b, a);
            gl.clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);
        }

        let view = Mat4::from_translation(Vec3::new(0.0, -0.5, -2.0));
        let proj = Mat4::perspective_rh_gl(self.fov.to_radians(), self.aspect, self.near, self.far);

        self.program.use_program();
        self.program.set_uniform("model", self.spin.model());
        self.program.set_uniform("view", view);
        self.program.set_uniform("proj", proj);
        self.texture.bind();
        self.mesh.draw();
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.aspect = width as f32 / height.max(1) as f32;
    }
}
