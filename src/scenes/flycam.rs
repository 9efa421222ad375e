//! The last lesson: flying around the pyramid with [`Camera`].

use glam::Vec3;
use glow::HasContext;

use super::{Scene, SceneSwitch, StageContext, textured::TEXTURE_PATH};
use crate::{
    abs::{Mesh, ShaderProgram, Texture},
    camera::Camera,
    config::CameraConfig,
    input::{CursorRequest, UpdateContext},
    render::geometry::{PYRAMID_INDICES, PYRAMID_VERTICES},
};

pub struct FlyCamera {
    program: ShaderProgram,
    mesh: Mesh,
    texture: Texture,
    camera: Camera,
    settings: CameraConfig,
    cursor: CursorRequest,
    clear_color: [f32; 4],
}

impl FlyCamera {
    pub fn new(ctx: &StageContext) -> anyhow::Result<Self> {
        let program = ctx.assets.load_program(&ctx.gl, "camera")?;
        let mesh = Mesh::new(&ctx.gl, &PYRAMID_VERTICES, &PYRAMID_INDICES, glow::TRIANGLES)
            .map_err(anyhow::Error::msg)?;
        let image = ctx.assets.load_image(TEXTURE_PATH)?;
        let texture = Texture::new(&ctx.gl, &image, 0).map_err(anyhow::Error::msg)?;
        texture.tex_unit(&program, "tex0", texture.unit());

        let settings = ctx.config.camera.clone();
        let (width, height) = ctx.window_size;
        let mut camera = Camera::new(width, height, Vec3::from(settings.position));
        camera.base_speed = settings.speed;
        camera.speed = settings.speed;
        camera.fast_speed = settings.fast_speed;
        camera.sensitivity = settings.sensitivity;

        Ok(Self {
            program,
            mesh,
            texture,
            camera,
            settings,
            cursor: CursorRequest::default(),
            clear_color: ctx.config.clear_color,
        })
    }
}

impl Scene for FlyCamera {
    fn update(&mut self, ctx: &UpdateContext) -> SceneSwitch {
        self.cursor = self.camera.inputs(ctx.keyboard, ctx.mouse);
        SceneSwitch::None
    }

    fn render(&mut self, gl: &glow::Context) {
        let [r, g, b, a] = self.clear_color;
        unsafe {
            gl.enable(glow::DEPTH_TEST);
            gl.clear_color(r, g, b, a);
            gl.clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);
        }

        self.program.use_program();
        self.camera.export(
            self.settings.fov,
            self.settings.near,
            self.settings.far,
            &self.program,
            "camMatrix",
        );
        self.texture.bind();
        self.mesh.draw();
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.camera.resize(width, height);
    }

    fn cursor(&self) -> CursorRequest {
        self.cursor
    }
}
