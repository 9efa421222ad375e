//! The first lesson: nothing but a window cleared to a solid color.

use glow::HasContext;

use super::{Scene, StageContext};

pub struct ClearScreen {
    color: [f32; 4],
}

impl ClearScreen {
    pub fn new(ctx: &StageContext) -> Self {
        Self {
            color: ctx.config.clear_color,
        }
    }
}

impl Scene for ClearScreen {
    fn render(&mut self, gl: &glow::Context) {
        let [r, g, b, a] = self.color;
        unsafe {
            gl.disable(glow::DEPTH_TEST);
            gl.clear_color(r, g, b, a);
            gl.clear(glow::COLOR_BUFFER_BIT);
        }
    }
}
