//! Module providing the `Scene` trait and the lesson stages built on it.
//!
//! Exactly one stage is active at a time. The number keys switch between stages and
//! escape quits.

use std::sync::Arc;

use anyhow::Context;
use sdl2::keyboard::Keycode;
use serde::Deserialize;

use crate::{
    assets::Assets,
    config::Config,
    input::{CursorRequest, KeyboardState, UpdateContext},
};

pub mod flycam;
pub mod pyramid;
pub mod textured;
pub mod triangle;
pub mod window;

/// What should happen after a frame.
pub enum SceneSwitch {
    None,
    /// Replace the active stage with another one.
    Replace(Stage),
    Quit,
}

/// The Scene trait defines the common interface for all stages.
pub trait Scene {
    /// Updates the scene state.
    fn update(&mut self, _ctx: &UpdateContext) -> SceneSwitch {
        SceneSwitch::None
    }

    /// Renders the scene.
    fn render(&mut self, gl: &glow::Context);

    /// Called with the new window size after the window was resized.
    fn resize(&mut self, _width: u32, _height: u32) {}

    /// What to do with the cursor after the latest update.
    fn cursor(&self) -> CursorRequest {
        CursorRequest::default()
    }
}

/// The lessons, in the order they are taught.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    /// An empty window cleared to a solid color.
    Window,
    /// Indexed drawing with per-vertex colors and a uniform.
    Triangle,
    /// A textured square.
    Texture,
    /// A rotating textured pyramid with model, view and projection matrices.
    Pyramid,
    /// The pyramid again, explored with a free-fly camera.
    Camera,
}

impl Stage {
    pub const ALL: [Stage; 5] = [
        Stage::Window,
        Stage::Triangle,
        Stage::Texture,
        Stage::Pyramid,
        Stage::Camera,
    ];

    /// One-based position of the stage in the lesson order.
    pub fn number(self) -> u8 {
        Self::ALL
            .iter()
            .position(|&stage| stage == self)
            .map_or(0, |i| i as u8 + 1)
    }

    pub fn from_number(number: u8) -> Option<Self> {
        Self::ALL.get(usize::from(number).checked_sub(1)?).copied()
    }

    /// The stage selected by a number key, if any.
    pub fn from_keycode(key: Keycode) -> Option<Self> {
        let number = match key {
            Keycode::Num1 | Keycode::Kp1 => 1,
            Keycode::Num2 | Keycode::Kp2 => 2,
            Keycode::Num3 | Keycode::Kp3 => 3,
            Keycode::Num4 | Keycode::Kp4 => 4,
            Keycode::Num5 | Keycode::Kp5 => 5,
            _ => return None,
        };
        Self::from_number(number)
    }

    pub fn name(self) -> &'static str {
        match self {
            Stage::Window => "window",
            Stage::Triangle => "triangle",
            Stage::Texture => "texture",
            Stage::Pyramid => "pyramid",
            Stage::Camera => "camera",
        }
    }

    /// Loads the assets of the stage and uploads its GPU resources.
    pub fn build(self, ctx: &StageContext) -> anyhow::Result<Box<dyn Scene>> {
        let scene: Box<dyn Scene> = match self {
            Stage::Window => Box::new(window::ClearScreen::new(ctx)),
            Stage::Triangle => Box::new(triangle::Triangle::new(ctx)?),
            Stage::Texture => Box::new(textured::TexturedSquare::new(ctx)?),
            Stage::Pyramid => Box::new(pyramid::SpinningPyramid::new(ctx)?),
            Stage::Camera => Box::new(flycam::FlyCamera::new(ctx)?),
        };
        Ok(scene)
    }
}

/// Everything a stage needs to build itself.
pub struct StageContext {
    pub gl: Arc<glow::Context>,
    pub assets: Assets,
    pub config: Config,
    /// Window size in screen coordinates.
    pub window_size: (u32, u32),
}

/// Turns a [`Stage`] into a ready-to-draw scene.
pub trait SceneBuilder {
    fn build(&self, stage: Stage) -> anyhow::Result<Box<dyn Scene>>;

    /// Called with the new window size so later builds match the window.
    fn resize(&mut self, _width: u32, _height: u32) {}
}

impl SceneBuilder for StageContext {
    fn build(&self, stage: Stage) -> anyhow::Result<Box<dyn Scene>> {
        stage.build(self)
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.window_size = (width, height);
    }
}

/// The switch requested by this frame's key presses. Escape wins over number keys.
pub fn key_switch(keyboard: &KeyboardState) -> SceneSwitch {
    if keyboard.pressed.contains(&Keycode::Escape) {
        return SceneSwitch::Quit;
    }
    keyboard
        .pressed
        .iter()
        .find_map(|&key| Stage::from_keycode(key))
        .map_or(SceneSwitch::None, SceneSwitch::Replace)
}

/// Keeps the active stage and replaces it on request.
pub struct SceneManager<B = StageContext> {
    builder: B,
    stage: Stage,
    scene: Box<dyn Scene>,
}

impl<B: SceneBuilder> SceneManager<B> {
    /// Builds `stage` and makes it the active one.
    pub fn new(builder: B, stage: Stage) -> anyhow::Result<Self> {
        let scene = builder
            .build(stage)
            .with_context(|| format!("failed to build stage '{}'", stage.name()))?;
        log::info!("stage {} ({})", stage.number(), stage.name());
        Ok(Self {
            builder,
            stage,
            scene,
        })
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Replaces the active stage. On failure the current stage stays active.
    pub fn switch(&mut self, stage: Stage) {
        if stage == self.stage {
            return;
        }
        match self.builder.build(stage) {
            Ok(scene) => {
                log::info!("stage {} ({})", stage.number(), stage.name());
                self.scene = scene;
                self.stage = stage;
            }
            Err(e) => log::error!("failed to build stage '{}': {e:#}", stage.name()),
        }
    }

    /// Updates the active stage and handles stage switches. Returns `false` to quit.
    ///
    /// Key presses take precedence over whatever the stage itself asks for.
    pub fn update(&mut self, ctx: &UpdateContext) -> bool {
        let switch = match key_switch(ctx.keyboard) {
            SceneSwitch::None => self.scene.update(ctx),
            switch => switch,
        };
        match switch {
            SceneSwitch::None => true,
            SceneSwitch::Replace(stage) => {
                self.switch(stage);
                true
            }
            SceneSwitch::Quit => false,
        }
    }

    pub fn render(&mut self, gl: &glow::Context) {
        self.scene.render(gl);
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.builder.resize(width, height);
        self.scene.resize(width, height);
    }

    pub fn cursor(&self) -> CursorRequest {
        self.scene.cursor()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_numbers_round_trip() {
        for (i, stage) in Stage::ALL.iter().enumerate() {
            assert_eq!(stage.number() as usize, i + 1);
            assert_eq!(Stage::from_number(stage.number()), Some(*stage));
        }
    }

    #[test]
    fn test_out_of_range_numbers() {
        assert_eq!(Stage::from_number(0), None);
        assert_eq!(Stage::from_number(6), None);
    }

    #[test]
    fn test_number_keys_select_stages() {
        assert_eq!(Stage::from_keycode(Keycode::Num1), Some(Stage::Window));
        assert_eq!(Stage::from_keycode(Keycode::Kp3), Some(Stage::Texture));
        assert_eq!(Stage::from_keycode(Keycode::Num5), Some(Stage::Camera));
        assert_eq!(Stage::from_keycode(Keycode::Num6), None);
        assert_eq!(Stage::from_keycode(Keycode::W), None);
    }

    #[test]
    fn test_names_match_config_spelling() {
        for stage in Stage::ALL {
            let parsed: Stage = serde_json::from_str(&format!("\"{}\"", stage.name())).unwrap();
            assert_eq!(parsed, stage);
        }
    }

    /// Records which stages were built and fails for the ones in `broken`.
    #[derive(Default)]
    struct FakeBuilder {
        built: std::cell::RefCell<Vec<Stage>>,
        broken: Vec<Stage>,
    }

    struct Blank;

    impl Scene for Blank {
        fn render(&mut self, _gl: &glow::Context) {}
    }

    impl SceneBuilder for FakeBuilder {
        fn build(&self, stage: Stage) -> anyhow::Result<Box<dyn Scene>> {
            if self.broken.contains(&stage) {
                anyhow::bail!("no shaders for {}", stage.name());
            }
            self.built.borrow_mut().push(stage);
            Ok(Box::new(Blank))
        }
    }

    fn pressing(keys: &[Keycode]) -> KeyboardState {
        let mut keyboard = KeyboardState::default();
        keyboard.pressed.extend(keys.iter().copied());
        keyboard.down.extend(keys.iter().copied());
        keyboard
    }

    fn frame(manager: &mut SceneManager<FakeBuilder>, keys: &[Keycode]) -> bool {
        let keyboard = pressing(keys);
        let mouse = crate::input::MouseState::default();
        manager.update(&UpdateContext::new(&keyboard, &mouse, 0.016))
    }

    #[test]
    fn test_key_switch() {
        assert!(matches!(key_switch(&pressing(&[])), SceneSwitch::None));
        assert!(matches!(key_switch(&pressing(&[Keycode::W])), SceneSwitch::None));
        assert!(matches!(
            key_switch(&pressing(&[Keycode::Num2])),
            SceneSwitch::Replace(Stage::Triangle)
        ));
        assert!(matches!(
            key_switch(&pressing(&[Keycode::Escape, Keycode::Num2])),
            SceneSwitch::Quit
        ));
    }

    #[test]
    fn test_escape_wins_over_number_key() {
        let mut manager = SceneManager::new(FakeBuilder::default(), Stage::Window).unwrap();
        assert!(!frame(&mut manager, &[Keycode::Escape, Keycode::Num4]));
        assert_eq!(manager.stage(), Stage::Window);
        assert_eq!(*manager.builder.built.borrow(), vec![Stage::Window]);
    }

    #[test]
    fn test_number_key_switches_stage() {
        let mut manager = SceneManager::new(FakeBuilder::default(), Stage::Window).unwrap();
        assert!(frame(&mut manager, &[Keycode::Num3]));
        assert_eq!(manager.stage(), Stage::Texture);
        assert_eq!(
            *manager.builder.built.borrow(),
            vec![Stage::Window, Stage::Texture]
        );
    }

    #[test]
    fn test_active_stage_is_not_rebuilt() {
        let mut manager = SceneManager::new(FakeBuilder::default(), Stage::Camera).unwrap();
        assert!(frame(&mut manager, &[Keycode::Num5]));
        assert_eq!(manager.stage(), Stage::Camera);
        assert_eq!(manager.builder.built.borrow().len(), 1);
    }

    #[test]
    fn test_failed_build_keeps_current_stage() {
        let builder = FakeBuilder {
            broken: vec![Stage::Pyramid],
            ..Default::default()
        };
        let mut manager = SceneManager::new(builder, Stage::Triangle).unwrap();
        assert!(frame(&mut manager, &[Keycode::Num4]));
        assert_eq!(manager.stage(), Stage::Triangle);

        assert!(frame(&mut manager, &[Keycode::Num1]));
        assert_eq!(manager.stage(), Stage::Window);
    }

    #[test]
    fn test_failed_first_build_is_an_error() {
        let builder = FakeBuilder {
            broken: vec![Stage::Camera],
            ..Default::default()
        };
        let err = SceneManager::new(builder, Stage::Camera).err().unwrap();
        assert!(format!("{err:#}").contains("failed to build stage 'camera'"));
    }
}
