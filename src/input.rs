use std::collections::HashSet;

use glam::Vec2;
use sdl2::{event::Event, keyboard::Keycode, mouse::MouseButton};

/// The current state of the keyboard.
#[derive(Default)]
pub struct KeyboardState {
    pub down: HashSet<Keycode>,
    pub pressed: HashSet<Keycode>,
    pub released: HashSet<Keycode>,
}

/// The current state of the mouse.
#[derive(Default)]
pub struct MouseState {
    pub position: Vec2,
    pub delta: Vec2,
    pub down: HashSet<MouseButton>,
    pub pressed: HashSet<MouseButton>,
    pub released: HashSet<MouseButton>,
}

/// Clears the per-frame parts of the input state.
pub fn begin_frame(keyboard: &mut KeyboardState, mouse: &mut MouseState) {
    keyboard.pressed.clear();
    keyboard.released.clear();
    mouse.delta = Vec2::ZERO;
    mouse.pressed.clear();
    mouse.released.clear();
}

/// Folds one SDL event into the input state.
pub fn record_event(keyboard: &mut KeyboardState, mouse: &mut MouseState, event: &Event) {
    match *event {
        Event::MouseMotion {
            x, y, xrel, yrel, ..
        } => {
            mouse.position = Vec2::new(x as f32, y as f32);
            mouse.delta += Vec2::new(xrel as f32, yrel as f32);
        }
        Event::MouseButtonDown { mouse_btn, .. } => {
            mouse.down.insert(mouse_btn);
            mouse.pressed.insert(mouse_btn);
        }
        Event::MouseButtonUp { mouse_btn, .. } => {
            mouse.down.remove(&mouse_btn);
            mouse.released.insert(mouse_btn);
        }
        Event::KeyDown {
            keycode: Some(keycode),
            repeat: false,
            ..
        } => {
            keyboard.down.insert(keycode);
            keyboard.pressed.insert(keycode);
        }
        Event::KeyUp {
            keycode: Some(keycode),
            repeat: false,
            ..
        } => {
            keyboard.down.remove(&keycode);
            keyboard.released.insert(keycode);
        }
        _ => {}
    }
}

/// Context handed to the active stage during the update phase.
pub struct UpdateContext<'a> {
    pub keyboard: &'a KeyboardState,
    pub mouse: &'a MouseState,
    pub delta_time: f32,
}

impl<'a> UpdateContext<'a> {
    /// Creates a new `UpdateContext` from the given keyboard and mouse states and delta time.
    pub fn new(keyboard: &'a KeyboardState, mouse: &'a MouseState, delta_time: f32) -> Self {
        Self {
            keyboard,
            mouse,
            delta_time,
        }
    }
}

/// What the active stage wants done with the OS cursor this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorRequest {
    pub visible: bool,
    /// Window coordinates to move the cursor to.
    pub warp_to: Option<(i32, i32)>,
}

impl Default for CursorRequest {
    fn default() -> Self {
        Self {
            visible: true,
            warp_to: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_press_and_release() {
        let mut keyboard = KeyboardState::default();
        let mut mouse = MouseState::default();
        let down = Event::KeyDown {
            timestamp: 0,
            window_id: 0,
            keycode: Some(Keycode::W),
            scancode: None,
            keymod: sdl2::keyboard::Mod::NOMOD,
            repeat: false,
        };
        record_event(&mut keyboard, &mut mouse, &down);
        assert!(keyboard.down.contains(&Keycode::W));
        assert!(keyboard.pressed.contains(&Keycode::W));

        begin_frame(&mut keyboard, &mut mouse);
        assert!(keyboard.down.contains(&Keycode::W));
        assert!(keyboard.pressed.is_empty());

        let up = Event::KeyUp {
            timestamp: 0,
            window_id: 0,
            keycode: Some(Keycode::W),
            scancode: None,
            keymod: sdl2::keyboard::Mod::NOMOD,
            repeat: false,
        };
        record_event(&mut keyboard, &mut mouse, &up);
        assert!(!keyboard.down.contains(&Keycode::W));
        assert!(keyboard.released.contains(&Keycode::W));
    }

    #[test]
    fn test_repeated_key_down_is_not_a_new_press() {
        let mut keyboard = KeyboardState::default();
        let mut mouse = MouseState::default();
        let repeat = Event::KeyDown {
            timestamp: 0,
            window_id: 0,
            keycode: Some(Keycode::A),
            scancode: None,
            keymod: sdl2::keyboard::Mod::NOMOD,
            repeat: true,
        };
        record_event(&mut keyboard, &mut mouse, &repeat);
        assert!(keyboard.pressed.is_empty());
    }

    #[test]
    fn test_mouse_motion_accumulates_delta() {
        let mut keyboard = KeyboardState::default();
        let mut mouse = MouseState::default();
        for (x, y) in [(10, 20), (13, 18)] {
            let motion = Event::MouseMotion {
                timestamp: 0,
                window_id: 0,
                which: 0,
                mousestate: sdl2::mouse::MouseState::from_sdl_state(0),
                x,
                y,
                xrel: 3,
                yrel: -2,
            };
            record_event(&mut keyboard, &mut mouse, &motion);
        }
        assert_eq!(mouse.position, Vec2::new(13.0, 18.0));
        assert_eq!(mouse.delta, Vec2::new(6.0, -4.0));

        begin_frame(&mut keyboard, &mut mouse);
        assert_eq!(mouse.delta, Vec2::ZERO);
        assert_eq!(mouse.position, Vec2::new(13.0, 18.0));
    }

    #[test]
    fn test_mouse_buttons() {
        let mut keyboard = KeyboardState::default();
        let mut mouse = MouseState::default();
        let press = Event::MouseButtonDown {
            timestamp: 0,
            window_id: 0,
            which: 0,
            mouse_btn: MouseButton::Right,
            clicks: 1,
            x: 0,
            y: 0,
        };
        record_event(&mut keyboard, &mut mouse, &press);
        assert!(mouse.down.contains(&MouseButton::Right));

        let release = Event::MouseButtonUp {
            timestamp: 0,
            window_id: 0,
            which: 0,
            mouse_btn: MouseButton::Right,
            clicks: 1,
            x: 0,
            y: 0,
        };
        record_event(&mut keyboard, &mut mouse, &release);
        assert!(!mouse.down.contains(&MouseButton::Right));
        assert!(mouse.released.contains(&MouseButton::Right));
    }
}
