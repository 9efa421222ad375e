//! A free-fly camera driven by the keyboard and by dragging with the right mouse button.

use glam::{Mat4, Quat, Vec3};
use sdl2::{keyboard::Keycode, mouse::MouseButton};

use crate::{
    abs::ShaderProgram,
    input::{CursorRequest, KeyboardState, MouseState},
};

/// Largest allowed deviation of the view direction from the horizon, in degrees.
const PITCH_LIMIT: f32 = 85.0;

pub struct Camera {
    pub position: Vec3,
    pub orientation: Vec3,
    pub up: Vec3,

    /// Set until the first frame of a right-button drag has been handled.
    first_click: bool,

    width: u32,
    height: u32,

    pub speed: f32,
    pub base_speed: f32,
    pub fast_speed: f32,
    pub sensitivity: f32,
}

impl Camera {
    pub fn new(width: u32, height: u32, position: Vec3) -> Self {
        Self {
            position,
            orientation: Vec3::NEG_Z,
            up: Vec3::Y,
            first_click: true,
            width: width.max(1),
            height: height.max(1),
            speed: 0.1,
            base_speed: 0.1,
            fast_speed: 0.5,
            sensitivity: 70.0,
        }
    }

    /// Updates the viewport size used for the aspect ratio and cursor centring.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width.max(1);
        self.height = height.max(1);
    }

    /// Centre of the window in window coordinates.
    fn centre(&self) -> (i32, i32) {
        ((self.width / 2) as i32, (self.height / 2) as i32)
    }

    /// Combined projection and view matrix.
    pub fn matrix(&self, fov_deg: f32, near: f32, far: f32) -> Mat4 {
        let view = Mat4::look_at_rh(self.position, self.position + self.orientation, self.up);
        let proj = Mat4::perspective_rh_gl(
            fov_deg.to_radians(),
            self.width as f32 / self.height as f32,
            near,
            far,
        );
        proj * view
    }

    /// Uploads [`Camera::matrix`] into the mat4 uniform `uniform` of `program`.
    ///
    /// `program` has to be in use.
    pub fn export(&self, fov_deg: f32, near: f32, far: f32, program: &ShaderProgram, uniform: &str) {
        program.set_uniform(uniform, self.matrix(fov_deg, near, far));
    }

    /// Unit vector pointing to the right of the view direction.
    fn right(&self) -> Vec3 {
        self.orientation.cross(self.up).normalize()
    }

    /// Moves and turns the camera from this frame's input.
    pub fn inputs(&mut self, keyboard: &KeyboardState, mouse: &MouseState) -> CursorRequest {
        let held = |key: Keycode| keyboard.down.contains(&key);

        if held(Keycode::W) {
            self.position += self.speed * self.orientation;
        }
        if held(Keycode::A) {
            self.position += self.speed * -self.right();
        }
        if held(Keycode::S) {
            self.position += self.speed * -self.orientation;
        }
        if held(Keycode::D) {
            self.position += self.speed * self.right();
        }
        if held(Keycode::Space) {
            self.position += self.speed * self.up;
        }
        if held(Keycode::LShift) {
            self.position += self.speed * -self.up;
        }

        self.speed = if held(Keycode::LCtrl) {
            self.fast_speed
        } else {
            self.base_speed
        };

        if !mouse.down.contains(&MouseButton::Right) {
            self.first_click = true;
            return CursorRequest::default();
        }

        let centre = self.centre();
        if self.first_click {
            // The cursor is about to be warped to the centre, so this frame reads as no motion.
            self.first_click = false;
            return CursorRequest {
                visible: false,
                warp_to: Some(centre),
            };
        }

        let (width, height) = (self.width as f32, self.height as f32);
        let rot_x = self.sensitivity * (mouse.position.y - centre.1 as f32) / height;
        let rot_y = self.sensitivity * (mouse.position.x - centre.0 as f32) / width;
        self.turn(rot_x, rot_y);

        CursorRequest {
            visible: false,
            warp_to: Some(centre),
        }
    }

    /// Pitches down by `rot_x` and yaws right by `rot_y` degrees.
    ///
    /// The pitch is skipped when it would bring the view closer than
    /// `90 - PITCH_LIMIT` degrees to straight up or down.
    pub fn turn(&mut self, rot_x: f32, rot_y: f32) {
        let pitched = Quat::from_axis_angle(self.right(), (-rot_x).to_radians()) * self.orientation;
        if (pitched.angle_between(self.up) - 90f32.to_radians()).abs() <= PITCH_LIMIT.to_radians() {
            self.orientation = pitched;
        }
        self.orientation = Quat::from_axis_angle(self.up, (-rot_y).to_radians()) * self.orientation;
    }
}

#[cfg(test)]
mod tests {
    use glam::{Vec2, Vec4};

    use super::*;

    const EPSILON: f32 = 1e-4;

    fn keys(down: &[Keycode]) -> KeyboardState {
        let mut keyboard = KeyboardState::default();
        keyboard.down.extend(down.iter().copied());
        keyboard
    }

    fn dragging_at(x: f32, y: f32) -> MouseState {
        let mut mouse = MouseState::default();
        mouse.down.insert(MouseButton::Right);
        mouse.position = Vec2::new(x, y);
        mouse
    }

    #[test]
    fn test_point_ahead_projects_to_centre() {
        let camera = Camera::new(800, 800, Vec3::new(0.0, 0.0, 2.0));
        let clip = camera.matrix(45.0, 0.1, 100.0) * Vec4::new(0.0, 0.0, -5.0, 1.0);
        let ndc = clip / clip.w;
        assert!(ndc.x.abs() < EPSILON);
        assert!(ndc.y.abs() < EPSILON);
        assert!(ndc.z > -1.0 && ndc.z < 1.0);
    }

    #[test]
    fn test_point_behind_is_clipped() {
        let camera = Camera::new(800, 600, Vec3::ZERO);
        let clip = camera.matrix(45.0, 0.1, 100.0) * Vec4::new(0.0, 0.0, 5.0, 1.0);
        assert!(clip.w < 0.0);
    }

    #[test]
    fn test_wasd_movement() {
        let mut camera = Camera::new(800, 800, Vec3::ZERO);
        let mouse = MouseState::default();

        camera.inputs(&keys(&[Keycode::W]), &mouse);
        assert!((camera.position - Vec3::new(0.0, 0.0, -0.1)).length() < EPSILON);

        camera.inputs(&keys(&[Keycode::D]), &mouse);
        assert!((camera.position - Vec3::new(0.1, 0.0, -0.1)).length() < EPSILON);

        camera.inputs(&keys(&[Keycode::S, Keycode::A]), &mouse);
        assert!(camera.position.length() < EPSILON);

        camera.inputs(&keys(&[Keycode::Space]), &mouse);
        assert!((camera.position - Vec3::new(0.0, 0.1, 0.0)).length() < EPSILON);

        camera.inputs(&keys(&[Keycode::LShift]), &mouse);
        assert!(camera.position.length() < EPSILON);
    }

    #[test]
    fn test_control_switches_speed_for_next_frame() {
        let mut camera = Camera::new(800, 800, Vec3::ZERO);
        let mouse = MouseState::default();

        camera.inputs(&keys(&[Keycode::LCtrl]), &mouse);
        assert_eq!(camera.speed, 0.5);

        camera.inputs(&keys(&[Keycode::W]), &mouse);
        assert!((camera.position.z + 0.5).abs() < EPSILON);
        assert_eq!(camera.speed, 0.1);
    }

    #[test]
    fn test_first_click_does_not_rotate() {
        let mut camera = Camera::new(800, 600, Vec3::ZERO);
        let request = camera.inputs(&KeyboardState::default(), &dragging_at(700.0, 100.0));
        assert_eq!(camera.orientation, Vec3::NEG_Z);
        assert_eq!(
            request,
            CursorRequest {
                visible: false,
                warp_to: Some((400, 300)),
            }
        );
    }

    #[test]
    fn test_drag_right_yaws_right() {
        let mut camera = Camera::new(800, 800, Vec3::ZERO);
        let keyboard = KeyboardState::default();
        camera.inputs(&keyboard, &dragging_at(400.0, 400.0));
        let request = camera.inputs(&keyboard, &dragging_at(600.0, 400.0));

        // 70 * 200 / 800 = 17.5 degrees to the right
        let expected = Quat::from_rotation_y(-17.5f32.to_radians()) * Vec3::NEG_Z;
        assert!((camera.orientation - expected).length() < EPSILON);
        assert!(camera.orientation.x > 0.0);
        assert_eq!(request.warp_to, Some((400, 400)));
    }

    #[test]
    fn test_drag_down_pitches_down() {
        let mut camera = Camera::new(800, 800, Vec3::ZERO);
        let keyboard = KeyboardState::default();
        camera.inputs(&keyboard, &dragging_at(400.0, 400.0));
        camera.inputs(&keyboard, &dragging_at(400.0, 500.0));
        assert!(camera.orientation.y < 0.0);
        assert!(camera.orientation.x.abs() < EPSILON);
    }

    #[test]
    fn test_pitch_is_limited() {
        let mut camera = Camera::new(800, 800, Vec3::ZERO);
        for _ in 0..20 {
            camera.turn(-10.0, 0.0);
        }
        let from_up = camera.orientation.angle_between(Vec3::Y).to_degrees();
        assert!(from_up >= 90.0 - PITCH_LIMIT - EPSILON);
        assert!(camera.orientation.y > 0.9);
    }

    #[test]
    fn test_release_shows_cursor_and_resets_first_click() {
        let mut camera = Camera::new(800, 800, Vec3::ZERO);
        let keyboard = KeyboardState::default();
        camera.inputs(&keyboard, &dragging_at(400.0, 400.0));

        let request = camera.inputs(&keyboard, &MouseState::default());
        assert_eq!(request, CursorRequest::default());

        camera.inputs(&keyboard, &dragging_at(0.0, 0.0));
        assert_eq!(camera.orientation, Vec3::NEG_Z);
    }

    #[test]
    fn test_resize_changes_aspect() {
        let mut camera = Camera::new(800, 800, Vec3::ZERO);
        let square = camera.matrix(45.0, 0.1, 100.0);
        camera.resize(1600, 800);
        let wide = camera.matrix(45.0, 0.1, 100.0);
        assert!((wide.x_axis.x * 2.0 - square.x_axis.x).abs() < EPSILON);
    }
}
