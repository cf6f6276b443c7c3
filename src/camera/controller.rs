use glam::{Quat, Vec2, Vec3};

use crate::{
    camera::core::OrthographicCamera,
    input::{Gesture, InputEvent, MouseButton},
    options::ControlOptions,
};

/// Wheel line-delta to zoom-track units.
const WHEEL_LINE_SCALE: f32 = 0.01;

/// Screen rectangle of the element receiving input, in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenRect {
    /// Left edge.
    pub left: f32,
    /// Top edge.
    pub top: f32,
    /// Width.
    pub width: f32,
    /// Height.
    pub height: f32,
}

/// Trackball camera controller orbiting an orthographic camera around
/// [`target`](Self::target).
///
/// Input only records gesture state; the camera moves when
/// [`update`](Self::update) runs, typically once per frame. Left drag
/// rotates, middle drag zooms, right drag (or shift + left) pans, and the
/// wheel zooms.
#[derive(Debug, Clone)]
pub struct TrackballController {
    /// Point the camera orbits and looks at.
    pub target: Vec3,
    /// Rotation sensitivity multiplier.
    pub rotate_speed: f32,
    /// Zoom sensitivity multiplier.
    pub zoom_speed: f32,
    /// Pan sensitivity multiplier.
    pub pan_speed: f32,
    /// Consume all pending motion on each update instead of easing it out.
    pub static_moving: bool,
    /// Fraction of remaining motion consumed per update when not static.
    pub dynamic_damping_factor: f32,
    /// Lower bound for the camera zoom.
    pub min_zoom: f32,
    /// Upper bound for the camera zoom.
    pub max_zoom: f32,
    /// Ignore input while `false`; `update` still settles pending motion.
    pub enabled: bool,

    screen: ScreenRect,
    drag: Option<Gesture>,
    shift_pressed: bool,
    pointer: Vec2,

    move_prev: Vec2,
    move_curr: Vec2,
    last_axis: Vec3,
    last_angle: f32,

    zoom_start: Vec2,
    zoom_end: Vec2,
    pan_start: Vec2,
    pan_end: Vec2,
}

impl Default for TrackballController {
    fn default() -> Self {
        Self::new(&ControlOptions::default())
    }
}

impl TrackballController {
    /// Controller targeting the origin with speeds from `options`.
    #[must_use]
    pub fn new(options: &ControlOptions) -> Self {
        Self {
            target: Vec3::ZERO,
            rotate_speed: options.rotate_speed,
            zoom_speed: options.zoom_speed,
            pan_speed: options.pan_speed,
            static_moving: options.static_moving,
            dynamic_damping_factor: options.dynamic_damping_factor,
            min_zoom: options.min_zoom,
            max_zoom: options.max_zoom,
            enabled: true,
            screen: ScreenRect {
                left: 0.0,
                top: 0.0,
                width: 1.0,
                height: 1.0,
            },
            drag: None,
            shift_pressed: false,
            pointer: Vec2::ZERO,
            move_prev: Vec2::ZERO,
            move_curr: Vec2::ZERO,
            last_axis: Vec3::ZERO,
            last_angle: 0.0,
            zoom_start: Vec2::ZERO,
            zoom_end: Vec2::ZERO,
            pan_start: Vec2::ZERO,
            pan_end: Vec2::ZERO,
        }
    }

    /// Set the screen rectangle that pointer coordinates are relative to.
    pub fn set_screen(&mut self, screen: ScreenRect) {
        self.screen = screen;
    }

    /// Convenience for a viewport anchored at the window origin.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.set_screen(ScreenRect {
            left: 0.0,
            top: 0.0,
            width,
            height,
        });
    }

    /// Current screen rectangle.
    #[must_use]
    pub fn screen(&self) -> ScreenRect {
        self.screen
    }

    /// `true` while a drag gesture is active.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Feed an input event. Returns `true` if the event was consumed.
    pub fn handle_event(&mut self, event: &InputEvent) -> bool {
        if !self.enabled {
            return false;
        }
        match *event {
            InputEvent::PointerMoved { x, y } => {
                self.pointer = Vec2::new(x, y);
                self.pointer_moved();
                self.drag.is_some()
            }
            InputEvent::ButtonPressed(button) => {
                self.pointer_down(button);
                true
            }
            InputEvent::ButtonReleased(_) => {
                self.drag = None;
                true
            }
            InputEvent::Wheel { lines } => {
                self.zoom_start.y += lines * WHEEL_LINE_SCALE;
                true
            }
            InputEvent::ShiftChanged(shift) => {
                self.shift_pressed = shift;
                false
            }
        }
    }

    fn pointer_down(&mut self, button: MouseButton) {
        let gesture = button.gesture(self.shift_pressed);
        self.drag = Some(gesture);
        match gesture {
            Gesture::Rotate => {
                self.move_curr = self.on_circle(self.pointer);
                self.move_prev = self.move_curr;
            }
            Gesture::Zoom => {
                self.zoom_start = self.on_screen(self.pointer);
                self.zoom_end = self.zoom_start;
            }
            Gesture::Pan => {
                self.pan_start = self.on_screen(self.pointer);
                self.pan_end = self.pan_start;
            }
        }
    }

    fn pointer_moved(&mut self) {
        match self.drag {
            Some(Gesture::Rotate) => {
                self.move_prev = self.move_curr;
                self.move_curr = self.on_circle(self.pointer);
            }
            Some(Gesture::Zoom) => self.zoom_end = self.on_screen(self.pointer),
            Some(Gesture::Pan) => self.pan_end = self.on_screen(self.pointer),
            None => {}
        }
    }

    /// Pointer position as a fraction of the screen rectangle.
    fn on_screen(&self, p: Vec2) -> Vec2 {
        Vec2::new(
            (p.x - self.screen.left) / self.screen.width,
            (p.y - self.screen.top) / self.screen.height,
        )
    }

    /// Pointer position on the virtual trackball, centered, `+y` up, both
    /// axes scaled by the half width.
    fn on_circle(&self, p: Vec2) -> Vec2 {
        let s = self.screen;
        Vec2::new(
            (p.x - s.width * 0.5 - s.left) / (s.width * 0.5),
            (s.height + 2.0 * (s.top - p.y)) / s.width,
        )
    }

    /// Apply pending rotation, zoom and pan to `camera`, then aim it at the
    /// target.
    pub fn update(&mut self, camera: &mut OrthographicCamera) {
        let mut eye = camera.position - self.target;
        self.rotate_camera(camera, &mut eye);
        self.zoom_camera(camera);
        self.pan_camera(camera, eye);
        camera.position = self.target + eye;
        camera.look_at(self.target);
    }

    fn rotate_camera(&mut self, camera: &mut OrthographicCamera, eye: &mut Vec3) {
        let delta = self.move_curr - self.move_prev;
        let angle = delta.length();

        if angle > 0.0 {
            let eye_dir = eye.normalize_or_zero();
            let up = camera.up.normalize_or_zero();
            let sideways = up.cross(eye_dir).normalize_or_zero();
            let move_dir = up * delta.y + sideways * delta.x;
            let axis = move_dir.cross(*eye).normalize_or_zero();
            if axis != Vec3::ZERO {
                let angle = angle * self.rotate_speed;
                let q = Quat::from_axis_angle(axis, angle);
                *eye = q * *eye;
                camera.up = q * camera.up;
                self.last_axis = axis;
                self.last_angle = angle;
            }
        } else if !self.static_moving && self.last_angle != 0.0 {
            self.last_angle *= (1.0 - self.dynamic_damping_factor).sqrt();
            let q = Quat::from_axis_angle(self.last_axis, self.last_angle);
            *eye = q * *eye;
            camera.up = q * camera.up;
        }

        self.move_prev = self.move_curr;
    }

    fn zoom_camera(&mut self, camera: &mut OrthographicCamera) {
        let factor = 1.0 + (self.zoom_end.y - self.zoom_start.y) * self.zoom_speed;
        if factor != 1.0 && factor > 0.0 {
            let zoom = (camera.zoom / factor).max(self.min_zoom).min(self.max_zoom);
            if zoom != camera.zoom {
                camera.zoom = zoom;
                camera.update_projection_matrix();
            }
        }

        if self.static_moving {
            self.zoom_start = self.zoom_end;
        } else {
            self.zoom_start.y +=
                (self.zoom_end.y - self.zoom_start.y) * self.dynamic_damping_factor;
        }
    }

    fn pan_camera(&mut self, camera: &mut OrthographicCamera, eye: Vec3) {
        let mut change = self.pan_end - self.pan_start;
        if change.length_squared() == 0.0 {
            return;
        }

        // Pointer fractions to world units at the current zoom
        let (visible_w, visible_h) = camera.visible_extent();
        change.x *= visible_w;
        change.y *= visible_h;
        change *= self.pan_speed;

        let up = camera.up.normalize_or_zero();
        let right = eye.cross(up).normalize_or_zero();
        let pan = right * change.x + up * change.y;
        camera.position += pan;
        self.target += pan;

        if self.static_moving {
            self.pan_start = self.pan_end;
        } else {
            self.pan_start += (self.pan_end - self.pan_start) * self.dynamic_damping_factor;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> OrthographicCamera {
        let mut cam = OrthographicCamera::from_viewport(100.0, 100.0, 0.1, 1000.0);
        cam.position = Vec3::new(0.0, 0.0, 50.0);
        cam.look_at(Vec3::ZERO);
        cam
    }

    fn controller() -> TrackballController {
        let mut c = TrackballController::default();
        c.resize(100.0, 100.0);
        c
    }

    fn drag(c: &mut TrackballController, button: MouseButton, from: Vec2, to: Vec2) {
        let _ = c.handle_event(&InputEvent::PointerMoved { x: from.x, y: from.y });
        let _ = c.handle_event(&InputEvent::ButtonPressed(button));
        let _ = c.handle_event(&InputEvent::PointerMoved { x: to.x, y: to.y });
    }

    #[test]
    fn idle_update_keeps_camera_still() {
        let mut cam = camera();
        let mut c = controller();
        c.update(&mut cam);
        assert_eq!(cam.position, Vec3::new(0.0, 0.0, 50.0));
        assert_eq!(cam.target(), Vec3::ZERO);
        assert_eq!(cam.zoom, 1.0);
    }

    #[test]
    fn rotation_preserves_orbit_radius() {
        let mut cam = camera();
        let mut c = controller();
        drag(&mut c, MouseButton::Left, Vec2::new(50.0, 50.0), Vec2::new(60.0, 50.0));
        c.update(&mut cam);
        assert!((cam.position.length() - 50.0).abs() < 1e-3);
        assert!(cam.position.x.abs() > 1.0);
        assert_eq!(cam.target(), Vec3::ZERO);

        // Static moving: motion is consumed, the next update is a no-op
        let before = cam.position;
        c.update(&mut cam);
        assert_eq!(cam.position, before);
    }

    #[test]
    fn wheel_zooms_in_orthographically() {
        let mut cam = camera();
        let mut c = controller();
        let _ = c.handle_event(&InputEvent::Wheel { lines: 5.0 });
        c.update(&mut cam);
        // factor = 1 - 0.05 * 2 = 0.9
        assert!((cam.zoom - 1.0 / 0.9).abs() < 1e-5);
        assert_eq!(cam.position, Vec3::new(0.0, 0.0, 50.0));
    }

    #[test]
    fn zoom_is_clamped() {
        let mut cam = camera();
        let mut c = controller();
        c.max_zoom = 1.05;
        let _ = c.handle_event(&InputEvent::Wheel { lines: 5.0 });
        c.update(&mut cam);
        assert_eq!(cam.zoom, 1.05);
    }

    #[test]
    fn pan_moves_camera_and_target_together() {
        let mut cam = camera();
        let mut c = controller();
        drag(&mut c, MouseButton::Right, Vec2::new(50.0, 50.0), Vec2::new(60.0, 50.0));
        c.update(&mut cam);
        let offset = cam.position - c.target;
        assert!((offset - Vec3::new(0.0, 0.0, 50.0)).length() < 1e-4);
        assert!(c.target.x.abs() > 0.0);
        assert_eq!(cam.target(), c.target);
    }

    #[test]
    fn shift_left_drag_pans() {
        let mut cam = camera();
        let mut c = controller();
        assert!(!c.handle_event(&InputEvent::ShiftChanged(true)));
        drag(&mut c, MouseButton::Left, Vec2::new(50.0, 50.0), Vec2::new(50.0, 60.0));
        c.update(&mut cam);
        assert!(c.target.y.abs() > 0.0);
        assert!((cam.position - c.target - Vec3::new(0.0, 0.0, 50.0)).length() < 1e-4);
    }

    #[test]
    fn disabled_controller_ignores_input() {
        let mut c = controller();
        c.enabled = false;
        assert!(!c.handle_event(&InputEvent::Wheel { lines: 1.0 }));
        let mut cam = camera();
        c.update(&mut cam);
        assert_eq!(cam.zoom, 1.0);
    }

    #[test]
    fn release_ends_drag() {
        let mut c = controller();
        drag(&mut c, MouseButton::Middle, Vec2::ZERO, Vec2::new(0.0, 10.0));
        assert!(c.is_dragging());
        let _ = c.handle_event(&InputEvent::ButtonReleased(MouseButton::Middle));
        assert!(!c.is_dragging());
    }
}
