/// Pointer and keyboard input the trackball reacts to.
///
/// Positions are in physical pixels from the top-left corner of the
/// window. Events only record gesture state; a
/// [`TrackballController`](crate::camera::controller::TrackballController)
/// turns it into camera motion on its next update.
///
/// ```
/// use orthoview::camera::controller::TrackballController;
/// use orthoview::input::InputEvent;
///
/// let mut controller = TrackballController::default();
/// let _ = controller.handle_event(&InputEvent::Wheel { lines: 1.0 });
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// The pointer moved.
    PointerMoved {
        /// Horizontal position.
        x: f32,
        /// Vertical position, growing downward.
        y: f32,
    },
    /// A button went down at the last pointer position and starts a drag.
    ButtonPressed(MouseButton),
    /// A button was released; any drag in progress ends.
    ButtonReleased(MouseButton),
    /// Wheel turned by `lines` notches; positive zooms in.
    Wheel {
        /// Notches turned.
        lines: f32,
    },
    /// Shift went up or down. Held shift turns a left drag into a pan.
    ShiftChanged(bool),
}

/// Mouse buttons that drive a drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Rotates, or pans with shift held.
    Left,
    /// Zooms.
    Middle,
    /// Pans.
    Right,
}

/// Camera motion performed by a drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gesture {
    /// Orbit the camera around the target.
    Rotate,
    /// Change the orthographic zoom.
    Zoom,
    /// Slide camera and target together.
    Pan,
}

impl MouseButton {
    /// Gesture a drag with this button starts.
    #[must_use]
    pub const fn gesture(self, shift: bool) -> Gesture {
        match self {
            Self::Left if shift => Gesture::Pan,
            Self::Left => Gesture::Rotate,
            Self::Middle => Gesture::Zoom,
            Self::Right => Gesture::Pan,
        }
    }

    /// Map a winit button; back, forward and other buttons do not drag.
    #[cfg(feature = "viewer")]
    #[must_use]
    pub const fn from_winit(button: winit::event::MouseButton) -> Option<Self> {
        match button {
            winit::event::MouseButton::Left => Some(Self::Left),
            winit::event::MouseButton::Middle => Some(Self::Middle),
            winit::event::MouseButton::Right => Some(Self::Right),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buttons_map_to_trackball_gestures() {
        assert_eq!(MouseButton::Left.gesture(false), Gesture::Rotate);
        assert_eq!(MouseButton::Middle.gesture(false), Gesture::Zoom);
        assert_eq!(MouseButton::Right.gesture(false), Gesture::Pan);
    }

    #[test]
    fn shift_turns_left_drag_into_pan() {
        assert_eq!(MouseButton::Left.gesture(true), Gesture::Pan);
        assert_eq!(MouseButton::Middle.gesture(true), Gesture::Zoom);
    }

    #[cfg(feature = "viewer")]
    #[test]
    fn extra_winit_buttons_are_ignored() {
        use winit::event::MouseButton as Winit;
        assert_eq!(MouseButton::from_winit(Winit::Right), Some(MouseButton::Right));
        assert_eq!(MouseButton::from_winit(Winit::Back), None);
        assert_eq!(MouseButton::from_winit(Winit::Other(7)), None);
    }
}
