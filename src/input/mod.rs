//! Input handling: platform-agnostic event types and pointer coordinate
//! conversion.

/// Pointer events, buttons and the gestures they drive.
pub mod event;
/// Pointer position to normalized device coordinates.
pub mod ndc;

pub use event::{Gesture, InputEvent, MouseButton};
pub use ndc::pointer_to_ndc;
