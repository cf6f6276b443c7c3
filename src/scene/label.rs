use glam::Vec3;

/// Text anchored to an [`Object3D`](crate::scene::Object3D), drawn in
/// screen space by the [`LabelOverlay`](crate::overlay::LabelOverlay).
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    /// Label text.
    pub text: String,
    /// Anchor offset in the owning object's local space.
    pub offset: Vec3,
    /// Hidden labels are not placed.
    pub visible: bool,
}

impl Label {
    /// Label anchored at the owning object's origin.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            offset: Vec3::ZERO,
            visible: true,
        }
    }

    /// Move the anchor by `offset` in object-local space.
    #[must_use]
    pub fn with_offset(mut self, offset: Vec3) -> Self {
        self.offset = offset;
        self
    }
}
