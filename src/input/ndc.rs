use glam::Vec2;

/// Normalize a pointer position in viewport pixels to device coordinates.
///
/// Both axes map to `[-1, 1]`; `y` is flipped so that `+1` is the top edge.
#[must_use]
pub fn pointer_to_ndc(x: f32, y: f32, width: f32, height: f32) -> Vec2 {
    Vec2::new((x / width) * 2.0 - 1.0, -(y / height) * 2.0 + 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corners_and_center() {
        assert_eq!(pointer_to_ndc(0.0, 0.0, 800.0, 600.0), Vec2::new(-1.0, 1.0));
        assert_eq!(
            pointer_to_ndc(800.0, 600.0, 800.0, 600.0),
            Vec2::new(1.0, -1.0)
        );
        assert_eq!(pointer_to_ndc(400.0, 300.0, 800.0, 600.0), Vec2::ZERO);
    }

    #[test]
    fn quarter_point() {
        let ndc = pointer_to_ndc(200.0, 450.0, 800.0, 600.0);
        assert_eq!(ndc, Vec2::new(-0.5, -0.5));
    }
}
