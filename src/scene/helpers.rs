use glam::Vec3;

/// A colored line-segment endpoint.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LineVertex {
    /// World-space position.
    pub position: [f32; 3],
    /// Linear RGB color.
    pub color: [f32; 3],
}

/// Three line segments from the origin along `+X` (red), `+Y` (green) and
/// `+Z` (blue).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxesHelper {
    /// Length of each axis segment.
    pub size: f32,
}

impl AxesHelper {
    /// Axes of the given length.
    #[must_use]
    pub fn new(size: f32) -> Self {
        Self { size }
    }

    /// Line-list vertices: two per axis.
    #[must_use]
    pub fn vertices(&self) -> [LineVertex; 6] {
        let axes = [
            (Vec3::X, [1.0, 0.0, 0.0]),
            (Vec3::Y, [0.0, 1.0, 0.0]),
            (Vec3::Z, [0.0, 0.0, 1.0]),
        ];
        let mut out = [LineVertex {
            position: [0.0; 3],
            color: [0.0; 3],
        }; 6];
        for (i, (axis, color)) in axes.into_iter().enumerate() {
            out[i * 2] = LineVertex {
                position: [0.0; 3],
                color,
            };
            out[i * 2 + 1] = LineVertex {
                position: (axis * self.size).to_array(),
                color,
            };
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axes_segments_have_requested_length() {
        let v = AxesHelper::new(100.0).vertices();
        assert_eq!(v[1].position, [100.0, 0.0, 0.0]);
        assert_eq!(v[3].position, [0.0, 100.0, 0.0]);
        assert_eq!(v[5].position, [0.0, 0.0, 100.0]);
        assert_eq!(v[4].color, [0.0, 0.0, 1.0]);
    }
}
