use glam::{Mat4, Vec3};

/// Orthographic camera defined by frustum planes, zoom, eye position and
/// look-at target.
///
/// Like most retained-mode engines, changes to the frustum planes or
/// [`zoom`](Self::zoom) only take effect after
/// [`update_projection_matrix`](Self::update_projection_matrix).
#[derive(Debug, Clone)]
pub struct OrthographicCamera {
    /// Left frustum plane.
    pub left: f32,
    /// Right frustum plane.
    pub right: f32,
    /// Top frustum plane.
    pub top: f32,
    /// Bottom frustum plane.
    pub bottom: f32,
    /// Near clipping plane distance.
    pub near: f32,
    /// Far clipping plane distance.
    pub far: f32,
    /// Zoom factor; the visible extent is the frustum divided by this.
    pub zoom: f32,
    /// Eye (camera) position in world space.
    pub position: Vec3,
    /// Up direction vector.
    pub up: Vec3,
    target: Vec3,
    projection: Mat4,
}

impl OrthographicCamera {
    /// Camera with the given frustum planes, zoom 1, placed at `+Z` looking
    /// at the origin.
    #[must_use]
    pub fn new(
        left: f32,
        right: f32,
        top: f32,
        bottom: f32,
        near: f32,
        far: f32,
    ) -> Self {
        let mut camera = Self {
            left,
            right,
            top,
            bottom,
            near,
            far,
            zoom: 1.0,
            position: Vec3::Z,
            up: Vec3::Y,
            target: Vec3::ZERO,
            projection: Mat4::IDENTITY,
        };
        camera.update_projection_matrix();
        camera
    }

    /// Camera whose frustum is derived from a viewport size.
    ///
    /// The frustum spans `width * aspect` horizontally and
    /// `height * aspect` vertically, centered on the view axis.
    #[must_use]
    pub fn from_viewport(width: f32, height: f32, near: f32, far: f32) -> Self {
        let (left, right, top, bottom) = viewport_frustum(width, height);
        Self::new(left, right, top, bottom, near, far)
    }

    /// Replace the frustum planes for a new viewport size and rebuild the
    /// projection.
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        let (left, right, top, bottom) = viewport_frustum(width, height);
        self.left = left;
        self.right = right;
        self.top = top;
        self.bottom = bottom;
        self.update_projection_matrix();
    }

    /// Current look-at target.
    #[must_use]
    pub fn target(&self) -> Vec3 {
        self.target
    }

    /// Orient the camera toward `target`.
    pub fn look_at(&mut self, target: Vec3) {
        self.target = target;
    }

    /// Recompute the cached projection from the frustum planes and zoom.
    pub fn update_projection_matrix(&mut self) {
        let dx = (self.right - self.left) / (2.0 * self.zoom);
        let dy = (self.top - self.bottom) / (2.0 * self.zoom);
        let cx = (self.right + self.left) * 0.5;
        let cy = (self.top + self.bottom) * 0.5;
        // orthographic_rh maps depth to [0,1] (wgpu convention)
        self.projection = Mat4::orthographic_rh(
            cx - dx,
            cx + dx,
            cy - dy,
            cy + dy,
            self.near,
            self.far,
        );
    }

    /// The cached projection matrix.
    #[must_use]
    pub fn projection_matrix(&self) -> Mat4 {
        self.projection
    }

    /// World-to-view matrix for the current position, target and up.
    #[must_use]
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    /// Combined view-projection matrix.
    #[must_use]
    pub fn view_projection(&self) -> Mat4 {
        self.projection * self.view_matrix()
    }

    /// Unit view direction, or zero if position and target coincide.
    #[must_use]
    pub fn forward(&self) -> Vec3 {
        (self.target - self.position).normalize_or_zero()
    }

    /// Project a world-space point into normalized device coordinates
    /// (`x`,`y` in `[-1, 1]`, `z` in `[0, 1]` when inside the frustum).
    #[must_use]
    pub fn project(&self, point: Vec3) -> Vec3 {
        self.view_projection().project_point3(point)
    }

    /// Map normalized device coordinates back to world space.
    #[must_use]
    pub fn unproject(&self, ndc: Vec3) -> Vec3 {
        self.view_projection().inverse().project_point3(ndc)
    }

    /// Visible world-space width and height at the current zoom.
    #[must_use]
    pub fn visible_extent(&self) -> (f32, f32) {
        (
            (self.right - self.left) / self.zoom,
            (self.top - self.bottom) / self.zoom,
        )
    }
}

fn viewport_frustum(width: f32, height: f32) -> (f32, f32, f32, f32) {
    let aspect = width / height;
    let half_w = width * aspect * 0.5;
    let half_h = height * aspect * 0.5;
    (-half_w, half_w, half_h, -half_h)
}

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
/// GPU uniform buffer holding the view-projection matrix and camera metadata.
pub struct CameraUniform {
    /// Combined view-projection matrix.
    pub view_proj: [[f32; 4]; 4],
    /// Camera world-space position.
    pub position: [f32; 3],
    /// Orthographic zoom factor.
    pub zoom: f32,
    /// Camera forward direction for lighting.
    pub forward: [f32; 3],
    /// Padding for GPU alignment.
    pub(crate) _pad: f32,
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraUniform {
    /// Create a new camera uniform with identity view-projection.
    #[must_use]
    pub fn new() -> Self {
        Self {
            view_proj: Mat4::IDENTITY.to_cols_array_2d(),
            position: [0.0; 3],
            zoom: 1.0,
            forward: [0.0, 0.0, -1.0],
            _pad: 0.0,
        }
    }

    /// Update uniform fields from the given camera's current state.
    pub fn update_view_proj(&mut self, camera: &OrthographicCamera) {
        self.view_proj = camera.view_projection().to_cols_array_2d();
        self.position = camera.position.to_array();
        self.zoom = camera.zoom;
        self.forward = camera.forward().to_array();
    }
}
