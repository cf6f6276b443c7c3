//! Forward renderer for lit meshes, the axes helper and label markers.
//!
//! Scene geometry is flattened into one world-space vertex/index buffer by
//! [`SceneRenderer::prepare_scene`]; each frame then costs two uniform
//! writes and a handful of draw calls. Frames are drawn in two passes so
//! label markers land on top of the finished scene:
//! [`render_scene`](SceneRenderer::render_scene) clears and draws the
//! scene, [`render_labels`](SceneRenderer::render_labels) loads it and
//! draws the overlay markers.

use glam::{Mat3, Mat4};

use crate::{
    camera::core::{CameraUniform, OrthographicCamera},
    gpu::{
        dynamic_buffer::TypedBuffer,
        pipeline_helpers::{self, UniformBinding},
        render_context::RenderContext,
        texture::RenderTarget,
    },
    overlay::LabelOverlay,
    renderer::{lighting::LightingUniform, pipeline_util, settings::RendererSettings},
    scene::{LineVertex, Scene},
};

/// Crosshair size in physical pixels.
const MARKER_SIZE: f32 = 6.0;
const MARKER_COLOR: [f32; 3] = [1.0, 1.0, 1.0];

/// A world-space mesh vertex.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshVertex {
    /// World-space position.
    pub position: [f32; 3],
    /// World-space unit normal.
    pub normal: [f32; 3],
    /// Linear RGB base color.
    pub color: [f32; 3],
}

impl MeshVertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 3] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3, 2 => Float32x3];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

const LINE_ATTRIBUTES: [wgpu::VertexAttribute; 2] =
    wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];

fn line_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: size_of::<LineVertex>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &LINE_ATTRIBUTES,
    }
}

/// Flatten every visible mesh in `scene` into world-space vertices and
/// rebased indices.
#[must_use]
pub fn collect_meshes(scene: &Scene) -> (Vec<MeshVertex>, Vec<u32>) {
    let mut vertices = Vec::new();
    let mut indices = Vec::new();
    scene.traverse_visible(&mut |object| {
        let Some(geometry) = object.geometry() else {
            return;
        };
        let world = object.world_matrix();
        let normal_matrix = normal_matrix(&world);
        let Ok(base) = u32::try_from(vertices.len()) else {
            log::error!("scene exceeds u32 vertex indices; skipping {}", object.name);
            return;
        };
        vertices.extend(
            geometry
                .positions()
                .iter()
                .zip(geometry.normals())
                .map(|(&p, &n)| MeshVertex {
                    position: world.transform_point3(p).to_array(),
                    normal: (normal_matrix * n).normalize_or_zero().to_array(),
                    color: object.color,
                }),
        );
        indices.extend(geometry.indices().iter().map(|&i| base + i));
    });
    (vertices, indices)
}

fn normal_matrix(world: &Mat4) -> Mat3 {
    Mat3::from_mat4(*world).inverse().transpose()
}

/// Draws a [`Scene`] through an [`OrthographicCamera`] into a surface view.
pub struct SceneRenderer {
    settings: RendererSettings,
    format: wgpu::TextureFormat,
    size: (u32, u32),
    mesh_pipeline: wgpu::RenderPipeline,
    line_pipeline: wgpu::RenderPipeline,
    camera: UniformBinding,
    /// Identity view-projection so markers can be given directly in NDC.
    overlay_camera: wgpu::BindGroup,
    lighting: UniformBinding,
    mesh_vertices: TypedBuffer<MeshVertex>,
    mesh_indices: TypedBuffer<u32>,
    axes_vertices: TypedBuffer<LineVertex>,
    marker_vertices: TypedBuffer<LineVertex>,
    msaa: Option<RenderTarget>,
    depth: RenderTarget,
}

impl SceneRenderer {
    /// Build pipelines and targets for `context`'s surface.
    #[must_use]
    pub fn new(context: &RenderContext, settings: RendererSettings) -> Self {
        let device = &context.device;
        let format = context.format();
        let size = context.size();
        let sample_count = context.sample_count;

        let camera = UniformBinding::new(
            device,
            "Camera",
            wgpu::ShaderStages::VERTEX_FRAGMENT,
            &CameraUniform::new(),
        );
        let (_, overlay_camera) =
            camera.sibling(device, "Overlay Camera", &CameraUniform::new());
        let lighting = UniformBinding::new(
            device,
            "Lighting",
            wgpu::ShaderStages::VERTEX_FRAGMENT,
            &LightingUniform::default(),
        );
        let layouts = [&camera.layout, &lighting.layout];

        let mesh_shader = pipeline_helpers::wgsl_module(
            device,
            "Mesh Shader",
            include_str!("shaders/mesh.wgsl"),
        );
        let line_shader = pipeline_helpers::wgsl_module(
            device,
            "Line Shader",
            include_str!("shaders/lines.wgsl"),
        );
        let mesh_pipeline = create_pipeline(
            device,
            &PipelineSpec {
                label: "Mesh Pipeline",
                shader: &mesh_shader,
                layouts: &layouts,
                vertex_layout: MeshVertex::layout(),
                topology: wgpu::PrimitiveTopology::TriangleList,
                format,
                sample_count,
            },
        );
        let line_pipeline = create_pipeline(
            device,
            &PipelineSpec {
                label: "Line Pipeline",
                shader: &line_shader,
                layouts: &layouts,
                vertex_layout: line_layout(),
                topology: wgpu::PrimitiveTopology::LineList,
                format,
                sample_count,
            },
        );

        let vertex = wgpu::BufferUsages::VERTEX;
        let (msaa, depth) = create_targets(device, format, size, sample_count);
        Self {
            settings,
            format,
            size,
            mesh_pipeline,
            line_pipeline,
            camera,
            overlay_camera,
            lighting,
            mesh_vertices: TypedBuffer::with_capacity(device, "Mesh Vertices", 1024, vertex),
            mesh_indices: TypedBuffer::with_capacity(
                device,
                "Mesh Indices",
                3072,
                wgpu::BufferUsages::INDEX,
            ),
            axes_vertices: TypedBuffer::with_capacity(device, "Axes Vertices", 6, vertex),
            marker_vertices: TypedBuffer::with_capacity(device, "Label Markers", 64, vertex),
            msaa,
            depth,
        }
    }

    /// Active settings.
    #[must_use]
    pub fn settings(&self) -> &RendererSettings {
        &self.settings
    }

    /// Recreate size-dependent targets if the surface size changed.
    pub fn resize(&mut self, context: &RenderContext) {
        let size = context.size();
        if size == self.size {
            return;
        }
        log::debug!("resizing render targets to {}x{}", size.0, size.1);
        let (msaa, depth) = create_targets(
            &context.device,
            self.format,
            size,
            context.sample_count,
        );
        self.msaa = msaa;
        self.depth = depth;
        self.size = size;
    }

    /// Upload geometry, the axes helper and the light rig of `scene`.
    /// Call again whenever the scene changes.
    pub fn prepare_scene(&mut self, context: &RenderContext, scene: &Scene) {
        let (vertices, indices) = collect_meshes(scene);
        log::debug!(
            "uploading scene: {} vertices, {} triangles",
            vertices.len(),
            indices.len() / 3
        );
        let (device, queue) = (&context.device, &context.queue);
        let _ = self.mesh_vertices.write(device, queue, &vertices);
        let _ = self.mesh_indices.write(device, queue, &indices);

        let axes = scene.axes.map(|a| a.vertices().to_vec()).unwrap_or_default();
        let _ = self.axes_vertices.write(device, queue, &axes);

        self.lighting.write(
            queue,
            &LightingUniform::from_lights(&scene.lights, &self.settings),
        );
    }

    /// Clear the frame and draw the prepared scene through `camera`.
    #[allow(clippy::cast_possible_truncation)]
    pub fn render_scene(
        &self,
        context: &RenderContext,
        view: &wgpu::TextureView,
        camera: &OrthographicCamera,
    ) {
        let mut uniform = CameraUniform::new();
        uniform.update_view_proj(camera);
        self.camera.write(&context.queue, &uniform);

        let mut encoder = context.create_encoder("Scene Encoder");
        {
            let mut pass = self.begin_pass(
                &mut encoder,
                "scene pass",
                view,
                wgpu::LoadOp::Clear(self.settings.wgpu_clear_color()),
            );
            pass.set_bind_group(0, &self.camera.bind_group, &[]);
            pass.set_bind_group(1, &self.lighting.bind_group, &[]);

            if !self.mesh_indices.is_empty() {
                pass.set_pipeline(&self.mesh_pipeline);
                pass.set_vertex_buffer(0, self.mesh_vertices.slice());
                pass.set_index_buffer(self.mesh_indices.slice(), wgpu::IndexFormat::Uint32);
                pass.draw_indexed(0..self.mesh_indices.count() as u32, 0, 0..1);
            }
            if !self.axes_vertices.is_empty() {
                pass.set_pipeline(&self.line_pipeline);
                pass.set_vertex_buffer(0, self.axes_vertices.slice());
                pass.draw(0..self.axes_vertices.count() as u32, 0..1);
            }
        }
        context.submit(encoder);
    }

    /// Draw a crosshair at every label placement of `overlay` on top of the
    /// frame produced by [`render_scene`](Self::render_scene).
    #[allow(clippy::cast_possible_truncation)]
    pub fn render_labels(
        &mut self,
        context: &RenderContext,
        view: &wgpu::TextureView,
        overlay: &LabelOverlay,
    ) {
        let markers = overlay.marker_vertices(MARKER_SIZE, MARKER_COLOR);
        let _ = self
            .marker_vertices
            .write(&context.device, &context.queue, &markers);
        if markers.is_empty() {
            return;
        }

        let mut encoder = context.create_encoder("Label Encoder");
        {
            let mut pass =
                self.begin_pass(&mut encoder, "label pass", view, wgpu::LoadOp::Load);
            pass.set_pipeline(&self.line_pipeline);
            pass.set_bind_group(0, &self.overlay_camera, &[]);
            pass.set_bind_group(1, &self.lighting.bind_group, &[]);
            pass.set_vertex_buffer(0, self.marker_vertices.slice());
            pass.draw(0..self.marker_vertices.count() as u32, 0..1);
        }
        context.submit(encoder);
    }

    fn begin_pass<'e>(
        &self,
        encoder: &'e mut wgpu::CommandEncoder,
        label: &str,
        view: &wgpu::TextureView,
        load: wgpu::LoadOp<wgpu::Color>,
    ) -> wgpu::RenderPass<'e> {
        let ops = wgpu::Operations {
            load,
            store: wgpu::StoreOp::Store,
        };
        let color = match &self.msaa {
            Some(msaa) => wgpu::RenderPassColorAttachment {
                view: &msaa.view,
                resolve_target: Some(view),
                ops,
                depth_slice: None,
            },
            None => wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops,
                depth_slice: None,
            },
        };
        let depth_load = if matches!(load, wgpu::LoadOp::Clear(_)) {
            wgpu::LoadOp::Clear(1.0)
        } else {
            wgpu::LoadOp::Load
        };
        encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some(label),
            color_attachments: &[Some(color)],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: &self.depth.view,
                depth_ops: Some(wgpu::Operations {
                    load: depth_load,
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
        })
    }
}

struct PipelineSpec<'a> {
    label: &'a str,
    shader: &'a wgpu::ShaderModule,
    layouts: &'a [&'a wgpu::BindGroupLayout],
    vertex_layout: wgpu::VertexBufferLayout<'static>,
    topology: wgpu::PrimitiveTopology,
    format: wgpu::TextureFormat,
    sample_count: u32,
}

fn create_pipeline(device: &wgpu::Device, spec: &PipelineSpec<'_>) -> wgpu::RenderPipeline {
    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some(&format!("{} Layout", spec.label)),
        bind_group_layouts: spec.layouts,
        push_constant_ranges: &[],
    });
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(spec.label),
        layout: Some(&layout),
        vertex: wgpu::VertexState {
            module: spec.shader,
            entry_point: Some("vs_main"),
            buffers: &[spec.vertex_layout.clone()],
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: spec.shader,
            entry_point: Some("fs_main"),
            targets: &pipeline_util::color_targets(spec.format),
            compilation_options: Default::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology: spec.topology,
            cull_mode: None,
            ..Default::default()
        },
        depth_stencil: Some(pipeline_util::depth_stencil_state()),
        multisample: pipeline_util::multisample_state(spec.sample_count),
        multiview: None,
        cache: None,
    })
}

fn create_targets(
    device: &wgpu::Device,
    format: wgpu::TextureFormat,
    size: (u32, u32),
    sample_count: u32,
) -> (Option<RenderTarget>, RenderTarget) {
    let msaa = (sample_count > 1)
        .then(|| RenderTarget::new(device, "MSAA Color", size, format, sample_count));
    let depth = RenderTarget::new(
        device,
        "Depth",
        size,
        pipeline_util::DEPTH_FORMAT,
        sample_count,
    );
    (msaa, depth)
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::scene::{Geometry, Object3D};

    #[test]
    fn vertex_layouts_match_structs() {
        assert_eq!(MeshVertex::layout().array_stride, 36);
        assert_eq!(line_layout().array_stride, 24);
    }

    #[test]
    fn meshes_are_flattened_into_world_space() {
        let mut scene = Scene::new();
        let _ = scene.add(
            Object3D::mesh("a", Geometry::cuboid(Vec3::ONE))
                .with_position(Vec3::new(10.0, 0.0, 0.0))
                .with_color([1.0, 0.0, 0.0]),
        );
        let _ = scene.add(Object3D::mesh("b", Geometry::cuboid(Vec3::ONE)));
        let (vertices, indices) = collect_meshes(&scene);

        let per_cube = Geometry::cuboid(Vec3::ONE);
        let (nv, ni) = (per_cube.positions().len(), per_cube.indices().len());
        assert_eq!(vertices.len(), nv * 2);
        assert_eq!(indices.len(), ni * 2);
        assert!(vertices[..nv].iter().all(|v| v.position[0] >= 9.5));
        assert!(vertices[..nv].iter().all(|v| v.color == [1.0, 0.0, 0.0]));
        // second mesh indices are rebased past the first mesh's vertices
        assert!(indices[ni..].iter().all(|&i| i as usize >= nv));
    }

    #[test]
    fn hidden_objects_are_not_uploaded() {
        let mut hidden = Object3D::mesh("h", Geometry::cuboid(Vec3::ONE));
        hidden.visible = false;
        let mut scene = Scene::new();
        let _ = scene.add(hidden);
        let (vertices, indices) = collect_meshes(&scene);
        assert!(vertices.is_empty() && indices.is_empty());
    }

    #[test]
    fn normals_survive_non_uniform_scale() {
        let mut scene = Scene::new();
        let _ = scene.add(
            Object3D::mesh("flat", Geometry::cuboid(Vec3::ONE))
                .with_scale(Vec3::new(4.0, 1.0, 1.0)),
        );
        let (vertices, _) = collect_meshes(&scene);
        for v in &vertices {
            let n = Vec3::from_array(v.normal);
            assert!((n.length() - 1.0).abs() < 1e-5);
        }
    }
}
