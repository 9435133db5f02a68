//! wgpu rendering of the sky, floor and model parts
//!
//! Pipelines and buffers are created lazily from the device handed to the
//! egui paint callback. Model geometry is uploaded once per load generation;
//! uniforms are rewritten every frame from the `FrameScene` snapshot.

use std::mem;
use std::num::NonZeroU64;
use std::sync::Arc;

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};
use log::{debug, info};
use wgpu::util::DeviceExt;

use super::config::GraphicsConfig;
use crate::constants::gpu::{DRAW_UNIFORM_STRIDE, INITIAL_DRAW_CAPACITY};
use crate::scene::{Material, MeshData, MeshLibrary, Vertex};
use crate::viewport::FrameScene;

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub struct GlobalUniforms {
    pub view_proj: [[f32; 4]; 4],
    pub inv_view_proj: [[f32; 4]; 4],
    pub camera_position: [f32; 4],
    pub sun_direction: [f32; 4],
    pub sun_color: [f32; 4],
    pub light_direction: [f32; 4],
    pub light_color: [f32; 4],
    pub hemi_sky: [f32; 4],
    pub hemi_ground: [f32; 4],
    pub fog_color: [f32; 4],
    pub fog_range: [f32; 4],
    pub sky_zenith: [f32; 4],
    pub sky_horizon: [f32; 4],
    pub hemi_direction: [f32; 4],
}

fn vec4(rgb: [f32; 3], w: f32) -> [f32; 4] {
    [rgb[0], rgb[1], rgb[2], w]
}

impl GlobalUniforms {
    pub fn from_frame(frame: &FrameScene) -> Self {
        let env = &frame.environment;
        let gradient = env.sky.gradient();
        Self {
            view_proj: frame.view_proj.to_cols_array_2d(),
            inv_view_proj: frame.inv_view_proj.to_cols_array_2d(),
            camera_position: frame.camera_position.extend(1.0).to_array(),
            sun_direction: env.sky.sun_direction().extend(gradient.sun_glow).to_array(),
            sun_color: vec4(gradient.sun_color, 1.0),
            light_direction: env.directional.direction().extend(env.directional.intensity).to_array(),
            light_color: vec4(env.directional.color, 1.0),
            hemi_sky: vec4(env.hemisphere.sky_color, env.hemisphere.intensity),
            hemi_ground: vec4(env.hemisphere.ground_color, env.hemisphere.intensity),
            fog_color: vec4(env.fog.color, 1.0),
            fog_range: [env.fog.near, env.fog.far, 0.0, 0.0],
            sky_zenith: vec4(gradient.zenith, 1.0),
            sky_horizon: vec4(gradient.horizon, 1.0),
            hemi_direction: env.hemisphere.direction().extend(0.0).to_array(),
        }
    }
}

/// Per-draw block, padded to the dynamic offset stride
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub struct DrawUniforms {
    pub model: [[f32; 4]; 4],
    pub normal_matrix: [[f32; 4]; 4],
    pub color: [f32; 4],
    pub params: [f32; 4],
    pub _padding: [[f32; 4]; 6],
}

const _: () = assert!(mem::size_of::<DrawUniforms>() as u64 == DRAW_UNIFORM_STRIDE);

impl DrawUniforms {
    pub fn new(model: Mat4, material: &Material) -> Self {
        let normal_matrix = if model.determinant().abs() > f32::EPSILON {
            model.inverse().transpose()
        } else {
            model
        };
        let [r, g, b, _] = material.base_color;
        Self {
            model: model.to_cols_array_2d(),
            normal_matrix: normal_matrix.to_cols_array_2d(),
            color: [r, g, b, material.effective_alpha()],
            params: [material.metallic, material.roughness, 0.0, 0.0],
            _padding: [[0.0; 4]; 6],
        }
    }
}

/// Which pipeline a material is drawn with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawPass {
    Opaque,
    Translucent,
    Wireframe,
}

impl DrawPass {
    pub fn for_material(material: &Material) -> Self {
        if material.wireframe {
            DrawPass::Wireframe
        } else if material.transparent {
            DrawPass::Translucent
        } else {
            DrawPass::Opaque
        }
    }
}

/// Model meshes tagged with the load that produced them
#[derive(Debug, Clone)]
pub struct ModelGeometry {
    pub generation: u64,
    pub meshes: Arc<MeshLibrary>,
}

struct GpuMesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    edge_buffer: Option<wgpu::Buffer>,
    edge_count: u32,
}

impl GpuMesh {
    fn upload(device: &wgpu::Device, label: &str, mesh: &MeshData) -> Option<Self> {
        if mesh.vertices.is_empty() || mesh.indices.is_empty() {
            return None;
        }
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{} Vertices", label)),
            contents: bytemuck::cast_slice(&mesh.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{} Indices", label)),
            contents: bytemuck::cast_slice(&mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        let edge_buffer = (!mesh.edge_indices.is_empty()).then(|| {
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{} Edges", label)),
                contents: bytemuck::cast_slice(&mesh.edge_indices),
                usage: wgpu::BufferUsages::INDEX,
            })
        });
        Some(Self {
            vertex_buffer,
            index_buffer,
            index_count: mesh.indices.len() as u32,
            edge_buffer,
            edge_count: mesh.edge_indices.len() as u32,
        })
    }
}

fn vertex_layout() -> wgpu::VertexBufferLayout<'static> {
    const ATTRIBUTES: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];
    wgpu::VertexBufferLayout {
        array_stride: mem::size_of::<Vertex>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &ATTRIBUTES,
    }
}

/// Device resources; rebuilt if the target format changes
struct GpuResources {
    config: GraphicsConfig,
    sky_pipeline: wgpu::RenderPipeline,
    opaque_pipeline: wgpu::RenderPipeline,
    translucent_pipeline: wgpu::RenderPipeline,
    wireframe_pipeline: wgpu::RenderPipeline,
    global_buffer: wgpu::Buffer,
    global_bind_group: wgpu::BindGroup,
    draw_layout: wgpu::BindGroupLayout,
    draw_buffer: wgpu::Buffer,
    draw_bind_group: wgpu::BindGroup,
    draw_capacity: usize,
    floor: Option<GpuMesh>,
    meshes: Vec<Option<GpuMesh>>,
    generation: Option<u64>,
}

impl GpuResources {
    fn new(device: &wgpu::Device, config: GraphicsConfig) -> Self {
        info!("Creating scene pipelines for {:?}", config.target_format);

        let global_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Scene Globals Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });
        let draw_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Scene Draw Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: true,
                    min_binding_size: NonZeroU64::new(DRAW_UNIFORM_STRIDE),
                },
                count: None,
            }],
        });

        let global_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Scene Globals"),
            size: mem::size_of::<GlobalUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let global_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Scene Globals Bind Group"),
            layout: &global_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: global_buffer.as_entire_binding(),
            }],
        });
        let (draw_buffer, draw_bind_group) = create_draw_buffer(device, &draw_layout, INITIAL_DRAW_CAPACITY);

        let scene_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Scene Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/scene.wgsl").into()),
        });
        let sky_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Sky Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/sky.wgsl").into()),
        });

        let sky_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Sky Pipeline Layout"),
            bind_group_layouts: &[&global_layout],
            push_constant_ranges: &[],
        });
        let mesh_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Mesh Pipeline Layout"),
            bind_group_layouts: &[&global_layout, &draw_layout],
            push_constant_ranges: &[],
        });

        let sky_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Sky Pipeline"),
            layout: Some(&sky_layout),
            vertex: wgpu::VertexState {
                module: &sky_shader,
                entry_point: Some("vs_main"),
                compilation_options: wgpu::PipelineCompilationOptions::default(),
                buffers: &[],
            },
            fragment: Some(wgpu::FragmentState {
                module: &sky_shader,
                entry_point: Some("fs_main"),
                compilation_options: wgpu::PipelineCompilationOptions::default(),
                targets: &[Some(config.color_target_state())],
            }),
            primitive: wgpu::PrimitiveState::default(),
            depth_stencil: Some(config.depth_state(false, wgpu::CompareFunction::Always)),
            multisample: config.multisample_state(),
            multiview: None,
            cache: None,
        });

        let mesh_pipeline = |label: &str, fragment: &str, topology: wgpu::PrimitiveTopology, depth_write: bool| {
            device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some(label),
                layout: Some(&mesh_layout),
                vertex: wgpu::VertexState {
                    module: &scene_shader,
                    entry_point: Some("vs_main"),
                    compilation_options: wgpu::PipelineCompilationOptions::default(),
                    buffers: &[vertex_layout()],
                },
                fragment: Some(wgpu::FragmentState {
                    module: &scene_shader,
                    entry_point: Some(fragment),
                    compilation_options: wgpu::PipelineCompilationOptions::default(),
                    targets: &[Some(config.color_target_state())],
                }),
                primitive: wgpu::PrimitiveState {
                    topology,
                    strip_index_format: None,
                    front_face: wgpu::FrontFace::Ccw,
                    cull_mode: None,
                    unclipped_depth: false,
                    polygon_mode: wgpu::PolygonMode::Fill,
                    conservative: false,
                },
                depth_stencil: Some(config.depth_state(depth_write, wgpu::CompareFunction::LessEqual)),
                multisample: config.multisample_state(),
                multiview: None,
                cache: None,
            })
        };

        let opaque_pipeline = mesh_pipeline("Opaque Mesh Pipeline", "fs_lit", wgpu::PrimitiveTopology::TriangleList, true);
        let translucent_pipeline =
            mesh_pipeline("Translucent Mesh Pipeline", "fs_lit", wgpu::PrimitiveTopology::TriangleList, false);
        let wireframe_pipeline = mesh_pipeline("Wireframe Pipeline", "fs_flat", wgpu::PrimitiveTopology::LineList, false);

        Self {
            config,
            sky_pipeline,
            opaque_pipeline,
            translucent_pipeline,
            wireframe_pipeline,
            global_buffer,
            global_bind_group,
            draw_layout,
            draw_buffer,
            draw_bind_group,
            draw_capacity: INITIAL_DRAW_CAPACITY,
            floor: GpuMesh::upload(device, "Floor", &MeshData::plane(1.0)),
            meshes: Vec::new(),
            generation: None,
        }
    }

    fn upload_meshes(&mut self, device: &wgpu::Device, geometry: &ModelGeometry) {
        self.meshes = geometry
            .meshes
            .iter()
            .map(|(id, mesh)| GpuMesh::upload(device, &format!("Mesh {}", id.0), mesh))
            .collect();
        self.generation = Some(geometry.generation);
        info!("Uploaded {} meshes (generation {})", self.meshes.len(), geometry.generation);
    }

    fn write_draws(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, frame: &FrameScene) {
        let slots = frame.draws.len() + 1;
        if slots > self.draw_capacity {
            let capacity = slots.next_power_of_two();
            debug!("Growing draw uniform buffer to {} slots", capacity);
            let (buffer, bind_group) = create_draw_buffer(device, &self.draw_layout, capacity);
            self.draw_buffer = buffer;
            self.draw_bind_group = bind_group;
            self.draw_capacity = capacity;
        }

        let floor = &frame.environment.floor;
        let floor_model = Mat4::from_translation(Vec3::new(0.0, floor.height, 0.0)) * Mat4::from_scale(Vec3::splat(floor.size));
        let floor_material = Material::opaque([floor.color[0], floor.color[1], floor.color[2], 1.0]);

        let mut uniforms = Vec::with_capacity(slots);
        uniforms.push(DrawUniforms::new(floor_model, &floor_material));
        uniforms.extend(frame.draws.iter().map(|draw| DrawUniforms::new(draw.model, &draw.material)));
        queue.write_buffer(&self.draw_buffer, 0, bytemuck::cast_slice(&uniforms));
    }
}

fn create_draw_buffer(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    capacity: usize,
) -> (wgpu::Buffer, wgpu::BindGroup) {
    let buffer = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("Scene Draws"),
        size: capacity as u64 * DRAW_UNIFORM_STRIDE,
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });
    let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("Scene Draws Bind Group"),
        layout,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                buffer: &buffer,
                offset: 0,
                size: NonZeroU64::new(DRAW_UNIFORM_STRIDE),
            }),
        }],
    });
    (buffer, bind_group)
}

/// 3D renderer for the model viewport
#[derive(Default)]
pub struct SceneRenderer {
    resources: Option<GpuResources>,
}

impl std::fmt::Debug for SceneRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SceneRenderer")
            .field("initialized", &self.resources.is_some())
            .field("generation", &self.resources.as_ref().and_then(|r| r.generation))
            .finish()
    }
}

impl SceneRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create resources if needed, upload new geometry and write uniforms
    pub fn prepare(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        target_format: wgpu::TextureFormat,
        frame: &FrameScene,
        geometry: Option<&ModelGeometry>,
    ) {
        if self.resources.as_ref().map(|r| r.config.target_format) != Some(target_format) {
            self.resources = None;
        }
        let resources = self
            .resources
            .get_or_insert_with(|| GpuResources::new(device, GraphicsConfig::for_target(target_format)));

        match geometry {
            Some(geometry) if resources.generation != Some(geometry.generation) => {
                resources.upload_meshes(device, geometry);
            }
            None if resources.generation.is_some() => {
                resources.meshes.clear();
                resources.generation = None;
            }
            _ => {}
        }

        queue.write_buffer(
            &resources.global_buffer,
            0,
            bytemuck::cast_slice(&[GlobalUniforms::from_frame(frame)]),
        );
        resources.write_draws(device, queue, frame);
    }

    /// Draw sky, floor and parts into the egui render pass
    pub fn paint(&self, render_pass: &mut wgpu::RenderPass<'static>, frame: &FrameScene) {
        let Some(resources) = &self.resources else {
            return;
        };

        render_pass.set_bind_group(0, &resources.global_bind_group, &[]);
        render_pass.set_pipeline(&resources.sky_pipeline);
        render_pass.draw(0..3, 0..1);

        if let Some(floor) = &resources.floor {
            render_pass.set_pipeline(&resources.opaque_pipeline);
            render_pass.set_bind_group(1, &resources.draw_bind_group, &[0]);
            render_pass.set_vertex_buffer(0, floor.vertex_buffer.slice(..));
            render_pass.set_index_buffer(floor.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
            render_pass.draw_indexed(0..floor.index_count, 0, 0..1);
        }

        for (i, draw) in frame.draws.iter().enumerate() {
            let slot = i + 1;
            if slot >= resources.draw_capacity {
                break;
            }
            let Some(Some(mesh)) = resources.meshes.get(draw.mesh.0) else {
                continue;
            };
            let (pipeline, index_buffer, count) = match DrawPass::for_material(&draw.material) {
                DrawPass::Opaque => (&resources.opaque_pipeline, &mesh.index_buffer, mesh.index_count),
                DrawPass::Translucent => (&resources.translucent_pipeline, &mesh.index_buffer, mesh.index_count),
                DrawPass::Wireframe => match &mesh.edge_buffer {
                    Some(edges) => (&resources.wireframe_pipeline, edges, mesh.edge_count),
                    None => continue,
                },
            };
            let offset = (slot as u64 * DRAW_UNIFORM_STRIDE) as wgpu::DynamicOffset;
            render_pass.set_pipeline(pipeline);
            render_pass.set_bind_group(1, &resources.draw_bind_group, &[offset]);
            render_pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
            render_pass.set_index_buffer(index_buffer.slice(..), wgpu::IndexFormat::Uint32);
            render_pass.draw_indexed(0..count, 0, 0..1);
        }
    }
}
