use crate::context::{DEPTH_FORMAT, GpuContext};
use crate::shaders;
use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use retrowave_assets::{CubemapFaces, GRID_CELLS, MeshData, SceneMeshes, Vertex};
use retrowave_render::{BlendMode, DepthMode, DrawKind, FrameInputs, FramePlan};
use std::collections::HashMap;
use wgpu::util::DeviceExt;

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct DrawUniforms {
    projection: [[f32; 4]; 4],
    view: [[f32; 4]; 4],
    model: [[f32; 4]; 4],
    params: [f32; 4],
}

/// Vertex and index buffers of one uploaded mesh.
struct GpuMesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
}

impl GpuMesh {
    fn upload(device: &wgpu::Device, mesh: &MeshData) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{}_vertex_buffer", mesh.name)),
            contents: bytemuck::cast_slice(&mesh.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{}_index_buffer", mesh.name)),
            contents: bytemuck::cast_slice(&mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        Self {
            vertex_buffer,
            index_buffer,
            index_count: mesh.indices.len() as u32,
        }
    }
}

/// Per-kind resources: mesh plus its own uniform buffer and bind group.
struct DrawSlot {
    mesh: GpuMesh,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct PipelineKey {
    kind: DrawKind,
    depth: DepthMode,
    blend: BlendMode,
    wireframe: bool,
}

/// wgpu renderer for the retrowave scene.
pub struct RetrowaveRenderer {
    pipelines: HashMap<PipelineKey, wgpu::RenderPipeline>,
    slots: HashMap<DrawKind, DrawSlot>,
    depth_texture: wgpu::TextureView,
    msaa_texture: Option<wgpu::TextureView>,
    surface_format: wgpu::TextureFormat,
    sample_count: u32,
    wireframe_supported: bool,
}

impl RetrowaveRenderer {
    pub fn new(ctx: &GpuContext, meshes: &SceneMeshes, cubemap: &CubemapFaces) -> Self {
        let device = &ctx.device;
        let queue = &ctx.queue;
        let surface_format = ctx.format();
        let (width, height) = ctx.size();
        let sample_count = ctx.sample_count;
        let wireframe_supported = ctx.wireframe_supported;

        let cube_view = upload_cubemap(device, queue, cubemap);
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("skybox_sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("draw_bind_group_layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::Cube,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pipeline_layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let mut slots = HashMap::new();
        for (kind, mesh) in [
            (DrawKind::Grid, &meshes.grid),
            (DrawKind::Skybox, &meshes.skybox),
            (DrawKind::Sun, &meshes.quad),
        ] {
            let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
                label: Some(&format!("{kind:?}_uniforms")),
                size: std::mem::size_of::<DrawUniforms>() as u64,
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            });
            let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some(&format!("{kind:?}_bind_group")),
                layout: &bind_group_layout,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 0,
                        resource: uniform_buffer.as_entire_binding(),
                    },
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: wgpu::BindingResource::TextureView(&cube_view),
                    },
                    wgpu::BindGroupEntry {
                        binding: 2,
                        resource: wgpu::BindingResource::Sampler(&sampler),
                    },
                ],
            });
            slots.insert(
                kind,
                DrawSlot {
                    mesh: GpuMesh::upload(device, mesh),
                    uniform_buffer,
                    bind_group,
                },
            );
        }

        // Pipelines follow the depth/blend modes the frame plan asks for.
        let template = FramePlan::build(&FrameInputs {
            view: Mat4::IDENTITY,
            projection: Mat4::IDENTITY,
            params: Default::default(),
            elapsed: 0.0,
            wireframe: false,
        });
        let mut pipelines = HashMap::new();
        for draw in &template.draws {
            let (label, source, vs, fs) = match draw.kind {
                DrawKind::Grid => ("grid", shaders::GRID_SHADER, "vs_grid", "fs_grid"),
                DrawKind::Skybox => ("skybox", shaders::SKYBOX_SHADER, "vs_skybox", "fs_skybox"),
                DrawKind::Sun => ("sun", shaders::SUN_SHADER, "vs_sun", "fs_sun"),
            };
            let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some(&format!("{label}_shader")),
                source: wgpu::ShaderSource::Wgsl(source.into()),
            });
            let modes: &[bool] = if wireframe_supported {
                &[false, true]
            } else {
                &[false]
            };
            for &wireframe in modes {
                let key = PipelineKey {
                    kind: draw.kind,
                    depth: draw.depth,
                    blend: draw.blend,
                    wireframe,
                };
                let pipeline = create_pipeline(
                    device,
                    &pipeline_layout,
                    &module,
                    (vs, fs),
                    surface_format,
                    sample_count,
                    key,
                );
                pipelines.insert(key, pipeline);
            }
        }

        let depth_texture = create_depth_texture(device, width, height, sample_count);
        let msaa_texture =
            create_msaa_texture(device, surface_format, width, height, sample_count);

        Self {
            pipelines,
            slots,
            depth_texture,
            msaa_texture,
            surface_format,
            sample_count,
            wireframe_supported,
        }
    }

    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        self.depth_texture = create_depth_texture(device, width, height, self.sample_count);
        self.msaa_texture =
            create_msaa_texture(device, self.surface_format, width, height, self.sample_count);
    }

    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.surface_format
    }

    pub fn wireframe_supported(&self) -> bool {
        self.wireframe_supported
    }

    /// Execute one frame plan into `target`.
    ///
    /// Draws run in plan order inside a single pass that clears color and
    /// depth first. With MSAA the multisampled target resolves into `target`.
    pub fn render(
        &self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        target: &wgpu::TextureView,
        plan: &FramePlan,
    ) {
        let wireframe = plan.wireframe && self.wireframe_supported;

        for draw in &plan.draws {
            let Some(slot) = self.slots.get(&draw.kind) else {
                continue;
            };
            let uniforms = DrawUniforms {
                projection: plan.projection.to_cols_array_2d(),
                view: draw.view.to_cols_array_2d(),
                model: draw.model.to_cols_array_2d(),
                params: [draw.time, GRID_CELLS as f32, 0.0, 0.0],
            };
            queue.write_buffer(&slot.uniform_buffer, 0, bytemuck::bytes_of(&uniforms));
        }

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("render_encoder"),
        });

        let [r, g, b, a] = plan.clear_color.map(f64::from);
        let (color_view, resolve_target, store) = match &self.msaa_texture {
            Some(msaa) => (msaa, Some(target), wgpu::StoreOp::Discard),
            None => (target, None, wgpu::StoreOp::Store),
        };

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: color_view,
                    resolve_target,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color { r, g, b, a }),
                        store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                ..Default::default()
            });

            for draw in &plan.draws {
                let key = PipelineKey {
                    kind: draw.kind,
                    depth: draw.depth,
                    blend: draw.blend,
                    wireframe,
                };
                let (Some(pipeline), Some(slot)) =
                    (self.pipelines.get(&key), self.slots.get(&draw.kind))
                else {
                    tracing::warn!("no pipeline for {key:?}; skipping draw");
                    continue;
                };
                pass.set_pipeline(pipeline);
                pass.set_bind_group(0, &slot.bind_group, &[]);
                pass.set_vertex_buffer(0, slot.mesh.vertex_buffer.slice(..));
                pass.set_index_buffer(slot.mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                pass.draw_indexed(0..slot.mesh.index_count, 0, 0..1);
            }
        }

        queue.submit(std::iter::once(encoder.finish()));
    }
}

fn create_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    module: &wgpu::ShaderModule,
    (vs, fs): (&str, &str),
    format: wgpu::TextureFormat,
    sample_count: u32,
    key: PipelineKey,
) -> wgpu::RenderPipeline {
    let blend = match key.blend {
        BlendMode::Opaque => wgpu::BlendState::REPLACE,
        BlendMode::Alpha => wgpu::BlendState::ALPHA_BLENDING,
    };
    let depth_compare = match key.depth {
        DepthMode::Less => wgpu::CompareFunction::Less,
        DepthMode::LessEqual => wgpu::CompareFunction::LessEqual,
    };
    let polygon_mode = if key.wireframe {
        wgpu::PolygonMode::Line
    } else {
        wgpu::PolygonMode::Fill
    };

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(&format!("{:?}_pipeline{}", key.kind, if key.wireframe { "_wire" } else { "" })),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module,
            entry_point: Some(vs),
            compilation_options: Default::default(),
            buffers: &[wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<Vertex>() as u64,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &wgpu::vertex_attr_array![
                    0 => Float32x3,
                    1 => Float32x3,
                    2 => Float32x2,
                ],
            }],
        },
        fragment: Some(wgpu::FragmentState {
            module,
            entry_point: Some(fs),
            compilation_options: Default::default(),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(blend),
                write_mask: wgpu::ColorWrites::ALL,
            })],
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            // The skybox is seen from inside and the sun from both sides.
            cull_mode: None,
            polygon_mode,
            ..Default::default()
        },
        depth_stencil: Some(wgpu::DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled: true,
            depth_compare,
            stencil: Default::default(),
            bias: Default::default(),
        }),
        multisample: wgpu::MultisampleState {
            count: sample_count,
            ..Default::default()
        },
        multiview: None,
        cache: None,
    })
}

/// Upload six faces into a cube texture and return its cube view.
fn upload_cubemap(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    cubemap: &CubemapFaces,
) -> wgpu::TextureView {
    let size = wgpu::Extent3d {
        width: cubemap.size,
        height: cubemap.size,
        depth_or_array_layers: 6,
    };
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("skybox_cubemap"),
        size,
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: wgpu::TextureFormat::Rgba8UnormSrgb,
        usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        view_formats: &[],
    });

    for (layer, pixels) in cubemap.faces.iter().enumerate() {
        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d {
                    x: 0,
                    y: 0,
                    z: layer as u32,
                },
                aspect: wgpu::TextureAspect::All,
            },
            pixels,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * cubemap.size),
                rows_per_image: Some(cubemap.size),
            },
            wgpu::Extent3d {
                width: cubemap.size,
                height: cubemap.size,
                depth_or_array_layers: 1,
            },
        );
    }

    texture.create_view(&wgpu::TextureViewDescriptor {
        label: Some("skybox_cubemap_view"),
        dimension: Some(wgpu::TextureViewDimension::Cube),
        array_layer_count: Some(6),
        ..Default::default()
    })
}

fn create_depth_texture(
    device: &wgpu::Device,
    width: u32,
    height: u32,
    sample_count: u32,
) -> wgpu::TextureView {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("depth_texture"),
        size: wgpu::Extent3d {
            width: width.max(1),
            height: height.max(1),
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count,
        dimension: wgpu::TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    texture.create_view(&Default::default())
}

fn create_msaa_texture(
    device: &wgpu::Device,
    format: wgpu::TextureFormat,
    width: u32,
    height: u32,
    sample_count: u32,
) -> Option<wgpu::TextureView> {
    if sample_count <= 1 {
        return None;
    }
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("msaa_color_texture"),
        size: wgpu::Extent3d {
            width: width.max(1),
            height: height.max(1),
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count,
        dimension: wgpu::TextureDimension::D2,
        format,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    Some(texture.create_view(&Default::default()))
}
