//! WebGPU state for one scene resource set: surface, pipeline, the fixed
//! light rig, the floor, and the single content object's primitives.

use glam::Mat4;
use smallvec::SmallVec;
use web_sys as web;
use wgpu::util::DeviceExt;

use crate::assets::{DecodedImage, LoadedModel};
use crate::constants::{
    AMBIENT_LIGHT, CLEAR_COLOR, FILL_LIGHT_COLOR, FILL_LIGHT_DIR, KEY_LIGHT_COLOR, KEY_LIGHT_DIR,
};
use crate::mesh::{self, MeshData, MeshPart};

static SCENE_WGSL: &str = include_str!("../shaders/scene.wgsl");

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth24Plus;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct Vertex {
    position: [f32; 3],
    normal: [f32; 3],
    uv: [f32; 2],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct SceneUniforms {
    view_proj: [[f32; 4]; 4],
    ambient: [f32; 4],
    key_dir: [f32; 4],
    key_color: [f32; 4],
    fill_dir: [f32; 4],
    fill_color: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct ObjectUniforms {
    model: [[f32; 4]; 4],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct MaterialUniforms {
    base_color: [f32; 4],
}

/// One drawable primitive with its own buffers and material bind group.
/// Destroyed explicitly so disposal is observable, not just `Drop`.
struct Primitive {
    vertex_buf: wgpu::Buffer,
    index_buf: wgpu::Buffer,
    index_count: u32,
    material_buf: wgpu::Buffer,
    material_bg: wgpu::BindGroup,
    texture: Option<wgpu::Texture>,
    wants_texture: bool,
}

impl Primitive {
    fn destroy(self) {
        self.vertex_buf.destroy();
        self.index_buf.destroy();
        self.material_buf.destroy();
        if let Some(tex) = self.texture {
            tex.destroy();
        }
    }
}

pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    pipeline: wgpu::RenderPipeline,

    scene_buf: wgpu::Buffer,
    scene_bg: wgpu::BindGroup,
    object_bgl: wgpu::BindGroupLayout,
    material_bgl: wgpu::BindGroupLayout,
    content_model_buf: wgpu::Buffer,
    content_model_bg: wgpu::BindGroup,
    floor_model_buf: wgpu::Buffer,
    floor_model_bg: wgpu::BindGroup,

    sampler: wgpu::Sampler,
    white_tex: wgpu::Texture,
    white_view: wgpu::TextureView,
    depth_tex: wgpu::Texture,
    depth_view: wgpu::TextureView,

    floor: Option<Primitive>,
    content: SmallVec<[Primitive; 4]>,
    content_scale: f32,

    width: u32,
    height: u32,
}

impl<'a> GpuState<'a> {
    pub async fn new(canvas: &'a web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let width = canvas.width();
        let height = canvas.height();

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    // Default limits on web to avoid passing unknown fields to
                    // older WebGPU impls
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .unwrap_or(caps.formats[0]);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("scene_shader"),
            source: wgpu::ShaderSource::Wgsl(SCENE_WGSL.into()),
        });

        let scene_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("scene_bgl"),
            entries: &[uniform_entry(0, wgpu::ShaderStages::VERTEX_FRAGMENT)],
        });
        let object_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("object_bgl"),
            entries: &[uniform_entry(0, wgpu::ShaderStages::VERTEX)],
        });
        let material_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("material_bgl"),
            entries: &[
                uniform_entry(0, wgpu::ShaderStages::FRAGMENT),
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
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

        let scene_buf = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("scene_uniforms"),
            size: std::mem::size_of::<SceneUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let scene_bg = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("scene_bg"),
            layout: &scene_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: scene_buf.as_entire_binding(),
            }],
        });

        let identity = ObjectUniforms {
            model: Mat4::IDENTITY.to_cols_array_2d(),
        };
        let content_model_buf = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("content_model"),
            contents: bytemuck::bytes_of(&identity),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let floor_model_buf = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("floor_model"),
            contents: bytemuck::bytes_of(&identity),
            usage: wgpu::BufferUsages::UNIFORM,
        });
        let object_bg = |buf: &wgpu::Buffer, label: &str| {
            device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some(label),
                layout: &object_bgl,
                entries: &[wgpu::BindGroupEntry {
                    binding: 0,
                    resource: buf.as_entire_binding(),
                }],
            })
        };
        let content_model_bg = object_bg(&content_model_buf, "content_model_bg");
        let floor_model_bg = object_bg(&floor_model_buf, "floor_model_bg");

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("scene_pl"),
            bind_group_layouts: &[&scene_bgl, &object_bgl, &material_bgl],
            push_constant_ranges: &[],
        });
        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("scene_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<Vertex>() as u64,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3, 2 => Float32x2],
                }],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState::default(),
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            cache: None,
            multiview: None,
        });

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("linear_sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });
        let (white_tex, white_view) = create_rgba_texture(
            &device,
            &queue,
            "white_1x1",
            1,
            1,
            &[255, 255, 255, 255],
        );
        let (depth_tex, depth_view) = create_depth_texture(&device, width, height);

        let mut gpu = Self {
            surface,
            device,
            queue,
            config,
            pipeline,
            scene_buf,
            scene_bg,
            object_bgl,
            material_bgl,
            content_model_buf,
            content_model_bg,
            floor_model_buf,
            floor_model_bg,
            sampler,
            white_tex,
            white_view,
            depth_tex,
            depth_view,
            floor: None,
            content: SmallVec::new(),
            content_scale: 1.0,
            width,
            height,
        };
        gpu.floor = Some(gpu.upload_part(&mesh::floor_disc()));
        Ok(gpu)
    }

    /// Replace the content object with freshly uploaded parts. Any previous
    /// content is destroyed first.
    pub fn set_content(&mut self, parts: &[MeshPart], scale: f32) {
        self.clear_content();
        for part in parts {
            let prim = self.upload_part(part);
            self.content.push(prim);
        }
        self.content_scale = scale;
    }

    /// Replace the content object with a loaded model, textures included.
    pub fn set_model_content(&mut self, model: &LoadedModel) {
        self.clear_content();
        for part in &model.parts {
            let mut prim = self.upload_mesh(
                &part.mesh,
                part.base_color,
                part.texture.is_some(),
            );
            if let Some(img) = &part.texture {
                self.attach_texture(&mut prim, img);
            }
            self.content.push(prim);
        }
        self.content_scale = model.scale;
    }

    /// Destroy the current content object's geometry and materials.
    pub fn clear_content(&mut self) {
        for prim in self.content.drain(..) {
            prim.destroy();
        }
        self.content_scale = 1.0;
    }

    pub fn has_content(&self) -> bool {
        !self.content.is_empty()
    }

    /// Late-arriving artwork texture: applied to every primitive that was
    /// built expecting one and is still untextured.
    pub fn apply_content_texture(&mut self, img: &DecodedImage) {
        for i in 0..self.content.len() {
            if !self.content[i].wants_texture || self.content[i].texture.is_some() {
                continue;
            }
            let (tex, view) = create_rgba_texture(
                &self.device,
                &self.queue,
                "content_tex",
                img.width,
                img.height,
                &img.rgba,
            );
            let bg = material_bind_group(
                &self.device,
                &self.material_bgl,
                &self.content[i].material_buf,
                &view,
                &self.sampler,
            );
            self.content[i].texture = Some(tex);
            self.content[i].material_bg = bg;
        }
    }

    /// Re-apply the current surface configuration after a lost or outdated
    /// frame.
    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
            let (tex, view) = create_depth_texture(&self.device, width, height);
            self.depth_tex.destroy();
            self.depth_tex = tex;
            self.depth_view = view;
        }
    }

    pub fn render(&mut self, view_proj: Mat4, rotation_y: f32) -> Result<(), wgpu::SurfaceError> {
        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        self.queue.write_buffer(
            &self.scene_buf,
            0,
            bytemuck::bytes_of(&SceneUniforms {
                view_proj: view_proj.to_cols_array_2d(),
                ambient: AMBIENT_LIGHT,
                key_dir: dir4(KEY_LIGHT_DIR),
                key_color: KEY_LIGHT_COLOR,
                fill_dir: dir4(FILL_LIGHT_DIR),
                fill_color: FILL_LIGHT_COLOR,
            }),
        );
        let model = Mat4::from_rotation_y(rotation_y) * Mat4::from_scale(glam::Vec3::splat(self.content_scale));
        self.queue.write_buffer(
            &self.content_model_buf,
            0,
            bytemuck::bytes_of(&ObjectUniforms {
                model: model.to_cols_array_2d(),
            }),
        );

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("scene_encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: CLEAR_COLOR[0],
                            g: CLEAR_COLOR[1],
                            b: CLEAR_COLOR[2],
                            a: CLEAR_COLOR[3],
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_pipeline(&self.pipeline);
            rpass.set_bind_group(0, &self.scene_bg, &[]);
            if let Some(floor) = &self.floor {
                rpass.set_bind_group(1, &self.floor_model_bg, &[]);
                rpass.set_bind_group(2, &floor.material_bg, &[]);
                rpass.set_vertex_buffer(0, floor.vertex_buf.slice(..));
                rpass.set_index_buffer(floor.index_buf.slice(..), wgpu::IndexFormat::Uint32);
                rpass.draw_indexed(0..floor.index_count, 0, 0..1);
            }
            rpass.set_bind_group(1, &self.content_model_bg, &[]);
            for prim in &self.content {
                rpass.set_bind_group(2, &prim.material_bg, &[]);
                rpass.set_vertex_buffer(0, prim.vertex_buf.slice(..));
                rpass.set_index_buffer(prim.index_buf.slice(..), wgpu::IndexFormat::Uint32);
                rpass.draw_indexed(0..prim.index_count, 0, 0..1);
            }
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }

    /// Release everything this scene allocated on the device.
    pub fn destroy(&mut self) {
        self.clear_content();
        if let Some(floor) = self.floor.take() {
            floor.destroy();
        }
        self.depth_tex.destroy();
        self.white_tex.destroy();
        self.scene_buf.destroy();
        self.content_model_buf.destroy();
        self.floor_model_buf.destroy();
        self.device.destroy();
    }

    fn upload_part(&self, part: &MeshPart) -> Primitive {
        self.upload_mesh(&part.mesh, part.base_color, part.textured)
    }

    fn upload_mesh(&self, mesh: &MeshData, base_color: [f32; 4], wants_texture: bool) -> Primitive {
        let vertices: Vec<Vertex> = mesh
            .positions
            .iter()
            .zip(&mesh.normals)
            .zip(&mesh.uvs)
            .map(|((&position, &normal), &uv)| Vertex {
                position,
                normal,
                uv,
            })
            .collect();
        let vertex_buf = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("part_vb"),
                contents: bytemuck::cast_slice(&vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });
        let index_buf = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("part_ib"),
                contents: bytemuck::cast_slice(&mesh.indices),
                usage: wgpu::BufferUsages::INDEX,
            });
        let material_buf = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("part_material"),
                contents: bytemuck::bytes_of(&MaterialUniforms { base_color }),
                usage: wgpu::BufferUsages::UNIFORM,
            });
        let material_bg = material_bind_group(
            &self.device,
            &self.material_bgl,
            &material_buf,
            &self.white_view,
            &self.sampler,
        );
        Primitive {
            vertex_buf,
            index_buf,
            index_count: mesh.indices.len() as u32,
            material_buf,
            material_bg,
            texture: None,
            wants_texture,
        }
    }

    fn attach_texture(&self, prim: &mut Primitive, img: &DecodedImage) {
        let (tex, view) = create_rgba_texture(
            &self.device,
            &self.queue,
            "model_tex",
            img.width,
            img.height,
            &img.rgba,
        );
        prim.material_bg = material_bind_group(
            &self.device,
            &self.material_bgl,
            &prim.material_buf,
            &view,
            &self.sampler,
        );
        prim.texture = Some(tex);
    }
}

fn uniform_entry(binding: u32, visibility: wgpu::ShaderStages) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: None,
        },
        count: None,
    }
}

fn material_bind_group(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    material_buf: &wgpu::Buffer,
    texture_view: &wgpu::TextureView,
    sampler: &wgpu::Sampler,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("material_bg"),
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: material_buf.as_entire_binding(),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::TextureView(texture_view),
            },
            wgpu::BindGroupEntry {
                binding: 2,
                resource: wgpu::BindingResource::Sampler(sampler),
            },
        ],
    })
}

fn create_rgba_texture(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    label: &str,
    width: u32,
    height: u32,
    rgba: &[u8],
) -> (wgpu::Texture, wgpu::TextureView) {
    let size = wgpu::Extent3d {
        width,
        height,
        depth_or_array_layers: 1,
    };
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some(label),
        size,
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: wgpu::TextureFormat::Rgba8UnormSrgb,
        usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        view_formats: &[],
    });
    queue.write_texture(
        wgpu::TexelCopyTextureInfo {
            texture: &texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        rgba,
        wgpu::TexelCopyBufferLayout {
            offset: 0,
            bytes_per_row: Some(4 * width),
            rows_per_image: Some(height),
        },
        size,
    );
    let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
    (texture, view)
}

fn create_depth_texture(
    device: &wgpu::Device,
    width: u32,
    height: u32,
) -> (wgpu::Texture, wgpu::TextureView) {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("depth_tex"),
        size: wgpu::Extent3d {
            width: width.max(1),
            height: height.max(1),
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
    (texture, view)
}

fn dir4(d: [f32; 3]) -> [f32; 4] {
    [d[0], d[1], d[2], 0.0]
}
