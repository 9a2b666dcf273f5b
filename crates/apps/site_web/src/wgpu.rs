#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Globals {
    pub view_proj: [[f32; 4]; 4],
    pub mesh_model: [[f32; 4]; 4],
    pub glow_model: [[f32; 4]; 4],
    pub field_model: [[f32; 4]; 4],
    pub light_dir_a: [f32; 3],
    pub _pad0: f32,
    pub light_dir_b: [f32; 3],
    pub _pad1: f32,
}

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct StripVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ParticleVertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
    pub size: f32,
}

#[cfg(target_arch = "wasm32")]
mod imp {
    use ::wgpu::util::DeviceExt;
    use std::borrow::Cow;
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;

    use super::{Globals, ParticleVertex, StripVertex};
    use gpu::tessellate::StripBuffers;

    #[derive(Debug)]
    pub struct WgpuContext {
        pub _instance: &'static ::wgpu::Instance,
        pub surface: ::wgpu::Surface<'static>,
        pub device: ::wgpu::Device,
        pub queue: ::wgpu::Queue,
        pub config: ::wgpu::SurfaceConfiguration,
        pub _canvas: web_sys::HtmlCanvasElement,
        pub surface_pipeline: ::wgpu::RenderPipeline,
        pub edge_pipeline: ::wgpu::RenderPipeline,
        pub glow_pipeline: ::wgpu::RenderPipeline,
        pub particles_pipeline: ::wgpu::RenderPipeline,
        pub globals_buffer: ::wgpu::Buffer,
        pub globals_bind_group: ::wgpu::BindGroup,
        pub depth_view: ::wgpu::TextureView,
        pub strip_vertex_buffer: ::wgpu::Buffer,
        pub strip_index_buffer: ::wgpu::Buffer,
        pub strip_index_count: u32,
        pub edge_index_buffer: ::wgpu::Buffer,
        pub edge_index_count: u32,
        pub particle_buffer: ::wgpu::Buffer,
        pub particle_count: u32,
    }

    const SURFACE_SHADER: &str = r#"
struct Globals {
    view_proj: mat4x4<f32>,
    mesh_model: mat4x4<f32>,
    glow_model: mat4x4<f32>,
    field_model: mat4x4<f32>,
    light_dir_a: vec3<f32>,
    _pad0: f32,
    light_dir_b: vec3<f32>,
    _pad1: f32,
};

@group(0) @binding(0)
var<storage, read> globals: Globals;

struct VsOut {
    @builtin(position) pos: vec4<f32>,
    @location(0) normal: vec3<f32>,
};

@vertex
fn vs_main(@location(0) position: vec3<f32>, @location(1) normal: vec3<f32>) -> VsOut {
    let world = globals.mesh_model * vec4<f32>(position, 1.0);
    let n = (globals.mesh_model * vec4<f32>(normal, 0.0)).xyz;
    return VsOut(globals.view_proj * world, n);
}

@fragment
fn fs_main(fs_in: VsOut) -> @location(0) vec4<f32> {
    let n = normalize(fs_in.normal);
    // The strip is one-sided: normal sense flips across the seam, so shade
    // with abs() instead of clamping to a front face.
    let la = abs(dot(n, normalize(globals.light_dir_a)));
    let lb = abs(dot(n, normalize(globals.light_dir_b)));

    let ambient = vec3<f32>(0.102, 0.102, 0.180) * 0.3;
    let indigo = vec3<f32>(0.388, 0.400, 0.945);
    let cyan = vec3<f32>(0.024, 0.714, 0.831);
    let amber = vec3<f32>(0.961, 0.620, 0.043);

    // Fixed rig: two directionals plus the amber accent treated as a weak
    // on-axis fill.
    let fill = abs(n.z);
    let color = ambient
        + indigo * (0.8 * la)
        + cyan * (0.6 * lb)
        + amber * (0.4 * 0.25 * fill);
    return vec4<f32>(color, 0.6);
}
"#;

    const EDGE_SHADER: &str = r#"
struct Globals {
    view_proj: mat4x4<f32>,
    mesh_model: mat4x4<f32>,
    glow_model: mat4x4<f32>,
    field_model: mat4x4<f32>,
    light_dir_a: vec3<f32>,
    _pad0: f32,
    light_dir_b: vec3<f32>,
    _pad1: f32,
};

@group(0) @binding(0)
var<storage, read> globals: Globals;

@vertex
fn vs_main(@location(0) position: vec3<f32>, @location(1) normal: vec3<f32>) -> @builtin(position) vec4<f32> {
    return globals.view_proj * globals.mesh_model * vec4<f32>(position, 1.0);
}

@fragment
fn fs_main() -> @location(0) vec4<f32> {
    // Cyan wireframe overlay.
    return vec4<f32>(0.024, 0.714, 0.831, 0.2);
}
"#;

    const GLOW_SHADER: &str = r#"
struct Globals {
    view_proj: mat4x4<f32>,
    mesh_model: mat4x4<f32>,
    glow_model: mat4x4<f32>,
    field_model: mat4x4<f32>,
    light_dir_a: vec3<f32>,
    _pad0: f32,
    light_dir_b: vec3<f32>,
    _pad1: f32,
};

@group(0) @binding(0)
var<storage, read> globals: Globals;

@vertex
fn vs_main(@location(0) position: vec3<f32>, @location(1) normal: vec3<f32>) -> @builtin(position) vec4<f32> {
    return globals.view_proj * globals.glow_model * vec4<f32>(position, 1.0);
}

@fragment
fn fs_main() -> @location(0) vec4<f32> {
    // Faint amber halo drawn on the back faces only.
    return vec4<f32>(0.961, 0.620, 0.043, 0.1);
}
"#;

    const PARTICLES_SHADER: &str = r#"
struct Globals {
    view_proj: mat4x4<f32>,
    mesh_model: mat4x4<f32>,
    glow_model: mat4x4<f32>,
    field_model: mat4x4<f32>,
    light_dir_a: vec3<f32>,
    _pad0: f32,
    light_dir_b: vec3<f32>,
    _pad1: f32,
};

@group(0) @binding(0)
var<storage, read> globals: Globals;

struct VsOut {
    @builtin(position) pos: vec4<f32>,
    @location(0) color: vec3<f32>,
    @location(1) brightness: f32,
};

@vertex
fn vs_main(
    @location(0) position: vec3<f32>,
    @location(1) color: vec3<f32>,
    @location(2) size: f32,
) -> VsOut {
    // Point primitives are a single pixel here, so the size attribute
    // modulates brightness instead of footprint.
    let brightness = clamp(size / 2.5, 0.2, 1.0);
    return VsOut(
        globals.view_proj * globals.field_model * vec4<f32>(position, 1.0),
        color,
        brightness,
    );
}

@fragment
fn fs_main(fs_in: VsOut) -> @location(0) vec4<f32> {
    return vec4<f32>(fs_in.color * fs_in.brightness, 0.6);
}
"#;

    fn create_depth_view(
        device: &::wgpu::Device,
        config: &::wgpu::SurfaceConfiguration,
    ) -> ::wgpu::TextureView {
        let tex = device.create_texture(&::wgpu::TextureDescriptor {
            label: Some("site-depth"),
            size: ::wgpu::Extent3d {
                width: config.width.max(1),
                height: config.height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: ::wgpu::TextureDimension::D2,
            format: ::wgpu::TextureFormat::Depth24Plus,
            usage: ::wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        tex.create_view(&::wgpu::TextureViewDescriptor::default())
    }

    fn strip_vertex_layout() -> ::wgpu::VertexBufferLayout<'static> {
        ::wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<StripVertex>() as ::wgpu::BufferAddress,
            step_mode: ::wgpu::VertexStepMode::Vertex,
            attributes: &[
                ::wgpu::VertexAttribute {
                    format: ::wgpu::VertexFormat::Float32x3,
                    offset: 0,
                    shader_location: 0,
                },
                ::wgpu::VertexAttribute {
                    format: ::wgpu::VertexFormat::Float32x3,
                    offset: 12,
                    shader_location: 1,
                },
            ],
        }
    }

    pub async fn init_wgpu_from_canvas_id(
        canvas_id: &str,
        strip: &StripBuffers,
        particle_capacity: u32,
    ) -> Result<WgpuContext, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("window missing"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("document missing"))?;
        let canvas_elem = document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| JsValue::from_str("canvas missing"))?
            .dyn_into::<web_sys::HtmlCanvasElement>()?;

        let width = canvas_elem.width();
        let height = canvas_elem.height();

        // IMPORTANT: `wgpu::Surface` must not outlive its `wgpu::Instance`.
        // To avoid UB, we leak the instance for the lifetime of the app.
        //
        // Prefer WebGPU when available, but allow WebGL as a fallback.
        let instance: &'static ::wgpu::Instance = Box::leak(Box::new(::wgpu::Instance::new(
            &::wgpu::InstanceDescriptor {
                backends: ::wgpu::Backends::BROWSER_WEBGPU | ::wgpu::Backends::GL,
                ..Default::default()
            },
        )));

        let surface = instance
            .create_surface(::wgpu::SurfaceTarget::Canvas(canvas_elem.clone()))
            .map_err(|e| JsValue::from_str(&format!("surface error: {e}")))?;

        let adapter = instance
            .request_adapter(&::wgpu::RequestAdapterOptions {
                power_preference: ::wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| JsValue::from_str(&format!("adapter error: {e}")))?;

        let (device, queue) = adapter
            .request_device(&::wgpu::DeviceDescriptor {
                label: Some("site-wgpu-device"),
                required_features: ::wgpu::Features::empty(),
                required_limits: ::wgpu::Limits::downlevel_webgl2_defaults(),
                ..Default::default()
            })
            .await
            .map_err(|e| JsValue::from_str(&format!("device error: {e}")))?;

        let surface_caps = surface.get_capabilities(&adapter);
        let format = surface_caps
            .formats
            .iter()
            .cloned()
            .find(|f| f.is_srgb())
            .unwrap_or(surface_caps.formats[0]);

        // Transparent clear: the page background shows through the scene.
        let alpha_mode = surface_caps
            .alpha_modes
            .iter()
            .cloned()
            .find(|m| *m == ::wgpu::CompositeAlphaMode::PreMultiplied)
            .unwrap_or(surface_caps.alpha_modes[0]);

        let config = ::wgpu::SurfaceConfiguration {
            usage: ::wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            desired_maximum_frame_latency: 2,
            present_mode: ::wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
        };
        surface.configure(&device, &config);

        let depth_view = create_depth_view(&device, &config);

        let surface_shader = device.create_shader_module(::wgpu::ShaderModuleDescriptor {
            label: Some("site-surface-shader"),
            source: ::wgpu::ShaderSource::Wgsl(Cow::Borrowed(SURFACE_SHADER)),
        });
        let edge_shader = device.create_shader_module(::wgpu::ShaderModuleDescriptor {
            label: Some("site-edge-shader"),
            source: ::wgpu::ShaderSource::Wgsl(Cow::Borrowed(EDGE_SHADER)),
        });
        let glow_shader = device.create_shader_module(::wgpu::ShaderModuleDescriptor {
            label: Some("site-glow-shader"),
            source: ::wgpu::ShaderSource::Wgsl(Cow::Borrowed(GLOW_SHADER)),
        });
        let particles_shader = device.create_shader_module(::wgpu::ShaderModuleDescriptor {
            label: Some("site-particles-shader"),
            source: ::wgpu::ShaderSource::Wgsl(Cow::Borrowed(PARTICLES_SHADER)),
        });

        let globals_buffer = device.create_buffer(&::wgpu::BufferDescriptor {
            label: Some("site-globals"),
            size: std::mem::size_of::<Globals>() as u64,
            usage: ::wgpu::BufferUsages::STORAGE | ::wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let globals_bind_group_layout =
            device.create_bind_group_layout(&::wgpu::BindGroupLayoutDescriptor {
                label: Some("site-globals-bgl"),
                entries: &[::wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: ::wgpu::ShaderStages::VERTEX_FRAGMENT,
                    ty: ::wgpu::BindingType::Buffer {
                        ty: ::wgpu::BufferBindingType::Storage { read_only: true },
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            });

        let globals_bind_group = device.create_bind_group(&::wgpu::BindGroupDescriptor {
            label: Some("site-globals-bg"),
            layout: &globals_bind_group_layout,
            entries: &[::wgpu::BindGroupEntry {
                binding: 0,
                resource: globals_buffer.as_entire_binding(),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&::wgpu::PipelineLayoutDescriptor {
            label: Some("site-pipeline-layout"),
            bind_group_layouts: &[&globals_bind_group_layout],
            immediate_size: 0,
        });

        let surface_pipeline = device.create_render_pipeline(&::wgpu::RenderPipelineDescriptor {
            label: Some("site-surface-pipeline"),
            layout: Some(&pipeline_layout),
            vertex: ::wgpu::VertexState {
                module: &surface_shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[strip_vertex_layout()],
            },
            fragment: Some(::wgpu::FragmentState {
                module: &surface_shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(::wgpu::ColorTargetState {
                    format: config.format,
                    blend: Some(::wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: ::wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: ::wgpu::PrimitiveState {
                topology: ::wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: ::wgpu::FrontFace::Ccw,
                // The strip is double-sided; culling either winding would
                // remove half of it.
                cull_mode: None,
                polygon_mode: ::wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: Some(::wgpu::DepthStencilState {
                format: ::wgpu::TextureFormat::Depth24Plus,
                depth_write_enabled: true,
                depth_compare: ::wgpu::CompareFunction::Less,
                stencil: ::wgpu::StencilState::default(),
                bias: ::wgpu::DepthBiasState::default(),
            }),
            multisample: ::wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        let edge_pipeline = device.create_render_pipeline(&::wgpu::RenderPipelineDescriptor {
            label: Some("site-edge-pipeline"),
            layout: Some(&pipeline_layout),
            vertex: ::wgpu::VertexState {
                module: &edge_shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[strip_vertex_layout()],
            },
            fragment: Some(::wgpu::FragmentState {
                module: &edge_shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(::wgpu::ColorTargetState {
                    format: config.format,
                    blend: Some(::wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: ::wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: ::wgpu::PrimitiveState {
                topology: ::wgpu::PrimitiveTopology::LineList,
                strip_index_format: None,
                front_face: ::wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: ::wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            // Depthless overlay; depth state on lines is a known source of
            // backend-specific issues on WebGL.
            depth_stencil: None,
            multisample: ::wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        let glow_pipeline = device.create_render_pipeline(&::wgpu::RenderPipelineDescriptor {
            label: Some("site-glow-pipeline"),
            layout: Some(&pipeline_layout),
            vertex: ::wgpu::VertexState {
                module: &glow_shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[strip_vertex_layout()],
            },
            fragment: Some(::wgpu::FragmentState {
                module: &glow_shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(::wgpu::ColorTargetState {
                    format: config.format,
                    blend: Some(::wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: ::wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: ::wgpu::PrimitiveState {
                topology: ::wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: ::wgpu::FrontFace::Ccw,
                // Back faces only: the halo reads as a rim behind the strip.
                cull_mode: Some(::wgpu::Face::Front),
                polygon_mode: ::wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: Some(::wgpu::DepthStencilState {
                format: ::wgpu::TextureFormat::Depth24Plus,
                depth_write_enabled: false,
                depth_compare: ::wgpu::CompareFunction::LessEqual,
                stencil: ::wgpu::StencilState::default(),
                bias: ::wgpu::DepthBiasState::default(),
            }),
            multisample: ::wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        let particles_pipeline =
            device.create_render_pipeline(&::wgpu::RenderPipelineDescriptor {
                label: Some("site-particles-pipeline"),
                layout: Some(&pipeline_layout),
                vertex: ::wgpu::VertexState {
                    module: &particles_shader,
                    entry_point: Some("vs_main"),
                    compilation_options: Default::default(),
                    buffers: &[::wgpu::VertexBufferLayout {
                        array_stride: std::mem::size_of::<ParticleVertex>()
                            as ::wgpu::BufferAddress,
                        step_mode: ::wgpu::VertexStepMode::Vertex,
                        attributes: &[
                            ::wgpu::VertexAttribute {
                                format: ::wgpu::VertexFormat::Float32x3,
                                offset: 0,
                                shader_location: 0,
                            },
                            ::wgpu::VertexAttribute {
                                format: ::wgpu::VertexFormat::Float32x3,
                                offset: 12,
                                shader_location: 1,
                            },
                            ::wgpu::VertexAttribute {
                                format: ::wgpu::VertexFormat::Float32,
                                offset: 24,
                                shader_location: 2,
                            },
                        ],
                    }],
                },
                fragment: Some(::wgpu::FragmentState {
                    module: &particles_shader,
                    entry_point: Some("fs_main"),
                    compilation_options: Default::default(),
                    targets: &[Some(::wgpu::ColorTargetState {
                        format: config.format,
                        // Additive: overlapping particles brighten.
                        blend: Some(::wgpu::BlendState {
                            color: ::wgpu::BlendComponent {
                                src_factor: ::wgpu::BlendFactor::SrcAlpha,
                                dst_factor: ::wgpu::BlendFactor::One,
                                operation: ::wgpu::BlendOperation::Add,
                            },
                            alpha: ::wgpu::BlendComponent {
                                src_factor: ::wgpu::BlendFactor::One,
                                dst_factor: ::wgpu::BlendFactor::One,
                                operation: ::wgpu::BlendOperation::Add,
                            },
                        }),
                        write_mask: ::wgpu::ColorWrites::ALL,
                    })],
                }),
                primitive: ::wgpu::PrimitiveState {
                    topology: ::wgpu::PrimitiveTopology::PointList,
                    strip_index_format: None,
                    front_face: ::wgpu::FrontFace::Ccw,
                    cull_mode: None,
                    polygon_mode: ::wgpu::PolygonMode::Fill,
                    unclipped_depth: false,
                    conservative: false,
                },
                depth_stencil: None,
                multisample: ::wgpu::MultisampleState::default(),
                multiview_mask: None,
                cache: None,
            });

        let vertices: Vec<StripVertex> = strip
            .positions
            .iter()
            .zip(&strip.normals)
            .map(|(p, n)| StripVertex {
                position: *p,
                normal: *n,
            })
            .collect();

        let strip_vertex_buffer =
            device.create_buffer_init(&::wgpu::util::BufferInitDescriptor {
                label: Some("site-strip-vertices"),
                contents: bytemuck::cast_slice(&vertices),
                usage: ::wgpu::BufferUsages::VERTEX,
            });

        let strip_index_buffer = device.create_buffer_init(&::wgpu::util::BufferInitDescriptor {
            label: Some("site-strip-indices"),
            contents: bytemuck::cast_slice(&strip.triangle_indices),
            usage: ::wgpu::BufferUsages::INDEX,
        });

        let edge_index_buffer = device.create_buffer_init(&::wgpu::util::BufferInitDescriptor {
            label: Some("site-edge-indices"),
            contents: bytemuck::cast_slice(&strip.edge_indices),
            usage: ::wgpu::BufferUsages::INDEX,
        });

        // Rewritten every frame as particles float.
        let particle_buffer = device.create_buffer(&::wgpu::BufferDescriptor {
            label: Some("site-particles"),
            size: particle_capacity as u64 * std::mem::size_of::<ParticleVertex>() as u64,
            usage: ::wgpu::BufferUsages::VERTEX | ::wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        // Initialize globals so the first render doesn't read garbage.
        let globals = Globals {
            view_proj: [[0.0; 4]; 4],
            mesh_model: [[0.0; 4]; 4],
            glow_model: [[0.0; 4]; 4],
            field_model: [[0.0; 4]; 4],
            light_dir_a: [0.577, 0.577, 0.577],
            _pad0: 0.0,
            light_dir_b: [-0.768, -0.461, 0.461],
            _pad1: 0.0,
        };
        queue.write_buffer(&globals_buffer, 0, bytemuck::bytes_of(&globals));

        Ok(WgpuContext {
            _instance: instance,
            surface,
            device,
            queue,
            config,
            _canvas: canvas_elem,
            surface_pipeline,
            edge_pipeline,
            glow_pipeline,
            particles_pipeline,
            globals_buffer,
            globals_bind_group,
            depth_view,
            strip_vertex_buffer,
            strip_index_buffer,
            strip_index_count: strip.triangle_indices.len() as u32,
            edge_index_buffer,
            edge_index_count: strip.edge_indices.len() as u32,
            particle_buffer,
            particle_count: 0,
        })
    }

    pub fn resize_wgpu(ctx: &mut WgpuContext, width: u32, height: u32) {
        ctx.config.width = width.max(1);
        ctx.config.height = height.max(1);
        ctx.surface.configure(&ctx.device, &ctx.config);
        ctx.depth_view = create_depth_view(&ctx.device, &ctx.config);
    }

    pub fn render_scene(
        ctx: &mut WgpuContext,
        globals: &Globals,
        particles: &[ParticleVertex],
    ) -> Result<(), JsValue> {
        let frame = ctx
            .surface
            .get_current_texture()
            .map_err(|e| JsValue::from_str(&format!("surface acquire failed: {e}")))?;
        let view = frame
            .texture
            .create_view(&::wgpu::TextureViewDescriptor::default());

        ctx.queue
            .write_buffer(&ctx.globals_buffer, 0, bytemuck::bytes_of(globals));
        ctx.queue
            .write_buffer(&ctx.particle_buffer, 0, bytemuck::cast_slice(particles));
        ctx.particle_count = particles.len() as u32;

        let mut encoder = ctx
            .device
            .create_command_encoder(&::wgpu::CommandEncoderDescriptor {
                label: Some("site-frame-encoder"),
            });

        // Pass 1: clear to transparent and draw the particle field
        // (depthless, additive).
        {
            let mut rpass = encoder.begin_render_pass(&::wgpu::RenderPassDescriptor {
                label: Some("site-particles-pass"),
                color_attachments: &[Some(::wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    depth_slice: None,
                    ops: ::wgpu::Operations {
                        load: ::wgpu::LoadOp::Clear(::wgpu::Color::TRANSPARENT),
                        store: ::wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                occlusion_query_set: None,
                timestamp_writes: None,
                multiview_mask: None,
            });

            rpass.set_pipeline(&ctx.particles_pipeline);
            rpass.set_bind_group(0, &ctx.globals_bind_group, &[]);
            rpass.set_vertex_buffer(0, ctx.particle_buffer.slice(..));
            rpass.draw(0..ctx.particle_count, 0..1);
        }

        // Pass 2: the strip surface, with depth, over the particles.
        {
            let mut rpass = encoder.begin_render_pass(&::wgpu::RenderPassDescriptor {
                label: Some("site-surface-pass"),
                color_attachments: &[Some(::wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    depth_slice: None,
                    ops: ::wgpu::Operations {
                        load: ::wgpu::LoadOp::Load,
                        store: ::wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(::wgpu::RenderPassDepthStencilAttachment {
                    view: &ctx.depth_view,
                    depth_ops: Some(::wgpu::Operations {
                        load: ::wgpu::LoadOp::Clear(1.0),
                        store: ::wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
                multiview_mask: None,
            });

            rpass.set_pipeline(&ctx.surface_pipeline);
            rpass.set_bind_group(0, &ctx.globals_bind_group, &[]);
            rpass.set_vertex_buffer(0, ctx.strip_vertex_buffer.slice(..));
            rpass.set_index_buffer(ctx.strip_index_buffer.slice(..), ::wgpu::IndexFormat::Uint32);
            rpass.draw_indexed(0..ctx.strip_index_count, 0, 0..1);
        }

        // Pass 3: the glow layer, depth-tested against the surface but not
        // written, inflated 2%.
        {
            let mut rpass = encoder.begin_render_pass(&::wgpu::RenderPassDescriptor {
                label: Some("site-glow-pass"),
                color_attachments: &[Some(::wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    depth_slice: None,
                    ops: ::wgpu::Operations {
                        load: ::wgpu::LoadOp::Load,
                        store: ::wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(::wgpu::RenderPassDepthStencilAttachment {
                    view: &ctx.depth_view,
                    depth_ops: Some(::wgpu::Operations {
                        load: ::wgpu::LoadOp::Load,
                        store: ::wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
                multiview_mask: None,
            });

            rpass.set_pipeline(&ctx.glow_pipeline);
            rpass.set_bind_group(0, &ctx.globals_bind_group, &[]);
            rpass.set_vertex_buffer(0, ctx.strip_vertex_buffer.slice(..));
            rpass.set_index_buffer(ctx.strip_index_buffer.slice(..), ::wgpu::IndexFormat::Uint32);
            rpass.draw_indexed(0..ctx.strip_index_count, 0, 0..1);
        }

        // Pass 4: wireframe edges (depthless overlay).
        {
            let mut rpass = encoder.begin_render_pass(&::wgpu::RenderPassDescriptor {
                label: Some("site-edge-pass"),
                color_attachments: &[Some(::wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    depth_slice: None,
                    ops: ::wgpu::Operations {
                        load: ::wgpu::LoadOp::Load,
                        store: ::wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                occlusion_query_set: None,
                timestamp_writes: None,
                multiview_mask: None,
            });

            rpass.set_pipeline(&ctx.edge_pipeline);
            rpass.set_bind_group(0, &ctx.globals_bind_group, &[]);
            rpass.set_vertex_buffer(0, ctx.strip_vertex_buffer.slice(..));
            rpass.set_index_buffer(ctx.edge_index_buffer.slice(..), ::wgpu::IndexFormat::Uint32);
            rpass.draw_indexed(0..ctx.edge_index_count, 0, 0..1);
        }

        ctx.queue.submit(std::iter::once(encoder.finish()));
        frame.present();
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod imp {
    use wasm_bindgen::prelude::JsValue;

    use super::{Globals, ParticleVertex};
    use gpu::tessellate::StripBuffers;

    #[derive(Debug, Default)]
    pub struct WgpuContext;

    pub async fn init_wgpu_from_canvas_id(
        _canvas_id: &str,
        _strip: &StripBuffers,
        _particle_capacity: u32,
    ) -> Result<WgpuContext, JsValue> {
        Err(JsValue::from_str(
            "wgpu initialization is only available on wasm32 targets",
        ))
    }

    pub fn resize_wgpu(_ctx: &mut WgpuContext, _width: u32, _height: u32) {}

    pub fn render_scene(
        _ctx: &mut WgpuContext,
        _globals: &Globals,
        _particles: &[ParticleVertex],
    ) -> Result<(), JsValue> {
        Err(JsValue::from_str(
            "wgpu rendering is only available on wasm32 targets",
        ))
    }
}

pub use imp::{WgpuContext, init_wgpu_from_canvas_id, render_scene, resize_wgpu};
