//! Shader validation and render pipeline construction.
//!
//! WGSL is parsed and validated with naga before any wgpu module is created,
//! so a broken shader is logged with a source-annotated diagnostic and the
//! renderer is left without a pipeline instead of tripping wgpu's
//! uncaptured-error handler.

use std::collections::HashMap;

use super::extension::ExtraAttribute;

pub(super) const VERTEX_ENTRY: &str = "vs_main";
pub(super) const FRAGMENT_ENTRY: &str = "fs_main";

pub(super) const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// Built-in vertex inputs: name, location, format. One buffer each, slots 0..4.
pub(super) const BUILTIN_ATTRIBUTES: [ExtraAttribute; 4] = [
    ExtraAttribute { name: "a_vertex_position", location: 0, format: wgpu::VertexFormat::Float32x4 },
    ExtraAttribute { name: "a_vertex_colour", location: 1, format: wgpu::VertexFormat::Float32x4 },
    ExtraAttribute { name: "a_vertex_normal", location: 2, format: wgpu::VertexFormat::Float32x3 },
    ExtraAttribute { name: "a_model_view_matrix_index", location: 3, format: wgpu::VertexFormat::Uint32 },
];

/// Resource names the vertex module must declare: name, group, binding.
pub(super) const BUILTIN_RESOURCES: [(&str, u32, u32); 2] = [
    ("u_projection_matrix", 0, 0),
    ("u_model_view_matrices_texture", 0, 1),
];

/// A naga-checked shader module.
pub(super) struct CheckedShader {
    pub module: naga::Module,
}

/// Parses and validates `source`, and checks it has `entry` for `stage`.
///
/// Every failure is logged; `None` means the source is unusable.
pub(super) fn check_shader(
    label: &str,
    source: &str,
    stage: naga::ShaderStage,
    entry: &str,
) -> Option<CheckedShader> {
    let module = match naga::front::wgsl::parse_str(source) {
        Ok(m) => m,
        Err(e) => {
            log::error!("{label}: shader compilation failed\n{}", e.emit_to_string(source));
            return None;
        }
    };

    let mut validator = naga::valid::Validator::new(
        naga::valid::ValidationFlags::all(),
        naga::valid::Capabilities::all(),
    );
    if let Err(e) = validator.validate(&module) {
        log::error!("{label}: shader validation failed\n{}", e.emit_to_string(source));
        return None;
    }

    if !module.entry_points.iter().any(|ep| ep.name == entry && ep.stage == stage) {
        log::error!("{label}: no {stage:?} entry point named `{entry}`");
        return None;
    }

    Some(CheckedShader { module })
}

/// A mismatch between a vertex module and the renderer's naming contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum ContractIssue {
    MissingInput { name: String },
    InputLocation { name: String, expected: u32, found: u32 },
    MissingResource { name: String },
    ResourceBinding { name: String, expected: (u32, u32), found: (u32, u32) },
}

impl std::fmt::Display for ContractIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContractIssue::MissingInput { name } => write!(f, "vertex input `{name}` not found"),
            ContractIssue::InputLocation { name, expected, found } => {
                write!(f, "vertex input `{name}` at location {found}, expected {expected}")
            }
            ContractIssue::MissingResource { name } => write!(f, "resource `{name}` not found"),
            ContractIssue::ResourceBinding { name, expected, found } => write!(
                f,
                "resource `{name}` at @group({}) @binding({}), expected @group({}) @binding({})",
                found.0, found.1, expected.0, expected.1
            ),
        }
    }
}

/// Vertex-stage input names and their locations, including struct members.
fn vertex_inputs(module: &naga::Module, entry: &str) -> HashMap<String, u32> {
    let mut inputs = HashMap::new();

    let Some(ep) = module
        .entry_points
        .iter()
        .find(|ep| ep.name == entry && ep.stage == naga::ShaderStage::Vertex)
    else {
        return inputs;
    };

    for arg in &ep.function.arguments {
        if let (Some(name), Some(naga::Binding::Location { location, .. })) = (&arg.name, &arg.binding) {
            inputs.insert(name.clone(), *location);
            continue;
        }
        if let naga::TypeInner::Struct { members, .. } = &module.types[arg.ty].inner {
            for m in members {
                if let (Some(name), Some(naga::Binding::Location { location, .. })) = (&m.name, &m.binding) {
                    inputs.insert(name.clone(), *location);
                }
            }
        }
    }

    inputs
}

/// Compares the vertex module against the expected inputs and resources.
pub(super) fn check_contract(
    module: &naga::Module,
    inputs: &[ExtraAttribute],
    resources: &[(&str, u32, u32)],
) -> Vec<ContractIssue> {
    let mut issues = Vec::new();

    let found_inputs = vertex_inputs(module, VERTEX_ENTRY);
    for attr in inputs {
        match found_inputs.get(attr.name) {
            None => issues.push(ContractIssue::MissingInput { name: attr.name.to_string() }),
            Some(&loc) if loc != attr.location => issues.push(ContractIssue::InputLocation {
                name: attr.name.to_string(),
                expected: attr.location,
                found: loc,
            }),
            Some(_) => {}
        }
    }

    for &(name, group, binding) in resources {
        let found = module
            .global_variables
            .iter()
            .find(|(_, var)| var.name.as_deref() == Some(name))
            .map(|(_, var)| var.binding.as_ref().map(|b| (b.group, b.binding)));

        match found {
            None => issues.push(ContractIssue::MissingResource { name: name.to_string() }),
            Some(Some(slot)) if slot == (group, binding) => {}
            Some(slot) => issues.push(ContractIssue::ResourceBinding {
                name: name.to_string(),
                expected: (group, binding),
                found: slot.unwrap_or((u32::MAX, u32::MAX)),
            }),
        }
    }

    issues
}

pub(super) fn create_bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("tessera batch bgl"),
        entries: &[
            wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: wgpu::BufferSize::new(PROJECTION_UBO_SIZE),
                },
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: 1,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Texture {
                    sample_type: wgpu::TextureSampleType::Float { filterable: false },
                    view_dimension: wgpu::TextureViewDimension::D2,
                    multisampled: false,
                },
                count: None,
            },
        ],
    })
}

/// Size of the projection uniform: one `mat4x4<f32>`.
pub(super) const PROJECTION_UBO_SIZE: u64 = 64;

/// Builds the render pipeline, or `None` when either shader fails its checks.
pub(super) fn create_pipeline(
    device: &wgpu::Device,
    surface_format: wgpu::TextureFormat,
    bind_group_layout: &wgpu::BindGroupLayout,
    vertex_source: &str,
    fragment_source: &str,
    extra: &[ExtraAttribute],
) -> Option<wgpu::RenderPipeline> {
    let vertex = check_shader("vertex shader", vertex_source, naga::ShaderStage::Vertex, VERTEX_ENTRY);
    let fragment = check_shader("fragment shader", fragment_source, naga::ShaderStage::Fragment, FRAGMENT_ENTRY);
    let (vertex, _fragment) = (vertex?, fragment?);

    for issue in check_contract(&vertex.module, &BUILTIN_ATTRIBUTES, &BUILTIN_RESOURCES) {
        log::warn!("vertex shader: {issue}");
    }
    for issue in check_contract(&vertex.module, extra, &[]) {
        log::warn!("vertex shader: {issue}");
    }

    let vertex_module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("tessera batch vertex shader"),
        source: wgpu::ShaderSource::Wgsl(vertex_source.into()),
    });
    let fragment_module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("tessera batch fragment shader"),
        source: wgpu::ShaderSource::Wgsl(fragment_source.into()),
    });

    let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("tessera batch pipeline layout"),
        bind_group_layouts: &[bind_group_layout],
        immediate_size: 0,
    });

    // One buffer per attribute; the layouts borrow these.
    let attributes: Vec<[wgpu::VertexAttribute; 1]> = BUILTIN_ATTRIBUTES
        .iter()
        .chain(extra)
        .map(|a| {
            [wgpu::VertexAttribute {
                format: a.format,
                offset: 0,
                shader_location: a.location,
            }]
        })
        .collect();
    let buffers: Vec<wgpu::VertexBufferLayout<'_>> = attributes
        .iter()
        .map(|attr| wgpu::VertexBufferLayout {
            array_stride: attr[0].format.size(),
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: attr,
        })
        .collect();

    let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("tessera batch pipeline"),
        layout: Some(&pipeline_layout),

        vertex: wgpu::VertexState {
            module: &vertex_module,
            entry_point: Some(VERTEX_ENTRY),
            compilation_options: Default::default(),
            buffers: &buffers,
        },

        fragment: Some(wgpu::FragmentState {
            module: &fragment_module,
            entry_point: Some(FRAGMENT_ENTRY),
            compilation_options: Default::default(),
            targets: &[Some(wgpu::ColorTargetState {
                format: surface_format,
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                write_mask: wgpu::ColorWrites::ALL,
            })],
        }),

        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: None,
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },

        depth_stencil: Some(wgpu::DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::LessEqual,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState::default(),

        multiview_mask: None,
        cache: None,
    });

    log::debug!("batch pipeline created ({} vertex streams)", buffers.len());
    Some(pipeline)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::shaders;

    const CURVE_ATTRIBUTES: [ExtraAttribute; 4] = [
        ExtraAttribute { name: "a_a", location: 4, format: wgpu::VertexFormat::Float32x2 },
        ExtraAttribute { name: "a_b", location: 5, format: wgpu::VertexFormat::Float32x2 },
        ExtraAttribute { name: "a_c", location: 6, format: wgpu::VertexFormat::Float32x2 },
        ExtraAttribute { name: "a_d", location: 7, format: wgpu::VertexFormat::Float32x2 },
    ];

    fn vertex(src: &str) -> naga::Module {
        check_shader("test", src, naga::ShaderStage::Vertex, VERTEX_ENTRY)
            .expect("vertex shader should validate")
            .module
    }

    // ── built-in programs ─────────────────────────────────────────────────

    #[test]
    fn builtin_vertex_programs_satisfy_the_contract() {
        for src in [shaders::MESH_VERTEX, shaders::CURVE_VERTEX] {
            let issues = check_contract(&vertex(src), &BUILTIN_ATTRIBUTES, &BUILTIN_RESOURCES);
            assert!(issues.is_empty(), "{issues:?}");
        }
    }

    #[test]
    fn curve_vertex_exposes_control_points() {
        let issues = check_contract(&vertex(shaders::CURVE_VERTEX), &CURVE_ATTRIBUTES, &[]);
        assert!(issues.is_empty(), "{issues:?}");
    }

    #[test]
    fn builtin_fragment_programs_validate() {
        for src in [
            shaders::MESH_FRAGMENT,
            shaders::CUBIC_BEZIER_FRAGMENT,
            shaders::QUADRATIC_BEZIER_FRAGMENT,
        ] {
            assert!(check_shader("test", src, naga::ShaderStage::Fragment, FRAGMENT_ENTRY).is_some());
        }
    }

    // ── failures ──────────────────────────────────────────────────────────

    #[test]
    fn syntax_error_is_rejected() {
        let src = "@vertex fn vs_main( -> @builtin(position) vec4<f32> { }";
        assert!(check_shader("test", src, naga::ShaderStage::Vertex, VERTEX_ENTRY).is_none());
    }

    #[test]
    fn wrong_entry_point_is_rejected() {
        assert!(check_shader("test", shaders::MESH_FRAGMENT, naga::ShaderStage::Fragment, "main").is_none());
        assert!(check_shader("test", shaders::MESH_FRAGMENT, naga::ShaderStage::Vertex, FRAGMENT_ENTRY).is_none());
    }

    #[test]
    fn renamed_and_moved_names_are_reported() {
        let src = r#"
            @group(0) @binding(3) var<uniform> u_projection_matrix: mat4x4<f32>;

            @vertex
            fn vs_main(
                @location(0) a_vertex_position: vec4<f32>,
                @location(2) a_vertex_colour: vec4<f32>,
            ) -> @builtin(position) vec4<f32> {
                return u_projection_matrix * a_vertex_position + a_vertex_colour * 0.0;
            }
        "#;
        let issues = check_contract(&vertex(src), &BUILTIN_ATTRIBUTES, &BUILTIN_RESOURCES);

        assert!(issues.contains(&ContractIssue::InputLocation {
            name: "a_vertex_colour".into(),
            expected: 1,
            found: 2,
        }));
        assert!(issues.contains(&ContractIssue::MissingInput { name: "a_vertex_normal".into() }));
        assert!(issues.contains(&ContractIssue::ResourceBinding {
            name: "u_projection_matrix".into(),
            expected: (0, 0),
            found: (0, 3),
        }));
        assert!(issues.contains(&ContractIssue::MissingResource {
            name: "u_model_view_matrices_texture".into(),
        }));
        assert_eq!(issues.len(), 5);
    }
}
