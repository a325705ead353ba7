//! Shader program compilation: WGSL validation, stage linking, and pipeline creation.
//!
//! A program is two WGSL sources, one per stage. Each stage is parsed and
//! validated with naga before wgpu sees it, so compile errors surface as a
//! [`ShaderError`] carrying the rendered diagnostic instead of a device panic.

use std::collections::BTreeSet;
use std::fmt;
use std::num::NonZeroU64;
use std::path::{Path, PathBuf};

use log::{debug, info};
use thiserror::Error;
use wgpu::{ShaderModuleDescriptor, ShaderSource};

use crate::buffer::VertexPosition;
use crate::uniforms::FlatUniforms;

/// Entry point every vertex source must define.
pub const VERTEX_ENTRY_POINT: &str = "vs_main";
/// Entry point every fragment source must define.
pub const FRAGMENT_ENTRY_POINT: &str = "fs_main";

/// File name looked up for the vertex stage in a shader directory.
pub const VERTEX_FILE_NAME: &str = "flat.vert.wgsl";
/// File name looked up for the fragment stage in a shader directory.
pub const FRAGMENT_FILE_NAME: &str = "flat.frag.wgsl";

const DEFAULT_VERTEX_SOURCE: &str = include_str!("../shaders/flat.vert.wgsl");
const DEFAULT_FRAGMENT_SOURCE: &str = include_str!("../shaders/flat.frag.wgsl");

/// Pipeline stage a source belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    fn entry_point(self) -> &'static str {
        match self {
            Self::Vertex => VERTEX_ENTRY_POINT,
            Self::Fragment => FRAGMENT_ENTRY_POINT,
        }
    }

    fn naga_stage(self) -> naga::ShaderStage {
        match self {
            Self::Vertex => naga::ShaderStage::Vertex,
            Self::Fragment => naga::ShaderStage::Fragment,
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Vertex => f.write_str("vertex"),
            Self::Fragment => f.write_str("fragment"),
        }
    }
}

/// Error types for shader program compilation.
#[derive(Debug, Error)]
pub enum ShaderError {
    #[error("{stage} shader failed to compile:\n{log}")]
    Compilation { stage: ShaderStage, log: String },

    #[error("{stage} shader has no `{entry_point}` entry point")]
    MissingEntryPoint {
        stage: ShaderStage,
        entry_point: &'static str,
    },

    #[error("shader program failed to link: {log}")]
    Link { log: String },

    #[error("shader file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to read shader file: {0}")]
    Io(#[from] std::io::Error),
}

/// Parse and validate one stage, returning the naga module on success.
pub fn validate_stage(source: &str, stage: ShaderStage) -> Result<naga::Module, ShaderError> {
    let module = naga::front::wgsl::parse_str(source).map_err(|e| ShaderError::Compilation {
        stage,
        log: e.emit_to_string(source),
    })?;

    let mut validator = naga::valid::Validator::new(
        naga::valid::ValidationFlags::all(),
        naga::valid::Capabilities::all(),
    );
    validator
        .validate(&module)
        .map_err(|e| ShaderError::Compilation {
            stage,
            log: e.emit_to_string(source),
        })?;

    let entry_point = stage.entry_point();
    if !module
        .entry_points
        .iter()
        .any(|ep| ep.name == entry_point && ep.stage == stage.naga_stage())
    {
        return Err(ShaderError::MissingEntryPoint { stage, entry_point });
    }

    Ok(module)
}

/// Check that every `@location` the fragment stage reads is written by the vertex stage.
pub fn link(vertex: &naga::Module, fragment: &naga::Module) -> Result<(), ShaderError> {
    let outputs: BTreeSet<u32> = find_entry_point(vertex, ShaderStage::Vertex)
        .and_then(|ep| ep.function.result.as_ref())
        .map(|result| binding_locations(vertex, result.ty, result.binding.as_ref()))
        .unwrap_or_default();

    let Some(fs) = find_entry_point(fragment, ShaderStage::Fragment) else {
        return Err(ShaderError::MissingEntryPoint {
            stage: ShaderStage::Fragment,
            entry_point: FRAGMENT_ENTRY_POINT,
        });
    };

    let inputs: BTreeSet<u32> = fs
        .function
        .arguments
        .iter()
        .flat_map(|arg| binding_locations(fragment, arg.ty, arg.binding.as_ref()))
        .collect();

    let missing: Vec<String> = inputs
        .difference(&outputs)
        .map(|location| format!("@location({location})"))
        .collect();
    if !missing.is_empty() {
        return Err(ShaderError::Link {
            log: format!(
                "fragment inputs {} are not written by `{VERTEX_ENTRY_POINT}`",
                missing.join(", ")
            ),
        });
    }

    Ok(())
}

fn find_entry_point(module: &naga::Module, stage: ShaderStage) -> Option<&naga::EntryPoint> {
    module
        .entry_points
        .iter()
        .find(|ep| ep.name == stage.entry_point() && ep.stage == stage.naga_stage())
}

fn binding_locations(
    module: &naga::Module,
    ty: naga::Handle<naga::Type>,
    binding: Option<&naga::Binding>,
) -> BTreeSet<u32> {
    if let Some(binding) = binding {
        return location_of(binding).into_iter().collect();
    }
    match &module.types[ty].inner {
        naga::TypeInner::Struct { members, .. } => members
            .iter()
            .filter_map(|member| member.binding.as_ref().and_then(location_of))
            .collect(),
        _ => BTreeSet::new(),
    }
}

fn location_of(binding: &naga::Binding) -> Option<u32> {
    match binding {
        naga::Binding::Location { location, .. } => Some(*location),
        _ => None,
    }
}

/// Vertex and fragment source text for one program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramSource {
    pub vertex: String,
    pub fragment: String,
}

impl Default for ProgramSource {
    fn default() -> Self {
        Self::embedded()
    }
}

impl ProgramSource {
    /// Flat-color shaders compiled into the binary.
    pub fn embedded() -> Self {
        Self {
            vertex: DEFAULT_VERTEX_SOURCE.to_string(),
            fragment: DEFAULT_FRAGMENT_SOURCE.to_string(),
        }
    }

    /// Read `flat.vert.wgsl` and `flat.frag.wgsl` from a directory.
    pub fn load_from_dir(dir: &Path) -> Result<Self, ShaderError> {
        let read = |name: &str| -> Result<String, ShaderError> {
            let path = dir.join(name);
            if !path.exists() {
                return Err(ShaderError::FileNotFound { path });
            }
            debug!("Loading shader source from {}", path.display());
            Ok(std::fs::read_to_string(&path)?)
        };

        Ok(Self {
            vertex: read(VERTEX_FILE_NAME)?,
            fragment: read(FRAGMENT_FILE_NAME)?,
        })
    }

    /// Validate and link both stages without touching the GPU.
    pub fn check(&self) -> Result<(), ShaderError> {
        let vertex = validate_stage(&self.vertex, ShaderStage::Vertex)?;
        let fragment = validate_stage(&self.fragment, ShaderStage::Fragment)?;
        link(&vertex, &fragment)
    }
}

/// A compiled program: render pipeline plus the layout of its uniform block.
///
/// Dropping the program releases the pipeline and its layouts.
pub struct ShaderProgram {
    pub pipeline: wgpu::RenderPipeline,
    pub uniform_layout: wgpu::BindGroupLayout,
}

impl ShaderProgram {
    /// Compile both stages into a render pipeline.
    pub fn compile(
        device: &wgpu::Device,
        source: &ProgramSource,
        surface_format: wgpu::TextureFormat,
        depth_format: Option<wgpu::TextureFormat>,
    ) -> Result<Self, ShaderError> {
        source.check()?;

        let vertex_module = device.create_shader_module(ShaderModuleDescriptor {
            label: Some("flat-vertex"),
            source: ShaderSource::Wgsl(source.vertex.as_str().into()),
        });
        let fragment_module = device.create_shader_module(ShaderModuleDescriptor {
            label: Some("flat-fragment"),
            source: ShaderSource::Wgsl(source.fragment.as_str().into()),
        });

        let uniform_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("flat-uniform-layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: true,
                    min_binding_size: NonZeroU64::new(FlatUniforms::SIZE),
                },
                count: None,
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("flat-pipeline-layout"),
            bind_group_layouts: &[&uniform_layout],
            immediate_size: 0,
        });

        let depth_stencil = depth_format.map(|format| wgpu::DepthStencilState {
            format,
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::GreaterEqual,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("flat-pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &vertex_module,
                entry_point: Some(VERTEX_ENTRY_POINT),
                buffers: &[VertexPosition::layout()],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            // Rings are single-sided quads seen from both faces.
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                unclipped_depth: false,
                polygon_mode: wgpu::PolygonMode::Fill,
                conservative: false,
            },
            depth_stencil,
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            fragment: Some(wgpu::FragmentState {
                module: &fragment_module,
                entry_point: Some(FRAGMENT_ENTRY_POINT),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            multiview_mask: None,
            cache: None,
        });

        info!("Compiled flat shader program");

        Ok(Self {
            pipeline,
            uniform_layout,
        })
    }
}
