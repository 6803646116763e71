//! Graphics API call surface
//!
//! The tutorial touches a small, fixed slice of OpenGL. This module names that
//! slice as the [`GraphicsApi`] trait so the shader builder, geometry upload and
//! frame loop can run against the real driver ([`crate::render::opengl::GlApi`])
//! or against a recording implementation in tests.
//!
//! Object handles are wrapped in newtypes so a buffer name can never be passed
//! where a shader name is expected.

use serde::{Deserialize, Serialize};

/// Name of a shader stage object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShaderId(pub u32);

/// Name of a linked program object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProgramId(pub u32);

/// Name of a buffer object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BufferId(pub u32);

/// Name of a vertex array object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VertexArrayId(pub u32);

/// Programmable pipeline stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    /// Vertex processing
    Vertex,
    /// Fragment processing
    Fragment,
}

impl ShaderStage {
    /// Lowercase stage name used in log output
    pub fn name(self) -> &'static str {
        match self {
            Self::Vertex => "vertex",
            Self::Fragment => "fragment",
        }
    }
}

impl std::fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Buffer binding target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferTarget {
    /// `GL_ARRAY_BUFFER`, per-vertex attribute data
    Array,
}

/// Expected access pattern for buffer contents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferUsage {
    /// Written once, drawn many times
    StaticDraw,
}

/// Rasterization mode for polygons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PolygonMode {
    /// Filled triangles
    Fill,
    /// Wireframe outlines
    Line,
}

/// Primitive assembly mode for draw calls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveTopology {
    /// Independent triangles, three vertices each
    Triangles,
}

bitflags::bitflags! {
    /// Framebuffer planes cleared by [`GraphicsApi::clear`]
    ///
    /// Bit values match the OpenGL constants so they can be passed straight through.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ClearFlags: u32 {
        /// `GL_COLOR_BUFFER_BIT`
        const COLOR = 0x0000_4000;
    }
}

/// Driver identification strings reported by the context
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContextInfo {
    /// `GL_VENDOR`
    pub vendor: String,
    /// `GL_RENDERER`
    pub renderer: String,
    /// `GL_VERSION`
    pub version: String,
    /// `GL_SHADING_LANGUAGE_VERSION`
    pub shading_language: String,
}

/// The OpenGL calls used by the tutorial
///
/// Every method maps onto one (or a tightly coupled pair of) GL entry points.
/// Implementations are single-threaded: the context they drive is current on
/// exactly one thread.
pub trait GraphicsApi {
    /// Query driver identification strings
    fn context_info(&self) -> ContextInfo;

    /// Map normalized device coordinates onto the given window rectangle
    fn viewport(&mut self, x: i32, y: i32, width: u32, height: u32);

    /// Set the color used by subsequent color clears
    fn clear_color(&mut self, color: [f32; 4]);

    /// Clear the selected framebuffer planes
    fn clear(&mut self, flags: ClearFlags);

    /// Allocate a shader stage object
    fn create_shader(&mut self, stage: ShaderStage) -> ShaderId;

    /// Replace the source text of a shader stage
    fn shader_source(&mut self, shader: ShaderId, source: &str);

    /// Compile the current source text of a shader stage
    fn compile_shader(&mut self, shader: ShaderId);

    /// `GL_COMPILE_STATUS` of the last compile
    fn shader_compile_status(&self, shader: ShaderId) -> bool;

    /// Full compiler info log of a shader stage
    fn shader_info_log(&self, shader: ShaderId) -> String;

    /// Release a shader stage object
    fn delete_shader(&mut self, shader: ShaderId);

    /// Whether the name still refers to a live shader object
    fn is_shader(&self, shader: ShaderId) -> bool;

    /// Allocate an empty program object
    fn create_program(&mut self) -> ProgramId;

    /// Attach a shader stage to a program
    fn attach_shader(&mut self, program: ProgramId, shader: ShaderId);

    /// Detach a shader stage from a program
    fn detach_shader(&mut self, program: ProgramId, shader: ShaderId);

    /// Link all attached stages
    fn link_program(&mut self, program: ProgramId);

    /// `GL_LINK_STATUS` of the last link
    fn program_link_status(&self, program: ProgramId) -> bool;

    /// Full linker info log of a program
    fn program_info_log(&self, program: ProgramId) -> String;

    /// Make the program part of the current rendering state
    fn use_program(&mut self, program: ProgramId);

    /// Allocate a buffer object
    fn create_buffer(&mut self) -> BufferId;

    /// Bind a buffer to a target
    fn bind_buffer(&mut self, target: BufferTarget, buffer: BufferId);

    /// Allocate storage for the buffer bound to `target` and copy `data` into it
    fn buffer_data(&mut self, target: BufferTarget, data: &[u8], usage: BufferUsage);

    /// Allocate a vertex array object
    fn create_vertex_array(&mut self) -> VertexArrayId;

    /// Bind a vertex array object
    fn bind_vertex_array(&mut self, vertex_array: VertexArrayId);

    /// Describe float attribute `index` in the buffer currently bound to the array target
    fn vertex_attrib_pointer(&mut self, index: u32, components: i32, stride: i32, offset: usize);

    /// Enable attribute `index` for the bound vertex array
    fn enable_vertex_attrib_array(&mut self, index: u32);

    /// Rasterization mode for front and back faces
    fn polygon_mode(&mut self, mode: PolygonMode);

    /// Draw `count` vertices starting at `first`, no indexing
    fn draw_arrays(&mut self, topology: PrimitiveTopology, first: i32, count: i32);
}
