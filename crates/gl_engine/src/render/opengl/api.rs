//! [`GraphicsApi`] over the `gl` crate

use std::ffi::{c_void, CStr};
use std::marker::PhantomData;

use gl::types::{GLchar, GLenum, GLint, GLsizei, GLsizeiptr, GLuint};

use crate::render::api::{
    BufferId, BufferTarget, BufferUsage, ClearFlags, ContextInfo, GraphicsApi, PolygonMode,
    PrimitiveTopology, ProgramId, ShaderId, ShaderStage, VertexArrayId,
};

/// Handle to the loaded OpenGL entry points of the current context
///
/// Only obtainable through [`super::loader::load_with`], so holding one means
/// every function it calls has been resolved. Not `Send`: the context is
/// current on the creating thread only.
#[derive(Debug)]
pub struct GlApi {
    _thread_bound: PhantomData<*const ()>,
}

impl GlApi {
    pub(super) fn loaded() -> Self {
        Self { _thread_bound: PhantomData }
    }
}

fn buffer_target(target: BufferTarget) -> GLenum {
    match target {
        BufferTarget::Array => gl::ARRAY_BUFFER,
    }
}

fn buffer_usage(usage: BufferUsage) -> GLenum {
    match usage {
        BufferUsage::StaticDraw => gl::STATIC_DRAW,
    }
}

fn shader_kind(stage: ShaderStage) -> GLenum {
    match stage {
        ShaderStage::Vertex => gl::VERTEX_SHADER,
        ShaderStage::Fragment => gl::FRAGMENT_SHADER,
    }
}

fn topology_mode(topology: PrimitiveTopology) -> GLenum {
    match topology {
        PrimitiveTopology::Triangles => gl::TRIANGLES,
    }
}

fn to_glsizei(value: u32) -> GLsizei {
    GLsizei::try_from(value).unwrap_or(GLsizei::MAX)
}

/// Read a `GL_*_INFO_LOG` into an owned string
///
/// `length` is the reported `GL_INFO_LOG_LENGTH`, including the terminator.
fn read_info_log(length: GLint, fetch: impl FnOnce(GLsizei, *mut GLsizei, *mut GLchar)) -> String {
    let capacity = usize::try_from(length).unwrap_or(0).max(1);
    let mut buffer = vec![0u8; capacity];
    let mut written: GLsizei = 0;
    fetch(
        GLsizei::try_from(capacity).unwrap_or(GLsizei::MAX),
        &mut written,
        buffer.as_mut_ptr().cast(),
    );
    buffer.truncate(usize::try_from(written).unwrap_or(0));
    String::from_utf8_lossy(&buffer).into_owned()
}

fn get_string(name: GLenum) -> String {
    // SAFETY: glGetString returns either null or a static NUL-terminated string
    unsafe {
        let ptr = gl::GetString(name);
        if ptr.is_null() {
            String::new()
        } else {
            CStr::from_ptr(ptr.cast()).to_string_lossy().into_owned()
        }
    }
}

impl GraphicsApi for GlApi {
    fn context_info(&self) -> ContextInfo {
        ContextInfo {
            vendor: get_string(gl::VENDOR),
            renderer: get_string(gl::RENDERER),
            version: get_string(gl::VERSION),
            shading_language: get_string(gl::SHADING_LANGUAGE_VERSION),
        }
    }

    fn viewport(&mut self, x: i32, y: i32, width: u32, height: u32) {
        unsafe { gl::Viewport(x, y, to_glsizei(width), to_glsizei(height)) }
    }

    fn clear_color(&mut self, color: [f32; 4]) {
        let [r, g, b, a] = color;
        unsafe { gl::ClearColor(r, g, b, a) }
    }

    fn clear(&mut self, flags: ClearFlags) {
        unsafe { gl::Clear(flags.bits()) }
    }

    fn create_shader(&mut self, stage: ShaderStage) -> ShaderId {
        ShaderId(unsafe { gl::CreateShader(shader_kind(stage)) })
    }

    fn shader_source(&mut self, shader: ShaderId, source: &str) {
        // Explicit length, so the source needs no NUL terminator
        let ptr = source.as_ptr().cast::<GLchar>();
        let length = GLint::try_from(source.len()).unwrap_or(GLint::MAX);
        unsafe { gl::ShaderSource(shader.0, 1, &ptr, &length) }
    }

    fn compile_shader(&mut self, shader: ShaderId) {
        unsafe { gl::CompileShader(shader.0) }
    }

    fn shader_compile_status(&self, shader: ShaderId) -> bool {
        let mut status = GLint::from(gl::FALSE);
        unsafe { gl::GetShaderiv(shader.0, gl::COMPILE_STATUS, &mut status) };
        status == GLint::from(gl::TRUE)
    }

    fn shader_info_log(&self, shader: ShaderId) -> String {
        let mut length: GLint = 0;
        unsafe { gl::GetShaderiv(shader.0, gl::INFO_LOG_LENGTH, &mut length) };
        read_info_log(length, |capacity, written, buffer| unsafe {
            gl::GetShaderInfoLog(shader.0, capacity, written, buffer);
        })
    }

    fn delete_shader(&mut self, shader: ShaderId) {
        unsafe { gl::DeleteShader(shader.0) }
    }

    fn is_shader(&self, shader: ShaderId) -> bool {
        unsafe { gl::IsShader(shader.0) == gl::TRUE }
    }

    fn create_program(&mut self) -> ProgramId {
        ProgramId(unsafe { gl::CreateProgram() })
    }

    fn attach_shader(&mut self, program: ProgramId, shader: ShaderId) {
        unsafe { gl::AttachShader(program.0, shader.0) }
    }

    fn detach_shader(&mut self, program: ProgramId, shader: ShaderId) {
        unsafe { gl::DetachShader(program.0, shader.0) }
    }

    fn link_program(&mut self, program: ProgramId) {
        unsafe { gl::LinkProgram(program.0) }
    }

    fn program_link_status(&self, program: ProgramId) -> bool {
        let mut status = GLint::from(gl::FALSE);
        unsafe { gl::GetProgramiv(program.0, gl::LINK_STATUS, &mut status) };
        status == GLint::from(gl::TRUE)
    }

    fn program_info_log(&self, program: ProgramId) -> String {
        let mut length: GLint = 0;
        unsafe { gl::GetProgramiv(program.0, gl::INFO_LOG_LENGTH, &mut length) };
        read_info_log(length, |capacity, written, buffer| unsafe {
            gl::GetProgramInfoLog(program.0, capacity, written, buffer);
        })
    }

    fn use_program(&mut self, program: ProgramId) {
        unsafe { gl::UseProgram(program.0) }
    }

    fn create_buffer(&mut self) -> BufferId {
        let mut name: GLuint = 0;
        unsafe { gl::GenBuffers(1, &mut name) };
        BufferId(name)
    }

    fn bind_buffer(&mut self, target: BufferTarget, buffer: BufferId) {
        unsafe { gl::BindBuffer(buffer_target(target), buffer.0) }
    }

    fn buffer_data(&mut self, target: BufferTarget, data: &[u8], usage: BufferUsage) {
        let size = GLsizeiptr::try_from(data.len()).unwrap_or(GLsizeiptr::MAX);
        unsafe {
            gl::BufferData(
                buffer_target(target),
                size,
                data.as_ptr().cast::<c_void>(),
                buffer_usage(usage),
            );
        }
    }

    fn create_vertex_array(&mut self) -> VertexArrayId {
        let mut name: GLuint = 0;
        unsafe { gl::GenVertexArrays(1, &mut name) };
        VertexArrayId(name)
    }

    fn bind_vertex_array(&mut self, vertex_array: VertexArrayId) {
        unsafe { gl::BindVertexArray(vertex_array.0) }
    }

    fn vertex_attrib_pointer(&mut self, index: u32, components: i32, stride: i32, offset: usize) {
        // With a buffer bound, the pointer argument is a byte offset into it
        unsafe {
            gl::VertexAttribPointer(
                index,
                components,
                gl::FLOAT,
                gl::FALSE,
                stride,
                offset as *const c_void,
            );
        }
    }

    fn enable_vertex_attrib_array(&mut self, index: u32) {
        unsafe { gl::EnableVertexAttribArray(index) }
    }

    fn polygon_mode(&mut self, mode: PolygonMode) {
        let mode = match mode {
            PolygonMode::Fill => gl::FILL,
            PolygonMode::Line => gl::LINE,
        };
        unsafe { gl::PolygonMode(gl::FRONT_AND_BACK, mode) }
    }

    fn draw_arrays(&mut self, topology: PrimitiveTopology, first: i32, count: i32) {
        unsafe { gl::DrawArrays(topology_mode(topology), first, count) }
    }
}
