//! OpenGL function-pointer loading
//!
//! Resolves the driver's entry points through a platform loader callback
//! (GLFW's `get_proc_address` in practice). Must run after a context has been
//! made current and before any other GL call.

use std::ffi::c_void;
use thiserror::Error;

use super::GlApi;

/// Loader errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoaderError {
    /// The driver did not provide a function the renderer calls
    #[error("OpenGL entry point {0} could not be resolved")]
    MissingEntryPoint(&'static str),
}

/// Result type for loader operations
pub type LoaderResult<T> = Result<T, LoaderError>;

/// Every entry point [`GlApi`] calls, paired with its readiness probe
pub const REQUIRED_ENTRY_POINTS: &[(&str, fn() -> bool)] = &[
    ("glGetString", gl::GetString::is_loaded),
    ("glViewport", gl::Viewport::is_loaded),
    ("glClearColor", gl::ClearColor::is_loaded),
    ("glClear", gl::Clear::is_loaded),
    ("glCreateShader", gl::CreateShader::is_loaded),
    ("glShaderSource", gl::ShaderSource::is_loaded),
    ("glCompileShader", gl::CompileShader::is_loaded),
    ("glGetShaderiv", gl::GetShaderiv::is_loaded),
    ("glGetShaderInfoLog", gl::GetShaderInfoLog::is_loaded),
    ("glDeleteShader", gl::DeleteShader::is_loaded),
    ("glIsShader", gl::IsShader::is_loaded),
    ("glCreateProgram", gl::CreateProgram::is_loaded),
    ("glAttachShader", gl::AttachShader::is_loaded),
    ("glDetachShader", gl::DetachShader::is_loaded),
    ("glLinkProgram", gl::LinkProgram::is_loaded),
    ("glGetProgramiv", gl::GetProgramiv::is_loaded),
    ("glGetProgramInfoLog", gl::GetProgramInfoLog::is_loaded),
    ("glUseProgram", gl::UseProgram::is_loaded),
    ("glGenBuffers", gl::GenBuffers::is_loaded),
    ("glBindBuffer", gl::BindBuffer::is_loaded),
    ("glBufferData", gl::BufferData::is_loaded),
    ("glGenVertexArrays", gl::GenVertexArrays::is_loaded),
    ("glBindVertexArray", gl::BindVertexArray::is_loaded),
    ("glVertexAttribPointer", gl::VertexAttribPointer::is_loaded),
    ("glEnableVertexAttribArray", gl::EnableVertexAttribArray::is_loaded),
    ("glPolygonMode", gl::PolygonMode::is_loaded),
    ("glDrawArrays", gl::DrawArrays::is_loaded),
];

/// Resolve all GL entry points through `loader` and verify none are missing
///
/// `loader` receives C symbol names such as `"glDrawArrays"` and returns the
/// address, or null if the symbol is unknown.
pub fn load_with<F>(loader: F) -> LoaderResult<GlApi>
where
    F: FnMut(&'static str) -> *const c_void,
{
    gl::load_with(loader);
    check_entry_points(REQUIRED_ENTRY_POINTS.iter().map(|&(name, probe)| (name, probe())))?;
    Ok(GlApi::loaded())
}

/// Fail on the first entry point reported as unresolved
pub(crate) fn check_entry_points<I>(entries: I) -> LoaderResult<()>
where
    I: IntoIterator<Item = (&'static str, bool)>,
{
    match entries.into_iter().find(|&(_, resolved)| !resolved) {
        Some((name, _)) => Err(LoaderError::MissingEntryPoint(name)),
        None => Ok(()),
    }
}
