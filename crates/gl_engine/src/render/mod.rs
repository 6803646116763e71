//! Rendering: graphics API seam, OpenGL backend, window, shader program,
//! geometry and the frame loop.

pub mod api;
pub mod frame_loop;
pub mod mesh;
pub mod opengl;
pub mod shader;
pub mod viewport;
pub mod window;

#[cfg(test)]
pub(crate) mod testing;

pub use api::{ClearFlags, ContextInfo, GraphicsApi, PolygonMode};
pub use frame_loop::{CloseReason, FrameLoop, LoopState, CLOSE_KEY};
pub use mesh::{TriangleMesh, Vertex, TRIANGLE_VERTICES};
pub use opengl::{GlApi, LoaderError};
pub use shader::{BuildStatus, ShaderBuild, ShaderBuilder, ShaderError, ShaderProgram};
pub use viewport::Viewport;
pub use window::{GlfwWindow, WindowBackend, WindowError};
