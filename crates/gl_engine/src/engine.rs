//! Tutorial driver
//!
//! Runs the fixed sequence: window and context, function-pointer loading,
//! shader program, geometry upload, frame loop, teardown.

use log::{info, warn};
use thiserror::Error;

use crate::config::ConfigError;
use crate::core::config::TutorialConfig;
use crate::render::{
    CloseReason, FrameLoop, GlfwWindow, GraphicsApi, LoaderError, ShaderBuilder, ShaderError,
    TriangleMesh, Viewport, WindowBackend, WindowError,
};

/// Engine errors
///
/// All of these are fatal: the binaries report them and exit with a failure status.
#[derive(Error, Debug)]
pub enum EngineError {
    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// GLFW or window creation failed
    #[error("Window error: {0}")]
    Window(#[from] WindowError),

    /// OpenGL entry points could not be resolved
    #[error("Failed to load OpenGL: {0}")]
    Loader(#[from] LoaderError),

    /// Shader build failed and the configuration asked to abort
    #[error("Shader error: {0}")]
    Shader(#[from] ShaderError),
}

/// What a completed run did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Frames presented before the loop exited
    pub frames_rendered: u64,
    /// Whether the shader program compiled and linked
    pub shaders_ok: bool,
    /// What ended the frame loop
    pub close_reason: CloseReason,
}

/// Open the window, load OpenGL and render until the window closes
///
/// The window and its context are destroyed when this returns.
pub fn run(config: &TutorialConfig) -> Result<RunSummary, EngineError> {
    config.validate()?;

    let mut window = GlfwWindow::new(&config.window, &config.context)?;
    let mut api = window.load_gl()?;

    let context = api.context_info();
    info!("OpenGL vendor: {}", context.vendor);
    info!("OpenGL renderer: {}", context.renderer);
    info!("OpenGL version: {} (GLSL {})", context.version, context.shading_language);

    let summary = run_with(&mut window, &mut api, config)?;
    info!("Shutting down");
    Ok(summary)
}

/// Render with an already created window and loaded API
pub fn run_with(
    window: &mut dyn WindowBackend,
    api: &mut dyn GraphicsApi,
    config: &TutorialConfig,
) -> Result<RunSummary, EngineError> {
    run_with_shaders(window, api, config, ShaderBuilder::default())
}

/// Render with the given shader sources instead of the embedded ones
pub fn run_with_shaders(
    window: &mut dyn WindowBackend,
    api: &mut dyn GraphicsApi,
    config: &TutorialConfig,
    shaders: ShaderBuilder<'_>,
) -> Result<RunSummary, EngineError> {
    let (width, height) = window.framebuffer_size();
    let viewport = Viewport::covering(width, height).apply(api);

    let build = shaders.build(api);
    let shaders_ok = build.is_ok();
    if !shaders_ok {
        build.log_failures();
        if config.abort_on_shader_error {
            if let Some(err) = build.errors().into_iter().next() {
                return Err(EngineError::Shader(err));
            }
        }
        warn!("Continuing with an unusable shader program; the triangle will not render correctly");
    }
    let program = build.program();

    let mesh = TriangleMesh::triangle(api, config.render.step.uses_vertex_array());
    api.polygon_mode(config.render.polygon_mode);

    info!("Rendering {:?} step", config.render.step);
    let mut frame_loop = FrameLoop::new(config.render.clear_color, viewport);
    let frames_rendered = frame_loop.run(window, api, &program, &mesh);

    Ok(RunSummary {
        frames_rendered,
        shaders_ok,
        close_reason: frame_loop.close_reason().unwrap_or(CloseReason::WindowClosed),
    })
}
