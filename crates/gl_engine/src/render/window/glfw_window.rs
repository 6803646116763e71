//! Window management using GLFW
//!
//! Creates the window together with its OpenGL context and feeds GLFW's event
//! queue to the frame loop.

use glfw::Context;
use log::{error, info};
use thiserror::Error;

use crate::core::config::{ContextConfig, WindowConfig};
use crate::render::opengl::{loader, GlApi, LoaderResult};
use crate::render::window::WindowBackend;

/// Window management errors
#[derive(Error, Debug)]
pub enum WindowError {
    /// GLFW could not be initialized
    #[error("GLFW initialization failed: {0}")]
    InitializationFailed(String),

    /// GLFW refused to create the window or its context
    #[error(
        "Failed to create {width}x{height} window \"{title}\" \
         with an OpenGL {major}.{minor} context"
    )]
    CreationFailed {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
        /// Requested title
        title: String,
        /// Requested context major version
        major: u32,
        /// Requested context minor version
        minor: u32,
    },
}

/// Result type for window operations
pub type WindowResult<T> = Result<T, WindowError>;

fn log_glfw_error(err: glfw::Error, description: String) {
    error!("GLFW error {err:?}: {description}");
}

/// GLFW window owning the OpenGL context
///
/// Dropping it destroys the window and terminates GLFW.
pub struct GlfwWindow {
    glfw: glfw::Glfw,
    window: glfw::PWindow,
    events: glfw::GlfwReceiver<(f64, glfw::WindowEvent)>,
}

impl GlfwWindow {
    /// Create the window and make its context current on this thread
    pub fn new(window_config: &WindowConfig, context_config: &ContextConfig) -> WindowResult<Self> {
        let mut glfw = glfw::init(log_glfw_error)
            .map_err(|e| WindowError::InitializationFailed(format!("{e:?}")))?;

        glfw.window_hint(glfw::WindowHint::ContextVersion(
            context_config.version_major,
            context_config.version_minor,
        ));
        if context_config.core_profile {
            glfw.window_hint(glfw::WindowHint::OpenGlProfile(glfw::OpenGlProfileHint::Core));
        }
        glfw.window_hint(glfw::WindowHint::OpenGlForwardCompat(context_config.forward_compatible));
        glfw.window_hint(glfw::WindowHint::Resizable(window_config.resizable));

        let (mut window, events) = glfw
            .create_window(
                window_config.width,
                window_config.height,
                &window_config.title,
                glfw::WindowMode::Windowed,
            )
            .ok_or_else(|| WindowError::CreationFailed {
                width: window_config.width,
                height: window_config.height,
                title: window_config.title.clone(),
                major: context_config.version_major,
                minor: context_config.version_minor,
            })?;

        window.make_current();
        glfw.set_swap_interval(glfw::SwapInterval::Sync(context_config.swap_interval));

        window.set_framebuffer_size_polling(true);
        window.set_close_polling(true);

        info!(
            "Created {}x{} window \"{}\" (OpenGL {}.{} {})",
            window_config.width,
            window_config.height,
            window_config.title,
            context_config.version_major,
            context_config.version_minor,
            if context_config.core_profile { "core" } else { "compatibility" },
        );

        Ok(Self { glfw, window, events })
    }

    /// Resolve OpenGL entry points for this window's context
    pub fn load_gl(&mut self) -> LoaderResult<GlApi> {
        self.window.make_current();
        let window = &mut self.window;
        loader::load_with(|symbol| window.get_proc_address(symbol))
    }
}

impl WindowBackend for GlfwWindow {
    fn should_close(&self) -> bool {
        self.window.should_close()
    }

    fn set_should_close(&mut self, should_close: bool) {
        self.window.set_should_close(should_close);
    }

    fn key_pressed(&self, key: glfw::Key) -> bool {
        self.window.get_key(key) == glfw::Action::Press
    }

    fn swap_buffers(&mut self) {
        self.window.swap_buffers();
    }

    fn poll_events(&mut self) {
        self.glfw.poll_events();
    }

    fn drain_events(&mut self) -> Vec<glfw::WindowEvent> {
        glfw::flush_messages(&self.events).map(|(_, event)| event).collect()
    }

    fn framebuffer_size(&self) -> (u32, u32) {
        let (width, height) = self.window.get_framebuffer_size();
        (
            u32::try_from(width).unwrap_or(0),
            u32::try_from(height).unwrap_or(0),
        )
    }
}
