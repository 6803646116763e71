//! # Tutorial Configuration
//!
//! Every value the renderer uses (window size, title, context version, clear
//! color, polygon mode) lives here as a typed setting. The binaries never read
//! a file: they take [`TutorialConfig::for_step`], whose values are the
//! compile-time constants of each tutorial step. The [`Config`] trait still
//! allows saving and loading a configuration as TOML or RON.

use serde::{Deserialize, Serialize};

pub use crate::config::{Config, ConfigError};
use crate::render::api::PolygonMode;

/// Window title shared by both tutorial steps
pub const DEFAULT_TITLE: &str = "LearnOpenGL";

/// Clear color of the minimal step
pub const MINIMAL_CLEAR_COLOR: [f32; 4] = [0.2, 0.3, 0.3, 1.0];

/// Clear color of the vertex-array step
pub const VERTEX_ARRAY_CLEAR_COLOR: [f32; 4] = [0.0, 0.0, 0.0, 0.0];

/// Which tutorial step to render
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TutorialStep {
    /// Buffer upload only, no vertex array object, filled polygons
    Minimal,
    /// Vertex array object with slot 0 layout, wireframe polygons
    VertexArray,
}

impl TutorialStep {
    /// Whether geometry upload records its layout in a vertex array object
    pub fn uses_vertex_array(self) -> bool {
        matches!(self, Self::VertexArray)
    }
}

/// # Window Configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowConfig {
    /// Client area width in screen coordinates
    pub width: u32,
    /// Client area height in screen coordinates
    pub height: u32,
    /// Title bar text
    pub title: String,
    /// Whether the user may resize the window
    pub resizable: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            title: DEFAULT_TITLE.to_string(),
            resizable: true,
        }
    }
}

/// # OpenGL Context Configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextConfig {
    /// Requested major version
    pub version_major: u32,
    /// Requested minor version
    pub version_minor: u32,
    /// Request the core profile instead of compatibility
    pub core_profile: bool,
    /// Request a forward-compatible context (required on macOS)
    pub forward_compatible: bool,
    /// Buffer swaps to wait for per presented frame, 0 disables vsync
    pub swap_interval: u32,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            version_major: 3,
            version_minor: 3,
            core_profile: true,
            forward_compatible: cfg!(target_os = "macos"),
            swap_interval: 1,
        }
    }
}

/// # Render Configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Tutorial step
    pub step: TutorialStep,
    /// Background clear color [R, G, B, A] (0.0-1.0 range)
    pub clear_color: [f32; 4],
    /// Rasterization mode for the triangle
    pub polygon_mode: PolygonMode,
}

impl RenderConfig {
    /// Settings of a tutorial step
    pub fn for_step(step: TutorialStep) -> Self {
        match step {
            TutorialStep::Minimal => Self {
                step,
                clear_color: MINIMAL_CLEAR_COLOR,
                polygon_mode: PolygonMode::Fill,
            },
            TutorialStep::VertexArray => Self {
                step,
                clear_color: VERTEX_ARRAY_CLEAR_COLOR,
                polygon_mode: PolygonMode::Line,
            },
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self::for_step(TutorialStep::VertexArray)
    }
}

/// # Complete Tutorial Configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TutorialConfig {
    /// Stop before the frame loop when the shader program fails to build
    ///
    /// Off by default: the tutorial logs the diagnostics and keeps rendering.
    pub abort_on_shader_error: bool,
    /// Window settings
    pub window: WindowConfig,
    /// Context settings
    pub context: ContextConfig,
    /// Rendering settings
    pub render: RenderConfig,
}

impl TutorialConfig {
    /// Configuration of a tutorial step with all other settings at their defaults
    pub fn for_step(step: TutorialStep) -> Self {
        Self {
            abort_on_shader_error: false,
            window: WindowConfig::default(),
            context: ContextConfig::default(),
            render: RenderConfig::for_step(step),
        }
    }

    /// Set window size
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.window.width = width;
        self.window.height = height;
        self
    }

    /// Set window title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.window.title = title.into();
        self
    }

    /// Set background clear color [R, G, B, A] (0.0-1.0 range)
    pub fn with_clear_color(mut self, color: [f32; 4]) -> Self {
        self.render.clear_color = color;
        self
    }

    /// Set polygon rasterization mode
    pub fn with_polygon_mode(mut self, mode: PolygonMode) -> Self {
        self.render.polygon_mode = mode;
        self
    }

    /// Abort instead of rendering when the shader program fails to build
    pub fn with_abort_on_shader_error(mut self, abort: bool) -> Self {
        self.abort_on_shader_error = abort;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window.width == 0 || self.window.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "window size must be non-zero, got {}x{}",
                self.window.width, self.window.height
            )));
        }

        if (self.context.version_major, self.context.version_minor) < (3, 3) {
            return Err(ConfigError::Invalid(format!(
                "OpenGL 3.3 or newer is required for the embedded shaders, got {}.{}",
                self.context.version_major, self.context.version_minor
            )));
        }

        if self.render.clear_color.iter().any(|c| !(0.0..=1.0).contains(c)) {
            return Err(ConfigError::Invalid(format!(
                "clear color components must be within 0.0-1.0, got {:?}",
                self.render.clear_color
            )));
        }

        Ok(())
    }
}

impl Default for TutorialConfig {
    fn default() -> Self {
        Self::for_step(TutorialStep::VertexArray)
    }
}

impl Config for TutorialConfig {}
