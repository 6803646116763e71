//! # GL Engine
//!
//! The "hello triangle" OpenGL tutorial as a small library: open a GLFW window
//! with an OpenGL 3.3 core context, load the GL function pointers, compile and
//! link one shader program, upload one triangle and draw it every frame until
//! the window is closed or Escape is pressed.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use gl_engine::prelude::*;
//!
//! fn main() -> Result<(), EngineError> {
//!     gl_engine::foundation::logging::init();
//!     let config = TutorialConfig::for_step(TutorialStep::VertexArray);
//!     let summary = gl_engine::run(&config)?;
//!     println!("rendered {} frames", summary.frames_rendered);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod core;
pub mod foundation;
pub mod render;

mod engine;

pub use engine::{run, run_with, run_with_shaders, EngineError, RunSummary};

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        run, EngineError, RunSummary,
        core::config::{Config, TutorialConfig, TutorialStep},
        render::{CloseReason, PolygonMode},
    };
}
