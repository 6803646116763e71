//! Window management subsystem
//!
//! The frame loop only needs a handful of window operations, named by the
//! [`WindowBackend`] trait. [`GlfwWindow`] is the production implementation;
//! tests drive the loop with a scripted backend instead.

pub mod backend;
pub mod glfw_window;

pub use backend::WindowBackend;
pub use glfw_window::{GlfwWindow, WindowError, WindowResult};
