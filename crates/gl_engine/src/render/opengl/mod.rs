//! OpenGL backend
//!
//! Function-pointer loading and the [`GraphicsApi`](crate::render::api::GraphicsApi)
//! implementation over the `gl` crate.

pub mod loader;
mod api;

pub use api::GlApi;
pub use loader::{LoaderError, LoaderResult, REQUIRED_ENTRY_POINTS};
