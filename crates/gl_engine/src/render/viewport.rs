//! Viewport tracking

use crate::render::api::GraphicsApi;

/// Rectangle of the framebuffer that rendering maps onto
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    /// Left edge in pixels
    pub x: i32,
    /// Bottom edge in pixels
    pub y: i32,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl Viewport {
    /// Viewport covering a whole `width` x `height` framebuffer
    pub fn covering(width: u32, height: u32) -> Self {
        Self { x: 0, y: 0, width, height }
    }

    /// Viewport for a GLFW framebuffer size event
    ///
    /// GLFW reports sizes as `i32`; negative values never describe a real
    /// surface and are clamped to zero.
    pub fn from_framebuffer_event(width: i32, height: i32) -> Self {
        Self::covering(u32::try_from(width).unwrap_or(0), u32::try_from(height).unwrap_or(0))
    }

    /// Make this the active viewport
    pub fn apply(self, api: &mut dyn GraphicsApi) -> Self {
        api.viewport(self.x, self.y, self.width, self.height);
        self
    }
}
