//! Window operations used by the frame loop

use glfw::{Key, WindowEvent};

/// Window backend trait
///
/// Covers the close flag, the per-frame key query, presentation and event
/// delivery. Window operations happen on the thread that created the window.
pub trait WindowBackend {
    /// Check if the window should close
    ///
    /// True once the OS delivered a close request or the application set the flag.
    fn should_close(&self) -> bool;

    /// Set whether the window should close
    fn set_should_close(&mut self, should_close: bool);

    /// Whether `key` is currently held down
    fn key_pressed(&self, key: Key) -> bool;

    /// Present the back buffer
    ///
    /// Blocks until the swap can happen when a swap interval is active.
    fn swap_buffers(&mut self);

    /// Process pending OS events
    fn poll_events(&mut self);

    /// Take the events collected by the last [`poll_events`](Self::poll_events)
    fn drain_events(&mut self) -> Vec<WindowEvent>;

    /// Current framebuffer size in pixels
    ///
    /// May differ from the window size on HiDPI displays.
    fn framebuffer_size(&self) -> (u32, u32);
}
