//! Per-frame render loop
//!
//! Two states: [`LoopState::Running`] until the window's close flag is seen at
//! the top of an iteration, then [`LoopState::CloseRequested`]. The flag is
//! raised either by the OS or by the input check when the close key is held.
//!
//! Each running iteration does, in order: input check, clear, draw, present,
//! event processing. Framebuffer size events update the viewport.

use glfw::{Key, WindowEvent};
use log::{debug, info};

use crate::render::api::{ClearFlags, GraphicsApi};
use crate::render::mesh::TriangleMesh;
use crate::render::shader::ShaderProgram;
use crate::render::viewport::Viewport;
use crate::render::window::WindowBackend;

/// Key that requests the window to close
pub const CLOSE_KEY: Key = Key::Escape;

/// Frame loop state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    /// Rendering frames
    Running,
    /// Close observed; the loop exits
    CloseRequested,
}

/// What raised the close flag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
    /// The close key was held during an input check
    CloseKey,
    /// The window system asked the window to close
    WindowClosed,
}

/// Clears, draws the triangle and presents until the window closes
#[derive(Debug)]
pub struct FrameLoop {
    clear_color: [f32; 4],
    viewport: Viewport,
    state: LoopState,
    close_reason: Option<CloseReason>,
    frames_rendered: u64,
}

impl FrameLoop {
    /// Loop clearing to `clear_color`, starting from `viewport`
    pub fn new(clear_color: [f32; 4], viewport: Viewport) -> Self {
        Self {
            clear_color,
            viewport,
            state: LoopState::Running,
            close_reason: None,
            frames_rendered: 0,
        }
    }

    /// Current state
    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Active viewport
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Frames presented so far
    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    /// What ended the loop, once it has ended
    pub fn close_reason(&self) -> Option<CloseReason> {
        self.close_reason
    }

    /// Run until close is requested and return the number of frames rendered
    pub fn run(
        &mut self,
        window: &mut dyn WindowBackend,
        api: &mut dyn GraphicsApi,
        program: &ShaderProgram,
        mesh: &TriangleMesh,
    ) -> u64 {
        while self.poll_state(window) == LoopState::Running {
            self.render_frame(window, api, program, mesh);
        }
        info!(
            "Frame loop finished after {} frames ({:?})",
            self.frames_rendered,
            self.close_reason.unwrap_or(CloseReason::WindowClosed)
        );
        self.frames_rendered
    }

    /// Move to [`LoopState::CloseRequested`] if the window's close flag is set
    pub fn poll_state(&mut self, window: &dyn WindowBackend) -> LoopState {
        if self.state == LoopState::Running && window.should_close() {
            self.state = LoopState::CloseRequested;
            self.close_reason.get_or_insert(CloseReason::WindowClosed);
        }
        self.state
    }

    /// Raise the close flag if the close key is held
    pub fn process_input(&mut self, window: &mut dyn WindowBackend) {
        if window.key_pressed(CLOSE_KEY) && !window.should_close() {
            info!("Close key pressed, requesting window close");
            window.set_should_close(true);
            self.close_reason = Some(CloseReason::CloseKey);
        }
    }

    /// One iteration: input, clear, draw, present, events
    pub fn render_frame(
        &mut self,
        window: &mut dyn WindowBackend,
        api: &mut dyn GraphicsApi,
        program: &ShaderProgram,
        mesh: &TriangleMesh,
    ) {
        self.process_input(window);

        api.clear_color(self.clear_color);
        api.clear(ClearFlags::COLOR);

        program.activate(api);
        mesh.draw(api);

        window.swap_buffers();
        self.frames_rendered += 1;

        window.poll_events();
        for event in window.drain_events() {
            self.handle_event(api, event);
        }
    }

    fn handle_event(&mut self, api: &mut dyn GraphicsApi, event: WindowEvent) {
        match event {
            WindowEvent::FramebufferSize(width, height) => {
                self.viewport = Viewport::from_framebuffer_event(width, height).apply(api);
                debug!("Framebuffer resized to {}x{}", self.viewport.width, self.viewport.height);
            }
            WindowEvent::Close => {
                debug!("Window close requested by the window system");
            }
            _ => {}
        }
    }
}
