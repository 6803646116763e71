//! Test doubles for the graphics API and the window
//!
//! `RecordingApi` keeps an ordered log of every call plus enough object state
//! (shader sources, compile and link results, live names) to answer queries the
//! way a driver would. `ScriptedWindow` replays key presses and OS events on
//! chosen frames.

use std::collections::HashMap;

use glfw::{Key, WindowEvent};

use crate::render::api::{
    BufferId, BufferTarget, BufferUsage, ClearFlags, ContextInfo, GraphicsApi, PolygonMode,
    PrimitiveTopology, ProgramId, ShaderId, ShaderStage, VertexArrayId,
};
use crate::render::window::WindowBackend;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum GlCall {
    Viewport { x: i32, y: i32, width: u32, height: u32 },
    ClearColor([f32; 4]),
    Clear(ClearFlags),
    CreateShader(ShaderStage, ShaderId),
    ShaderSource(ShaderId),
    CompileShader(ShaderId),
    DeleteShader(ShaderId),
    CreateProgram(ProgramId),
    AttachShader(ProgramId, ShaderId),
    DetachShader(ProgramId, ShaderId),
    LinkProgram(ProgramId),
    UseProgram(ProgramId),
    CreateBuffer(BufferId),
    BindBuffer(BufferTarget, BufferId),
    BufferData { target: BufferTarget, data: Vec<u8>, usage: BufferUsage },
    CreateVertexArray(VertexArrayId),
    BindVertexArray(VertexArrayId),
    VertexAttribPointer { index: u32, components: i32, stride: i32, offset: usize },
    EnableVertexAttribArray(u32),
    PolygonMode(PolygonMode),
    DrawArrays { topology: PrimitiveTopology, first: i32, count: i32 },
}

#[derive(Debug)]
struct MockShader {
    source: String,
    compiled: bool,
    log: String,
}

#[derive(Debug, Default)]
struct MockProgram {
    attached: Vec<ShaderId>,
    linked: bool,
    log: String,
}

/// Graphics API that records calls instead of talking to a driver
///
/// A stage compiles when its source declares a `#version`, defines `main` and
/// has balanced braces. A program links when one compiled vertex and one
/// compiled fragment stage are attached.
#[derive(Debug, Default)]
pub(crate) struct RecordingApi {
    pub calls: Vec<GlCall>,
    next_name: u32,
    shaders: HashMap<ShaderId, MockShader>,
    stages: HashMap<ShaderId, ShaderStage>,
    programs: HashMap<ProgramId, MockProgram>,
    compile_log_override: Option<String>,
}

impl RecordingApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report `log` for every failed compile instead of the generated message
    pub fn with_compile_log(mut self, log: impl Into<String>) -> Self {
        self.compile_log_override = Some(log.into());
        self
    }

    fn next_name(&mut self) -> u32 {
        self.next_name += 1;
        self.next_name
    }

    pub fn draw_calls(&self) -> Vec<&GlCall> {
        self.calls.iter().filter(|c| matches!(c, GlCall::DrawArrays { .. })).collect()
    }

    pub fn position_of(&self, call: &GlCall) -> Option<usize> {
        self.calls.iter().position(|c| c == call)
    }

    pub fn last_viewport(&self) -> Option<(i32, i32, u32, u32)> {
        self.calls.iter().rev().find_map(|c| match *c {
            GlCall::Viewport { x, y, width, height } => Some((x, y, width, height)),
            _ => None,
        })
    }

    fn check_source(source: &str) -> Result<(), String> {
        if !source.trim_start().starts_with("#version") {
            return Err("0:1(1): error: #version directive missing".to_string());
        }
        if !source.contains("void main") {
            return Err("0:1(1): error: main function not defined".to_string());
        }
        let mut depth = 0i32;
        for (line, text) in source.lines().enumerate() {
            for ch in text.chars() {
                match ch {
                    '{' => depth += 1,
                    '}' => depth -= 1,
                    _ => {}
                }
                if depth < 0 {
                    return Err(format!("0:{}(1): error: syntax error, unexpected '}}'", line + 1));
                }
            }
        }
        if depth != 0 {
            return Err("0:1(1): error: syntax error, unexpected end of file".to_string());
        }
        Ok(())
    }
}

impl GraphicsApi for RecordingApi {
    fn context_info(&self) -> ContextInfo {
        ContextInfo {
            vendor: "Recording".to_string(),
            renderer: "RecordingApi".to_string(),
            version: "3.3.0 Core".to_string(),
            shading_language: "3.30".to_string(),
        }
    }

    fn viewport(&mut self, x: i32, y: i32, width: u32, height: u32) {
        self.calls.push(GlCall::Viewport { x, y, width, height });
    }

    fn clear_color(&mut self, color: [f32; 4]) {
        self.calls.push(GlCall::ClearColor(color));
    }

    fn clear(&mut self, flags: ClearFlags) {
        self.calls.push(GlCall::Clear(flags));
    }

    fn create_shader(&mut self, stage: ShaderStage) -> ShaderId {
        let id = ShaderId(self.next_name());
        let shader = MockShader { source: String::new(), compiled: false, log: String::new() };
        self.shaders.insert(id, shader);
        self.stages.insert(id, stage);
        self.calls.push(GlCall::CreateShader(stage, id));
        id
    }

    fn shader_source(&mut self, shader: ShaderId, source: &str) {
        if let Some(s) = self.shaders.get_mut(&shader) {
            s.source = source.to_string();
        }
        self.calls.push(GlCall::ShaderSource(shader));
    }

    fn compile_shader(&mut self, shader: ShaderId) {
        let override_log = self.compile_log_override.clone();
        if let Some(s) = self.shaders.get_mut(&shader) {
            match Self::check_source(&s.source) {
                Ok(()) => {
                    s.compiled = true;
                    s.log.clear();
                }
                Err(message) => {
                    s.compiled = false;
                    s.log = override_log.unwrap_or(message);
                }
            }
        }
        self.calls.push(GlCall::CompileShader(shader));
    }

    fn shader_compile_status(&self, shader: ShaderId) -> bool {
        self.shaders.get(&shader).is_some_and(|s| s.compiled)
    }

    fn shader_info_log(&self, shader: ShaderId) -> String {
        self.shaders.get(&shader).map(|s| s.log.clone()).unwrap_or_default()
    }

    fn delete_shader(&mut self, shader: ShaderId) {
        self.shaders.remove(&shader);
        self.calls.push(GlCall::DeleteShader(shader));
    }

    fn is_shader(&self, shader: ShaderId) -> bool {
        self.shaders.contains_key(&shader)
    }

    fn create_program(&mut self) -> ProgramId {
        let id = ProgramId(self.next_name());
        self.programs.insert(id, MockProgram::default());
        self.calls.push(GlCall::CreateProgram(id));
        id
    }

    fn attach_shader(&mut self, program: ProgramId, shader: ShaderId) {
        if let Some(p) = self.programs.get_mut(&program) {
            p.attached.push(shader);
        }
        self.calls.push(GlCall::AttachShader(program, shader));
    }

    fn detach_shader(&mut self, program: ProgramId, shader: ShaderId) {
        if let Some(p) = self.programs.get_mut(&program) {
            p.attached.retain(|&s| s != shader);
        }
        self.calls.push(GlCall::DetachShader(program, shader));
    }

    fn link_program(&mut self, program: ProgramId) {
        let compiled_stages: Vec<ShaderStage> = self
            .programs
            .get(&program)
            .map(|p| {
                p.attached
                    .iter()
                    .filter(|id| self.shader_compile_status(**id))
                    .filter_map(|id| self.stages.get(id).copied())
                    .collect()
            })
            .unwrap_or_default();
        let attached = self.programs.get(&program).map_or(0, |p| p.attached.len());

        if let Some(p) = self.programs.get_mut(&program) {
            let complete = compiled_stages.contains(&ShaderStage::Vertex)
                && compiled_stages.contains(&ShaderStage::Fragment);
            if complete && compiled_stages.len() == attached {
                p.linked = true;
                p.log.clear();
            } else {
                p.linked = false;
                p.log = "error: linking with uncompiled/unspecialized shader".to_string();
            }
        }
        self.calls.push(GlCall::LinkProgram(program));
    }

    fn program_link_status(&self, program: ProgramId) -> bool {
        self.programs.get(&program).is_some_and(|p| p.linked)
    }

    fn program_info_log(&self, program: ProgramId) -> String {
        self.programs.get(&program).map(|p| p.log.clone()).unwrap_or_default()
    }

    fn use_program(&mut self, program: ProgramId) {
        self.calls.push(GlCall::UseProgram(program));
    }

    fn create_buffer(&mut self) -> BufferId {
        let id = BufferId(self.next_name());
        self.calls.push(GlCall::CreateBuffer(id));
        id
    }

    fn bind_buffer(&mut self, target: BufferTarget, buffer: BufferId) {
        self.calls.push(GlCall::BindBuffer(target, buffer));
    }

    fn buffer_data(&mut self, target: BufferTarget, data: &[u8], usage: BufferUsage) {
        self.calls.push(GlCall::BufferData { target, data: data.to_vec(), usage });
    }

    fn create_vertex_array(&mut self) -> VertexArrayId {
        let id = VertexArrayId(self.next_name());
        self.calls.push(GlCall::CreateVertexArray(id));
        id
    }

    fn bind_vertex_array(&mut self, vertex_array: VertexArrayId) {
        self.calls.push(GlCall::BindVertexArray(vertex_array));
    }

    fn vertex_attrib_pointer(&mut self, index: u32, components: i32, stride: i32, offset: usize) {
        self.calls.push(GlCall::VertexAttribPointer { index, components, stride, offset });
    }

    fn enable_vertex_attrib_array(&mut self, index: u32) {
        self.calls.push(GlCall::EnableVertexAttribArray(index));
    }

    fn polygon_mode(&mut self, mode: PolygonMode) {
        self.calls.push(GlCall::PolygonMode(mode));
    }

    fn draw_arrays(&mut self, topology: PrimitiveTopology, first: i32, count: i32) {
        self.calls.push(GlCall::DrawArrays { topology, first, count });
    }
}

/// Frames after which a scripted window closes itself if nothing else did
const RUNAWAY_FRAME_LIMIT: usize = 1_000;

/// Window that replays a fixed script of input and OS events
///
/// Frame `n` is the `n`th loop iteration, counted from zero. Key presses are
/// visible to the input check at the start of their frame and stay held.
/// Events are delivered by the poll at the end of their frame.
#[derive(Debug)]
pub(crate) struct ScriptedWindow {
    should_close: bool,
    framebuffer: (u32, u32),
    frame: usize,
    key_presses: Vec<(usize, Key)>,
    events: Vec<(usize, WindowEvent)>,
    pending: Vec<WindowEvent>,
    pub swaps: usize,
    pub polls: usize,
}

impl ScriptedWindow {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            should_close: false,
            framebuffer: (width, height),
            frame: 0,
            key_presses: Vec::new(),
            events: Vec::new(),
            pending: Vec::new(),
            swaps: 0,
            polls: 0,
        }
    }

    /// Hold `key` down from the start of `frame`
    pub fn press_key_on_frame(mut self, frame: usize, key: Key) -> Self {
        self.key_presses.push((frame, key));
        self
    }

    /// Deliver `event` with the poll at the end of `frame`
    pub fn event_on_frame(mut self, frame: usize, event: WindowEvent) -> Self {
        self.events.push((frame, event));
        self
    }
}

impl WindowBackend for ScriptedWindow {
    fn should_close(&self) -> bool {
        self.should_close
    }

    fn set_should_close(&mut self, should_close: bool) {
        self.should_close = should_close;
    }

    fn key_pressed(&self, key: Key) -> bool {
        self.key_presses.iter().any(|&(frame, k)| k == key && self.frame >= frame)
    }

    fn swap_buffers(&mut self) {
        self.swaps += 1;
    }

    fn poll_events(&mut self) {
        self.polls += 1;
        let frame = self.frame;
        for (_, event) in self.events.iter().filter(|(f, _)| *f == frame) {
            match event {
                WindowEvent::Close => self.should_close = true,
                WindowEvent::FramebufferSize(w, h) => {
                    self.framebuffer =
                        (u32::try_from(*w).unwrap_or(0), u32::try_from(*h).unwrap_or(0));
                }
                _ => {}
            }
            self.pending.push(event.clone());
        }
        self.frame += 1;
        if self.frame >= RUNAWAY_FRAME_LIMIT {
            self.should_close = true;
        }
    }

    fn drain_events(&mut self) -> Vec<WindowEvent> {
        std::mem::take(&mut self.pending)
    }

    fn framebuffer_size(&self) -> (u32, u32) {
        self.framebuffer
    }
}
