//! Shader compilation and program linking
//!
//! Builds the tutorial's single program from two embedded GLSL sources. A
//! failed compile or link does not stop the build: every step still runs and
//! the outcome of each is recorded in a [`ShaderBuild`], which the caller can
//! log and continue with, or turn into a [`ShaderError`].

use log::error;
use thiserror::Error;

use crate::render::api::{GraphicsApi, ProgramId, ShaderId, ShaderStage};

/// Vertex stage: passes `location = 0` positions straight through
pub const VERTEX_SHADER_SOURCE: &str = include_str!("../../shaders/triangle.vert");

/// Fragment stage: solid orange
pub const FRAGMENT_SHADER_SOURCE: &str = include_str!("../../shaders/triangle.frag");

/// Upper bound, in bytes, on diagnostic text kept from an info log
pub const INFO_LOG_LIMIT: usize = 512;

/// Shader build errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShaderError {
    /// A stage failed to compile
    #[error("{stage} shader compilation failed: {log}")]
    Compile {
        /// Failing stage
        stage: ShaderStage,
        /// Bounded compiler log
        log: String,
    },

    /// The program failed to link
    #[error("shader program linking failed: {log}")]
    Link {
        /// Bounded linker log
        log: String,
    },
}

/// Outcome of one compile or link step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildStatus {
    /// The step reported success
    Succeeded,
    /// The step failed with the given bounded diagnostic
    Failed {
        /// Info log, at most [`INFO_LOG_LIMIT`] bytes
        log: String,
    },
}

impl BuildStatus {
    /// Whether the step succeeded
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded)
    }

    fn from_query(ok: bool, log: impl FnOnce() -> String) -> Self {
        if ok {
            Self::Succeeded
        } else {
            Self::Failed { log: bound_log(log()) }
        }
    }
}

/// Cut `log` to at most [`INFO_LOG_LIMIT`] bytes without splitting a character
pub fn bound_log(mut log: String) -> String {
    if log.len() > INFO_LOG_LIMIT {
        let mut end = INFO_LOG_LIMIT;
        while !log.is_char_boundary(end) {
            end -= 1;
        }
        log.truncate(end);
    }
    log
}

/// A linked (or attempted) program object
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShaderProgram {
    id: ProgramId,
}

impl ShaderProgram {
    /// Program object name
    pub fn id(&self) -> ProgramId {
        self.id
    }

    /// Make this program the current rendering pipeline
    pub fn activate(&self, api: &mut dyn GraphicsApi) {
        api.use_program(self.id);
    }
}

/// Per-step results of building the program
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderBuild {
    program: ShaderProgram,
    /// Vertex stage compile outcome
    pub vertex: BuildStatus,
    /// Fragment stage compile outcome
    pub fragment: BuildStatus,
    /// Link outcome
    pub link: BuildStatus,
    stages: [ShaderId; 2],
}

impl ShaderBuild {
    /// Whether both stages compiled and the program linked
    pub fn is_ok(&self) -> bool {
        self.vertex.is_success() && self.fragment.is_success() && self.link.is_success()
    }

    /// The program object, usable or not
    pub fn program(&self) -> ShaderProgram {
        self.program
    }

    /// Names the stage objects had before they were released
    pub fn stage_ids(&self) -> [ShaderId; 2] {
        self.stages
    }

    /// Every failed step, in build order
    pub fn errors(&self) -> Vec<ShaderError> {
        let mut errors = Vec::new();
        let stages = [(ShaderStage::Vertex, &self.vertex), (ShaderStage::Fragment, &self.fragment)];
        for (stage, status) in stages {
            if let BuildStatus::Failed { log } = status {
                errors.push(ShaderError::Compile { stage, log: log.clone() });
            }
        }
        if let BuildStatus::Failed { log } = &self.link {
            errors.push(ShaderError::Link { log: log.clone() });
        }
        errors
    }

    /// Log every failed step at error level
    pub fn log_failures(&self) {
        for err in self.errors() {
            error!("{err}");
        }
    }

    /// The program if every step succeeded, otherwise the first failure
    pub fn into_result(self) -> Result<ShaderProgram, ShaderError> {
        match self.errors().into_iter().next() {
            Some(err) => Err(err),
            None => Ok(self.program),
        }
    }
}

/// Compiles a vertex and a fragment stage and links them into one program
#[derive(Debug, Clone, Copy)]
pub struct ShaderBuilder<'a> {
    vertex_source: &'a str,
    fragment_source: &'a str,
}

impl Default for ShaderBuilder<'static> {
    fn default() -> Self {
        Self::new(VERTEX_SHADER_SOURCE, FRAGMENT_SHADER_SOURCE)
    }
}

impl<'a> ShaderBuilder<'a> {
    /// Builder for the given GLSL sources
    pub fn new(vertex_source: &'a str, fragment_source: &'a str) -> Self {
        Self { vertex_source, fragment_source }
    }

    /// Compile both stages, link them, and release the stage objects
    ///
    /// Runs every step even after a failure. The stage objects are detached
    /// and deleted once the link has been attempted, so only the program
    /// object remains alive.
    pub fn build(&self, api: &mut dyn GraphicsApi) -> ShaderBuild {
        let (vertex_id, vertex) = compile_stage(api, ShaderStage::Vertex, self.vertex_source);
        let (fragment_id, fragment) =
            compile_stage(api, ShaderStage::Fragment, self.fragment_source);

        let program = api.create_program();
        api.attach_shader(program, vertex_id);
        api.attach_shader(program, fragment_id);
        api.link_program(program);
        let link = BuildStatus::from_query(api.program_link_status(program), || {
            api.program_info_log(program)
        });

        for shader in [vertex_id, fragment_id] {
            api.detach_shader(program, shader);
            api.delete_shader(shader);
        }

        ShaderBuild {
            program: ShaderProgram { id: program },
            vertex,
            fragment,
            link,
            stages: [vertex_id, fragment_id],
        }
    }
}

fn compile_stage(
    api: &mut dyn GraphicsApi,
    stage: ShaderStage,
    source: &str,
) -> (ShaderId, BuildStatus) {
    let shader = api.create_shader(stage);
    api.shader_source(shader, source);
    api.compile_shader(shader);
    let status =
        BuildStatus::from_query(api.shader_compile_status(shader), || api.shader_info_log(shader));
    (shader, status)
}
