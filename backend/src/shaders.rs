use super::error::BackendError;
use super::gpu::{truncate_info_log, Gpu, ShaderStage};
use std::fmt;

/// GLSL source for the vertex/fragment pair.
#[derive(Debug, Clone, PartialEq)]
pub struct ShaderSources {
    pub vertex: String,
    pub fragment: String,
}

impl ShaderSources {
    pub fn from_str(vertex_code: &str, fragment_code: &str) -> ShaderSources {
        ShaderSources {
            vertex: vertex_code.to_string(),
            fragment: fragment_code.to_string(),
        }
    }
}

/// What to do when a stage fails to compile or the program fails to link.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum BuildPolicy {
    /// Log the driver output and keep going with whatever the driver produced.
    #[default]
    Continue,
    /// Release everything built so far and report `BackendError::ShaderBuild`.
    Abort,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildState {
    Uncompiled,
    Compiled,
    Linked,
    Ready,
    Failed,
}

impl BuildState {
    fn advance(self, ok: bool) -> BuildState {
        match (self, ok) {
            (BuildState::Failed, _) | (_, false) => BuildState::Failed,
            (BuildState::Uncompiled, true) => BuildState::Compiled,
            (BuildState::Compiled, true) => BuildState::Linked,
            (BuildState::Linked, true) | (BuildState::Ready, true) => BuildState::Ready,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildStep {
    Compile(ShaderStage),
    Link,
}

impl fmt::Display for BuildStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildStep::Compile(stage) => write!(f, "{} shader compilation", stage.name()),
            BuildStep::Link => write!(f, "shader program linking"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildFailure {
    pub step: BuildStep,
    pub log: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildReport {
    pub state: BuildState,
    pub failures: Vec<BuildFailure>,
}

impl BuildReport {
    pub fn is_ready(&self) -> bool {
        self.state == BuildState::Ready
    }

    pub fn summary(&self) -> String {
        self.failures
            .iter()
            .map(|f| format!("{} failed: {}", f.step, f.log))
            .collect::<Vec<_>>()
            .join("; ")
    }

    fn record(&mut self, step: BuildStep, log: &str) {
        let log = truncate_info_log(log);
        log::error!("{} failed\n{}", step, log);
        self.failures.push(BuildFailure { step, log });
    }
}

/// A linked program object. Deleted on drop.
pub struct Program<'g, G: Gpu> {
    gpu: &'g G,
    program_id: u32,
}

impl<'g, G: Gpu> Program<'g, G> {
    pub fn id(&self) -> u32 {
        self.program_id
    }

    pub fn use_program(&self) {
        self.gpu.use_program(self.program_id);
    }
}

impl<G: Gpu> Drop for Program<'_, G> {
    fn drop(&mut self) {
        self.gpu.delete_program(self.program_id);
        log::debug!("deleted program {}", self.program_id);
    }
}

/// The program together with how its build went.
pub struct ProgramBuild<'g, G: Gpu> {
    pub program: Program<'g, G>,
    pub report: BuildReport,
}

impl<'g, G: Gpu> ProgramBuild<'g, G> {
    /// Compiles both stages, links them and releases the stage objects.
    ///
    /// Driver failures never stop the sequence: every step is attempted and
    /// its log recorded, leaving the decision to `into_program`.
    pub fn new(gpu: &'g G, sources: &ShaderSources) -> Self {
        let mut report = BuildReport {
            state: BuildState::Uncompiled,
            failures: Vec::new(),
        };

        let vertex_shader = Self::compile(gpu, ShaderStage::Vertex, &sources.vertex, &mut report);
        let fragment_shader =
            Self::compile(gpu, ShaderStage::Fragment, &sources.fragment, &mut report);
        report.state = report.state.advance(report.failures.is_empty());

        let shader_program = gpu.create_program();
        gpu.attach_shader(shader_program, vertex_shader);
        gpu.attach_shader(shader_program, fragment_shader);
        gpu.link_program(shader_program);

        let linked = gpu.link_status(shader_program);
        if !linked {
            report.record(BuildStep::Link, &gpu.program_info_log(shader_program));
        }
        report.state = report.state.advance(linked);

        // not needed anymore, the program keeps what it linked
        gpu.delete_shader(vertex_shader);
        gpu.delete_shader(fragment_shader);
        report.state = report.state.advance(true);

        log::debug!(
            "program {} built, state {:?}",
            shader_program,
            report.state
        );

        ProgramBuild {
            program: Program {
                gpu,
                program_id: shader_program,
            },
            report,
        }
    }

    fn compile(gpu: &G, stage: ShaderStage, code: &str, report: &mut BuildReport) -> u32 {
        let shader_id = gpu.create_shader(stage);
        gpu.shader_source(shader_id, code);
        gpu.compile_shader(shader_id);

        if !gpu.compile_status(shader_id) {
            report.record(BuildStep::Compile(stage), &gpu.shader_info_log(shader_id));
        }
        shader_id
    }

    pub fn into_program(self, policy: BuildPolicy) -> Result<Program<'g, G>, BackendError> {
        if self.report.is_ready() || policy == BuildPolicy::Continue {
            return Ok(self.program);
        }
        Err(BackendError::ShaderBuild(self.report.summary()))
    }
}
