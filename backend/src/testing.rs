use crate::gpu::{Gpu, ShaderStage};
use crate::system::{IoEvent, Platform};
use log::{Level, Log, Metadata, Record};
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::sync::{Mutex, Once};
use std::thread::{self, ThreadId};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Viewport(i32, i32, i32, i32),
    ClearColor([f32; 4]),
    Clear,
    GenVertexArray(u32),
    GenBuffer(u32),
    BindVertexArray(u32),
    BindArrayBuffer(u32),
    BufferDataStatic(Vec<f32>),
    VertexAttribF32 {
        index: u32,
        components: i32,
        stride: usize,
        offset: usize,
    },
    EnableVertexAttrib(u32),
    CreateShader(ShaderStage, u32),
    ShaderSource(u32),
    CompileShader(u32),
    DeleteShader(u32),
    CreateProgram(u32),
    AttachShader(u32, u32),
    LinkProgram(u32),
    UseProgram(u32),
    DrawTriangles(i32, i32),
    DeleteVertexArray(u32),
    DeleteBuffer(u32),
    DeleteProgram(u32),
    // not a GL call: marks a buffer swap when a ScriptedPlatform shares the log
    Swap,
}

/// Records every call. Shader sources containing `#error` fail to compile;
/// `fail_link` makes linking fail.
#[derive(Default)]
pub struct RecordingGpu {
    calls: RefCell<Vec<Call>>,
    next_id: Cell<u32>,
    sources: RefCell<Vec<(u32, String)>>,
    pub fail_link: bool,
    pub error_log: String,
}

impl RecordingGpu {
    pub fn new() -> Self {
        RecordingGpu {
            error_log: "0:2(1): error: syntax error, unexpected IDENTIFIER".to_string(),
            ..Default::default()
        }
    }

    pub fn failing_link() -> Self {
        RecordingGpu {
            fail_link: true,
            ..Self::new()
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls.borrow().iter().filter(|c| pred(c)).count()
    }

    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    pub fn push(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }

    fn id(&self) -> u32 {
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        id
    }

    fn source_ok(&self, shader: u32) -> bool {
        self.sources
            .borrow()
            .iter()
            .rev()
            .find(|(id, _)| *id == shader)
            .map(|(_, src)| !src.contains("#error"))
            .unwrap_or(false)
    }
}

impl Gpu for RecordingGpu {
    fn viewport(&self, x: i32, y: i32, width: i32, height: i32) {
        self.push(Call::Viewport(x, y, width, height));
    }
    fn clear_color(&self, rgba: [f32; 4]) {
        self.push(Call::ClearColor(rgba));
    }
    fn clear(&self) {
        self.push(Call::Clear);
    }
    fn gen_vertex_array(&self) -> u32 {
        let id = self.id();
        self.push(Call::GenVertexArray(id));
        id
    }
    fn gen_buffer(&self) -> u32 {
        let id = self.id();
        self.push(Call::GenBuffer(id));
        id
    }
    fn bind_vertex_array(&self, vao: u32) {
        self.push(Call::BindVertexArray(vao));
    }
    fn bind_array_buffer(&self, vbo: u32) {
        self.push(Call::BindArrayBuffer(vbo));
    }
    fn buffer_data_static(&self, data: &[f32]) {
        self.push(Call::BufferDataStatic(data.to_vec()));
    }
    fn vertex_attrib_f32(&self, index: u32, components: i32, stride: usize, offset: usize) {
        self.push(Call::VertexAttribF32 {
            index,
            components,
            stride,
            offset,
        });
    }
    fn enable_vertex_attrib(&self, index: u32) {
        self.push(Call::EnableVertexAttrib(index));
    }
    fn create_shader(&self, stage: ShaderStage) -> u32 {
        let id = self.id();
        self.push(Call::CreateShader(stage, id));
        id
    }
    fn shader_source(&self, shader: u32, source: &str) {
        self.sources.borrow_mut().push((shader, source.to_string()));
        self.push(Call::ShaderSource(shader));
    }
    fn compile_shader(&self, shader: u32) {
        self.push(Call::CompileShader(shader));
    }
    fn compile_status(&self, shader: u32) -> bool {
        self.source_ok(shader)
    }
    fn shader_info_log(&self, shader: u32) -> String {
        if self.source_ok(shader) {
            String::new()
        } else {
            self.error_log.clone()
        }
    }
    fn delete_shader(&self, shader: u32) {
        self.push(Call::DeleteShader(shader));
    }
    fn create_program(&self) -> u32 {
        let id = self.id();
        self.push(Call::CreateProgram(id));
        id
    }
    fn attach_shader(&self, program: u32, shader: u32) {
        self.push(Call::AttachShader(program, shader));
    }
    fn link_program(&self, program: u32) {
        self.push(Call::LinkProgram(program));
    }
    fn link_status(&self, program: u32) -> bool {
        let attached: Vec<u32> = self
            .calls
            .borrow()
            .iter()
            .filter_map(|c| match c {
                Call::AttachShader(p, s) if *p == program => Some(*s),
                _ => None,
            })
            .collect();
        !self.fail_link && attached.iter().all(|s| self.source_ok(*s))
    }
    fn program_info_log(&self, program: u32) -> String {
        if self.link_status(program) {
            String::new()
        } else {
            "error: linking with uncompiled/unspecialized shader".to_string()
        }
    }
    fn use_program(&self, program: u32) {
        self.push(Call::UseProgram(program));
    }
    fn draw_triangles(&self, first: i32, count: i32) {
        self.push(Call::DrawTriangles(first, count));
    }
    fn delete_vertex_array(&self, vao: u32) {
        self.push(Call::DeleteVertexArray(vao));
    }
    fn delete_buffer(&self, vbo: u32) {
        self.push(Call::DeleteBuffer(vbo));
    }
    fn delete_program(&self, program: u32) {
        self.push(Call::DeleteProgram(program));
    }
}

/// One scripted frame: whether Escape is held at the top of the frame, and
/// the events delivered by the poll at its end.
#[derive(Default)]
pub struct FrameScript {
    pub escape: bool,
    pub events: Vec<IoEvent>,
}

/// Plays back `FrameScript`s and writes `Call::Swap` into the shared gpu log.
/// Once the script runs out it delivers `Quit`.
pub struct ScriptedPlatform<'a> {
    gpu: &'a RecordingGpu,
    frames: VecDeque<FrameScript>,
    pub swaps: usize,
    pub polls: usize,
}

impl<'a> ScriptedPlatform<'a> {
    pub fn new(gpu: &'a RecordingGpu, frames: Vec<FrameScript>) -> Self {
        ScriptedPlatform {
            gpu,
            frames: frames.into(),
            swaps: 0,
            polls: 0,
        }
    }
}

impl Platform for ScriptedPlatform<'_> {
    fn escape_pressed(&mut self) -> bool {
        self.frames.front().map(|f| f.escape).unwrap_or(false)
    }

    fn swap_buffers(&mut self) {
        self.swaps += 1;
        self.gpu.push(Call::Swap);
    }

    fn poll_events(&mut self, events: &mut Vec<IoEvent>) {
        self.polls += 1;
        match self.frames.pop_front() {
            Some(frame) => events.extend(frame.events),
            None => events.push(IoEvent::Quit),
        }
    }
}

/// Keeps every log record, tagged with the emitting thread so parallel tests
/// only see their own output.
struct CaptureLogger {
    records: Mutex<Vec<(ThreadId, Level, String)>>,
}

impl Log for CaptureLogger {
    fn enabled(&self, _: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        if let Ok(mut records) = self.records.lock() {
            records.push((thread::current().id(), record.level(), record.args().to_string()));
        }
    }

    fn flush(&self) {}
}

static CAPTURE: CaptureLogger = CaptureLogger {
    records: Mutex::new(Vec::new()),
};
static CAPTURE_INIT: Once = Once::new();

/// Installs the capturing logger. Call before the code under test logs.
pub fn start_log_capture() {
    CAPTURE_INIT.call_once(|| {
        if log::set_logger(&CAPTURE).is_ok() {
            log::set_max_level(log::LevelFilter::Trace);
        }
    });
}

/// What the calling thread has logged since `start_log_capture`.
pub fn captured_logs() -> Vec<(Level, String)> {
    let me = thread::current().id();
    CAPTURE
        .records
        .lock()
        .map(|records| {
            records
                .iter()
                .filter(|(id, _, _)| *id == me)
                .map(|(_, level, msg)| (*level, msg.clone()))
                .collect()
        })
        .unwrap_or_default()
}
