//! The slice of OpenGL the renderer needs.
//!
//! Everything above this trait (geometry upload, shader build, frame loop) is
//! written against `Gpu`, so the same code drives the real `gl` bindings
//! (`glutils::NativeGl`) and the recording double used by the tests.

/// Size of the info log buffer handed to the driver, terminator included.
pub const INFO_LOG_CAPACITY: usize = 512;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    pub fn name(self) -> &'static str {
        match self {
            ShaderStage::Vertex => "vertex",
            ShaderStage::Fragment => "fragment",
        }
    }
}

pub trait Gpu {
    fn viewport(&self, x: i32, y: i32, width: i32, height: i32);
    fn clear_color(&self, rgba: [f32; 4]);
    /// Clears the color buffer only.
    fn clear(&self);

    fn gen_vertex_array(&self) -> u32;
    fn gen_buffer(&self) -> u32;
    fn bind_vertex_array(&self, vao: u32);
    fn bind_array_buffer(&self, vbo: u32);
    /// Uploads `data` to the bound `ARRAY_BUFFER` with `STATIC_DRAW`.
    fn buffer_data_static(&self, data: &[f32]);
    /// Float attribute, not normalized. `stride` and `offset` are in bytes.
    fn vertex_attrib_f32(&self, index: u32, components: i32, stride: usize, offset: usize);
    fn enable_vertex_attrib(&self, index: u32);

    fn create_shader(&self, stage: ShaderStage) -> u32;
    fn shader_source(&self, shader: u32, source: &str);
    fn compile_shader(&self, shader: u32);
    fn compile_status(&self, shader: u32) -> bool;
    /// At most `INFO_LOG_CAPACITY - 1` characters.
    fn shader_info_log(&self, shader: u32) -> String;
    fn delete_shader(&self, shader: u32);

    fn create_program(&self) -> u32;
    fn attach_shader(&self, program: u32, shader: u32);
    fn link_program(&self, program: u32);
    fn link_status(&self, program: u32) -> bool;
    /// At most `INFO_LOG_CAPACITY - 1` characters.
    fn program_info_log(&self, program: u32) -> String;
    fn use_program(&self, program: u32);

    fn draw_triangles(&self, first: i32, count: i32);

    fn delete_vertex_array(&self, vao: u32);
    fn delete_buffer(&self, vbo: u32);
    fn delete_program(&self, program: u32);
}

/// Cuts a driver log down to what fits in the fixed log buffer.
pub fn truncate_info_log(log: &str) -> String {
    log.trim_end_matches('\0')
        .chars()
        .take(INFO_LOG_CAPACITY - 1)
        .collect()
}
