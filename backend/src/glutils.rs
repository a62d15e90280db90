use super::gpu::{truncate_info_log, Gpu, ShaderStage, INFO_LOG_CAPACITY};
use gl::{types::*, *};
use std::ffi::CStr;

/// `Gpu` backed by the global `gl` function pointers.
///
/// Only valid once `gl::load_with` has run against a current context, which
/// is what `System::new` guarantees.
#[derive(Debug, Default, Clone, Copy)]
pub struct NativeGl;

pub fn gl_buffer_data_arr_stat<T: Sized>(buffer: &[T]) {
    unsafe {
        gl::BufferData(
            ARRAY_BUFFER,
            std::mem::size_of_val(buffer) as isize,
            buffer.as_ptr().cast(),
            STATIC_DRAW,
        )
    };
}

pub fn gl_vertex_attrib_ptr_f32(index: u32, size: i32, stride: usize, offset: usize) {
    unsafe {
        gl::VertexAttribPointer(
            index,
            size,
            FLOAT,
            FALSE,
            stride as GLsizei,
            offset as *const _,
        )
    };
}

fn gl_string(name: GLenum) -> String {
    let ptr = unsafe { gl::GetString(name) };
    if ptr.is_null() {
        return "<unknown>".to_string();
    }
    unsafe { CStr::from_ptr(ptr.cast()) }
        .to_string_lossy()
        .into_owned()
}

pub fn log_context_info() {
    log::info!("GL_VENDOR = {}", gl_string(VENDOR));
    log::info!("GL_RENDERER = {}", gl_string(RENDERER));
    log::info!("GL_VERSION = {}", gl_string(VERSION));
    log::info!(
        "GL_SHADING_LANGUAGE_VERSION = {}",
        gl_string(SHADING_LANGUAGE_VERSION)
    );
}

fn read_info_log(fetch: impl FnOnce(GLsizei, &mut GLsizei, *mut GLchar)) -> String {
    let mut v: Vec<u8> = Vec::with_capacity(INFO_LOG_CAPACITY);
    let mut log_len: GLsizei = 0;
    fetch(
        INFO_LOG_CAPACITY as GLsizei,
        &mut log_len,
        v.as_mut_ptr().cast(),
    );
    let len = (log_len.max(0) as usize).min(INFO_LOG_CAPACITY);
    // the driver wrote `len` bytes into the reserved capacity
    unsafe { v.set_len(len) };
    truncate_info_log(&String::from_utf8_lossy(&v))
}

impl Gpu for NativeGl {
    fn viewport(&self, x: i32, y: i32, width: i32, height: i32) {
        unsafe { gl::Viewport(x, y, width, height) };
    }

    fn clear_color(&self, rgba: [f32; 4]) {
        unsafe { gl::ClearColor(rgba[0], rgba[1], rgba[2], rgba[3]) };
    }

    fn clear(&self) {
        unsafe { gl::Clear(COLOR_BUFFER_BIT) };
    }

    fn gen_vertex_array(&self) -> u32 {
        let mut vao = 0;
        unsafe { gl::GenVertexArrays(1, &mut vao) };
        vao
    }

    fn gen_buffer(&self) -> u32 {
        let mut vbo = 0;
        unsafe { gl::GenBuffers(1, &mut vbo) };
        vbo
    }

    fn bind_vertex_array(&self, vao: u32) {
        unsafe { gl::BindVertexArray(vao) };
    }

    fn bind_array_buffer(&self, vbo: u32) {
        unsafe { gl::BindBuffer(ARRAY_BUFFER, vbo) };
    }

    fn buffer_data_static(&self, data: &[f32]) {
        gl_buffer_data_arr_stat(data);
    }

    fn vertex_attrib_f32(&self, index: u32, components: i32, stride: usize, offset: usize) {
        gl_vertex_attrib_ptr_f32(index, components, stride, offset);
    }

    fn enable_vertex_attrib(&self, index: u32) {
        unsafe { gl::EnableVertexAttribArray(index) };
    }

    fn create_shader(&self, stage: ShaderStage) -> u32 {
        let kind = match stage {
            ShaderStage::Vertex => VERTEX_SHADER,
            ShaderStage::Fragment => FRAGMENT_SHADER,
        };
        unsafe { gl::CreateShader(kind) }
    }

    fn shader_source(&self, shader: u32, source: &str) {
        unsafe {
            gl::ShaderSource(
                shader,
                1,
                &(source.as_bytes().as_ptr().cast()),
                &(source.len() as GLint),
            );
        }
    }

    fn compile_shader(&self, shader: u32) {
        unsafe { gl::CompileShader(shader) };
    }

    fn compile_status(&self, shader: u32) -> bool {
        let mut success = 0;
        unsafe { gl::GetShaderiv(shader, COMPILE_STATUS, &mut success) };
        success != 0
    }

    fn shader_info_log(&self, shader: u32) -> String {
        read_info_log(|cap, len, buf| unsafe { gl::GetShaderInfoLog(shader, cap, len, buf) })
    }

    fn delete_shader(&self, shader: u32) {
        unsafe { gl::DeleteShader(shader) };
    }

    fn create_program(&self) -> u32 {
        unsafe { gl::CreateProgram() }
    }

    fn attach_shader(&self, program: u32, shader: u32) {
        unsafe { gl::AttachShader(program, shader) };
    }

    fn link_program(&self, program: u32) {
        unsafe { gl::LinkProgram(program) };
    }

    fn link_status(&self, program: u32) -> bool {
        let mut success = 0;
        unsafe { gl::GetProgramiv(program, LINK_STATUS, &mut success) };
        success != 0
    }

    fn program_info_log(&self, program: u32) -> String {
        read_info_log(|cap, len, buf| unsafe { gl::GetProgramInfoLog(program, cap, len, buf) })
    }

    fn use_program(&self, program: u32) {
        unsafe { gl::UseProgram(program) };
    }

    fn draw_triangles(&self, first: i32, count: i32) {
        unsafe { gl::DrawArrays(TRIANGLES, first, count) };
    }

    fn delete_vertex_array(&self, vao: u32) {
        unsafe { gl::DeleteVertexArrays(1, &vao) };
    }

    fn delete_buffer(&self, vbo: u32) {
        unsafe { gl::DeleteBuffers(1, &vbo) };
    }

    fn delete_program(&self, program: u32) {
        unsafe { gl::DeleteProgram(program) };
    }
}
