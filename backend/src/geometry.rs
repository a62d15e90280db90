use super::gpu::Gpu;
use super::math::{flatten, Vec3};
use std::mem::size_of;

/// Attribute slot the vertex shader reads positions from.
pub const POSITION_ATTRIB: u32 = 0;

/// A VAO plus the single VBO it describes. Positions only, tightly packed.
///
/// Deleting happens on drop: vertex array first, then the buffer.
pub struct Geometry<'g, G: Gpu> {
    gpu: &'g G,
    vao: u32,
    vbo: u32,
    vertex_count: i32,
}

impl<'g, G: Gpu> Geometry<'g, G> {
    pub fn upload(gpu: &'g G, positions: &[Vec3]) -> Self {
        let vao = gpu.gen_vertex_array();
        let vbo = gpu.gen_buffer();

        gpu.bind_vertex_array(vao);
        gpu.bind_array_buffer(vbo);
        gpu.buffer_data_static(flatten(positions));

        gpu.vertex_attrib_f32(POSITION_ATTRIB, 3, size_of::<Vec3>(), 0);
        gpu.enable_vertex_attrib(POSITION_ATTRIB);

        log::debug!(
            "uploaded {} vertices (vao {}, vbo {})",
            positions.len(),
            vao,
            vbo
        );

        Geometry {
            gpu,
            vao,
            vbo,
            vertex_count: positions.len() as i32,
        }
    }

    pub fn bind(&self) {
        self.gpu.bind_vertex_array(self.vao);
    }

    pub fn vertex_count(&self) -> i32 {
        self.vertex_count
    }
}

impl<G: Gpu> Drop for Geometry<'_, G> {
    fn drop(&mut self) {
        self.gpu.delete_vertex_array(self.vao);
        self.gpu.delete_buffer(self.vbo);
        log::debug!("deleted vao {} and vbo {}", self.vao, self.vbo);
    }
}
