#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Vec3 { x, y, z }
    }
}

/// Views a run of positions as the flat float array the GPU consumes.
pub fn flatten(points: &[Vec3]) -> &[f32] {
    // Vec3 is repr(C) with three f32 and no padding
    unsafe { std::slice::from_raw_parts(points.as_ptr().cast(), points.len() * 3) }
}
