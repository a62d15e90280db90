pub mod error;
pub mod geometry;
pub mod glutils;
pub mod gpu;
pub mod logging;
pub mod math;
pub mod renderer;
pub mod shaders;
pub mod system;

#[cfg(test)]
mod testing;

pub use error::BackendError;
