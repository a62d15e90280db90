use super::error::BackendError;
use super::geometry::Geometry;
use super::gpu::Gpu;
use super::math::Vec3;
use super::shaders::{BuildPolicy, BuildReport, Program, ProgramBuild, ShaderSources};
use super::system::{IoEvent, Platform};

/// Everything needed to set up the single draw call.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneDesc {
    pub vertices: Vec<Vec3>,
    pub shaders: ShaderSources,
    pub clear_color: [f32; 4],
    pub policy: BuildPolicy,
}

/// Owns the GPU objects for one triangle.
///
/// Field order is drop order: vertex array, buffer, then program.
pub struct Renderer<'g, G: Gpu> {
    gpu: &'g G,
    geometry: Geometry<'g, G>,
    program: Program<'g, G>,
    report: BuildReport,
}

impl<'g, G: Gpu> Renderer<'g, G> {
    pub fn new(
        gpu: &'g G,
        scene: &SceneDesc,
        framebuffer: (i32, i32),
    ) -> Result<Renderer<'g, G>, BackendError> {
        gpu.viewport(0, 0, framebuffer.0, framebuffer.1);
        gpu.clear_color(scene.clear_color);

        let geometry = Geometry::upload(gpu, &scene.vertices);
        let build = ProgramBuild::new(gpu, &scene.shaders);
        let report = build.report.clone();
        let program = build.into_program(scene.policy)?;
        if !report.is_ready() {
            log::warn!("continuing with a program that did not build cleanly");
        }

        Ok(Renderer {
            gpu,
            geometry,
            program,
            report,
        })
    }

    pub fn report(&self) -> &BuildReport {
        &self.report
    }

    pub fn draw_frame(&self) {
        self.gpu.clear();
        self.program.use_program();
        self.geometry.bind();
        self.gpu.draw_triangles(0, self.geometry.vertex_count());
    }

    pub fn resize(&self, width: i32, height: i32) {
        log::debug!("framebuffer resized to {}x{}", width, height);
        self.gpu.viewport(0, 0, width, height);
    }
}

/// Draws until Escape is held or the window is closed. Returns the number of
/// frames presented.
///
/// Escape only raises the close flag, so the frame it was seen in is still
/// drawn and presented. Resize events from one poll collapse into a single
/// viewport update, applied before the next clear.
pub fn run_frame_loop<P: Platform, G: Gpu>(platform: &mut P, renderer: &Renderer<'_, G>) -> u64 {
    let mut should_close = false;
    let mut frames = 0;
    let mut events = Vec::new();

    while !should_close {
        if platform.escape_pressed() {
            should_close = true;
        }

        renderer.draw_frame();
        platform.swap_buffers();
        frames += 1;

        platform.poll_events(&mut events);
        let mut resized = None;
        for event in events.drain(..) {
            match event {
                IoEvent::Quit => should_close = true,
                IoEvent::Resized { width, height } => resized = Some((width, height)),
            }
        }
        if let Some((width, height)) = resized {
            renderer.resize(width, height);
        }
    }

    log::debug!("frame loop finished after {} frames", frames);
    frames
}
