use super::error::BackendError;
use sdl2;
use sdl2::event::{Event, WindowEvent};
use sdl2::keyboard::Scancode;
use sdl2::video::GLProfile;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IoEvent {
    Quit,
    // framebuffer width, height in pixels
    Resized { width: i32, height: i32 },
}

/// Window side of the frame loop.
pub trait Platform {
    /// Whether Escape is held right now.
    fn escape_pressed(&mut self) -> bool;
    fn swap_buffers(&mut self);
    /// Appends everything the OS delivered since the last poll.
    fn poll_events(&mut self, events: &mut Vec<IoEvent>);
}

#[derive(Debug, Clone, PartialEq)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    // major, minor; always requested as a core profile
    pub gl_version: (u8, u8),
}

impl Default for WindowConfig {
    fn default() -> Self {
        WindowConfig {
            title: "Triangulo OpenGL".to_string(),
            width: 800,
            height: 600,
            gl_version: (3, 3),
        }
    }
}

pub struct System {
    pub gl_ctx: sdl2::video::GLContext,
    pub window: sdl2::video::Window,
    pub event_pump: sdl2::EventPump,
    pub video_subsystem: sdl2::VideoSubsystem,
    pub sdl_context: sdl2::Sdl,
}

impl System {
    /// Brings up SDL, a core profile context for `config` and the `gl` loader.
    ///
    /// Anything created before a failure is released on the way out.
    pub fn new(config: &WindowConfig) -> Result<System, BackendError> {
        let sdl_context = sdl2::init().map_err(BackendError::Init)?;
        let video_subsystem = sdl_context.video().map_err(BackendError::Init)?;

        let (major, minor) = config.gl_version;
        let gl_attr = video_subsystem.gl_attr();
        gl_attr.set_context_profile(GLProfile::Core);
        gl_attr.set_context_version(major, minor);

        let window = video_subsystem
            .window(&config.title, config.width, config.height)
            .opengl()
            .build()
            .map_err(|e| BackendError::Window(e.to_string()))?;

        let gl_ctx = window
            .gl_create_context()
            .map_err(BackendError::Context)?;
        window
            .gl_make_current(&gl_ctx)
            .map_err(BackendError::Context)?;

        gl::load_with(|name| video_subsystem.gl_get_proc_address(name) as *const _);
        Self::check_loaded()?;

        debug_assert_eq!(gl_attr.context_profile(), GLProfile::Core);
        debug_assert_eq!(gl_attr.context_version(), (major, minor));

        let event_pump = sdl_context.event_pump().map_err(BackendError::Init)?;

        log::info!(
            "created {}x{} window '{}' with OpenGL {}.{} core",
            config.width,
            config.height,
            config.title,
            major,
            minor
        );

        Ok(System {
            gl_ctx,
            window,
            event_pump,
            video_subsystem,
            sdl_context,
        })
    }

    fn check_loaded() -> Result<(), BackendError> {
        let required = [
            ("glViewport", gl::Viewport::is_loaded()),
            ("glClear", gl::Clear::is_loaded()),
            ("glGenVertexArrays", gl::GenVertexArrays::is_loaded()),
            ("glBufferData", gl::BufferData::is_loaded()),
            ("glCreateShader", gl::CreateShader::is_loaded()),
            ("glLinkProgram", gl::LinkProgram::is_loaded()),
            ("glDrawArrays", gl::DrawArrays::is_loaded()),
        ];
        match required.iter().find(|(_, loaded)| !loaded) {
            Some((name, _)) => Err(BackendError::Loader(*name)),
            None => Ok(()),
        }
    }

    /// Framebuffer size in pixels, which can differ from the window size.
    pub fn drawable_size(&self) -> (i32, i32) {
        let (w, h) = self.window.drawable_size();
        (w as i32, h as i32)
    }
}

impl Platform for System {
    fn escape_pressed(&mut self) -> bool {
        self.event_pump
            .keyboard_state()
            .is_scancode_pressed(Scancode::Escape)
    }

    fn swap_buffers(&mut self) {
        self.window.gl_swap_window();
    }

    fn poll_events(&mut self, events: &mut Vec<IoEvent>) {
        for event in self.event_pump.poll_iter() {
            match event {
                Event::Quit { .. } => events.push(IoEvent::Quit),
                Event::Window {
                    win_event: WindowEvent::SizeChanged(..),
                    ..
                } => {
                    let (w, h) = self.window.drawable_size();
                    events.push(IoEvent::Resized {
                        width: w as i32,
                        height: h as i32,
                    });
                }
                _ => {}
            }
        }
    }
}
