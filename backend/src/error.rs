use thiserror::Error;

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("windowing library initialization failed: {0}")]
    Init(String),
    #[error("error while building OpenGL window: {0}")]
    Window(String),
    #[error("OpenGL context creation failed: {0}")]
    Context(String),
    #[error("failed to load OpenGL function pointers (missing {0})")]
    Loader(&'static str),
    #[error("shader program build failed: {0}")]
    ShaderBuild(String),
}
