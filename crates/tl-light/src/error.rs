use thiserror::Error;
use tl_core::TlError;

#[derive(Debug, Error)]
pub enum LightError {
    #[error("cycling task is already running")]
    AlreadyRunning,

    #[error("light has been shut down")]
    ShutDown,

    #[error("failed to spawn cycling task: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("task `{0}` panicked")]
    TaskPanicked(String),

    #[error(transparent)]
    Config(#[from] TlError),
}

pub type LightResult<T> = Result<T, LightError>;
