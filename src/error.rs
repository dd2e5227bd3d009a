use thiserror::Error;

/// Errors produced by grid access and flood fill operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FloodError {
    #[error("coordinate ({x}, {y}) is outside the {width}x{height} grid")]
    OutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },
    #[error("invalid grid dimensions {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    #[error("invalid fill parameters: {0}")]
    InvalidParameters(String),
    #[error("exploration task failed: {0}")]
    TaskFailed(String),
    #[error("failed to spawn worker thread: {0}")]
    WorkerSpawn(String),
    #[error("worker pool disconnected with work outstanding")]
    WorkerDisconnected,
}

pub type Result<T> = std::result::Result<T, FloodError>;
