// Error types: link transport errors, upstream simulation errors

use thiserror::Error;

/// Link Errors
#[derive(Error, Debug)]
pub enum LinkError {
    #[error("Could not open serial port {port}: {source}")]
    Unavailable {
        port: String,
        source: serialport::Error,
    },
    #[error("Serial write failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Upstream Simulation Errors
#[derive(Error, Debug, PartialEq, Eq, Copy, Clone)]
pub enum SimError {
    #[error("Episode finished")]
    EpisodeEnded,
    #[error("Simulation terminated unexpectedly")]
    Terminated,
}
