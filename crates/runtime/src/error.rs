use std::io;
use thiserror::Error;

/// Errors surfaced by terminal setup and the render loop.
#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("failed to initialize the terminal: {0}")]
    Setup(#[source] io::Error),

    #[error("failed to draw a frame: {0}")]
    Draw(#[source] io::Error),

    #[error("failed to read terminal events: {0}")]
    Events(#[source] io::Error),
}
