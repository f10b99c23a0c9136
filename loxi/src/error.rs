//! Error handling for the `lox` CLI.
//!
//! Internal, structured errors live here as a `thiserror` enum, the same
//! way every other crate in this workspace keeps one error type per
//! concern. `main.rs` wraps these with `anyhow::Context` at the process
//! boundary rather than matching on variants.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoxiError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to initialize logging: {0}")]
    Logging(String),
}

pub type Result<T> = std::result::Result<T, LoxiError>;
