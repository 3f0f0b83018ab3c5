//! Error type for terminal-facing operations.
//!
//! Index misuse is never an error value: per the widget contract it is a
//! logged diagnostic and a no-op. Only genuinely failable resources (the
//! terminal writer) surface here.

use thiserror::Error;

/// Errors produced while presenting the widget to a terminal.
#[derive(Debug, Error)]
pub enum MenuError {
    /// Writing to the terminal failed.
    #[error("terminal i/o: {0}")]
    Io(#[from] std::io::Error),
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, MenuError>;
