//! Errors that abort a generation run.
//!
//! Problems with individual declarations are reported as
//! [`Diagnostic`](crate::diagnostic::Diagnostic)s instead.

use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigError;

/// Generation error
#[derive(Debug, Error)]
pub enum GenError {
    /// Reading an input file failed
    #[error("Failed to read {path}: {source}")]
    Io {
        /// File that could not be read
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// The AST dump is not valid JSON or has an unexpected shape
    #[error("Invalid AST dump: {0}")]
    Ast(#[from] serde_json::Error),

    /// The compiler ran and failed; `stderr` is its output, verbatim
    #[error("{stderr}")]
    Compiler {
        /// Exit code, if the process was not killed by a signal
        status: Option<i32>,
        /// Captured standard error
        stderr: String,
    },

    /// The compiler could not be started
    #[error("Failed to run `{program}`: {source}")]
    Spawn {
        /// Executable that was invoked
        program: String,
        /// Underlying error
        source: std::io::Error,
    },

    /// Configuration error
    #[error(transparent)]
    Config(#[from] ConfigError),
}
