//! Crate error type.
//!
//! Malformed stream content never ends up here: bad tokens and partial lines are
//! absorbed by the parser. These errors cover configuration, transport setup and
//! misuse of a torn-down session.

use std::path::PathBuf;

/// Errors surfaced by the plotter library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid JSON configuration: {0}")]
    ConfigJson(#[from] serde_json::Error),

    #[error("invalid YAML configuration: {0}")]
    ConfigYaml(#[from] serde_yaml::Error),

    #[error("unsupported configuration format: {}", .0.display())]
    UnsupportedConfigFormat(PathBuf),

    #[error("session has been torn down")]
    SessionClosed,

    #[error("invalid source: {0:?}")]
    InvalidSource(String),

    #[error("GUI error: {0}")]
    Gui(#[from] eframe::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
