//! Error types for autodeploy.
//!
//! Note: The `unused_assignments` allow is needed because thiserror's derive
//! macro generates code that triggers false positives from clippy.
#![allow(unused_assignments)]

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, DeployError>;

#[derive(Error, Diagnostic, Debug)]
pub enum DeployError {
    #[error("Deployable unit does not exist: {path}")]
    #[diagnostic(
        code(autodeploy::resolve::not_found),
        help("The entry may have been removed since it was scanned; it will be picked up again on a later scan")
    )]
    NotFound { path: PathBuf },

    #[error("Unsupported artifact: {path}")]
    #[diagnostic(
        code(autodeploy::resolve::unsupported_artifact),
        help("Only directories and .war archives can be deployed")
    )]
    UnsupportedArtifact { path: PathBuf },

    #[error("Config not found")]
    #[diagnostic(
        code(autodeploy::config::not_found),
        help("Run `autodeploy init` to create a config, or use `--config <path>` to specify one")
    )]
    ConfigNotFound,

    #[error("Config already exists at {path}")]
    #[diagnostic(code(autodeploy::init::already_exists))]
    ConfigAlreadyExists { path: PathBuf },

    #[error("Failed to parse config: {message}")]
    #[diagnostic(code(autodeploy::config::parse_error))]
    ConfigParseError { message: String },

    #[error("Failed to serialize: {message}")]
    #[diagnostic(code(autodeploy::serialize))]
    SerializeError { message: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(autodeploy::io))]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

impl DeployError {
    pub fn io(err: std::io::Error, context: impl Into<String>) -> Self {
        DeployError::Io {
            message: context.into(),
            source: err,
        }
    }

    /// Short machine-friendly name of the error kind, used in log lines
    pub fn kind(&self) -> &'static str {
        match self {
            DeployError::NotFound { .. } => "not_found",
            DeployError::UnsupportedArtifact { .. } => "unsupported_artifact",
            DeployError::ConfigNotFound => "config_not_found",
            DeployError::ConfigAlreadyExists { .. } => "config_already_exists",
            DeployError::ConfigParseError { .. } => "config_parse_error",
            DeployError::SerializeError { .. } => "serialize_error",
            DeployError::Io { .. } => "io",
        }
    }
}
