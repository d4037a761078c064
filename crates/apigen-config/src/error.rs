//! Fatal resolution errors and config loading errors.

use std::path::PathBuf;

/// A hard failure that aborts resolution of the current interface.
///
/// These point at defects in hand-written configuration (a reroute target or
/// IAM type that does not exist) rather than at problems with the API
/// description, and are never recorded as diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    #[error("reroute_to_grpc_interface not found: {0}")]
    RerouteTargetNotFound(String),

    #[error("type not found: {0}")]
    TypeNotFound(String),

    #[error("type must be a message: {0}")]
    TypeNotMessage(String),

    #[error("type {type_name} does not have field {field}")]
    FieldNotFound { type_name: String, field: String },

    #[error("no method config for method '{0}'")]
    MissingMethodConfig(String),
}

/// Error reading a configuration file.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid JSON config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported config format: {0} (expected .yaml, .yml or .json)")]
    UnsupportedFormat(PathBuf),
}
