//! Error type shared by every stage of an invocation.

use std::io;

/// Errors raised while validating, building, or launching an invocation.
///
/// A non-zero exit status from the child is not represented here; it is
/// data handed back to the caller.
#[derive(Debug, thiserror::Error)]
pub enum ShimError {
    #[error("Invalid thread count: {0:?} (expected a positive integer)")]
    InvalidThreadCount(String),

    #[error("Invalid thread count type: {kind} (expected a number or a string)")]
    InvalidArgumentType { kind: &'static str },

    #[error("Unsupported argument type at position {position}: {kind}")]
    UnsupportedArgumentType { position: usize, kind: &'static str },

    #[error("Tool not found on PATH: {program}")]
    ToolNotFound { program: String },

    #[error("Failed to launch {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("Failed waiting on child process: {0}")]
    Wait(#[source] io::Error),

    #[error("Failed to write bootstrap script: {0}")]
    BootstrapScript(#[source] io::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Short name of a JSON value's type, used in error messages.
pub(crate) fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
