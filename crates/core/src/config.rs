//! Invocation settings.
//!
//! # Environment variables
//!
//! | Variable            | Default              | Description                              |
//! |---------------------|----------------------|------------------------------------------|
//! | `DECAES_JULIA`      | `julia`              | Program launched (name on PATH or path)  |
//! | `DECAES_JULIA_FLAGS`| --                   | Extra whitespace-separated Julia flags   |
//! | `DECAES_SCRIPT_DIR` | system temp dir      | Directory for bootstrap scripts          |

use std::path::PathBuf;

use crate::error::ShimError;

/// Program launched when nothing else is configured.
pub const DEFAULT_PROGRAM: &str = "julia";

/// Startup flags placed before the bootstrap script path.
pub const DEFAULT_STARTUP_FLAGS: &[&str] = &["--startup-file=no", "--optimize=3", "--quiet"];

/// Environment variable the child reads its thread count from.
pub const THREAD_ENV_VAR: &str = "JULIA_NUM_THREADS";

pub const ENV_PROGRAM: &str = "DECAES_JULIA";
pub const ENV_EXTRA_FLAGS: &str = "DECAES_JULIA_FLAGS";
pub const ENV_SCRIPT_DIR: &str = "DECAES_SCRIPT_DIR";

/// Settings for launching the analysis tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShimConfig {
    pub program: String,
    pub startup_flags: Vec<String>,
    /// Appended after the startup flags, before the script path.
    pub extra_flags: Vec<String>,
    pub thread_env_var: String,
    /// Where bootstrap scripts are written (system temp dir if `None`).
    pub script_dir: Option<PathBuf>,
}

impl Default for ShimConfig {
    fn default() -> Self {
        Self {
            program: DEFAULT_PROGRAM.to_string(),
            startup_flags: DEFAULT_STARTUP_FLAGS.iter().map(|s| s.to_string()).collect(),
            extra_flags: Vec::new(),
            thread_env_var: THREAD_ENV_VAR.to_string(),
            script_dir: None,
        }
    }
}

impl ShimConfig {
    /// Load settings from the process environment.
    pub fn from_env() -> Result<Self, ShimError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load settings through `lookup`, which returns the value of a variable
    /// if it is set.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ShimError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(program) = lookup(ENV_PROGRAM) {
            config.program = program;
        }
        if let Some(flags) = lookup(ENV_EXTRA_FLAGS) {
            config.extra_flags = flags.split_whitespace().map(str::to_string).collect();
        }
        if let Some(dir) = lookup(ENV_SCRIPT_DIR) {
            if dir.trim().is_empty() {
                return Err(ShimError::Config(format!("{ENV_SCRIPT_DIR} must not be empty")));
            }
            config.script_dir = Some(PathBuf::from(dir));
        }

        config.validate()?;
        Ok(config)
    }

    /// Reject settings that can never produce a launchable command.
    pub fn validate(&self) -> Result<(), ShimError> {
        if self.program.trim().is_empty() {
            return Err(ShimError::Config("program must not be empty".to_string()));
        }
        let var = &self.thread_env_var;
        if var.is_empty() || var.contains('=') || var.contains('\0') {
            return Err(ShimError::Config(format!(
                "invalid thread environment variable name: {var:?}"
            )));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
