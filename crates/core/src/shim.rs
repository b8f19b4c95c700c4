//! End-to-end invocation: validate, build, launch, clean up.

use std::path::Path;

use serde_json::Value;

use crate::args::{args_from_json, serialize_args, Arg};
use crate::bootstrap::BootstrapScript;
use crate::command::Invocation;
use crate::config::ShimConfig;
use crate::error::ShimError;
use crate::subprocess;
use crate::threads::ThreadCount;

/// Stand-in for the bootstrap script path when nothing is written to disk.
pub const SCRIPT_PLACEHOLDER: &str = "<bootstrap.jl>";

/// Launches the analysis tool with a thread count and forwarded arguments.
#[derive(Debug, Clone)]
pub struct Shim {
    config: ShimConfig,
}

impl Shim {
    pub fn new(config: ShimConfig) -> Result<Self, ShimError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ShimConfig {
        &self.config
    }

    /// The command line a run would use, with [`SCRIPT_PLACEHOLDER`] in
    /// place of the script path. Nothing is written or spawned.
    pub fn command_line(&self, args: &[Arg]) -> Invocation {
        Invocation::new(
            &self.config,
            Path::new(SCRIPT_PLACEHOLDER),
            serialize_args(args),
        )
    }

    /// Run the tool and return its exit code.
    ///
    /// The bootstrap script is removed before this returns, whether the
    /// launch succeeded or not. Errors from spawning or waiting are
    /// returned unchanged after cleanup.
    pub async fn run(&self, threads: ThreadCount, args: &[Arg]) -> Result<i32, ShimError> {
        let tokens = serialize_args(args);
        let script = BootstrapScript::create(self.config.script_dir.as_deref())?;
        let invocation = Invocation::new(&self.config, script.path(), tokens);
        let threads_value = threads.to_env_value();

        tracing::info!(
            threads = threads.get(),
            script = %script.path().display(),
            command = %invocation.command_line(),
            "Launching analysis tool",
        );

        let result = subprocess::run_inherited(
            &invocation,
            &[(self.config.thread_env_var.as_str(), threads_value.as_str())],
        )
        .await;

        if let Err(e) = script.close() {
            tracing::warn!(
                script = %invocation.script().display(),
                error = %e,
                "Failed to remove bootstrap script",
            );
        }

        match &result {
            Ok(0) => tracing::info!(exit_code = 0, "Analysis tool finished"),
            Ok(code) => {
                tracing::warn!(exit_code = *code, "Analysis tool exited with non-zero status");
            }
            Err(e) => {
                tracing::error!(
                    program = %invocation.program(),
                    error = %e,
                    "Analysis tool launch failed",
                );
            }
        }

        result
    }

    /// Run the tool without reporting its exit code.
    pub async fn execute(&self, threads: ThreadCount, args: &[Arg]) -> Result<(), ShimError> {
        self.run(threads, args).await.map(|_| ())
    }

    /// Validate untyped inputs, then run.
    ///
    /// The thread count is checked first, then every argument; nothing is
    /// written or spawned unless both pass.
    pub async fn run_json(&self, threads: &Value, args: &[Value]) -> Result<i32, ShimError> {
        let threads = ThreadCount::from_json(threads)?;
        let args = args_from_json(args)?;
        self.run(threads, &args).await
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::args;

    fn shim_in(dir: &Path, program: &str) -> Shim {
        Shim::new(ShimConfig {
            program: program.to_string(),
            script_dir: Some(dir.to_path_buf()),
            ..ShimConfig::default()
        })
        .expect("valid config")
    }

    fn dir_is_empty(dir: &Path) -> bool {
        std::fs::read_dir(dir).expect("read dir").next().is_none()
    }

    #[test]
    fn new_rejects_invalid_config() {
        let config = ShimConfig {
            program: " ".to_string(),
            ..ShimConfig::default()
        };
        assert!(matches!(Shim::new(config), Err(ShimError::Config(_))));
    }

    #[test]
    fn command_line_uses_placeholder() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let shim = shim_in(dir.path(), "julia");
        let invocation = shim.command_line(&args!["image.nii.gz", "--T2map"]);
        assert_eq!(
            invocation.command_line(),
            "julia --startup-file=no --optimize=3 --quiet <bootstrap.jl> image.nii.gz --T2map"
        );
        assert!(dir_is_empty(dir.path()), "dry run must not write a script");
    }

    #[tokio::test]
    async fn launch_failure_cleans_up_script() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let shim = shim_in(dir.path(), "/nonexistent/bin/julia-missing");
        let threads = ThreadCount::new(2).expect("valid");

        let result = shim.run(threads, &args!["--T2map"]).await;

        assert!(matches!(result, Err(ShimError::ToolNotFound { .. })));
        assert!(dir_is_empty(dir.path()), "script must be removed on failure");
    }

    #[tokio::test]
    async fn invalid_thread_count_stops_before_script() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let shim = shim_in(dir.path(), "/nonexistent/bin/julia-missing");

        let result = shim.run_json(&json!(0), &[json!("--T2map")]).await;

        assert!(matches!(result, Err(ShimError::InvalidThreadCount(_))));
        assert!(dir_is_empty(dir.path()));
    }

    #[tokio::test]
    async fn unsupported_argument_stops_before_script() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let shim = shim_in(dir.path(), "/nonexistent/bin/julia-missing");

        let result = shim
            .run_json(&json!(4), &[json!("--TE"), json!({"bad": true})])
            .await;

        assert!(matches!(
            result,
            Err(ShimError::UnsupportedArgumentType { position: 1, .. })
        ));
        assert!(dir_is_empty(dir.path()));
    }
}
