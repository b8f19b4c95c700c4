//! Command-line surface.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use serde_json::Value;

use decaes_core::{args_from_json, Arg, Shim, ShimConfig, ThreadCount};

/// Run the DECAES analysis tool with a thread count and forwarded arguments.
#[derive(Debug, Parser)]
#[command(name = "decaes", version, about)]
pub struct Cli {
    /// Program to launch instead of `julia` (overrides DECAES_JULIA).
    #[arg(long, value_name = "PATH")]
    pub julia: Option<String>,

    /// Extra flag passed to Julia before the script; repeatable.
    #[arg(long = "julia-flag", value_name = "FLAG", allow_hyphen_values = true)]
    pub julia_flags: Vec<String>,

    /// Directory for the bootstrap script (overrides DECAES_SCRIPT_DIR).
    #[arg(long, value_name = "DIR")]
    pub script_dir: Option<PathBuf>,

    /// JSON array of extra arguments appended after ARGS.
    #[arg(long, value_name = "FILE")]
    pub args_json: Option<PathBuf>,

    /// Print the command line and exit without running anything.
    #[arg(long)]
    pub dry_run: bool,

    /// Thread count (positive integer), then arguments forwarded verbatim,
    /// e.g. `4 image.nii.gz --T2map` or `8 @args.txt`.
    ///
    /// Shim options go before the thread count; every token after it
    /// belongs to the tool, including ones spelled like shim options.
    #[arg(
        value_name = "THREADS [ARGS]",
        required = true,
        num_args = 1..,
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub command: Vec<String>,
}

impl Cli {
    /// The thread count as typed, before validation.
    pub fn threads(&self) -> &str {
        self.command.first().map(String::as_str).unwrap_or_default()
    }

    /// Tokens after the thread count.
    pub fn args(&self) -> &[String] {
        self.command.get(1..).unwrap_or_default()
    }

    /// Apply command-line overrides on top of `config`.
    pub fn apply(&self, config: &mut ShimConfig) {
        if let Some(program) = &self.julia {
            config.program.clone_from(program);
        }
        config.extra_flags.extend(self.julia_flags.iter().cloned());
        if let Some(dir) = &self.script_dir {
            config.script_dir = Some(dir.clone());
        }
    }

    /// Positional arguments followed by any from `--args-json`.
    pub fn forwarded_args(&self) -> anyhow::Result<Vec<Arg>> {
        let mut args: Vec<Arg> = self.args().iter().map(|a| Arg::from(a.as_str())).collect();
        if let Some(path) = &self.args_json {
            args.extend(load_args_json(path)?);
        }
        Ok(args)
    }
}

/// Read a JSON array of arguments from `path`.
pub fn load_args_json(path: &Path) -> anyhow::Result<Vec<Arg>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading argument file {}", path.display()))?;
    let values: Vec<Value> = serde_json::from_str(&raw)
        .with_context(|| format!("{} must contain a JSON array", path.display()))?;
    let args = args_from_json(&values)
        .with_context(|| format!("invalid argument in {}", path.display()))?;
    Ok(args)
}

/// Validate inputs, then run the tool (or print the command on `--dry-run`).
///
/// Returns the exit code the process should end with.
pub async fn run(cli: Cli) -> anyhow::Result<i32> {
    let threads = ThreadCount::parse(cli.threads())?;

    let mut config = ShimConfig::from_env().context("loading configuration")?;
    cli.apply(&mut config);
    let shim = Shim::new(config)?;

    let args = cli.forwarded_args()?;

    if cli.dry_run {
        let invocation = shim.command_line(&args);
        println!(
            "{}={} {}",
            shim.config().thread_env_var,
            threads,
            invocation.command_line()
        );
        return Ok(0);
    }

    let code = shim.run(threads, &args).await?;
    Ok(code)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
