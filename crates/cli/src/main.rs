//! `decaes` -- run the DECAES analysis tool with a given thread count.
//!
//! ```text
//! decaes [OPTIONS] <THREADS> [ARGS]...
//! decaes 4 image.nii.gz --T2map --T2Range 0.01 2.0
//! decaes 8 @settings.txt
//! ```
//!
//! Everything after the thread count is forwarded to the tool unchanged.
//! The process exits with the tool's exit code.
//!
//! # Environment variables
//!
//! | Variable             | Default   | Description                          |
//! |----------------------|-----------|--------------------------------------|
//! | `DECAES_JULIA`       | `julia`   | Program to launch                    |
//! | `DECAES_JULIA_FLAGS` | --        | Extra Julia flags                    |
//! | `DECAES_SCRIPT_DIR`  | temp dir  | Where bootstrap scripts are written  |
//! | `RUST_LOG`           | `info`    | Log filter for the shim (stderr)     |

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use decaes_cli::Cli;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "decaes=info,decaes_cli=info,decaes_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match decaes_cli::run(cli).await {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            tracing::error!(error = %format!("{e:#}"), "decaes failed");
            std::process::exit(1);
        }
    }
}
