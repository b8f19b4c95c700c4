//! `decaes-core` -- launch the DECAES analysis tool from Rust.
//!
//! An invocation validates a thread count, flattens a typed argument list
//! into command-line tokens, writes a throwaway Julia bootstrap script, and
//! runs `julia` on it with the thread count in `JULIA_NUM_THREADS`. The
//! child shares the caller's terminal. The script is deleted before
//! [`Shim::run`] returns, on success and on failure.
//!
//! ```no_run
//! use decaes_core::{args, Shim, ShimConfig, ThreadCount};
//!
//! # async fn demo() -> Result<(), decaes_core::ShimError> {
//! let shim = Shim::new(ShimConfig::default())?;
//! let threads = ThreadCount::new(4)?;
//! let code = shim
//!     .run(threads, &args!["image.nii.gz", "--T2map", "--TE", 0.007])
//!     .await?;
//! println!("exit code {code}");
//! # Ok(())
//! # }
//! ```

pub mod args;
pub mod bootstrap;
pub mod command;
pub mod config;
pub mod error;
pub mod shim;
pub mod subprocess;
pub mod threads;

pub use args::{args_from_json, serialize_args, Arg, Number};
pub use bootstrap::BootstrapScript;
pub use command::Invocation;
pub use config::ShimConfig;
pub use error::ShimError;
pub use shim::Shim;
pub use threads::ThreadCount;
