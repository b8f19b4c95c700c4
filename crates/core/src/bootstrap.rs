//! Bootstrap script written once per invocation.
//!
//! The script loads the analysis package, installing it first if loading
//! fails, then hands control to the package's entry point. Its content is
//! fixed; only the file location changes between invocations.

use std::io::{self, Write};
use std::path::Path;

use tempfile::TempPath;

use crate::error::ShimError;

/// File name prefix of generated scripts.
pub const SCRIPT_PREFIX: &str = "decaes_";

/// Extension telling the interpreter what the file is.
pub const SCRIPT_SUFFIX: &str = ".jl";

/// Fixed content of every bootstrap script.
///
/// The package is loaded at run time, so the entry point is called through
/// `Base.invokelatest` to see the newly defined methods.
pub const BOOTSTRAP_SOURCE: &str = r#"try
    @eval using DECAES
catch e
    @warn "DECAES could not be loaded; installing it" exception = e
    import Pkg
    Pkg.add("DECAES")
    @eval using DECAES
end
Base.invokelatest(DECAES.main)
"#;

/// A uniquely named bootstrap script on disk.
///
/// The file is removed when the value is dropped, on every exit path.
/// [`BootstrapScript::close`] removes it eagerly and reports failures.
#[derive(Debug)]
pub struct BootstrapScript {
    path: TempPath,
}

impl BootstrapScript {
    /// Write a new script into `dir`, or the system temp directory if `None`.
    pub fn create(dir: Option<&Path>) -> Result<Self, ShimError> {
        let mut builder = tempfile::Builder::new();
        builder.prefix(SCRIPT_PREFIX).suffix(SCRIPT_SUFFIX);

        let mut file = match dir {
            Some(dir) => builder.tempfile_in(dir),
            None => builder.tempfile(),
        }
        .map_err(ShimError::BootstrapScript)?;

        file.write_all(BOOTSTRAP_SOURCE.as_bytes())
            .and_then(|()| file.flush())
            .map_err(ShimError::BootstrapScript)?;

        let path = file.into_temp_path();
        tracing::debug!(script = %path.display(), "Bootstrap script written");
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Delete the script now.
    ///
    /// A file that already disappeared is not an error.
    pub fn close(self) -> io::Result<()> {
        let shown = self.path.display().to_string();
        match self.path.close() {
            Ok(()) => {
                tracing::debug!(script = %shown, "Bootstrap script removed");
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
