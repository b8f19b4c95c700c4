//! Command line assembly.
//!
//! Layout: `<program> <startup flags> <extra flags> <script> <tokens...>`.

use std::path::{Path, PathBuf};

use crate::config::ShimConfig;

/// A fully assembled command line, ready to spawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    program: String,
    args: Vec<String>,
    script: PathBuf,
}

impl Invocation {
    pub fn new(config: &ShimConfig, script: &Path, tokens: Vec<String>) -> Self {
        let capacity = config.startup_flags.len() + config.extra_flags.len() + 1 + tokens.len();
        let mut args = Vec::with_capacity(capacity);
        args.extend(config.startup_flags.iter().cloned());
        args.extend(config.extra_flags.iter().cloned());
        args.push(script.to_string_lossy().into_owned());
        args.extend(tokens);

        Self {
            program: config.program.clone(),
            args,
            script: script.to_path_buf(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Arguments after the program name.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn script(&self) -> &Path {
        &self.script
    }

    /// Program followed by its arguments.
    pub fn argv(&self) -> Vec<&str> {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect()
    }

    /// All tokens joined with single spaces.
    ///
    /// Display only: tokens are passed to the child as separate arguments,
    /// never through a shell.
    pub fn command_line(&self) -> String {
        self.argv().join(" ")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_is_program_flags_script_tokens() {
        let config = ShimConfig {
            extra_flags: vec!["--check-bounds=no".to_string()],
            ..ShimConfig::default()
        };
        let script = Path::new("/tmp/decaes_abc.jl");
        let tokens = vec!["image.nii.gz".to_string(), "--T2map".to_string()];

        let invocation = Invocation::new(&config, script, tokens);

        assert_eq!(invocation.program(), "julia");
        assert_eq!(invocation.script(), script);
        assert_eq!(
            invocation.argv(),
            [
                "julia",
                "--startup-file=no",
                "--optimize=3",
                "--quiet",
                "--check-bounds=no",
                "/tmp/decaes_abc.jl",
                "image.nii.gz",
                "--T2map",
            ]
        );
        assert_eq!(
            invocation.command_line(),
            "julia --startup-file=no --optimize=3 --quiet --check-bounds=no /tmp/decaes_abc.jl image.nii.gz --T2map"
        );
    }

    #[test]
    fn no_tokens_ends_with_script() {
        let script = Path::new("/tmp/s.jl");
        let invocation = Invocation::new(&ShimConfig::default(), script, Vec::new());
        assert_eq!(
            invocation.args().last().map(String::as_str),
            Some("/tmp/s.jl")
        );
        assert!(invocation.command_line().ends_with(" /tmp/s.jl"));
    }
}
