//! External encoder invocation

pub mod ffmpeg;

use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::PathBuf;

pub use ffmpeg::{check_available, find_ffmpeg, is_ffmpeg_on_path, run};

/// A fully built encoder command line
#[derive(Debug, Clone, PartialEq)]
pub struct EncoderInvocation {
    /// Encoder executable
    pub program: PathBuf,
    /// Arguments in order, excluding the program itself
    pub args: Vec<OsString>,
    /// Video file the encoder writes
    pub output_path: PathBuf,
    /// Length of the produced video in seconds
    pub total_duration: f64,
}

impl EncoderInvocation {
    /// Arguments as UTF-8, lossily converted
    pub fn args_lossy(&self) -> Vec<String> {
        self.args
            .iter()
            .map(|arg| arg.to_string_lossy().into_owned())
            .collect()
    }

    /// Value following the first occurrence of `flag`
    pub fn arg_value(&self, flag: &str) -> Option<&OsStr> {
        self.args
            .iter()
            .position(|arg| arg == flag)
            .and_then(|i| self.args.get(i + 1))
            .map(OsString::as_os_str)
    }
}

impl fmt::Display for EncoderInvocation {
    /// Shell-quoted command line, for logs and dry runs
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", shell_quote(&self.program.to_string_lossy()))?;
        for arg in &self.args {
            write!(f, " {}", shell_quote(&arg.to_string_lossy()))?;
        }
        Ok(())
    }
}

/// Quote `arg` for a POSIX shell when it contains anything but safe characters
fn shell_quote(arg: &str) -> String {
    let safe = !arg.is_empty()
        && arg
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./:=+@%,".contains(c));
    if safe {
        arg.to_string()
    } else {
        format!("'{}'", arg.replace('\'', r"'\''"))
    }
}
