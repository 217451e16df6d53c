//! External document converter boundary.
//!
//! Whole-document HCL semantics — blocks, attributes, arrays-of-blocks — are
//! delegated to an external `hcl2json` binary run as a child process. Its
//! contract: given the source materialized as a file, it writes the complete
//! JSON document to stdout, with every interpolation template preserved
//! verbatim as a `"${...}"` string. Stdout is fully buffered before anything
//! parses it; there is no streaming and no partial consumption.

use std::path::PathBuf;
use std::process::Command;

use crate::error::{Result, TfxError};

/// Name the source file is materialized under in the converter's working
/// directory.
const INPUT_FILE: &str = "input.tf";

/// Turns HCL source text into a baseline JSON document string.
///
/// [`Hcl2JsonConverter`] is the process-backed implementation; tests
/// substitute in-memory fakes.
pub trait DocumentConverter {
    /// Convert HCL source to a JSON document string. Implementations must
    /// buffer and return the converter's complete output.
    fn convert(&self, source: &str) -> Result<String>;
}

/// Runs the `hcl2json` binary against the source in a scratch directory.
#[derive(Debug, Clone)]
pub struct Hcl2JsonConverter {
    program: PathBuf,
}

impl Hcl2JsonConverter {
    /// Use `hcl2json` from `PATH`.
    pub fn new() -> Self {
        Self {
            program: PathBuf::from("hcl2json"),
        }
    }

    /// Use a specific converter binary.
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for Hcl2JsonConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentConverter for Hcl2JsonConverter {
    fn convert(&self, source: &str) -> Result<String> {
        let dir = tempfile::tempdir()
            .map_err(|e| TfxError::Converter(format!("failed to create scratch directory: {e}")))?;
        let input = dir.path().join(INPUT_FILE);
        std::fs::write(&input, source)
            .map_err(|e| TfxError::Converter(format!("failed to write {INPUT_FILE}: {e}")))?;

        let output = Command::new(&self.program)
            .arg(INPUT_FILE)
            .current_dir(dir.path())
            .output()
            .map_err(|e| {
                TfxError::Converter(format!("failed to run {}: {e}", self.program.display()))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(TfxError::Converter(format!(
                "{} exited with {}: {}",
                self.program.display(),
                output.status,
                stderr.trim()
            )));
        }
        String::from_utf8(output.stdout)
            .map_err(|e| TfxError::Converter(format!("converter output is not valid UTF-8: {e}")))
    }
}
