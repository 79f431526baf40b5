//! Sandboxed file capability for `file.read` / `file.write`.
//!
//! Paths are resolved lexically against a fixed root before any OS call:
//! `.` segments drop out, `..` pops a previously pushed segment, and a
//! `..` with nothing left to pop, or an absolute path, is a
//! `SecurityError`. OS-level failures on a path inside the sandbox are
//! ordinary `IoError`s.

use std::ffi::OsStr;
use std::fs;
use std::path::{Component, Path, PathBuf};

use falcon_diagnostic::Diagnostic;

use crate::errors::{io_failure, sandbox_escape};

/// File access confined to one directory tree.
#[derive(Debug, Clone)]
pub struct SandboxedFs {
    root: PathBuf,
}

impl SandboxedFs {
    pub fn new(root: impl Into<PathBuf>) -> SandboxedFs {
        SandboxedFs { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Read a sandboxed file as UTF-8 text.
    pub fn read(&self, path: &str) -> Result<String, Diagnostic> {
        let resolved = self.resolve(path)?;
        fs::read_to_string(&resolved)
            .map_err(|e| io_failure(&format!("cannot read '{path}'"), &e.to_string()))
    }

    /// Write UTF-8 text to a sandboxed file, replacing any existing
    /// contents.
    pub fn write(&self, path: &str, contents: &str) -> Result<(), Diagnostic> {
        let resolved = self.resolve(path)?;
        fs::write(&resolved, contents)
            .map_err(|e| io_failure(&format!("cannot write '{path}'"), &e.to_string()))
    }

    /// Lexically normalize `path` under the root. Escape attempts fail
    /// before any filesystem call is made.
    fn resolve(&self, path: &str) -> Result<PathBuf, Diagnostic> {
        let mut kept: Vec<&OsStr> = Vec::new();
        for component in Path::new(path).components() {
            match component {
                Component::Normal(part) => kept.push(part),
                Component::CurDir => {}
                Component::ParentDir => {
                    if kept.pop().is_none() {
                        return Err(sandbox_escape(path));
                    }
                }
                Component::RootDir | Component::Prefix(_) => {
                    return Err(sandbox_escape(path));
                }
            }
        }
        let mut resolved = self.root.clone();
        resolved.extend(kept);
        Ok(resolved)
    }
}
