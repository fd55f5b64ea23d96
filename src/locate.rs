/// Log file discovery across the two benchmark directory layouts.
///
/// Flat layout: `<benchmark>/out_file`, benchmark name = directory name.
/// Nested layout: `<benchmark>/0/log.0`, with the name recovered via the
/// resolver because the directory name is not reliable there.
use crate::resolve::{self, ResolveError};
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

/// Flat layout: the solver log sits directly in the benchmark directory.
pub const FLAT_LOG: &str = "out_file";

/// Nested layout: per-process log under the rank-0 subdirectory.
pub const NESTED_LOG: &str = "0/log.0";

/// Raw log text plus the resolved benchmark name.
#[derive(Debug)]
pub struct LocatedLog {
    pub text: String,
    pub name: String,
}

#[derive(Debug)]
pub enum LocateError {
    Io(io::Error),
    /// Neither layout exists under the benchmark directory.
    NoLog(PathBuf),
    Resolve(ResolveError),
}

impl fmt::Display for LocateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocateError::Io(e) => write!(f, "I/O error: {e}"),
            LocateError::NoLog(dir) => write!(
                f,
                "no solver log found under {} (tried {FLAT_LOG} and {NESTED_LOG})",
                dir.display()
            ),
            LocateError::Resolve(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for LocateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LocateError::Io(e) => Some(e),
            LocateError::NoLog(_) => None,
            LocateError::Resolve(e) => Some(e),
        }
    }
}

impl From<ResolveError> for LocateError {
    fn from(e: ResolveError) -> Self {
        LocateError::Resolve(e)
    }
}

/// Find and read the solver log for one benchmark directory.
///
/// Probes the flat layout first, then the nested layout. A missing log
/// under both layouts is fatal for the benchmark; there is no further
/// fallback.
pub fn locate_log(bench_dir: &Path) -> Result<LocatedLog, LocateError> {
    match std::fs::read_to_string(bench_dir.join(FLAT_LOG)) {
        Ok(text) => {
            let name = bench_dir
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            tracing::debug!(name = %name, "flat layout log");
            return Ok(LocatedLog { text, name });
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(LocateError::Io(e)),
    }

    let text = match std::fs::read_to_string(bench_dir.join(NESTED_LOG)) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(LocateError::NoLog(bench_dir.to_path_buf()));
        }
        Err(e) => return Err(LocateError::Io(e)),
    };
    let name = resolve::resolve_name(bench_dir, &text)?;
    tracing::debug!(name = %name, "nested layout log");
    Ok(LocatedLog { text, name })
}
