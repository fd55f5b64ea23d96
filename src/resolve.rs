/// Benchmark name recovery for the nested log layout.
///
/// In the nested layout the directory name is a scheduler-assigned slot,
/// not the instance name, so the canonical name has to be recovered from
/// what the run left behind: a sidecar descriptor file, or failing that,
/// the solver invocation echoed into the execution log.
use regex::Regex;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

/// Sidecar descriptor holding the instance path the run was started on.
pub const DESCRIPTOR_FILE: &str = "instance.txt";

/// Instance path as passed on the solver command line.
static MONO_FLAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-mono=(\S+) -mono-app").unwrap());

/// Errors produced by name resolution. Unlike metric extraction, a name
/// that cannot be recovered is a hard failure for that benchmark.
#[derive(Debug)]
pub enum ResolveError {
    Io(io::Error),
    /// Neither the descriptor file nor the log yielded a name.
    Unresolved(PathBuf),
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolveError::Io(e) => write!(f, "I/O error: {e}"),
            ResolveError::Unresolved(dir) => {
                write!(f, "cannot determine benchmark name for {}", dir.display())
            }
        }
    }
}

impl std::error::Error for ResolveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ResolveError::Io(e) => Some(e),
            ResolveError::Unresolved(_) => None,
        }
    }
}

/// Recover the benchmark name for a nested-layout directory.
///
/// Tries the `instance.txt` descriptor first; its content is a path-like
/// string and the name is the final segment. Falls back to the `-mono=`
/// flag in the already-read nested log text.
pub fn resolve_name(bench_dir: &Path, nested_log: &str) -> Result<String, ResolveError> {
    match std::fs::read_to_string(bench_dir.join(DESCRIPTOR_FILE)) {
        Ok(content) => {
            let name = final_segment(content.trim_end());
            if !name.is_empty() {
                return Ok(name.to_string());
            }
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(ResolveError::Io(e)),
    }

    if let Some(cap) = MONO_FLAG.captures(nested_log) {
        let name = final_segment(&cap[1]);
        if !name.is_empty() {
            return Ok(name.to_string());
        }
    }

    Err(ResolveError::Unresolved(bench_dir.to_path_buf()))
}

fn final_segment(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}
