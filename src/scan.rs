/// Benchmark batch aggregation: walk a results root one level deep and
/// assemble per-run metrics into tables.
///
/// Each immediate subdirectory of the root is one benchmark. Metric
/// extraction failures degrade to zero defaults inside the extractors;
/// structural failures (missing log, unresolvable name, I/O errors) abort
/// the whole batch call.
use crate::extract::{self, EventCounts};
use crate::locate::{self, LocateError};
use crate::table::{Table, NAME_COLUMN};
use serde_json::{Map, Value};
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub enum ScanError {
    Io(io::Error),
    Locate(LocateError),
    /// Event aggregation found no flat log in a benchmark directory.
    MissingLog(PathBuf),
}

impl std::fmt::Display for ScanError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScanError::Io(e) => write!(f, "I/O error: {e}"),
            ScanError::Locate(e) => write!(f, "{e}"),
            ScanError::MissingLog(path) => {
                write!(f, "missing solver log {}", path.display())
            }
        }
    }
}

impl std::error::Error for ScanError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ScanError::Io(e) => Some(e),
            ScanError::Locate(e) => Some(e),
            ScanError::MissingLog(_) => None,
        }
    }
}

impl From<LocateError> for ScanError {
    fn from(e: LocateError) -> Self {
        ScanError::Locate(e)
    }
}

/// Which memory column a scan emits.
enum MemoryColumn {
    /// `<prefix>_memory`: peak over all samples.
    Peak,
    /// `<prefix>_mem_per_sec`: the full sample series per row.
    Series,
}

/// One row per benchmark with result, peak memory and runtime columns.
///
/// Columns: `name`, `<prefix>_result`, `<prefix>_memory`,
/// `<prefix>_runtime`.
pub fn overview(root: &Path, prefix: &str) -> Result<Table, ScanError> {
    scan_table(root, prefix, MemoryColumn::Peak)
}

/// Like [`overview`], but with the full memory sample series per row in a
/// `<prefix>_mem_per_sec` column, for per-timestep plotting.
pub fn memory_series(root: &Path, prefix: &str) -> Result<Table, ScanError> {
    scan_table(root, prefix, MemoryColumn::Series)
}

fn scan_table(root: &Path, prefix: &str, memory: MemoryColumn) -> Result<Table, ScanError> {
    let result_column = format!("{prefix}_result");
    let memory_column = match memory {
        MemoryColumn::Peak => format!("{prefix}_memory"),
        MemoryColumn::Series => format!("{prefix}_mem_per_sec"),
    };
    let runtime_column = format!("{prefix}_runtime");

    let mut table = Table::new(vec![
        NAME_COLUMN.to_string(),
        result_column.clone(),
        memory_column.clone(),
        runtime_column.clone(),
    ]);

    for bench_dir in subdirs(root)? {
        let log = locate::locate_log(&bench_dir)?;
        tracing::debug!(name = %log.name, dir = %bench_dir.display(), "parsed benchmark");

        let memory_value = match memory {
            MemoryColumn::Peak => float_value(extract::peak_memory_gb(&log.text)),
            MemoryColumn::Series => Value::Array(
                extract::memory_series_gb(&log.text)
                    .into_iter()
                    .map(float_value)
                    .collect(),
            ),
        };

        let mut row = Map::new();
        row.insert(NAME_COLUMN.to_string(), Value::String(log.name));
        row.insert(result_column.clone(), Value::from(extract::result(&log.text)));
        row.insert(memory_column.clone(), memory_value);
        row.insert(
            runtime_column.clone(),
            float_value(extract::runtime_secs(&log.text)),
        );
        table.push_row(row);
    }

    Ok(table)
}

/// Sum clause-extraction event counts over every benchmark under a root.
///
/// Flat layout only: each benchmark must carry an `out_file`; there is no
/// nested-layout fallback here and a missing log aborts the batch.
pub fn event_totals(root: &Path) -> Result<EventCounts, ScanError> {
    let mut totals = EventCounts::default();
    for bench_dir in subdirs(root)? {
        let log_path = bench_dir.join(locate::FLAT_LOG);
        let log = match std::fs::read_to_string(&log_path) {
            Ok(log) => log,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(ScanError::MissingLog(log_path));
            }
            Err(e) => return Err(ScanError::Io(e)),
        };
        totals.accumulate(extract::event_counts(&log));
    }
    tracing::debug!(prepro = totals.prepro, base = totals.base, "event totals");
    Ok(totals)
}

fn float_value(value: f64) -> Value {
    serde_json::Number::from_f64(value)
        .map(Value::Number)
        .unwrap_or(Value::Null)
}

/// Immediate subdirectories of a root, non-recursive. Plain files in the
/// root are ignored. Enumeration order is filesystem-dependent.
fn subdirs(root: &Path) -> Result<Vec<PathBuf>, ScanError> {
    let mut dirs = Vec::new();
    for entry in std::fs::read_dir(root).map_err(ScanError::Io)? {
        let entry = entry.map_err(ScanError::Io)?;
        let path = entry.path();
        if path.is_dir() {
            dirs.push(path);
        }
    }
    Ok(dirs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve;

    fn write_bench(root: &Path, name: &str, log: &str) {
        let dir = root.join(name);
        std::fs::create_dir(&dir).unwrap();
        std::fs::write(dir.join(locate::FLAT_LOG), log).unwrap();
    }

    #[test]
    fn overview_two_benchmarks() {
        let root = tempfile::tempdir().unwrap();
        write_bench(
            root.path(),
            "a.cnf",
            "s SATISFIABLE\nglobmem=1.5GB\nRESPONSE_TIME #1 12.5\n",
        );
        write_bench(
            root.path(),
            "b.cnf",
            "s UNSATISFIABLE\nc maximum-resident-set-size:   2048.0\nc wall-clock-time:   7.25\n",
        );

        let table = overview(root.path(), "solverA").unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(
            table.columns(),
            &["name", "solverA_result", "solverA_memory", "solverA_runtime"]
        );

        let a = table.row_by_name("a.cnf").unwrap();
        assert_eq!(a["solverA_result"], 1);
        assert_eq!(a["solverA_memory"], 1.5);
        assert_eq!(a["solverA_runtime"], 12.5);

        let b = table.row_by_name("b.cnf").unwrap();
        assert_eq!(b["solverA_result"], -1);
        assert_eq!(b["solverA_memory"], 2.0);
        assert_eq!(b["solverA_runtime"], 7.25);
    }

    #[test]
    fn overview_defaults_for_bare_log() {
        let root = tempfile::tempdir().unwrap();
        write_bench(root.path(), "bare.cnf", "c nothing useful\n");

        let table = overview(root.path(), "s").unwrap();
        let row = table.row_by_name("bare.cnf").unwrap();
        assert_eq!(row["s_result"], 0);
        assert_eq!(row["s_memory"], 0.0);
        assert_eq!(row["s_runtime"], 0.0);
    }

    #[test]
    fn overview_follows_nested_layout() {
        let root = tempfile::tempdir().unwrap();
        let slot = root.path().join("slot-0");
        std::fs::create_dir_all(slot.join("0")).unwrap();
        std::fs::write(
            slot.join(locate::NESTED_LOG),
            "s SATISFIABLE\nRESPONSE_TIME #1 3.5\n",
        )
        .unwrap();
        std::fs::write(slot.join(resolve::DESCRIPTOR_FILE), "/sets/deep.cnf\n").unwrap();

        let table = overview(root.path(), "m").unwrap();
        let row = table.row_by_name("deep.cnf").unwrap();
        assert_eq!(row["m_result"], 1);
        assert_eq!(row["m_runtime"], 3.5);
    }

    #[test]
    fn overview_aborts_on_missing_log() {
        let root = tempfile::tempdir().unwrap();
        write_bench(root.path(), "good.cnf", "s SATISFIABLE\n");
        std::fs::create_dir(root.path().join("broken")).unwrap();

        let err = overview(root.path(), "s").unwrap_err();
        assert!(matches!(err, ScanError::Locate(LocateError::NoLog(_))));
    }

    #[test]
    fn overview_ignores_plain_files_in_root() {
        let root = tempfile::tempdir().unwrap();
        write_bench(root.path(), "a.cnf", "s SATISFIABLE\n");
        std::fs::write(root.path().join("README"), "not a benchmark").unwrap();

        let table = overview(root.path(), "s").unwrap();
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn memory_series_emits_full_series() {
        let root = tempfile::tempdir().unwrap();
        write_bench(
            root.path(),
            "a.cnf",
            "globmem=1.0GB\nglobmem=2.0GB\ns SATISFIABLE\nRESPONSE_TIME #1 9.5\n",
        );
        write_bench(root.path(), "b.cnf", "c no samples\n");

        let table = memory_series(root.path(), "m").unwrap();
        assert_eq!(
            table.columns(),
            &["name", "m_result", "m_mem_per_sec", "m_runtime"]
        );

        let a = table.row_by_name("a.cnf").unwrap();
        assert_eq!(a["m_mem_per_sec"], serde_json::json!([1.0, 2.0]));
        assert_eq!(a["m_runtime"], 9.5);

        // No samples still yields one point.
        let b = table.row_by_name("b.cnf").unwrap();
        assert_eq!(b["m_mem_per_sec"], serde_json::json!([0.0]));
    }

    #[test]
    fn event_totals_sum_across_logs() {
        let root = tempfile::tempdir().unwrap();
        write_bench(root.path(), "a.cnf", "SATWP #3:prepro extracted\n");
        write_bench(
            root.path(),
            "b.cnf",
            "SATWP #2:prepro extracted\nSATWP #4:base extracted\n",
        );

        let totals = event_totals(root.path()).unwrap();
        assert_eq!(totals, EventCounts { prepro: 5, base: 4 });
    }

    #[test]
    fn event_totals_require_flat_layout() {
        let root = tempfile::tempdir().unwrap();
        let slot = root.path().join("nested-only");
        std::fs::create_dir_all(slot.join("0")).unwrap();
        std::fs::write(slot.join(locate::NESTED_LOG), "SATWP #1:prepro extracted\n").unwrap();

        let err = event_totals(root.path()).unwrap_err();
        assert!(matches!(err, ScanError::MissingLog(_)));
    }

    #[test]
    fn event_totals_empty_root() {
        let root = tempfile::tempdir().unwrap();
        let totals = event_totals(root.path()).unwrap();
        assert_eq!(totals, EventCounts::default());
    }
}
