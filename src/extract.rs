/// Metric extraction from raw solver log text.
///
/// Benchmark logs arrive in several incompatible dialects:
/// - Mallob-style: `globmem=1.5GB`, `RESPONSE_TIME #1 84.801`
/// - Gimsatul-style: `c maximum-resident-set-size:   2048.0`,
///   `c wall-clock-time:   7.25`
/// - a third style reporting `process-time: ... 3.1 seconds`
///
/// Each extractor scans the full log against its known dialects in a fixed
/// priority order and returns on the first match. No match is not an error:
/// numeric metrics degrade to 0, so callers cannot distinguish "no data"
/// from a measured zero. That tradeoff keeps every output column numeric.
use regex::Regex;
use serde_json::{Map, Value};
use std::sync::LazyLock;

/// Mallob per-sample global memory marker, value in GB.
static GLOBMEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"globmem=([0-9]+(?:\.[0-9]+)?)GB").unwrap());

/// Gimsatul resident-set marker. The value is MB unless the match carries
/// a `bytes` qualifier.
static RESIDENT_SET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"maximum-resident-set-size:\s+([0-9]+(?:\.[0-9]+)?)( bytes)?").unwrap()
});

/// Mallob response-time line: `RESPONSE_TIME #<job> <seconds>`.
static RESPONSE_TIME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"RESPONSE_TIME #[0-9]+ ([0-9]+(?:\.[0-9]+)?)").unwrap());

/// Gimsatul wall-clock line.
static WALL_CLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"wall-clock-time:\s+([0-9]+(?:\.[0-9]+)?)").unwrap());

/// Fallback process-time line, value trailed by a `seconds` unit.
static PROCESS_TIME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"process-time:.*?([0-9]+(?:\.[0-9]+)?) seconds").unwrap());

/// Clause-sharing event markers: `SATWP #<count>:<category> extracted`.
static PREPRO_EXTRACTED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"SATWP #([0-9]+):prepro extracted").unwrap());
static BASE_EXTRACTED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"SATWP #([0-9]+):base extracted").unwrap());

/// Satisfiability verdict: SAT = 1, UNSAT = -1, unknown = 0.
///
/// The SAT marker is checked first; a log carrying both markers reports
/// SAT. That matches what solver pipelines have historically emitted.
pub fn result(log: &str) -> i32 {
    if log.contains("s SATISFIABLE") {
        1
    } else if log.contains("s UNSATISFIABLE") {
        -1
    } else {
        0
    }
}

/// Peak memory in GB.
///
/// Mallob logs sample `globmem=` repeatedly; the peak is the maximum over
/// all samples. Gimsatul logs report a single resident-set size instead,
/// in MB, or in bytes when the line says so.
pub fn peak_memory_gb(log: &str) -> f64 {
    let mut peak: Option<f64> = None;
    for cap in GLOBMEM.captures_iter(log) {
        if let Ok(sample) = cap[1].parse::<f64>() {
            peak = Some(peak.map_or(sample, |p: f64| p.max(sample)));
        }
    }
    if let Some(peak) = peak {
        return peak;
    }

    if let Some(cap) = RESIDENT_SET.captures(log) {
        let value: f64 = cap[1].parse().unwrap_or(0.0);
        return if cap.get(2).is_some() {
            value / 1024.0 / 1024.0
        } else {
            value / 1024.0
        };
    }

    0.0
}

/// Every `globmem=` sample in order of appearance, GB.
///
/// Never empty: a log without samples yields `[0.0]` so that per-timestep
/// plots always have at least one point.
pub fn memory_series_gb(log: &str) -> Vec<f64> {
    let samples: Vec<f64> = GLOBMEM
        .captures_iter(log)
        .filter_map(|cap| cap[1].parse().ok())
        .collect();
    if samples.is_empty() {
        vec![0.0]
    } else {
        samples
    }
}

/// Wall-clock runtime in seconds.
///
/// Dialect priority is fixed: Mallob's RESPONSE_TIME, then Gimsatul's
/// wall-clock-time, then the process-time fallback. The first dialect
/// whose pattern matches wins; later dialects are not attempted.
pub fn runtime_secs(log: &str) -> f64 {
    if let Some(cap) = RESPONSE_TIME.captures(log) {
        return cap[1].parse().unwrap_or(0.0);
    }
    if let Some(cap) = WALL_CLOCK.captures(log) {
        return cap[1].parse().unwrap_or(0.0);
    }
    if let Some(cap) = PROCESS_TIME.captures(log) {
        return cap[1].parse().unwrap_or(0.0);
    }
    0.0
}

/// Clause-extraction counters per event category, summed across a batch.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct EventCounts {
    pub prepro: u64,
    pub base: u64,
}

impl EventCounts {
    /// Add another log's counts into this running total.
    pub fn accumulate(&mut self, other: EventCounts) {
        self.prepro += other.prepro;
        self.base += other.base;
    }

    /// Render as a `<prefix>_prepro` / `<prefix>_base` JSON map.
    pub fn prefixed(&self, prefix: &str) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert(format!("{prefix}_prepro"), Value::from(self.prepro));
        map.insert(format!("{prefix}_base"), Value::from(self.base));
        map
    }
}

/// Clause-extraction event counts from one log.
///
/// Only the first occurrence of each marker is captured; a log repeating
/// a marker does not sum with itself. Summation across logs is the
/// aggregator's job.
pub fn event_counts(log: &str) -> EventCounts {
    EventCounts {
        prepro: first_count(&PREPRO_EXTRACTED, log),
        base: first_count(&BASE_EXTRACTED, log),
    }
}

fn first_count(pattern: &Regex, log: &str) -> u64 {
    pattern
        .captures(log)
        .and_then(|cap| cap[1].parse().ok())
        .unwrap_or(0)
}
