use std::fmt;
use std::time::{Duration, Instant};

use tracing::info;

/// A measured stage of a compress or decompress run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Read,
    Transform,
    Encode,
    Serialize,
    Parse,
    Decode,
    InverseTransform,
    Write,
}

impl Stage {
    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Read => "read",
            Stage::Transform => "transform",
            Stage::Encode => "encode",
            Stage::Serialize => "serialize",
            Stage::Parse => "parse",
            Stage::Decode => "decode",
            Stage::InverseTransform => "inverse_transform",
            Stage::Write => "write",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Wall-clock durations of the stages of one compress or decompress run,
/// in the order they ran.
#[derive(Debug, Default, Clone)]
pub struct PipelineTimings {
    stages: Vec<(Stage, Duration)>,
}

impl PipelineTimings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, stage: Stage, duration: Duration) {
        self.stages.push((stage, duration));
    }

    /// Runs `f` and records its duration under `stage`.
    pub fn time<T>(&mut self, stage: Stage, f: impl FnOnce() -> T) -> T {
        let start = Instant::now();
        let value = f();
        self.record(stage, start.elapsed());
        value
    }

    pub fn merge(&mut self, other: PipelineTimings) {
        self.stages.extend(other.stages);
    }

    /// Total time spent in `stage`, or `None` if it never ran.
    pub fn stage(&self, stage: Stage) -> Option<Duration> {
        self.stages
            .iter()
            .filter(|(s, _)| *s == stage)
            .map(|(_, d)| *d)
            .reduce(|a, b| a + b)
    }

    pub fn total(&self) -> Duration {
        self.stages.iter().map(|(_, d)| *d).sum()
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    pub fn log_summary(&self) {
        let total = self.total().as_secs_f64();
        for (stage, duration) in &self.stages {
            let secs = duration.as_secs_f64();
            let share = if total > 0.0 { secs / total * 100.0 } else { 0.0 };
            info!(stage = %stage, ms = secs * 1000.0, share, "Stage finished");
        }
        info!(ms = total * 1000.0, "Run finished");
    }
}
