//! Per-step telemetry sinks.
//! - EventSink:    trait called by the episode runner after every step
//! - NoopSink:     discards all events
//! - MemorySink:   keeps the records in memory
//! - JsonlSink:    writes one JSON object per line (JSONL) to any writer
//! - FileSink:     JsonlSink over a buffered file

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use serde::{Serialize, Deserialize};

use crate::env::{AtcEnv, StepResult};
use crate::reward::RewardComponents;
use crate::snapshot::LandingRecord;

/// Structured record of one transition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepRecord {
    pub episode: u32,
    pub seed: u64,
    pub step_index: u32,
    pub action: u32,
    pub reward: f64,
    pub components: RewardComponents,
    pub terminated: bool,
    pub truncated: bool,
    pub served_count: u32,
    pub crash_count: u32,
    pub waiting_count: usize,
    pub cooldowns: Vec<u32>,
    /// Set only on the step that landed an aircraft
    pub landing: Option<LandingRecord>,
}

impl StepRecord {
    pub fn new(episode: u32, env: &AtcEnv, action: u32, result: &StepResult) -> Self {
        StepRecord {
            episode,
            seed: env.seed(),
            step_index: result.info.step_index,
            action,
            reward: result.reward,
            components: result.components,
            terminated: result.terminated,
            truncated: result.truncated,
            served_count: result.info.served_count,
            crash_count: result.info.crash_count,
            waiting_count: result.info.waiting_count,
            cooldowns: env.cooldowns().to_vec(),
            landing: result.landing.clone(),
        }
    }
}

pub trait EventSink {
    fn log_step(&mut self, episode: u32, env: &AtcEnv, action: u32, result: &StepResult);

    fn flush(&mut self) {}
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSink;

impl EventSink for NoopSink {
    fn log_step(&mut self, _episode: u32, _env: &AtcEnv, _action: u32, _result: &StepResult) {}
}

#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    pub records: Vec<StepRecord>,
}

impl EventSink for MemorySink {
    fn log_step(&mut self, episode: u32, env: &AtcEnv, action: u32, result: &StepResult) {
        self.records.push(StepRecord::new(episode, env, action, result));
    }
}

/// Write failures never stop the simulation: the first one is reported on
/// stderr and the sink stays quiet afterwards.
pub struct JsonlSink<W: Write> {
    writer: W,
    failed: bool,
}

pub type FileSink = JsonlSink<BufWriter<File>>;

impl FileSink {
    pub fn create(path: impl AsRef<Path>) -> io::Result<Self> {
        let file = File::create(path)?;
        Ok(JsonlSink::new(BufWriter::new(file)))
    }
}

impl<W: Write> JsonlSink<W> {
    pub fn new(writer: W) -> Self {
        JsonlSink { writer, failed: false }
    }

    /// Whether a write or flush has failed since creation.
    pub fn has_failed(&self) -> bool {
        self.failed
    }

    fn report(&mut self, result: io::Result<()>) {
        if let Err(e) = result {
            if !self.failed {
                eprintln!("telemetry: write failed, further records may be lost: {e}");
            }
            self.failed = true;
        }
    }
}

impl<W: Write> EventSink for JsonlSink<W> {
    fn log_step(&mut self, episode: u32, env: &AtcEnv, action: u32, result: &StepResult) {
        let record = StepRecord::new(episode, env, action, result);
        let written = match serde_json::to_string(&record) {
            Ok(line) => writeln!(self.writer, "{line}"),
            Err(e) => Err(io::Error::new(io::ErrorKind::InvalidData, e)),
        };
        self.report(written);
    }

    fn flush(&mut self) {
        let flushed = self.writer.flush();
        self.report(flushed);
    }
}

impl<W: Write> Drop for JsonlSink<W> {
    fn drop(&mut self) {
        let flushed = self.writer.flush();
        self.report(flushed);
    }
}

#[cfg(test)]
mod tests {
    use std::io::{BufRead, BufReader};

    use super::*;
    use crate::aircraft::{Aircraft, Priority};
    use crate::config::EnvConfig;

    fn env() -> AtcEnv {
        let config = EnvConfig { spawn_interval: 1_000, ..EnvConfig::default() };
        let fleet = vec![Aircraft::new("KL640", 12, 0, Priority::Normal)];
        AtcEnv::from_parts(config, 3, fleet, [0, 0], 5).unwrap()
    }

    #[test]
    fn test_landing_is_recorded_only_on_its_step() {
        let mut env = env();
        let mut sink = MemorySink::default();

        let result = env.step(0).unwrap();
        sink.log_step(0, &env, 0, &result);
        let result = env.step(10).unwrap();
        sink.log_step(0, &env, 10, &result);

        assert_eq!(sink.records.len(), 2);
        assert_eq!(sink.records[0].landing.as_ref().map(|l| l.aircraft_id.as_str()), Some("KL640"));
        assert_eq!(sink.records[0].cooldowns, vec![5, 0]);
        assert_eq!(sink.records[1].landing, None);
        assert_eq!(sink.records[1].step_index, 2);
    }

    #[test]
    fn test_file_sink_writes_jsonl() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("steps.jsonl");
        let mut env = env();
        {
            let mut sink = FileSink::create(&path).unwrap();
            for action in [0, 10, 10] {
                let result = env.step(action).unwrap();
                sink.log_step(1, &env, action, &result);
            }
            sink.flush();
        }

        let lines = BufReader::new(File::open(&path).unwrap()).lines().collect::<Result<Vec<_>, _>>().unwrap();
        assert_eq!(lines.len(), 3);
        let first: StepRecord = serde_json::from_str(&lines[0]).unwrap();
        assert_eq!(first.episode, 1);
        assert_eq!(first.action, 0);
        assert_eq!(first.served_count, 1);
        let last: serde_json::Value = serde_json::from_str(&lines[2]).unwrap();
        assert_eq!(last["step_index"], 3);
    }

    struct BrokenWriter;

    impl Write for BrokenWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "disk full"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::Other, "disk full"))
        }
    }

    #[test]
    fn test_write_failure_is_flagged_and_stepping_continues() {
        let mut env = env();
        let mut sink = JsonlSink::new(BrokenWriter);
        assert!(!sink.has_failed());
        for action in [0, 10] {
            let result = env.step(action).unwrap();
            sink.log_step(0, &env, action, &result);
        }
        sink.flush();
        assert!(sink.has_failed());
        assert_eq!(env.info().unwrap().step_index, 2);
    }

    #[test]
    fn test_healthy_writer_is_not_flagged() {
        let mut env = env();
        let mut sink = JsonlSink::new(Vec::new());
        let result = env.step(10).unwrap();
        sink.log_step(0, &env, 10, &result);
        sink.flush();
        assert!(!sink.has_failed());
    }
}
