//! Sampling loop

use super::RecordAssembler;
use log::debug;
use pi_stats_core::{FirmwareQuery, SampleError};
use std::convert::Infallible;
use std::io::Write;
use std::time::{Duration, Instant};

/// State of the sampling loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    /// Build and emit exactly one record
    Sampling,
    /// Idle for the configured interval
    Waiting,
}

/// Drives ticks: one record, then one full interval of sleep
///
/// Ticks never overlap: the delay starts only after a record has been
/// written and flushed, so the effective period is the query time plus the
/// interval. Any error ends the loop; there is no retry.
#[derive(Debug)]
pub struct SamplingLoop<Q, W> {
    assembler: RecordAssembler,
    device: Q,
    sink: W,
    interval: Duration,
    state: LoopState,
    records_written: u64,
}

impl<Q: FirmwareQuery, W: Write> SamplingLoop<Q, W> {
    /// Create a loop that starts in the sampling state
    pub fn new(assembler: RecordAssembler, device: Q, sink: W, interval: Duration) -> Self {
        Self {
            assembler,
            device,
            sink,
            interval,
            state: LoopState::Sampling,
            records_written: 0,
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Number of records fully written so far
    pub fn records_written(&self) -> u64 {
        self.records_written
    }

    pub fn device_mut(&mut self) -> &mut Q {
        &mut self.device
    }

    pub fn sink(&self) -> &W {
        &self.sink
    }

    pub fn into_sink(self) -> W {
        self.sink
    }

    /// Perform one state transition and return the new state
    pub fn step(&mut self) -> Result<LoopState, SampleError> {
        self.state = match self.state {
            LoopState::Sampling => {
                self.sample()?;
                LoopState::Waiting
            }
            LoopState::Waiting => {
                std::thread::sleep(self.interval);
                LoopState::Sampling
            }
        };
        Ok(self.state)
    }

    /// Build and write one record, then move to the waiting state
    pub fn tick(&mut self) -> Result<(), SampleError> {
        if self.state == LoopState::Waiting {
            self.step()?;
        }
        self.step()?;
        Ok(())
    }

    /// Run until an error occurs
    pub fn run(&mut self) -> Result<Infallible, SampleError> {
        loop {
            self.step()?;
        }
    }

    fn sample(&mut self) -> Result<(), SampleError> {
        let start = Instant::now();
        let record = self.assembler.assemble(&mut self.device)?;

        let mut line = record.to_line(self.assembler.flavor());
        line.push('\n');
        // Single write so a record is either emitted whole or not at all
        self.sink.write_all(line.as_bytes())?;
        self.sink.flush()?;

        self.records_written += 1;
        debug!(
            "Record {} written: {} fields in {:?}",
            self.records_written,
            record.fields().len(),
            start.elapsed()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::core::StaticHost;
    use crate::sources::FakeFirmware;
    use pi_stats_core::TransportError;

    fn sampling_loop() -> SamplingLoop<FakeFirmware, Vec<u8>> {
        let registry = pi_stats_sources::default_registry().unwrap();
        let assembler =
            RecordAssembler::new(registry, &StaticHost("pi4".to_string()), &Settings::default())
                .unwrap();
        SamplingLoop::new(assembler, FakeFirmware::raspberry_pi(), Vec::new(), Duration::ZERO)
    }

    fn lines(sink: &[u8]) -> Vec<String> {
        String::from_utf8(sink.to_vec())
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_starts_sampling() {
        let sampling_loop = sampling_loop();
        assert_eq!(sampling_loop.state(), LoopState::Sampling);
        assert_eq!(sampling_loop.records_written(), 0);
    }

    #[test]
    fn test_state_transitions() {
        let mut sampling_loop = sampling_loop();
        assert_eq!(sampling_loop.step().unwrap(), LoopState::Waiting);
        assert_eq!(lines(sampling_loop.sink()).len(), 1);
        assert_eq!(sampling_loop.step().unwrap(), LoopState::Sampling);
        assert_eq!(lines(sampling_loop.sink()).len(), 1);
        assert_eq!(sampling_loop.step().unwrap(), LoopState::Waiting);
        assert_eq!(lines(sampling_loop.sink()).len(), 2);
    }

    #[test]
    fn test_one_line_per_tick() {
        let mut sampling_loop = sampling_loop();
        for _ in 0..3 {
            sampling_loop.tick().unwrap();
        }
        assert_eq!(sampling_loop.records_written(), 3);
        let lines = lines(&sampling_loop.into_sink());
        assert_eq!(lines.len(), 3);
        for line in &lines {
            assert!(line.starts_with("raspberry_pi,host=pi4 "));
        }
    }

    #[test]
    fn test_failure_leaves_state_and_sink_untouched() {
        let mut sampling_loop = sampling_loop();
        sampling_loop.tick().unwrap();
        sampling_loop
            .device_mut()
            .set_reply("get_throttled", None, "throttled=0xnope");

        assert!(sampling_loop.tick().is_err());
        assert_eq!(sampling_loop.state(), LoopState::Sampling);
        assert_eq!(sampling_loop.records_written(), 1);
        assert_eq!(lines(sampling_loop.sink()).len(), 1);
    }

    #[test]
    fn test_run_stops_on_first_error() {
        let mut sampling_loop = sampling_loop();
        sampling_loop.device_mut().fail("mem_oom", None);
        let err = sampling_loop.run().unwrap_err();
        // oom_count is the first key served by mem_oom
        match err {
            SampleError::Transport {
                key,
                source: TransportError::CommandFailed { command, .. },
            } => {
                assert_eq!(key, "oom_count");
                assert_eq!(command, "mem_oom");
            }
            other => panic!("unexpected error: {}", other),
        }
        assert_eq!(sampling_loop.records_written(), 0);
        assert!(sampling_loop.sink().is_empty());
    }
}
