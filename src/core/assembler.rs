//! Builds one record per tick from the metric registry

use crate::config::Settings;
use log::trace;
use pi_stats_core::{
    bound_response, command_line, ConfigError, FieldValue, FirmwareQuery, HostIdentity,
    MetricRegistry, SampleError, HOST_KEY,
};
use pi_stats_types::{OutputFlavor, Record};

/// Queries every registered metric and collects the results into a record
///
/// A record is only returned once every metric has been queried and
/// normalized; the first failure aborts the whole record.
#[derive(Debug)]
pub struct RecordAssembler {
    registry: MetricRegistry,
    measurement: String,
    flavor: OutputFlavor,
    /// Resolved once, at construction
    host: String,
    last_timestamp: Option<i64>,
}

impl RecordAssembler {
    /// Create an assembler, resolving the host identity once
    pub fn new(
        registry: MetricRegistry,
        host: &dyn HostIdentity,
        settings: &Settings,
    ) -> Result<Self, ConfigError> {
        // Bare output carries the host as a field, which must not shadow a metric
        if !settings.flavor.host_as_tag() && registry.contains_key(HOST_KEY) {
            return Err(ConfigError::ReservedKey(HOST_KEY.to_string()));
        }

        Ok(Self {
            registry,
            measurement: settings.measurement.clone(),
            flavor: settings.flavor,
            host: host.resolve(),
            last_timestamp: None,
        })
    }

    pub fn registry(&self) -> &MetricRegistry {
        &self.registry
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn flavor(&self) -> OutputFlavor {
        self.flavor
    }

    /// Query and normalize every metric, in registry order
    pub fn assemble(&mut self, device: &mut dyn FirmwareQuery) -> Result<Record, SampleError> {
        let mut record = Record::with_capacity(self.measurement.as_str(), self.registry.len() + 1);

        if self.flavor.host_as_tag() {
            record.push_tag(HOST_KEY, self.host.as_str());
        } else {
            record.push_field(HOST_KEY, FieldValue::String(self.host.clone()));
        }

        for (key, spec) in self.registry.iter() {
            trace!("Querying {} ({})", key, command_line(spec.command(), spec.argument()));

            let raw = device
                .query(spec.command(), spec.argument())
                .map_err(|source| SampleError::Transport {
                    key: key.to_string(),
                    source,
                })?;
            let raw = bound_response(raw);

            let value = spec.extract(&raw).map_err(|source| SampleError::Extraction {
                key: key.to_string(),
                command: spec.command().to_string(),
                argument: spec.argument().map(str::to_string),
                source,
            })?;

            let added = record.push_field(key, value);
            debug_assert!(added, "registry keys are unique");
        }

        if self.flavor.has_timestamp() {
            record.set_timestamp(self.next_timestamp()?);
        }

        Ok(record)
    }

    /// Current time in nanoseconds, forced to be strictly increasing
    fn next_timestamp(&mut self) -> Result<i64, SampleError> {
        let now = chrono::Utc::now()
            .timestamp_nanos_opt()
            .ok_or(SampleError::Clock)?;
        let timestamp = match self.last_timestamp {
            Some(last) if now <= last => last + 1,
            _ => now,
        };
        self.last_timestamp = Some(timestamp);
        Ok(timestamp)
    }
}
