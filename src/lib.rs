//! pi-stats: Raspberry Pi firmware telemetry in line protocol
//!
//! This library provides the core functionality for pi-stats, including:
//! - The record assembler and the sampling loop
//! - Firmware transports (the `vcgencmd` utility and an in-memory fake)
//! - Configuration management
//!
//! The metric registry and extractor families live in `pi-stats-core` and
//! `pi-stats-sources`; record types live in `pi-stats-types`.

pub mod config;
pub mod core;
pub mod sources;

// Re-export commonly used types
pub use config::Settings;
pub use core::{LoopState, RecordAssembler, SamplingLoop, StaticHost, SystemHost};
pub use pi_stats_core::{FirmwareQuery, HostIdentity, MetricRegistry, SampleError, TransportError};
pub use pi_stats_sources::default_registry;
pub use pi_stats_types::{FieldValue, OutputFlavor, Record};
pub use sources::{FakeFirmware, Vcgencmd};
