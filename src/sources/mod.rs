//! Firmware transports
//!
//! `Vcgencmd` talks to the real device; `FakeFirmware` serves canned
//! replies for tests and benchmarks.

mod fake;
mod vcgencmd;

pub use fake::FakeFirmware;
pub use vcgencmd::Vcgencmd;
