//! pi-stats-sources: Extractor families and the built-in metric table.
//!
//! Each module implements one normalization contract for one family of
//! device commands. [`register_all`] binds the metric keys the collector
//! publishes to those families.

mod clock;
mod config_value;
mod counters;
mod memory;
mod temperature;
mod text;
mod throttle;
mod voltage;

pub use clock::{ClockFrequency, CLOCKS};
pub use config_value::ConfigValue;
pub use counters::LabeledCounter;
pub use memory::{MemorySize, POOLS};
pub use temperature::Temperature;
pub use text::{find_labeled_line, string_property, trim_decimal};
pub use throttle::{parse_mask, Throttle, ThrottleCondition, ThrottleFlag, THROTTLE_FLAGS};
pub use voltage::{Voltage, RAILS};

use pi_stats_core::{ArgumentError, ConfigError, MetricRegistry, RegistryBuilder};

/// Build the registry of every built-in metric
pub fn default_registry() -> Result<MetricRegistry, ConfigError> {
    let mut builder = MetricRegistry::builder();
    register_all(&mut builder)?;
    let registry = builder.build()?;
    log::info!("Metric registry built: {} metrics", registry.len());
    Ok(registry)
}

/// Register all built-in metrics with a registry builder
pub fn register_all(builder: &mut RegistryBuilder) -> Result<(), ConfigError> {
    builder.register("soc_temp", "measure_temp", None, Temperature)?;

    builder
        .register("arm_freq", "measure_clock", Some("arm"), ClockFrequency)?
        .register("core_freq", "measure_clock", Some("core"), ClockFrequency)?
        .register("h264_freq", "measure_clock", Some("h264"), ClockFrequency)?
        .register("isp_freq", "measure_clock", Some("isp"), ClockFrequency)?
        .register("v3d_freq", "measure_clock", Some("v3d"), ClockFrequency)?
        .register("uart_freq", "measure_clock", Some("uart"), ClockFrequency)?
        .register("pwm_freq", "measure_clock", Some("pwm"), ClockFrequency)?
        .register("emmc_freq", "measure_clock", Some("emmc"), ClockFrequency)?
        .register("pixel_freq", "measure_clock", Some("pixel"), ClockFrequency)?
        .register("vec_freq", "measure_clock", Some("vec"), ClockFrequency)?
        .register("hdmi_freq", "measure_clock", Some("hdmi"), ClockFrequency)?
        .register("dpi_freq", "measure_clock", Some("dpi"), ClockFrequency)?;

    builder
        .register("core_volts", "measure_volts", Some("core"), Voltage)?
        .register("sdram_c_volts", "measure_volts", Some("sdram_c"), Voltage)?
        .register("sdram_i_volts", "measure_volts", Some("sdram_i"), Voltage)?
        .register("sdram_p_volts", "measure_volts", Some("sdram_p"), Voltage)?;

    builder
        .register("config_arm_freq", "get_config", Some("arm_freq"), ConfigValue)?
        .register("config_core_freq", "get_config", Some("core_freq"), ConfigValue)?
        .register("config_gpu_freq", "get_config", Some("gpu_freq"), ConfigValue)?
        .register("config_sdram_freq", "get_config", Some("sdram_freq"), ConfigValue)?;

    builder
        .register("arm_mem", "get_mem", Some("arm"), MemorySize)?
        .register("gpu_mem", "get_mem", Some("gpu"), MemorySize)?
        .register("malloc_total_mem", "get_mem", Some("malloc_total"), MemorySize)?
        .register("malloc_mem", "get_mem", Some("malloc"), MemorySize)?
        .register("reloc_total_mem", "get_mem", Some("reloc_total"), MemorySize)?
        .register("reloc_mem", "get_mem", Some("reloc"), MemorySize)?;

    builder
        .register("oom_count", "mem_oom", None, LabeledCounter::new("oom events"))?
        .register(
            "oom_ms",
            "mem_oom",
            None,
            LabeledCounter::with_unit("total time in oom handler", " ms"),
        )?;

    builder
        .register(
            "mem_reloc_allocation_failures",
            "mem_reloc_stats",
            None,
            LabeledCounter::new("alloc failures"),
        )?
        .register(
            "mem_reloc_compactions",
            "mem_reloc_stats",
            None,
            LabeledCounter::new("compactions"),
        )?
        .register(
            "mem_reloc_legacy_block_failures",
            "mem_reloc_stats",
            None,
            LabeledCounter::new("legacy block fails"),
        )?;

    // Metric keys match the flag names; the device sees plain `get_throttled`
    for &flag in THROTTLE_FLAGS {
        let throttle = Throttle::new(flag).map_err(|source| ConfigError::InvalidArgument {
            key: flag.to_string(),
            family: "throttle",
            source,
        })?;
        builder.register(flag, "get_throttled", None, throttle)?;
    }

    Ok(())
}

/// Require an argument drawn from a closed list
pub(crate) fn one_of(
    argument: Option<&str>,
    expected: &'static [&'static str],
) -> Result<(), ArgumentError> {
    match argument {
        None => Err(ArgumentError::Missing),
        Some(arg) if expected.contains(&arg) => Ok(()),
        Some(arg) => Err(ArgumentError::Unknown {
            argument: arg.to_string(),
            expected,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_registry_size() {
        let registry = default_registry().unwrap();
        assert_eq!(registry.len(), 40);
    }

    #[test]
    fn test_every_metric_has_a_command() {
        let registry = default_registry().unwrap();
        for key in registry.keys() {
            let spec = registry.get(key).unwrap();
            assert!(!spec.command().is_empty(), "{} has no command", key);
        }
    }

    #[test]
    fn test_registering_twice_fails() {
        let mut builder = MetricRegistry::builder();
        register_all(&mut builder).unwrap();
        assert_eq!(
            register_all(&mut builder).unwrap_err(),
            ConfigError::DuplicateKey("soc_temp".to_string())
        );
    }

    #[test]
    fn test_known_bindings() {
        let registry = default_registry().unwrap();

        let spec = registry.get("arm_mem").unwrap();
        assert_eq!((spec.command(), spec.argument()), ("get_mem", Some("arm")));
        assert_eq!(spec.extractor().family(), "memory");

        let spec = registry.get("soft_temp_limit_occurred").unwrap();
        assert_eq!((spec.command(), spec.argument()), ("get_throttled", None));
        assert_eq!(spec.extractor().family(), "throttle");

        let spec = registry.get("oom_ms").unwrap();
        assert_eq!((spec.command(), spec.argument()), ("mem_oom", None));
    }

    #[test]
    fn test_throttle_metrics_query_bare_command() {
        let registry = default_registry().unwrap();
        for &flag in THROTTLE_FLAGS {
            let spec = registry.get(flag).unwrap();
            assert_eq!((spec.command(), spec.argument()), ("get_throttled", None), "{}", flag);
        }
    }

    #[test]
    fn test_throttle_argument_caught_at_registration() {
        let mut builder = MetricRegistry::builder();
        let throttle = Throttle::new("throttled").unwrap();
        let err = builder
            .register("throttled", "get_throttled", Some("throttled"), throttle)
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidArgument {
                family: "throttle",
                source: ArgumentError::Unexpected(_),
                ..
            }
        ));
    }
}
