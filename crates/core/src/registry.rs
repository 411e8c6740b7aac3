//! Registry binding metric keys to device queries

use crate::error::{ConfigError, ExtractionError};
use crate::extractor::{BoxedExtractor, Extractor};
use pi_stats_types::{FieldType, FieldValue};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Declarative binding of one metric to a device command
pub struct MetricSpec {
    command: String,
    argument: Option<String>,
    extractor: BoxedExtractor,
}

impl MetricSpec {
    pub fn new(
        command: impl Into<String>,
        argument: Option<&str>,
        extractor: impl Extractor + 'static,
    ) -> Self {
        Self {
            command: command.into(),
            argument: argument.map(str::to_string),
            extractor: Box::new(extractor),
        }
    }

    /// Device command to run
    pub fn command(&self) -> &str {
        &self.command
    }

    /// Argument passed to the command and to the extractor
    pub fn argument(&self) -> Option<&str> {
        self.argument.as_deref()
    }

    pub fn extractor(&self) -> &dyn Extractor {
        self.extractor.as_ref()
    }

    /// Run this metric's extractor over a device reply
    pub fn extract(&self, raw: &str) -> Result<FieldValue, ExtractionError> {
        self.extractor.extract(self.argument(), raw)
    }
}

impl fmt::Debug for MetricSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MetricSpec")
            .field("command", &self.command)
            .field("argument", &self.argument)
            .field("extractor", &self.extractor.family())
            .finish()
    }
}

/// Serializable summary of a registered metric
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricInfo {
    pub key: String,
    pub command: String,
    pub argument: Option<String>,
    pub family: &'static str,
    pub field_type: FieldType,
}

/// Immutable metric table, built once at startup
///
/// Metrics are kept sorted by key, so iteration order (and therefore the
/// field order of every emitted record) is deterministic.
#[derive(Debug)]
pub struct MetricRegistry {
    metrics: BTreeMap<String, MetricSpec>,
}

impl MetricRegistry {
    /// Start building a registry
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// Look up a metric by key
    pub fn get(&self, key: &str) -> Option<&MetricSpec> {
        self.metrics.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.metrics.contains_key(key)
    }

    /// Iterate over all metrics in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &MetricSpec)> {
        self.metrics.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// List all registered keys in key order
    pub fn keys(&self) -> Vec<&str> {
        self.metrics.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.metrics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }

    /// Describe every registered metric
    pub fn info(&self) -> Vec<MetricInfo> {
        self.iter()
            .map(|(key, spec)| MetricInfo {
                key: key.to_string(),
                command: spec.command().to_string(),
                argument: spec.argument().map(str::to_string),
                family: spec.extractor().family(),
                field_type: spec.extractor().field_type(),
            })
            .collect()
    }
}

/// Builder for [`MetricRegistry`]
///
/// Every registration is validated immediately: duplicate keys, empty
/// commands and arguments the extractor family does not understand are
/// rejected here rather than discovered while sampling.
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    metrics: BTreeMap<String, MetricSpec>,
}

impl RegistryBuilder {
    /// Create a new empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a metric
    pub fn register(
        &mut self,
        key: &str,
        command: &str,
        argument: Option<&str>,
        extractor: impl Extractor + 'static,
    ) -> Result<&mut Self, ConfigError> {
        self.register_spec(key, MetricSpec::new(command, argument, extractor))
    }

    /// Register a prepared metric spec
    pub fn register_spec(&mut self, key: &str, spec: MetricSpec) -> Result<&mut Self, ConfigError> {
        if key.is_empty() {
            return Err(ConfigError::EmptyKey);
        }
        if spec.command().trim().is_empty() {
            return Err(ConfigError::EmptyCommand(key.to_string()));
        }
        if self.metrics.contains_key(key) {
            return Err(ConfigError::DuplicateKey(key.to_string()));
        }
        spec.extractor()
            .validate(spec.argument())
            .map_err(|source| ConfigError::InvalidArgument {
                key: key.to_string(),
                family: spec.extractor().family(),
                source,
            })?;

        log::trace!("Registered metric {} -> {:?}", key, spec);
        self.metrics.insert(key.to_string(), spec);
        Ok(self)
    }

    /// Finish the registry
    pub fn build(self) -> Result<MetricRegistry, ConfigError> {
        if self.metrics.is_empty() {
            return Err(ConfigError::Empty);
        }
        Ok(MetricRegistry {
            metrics: self.metrics,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ArgumentError;

    /// Echoes the reply back as a string field
    struct Echo;

    impl Extractor for Echo {
        fn family(&self) -> &'static str {
            "echo"
        }

        fn field_type(&self) -> FieldType {
            FieldType::String
        }

        fn extract(&self, _argument: Option<&str>, raw: &str) -> Result<FieldValue, ExtractionError> {
            Ok(FieldValue::String(raw.trim().to_string()))
        }
    }

    /// Accepts only the argument "ok"
    struct Picky;

    impl Extractor for Picky {
        fn family(&self) -> &'static str {
            "picky"
        }

        fn field_type(&self) -> FieldType {
            FieldType::Integer
        }

        fn validate(&self, argument: Option<&str>) -> Result<(), ArgumentError> {
            match argument {
                Some("ok") => Ok(()),
                Some(other) => Err(ArgumentError::Unknown {
                    argument: other.to_string(),
                    expected: &["ok"],
                }),
                None => Err(ArgumentError::Missing),
            }
        }

        fn extract(&self, _argument: Option<&str>, _raw: &str) -> Result<FieldValue, ExtractionError> {
            Ok(FieldValue::Integer(1))
        }
    }

    #[test]
    fn test_register_and_lookup() {
        let mut builder = MetricRegistry::builder();
        builder.register("b", "cmd_b", Some("x"), Echo).unwrap();
        builder.register("a", "cmd_a", None, Echo).unwrap();
        let registry = builder.build().unwrap();

        assert_eq!(registry.len(), 2);
        let spec = registry.get("b").unwrap();
        assert_eq!(spec.command(), "cmd_b");
        assert_eq!(spec.argument(), Some("x"));
        assert!(registry.get("c").is_none());
        // Sorted by key regardless of registration order
        assert_eq!(registry.keys(), vec!["a", "b"]);
    }

    #[test]
    fn test_duplicate_key_fails() {
        let mut builder = RegistryBuilder::new();
        builder.register("soc_temp", "measure_temp", None, Echo).unwrap();
        let err = builder
            .register("soc_temp", "measure_volts", None, Echo)
            .unwrap_err();
        assert_eq!(err, ConfigError::DuplicateKey("soc_temp".to_string()));
        // The original registration is kept
        let registry = builder.build().unwrap();
        assert_eq!(registry.get("soc_temp").unwrap().command(), "measure_temp");
    }

    #[test]
    fn test_empty_key_and_command_rejected() {
        let mut builder = RegistryBuilder::new();
        assert_eq!(builder.register("", "cmd", None, Echo).unwrap_err(), ConfigError::EmptyKey);
        assert_eq!(
            builder.register("k", "  ", None, Echo).unwrap_err(),
            ConfigError::EmptyCommand("k".to_string())
        );
    }

    #[test]
    fn test_invalid_argument_rejected_at_build_time() {
        let mut builder = RegistryBuilder::new();
        let err = builder.register("k", "cmd", Some("bad"), Picky).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidArgument { family: "picky", source: ArgumentError::Unknown { .. }, .. }
        ));
        let err = builder.register("k", "cmd", None, Picky).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidArgument { source: ArgumentError::Missing, .. }
        ));
        assert!(builder.register("k", "cmd", Some("ok"), Picky).is_ok());
    }

    #[test]
    fn test_empty_registry_rejected() {
        assert_eq!(RegistryBuilder::new().build().unwrap_err(), ConfigError::Empty);
    }

    #[test]
    fn test_spec_extract_uses_argument() {
        let spec = MetricSpec::new("cmd", None, Echo);
        assert_eq!(spec.extract(" hi \n").unwrap(), FieldValue::String("hi".to_string()));
        assert_eq!(format!("{:?}", spec), "MetricSpec { command: \"cmd\", argument: None, extractor: \"echo\" }");
    }

    #[test]
    fn test_info() {
        let mut builder = RegistryBuilder::new();
        builder.register("k", "cmd", Some("ok"), Picky).unwrap();
        let info = builder.build().unwrap().info();
        assert_eq!(
            info,
            vec![MetricInfo {
                key: "k".to_string(),
                command: "cmd".to_string(),
                argument: Some("ok".to_string()),
                family: "picky",
                field_type: FieldType::Integer,
            }]
        );
    }
}
