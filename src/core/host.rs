//! Host identity resolution

use pi_stats_core::{HostIdentity, HOST_SENTINEL};

/// Resolves the identity from the operating system's hostname
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemHost;

impl HostIdentity for SystemHost {
    fn resolve(&self) -> String {
        match sysinfo::System::host_name() {
            Some(name) if !name.trim().is_empty() => name.trim().to_string(),
            _ => {
                log::warn!("Unable to resolve hostname, using '{}'", HOST_SENTINEL);
                HOST_SENTINEL.to_string()
            }
        }
    }
}

/// Fixed host identity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticHost(pub String);

impl HostIdentity for StaticHost {
    fn resolve(&self) -> String {
        if self.0.is_empty() {
            HOST_SENTINEL.to_string()
        } else {
            self.0.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_host_never_empty() {
        assert!(!SystemHost.resolve().is_empty());
    }

    #[test]
    fn test_static_host() {
        assert_eq!(StaticHost("pi4".to_string()).resolve(), "pi4");
        assert_eq!(StaticHost(String::new()).resolve(), HOST_SENTINEL);
    }
}
