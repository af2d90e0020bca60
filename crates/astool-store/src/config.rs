use serde::{Deserialize, Serialize};

use crate::error::{StoreError, StoreResult};

/// Where and how to reach the store.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    pub host: String,
    pub port: u16,
    /// Connection establishment timeout.
    pub timeout_ms: u64,
}

impl ClientConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Self::default()
        }
    }

    /// Reject configs that cannot name a seed node.
    pub fn validate(&self) -> StoreResult<()> {
        if self.host.is_empty() {
            return Err(StoreError::InvalidConfig("host must not be empty".into()));
        }
        if self.port == 0 {
            return Err(StoreError::InvalidConfig("port must not be 0".into()));
        }
        Ok(())
    }

    /// `host:port` form of the seed node.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: "localhost".into(),
            port: 3000,
            timeout_ms: 1000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let c = ClientConfig::default();
        assert_eq!(c.host, "localhost");
        assert_eq!(c.port, 3000);
        assert_eq!(c.timeout_ms, 1000);
        assert!(c.validate().is_ok());
        assert_eq!(c.address(), "localhost:3000");
    }

    #[test]
    fn empty_host_is_invalid() {
        let c = ClientConfig::new("", 3000);
        assert!(matches!(c.validate(), Err(StoreError::InvalidConfig(_))));
    }

    #[test]
    fn zero_port_is_invalid() {
        let c = ClientConfig::new("db1", 0);
        assert!(matches!(c.validate(), Err(StoreError::InvalidConfig(_))));
    }

    #[test]
    fn serde_roundtrip() {
        let c = ClientConfig::new("db1", 3100);
        let json = serde_json::to_string(&c).unwrap();
        let parsed: ClientConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(c, parsed);
    }
}
