//! Broker connection configuration.

use std::time::Duration;

use serde::Serialize;

use crate::config::{Role, Validate};
use crate::error::ConfigResult;
use crate::fields::config_fields;
use crate::util::millis_to_duration;

/// Timeouts used by a single broker connection.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BrokerConfig {
    #[serde(rename = "connect.timeout.ms")]
    pub connect_timeout_ms: i32,
    /// Request timeout used when no per-API override is set.
    #[serde(rename = "timeout.ms")]
    pub timeout_ms: i32,
    /// Per-API request timeouts, indexed by API key. `None` entries fall back
    /// to `timeout_ms`.
    #[serde(rename = "timeout.ms.for.each.api")]
    pub timeout_ms_for_each_api: Vec<Option<i32>>,
}

impl Default for BrokerConfig {
    fn default() -> BrokerConfig {
        BrokerConfig {
            connect_timeout_ms: 60000,
            timeout_ms: 30000,
            timeout_ms_for_each_api: Vec::new(),
        }
    }
}

config_fields!(BrokerConfig, Role::Broker, {
    "connect.timeout.ms" => connect_timeout_ms,
    "timeout.ms" => timeout_ms,
    "timeout.ms.for.each.api" => timeout_ms_for_each_api,
});

impl BrokerConfig {
    pub fn connect_timeout(&self) -> Duration {
        millis_to_duration(self.connect_timeout_ms)
    }

    pub fn timeout(&self) -> Duration {
        millis_to_duration(self.timeout_ms)
    }

    /// Returns the request timeout for the API with key `api_key`.
    pub fn timeout_for_api(&self, api_key: i16) -> Duration {
        let ms = usize::try_from(api_key)
            .ok()
            .and_then(|idx| self.timeout_ms_for_each_api.get(idx).copied().flatten())
            .unwrap_or(self.timeout_ms);
        millis_to_duration(ms)
    }
}

impl Validate for BrokerConfig {
    /// Broker connections accept any timeouts.
    fn validate(&self) -> ConfigResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_for_api() {
        let config = BrokerConfig {
            timeout_ms_for_each_api: vec![None, Some(1000), None],
            ..BrokerConfig::default()
        };
        assert_eq!(config.timeout_for_api(0), Duration::from_secs(30));
        assert_eq!(config.timeout_for_api(1), Duration::from_secs(1));
        assert_eq!(config.timeout_for_api(2), Duration::from_secs(30));
        assert_eq!(config.timeout_for_api(18), Duration::from_secs(30));
        assert_eq!(config.timeout_for_api(-1), Duration::from_secs(30));
    }

    #[test]
    fn test_defaults_validate() {
        let config = BrokerConfig::default();
        assert_eq!(config.connect_timeout(), Duration::from_secs(60));
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert!(config.timeout_ms_for_each_api.is_empty());
        assert_eq!(config.validate(), Ok(()));
    }
}
