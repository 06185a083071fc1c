//! Group consumer configuration.

use std::time::Duration;

use serde::Serialize;

use crate::config::{Role, Validate};
use crate::error::{ConfigError, ConfigResult};
use crate::fields::config_fields;
use crate::util::millis_to_duration;

/// Configuration of a group consumer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ConsumerConfig {
    #[serde(rename = "bootstrap.servers")]
    pub bootstrap_servers: String,
    #[serde(rename = "client.id")]
    pub client_id: String,
    #[serde(rename = "group.id")]
    pub group_id: String,
    #[serde(rename = "session.timeout.ms")]
    pub session_timeout_ms: i32,
    #[serde(rename = "fetch.max.wait.ms")]
    pub fetch_max_wait_ms: i32,
    #[serde(rename = "fetch.max.bytes")]
    pub fetch_max_bytes: i32,
    #[serde(rename = "fetch.min.bytes")]
    pub fetch_min_bytes: i32,
    /// Start from the earliest offset when the group has no committed offset.
    #[serde(rename = "frombeginning")]
    pub from_beginning: bool,
    #[serde(rename = "auto.commit")]
    pub auto_commit: bool,
    /// Commit right after each fetch instead of on the auto-commit timer.
    #[serde(rename = "commit.after.fetch")]
    pub commit_after_fetch: bool,
    #[serde(rename = "auto.commit.interval.ms")]
    pub auto_commit_interval_ms: i32,
    /// Where committed offsets are stored: 0 for zookeeper, 1 for kafka.
    #[serde(rename = "offset.storage")]
    pub offsets_storage: i32,
    #[serde(rename = "connect.timeout.ms")]
    pub connect_timeout_ms: i32,
    #[serde(rename = "timeout.ms")]
    pub timeout_ms: i32,
}

impl Default for ConsumerConfig {
    fn default() -> ConsumerConfig {
        ConsumerConfig {
            bootstrap_servers: String::new(),
            client_id: "healer".to_owned(),
            group_id: String::new(),
            session_timeout_ms: 30000,
            fetch_max_wait_ms: 100,
            fetch_max_bytes: 10 * 1024 * 1024,
            fetch_min_bytes: 1,
            from_beginning: false,
            auto_commit: true,
            commit_after_fetch: false,
            auto_commit_interval_ms: 5000,
            offsets_storage: 1,
            connect_timeout_ms: 30000,
            timeout_ms: 60000,
        }
    }
}

config_fields!(ConsumerConfig, Role::Consumer, {
    "bootstrap.servers" => bootstrap_servers,
    "client.id" => client_id,
    "group.id" => group_id,
    "session.timeout.ms" => session_timeout_ms,
    "fetch.max.wait.ms" => fetch_max_wait_ms,
    "fetch.max.bytes" => fetch_max_bytes,
    "fetch.min.bytes" => fetch_min_bytes,
    "frombeginning" => from_beginning,
    "auto.commit" => auto_commit,
    "commit.after.fetch" => commit_after_fetch,
    "auto.commit.interval.ms" => auto_commit_interval_ms,
    "offset.storage" => offsets_storage,
    "connect.timeout.ms" => connect_timeout_ms,
    "timeout.ms" => timeout_ms,
});

impl ConsumerConfig {
    pub fn session_timeout(&self) -> Duration {
        millis_to_duration(self.session_timeout_ms)
    }

    pub fn fetch_max_wait(&self) -> Duration {
        millis_to_duration(self.fetch_max_wait_ms)
    }

    pub fn auto_commit_interval(&self) -> Duration {
        millis_to_duration(self.auto_commit_interval_ms)
    }

    pub fn connect_timeout(&self) -> Duration {
        millis_to_duration(self.connect_timeout_ms)
    }

    /// Read timeout on broker connections.
    pub fn timeout(&self) -> Duration {
        millis_to_duration(self.timeout_ms)
    }
}

impl Validate for ConsumerConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.bootstrap_servers.is_empty() {
            return Err(ConfigError::ConnectionTargetNotSet);
        }
        if self.group_id.is_empty() {
            return Err(ConfigError::GroupIdEmpty);
        }
        Ok(())
    }
}
