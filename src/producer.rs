//! Producer configuration.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::Serialize;

use crate::config::{Role, Validate};
use crate::error::{ConfigError, ConfigResult};
use crate::fields::config_fields;
use crate::util::millis_to_duration;

/// Compression codec applied to message batches.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum CompressionType {
    None,
    Gzip,
    Snappy,
    Lz4,
}

impl CompressionType {
    /// The name of the codec as used in the `compression.type` setting.
    pub fn as_str(&self) -> &'static str {
        match self {
            CompressionType::None => "none",
            CompressionType::Gzip => "gzip",
            CompressionType::Snappy => "snappy",
            CompressionType::Lz4 => "lz4",
        }
    }
}

impl fmt::Display for CompressionType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CompressionType {
    type Err = ConfigError;

    fn from_str(s: &str) -> ConfigResult<CompressionType> {
        match s {
            "none" => Ok(CompressionType::None),
            "gzip" => Ok(CompressionType::Gzip),
            "snappy" => Ok(CompressionType::Snappy),
            "lz4" => Ok(CompressionType::Lz4),
            _ => Err(ConfigError::UnknownCompressionType(s.to_owned())),
        }
    }
}

/// Configuration of a producer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ProducerConfig {
    #[serde(rename = "bootstrap.servers")]
    pub bootstrap_servers: String,
    #[serde(rename = "client.id")]
    pub client_id: String,
    /// Replica acknowledgments required per request: 0, 1 or -1 (all).
    pub acks: i16,
    /// One of `none`, `gzip`, `snappy` or `lz4`.
    #[serde(rename = "compression.type")]
    pub compression_type: String,
    /// Batch size threshold in bytes.
    #[serde(rename = "batch.size")]
    pub batch_size: i32,
    /// Batch size threshold in messages.
    #[serde(rename = "message.max.count")]
    pub message_max_count: i32,
    #[serde(rename = "flush.interval.ms")]
    pub flush_interval_ms: i32,
    #[serde(rename = "metadata.max.age.ms")]
    pub metadata_max_age_ms: i32,
    #[serde(rename = "fetch.topic.metadata.retries")]
    pub fetch_topic_metadata_retries: i32,
    #[serde(rename = "connections.max.idle.ms")]
    pub connections_max_idle_ms: i32,
    pub retries: i32,
    #[serde(rename = "request.timeout.ms")]
    pub request_timeout_ms: i32,
}

impl Default for ProducerConfig {
    fn default() -> ProducerConfig {
        ProducerConfig {
            bootstrap_servers: String::new(),
            client_id: "healer".to_owned(),
            acks: 1,
            compression_type: CompressionType::None.as_str().to_owned(),
            batch_size: 16384,
            message_max_count: 1024,
            flush_interval_ms: 200,
            metadata_max_age_ms: 300000,
            fetch_topic_metadata_retries: 3,
            connections_max_idle_ms: 540000,
            retries: 0,
            request_timeout_ms: 30000,
        }
    }
}

config_fields!(ProducerConfig, Role::Producer, {
    "bootstrap.servers" => bootstrap_servers,
    "client.id" => client_id,
    "acks" => acks,
    "compression.type" => compression_type,
    "batch.size" => batch_size,
    "message.max.count" => message_max_count,
    "flush.interval.ms" => flush_interval_ms,
    "metadata.max.age.ms" => metadata_max_age_ms,
    "fetch.topic.metadata.retries" => fetch_topic_metadata_retries,
    "connections.max.idle.ms" => connections_max_idle_ms,
    "retries" => retries,
    "request.timeout.ms" => request_timeout_ms,
});

impl ProducerConfig {
    /// Parses the configured compression codec.
    pub fn compression(&self) -> ConfigResult<CompressionType> {
        self.compression_type.parse()
    }

    pub fn flush_interval(&self) -> Duration {
        millis_to_duration(self.flush_interval_ms)
    }

    pub fn metadata_max_age(&self) -> Duration {
        millis_to_duration(self.metadata_max_age_ms)
    }

    pub fn connections_max_idle(&self) -> Duration {
        millis_to_duration(self.connections_max_idle_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        millis_to_duration(self.request_timeout_ms)
    }
}

impl Validate for ProducerConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.bootstrap_servers.is_empty() {
            return Err(ConfigError::ConnectionTargetNotSet);
        }
        if self.message_max_count <= 0 {
            return Err(ConfigError::InvalidMessageMaxCount(self.message_max_count));
        }
        if self.flush_interval_ms <= 0 {
            return Err(ConfigError::InvalidFlushInterval(self.flush_interval_ms));
        }
        self.compression()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> ProducerConfig {
        ProducerConfig {
            bootstrap_servers: "h:9092".to_owned(),
            ..ProducerConfig::default()
        }
    }

    #[test]
    fn test_defaults() {
        let config = ProducerConfig::default();
        assert_eq!(config.client_id, "healer");
        assert_eq!(config.acks, 1);
        assert_eq!(config.compression(), Ok(CompressionType::None));
        assert_eq!(config.batch_size, 16384);
        assert_eq!(config.message_max_count, 1024);
        assert_eq!(config.flush_interval(), Duration::from_millis(200));
        assert_eq!(config.metadata_max_age_ms, 300000);
        assert_eq!(config.fetch_topic_metadata_retries, 3);
        assert_eq!(config.connections_max_idle_ms, 540000);
        assert_eq!(config.retries, 0);
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_validation_order() {
        let config = ProducerConfig {
            bootstrap_servers: String::new(),
            message_max_count: 0,
            ..ProducerConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ConnectionTargetNotSet));

        let config = ProducerConfig {
            message_max_count: 0,
            flush_interval_ms: 0,
            ..valid()
        };
        assert_eq!(config.validate(), Err(ConfigError::InvalidMessageMaxCount(0)));

        let config = ProducerConfig {
            flush_interval_ms: -5,
            compression_type: "zstd".to_owned(),
            ..valid()
        };
        assert_eq!(config.validate(), Err(ConfigError::InvalidFlushInterval(-5)));
    }

    #[test]
    fn test_compression_codecs() {
        for codec in ["none", "gzip", "snappy", "lz4"] {
            let config = ProducerConfig {
                compression_type: codec.to_owned(),
                ..valid()
            };
            assert_eq!(config.validate(), Ok(()));
            assert_eq!(config.compression().unwrap().as_str(), codec);
        }
        let config = ProducerConfig {
            compression_type: "zstd".to_owned(),
            ..valid()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::UnknownCompressionType("zstd".to_owned()))
        );
    }
}
