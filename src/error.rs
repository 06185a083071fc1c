//! Error manipulations.

use std::{error, fmt};

/// Configuration result.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Represents all possible configuration errors.
///
/// Validation stops at the first violated constraint, so a single call never
/// reports more than one of these.
#[derive(Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The `bootstrap.servers` connection target is empty.
    ConnectionTargetNotSet,
    /// The producer `message.max.count` is not strictly positive.
    InvalidMessageMaxCount(i32),
    /// The producer `flush.interval.ms` is not strictly positive.
    InvalidFlushInterval(i32),
    /// The producer compression codec is not one of none, gzip, snappy or lz4.
    UnknownCompressionType(String),
    /// The consumer `group.id` is empty.
    GroupIdEmpty,
    /// The overrides could not be encoded or decoded onto the typed config.
    Serialization(String),
    /// An override key matched no field while the strict policy was in effect.
    UnknownKey(String),
    /// A role name that is not producer, consumer or broker.
    UnknownRole(String),
}

/// The kind of a [`ConfigError`], without any payload.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ConfigErrorKind {
    ConnectionTargetNotSet,
    InvalidMessageMaxCount,
    InvalidFlushInterval,
    UnknownCompressionType,
    GroupIdEmpty,
    Serialization,
    UnknownKey,
    UnknownRole,
}

impl fmt::Debug for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ConfigError::ConnectionTargetNotSet => {
                write!(f, "ConfigError (Connection target not set)")
            }
            ConfigError::InvalidMessageMaxCount(count) => {
                write!(f, "ConfigError (Invalid message max count: {})", count)
            }
            ConfigError::InvalidFlushInterval(ms) => {
                write!(f, "ConfigError (Invalid flush interval: {})", ms)
            }
            ConfigError::UnknownCompressionType(ref codec) => {
                write!(f, "ConfigError (Unknown compression type: {})", codec)
            }
            ConfigError::GroupIdEmpty => write!(f, "ConfigError (Group id empty)"),
            ConfigError::Serialization(ref err) => {
                write!(f, "ConfigError (Serialization error: {})", err)
            }
            ConfigError::UnknownKey(ref key) => write!(f, "ConfigError (Unknown key: {})", key),
            ConfigError::UnknownRole(ref role) => {
                write!(f, "ConfigError (Unknown role: {})", role)
            }
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ConfigError::ConnectionTargetNotSet => write!(f, "bootstrap servers not set"),
            ConfigError::InvalidMessageMaxCount(count) => {
                write!(f, "message.max.count must be > 0, got {}", count)
            }
            ConfigError::InvalidFlushInterval(ms) => {
                write!(f, "flush.interval.ms must be > 0, got {}", ms)
            }
            ConfigError::UnknownCompressionType(ref codec) => {
                write!(f, "unknown compression type: {:?}", codec)
            }
            ConfigError::GroupIdEmpty => write!(f, "group.id is empty"),
            ConfigError::Serialization(ref err) => write!(f, "serialization error: {}", err),
            ConfigError::UnknownKey(ref key) => write!(f, "unknown config key: {:?}", key),
            ConfigError::UnknownRole(ref role) => write!(f, "unknown role: {:?}", role),
        }
    }
}

impl error::Error for ConfigError {}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> ConfigError {
        ConfigError::Serialization(err.to_string())
    }
}

impl ConfigError {
    /// Returns the kind of this error.
    pub fn kind(&self) -> ConfigErrorKind {
        match self {
            ConfigError::ConnectionTargetNotSet => ConfigErrorKind::ConnectionTargetNotSet,
            ConfigError::InvalidMessageMaxCount(_) => ConfigErrorKind::InvalidMessageMaxCount,
            ConfigError::InvalidFlushInterval(_) => ConfigErrorKind::InvalidFlushInterval,
            ConfigError::UnknownCompressionType(_) => ConfigErrorKind::UnknownCompressionType,
            ConfigError::GroupIdEmpty => ConfigErrorKind::GroupIdEmpty,
            ConfigError::Serialization(_) => ConfigErrorKind::Serialization,
            ConfigError::UnknownKey(_) => ConfigErrorKind::UnknownKey,
            ConfigError::UnknownRole(_) => ConfigErrorKind::UnknownRole,
        }
    }

    /// Returns whether the error comes from a semantic validation check, as
    /// opposed to a failure while reading the overrides.
    pub fn is_validation(&self) -> bool {
        !matches!(
            self.kind(),
            ConfigErrorKind::Serialization | ConfigErrorKind::UnknownKey | ConfigErrorKind::UnknownRole
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_and_display() {
        let err = ConfigError::UnknownCompressionType("zstd".to_owned());
        assert_eq!(err.kind(), ConfigErrorKind::UnknownCompressionType);
        assert_eq!(err.to_string(), "unknown compression type: \"zstd\"");
        assert_eq!(
            format!("{:?}", err),
            "ConfigError (Unknown compression type: zstd)"
        );
        assert!(err.is_validation());
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<i32>("\"x\"").unwrap_err();
        let err = ConfigError::from(json_err);
        assert_eq!(err.kind(), ConfigErrorKind::Serialization);
        assert!(!err.is_validation());
    }
}
