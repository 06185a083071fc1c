//! Configuration resolution and validation for the healer Kafka client.
//!
//! Callers describe a producer, consumer or broker connection with untyped,
//! dotted lowercase keys (`bootstrap.servers`, `session.timeout.ms`, ...).
//! This crate turns such a description into a fully populated, typed and
//! validated configuration before any connection is attempted:
//!
//! 1. [`defaults`] yields a fresh configuration for the [`Role`];
//! 2. the overrides are applied on top of it, mapping every external key to
//!    its field through [`normalize_key`];
//! 3. the result is checked against the rules of the role, and the first
//!    violated rule is returned as a [`ConfigError`].
//!
//! The [`ClientConfig`] builder runs the three steps at once:
//!
//! ```
//! use healer_config::{ClientConfig, ConsumerConfig};
//!
//! let config: ConsumerConfig = ClientConfig::new()
//!     .set("bootstrap.servers", "localhost:9092")
//!     .set("group.id", "g1")
//!     .create()
//!     .unwrap();
//! assert_eq!(config.fetch_min_bytes, 1);
//! ```
//!
//! Keys that match no field are dropped with a warning by default. Use
//! [`UnknownKeyPolicy::Strict`] to reject them instead.
//!
//! ## Logging
//!
//! Log messages are emitted through the [`log`] crate, or through
//! [`tracing`] when the `tracing` feature is enabled.
//!
//! [`log`]: https://docs.rs/log
//! [`tracing`]: https://docs.rs/tracing

mod log;

pub mod broker;
pub mod config;
pub mod consumer;
pub mod error;
pub mod fields;
pub mod key;
pub mod producer;
pub mod util;

pub use crate::broker::BrokerConfig;
pub use crate::config::{
    defaults, merge, validate, ClientConfig, Config, FromClientConfig, Role, UnknownKeyPolicy,
    Validate,
};
pub use crate::consumer::ConsumerConfig;
pub use crate::error::{ConfigError, ConfigErrorKind, ConfigResult};
pub use crate::key::normalize_key;
pub use crate::producer::{CompressionType, ProducerConfig};
