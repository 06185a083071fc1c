//! Configuration to create a consumer, producer or broker connection.
//!
//! ## Usage
//!
//! Callers describe a client with untyped, dotted lowercase keys, the same way
//! Kafka clients are usually configured:
//!
//! ```
//! use healer_config::config::ClientConfig;
//! use healer_config::consumer::ConsumerConfig;
//!
//! let consumer: ConsumerConfig = ClientConfig::new()
//!     .set("bootstrap.servers", "localhost:9092")
//!     .set("group.id", "my-group")
//!     .set("session.timeout.ms", 20000)
//!     .create()
//!     .expect("invalid consumer config");
//! assert_eq!(consumer.session_timeout_ms, 20000);
//! ```
//!
//! Resolution always runs in the same order: the role defaults are produced,
//! the overrides are applied on top of them and the result is validated. Any
//! error is fatal to client startup; no partially resolved configuration is
//! ever returned.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::broker::BrokerConfig;
use crate::consumer::ConsumerConfig;
use crate::error::{ConfigError, ConfigResult};
use crate::fields::{apply_overrides, ConfigFields};
use crate::log::{debug, log_enabled, DEBUG};
use crate::producer::ProducerConfig;

/// The role of a client. Selects the defaults and the validation rules.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    /// Message producer.
    Producer,
    /// Group consumer.
    Consumer,
    /// Connection to a single broker.
    Broker,
}

impl Role {
    /// All roles.
    pub const ALL: [Role; 3] = [Role::Producer, Role::Consumer, Role::Broker];

    /// The lowercase name of the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Producer => "producer",
            Role::Consumer => "consumer",
            Role::Broker => "broker",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ConfigError;

    fn from_str(s: &str) -> ConfigResult<Role> {
        match s {
            "producer" => Ok(Role::Producer),
            "consumer" => Ok(Role::Consumer),
            "broker" => Ok(Role::Broker),
            _ => Err(ConfigError::UnknownRole(s.to_owned())),
        }
    }
}

/// What to do with override keys that match no field of the target config.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum UnknownKeyPolicy {
    /// Drop the key and log a warning.
    #[default]
    Permissive,
    /// Fail with [`ConfigError::UnknownKey`].
    Strict,
}

/// A typed configuration of any role.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Config {
    Producer(ProducerConfig),
    Consumer(ConsumerConfig),
    Broker(BrokerConfig),
}

impl Config {
    /// Returns the role of the configuration.
    pub fn role(&self) -> Role {
        match self {
            Config::Producer(_) => Role::Producer,
            Config::Consumer(_) => Role::Consumer,
            Config::Broker(_) => Role::Broker,
        }
    }

    /// Returns a copy of the configuration with `overrides` applied.
    pub fn merge(
        &self,
        overrides: &Map<String, Value>,
        policy: UnknownKeyPolicy,
    ) -> ConfigResult<Config> {
        match self {
            Config::Producer(c) => merge_typed(c, overrides, policy).map(Config::Producer),
            Config::Consumer(c) => merge_typed(c, overrides, policy).map(Config::Consumer),
            Config::Broker(c) => merge_typed(c, overrides, policy).map(Config::Broker),
        }
    }

    /// Checks the semantic constraints of the role, returning the first
    /// violation.
    pub fn validate(&self) -> ConfigResult<()> {
        let res = match self {
            Config::Producer(c) => c.validate(),
            Config::Consumer(c) => c.validate(),
            Config::Broker(c) => c.validate(),
        };
        if let Err(ref e) = res {
            debug!("Invalid {} config: {}", self.role(), e);
        }
        res
    }

    /// Returns the producer configuration, if this is one.
    pub fn as_producer(&self) -> Option<&ProducerConfig> {
        match self {
            Config::Producer(c) => Some(c),
            _ => None,
        }
    }

    /// Returns the consumer configuration, if this is one.
    pub fn as_consumer(&self) -> Option<&ConsumerConfig> {
        match self {
            Config::Consumer(c) => Some(c),
            _ => None,
        }
    }

    /// Returns the broker configuration, if this is one.
    pub fn as_broker(&self) -> Option<&BrokerConfig> {
        match self {
            Config::Broker(c) => Some(c),
            _ => None,
        }
    }

    pub fn into_producer(self) -> Option<ProducerConfig> {
        match self {
            Config::Producer(c) => Some(c),
            _ => None,
        }
    }

    pub fn into_consumer(self) -> Option<ConsumerConfig> {
        match self {
            Config::Consumer(c) => Some(c),
            _ => None,
        }
    }

    pub fn into_broker(self) -> Option<BrokerConfig> {
        match self {
            Config::Broker(c) => Some(c),
            _ => None,
        }
    }
}

impl From<ProducerConfig> for Config {
    fn from(c: ProducerConfig) -> Config {
        Config::Producer(c)
    }
}

impl From<ConsumerConfig> for Config {
    fn from(c: ConsumerConfig) -> Config {
        Config::Consumer(c)
    }
}

impl From<BrokerConfig> for Config {
    fn from(c: BrokerConfig) -> Config {
        Config::Broker(c)
    }
}

/// Semantic validation of a typed configuration.
pub trait Validate {
    /// Returns the first violated constraint, if any.
    fn validate(&self) -> ConfigResult<()>;
}

/// Returns a freshly built configuration holding the defaults of `role`.
///
/// Every call returns an independent value.
pub fn defaults(role: Role) -> Config {
    match role {
        Role::Producer => Config::Producer(ProducerConfig::default()),
        Role::Consumer => Config::Consumer(ConsumerConfig::default()),
        Role::Broker => Config::Broker(BrokerConfig::default()),
    }
}

/// Overlays `overrides` on a copy of `base`.
pub fn merge(
    base: &Config,
    overrides: &Map<String, Value>,
    policy: UnknownKeyPolicy,
) -> ConfigResult<Config> {
    base.merge(overrides, policy)
}

/// Validates `config` against the rules of its role.
pub fn validate(config: &Config) -> ConfigResult<()> {
    config.validate()
}

/// Applies `overrides` to a copy of `base`. Every merge path goes through here.
fn merge_typed<C: ConfigFields + Clone>(
    base: &C,
    overrides: &Map<String, Value>,
    policy: UnknownKeyPolicy,
) -> ConfigResult<C> {
    if log_enabled!(DEBUG) {
        debug!(
            "Merging {} overrides: {}",
            C::ROLE,
            Value::Object(overrides.clone())
        );
    }
    let mut merged = base.clone();
    apply_overrides(&mut merged, overrides, policy)?;
    Ok(merged)
}

/// Client configuration: untyped overrides plus the policy used to apply them.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ClientConfig {
    conf_map: Map<String, Value>,
    unknown_key_policy: UnknownKeyPolicy,
}

impl ClientConfig {
    /// Creates a new empty configuration.
    pub fn new() -> ClientConfig {
        ClientConfig::default()
    }

    /// Builds a configuration from any value that serializes to a JSON
    /// object, such as a `HashMap<String, _>` or a struct.
    ///
    /// Fails with [`ConfigError::Serialization`] if the value cannot be
    /// serialized or is not a key/value object.
    pub fn from_overrides<S: Serialize + ?Sized>(overrides: &S) -> ConfigResult<ClientConfig> {
        match serde_json::to_value(overrides)? {
            Value::Object(conf_map) => Ok(ClientConfig {
                conf_map,
                unknown_key_policy: UnknownKeyPolicy::default(),
            }),
            other => Err(ConfigError::Serialization(format!(
                "overrides must be a key/value object, got {}",
                other
            ))),
        }
    }

    /// Gets the value of a parameter in the configuration.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.conf_map.get(key)
    }

    /// Sets a parameter in the configuration.
    ///
    /// If there is an existing value for `key` in the configuration, it is
    /// overridden with the new `value`.
    pub fn set<K, V>(&mut self, key: K, value: V) -> &mut ClientConfig
    where
        K: Into<String>,
        V: Into<Value>,
    {
        self.conf_map.insert(key.into(), value.into());
        self
    }

    /// Removes a parameter from the configuration.
    pub fn remove(&mut self, key: &str) -> &mut ClientConfig {
        self.conf_map.remove(key);
        self
    }

    /// Sets the policy for keys that match no field of the target config.
    pub fn set_unknown_key_policy(&mut self, policy: UnknownKeyPolicy) -> &mut ClientConfig {
        self.unknown_key_policy = policy;
        self
    }

    /// Returns the policy for keys that match no field of the target config.
    pub fn unknown_key_policy(&self) -> UnknownKeyPolicy {
        self.unknown_key_policy
    }

    /// Returns the untyped overrides.
    pub fn overrides(&self) -> &Map<String, Value> {
        &self.conf_map
    }

    /// Resolves and validates the configuration of the given role.
    pub fn create_for(&self, role: Role) -> ConfigResult<Config> {
        let config = defaults(role).merge(&self.conf_map, self.unknown_key_policy)?;
        config.validate()?;
        Ok(config)
    }

    /// Uses the current configuration to create a new typed configuration.
    pub fn create<T: FromClientConfig>(&self) -> ConfigResult<T> {
        T::from_config(self)
    }
}

impl<K, V> FromIterator<(K, V)> for ClientConfig
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I>(iter: I) -> ClientConfig
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let mut config = ClientConfig::new();
        config.extend(iter);
        config
    }
}

impl<K, V> Extend<(K, V)> for ClientConfig
where
    K: Into<String>,
    V: Into<Value>,
{
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = (K, V)>,
    {
        for (k, v) in iter {
            self.set(k, v);
        }
    }
}

/// Create a new typed configuration based on the provided client
/// configuration.
pub trait FromClientConfig: Sized {
    /// Resolves and validates a typed configuration from `config`.
    fn from_config(config: &ClientConfig) -> ConfigResult<Self>;
}

impl<C> FromClientConfig for C
where
    C: ConfigFields + Validate + Default + Clone,
{
    fn from_config(config: &ClientConfig) -> ConfigResult<C> {
        let typed = merge_typed(&C::default(), &config.conf_map, config.unknown_key_policy)?;
        if let Err(e) = typed.validate() {
            debug!("Invalid {} config: {}", C::ROLE, e);
            return Err(e);
        }
        Ok(typed)
    }
}
