//! Static correspondence between external keys and typed config fields.
//!
//! Each typed configuration declares its table once with [`config_fields!`].
//! The table is indexed lazily by [`normalize_key`], and overrides are applied
//! by normalizing each incoming key and looking it up in that index.

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::config::{Role, UnknownKeyPolicy};
use crate::error::{ConfigError, ConfigResult};
use crate::key::normalize_key;
use crate::log::{trace, warn};

type Setter<C> = fn(&mut C, &Value) -> ConfigResult<()>;

/// A single settable field of a typed configuration.
pub struct Field<C> {
    key: &'static str,
    set: Setter<C>,
}

impl<C> Field<C> {
    #[doc(hidden)]
    pub const fn new(key: &'static str, set: Setter<C>) -> Field<C> {
        Field { key, set }
    }

    /// The external key of the field, e.g. `session.timeout.ms`.
    pub fn key(&self) -> &'static str {
        self.key
    }

    /// The internal identifier of the field, e.g. `SessionTimeoutMS`.
    pub fn ident(&self) -> String {
        normalize_key(self.key)
    }

    /// Decodes `value` and stores it in the field.
    pub fn apply(&self, config: &mut C, value: &Value) -> ConfigResult<()> {
        (self.set)(config, value)
    }
}

/// A typed configuration that can be overridden from external keys.
pub trait ConfigFields: Sized + 'static {
    /// The role this configuration belongs to.
    const ROLE: Role;

    /// All the fields that accept overrides.
    fn fields() -> &'static [Field<Self>];

    /// The fields indexed by internal identifier.
    fn field_index() -> &'static HashMap<String, usize>;

    /// Looks up the field an external key refers to.
    ///
    /// Only the canonical dotted key matches. Other spellings that normalize
    /// to the same identifier, such as `FetchMinBytes` or `fetch.Min.bytes`,
    /// are unknown keys.
    fn field(key: &str) -> Option<&'static Field<Self>> {
        Self::field_index()
            .get(&normalize_key(key))
            .map(|&idx| &Self::fields()[idx])
            .filter(|field| field.key() == key)
    }
}

/// Decodes a JSON value into the type of the field named by `key`.
pub fn decode<T: DeserializeOwned>(key: &str, value: &Value) -> ConfigResult<T> {
    T::deserialize(value).map_err(|e| ConfigError::Serialization(format!("{}: {}", key, e)))
}

#[doc(hidden)]
pub fn build_index<C>(fields: &[Field<C>]) -> HashMap<String, usize> {
    fields
        .iter()
        .enumerate()
        .map(|(idx, field)| (field.ident(), idx))
        .collect()
}

/// Overlays `overrides` on `config` in place.
///
/// Keys that match no field are dropped with a warning under
/// [`UnknownKeyPolicy::Permissive`] and rejected under
/// [`UnknownKeyPolicy::Strict`]. The first failing key aborts the merge.
pub fn apply_overrides<C: ConfigFields>(
    config: &mut C,
    overrides: &Map<String, Value>,
    policy: UnknownKeyPolicy,
) -> ConfigResult<()> {
    for (key, value) in overrides {
        match C::field(key) {
            Some(field) => {
                trace!("Setting {} {} = {}", C::ROLE, key, value);
                field.apply(config, value)?;
            }
            None => match policy {
                UnknownKeyPolicy::Strict => return Err(ConfigError::UnknownKey(key.clone())),
                UnknownKeyPolicy::Permissive => {
                    warn!("Ignoring unknown {} config key: {}", C::ROLE, key)
                }
            },
        }
    }
    Ok(())
}

/// Declares the override table of a typed configuration.
///
/// ```ignore
/// config_fields!(ConsumerConfig, Role::Consumer, {
///     "group.id" => group_id,
///     "session.timeout.ms" => session_timeout_ms,
/// });
/// ```
macro_rules! config_fields {
    ($config:ty, $role:expr, { $($key:literal => $field:ident),* $(,)? }) => {
        impl $crate::fields::ConfigFields for $config {
            const ROLE: $crate::config::Role = $role;

            fn fields() -> &'static [$crate::fields::Field<Self>] {
                static FIELDS: &[$crate::fields::Field<$config>] = &[
                    $(
                        $crate::fields::Field::new(
                            $key,
                            |config: &mut $config, value: &::serde_json::Value| {
                                config.$field = $crate::fields::decode($key, value)?;
                                Ok(())
                            },
                        ),
                    )*
                ];
                FIELDS
            }

            fn field_index() -> &'static ::std::collections::HashMap<String, usize> {
                static INDEX: ::std::sync::OnceLock<::std::collections::HashMap<String, usize>> =
                    ::std::sync::OnceLock::new();
                INDEX.get_or_init(|| $crate::fields::build_index(Self::fields()))
            }
        }
    };
}

pub(crate) use config_fields;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    use crate::broker::BrokerConfig;
    use crate::consumer::ConsumerConfig;
    use crate::producer::ProducerConfig;

    fn assert_table_matches_serialized_keys<C: ConfigFields + Default + serde::Serialize>() {
        let serialized = serde_json::to_value(C::default()).unwrap();
        let mut serialized_keys: Vec<_> =
            serialized.as_object().unwrap().keys().cloned().collect();
        let mut table_keys: Vec<_> = C::fields().iter().map(|f| f.key().to_owned()).collect();
        serialized_keys.sort();
        table_keys.sort();
        assert_eq!(serialized_keys, table_keys);
    }

    #[test]
    fn test_tables_cover_every_field() {
        assert_table_matches_serialized_keys::<ProducerConfig>();
        assert_table_matches_serialized_keys::<ConsumerConfig>();
        assert_table_matches_serialized_keys::<BrokerConfig>();
    }

    #[test]
    fn test_identifiers_are_unique() {
        assert_eq!(
            ProducerConfig::field_index().len(),
            ProducerConfig::fields().len()
        );
        assert_eq!(
            ConsumerConfig::field_index().len(),
            ConsumerConfig::fields().len()
        );
        assert_eq!(BrokerConfig::field_index().len(), BrokerConfig::fields().len());
    }

    #[test]
    fn test_field_lookup_goes_through_normalizer() {
        let field = ConsumerConfig::field("session.timeout.ms").unwrap();
        assert_eq!(field.key(), "session.timeout.ms");
        assert_eq!(field.ident(), "SessionTimeoutMS");
        assert!(ConsumerConfig::field("session.timeout").is_none());
    }

    #[test]
    fn test_field_lookup_rejects_other_spellings() {
        for key in [
            "FetchMinBytes",
            "fetch.Min.bytes",
            "Fetch.min.bytes",
            "fetchMin.bytes",
        ] {
            assert!(ConsumerConfig::field(key).is_none(), "{} matched", key);
        }
        assert!(ConsumerConfig::field("sessionTimeout.MS").is_none());
        assert!(ProducerConfig::field("ClientID").is_none());
        assert!(BrokerConfig::field("TimeoutMS").is_none());
    }

    #[test]
    fn test_strict_rejects_other_spellings() {
        for key in ["FetchMinBytes", "fetch.Min.bytes", "sessionTimeout.MS"] {
            let mut overrides = Map::new();
            overrides.insert(key.to_owned(), json!(7));
            let mut config = ConsumerConfig::default();
            assert_eq!(
                apply_overrides(&mut config, &overrides, UnknownKeyPolicy::Strict),
                Err(ConfigError::UnknownKey(key.to_owned()))
            );
            assert_eq!(config, ConsumerConfig::default());
        }
    }

    #[test]
    fn test_permissive_drops_other_spellings() {
        let overrides = json!({
            "session.timeout.ms": 1,
            "Session.timeout.ms": 2,
            "FetchMinBytes": 7,
        });
        let mut config = ConsumerConfig::default();
        apply_overrides(
            &mut config,
            overrides.as_object().unwrap(),
            UnknownKeyPolicy::Permissive,
        )
        .unwrap();
        assert_eq!(config.session_timeout_ms, 1);
        assert_eq!(config.fetch_min_bytes, 1);
    }

    #[test]
    fn test_apply_overrides_type_mismatch() {
        let mut config = ConsumerConfig::default();
        let overrides = json!({"fetch.min.bytes": "lots"});
        let err = apply_overrides(
            &mut config,
            overrides.as_object().unwrap(),
            UnknownKeyPolicy::Permissive,
        )
        .unwrap_err();
        match err {
            ConfigError::Serialization(msg) => assert!(msg.starts_with("fetch.min.bytes: ")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_apply_overrides_policy() {
        let overrides = json!({"group.id": "g", "no.such.key": 1});
        let overrides = overrides.as_object().unwrap();

        let mut config = ConsumerConfig::default();
        apply_overrides(&mut config, overrides, UnknownKeyPolicy::Permissive).unwrap();
        assert_eq!(config.group_id, "g");

        let mut config = ConsumerConfig::default();
        assert_eq!(
            apply_overrides(&mut config, overrides, UnknownKeyPolicy::Strict),
            Err(ConfigError::UnknownKey("no.such.key".to_owned()))
        );
    }
}
