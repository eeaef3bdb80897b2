//! Configuration for the ACR router.
//!
//! ```yaml
//! modules:
//!   acr_router:
//!     config:
//!       contexts:
//!         10:
//!           identifier: "urn:loa:1"
//!           source: "password"
//!         20:
//!           identifier: "urn:loa:2"
//!           source: "mfa"
//!         default: "password"
//! ```
//!
//! This module only describes the raw shape. Completeness checks happen in
//! [`ContextTable::from_config`](crate::domain::ContextTable::from_config).

use std::fmt;

use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::Deserialize;

/// Configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AcrRouterConfig {
    /// Assurance contexts keyed by priority, plus the mandatory `default` entry.
    pub contexts: Option<ContextsConfig>,
}

/// Key of one `contexts` entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ContextKey {
    /// The literal `default` key.
    Default,
    /// A priority ordinal (`10`, `"20"`, ...).
    Priority(i64),
    /// Anything else. Rejected when the table is built.
    Invalid(String),
}

impl fmt::Display for ContextKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => f.write_str("default"),
            Self::Priority(priority) => write!(f, "{priority}"),
            Self::Invalid(raw) => f.write_str(raw),
        }
    }
}

impl<'de> Deserialize<'de> for ContextKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ContextKeyVisitor;

        impl Visitor<'_> for ContextKeyVisitor {
            type Value = ContextKey;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a priority number or `default`")
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
                Ok(ContextKey::Priority(v))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
                Ok(i64::try_from(v).map_or_else(
                    |_| ContextKey::Invalid(v.to_string()),
                    ContextKey::Priority,
                ))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                if v == "default" {
                    return Ok(ContextKey::Default);
                }
                Ok(v.parse::<i64>()
                    .map_or_else(|_| ContextKey::Invalid(v.to_owned()), ContextKey::Priority))
            }
        }

        deserializer.deserialize_any(ContextKeyVisitor)
    }
}

/// Value of one `contexts` entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RawContextValue {
    /// Bare source name. Only meaningful for the `default` key.
    BareSource(String),
    /// `{ identifier, source }` record; either field may be missing here.
    Entry(RawContextEntry),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawContextEntry {
    #[serde(default)]
    pub identifier: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
}

/// The `contexts` mapping, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContextsConfig(pub Vec<(ContextKey, RawContextValue)>);

impl ContextsConfig {
    pub fn iter(&self) -> impl Iterator<Item = &(ContextKey, RawContextValue)> {
        self.0.iter()
    }
}

impl<'de> Deserialize<'de> for ContextsConfig {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ContextsVisitor;

        impl<'de> Visitor<'de> for ContextsVisitor {
            type Value = ContextsConfig;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a mapping of priority keys to assurance contexts")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(entry) = map.next_entry::<ContextKey, RawContextValue>()? {
                    entries.push(entry);
                }
                Ok(ContextsConfig(entries))
            }
        }

        deserializer.deserialize_map(ContextsVisitor)
    }
}
