//! Validated context table.

use std::collections::{HashMap, HashSet};

use crate::config::{AcrRouterConfig, ContextKey, ContextsConfig, RawContextValue};

use super::error::ConfigError;

/// One configured assurance level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextEntry {
    class_ref: String,
    source: String,
    priority: i64,
}

impl ContextEntry {
    #[must_use]
    pub fn class_ref(&self) -> &str {
        &self.class_ref
    }

    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Configured priority. Informational only; selection ignores it.
    #[must_use]
    pub fn priority(&self) -> i64 {
        self.priority
    }
}

/// Normalized `default` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefaultEntry {
    BareSource(String),
    Full { class_ref: String, source: String },
}

impl DefaultEntry {
    #[must_use]
    pub fn source(&self) -> &str {
        match self {
            Self::BareSource(source) | Self::Full { source, .. } => source,
        }
    }

    #[must_use]
    pub fn class_ref(&self) -> Option<&str> {
        match self {
            Self::BareSource(_) => None,
            Self::Full { class_ref, .. } => Some(class_ref),
        }
    }
}

/// Immutable mapping from class refs to sources, plus the default source.
///
/// Entries keep their declaration order. Identifiers are unique.
#[derive(Debug, Clone)]
pub struct ContextTable {
    entries: Vec<ContextEntry>,
    by_class_ref: HashMap<String, usize>,
    default: DefaultEntry,
}

impl ContextTable {
    /// Build the table from module configuration.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::MissingContexts`] if there is no `contexts` mapping
    /// - any error reported by [`ContextTable::build`]
    pub fn from_config(cfg: &AcrRouterConfig) -> Result<Self, ConfigError> {
        let contexts = cfg.contexts.as_ref().ok_or(ConfigError::MissingContexts)?;
        Self::build(contexts)
    }

    /// Validate a raw `contexts` mapping.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::MissingDefault`] if there is no `default` key
    /// - [`ConfigError::MissingIdentifierKey`] / [`ConfigError::MissingSourceKey`]
    ///   for incomplete entries
    /// - [`ConfigError::InvalidContextKey`] for keys that are neither a number nor `default`
    /// - [`ConfigError::DuplicateKey`] / [`ConfigError::DuplicateIdentifier`]
    pub fn build(contexts: &ContextsConfig) -> Result<Self, ConfigError> {
        let (_, raw_default) = contexts
            .iter()
            .find(|(key, _)| *key == ContextKey::Default)
            .ok_or(ConfigError::MissingDefault)?;
        let default = normalize_default(raw_default)?;

        let mut seen_keys = HashSet::new();
        let mut entries: Vec<ContextEntry> = Vec::new();
        let mut by_class_ref = HashMap::new();

        for (key, value) in contexts.iter() {
            if !seen_keys.insert(key) {
                return Err(ConfigError::DuplicateKey {
                    key: key.to_string(),
                });
            }

            let priority = match key {
                ContextKey::Default => continue,
                ContextKey::Invalid(raw) => {
                    return Err(ConfigError::InvalidContextKey { key: raw.clone() });
                }
                ContextKey::Priority(priority) => *priority,
            };

            let entry = normalize_entry(priority, value)?;
            if let Some(&existing) = by_class_ref.get(entry.class_ref()) {
                let first: &ContextEntry = &entries[existing];
                return Err(ConfigError::DuplicateIdentifier {
                    class_ref: entry.class_ref,
                    first: first.priority,
                    second: priority,
                });
            }

            by_class_ref.insert(entry.class_ref.clone(), entries.len());
            entries.push(entry);
        }

        Ok(Self {
            entries,
            by_class_ref,
            default,
        })
    }

    /// Entry bound to `class_ref`, compared by exact string equality.
    #[must_use]
    pub fn find(&self, class_ref: &str) -> Option<&ContextEntry> {
        self.by_class_ref.get(class_ref).map(|&i| &self.entries[i])
    }

    /// Non-default entries in declaration order.
    #[must_use]
    pub fn entries(&self) -> &[ContextEntry] {
        &self.entries
    }

    #[must_use]
    pub fn default_entry(&self) -> &DefaultEntry {
        &self.default
    }

    #[must_use]
    pub fn default_source(&self) -> &str {
        self.default.source()
    }

    #[must_use]
    pub fn default_class_ref(&self) -> Option<&str> {
        self.default.class_ref()
    }

    /// Distinct source names referenced by the table, default first.
    #[must_use]
    pub fn sources(&self) -> Vec<&str> {
        let mut sources = vec![self.default_source()];
        for entry in &self.entries {
            if !sources.contains(&entry.source()) {
                sources.push(entry.source());
            }
        }
        sources
    }

    /// Number of non-default entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn non_empty(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|s| !s.is_empty())
}

fn normalize_entry(priority: i64, value: &RawContextValue) -> Result<ContextEntry, ConfigError> {
    let RawContextValue::Entry(raw) = value else {
        return Err(ConfigError::MissingIdentifierKey {
            key: priority.to_string(),
        });
    };

    let class_ref =
        non_empty(raw.identifier.as_ref()).ok_or_else(|| ConfigError::MissingIdentifierKey {
            key: priority.to_string(),
        })?;
    let source = non_empty(raw.source.as_ref()).ok_or_else(|| ConfigError::MissingSourceKey {
        key: priority.to_string(),
    })?;

    Ok(ContextEntry {
        class_ref: class_ref.to_owned(),
        source: source.to_owned(),
        priority,
    })
}

fn normalize_default(value: &RawContextValue) -> Result<DefaultEntry, ConfigError> {
    let missing_source = || ConfigError::MissingSourceKey {
        key: ContextKey::Default.to_string(),
    };

    match value {
        RawContextValue::BareSource(source) => non_empty(Some(source))
            .map(|s| DefaultEntry::BareSource(s.to_owned()))
            .ok_or_else(missing_source),
        RawContextValue::Entry(raw) => {
            let source = non_empty(raw.source.as_ref()).ok_or_else(missing_source)?;
            Ok(match non_empty(raw.identifier.as_ref()) {
                Some(class_ref) => DefaultEntry::Full {
                    class_ref: class_ref.to_owned(),
                    source: source.to_owned(),
                },
                None => DefaultEntry::BareSource(source.to_owned()),
            })
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use serde_json::{Value, json};

    use super::*;
    use crate::config::RawContextEntry;

    fn build(contexts: Value) -> Result<ContextTable, ConfigError> {
        let contexts: ContextsConfig = serde_json::from_value(contexts).unwrap();
        ContextTable::build(&contexts)
    }

    #[test]
    fn valid_table_keeps_declaration_order() {
        let table = build(json!({
            "20": { "identifier": "urn:loa:2", "source": "mfa" },
            "10": { "identifier": "urn:loa:1", "source": "password" },
            "default": "password",
        }))
        .unwrap();

        let class_refs: Vec<&str> = table.entries().iter().map(ContextEntry::class_ref).collect();
        assert_eq!(class_refs, vec!["urn:loa:2", "urn:loa:1"]);
        assert_eq!(table.entries()[0].priority(), 20);
        assert_eq!(table.default_source(), "password");
        assert_eq!(table.default_class_ref(), None);
        assert_eq!(table.sources(), vec!["password", "mfa"]);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn missing_source_names_the_key() {
        let err = build(json!({
            "10": { "identifier": "urn:loa:1" },
            "default": "password",
        }))
        .unwrap_err();

        assert_eq!(
            err,
            ConfigError::MissingSourceKey {
                key: "10".to_owned()
            }
        );
        assert!(err.to_string().contains("'10'"));
    }

    #[test]
    fn missing_identifier_names_the_key() {
        let err = build(json!({
            "10": { "source": "password" },
            "default": "password",
        }))
        .unwrap_err();

        assert_eq!(
            err,
            ConfigError::MissingIdentifierKey {
                key: "10".to_owned()
            }
        );
    }

    #[test]
    fn empty_strings_count_as_missing() {
        assert_eq!(
            build(json!({
                "10": { "identifier": "", "source": "password" },
                "default": "password",
            }))
            .unwrap_err(),
            ConfigError::MissingIdentifierKey {
                key: "10".to_owned()
            }
        );
        assert_eq!(
            build(json!({ "default": "" })).unwrap_err(),
            ConfigError::MissingSourceKey {
                key: "default".to_owned()
            }
        );
    }

    #[test]
    fn bare_string_outside_default_lacks_identifier() {
        let err = build(json!({ "10": "password", "default": "password" })).unwrap_err();
        assert_eq!(
            err,
            ConfigError::MissingIdentifierKey {
                key: "10".to_owned()
            }
        );
    }

    #[test]
    fn missing_default_is_reported_before_entry_errors() {
        let err = build(json!({ "10": { "identifier": "urn:loa:1" } })).unwrap_err();
        assert_eq!(err, ConfigError::MissingDefault);
    }

    #[test]
    fn missing_contexts_mapping() {
        let err = ContextTable::from_config(&AcrRouterConfig::default()).unwrap_err();
        assert_eq!(err, ConfigError::MissingContexts);
    }

    #[test]
    fn default_record_and_bare_string_resolve_to_same_source() {
        let bare = build(json!({ "default": "password" })).unwrap();
        let full = build(json!({
            "default": { "identifier": "urn:loa:0", "source": "password" }
        }))
        .unwrap();

        assert_eq!(bare.default_source(), full.default_source());
        assert_eq!(
            bare.default_entry(),
            &DefaultEntry::BareSource("password".to_owned())
        );
        assert_eq!(
            full.default_entry(),
            &DefaultEntry::Full {
                class_ref: "urn:loa:0".to_owned(),
                source: "password".to_owned(),
            }
        );
        assert_eq!(full.default_class_ref(), Some("urn:loa:0"));
        assert!(bare.is_empty());
    }

    #[test]
    fn default_record_with_empty_identifier_is_bare() {
        let table = build(json!({
            "default": { "identifier": "", "source": "password" }
        }))
        .unwrap();

        assert_eq!(
            table.default_entry(),
            &DefaultEntry::BareSource("password".to_owned())
        );
        assert_eq!(table.default_class_ref(), None);
    }

    #[test]
    fn default_record_without_source_is_rejected() {
        let err = build(json!({ "default": { "identifier": "urn:loa:0" } })).unwrap_err();
        assert_eq!(
            err,
            ConfigError::MissingSourceKey {
                key: "default".to_owned()
            }
        );
    }

    #[test]
    fn duplicate_identifiers_are_rejected() {
        let err = build(json!({
            "10": { "identifier": "urn:loa:1", "source": "password" },
            "20": { "identifier": "urn:loa:1", "source": "mfa" },
            "default": "password",
        }))
        .unwrap_err();

        assert_eq!(
            err,
            ConfigError::DuplicateIdentifier {
                class_ref: "urn:loa:1".to_owned(),
                first: 10,
                second: 20,
            }
        );
    }

    #[test]
    fn non_numeric_keys_are_rejected() {
        let err = build(json!({
            "high": { "identifier": "urn:loa:3", "source": "hw" },
            "default": "password",
        }))
        .unwrap_err();

        assert_eq!(
            err,
            ConfigError::InvalidContextKey {
                key: "high".to_owned()
            }
        );
    }

    #[test]
    fn same_priority_spelled_twice_is_a_duplicate_key() {
        let entry = |class_ref: &str| {
            RawContextValue::Entry(RawContextEntry {
                identifier: Some(class_ref.to_owned()),
                source: Some("password".to_owned()),
            })
        };
        let contexts = ContextsConfig(vec![
            (ContextKey::Priority(10), entry("urn:loa:1")),
            (ContextKey::Priority(10), entry("urn:loa:2")),
            (
                ContextKey::Default,
                RawContextValue::BareSource("password".to_owned()),
            ),
        ]);

        assert_eq!(
            ContextTable::build(&contexts).unwrap_err(),
            ConfigError::DuplicateKey {
                key: "10".to_owned()
            }
        );
    }

    #[test]
    fn find_uses_exact_equality() {
        let table = build(json!({
            "10": { "identifier": "urn:loa:1", "source": "password" },
            "default": "password",
        }))
        .unwrap();

        assert!(table.find("urn:loa:1").is_some());
        assert!(table.find("URN:LOA:1").is_none());
        assert!(table.find("urn:loa").is_none());
    }
}
