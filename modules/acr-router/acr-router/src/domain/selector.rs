//! Source selection from a requested assurance context.

use acr_router_sdk::{ComparisonMode, RequestedAuthnContext};

use super::error::SelectionError;
use super::table::ContextTable;

/// Source picked for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionResult {
    /// Source that must perform the authentication.
    pub source: String,
    /// Class ref that drove the decision. `None` on the default path.
    pub class_ref: Option<String>,
}

/// Strategy deciding which source handles a request.
pub trait SourceSelector: Send + Sync {
    /// Pick a source from `table` for `requested`.
    ///
    /// # Errors
    ///
    /// Returns a [`SelectionError`] when no source can be picked.
    fn select(
        &self,
        table: &ContextTable,
        requested: &RequestedAuthnContext,
    ) -> Result<SelectionResult, SelectionError>;
}

/// Selects by exact class ref match, honoring the requester's order.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestedContextSelector;

impl SourceSelector for RequestedContextSelector {
    fn select(
        &self,
        table: &ContextTable,
        requested: &RequestedAuthnContext,
    ) -> Result<SelectionResult, SelectionError> {
        select(table, requested)
    }
}

/// Pick the source for `requested`.
///
/// Without requested class refs the default source is returned and the
/// comparison token is not looked at. An unset comparison means `exact`.
///
/// # Errors
///
/// - [`SelectionError::InvalidComparisonMode`] for an unrecognized token
/// - [`SelectionError::UnsupportedComparisonMode`] for `minimum`, `maximum`, `better`
/// - [`SelectionError::NoAcceptableContext`] when no requested class ref is configured
pub fn select(
    table: &ContextTable,
    requested: &RequestedAuthnContext,
) -> Result<SelectionResult, SelectionError> {
    let class_refs = requested.class_refs();
    if class_refs.is_empty() {
        return Ok(SelectionResult {
            source: table.default_source().to_owned(),
            class_ref: None,
        });
    }

    let mode = match requested.comparison.as_deref() {
        None => ComparisonMode::Exact,
        Some(raw) => raw
            .parse::<ComparisonMode>()
            .map_err(|_| SelectionError::InvalidComparisonMode {
                mode: raw.to_owned(),
            })?,
    };

    match mode {
        ComparisonMode::Exact => select_exact(table, class_refs),
        ComparisonMode::Minimum | ComparisonMode::Maximum | ComparisonMode::Better => {
            Err(SelectionError::UnsupportedComparisonMode { mode })
        }
    }
}

// First requested class ref present in the table wins; table priority is irrelevant.
fn select_exact(
    table: &ContextTable,
    class_refs: &[String],
) -> Result<SelectionResult, SelectionError> {
    class_refs
        .iter()
        .find_map(|class_ref| table.find(class_ref))
        .map(|entry| SelectionResult {
            source: entry.source().to_owned(),
            class_ref: Some(entry.class_ref().to_owned()),
        })
        .ok_or_else(|| SelectionError::NoAcceptableContext {
            requested: class_refs.to_vec(),
        })
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::config::ContextsConfig;

    fn table() -> ContextTable {
        let contexts: ContextsConfig = serde_json::from_value(json!({
            "10": { "identifier": "urn:loa:1", "source": "password" },
            "20": { "identifier": "urn:loa:2", "source": "mfa" },
            "30": { "identifier": "urn:loa:3", "source": "smartcard" },
            "default": "password",
        }))
        .unwrap();
        ContextTable::build(&contexts).unwrap()
    }

    fn exact<const N: usize>(class_refs: [&str; N]) -> RequestedAuthnContext {
        RequestedAuthnContext::new(class_refs).with_comparison("exact")
    }

    #[test]
    fn requester_order_breaks_ties() {
        let table = table();

        let first = select(&table, &exact(["urn:loa:1", "urn:loa:2"])).unwrap();
        assert_eq!(first.source, "password");
        assert_eq!(first.class_ref.as_deref(), Some("urn:loa:1"));

        let second = select(&table, &exact(["urn:loa:2", "urn:loa:1"])).unwrap();
        assert_eq!(second.source, "mfa");
        assert_eq!(second.class_ref.as_deref(), Some("urn:loa:2"));
    }

    #[test]
    fn unknown_class_refs_are_skipped() {
        let result = select(&table(), &exact(["urn:loa:30", "urn:loa:2", "urn:loa:10"])).unwrap();
        assert_eq!(
            result,
            SelectionResult {
                source: "mfa".to_owned(),
                class_ref: Some("urn:loa:2".to_owned()),
            }
        );
    }

    #[test]
    fn no_match_reports_full_request() {
        let err = select(&table(), &exact(["urn:loa:30", "urn:loa:20", "urn:loa:10"])).unwrap_err();
        assert_eq!(
            err,
            SelectionError::NoAcceptableContext {
                requested: vec![
                    "urn:loa:30".to_owned(),
                    "urn:loa:20".to_owned(),
                    "urn:loa:10".to_owned(),
                ],
            }
        );
    }

    #[test]
    fn matching_is_strict() {
        let err = select(&table(), &exact(["URN:LOA:1", "urn:loa"])).unwrap_err();
        assert!(matches!(err, SelectionError::NoAcceptableContext { .. }));
    }

    #[test]
    fn no_request_selects_default_without_class_ref() {
        let result = select(&table(), &RequestedAuthnContext::default()).unwrap();
        assert_eq!(
            result,
            SelectionResult {
                source: "password".to_owned(),
                class_ref: None,
            }
        );
    }

    #[test]
    fn no_request_ignores_comparison() {
        let requested = RequestedAuthnContext::new(Vec::<String>::new()).with_comparison("bogus");
        let result = select(&table(), &requested).unwrap();
        assert_eq!(result.source, "password");
        assert_eq!(result.class_ref, None);
    }

    #[test]
    fn unset_comparison_means_exact() {
        let result = select(&table(), &RequestedAuthnContext::new(["urn:loa:3"])).unwrap();
        assert_eq!(result.source, "smartcard");
    }

    #[test]
    fn recognized_but_unimplemented_modes_are_unsupported() {
        for mode in [
            ComparisonMode::Minimum,
            ComparisonMode::Maximum,
            ComparisonMode::Better,
        ] {
            let requested = RequestedAuthnContext::new(["urn:loa:1"]).with_comparison(mode.as_str());
            assert_eq!(
                select(&table(), &requested).unwrap_err(),
                SelectionError::UnsupportedComparisonMode { mode }
            );
        }
    }

    #[test]
    fn unrecognized_mode_is_invalid() {
        let requested = RequestedAuthnContext::new(["urn:loa:1"]).with_comparison("bogus");
        assert_eq!(
            select(&table(), &requested).unwrap_err(),
            SelectionError::InvalidComparisonMode {
                mode: "bogus".to_owned()
            }
        );
    }

    #[test]
    fn selection_is_idempotent() {
        let table = table();
        let requested = exact(["urn:loa:9", "urn:loa:3", "urn:loa:1"]);

        let first = RequestedContextSelector.select(&table, &requested).unwrap();
        for _ in 0..3 {
            assert_eq!(RequestedContextSelector.select(&table, &requested).unwrap(), first);
        }
    }
}
