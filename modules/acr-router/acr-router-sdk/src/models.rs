//! Domain models for the ACR router module.

use std::fmt;
use std::str::FromStr;

use secrecy::SecretString;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::state::StatePatch;

/// Matching policy the requester attaches to its requested class refs.
///
/// Tokens are the lowercase SAML `Comparison` values and are matched
/// case-sensitively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComparisonMode {
    /// The honored context must equal one of the requested ones.
    Exact,
    /// The honored context must be at least as strong as the requested ones.
    Minimum,
    /// The honored context must be no stronger than the requested ones.
    Maximum,
    /// The honored context must be stronger than the requested ones.
    Better,
}

impl ComparisonMode {
    /// Wire token for this mode.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::Minimum => "minimum",
            Self::Maximum => "maximum",
            Self::Better => "better",
        }
    }
}

impl fmt::Display for ComparisonMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a comparison token is not a recognized mode.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized comparison mode '{0}'")]
pub struct ParseComparisonModeError(pub String);

impl FromStr for ComparisonMode {
    type Err = ParseComparisonModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "exact" => Ok(Self::Exact),
            "minimum" => Ok(Self::Minimum),
            "maximum" => Ok(Self::Maximum),
            "better" => Ok(Self::Better),
            other => Err(ParseComparisonModeError(other.to_owned())),
        }
    }
}

/// Assurance context requested by the peer.
///
/// The comparison token is kept as received, whatever its JSON type, so that
/// an unrecognized value is reported by the router only when class refs were
/// requested. Unknown fields are rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RequestedAuthnContext {
    /// Requested class refs in the requester's order of preference.
    #[serde(default)]
    pub class_refs: Option<Vec<String>>,
    /// Raw comparison token. `None` means the requester did not set one.
    #[serde(default, deserialize_with = "raw_comparison")]
    pub comparison: Option<String>,
}

// Non-string tokens are kept in their JSON text form (`5`, `true`).
fn raw_comparison<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => None,
        Some(Value::String(token)) => Some(token),
        Some(other) => Some(other.to_string()),
    })
}

impl RequestedAuthnContext {
    #[must_use]
    pub fn new<I, S>(class_refs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            class_refs: Some(class_refs.into_iter().map(Into::into).collect()),
            comparison: None,
        }
    }

    #[must_use]
    pub fn with_comparison(mut self, comparison: impl Into<String>) -> Self {
        self.comparison = Some(comparison.into());
        self
    }

    /// Requested class refs; empty when none were sent.
    #[must_use]
    pub fn class_refs(&self) -> &[String] {
        self.class_refs.as_deref().unwrap_or_default()
    }

    /// `true` when the requester expressed no assurance preference.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.class_refs().is_empty()
    }
}

/// Inbound authentication request as seen by the router and the sources.
#[derive(Debug, Clone, Default)]
pub struct AuthnRequest {
    /// Entity that issued the request (e.g. the relying party's entity ID).
    pub requester: Option<String>,
    /// Credential presented with the request. Redacted in `Debug` output.
    pub credential: Option<SecretString>,
}

impl AuthnRequest {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_requester(mut self, requester: impl Into<String>) -> Self {
        self.requester = Some(requester.into());
        self
    }

    #[must_use]
    pub fn with_credential(mut self, credential: String) -> Self {
        self.credential = Some(SecretString::from(credential));
        self
    }
}

/// Identity established by a source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatedSubject {
    /// The authenticated user/service ID.
    pub subject_id: Uuid,
    /// The subject's home tenant.
    pub subject_tenant_id: Uuid,
    /// Token capability restrictions. `["*"]` means unrestricted.
    #[serde(default)]
    pub token_scopes: Vec<String>,
    /// Class ref the authentication was performed at, if one was honored.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_ref: Option<String>,
}

/// What a source returns once it has been handed a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceResponse {
    /// Authentication completed.
    Authenticated(AuthenticatedSubject),
    /// Authentication continues elsewhere (e.g. an external login page).
    Continue {
        /// Where the user agent must be sent next.
        location: String,
    },
}

/// Result of a successful routing decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteOutcome {
    /// Name of the source that handled the request.
    pub source: String,
    /// Write-back the caller applies to its own request state.
    pub patch: StatePatch,
    /// The source's answer.
    pub response: SourceResponse,
}
