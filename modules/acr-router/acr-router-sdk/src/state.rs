//! Request-scoped authentication state.
//!
//! The host keeps one [`AuthnState`] per in-flight authentication. The
//! router only reads from it; its single write-back is returned as a
//! [`StatePatch`] that the host applies to its own copy.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::models::RequestedAuthnContext;

/// Key holding the peer's requested assurance context.
pub const REQUESTED_AUTHN_CONTEXT_KEY: &str = "saml:RequestedAuthnContext";

/// Key holding the class ref the router actually honored.
///
/// Only present when selection was driven by a requested context.
pub const AUTHN_CONTEXT_CLASS_REF_KEY: &str = "saml:AuthnContextClassRef";

/// Key/value bag describing one authentication in progress.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuthnState {
    entries: Map<String, Value>,
}

impl AuthnState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Insert a value, returning the previous one.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.entries.insert(key.into(), value)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Store the peer's requested context under [`REQUESTED_AUTHN_CONTEXT_KEY`].
    pub fn set_requested_authn_context(&mut self, requested: &RequestedAuthnContext) {
        self.insert(
            REQUESTED_AUTHN_CONTEXT_KEY,
            json!({
                "class_refs": requested.class_refs,
                "comparison": requested.comparison,
            }),
        );
    }

    /// Read the peer's requested context.
    ///
    /// Returns `Ok(None)` when the key is absent or `null`.
    ///
    /// # Errors
    ///
    /// Returns the decoding error when the stored record has the wrong shape.
    pub fn requested_authn_context(&self) -> Result<Option<RequestedAuthnContext>, serde_json::Error> {
        match self.get(REQUESTED_AUTHN_CONTEXT_KEY) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => RequestedAuthnContext::deserialize(value).map(Some),
        }
    }

    /// Class ref honored by the router, if one was written back.
    #[must_use]
    pub fn class_ref(&self) -> Option<&str> {
        self.get(AUTHN_CONTEXT_CLASS_REF_KEY).and_then(Value::as_str)
    }
}

/// The router's write-back for one request.
///
/// An empty patch means nothing must be written; in particular the class ref
/// key stays absent when no assurance context was requested.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatePatch {
    /// Class ref to store under [`AUTHN_CONTEXT_CLASS_REF_KEY`].
    pub class_ref: Option<String>,
}

impl StatePatch {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.class_ref.is_none()
    }

    pub fn apply(&self, state: &mut AuthnState) {
        if let Some(class_ref) = &self.class_ref {
            state.insert(AUTHN_CONTEXT_CLASS_REF_KEY, Value::String(class_ref.clone()));
        }
    }
}
