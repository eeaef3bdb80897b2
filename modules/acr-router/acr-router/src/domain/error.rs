//! Domain errors for the ACR router.

use acr_router_sdk::{AcrRouterError, ComparisonMode};

/// Problems found while building the context table.
///
/// Raised once, at construction; a router with a broken table is never built.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing `contexts` mapping")]
    MissingContexts,

    #[error("missing `default` context")]
    MissingDefault,

    #[error("incomplete context '{key}' due to missing `identifier` key")]
    MissingIdentifierKey { key: String },

    #[error("incomplete context '{key}' due to missing `source` key")]
    MissingSourceKey { key: String },

    #[error("invalid context key '{key}': expected a priority number or `default`")]
    InvalidContextKey { key: String },

    #[error("context '{key}' is declared more than once")]
    DuplicateKey { key: String },

    #[error("identifier '{class_ref}' is bound by both context '{first}' and context '{second}'")]
    DuplicateIdentifier {
        class_ref: String,
        first: i64,
        second: i64,
    },

    #[error("malformed configuration: {0}")]
    Malformed(String),
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        Self::Malformed(e.to_string())
    }
}

/// Outcomes of running the selection algorithm.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    #[error("invalid comparison mode '{mode}'")]
    InvalidComparisonMode { mode: String },

    #[error("comparison mode '{mode}' is not supported")]
    UnsupportedComparisonMode { mode: ComparisonMode },

    #[error(
        "none of the requested authentication contexts could be satisfied: {}",
        .requested.join(", ")
    )]
    NoAcceptableContext { requested: Vec<String> },
}

/// Internal domain errors.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error(transparent)]
    Selection(#[from] SelectionError),

    #[error("invalid request state: {0}")]
    InvalidRequestState(String),

    #[error("authentication source '{source_name}' is not registered")]
    SourceUnavailable { source_name: String },

    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<serde_json::Error> for DomainError {
    fn from(e: serde_json::Error) -> Self {
        Self::InvalidRequestState(e.to_string())
    }
}

impl From<AcrRouterError> for DomainError {
    fn from(e: AcrRouterError) -> Self {
        match e {
            AcrRouterError::InvalidRequest(msg) => Self::InvalidRequestState(msg),
            AcrRouterError::InvalidComparison(mode) => {
                SelectionError::InvalidComparisonMode { mode }.into()
            }
            AcrRouterError::UnsupportedComparison(mode) => {
                SelectionError::UnsupportedComparisonMode { mode }.into()
            }
            AcrRouterError::NoAuthnContext { requested } => {
                SelectionError::NoAcceptableContext { requested }.into()
            }
            AcrRouterError::Unauthorized(msg) => Self::Unauthorized(msg),
            AcrRouterError::SourceUnavailable(source_name) => {
                Self::SourceUnavailable { source_name }
            }
            AcrRouterError::Internal(msg) => Self::Internal(msg),
        }
    }
}

impl From<DomainError> for AcrRouterError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::Selection(SelectionError::InvalidComparisonMode { mode }) => {
                Self::InvalidComparison(mode)
            }
            DomainError::Selection(SelectionError::UnsupportedComparisonMode { mode }) => {
                Self::UnsupportedComparison(mode)
            }
            DomainError::Selection(SelectionError::NoAcceptableContext { requested }) => {
                Self::NoAuthnContext { requested }
            }
            DomainError::InvalidRequestState(msg) => Self::InvalidRequest(msg),
            DomainError::SourceUnavailable { source_name } => Self::SourceUnavailable(source_name),
            DomainError::Unauthorized(msg) => Self::Unauthorized(msg),
            DomainError::Internal(msg) => Self::Internal(msg),
        }
    }
}
