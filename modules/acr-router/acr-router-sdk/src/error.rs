//! Error types for the ACR router module.

use thiserror::Error;

use crate::models::ComparisonMode;

/// Errors that can occur when using the ACR router API.
///
/// Configuration problems never show up here: they are reported when the
/// router is constructed. Everything below is terminal for the request it
/// was raised for.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AcrRouterError {
    /// The request state carried a requested context that could not be read.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The comparison token is not one of `exact`, `minimum`, `maximum`, `better`.
    #[error("invalid comparison mode '{0}'")]
    InvalidComparison(String),

    /// The comparison mode is recognized but the router does not implement it.
    #[error("comparison mode '{0}' is not supported")]
    UnsupportedComparison(ComparisonMode),

    /// None of the requested class refs is configured.
    ///
    /// Protocol-level outcome: callers map it to a "no authentication
    /// context" status for the peer.
    #[error(
        "none of the requested authentication contexts could be satisfied: {}",
        .requested.join(", ")
    )]
    NoAuthnContext {
        /// Class refs as requested, in the requester's order.
        requested: Vec<String>,
    },

    /// The selected source rejected the presented credential.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// The selected source is not registered.
    #[error("authentication source '{0}' is not available")]
    SourceUnavailable(String),

    /// An internal error occurred.
    #[error("internal error: {0}")]
    Internal(String),
}
