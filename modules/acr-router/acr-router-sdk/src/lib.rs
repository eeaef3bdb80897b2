//! ACR Router SDK
//!
//! This crate provides the public API for the `acr_router` module:
//!
//! - [`AcrRouterClient`] - Public API trait for consumers
//! - [`AuthnSourceClient`] - Source API trait for authentication backends
//! - [`SourceRegistry`] - Name-to-source lookup used by the router
//! - [`AuthnState`] / [`StatePatch`] - Request-scoped state and the router's write-back
//! - [`RequestedAuthnContext`] / [`ComparisonMode`] - What the peer asked for
//! - [`AcrRouterError`] - Error types
//!
//! ## Usage
//!
//! ```ignore
//! use acr_router_sdk::{AcrRouterClient, AuthnRequest, AuthnState, RequestedAuthnContext};
//!
//! let mut state = AuthnState::new();
//! state.set_requested_authn_context(
//!     &RequestedAuthnContext::new(["urn:loa:2", "urn:loa:1"]).with_comparison("exact"),
//! );
//!
//! let outcome = router.route(&AuthnRequest::default(), &state).await?;
//! outcome.patch.apply(&mut state);
//! ```
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod api;
pub mod error;
pub mod models;
pub mod plugin_api;
pub mod registry;
pub mod state;

// Re-export main types at crate root
pub use api::AcrRouterClient;
pub use error::AcrRouterError;
pub use models::{
    AuthenticatedSubject, AuthnRequest, ComparisonMode, ParseComparisonModeError,
    RequestedAuthnContext, RouteOutcome, SourceResponse,
};
pub use plugin_api::AuthnSourceClient;
pub use registry::SourceRegistry;
pub use state::{
    AUTHN_CONTEXT_CLASS_REF_KEY, AuthnState, REQUESTED_AUTHN_CONTEXT_KEY, StatePatch,
};
