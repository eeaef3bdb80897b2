//! Public API trait for the ACR router.
//!
//! This trait defines the interface that protocol front-ends use to hand
//! an authentication request over. The router picks a source from the
//! requested assurance context and delegates to it.

use async_trait::async_trait;

use crate::error::AcrRouterError;
use crate::models::{AuthnRequest, RouteOutcome};
use crate::state::AuthnState;

/// Public API trait for the ACR router.
///
/// ```ignore
/// let outcome = router.route(&request, &state).await?;
///
/// // Record which assurance level was honored, if any
/// outcome.patch.apply(&mut state);
/// ```
#[async_trait]
pub trait AcrRouterClient: Send + Sync {
    /// Select a source for the request and authenticate through it.
    ///
    /// `state` is left untouched; the class ref to record is returned in
    /// [`RouteOutcome::patch`].
    ///
    /// # Errors
    ///
    /// - `InvalidRequest` if the requested context in `state` is malformed
    /// - `InvalidComparison` for an unrecognized comparison token
    /// - `UnsupportedComparison` for `minimum`, `maximum` or `better`
    /// - `NoAuthnContext` if no requested class ref is configured
    /// - `SourceUnavailable` if the selected source is not registered
    /// - any error returned by the selected source
    async fn route(
        &self,
        request: &AuthnRequest,
        state: &AuthnState,
    ) -> Result<RouteOutcome, AcrRouterError>;
}
