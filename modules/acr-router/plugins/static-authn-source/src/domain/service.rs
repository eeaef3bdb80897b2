//! Service implementation for the static authentication source.

use std::collections::{HashMap, HashSet};

use acr_router_sdk::{AcrRouterError, AuthenticatedSubject};

use crate::config::{StaticAuthnSourceConfig, SubjectConfig};

/// Static authentication source.
///
/// Without configured credentials every non-empty credential maps to one
/// subject. With them, only listed credentials authenticate.
pub struct Service {
    any_credential: Option<SubjectConfig>,
    credentials: HashMap<String, SubjectConfig>,
    class_refs: HashSet<String>,
}

impl Service {
    #[must_use]
    pub fn from_config(cfg: &StaticAuthnSourceConfig) -> Self {
        Self {
            any_credential: cfg
                .accepts_any_credential()
                .then(|| cfg.subject.clone()),
            credentials: cfg
                .credentials
                .iter()
                .map(|m| (m.credential.clone(), m.subject.clone()))
                .collect(),
            class_refs: cfg.class_refs.iter().cloned().collect(),
        }
    }

    /// Authenticate `credential` under the class ref the router honored.
    ///
    /// # Errors
    ///
    /// Returns [`AcrRouterError::Unauthorized`] if the credential is empty or
    /// unknown, or if `class_ref` is not one this source vouches for.
    pub fn authenticate(
        &self,
        credential: &str,
        class_ref: Option<&str>,
    ) -> Result<AuthenticatedSubject, AcrRouterError> {
        if let Some(class_ref) = class_ref
            && !self.class_refs.is_empty()
            && !self.class_refs.contains(class_ref)
        {
            return Err(AcrRouterError::Unauthorized(format!(
                "source cannot vouch for class ref '{class_ref}'"
            )));
        }

        if credential.is_empty() {
            return Err(invalid_credential());
        }
        let subject = match &self.any_credential {
            Some(subject) => subject,
            None => self.credentials.get(credential).ok_or_else(invalid_credential)?,
        };

        Ok(AuthenticatedSubject {
            subject_id: subject.subject_id,
            subject_tenant_id: subject.tenant_id,
            token_scopes: subject.scopes.clone(),
            class_ref: class_ref.map(str::to_owned),
        })
    }
}

fn invalid_credential() -> AcrRouterError {
    AcrRouterError::Unauthorized("invalid credential".to_owned())
}
