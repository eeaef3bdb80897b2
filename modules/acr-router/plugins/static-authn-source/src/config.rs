//! Configuration for the static authentication source.

use serde::Deserialize;
use uuid::Uuid;

/// Subject returned for unlisted credentials unless configured otherwise.
pub const DEFAULT_SUBJECT_ID: Uuid = Uuid::from_u128(0x1111_1111_6a88_4768_9dfc_6bcd_5187_d9ed);

/// Home tenant of [`DEFAULT_SUBJECT_ID`].
pub const DEFAULT_TENANT_ID: Uuid = Uuid::from_u128(0x0000_0000_df51_5b42_9538_d2b5_6b7e_e953);

/// Source configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StaticAuthnSourceConfig {
    /// Name the source registers under; referenced by the router's `contexts`.
    pub source_name: String,

    /// Subject for any non-empty credential. Only used while `credentials` is empty.
    pub subject: SubjectConfig,

    /// Known credentials. Once non-empty, nothing else authenticates.
    pub credentials: Vec<CredentialMapping>,

    /// Class refs this source can vouch for. Empty accepts whatever the router honored.
    pub class_refs: Vec<String>,
}

impl Default for StaticAuthnSourceConfig {
    fn default() -> Self {
        Self {
            source_name: "static".to_owned(),
            subject: SubjectConfig::default(),
            credentials: Vec::new(),
            class_refs: Vec::new(),
        }
    }
}

impl StaticAuthnSourceConfig {
    /// `true` when any non-empty credential authenticates.
    #[must_use]
    pub fn accepts_any_credential(&self) -> bool {
        self.credentials.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SubjectConfig {
    pub subject_id: Uuid,
    pub tenant_id: Uuid,
    /// `["*"]` means unrestricted.
    pub scopes: Vec<String>,
}

impl Default for SubjectConfig {
    fn default() -> Self {
        Self {
            subject_id: DEFAULT_SUBJECT_ID,
            tenant_id: DEFAULT_TENANT_ID,
            scopes: vec!["*".to_owned()],
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CredentialMapping {
    pub credential: String,
    pub subject: SubjectConfig,
}
