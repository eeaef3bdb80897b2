#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Static Authentication Source
//!
//! Development and test source with a fixed credential-to-subject mapping.
//! It registers in the router's `SourceRegistry` under its configured
//! `source_name`.
//!
//! With no `credentials` listed, any non-empty credential authenticates as
//! `subject`. Once `credentials` are listed, only those authenticate.
//!
//! `class_refs` lists the assurance contexts the source can vouch for. A
//! request routed here under any other class ref is rejected. The returned
//! subject carries the class ref the router honored, if any.
//!
//! ## Configuration
//!
//! ```yaml
//! modules:
//!   static_authn_source:
//!     config:
//!       source_name: "password"
//!       class_refs: ["urn:loa:1"]
//!       credentials:
//!         - credential: "alice-pw"
//!           subject:
//!             subject_id: "aaaaaaaa-aaaa-aaaa-aaaa-aaaaaaaaaaaa"
//!             tenant_id: "00000000-df51-5b42-9538-d2b56b7ee953"
//!             scopes: ["*"]
//! ```

pub mod config;
pub mod domain;
pub mod module;

pub use module::StaticAuthnSourcePlugin;
