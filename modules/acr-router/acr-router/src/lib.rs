//! ACR Router Module
//!
//! This module picks the authentication source that must handle a request
//! from the assurance context (class refs plus comparison mode) the peer
//! asked for, records the honored class ref, and delegates to that source.
//!
//! Provides the `AcrRouterClient` trait implementation for consumption by
//! protocol front-ends.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod config;
pub mod domain;
pub mod module;

pub use module::AcrRouterModule;
