//! Domain layer for the static authentication source.

pub mod client;
pub mod service;

pub use service::Service;
