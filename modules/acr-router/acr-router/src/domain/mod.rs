//! Domain layer for the ACR router.

pub mod error;
pub mod local_client;
pub mod selector;
pub mod service;
pub mod table;

pub use error::{ConfigError, DomainError, SelectionError};
pub use local_client::AcrRouterLocalClient;
pub use selector::{RequestedContextSelector, SelectionResult, SourceSelector, select};
pub use service::Service;
pub use table::{ContextEntry, ContextTable, DefaultEntry};
