//! # Backoffice Core
//!
//! Core types, traits, and error handling for Backoffice Console.
//!
//! This crate provides the building blocks shared by the console flows,
//! the REST client, the desktop UI and the CLI:
//!
//! - **Types**: entity kinds, record ids, schemaless records, notices
//! - **Session**: the immutable session context and its persisted blob
//! - **Config**: layered configuration (defaults, TOML, environment)
//! - **Traits**: the `RecordApi` and `AuthApi` seams
//! - **Errors**: unified error handling with `ConsoleError` and `ConsoleResult`
//!

pub mod config;
pub mod error;
pub mod session;
pub mod traits;
pub mod types;

// Re-export commonly used items at crate root
pub use config::ConsoleConfig;
pub use error::{ConsoleError, ConsoleResult};
pub use session::{SESSION_KEY, SessionContext, SessionStore};
pub use traits::{AuthApi, RecordApi};
pub use types::{
    Credentials, EntityKind, Notice, NoticeLevel, PasswordChange, Record, RecordId,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
