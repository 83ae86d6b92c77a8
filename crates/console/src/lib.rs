//! # Backoffice Console
//!
//! The flows every entity view repeats, implemented once and keyed by
//! [`EntityKind`](backoffice_core::EntityKind):
//!
//! - **auth**: sign-in and sign-out against the persisted session
//! - **list**: load, search, building filter and pagination
//! - **toggle**: confirmation-gated status change and its reducer
//! - **forms**: field schemas, payload shaping, prefill and submit
//! - **validation**: client-side field checks
//! - **lookup**: select options and id-to-name resolution
//! - **route**: navigation paths
//!
//! Everything talks to the collaborator through
//! [`RecordApi`](backoffice_core::RecordApi), so the same code drives the
//! desktop UI, the CLI and the tests.

pub mod auth;
pub mod context;
pub mod forms;
pub mod list;
pub mod lookup;
pub mod route;
pub mod toggle;
pub mod validation;

#[cfg(test)]
mod fake;

// Re-export commonly used items at crate root
pub use auth::{sign_in, sign_in_failure, sign_out};
pub use context::ConsoleContext;
pub use forms::{
    FieldKind, FieldSpec, FormController, FormMode, FormValues, PasswordChangeForm,
    PrefillOutcome, SubmitOutcome, fetch_for_edit, form_fields, submit,
};
pub use list::{ListController, fetch_records};
pub use lookup::{
    LookupSource, NameLookup, SelectOption, load_options, options_from_records, room_type_name,
};
pub use route::Route;
pub use toggle::{StatusOutcome, StatusToggle, confirm_prompt, send_status_change};
pub use validation::{FieldError, ValidationReport};
