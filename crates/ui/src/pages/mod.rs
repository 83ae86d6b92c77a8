//! Page Components for Backoffice Console
//!
//! Each page is one view of the console:
//!
//! - **LoginPage**: Credential entry
//! - **DashboardPage**: Per-entity shortcuts
//! - **EntityListPage**: Searchable, paginated list with status toggle
//! - **EntityFormPage**: Create and edit forms

pub mod dashboard;
pub mod entity_form;
pub mod entity_list;
pub mod login;

// Re-export page components for convenience
pub use dashboard::DashboardPage;
pub use entity_form::EntityFormPage;
pub use entity_list::EntityListPage;
pub use login::LoginPage;
