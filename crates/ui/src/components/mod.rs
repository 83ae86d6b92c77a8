//! # UI Components
//!
//! Reusable Dioxus components for the Backoffice Console.
//!
//! - **Inputs**: Form input components (text, select, checkbox, ...)
//! - **Table**: Pagination bar and status badge for entity lists
//! - **ConfirmDialog**: Modal confirmation for status changes
//! - **Notices**: Toast notices

// ============================================================================
// Module Declarations
// ============================================================================

pub mod confirm_dialog;
pub mod inputs;
pub mod notices;
pub mod table;

// ============================================================================
// Re-exports
// ============================================================================

pub use confirm_dialog::ConfirmDialog;
pub use inputs::{Checkbox, Select, TextArea, TextInput};
pub use notices::NoticeStack;
pub use table::{Pagination, StatusBadge};
