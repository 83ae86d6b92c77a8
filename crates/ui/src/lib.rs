//! # Backoffice UI
//!
//! Dioxus Desktop UI for Backoffice Console.
//!
//! The views are thin: every load, search, toggle and submit goes through
//! `backoffice_console`, with `backoffice_api::ApiClient` as the transport.
//!
//! ## Features
//!
//! - Login with a persisted session
//! - Searchable, paginated lists for every entity kind
//! - Confirmation-gated activate / deactivate
//! - Create and edit forms with client-side validation
//!

// ============================================================================
// Modules
// ============================================================================

pub mod app;
pub mod components;
pub mod pages;
pub mod state;

// ============================================================================
// Re-exports
// ============================================================================

pub use app::App;
pub use state::{APP_STATE, AppState, Ctx, UiState, notify};

// ============================================================================
// Constants
// ============================================================================

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const NAME: &str = "Backoffice Console";

/// Application display title
pub const TITLE: &str = "Backoffice Console - Tenant & Room Management";

/// CSS styles for the application
const STYLES: &str = include_str!("../../../assets/styles/main.css");

// ============================================================================
// Launch Function
// ============================================================================

/// Launch the Backoffice Console desktop application
///
/// # Example
///
/// ```rust,ignore
/// fn main() {
///     backoffice_ui::launch();
/// }
/// ```
pub fn launch() {
    tracing::info!("Starting {} v{}", NAME, VERSION);

    // Build custom head with embedded CSS
    let custom_head = format!(r#"<style type="text/css">{}</style>"#, STYLES);

    dioxus::LaunchBuilder::desktop()
        .with_cfg(
            dioxus::desktop::Config::new()
                .with_window(
                    dioxus::desktop::WindowBuilder::new()
                        .with_title(TITLE)
                        .with_resizable(true)
                        .with_inner_size(dioxus::desktop::LogicalSize::new(1280.0, 820.0))
                        .with_min_inner_size(dioxus::desktop::LogicalSize::new(800.0, 600.0)),
                )
                .with_menu(None)
                .with_custom_head(custom_head),
        )
        .launch(App);
}

// ============================================================================
// Tests
// ============================================================================
