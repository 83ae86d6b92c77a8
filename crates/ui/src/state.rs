//! Application State Management for Backoffice Console
//!
//! This module defines the global application state using Dioxus signals.
//! The state holds the current route, the logged-in console context and
//! the transient notices shown in the corner of the window.

use std::time::Duration;

use dioxus::prelude::*;
use uuid::Uuid;

use backoffice_api::ApiClient;
use backoffice_console::{ConsoleContext, Route};
use backoffice_core::{ConsoleConfig, ConsoleResult, Notice, SessionContext};

/// Context type every page works with
pub type Ctx = ConsoleContext<ApiClient>;

/// How long a notice stays on screen
pub const NOTICE_TTL: Duration = Duration::from_secs(4);

/// Most notices shown at once; older ones are dropped first
pub const MAX_NOTICES: usize = 5;

// ============================================================================
// UI State
// ============================================================================

/// General UI state (panels, layout)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UiState {
    /// Whether the sidebar is collapsed
    pub sidebar_collapsed: bool,
}

impl UiState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle sidebar
    pub fn toggle_sidebar(&mut self) {
        self.sidebar_collapsed = !self.sidebar_collapsed;
    }
}

// ============================================================================
// Application State
// ============================================================================

/// Main application state container
#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    /// Currently displayed view
    pub route: Route,
    /// API client, session and settings (None until logged in)
    pub context: Option<Ctx>,
    /// Settings used to build the context at login
    pub config: ConsoleConfig,
    /// Transient notices, oldest first
    pub notices: Vec<Notice>,
    /// UI state
    pub ui: UiState,
}

impl Default for AppState {
    fn default() -> Self {
        Self::from_parts(ConsoleConfig::default(), None)
    }
}

impl AppState {
    /// Load configuration and restore a persisted session, if any
    pub fn load() -> Self {
        let config = ConsoleConfig::load(None).unwrap_or_else(|e| {
            tracing::warn!("Using default configuration: {}", e);
            ConsoleConfig::default()
        });

        let session = config
            .session_store()
            .and_then(|store| store.load())
            .inspect_err(|e| tracing::debug!("No session restored: {}", e))
            .ok();

        Self::from_parts(config, session)
    }

    /// Build state from a configuration and an optional session
    pub fn from_parts(config: ConsoleConfig, session: Option<SessionContext>) -> Self {
        let mut state = Self {
            route: Route::Login,
            context: None,
            config,
            notices: Vec::new(),
            ui: UiState::new(),
        };

        if let Some(session) = session {
            match state.build_context(session) {
                Ok(ctx) => {
                    state.context = Some(ctx);
                    state.route = Route::Dashboard;
                }
                Err(e) => tracing::error!("Failed to restore session: {}", e),
            }
        }

        state
    }

    fn build_context(&self, session: SessionContext) -> ConsoleResult<Ctx> {
        let api = ApiClient::from_config(&self.config)?.with_session(&session);
        Ok(ConsoleContext::new(api, session, self.config.clone()))
    }

    /// Check if an operator is logged in
    pub fn is_logged_in(&self) -> bool {
        self.context.is_some()
    }

    /// Name shown in the toolbar
    pub fn user_label(&self) -> String {
        self.context
            .as_ref()
            .and_then(|ctx| ctx.session.display_name().map(str::to_string))
            .unwrap_or_else(|| "Operator".to_string())
    }

    /// Navigate to a route
    ///
    /// Views that need a session fall back to the login view; the login
    /// view falls forward to the dashboard once logged in.
    pub fn navigate(&mut self, route: Route) {
        self.route = match route {
            r if r.requires_session() && !self.is_logged_in() => Route::Login,
            Route::Login if self.is_logged_in() => Route::Dashboard,
            r => r,
        };
        tracing::debug!("Navigated to {}", self.route);
    }

    /// Install a fresh session and go to the dashboard
    pub fn signed_in(&mut self, session: SessionContext) -> ConsoleResult<()> {
        self.context = Some(self.build_context(session)?);
        self.navigate(Route::Dashboard);
        Ok(())
    }

    /// Drop the session and go to the login view
    pub fn signed_out(&mut self) {
        self.context = None;
        self.navigate(Route::Login);
    }

    /// Add a notice, dropping the oldest when full
    pub fn push_notice(&mut self, notice: Notice) {
        self.notices.push(notice);
        if self.notices.len() > MAX_NOTICES {
            let excess = self.notices.len() - MAX_NOTICES;
            self.notices.drain(..excess);
        }
    }

    /// Remove a notice by id
    pub fn dismiss_notice(&mut self, id: Uuid) {
        self.notices.retain(|n| n.id != id);
    }

    /// Drop notices that have been shown for [`NOTICE_TTL`]
    pub fn expire_notices(&mut self) {
        self.notices.retain(|n| !n.is_expired(NOTICE_TTL));
    }
}

// ============================================================================
// Global State Context
// ============================================================================

/// Global application state signal
/// Use this in components to access and modify app state
pub static APP_STATE: GlobalSignal<AppState> = Signal::global(AppState::load);

/// Show a notice and schedule the expiry sweep that removes it
pub fn notify(notice: Notice) {
    APP_STATE.write().push_notice(notice);
    spawn(async move {
        tokio::time::sleep(NOTICE_TTL).await;
        APP_STATE.write().expire_notices();
    });
}

/// Navigate from an event handler
pub fn go(route: Route) {
    APP_STATE.write().navigate(route);
}

// ============================================================================
// State Hooks (for component use)
// ============================================================================

/// Hook to access the current route
pub fn use_route() -> Route {
    APP_STATE.read().route
}

/// Hook to get the console context (None when logged out)
pub fn use_console_context() -> Option<Ctx> {
    APP_STATE.read().context.clone()
}

// ============================================================================
// Tests
// ============================================================================
