//! Main Application Component for Backoffice Console
//!
//! This module contains the root Dioxus component. Logged out, it shows the
//! login view alone; logged in, it lays out the toolbar, the navigation
//! sidebar and the active page.

use dioxus::prelude::*;

use backoffice_console::{FormController, Route, sign_out};
use backoffice_core::{EntityKind, Notice};

use crate::components::NoticeStack;
use crate::pages::{DashboardPage, EntityFormPage, EntityListPage, LoginPage};
use crate::state::{APP_STATE, go, notify, use_console_context, use_route};

// ============================================================================
// Main App Component
// ============================================================================

/// Root application component
#[component]
pub fn App() -> Element {
    use_effect(|| {
        tracing::info!("Backoffice Console UI initialized");
    });

    let logged_in = APP_STATE.read().is_logged_in();

    rsx! {
        div {
            class: "app-container",

            if logged_in {
                Toolbar {}
                div {
                    class: "app-body",
                    Sidebar {}
                    MainContent {}
                }
            } else {
                LoginPage {}
            }

            NoticeStack {}
        }
    }
}

// ============================================================================
// Toolbar Component
// ============================================================================

/// Top toolbar with the view title, operator name and logout
#[component]
fn Toolbar() -> Element {
    let state = APP_STATE.read();
    let title = state.route.title();
    let user = state.user_label();
    drop(state);

    rsx! {
        header {
            class: "toolbar",

            div {
                class: "brand",
                span { class: "brand-icon", "🏢" }
                span { class: "brand-name", "Backoffice" }
            }

            div { class: "toolbar-sep" }

            span { class: "toolbar-title", "{title}" }

            div { class: "flex-1" }

            span { class: "toolbar-user", "👤 {user}" }

            button {
                class: "btn btn-secondary",
                title: "Sign out",
                onclick: move |_| logout(),
                "Logout"
            }
        }
    }
}

fn logout() {
    let store = APP_STATE.read().config.session_store();
    if let Err(e) = store.and_then(|s| sign_out(&s)) {
        tracing::warn!("Failed to clear session: {}", e);
    }
    APP_STATE.write().signed_out();
    notify(Notice::info("Signed out"));
}

// ============================================================================
// Sidebar Component
// ============================================================================

/// Left sidebar with navigation
#[component]
fn Sidebar() -> Element {
    let state = APP_STATE.read();
    let collapsed = state.ui.sidebar_collapsed;
    let current = state.route;
    drop(state);

    rsx! {
        aside {
            class: if collapsed { "sidebar collapsed" } else { "sidebar" },

            div {
                class: "sidebar-header",
                if !collapsed {
                    span { class: "sidebar-heading", "Navigation" }
                }
                button {
                    class: "icon-btn",
                    title: if collapsed { "Expand sidebar" } else { "Collapse sidebar" },
                    onclick: move |_| APP_STATE.write().ui.toggle_sidebar(),
                    if collapsed { "☰" } else { "✕" }
                }
            }

            nav {
                class: "sidebar-nav",

                SidebarItem {
                    target: Route::Dashboard,
                    icon: "🏠",
                    name: "Dashboard",
                    active: current == Route::Dashboard,
                    collapsed,
                }

                div { class: "sidebar-divider" }

                for kind in EntityKind::ALL {
                    SidebarItem {
                        key: "{kind}",
                        target: Route::List(kind),
                        icon: kind.icon(),
                        name: kind.plural_name(),
                        active: current.entity() == Some(kind),
                        collapsed,
                    }
                }
            }
        }
    }
}

/// Sidebar navigation item
#[component]
fn SidebarItem(
    target: Route,
    icon: &'static str,
    name: &'static str,
    active: bool,
    collapsed: bool,
) -> Element {
    rsx! {
        button {
            class: if active { "sidebar-item active" } else { "sidebar-item" },
            title: "{name}",
            onclick: move |_| go(target),
            span { class: "sidebar-icon", "{icon}" }
            if !collapsed {
                span { class: "sidebar-label", "{name}" }
            }
        }
    }
}

// ============================================================================
// Main Content Component
// ============================================================================

/// Main content area that renders the active page
#[component]
fn MainContent() -> Element {
    let route = use_route();
    let Some(ctx) = use_console_context() else {
        return rsx! {};
    };
    let user = APP_STATE.read().user_label();

    rsx! {
        main {
            class: "content",

            match route {
                Route::Login | Route::Dashboard => rsx! { DashboardPage { user } },
                Route::List(kind) => rsx! {
                    EntityListPage { key: "{route}", ctx, kind, building: None }
                },
                Route::RoomsInBuilding(id) => rsx! {
                    EntityListPage { key: "{route}", ctx, kind: EntityKind::Room, building: Some(id) }
                },
                Route::Create(_) | Route::CreateRoomInBuilding(_) | Route::Edit(_, _) => {
                    match FormController::for_route(route) {
                        Some(form) => rsx! { EntityFormPage { key: "{route}", ctx, form } },
                        None => rsx! { p { class: "muted", "Nothing to show here." } },
                    }
                }
            }
        }
    }
}
