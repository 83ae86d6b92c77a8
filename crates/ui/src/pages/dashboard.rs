//! Dashboard Page Component
//!
//! Landing page after login with one shortcut card per entity kind.

use dioxus::prelude::*;

use backoffice_console::Route;
use backoffice_core::EntityKind;

use crate::state::go;

/// Landing page
#[component]
pub fn DashboardPage(user: String) -> Element {
    rsx! {
        div {
            class: "page",

            div {
                class: "page-header",
                h2 { "Welcome, {user}" }
                p { class: "muted", "Pick an area to manage." }
            }

            div {
                class: "card-grid",
                for kind in EntityKind::ALL {
                    EntityCard { key: "{kind}", kind }
                }
            }
        }
    }
}

#[component]
fn EntityCard(kind: EntityKind) -> Element {
    let add_label = format!("Add {}", kind.display_name());

    rsx! {
        div {
            class: "card",
            div {
                class: "card-title",
                span { class: "card-icon", {kind.icon()} }
                span { {kind.plural_name()} }
            }
            div {
                class: "card-actions",
                button {
                    class: "btn btn-secondary",
                    onclick: move |_| go(Route::List(kind)),
                    "View"
                }
                button {
                    class: "btn btn-primary",
                    onclick: move |_| go(Route::Create(kind)),
                    "{add_label}"
                }
            }
        }
    }
}
