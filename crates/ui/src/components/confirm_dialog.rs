//! # Confirm Status Dialog Component
//!
//! Modal asking the operator to confirm an activate/deactivate request.
//! The dialog only reports the decision; the list page owns the
//! confirmation state and sends the request.

use dioxus::prelude::*;

// ============================================================================
// Component Props
// ============================================================================

#[derive(Props, Clone, PartialEq)]
pub struct ConfirmDialogProps {
    /// Dialog heading
    #[props(default = "Confirm Status Change".to_string())]
    pub title: String,

    /// The question to answer
    pub message: String,

    /// Name of the record affected (optional)
    #[props(default)]
    pub item_name: Option<String>,

    /// Label of the confirm button
    #[props(default = "Confirm".to_string())]
    pub confirm_label: String,

    /// Whether a request is already in flight
    #[props(default = false)]
    pub busy: bool,

    /// Called when the operator confirms
    pub on_confirm: EventHandler<()>,

    /// Called when the operator cancels or clicks the backdrop
    pub on_cancel: EventHandler<()>,
}

// ============================================================================
// Main Component
// ============================================================================

/// Confirmation dialog for status changes
#[component]
pub fn ConfirmDialog(props: ConfirmDialogProps) -> Element {
    let busy = props.busy;

    rsx! {
        div {
            class: "dialog-overlay",

            // Backdrop
            div {
                class: "dialog-backdrop",
                onclick: move |_| {
                    if !busy {
                        props.on_cancel.call(());
                    }
                },
            }

            div {
                class: "dialog",
                onclick: move |e| e.stop_propagation(),

                // Header with warning icon
                div {
                    class: "dialog-header",
                    div { class: "dialog-icon", "⚠️" }
                    div {
                        h2 { class: "dialog-title", "{props.title}" }
                        p { class: "dialog-message", "{props.message}" }
                    }
                }

                // Record being changed
                if let Some(name) = &props.item_name {
                    div {
                        class: "dialog-item",
                        span { class: "muted", "Record:" }
                        span { class: "strong", "{name}" }
                    }
                }

                // Actions
                div {
                    class: "dialog-actions",

                    button {
                        r#type: "button",
                        class: "btn btn-secondary",
                        disabled: busy,
                        onclick: move |_| props.on_cancel.call(()),
                        "Cancel"
                    }

                    button {
                        r#type: "button",
                        class: "btn btn-danger",
                        disabled: busy,
                        onclick: move |_| {
                            if !busy {
                                props.on_confirm.call(());
                            }
                        },
                        if busy {
                            span { class: "spin", "⏳" }
                            "Updating..."
                        } else {
                            "{props.confirm_label}"
                        }
                    }
                }
            }
        }
    }
}
