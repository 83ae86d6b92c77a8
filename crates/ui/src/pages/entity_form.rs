//! Entity Form Page Component
//!
//! Create and edit forms for every entity kind, driven by the field schema
//! of the form controller. Edit forms pre-fill from the collaborator; user
//! edit forms also offer the password change sub-form.

use std::collections::HashMap;

use dioxus::prelude::*;

use backoffice_console::{
    FieldKind, FieldSpec, FormController, FormMode, LookupSource, PrefillOutcome, SelectOption,
    SubmitOutcome, fetch_for_edit, load_options, submit,
};
use backoffice_core::Notice;

use crate::components::{Checkbox, Select, TextArea, TextInput};
use crate::state::{Ctx, go, notify};

/// Lookup sources a form's select fields need, without duplicates
pub fn lookup_sources(fields: &[FieldSpec]) -> Vec<LookupSource> {
    let mut sources = Vec::new();
    for field in fields {
        if let FieldKind::Select(source) = field.kind {
            if !sources.contains(&source) {
                sources.push(source);
            }
        }
    }
    sources
}

/// HTML input type for a text-like field
pub fn input_type(kind: FieldKind) -> &'static str {
    match kind {
        FieldKind::Email => "email",
        FieldKind::Password => "password",
        FieldKind::Occupancy => "number",
        _ => "text",
    }
}

// ============================================================================
// Page Component
// ============================================================================

/// Create or edit form
#[component]
pub fn EntityFormPage(ctx: Ctx, form: FormController) -> Element {
    let kind = form.kind();
    let mode = form.mode();
    let mut controller = use_signal(move || form);
    let mut loading = use_signal(move || mode.is_edit());
    let mut saving = use_signal(|| false);
    let mut options = use_signal(HashMap::<LookupSource, Vec<SelectOption>>::new);

    // Options and, for edits, the record itself
    let load_ctx = ctx.clone();
    use_future(move || {
        let ctx = load_ctx.clone();
        async move {
            let sources = lookup_sources(controller.read().fields());
            for source in sources {
                match load_options(&ctx.api, source).await {
                    Ok(list) => {
                        options.write().insert(source, list);
                    }
                    Err(e) => notify(Notice::error(format!(
                        "Failed to load options: {}",
                        e.user_message()
                    ))),
                }
            }

            if let FormMode::Edit(id) = mode {
                match fetch_for_edit(&ctx.api, kind, id).await {
                    PrefillOutcome::Loaded(record) => controller.write().prefill(record),
                    PrefillOutcome::Missing { notice, redirect } => {
                        notify(notice);
                        go(redirect);
                    }
                }
                loading.set(false);
            }
        }
    });

    // Submit
    let submit_ctx = ctx.clone();
    let on_submit = move |_: MouseEvent| {
        if *saving.read() {
            return;
        }
        saving.set(true);
        let snapshot = controller.read().clone();
        let ctx = submit_ctx.clone();
        spawn(async move {
            match submit(&ctx.api, &ctx.session, &snapshot, ctx.redirect_delay()).await {
                SubmitOutcome::Invalid(report) => {
                    controller.write().set_errors(report);
                    saving.set(false);
                }
                SubmitOutcome::Failed(notice) => {
                    notify(notice);
                    saving.set(false);
                }
                SubmitOutcome::Saved {
                    notice,
                    redirect,
                    delay,
                } => {
                    notify(notice);
                    tokio::time::sleep(delay).await;
                    go(redirect);
                }
            }
        });
    };

    let state = controller.read();
    let fields = state.fields();
    let values = state.values().clone();
    let errors = state.errors().clone();
    let password = state.password().clone();
    let offers_password = state.offers_password_change();
    let cancel_route = state.return_to();
    drop(state);

    let is_saving = *saving.read();
    let is_loading = *loading.read();
    let all_options = options.read().clone();
    let title = match mode {
        FormMode::Create => format!("Add {}", kind.display_name()),
        FormMode::Edit(_) => format!("Edit {}", kind.display_name()),
    };
    let save_label = match (mode, is_saving) {
        (_, true) => "Saving...",
        (FormMode::Create, false) => "Add",
        (FormMode::Edit(_), false) => "Update",
    };

    if is_loading {
        return rsx! {
            div {
                class: "page",
                h2 { "{title}" }
                p { class: "muted", "Loading..." }
            }
        };
    }

    rsx! {
        div {
            class: "page form-page",

            div {
                class: "page-header",
                h2 { "{title}" }
            }

            form {
                class: "form",
                onsubmit: move |e| e.prevent_default(),

                for field in fields.iter().copied() {
                    FormField {
                        key: "{field.key}",
                        field,
                        value: values.get(field.key).to_string(),
                        error: errors.message_for(field.key).map(str::to_string),
                        options: match field.kind {
                            FieldKind::Select(source) => all_options.get(&source).cloned().unwrap_or_default(),
                            _ => Vec::new(),
                        },
                        disabled: is_saving,
                        on_change: move |v: String| controller.write().set(field.key, v),
                    }
                }

                // Password change (user edit only)
                if offers_password {
                    div {
                        class: "subform",
                        Checkbox {
                            checked: password.enabled,
                            label: Some("Change password".to_string()),
                            disabled: is_saving,
                            on_change: move |on: bool| controller.write().set_password_enabled(on),
                        }
                        if password.enabled {
                            TextInput {
                                label: Some("Old Password".to_string()),
                                value: password.old_password.clone(),
                                input_type: "password".to_string(),
                                required: true,
                                error: errors.message_for("oldPassword").map(str::to_string),
                                disabled: is_saving,
                                on_change: move |v: String| controller.write().set_old_password(v),
                            }
                            TextInput {
                                label: Some("New Password".to_string()),
                                value: password.new_password.clone(),
                                input_type: "password".to_string(),
                                required: true,
                                error: errors.message_for("newPassword").map(str::to_string),
                                disabled: is_saving,
                                on_change: move |v: String| controller.write().set_new_password(v),
                            }
                        }
                    }
                }

                div {
                    class: "form-actions",
                    button {
                        r#type: "button",
                        class: "btn btn-secondary",
                        disabled: is_saving,
                        onclick: move |_| go(cancel_route),
                        "Cancel"
                    }
                    button {
                        r#type: "button",
                        class: "btn btn-primary",
                        disabled: is_saving,
                        onclick: on_submit,
                        "{save_label}"
                    }
                }
            }
        }
    }
}

// ============================================================================
// Field Component
// ============================================================================

#[component]
fn FormField(
    field: FieldSpec,
    value: String,
    error: Option<String>,
    options: Vec<SelectOption>,
    disabled: bool,
    on_change: EventHandler<String>,
) -> Element {
    let label = Some(field.label.to_string());

    match field.kind {
        FieldKind::Select(_) => rsx! {
            Select {
                label,
                value,
                options,
                placeholder: Some(format!("Select {}", field.label.to_lowercase())),
                required: field.required,
                error,
                disabled,
                on_change: move |v| on_change.call(v),
            }
        },
        FieldKind::TextArea => rsx! {
            TextArea {
                label,
                value,
                required: field.required,
                error,
                disabled,
                on_change: move |v| on_change.call(v),
            }
        },
        kind => rsx! {
            TextInput {
                label,
                value,
                input_type: input_type(kind).to_string(),
                required: field.required,
                error,
                disabled,
                on_change: move |v| on_change.call(v),
            }
        },
    }
}

// ============================================================================
// Tests
// ============================================================================
