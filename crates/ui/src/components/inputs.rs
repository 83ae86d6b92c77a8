//! # Input Components
//!
//! Form controls shared by the login view and the entity forms:
//! - **TextInput**: text, email, password or numeric entry
//! - **TextArea**: remarks and descriptions
//! - **Select**: a record id picked from lookup options
//! - **Checkbox**: the password-change switch
//!
//! A control shows its validation message in place of nothing; the
//! required marker follows the field schema.

use dioxus::prelude::*;

use backoffice_console::SelectOption;

// ============================================================================
// Text Input Component
// ============================================================================

#[derive(Props, Clone, PartialEq)]
pub struct TextInputProps {
    pub value: String,

    #[props(default)]
    pub label: Option<String>,

    #[props(default)]
    pub placeholder: Option<String>,

    /// Validation message for this field
    #[props(default)]
    pub error: Option<String>,

    #[props(default = false)]
    pub required: bool,

    #[props(default = false)]
    pub disabled: bool,

    /// HTML input type (`text`, `email`, `password`, `number`)
    #[props(default = "text".to_string())]
    pub input_type: String,

    #[props(default)]
    pub on_change: EventHandler<String>,

    /// Fired on Enter; the login form submits with it
    #[props(default)]
    pub on_enter: EventHandler<()>,
}

/// Single-line text input
#[component]
pub fn TextInput(props: TextInputProps) -> Element {
    let class = control_class("input", props.error.is_some(), props.disabled);

    rsx! {
        div {
            class: "input-group",

            FieldLabel { label: props.label.clone(), required: props.required }

            input {
                class: "{class}",
                r#type: "{props.input_type}",
                value: "{props.value}",
                placeholder: props.placeholder.as_deref().unwrap_or(""),
                disabled: props.disabled,
                oninput: move |e| props.on_change.call(e.value()),
                onkeydown: move |e| {
                    if e.key() == Key::Enter {
                        props.on_enter.call(());
                    }
                },
            }

            FieldError { error: props.error.clone() }
        }
    }
}

// ============================================================================
// Text Area Component
// ============================================================================

#[derive(Props, Clone, PartialEq)]
pub struct TextAreaProps {
    pub value: String,

    #[props(default)]
    pub label: Option<String>,

    #[props(default)]
    pub error: Option<String>,

    #[props(default = 3)]
    pub rows: usize,

    #[props(default = false)]
    pub required: bool,

    #[props(default = false)]
    pub disabled: bool,

    #[props(default)]
    pub on_change: EventHandler<String>,
}

/// Multi-line text input
#[component]
pub fn TextArea(props: TextAreaProps) -> Element {
    let class = control_class("input textarea", props.error.is_some(), props.disabled);

    rsx! {
        div {
            class: "input-group",

            FieldLabel { label: props.label.clone(), required: props.required }

            textarea {
                class: "{class}",
                rows: "{props.rows}",
                disabled: props.disabled,
                oninput: move |e| props.on_change.call(e.value()),
                "{props.value}"
            }

            FieldError { error: props.error.clone() }
        }
    }
}

// ============================================================================
// Select Component
// ============================================================================

#[derive(Props, Clone, PartialEq)]
pub struct SelectProps {
    /// Selected record id as text; empty selects the placeholder
    pub value: String,

    pub options: Vec<SelectOption>,

    #[props(default)]
    pub label: Option<String>,

    #[props(default)]
    pub placeholder: Option<String>,

    #[props(default)]
    pub error: Option<String>,

    #[props(default = false)]
    pub required: bool,

    #[props(default = false)]
    pub disabled: bool,

    #[props(default)]
    pub on_change: EventHandler<String>,
}

/// Dropdown over lookup options
///
/// A value with no matching option (an inactive billing profile on an old
/// room, say) falls back to the placeholder.
#[component]
pub fn Select(props: SelectProps) -> Element {
    let class = control_class("input select", props.error.is_some(), props.disabled);
    let placeholder = props
        .placeholder
        .clone()
        .unwrap_or_else(|| "Select...".to_string());
    let has_match = props.options.iter().any(|o| o.id.to_string() == props.value);

    rsx! {
        div {
            class: "input-group",

            FieldLabel { label: props.label.clone(), required: props.required }

            select {
                class: "{class}",
                disabled: props.disabled,
                onchange: move |e| props.on_change.call(e.value()),

                option {
                    value: "",
                    selected: !has_match,
                    "{placeholder}"
                }

                for option in &props.options {
                    option {
                        key: "{option.id}",
                        value: "{option.id}",
                        selected: props.value == option.id.to_string(),
                        "{option.label}"
                    }
                }
            }

            FieldError { error: props.error.clone() }
        }
    }
}

// ============================================================================
// Checkbox Component
// ============================================================================

#[derive(Props, Clone, PartialEq)]
pub struct CheckboxProps {
    pub checked: bool,

    #[props(default)]
    pub label: Option<String>,

    #[props(default = false)]
    pub disabled: bool,

    #[props(default)]
    pub on_change: EventHandler<bool>,
}

#[component]
pub fn Checkbox(props: CheckboxProps) -> Element {
    let class = if props.disabled {
        "checkbox-wrapper is-disabled"
    } else {
        "checkbox-wrapper"
    };

    rsx! {
        label {
            class: "{class}",

            input {
                r#type: "checkbox",
                checked: props.checked,
                disabled: props.disabled,
                onchange: move |_| {
                    if !props.disabled {
                        props.on_change.call(!props.checked);
                    }
                },
            }

            if let Some(label) = &props.label {
                span { class: "checkbox-label", "{label}" }
            }
        }
    }
}

// ============================================================================
// Shared pieces
// ============================================================================

#[component]
fn FieldLabel(label: Option<String>, required: bool) -> Element {
    let Some(label) = label else {
        return rsx! {};
    };

    rsx! {
        label {
            class: "field-label",
            "{label}"
            if required {
                span { class: "field-required", "*" }
            }
        }
    }
}

#[component]
fn FieldError(error: Option<String>) -> Element {
    match error {
        Some(error) => rsx! { p { class: "field-error", "{error}" } },
        None => rsx! {},
    }
}

/// Class list for a control in its error and disabled states
fn control_class(base: &str, has_error: bool, disabled: bool) -> String {
    let mut class = base.to_string();
    if has_error {
        class.push_str(" input-error");
    }
    if disabled {
        class.push_str(" is-disabled");
    }
    class
}
