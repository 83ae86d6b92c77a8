//! Login Page Component
//!
//! Credential entry. A successful login persists the session and opens
//! the dashboard; a rejected one shows "Invalid Credentials".

use dioxus::prelude::*;

use backoffice_api::ApiClient;
use backoffice_console::{sign_in, sign_in_failure};
use backoffice_core::{ConsoleConfig, ConsoleResult, Credentials, Notice, SessionContext};

use crate::components::TextInput;
use crate::state::{APP_STATE, notify};

/// Login form
#[component]
pub fn LoginPage() -> Element {
    let mut user_name = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut busy = use_signal(|| false);

    let mut submit = move || {
        if *busy.read() {
            return;
        }
        busy.set(true);
        let credentials = Credentials::new(user_name.read().trim(), password.read().clone());
        let config = APP_STATE.read().config.clone();

        spawn(async move {
            let result = attempt_login(&config, &credentials).await;
            busy.set(false);
            match result {
                Ok(session) => {
                    let installed = APP_STATE.write().signed_in(session);
                    match installed {
                        Ok(()) => {
                            password.set(String::new());
                            notify(Notice::success("Login successful"));
                        }
                        Err(e) => notify(Notice::error(e.user_message())),
                    }
                }
                Err(e) => notify(Notice::error(sign_in_failure(&e))),
            }
        });
    };

    let is_busy = *busy.read();
    let server = APP_STATE.read().config.base_url().to_string();

    rsx! {
        div {
            class: "login-page",

            div {
                class: "login-card",

                div {
                    class: "login-header",
                    span { class: "login-logo", "🏢" }
                    h1 { "Backoffice Console" }
                    p { class: "muted", "Sign in to manage clients, buildings and rooms" }
                }

                TextInput {
                    label: Some("Username".to_string()),
                    value: user_name.read().clone(),
                    placeholder: Some("Enter username".to_string()),
                    required: true,
                    disabled: is_busy,
                    on_change: move |v| user_name.set(v),
                    on_enter: move |_| submit(),
                }

                TextInput {
                    label: Some("Password".to_string()),
                    value: password.read().clone(),
                    input_type: "password".to_string(),
                    placeholder: Some("Enter password".to_string()),
                    required: true,
                    disabled: is_busy,
                    on_change: move |v| password.set(v),
                    on_enter: move |_| submit(),
                }

                button {
                    class: "btn btn-primary btn-block",
                    disabled: is_busy,
                    onclick: move |_| submit(),
                    if is_busy { "Signing in..." } else { "Login" }
                }

                p {
                    class: "muted small",
                    "Server: {server}"
                }
            }
        }
    }
}

async fn attempt_login(
    config: &ConsoleConfig,
    credentials: &Credentials,
) -> ConsoleResult<SessionContext> {
    let api = ApiClient::from_config(config)?;
    let store = config.session_store()?;
    sign_in(&api, &store, credentials).await
}
