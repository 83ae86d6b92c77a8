//! Toast notices shown in the top-right corner

use dioxus::prelude::*;

use backoffice_core::{Notice, NoticeLevel};

use crate::state::APP_STATE;

/// Stack of the currently visible notices
#[component]
pub fn NoticeStack() -> Element {
    let notices = APP_STATE.read().notices.clone();

    rsx! {
        div {
            class: "notice-stack",
            for notice in notices {
                NoticeToast { key: "{notice.id}", notice: notice.clone() }
            }
        }
    }
}

#[component]
fn NoticeToast(notice: Notice) -> Element {
    let id = notice.id;

    rsx! {
        div {
            class: "notice {level_class(notice.level)}",
            role: "status",
            span { class: "notice-icon", {level_icon(notice.level)} }
            span { class: "notice-text", "{notice.text}" }
            button {
                class: "notice-close",
                title: "Dismiss",
                onclick: move |_| APP_STATE.write().dismiss_notice(id),
                "✕"
            }
        }
    }
}

fn level_class(level: NoticeLevel) -> &'static str {
    match level {
        NoticeLevel::Info => "notice-info",
        NoticeLevel::Success => "notice-success",
        NoticeLevel::Warning => "notice-warning",
        NoticeLevel::Error => "notice-error",
    }
}

fn level_icon(level: NoticeLevel) -> &'static str {
    match level {
        NoticeLevel::Info => "ℹ",
        NoticeLevel::Success => "✓",
        NoticeLevel::Warning => "⚠",
        NoticeLevel::Error => "✕",
    }
}
