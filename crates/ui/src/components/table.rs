//! Table pieces for the entity lists: pagination bar and status badge

use dioxus::prelude::*;

// ============================================================================
// Pagination
// ============================================================================

/// Previous / numbered pages / Next
///
/// Every value comes from the list controller; hidden when everything fits
/// on one page.
#[component]
pub fn Pagination(
    page: usize,
    numbers: Vec<usize>,
    can_prev: bool,
    can_next: bool,
    on_page: EventHandler<usize>,
) -> Element {
    if numbers.len() <= 1 {
        return rsx! {};
    }

    rsx! {
        nav {
            class: "pagination",

            button {
                class: "btn btn-secondary",
                disabled: !can_prev,
                onclick: move |_| on_page.call(page.saturating_sub(1)),
                "Previous"
            }

            for number in numbers {
                button {
                    key: "{number}",
                    class: if number == page { "btn btn-secondary active" } else { "btn btn-secondary" },
                    onclick: move |_| on_page.call(number),
                    "{number}"
                }
            }

            button {
                class: "btn btn-secondary",
                disabled: !can_next,
                onclick: move |_| on_page.call(page + 1),
                "Next"
            }
        }
    }
}

// ============================================================================
// Status Badge
// ============================================================================

/// Active / Inactive marker for a row
#[component]
pub fn StatusBadge(active: bool) -> Element {
    rsx! {
        span {
            class: if active { "badge badge-active" } else { "badge badge-inactive" },
            if active { "Active" } else { "Inactive" }
        }
    }
}
