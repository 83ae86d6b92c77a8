//! Entity List Page Component
//!
//! One page for every entity kind: search box, paginated table, per-row
//! edit and status actions, and the status confirmation dialog. Rooms also
//! get a building filter and resolved building and billing profile names.

use dioxus::prelude::*;

use backoffice_console::{
    ListController, LookupSource, NameLookup, Route, SelectOption, StatusToggle, confirm_prompt,
    fetch_records, options_from_records, room_type_name, send_status_change,
};
use backoffice_core::{EntityKind, Notice, Record, RecordId};

use crate::components::{ConfirmDialog, Pagination, Select, StatusBadge, TextInput};
use crate::state::{Ctx, go, notify};

// ============================================================================
// Columns
// ============================================================================

/// What a table cell shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    /// Value at a (dotted) record path
    Field(&'static str),
    /// Room type code rendered by name
    RoomType,
    /// Building name looked up from `buildingId`
    Building,
    /// Billing profile name looked up from `billingProfileId`
    BillingProfile,
}

/// One table column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub header: &'static str,
    pub cell: Cell,
}

const fn col(header: &'static str, cell: Cell) -> Column {
    Column { header, cell }
}

/// Columns of the list table for `kind`
pub fn columns(kind: EntityKind) -> &'static [Column] {
    use Cell::*;

    match kind {
        EntityKind::Client => const {
            &[
                col("Name", Field("name")),
                col("Email", Field("email")),
                col("Primary Contact", Field("primaryContact")),
            ]
        },
        EntityKind::User => const {
            &[
                col("First Name", Field("firstName")),
                col("Last Name", Field("lastName")),
                col("Email", Field("email")),
                col("Role", Field("role.name")),
            ]
        },
        EntityKind::Role => const {
            &[
                col("Id", Field("id")),
                col("Name", Field("name")),
                col("Description", Field("description")),
                col("Created Date", Field("createdDate")),
            ]
        },
        EntityKind::BillingProfile => const {
            &[
                col("Name", Field("name")),
                col("GST Number", Field("gstNumber")),
            ]
        },
        EntityKind::Building => const {
            &[
                col("Name", Field("name")),
                col("Billing Profile", Field("billingProfile.name")),
            ]
        },
        EntityKind::Room => const {
            &[
                col("Room Name", Field("name")),
                col("Room Type", RoomType),
                col("Building", Building),
                col("Billing Profile", BillingProfile),
                col("Max Occupancy", Field("maxOccupancy")),
            ]
        },
    }
}

/// Names used by room rows
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Lookups {
    pub buildings: NameLookup,
    pub billing_profiles: NameLookup,
}

/// Text of one cell
pub fn cell_text(record: &Record, cell: Cell, lookups: &Lookups) -> String {
    let resolved = match cell {
        Cell::Field(path) => return record.display(path),
        Cell::RoomType => {
            return record
                .get("roomType")
                .and_then(|v| v.as_i64().or_else(|| v.as_str()?.trim().parse().ok()))
                .map(room_type_name)
                .unwrap_or("Unknown")
                .to_string();
        }
        Cell::Building => lookups.buildings.resolve(record, "buildingId"),
        Cell::BillingProfile => lookups.billing_profiles.resolve(record, "billingProfileId"),
    };
    resolved.unwrap_or("N/A").to_string()
}

// ============================================================================
// Page Component
// ============================================================================

/// Searchable, paginated list of one entity kind
#[component]
pub fn EntityListPage(ctx: Ctx, kind: EntityKind, building: Option<RecordId>) -> Element {
    let page_size = ctx.page_size();
    let mut list = use_signal(move || {
        let mut controller = ListController::new(kind, page_size);
        controller.set_building_filter(building);
        controller
    });
    let mut loading = use_signal(|| true);
    let mut toggle = use_signal(StatusToggle::new);
    let mut in_flight = use_signal(|| None::<RecordId>);
    let mut lookups = use_signal(Lookups::default);
    let mut building_options = use_signal(Vec::<SelectOption>::new);

    // Initial load
    let load_ctx = ctx.clone();
    use_future(move || {
        let ctx = load_ctx.clone();
        async move {
            let result = fetch_records(&ctx.api, kind).await;
            let notice = list.write().apply_load(result);
            loading.set(false);
            if let Some(notice) = notice {
                notify(notice);
            }

            if kind == EntityKind::Room {
                match fetch_records(&ctx.api, EntityKind::Building).await {
                    Ok(records) => {
                        building_options.set(options_from_records(LookupSource::Buildings, &records));
                        lookups.write().buildings = NameLookup::from_records(&records);
                    }
                    Err(e) => tracing::warn!("Building names unavailable: {}", e),
                }
                match fetch_records(&ctx.api, EntityKind::BillingProfile).await {
                    Ok(records) => lookups.write().billing_profiles = NameLookup::from_records(&records),
                    Err(e) => tracing::warn!("Billing profile names unavailable: {}", e),
                }
            }
        }
    });

    // Confirmed status change
    let confirm_ctx = ctx.clone();
    let on_confirm = move |_: ()| {
        let Ok(id) = toggle.write().confirm() else {
            return;
        };
        in_flight.set(Some(id));
        let ctx = confirm_ctx.clone();
        spawn(async move {
            let outcome = send_status_change(&ctx.api, kind, id).await;
            let notice = list.write().apply(&outcome);
            in_flight.set(None);
            notify(notice);
        });
    };

    // Snapshot for rendering
    let controller = list.read();
    let rows: Vec<(String, Record)> = controller
        .visible()
        .into_iter()
        .enumerate()
        .map(|(i, r)| (row_key(r, i), r.clone()))
        .collect();
    let page = controller.page();
    let page_numbers: Vec<usize> = controller.page_numbers().collect();
    let can_prev = controller.can_prev();
    let can_next = controller.can_next();
    let matched = controller.filtered_len();
    let search = controller.search().to_string();
    let building_filter = controller.building_filter();
    let dialog_target = toggle.read().pending().or(*in_flight.read());
    let dialog_record = dialog_target.and_then(|id| controller.record(id).cloned());
    drop(controller);

    let busy = in_flight.read().is_some();
    let is_loading = *loading.read();
    let cols = columns(kind);
    let col_count = cols.len() + 2;
    let names = lookups.read().clone();
    let add_route = match building_filter {
        Some(b) if kind == EntityKind::Room => Route::CreateRoomInBuilding(b),
        _ => Route::Create(kind),
    };
    let title = kind.plural_name();
    let add_label = format!("Add {}", kind.display_name());
    let empty_text = format!("No {} found", title.to_lowercase());
    let filter_value = building_filter.map(|b| b.to_string()).unwrap_or_default();

    rsx! {
        div {
            class: "page",

            // Header
            div {
                class: "page-header row",
                h2 { "{title}" }
                div { class: "flex-1" }
                button {
                    class: "btn btn-primary",
                    onclick: move |_| go(add_route),
                    "{add_label}"
                }
            }

            // Filters
            div {
                class: "toolbar-row",
                div {
                    class: "grow",
                    TextInput {
                        value: search,
                        placeholder: Some(format!("Search {}...", title.to_lowercase())),
                        on_change: move |q: String| list.write().set_search(q),
                    }
                }
                if kind == EntityKind::Room {
                    div {
                        class: "filter",
                        Select {
                            value: filter_value,
                            options: building_options.read().clone(),
                            placeholder: Some("All buildings".to_string()),
                            on_change: move |v: String| {
                                list.write().set_building_filter(v.parse::<RecordId>().ok());
                            },
                        }
                    }
                }
            }

            // Table
            table {
                class: "table",
                thead {
                    tr {
                        for column in cols {
                            th { key: "{column.header}", "{column.header}" }
                        }
                        th { "Status" }
                        th { "Actions" }
                    }
                }
                tbody {
                    if is_loading {
                        tr {
                            td { colspan: "{col_count}", class: "center muted", "Loading..." }
                        }
                    } else if rows.is_empty() {
                        tr {
                            td { colspan: "{col_count}", class: "center muted", "{empty_text}" }
                        }
                    } else {
                        for (row_key, record) in rows {
                            RecordRow {
                                key: "{row_key}",
                                kind,
                                record,
                                lookups: names.clone(),
                                busy,
                                on_toggle: move |id: RecordId| {
                                    if let Err(e) = toggle.write().request(id) {
                                        notify(Notice::error(e.user_message()));
                                    }
                                },
                            }
                        }
                    }
                }
            }

            div {
                class: "table-footer",
                span { class: "muted small", "{matched} record(s)" }
                Pagination {
                    page,
                    numbers: page_numbers,
                    can_prev,
                    can_next,
                    on_page: move |p: usize| {
                        if let Err(e) = list.write().go_to(p) {
                            tracing::debug!("Ignored page change: {}", e);
                        }
                    },
                }
            }

            // Confirmation dialog
            if dialog_target.is_some() {
                ConfirmDialog {
                    message: confirm_prompt(kind, dialog_record.as_ref()),
                    item_name: dialog_record.as_ref().and_then(|r| r.text("name")).map(str::to_string),
                    busy,
                    on_confirm: on_confirm,
                    on_cancel: move |_| {
                        toggle.write().cancel();
                    },
                }
            }
        }
    }
}

// ============================================================================
// Row Component
// ============================================================================

fn row_key(record: &Record, index: usize) -> String {
    record
        .id()
        .map(|id| id.to_string())
        .unwrap_or_else(|| format!("row-{}", index))
}

#[component]
fn RecordRow(
    kind: EntityKind,
    record: Record,
    lookups: Lookups,
    busy: bool,
    on_toggle: EventHandler<RecordId>,
) -> Element {
    let id = record.id();
    let active = record.is_active().unwrap_or(true);
    let cells: Vec<String> = columns(kind)
        .iter()
        .map(|c| cell_text(&record, c.cell, &lookups))
        .collect();

    rsx! {
        tr {
            for (i, text) in cells.into_iter().enumerate() {
                td { key: "{i}", "{text}" }
            }
            td { StatusBadge { active } }
            td {
                class: "actions",
                if let Some(id) = id {
                    if kind == EntityKind::Building {
                        button {
                            class: "btn btn-secondary btn-small",
                            onclick: move |_| go(Route::RoomsInBuilding(id)),
                            "Rooms"
                        }
                    }
                    button {
                        class: "btn btn-info btn-small",
                        onclick: move |_| go(Route::Edit(kind, id)),
                        "Edit"
                    }
                    button {
                        class: if active { "btn btn-warning btn-small" } else { "btn btn-success btn-small" },
                        disabled: busy,
                        onclick: move |_| on_toggle.call(id),
                        if active { "Deactivate" } else { "Activate" }
                    }
                }
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
