//! Entity list controller
//!
//! Holds the records of one entity kind together with the search and page
//! state of the view, and derives the filtered, paginated slice on demand.
//! The visible rows are always a pure function of
//! `(records, search, building filter, page, page size)`.

use std::ops::RangeInclusive;

use backoffice_core::{ConsoleError, ConsoleResult, EntityKind, Notice, Record, RecordApi, RecordId};
use serde_json::Value;

use crate::toggle::StatusOutcome;

/// Field rooms are narrowed by when a building filter is set
pub const BUILDING_FIELD: &str = "buildingId";

/// Most page-number buttons offered at once
pub const PAGE_BUTTONS: usize = 9;

// ============================================================================
// Loading
// ============================================================================

/// Fetch every record of `kind`
///
/// Split from [`ListController::apply_load`] so the UI can run the request
/// without holding the controller across an await point.
pub async fn fetch_records<A: RecordApi>(api: &A, kind: EntityKind) -> ConsoleResult<Vec<Record>> {
    tracing::debug!("Loading {} list", kind.resource());
    let result = api.list(kind).await;
    match &result {
        Ok(records) => tracing::debug!("Loaded {} {} record(s)", records.len(), kind.resource()),
        Err(e) => tracing::warn!("Failed to load {} list: {}", kind.resource(), e),
    }
    result
}

// ============================================================================
// List Controller
// ============================================================================

/// Search, filter and pagination state for one entity list view
#[derive(Debug, Clone, PartialEq)]
pub struct ListController {
    kind: EntityKind,
    records: Vec<Record>,
    search: String,
    building: Option<RecordId>,
    page: usize,
    page_size: usize,
}

impl ListController {
    /// Create an empty controller on page 1
    ///
    /// A page size of zero is treated as one.
    pub fn new(kind: EntityKind, page_size: usize) -> Self {
        Self {
            kind,
            records: Vec::new(),
            search: String::new(),
            building: None,
            page: 1,
            page_size: page_size.max(1),
        }
    }

    /// Seed the controller with records (used by tests and the CLI)
    pub fn with_records(mut self, records: Vec<Record>) -> Self {
        self.records = records;
        self
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn building_filter(&self) -> Option<RecordId> {
        self.building
    }

    /// Find a loaded record by id
    pub fn record(&self, id: RecordId) -> Option<&Record> {
        self.records.iter().find(|r| r.id() == Some(id))
    }

    /// Issue the list request and apply its result
    pub async fn load<A: RecordApi>(&mut self, api: &A) -> Option<Notice> {
        let result = fetch_records(api, self.kind).await;
        self.apply_load(result)
    }

    /// Replace the collection with a load result
    ///
    /// A failure empties the collection and returns the notice to surface.
    pub fn apply_load(&mut self, result: ConsoleResult<Vec<Record>>) -> Option<Notice> {
        match result {
            Ok(records) => {
                self.records = records;
                self.clamp_page();
                None
            }
            Err(e) => {
                self.records.clear();
                self.page = 1;
                Some(Notice::error(format!(
                    "Failed to load {}: {}",
                    self.kind.plural_name().to_lowercase(),
                    e.user_message()
                )))
            }
        }
    }

    /// Change the search string; always returns to page 1
    pub fn set_search(&mut self, query: impl Into<String>) {
        self.search = query.into();
        self.page = 1;
    }

    /// Narrow the list to one building (rooms only); returns to page 1
    pub fn set_building_filter(&mut self, building: Option<RecordId>) {
        self.building = building;
        self.page = 1;
    }

    /// Records matching the search string and building filter, in API order
    ///
    /// The query is used as typed: whitespace is part of the substring.
    pub fn filtered(&self) -> Vec<&Record> {
        let query = self.search.to_lowercase();
        let fields = self.kind.search_fields();

        self.records
            .iter()
            .filter(|r| self.in_building(r))
            .filter(|r| matches_query(r, fields, &query))
            .collect()
    }

    /// Number of records after filtering
    pub fn filtered_len(&self) -> usize {
        self.filtered().len()
    }

    /// `max(1, ceil(n / page_size))`
    pub fn total_pages(&self) -> usize {
        self.filtered_len().div_ceil(self.page_size).max(1)
    }

    /// Rows on the current page
    pub fn visible(&self) -> Vec<&Record> {
        self.page_slice(self.page)
    }

    /// Rows on page `page` (1-based); empty when out of range
    pub fn page_slice(&self, page: usize) -> Vec<&Record> {
        if page == 0 {
            return Vec::new();
        }
        self.filtered()
            .into_iter()
            .skip((page - 1) * self.page_size)
            .take(self.page_size)
            .collect()
    }

    /// Page-number buttons to render
    ///
    /// Every page when there are at most [`PAGE_BUTTONS`], otherwise a
    /// window of that many centred on the current page and clamped to the
    /// ends.
    pub fn page_numbers(&self) -> RangeInclusive<usize> {
        let total_pages = self.total_pages();
        if total_pages <= PAGE_BUTTONS {
            return 1..=total_pages;
        }
        let start = self
            .page
            .saturating_sub(PAGE_BUTTONS / 2)
            .clamp(1, total_pages - PAGE_BUTTONS + 1);
        start..=start + PAGE_BUTTONS - 1
    }

    pub fn can_prev(&self) -> bool {
        self.page > 1
    }

    pub fn can_next(&self) -> bool {
        self.page < self.total_pages()
    }

    /// Jump to a page in `[1, total_pages]`
    pub fn go_to(&mut self, page: usize) -> ConsoleResult<()> {
        let total_pages = self.total_pages();
        if page == 0 || page > total_pages {
            return Err(ConsoleError::PageOutOfRange { page, total_pages });
        }
        self.page = page;
        Ok(())
    }

    pub fn next_page(&mut self) -> ConsoleResult<()> {
        self.go_to(self.page + 1)
    }

    pub fn prev_page(&mut self) -> ConsoleResult<()> {
        self.go_to(self.page.saturating_sub(1))
    }

    /// Apply the outcome of a status change request
    ///
    /// Success flips the target's `isActive` flag; failure leaves the
    /// collection untouched. Either way a notice is returned.
    pub fn apply(&mut self, outcome: &StatusOutcome) -> Notice {
        crate::toggle::reduce(&mut self.records, outcome)
    }

    fn in_building(&self, record: &Record) -> bool {
        match self.building {
            None => true,
            Some(id) => record.get(BUILDING_FIELD).and_then(RecordId::from_value) == Some(id),
        }
    }

    fn clamp_page(&mut self) {
        self.page = self.page.clamp(1, self.total_pages());
    }
}

/// Case-insensitive substring match over the given fields
///
/// `query` must already be lowercased. Absent and non-string fields never
/// match; an empty query matches everything.
pub fn matches_query(record: &Record, fields: &[&str], query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    fields.iter().any(|field| match record.get(field) {
        Some(Value::String(s)) => s.to_lowercase().contains(query),
        _ => false,
    })
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fake::{Call, FakeApi};
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use tokio_test::block_on;

    fn client(id: i64, name: &str, email: &str) -> Record {
        Record::new()
            .with("id", id)
            .with("name", name)
            .with("email", email)
            .with("isActive", true)
    }

    fn clients(n: i64) -> Vec<Record> {
        (1..=n)
            .map(|i| client(i, &format!("Client {}", i), &format!("c{}@example.com", i)))
            .collect()
    }

    fn ids(records: &[&Record]) -> Vec<i64> {
        records.iter().filter_map(|r| r.id()).map(|id| id.0).collect()
    }

    #[test]
    fn test_pages_reproduce_collection() {
        for n in [0, 1, 4, 5, 6, 10, 11, 23] {
            for page_size in [1, 3, 5, 7] {
                let list = ListController::new(EntityKind::Client, page_size)
                    .with_records(clients(n));

                let expected = ids(&list.filtered());
                let concatenated: Vec<i64> = (1..=list.total_pages())
                    .flat_map(|p| ids(&list.page_slice(p)))
                    .collect();

                assert_eq!(concatenated, expected, "n={} p={}", n, page_size);
            }
        }
    }

    #[test]
    fn test_total_pages_has_floor_of_one() {
        let list = ListController::new(EntityKind::Client, 5);
        assert_eq!(list.total_pages(), 1);
        assert!(list.visible().is_empty());
        assert!(!list.can_prev());
        assert!(!list.can_next());

        let list = ListController::new(EntityKind::Client, 5).with_records(clients(11));
        assert_eq!(list.total_pages(), 3);
    }

    #[test]
    fn test_page_numbers_window() {
        let mut list = ListController::new(EntityKind::Client, 1).with_records(clients(3));
        assert_eq!(list.page_numbers(), 1..=3);

        list = list.with_records(clients(20));
        assert_eq!(list.page_numbers(), 1..=9);
        assert!(!list.can_prev());

        list.go_to(10).unwrap();
        assert_eq!(list.page_numbers(), 6..=14);
        assert!(list.can_prev());
        assert!(list.can_next());

        list.go_to(20).unwrap();
        assert_eq!(list.page_numbers(), 12..=20);
        assert!(!list.can_next());
    }

    #[test]
    fn test_search_resets_page() {
        let mut list = ListController::new(EntityKind::Client, 5).with_records(clients(12));
        list.go_to(3).unwrap();
        assert_eq!(list.page(), 3);

        list.set_search("client");
        assert_eq!(list.page(), 1);

        list.go_to(2).unwrap();
        list.set_search("");
        assert_eq!(list.page(), 1);
    }

    #[test]
    fn test_search_is_case_insensitive_on_search_fields() {
        let list = ListController::new(EntityKind::Client, 5).with_records(vec![
            client(1, "Acme Hotels", "ops@acme.com"),
            client(2, "Blue Lagoon", "desk@lagoon.in"),
            client(3, "Coral Stay", "hello@ACME-partners.com"),
        ]);

        let mut list = list;
        list.set_search("ACME");
        assert_eq!(ids(&list.filtered()), vec![1, 3]);

        list.set_search("lagoon");
        assert_eq!(ids(&list.filtered()), vec![2]);
    }

    #[test]
    fn test_search_ignores_absent_and_non_string_fields() {
        let mut list = ListController::new(EntityKind::Client, 5).with_records(vec![
            Record::new().with("id", 1).with("name", json!(42)),
            Record::new().with("id", 2),
            client(3, "Forty Two Suites", "a@b.c"),
        ]);
        list.set_search("42");
        assert!(list.filtered().is_empty());

        list.set_search("forty");
        assert_eq!(ids(&list.filtered()), vec![3]);
    }

    #[test]
    fn test_whitespace_query_is_not_ignored() {
        let mut list = ListController::new(EntityKind::Client, 5).with_records(vec![
            client(1, "Acme Hotels", "ops@acme.com"),
            client(2, "Lagoon", "desk@lagoon.in"),
        ]);

        list.set_search(" ");
        assert_eq!(ids(&list.filtered()), vec![1]);

        list.set_search(" lagoon");
        assert!(list.filtered().is_empty());

        list.set_search("");
        assert_eq!(ids(&list.filtered()), vec![1, 2]);
    }

    #[test]
    fn test_search_nested_role_name() {
        let mut list = ListController::new(EntityKind::User, 5).with_records(vec![
            Record::new()
                .with("id", 1)
                .with("firstName", "Ravi")
                .with("role", json!({ "name": "Manager" })),
            Record::new()
                .with("id", 2)
                .with("firstName", "Meera")
                .with("role", json!({ "name": "Front Desk" })),
        ]);
        list.set_search("desk");
        assert_eq!(ids(&list.filtered()), vec![2]);
    }

    #[test]
    fn test_go_to_rejects_out_of_range() {
        let mut list = ListController::new(EntityKind::Client, 5).with_records(clients(7));
        assert!(matches!(
            list.go_to(0),
            Err(ConsoleError::PageOutOfRange { page: 0, total_pages: 2 })
        ));
        assert!(list.go_to(3).is_err());
        assert!(list.prev_page().is_err());

        list.next_page().unwrap();
        assert_eq!(list.page(), 2);
        assert!(!list.can_next());
        assert!(list.next_page().is_err());
        assert_eq!(ids(&list.visible()), vec![6, 7]);
    }

    #[test]
    fn test_building_filter() {
        let rooms = vec![
            Record::new().with("id", 1).with("name", "101").with("buildingId", 1),
            Record::new().with("id", 2).with("name", "102").with("buildingId", "2"),
            Record::new().with("id", 3).with("name", "201").with("buildingId", 2),
        ];
        let mut list = ListController::new(EntityKind::Room, 1).with_records(rooms);
        list.go_to(3).unwrap();

        list.set_building_filter(Some(RecordId(2)));
        assert_eq!(list.page(), 1);
        assert_eq!(ids(&list.filtered()), vec![2, 3]);

        list.set_search("20");
        assert_eq!(ids(&list.filtered()), vec![3]);
    }

    #[test]
    fn test_load_replaces_collection() {
        let api = FakeApi::new().with_records(EntityKind::Client, clients(3));
        let mut list = ListController::new(EntityKind::Client, 5).with_records(clients(9));

        let notice = block_on(list.load(&api));

        assert!(notice.is_none());
        assert_eq!(list.records().len(), 3);
        assert_eq!(api.calls(), vec![Call::List(EntityKind::Client)]);
    }

    #[test]
    fn test_load_failure_empties_collection() {
        let api = FakeApi::new().failing("list", ConsoleError::shape("missing records"));
        let mut list = ListController::new(EntityKind::BillingProfile, 5).with_records(clients(2));

        let notice = block_on(list.load(&api)).unwrap();

        assert!(notice.is_error());
        assert_eq!(
            notice.text,
            "Failed to load billing profiles: Received an unexpected response from the server."
        );
        assert!(list.records().is_empty());
        assert_eq!(list.total_pages(), 1);
    }

    #[test]
    fn test_reload_clamps_page() {
        let mut list = ListController::new(EntityKind::Client, 5).with_records(clients(12));
        list.go_to(3).unwrap();

        list.apply_load(Ok(clients(4)));
        assert_eq!(list.page(), 1);
    }
}
