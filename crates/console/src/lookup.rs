//! Dropdown option lists and id-to-name resolution

use std::collections::HashMap;

use backoffice_core::{ConsoleResult, EntityKind, Record, RecordApi, RecordId};

/// Room type codes and their names
pub const ROOM_TYPES: [(i64, &str); 4] = [(0, "Standard"), (1, "Deluxe"), (2, "Suite"), (3, "Executive")];

/// Name for a room type code
pub fn room_type_name(code: i64) -> &'static str {
    ROOM_TYPES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, name)| *name)
        .unwrap_or("Unknown")
}

// ============================================================================
// Lookup Sources
// ============================================================================

/// Where the options of a select field come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LookupSource {
    Cities,
    Roles,
    Buildings,
    /// Billing profiles with `isActive == true` only
    ActiveBillingProfiles,
    /// Fixed room type list; never fetched
    RoomTypes,
}

impl LookupSource {
    /// Entity list backing this source, when it is one of ours
    pub fn entity(&self) -> Option<EntityKind> {
        match self {
            LookupSource::Cities | LookupSource::RoomTypes => None,
            LookupSource::Roles => Some(EntityKind::Role),
            LookupSource::Buildings => Some(EntityKind::Building),
            LookupSource::ActiveBillingProfiles => Some(EntityKind::BillingProfile),
        }
    }
}

/// One entry of a select field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub id: RecordId,
    pub label: String,
}

/// Build options from fetched records
///
/// Records without an id are skipped. A missing `name` falls back to
/// `#<id>`.
pub fn options_from_records(source: LookupSource, records: &[Record]) -> Vec<SelectOption> {
    records
        .iter()
        .filter(|r| source != LookupSource::ActiveBillingProfiles || r.is_active() == Some(true))
        .filter_map(|r| {
            let id = r.id()?;
            let label = r
                .text("name")
                .map(str::to_string)
                .unwrap_or_else(|| format!("#{}", id));
            Some(SelectOption { id, label })
        })
        .collect()
}

/// Fetch and build the options for `source`
pub async fn load_options<A: RecordApi>(
    api: &A,
    source: LookupSource,
) -> ConsoleResult<Vec<SelectOption>> {
    let records = match source {
        LookupSource::RoomTypes => {
            return Ok(ROOM_TYPES
                .iter()
                .map(|(code, name)| SelectOption {
                    id: RecordId(*code),
                    label: name.to_string(),
                })
                .collect());
        }
        LookupSource::Cities => api.list_resource("City").await,
        other => match other.entity() {
            Some(kind) => api.list(kind).await,
            None => Ok(Vec::new()),
        },
    };

    match records {
        Ok(records) => Ok(options_from_records(source, &records)),
        Err(e) => {
            tracing::warn!("Failed to load {:?} options: {}", source, e);
            Err(e)
        }
    }
}

// ============================================================================
// Name Lookup
// ============================================================================

/// Resolves foreign-key ids to display names for table columns
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameLookup {
    names: HashMap<RecordId, String>,
}

impl NameLookup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Names of every record, active or not
    pub fn from_records(records: &[Record]) -> Self {
        Self {
            names: records
                .iter()
                .filter_map(|r| Some((r.id()?, r.text("name")?.to_string())))
                .collect(),
        }
    }

    /// Name for the id held in `record[field]`, if known
    pub fn resolve(&self, record: &Record, field: &str) -> Option<&str> {
        let id = record.get(field).and_then(RecordId::from_value)?;
        self.names.get(&id).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

// ============================================================================
// Tests
// ============================================================================
