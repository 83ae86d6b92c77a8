//! Status toggle flow
//!
//! `Idle -> ConfirmPending(id) -> Idle` with the request outcome applied to
//! the collection by [`reduce`]. Only one confirmation may be pending.

use backoffice_core::{ConsoleError, ConsoleResult, EntityKind, Notice, Record, RecordApi, RecordId};

// ============================================================================
// Outcome and Reducer
// ============================================================================

/// Result of one `ChangeStatus` request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusOutcome {
    /// The collaborator accepted the change
    Succeeded(RecordId),
    /// The request failed; `message` is ready to show
    Failed { id: RecordId, message: String },
}

impl StatusOutcome {
    pub fn id(&self) -> RecordId {
        match self {
            StatusOutcome::Succeeded(id) | StatusOutcome::Failed { id, .. } => *id,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, StatusOutcome::Succeeded(_))
    }
}

/// Apply a status outcome to a collection
///
/// On success the target's `isActive` flag becomes its negation (a missing
/// flag is treated as active). On failure nothing changes.
pub fn reduce(records: &mut [Record], outcome: &StatusOutcome) -> Notice {
    match outcome {
        StatusOutcome::Succeeded(id) => {
            if let Some(record) = records.iter_mut().find(|r| r.id() == Some(*id)) {
                let active = record.is_active().unwrap_or(true);
                record.set_active(!active);
            }
            Notice::success("Status updated successfully")
        }
        StatusOutcome::Failed { message, .. } => Notice::error(message.clone()),
    }
}

/// Send one status change request and classify the result
pub async fn send_status_change<A: RecordApi>(
    api: &A,
    kind: EntityKind,
    id: RecordId,
) -> StatusOutcome {
    tracing::debug!("Changing status of {} #{}", kind.resource(), id);
    match api.change_status(kind, id).await {
        Ok(()) => StatusOutcome::Succeeded(id),
        Err(e) => {
            tracing::error!("Status change for {} #{} failed: {}", kind.resource(), id, e);
            StatusOutcome::Failed {
                id,
                message: format!("Failed to update status: {}", e.user_message()),
            }
        }
    }
}

// ============================================================================
// Confirmation State
// ============================================================================

/// Confirmation gate in front of a status change
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusToggle {
    pending: Option<RecordId>,
}

impl StatusToggle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record currently awaiting confirmation
    pub fn pending(&self) -> Option<RecordId> {
        self.pending
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Ask for confirmation to toggle `id`
    ///
    /// Re-requesting the already pending record is a no-op.
    pub fn request(&mut self, id: RecordId) -> ConsoleResult<()> {
        match self.pending {
            Some(current) if current != id => Err(ConsoleError::ConfirmationPending(current)),
            _ => {
                self.pending = Some(id);
                Ok(())
            }
        }
    }

    /// Discard the pending target without sending anything
    pub fn cancel(&mut self) -> Option<RecordId> {
        self.pending.take()
    }

    /// Take the confirmed target, returning to idle
    pub fn confirm(&mut self) -> ConsoleResult<RecordId> {
        self.pending.take().ok_or(ConsoleError::NothingPending)
    }

    /// Confirm and send the request in one step
    pub async fn confirm_and_send<A: RecordApi>(
        &mut self,
        api: &A,
        kind: EntityKind,
    ) -> ConsoleResult<StatusOutcome> {
        let id = self.confirm()?;
        Ok(send_status_change(api, kind, id).await)
    }
}

/// Question shown in the confirmation dialog
pub fn confirm_prompt(kind: EntityKind, record: Option<&Record>) -> String {
    let action = match record.and_then(Record::is_active) {
        Some(false) => "activate",
        _ => "deactivate",
    };
    format!(
        "Are you sure you want to {} this {}?",
        action,
        kind.display_name().to_lowercase()
    )
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fake::{Call, FakeApi};
    use crate::list::ListController;
    use tokio_test::block_on;

    fn rooms() -> Vec<Record> {
        vec![
            Record::new().with("id", 1).with("name", "101").with("isActive", true),
            Record::new().with("id", 2).with("name", "102").with("isActive", false),
        ]
    }

    #[test]
    fn test_confirm_flips_flag_both_ways() {
        let api = FakeApi::new();
        let mut list = ListController::new(EntityKind::Room, 5).with_records(rooms());
        let mut toggle = StatusToggle::new();

        for id in [1, 2] {
            toggle.request(RecordId(id)).unwrap();
            let outcome = block_on(toggle.confirm_and_send(&api, EntityKind::Room)).unwrap();
            let notice = list.apply(&outcome);
            assert!(!notice.is_error());
        }

        assert_eq!(list.record(RecordId(1)).unwrap().is_active(), Some(false));
        assert_eq!(list.record(RecordId(2)).unwrap().is_active(), Some(true));
        assert_eq!(
            api.calls(),
            vec![
                Call::ChangeStatus(EntityKind::Room, RecordId(1)),
                Call::ChangeStatus(EntityKind::Room, RecordId(2)),
            ]
        );
        assert!(!toggle.is_pending());
    }

    #[test]
    fn test_cancel_sends_nothing() {
        let api = FakeApi::new();
        let list = ListController::new(EntityKind::Client, 5).with_records(rooms());
        let mut toggle = StatusToggle::new();

        toggle.request(RecordId(1)).unwrap();
        assert_eq!(toggle.cancel(), Some(RecordId(1)));

        assert!(api.calls().is_empty());
        assert_eq!(list.record(RecordId(1)).unwrap().is_active(), Some(true));
        assert!(matches!(toggle.confirm(), Err(ConsoleError::NothingPending)));
    }

    #[test]
    fn test_only_one_pending() {
        let mut toggle = StatusToggle::new();
        toggle.request(RecordId(1)).unwrap();
        toggle.request(RecordId(1)).unwrap();

        assert!(matches!(
            toggle.request(RecordId(2)),
            Err(ConsoleError::ConfirmationPending(RecordId(1)))
        ));
        assert_eq!(toggle.pending(), Some(RecordId(1)));
    }

    #[test]
    fn test_failure_leaves_collection_untouched() {
        let api = FakeApi::new().failing("change_status", ConsoleError::api(500, "Room is occupied"));
        let mut list = ListController::new(EntityKind::Room, 5).with_records(rooms());
        let mut toggle = StatusToggle::new();

        toggle.request(RecordId(1)).unwrap();
        let outcome = block_on(toggle.confirm_and_send(&api, EntityKind::Room)).unwrap();
        assert!(!outcome.is_success());

        let before = list.records().to_vec();
        let notice = list.apply(&outcome);

        assert!(notice.is_error());
        assert_eq!(notice.text, "Failed to update status: Room is occupied");
        assert_eq!(list.records(), before.as_slice());
        assert!(!toggle.is_pending());
    }

    #[test]
    fn test_reduce_unknown_id_is_noop() {
        let mut records = rooms();
        let before = records.clone();
        reduce(&mut records, &StatusOutcome::Succeeded(RecordId(99)));
        assert_eq!(records, before);
    }

    #[test]
    fn test_confirm_prompt() {
        let records = rooms();
        assert_eq!(
            confirm_prompt(EntityKind::Room, records.first()),
            "Are you sure you want to deactivate this room?"
        );
        assert_eq!(
            confirm_prompt(EntityKind::BillingProfile, records.get(1)),
            "Are you sure you want to activate this billing profile?"
        );
    }
}
