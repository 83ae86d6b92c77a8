//! Create/edit form flow
//!
//! A [`FormController`] holds the field schema and the current string values
//! of one form. [`submit`] validates, shapes the payload, sends exactly one
//! insert or update (plus the optional password change for users) and
//! reports where to navigate next. [`fetch_for_edit`] pre-populates edit
//! forms and redirects back to the list when the record is gone.

use std::collections::BTreeMap;
use std::time::Duration;

use serde_json::{Map, Value};

use backoffice_core::{
    ConsoleError, ConsoleResult, EntityKind, Notice, PasswordChange, Record, RecordApi, RecordId,
    SessionContext,
};

use crate::lookup::LookupSource;
use crate::route::Route;
use crate::validation::{self, ValidationReport};

// ============================================================================
// Field Schema
// ============================================================================

/// How a field is entered and checked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    TextArea,
    Email,
    Password,
    /// Six-digit postal code
    Pincode,
    /// GST identification number
    GstNumber,
    /// Whole number, at least one
    Occupancy,
    /// Numeric id picked from a lookup
    Select(LookupSource),
}

/// One input of a form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Payload key
    pub key: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

impl FieldSpec {
    const fn required(key: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            key,
            label,
            kind,
            required: true,
        }
    }

    const fn optional(key: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            key,
            label,
            kind,
            required: false,
        }
    }

    /// Whether the value is sent as a number
    pub fn is_numeric(&self) -> bool {
        matches!(self.kind, FieldKind::Occupancy | FieldKind::Select(_))
    }

    /// Check one value; `None` when it passes
    pub fn check(&self, raw: &str) -> Option<String> {
        let value = raw.trim();
        if value.is_empty() {
            return self.required.then(|| format!("{} is required", self.label));
        }

        match self.kind {
            FieldKind::Email if !validation::is_valid_email(value) => {
                Some("Enter a valid email address".to_string())
            }
            FieldKind::Pincode if !validation::is_valid_pincode(value) => {
                Some("Pincode must be 6 digits and cannot start with 0".to_string())
            }
            FieldKind::GstNumber if !validation::is_valid_gst(value) => {
                Some("Invalid GST Number format".to_string())
            }
            FieldKind::Occupancy if validation::parse_at_least(value, 1).is_none() => {
                Some("Occupancy must be at least 1".to_string())
            }
            FieldKind::Select(_) if validation::parse_id(value).is_none() => {
                Some(format!("Select a valid {}", self.label.to_lowercase()))
            }
            _ => None,
        }
    }
}

/// Whether a form creates a record or edits an existing one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(RecordId),
}

impl FormMode {
    pub fn is_edit(&self) -> bool {
        matches!(self, FormMode::Edit(_))
    }
}

use FieldKind::*;

const CLIENT_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("name", "Name", Text),
    FieldSpec::required("email", "Email", Email),
    FieldSpec::required("primaryContact", "Primary Contact", Text),
    FieldSpec::optional("secondaryContact", "Secondary Contact", Text),
];

const USER_CREATE_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("username", "Username", Text),
    FieldSpec::required("email", "Email", Email),
    FieldSpec::required("firstName", "First Name", Text),
    FieldSpec::required("lastName", "Last Name", Text),
    FieldSpec::required("password", "Password", Password),
    FieldSpec::required("roleId", "Role", Select(LookupSource::Roles)),
];

const USER_EDIT_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("username", "Username", Text),
    FieldSpec::required("email", "Email", Email),
    FieldSpec::required("firstName", "First Name", Text),
    FieldSpec::required("lastName", "Last Name", Text),
    FieldSpec::required("roleId", "Role", Select(LookupSource::Roles)),
];

const ROLE_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("name", "Name", Text),
    FieldSpec::optional("description", "Description", TextArea),
];

const BILLING_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("name", "Name", Text),
    FieldSpec::required("address1", "Address Line 1", Text),
    FieldSpec::optional("address2", "Address Line 2", Text),
    FieldSpec::required("cityId", "City", Select(LookupSource::Cities)),
    FieldSpec::required("pincode", "Pincode", Pincode),
    FieldSpec::required("gstNumber", "GST Number", GstNumber),
];

const BUILDING_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("name", "Building Name", Text),
    FieldSpec::required(
        "billingProfileId",
        "Billing Profile",
        Select(LookupSource::ActiveBillingProfiles),
    ),
    FieldSpec::optional("remarks", "Remarks", TextArea),
];

const ROOM_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("name", "Room Name", Text),
    FieldSpec::required("roomType", "Room Type", Select(LookupSource::RoomTypes)),
    FieldSpec::required("maxOccupancy", "Max Occupancy", Occupancy),
    FieldSpec::required("buildingId", "Building", Select(LookupSource::Buildings)),
    FieldSpec::optional(
        "billingProfileId",
        "Billing Profile",
        Select(LookupSource::ActiveBillingProfiles),
    ),
    FieldSpec::optional("remarks", "Remarks", TextArea),
];

/// Field schema for an entity form
pub fn form_fields(kind: EntityKind, mode: FormMode) -> &'static [FieldSpec] {
    match (kind, mode) {
        (EntityKind::Client, _) => CLIENT_FIELDS,
        (EntityKind::User, FormMode::Create) => USER_CREATE_FIELDS,
        (EntityKind::User, FormMode::Edit(_)) => USER_EDIT_FIELDS,
        (EntityKind::Role, _) => ROLE_FIELDS,
        (EntityKind::BillingProfile, _) => BILLING_FIELDS,
        (EntityKind::Building, _) => BUILDING_FIELDS,
        (EntityKind::Room, _) => ROOM_FIELDS,
    }
}

// ============================================================================
// Form Values
// ============================================================================

/// Current string value of every input, keyed by payload key
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValues(BTreeMap<String, String>);

impl FormValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Value of `key`, or `""` when unset
    pub fn get(&self, key: &str) -> &str {
        self.0.get(key).map(String::as_str).unwrap_or("")
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    /// Pre-fill from a fetched record
    ///
    /// Password fields are never pre-filled.
    pub fn from_record(fields: &[FieldSpec], record: &Record) -> Self {
        let mut values = Self::new();
        for field in fields.iter().filter(|f| f.kind != FieldKind::Password) {
            let text = match record.get(field.key) {
                Some(Value::String(s)) => s.clone(),
                Some(Value::Number(n)) => n.to_string(),
                Some(Value::Bool(b)) => b.to_string(),
                _ => String::new(),
            };
            values.set(field.key, text);
        }
        values
    }
}

// ============================================================================
// Password Sub-form
// ============================================================================

/// Optional password change on the user edit form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PasswordChangeForm {
    /// Sub-form toggle; fields are ignored while off
    pub enabled: bool,
    pub old_password: String,
    pub new_password: String,
}

impl PasswordChangeForm {
    /// Both passwords become required only while enabled
    pub fn validate(&self) -> ValidationReport {
        let mut report = ValidationReport::ok();
        if !self.enabled {
            return report;
        }
        if self.old_password.is_empty() {
            report.add("oldPassword", "Old password is required");
        }
        if self.new_password.is_empty() {
            report.add("newPassword", "New password is required");
        }
        report
    }

    /// Request body, when the sub-form is on
    pub fn request(&self, user_id: RecordId) -> Option<PasswordChange> {
        self.enabled.then(|| PasswordChange {
            user_id,
            old_password: self.old_password.clone(),
            new_password: self.new_password.clone(),
        })
    }
}

// ============================================================================
// Form Controller
// ============================================================================

/// State of one create or edit form
#[derive(Debug, Clone, PartialEq)]
pub struct FormController {
    kind: EntityKind,
    mode: FormMode,
    values: FormValues,
    original: Option<Record>,
    password: PasswordChangeForm,
    errors: ValidationReport,
    return_to: Route,
}

impl FormController {
    pub fn new(kind: EntityKind, mode: FormMode) -> Self {
        Self {
            kind,
            mode,
            values: FormValues::new(),
            original: None,
            password: PasswordChangeForm::default(),
            errors: ValidationReport::ok(),
            return_to: Route::List(kind),
        }
    }

    /// Form for a create or edit route
    pub fn for_route(route: Route) -> Option<Self> {
        match route {
            Route::Create(kind) => Some(Self::new(kind, FormMode::Create)),
            Route::Edit(kind, id) => Some(Self::new(kind, FormMode::Edit(id))),
            Route::CreateRoomInBuilding(building) => {
                let mut form = Self::new(EntityKind::Room, FormMode::Create);
                form.values.set("buildingId", building.to_string());
                form.return_to = Route::RoomsInBuilding(building);
                Some(form)
            }
            _ => None,
        }
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn fields(&self) -> &'static [FieldSpec] {
        form_fields(self.kind, self.mode)
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    pub fn errors(&self) -> &ValidationReport {
        &self.errors
    }

    pub fn password(&self) -> &PasswordChangeForm {
        &self.password
    }

    /// Route to open after a successful save
    pub fn return_to(&self) -> Route {
        self.return_to
    }

    /// Whether the password sub-form is offered (user edit only)
    pub fn offers_password_change(&self) -> bool {
        self.kind == EntityKind::User && self.mode.is_edit()
    }

    /// Update one input and clear its error
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        self.values.set(key, value);
        self.errors.errors.retain(|e| e.field != key);
    }

    pub fn set_password_enabled(&mut self, enabled: bool) {
        self.password.enabled = enabled && self.offers_password_change();
        if !self.password.enabled {
            self.errors
                .errors
                .retain(|e| e.field != "oldPassword" && e.field != "newPassword");
        }
    }

    pub fn set_old_password(&mut self, value: impl Into<String>) {
        self.password.old_password = value.into();
        self.errors.errors.retain(|e| e.field != "oldPassword");
    }

    pub fn set_new_password(&mut self, value: impl Into<String>) {
        self.password.new_password = value.into();
        self.errors.errors.retain(|e| e.field != "newPassword");
    }

    /// Pre-fill every field from the fetched record
    pub fn prefill(&mut self, record: Record) {
        self.values = FormValues::from_record(self.fields(), &record);
        self.original = Some(record);
    }

    /// Replace the shown field errors
    pub fn set_errors(&mut self, report: ValidationReport) {
        self.errors = report;
    }

    /// Check every field and the password sub-form
    pub fn validate(&self) -> ValidationReport {
        let mut report = ValidationReport::ok();
        for field in self.fields() {
            if let Some(message) = field.check(self.values.get(field.key)) {
                report.add(field.key, message);
            }
        }
        report.merge(self.password.validate());
        report
    }

    /// Build the request body
    ///
    /// Numeric fields are coerced; a blank optional id becomes `null`. The
    /// tenant id always comes from `session`. Edit payloads carry the record
    /// id and keep the record's current `isActive` flag.
    pub fn payload(&self, session: &SessionContext) -> ConsoleResult<Value> {
        let mut body = Map::new();
        if let FormMode::Edit(id) = self.mode {
            body.insert("id".to_string(), Value::from(id.0));
        }

        for field in self.fields() {
            let raw = self.values.get(field.key);
            let value = if field.kind == FieldKind::Password {
                Value::from(raw)
            } else if field.is_numeric() {
                let trimmed = raw.trim();
                if trimmed.is_empty() {
                    Value::Null
                } else {
                    let n: i64 = trimmed.parse().map_err(|_| {
                        ConsoleError::field(field.key, format!("{} must be a number", field.label))
                    })?;
                    Value::from(n)
                }
            } else {
                Value::from(raw.trim())
            };
            body.insert(field.key.to_string(), value);
        }

        if self.kind.is_tenant_scoped() {
            body.insert("clientId".to_string(), Value::from(session.client_id));
        }

        if let Some(active) = self.original.as_ref().and_then(Record::is_active) {
            body.insert("isActive".to_string(), Value::Bool(active));
        }

        Ok(Value::Object(body))
    }
}

// ============================================================================
// Flows
// ============================================================================

/// Result of loading an edit form
#[derive(Debug, Clone, PartialEq)]
pub enum PrefillOutcome {
    /// Render the form with these values
    Loaded(Record),
    /// Do not render; show the notice and go back to the list
    Missing { notice: Notice, redirect: Route },
}

/// Fetch the record an edit form works on
pub async fn fetch_for_edit<A: RecordApi>(api: &A, kind: EntityKind, id: RecordId) -> PrefillOutcome {
    let entity = kind.display_name();
    let notice = match api.get_by_id(kind, id).await {
        Ok(Some(record)) => return PrefillOutcome::Loaded(record),
        Ok(None) => {
            tracing::warn!("{} #{} not found", kind.resource(), id);
            Notice::error(format!("{} not found", entity))
        }
        Err(e) if e.is_not_found() => {
            tracing::warn!("{} #{} not found: {}", kind.resource(), id, e);
            Notice::error(format!("{} not found", entity))
        }
        Err(e) => {
            tracing::error!("Failed to load {} #{}: {}", kind.resource(), id, e);
            Notice::error(format!(
                "Error loading {} data: {}",
                entity.to_lowercase(),
                e.user_message()
            ))
        }
    };
    PrefillOutcome::Missing {
        notice,
        redirect: Route::List(kind),
    }
}

/// Result of submitting a form
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Client-side validation failed; nothing was sent
    Invalid(ValidationReport),
    /// Saved; show the notice, then navigate after `delay`
    Saved {
        notice: Notice,
        redirect: Route,
        delay: Duration,
    },
    /// The collaborator rejected the request; stay on the form
    Failed(Notice),
}

/// Validate, shape and send a form
pub async fn submit<A: RecordApi>(
    api: &A,
    session: &SessionContext,
    form: &FormController,
    delay: Duration,
) -> SubmitOutcome {
    let report = form.validate();
    if !report.is_valid() {
        return SubmitOutcome::Invalid(report);
    }

    let payload = match form.payload(session) {
        Ok(payload) => payload,
        Err(ConsoleError::FieldValidation { field, message }) => {
            let mut report = ValidationReport::ok();
            report.add(field, message);
            return SubmitOutcome::Invalid(report);
        }
        Err(e) => return SubmitOutcome::Failed(Notice::error(e.user_message())),
    };

    let kind = form.kind;
    let entity = kind.display_name();
    let (result, verb) = match form.mode {
        FormMode::Create => {
            tracing::debug!("Inserting {}", kind.resource());
            (api.insert(kind, &payload).await, "adding")
        }
        FormMode::Edit(id) => {
            tracing::debug!("Updating {} #{}", kind.resource(), id);
            (api.update(kind, &payload).await, "updating")
        }
    };

    if let Err(e) = result {
        tracing::error!("Saving {} failed: {}", kind.resource(), e);
        return SubmitOutcome::Failed(Notice::error(failure_text(
            &e,
            &format!("Error {} {}", verb, entity.to_lowercase()),
        )));
    }

    let mut message = match form.mode {
        FormMode::Create => format!("{} added successfully", entity),
        FormMode::Edit(_) => format!("{} updated successfully", entity),
    };

    if let FormMode::Edit(id) = form.mode {
        if let Some(request) = form.password.request(id) {
            if let Err(e) = api.change_password(&request).await {
                tracing::error!("Password change for user #{} failed: {}", id, e);
                return SubmitOutcome::Failed(Notice::error(format!(
                    "{} updated, but the password change failed: {}",
                    entity,
                    failure_text(&e, "please try again")
                )));
            }
            message = format!("{} and password updated successfully", entity);
        }
    }

    SubmitOutcome::Saved {
        notice: Notice::success(message),
        redirect: form.return_to,
        delay,
    }
}

/// Message from the collaborator's error body, else `fallback`
fn failure_text(err: &ConsoleError, fallback: &str) -> String {
    match err {
        ConsoleError::Api { message, .. } if !message.is_empty() => format!("Error: {}", message),
        _ => fallback.to_string(),
    }
}

// ============================================================================
// Tests
// ============================================================================
