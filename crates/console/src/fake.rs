//! In-memory [`RecordApi`] used by the flow tests

use std::cell::RefCell;
use std::collections::HashMap;

use serde_json::Value;

use backoffice_core::{
    AuthApi, ConsoleError, ConsoleResult, Credentials, EntityKind, PasswordChange, Record,
    RecordApi, RecordId, SessionContext,
};

/// A request the fake received
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    List(EntityKind),
    GetById(EntityKind, RecordId),
    Insert(EntityKind, Value),
    Update(EntityKind, Value),
    ChangeStatus(EntityKind, RecordId),
    ChangePassword(PasswordChange),
    ListResource(String),
    Login(String),
}

#[derive(Default)]
pub struct FakeApi {
    records: RefCell<HashMap<EntityKind, Vec<Record>>>,
    resources: RefCell<HashMap<String, Vec<Record>>>,
    login: RefCell<Option<SessionContext>>,
    failures: RefCell<HashMap<&'static str, ConsoleError>>,
    calls: RefCell<Vec<Call>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(self, kind: EntityKind, records: Vec<Record>) -> Self {
        self.records.borrow_mut().insert(kind, records);
        self
    }

    pub fn with_resource(self, resource: &str, records: Vec<Record>) -> Self {
        self.resources
            .borrow_mut()
            .insert(resource.to_string(), records);
        self
    }

    pub fn with_login(self, session: SessionContext) -> Self {
        *self.login.borrow_mut() = Some(session);
        self
    }

    /// Make the named operation fail once with `error`
    pub fn failing(self, operation: &'static str, error: ConsoleError) -> Self {
        self.failures.borrow_mut().insert(operation, error);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    fn record(&self, call: Call, operation: &'static str) -> ConsoleResult<()> {
        self.calls.borrow_mut().push(call);
        match self.failures.borrow_mut().remove(operation) {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl RecordApi for FakeApi {
    async fn list(&self, kind: EntityKind) -> ConsoleResult<Vec<Record>> {
        self.record(Call::List(kind), "list")?;
        Ok(self.records.borrow().get(&kind).cloned().unwrap_or_default())
    }

    async fn get_by_id(&self, kind: EntityKind, id: RecordId) -> ConsoleResult<Option<Record>> {
        self.record(Call::GetById(kind, id), "get_by_id")?;
        Ok(self
            .records
            .borrow()
            .get(&kind)
            .and_then(|records| records.iter().find(|r| r.id() == Some(id)).cloned()))
    }

    async fn insert(&self, kind: EntityKind, payload: &Value) -> ConsoleResult<()> {
        self.record(Call::Insert(kind, payload.clone()), "insert")
    }

    async fn update(&self, kind: EntityKind, payload: &Value) -> ConsoleResult<()> {
        self.record(Call::Update(kind, payload.clone()), "update")
    }

    async fn change_status(&self, kind: EntityKind, id: RecordId) -> ConsoleResult<()> {
        self.record(Call::ChangeStatus(kind, id), "change_status")
    }

    async fn change_password(&self, request: &PasswordChange) -> ConsoleResult<()> {
        self.record(Call::ChangePassword(request.clone()), "change_password")
    }

    async fn list_resource(&self, resource: &str) -> ConsoleResult<Vec<Record>> {
        self.record(Call::ListResource(resource.to_string()), "list_resource")?;
        Ok(self
            .resources
            .borrow()
            .get(resource)
            .cloned()
            .unwrap_or_default())
    }
}

impl AuthApi for FakeApi {
    async fn login(&self, credentials: &Credentials) -> ConsoleResult<SessionContext> {
        self.record(Call::Login(credentials.user_name.clone()), "login")?;
        self.login
            .borrow()
            .clone()
            .ok_or_else(|| ConsoleError::api(401, "Invalid credentials"))
    }
}
