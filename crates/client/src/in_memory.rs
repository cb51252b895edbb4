//! In-memory [`ResourceApi`] for tests and local development.
//!
//! Behaves like a well-mannered backend: assigns ids, filters and paginates
//! lists, reports how many ids a bulk delete actually removed. Failures can be
//! injected per operation, and every call and payload is recorded so tests can
//! assert that no request was made.

use std::collections::{BTreeMap, HashMap, VecDeque};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, RwLock};

use async_trait::async_trait;
use chrono::Utc;
use serde_json::{Map, Value};

use shopadmin_core::{ApiError, ApiResult, Resource, ResourceId, StatusKind};

use crate::api::{BulkDeleteAck, DeleteAck, ResourceApi};
use crate::envelope::Page;
use crate::payload::Payload;
use crate::query::ListQuery;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Operation {
    List,
    Get,
    Create,
    Update,
    SetStatus,
    Delete,
    BulkDelete,
    Count,
}

#[derive(Debug)]
pub struct InMemoryApi<R: Resource> {
    records: RwLock<BTreeMap<ResourceId, R>>,
    next_id: AtomicU64,
    calls: Mutex<Vec<Operation>>,
    payloads: Mutex<Vec<Payload>>,
    failures: Mutex<HashMap<Operation, VecDeque<ApiError>>>,
    count_failures: Mutex<HashMap<R::Status, ApiError>>,
}

impl<R: Resource> InMemoryApi<R> {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(BTreeMap::new()),
            next_id: AtomicU64::new(1),
            calls: Mutex::new(Vec::new()),
            payloads: Mutex::new(Vec::new()),
            failures: Mutex::new(HashMap::new()),
            count_failures: Mutex::new(HashMap::new()),
        }
    }

    pub fn with_records(records: impl IntoIterator<Item = R>) -> Self {
        let api = Self::new();
        api.seed(records);
        api
    }

    /// Insert records as-is; later creates get ids above the largest seeded id.
    pub fn seed(&self, records: impl IntoIterator<Item = R>) {
        if let Ok(mut map) = self.records.write() {
            for record in records {
                let id = record.id();
                self.next_id.fetch_max(id.get() + 1, Ordering::SeqCst);
                map.insert(id, record);
            }
        }
    }

    /// Current records in id order.
    pub fn snapshot(&self) -> Vec<R> {
        match self.records.read() {
            Ok(map) => map.values().cloned().collect(),
            Err(_) => vec![],
        }
    }

    /// Make the next call of `op` fail with `err`. Queued failures are used in order.
    pub fn fail_next(&self, op: Operation, err: ApiError) {
        if let Ok(mut failures) = self.failures.lock() {
            failures.entry(op).or_default().push_back(err);
        }
    }

    /// Make every `count(status)` call fail with `err`.
    pub fn fail_count_for(&self, status: R::Status, err: ApiError) {
        if let Ok(mut failures) = self.count_failures.lock() {
            failures.insert(status, err);
        }
    }

    pub fn calls(&self) -> Vec<Operation> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    pub fn call_count(&self, op: Operation) -> usize {
        self.calls().into_iter().filter(|c| *c == op).count()
    }

    pub fn last_payload(&self) -> Option<Payload> {
        self.payloads.lock().ok().and_then(|p| p.last().cloned())
    }

    fn enter(&self, op: Operation) -> ApiResult<()> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(op);
        }
        let injected = self
            .failures
            .lock()
            .ok()
            .and_then(|mut f| f.get_mut(&op).and_then(VecDeque::pop_front));
        match injected {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn record_payload(&self, payload: &Payload) {
        if let Ok(mut payloads) = self.payloads.lock() {
            payloads.push(payload.clone());
        }
    }

    fn not_found(id: ResourceId) -> ApiError {
        ApiError::server(404, Some(format!("{} {id} not found", R::KIND.title())))
    }

    fn read_map(&self) -> ApiResult<std::sync::RwLockReadGuard<'_, BTreeMap<ResourceId, R>>> {
        self.records.read().map_err(|_| poisoned())
    }

    fn write_map(&self) -> ApiResult<std::sync::RwLockWriteGuard<'_, BTreeMap<ResourceId, R>>> {
        self.records.write().map_err(|_| poisoned())
    }
}

impl<R: Resource> Default for InMemoryApi<R> {
    fn default() -> Self {
        Self::new()
    }
}

fn poisoned() -> ApiError {
    ApiError::server(500, Some("record store unavailable".into()))
}

/// Flatten a payload into JSON fields the way a backend would parse them.
fn payload_fields(payload: Payload) -> ApiResult<Map<String, Value>> {
    match payload {
        Payload::Json(Value::Object(obj)) => Ok(obj),
        Payload::Json(other) => Err(ApiError::server(
            400,
            Some(format!("expected a JSON object, got {other}")),
        )),
        Payload::Multipart(body) => {
            let mut obj = Map::new();
            for (key, text) in body.fields {
                let value = match serde_json::from_str::<Value>(&text) {
                    Ok(v @ (Value::Number(_) | Value::Bool(_))) => v,
                    _ => Value::String(text),
                };
                obj.insert(key, value);
            }
            for (key, file) in body.files {
                obj.insert(format!("{key}Url"), Value::String(format!("memory://{}", file.file_name)));
            }
            Ok(obj)
        }
    }
}

fn rebuild<R: Resource>(fields: Map<String, Value>) -> ApiResult<R> {
    serde_json::from_value(Value::Object(fields))
        .map_err(|e| ApiError::server(400, Some(format!("invalid {}: {e}", R::KIND.label()))))
}

fn matches_text(actual: Option<&str>, wanted: Option<&str>) -> bool {
    match wanted.map(str::trim).filter(|w| !w.is_empty()) {
        None => true,
        Some(w) => actual.is_some_and(|a| a.eq_ignore_ascii_case(w)),
    }
}

#[async_trait]
impl<R: Resource> ResourceApi<R> for InMemoryApi<R> {
    async fn list(&self, query: &ListQuery) -> ApiResult<Page<R>> {
        self.enter(Operation::List)?;
        let map = self.read_map()?;
        let matching: Vec<R> = map
            .values()
            .filter(|r| matches_text(Some(r.status().as_str()), query.status.as_deref()))
            .filter(|r| matches_text(r.category(), query.category.as_deref()))
            .filter(|r| matches_text(r.subcategory(), query.subcategory.as_deref()))
            .cloned()
            .collect();

        Ok(Page::paginate(matching, query.page.unwrap_or(1), query.limit.unwrap_or(0)))
    }

    async fn get(&self, id: ResourceId) -> ApiResult<R> {
        self.enter(Operation::Get)?;
        self.read_map()?.get(&id).cloned().ok_or_else(|| Self::not_found(id))
    }

    async fn create(&self, payload: Payload) -> ApiResult<R> {
        self.enter(Operation::Create)?;
        self.record_payload(&payload);
        let mut fields = payload_fields(payload)?;
        let id = ResourceId::new(self.next_id.fetch_add(1, Ordering::SeqCst));
        fields.insert("id".into(), serde_json::json!(id));
        fields.insert("createdAt".into(), Value::String(Utc::now().to_rfc3339()));
        if let Some(initial) = R::Status::all().first() {
            fields
                .entry("status")
                .or_insert_with(|| Value::String(initial.as_str().to_string()));
        }
        let record: R = rebuild(fields)?;
        self.write_map()?.insert(id, record.clone());
        Ok(record)
    }

    async fn update(&self, id: ResourceId, payload: Payload) -> ApiResult<R> {
        self.enter(Operation::Update)?;
        self.record_payload(&payload);
        let mut map = self.write_map()?;
        let current = map.get(&id).ok_or_else(|| Self::not_found(id))?;
        let mut fields = match serde_json::to_value(current) {
            Ok(Value::Object(obj)) => obj,
            _ => return Err(ApiError::server(500, Some("stored record is not an object".into()))),
        };
        for (key, value) in payload_fields(payload)? {
            if key != "id" {
                fields.insert(key, value);
            }
        }
        fields.insert("updatedAt".into(), Value::String(Utc::now().to_rfc3339()));
        let record: R = rebuild(fields)?;
        map.insert(id, record.clone());
        Ok(record)
    }

    async fn set_status(&self, id: ResourceId, status: R::Status) -> ApiResult<R> {
        self.enter(Operation::SetStatus)?;
        let mut map = self.write_map()?;
        let record = map.get_mut(&id).ok_or_else(|| Self::not_found(id))?;
        record.set_status(status);
        Ok(record.clone())
    }

    async fn delete(&self, id: ResourceId) -> ApiResult<DeleteAck> {
        self.enter(Operation::Delete)?;
        match self.write_map()?.remove(&id) {
            Some(_) => Ok(DeleteAck {
                message: Some(format!("{} deleted successfully", R::KIND.title())),
            }),
            None => Err(Self::not_found(id)),
        }
    }

    async fn bulk_delete(&self, ids: &[ResourceId]) -> ApiResult<BulkDeleteAck> {
        self.enter(Operation::BulkDelete)?;
        let mut map = self.write_map()?;
        let deleted = ids.iter().filter(|id| map.remove(*id).is_some()).count() as u64;
        Ok(BulkDeleteAck {
            deleted_count: Some(deleted),
            message: Some(format!("{deleted} {} deleted", R::KIND.plural_label())),
        })
    }

    async fn count(&self, status: R::Status) -> ApiResult<u64> {
        self.enter(Operation::Count)?;
        let injected = self
            .count_failures
            .lock()
            .ok()
            .and_then(|f| f.get(&status).cloned());
        if let Some(err) = injected {
            return Err(err);
        }
        Ok(self.read_map()?.values().filter(|r| r.status() == status).count() as u64)
    }
}
