//! Create/edit forms: draft state, validation, payload building and the
//! submit state machine.

use std::collections::BTreeMap;
use std::marker::PhantomData;

use serde_json::{Map, Number, Value};
use thiserror::Error;

use shopadmin_client::{FilePart, MultipartBody, Payload, ResourceApi};
use shopadmin_core::{ApiError, ApiResult, Editable, FieldErrors, FieldKind, FieldSpec, ResourceId};

use crate::navigation::Route;
use crate::notify::{Notice, Notifier};

pub const REQUIRED: &str = "required";
pub const NOT_A_NUMBER: &str = "must be a number";
pub const NOT_A_WHOLE_NUMBER: &str = "must be a whole number";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("unknown field `{0}`")]
    UnknownField(String),

    #[error("field `{field}` does not accept {given}")]
    WrongKind { field: String, given: &'static str },

    #[error("field `{field}`: `{value}` is not a yes/no value")]
    InvalidFlag { field: String, value: String },
}

#[derive(Debug, Clone, PartialEq)]
pub enum ImageValue {
    Empty,
    Existing(String),
    New(FilePart),
}

/// Editable value of one form field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Text as typed; numeric fields are coerced on submit.
    Text(String),
    List(Vec<String>),
    Flag(bool),
    Image(ImageValue),
}

impl FieldValue {
    fn empty_for(kind: FieldKind) -> Self {
        match kind {
            FieldKind::Text | FieldKind::Decimal | FieldKind::Integer => FieldValue::Text(String::new()),
            FieldKind::List => FieldValue::List(Vec::new()),
            FieldKind::Flag => FieldValue::Flag(false),
            FieldKind::Image { .. } => FieldValue::Image(ImageValue::Empty),
        }
    }

    fn seeded(kind: FieldKind, value: Option<&Value>) -> Self {
        let value = match value {
            None | Some(Value::Null) => return Self::empty_for(kind),
            Some(v) => v,
        };
        match kind {
            FieldKind::Text | FieldKind::Decimal | FieldKind::Integer => FieldValue::Text(scalar_text(value)),
            FieldKind::List => FieldValue::List(match value {
                Value::Array(items) => items.iter().map(scalar_text).filter(|s| !s.is_empty()).collect(),
                other => split_list(&scalar_text(other)),
            }),
            FieldKind::Flag => FieldValue::Flag(value.as_bool().unwrap_or(false)),
            FieldKind::Image { .. } => match value.as_str().map(str::trim) {
                Some(url) if !url.is_empty() => FieldValue::Image(ImageValue::Existing(url.to_string())),
                _ => FieldValue::Image(ImageValue::Empty),
            },
        }
    }

    /// Nothing entered.
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Text(s) => s.trim().is_empty(),
            FieldValue::List(items) => items.is_empty(),
            FieldValue::Flag(_) => false,
            FieldValue::Image(img) => matches!(img, ImageValue::Empty),
        }
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Local, uncommitted edits of a create/edit form.
#[derive(Debug, Clone, PartialEq)]
pub struct FormDraft {
    fields: &'static [FieldSpec],
    values: BTreeMap<&'static str, FieldValue>,
}

impl FormDraft {
    /// Blank draft for a create form.
    pub fn empty(fields: &'static [FieldSpec]) -> Self {
        let values = fields.iter().map(|f| (f.key, FieldValue::empty_for(f.kind))).collect();
        Self { fields, values }
    }

    /// Draft pre-filled from an existing record.
    pub fn seed<R: Editable>(record: &R) -> Self {
        let fields = R::form_fields();
        let json = serde_json::to_value(record).unwrap_or(Value::Null);
        let values = fields
            .iter()
            .map(|f| (f.key, FieldValue::seeded(f.kind, json.get(f.key))))
            .collect();
        Self { fields, values }
    }

    pub fn fields(&self) -> &'static [FieldSpec] {
        self.fields
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.values.get(key)
    }

    /// Current text of a text or numeric field.
    pub fn text(&self, key: &str) -> Option<&str> {
        match self.values.get(key) {
            Some(FieldValue::Text(s)) => Some(s),
            _ => None,
        }
    }

    fn spec(&self, key: &str) -> Result<&'static FieldSpec, FormError> {
        self.fields
            .iter()
            .find(|f| f.key == key)
            .ok_or_else(|| FormError::UnknownField(key.to_string()))
    }

    fn put(&mut self, spec: &'static FieldSpec, value: FieldValue) {
        self.values.insert(spec.key, value);
    }

    pub fn set_text(&mut self, key: &str, value: impl Into<String>) -> Result<(), FormError> {
        let spec = self.spec(key)?;
        match spec.kind {
            FieldKind::Text | FieldKind::Decimal | FieldKind::Integer => {
                self.put(spec, FieldValue::Text(value.into()));
                Ok(())
            }
            _ => Err(FormError::WrongKind { field: key.to_string(), given: "text" }),
        }
    }

    pub fn set_list(&mut self, key: &str, items: Vec<String>) -> Result<(), FormError> {
        let spec = self.spec(key)?;
        if spec.kind != FieldKind::List {
            return Err(FormError::WrongKind { field: key.to_string(), given: "a list" });
        }
        self.put(spec, FieldValue::List(items));
        Ok(())
    }

    pub fn set_flag(&mut self, key: &str, on: bool) -> Result<(), FormError> {
        let spec = self.spec(key)?;
        if spec.kind != FieldKind::Flag {
            return Err(FormError::WrongKind { field: key.to_string(), given: "a flag" });
        }
        self.put(spec, FieldValue::Flag(on));
        Ok(())
    }

    /// Pick a new file for an image field.
    pub fn attach(&mut self, key: &str, file: FilePart) -> Result<(), FormError> {
        let spec = self.spec(key)?;
        if !matches!(spec.kind, FieldKind::Image { .. }) {
            return Err(FormError::WrongKind { field: key.to_string(), given: "a file" });
        }
        self.put(spec, FieldValue::Image(ImageValue::New(file)));
        Ok(())
    }

    pub fn clear(&mut self, key: &str) -> Result<(), FormError> {
        let spec = self.spec(key)?;
        self.put(spec, FieldValue::empty_for(spec.kind));
        Ok(())
    }

    /// Set a field from its textual form (`key=value` on a command line):
    /// lists are comma separated, flags accept yes/no words, image fields
    /// take an existing URL.
    pub fn set_from_str(&mut self, key: &str, raw: &str) -> Result<(), FormError> {
        let spec = self.spec(key)?;
        let value = match spec.kind {
            FieldKind::Text | FieldKind::Decimal | FieldKind::Integer => FieldValue::Text(raw.to_string()),
            FieldKind::List => FieldValue::List(split_list(raw)),
            FieldKind::Flag => FieldValue::Flag(parse_flag(raw).ok_or_else(|| FormError::InvalidFlag {
                field: key.to_string(),
                value: raw.to_string(),
            })?),
            FieldKind::Image { .. } => match raw.trim() {
                "" => FieldValue::Image(ImageValue::Empty),
                url => FieldValue::Image(ImageValue::Existing(url.to_string())),
            },
        };
        self.put(spec, value);
        Ok(())
    }

    /// Does any image field hold a newly chosen file?
    pub fn has_new_file(&self) -> bool {
        self.values
            .values()
            .any(|v| matches!(v, FieldValue::Image(ImageValue::New(_))))
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "y" | "1" | "on" => Some(true),
        "false" | "no" | "n" | "0" | "off" => Some(false),
        _ => None,
    }
}

/// Field-level checks only; no cross-field rules.
pub fn validate(draft: &FormDraft) -> FieldErrors {
    let mut errors = FieldErrors::new();
    for spec in draft.fields {
        let Some(value) = draft.values.get(spec.key) else {
            if spec.required {
                errors.insert(spec.key, REQUIRED);
            }
            continue;
        };
        if value.is_empty() {
            if spec.required {
                errors.insert(spec.key, REQUIRED);
            }
            continue;
        }
        if let FieldValue::Text(text) = value {
            let text = text.trim();
            match spec.kind {
                FieldKind::Decimal if parse_decimal(text).is_none() => errors.insert(spec.key, NOT_A_NUMBER),
                FieldKind::Integer if text.parse::<i64>().is_err() => {
                    let message = if parse_decimal(text).is_some() { NOT_A_WHOLE_NUMBER } else { NOT_A_NUMBER };
                    errors.insert(spec.key, message);
                }
                _ => {}
            }
        }
    }
    errors
}

fn parse_decimal(text: &str) -> Option<f64> {
    text.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// JSON body, or multipart when an image field holds a new file. Optional
/// fields left empty are omitted.
pub fn build_payload(draft: &FormDraft) -> Payload {
    if draft.has_new_file() {
        Payload::Multipart(multipart_body(draft))
    } else {
        Payload::Json(Value::Object(json_body(draft)))
    }
}

fn json_body(draft: &FormDraft) -> Map<String, Value> {
    let mut obj = Map::new();
    for spec in draft.fields {
        let Some(value) = draft.values.get(spec.key).filter(|v| !v.is_empty()) else {
            continue;
        };
        let json = match (spec.kind, value) {
            (FieldKind::Decimal, FieldValue::Text(t)) => match parse_decimal(t.trim()).and_then(Number::from_f64) {
                Some(n) => Value::Number(n),
                None => Value::String(t.trim().to_string()),
            },
            (FieldKind::Integer, FieldValue::Text(t)) => match t.trim().parse::<i64>() {
                Ok(n) => Value::from(n),
                Err(_) => Value::String(t.trim().to_string()),
            },
            (_, FieldValue::Text(t)) => Value::String(t.trim().to_string()),
            (_, FieldValue::List(items)) => Value::from(items.clone()),
            (_, FieldValue::Flag(on)) => Value::Bool(*on),
            (_, FieldValue::Image(ImageValue::Existing(url))) => Value::String(url.clone()),
            (_, FieldValue::Image(_)) => continue,
        };
        obj.insert(spec.key.to_string(), json);
    }
    obj
}

fn multipart_body(draft: &FormDraft) -> MultipartBody {
    let mut body = MultipartBody::default();
    for spec in draft.fields {
        let Some(value) = draft.values.get(spec.key).filter(|v| !v.is_empty()) else {
            continue;
        };
        match value {
            FieldValue::Text(t) => body.text(spec.key, t.trim()),
            FieldValue::List(items) => body.text(spec.key, items.join(",")),
            FieldValue::Flag(on) => body.text(spec.key, on.to_string()),
            FieldValue::Image(ImageValue::Existing(url)) => body.text(spec.key, url.as_str()),
            FieldValue::Image(ImageValue::New(file)) => {
                let upload_key = match spec.kind {
                    FieldKind::Image { upload_key } => upload_key,
                    _ => spec.key,
                };
                body.file(upload_key, file.clone());
            }
            FieldValue::Image(ImageValue::Empty) => {}
        }
    }
    body
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(ResourceId),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FormPhase {
    Idle,
    Validating,
    Submitting,
    Succeeded,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SubmitOutcome<R> {
    pub record: R,
    pub route: Route,
}

/// Drives one create or edit form.
#[derive(Debug)]
pub struct FormController<R: Editable> {
    mode: FormMode,
    draft: FormDraft,
    errors: FieldErrors,
    phase: FormPhase,
    load_error: Option<String>,
    _record: PhantomData<fn() -> R>,
}

impl<R: Editable> FormController<R> {
    pub fn create() -> Self {
        Self {
            mode: FormMode::Create,
            draft: FormDraft::empty(R::form_fields()),
            errors: FieldErrors::new(),
            phase: FormPhase::Idle,
            load_error: None,
            _record: PhantomData,
        }
    }

    /// Edit form seeded from a record already in hand.
    pub fn edit(record: &R) -> Self {
        Self {
            mode: FormMode::Edit(record.id()),
            draft: FormDraft::seed(record),
            ..Self::create()
        }
    }

    /// Fetch the record and seed the draft from it. On failure the form
    /// keeps its current draft and records the error.
    pub async fn load_one<A>(&mut self, api: &A, id: ResourceId) -> ApiResult<()>
    where
        A: ResourceApi<R> + ?Sized,
    {
        self.mode = FormMode::Edit(id);
        match crate::detail::load_one(api, id).await {
            Ok(record) => {
                self.draft = FormDraft::seed(&record);
                self.errors.clear();
                self.load_error = None;
                Ok(())
            }
            Err(err) => {
                self.load_error = Some(err.user_message(&format!("Failed to fetch {}", R::KIND.label())));
                Err(err)
            }
        }
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    pub fn draft(&self) -> &FormDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut FormDraft {
        &mut self.draft
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == FormPhase::Submitting
    }

    /// Validate the draft and, if it passes, enter `Submitting` and return
    /// the payload to send.
    pub fn begin_submit(&mut self) -> ApiResult<Payload> {
        if self.is_submitting() {
            return Err(ApiError::Busy);
        }
        self.phase = FormPhase::Validating;
        self.errors = validate(&self.draft);
        if !self.errors.is_empty() {
            tracing::debug!(resource = %R::KIND, errors = self.errors.len(), "form rejected by validation");
            self.phase = FormPhase::Idle;
            return Err(ApiError::Validation(self.errors.clone()));
        }
        self.phase = FormPhase::Submitting;
        Ok(build_payload(&self.draft))
    }

    pub fn finish_submit(&mut self, result: ApiResult<R>, notifier: &dyn Notifier) -> ApiResult<SubmitOutcome<R>> {
        let (verb, past) = match self.mode {
            FormMode::Create => ("create", "created"),
            FormMode::Edit(_) => ("update", "updated"),
        };
        match result {
            Ok(record) => {
                self.phase = FormPhase::Succeeded;
                tracing::info!(resource = %R::KIND, id = %record.id(), "{} {past}", R::KIND.label());
                notifier.notify(Notice::success(format!("{} {past} successfully", R::KIND.title())));
                let route = match self.mode {
                    FormMode::Create => Route::List(R::KIND),
                    FormMode::Edit(_) => Route::Detail(R::KIND, record.id()),
                };
                Ok(SubmitOutcome { record, route })
            }
            Err(err) => {
                self.phase = FormPhase::Idle;
                tracing::error!(resource = %R::KIND, error = %err, "{verb} failed");
                let fallback = crate::mutation::failure_fallback(verb, R::KIND);
                notifier.notify(Notice::error(err.user_message(&fallback)));
                Err(err)
            }
        }
    }

    pub async fn submit<A>(&mut self, api: &A, notifier: &dyn Notifier) -> ApiResult<SubmitOutcome<R>>
    where
        A: ResourceApi<R> + ?Sized,
    {
        let payload = self.begin_submit()?;
        let result = match self.mode {
            FormMode::Create => api.create(payload).await,
            FormMode::Edit(id) => api.update(id, payload).await,
        };
        self.finish_submit(result, notifier)
    }
}
