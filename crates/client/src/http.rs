//! reqwest-backed implementation of [`ResourceApi`].

use async_trait::async_trait;
use reqwest::RequestBuilder;
use reqwest::multipart::{Form, Part};
use serde_json::{Value, json};

use shopadmin_core::{ApiError, ApiResult, FieldErrors, Resource, ResourceId, ResourceKind, StatusKind};

use crate::api::{BulkDeleteAck, DeleteAck, ResourceApi};
use crate::config::{ClientConfig, ConfigError};
use crate::envelope::{Page, normalize_page};
use crate::payload::{MultipartBody, Payload};
use crate::query::ListQuery;
use crate::response::{decode_count, decode_record, error_message};

/// HTTP client for the admin REST API.
///
/// Cheap to clone; one instance serves every resource type.
#[derive(Debug, Clone)]
pub struct HttpClient {
    http: reqwest::Client,
    config: ClientConfig,
}

impl HttpClient {
    pub fn new(config: ClientConfig) -> Result<Self, ConfigError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn url(&self, kind: ResourceKind, tail: &[&str]) -> String {
        let mut url = format!("{}/{}", self.config.base_url, kind.path());
        for segment in tail {
            url.push('/');
            url.push_str(segment);
        }
        url
    }

    /// Send a request and return its JSON body (null for empty 2xx bodies).
    async fn send(&self, req: RequestBuilder) -> ApiResult<Value> {
        let req = match &self.config.token {
            Some(token) => req.bearer_auth(token),
            None => req,
        };

        let resp = req.send().await.map_err(|e| {
            tracing::error!(error = %e, "request failed before a response was received");
            ApiError::network(e.to_string())
        })?;

        let status = resp.status();
        let url = resp.url().to_string();
        let text = resp
            .text()
            .await
            .map_err(|e| ApiError::network(e.to_string()))?;

        if !status.is_success() {
            let message = error_message(&text);
            tracing::warn!(%url, status = status.as_u16(), message = ?message, "API returned an error");
            return Err(ApiError::server(status.as_u16(), message));
        }

        tracing::debug!(%url, status = status.as_u16(), bytes = text.len(), "API response");
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text).map_err(|e| ApiError::decode(format!("{url}: {e}")))
    }

    fn with_payload(req: RequestBuilder, payload: Payload) -> ApiResult<RequestBuilder> {
        match payload {
            Payload::Json(value) => Ok(req.json(&value)),
            Payload::Multipart(body) => Ok(req.multipart(to_form(body)?)),
        }
    }
}

fn to_form(body: MultipartBody) -> ApiResult<Form> {
    let mut form = Form::new();
    for (key, value) in body.fields {
        form = form.text(key, value);
    }
    for (key, file) in body.files {
        let part = Part::bytes(file.bytes)
            .file_name(file.file_name)
            .mime_str(&file.content_type)
            .map_err(|_| {
                let mut errors = FieldErrors::new();
                errors.insert(key.clone(), format!("unsupported file type `{}`", file.content_type));
                ApiError::Validation(errors)
            })?;
        form = form.part(key, part);
    }
    Ok(form)
}

#[async_trait]
impl<R: Resource> ResourceApi<R> for HttpClient {
    async fn list(&self, query: &ListQuery) -> ApiResult<Page<R>> {
        tracing::debug!(resource = %R::KIND, ?query, "listing");
        let req = self.http.get(self.url(R::KIND, &[])).query(&query.to_pairs());
        let body = self.send(req).await?;
        normalize_page(body, R::KIND, query, self.config.page_size)
    }

    async fn get(&self, id: ResourceId) -> ApiResult<R> {
        let id = id.to_string();
        let body = self.send(self.http.get(self.url(R::KIND, &[id.as_str()]))).await?;
        decode_record(body, R::KIND)
    }

    async fn create(&self, payload: Payload) -> ApiResult<R> {
        tracing::debug!(resource = %R::KIND, multipart = payload.is_multipart(), "creating");
        let req = Self::with_payload(self.http.post(self.url(R::KIND, &[])), payload)?;
        let body = self.send(req).await?;
        decode_record(body, R::KIND)
    }

    async fn update(&self, id: ResourceId, payload: Payload) -> ApiResult<R> {
        tracing::debug!(resource = %R::KIND, %id, multipart = payload.is_multipart(), "updating");
        let id = id.to_string();
        let req = Self::with_payload(self.http.put(self.url(R::KIND, &[id.as_str()])), payload)?;
        let body = self.send(req).await?;
        decode_record(body, R::KIND)
    }

    async fn set_status(&self, id: ResourceId, status: R::Status) -> ApiResult<R> {
        let id = id.to_string();
        let req = self
            .http
            .patch(self.url(R::KIND, &[id.as_str(), "status"]))
            .json(&json!({ "status": status.as_str() }));
        let body = self.send(req).await?;
        decode_record(body, R::KIND)
    }

    async fn delete(&self, id: ResourceId) -> ApiResult<DeleteAck> {
        let id = id.to_string();
        let body = self.send(self.http.delete(self.url(R::KIND, &[id.as_str()]))).await?;
        if body.is_null() {
            return Ok(DeleteAck::default());
        }
        serde_json::from_value(body).map_err(|e| ApiError::decode(e.to_string()))
    }

    async fn bulk_delete(&self, ids: &[ResourceId]) -> ApiResult<BulkDeleteAck> {
        let req = self
            .http
            .post(self.url(R::KIND, &["bulk-delete"]))
            .json(&json!({ "ids": ids }));
        let body = self.send(req).await?;
        if body.is_null() {
            return Ok(BulkDeleteAck::default());
        }
        serde_json::from_value(body).map_err(|e| ApiError::decode(e.to_string()))
    }

    async fn count(&self, status: R::Status) -> ApiResult<u64> {
        let req = self
            .http
            .get(self.url(R::KIND, &["count"]))
            .query(&[("status", status.as_str())]);
        decode_count(self.send(req).await?)
    }
}
