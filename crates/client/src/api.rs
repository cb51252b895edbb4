//! The resource API contract every controller is written against.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use shopadmin_core::{ApiResult, Resource, ResourceId};

use crate::envelope::Page;
use crate::payload::Payload;
use crate::query::ListQuery;

/// Body of `DELETE /{resource}/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteAck {
    #[serde(default)]
    pub message: Option<String>,
}

/// Body of `POST /{resource}/bulk-delete`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkDeleteAck {
    #[serde(default)]
    pub deleted_count: Option<u64>,
    #[serde(default)]
    pub message: Option<String>,
}

impl BulkDeleteAck {
    /// Server-reported count, or `requested` when the server omitted it.
    pub fn deleted_or(&self, requested: usize) -> u64 {
        self.deleted_count.unwrap_or(requested as u64)
    }
}

/// REST operations available for a resource type `R`.
#[async_trait]
pub trait ResourceApi<R: Resource>: Send + Sync {
    /// `GET /{resource}`
    async fn list(&self, query: &ListQuery) -> ApiResult<Page<R>>;

    /// `GET /{resource}/{id}`
    async fn get(&self, id: ResourceId) -> ApiResult<R>;

    /// `POST /{resource}`
    async fn create(&self, payload: Payload) -> ApiResult<R>;

    /// `PUT /{resource}/{id}`
    async fn update(&self, id: ResourceId, payload: Payload) -> ApiResult<R>;

    /// `PATCH /{resource}/{id}/status`
    async fn set_status(&self, id: ResourceId, status: R::Status) -> ApiResult<R>;

    /// `DELETE /{resource}/{id}`
    async fn delete(&self, id: ResourceId) -> ApiResult<DeleteAck>;

    /// `POST /{resource}/bulk-delete`
    async fn bulk_delete(&self, ids: &[ResourceId]) -> ApiResult<BulkDeleteAck>;

    /// `GET /{resource}/count?status=..`
    async fn count(&self, status: R::Status) -> ApiResult<u64>;
}

#[async_trait]
impl<R, S> ResourceApi<R> for Arc<S>
where
    R: Resource,
    S: ResourceApi<R> + ?Sized,
{
    async fn list(&self, query: &ListQuery) -> ApiResult<Page<R>> {
        (**self).list(query).await
    }

    async fn get(&self, id: ResourceId) -> ApiResult<R> {
        (**self).get(id).await
    }

    async fn create(&self, payload: Payload) -> ApiResult<R> {
        (**self).create(payload).await
    }

    async fn update(&self, id: ResourceId, payload: Payload) -> ApiResult<R> {
        (**self).update(id, payload).await
    }

    async fn set_status(&self, id: ResourceId, status: R::Status) -> ApiResult<R> {
        (**self).set_status(id, status).await
    }

    async fn delete(&self, id: ResourceId) -> ApiResult<DeleteAck> {
        (**self).delete(id).await
    }

    async fn bulk_delete(&self, ids: &[ResourceId]) -> ApiResult<BulkDeleteAck> {
        (**self).bulk_delete(ids).await
    }

    async fn count(&self, status: R::Status) -> ApiResult<u64> {
        (**self).count(status).await
    }
}
