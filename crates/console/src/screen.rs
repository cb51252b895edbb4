//! One resource's list screen: collection, filters, selection, delete gate,
//! counters and in-flight flags behind a single controller.

use std::sync::Arc;

use shopadmin_client::{BulkDeleteAck, DeleteAck, ListQuery, ResourceApi};
use shopadmin_core::{ApiError, ApiResult, Resource, ResourceId, StatusKind};

use crate::collection::ListController;
use crate::counters::{CountSource, StatusCounts, fetch_counts};
use crate::filter::{FilterState, StatusFilter, filter_items};
use crate::gate::{ConfirmationGate, DeleteTarget, Prompt};
use crate::mutation::{
    InFlight, Op, bulk_delete_summary, failure_fallback, reconcile_bulk_delete, reconcile_delete, reconcile_update,
};
use crate::notify::{Notice, Notifier};
use crate::selection::Selection;

/// What a confirmed deletion did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted(ResourceId),
    BulkDeleted { requested: usize, deleted: u64 },
}

pub struct ResourceScreen<R: Resource, A: ?Sized> {
    api: Arc<A>,
    notifier: Arc<dyn Notifier>,
    list: ListController<R>,
    filter: FilterState<R::Status>,
    selection: Selection,
    gate: ConfirmationGate,
    in_flight: InFlight,
    counts: StatusCounts<R::Status>,
    count_source: CountSource,
    page_size: u32,
}

impl<R, A> ResourceScreen<R, A>
where
    R: Resource,
    A: ResourceApi<R> + ?Sized + 'static,
{
    pub fn new(api: Arc<A>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            api,
            notifier,
            list: ListController::new(),
            filter: FilterState::default(),
            selection: Selection::new(),
            gate: ConfirmationGate::new(R::KIND),
            in_flight: InFlight::default(),
            counts: StatusCounts::loading(),
            count_source: CountSource::Endpoints,
            page_size: 0,
        }
    }

    /// Request `limit` rows per page; zero asks for everything.
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn list(&self) -> &ListController<R> {
        &self.list
    }

    pub fn filter(&self) -> &FilterState<R::Status> {
        &self.filter
    }

    pub fn filter_mut(&mut self) -> &mut FilterState<R::Status> {
        &mut self.filter
    }

    pub fn set_status_filter(&mut self, status: StatusFilter<R::Status>) {
        self.filter.status = status;
    }

    pub fn set_search(&mut self, query: impl Into<String>) {
        self.filter.search = query.into();
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn gate(&self) -> &ConfirmationGate {
        &self.gate
    }

    pub fn in_flight(&self) -> &InFlight {
        &self.in_flight
    }

    pub fn counts(&self) -> &StatusCounts<R::Status> {
        &self.counts
    }

    pub fn count_source(&self) -> CountSource {
        self.count_source
    }

    /// Selection and list-derived counters follow the rows after every change.
    fn rows_changed(&mut self) {
        self.selection.retain(self.list.items());
        if self.count_source == CountSource::List {
            self.counts = StatusCounts::from_items(self.list.items());
        }
    }

    /// Rows that pass the current filters, in list order.
    pub fn visible(&self) -> Vec<&R> {
        filter_items(self.list.items(), &self.filter)
    }

    pub fn toggle(&mut self, id: ResourceId) -> bool {
        self.selection.toggle(id, self.list.items())
    }

    pub fn select_all(&mut self) {
        let visible = filter_items(self.list.items(), &self.filter);
        self.selection.select_all(&visible);
    }

    fn first_page_query(&self) -> ListQuery {
        let query = ListQuery::new().page(1);
        if self.page_size > 0 { query.limit(self.page_size) } else { query }
    }

    /// First page of the list and the per-status counters, fetched together.
    /// A screen counting from its list only needs the list.
    pub async fn mount(&mut self) {
        let query = self.first_page_query();
        if self.count_source == CountSource::List {
            self.list.load(&*self.api, query).await;
        } else {
            let api = Arc::clone(&self.api);
            let ((), counts) = tokio::join!(
                async {
                    self.list.load(&*api, query).await;
                },
                fetch_counts::<R, A>(Arc::clone(&api)),
            );
            self.counts = counts;
        }
        self.rows_changed();
    }

    pub async fn load(&mut self, query: ListQuery) -> bool {
        let applied = self.list.load(&*self.api, query).await;
        self.rows_changed();
        applied
    }

    pub async fn reload(&mut self) -> bool {
        let applied = self.list.reload(&*self.api).await;
        self.rows_changed();
        applied
    }

    pub async fn next_page(&mut self) -> bool {
        let applied = self.list.next_page(&*self.api).await;
        self.rows_changed();
        applied
    }

    pub async fn prev_page(&mut self) -> bool {
        let applied = self.list.prev_page(&*self.api).await;
        self.rows_changed();
        applied
    }

    /// Ask the count endpoints again; the counters stop following the list.
    pub async fn refresh_counts(&mut self) {
        self.count_source = CountSource::Endpoints;
        self.counts = fetch_counts::<R, A>(Arc::clone(&self.api)).await;
    }

    /// Derive the counters from the loaded rows and keep them in step with
    /// every later load and write.
    pub fn count_from_list(&mut self) -> &StatusCounts<R::Status> {
        self.count_source = CountSource::List;
        self.counts = StatusCounts::from_items(self.list.items());
        &self.counts
    }

    // Confirmation gate.

    pub fn request_delete(&mut self, id: ResourceId) -> Option<Prompt> {
        let name = self.list.find(id)?.display_name().to_string();
        self.gate.request(DeleteTarget::One { id, name })
    }

    pub fn request_bulk_delete(&mut self) -> Option<Prompt> {
        if self.selection.is_empty() {
            return None;
        }
        self.gate.request(DeleteTarget::Many(self.selection.ids()))
    }

    pub fn cancel_delete(&mut self) {
        self.gate.cancel();
    }

    /// Run the deletion the open prompt asked about. `None` when no prompt is
    /// open (or one is already running).
    pub async fn confirm_delete(&mut self) -> Option<ApiResult<DeleteOutcome>> {
        let target = self.gate.begin_confirm()?;
        let outcome = match target {
            DeleteTarget::One { id, .. } => self.delete(id).await.map(|()| DeleteOutcome::Deleted(id)),
            DeleteTarget::Many(ids) => self
                .bulk_delete(&ids)
                .await
                .map(|deleted| DeleteOutcome::BulkDeleted { requested: ids.len(), deleted }),
        };
        self.gate.finish();
        Some(outcome)
    }

    // Writes. Each has a begin/finish pair for hosts that drive the request
    // themselves, and an async method that does both.

    fn fail(&self, op: Op, err: &ApiError) {
        tracing::error!(resource = %R::KIND, ?op, error = %err, "mutation failed");
        let fallback = failure_fallback(op.verb(), R::KIND);
        self.notifier.notify(Notice::error(err.user_message(&fallback)));
    }

    pub fn begin_delete(&mut self) -> ApiResult<()> {
        self.in_flight.begin(Op::Delete)
    }

    pub fn finish_delete(&mut self, id: ResourceId, result: ApiResult<DeleteAck>) -> ApiResult<()> {
        self.in_flight.finish(Op::Delete);
        match result {
            Ok(ack) => {
                reconcile_delete(&mut self.list, &mut self.selection, id);
                self.rows_changed();
                tracing::info!(resource = %R::KIND, %id, "deleted");
                let message = ack
                    .message
                    .filter(|m| !m.trim().is_empty())
                    .unwrap_or_else(|| format!("{} deleted successfully", R::KIND.title()));
                self.notifier.notify(Notice::success(message));
                Ok(())
            }
            Err(err) => {
                self.fail(Op::Delete, &err);
                Err(err)
            }
        }
    }

    pub async fn delete(&mut self, id: ResourceId) -> ApiResult<()> {
        self.begin_delete()?;
        let result = ResourceApi::<R>::delete(&*self.api, id).await;
        self.finish_delete(id, result)
    }

    pub fn begin_bulk_delete(&mut self) -> ApiResult<()> {
        self.in_flight.begin(Op::BulkDelete)
    }

    /// Returns the number of records the server reports as deleted.
    pub fn finish_bulk_delete(&mut self, ids: &[ResourceId], result: ApiResult<BulkDeleteAck>) -> ApiResult<u64> {
        self.in_flight.finish(Op::BulkDelete);
        match result {
            Ok(ack) => {
                let deleted = ack.deleted_or(ids.len());
                reconcile_bulk_delete(&mut self.list, &mut self.selection, ids);
                self.rows_changed();
                if deleted < ids.len() as u64 {
                    tracing::warn!(resource = %R::KIND, requested = ids.len(), deleted, "bulk delete was partial");
                } else {
                    tracing::info!(resource = %R::KIND, deleted, "bulk deleted");
                }
                self.notifier
                    .notify(Notice::success(bulk_delete_summary(deleted, ids.len(), R::KIND)));
                Ok(deleted)
            }
            Err(err) => {
                self.fail(Op::BulkDelete, &err);
                Err(err)
            }
        }
    }

    pub async fn bulk_delete(&mut self, ids: &[ResourceId]) -> ApiResult<u64> {
        self.begin_bulk_delete()?;
        let result = ResourceApi::<R>::bulk_delete(&*self.api, ids).await;
        self.finish_bulk_delete(ids, result)
    }

    pub fn begin_status_update(&mut self, id: ResourceId) -> ApiResult<()> {
        self.in_flight.begin(Op::StatusUpdate(id))
    }

    pub fn finish_status_update(&mut self, id: ResourceId, result: ApiResult<R>) -> ApiResult<R> {
        self.in_flight.finish(Op::StatusUpdate(id));
        match result {
            Ok(record) => {
                let label = record.status().badge().label;
                if !reconcile_update(&mut self.list, record.clone()) {
                    tracing::warn!(resource = %R::KIND, %id, "updated row is no longer listed");
                }
                self.rows_changed();
                tracing::info!(resource = %R::KIND, %id, status = record.status().as_str(), "status updated");
                self.notifier
                    .notify(Notice::success(format!("{} marked as {label}", R::KIND.title())));
                Ok(record)
            }
            Err(err) => {
                self.fail(Op::StatusUpdate(id), &err);
                Err(err)
            }
        }
    }

    /// Change one row's status and patch the returned record in place.
    pub async fn set_status(&mut self, id: ResourceId, status: R::Status) -> ApiResult<R> {
        self.begin_status_update(id)?;
        let result = ResourceApi::<R>::set_status(&*self.api, id, status).await;
        self.finish_status_update(id, result)
    }
}

impl<R: Resource, A: ?Sized> core::fmt::Debug for ResourceScreen<R, A> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ResourceScreen")
            .field("kind", &R::KIND)
            .field("list", &self.list)
            .field("filter", &self.filter)
            .field("selection", &self.selection)
            .field("gate", &self.gate)
            .field("in_flight", &self.in_flight)
            .field("count_source", &self.count_source)
            .finish_non_exhaustive()
    }
}
