//! Collection view state and the list controller that fills it.

use shopadmin_client::{ListQuery, Page, ResourceApi};
use shopadmin_core::{ApiResult, Resource, ResourceId};

/// What a list screen renders.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionState<R> {
    pub items: Vec<R>,
    pub is_loading: bool,
    pub error: Option<String>,
    pub current_page: u32,
    pub total_pages: u32,
    pub total_count: u64,
}

impl<R> Default for CollectionState<R> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            is_loading: false,
            error: None,
            current_page: 1,
            total_pages: 0,
            total_count: 0,
        }
    }
}

/// Proof that a load was started; hand it back with the response.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[must_use]
pub struct LoadTicket(u64);

/// Fetches a collection and keeps the last good copy of it.
///
/// Loads are last-issued-wins: a response carrying an older ticket than the
/// most recent `begin_load` is dropped, so a slow request can never overwrite
/// the result of a newer one.
#[derive(Debug)]
pub struct ListController<R: Resource> {
    state: CollectionState<R>,
    query: ListQuery,
    generation: u64,
}

impl<R: Resource> Default for ListController<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Resource> ListController<R> {
    pub fn new() -> Self {
        Self {
            state: CollectionState::default(),
            query: ListQuery::default(),
            generation: 0,
        }
    }

    pub fn state(&self) -> &CollectionState<R> {
        &self.state
    }

    pub fn items(&self) -> &[R] {
        &self.state.items
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_loading
    }

    /// Query of the most recent load.
    pub fn query(&self) -> &ListQuery {
        &self.query
    }

    pub fn contains(&self, id: ResourceId) -> bool {
        self.state.items.iter().any(|r| r.id() == id)
    }

    pub fn find(&self, id: ResourceId) -> Option<&R> {
        self.state.items.iter().find(|r| r.id() == id)
    }

    pub fn begin_load(&mut self, query: ListQuery) -> LoadTicket {
        self.generation += 1;
        self.query = query;
        self.state.is_loading = true;
        LoadTicket(self.generation)
    }

    /// Apply a response. Returns `false` when the ticket is stale and the
    /// response was ignored.
    pub fn finish_load(&mut self, ticket: LoadTicket, result: ApiResult<Page<R>>) -> bool {
        if ticket.0 != self.generation {
            tracing::warn!(
                resource = %R::KIND,
                ticket = ticket.0,
                latest = self.generation,
                "discarding stale list response"
            );
            return false;
        }

        self.state.is_loading = false;
        match result {
            Ok(page) => {
                tracing::debug!(resource = %R::KIND, items = page.items.len(), total = page.total_items, "list loaded");
                self.state.items = page.items;
                self.state.total_count = page.total_items;
                self.state.total_pages = page.total_pages;
                self.state.current_page = page.current_page;
                self.state.error = None;
            }
            Err(err) => {
                let fallback = format!("Failed to fetch {}", R::KIND.plural_label());
                tracing::error!(resource = %R::KIND, error = %err, "list load failed");
                // Previous items stay visible.
                self.state.error = Some(err.user_message(&fallback));
            }
        }
        true
    }

    pub async fn load<A>(&mut self, api: &A, query: ListQuery) -> bool
    where
        A: ResourceApi<R> + ?Sized,
    {
        let ticket = self.begin_load(query.clone());
        let result = api.list(&query).await;
        self.finish_load(ticket, result)
    }

    /// Re-issue the last query.
    pub async fn reload<A>(&mut self, api: &A) -> bool
    where
        A: ResourceApi<R> + ?Sized,
    {
        let query = self.query.clone();
        self.load(api, query).await
    }

    /// Load `page` of the last query, clamped to the known page range.
    pub async fn go_to_page<A>(&mut self, api: &A, page: u32) -> bool
    where
        A: ResourceApi<R> + ?Sized,
    {
        let last = self.state.total_pages.max(1);
        let query = self.query.clone().page(page.clamp(1, last));
        self.load(api, query).await
    }

    pub async fn next_page<A>(&mut self, api: &A) -> bool
    where
        A: ResourceApi<R> + ?Sized,
    {
        let page = self.state.current_page.saturating_add(1);
        self.go_to_page(api, page).await
    }

    pub async fn prev_page<A>(&mut self, api: &A) -> bool
    where
        A: ResourceApi<R> + ?Sized,
    {
        let page = self.state.current_page.saturating_sub(1);
        self.go_to_page(api, page).await
    }

    /// Drop one row after a confirmed delete.
    pub fn remove(&mut self, id: ResourceId) -> Option<R> {
        let idx = self.state.items.iter().position(|r| r.id() == id)?;
        self.state.total_count = self.state.total_count.saturating_sub(1);
        Some(self.state.items.remove(idx))
    }

    /// Drop every row whose id is in `ids`; returns how many were present.
    pub fn remove_many(&mut self, ids: &[ResourceId]) -> usize {
        let before = self.state.items.len();
        self.state.items.retain(|r| !ids.contains(&r.id()));
        let removed = before - self.state.items.len();
        self.state.total_count = self.state.total_count.saturating_sub(removed as u64);
        removed
    }

    /// Swap in the server's copy of a row. Returns `false` if the row is gone.
    pub fn replace(&mut self, record: R) -> bool {
        match self.state.items.iter_mut().find(|r| r.id() == record.id()) {
            Some(slot) => {
                *slot = record;
                true
            }
            None => false,
        }
    }
}
