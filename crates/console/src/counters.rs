//! Per-status counters shown above list screens.

use std::collections::BTreeMap;
use std::sync::Arc;

use tokio::task::JoinSet;

use shopadmin_client::ResourceApi;
use shopadmin_core::{Resource, StatusKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CountSlot {
    Loading,
    Ready(u64),
    Failed(String),
}

impl CountSlot {
    pub fn value(&self) -> Option<u64> {
        match self {
            CountSlot::Ready(n) => Some(*n),
            _ => None,
        }
    }
}

/// Where a screen's counters come from.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum CountSource {
    /// One count request per status.
    #[default]
    Endpoints,
    /// Grouped from the loaded rows, regrouped whenever they change.
    List,
}

/// One slot per status value, always in the enum's display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusCounts<S: StatusKind> {
    slots: BTreeMap<S, CountSlot>,
}

impl<S: StatusKind> Default for StatusCounts<S> {
    fn default() -> Self {
        Self::loading()
    }
}

impl<S: StatusKind> StatusCounts<S> {
    pub fn loading() -> Self {
        Self {
            slots: S::all().iter().map(|s| (*s, CountSlot::Loading)).collect(),
        }
    }

    /// Group already fetched rows by status; absent statuses count zero.
    pub fn from_items<R: Resource<Status = S>>(items: &[R]) -> Self {
        let mut slots: BTreeMap<S, CountSlot> = S::all().iter().map(|s| (*s, CountSlot::Ready(0))).collect();
        for item in items {
            if let Some(CountSlot::Ready(n)) = slots.get_mut(&item.status()) {
                *n += 1;
            }
        }
        Self { slots }
    }

    pub fn get(&self, status: S) -> &CountSlot {
        self.slots.get(&status).unwrap_or(&CountSlot::Loading)
    }

    pub fn set(&mut self, status: S, slot: CountSlot) {
        self.slots.insert(status, slot);
    }

    /// `(status, slot)` pairs in display order.
    pub fn iter(&self) -> impl Iterator<Item = (S, &CountSlot)> {
        S::all().iter().map(move |s| (*s, self.get(*s)))
    }

    /// Sum of the ready slots.
    pub fn total(&self) -> u64 {
        self.slots.values().filter_map(CountSlot::value).sum()
    }

    pub fn is_loading(&self) -> bool {
        self.slots.values().any(|s| *s == CountSlot::Loading)
    }
}

/// Ask the count endpoint once per status, all requests in flight at once.
/// Each slot settles on its own; one failure never hides the others.
pub async fn fetch_counts<R, A>(api: Arc<A>) -> StatusCounts<R::Status>
where
    R: Resource,
    A: ResourceApi<R> + ?Sized + 'static,
{
    let mut counts = StatusCounts::loading();
    let mut tasks = JoinSet::new();
    for status in R::Status::all().iter().copied() {
        let api = Arc::clone(&api);
        tasks.spawn(async move { (status, ResourceApi::<R>::count(&*api, status).await) });
    }

    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((status, Ok(n))) => counts.set(status, CountSlot::Ready(n)),
            Ok((status, Err(err))) => {
                tracing::warn!(resource = %R::KIND, %status, error = %err, "count request failed");
                let fallback = format!("Failed to count {} {}", status.badge().label.to_lowercase(), R::KIND.plural_label());
                counts.set(status, CountSlot::Failed(err.user_message(&fallback)));
            }
            Err(join_err) => tracing::error!(resource = %R::KIND, error = %join_err, "count task aborted"),
        }
    }

    for status in R::Status::all() {
        if *counts.get(*status) == CountSlot::Loading {
            counts.set(*status, CountSlot::Failed("count unavailable".into()));
        }
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::product;
    use shopadmin_catalog::{Product, ProductStatus};
    use shopadmin_client::{InMemoryApi, Operation};
    use shopadmin_core::ApiError;

    #[test]
    fn grouping_includes_absent_statuses() {
        let items = vec![
            product(1, ProductStatus::Approved),
            product(2, ProductStatus::Approved),
            product(3, ProductStatus::Pending),
        ];
        let counts = StatusCounts::from_items(&items);
        assert_eq!(counts.get(ProductStatus::Approved), &CountSlot::Ready(2));
        assert_eq!(counts.get(ProductStatus::Pending), &CountSlot::Ready(1));
        assert_eq!(counts.get(ProductStatus::Rejected), &CountSlot::Ready(0));
        assert_eq!(counts.total(), 3);
        let order: Vec<_> = counts.iter().map(|(s, _)| s).collect();
        assert_eq!(order, ProductStatus::all().to_vec());
    }

    #[tokio::test]
    async fn endpoint_counts_fail_independently() {
        let api = Arc::new(InMemoryApi::with_records(vec![
            product(1, ProductStatus::Approved),
            product(2, ProductStatus::Rejected),
            product(3, ProductStatus::Approved),
        ]));
        api.fail_count_for(ProductStatus::Pending, ApiError::server(500, Some("count unavailable".into())));

        let counts = fetch_counts::<Product, _>(Arc::clone(&api)).await;

        assert_eq!(counts.get(ProductStatus::Approved), &CountSlot::Ready(2));
        assert_eq!(counts.get(ProductStatus::Rejected), &CountSlot::Ready(1));
        assert_eq!(counts.get(ProductStatus::Pending), &CountSlot::Failed("count unavailable".into()));
        assert_eq!(counts.total(), 3);
        assert!(!counts.is_loading());
        assert_eq!(api.call_count(Operation::Count), 3);
    }

    #[tokio::test]
    async fn network_failure_uses_fallback_text() {
        let api = Arc::new(InMemoryApi::<Product>::new());
        api.fail_count_for(ProductStatus::Rejected, ApiError::network("connection refused"));

        let counts = fetch_counts::<Product, _>(api).await;
        assert_eq!(
            counts.get(ProductStatus::Rejected),
            &CountSlot::Failed("Failed to count rejected products".into())
        );
        assert_eq!(counts.get(ProductStatus::Pending), &CountSlot::Ready(0));
    }
}
