use std::sync::Arc;

use chrono::{TimeZone, Utc};

use shopadmin_catalog::{Product, ProductStatus};
use shopadmin_client::{InMemoryApi, ListQuery, Operation, Page, ResourceApi, normalize_page};
use shopadmin_console::{
    CountSlot, CountSource, DeleteOutcome, ListController, Notice, NoticeLevel, RecordingNotifier, ResourceScreen,
    StatusFilter,
};
use shopadmin_core::{ApiError, ResourceId, ResourceKind};

fn product(id: u64, name: &str, status: ProductStatus) -> Product {
    Product {
        id: ResourceId::new(id),
        product_name: name.into(),
        product_code: None,
        brand: None,
        product_price: 19.99,
        discount_price: None,
        stock: Some(5),
        category_name: Some("Shoes".into()),
        sub_category_name: None,
        description: None,
        tags: vec![],
        image_url: None,
        seller_id: None,
        status,
        created_at: Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
        updated_at: None,
    }
}

fn catalog() -> Vec<Product> {
    vec![
        product(1, "Trail Runner", ProductStatus::Approved),
        product(2, "Court Classic", ProductStatus::Pending),
        product(3, "Desk Lamp", ProductStatus::Approved),
    ]
}

struct Fixture {
    api: Arc<InMemoryApi<Product>>,
    notifier: Arc<RecordingNotifier>,
    screen: ResourceScreen<Product, InMemoryApi<Product>>,
}

async fn mounted() -> Fixture {
    let api = Arc::new(InMemoryApi::with_records(catalog()));
    let notifier = Arc::new(RecordingNotifier::new());
    let mut screen: ResourceScreen<Product, _> = ResourceScreen::new(Arc::clone(&api), notifier.clone());
    screen.mount().await;
    Fixture { api, notifier, screen }
}

fn ids(items: &[&Product]) -> Vec<u64> {
    items.iter().map(|p| p.id.get()).collect()
}

#[tokio::test]
async fn mount_loads_list_and_counts_together() {
    let fx = mounted().await;

    assert_eq!(fx.screen.list().items().len(), 3);
    assert_eq!(fx.screen.list().state().total_count, 3);
    assert!(!fx.screen.list().is_loading());
    assert_eq!(fx.screen.counts().get(ProductStatus::Approved), &CountSlot::Ready(2));
    assert_eq!(fx.screen.counts().get(ProductStatus::Rejected), &CountSlot::Ready(0));
    assert_eq!(fx.api.call_count(Operation::List), 1);
    assert_eq!(fx.api.call_count(Operation::Count), 3);
}

#[tokio::test]
async fn approved_filter_then_select_all() {
    let mut fx = mounted().await;

    fx.screen.set_status_filter(StatusFilter::Only(ProductStatus::Approved));
    assert_eq!(ids(&fx.screen.visible()), vec![1, 3]);

    fx.screen.select_all();
    assert_eq!(fx.screen.selection().ids(), vec![ResourceId::new(1), ResourceId::new(3)]);
    fx.screen.select_all();
    assert!(fx.screen.selection().is_empty());

    assert_eq!(fx.screen.list().items().len(), 3);
}

#[tokio::test]
async fn confirmed_delete_reconciles_items_and_selection() {
    let mut fx = mounted().await;
    fx.screen.toggle(ResourceId::new(2));
    fx.screen.toggle(ResourceId::new(3));

    let prompt = fx.screen.request_delete(ResourceId::new(2)).unwrap();
    assert_eq!(prompt.message, "Delete product \"Court Classic\"?");
    assert_eq!(fx.api.call_count(Operation::Delete), 0);

    let outcome = fx.screen.confirm_delete().await.unwrap().unwrap();

    assert_eq!(outcome, DeleteOutcome::Deleted(ResourceId::new(2)));
    assert_eq!(fx.screen.list().items().len(), 2);
    assert!(!fx.screen.list().contains(ResourceId::new(2)));
    assert_eq!(fx.screen.selection().ids(), vec![ResourceId::new(3)]);
    assert!(!fx.screen.gate().is_open());
    assert!(!fx.screen.in_flight().is_deleting);
    assert_eq!(fx.notifier.last().map(|n| n.level), Some(NoticeLevel::Success));
}

#[tokio::test]
async fn cancelled_prompt_sends_nothing() {
    let mut fx = mounted().await;
    fx.screen.request_delete(ResourceId::new(1)).unwrap();
    fx.screen.cancel_delete();

    assert!(fx.screen.confirm_delete().await.is_none());
    assert_eq!(fx.api.call_count(Operation::Delete), 0);
    assert_eq!(fx.screen.list().items().len(), 3);
}

#[tokio::test]
async fn partial_bulk_delete_still_clears_every_requested_row() {
    let mut fx = mounted().await;
    for id in 1..=3 {
        fx.screen.toggle(ResourceId::new(id));
    }
    // Another operator already removed #2.
    ResourceApi::<Product>::delete(&*fx.api, ResourceId::new(2)).await.unwrap();

    let prompt = fx.screen.request_bulk_delete().unwrap();
    assert_eq!(prompt.message, "Delete 3 selected products?");
    let outcome = fx.screen.confirm_delete().await.unwrap().unwrap();

    assert_eq!(outcome, DeleteOutcome::BulkDeleted { requested: 3, deleted: 2 });
    assert!(fx.screen.list().items().is_empty());
    assert!(fx.screen.selection().is_empty());
    assert_eq!(fx.notifier.last(), Some(Notice::success("Deleted 2 of 3 products")));
}

#[tokio::test]
async fn failed_mutation_leaves_state_untouched() {
    let mut fx = mounted().await;
    fx.screen.toggle(ResourceId::new(1));
    fx.api.fail_next(Operation::Delete, ApiError::network("connection reset"));
    fx.api
        .fail_next(Operation::BulkDelete, ApiError::server(409, Some("Products have open orders".into())));

    let err = fx.screen.delete(ResourceId::new(1)).await.unwrap_err();
    assert!(matches!(err, ApiError::Network(_)));
    assert_eq!(fx.notifier.last(), Some(Notice::error("Failed to delete product")));

    assert!(fx.screen.bulk_delete(&[ResourceId::new(1)]).await.is_err());
    assert_eq!(fx.notifier.last(), Some(Notice::error("Products have open orders")));

    assert_eq!(fx.screen.list().items().len(), 3);
    assert_eq!(fx.screen.selection().ids(), vec![ResourceId::new(1)]);
    assert!(!fx.screen.in_flight().any());
}

#[tokio::test]
async fn second_delete_while_first_is_in_flight_is_refused() {
    let mut fx = mounted().await;

    fx.screen.begin_delete().unwrap();
    let err = fx.screen.delete(ResourceId::new(1)).await.unwrap_err();

    assert_eq!(err, ApiError::Busy);
    assert_eq!(fx.api.call_count(Operation::Delete), 0);

    fx.screen.finish_delete(ResourceId::new(1), Err(ApiError::network("dropped"))).unwrap_err();
    assert!(fx.screen.delete(ResourceId::new(1)).await.is_ok());
}

#[tokio::test]
async fn status_toggle_patches_row_in_place() {
    let mut fx = mounted().await;

    let updated = fx.screen.set_status(ResourceId::new(2), ProductStatus::Rejected).await.unwrap();

    assert_eq!(updated.status, ProductStatus::Rejected);
    let row = fx.screen.list().find(ResourceId::new(2)).unwrap();
    assert_eq!(row.status, ProductStatus::Rejected);
    assert_eq!(fx.api.call_count(Operation::List), 1);
    assert_eq!(fx.notifier.last(), Some(Notice::success("Product marked as Rejected")));
    assert!(!fx.screen.in_flight().is_updating_status(ResourceId::new(2)));

    let counts = fx.screen.count_from_list();
    assert_eq!(counts.get(ProductStatus::Rejected), &CountSlot::Ready(1));
    assert_eq!(counts.total(), 3);
}

#[tokio::test]
async fn failed_status_update_keeps_the_old_status() {
    let mut fx = mounted().await;
    fx.api.fail_next(Operation::SetStatus, ApiError::network("connection reset"));

    let err = fx.screen.set_status(ResourceId::new(2), ProductStatus::Approved).await.unwrap_err();

    assert!(matches!(err, ApiError::Network(_)));
    let row = fx.screen.list().find(ResourceId::new(2)).unwrap();
    assert_eq!(row.status, ProductStatus::Pending);
    assert!(!fx.screen.in_flight().is_updating_status(ResourceId::new(2)));
    assert_eq!(fx.notifier.last(), Some(Notice::error("Failed to update status of product")));
}

#[tokio::test]
async fn list_derived_counts_follow_every_write() {
    let mut fx = mounted().await;
    fx.screen.count_from_list();
    assert_eq!(fx.screen.count_source(), CountSource::List);
    assert_eq!(fx.screen.counts().get(ProductStatus::Approved), &CountSlot::Ready(2));

    fx.screen.delete(ResourceId::new(1)).await.unwrap();
    assert_eq!(fx.screen.counts().get(ProductStatus::Approved), &CountSlot::Ready(1));
    assert_eq!(fx.screen.counts().total(), 2);

    fx.screen.set_status(ResourceId::new(3), ProductStatus::Rejected).await.unwrap();
    assert_eq!(fx.screen.counts().get(ProductStatus::Approved), &CountSlot::Ready(0));
    assert_eq!(fx.screen.counts().get(ProductStatus::Rejected), &CountSlot::Ready(1));

    fx.screen.bulk_delete(&[ResourceId::new(2)]).await.unwrap();
    assert_eq!(fx.screen.counts().get(ProductStatus::Pending), &CountSlot::Ready(0));
    assert_eq!(fx.screen.counts().total(), 1);

    // A row removed elsewhere drops out of the counts on reload.
    ResourceApi::<Product>::delete(&*fx.api, ResourceId::new(3)).await.unwrap();
    fx.screen.reload().await;
    assert_eq!(fx.screen.counts().total(), 0);
    assert_eq!(fx.api.call_count(Operation::Count), 3);
}

#[tokio::test]
async fn endpoint_counts_are_left_alone_by_writes() {
    let mut fx = mounted().await;
    assert_eq!(fx.screen.count_source(), CountSource::Endpoints);

    fx.screen.delete(ResourceId::new(1)).await.unwrap();

    assert_eq!(fx.screen.counts().get(ProductStatus::Approved), &CountSlot::Ready(2));
    fx.screen.refresh_counts().await;
    assert_eq!(fx.screen.counts().get(ProductStatus::Approved), &CountSlot::Ready(1));
}

#[test]
fn bare_array_response_pages_forward() {
    let rows: Vec<_> = (1..=5)
        .map(|i| serde_json::to_value(product(i, "Item", ProductStatus::Pending)).unwrap())
        .collect();
    let body = serde_json::Value::Array(rows);
    let mut list = ListController::<Product>::new();

    let query = ListQuery::new().page(2).limit(2);
    let ticket = list.begin_load(query.clone());
    let page = normalize_page(body, ResourceKind::Product, &query, 20);
    assert!(list.finish_load(ticket, page));

    let state = list.state();
    assert_eq!(state.current_page, 2);
    assert_eq!(state.total_pages, 3);
    assert_eq!(state.total_count, 5);
    let ids: Vec<_> = list.items().iter().map(|p| p.id.get()).collect();
    assert_eq!(ids, vec![3, 4]);
}

#[tokio::test]
async fn fetch_failure_keeps_previous_items() {
    let mut fx = mounted().await;
    fx.api.fail_next(Operation::List, ApiError::network("timeout"));

    assert!(fx.screen.reload().await);

    let state = fx.screen.list().state();
    assert_eq!(state.items.len(), 3);
    assert_eq!(state.error.as_deref(), Some("Failed to fetch products"));
    assert!(!state.is_loading);
}

#[tokio::test]
async fn paging_clamps_to_known_range() {
    let api = Arc::new(InMemoryApi::with_records((1..=5).map(|i| product(i, "Item", ProductStatus::Pending))));
    let notifier = Arc::new(RecordingNotifier::new());
    let mut screen: ResourceScreen<Product, _> = ResourceScreen::new(Arc::clone(&api), notifier).with_page_size(2);
    screen.mount().await;
    assert_eq!(screen.list().state().total_pages, 3);

    screen.next_page().await;
    screen.next_page().await;
    screen.next_page().await;
    assert_eq!(screen.list().state().current_page, 3);
    assert_eq!(screen.list().items().len(), 1);

    screen.prev_page().await;
    assert_eq!(screen.list().state().current_page, 2);
    assert_eq!(screen.list().query().limit, Some(2));
}

#[test]
fn stale_list_response_is_discarded() {
    let mut list = ListController::<Product>::new();
    let first = list.begin_load(ListQuery::new().page(1));
    let second = list.begin_load(ListQuery::new().page(2));

    assert!(list.finish_load(second, Ok(Page::from_items(vec![product(2, "Newer", ProductStatus::Pending)], 0))));
    assert!(!list.finish_load(first, Ok(Page::from_items(vec![product(1, "Older", ProductStatus::Pending)], 0))));

    assert_eq!(list.items()[0].product_name, "Newer");
    assert_eq!(list.query().page, Some(2));
    assert!(!list.is_loading());
}
