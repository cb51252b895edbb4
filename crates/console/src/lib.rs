//! Screen state for the admin console.
//!
//! Every list screen follows the same cycle: fetch a collection, filter it
//! locally, select rows, run a write, then reconcile the cached copy with
//! what the write did. The pieces are generic over [`Resource`] so one
//! implementation serves products, orders, sellers and the rest.
//!
//! Nothing here renders; hosts (the CLI, a UI) read state and call methods.
//!
//! [`Resource`]: shopadmin_core::Resource

pub mod collection;
pub mod counters;
pub mod detail;
pub mod filter;
pub mod form;
pub mod gate;
pub mod mutation;
pub mod navigation;
pub mod notify;
pub mod screen;
pub mod selection;

pub use collection::{CollectionState, ListController, LoadTicket};
pub use counters::{CountSlot, CountSource, StatusCounts, fetch_counts};
pub use detail::{CategoryDetail, ParentDetail, load_category, load_one, load_with_children};
pub use filter::{FilterState, StatusFilter, filter_items};
pub use form::{
    FieldValue, FormController, FormDraft, FormError, FormMode, FormPhase, ImageValue, SubmitOutcome, build_payload,
    validate,
};
pub use gate::{ConfirmationGate, DeleteTarget, GateState, IRREVERSIBLE_WARNING, Prompt};
pub use mutation::{InFlight, Op};
pub use navigation::Route;
pub use notify::{Notice, NoticeLevel, Notifier, RecordingNotifier, TracingNotifier};
pub use screen::{DeleteOutcome, ResourceScreen};
pub use selection::Selection;

#[cfg(test)]
pub(crate) mod test_support {
    use chrono::{TimeZone, Utc};
    use shopadmin_catalog::{Product, ProductStatus};
    use shopadmin_core::ResourceId;

    pub fn product(id: u64, status: ProductStatus) -> Product {
        Product {
            id: ResourceId::new(id),
            product_name: format!("Product {id}"),
            product_code: Some(format!("P-{id:04}")),
            brand: None,
            product_price: 10.0,
            discount_price: None,
            stock: None,
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
}
