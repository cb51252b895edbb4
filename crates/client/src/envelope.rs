//! List response normalization.
//!
//! The API answers `GET /{resource}` with either a bare array or a paginated
//! envelope whose key names drift between resources (`items` vs `products`,
//! `totalItems` vs `totalProducts`). Everything past this module sees a
//! single `Page` shape.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use shopadmin_core::{ApiError, ApiResult, ResourceKind};

use crate::query::ListQuery;

/// One page of a collection, always with pagination fields filled in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_items: u64,
    pub total_pages: u32,
    pub current_page: u32,
}

impl<T> Page<T> {
    /// First page of a complete, unpaginated list.
    pub fn from_items(items: Vec<T>, page_size: u32) -> Self {
        Self::paginate(items, 1, page_size)
    }

    /// Cut page `page` out of a complete list. The page is clamped to the
    /// known range; a zero page size keeps everything on page 1.
    pub fn paginate(items: Vec<T>, page: u32, page_size: u32) -> Self {
        let total_items = items.len() as u64;
        let total_pages = pages_for(total_items, page_size);
        if page_size == 0 {
            return Self { items, total_items, total_pages, current_page: 1 };
        }
        let current_page = page.clamp(1, total_pages.max(1));
        let skip = (current_page as usize - 1).saturating_mul(page_size as usize);
        let items = items.into_iter().skip(skip).take(page_size as usize).collect();
        Self { items, total_items, total_pages, current_page }
    }
}

/// `ceil(total / page_size)`; a zero page size means "everything on one page".
pub fn pages_for(total: u64, page_size: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    if page_size == 0 {
        return 1;
    }
    let pages = total.div_ceil(u64::from(page_size));
    u32::try_from(pages).unwrap_or(u32::MAX)
}

/// Convert any supported list body into a [`Page`].
///
/// The server-reported total wins; the item count is only used when the body
/// is a bare array or the envelope carries no total at all.
pub fn normalize_page<T: DeserializeOwned>(
    body: Value,
    kind: ResourceKind,
    query: &ListQuery,
    default_page_size: u32,
) -> ApiResult<Page<T>> {
    let page_size = query.limit.unwrap_or(default_page_size);

    match body {
        Value::Array(raw) => {
            // The server ignored paging; apply it here.
            let items = decode_items(raw, kind)?;
            Ok(Page::paginate(items, query.page.unwrap_or(1), page_size))
        }
        Value::Object(mut obj) => {
            let raw = take_items(&mut obj, kind).ok_or_else(|| {
                ApiError::decode(format!(
                    "list response for {kind} has no `items`, `{}` or `data` array",
                    kind.collection_key()
                ))
            })?;
            let items: Vec<T> = decode_items(raw, kind)?;

            let total_items = read_u64(&obj, &["totalItems", kind.total_key(), "total", "count"])
                .unwrap_or(items.len() as u64);
            let total_pages = read_u64(&obj, &["totalPages"])
                .and_then(|p| u32::try_from(p).ok())
                .unwrap_or_else(|| pages_for(total_items, page_size));
            let current_page = read_u64(&obj, &["currentPage", "page"])
                .and_then(|p| u32::try_from(p).ok())
                .or(query.page)
                .unwrap_or(1);

            Ok(Page { items, total_items, total_pages, current_page })
        }
        other => Err(ApiError::decode(format!(
            "list response for {kind} must be an array or object, got {}",
            json_type(&other)
        ))),
    }
}

fn take_items(obj: &mut Map<String, Value>, kind: ResourceKind) -> Option<Vec<Value>> {
    for key in ["items", kind.collection_key(), "data"] {
        if matches!(obj.get(key), Some(Value::Array(_))) {
            if let Some(Value::Array(items)) = obj.remove(key) {
                return Some(items);
            }
        }
    }
    None
}

fn decode_items<T: DeserializeOwned>(raw: Vec<Value>, kind: ResourceKind) -> ApiResult<Vec<T>> {
    raw.into_iter()
        .enumerate()
        .map(|(idx, v)| {
            serde_json::from_value(v)
                .map_err(|e| ApiError::decode(format!("{kind}[{idx}]: {e}")))
        })
        .collect()
}

fn read_u64(obj: &Map<String, Value>, keys: &[&str]) -> Option<u64> {
    keys.iter().find_map(|key| match obj.get(*key)? {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

pub(crate) fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, PartialEq, Deserialize)]
    struct Row {
        id: u64,
    }

    #[test]
    fn bare_array_derives_pagination_from_length() {
        let page: Page<Row> =
            normalize_page(json!([{"id":1},{"id":2},{"id":3}]), ResourceKind::Product, &ListQuery::new().limit(2), 20)
                .unwrap();
        assert_eq!(page.items, vec![Row { id: 1 }, Row { id: 2 }]);
        assert_eq!(page.total_items, 3);
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.current_page, 1);
    }

    #[test]
    fn bare_array_is_paged_on_the_client() {
        let body = json!([{"id":1},{"id":2},{"id":3},{"id":4},{"id":5}]);
        let page: Page<Row> =
            normalize_page(body.clone(), ResourceKind::Product, &ListQuery::new().page(2).limit(2), 20).unwrap();
        assert_eq!(page.items, vec![Row { id: 3 }, Row { id: 4 }]);
        assert_eq!((page.total_items, page.total_pages, page.current_page), (5, 3, 2));

        let past_end: Page<Row> =
            normalize_page(body.clone(), ResourceKind::Product, &ListQuery::new().page(9).limit(2), 20).unwrap();
        assert_eq!(past_end.items, vec![Row { id: 5 }]);
        assert_eq!(past_end.current_page, 3);

        let unlimited: Page<Row> =
            normalize_page(body, ResourceKind::Product, &ListQuery::new().page(2).limit(0), 20).unwrap();
        assert_eq!(unlimited.items.len(), 5);
        assert_eq!((unlimited.total_pages, unlimited.current_page), (1, 1));
    }

    #[test]
    fn paginate_empty_list_stays_on_page_one() {
        let page = Page::<Row>::paginate(vec![], 4, 10);
        assert!(page.items.is_empty());
        assert_eq!((page.total_items, page.total_pages, page.current_page), (0, 0, 1));
    }

    #[test]
    fn envelope_fields_take_precedence() {
        let body = json!({
            "items": [{"id": 11}, {"id": 12}],
            "totalItems": 57,
            "totalPages": 6,
            "currentPage": 3
        });
        let page: Page<Row> = normalize_page(body, ResourceKind::Order, &ListQuery::new(), 10).unwrap();
        assert_eq!(page.items, vec![Row { id: 11 }, Row { id: 12 }]);
        assert_eq!((page.total_items, page.total_pages, page.current_page), (57, 6, 3));
    }

    #[test]
    fn resource_named_envelope_is_recognised() {
        let body = json!({ "products": [{"id": 1}], "totalProducts": "41" });
        let page: Page<Row> =
            normalize_page(body, ResourceKind::Product, &ListQuery::new().page(2), 20).unwrap();
        assert_eq!(page.total_items, 41);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.current_page, 2);
    }

    #[test]
    fn envelope_without_total_falls_back_to_length() {
        let body = json!({ "data": [{"id": 1}, {"id": 2}] });
        let page: Page<Row> = normalize_page(body, ResourceKind::User, &ListQuery::new(), 20).unwrap();
        assert_eq!(page.total_items, 2);
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn rejects_unrecognised_shapes() {
        let err = normalize_page::<Row>(json!({"rows": []}), ResourceKind::Ticket, &ListQuery::new(), 20)
            .unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));

        let err = normalize_page::<Row>(json!("nope"), ResourceKind::Ticket, &ListQuery::new(), 20)
            .unwrap_err();
        assert!(err.to_string().contains("got string"));
    }

    #[test]
    fn pages_for_edges() {
        assert_eq!(pages_for(0, 20), 0);
        assert_eq!(pages_for(20, 20), 1);
        assert_eq!(pages_for(21, 20), 2);
        assert_eq!(pages_for(5, 0), 1);
    }
}
