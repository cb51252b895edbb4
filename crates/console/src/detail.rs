//! Single-record views.

use shopadmin_catalog::{Category, SubCategory};
use shopadmin_client::{ListQuery, ResourceApi};
use shopadmin_core::{ApiResult, Resource, ResourceId};

pub async fn load_one<R, A>(api: &A, id: ResourceId) -> ApiResult<R>
where
    R: Resource,
    A: ResourceApi<R> + ?Sized,
{
    tracing::debug!(resource = %R::KIND, %id, "loading record");
    let record = api.get(id).await;
    if let Err(err) = &record {
        tracing::error!(resource = %R::KIND, %id, error = %err, "record load failed");
    }
    record
}

/// A record plus the children listed under it.
#[derive(Debug, Clone, PartialEq)]
pub struct ParentDetail<P, C> {
    pub parent: P,
    pub children: Vec<C>,
}

/// Load the parent, then the children selected by `children_of(&parent)`.
/// The second request depends on the first and is only sent once it succeeds.
pub async fn load_with_children<P, C, PA, CA, F>(
    parent_api: &PA,
    child_api: &CA,
    id: ResourceId,
    children_of: F,
) -> ApiResult<ParentDetail<P, C>>
where
    P: Resource,
    C: Resource,
    PA: ResourceApi<P> + ?Sized,
    CA: ResourceApi<C> + ?Sized,
    F: FnOnce(&P) -> ListQuery,
{
    let parent = load_one(parent_api, id).await?;
    let query = children_of(&parent);
    let children = child_api.list(&query).await?.items;
    tracing::debug!(
        resource = %P::KIND,
        %id,
        children = children.len(),
        "loaded {} with {}",
        P::KIND.label(),
        C::KIND.plural_label()
    );
    Ok(ParentDetail { parent, children })
}

pub type CategoryDetail = ParentDetail<Category, SubCategory>;

/// A category and its subcategories (matched by category name).
pub async fn load_category<CA, SA>(categories: &CA, subcategories: &SA, id: ResourceId) -> ApiResult<CategoryDetail>
where
    CA: ResourceApi<Category> + ?Sized,
    SA: ResourceApi<SubCategory> + ?Sized,
{
    load_with_children(categories, subcategories, id, |category: &Category| {
        ListQuery::new().category(category.name.clone())
    })
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use shopadmin_catalog::ActivityStatus;
    use shopadmin_client::{InMemoryApi, Operation};

    fn category(id: u64, name: &str) -> Category {
        Category {
            id: ResourceId::new(id),
            name: name.into(),
            description: None,
            image_url: None,
            status: ActivityStatus::Active,
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            updated_at: None,
        }
    }

    fn sub(id: u64, name: &str, category_id: u64, category_name: &str) -> SubCategory {
        SubCategory {
            id: ResourceId::new(id),
            name: name.into(),
            category_id: ResourceId::new(category_id),
            category_name: Some(category_name.into()),
            status: ActivityStatus::Active,
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            updated_at: None,
        }
    }

    #[tokio::test]
    async fn category_detail_lists_its_subcategories() {
        let categories = InMemoryApi::with_records(vec![category(1, "Shoes"), category(2, "Lighting")]);
        let subcategories = InMemoryApi::with_records(vec![
            sub(10, "Running", 1, "Shoes"),
            sub(11, "Desk lamps", 2, "Lighting"),
            sub(12, "Hiking", 1, "Shoes"),
        ]);

        let detail = load_category(&categories, &subcategories, ResourceId::new(1)).await.unwrap();

        assert_eq!(detail.parent.name, "Shoes");
        let names: Vec<_> = detail.children.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Running", "Hiking"]);
    }

    #[tokio::test]
    async fn children_are_not_requested_when_parent_fails() {
        let categories = InMemoryApi::<Category>::new();
        let subcategories = InMemoryApi::<SubCategory>::new();

        let err = load_category(&categories, &subcategories, ResourceId::new(3)).await.unwrap_err();

        assert_eq!(err.server_message(), Some("Category 3 not found"));
        assert_eq!(subcategories.call_count(Operation::List), 0);
    }
}
