use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shopadmin_core::{Editable, FieldKind, FieldSpec, Resource, ResourceId, ResourceKind};

shopadmin_core::status_enum! {
    /// Visibility toggle shared by catalog structure and merchandising records.
    ActivityStatus {
        Active => ("active", "Active", Success),
        Inactive => ("inactive", "Inactive", Neutral),
    }
}

/// Top-level product category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: ResourceId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub status: ActivityStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Resource for Category {
    type Status = ActivityStatus;

    const KIND: ResourceKind = ResourceKind::Category;

    fn id(&self) -> ResourceId {
        self.id
    }

    fn status(&self) -> ActivityStatus {
        self.status
    }

    fn set_status(&mut self, status: ActivityStatus) {
        self.status = status;
    }

    fn display_name(&self) -> &str {
        &self.name
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str()]
    }
}

const CATEGORY_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("name", "Name", FieldKind::Text),
    FieldSpec::optional("description", "Description", FieldKind::Text),
    FieldSpec::optional("imageUrl", "Image", FieldKind::Image { upload_key: "image" }),
];

impl Editable for Category {
    fn form_fields() -> &'static [FieldSpec] {
        CATEGORY_FIELDS
    }
}

/// Second-level category, always owned by a [`Category`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubCategory {
    pub id: ResourceId,
    pub name: String,
    pub category_id: ResourceId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_name: Option<String>,
    pub status: ActivityStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Resource for SubCategory {
    type Status = ActivityStatus;

    const KIND: ResourceKind = ResourceKind::SubCategory;

    fn id(&self) -> ResourceId {
        self.id
    }

    fn status(&self) -> ActivityStatus {
        self.status
    }

    fn set_status(&mut self, status: ActivityStatus) {
        self.status = status;
    }

    fn display_name(&self) -> &str {
        &self.name
    }

    fn search_fields(&self) -> Vec<&str> {
        [Some(self.name.as_str()), self.category_name.as_deref()]
            .into_iter()
            .flatten()
            .collect()
    }

    fn category(&self) -> Option<&str> {
        self.category_name.as_deref()
    }
}

const SUBCATEGORY_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("name", "Name", FieldKind::Text),
    FieldSpec::required("categoryId", "Parent category", FieldKind::Integer),
];

impl Editable for SubCategory {
    fn form_fields() -> &'static [FieldSpec] {
        SUBCATEGORY_FIELDS
    }
}
