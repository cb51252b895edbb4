use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shopadmin_core::{Editable, FieldKind, FieldSpec, Resource, ResourceId, ResourceKind};

use crate::category::ActivityStatus;

/// Promotional banner shown on the storefront home page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Banner {
    pub id: ResourceId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<i64>,
    pub status: ActivityStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Resource for Banner {
    type Status = ActivityStatus;

    const KIND: ResourceKind = ResourceKind::Banner;

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
        &self.title
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.title.as_str()]
    }
}

const BANNER_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("title", "Title", FieldKind::Text),
    FieldSpec::optional("linkUrl", "Link", FieldKind::Text),
    FieldSpec::optional("position", "Position", FieldKind::Integer),
    FieldSpec::required("imageUrl", "Banner image", FieldKind::Image { upload_key: "image" }),
];

impl Editable for Banner {
    fn form_fields() -> &'static [FieldSpec] {
        BANNER_FIELDS
    }
}
