use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shopadmin_core::{Editable, FieldKind, FieldSpec, Resource, ResourceId, ResourceKind};

use crate::category::ActivityStatus;
use crate::serde_helpers::string_list;

/// A paid membership plan offered to customers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Membership {
    pub id: ResourceId,
    pub name: String,
    pub price: f64,
    pub duration_days: u32,
    #[serde(default, deserialize_with = "string_list")]
    pub benefits: Vec<String>,
    #[serde(default)]
    pub is_featured: bool,
    pub status: ActivityStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Resource for Membership {
    type Status = ActivityStatus;

    const KIND: ResourceKind = ResourceKind::Membership;

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

const MEMBERSHIP_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("name", "Plan name", FieldKind::Text),
    FieldSpec::required("price", "Price", FieldKind::Decimal),
    FieldSpec::required("durationDays", "Duration (days)", FieldKind::Integer),
    FieldSpec::optional("benefits", "Benefits", FieldKind::List),
    FieldSpec::optional("isFeatured", "Featured", FieldKind::Flag),
];

impl Editable for Membership {
    fn form_fields() -> &'static [FieldSpec] {
        MEMBERSHIP_FIELDS
    }
}
