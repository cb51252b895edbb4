use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shopadmin_core::{Editable, FieldKind, FieldSpec, Resource, ResourceId, ResourceKind};

use crate::category::ActivityStatus;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Warehouse {
    pub id: ResourceId,
    pub name: String,
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<i64>,
    pub status: ActivityStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Resource for Warehouse {
    type Status = ActivityStatus;

    const KIND: ResourceKind = ResourceKind::Warehouse;

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
        [Some(self.name.as_str()), Some(self.code.as_str()), self.city.as_deref()]
            .into_iter()
            .flatten()
            .collect()
    }
}

const WAREHOUSE_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("name", "Name", FieldKind::Text),
    FieldSpec::required("code", "Code", FieldKind::Text),
    FieldSpec::optional("address", "Address", FieldKind::Text),
    FieldSpec::optional("city", "City", FieldKind::Text),
    FieldSpec::optional("capacity", "Capacity", FieldKind::Integer),
];

impl Editable for Warehouse {
    fn form_fields() -> &'static [FieldSpec] {
        WAREHOUSE_FIELDS
    }
}
