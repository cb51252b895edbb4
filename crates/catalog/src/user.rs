use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shopadmin_core::{Editable, FieldKind, FieldSpec, Resource, ResourceId, ResourceKind};

shopadmin_core::status_enum! {
    /// Account state of a storefront customer.
    UserStatus {
        Active => ("active", "Active", Success),
        Suspended => ("suspended", "Suspended", Warning),
        Deleted => ("deleted", "Deleted", Danger),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: ResourceId,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    pub status: UserStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Resource for User {
    type Status = UserStatus;

    const KIND: ResourceKind = ResourceKind::User;

    fn id(&self) -> ResourceId {
        self.id
    }

    fn status(&self) -> UserStatus {
        self.status
    }

    fn set_status(&mut self, status: UserStatus) {
        self.status = status;
    }

    fn display_name(&self) -> &str {
        &self.name
    }

    fn search_fields(&self) -> Vec<&str> {
        [Some(self.name.as_str()), Some(self.email.as_str()), self.phone.as_deref()]
            .into_iter()
            .flatten()
            .collect()
    }
}

const USER_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("name", "Name", FieldKind::Text),
    FieldSpec::required("email", "Email", FieldKind::Text),
    FieldSpec::optional("phone", "Phone", FieldKind::Text),
    FieldSpec::optional("role", "Role", FieldKind::Text),
];

impl Editable for User {
    fn form_fields() -> &'static [FieldSpec] {
        USER_FIELDS
    }
}
