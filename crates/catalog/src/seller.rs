use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shopadmin_core::{Editable, FieldKind, FieldSpec, Resource, ResourceId, ResourceKind};

shopadmin_core::status_enum! {
    /// Onboarding state of a marketplace seller.
    SellerStatus {
        Pending => ("pending", "Pending review", Warning),
        Approved => ("approved", "Approved", Success),
        Rejected => ("rejected", "Rejected", Danger),
        Suspended => ("suspended", "Suspended", Neutral),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Seller {
    pub id: ResourceId,
    pub business_name: String,
    pub owner_name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gst_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    pub status: SellerStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Resource for Seller {
    type Status = SellerStatus;

    const KIND: ResourceKind = ResourceKind::Seller;

    fn id(&self) -> ResourceId {
        self.id
    }

    fn status(&self) -> SellerStatus {
        self.status
    }

    fn set_status(&mut self, status: SellerStatus) {
        self.status = status;
    }

    fn display_name(&self) -> &str {
        &self.business_name
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.business_name.as_str(), self.owner_name.as_str(), self.email.as_str()]
    }
}

const SELLER_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("businessName", "Business name", FieldKind::Text),
    FieldSpec::required("ownerName", "Owner name", FieldKind::Text),
    FieldSpec::required("email", "Email", FieldKind::Text),
    FieldSpec::optional("phone", "Phone", FieldKind::Text),
    FieldSpec::optional("gstNumber", "GST number", FieldKind::Text),
    FieldSpec::optional("logoUrl", "Logo", FieldKind::Image { upload_key: "logo" }),
];

impl Editable for Seller {
    fn form_fields() -> &'static [FieldSpec] {
        SELLER_FIELDS
    }
}
