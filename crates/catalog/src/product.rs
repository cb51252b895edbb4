use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shopadmin_core::{Editable, FieldKind, FieldSpec, Resource, ResourceId, ResourceKind};

use crate::serde_helpers::string_list;

shopadmin_core::status_enum! {
    /// Review state of a seller-submitted product.
    ProductStatus {
        Pending => ("pending", "Pending", Warning),
        Approved => ("approved", "Approved", Success),
        Rejected => ("rejected", "Rejected", Danger),
    }
}

/// A catalog product as returned by `GET /products/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ResourceId,
    pub product_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    pub product_price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_category_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "string_list")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seller_id: Option<ResourceId>,
    pub status: ProductStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Product {
    /// Price the storefront actually charges.
    pub fn effective_price(&self) -> f64 {
        match self.discount_price {
            Some(discount) if discount > 0.0 && discount < self.product_price => discount,
            _ => self.product_price,
        }
    }
}

impl Resource for Product {
    type Status = ProductStatus;

    const KIND: ResourceKind = ResourceKind::Product;

    fn id(&self) -> ResourceId {
        self.id
    }

    fn status(&self) -> ProductStatus {
        self.status
    }

    fn set_status(&mut self, status: ProductStatus) {
        self.status = status;
    }

    fn display_name(&self) -> &str {
        &self.product_name
    }

    fn search_fields(&self) -> Vec<&str> {
        [Some(self.product_name.as_str()), self.product_code.as_deref(), self.brand.as_deref()]
            .into_iter()
            .flatten()
            .collect()
    }

    fn category(&self) -> Option<&str> {
        self.category_name.as_deref()
    }

    fn subcategory(&self) -> Option<&str> {
        self.sub_category_name.as_deref()
    }
}

const PRODUCT_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("productName", "Product name", FieldKind::Text),
    FieldSpec::optional("productCode", "Product code", FieldKind::Text),
    FieldSpec::optional("brand", "Brand", FieldKind::Text),
    FieldSpec::required("productPrice", "Price", FieldKind::Decimal),
    FieldSpec::optional("discountPrice", "Discount price", FieldKind::Decimal),
    FieldSpec::optional("stock", "Stock", FieldKind::Integer),
    FieldSpec::required("categoryName", "Category", FieldKind::Text),
    FieldSpec::optional("subCategoryName", "Subcategory", FieldKind::Text),
    FieldSpec::optional("description", "Description", FieldKind::Text),
    FieldSpec::optional("tags", "Tags", FieldKind::List),
    FieldSpec::optional("imageUrl", "Image", FieldKind::Image { upload_key: "image" }),
];

impl Editable for Product {
    fn form_fields() -> &'static [FieldSpec] {
        PRODUCT_FIELDS
    }
}
