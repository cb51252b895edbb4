use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shopadmin_core::{Editable, FieldKind, FieldSpec, Resource, ResourceId, ResourceKind};

shopadmin_core::status_enum! {
    /// Fulfilment state. The API spells these capitalised.
    OrderStatus {
        Pending => ("Pending", "Pending", Warning),
        Processing => ("Processing", "Processing", Info),
        Shipped => ("Shipped", "Shipped", Info),
        Delivered => ("Delivered", "Delivered", Success),
        Cancelled => ("Cancelled", "Cancelled", Danger),
    }
}

impl OrderStatus {
    /// Delivered and cancelled orders no longer move.
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: ResourceId,
    pub order_number: String,
    pub customer_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_email: Option<String>,
    pub total_amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping_address: Option<String>,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Resource for Order {
    type Status = OrderStatus;

    const KIND: ResourceKind = ResourceKind::Order;

    fn id(&self) -> ResourceId {
        self.id
    }

    fn status(&self) -> OrderStatus {
        self.status
    }

    fn set_status(&mut self, status: OrderStatus) {
        self.status = status;
    }

    fn display_name(&self) -> &str {
        &self.order_number
    }

    fn search_fields(&self) -> Vec<&str> {
        [
            Some(self.order_number.as_str()),
            Some(self.customer_name.as_str()),
            self.customer_email.as_deref(),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

// Orders are placed by customers; the console only edits delivery details.
const ORDER_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("customerName", "Customer name", FieldKind::Text),
    FieldSpec::optional("customerEmail", "Customer email", FieldKind::Text),
    FieldSpec::optional("shippingAddress", "Shipping address", FieldKind::Text),
];

impl Editable for Order {
    fn form_fields() -> &'static [FieldSpec] {
        ORDER_FIELDS
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shopadmin_core::StatusKind;

    #[test]
    fn wire_values_are_capitalised() {
        assert_eq!(serde_json::to_string(&OrderStatus::Shipped).unwrap(), "\"Shipped\"");
        assert_eq!("cancelled".parse::<OrderStatus>().unwrap(), OrderStatus::Cancelled);
        assert_eq!(OrderStatus::all().len(), 5);
    }

    #[test]
    fn terminal_states() {
        assert!(OrderStatus::Delivered.is_terminal());
        assert!(!OrderStatus::Processing.is_terminal());
    }
}
