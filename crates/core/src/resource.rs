//! The `Resource` contract: one manageable entity type with its own REST
//! endpoints and status enum.

use core::fmt::Debug;
use core::str::FromStr;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::DomainError;
use crate::id::ResourceId;
use crate::status::StatusKind;

/// Every resource type the console manages.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ResourceKind {
    Product,
    Category,
    SubCategory,
    Order,
    Seller,
    User,
    Warehouse,
    Membership,
    Ticket,
    Banner,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 10] = [
        ResourceKind::Product,
        ResourceKind::Category,
        ResourceKind::SubCategory,
        ResourceKind::Order,
        ResourceKind::Seller,
        ResourceKind::User,
        ResourceKind::Warehouse,
        ResourceKind::Membership,
        ResourceKind::Ticket,
        ResourceKind::Banner,
    ];

    /// Collection path segment (`GET /{path}`).
    pub fn path(&self) -> &'static str {
        match self {
            ResourceKind::Product => "products",
            ResourceKind::Category => "categories",
            ResourceKind::SubCategory => "subcategories",
            ResourceKind::Order => "orders",
            ResourceKind::Seller => "sellers",
            ResourceKind::User => "users",
            ResourceKind::Warehouse => "warehouses",
            ResourceKind::Membership => "memberships",
            ResourceKind::Ticket => "tickets",
            ResourceKind::Banner => "banners",
        }
    }

    /// Key used by envelopes that nest a single record (`{ "product": {..} }`).
    pub fn singular_key(&self) -> &'static str {
        match self {
            ResourceKind::Product => "product",
            ResourceKind::Category => "category",
            ResourceKind::SubCategory => "subCategory",
            ResourceKind::Order => "order",
            ResourceKind::Seller => "seller",
            ResourceKind::User => "user",
            ResourceKind::Warehouse => "warehouse",
            ResourceKind::Membership => "membership",
            ResourceKind::Ticket => "ticket",
            ResourceKind::Banner => "banner",
        }
    }

    /// Key used by list envelopes that name the collection (`{ "products": [..] }`).
    pub fn collection_key(&self) -> &'static str {
        match self {
            ResourceKind::SubCategory => "subCategories",
            other => other.path(),
        }
    }

    /// Key used by list envelopes for the total (`totalProducts`).
    pub fn total_key(&self) -> &'static str {
        match self {
            ResourceKind::Product => "totalProducts",
            ResourceKind::Category => "totalCategories",
            ResourceKind::SubCategory => "totalSubCategories",
            ResourceKind::Order => "totalOrders",
            ResourceKind::Seller => "totalSellers",
            ResourceKind::User => "totalUsers",
            ResourceKind::Warehouse => "totalWarehouses",
            ResourceKind::Membership => "totalMemberships",
            ResourceKind::Ticket => "totalTickets",
            ResourceKind::Banner => "totalBanners",
        }
    }

    /// Lowercase human label ("product", "subcategory").
    pub fn label(&self) -> &'static str {
        match self {
            ResourceKind::Product => "product",
            ResourceKind::Category => "category",
            ResourceKind::SubCategory => "subcategory",
            ResourceKind::Order => "order",
            ResourceKind::Seller => "seller",
            ResourceKind::User => "user",
            ResourceKind::Warehouse => "warehouse",
            ResourceKind::Membership => "membership",
            ResourceKind::Ticket => "ticket",
            ResourceKind::Banner => "banner",
        }
    }

    pub fn plural_label(&self) -> &'static str {
        match self {
            ResourceKind::Category => "categories",
            ResourceKind::SubCategory => "subcategories",
            other => other.path(),
        }
    }

    /// Title-cased label for headings and notifications ("Product").
    pub fn title(&self) -> String {
        let label = self.label();
        let mut chars = label.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

impl core::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.path())
    }
}

impl FromStr for ResourceKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        ResourceKind::ALL
            .into_iter()
            .find(|kind| kind.path() == needle || kind.label() == needle)
            .ok_or_else(|| DomainError::UnknownResource(s.to_string()))
    }
}

/// A record mirrored from the remote API.
///
/// Implementors are plain data: the API owns their lifecycle and the client
/// only keeps a best-effort copy.
pub trait Resource: Clone + Debug + Serialize + DeserializeOwned + Send + Sync + 'static {
    type Status: StatusKind;

    const KIND: ResourceKind;

    fn id(&self) -> ResourceId;

    fn status(&self) -> Self::Status;

    fn set_status(&mut self, status: Self::Status);

    /// Name shown in tables and confirmation prompts.
    fn display_name(&self) -> &str;

    /// Fields matched by the free-text search box.
    fn search_fields(&self) -> Vec<&str>;

    fn category(&self) -> Option<&str> {
        None
    }

    fn subcategory(&self) -> Option<&str> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_path_and_label() {
        assert_eq!("products".parse::<ResourceKind>().unwrap(), ResourceKind::Product);
        assert_eq!("Product".parse::<ResourceKind>().unwrap(), ResourceKind::Product);
        assert_eq!("subcategory".parse::<ResourceKind>().unwrap(), ResourceKind::SubCategory);
        assert!("widgets".parse::<ResourceKind>().is_err());
    }

    #[test]
    fn envelope_keys_follow_resource_naming() {
        assert_eq!(ResourceKind::Product.collection_key(), "products");
        assert_eq!(ResourceKind::SubCategory.collection_key(), "subCategories");
        assert_eq!(ResourceKind::Order.total_key(), "totalOrders");
        assert_eq!(ResourceKind::Category.title(), "Category");
    }
}
