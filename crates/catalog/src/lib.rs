//! Resource catalog: the record shapes the admin console mirrors from the API.
//!
//! Each module declares one resource (or a closely related pair), its status
//! enum and badges, its searchable fields and its form schema. Records are
//! plain data; they carry no IO.

pub mod banner;
pub mod category;
pub mod membership;
pub mod order;
pub mod product;
pub mod seller;
pub mod ticket;
pub mod user;
pub mod warehouse;

mod serde_helpers;

pub use banner::Banner;
pub use category::{ActivityStatus, Category, SubCategory};
pub use membership::Membership;
pub use order::{Order, OrderStatus};
pub use product::{Product, ProductStatus};
pub use seller::{Seller, SellerStatus};
pub use ticket::{Ticket, TicketStatus};
pub use user::{User, UserStatus};
pub use warehouse::Warehouse;

/// Invoke `$body` with `$r` bound to the concrete record type for `$kind`.
///
/// ```ignore
/// dispatch_kind!(kind, R => run_list::<R>(&args).await)
/// ```
#[macro_export]
macro_rules! dispatch_kind {
    ($kind:expr, $r:ident => $body:expr) => {
        match $kind {
            $crate::__core::ResourceKind::Product => { type $r = $crate::Product; $body }
            $crate::__core::ResourceKind::Category => { type $r = $crate::Category; $body }
            $crate::__core::ResourceKind::SubCategory => { type $r = $crate::SubCategory; $body }
            $crate::__core::ResourceKind::Order => { type $r = $crate::Order; $body }
            $crate::__core::ResourceKind::Seller => { type $r = $crate::Seller; $body }
            $crate::__core::ResourceKind::User => { type $r = $crate::User; $body }
            $crate::__core::ResourceKind::Warehouse => { type $r = $crate::Warehouse; $body }
            $crate::__core::ResourceKind::Membership => { type $r = $crate::Membership; $body }
            $crate::__core::ResourceKind::Ticket => { type $r = $crate::Ticket; $body }
            $crate::__core::ResourceKind::Banner => { type $r = $crate::Banner; $body }
        }
    };
}

#[doc(hidden)]
pub use shopadmin_core as __core;

#[cfg(test)]
pub(crate) mod fixtures {
    use chrono::{DateTime, TimeZone, Utc};

    pub fn ts() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }
}
