//! In-flight bookkeeping and local reconciliation after successful writes.
//!
//! The backend stays the source of truth; these helpers only bring the
//! locally cached collection in line with what a write is known to have done.

use std::collections::BTreeSet;

use shopadmin_core::{ApiError, ApiResult, Resource, ResourceId, ResourceKind};

use crate::collection::ListController;
use crate::selection::Selection;

/// A write that owns an in-flight flag.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Op {
    Submit,
    Delete,
    BulkDelete,
    StatusUpdate(ResourceId),
}

impl Op {
    pub fn verb(&self) -> &'static str {
        match self {
            Op::Submit => "save",
            Op::Delete | Op::BulkDelete => "delete",
            Op::StatusUpdate(_) => "update status of",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InFlight {
    pub is_submitting: bool,
    pub is_deleting: bool,
    pub is_bulk_deleting: bool,
    status_updates: BTreeSet<ResourceId>,
}

impl InFlight {
    pub fn is_running(&self, op: Op) -> bool {
        match op {
            Op::Submit => self.is_submitting,
            Op::Delete => self.is_deleting,
            Op::BulkDelete => self.is_bulk_deleting,
            Op::StatusUpdate(id) => self.status_updates.contains(&id),
        }
    }

    pub fn is_updating_status(&self, id: ResourceId) -> bool {
        self.status_updates.contains(&id)
    }

    pub fn any(&self) -> bool {
        self.is_submitting || self.is_deleting || self.is_bulk_deleting || !self.status_updates.is_empty()
    }

    /// Raise the flag for `op`, or refuse with [`ApiError::Busy`] when it is
    /// already raised.
    pub fn begin(&mut self, op: Op) -> ApiResult<()> {
        if self.is_running(op) {
            tracing::warn!(?op, "refusing duplicate request");
            return Err(ApiError::Busy);
        }
        match op {
            Op::Submit => self.is_submitting = true,
            Op::Delete => self.is_deleting = true,
            Op::BulkDelete => self.is_bulk_deleting = true,
            Op::StatusUpdate(id) => {
                self.status_updates.insert(id);
            }
        }
        Ok(())
    }

    pub fn finish(&mut self, op: Op) {
        match op {
            Op::Submit => self.is_submitting = false,
            Op::Delete => self.is_deleting = false,
            Op::BulkDelete => self.is_bulk_deleting = false,
            Op::StatusUpdate(id) => {
                self.status_updates.remove(&id);
            }
        }
    }
}

/// "Failed to delete product"
pub fn failure_fallback(verb: &str, kind: ResourceKind) -> String {
    format!("Failed to {verb} {}", kind.label())
}

/// Notification text after a bulk delete.
pub fn bulk_delete_summary(deleted: u64, requested: usize, kind: ResourceKind) -> String {
    let noun = if requested == 1 { kind.label() } else { kind.plural_label() };
    if deleted < requested as u64 {
        format!("Deleted {deleted} of {requested} {noun}")
    } else {
        format!("Deleted {deleted} {noun}")
    }
}

pub fn reconcile_delete<R: Resource>(list: &mut ListController<R>, selection: &mut Selection, id: ResourceId) {
    list.remove(id);
    selection.remove(id);
}

/// Every requested id leaves the list and the whole selection is cleared,
/// whatever count the server reported.
pub fn reconcile_bulk_delete<R: Resource>(
    list: &mut ListController<R>,
    selection: &mut Selection,
    ids: &[ResourceId],
) {
    list.remove_many(ids);
    selection.clear();
}

/// Patch a returned record in place; a row that has disappeared meanwhile
/// stays gone.
pub fn reconcile_update<R: Resource>(list: &mut ListController<R>, record: R) -> bool {
    list.replace(record)
}
