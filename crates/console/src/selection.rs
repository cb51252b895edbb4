use std::collections::BTreeSet;

use shopadmin_core::{Resource, ResourceId};

/// Rows ticked for a bulk action.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ids: BTreeSet<ResourceId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn contains(&self, id: ResourceId) -> bool {
        self.ids.contains(&id)
    }

    /// Selected ids in ascending order.
    pub fn ids(&self) -> Vec<ResourceId> {
        self.ids.iter().copied().collect()
    }

    /// Flip `id`. Ids that are not among `items` are ignored; returns whether
    /// the id is selected afterwards.
    pub fn toggle<R: Resource>(&mut self, id: ResourceId, items: &[R]) -> bool {
        if !items.iter().any(|r| r.id() == id) {
            return false;
        }
        if !self.ids.remove(&id) {
            self.ids.insert(id);
        }
        self.ids.contains(&id)
    }

    /// Select every row of the visible (filtered) view, or clear the selection
    /// when all of them are already selected.
    pub fn select_all<R: Resource>(&mut self, visible: &[&R]) {
        let all_selected = visible.iter().all(|r| self.ids.contains(&r.id()));
        if all_selected {
            self.ids.clear();
        } else {
            self.ids = visible.iter().map(|r| r.id()).collect();
        }
    }

    /// Are all `visible` rows selected (and at least one exists)?
    pub fn covers<R: Resource>(&self, visible: &[&R]) -> bool {
        !visible.is_empty() && visible.iter().all(|r| self.ids.contains(&r.id()))
    }

    pub fn remove(&mut self, id: ResourceId) -> bool {
        self.ids.remove(&id)
    }

    /// Drop ids that no longer have a row.
    pub fn retain<R: Resource>(&mut self, items: &[R]) {
        self.ids.retain(|id| items.iter().any(|r| r.id() == *id));
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }
}
