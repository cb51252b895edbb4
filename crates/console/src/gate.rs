//! Two-step confirmation in front of destructive actions.

use shopadmin_core::{ResourceId, ResourceKind};

pub const IRREVERSIBLE_WARNING: &str = "This action cannot be undone.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteTarget {
    One { id: ResourceId, name: String },
    Many(Vec<ResourceId>),
}

impl DeleteTarget {
    pub fn ids(&self) -> Vec<ResourceId> {
        match self {
            DeleteTarget::One { id, .. } => vec![*id],
            DeleteTarget::Many(ids) => ids.clone(),
        }
    }
}

/// Text of an open confirmation dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub title: String,
    pub message: String,
    pub warning: &'static str,
}

impl Prompt {
    pub fn for_target(kind: ResourceKind, target: &DeleteTarget) -> Self {
        let message = match target {
            DeleteTarget::One { name, .. } => format!("Delete {} \"{name}\"?", kind.label()),
            DeleteTarget::Many(ids) if ids.len() == 1 => format!("Delete 1 selected {}?", kind.label()),
            DeleteTarget::Many(ids) => format!("Delete {} selected {}?", ids.len(), kind.plural_label()),
        };
        Self {
            title: format!("Delete {}", kind.title()),
            message,
            warning: IRREVERSIBLE_WARNING,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum GateState {
    #[default]
    Closed,
    Open(DeleteTarget),
    Deleting(DeleteTarget),
}

#[derive(Debug)]
pub struct ConfirmationGate {
    kind: ResourceKind,
    state: GateState,
}

impl ConfirmationGate {
    pub fn new(kind: ResourceKind) -> Self {
        Self { kind, state: GateState::Closed }
    }

    pub fn state(&self) -> &GateState {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        !matches!(self.state, GateState::Closed)
    }

    pub fn is_deleting(&self) -> bool {
        matches!(self.state, GateState::Deleting(_))
    }

    /// Open the dialog for `target`. Ignored while a deletion is running.
    pub fn request(&mut self, target: DeleteTarget) -> Option<Prompt> {
        if self.is_deleting() {
            tracing::warn!(resource = %self.kind, "delete requested while another is in flight");
            return None;
        }
        let prompt = Prompt::for_target(self.kind, &target);
        self.state = GateState::Open(target);
        Some(prompt)
    }

    pub fn prompt(&self) -> Option<Prompt> {
        match &self.state {
            GateState::Open(target) | GateState::Deleting(target) => Some(Prompt::for_target(self.kind, target)),
            GateState::Closed => None,
        }
    }

    /// Close the dialog without acting. No-op while the deletion is running.
    pub fn cancel(&mut self) {
        if let GateState::Open(_) = self.state {
            self.state = GateState::Closed;
        }
    }

    /// Move an open dialog to the deleting state and hand out its target.
    pub fn begin_confirm(&mut self) -> Option<DeleteTarget> {
        match std::mem::take(&mut self.state) {
            GateState::Open(target) => {
                self.state = GateState::Deleting(target.clone());
                Some(target)
            }
            other => {
                self.state = other;
                None
            }
        }
    }

    /// The deletion finished, either way.
    pub fn finish(&mut self) {
        self.state = GateState::Closed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn one(id: u64) -> DeleteTarget {
        DeleteTarget::One { id: ResourceId::new(id), name: "Trail Runner".into() }
    }

    #[test]
    fn prompt_names_target_and_warns() {
        let mut gate = ConfirmationGate::new(ResourceKind::Product);
        let prompt = gate.request(one(1)).unwrap();
        assert_eq!(prompt.message, "Delete product \"Trail Runner\"?");
        assert_eq!(prompt.warning, "This action cannot be undone.");

        let many = Prompt::for_target(
            ResourceKind::Product,
            &DeleteTarget::Many(vec![ResourceId::new(1), ResourceId::new(2)]),
        );
        assert_eq!(many.message, "Delete 2 selected products?");
    }

    #[test]
    fn cancel_is_ignored_while_deleting() {
        let mut gate = ConfirmationGate::new(ResourceKind::Product);
        gate.request(one(1));
        assert_eq!(gate.begin_confirm(), Some(one(1)));

        gate.cancel();
        assert!(gate.is_deleting());
        assert!(gate.request(one(2)).is_none());
        assert!(gate.begin_confirm().is_none());

        gate.finish();
        assert!(!gate.is_open());
    }

    #[test]
    fn confirm_without_request_does_nothing() {
        let mut gate = ConfirmationGate::new(ResourceKind::Order);
        assert!(gate.begin_confirm().is_none());
        gate.request(one(3));
        gate.cancel();
        assert!(gate.begin_confirm().is_none());
    }
}
