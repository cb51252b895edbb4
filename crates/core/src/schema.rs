//! Editable-field schemas used to seed and submit form drafts.

use crate::resource::Resource;

/// How a draft field is represented and coerced back into a payload.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FieldKind {
    /// Free text, sent as a JSON string.
    Text,
    /// Decimal number (prices, rates), sent as a JSON number.
    Decimal,
    /// Whole number (stock, capacity), sent as a JSON integer.
    Integer,
    /// Comma-separated input, sent as a JSON array of strings.
    List,
    /// Checkbox, sent as a JSON boolean.
    Flag,
    /// Image reference. The existing URL lives under the field key; a newly
    /// chosen file is uploaded under `upload_key`.
    Image { upload_key: &'static str },
}

impl FieldKind {
    pub fn is_numeric(&self) -> bool {
        matches!(self, FieldKind::Decimal | FieldKind::Integer)
    }
}

/// One editable attribute of a resource.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    /// Wire key (camelCase, as the API names it).
    pub key: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

impl FieldSpec {
    pub const fn required(key: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self { key, label, kind, required: true }
    }

    pub const fn optional(key: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self { key, label, kind, required: false }
    }
}

/// A resource that has a create/edit form.
pub trait Editable: Resource {
    fn form_fields() -> &'static [FieldSpec];

    fn form_field(key: &str) -> Option<&'static FieldSpec> {
        Self::form_fields().iter().find(|f| f.key == key)
    }
}
