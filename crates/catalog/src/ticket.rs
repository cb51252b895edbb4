use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shopadmin_core::{Editable, FieldKind, FieldSpec, Resource, ResourceId, ResourceKind};

shopadmin_core::status_enum! {
    /// Support ticket workflow.
    TicketStatus {
        Open => ("open", "Open", Info),
        InProgress => ("in_progress", "In progress", Warning),
        Resolved => ("resolved", "Resolved", Success),
        Closed => ("closed", "Closed", Neutral),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    pub id: ResourceId,
    pub ticket_number: String,
    pub subject: String,
    pub requester_email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub status: TicketStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Resource for Ticket {
    type Status = TicketStatus;

    const KIND: ResourceKind = ResourceKind::Ticket;

    fn id(&self) -> ResourceId {
        self.id
    }

    fn status(&self) -> TicketStatus {
        self.status
    }

    fn set_status(&mut self, status: TicketStatus) {
        self.status = status;
    }

    fn display_name(&self) -> &str {
        &self.ticket_number
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.ticket_number.as_str(),
            self.subject.as_str(),
            self.requester_email.as_str(),
        ]
    }
}

const TICKET_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("subject", "Subject", FieldKind::Text),
    FieldSpec::required("requesterEmail", "Requester email", FieldKind::Text),
    FieldSpec::optional("priority", "Priority", FieldKind::Text),
    FieldSpec::optional("message", "Message", FieldKind::Text),
];

impl Editable for Ticket {
    fn form_fields() -> &'static [FieldSpec] {
        TICKET_FIELDS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_progress_uses_snake_case_on_the_wire() {
        assert_eq!(serde_json::to_string(&TicketStatus::InProgress).unwrap(), "\"in_progress\"");
        assert_eq!("IN_PROGRESS".parse::<TicketStatus>().unwrap(), TicketStatus::InProgress);
    }
}
