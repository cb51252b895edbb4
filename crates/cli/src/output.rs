//! Terminal rendering. Data goes to stdout, notices to stderr.

use std::io::{self, BufRead, Write};

use shopadmin_console::{CountSlot, Notice, NoticeLevel, Notifier, Prompt, StatusCounts};
use shopadmin_core::{FieldErrors, Resource, StatusKind};

#[derive(Debug, Default, Clone, Copy)]
pub struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn notify(&self, notice: Notice) {
        let tag = match notice.level {
            NoticeLevel::Success => "ok",
            NoticeLevel::Info => "info",
            NoticeLevel::Error => "error",
        };
        eprintln!("[{tag}] {}", notice.message);
    }
}

/// `     7  Approved        Trail Runner`
pub fn row<R: Resource>(record: &R) -> String {
    format!(
        "{:>6}  {:<14}  {}",
        record.id(),
        record.status().badge().label,
        record.display_name()
    )
}

pub fn print_rows<'a, R: Resource>(out: &mut impl Write, rows: impl IntoIterator<Item = &'a R>) -> io::Result<()> {
    for record in rows {
        writeln!(out, "{}", row(record))?;
    }
    Ok(())
}

pub fn print_json<R: Resource>(out: &mut impl Write, record: &R) -> io::Result<()> {
    let text = serde_json::to_string_pretty(record).map_err(io::Error::other)?;
    writeln!(out, "{text}")
}

pub fn print_counts<S: StatusKind>(out: &mut impl Write, counts: &StatusCounts<S>) -> io::Result<()> {
    for (status, slot) in counts.iter() {
        let label = status.badge().label;
        match slot {
            CountSlot::Ready(n) => writeln!(out, "{label:<14}  {n}")?,
            CountSlot::Failed(message) => writeln!(out, "{label:<14}  - ({message})")?,
            CountSlot::Loading => writeln!(out, "{label:<14}  -")?,
        }
    }
    writeln!(out, "{:<14}  {}", "Total", counts.total())
}

pub fn print_field_errors(errors: &FieldErrors) {
    for (field, message) in errors.iter() {
        eprintln!("  {field}: {message}");
    }
}

/// Show the prompt on stderr and read a yes/no answer from `input`.
pub fn confirm(prompt: &Prompt, input: &mut impl BufRead) -> io::Result<bool> {
    eprintln!("{}", prompt.title);
    eprintln!("{} {}", prompt.message, prompt.warning);
    eprint!("Type 'yes' to continue: ");
    io::stderr().flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use shopadmin_catalog::{Ticket, TicketStatus};
    use shopadmin_console::{ConfirmationGate, DeleteTarget};
    use shopadmin_core::{ResourceId, ResourceKind};

    fn ticket() -> Ticket {
        serde_json::from_value(serde_json::json!({
            "id": 12,
            "ticketNumber": "T-0012",
            "subject": "Refund not received",
            "requesterEmail": "ada@example.com",
            "status": "in_progress",
            "createdAt": "2024-03-01T12:00:00Z"
        }))
        .unwrap()
    }

    #[test]
    fn row_shows_badge_label() {
        let line = row(&ticket());
        assert!(line.contains("In progress"));
        assert!(line.trim_start().starts_with("12"));
    }

    #[test]
    fn counts_table_ends_with_total() {
        let mut counts = StatusCounts::<TicketStatus>::from_items(&[ticket()]);
        counts.set(TicketStatus::Closed, CountSlot::Failed("count unavailable".into()));
        let mut out = Vec::new();
        print_counts(&mut out, &counts).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("(count unavailable)"));
        assert!(text.trim_end().ends_with("Total           1"));
    }

    #[test]
    fn confirm_accepts_only_yes() {
        let mut gate = ConfirmationGate::new(ResourceKind::Ticket);
        let prompt = gate
            .request(DeleteTarget::One { id: ResourceId::new(12), name: "T-0012".into() })
            .unwrap();
        assert!(confirm(&prompt, &mut "yes\n".as_bytes()).unwrap());
        assert!(confirm(&prompt, &mut "Y\n".as_bytes()).unwrap());
        assert!(!confirm(&prompt, &mut "\n".as_bytes()).unwrap());
        assert!(!confirm(&prompt, &mut "nope\n".as_bytes()).unwrap());
    }
}
