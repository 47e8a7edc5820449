use std::io::Write;

use anyhow::Result;
use contacts_gateway::Contact;
use contacts_gateway::HistoryRecord;
use contacts_gateway::Note;
use contacts_gateway::Tag;
use serde::Serialize;

pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}

pub(crate) fn contact_line(contact: &Contact) -> String {
    let star = if contact.favorite { '*' } else { ' ' };
    let mut line = format!(
        "{:>5} {star} {}  <{}>  {}",
        contact.id, contact.name, contact.email, contact.phone
    );
    if !contact.tags.is_empty() {
        line.push_str(&format!("  [{}]", contact.tags.join(", ")));
    }
    line
}

pub(crate) fn print_contact_list(contacts: &[Contact], json: bool) -> Result<()> {
    if json {
        return print_json(contacts);
    }
    let mut stdout = std::io::stdout().lock();
    match contacts.len() {
        0 => writeln!(stdout, "no contacts")?,
        1 => writeln!(stdout, "1 contact")?,
        n => writeln!(stdout, "{n} contacts")?,
    }
    for contact in contacts {
        writeln!(stdout, "{}", contact_line(contact))?;
    }
    stdout.flush()?;
    Ok(())
}

pub(crate) fn print_contact(contact: &Contact, json: bool) -> Result<()> {
    if json {
        return print_json(contact);
    }
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{}", contact_line(contact))?;
    writeln!(stdout, "      created {}  updated {}", contact.created_at, contact.updated_at)?;
    Ok(())
}

pub(crate) fn print_notes(notes: &[Note], json: bool) -> Result<()> {
    if json {
        return print_json(notes);
    }
    let mut stdout = std::io::stdout().lock();
    if notes.is_empty() {
        writeln!(stdout, "no notes")?;
    }
    for note in notes {
        writeln!(stdout, "{:>5}  {}  {}", note.id, note.created_at, note.content)?;
    }
    Ok(())
}

pub(crate) fn print_note(note: &Note, json: bool) -> Result<()> {
    print_notes(std::slice::from_ref(note), json)
}

/// History entries are opaque server objects; text mode prints one compact
/// JSON object per line.
pub(crate) fn print_history(records: &[HistoryRecord], json: bool) -> Result<()> {
    if json {
        return print_json(records);
    }
    let mut stdout = std::io::stdout().lock();
    if records.is_empty() {
        writeln!(stdout, "no history")?;
    }
    for record in records {
        writeln!(stdout, "{record}")?;
    }
    Ok(())
}

pub(crate) fn print_tags(tags: &[Tag], json: bool) -> Result<()> {
    if json {
        return print_json(tags);
    }
    let mut stdout = std::io::stdout().lock();
    for tag in tags {
        writeln!(stdout, "{}", tag.name)?;
    }
    Ok(())
}
