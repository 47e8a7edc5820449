use anyhow::Result;
use clap::Parser;
use clap::Subcommand;
use contacts_gateway::ContactId;
use contacts_gateway::NoteId;
use contacts_store::ContactsStore;

use crate::output;

#[derive(Debug, Parser)]
pub struct NotesCli {
    #[command(subcommand)]
    pub command: NotesCommand,
}

#[derive(Debug, Subcommand)]
pub enum NotesCommand {
    /// List a contact's notes, newest first
    List {
        #[arg(value_name = "CONTACT_ID")]
        contact_id: ContactId,
    },

    /// Attach a note to a contact
    Add {
        #[arg(value_name = "CONTACT_ID")]
        contact_id: ContactId,

        #[arg(value_name = "TEXT")]
        content: String,
    },

    /// Delete a note and print what remains
    Delete {
        #[arg(value_name = "CONTACT_ID")]
        contact_id: ContactId,

        #[arg(value_name = "NOTE_ID")]
        note_id: NoteId,
    },
}

pub(crate) async fn run(store: &ContactsStore, cli: NotesCli, json: bool) -> Result<()> {
    match cli.command {
        NotesCommand::List { contact_id } => {
            let notes = store.notes(contact_id).await?;
            output::print_notes(&notes, json)
        }
        NotesCommand::Add {
            contact_id,
            content,
        } => {
            let note = store.add_note(contact_id, &content).await?;
            output::print_note(&note, json)
        }
        NotesCommand::Delete {
            contact_id,
            note_id,
        } => {
            let remaining = store.delete_note(contact_id, note_id).await?;
            output::print_notes(&remaining, json)
        }
    }
}
