//! Line-driven live search.
//!
//! Each stdin line edits one filter; the store debounces the edits and the
//! command prints the list every time the cache is replaced.

use std::time::Duration;

use anyhow::Result;
use anyhow::bail;
use clap::Parser;
use contacts_store::ContactsStore;
use tokio::io::AsyncBufReadExt;
use tokio::io::BufReader;
use tokio::time::sleep;
use tracing::debug;

use crate::output;

const IDLE_POLL: Duration = Duration::from_millis(25);

#[derive(Debug, Parser)]
#[command(after_help = "Input lines:\n  q <text>               set the search text (empty clears it)\n  fav <true|false|any>   set the favorite filter\n  tag <name>             set the tag filter (empty clears it)\n  quit                   stop reading input")]
pub struct SearchArgs {
    /// Skip the unfiltered listing printed before input is read
    #[arg(long)]
    pub no_initial: bool,
}

#[derive(Debug, PartialEq, Eq)]
enum FilterEdit {
    Query(String),
    Favorite(Option<bool>),
    Tag(String),
    Quit,
}

fn parse_line(line: &str) -> Result<Option<FilterEdit>> {
    let line = line.trim_end_matches(['\r', '\n']);
    if line.trim().is_empty() {
        return Ok(None);
    }
    let (verb, rest) = match line.split_once(' ') {
        Some((verb, rest)) => (verb, rest),
        None => (line, ""),
    };
    let edit = match verb {
        "q" | "query" => FilterEdit::Query(rest.to_string()),
        "tag" => FilterEdit::Tag(rest.trim().to_string()),
        "fav" | "favorite" => match rest.trim() {
            "true" | "yes" => FilterEdit::Favorite(Some(true)),
            "false" | "no" => FilterEdit::Favorite(Some(false)),
            "any" | "" => FilterEdit::Favorite(None),
            other => bail!("favorite filter must be true, false or any, got {other:?}"),
        },
        "quit" | "exit" => FilterEdit::Quit,
        other => bail!("unknown search command {other:?}"),
    };
    Ok(Some(edit))
}

pub(crate) async fn run(store: ContactsStore, args: SearchArgs, json: bool) -> Result<()> {
    let mut contacts = store.subscribe_contacts();
    if !args.no_initial {
        store.fetch().await?;
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut reading = true;
    let mut idle_polls = 0;
    loop {
        tokio::select! {
            line = lines.next_line(), if reading => {
                let Some(line) = line? else {
                    reading = false;
                    continue;
                };
                match parse_line(&line) {
                    Ok(Some(FilterEdit::Query(query))) => store.set_query(query),
                    Ok(Some(FilterEdit::Favorite(favorite))) => store.set_favorite(favorite),
                    Ok(Some(FilterEdit::Tag(tag))) => store.set_tag(tag),
                    Ok(Some(FilterEdit::Quit)) => reading = false,
                    Ok(None) => {}
                    Err(err) => eprintln!("{err}"),
                }
            }
            changed = contacts.changed() => {
                changed?;
                let list = contacts.borrow_and_update().clone();
                output::print_contact_list(&list, json)?;
            }
            () = sleep(IDLE_POLL), if !reading => {
                // The debounce timer and the fetch it starts hand over
                // without an await in between, so two quiet polls in a row
                // mean nothing is left to arrive.
                if store.has_pending_fetch() || store.is_busy() {
                    idle_polls = 0;
                } else {
                    idle_polls += 1;
                }
                if idle_polls >= 2 {
                    break;
                }
            }
        }
    }

    if contacts.has_changed()? {
        let list = contacts.borrow_and_update().clone();
        output::print_contact_list(&list, json)?;
    }
    debug!(filters = ?store.filters(), "live search finished");
    Ok(())
}
