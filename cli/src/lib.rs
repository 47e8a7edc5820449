//! Command-line front end for the contacts directory.
//!
//! Every subcommand builds one [`ContactsStore`] over the HTTP gateway and
//! drives it the way an interactive client would: writes go through the
//! store so the cached list is refreshed, reads go straight through.

use std::sync::Arc;

use anyhow::Context;
use anyhow::Result;
use clap::Parser;
use clap::Subcommand;
use contacts_gateway::API_BASE_ENV_VAR;
use contacts_gateway::GatewayConfig;
use contacts_gateway::HttpContactsGateway;
use contacts_store::ContactsStore;
use contacts_store::StoreConfig;
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod contact_cmd;
mod notes_cmd;
mod output;
mod search_cmd;
mod tags_cmd;

pub use contact_cmd::CreateArgs;
pub use contact_cmd::ListArgs;
pub use contact_cmd::UpdateArgs;
pub use notes_cmd::NotesCli;
pub use notes_cmd::NotesCommand;
pub use search_cmd::SearchArgs;
pub use tags_cmd::TagsCli;
pub use tags_cmd::TagsCommand;

const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Debug, Parser)]
#[command(name = "contacts", version, about = "Browse and edit a contacts directory")]
pub struct Cli {
    /// Base URL of the contacts API
    #[arg(long, global = true, value_name = "URL", env = API_BASE_ENV_VAR)]
    pub api_base: Option<String>,

    /// Print JSON instead of formatted text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List contacts matching the given filters
    List(ListArgs),

    /// Show one contact
    Show {
        #[arg(value_name = "ID")]
        id: i64,
    },

    /// Create a contact
    Create(CreateArgs),

    /// Change fields of an existing contact
    Update(UpdateArgs),

    /// Delete a contact
    Delete {
        #[arg(value_name = "ID")]
        id: i64,
    },

    /// Read and edit a contact's notes
    Notes(NotesCli),

    /// Show the change history of a contact
    History {
        #[arg(value_name = "ID")]
        id: i64,
    },

    /// List or create tags
    Tags(TagsCli),

    /// Filter the directory interactively from stdin
    Search(SearchArgs),
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        let store = self.connect()?;
        let json = self.json;
        let result = match self.command {
            Command::List(args) => contact_cmd::run_list(&store, args, json).await,
            Command::Show { id } => contact_cmd::run_show(&store, id, json).await,
            Command::Create(args) => contact_cmd::run_create(&store, args, json).await,
            Command::Update(args) => contact_cmd::run_update(&store, args, json).await,
            Command::Delete { id } => contact_cmd::run_delete(&store, id).await,
            Command::Notes(cli) => notes_cmd::run(&store, cli, json).await,
            Command::History { id } => contact_cmd::run_history(&store, id, json).await,
            Command::Tags(cli) => tags_cmd::run(&store, cli, json).await,
            Command::Search(args) => search_cmd::run(store.clone(), args, json).await,
        };
        store.shutdown();
        result
    }

    fn connect(&self) -> Result<ContactsStore> {
        let gateway_config = match self.api_base.as_deref().map(str::trim) {
            Some(base) if !base.is_empty() => GatewayConfig::with_base_url(base),
            _ => GatewayConfig::from_env(),
        };
        debug!(base_url = %gateway_config.base_url, "connecting to contacts api");
        let gateway = HttpContactsGateway::new(gateway_config)
            .context("failed to set up the contacts api client")?;
        Ok(ContactsStore::new(Arc::new(gateway), StoreConfig::default()))
    }
}

/// Logs go to stderr so stdout stays parseable. `RUST_LOG` overrides the
/// default `warn` level.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
