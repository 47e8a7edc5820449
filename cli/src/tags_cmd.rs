use anyhow::Result;
use clap::Parser;
use clap::Subcommand;
use contacts_store::ContactsStore;

use crate::output;

#[derive(Debug, Parser)]
pub struct TagsCli {
    #[command(subcommand)]
    pub command: TagsCommand,
}

#[derive(Debug, Subcommand)]
pub enum TagsCommand {
    /// List every known tag
    List,

    /// Register a new tag
    Create {
        #[arg(value_name = "NAME")]
        name: String,
    },
}

pub(crate) async fn run(store: &ContactsStore, cli: TagsCli, json: bool) -> Result<()> {
    match cli.command {
        TagsCommand::List => {
            let tags = store.tags().await?;
            output::print_tags(&tags, json)
        }
        TagsCommand::Create { name } => {
            let tag = store.create_tag(&name).await?;
            output::print_tags(std::slice::from_ref(&tag), json)
        }
    }
}
