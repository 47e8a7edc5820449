use anyhow::Result;
use anyhow::bail;
use clap::Parser;
use contacts_gateway::ContactId;
use contacts_gateway::ContactPatch;
use contacts_gateway::NewContact;
use contacts_store::ContactsStore;

use crate::output;

#[derive(Debug, Parser)]
pub struct ListArgs {
    /// Free-text search over name, email, phone, tags and notes
    #[arg(short, long, value_name = "TEXT")]
    pub query: Option<String>,

    /// Only favorites (true) or only non-favorites (false)
    #[arg(long, value_name = "BOOL")]
    pub favorite: Option<bool>,

    /// Only contacts carrying this tag
    #[arg(short, long, value_name = "NAME")]
    pub tag: Option<String>,
}

#[derive(Debug, Parser)]
pub struct CreateArgs {
    #[arg(long)]
    pub name: String,

    #[arg(long, default_value = "")]
    pub email: String,

    #[arg(long, default_value = "")]
    pub phone: String,

    /// Mark the contact as a favorite
    #[arg(long)]
    pub favorite: bool,

    /// Tag to attach; repeat for several
    #[arg(long = "tag", value_name = "NAME")]
    pub tags: Vec<String>,
}

#[derive(Debug, Parser)]
pub struct UpdateArgs {
    #[arg(value_name = "ID")]
    pub id: ContactId,

    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub email: Option<String>,

    #[arg(long)]
    pub phone: Option<String>,

    #[arg(long, value_name = "BOOL")]
    pub favorite: Option<bool>,

    /// Replace the contact's tags; repeat for several
    #[arg(long = "tag", value_name = "NAME", conflicts_with = "clear_tags")]
    pub tags: Vec<String>,

    /// Remove every tag from the contact
    #[arg(long)]
    pub clear_tags: bool,
}

impl UpdateArgs {
    fn into_patch(self) -> ContactPatch {
        let tags = if self.clear_tags {
            Some(Vec::new())
        } else if self.tags.is_empty() {
            None
        } else {
            Some(self.tags)
        };
        ContactPatch {
            name: self.name,
            email: self.email,
            phone: self.phone,
            favorite: self.favorite,
            tags,
        }
    }
}

/// Applies the filters directly and fetches once, skipping the debounce a
/// typing user would go through.
pub(crate) async fn run_list(store: &ContactsStore, args: ListArgs, json: bool) -> Result<()> {
    if let Some(query) = args.query {
        store.set_query(query);
    }
    store.set_favorite(args.favorite);
    if let Some(tag) = args.tag {
        store.set_tag(tag);
    }
    store.shutdown();
    store.fetch().await?;
    output::print_contact_list(&store.contacts(), json)
}

pub(crate) async fn run_show(store: &ContactsStore, id: ContactId, json: bool) -> Result<()> {
    let contact = store.contact(id).await?;
    output::print_contact(&contact, json)
}

pub(crate) async fn run_create(store: &ContactsStore, args: CreateArgs, json: bool) -> Result<()> {
    let payload = NewContact {
        name: args.name,
        email: args.email,
        phone: args.phone,
        favorite: args.favorite,
        tags: args.tags,
    };
    let created = store.create(payload).await?;
    output::print_contact(&created, json)
}

pub(crate) async fn run_update(store: &ContactsStore, args: UpdateArgs, json: bool) -> Result<()> {
    let id = args.id;
    let patch = args.into_patch();
    if patch.is_empty() {
        bail!("nothing to update for contact {id}; pass at least one field");
    }
    let updated = store.update(id, patch).await?;
    output::print_contact(&updated, json)
}

pub(crate) async fn run_delete(store: &ContactsStore, id: ContactId) -> Result<()> {
    store.remove(id).await?;
    println!("deleted contact {id}");
    Ok(())
}

pub(crate) async fn run_history(store: &ContactsStore, id: ContactId, json: bool) -> Result<()> {
    let history = store.history(id).await?;
    output::print_history(&history, json)
}
