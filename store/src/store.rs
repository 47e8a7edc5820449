use std::sync::Arc;
use std::sync::Weak;

use contacts_gateway::Contact;
use contacts_gateway::ContactId;
use contacts_gateway::ContactPatch;
use contacts_gateway::ContactsGateway;
use contacts_gateway::HistoryRecord;
use contacts_gateway::NewContact;
use contacts_gateway::Note;
use contacts_gateway::NoteId;
use contacts_gateway::Result;
use contacts_gateway::Tag;
use tokio::runtime::Handle;
use tokio::sync::watch;
use tracing::debug;
use tracing::info;
use tracing::warn;

use crate::cache::ContactList;
use crate::cache::DirectoryCache;
use crate::config::StoreConfig;
use crate::debounce::Debouncer;
use crate::filters::FilterCriteria;
use crate::filters::FilterState;

/// What happened to a list response.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The response replaced the cached list.
    Applied,
    /// A newer response was already applied; this one was dropped.
    Stale,
}

/// Session state for the contact directory.
///
/// Cloning is cheap and every clone drives the same state. Filter edits are
/// debounced into a single list fetch; writes go straight to the gateway and,
/// once they succeed, re-fetch the list immediately so the cache follows the
/// server. The cache is only ever replaced wholesale.
///
/// A pending debounced fetch is cancelled when the last clone is dropped or
/// when [`ContactsStore::shutdown`] is called. A fetch already on the wire is
/// left to finish.
#[derive(Clone)]
pub struct ContactsStore {
    inner: Arc<StoreInner>,
}

struct StoreInner {
    gateway: Arc<dyn ContactsGateway>,
    filters: FilterState,
    cache: DirectoryCache,
    debouncer: Debouncer,
}

impl ContactsStore {
    /// Creates a store bound to the current Tokio runtime.
    ///
    /// # Panics
    ///
    /// Panics when called outside a Tokio runtime.
    pub fn new(gateway: Arc<dyn ContactsGateway>, config: StoreConfig) -> Self {
        Self::with_runtime(gateway, config, Handle::current())
    }

    /// Creates a store whose debounce timers run on `runtime`. Use this when
    /// filters are edited from threads outside the runtime.
    pub fn with_runtime(
        gateway: Arc<dyn ContactsGateway>,
        config: StoreConfig,
        runtime: Handle,
    ) -> Self {
        Self {
            inner: Arc::new(StoreInner {
                gateway,
                filters: FilterState::default(),
                cache: DirectoryCache::new(config.discard_stale_responses),
                debouncer: Debouncer::new(config.debounce, runtime),
            }),
        }
    }

    pub fn filters(&self) -> FilterCriteria {
        self.inner.filters.snapshot()
    }

    pub fn set_query(&self, query: impl Into<String>) {
        if self.inner.filters.set_query(query.into()) {
            self.schedule_fetch();
        }
    }

    pub fn set_favorite(&self, favorite: Option<bool>) {
        if self.inner.filters.set_favorite(favorite) {
            self.schedule_fetch();
        }
    }

    pub fn set_tag(&self, tag: impl Into<String>) {
        if self.inner.filters.set_tag(tag.into()) {
            self.schedule_fetch();
        }
    }

    /// True while at least one list fetch is in flight. Says nothing about
    /// whether the cached list matches the current filters.
    pub fn is_busy(&self) -> bool {
        self.inner.cache.is_busy()
    }

    pub fn subscribe_busy(&self) -> watch::Receiver<bool> {
        self.inner.cache.subscribe_busy()
    }

    pub fn contacts(&self) -> ContactList {
        self.inner.cache.snapshot()
    }

    pub fn subscribe_contacts(&self) -> watch::Receiver<ContactList> {
        self.inner.cache.subscribe()
    }

    /// True while a debounced fetch is waiting for its quiet period.
    pub fn has_pending_fetch(&self) -> bool {
        self.inner.debouncer.is_pending()
    }

    /// Cancels a pending debounced fetch. Requests already issued still
    /// complete and may still update the cache.
    pub fn shutdown(&self) {
        self.inner.debouncer.cancel();
    }

    /// Fetches the list for the current filters and replaces the cache.
    pub async fn fetch(&self) -> Result<FetchOutcome> {
        self.inner.fetch().await
    }

    fn schedule_fetch(&self) {
        let store = Arc::downgrade(&self.inner);
        self.inner
            .debouncer
            .schedule(move || run_debounced_fetch(store));
    }

    pub async fn create(&self, payload: NewContact) -> Result<Contact> {
        let created = self.inner.gateway.create_contact(&payload).await?;
        info!(id = created.id, "contact created");
        self.inner.fetch().await?;
        Ok(created)
    }

    pub async fn update(&self, id: ContactId, patch: ContactPatch) -> Result<Contact> {
        let updated = self.inner.gateway.update_contact(id, &patch).await?;
        info!(id, "contact updated");
        self.inner.fetch().await?;
        Ok(updated)
    }

    pub async fn remove(&self, id: ContactId) -> Result<()> {
        self.inner.gateway.delete_contact(id).await?;
        info!(id, "contact deleted");
        self.inner.fetch().await?;
        Ok(())
    }

    /// Reads one contact without touching the cached list.
    pub async fn contact(&self, id: ContactId) -> Result<Contact> {
        self.inner.gateway.get_contact(id).await
    }

    pub async fn notes(&self, contact_id: ContactId) -> Result<Vec<Note>> {
        self.inner.gateway.list_notes(contact_id).await
    }

    /// Returns only the created note. Neither the contact list nor any notes
    /// list is refreshed; callers wanting the new sequence call
    /// [`ContactsStore::notes`].
    pub async fn add_note(&self, contact_id: ContactId, content: &str) -> Result<Note> {
        let note = self.inner.gateway.create_note(contact_id, content).await?;
        info!(contact_id, note_id = note.id, "note added");
        Ok(note)
    }

    /// Deletes a note and returns the contact's notes as they stand after
    /// the deletion.
    pub async fn delete_note(&self, contact_id: ContactId, note_id: NoteId) -> Result<Vec<Note>> {
        self.inner.gateway.delete_note(contact_id, note_id).await?;
        info!(contact_id, note_id, "note deleted");
        self.notes(contact_id).await
    }

    pub async fn history(&self, contact_id: ContactId) -> Result<Vec<HistoryRecord>> {
        self.inner.gateway.history(contact_id).await
    }

    pub async fn tags(&self) -> Result<Vec<Tag>> {
        self.inner.gateway.list_tags().await
    }

    pub async fn create_tag(&self, name: &str) -> Result<Tag> {
        let tag = self.inner.gateway.create_tag(name).await?;
        info!(tag = %tag.name, "tag created");
        Ok(tag)
    }
}

impl StoreInner {
    async fn fetch(&self) -> Result<FetchOutcome> {
        let criteria = self.filters.snapshot();
        let ticket = self.cache.begin_fetch();
        debug!(seq = ticket.seq(), ?criteria, "fetching contacts");
        let contacts = self.gateway.list_contacts(&criteria.to_params()).await?;
        let count = contacts.len();
        if self.cache.apply(&ticket, contacts) {
            debug!(seq = ticket.seq(), count, "contacts replaced");
            Ok(FetchOutcome::Applied)
        } else {
            debug!(seq = ticket.seq(), count, "discarded stale contacts response");
            Ok(FetchOutcome::Stale)
        }
    }
}

async fn run_debounced_fetch(store: Weak<StoreInner>) {
    let Some(store) = store.upgrade() else {
        return;
    };
    if let Err(err) = store.fetch().await {
        warn!("debounced contacts fetch failed: {err}");
    }
}
