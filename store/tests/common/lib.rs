//! Shared helpers for the contacts store integration tests.


use std::collections::HashMap;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::time::Duration;

use async_trait::async_trait;
use contacts_gateway::Contact;
use contacts_gateway::ContactId;
use contacts_gateway::ContactPatch;
use contacts_gateway::ContactsGateway;
use contacts_gateway::GatewayError;
use contacts_gateway::HistoryRecord;
use contacts_gateway::ListContactsParams;
use contacts_gateway::NewContact;
use contacts_gateway::Note;
use contacts_gateway::NoteId;
use contacts_gateway::Result;
use contacts_gateway::StatusCode;
use contacts_gateway::Tag;
use serde_json::json;

pub fn new_contact(name: &str, favorite: bool, tags: &[&str]) -> NewContact {
    NewContact {
        name: name.to_string(),
        email: format!("{}@example.com", name.to_lowercase()),
        phone: "+1 555 0100".to_string(),
        favorite,
        tags: tags.iter().map(ToString::to_string).collect(),
    }
}

pub fn names(contacts: &[Contact]) -> Vec<String> {
    contacts.iter().map(|c| c.name.clone()).collect()
}

/// In-process stand-in for the contacts API.
///
/// Filtering mirrors the server: `q` is a case-insensitive substring match on
/// name, email, phone, tag names and note content; `favorite` and `tag` are
/// exact. Lists come back most recently updated first. Every list call is
/// recorded, and individual calls can be delayed or failed on demand.
#[derive(Default)]
pub struct InMemoryGateway {
    state: Mutex<DirectoryState>,
}

#[derive(Default)]
struct DirectoryState {
    contacts: Vec<Contact>,
    notes: HashMap<ContactId, Vec<Note>>,
    history: HashMap<ContactId, Vec<HistoryRecord>>,
    tags: Vec<Tag>,
    next_id: i64,
    clock: u64,
    list_calls: Vec<ListContactsParams>,
    calls: Vec<&'static str>,
    list_delays: VecDeque<Duration>,
    failures: HashMap<&'static str, StatusCode>,
}

impl DirectoryState {
    fn tick(&mut self) -> String {
        self.clock += 1;
        format!("2024-01-01T{:02}:{:02}:00", self.clock / 60, self.clock % 60)
    }

    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn enter(&mut self, operation: &'static str) -> Result<()> {
        self.calls.push(operation);
        match self.failures.remove(operation) {
            Some(status) => Err(GatewayError::status(operation, status, "injected failure")),
            None => Ok(()),
        }
    }

    fn position(&self, operation: &'static str, id: ContactId) -> Result<usize> {
        self.contacts
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| not_found(operation, "Contact not found"))
    }

    fn matches(&self, contact: &Contact, params: &ListContactsParams) -> bool {
        if let Some(favorite) = params.favorite
            && contact.favorite != favorite
        {
            return false;
        }
        if let Some(tag) = params.tag.as_deref()
            && !tag.is_empty()
            && !contact.tags.iter().any(|t| t == tag)
        {
            return false;
        }
        match params.q.as_deref() {
            Some(q) if !q.is_empty() => {
                let needle = q.to_lowercase();
                let hit = |value: &str| value.to_lowercase().contains(&needle);
                hit(&contact.name)
                    || hit(&contact.email)
                    || hit(&contact.phone)
                    || contact.tags.iter().any(|t| hit(t))
                    || self
                        .notes
                        .get(&contact.id)
                        .is_some_and(|notes| notes.iter().any(|n| hit(&n.content)))
            }
            _ => true,
        }
    }

    fn ensure_tags(&mut self, names: &[String]) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        for name in names.iter().map(|n| n.trim()).filter(|n| !n.is_empty()) {
            if out.iter().any(|existing| existing == name) {
                continue;
            }
            if !self.tags.iter().any(|t| t.name == name) {
                let id = self.tags.len() as i64 + 1;
                self.tags.push(Tag {
                    id,
                    name: name.to_string(),
                });
            }
            out.push(name.to_string());
        }
        out
    }
}

fn not_found(operation: &'static str, detail: &str) -> GatewayError {
    GatewayError::status(
        operation,
        StatusCode::NOT_FOUND,
        json!({ "detail": detail }).to_string(),
    )
}

impl InMemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_contacts(contacts: &[NewContact]) -> Self {
        let gateway = Self::new();
        for payload in contacts {
            gateway.insert(payload);
        }
        gateway
    }

    /// Adds a contact directly, without recording a call.
    pub fn insert(&self, payload: &NewContact) -> Contact {
        let mut state = self.lock();
        let id = state.next_id();
        let now = state.tick();
        let tags = state.ensure_tags(&payload.tags);
        let contact = Contact {
            id,
            name: payload.name.clone(),
            email: payload.email.clone(),
            phone: payload.phone.clone(),
            favorite: payload.favorite,
            tags,
            created_at: now.clone(),
            updated_at: now,
        };
        state.contacts.insert(0, contact.clone());
        contact
    }

    /// Delays the next list response by `delay`.
    pub fn delay_next_list(&self, delay: Duration) {
        self.lock().list_delays.push_back(delay);
    }

    /// Fails the next call of `operation` (named as in gateway errors, e.g.
    /// `"create contact"`) with `status`.
    pub fn fail_next(&self, operation: &'static str, status: StatusCode) {
        self.lock().failures.insert(operation, status);
    }

    pub fn list_calls(&self) -> Vec<ListContactsParams> {
        self.lock().list_calls.clone()
    }

    pub fn list_call_count(&self) -> usize {
        self.lock().list_calls.len()
    }

    /// Every call made so far, in order, by operation name.
    pub fn calls(&self) -> Vec<&'static str> {
        self.lock().calls.clone()
    }

    fn lock(&self) -> MutexGuard<'_, DirectoryState> {
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

#[async_trait]
impl ContactsGateway for InMemoryGateway {
    async fn list_contacts(&self, params: &ListContactsParams) -> Result<Vec<Contact>> {
        let (result, delay) = {
            let mut state = self.lock();
            state.list_calls.push(params.clone());
            let delay = state.list_delays.pop_front();
            let result = state.enter("list contacts").map(|()| {
                state
                    .contacts
                    .iter()
                    .filter(|c| state.matches(c, params))
                    .cloned()
                    .collect::<Vec<_>>()
            });
            (result, delay)
        };
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        result
    }

    async fn get_contact(&self, id: ContactId) -> Result<Contact> {
        let mut state = self.lock();
        state.enter("get contact")?;
        let index = state.position("get contact", id)?;
        Ok(state.contacts[index].clone())
    }

    async fn create_contact(&self, payload: &NewContact) -> Result<Contact> {
        self.lock().enter("create contact")?;
        Ok(self.insert(payload))
    }

    async fn update_contact(&self, id: ContactId, patch: &ContactPatch) -> Result<Contact> {
        let mut state = self.lock();
        state.enter("update contact")?;
        let index = state.position("update contact", id)?;
        let mut contact = state.contacts.remove(index);
        let before = contact.clone();
        if let Some(name) = &patch.name {
            contact.name = name.clone();
        }
        if let Some(email) = &patch.email {
            contact.email = email.clone();
        }
        if let Some(phone) = &patch.phone {
            contact.phone = phone.clone();
        }
        if let Some(favorite) = patch.favorite {
            contact.favorite = favorite;
        }
        if let Some(tags) = &patch.tags {
            contact.tags = state.ensure_tags(tags);
        }
        contact.updated_at = state.tick();

        let changes = [
            ("name", before.name, contact.name.clone()),
            ("email", before.email, contact.email.clone()),
            ("phone", before.phone, contact.phone.clone()),
            (
                "favorite",
                before.favorite.to_string(),
                contact.favorite.to_string(),
            ),
        ];
        for (field, old_value, new_value) in changes {
            if old_value == new_value {
                continue;
            }
            let entry_id = state.next_id();
            let changed_at = contact.updated_at.clone();
            state.history.entry(id).or_default().insert(
                0,
                json!({
                    "id": entry_id,
                    "field": field,
                    "old_value": old_value,
                    "new_value": new_value,
                    "changed_at": changed_at,
                }),
            );
        }

        state.contacts.insert(0, contact.clone());
        Ok(contact)
    }

    async fn delete_contact(&self, id: ContactId) -> Result<()> {
        let mut state = self.lock();
        state.enter("delete contact")?;
        let index = state.position("delete contact", id)?;
        state.contacts.remove(index);
        state.notes.remove(&id);
        state.history.remove(&id);
        Ok(())
    }

    async fn list_notes(&self, contact_id: ContactId) -> Result<Vec<Note>> {
        let mut state = self.lock();
        state.enter("list notes")?;
        state.position("list notes", contact_id)?;
        Ok(state.notes.get(&contact_id).cloned().unwrap_or_default())
    }

    async fn create_note(&self, contact_id: ContactId, content: &str) -> Result<Note> {
        let mut state = self.lock();
        state.enter("create note")?;
        state.position("create note", contact_id)?;
        let note = Note {
            id: state.next_id(),
            content: content.to_string(),
            created_at: state.tick(),
        };
        state
            .notes
            .entry(contact_id)
            .or_default()
            .insert(0, note.clone());
        Ok(note)
    }

    async fn delete_note(&self, contact_id: ContactId, note_id: NoteId) -> Result<()> {
        let mut state = self.lock();
        state.enter("delete note")?;
        state.position("delete note", contact_id)?;
        let notes = state.notes.entry(contact_id).or_default();
        let index = notes
            .iter()
            .position(|n| n.id == note_id)
            .ok_or_else(|| not_found("delete note", "Note not found"))?;
        notes.remove(index);
        Ok(())
    }

    async fn history(&self, contact_id: ContactId) -> Result<Vec<HistoryRecord>> {
        let mut state = self.lock();
        state.enter("contact history")?;
        state.position("contact history", contact_id)?;
        Ok(state.history.get(&contact_id).cloned().unwrap_or_default())
    }

    async fn list_tags(&self) -> Result<Vec<Tag>> {
        let mut state = self.lock();
        state.enter("list tags")?;
        let mut tags = state.tags.clone();
        tags.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(tags)
    }

    async fn create_tag(&self, name: &str) -> Result<Tag> {
        let mut state = self.lock();
        state.enter("create tag")?;
        if state.tags.iter().any(|t| t.name == name) {
            return Err(GatewayError::status(
                "create tag",
                StatusCode::BAD_REQUEST,
                json!({ "detail": "Tag already exists" }).to_string(),
            ));
        }
        let tag = Tag {
            id: state.tags.len() as i64 + 1,
            name: name.to_string(),
        };
        state.tags.push(tag.clone());
        Ok(tag)
    }
}
