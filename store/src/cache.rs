//! The cached contact list and the ledger of list fetches that write it.
//!
//! Only the fetch path writes here. Every fetch takes a [`FetchTicket`]
//! before it goes to the network; the ticket carries the fetch's issue order
//! and keeps the busy flag raised until it is dropped, whatever the outcome.

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;

use contacts_gateway::Contact;
use tokio::sync::watch;

/// Shared, immutable snapshot of the cached list.
pub type ContactList = Arc<Vec<Contact>>;

#[derive(Debug, Default)]
struct FetchLedger {
    issued: u64,
    applied: u64,
    in_flight: usize,
}

#[derive(Debug)]
pub(crate) struct DirectoryCache {
    contacts: watch::Sender<ContactList>,
    busy: watch::Sender<bool>,
    ledger: Mutex<FetchLedger>,
    discard_stale: bool,
}

#[derive(Debug)]
pub(crate) struct FetchTicket<'a> {
    cache: &'a DirectoryCache,
    seq: u64,
}

impl FetchTicket<'_> {
    pub(crate) fn seq(&self) -> u64 {
        self.seq
    }
}

impl Drop for FetchTicket<'_> {
    fn drop(&mut self) {
        self.cache.finish();
    }
}

impl DirectoryCache {
    pub(crate) fn new(discard_stale: bool) -> Self {
        let (contacts, _) = watch::channel(ContactList::default());
        let (busy, _) = watch::channel(false);
        Self {
            contacts,
            busy,
            ledger: Mutex::new(FetchLedger::default()),
            discard_stale,
        }
    }

    pub(crate) fn begin_fetch(&self) -> FetchTicket<'_> {
        let mut ledger = self.lock();
        ledger.issued += 1;
        ledger.in_flight += 1;
        self.set_busy(true);
        FetchTicket {
            cache: self,
            seq: ledger.issued,
        }
    }

    /// Replaces the whole list with `contacts`. Returns `false` when the
    /// response was discarded as stale.
    pub(crate) fn apply(&self, ticket: &FetchTicket<'_>, contacts: Vec<Contact>) -> bool {
        let mut ledger = self.lock();
        if self.discard_stale && ticket.seq <= ledger.applied {
            return false;
        }
        ledger.applied = ledger.applied.max(ticket.seq);
        self.contacts.send_replace(Arc::new(contacts));
        true
    }

    pub(crate) fn snapshot(&self) -> ContactList {
        Arc::clone(&self.contacts.borrow())
    }

    pub(crate) fn subscribe(&self) -> watch::Receiver<ContactList> {
        self.contacts.subscribe()
    }

    pub(crate) fn is_busy(&self) -> bool {
        *self.busy.borrow()
    }

    pub(crate) fn subscribe_busy(&self) -> watch::Receiver<bool> {
        self.busy.subscribe()
    }

    fn finish(&self) {
        let mut ledger = self.lock();
        ledger.in_flight = ledger.in_flight.saturating_sub(1);
        if ledger.in_flight == 0 {
            self.set_busy(false);
        }
    }

    fn set_busy(&self, busy: bool) {
        self.busy.send_if_modified(|current| {
            let changed = *current != busy;
            *current = busy;
            changed
        });
    }

    fn lock(&self) -> MutexGuard<'_, FetchLedger> {
        match self.ledger.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}
