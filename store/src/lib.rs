//! # Contacts Store
//!
//! Client-side state for a filterable contact directory.
//!
//! [`ContactsStore`] owns the filter criteria, the cached contact list and
//! the busy flag. Filter edits are coalesced by a trailing-edge debounce into
//! one list fetch; create/update/delete re-fetch the list as soon as the
//! write succeeds. The cached list is always a full snapshot from the
//! gateway, never a local patch.
//!
//! List responses are applied in arrival order by default, so a slow, older
//! fetch can overwrite a newer one. Setting
//! [`StoreConfig::discard_stale_responses`] makes the cache keep only the
//! most recently issued response instead.

mod cache;
mod config;
mod debounce;
mod filters;
mod store;

pub use cache::ContactList;
pub use config::DEFAULT_DEBOUNCE;
pub use config::StoreConfig;
pub use filters::FilterCriteria;
pub use store::ContactsStore;
pub use store::FetchOutcome;

pub use contacts_gateway::GatewayError;
pub use contacts_gateway::Result;
