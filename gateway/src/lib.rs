//! # Contacts Gateway
//!
//! Typed access to the remote contact-management API.
//!
//! The [`ContactsGateway`] trait is the seam the directory controller is
//! written against; [`HttpContactsGateway`] is the production implementation
//! backed by `reqwest`. Request/response shapes live in [`models`].
//!
//! ## Example
//!
//! ```no_run
//! use contacts_gateway::ContactsGateway;
//! use contacts_gateway::GatewayConfig;
//! use contacts_gateway::HttpContactsGateway;
//! use contacts_gateway::ListContactsParams;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let gateway = HttpContactsGateway::new(GatewayConfig::from_env())?;
//!     let contacts = gateway.list_contacts(&ListContactsParams::default()).await?;
//!     println!("{} contacts", contacts.len());
//!     Ok(())
//! }
//! ```

mod config;
mod error;
mod http;
pub mod models;

use async_trait::async_trait;

pub use config::API_BASE_ENV_VAR;
pub use config::DEFAULT_API_BASE;
pub use config::DEFAULT_TIMEOUT;
pub use config::GatewayConfig;
pub use error::GatewayError;
pub use error::Result;
pub use http::HttpContactsGateway;
pub use models::Contact;
pub use models::ContactId;
pub use models::ContactPatch;
pub use models::HistoryRecord;
pub use models::ListContactsParams;
pub use models::NewContact;
pub use models::Note;
pub use models::NoteId;
pub use models::Tag;
pub use reqwest::StatusCode;

/// Operations exposed by the contact-management API.
///
/// Every method is a single round trip. Implementations must not retry and
/// must not translate failures beyond mapping them onto [`GatewayError`].
#[async_trait]
pub trait ContactsGateway: Send + Sync {
    /// `GET /contacts`, with only the criteria present in `params`.
    async fn list_contacts(&self, params: &ListContactsParams) -> Result<Vec<Contact>>;

    /// `GET /contacts/{id}`
    async fn get_contact(&self, id: ContactId) -> Result<Contact>;

    /// `POST /contacts`
    async fn create_contact(&self, payload: &NewContact) -> Result<Contact>;

    /// `PATCH /contacts/{id}`; fields left as `None` are not sent.
    async fn update_contact(&self, id: ContactId, patch: &ContactPatch) -> Result<Contact>;

    /// `DELETE /contacts/{id}`
    async fn delete_contact(&self, id: ContactId) -> Result<()>;

    /// `GET /contacts/{id}/notes`
    async fn list_notes(&self, contact_id: ContactId) -> Result<Vec<Note>>;

    /// `POST /contacts/{id}/notes`
    async fn create_note(&self, contact_id: ContactId, content: &str) -> Result<Note>;

    /// `DELETE /contacts/{id}/notes/{note_id}`
    async fn delete_note(&self, contact_id: ContactId, note_id: NoteId) -> Result<()>;

    /// `GET /contacts/{id}/history`
    async fn history(&self, contact_id: ContactId) -> Result<Vec<HistoryRecord>>;

    /// `GET /tags`
    async fn list_tags(&self) -> Result<Vec<Tag>>;

    /// `POST /tags`
    async fn create_tag(&self, name: &str) -> Result<Tag>;
}
