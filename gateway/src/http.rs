use async_trait::async_trait;
use reqwest::RequestBuilder;
use reqwest::header::CONTENT_TYPE;
use reqwest::header::HeaderMap;
use reqwest::header::HeaderValue;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::ContactsGateway;
use crate::config::GatewayConfig;
use crate::error::GatewayError;
use crate::error::Result;
use crate::models::Contact;
use crate::models::ContactId;
use crate::models::ContactPatch;
use crate::models::HistoryRecord;
use crate::models::ListContactsParams;
use crate::models::NewContact;
use crate::models::NewNote;
use crate::models::NewTag;
use crate::models::Note;
use crate::models::NoteId;
use crate::models::Tag;

/// [`ContactsGateway`] over HTTP/JSON.
#[derive(Clone, Debug)]
pub struct HttpContactsGateway {
    http: reqwest::Client,
    base_url: String,
}

impl HttpContactsGateway {
    pub fn new(config: GatewayConfig) -> Result<Self> {
        let base_url = config.base_url.trim_end_matches('/').to_string();
        url::Url::parse(&base_url).map_err(|source| GatewayError::InvalidBaseUrl {
            url: config.base_url.clone(),
            source,
        })?;
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .default_headers(default_headers())
            .build()
            .map_err(GatewayError::Client)?;
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        request: RequestBuilder,
    ) -> Result<T> {
        let body = self.send(operation, request).await?;
        serde_json::from_str(&body).map_err(|source| GatewayError::Decode { operation, source })
    }

    async fn send(&self, operation: &'static str, request: RequestBuilder) -> Result<String> {
        let resp = request
            .send()
            .await
            .map_err(|source| GatewayError::Transport { operation, source })?;
        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|source| GatewayError::Transport { operation, source })?;
        debug!(operation, %status, "gateway response");
        if !status.is_success() {
            return Err(GatewayError::status(operation, status, body));
        }
        Ok(body)
    }
}

fn default_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers
}

#[async_trait]
impl ContactsGateway for HttpContactsGateway {
    async fn list_contacts(&self, params: &ListContactsParams) -> Result<Vec<Contact>> {
        let request = self.http.get(self.url("/contacts")).query(params);
        self.send_json("list contacts", request).await
    }

    async fn get_contact(&self, id: ContactId) -> Result<Contact> {
        let request = self.http.get(self.url(&format!("/contacts/{id}")));
        self.send_json("get contact", request).await
    }

    async fn create_contact(&self, payload: &NewContact) -> Result<Contact> {
        let request = self.http.post(self.url("/contacts")).json(payload);
        self.send_json("create contact", request).await
    }

    async fn update_contact(&self, id: ContactId, patch: &ContactPatch) -> Result<Contact> {
        let request = self
            .http
            .patch(self.url(&format!("/contacts/{id}")))
            .json(patch);
        self.send_json("update contact", request).await
    }

    async fn delete_contact(&self, id: ContactId) -> Result<()> {
        let request = self.http.delete(self.url(&format!("/contacts/{id}")));
        self.send("delete contact", request).await.map(drop)
    }

    async fn list_notes(&self, contact_id: ContactId) -> Result<Vec<Note>> {
        let request = self
            .http
            .get(self.url(&format!("/contacts/{contact_id}/notes")));
        self.send_json("list notes", request).await
    }

    async fn create_note(&self, contact_id: ContactId, content: &str) -> Result<Note> {
        let request = self
            .http
            .post(self.url(&format!("/contacts/{contact_id}/notes")))
            .json(&NewNote { content });
        self.send_json("create note", request).await
    }

    async fn delete_note(&self, contact_id: ContactId, note_id: NoteId) -> Result<()> {
        let request = self
            .http
            .delete(self.url(&format!("/contacts/{contact_id}/notes/{note_id}")));
        self.send("delete note", request).await.map(drop)
    }

    async fn history(&self, contact_id: ContactId) -> Result<Vec<HistoryRecord>> {
        let request = self
            .http
            .get(self.url(&format!("/contacts/{contact_id}/history")));
        self.send_json("contact history", request).await
    }

    async fn list_tags(&self) -> Result<Vec<Tag>> {
        let request = self.http.get(self.url("/tags"));
        self.send_json("list tags", request).await
    }

    async fn create_tag(&self, name: &str) -> Result<Tag> {
        let request = self.http.post(self.url("/tags")).json(&NewTag { name });
        self.send_json("create tag", request).await
    }
}
