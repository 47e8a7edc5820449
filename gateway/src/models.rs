use serde::Deserialize;
use serde::Serialize;
use serde_with::skip_serializing_none;

pub type ContactId = i64;
pub type NoteId = i64;

/// One entry of a contact's activity trail. The shape is owned by the
/// server and passed through untouched.
pub type HistoryRecord = serde_json::Value;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Contact {
    pub id: ContactId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub favorite: bool,
    /// Server order is preserved.
    #[serde(default)]
    pub tags: Vec<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Body of `POST /contacts`. Nothing is validated client-side.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewContact {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub favorite: bool,
    pub tags: Vec<String>,
}

/// Body of `PATCH /contacts/{id}`.
#[skip_serializing_none]
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContactPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub favorite: Option<bool>,
    /// `Some(vec![])` clears every tag; `None` leaves them alone.
    pub tags: Option<Vec<String>>,
}

impl ContactPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.phone.is_none()
            && self.favorite.is_none()
            && self.tags.is_none()
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Note {
    pub id: NoteId,
    pub content: String,
    pub created_at: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Tag {
    pub id: i64,
    pub name: String,
}

#[derive(Serialize)]
pub(crate) struct NewNote<'a> {
    pub content: &'a str,
}

#[derive(Serialize)]
pub(crate) struct NewTag<'a> {
    pub name: &'a str,
}

/// Query string of `GET /contacts`. A `None` field is omitted from the URL
/// entirely so the server applies no filtering for it.
#[skip_serializing_none]
#[derive(Clone, Debug, Default, Serialize, PartialEq, Eq)]
pub struct ListContactsParams {
    pub q: Option<String>,
    pub favorite: Option<bool>,
    pub tag: Option<String>,
}

impl ListContactsParams {
    pub fn is_unfiltered(&self) -> bool {
        self.q.is_none() && self.favorite.is_none() && self.tag.is_none()
    }
}
