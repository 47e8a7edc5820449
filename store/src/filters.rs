//! Filter criteria for the contact list.

use contacts_gateway::ListContactsParams;
use std::sync::Mutex;
use std::sync::MutexGuard;

/// The three independent list filters.
///
/// An empty `query` or `tag` and a `None` favorite each mean "do not filter
/// on this". Values are never validated or trimmed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub query: String,
    pub favorite: Option<bool>,
    pub tag: String,
}

impl FilterCriteria {
    /// Request parameters for `GET /contacts`; sentinel values are left out.
    pub fn to_params(&self) -> ListContactsParams {
        ListContactsParams {
            q: non_empty(&self.query),
            favorite: self.favorite,
            tag: non_empty(&self.tag),
        }
    }

    pub fn is_unfiltered(&self) -> bool {
        self.query.is_empty() && self.favorite.is_none() && self.tag.is_empty()
    }
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

/// Presentation-owned criteria. Each setter reports whether the value
/// actually changed so the caller only reacts to real edits.
#[derive(Debug, Default)]
pub(crate) struct FilterState {
    criteria: Mutex<FilterCriteria>,
}

impl FilterState {
    pub(crate) fn snapshot(&self) -> FilterCriteria {
        self.lock().clone()
    }

    pub(crate) fn set_query(&self, query: String) -> bool {
        replace_if_changed(&mut self.lock().query, query)
    }

    pub(crate) fn set_favorite(&self, favorite: Option<bool>) -> bool {
        replace_if_changed(&mut self.lock().favorite, favorite)
    }

    pub(crate) fn set_tag(&self, tag: String) -> bool {
        replace_if_changed(&mut self.lock().tag, tag)
    }

    fn lock(&self) -> MutexGuard<'_, FilterCriteria> {
        match self.criteria.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

fn replace_if_changed<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        return false;
    }
    *slot = value;
    true
}
