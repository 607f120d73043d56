// src/application/client.rs
use crate::application::error::ApplicationResult;
use crate::domain::bookmark::{Bookmark, BookmarkId, DraftBookmark};
use crate::domain::repositories::repository::BookmarkRepository;
use serde_json::Value;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, instrument, warn};

/// Whether a completed refresh replaced the local list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    Applied,
    /// A refresh issued later had already been applied; this response was dropped.
    Stale,
}

#[derive(Debug, Default)]
struct ClientState {
    bookmarks: Vec<Bookmark>,
    draft: DraftBookmark,
    /// Ticket of the refresh whose response is currently shown.
    applied_ticket: u64,
}

/// Keeps a local bookmark list and a draft in sync with the bookmark service.
///
/// The list is only ever replaced by a full fetch; mutations go to the
/// service and are followed by a refresh. Operations take `&self` and may
/// run concurrently; the client can be shared behind an `Arc`.
#[derive(Debug)]
pub struct BookmarkClient<R: BookmarkRepository> {
    repository: Arc<R>,
    state: RwLock<ClientState>,
    next_ticket: AtomicU64,
}

impl<R: BookmarkRepository> BookmarkClient<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self {
            repository,
            state: RwLock::new(ClientState::default()),
            next_ticket: AtomicU64::new(0),
        }
    }

    // Writers only assign whole values, so a poisoned lock still holds consistent state.
    fn read_state(&self) -> RwLockReadGuard<'_, ClientState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, ClientState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Bookmarks from the most recent applied refresh.
    pub fn bookmarks(&self) -> Vec<Bookmark> {
        self.read_state().bookmarks.clone()
    }

    pub fn draft(&self) -> DraftBookmark {
        self.read_state().draft.clone()
    }

    pub fn set_draft_field<K: Into<String>, V: Into<Value>>(&self, key: K, value: V) {
        self.write_state().draft.set(key, value);
    }

    pub fn remove_draft_field(&self, key: &str) -> Option<Value> {
        self.write_state().draft.remove(key)
    }

    pub fn replace_draft(&self, draft: DraftBookmark) {
        self.write_state().draft = draft;
    }

    pub fn clear_draft(&self) {
        self.write_state().draft.clear();
    }

    /// Replace the local list with the service's current collection.
    ///
    /// On failure the previous list is kept. Each call takes a ticket when
    /// issued; a response is applied only if no later-issued refresh has
    /// been applied already.
    #[instrument(skip(self), level = "debug")]
    pub async fn refresh(&self) -> ApplicationResult<RefreshOutcome> {
        let ticket = self.next_ticket.fetch_add(1, Ordering::SeqCst) + 1;
        debug!("Refresh #{} issued", ticket);

        let bookmarks = self
            .repository
            .list()
            .await
            .map_err(|e| e.context("refresh bookmarks"))?;

        let mut state = self.write_state();
        if ticket < state.applied_ticket {
            warn!(
                "Discarding refresh #{}: #{} already applied",
                ticket, state.applied_ticket
            );
            return Ok(RefreshOutcome::Stale);
        }
        debug!("Refresh #{} applied with {} bookmarks", ticket, bookmarks.len());
        state.bookmarks = bookmarks;
        state.applied_ticket = ticket;
        Ok(RefreshOutcome::Applied)
    }

    /// Submit the current draft, then clear it and refresh.
    ///
    /// The draft is submitted as it is at call time. If the service rejects it
    /// or cannot be reached the draft and the list are left untouched. If the
    /// creation succeeds but the follow-up refresh fails, the draft is already
    /// cleared and the refresh error is returned.
    #[instrument(skip(self), level = "debug")]
    pub async fn create(&self) -> ApplicationResult<RefreshOutcome> {
        self.submit().await?;
        self.refresh().await
    }

    /// Submit the current draft and clear it, without refreshing.
    ///
    /// Callers that must tell a rejected draft from a failed reload use this
    /// followed by [`BookmarkClient::refresh`].
    #[instrument(skip(self), level = "debug")]
    pub async fn submit(&self) -> ApplicationResult<()> {
        let draft = self.draft();
        debug!("Creating bookmark from draft with {} fields", draft.fields().len());

        self.repository
            .create(&draft)
            .await
            .map_err(|e| e.context("create bookmark"))?;

        self.clear_draft();
        Ok(())
    }

    /// Delete a bookmark by id, then refresh.
    ///
    /// Unknown ids are passed through; the service decides the outcome.
    #[instrument(skip(self, id), level = "debug", fields(id = %id))]
    pub async fn remove(&self, id: &BookmarkId) -> ApplicationResult<RefreshOutcome> {
        self.repository
            .delete(id)
            .await
            .map_err(|e| e.context(format!("delete bookmark {}", id)))?;
        self.refresh().await
    }

    /// Replace the fields of an existing bookmark, then refresh.
    #[instrument(skip(self, id, fields), level = "debug", fields(id = %id))]
    pub async fn update(
        &self,
        id: &BookmarkId,
        fields: &DraftBookmark,
    ) -> ApplicationResult<RefreshOutcome> {
        self.repository
            .update(id, fields)
            .await
            .map_err(|e| e.context(format!("update bookmark {}", id)))?;
        self.refresh().await
    }

    /// Fetch one bookmark without touching the local list.
    #[instrument(skip(self, id), level = "debug", fields(id = %id))]
    pub async fn fetch(&self, id: &BookmarkId) -> ApplicationResult<Bookmark> {
        Ok(self
            .repository
            .get(id)
            .await
            .map_err(|e| e.context(format!("fetch bookmark {}", id)))?)
    }
}
