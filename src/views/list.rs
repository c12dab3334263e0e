//! Headless model of the catalog list screen.
//!
//! Renders store snapshots as id-ordered rows, hosts the entry editor for
//! create and edit, and shows two banners: the store's refresh error and the
//! error of the last delete started from this screen.

use super::banner::{BannerSlot, ErrorBanner};
use super::failure_message;
use crate::domain::{Book, BookId};
use crate::editor::{EntryEditor, SubmitOutcome};
use crate::store::{CatalogSnapshot, CatalogStore};
use crate::transport::BookApi;

const DELETE_FALLBACK: &str = "Failed to delete";

/// What the list body shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListStatus {
    Loading,
    Empty,
    Rows,
}

#[derive(Debug, Clone, Default)]
pub struct CatalogListView {
    editor: EntryEditor,
    store_error: BannerSlot,
    action_error: BannerSlot,
}

impl CatalogListView {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens the editor for a new book and clears the action error.
    pub fn open_create(&mut self) {
        self.action_error.clear();
        self.editor.open_create();
    }

    /// Opens the editor seeded from `book` and clears the action error.
    pub fn open_edit(&mut self, book: &Book) {
        self.action_error.clear();
        self.editor.open_edit(book);
    }

    #[must_use]
    pub const fn editor(&self) -> &EntryEditor {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut EntryEditor {
        &mut self.editor
    }

    /// Submits the hosted editor through the store.
    pub async fn save<A: BookApi>(&mut self, store: &CatalogStore<A>) -> SubmitOutcome {
        let outcome = self.editor.submit(store).await;
        self.sync(&store.snapshot());
        outcome
    }

    /// Deletes a book through the store.
    ///
    /// Confirmation is the caller's job. Returns `true` on success; on failure
    /// the message is shown in the action banner.
    pub async fn delete<A: BookApi>(&mut self, store: &CatalogStore<A>, id: BookId) -> bool {
        self.action_error.clear();
        let result = store.remove_book(id).await;
        self.sync(&store.snapshot());
        match result {
            Ok(()) => true,
            Err(err) => {
                tracing::debug!(id, error = %err, "delete from list failed");
                self.action_error.set(failure_message(&err, DELETE_FALLBACK));
                false
            }
        }
    }

    /// Picks up the store error from the latest snapshot.
    pub fn sync(&mut self, snapshot: &CatalogSnapshot) {
        self.store_error.sync(snapshot.error.as_deref());
    }

    #[must_use]
    pub fn status(snapshot: &CatalogSnapshot) -> ListStatus {
        if snapshot.loading {
            ListStatus::Loading
        } else if snapshot.is_empty() {
            ListStatus::Empty
        } else {
            ListStatus::Rows
        }
    }

    /// Rows in ascending id order.
    #[must_use]
    pub fn rows(snapshot: &CatalogSnapshot) -> Vec<&Book> {
        snapshot.sorted_by_id()
    }

    /// Visible banners: store error first, then action error.
    #[must_use]
    pub fn banners(&self) -> Vec<&ErrorBanner> {
        self.store_error
            .visible()
            .into_iter()
            .chain(self.action_error.visible())
            .collect()
    }

    pub fn dismiss_store_error(&mut self) {
        self.store_error.dismiss();
    }

    pub fn dismiss_action_error(&mut self) {
        self.action_error.dismiss();
    }
}
