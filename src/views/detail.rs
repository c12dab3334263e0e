//! Headless model of the single-book detail screen.
//!
//! The detail screen works on one book fetched by id straight from the service,
//! independent of the catalog store. Edits go through the hosted entry editor
//! and reload the book afterwards; a successful delete asks the caller to
//! navigate back to the list.

use async_trait::async_trait;

use super::banner::{BannerSlot, ErrorBanner};
use super::failure_message;
use crate::domain::{Book, BookId, Result};
use crate::editor::{parse_integral, EntryEditor, SubmitOutcome, Submission, SubmissionTarget};
use crate::transport::BookApi;

const INVALID_ID: &str = "Invalid book id";
const LOAD_FALLBACK: &str = "Failed to load book";
const DELETE_FALLBACK: &str = "Failed to delete";

/// What the caller should do after a detail action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailOutcome {
    /// Stay on the detail screen.
    Stay,
    /// The book is gone; show the list.
    NavigateToList,
}

/// Submits editor requests straight to the service, without store reconciliation.
struct DirectTarget<'a, A: ?Sized>(&'a A);

#[async_trait]
impl<A: BookApi + ?Sized> SubmissionTarget for DirectTarget<'_, A> {
    async fn submit(&self, submission: Submission) -> Result<()> {
        match submission {
            Submission::Create(input) => self.0.create(&input).await.map(|_| ()),
            Submission::Update { id, input } => self.0.update(id, &input).await.map(|_| ()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct BookDetailView {
    raw_id: String,
    id: Option<BookId>,
    book: Option<Book>,
    loading: bool,
    error: BannerSlot,
    action_error: BannerSlot,
    editor: EntryEditor,
}

impl BookDetailView {
    /// Creates the view for the id segment of a route, before loading.
    pub fn new(raw_id: impl Into<String>) -> Self {
        let raw_id = raw_id.into();
        Self {
            id: parse_book_id(&raw_id),
            raw_id,
            book: None,
            loading: true,
            error: BannerSlot::default(),
            action_error: BannerSlot::default(),
            editor: EntryEditor::new(),
        }
    }

    /// Fetches the book, replacing whatever was shown.
    pub async fn load<A: BookApi + ?Sized>(&mut self, api: &A) {
        self.action_error.clear();
        self.error.clear();
        self.book = None;

        let Some(id) = self.id else {
            tracing::debug!(raw_id = %self.raw_id, "rejecting invalid book id");
            self.error.set(INVALID_ID);
            self.loading = false;
            return;
        };

        self.loading = true;
        match api.get(id).await {
            Ok(book) => self.book = Some(book),
            Err(err) => {
                tracing::debug!(id, error = %err, "detail load failed");
                self.error.set(failure_message(&err, LOAD_FALLBACK));
            }
        }
        self.loading = false;
    }

    /// Opens the hosted editor on the loaded book. Returns `false` if no book
    /// is loaded.
    pub fn open_edit(&mut self) -> bool {
        match &self.book {
            Some(book) => {
                self.editor.open_edit(book);
                true
            }
            None => false,
        }
    }

    /// Submits the hosted editor as an update and reloads on success.
    pub async fn save<A: BookApi + ?Sized>(&mut self, api: &A) -> SubmitOutcome {
        let outcome = self.editor.submit(&DirectTarget(api)).await;
        if outcome == SubmitOutcome::Saved {
            self.load(api).await;
        }
        outcome
    }

    /// Deletes the loaded book.
    ///
    /// Confirmation is the caller's job. On failure the message is shown in the
    /// action banner.
    pub async fn delete<A: BookApi + ?Sized>(&mut self, api: &A) -> DetailOutcome {
        let Some(id) = self.book.as_ref().map(|book| book.id) else {
            return DetailOutcome::Stay;
        };
        self.action_error.clear();

        match api.delete(id).await {
            Ok(()) => DetailOutcome::NavigateToList,
            Err(err) => {
                tracing::debug!(id, error = %err, "delete from detail failed");
                self.action_error.set(failure_message(&err, DELETE_FALLBACK));
                DetailOutcome::Stay
            }
        }
    }

    #[must_use]
    pub const fn id(&self) -> Option<BookId> {
        self.id
    }

    #[must_use]
    pub fn raw_id(&self) -> &str {
        &self.raw_id
    }

    #[must_use]
    pub const fn book(&self) -> Option<&Book> {
        self.book.as_ref()
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub const fn editor(&self) -> &EntryEditor {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut EntryEditor {
        &mut self.editor
    }

    /// Visible banners: load error first, then action error.
    #[must_use]
    pub fn banners(&self) -> Vec<&ErrorBanner> {
        self.error
            .visible()
            .into_iter()
            .chain(self.action_error.visible())
            .collect()
    }

    pub fn dismiss_error(&mut self) {
        self.error.dismiss();
    }

    pub fn dismiss_action_error(&mut self) {
        self.action_error.dismiss();
    }
}

/// Parses a route id segment; only positive integral values are ids.
#[must_use]
pub fn parse_book_id(raw: &str) -> Option<BookId> {
    parse_integral(raw).filter(|id| *id > 0)
}
