//! Entry editor state machine.
//!
//! [`EntryEditor`] owns the transient form state of one create/edit dialog.
//! Submitting is split in two phases so an event loop can keep rendering while
//! the request is in flight:
//!
//! 1. [`EntryEditor::begin_submit`] validates and, on success, returns the
//!    [`Submission`] to carry out and enters `Submitting`.
//! 2. [`EntryEditor::finish_submit`] records the outcome: close on success,
//!    `Failed` with the message on error.
//!
//! [`EntryEditor::submit`] runs both phases against a [`SubmissionTarget`].

use super::form::Draft;
use super::modes::{EditorMode, EditorPhase};
use super::submission::{Submission, SubmissionTarget};
use crate::domain::{Book, CatalogError, Result, ValidationError};

/// Label of the submit control while a submission is in flight.
pub const SUBMITTING_LABEL: &str = "Saving…";

/// Result of [`EntryEditor::begin_submit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitStep {
    /// The editor is closed or already submitting; nothing happened.
    Ignored,

    /// Validation failed; the message is shown and nothing was sent.
    Rejected(ValidationError),

    /// Validation passed; the caller must carry out the submission and report
    /// back through [`EntryEditor::finish_submit`].
    Ready(Submission),
}

/// Result of a full [`EntryEditor::submit`] run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Ignored,
    Rejected(ValidationError),
    /// The target accepted the submission and the editor closed.
    Saved,
    /// The target failed; the editor stays open showing the message.
    Failed(CatalogError),
}

/// Reusable create/edit workflow for one book.
#[derive(Debug, Clone)]
pub struct EntryEditor {
    mode: EditorMode,
    phase: EditorPhase,
    draft: Draft,
    error: Option<String>,
}

impl Default for EntryEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl EntryEditor {
    /// Creates a closed editor.
    #[must_use]
    pub fn new() -> Self {
        Self {
            mode: EditorMode::Create,
            phase: EditorPhase::Closed,
            draft: Draft::default(),
            error: None,
        }
    }

    /// Opens the editor with empty fields for a new book.
    ///
    /// Ignored while a submission is in flight.
    pub fn open_create(&mut self) {
        self.open(EditorMode::Create, Draft::default());
    }

    /// Opens the editor seeded from `book`.
    ///
    /// Ignored while a submission is in flight.
    pub fn open_edit(&mut self, book: &Book) {
        self.open(EditorMode::Edit(book.clone()), Draft::from_book(book));
    }

    fn open(&mut self, mode: EditorMode, draft: Draft) {
        if self.phase == EditorPhase::Submitting {
            tracing::debug!("open ignored while submitting");
            return;
        }
        tracing::debug!(heading = mode.heading(), "editor opened");
        self.mode = mode;
        self.draft = draft;
        self.error = None;
        self.phase = EditorPhase::Clean;
    }

    /// Closes the editor and discards its transient state.
    ///
    /// Returns `false` (and stays open) while a submission is in flight.
    pub fn close(&mut self) -> bool {
        if self.phase == EditorPhase::Submitting {
            return false;
        }
        self.reset();
        true
    }

    fn reset(&mut self) {
        self.phase = EditorPhase::Closed;
        self.mode = EditorMode::Create;
        self.draft = Draft::default();
        self.error = None;
    }

    pub fn set_title(&mut self, value: impl Into<String>) -> bool {
        let value = value.into();
        self.edit(|draft| draft.title = value)
    }

    pub fn set_author(&mut self, value: impl Into<String>) -> bool {
        let value = value.into();
        self.edit(|draft| draft.author = value)
    }

    pub fn set_year(&mut self, value: impl Into<String>) -> bool {
        let value = value.into();
        self.edit(|draft| draft.year = value)
    }

    /// Applies a field change. Returns `false` if the editor does not accept
    /// input right now. A shown error stays until the next submit or reopen.
    fn edit(&mut self, change: impl FnOnce(&mut Draft)) -> bool {
        if !self.phase.accepts_input() {
            return false;
        }
        change(&mut self.draft);
        self.phase = EditorPhase::Editing;
        true
    }

    /// Validates the fields and, if they pass, enters `Submitting`.
    pub fn begin_submit(&mut self) -> SubmitStep {
        if !self.phase.accepts_input() {
            tracing::debug!(phase = ?self.phase, "submit ignored");
            return SubmitStep::Ignored;
        }

        let input = match self.draft.validate() {
            Ok(input) => input,
            Err(err) => {
                tracing::debug!(error = %err, "submission rejected");
                self.error = Some(err.to_string());
                self.phase = EditorPhase::Failed;
                return SubmitStep::Rejected(err);
            }
        };

        let submission = match &self.mode {
            EditorMode::Create => Submission::Create(input),
            EditorMode::Edit(book) => Submission::Update { id: book.id, input },
        };

        tracing::debug!(
            title = %submission.input().title,
            year = submission.input().year,
            "submission ready"
        );
        self.error = None;
        self.phase = EditorPhase::Submitting;
        SubmitStep::Ready(submission)
    }

    /// Records the outcome of the in-flight submission.
    ///
    /// On success the editor closes; on failure it returns to `Failed` with the
    /// failure message and keeps every field. Ignored unless submitting.
    pub fn finish_submit(&mut self, outcome: &Result<()>) {
        if self.phase != EditorPhase::Submitting {
            tracing::debug!(phase = ?self.phase, "finish ignored");
            return;
        }
        match outcome {
            Ok(()) => {
                tracing::debug!("submission saved");
                self.reset();
            }
            Err(err) => {
                tracing::debug!(error = %err, "submission failed");
                self.error = Some(err.to_string());
                self.phase = EditorPhase::Failed;
            }
        }
    }

    /// Validates, submits to `target`, and records the outcome.
    pub async fn submit<T>(&mut self, target: &T) -> SubmitOutcome
    where
        T: SubmissionTarget + ?Sized,
    {
        let submission = match self.begin_submit() {
            SubmitStep::Ignored => return SubmitOutcome::Ignored,
            SubmitStep::Rejected(err) => return SubmitOutcome::Rejected(err),
            SubmitStep::Ready(submission) => submission,
        };

        let outcome = target.submit(submission).await;
        self.finish_submit(&outcome);
        match outcome {
            Ok(()) => SubmitOutcome::Saved,
            Err(err) => SubmitOutcome::Failed(err),
        }
    }

    #[must_use]
    pub const fn phase(&self) -> EditorPhase {
        self.phase
    }

    #[must_use]
    pub const fn mode(&self) -> &EditorMode {
        &self.mode
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.phase.is_open()
    }

    #[must_use]
    pub const fn draft(&self) -> &Draft {
        &self.draft
    }

    /// Inline error message, if any.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    #[must_use]
    pub const fn heading(&self) -> &'static str {
        self.mode.heading()
    }

    #[must_use]
    pub const fn submit_label(&self) -> &'static str {
        match self.phase {
            EditorPhase::Submitting => SUBMITTING_LABEL,
            _ => self.mode.submit_label(),
        }
    }
}
