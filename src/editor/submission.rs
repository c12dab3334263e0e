//! Submission strategy produced by the entry editor.
//!
//! The editor does not know which store operation it triggers. It hands a
//! [`Submission`] to a [`SubmissionTarget`], which decides how to carry it out:
//! the catalog store routes it to create or update and refreshes, while the
//! detail view updates and reloads its single book.

use async_trait::async_trait;

use crate::domain::{BookId, BookInput, Result};

/// Validated mutation request built by the editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// Create a new book from the payload.
    Create(BookInput),

    /// Replace the fields of an existing book.
    Update { id: BookId, input: BookInput },
}

impl Submission {
    #[must_use]
    pub const fn input(&self) -> &BookInput {
        match self {
            Self::Create(input) | Self::Update { input, .. } => input,
        }
    }
}

/// Receiver of editor submissions.
#[async_trait]
pub trait SubmissionTarget: Send + Sync {
    /// Carries out a submission.
    ///
    /// # Errors
    ///
    /// Returns the failure to show inline in the editor.
    async fn submit(&self, submission: Submission) -> Result<()>;
}
