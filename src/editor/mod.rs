//! Entry editor: the create/edit workflow shared by list and detail views.
//!
//! # Modules
//!
//! - [`form`]: Raw field text and validation
//! - [`modes`]: Editor mode and lifecycle phase
//! - [`submission`]: Submission strategy and its target trait
//! - [`workflow`]: The [`EntryEditor`] state machine
//!
//! # Example
//!
//! ```rust,ignore
//! use bookshelf::editor::{EntryEditor, SubmitOutcome};
//!
//! let mut editor = EntryEditor::new();
//! editor.open_create();
//! editor.set_title("Dune");
//! editor.set_author("Frank Herbert");
//! editor.set_year("1965");
//! let outcome = editor.submit(&store).await;
//! assert_eq!(outcome, SubmitOutcome::Saved);
//! ```

pub mod form;
pub mod modes;
pub mod submission;
pub mod workflow;

pub use form::{parse_integral, parse_year, Draft};
pub use modes::{EditorMode, EditorPhase};
pub use submission::{Submission, SubmissionTarget};
pub use workflow::{EntryEditor, SubmitOutcome, SubmitStep, SUBMITTING_LABEL};
