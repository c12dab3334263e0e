//! Entry editor mode and lifecycle types.
//!
//! These enums describe what the editor is editing and where it is in its
//! lifecycle. They drive which operations are accepted and what a renderer
//! shows (heading, submit label, disabled controls).
//!
//! # State Machine
//!
//! ```text
//! Closed ──open──▶ Clean ──edit──▶ Editing ──submit──▶ Submitting ──ok──▶ Closed
//!                    │                ▲  │                  │
//!                    │                │  └──invalid──▶ Failed ◀──err──┘
//!                    └──submit────────┼──────────────────▶  │
//!                                     └────────edit─────────┘
//! ```

use crate::domain::Book;

/// What the editor is working on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorMode {
    /// Composing a new book; fields start empty.
    Create,

    /// Modifying an existing book; fields start from its values.
    Edit(Book),
}

impl EditorMode {
    /// Dialog heading for this mode.
    #[must_use]
    pub const fn heading(&self) -> &'static str {
        match self {
            Self::Create => "Add book",
            Self::Edit(_) => "Edit book",
        }
    }

    /// Submit button label while idle.
    #[must_use]
    pub const fn submit_label(&self) -> &'static str {
        match self {
            Self::Create => "Create",
            Self::Edit(_) => "Save",
        }
    }
}

/// Where the editor is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorPhase {
    /// Not shown. Holds no transient state.
    Closed,

    /// Open with freshly seeded fields.
    Clean,

    /// Open and at least one field changed since opening or the last failure.
    Editing,

    /// Validation passed and a submission is in flight. Edits, submits, and
    /// close requests are ignored.
    Submitting,

    /// Open after a rejected or failed submission; the error is shown and the
    /// fields are kept for correction.
    Failed,
}

impl EditorPhase {
    #[must_use]
    pub const fn is_open(self) -> bool {
        !matches!(self, Self::Closed)
    }

    /// Whether field edits and submits are accepted.
    #[must_use]
    pub const fn accepts_input(self) -> bool {
        matches!(self, Self::Clean | Self::Editing | Self::Failed)
    }
}
