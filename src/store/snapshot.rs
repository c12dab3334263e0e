//! Read-only view of the catalog store state.

use crate::domain::{Book, BookId};

/// Immutable copy of the store state handed to renderers.
///
/// Published to subscribers after every state change. `books` keeps the order
/// the service returned; renderers that want id order use [`sorted_by_id`].
///
/// [`sorted_by_id`]: CatalogSnapshot::sorted_by_id
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogSnapshot {
    /// Complete current collection as of the last successful refresh.
    pub books: Vec<Book>,

    /// `true` while at least one refresh round-trip is outstanding.
    pub loading: bool,

    /// Message of the most recent failed refresh, cleared when a refresh starts.
    pub error: Option<String>,
}

impl CatalogSnapshot {
    /// Returns the books ordered by ascending id.
    #[must_use]
    pub fn sorted_by_id(&self) -> Vec<&Book> {
        let mut books: Vec<&Book> = self.books.iter().collect();
        books.sort_by_key(|book| book.id);
        books
    }

    #[must_use]
    pub fn find(&self, id: BookId) -> Option<&Book> {
        self.books.iter().find(|book| book.id == id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::book;

    #[test]
    fn sorted_by_id_leaves_stored_order_untouched() {
        let snapshot = CatalogSnapshot {
            books: vec![book(3, "C"), book(1, "A"), book(2, "B")],
            ..CatalogSnapshot::default()
        };

        let ids: Vec<BookId> = snapshot.sorted_by_id().iter().map(|b| b.id).collect();

        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(snapshot.books[0].id, 3);
    }

    #[test]
    fn find_looks_up_by_id() {
        let snapshot = CatalogSnapshot {
            books: vec![book(1, "A"), book(2, "B")],
            ..CatalogSnapshot::default()
        };

        assert_eq!(snapshot.find(2).map(|b| b.title.as_str()), Some("B"));
        assert!(snapshot.find(9).is_none());
        assert!(!snapshot.is_empty());
    }
}
