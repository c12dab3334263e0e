//! Catalog store: the single source of truth for the visible collection.
//!
//! [`CatalogStore`] owns the collection, the loading flag, and the last refresh
//! error. Views never edit the collection; every mutation goes to the service
//! and is followed by a full refresh, so after a successful mutation the store
//! matches server state and after a failed one it keeps its last-known-good
//! collection.
//!
//! # Overlapping refreshes
//!
//! Operations take `&self`, so a view may start a refresh while another is in
//! flight. Each refresh takes a generation ticket when it starts and applies its
//! result only if no newer refresh has started since; the collection therefore
//! reflects the most recently *started* refresh rather than whichever response
//! arrived last. `loading` stays `true` until every outstanding refresh has
//! resolved.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::watch;

use super::snapshot::CatalogSnapshot;
use crate::domain::{Book, BookId, BookInput, Result};
use crate::editor::{Submission, SubmissionTarget};
use crate::transport::BookApi;

/// Shared catalog state backed by a [`BookApi`].
///
/// Construct it explicitly with [`CatalogStore::new`] (empty, not loading) or
/// [`CatalogStore::open`] (seeded by an initial refresh), and wrap it in an
/// `Arc` to share it between views. State is published through a
/// [`watch`] channel; see [`subscribe`](Self::subscribe).
pub struct CatalogStore<A> {
    api: A,
    state: watch::Sender<CatalogSnapshot>,
    /// Ticket of the most recently started refresh.
    latest_ticket: AtomicU64,
    /// Number of refreshes currently awaiting the service.
    in_flight: AtomicUsize,
}

impl<A: BookApi> CatalogStore<A> {
    /// Creates an empty store. No request is made.
    pub fn new(api: A) -> Self {
        let (state, _) = watch::channel(CatalogSnapshot::default());
        Self {
            api,
            state,
            latest_ticket: AtomicU64::new(0),
            in_flight: AtomicUsize::new(0),
        }
    }

    /// Creates a store and seeds it with an initial refresh.
    ///
    /// A failed initial refresh is recorded in the store's `error` like any
    /// other refresh failure; the store is returned either way.
    pub async fn open(api: A) -> Self {
        let store = Self::new(api);
        store.refresh().await;
        store
    }

    /// The service this store talks to.
    pub const fn api(&self) -> &A {
        &self.api
    }

    /// Returns a copy of the current state.
    pub fn snapshot(&self) -> CatalogSnapshot {
        self.state.borrow().clone()
    }

    /// Returns a receiver notified after every state change.
    pub fn subscribe(&self) -> watch::Receiver<CatalogSnapshot> {
        self.state.subscribe()
    }

    /// Re-fetches the whole collection.
    ///
    /// Sets `loading` and clears `error` before the request. On success the
    /// collection is replaced wholesale; on failure `error` holds the failure
    /// message and the collection is left alone. Results of a refresh that was
    /// overtaken by a newer one are discarded.
    pub async fn refresh(&self) {
        let ticket = self.latest_ticket.fetch_add(1, Ordering::SeqCst) + 1;
        let in_flight = InFlight::enter(&self.in_flight, &self.state);
        tracing::debug!(ticket, "refresh started");

        self.state.send_modify(|state| {
            state.loading = true;
            state.error = None;
        });

        let outcome = self.api.list().await;

        let remaining = in_flight.finish();
        let is_latest = self.latest_ticket.load(Ordering::SeqCst) == ticket;

        self.state.send_modify(|state| {
            if is_latest {
                match outcome {
                    Ok(books) => {
                        tracing::debug!(ticket, count = books.len(), "refresh applied");
                        state.books = books;
                    }
                    Err(err) => {
                        tracing::warn!(ticket, error = %err, "refresh failed");
                        state.error = Some(err.to_string());
                    }
                }
            } else {
                tracing::debug!(ticket, "discarding result of superseded refresh");
            }
            state.loading = remaining > 0;
        });
    }

    /// Creates a book, then refreshes.
    ///
    /// Returns the created book as the service reported it; the collection only
    /// changes through the follow-up refresh.
    ///
    /// # Errors
    ///
    /// Returns the create failure unchanged. The store state is not touched and
    /// no refresh happens.
    pub async fn add_book(&self, input: &BookInput) -> Result<Book> {
        let created = self.api.create(input).await.map_err(|err| {
            tracing::debug!(error = %err, "create failed");
            err
        })?;
        tracing::debug!(id = created.id, "book created");
        self.refresh().await;
        Ok(created)
    }

    /// Updates a book, then refreshes.
    ///
    /// # Errors
    ///
    /// Returns the update failure unchanged. The store state is not touched and
    /// no refresh happens.
    pub async fn edit_book(&self, id: BookId, input: &BookInput) -> Result<Book> {
        let updated = self.api.update(id, input).await.map_err(|err| {
            tracing::debug!(id, error = %err, "update failed");
            err
        })?;
        tracing::debug!(id, "book updated");
        self.refresh().await;
        Ok(updated)
    }

    /// Deletes a book, then refreshes.
    ///
    /// # Errors
    ///
    /// Returns the delete failure unchanged. The store state is not touched and
    /// no refresh happens.
    pub async fn remove_book(&self, id: BookId) -> Result<()> {
        self.api.delete(id).await.map_err(|err| {
            tracing::debug!(id, error = %err, "delete failed");
            err
        })?;
        tracing::debug!(id, "book deleted");
        self.refresh().await;
        Ok(())
    }

    /// Resolves an entry editor submission to [`add_book`](Self::add_book) or
    /// [`edit_book`](Self::edit_book).
    ///
    /// # Errors
    ///
    /// Returns the failure of the underlying create or update.
    pub async fn apply(&self, submission: Submission) -> Result<Book> {
        match submission {
            Submission::Create(input) => self.add_book(&input).await,
            Submission::Update { id, input } => self.edit_book(id, &input).await,
        }
    }
}

/// Counts one outstanding refresh for as long as it lives.
///
/// A refresh future dropped before its response arrives (timeout, `select!`)
/// still releases its slot, and clears `loading` if it was the last one.
struct InFlight<'a> {
    count: &'a AtomicUsize,
    state: &'a watch::Sender<CatalogSnapshot>,
    finished: bool,
}

impl<'a> InFlight<'a> {
    fn enter(count: &'a AtomicUsize, state: &'a watch::Sender<CatalogSnapshot>) -> Self {
        count.fetch_add(1, Ordering::SeqCst);
        Self {
            count,
            state,
            finished: false,
        }
    }

    /// Releases the slot and returns how many refreshes are still outstanding.
    fn finish(mut self) -> usize {
        self.finished = true;
        self.release()
    }

    fn release(&self) -> usize {
        self.count.fetch_sub(1, Ordering::SeqCst).saturating_sub(1)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        let remaining = self.release();
        tracing::debug!(remaining, "refresh abandoned");
        if remaining == 0 {
            self.state.send_if_modified(|state| std::mem::replace(&mut state.loading, false));
        }
    }
}

#[async_trait]
impl<A: BookApi> SubmissionTarget for CatalogStore<A> {
    async fn submit(&self, submission: Submission) -> Result<()> {
        self.apply(submission).await.map(|_| ())
    }
}
