//! In-memory book service used by unit tests.
//!
//! [`FakeBookApi`] behaves like a correct CRUD service over a `Vec<Book>`,
//! records every call, and lets a test inject failures or hold `list` responses
//! until the test releases them.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::sync::oneshot;

use crate::domain::{Book, BookId, BookInput, CatalogError, Result};
use crate::transport::BookApi;

/// Builds a book with a derived author and year.
pub fn book(id: BookId, title: &str) -> Book {
    Book {
        id,
        title: title.to_string(),
        author: format!("{title} Author"),
        year: 2000,
    }
}

/// Service operation, used to target injected failures and count calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    List,
    Get,
    Create,
    Update,
    Delete,
}

/// Recorded call with its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    List,
    Get(BookId),
    Create(BookInput),
    Update(BookId, BookInput),
    Delete(BookId),
}

impl Call {
    const fn op(&self) -> Op {
        match self {
            Self::List => Op::List,
            Self::Get(_) => Op::Get,
            Self::Create(_) => Op::Create,
            Self::Update(..) => Op::Update,
            Self::Delete(_) => Op::Delete,
        }
    }
}

type HeldList = oneshot::Receiver<Result<Vec<Book>>>;

#[derive(Default)]
pub struct FakeBookApi {
    books: Mutex<Vec<Book>>,
    calls: Mutex<Vec<Call>>,
    failures: Mutex<HashMap<Op, VecDeque<CatalogError>>>,
    held_lists: Mutex<VecDeque<HeldList>>,
}

impl FakeBookApi {
    pub fn with_books(books: Vec<Book>) -> Self {
        Self {
            books: Mutex::new(books),
            ..Self::default()
        }
    }

    pub fn server_books(&self) -> Vec<Book> {
        self.books.lock().unwrap().clone()
    }

    /// Makes the next call of `op` fail with `error`.
    pub fn fail_next(&self, op: Op, error: CatalogError) {
        self.failures
            .lock()
            .unwrap()
            .entry(op)
            .or_default()
            .push_back(error);
    }

    /// Holds the next `count` list calls until their sender is used.
    ///
    /// Senders are returned in call order.
    pub fn hold_lists(&self, count: usize) -> Vec<oneshot::Sender<Result<Vec<Book>>>> {
        let mut held = self.held_lists.lock().unwrap();
        (0..count)
            .map(|_| {
                let (tx, rx) = oneshot::channel();
                held.push_back(rx);
                tx
            })
            .collect()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, op: Op) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|call| call.op() == op)
            .count()
    }

    fn record(&self, call: Call) -> Result<()> {
        let op = call.op();
        self.calls.lock().unwrap().push(call);
        match self
            .failures
            .lock()
            .unwrap()
            .get_mut(&op)
            .and_then(VecDeque::pop_front)
        {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

fn not_found() -> CatalogError {
    CatalogError::transport(Some(404), "404 Not Found: book not found")
}

#[async_trait]
impl BookApi for FakeBookApi {
    async fn list(&self) -> Result<Vec<Book>> {
        self.record(Call::List)?;
        let held = self.held_lists.lock().unwrap().pop_front();
        match held {
            Some(rx) => rx
                .await
                .unwrap_or_else(|_| Err(CatalogError::transport(None, "held list dropped"))),
            None => Ok(self.server_books()),
        }
    }

    async fn get(&self, id: BookId) -> Result<Book> {
        self.record(Call::Get(id))?;
        self.server_books()
            .into_iter()
            .find(|b| b.id == id)
            .ok_or_else(not_found)
    }

    async fn create(&self, input: &BookInput) -> Result<Book> {
        self.record(Call::Create(input.clone()))?;
        let mut books = self.books.lock().unwrap();
        let id = books.iter().map(|b| b.id).max().unwrap_or(0) + 1;
        let created = Book {
            id,
            title: input.title.clone(),
            author: input.author.clone(),
            year: input.year,
        };
        books.push(created.clone());
        Ok(created)
    }

    async fn update(&self, id: BookId, input: &BookInput) -> Result<Book> {
        self.record(Call::Update(id, input.clone()))?;
        let mut books = self.books.lock().unwrap();
        let stored = books.iter_mut().find(|b| b.id == id).ok_or_else(not_found)?;
        stored.title.clone_from(&input.title);
        stored.author.clone_from(&input.author);
        stored.year = input.year;
        Ok(stored.clone())
    }

    async fn delete(&self, id: BookId) -> Result<()> {
        self.record(Call::Delete(id))?;
        let mut books = self.books.lock().unwrap();
        let before = books.len();
        books.retain(|b| b.id != id);
        if books.len() == before {
            return Err(not_found());
        }
        Ok(())
    }
}
