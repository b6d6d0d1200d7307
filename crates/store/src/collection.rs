// crates/store/src/collection.rs
//! Ordered, id-unique book sequence

use readlog_core::{Book, BookId, DuplicateKey, Timestamp};
use std::collections::HashSet;

/// Books in insertion/load order, at most one per id
#[derive(Debug, Default)]
pub(crate) struct Collection {
    books: Vec<Book>,
    last_local_id: i64,
}

impl Collection {
    /// Replaces the contents, dropping repeated ids
    ///
    /// Returns how many records were dropped.
    pub fn replace(&mut self, books: Vec<Book>) -> usize {
        let mut seen = HashSet::new();
        let total = books.len();
        self.books = books
            .into_iter()
            .filter(|b| {
                let fresh = seen.insert(b.id.clone());
                if !fresh {
                    log::warn!("Dropping repeated record id {}", b.id);
                }
                fresh
            })
            .collect();
        total - self.books.len()
    }

    /// Appends `book`, or overwrites the record already holding its id
    pub fn upsert(&mut self, book: Book) {
        match self.position(&book.id) {
            Some(i) => self.books[i] = book,
            None => self.books.push(book),
        }
    }

    pub fn get(&self, id: &BookId) -> Option<&Book> {
        self.books.iter().find(|b| &b.id == id)
    }

    pub fn get_mut(&mut self, id: &BookId) -> Option<&mut Book> {
        self.books.iter_mut().find(|b| &b.id == id)
    }

    pub fn remove(&mut self, id: &BookId) -> Option<Book> {
        self.position(id).map(|i| self.books.remove(i))
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    /// True if a record other than `except` has this key
    pub fn has_duplicate(&self, key: &DuplicateKey, except: Option<&BookId>) -> bool {
        key.matches_any(self.books.iter().filter(|b| Some(&b.id) != except))
    }

    /// Millisecond-timestamp id, bumped past anything handed out or stored
    pub fn next_local_id(&mut self) -> BookId {
        let mut candidate = Timestamp::now().as_millis().max(self.last_local_id + 1);
        while self.get(&BookId::new(candidate.to_string())).is_some() {
            candidate += 1;
        }
        self.last_local_id = candidate;
        BookId::new(candidate.to_string())
    }

    fn position(&self, id: &BookId) -> Option<usize> {
        self.books.iter().position(|b| &b.id == id)
    }
}
