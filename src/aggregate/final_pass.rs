// model = "claude-opus-4-5"
// created = 2026-10-16
// modified = 2026-10-16
// driver = "Isaac Clayton"

//! The coordinator half of aggregation.
//!
//! Books from every node go into one sorted set. Sorting by `(issuer, from)`
//! means any book that can merge with an earlier one can merge with the
//! most recent run, so a single linear walk produces the minimal result.

use std::collections::BTreeSet;

use crate::ticket::TicketBook;

/// Accumulated state for the final pass.
#[derive(Clone, Debug, Default)]
pub struct FinalPass {
    books: BTreeSet<TicketBook>,
}

impl FinalPass {
    /// Create an empty pass.
    pub fn new() -> FinalPass {
        return FinalPass {
            books: BTreeSet::new(),
        };
    }

    /// Record one book. Empty books carry no tickets and are dropped.
    pub fn add_book(&mut self, book: TicketBook) {
        if book.is_empty() {
            return;
        }
        self.books.insert(book);
    }

    /// Record one node's partial result.
    pub fn add_books<I: IntoIterator<Item = TicketBook>>(&mut self, books: I) {
        for book in books {
            self.add_book(book);
        }
    }

    /// Number of distinct books received so far.
    pub fn book_count(&self) -> usize {
        return self.books.len();
    }

    /// Coalesce into the minimal sorted list of books.
    pub fn finish(self) -> Vec<TicketBook> {
        let received = self.books.len();
        let mut result = Vec::new();
        let mut current: Option<TicketBook> = None;

        for book in self.books {
            let merged = match current.as_mut() {
                Some(run) => run.combine(&book),
                None => false,
            };
            if merged {
                continue;
            }
            if let Some(done) = current.replace(book) {
                result.push(done);
            }
        }
        result.extend(current);

        tracing::debug!(received, books = result.len(), "final pass finished");
        return result;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merges_adjacent_and_overlapping() {
        let mut pass = FinalPass::new();
        pass.add_books(vec![TicketBook::new(0, 1, 3), TicketBook::new(0, 8, 9)]);
        pass.add_books(vec![TicketBook::new(0, 4, 5), TicketBook::new(0, 2, 6)]);

        assert_eq!(
            pass.finish(),
            vec![TicketBook::new(0, 1, 6), TicketBook::new(0, 8, 9)]
        );
    }

    #[test]
    fn issuers_never_merge() {
        let mut pass = FinalPass::new();
        pass.add_books([TicketBook::new(0, 1, 3), TicketBook::new(1, 4, 6)]);
        assert_eq!(pass.finish().len(), 2);
    }

    #[test]
    fn contained_books_disappear() {
        let mut pass = FinalPass::new();
        pass.add_books([
            TicketBook::new(3, 1, 100),
            TicketBook::new(3, 10, 20),
            TicketBook::new(3, 1, 1),
        ]);
        assert_eq!(pass.finish(), vec![TicketBook::new(3, 1, 100)]);
    }

    #[test]
    fn empty_books_dropped() {
        let mut pass = FinalPass::new();
        pass.add_book(TicketBook::empty(0));
        pass.add_book(TicketBook::new(0, 6, 5));
        assert_eq!(pass.book_count(), 0);
        assert!(pass.finish().is_empty());
    }
}
