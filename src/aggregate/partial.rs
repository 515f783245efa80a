// model = "claude-opus-4-5"
// created = 2026-10-16
// modified = 2026-10-16
// driver = "Isaac Clayton"

//! The per-node half of aggregation.
//!
//! Tickets are bucketed by issuer into sorted sets. `finish` walks each set
//! in order and greedily grows a book until a gap forces a new one.

use std::collections::BTreeSet;

use rustc_hash::FxHashMap;

use crate::ticket::Ticket;
use crate::ticket::TicketBook;

/// Accumulated state for one partial pass.
#[derive(Clone, Debug, Default)]
pub struct PartialPass {
    by_issuer: FxHashMap<i64, BTreeSet<Ticket>>,
}

impl PartialPass {
    /// Create an empty pass.
    pub fn new() -> PartialPass {
        return PartialPass {
            by_issuer: FxHashMap::default(),
        };
    }

    /// Record one ticket. Duplicates and the `NONE` sentinel are absorbed.
    pub fn add(&mut self, ticket: Ticket) {
        if ticket.is_none() {
            tracing::trace!("skipping NONE ticket");
            return;
        }
        self.by_issuer
            .entry(ticket.issuer_id())
            .or_default()
            .insert(ticket);
    }

    /// Number of distinct issuers seen.
    pub fn issuer_count(&self) -> usize {
        return self.by_issuer.len();
    }

    /// Number of distinct tickets seen.
    pub fn ticket_count(&self) -> usize {
        return self.by_issuer.values().map(BTreeSet::len).sum();
    }

    /// Coalesce into books, sorted by issuer then range.
    pub fn finish(self) -> Vec<TicketBook> {
        let tickets = self.ticket_count();
        let mut issuers: Vec<(i64, BTreeSet<Ticket>)> = self.by_issuer.into_iter().collect();
        issuers.sort_unstable_by_key(|(issuer, _)| *issuer);

        let mut books = Vec::new();
        for (_, sorted) in issuers {
            let mut current: Option<TicketBook> = None;
            for ticket in sorted {
                let merged = match current.as_mut() {
                    Some(book) => book.add(&ticket),
                    None => false,
                };
                if merged {
                    continue;
                }
                if let Some(done) = current.replace(TicketBook::from_ticket(ticket)) {
                    books.push(done);
                }
            }
            books.extend(current);
        }

        tracing::debug!(tickets, books = books.len(), "partial pass finished");
        return books;
    }
}

impl Extend<Ticket> for PartialPass {
    fn extend<I: IntoIterator<Item = Ticket>>(&mut self, iter: I) {
        for ticket in iter {
            self.add(ticket);
        }
    }
}
