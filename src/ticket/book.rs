// model = "claude-opus-4-5"
// created = 2026-10-16
// modified = 2026-10-16
// driver = "Isaac Clayton"

//! Contiguous ranges of tickets.
//!
//! A `TicketBook` is to tickets what a span is to characters: one issuer
//! plus an inclusive `[from, to]` range of sequence numbers. Because issuers
//! allocate monotonically, a book can stand in for thousands of tickets in
//! three integers.
//!
//! # Emptiness
//!
//! A book is empty iff `from > to`. A fresh empty book is `[1, 0]`; a book
//! emptied by `issue` or `consume` ends up as `[to + 1, to]`.
//!
//! # Merging
//!
//! `add` and `combine` return `false` instead of forcing a merge that would
//! leave a gap. The caller then starts a new book.
//!
//! Complexity:
//! - contains/adjacent/intersects/add/combine/extend: O(1)
//! - issue/first/consume: O(1), the returned iterator is lazy

use std::cmp::Ordering;
use std::fmt;
use std::iter::FusedIterator;

use serde::Deserialize;
use serde::Serialize;

use super::id::Ticket;

/// An inclusive range of sequence numbers from one issuer.
///
/// Not synchronized. A book belongs to whoever is coalescing into it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TicketBook {
    issuer_id: i64,
    from: i64,
    to: i64,
}

/// How much of the front of a book a request covers.
enum Take {
    /// Book is empty or the request is for zero or fewer tickets.
    Nothing,
    /// Request is larger than the book.
    Everything,
    /// Request fits; the prefix ends at `last`.
    Prefix { last: i64 },
}

impl TicketBook {
    /// Create an empty book for an issuer.
    pub const fn empty(issuer_id: i64) -> TicketBook {
        return TicketBook {
            issuer_id,
            from: 1,
            to: 0,
        };
    }

    /// Create a book holding exactly one ticket.
    ///
    /// Same as `From<Ticket>`.
    pub const fn from_ticket(ticket: Ticket) -> TicketBook {
        return TicketBook::new(
            ticket.issuer_id(),
            ticket.sequence_number(),
            ticket.sequence_number(),
        );
    }

    /// Create a book covering `[from, to]`. Empty when `from > to`.
    pub const fn new(issuer_id: i64, from: i64, to: i64) -> TicketBook {
        return TicketBook { issuer_id, from, to };
    }

    #[inline]
    pub const fn issuer_id(&self) -> i64 {
        return self.issuer_id;
    }

    /// Inclusive lower bound.
    #[inline]
    pub const fn from(&self) -> i64 {
        return self.from;
    }

    /// Inclusive upper bound.
    #[inline]
    pub const fn to(&self) -> i64 {
        return self.to;
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        return self.from > self.to;
    }

    /// Number of tickets in the book.
    ///
    /// Saturates for the single range that spans all of `i64`.
    pub fn size(&self) -> u64 {
        if self.is_empty() {
            return 0;
        }
        return self.to.abs_diff(self.from).saturating_add(1);
    }

    /// Check if the ticket lies inside the range.
    pub fn contains_ticket(&self, ticket: &Ticket) -> bool {
        return !self.is_empty()
            && ticket.issuer_id() == self.issuer_id
            && self.from <= ticket.sequence_number()
            && ticket.sequence_number() <= self.to;
    }

    /// Check if the ticket sits immediately before `from` or after `to`.
    ///
    /// Empty books are not special-cased: `[1, 0]` is adjacent to seqs 0 and
    /// 1, which is exactly what `add` can grow it by. Book-to-book adjacency
    /// instead requires both books non-empty.
    pub fn is_adjacent(&self, ticket: &Ticket) -> bool {
        if ticket.issuer_id() != self.issuer_id {
            return false;
        }
        let seq = Some(ticket.sequence_number());
        return self.from.checked_sub(1) == seq || self.to.checked_add(1) == seq;
    }

    /// Check if two non-empty books touch end to end without overlapping.
    pub fn is_adjacent_book(&self, other: &TicketBook) -> bool {
        if !self.same_issuer_non_empty(other) {
            return false;
        }
        return other.to.checked_add(1) == Some(self.from)
            || self.to.checked_add(1) == Some(other.from);
    }

    /// Check if two non-empty books share at least one sequence number.
    pub fn intersects(&self, other: &TicketBook) -> bool {
        if !self.same_issuer_non_empty(other) {
            return false;
        }
        return other.from <= self.to && self.from <= other.to;
    }

    fn same_issuer_non_empty(&self, other: &TicketBook) -> bool {
        return self.issuer_id == other.issuer_id && !self.is_empty() && !other.is_empty();
    }

    /// Add one ticket to the book.
    ///
    /// Returns `true` if the ticket is now covered, either because it
    /// already was or because it touched an end and the range grew by one.
    /// Returns `false` and leaves the book alone otherwise.
    pub fn add(&mut self, ticket: &Ticket) -> bool {
        if self.contains_ticket(ticket) {
            return true;
        }
        if ticket.issuer_id() != self.issuer_id {
            return false;
        }

        let seq = ticket.sequence_number();
        if self.from.checked_sub(1) == Some(seq) {
            self.from = seq;
            return true;
        }
        if self.to.checked_add(1) == Some(seq) {
            self.to = seq;
            return true;
        }
        return false;
    }

    /// Absorb another book that overlaps or touches this one.
    ///
    /// Returns `false` and leaves the book alone if they are disjoint and
    /// not adjacent, belong to different issuers, or either is empty.
    pub fn combine(&mut self, other: &TicketBook) -> bool {
        if !self.intersects(other) && !self.is_adjacent_book(other) {
            return false;
        }
        self.from = self.from.min(other.from);
        self.to = self.to.max(other.to);
        return true;
    }

    /// Grow the range by one at the top and return the new ticket.
    ///
    /// Wraps at `i64::MAX` like `TicketGenerator::next`: the ticket returned
    /// has seq `i64::MIN` and the book is left inverted, so empty.
    pub fn extend(&mut self) -> Ticket {
        self.to = self.to.wrapping_add(1);
        return Ticket::new(self.issuer_id, self.to);
    }

    fn take(&self, n: i64) -> Take {
        if self.is_empty() || n <= 0 {
            return Take::Nothing;
        }
        // n > 0 here, so the cast is lossless.
        if self.size() < n as u64 {
            return Take::Everything;
        }
        // n - 1 <= to - from, so this stays in range.
        return Take::Prefix {
            last: self.from + (n - 1),
        };
    }

    /// Move `from` just past `last`, emptying the book if `last` is `i64::MAX`.
    fn advance_past(&mut self, last: i64) {
        match last.checked_add(1) {
            Some(next) => self.from = next,
            None => self.clear(),
        }
    }

    /// Mark the book empty just above its current range.
    fn clear(&mut self) {
        match self.to.checked_add(1) {
            Some(next) => self.from = next,
            None => {
                self.from = 1;
                self.to = 0;
            }
        }
    }

    /// Remove up to `n` tickets from the front and return them.
    ///
    /// - empty book or `n <= 0`: returns nothing, book unchanged
    /// - fewer than `n` tickets: returns all of them, book becomes empty
    /// - otherwise: returns `[from, from + n - 1]`, `from` advances by `n`
    pub fn issue(&mut self, n: i64) -> Tickets {
        match self.take(n) {
            Take::Nothing => return Tickets::none(self.issuer_id),
            Take::Everything => {
                let tickets = Tickets::new(self.issuer_id, self.from, self.to);
                self.clear();
                return tickets;
            }
            Take::Prefix { last } => {
                let tickets = Tickets::new(self.issuer_id, self.from, last);
                self.advance_past(last);
                return tickets;
            }
        }
    }

    /// The first `n` tickets (or all, if fewer), without removing them.
    pub fn first(&self, n: i64) -> Tickets {
        match self.take(n) {
            Take::Nothing => return Tickets::none(self.issuer_id),
            Take::Everything => return Tickets::new(self.issuer_id, self.from, self.to),
            Take::Prefix { last } => return Tickets::new(self.issuer_id, self.from, last),
        }
    }

    /// Discard up to `n` tickets from the front. Returns how many were dropped.
    pub fn consume(&mut self, n: i64) -> u64 {
        match self.take(n) {
            Take::Nothing => return 0,
            Take::Everything => {
                let dropped = self.size();
                self.clear();
                return dropped;
            }
            Take::Prefix { last } => {
                self.advance_past(last);
                return n as u64;
            }
        }
    }

    /// Every ticket in the book, lowest first.
    ///
    /// The iterator is a snapshot; later changes to the book don't affect it.
    pub fn iter(&self) -> Tickets {
        return Tickets::new(self.issuer_id, self.from, self.to);
    }
}

impl From<Ticket> for TicketBook {
    fn from(ticket: Ticket) -> TicketBook {
        return TicketBook::from_ticket(ticket);
    }
}

impl PartialOrd for TicketBook {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        return Some(self.cmp(other));
    }
}

impl Ord for TicketBook {
    fn cmp(&self, other: &Self) -> Ordering {
        // Compare by issuer, then from, then to
        match self.issuer_id.cmp(&other.issuer_id) {
            Ordering::Equal => match self.from.cmp(&other.from) {
                Ordering::Equal => self.to.cmp(&other.to),
                other => other,
            },
            other => other,
        }
    }
}

impl fmt::Display for TicketBook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return write!(
            f,
            "TicketBook{{issuer={}, from={}, to={}}}",
            self.issuer_id, self.from, self.to
        );
    }
}

impl<'a> IntoIterator for &'a TicketBook {
    type Item = Ticket;
    type IntoIter = Tickets;

    fn into_iter(self) -> Tickets {
        return self.iter();
    }
}

/// A lazy run of consecutive tickets from one issuer.
#[derive(Clone, Debug)]
pub struct Tickets {
    issuer_id: i64,
    next: i64,
    last: i64,
    done: bool,
}

impl Tickets {
    fn new(issuer_id: i64, from: i64, to: i64) -> Tickets {
        return Tickets {
            issuer_id,
            next: from,
            last: to,
            done: from > to,
        };
    }

    fn none(issuer_id: i64) -> Tickets {
        return Tickets::new(issuer_id, 1, 0);
    }
}

impl Iterator for Tickets {
    type Item = Ticket;

    fn next(&mut self) -> Option<Ticket> {
        if self.done {
            return None;
        }
        let ticket = Ticket::new(self.issuer_id, self.next);
        if self.next == self.last {
            self.done = true;
        } else {
            self.next += 1;
        }
        return Some(ticket);
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.done {
            return (0, Some(0));
        }
        let remaining = self.last.abs_diff(self.next).checked_add(1);
        match remaining.and_then(|r| usize::try_from(r).ok()) {
            Some(n) => return (n, Some(n)),
            None => return (usize::MAX, None),
        }
    }
}

impl DoubleEndedIterator for Tickets {
    fn next_back(&mut self) -> Option<Ticket> {
        if self.done {
            return None;
        }
        let ticket = Ticket::new(self.issuer_id, self.last);
        if self.next == self.last {
            self.done = true;
        } else {
            self.last -= 1;
        }
        return Some(ticket);
    }
}

impl FusedIterator for Tickets {}
