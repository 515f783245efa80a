// model = "claude-opus-4-5"
// created = 2026-10-16
// modified = 2026-10-16
// driver = "Isaac Clayton"

//! Per-issuer ticket generation.
//!
//! A generator is the issuer's clock: a counter that only moves forward.
//! Unlike `LamportClock` it never merges remote time, since each issuer
//! owns its sequence outright.
//!
//! Complexity:
//! - next: O(1), one `fetch_add`, never blocks
//! - peek: O(1)

use std::sync::atomic::AtomicI64;
use std::sync::atomic::Ordering;

use super::id::Ticket;

/// Mints tickets for one fixed issuer.
///
/// `next` takes `&self`, so a generator can be shared through an `Arc`
/// by any number of threads.
#[derive(Debug)]
pub struct TicketGenerator {
    issuer_id: i64,
    next_sequence_number: AtomicI64,
}

impl TicketGenerator {
    /// Create a generator whose first ticket has sequence number 1.
    pub const fn new(issuer_id: i64) -> TicketGenerator {
        return TicketGenerator::starting_at(issuer_id, 1);
    }

    /// Create a generator whose first ticket has the given sequence number.
    pub const fn starting_at(issuer_id: i64, sequence_number: i64) -> TicketGenerator {
        return TicketGenerator {
            issuer_id,
            next_sequence_number: AtomicI64::new(sequence_number),
        };
    }

    /// The issuer this generator mints for.
    #[inline]
    pub const fn issuer_id(&self) -> i64 {
        return self.issuer_id;
    }

    /// Mint the next ticket.
    ///
    /// Wraps at `i64::MAX`.
    #[inline]
    pub fn next(&self) -> Ticket {
        // Uniqueness only needs the RMW to be atomic; no other memory is published.
        let seq = self.next_sequence_number.fetch_add(1, Ordering::Relaxed);
        return Ticket::new(self.issuer_id, seq);
    }

    /// The sequence number the next call to `next` will use.
    pub fn peek(&self) -> i64 {
        return self.next_sequence_number.load(Ordering::Relaxed);
    }
}
