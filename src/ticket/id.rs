// model = "claude-opus-4-5"
// created = 2026-10-16
// modified = 2026-10-16
// driver = "Isaac Clayton"

//! The ticket identifier.
//!
//! A `Ticket` is a `(issuer, seq)` pair. Issuers hand out sequence numbers
//! monotonically, so tickets are:
//! - Globally unique: one issuer never repeats a sequence number
//! - Totally ordered: by issuer, then by sequence number
//! - Plain values: two integers, cheap to copy and compare

use std::cmp::Ordering;
use std::fmt;

use serde::Deserialize;
use serde::Serialize;

/// A single allocation from one issuer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ticket {
    issuer_id: i64,
    sequence_number: i64,
}

impl Ticket {
    /// Sentinel meaning "no ticket".
    pub const NONE: Ticket = Ticket {
        issuer_id: -1,
        sequence_number: -1,
    };

    /// Create a ticket. Any issuer id is accepted.
    pub const fn new(issuer_id: i64, sequence_number: i64) -> Ticket {
        return Ticket {
            issuer_id,
            sequence_number,
        };
    }

    /// The issuer that minted this ticket.
    #[inline]
    pub const fn issuer_id(&self) -> i64 {
        return self.issuer_id;
    }

    /// The sequence number within the issuer.
    #[inline]
    pub const fn sequence_number(&self) -> i64 {
        return self.sequence_number;
    }

    /// Check if this is the sentinel.
    pub fn is_none(&self) -> bool {
        return *self == Ticket::NONE;
    }
}

impl Default for Ticket {
    fn default() -> Ticket {
        return Ticket::NONE;
    }
}

impl PartialOrd for Ticket {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        return Some(self.cmp(other));
    }
}

impl Ord for Ticket {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.issuer_id.cmp(&other.issuer_id) {
            Ordering::Equal => self.sequence_number.cmp(&other.sequence_number),
            other => other,
        }
    }
}

impl fmt::Display for Ticket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_none() {
            return write!(f, "Ticket{{NONE}}");
        }
        return write!(
            f,
            "Ticket{{issuer={}, seq={}}}",
            self.issuer_id, self.sequence_number
        );
    }
}
