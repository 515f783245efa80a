// model = "claude-opus-4-5"
// created = 2026-10-16
// modified = 2026-10-16
// driver = "Isaac Clayton"

//! Ticketbook - ordered, collision-free identifiers from many issuers.
//!
//! Each issuer mints `Ticket`s from its own `TicketGenerator`. Tickets seen
//! anywhere in a cluster are folded into `TicketBook`s, inclusive ranges
//! that stay small because issuers allocate contiguously. Aggregation runs
//! in two phases: a partial pass per node, then one final pass that merges
//! every node's books into the fewest possible ranges.
//!
//! # Quick Start
//!
//! ```
//! use ticketbook::aggregate::LocalDriver;
//! use ticketbook::ticket::{TicketBook, TicketGenerator};
//!
//! let generator = TicketGenerator::new(3);
//! let tickets: Vec<_> = (0..10).map(|_| generator.next()).collect();
//!
//! // Two nodes each saw half of the tickets.
//! let nodes = vec![tickets[..5].to_vec(), tickets[5..].to_vec()];
//! let books = LocalDriver::new().aggregate(&nodes);
//!
//! assert_eq!(books, vec![TicketBook::new(3, 1, 10)]);
//! ```
//!
//! # Modules
//!
//! - `ticket`: `Ticket`, `TicketGenerator`, `TicketBook`
//! - `aggregate`: the two-phase `TicketAggregator` and a local driver
//! - `codec`: fixed-width binary encoding

pub mod aggregate;
pub mod codec;
pub mod ticket;
