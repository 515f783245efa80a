// model = "claude-opus-4-5"
// created = 2026-10-16
// modified = 2026-10-16
// driver = "Isaac Clayton"

//! Tickets, the generators that mint them, and the books that compress them.
//!
//! # Types
//!
//! - `Ticket`: one allocation, `(issuer, seq)`
//! - `TicketGenerator`: lock-free per-issuer minting
//! - `TicketBook`: an inclusive `[from, to]` run of one issuer's tickets
//! - `Tickets`: lazy iterator over part of a book

pub mod book;
pub mod generator;
pub mod id;

pub use book::TicketBook;
pub use book::Tickets;
pub use generator::TicketGenerator;
pub use id::Ticket;
