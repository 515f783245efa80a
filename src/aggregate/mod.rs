// model = "claude-opus-4-5"
// created = 2026-10-16
// modified = 2026-10-16
// driver = "Isaac Clayton"

//! Two-phase aggregation of tickets into books.
//!
//! # Phases
//!
//! 1. Partial (`is_final = false`): runs once per node, concurrently, each
//!    with its own context. Takes raw `Ticket`s, returns that node's books.
//! 2. Final (`is_final = true`): runs once on a coordinator. Takes each
//!    node's books, returns the minimal sorted list for the whole cluster.
//!
//! The result depends only on the set of tickets seen, not on how they were
//! split across nodes or in what order they arrived.
//!
//! # Contexts
//!
//! All accumulation lives in an `Accumulator` returned by `init`. The
//! aggregator itself is stateless, so one value can serve any number of
//! runs at once.
//!
//! # Payloads
//!
//! Drivers hand over values as `&dyn Any`. Anything the current phase can't
//! use is skipped rather than rejected.

use std::any::Any;
use std::collections::BTreeSet;

use crate::ticket::Ticket;
use crate::ticket::TicketBook;

pub mod driver;
pub mod final_pass;
pub mod partial;

pub use driver::LocalDriver;
pub use final_pass::FinalPass;
pub use partial::PartialPass;

/// An aggregation a distributed driver can run in two phases.
pub trait TwoPhaseAggregator {
    /// Per-run accumulation state.
    type Context;
    /// What `finalize_result` produces in either phase.
    type Output;

    /// Create fresh state for one phase of one run.
    fn init(&self, is_final: bool) -> Self::Context;

    /// Fold one value into the state.
    fn process(&self, context: &mut Self::Context, value: &dyn Any, is_final: bool);

    /// Consume the state and produce the phase result.
    fn finalize_result(&self, context: Self::Context, is_final: bool) -> Self::Output;
}

/// State for one phase of one aggregation run.
#[derive(Clone, Debug)]
pub enum Accumulator {
    Partial(PartialPass),
    Final(FinalPass),
}

impl Accumulator {
    /// Check if this is final-phase state.
    pub fn is_final(&self) -> bool {
        return matches!(self, Accumulator::Final(_));
    }
}

/// Coalesces tickets seen across a cluster into `TicketBook`s.
#[derive(Clone, Copy, Debug, Default)]
pub struct TicketAggregator;

impl TicketAggregator {
    pub fn new() -> TicketAggregator {
        return TicketAggregator;
    }
}

impl TwoPhaseAggregator for TicketAggregator {
    type Context = Accumulator;
    type Output = Vec<TicketBook>;

    fn init(&self, is_final: bool) -> Accumulator {
        if is_final {
            return Accumulator::Final(FinalPass::new());
        }
        return Accumulator::Partial(PartialPass::new());
    }

    fn process(&self, context: &mut Accumulator, value: &dyn Any, is_final: bool) {
        match (context, is_final) {
            (Accumulator::Partial(pass), false) => match value.downcast_ref::<Ticket>() {
                Some(ticket) => pass.add(*ticket),
                None => tracing::trace!("partial pass skipping non-ticket payload"),
            },
            (Accumulator::Final(pass), true) => {
                if let Some(books) = value.downcast_ref::<Vec<TicketBook>>() {
                    pass.add_books(books.iter().copied());
                } else if let Some(books) = value.downcast_ref::<BTreeSet<TicketBook>>() {
                    pass.add_books(books.iter().copied());
                } else if let Some(book) = value.downcast_ref::<TicketBook>() {
                    pass.add_book(*book);
                } else {
                    tracing::trace!("final pass skipping non-book payload");
                }
            }
            (context, _) => {
                tracing::warn!(
                    context_final = context.is_final(),
                    is_final,
                    "skipping value for mismatched phase"
                );
            }
        }
    }

    fn finalize_result(&self, context: Accumulator, is_final: bool) -> Vec<TicketBook> {
        if context.is_final() != is_final {
            tracing::warn!(
                context_final = context.is_final(),
                is_final,
                "finalizing with mismatched phase, using context phase"
            );
        }
        match context {
            Accumulator::Partial(pass) => return pass.finish(),
            Accumulator::Final(pass) => return pass.finish(),
        }
    }
}
