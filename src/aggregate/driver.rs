// model = "claude-opus-4-5"
// created = 2026-10-16
// modified = 2026-10-16
// driver = "Isaac Clayton"

//! An in-process stand-in for a cluster's computation driver.
//!
//! Each "node" is a slice of values. Partial passes run one per node, each
//! on its own scoped thread with its own context; the final pass runs once
//! on the calling thread over every partial result.

use std::any::Any;
use std::thread;

use super::TicketAggregator;
use super::TwoPhaseAggregator;
use crate::ticket::Ticket;
use crate::ticket::TicketBook;

/// Runs a `TwoPhaseAggregator` over per-node inputs.
#[derive(Clone, Copy, Debug)]
pub struct LocalDriver {
    parallel: bool,
}

impl Default for LocalDriver {
    fn default() -> LocalDriver {
        return LocalDriver::new();
    }
}

impl LocalDriver {
    /// A driver that gives each node its own thread.
    pub fn new() -> LocalDriver {
        return LocalDriver { parallel: true };
    }

    /// A driver that runs every partial pass on the calling thread.
    pub fn sequential() -> LocalDriver {
        return LocalDriver { parallel: false };
    }

    /// Aggregate tickets observed on each node into the cluster-wide books.
    pub fn aggregate(&self, nodes: &[Vec<Ticket>]) -> Vec<TicketBook> {
        return self.run(&TicketAggregator::new(), nodes);
    }

    /// Drive both phases of `aggregator` over `nodes`.
    pub fn run<A, V>(&self, aggregator: &A, nodes: &[Vec<V>]) -> A::Output
    where
        A: TwoPhaseAggregator + Sync,
        A::Output: Any + Send,
        V: Any + Sync,
    {
        let partials: Vec<A::Output> = if self.parallel {
            thread::scope(|scope| {
                let handles: Vec<_> = nodes
                    .iter()
                    .map(|values| scope.spawn(move || partial(aggregator, values)))
                    .collect();
                handles
                    .into_iter()
                    .map(|handle| match handle.join() {
                        Ok(output) => output,
                        Err(panic) => std::panic::resume_unwind(panic),
                    })
                    .collect()
            })
        } else {
            nodes.iter().map(|values| partial(aggregator, values)).collect()
        };

        tracing::debug!(nodes = partials.len(), "partial passes complete");

        let mut context = aggregator.init(true);
        for output in &partials {
            aggregator.process(&mut context, output, true);
        }
        return aggregator.finalize_result(context, true);
    }
}

fn partial<A, V>(aggregator: &A, values: &[V]) -> A::Output
where
    A: TwoPhaseAggregator,
    V: Any,
{
    let mut context = aggregator.init(false);
    for value in values {
        aggregator.process(&mut context, value, false);
    }
    return aggregator.finalize_result(context, false);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nodes() -> Vec<Vec<Ticket>> {
        return vec![
            (1..=5).map(|s| Ticket::new(0, s)).collect(),
            (6..=10).map(|s| Ticket::new(0, s)).collect(),
            vec![Ticket::new(1, 3), Ticket::new(0, 20)],
            vec![],
        ];
    }

    #[test]
    fn parallel_and_sequential_agree() {
        let expected = vec![
            TicketBook::new(0, 1, 10),
            TicketBook::new(0, 20, 20),
            TicketBook::new(1, 3, 3),
        ];
        assert_eq!(LocalDriver::new().aggregate(&nodes()), expected);
        assert_eq!(LocalDriver::sequential().aggregate(&nodes()), expected);
    }

    #[test]
    fn no_nodes() {
        assert!(LocalDriver::default().aggregate(&[]).is_empty());
    }
}
