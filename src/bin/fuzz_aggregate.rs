//! AFL fuzz harness for ticket aggregation
//!
//! This harness checks:
//! 1. Coverage: every observed ticket lies in exactly one output book
//! 2. Minimality: no two output books overlap or touch
//! 3. Split independence: one node or many, the final answer is the same
//! 4. Decoding: arbitrary bytes never panic the book-list decoder
//!
//! Model: each input chunk is one observed ticket plus the node that saw it.

use afl::fuzz;
use ticketbook::aggregate::LocalDriver;
use ticketbook::codec::decode_books;
use ticketbook::ticket::{Ticket, TicketBook};

const NUM_NODES: usize = 4;
const NUM_ISSUERS: u8 = 3;

/// One observation the fuzzer can generate
#[derive(Debug, Clone, Copy)]
struct Observation {
    node: usize,
    ticket: Ticket,
}

impl Observation {
    fn from_bytes(bytes: &[u8]) -> Option<(Observation, &[u8])> {
        if bytes.len() < 3 {
            return None;
        }
        let observation = Observation {
            node: bytes[0] as usize % NUM_NODES,
            ticket: Ticket::new((bytes[1] % NUM_ISSUERS) as i64, bytes[2] as i64),
        };
        return Some((observation, &bytes[3..]));
    }
}

fn main() {
    fuzz!(|data: &[u8]| {
        let _ = decode_books(data);

        let mut nodes: Vec<Vec<Ticket>> = vec![Vec::new(); NUM_NODES];
        let mut all = Vec::new();
        let mut remaining = data;
        while let Some((observation, rest)) = Observation::from_bytes(remaining) {
            nodes[observation.node].push(observation.ticket);
            all.push(observation.ticket);
            remaining = rest;
        }

        let books = LocalDriver::sequential().aggregate(&nodes);
        let single = LocalDriver::sequential().aggregate(&[all.clone()]);
        assert_eq!(books, single, "split changed the result");

        for ticket in &all {
            let covering = books.iter().filter(|b| b.contains_ticket(ticket)).count();
            assert_eq!(covering, 1, "{} covered {} times", ticket, covering);
        }
        for pair in books.windows(2) {
            let (a, b): (&TicketBook, &TicketBook) = (&pair[0], &pair[1]);
            assert!(a < b, "unsorted: {} then {}", a, b);
            assert!(!a.intersects(b) && !a.is_adjacent_book(b), "mergeable: {} and {}", a, b);
        }
    });
}
