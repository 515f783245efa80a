// model = "claude-opus-4-5"
// created = 2026-10-16
// modified = 2026-10-16
// driver = "Isaac Clayton"

//! Tests for the public ticket API: generation, books, and the full
//! generate-observe-aggregate-ship cycle.

use std::collections::BTreeSet;
use std::sync::Arc;

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use ticketbook::aggregate::{LocalDriver, TicketAggregator, TwoPhaseAggregator};
use ticketbook::codec::{decode_books, encode_books, Wire};
use ticketbook::ticket::{Ticket, TicketBook, TicketGenerator};

// =============================================================================
// Helper functions
// =============================================================================

fn run(issuer: i64, seqs: impl IntoIterator<Item = i64>) -> Vec<Ticket> {
    return seqs.into_iter().map(|s| Ticket::new(issuer, s)).collect();
}

// =============================================================================
// Generator tests
// =============================================================================

#[test]
fn generator_single_thread_has_no_gaps() {
    let generator = TicketGenerator::new(11);
    let seqs: Vec<i64> = (0..500).map(|_| generator.next().sequence_number()).collect();
    assert_eq!(seqs, (1..=500).collect::<Vec<_>>());
}

#[test]
fn generator_many_threads_has_no_duplicates_or_gaps() {
    let generator = Arc::new(TicketGenerator::new(2));
    let threads = 8;
    let per_thread = 2_000;

    let handles: Vec<_> = (0..threads)
        .map(|_| {
            let generator = Arc::clone(&generator);
            std::thread::spawn(move || {
                (0..per_thread).map(|_| generator.next()).collect::<Vec<_>>()
            })
        })
        .collect();

    let mut seen = BTreeSet::new();
    for handle in handles {
        for ticket in handle.join().unwrap() {
            assert_eq!(ticket.issuer_id(), 2);
            assert!(seen.insert(ticket.sequence_number()), "duplicate {}", ticket);
        }
    }

    let total = (threads * per_thread) as i64;
    assert_eq!(seen.len() as i64, total);
    assert_eq!(seen.first(), Some(&1));
    assert_eq!(seen.last(), Some(&total));
}

#[test]
fn generated_tickets_fill_one_book() {
    let generator = TicketGenerator::new(5);
    let mut book = TicketBook::from_ticket(generator.next());
    for _ in 0..99 {
        assert!(book.add(&generator.next()));
    }
    assert_eq!(book, TicketBook::new(5, 1, 100));
}

// =============================================================================
// Book tests
// =============================================================================

#[test]
fn book_built_from_tickets() {
    let mut book = TicketBook::from_ticket(Ticket::new(7, 1));
    assert!(book.add(&Ticket::new(7, 2)));
    assert!(book.add(&Ticket::new(7, 3)));

    assert_eq!((book.issuer_id(), book.from(), book.to()), (7, 1, 3));
    assert_eq!(book.size(), 3);
    assert!(book.contains_ticket(&Ticket::new(7, 2)));
    assert!(!book.contains_ticket(&Ticket::new(7, 4)));
}

#[test]
fn book_adjacent_tickets() {
    let book = TicketBook::new(0, 5, 5);
    assert!(book.is_adjacent(&Ticket::new(0, 4)));
    assert!(book.is_adjacent(&Ticket::new(0, 6)));
    assert!(!book.is_adjacent(&Ticket::new(0, 3)));
}

#[test]
fn book_adjacent_books_combine() {
    let mut a = TicketBook::new(0, 1, 3);
    let b = TicketBook::new(0, 4, 6);
    assert!(!a.intersects(&b));
    assert!(a.is_adjacent_book(&b));
    assert!(a.combine(&b));
    assert_eq!(a, TicketBook::new(0, 1, 6));
}

#[test]
fn book_issue_partitions() {
    for size in 0..6i64 {
        for n in -2..8i64 {
            let original = if size == 0 {
                TicketBook::empty(1)
            } else {
                TicketBook::new(1, 10, 10 + size - 1)
            };
            let mut book = original;
            let issued: Vec<Ticket> = book.issue(n).collect();

            if n <= 0 || size == 0 {
                assert!(issued.is_empty());
                assert_eq!(book, original);
            } else if size < n {
                assert_eq!(issued.len() as i64, size);
                assert!(book.is_empty());
            } else {
                assert_eq!(issued.len() as i64, n);
                assert_eq!(book.size() as i64, size - n);
                assert_eq!(book.from(), original.from() + n);
            }
            // Issued tickets are the front of the original, in order
            let front: Vec<Ticket> = original.iter().take(issued.len()).collect();
            assert_eq!(issued, front);
        }
    }
}

#[test]
fn issue_then_first_then_consume() {
    let mut book = TicketBook::new(4, 1, 20);
    let batch: Vec<_> = book.issue(5).collect();
    assert_eq!(batch.last(), Some(&Ticket::new(4, 5)));

    let peeked: Vec<_> = book.first(3).collect();
    assert_eq!(peeked, run(4, 6..=8));
    assert_eq!(book.consume(3), 3);
    assert_eq!(book.first(1).next(), Some(Ticket::new(4, 9)));
}

// =============================================================================
// End-to-end
// =============================================================================

#[test]
fn gap_produces_two_books() {
    let mut tickets = run(3, 1..=10);
    tickets.extend(run(3, 15..=18));
    let expected = vec![TicketBook::new(3, 1, 10), TicketBook::new(3, 15, 18)];

    let mut rng = StdRng::seed_from_u64(0x71c4e7);
    for _ in 0..20 {
        tickets.shuffle(&mut rng);
        let (left, right) = tickets.split_at(6);
        let nodes = vec![left.to_vec(), right.to_vec()];
        assert_eq!(LocalDriver::new().aggregate(&nodes), expected);
    }
}

#[test]
fn partial_results_survive_the_wire() {
    let aggregator = TicketAggregator::new();
    let generators: Vec<TicketGenerator> = (0..3).map(TicketGenerator::new).collect();

    // Each node observes every third ticket from every issuer.
    let mut nodes: Vec<Vec<Ticket>> = vec![Vec::new(); 3];
    for round in 0..30 {
        for generator in &generators {
            nodes[round % 3].push(generator.next());
        }
    }

    let wire: Vec<Vec<u8>> = nodes
        .iter()
        .map(|values| {
            let mut context = aggregator.init(false);
            for ticket in values {
                // Observed tickets also travel encoded.
                let decoded = Ticket::decode_exact(&ticket.encode()).unwrap();
                aggregator.process(&mut context, &decoded, false);
            }
            encode_books(&aggregator.finalize_result(context, false)).unwrap()
        })
        .collect();

    let mut context = aggregator.init(true);
    for bytes in &wire {
        let books = decode_books(bytes).unwrap();
        // Every third ticket leaves only singletons per node.
        assert_eq!(books.len(), 30);
        aggregator.process(&mut context, &books, true);
    }

    assert_eq!(
        aggregator.finalize_result(context, true),
        vec![
            TicketBook::new(0, 1, 30),
            TicketBook::new(1, 1, 30),
            TicketBook::new(2, 1, 30),
        ]
    );
}
