// model = "claude-opus-4-5"
// created = 2026-10-16
// modified = 2026-10-16
// driver = "Isaac Clayton"

//! Fixed-width binary encoding for tickets and books.
//!
//! Every field is a big-endian `i64`, so encoding is byte-exact and needs
//! no schema. A list of books (one node's partial result) is prefixed by
//! its length.
//!
//! # Layout
//!
//! ```text
//! Ticket      [0..8] issuer   [8..16] seq
//! TicketBook  [0..8] issuer   [8..16] from   [16..24] to
//! book list   [0..4] count: u32, then `count` books
//! ```

use thiserror::Error;

use crate::ticket::Ticket;
use crate::ticket::TicketBook;

/// Errors that can occur while encoding or decoding.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Book list has more entries than the `u32` count can express.
    #[error("cannot encode {0} books, limit is {}", u32::MAX)]
    TooManyBooks(usize),

    /// Input ended before a complete value.
    #[error("truncated input: needed {needed} bytes, {available} available")]
    Truncated { needed: usize, available: usize },

    /// Input continued past the last value.
    #[error("{0} trailing bytes after decoded value")]
    TrailingBytes(usize),
}

/// A value with a fixed-width encoding.
pub trait Wire: Sized {
    /// Encoded size in bytes.
    const ENCODED_LEN: usize;

    /// Append the encoding to `buf`.
    fn encode_into(&self, buf: &mut Vec<u8>);

    /// Decode one value from the front of `bytes`, returning the rest.
    fn decode(bytes: &[u8]) -> Result<(Self, &[u8]), CodecError>;

    /// Encode into a fresh buffer.
    fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(Self::ENCODED_LEN);
        self.encode_into(&mut buf);
        return buf;
    }

    /// Decode exactly one value, rejecting leftover bytes.
    fn decode_exact(bytes: &[u8]) -> Result<Self, CodecError> {
        let (value, rest) = Self::decode(bytes)?;
        if !rest.is_empty() {
            return Err(CodecError::TrailingBytes(rest.len()));
        }
        return Ok(value);
    }
}

fn check_len(bytes: &[u8], needed: usize) -> Result<(), CodecError> {
    if bytes.len() < needed {
        return Err(CodecError::Truncated {
            needed,
            available: bytes.len(),
        });
    }
    return Ok(());
}

/// Split one big-endian `i64` off the front. Caller has checked the length.
fn take_i64(bytes: &[u8]) -> (i64, &[u8]) {
    let (head, rest) = bytes.split_at(8);
    let mut word = [0u8; 8];
    word.copy_from_slice(head);
    return (i64::from_be_bytes(word), rest);
}

impl Wire for Ticket {
    const ENCODED_LEN: usize = 16;

    fn encode_into(&self, buf: &mut Vec<u8>) {
        buf.extend_from_slice(&self.issuer_id().to_be_bytes());
        buf.extend_from_slice(&self.sequence_number().to_be_bytes());
    }

    fn decode(bytes: &[u8]) -> Result<(Ticket, &[u8]), CodecError> {
        check_len(bytes, Self::ENCODED_LEN)?;
        let (issuer, bytes) = take_i64(bytes);
        let (seq, bytes) = take_i64(bytes);
        return Ok((Ticket::new(issuer, seq), bytes));
    }
}

impl Wire for TicketBook {
    const ENCODED_LEN: usize = 24;

    fn encode_into(&self, buf: &mut Vec<u8>) {
        buf.extend_from_slice(&self.issuer_id().to_be_bytes());
        buf.extend_from_slice(&self.from().to_be_bytes());
        buf.extend_from_slice(&self.to().to_be_bytes());
    }

    fn decode(bytes: &[u8]) -> Result<(TicketBook, &[u8]), CodecError> {
        check_len(bytes, Self::ENCODED_LEN)?;
        let (issuer, bytes) = take_i64(bytes);
        let (from, bytes) = take_i64(bytes);
        let (to, bytes) = take_i64(bytes);
        return Ok((TicketBook::new(issuer, from, to), bytes));
    }
}

/// Encode a list of books with a `u32` count prefix.
pub fn encode_books(books: &[TicketBook]) -> Result<Vec<u8>, CodecError> {
    let count = u32::try_from(books.len()).map_err(|_| CodecError::TooManyBooks(books.len()))?;
    let mut buf = Vec::with_capacity(4 + books.len() * TicketBook::ENCODED_LEN);
    buf.extend_from_slice(&count.to_be_bytes());
    for book in books {
        book.encode_into(&mut buf);
    }
    return Ok(buf);
}

/// Decode a list written by `encode_books`. The whole input must be used.
pub fn decode_books(bytes: &[u8]) -> Result<Vec<TicketBook>, CodecError> {
    check_len(bytes, 4)?;
    let (head, mut rest) = bytes.split_at(4);
    let mut word = [0u8; 4];
    word.copy_from_slice(head);
    let count = u32::from_be_bytes(word) as usize;

    // Check the whole body up front so a bogus count can't drive allocation.
    let needed = count.saturating_mul(TicketBook::ENCODED_LEN);
    check_len(rest, needed)?;

    let mut books = Vec::with_capacity(count);
    for _ in 0..count {
        let (book, tail) = TicketBook::decode(rest)?;
        books.push(book);
        rest = tail;
    }
    if !rest.is_empty() {
        return Err(CodecError::TrailingBytes(rest.len()));
    }
    return Ok(books);
}
