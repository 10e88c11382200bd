//! Host-native text encodings for the tether client.
//!
//! The host reports cursor and mark locations as a bracketed four-integer
//! literal with 1-based line/column numbering. This crate owns the codec for
//! that form, plus the quoting helper for caller text interpolated into host
//! commands. It knows nothing about the control channel itself.

#![warn(missing_docs)]

pub mod escape;
pub mod position;

pub use escape::escape;
pub use position::{ParseError, Position, Range};
