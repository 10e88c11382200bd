//! Position and range types over host-native coordinates.
//!
//! The host numbers lines and columns from 1 and encodes a location as
//! `[buffer, line, column, offset]`. Those fields are stored verbatim as the
//! single canonical representation; the 0-based [`x`](Position::x) /
//! [`y`](Position::y) views used by logical code are derived on access and
//! written back through [`set_x`](Position::set_x) /
//! [`set_y`](Position::set_y), so the two numberings cannot drift.

use std::fmt;
use std::num::ParseIntError;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

static POSITION: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"\[(\d+), (\d+), (\d+), (\d+)\]").expect("position regex"));

/// Failure to parse a host-reported coordinate literal.
#[derive(Debug, Error)]
pub enum ParseError {
	/// The input did not contain a bracketed four-integer list.
	#[error("malformed position literal: {0:?}")]
	Malformed(String),

	/// A field did not fit an `i64`.
	#[error("position field out of range: {0}")]
	Field(#[from] ParseIntError),
}

/// A single location inside a host buffer.
///
/// Fields carry the host's own numbering: `line` and `column` count from 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
	/// Host buffer number the location belongs to.
	pub buffer: i64,
	/// 1-based line number.
	pub line: i64,
	/// 1-based column number.
	pub column: i64,
	/// Offset field reported by the host, stored verbatim.
	pub offset: i64,
}

impl Position {
	/// Creates a position from host-native (1-based) fields.
	#[must_use]
	pub const fn new(buffer: i64, line: i64, column: i64, offset: i64) -> Self {
		Self {
			buffer,
			line,
			column,
			offset,
		}
	}

	/// Parses the host's `[buffer, line, column, offset]` literal.
	///
	/// The literal may be embedded in surrounding command output; the first
	/// match wins.
	pub fn decode(s: &str) -> Result<Self, ParseError> {
		let caps = POSITION
			.captures(s)
			.ok_or_else(|| ParseError::Malformed(s.to_string()))?;
		Ok(Self {
			buffer: caps[1].parse()?,
			line: caps[2].parse()?,
			column: caps[3].parse()?,
			offset: caps[4].parse()?,
		})
	}

	/// 0-based column.
	#[must_use]
	pub const fn x(&self) -> i64 {
		self.column - 1
	}

	/// 0-based line.
	#[must_use]
	pub const fn y(&self) -> i64 {
		self.line - 1
	}

	/// Sets the column from a 0-based value.
	pub fn set_x(&mut self, x: i64) {
		self.column = x + 1;
	}

	/// Sets the line from a 0-based value.
	pub fn set_y(&mut self, y: i64) {
		self.line = y + 1;
	}
}

impl fmt::Display for Position {
	/// The encoder: exact inverse of [`Position::decode`], host-native values.
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"[{}, {}, {}, {}]",
			self.buffer, self.line, self.column, self.offset
		)
	}
}

/// A span between two positions.
///
/// No ordering is enforced: `start` may follow `end`, mirroring the host's
/// selection marks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Range {
	/// Where the span begins (host start mark).
	pub start: Position,
	/// Where the span ends (host end mark).
	pub end: Position,
}
