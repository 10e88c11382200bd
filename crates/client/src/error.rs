//! Error types for host-facing operations.

use tether_proto::ParseError;
use thiserror::Error;

use crate::options::OptionKind;

/// Errors surfaced by client operations.
///
/// Host and channel failures pass through unwrapped to the immediate caller.
/// Nothing in this layer retries; retry policy belongs above it.
#[derive(Debug, Error)]
pub enum Error {
	/// The control channel itself failed (disconnect, transport fault).
	#[error("channel error: {0}")]
	Channel(String),

	/// The host rejected a command or query.
	#[error("host command failed: {0}")]
	Command(String),

	/// The referenced buffer or window no longer exists on the host.
	#[error("invalid or destroyed handle")]
	InvalidHandle,

	/// The host replied with an option value of the wrong kind.
	#[error("option `{option}` has kind {got}, expected {expected:?}")]
	OptionType {
		/// Host-facing option name.
		option: &'static str,
		/// Kind the schema declares.
		expected: OptionKind,
		/// Kind the host replied with.
		got: &'static str,
	},

	/// A typed variable access found a value of a different kind.
	#[error("variable `{name}` has kind {got}, expected {expected}")]
	VarType {
		/// Variable name.
		name: String,
		/// Requested kind.
		expected: &'static str,
		/// Kind the host replied with.
		got: &'static str,
	},

	/// A host coordinate literal failed to parse.
	#[error(transparent)]
	Parse(#[from] ParseError),
}

/// Result alias for client operations.
pub type Result<T> = std::result::Result<T, Error>;
