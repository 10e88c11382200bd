//! Declarative synchronization of host options.
//!
//! Each entity kind declares a fixed, ordered table of [`OptionField`] rows
//! mapping a logical field to a host-facing option name. Reading and writing
//! walk the table in declared order, so adding a setting means adding one
//! row — nothing else changes. The tables live next to their structs in
//! [`buffer`](crate::buffer) and [`window`](crate::window).

use crate::error::{Error, Result};
use crate::host::{BufferHandle, Host, WindowHandle};

/// Value kinds an option row may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
	/// Boolean flag option.
	Bool,
	/// String-valued option.
	Str,
}

/// A typed option value on the host seam.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionValue {
	/// Boolean flag.
	Bool(bool),
	/// String value.
	Str(String),
}

impl OptionValue {
	/// Name of the carried kind, for diagnostics.
	#[must_use]
	pub fn type_name(&self) -> &'static str {
		match self {
			OptionValue::Bool(_) => "bool",
			OptionValue::Str(_) => "string",
		}
	}
}

/// Mutable view of one field of an options struct.
pub enum FieldMut<'a> {
	/// Slot for a boolean row.
	Bool(&'a mut bool),
	/// Slot for a string row.
	Str(&'a mut String),
}

/// One row of an option schema.
///
/// `host_name` is the logical field name in the host's spelling; by
/// convention it is the lower-cased logical name with separators dropped,
/// spelled out explicitly where the host differs.
pub struct OptionField<O> {
	/// Logical field name.
	pub name: &'static str,
	/// Host-facing option name.
	pub host_name: &'static str,
	/// Declared value kind.
	pub kind: OptionKind,
	/// Reads the field as a host value.
	pub get: fn(&O) -> OptionValue,
	/// Exposes the field for writing a host value back.
	pub get_mut: fn(&mut O) -> FieldMut<'_>,
}

/// An entity kind whose options the host exposes by handle.
pub trait OptionScope: Copy {
	/// Queries one option by host-facing name.
	fn option(self, host: &dyn Host, name: &str) -> Result<OptionValue>;

	/// Writes one option by host-facing name.
	fn set_option(self, host: &dyn Host, name: &str, value: OptionValue) -> Result<()>;
}

impl OptionScope for BufferHandle {
	fn option(self, host: &dyn Host, name: &str) -> Result<OptionValue> {
		host.buffer_option(self, name)
	}

	fn set_option(self, host: &dyn Host, name: &str, value: OptionValue) -> Result<()> {
		host.set_buffer_option(self, name, value)
	}
}

impl OptionScope for WindowHandle {
	fn option(self, host: &dyn Host, name: &str) -> Result<OptionValue> {
		host.window_option(self, name)
	}

	fn set_option(self, host: &dyn Host, name: &str, value: OptionValue) -> Result<()> {
		host.set_window_option(self, name, value)
	}
}

/// Populates an options struct row by row, in declared order.
///
/// Stops at the first failing row; later rows are not attempted. A reply
/// whose kind does not match the row's declaration is an
/// [`Error::OptionType`].
pub fn read_options<O, S>(host: &dyn Host, scope: S, schema: &[OptionField<O>]) -> Result<O>
where
	O: Default,
	S: OptionScope,
{
	let mut options = O::default();
	for row in schema {
		let value = scope.option(host, row.host_name)?;
		match ((row.get_mut)(&mut options), value) {
			(FieldMut::Bool(slot), OptionValue::Bool(v)) => *slot = v,
			(FieldMut::Str(slot), OptionValue::Str(v)) => *slot = v,
			(_, value) => {
				return Err(Error::OptionType {
					option: row.host_name,
					expected: row.kind,
					got: value.type_name(),
				});
			}
		}
	}
	Ok(options)
}

/// Pushes every row of an options struct to the host, in declared order.
///
/// Best effort, not transactional: a failing row aborts the walk, leaving
/// earlier rows applied on the host and later rows untouched. There is no
/// rollback.
pub fn write_options<O, S>(
	host: &dyn Host,
	scope: S,
	schema: &[OptionField<O>],
	options: &O,
) -> Result<()>
where
	S: OptionScope,
{
	for row in schema {
		scope.set_option(host, row.host_name, (row.get)(options))?;
	}
	Ok(())
}
