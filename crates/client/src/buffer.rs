//! The buffer entity: one text container owned by the host.

use std::fmt;
use std::sync::Arc;

use tether_proto::{Position, Range};

use crate::error::{Error, Result};
use crate::focus::with_focus;
use crate::host::{BufferHandle, Host};
use crate::options::{self, FieldMut, OptionField, OptionKind, OptionValue};

/// Buffer-scoped host options, one field per schema row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BufferOptions {
	/// What becomes of the buffer when its last window closes (`bufhidden`).
	pub buf_hidden: String,
	/// Whether the buffer appears in the buffer list (`buflisted`).
	pub buf_listed: bool,
	/// Special buffer category, empty for a normal file (`buftype`).
	pub buf_type: String,
	/// Read-only flag (`readonly`).
	pub read_only: bool,
	/// Whether the buffer keeps a swap file (`swapfile`).
	pub swap_file: bool,
	/// Whether the buffer text may be changed (`modifiable`).
	pub modifiable: bool,
	/// Whether the buffer has unsaved changes (`modified`).
	pub modified: bool,
}

/// Schema for [`BufferOptions`], synchronized in this order.
pub const BUFFER_OPTIONS: &[OptionField<BufferOptions>] = &[
	OptionField {
		name: "buf_hidden",
		host_name: "bufhidden",
		kind: OptionKind::Str,
		get: |o| OptionValue::Str(o.buf_hidden.clone()),
		get_mut: |o| FieldMut::Str(&mut o.buf_hidden),
	},
	OptionField {
		name: "buf_listed",
		host_name: "buflisted",
		kind: OptionKind::Bool,
		get: |o| OptionValue::Bool(o.buf_listed),
		get_mut: |o| FieldMut::Bool(&mut o.buf_listed),
	},
	OptionField {
		name: "buf_type",
		host_name: "buftype",
		kind: OptionKind::Str,
		get: |o| OptionValue::Str(o.buf_type.clone()),
		get_mut: |o| FieldMut::Str(&mut o.buf_type),
	},
	OptionField {
		name: "read_only",
		host_name: "readonly",
		kind: OptionKind::Bool,
		get: |o| OptionValue::Bool(o.read_only),
		get_mut: |o| FieldMut::Bool(&mut o.read_only),
	},
	OptionField {
		name: "swap_file",
		host_name: "swapfile",
		kind: OptionKind::Bool,
		get: |o| OptionValue::Bool(o.swap_file),
		get_mut: |o| FieldMut::Bool(&mut o.swap_file),
	},
	OptionField {
		name: "modifiable",
		host_name: "modifiable",
		kind: OptionKind::Bool,
		get: |o| OptionValue::Bool(o.modifiable),
		get_mut: |o| FieldMut::Bool(&mut o.modifiable),
	},
	OptionField {
		name: "modified",
		host_name: "modified",
		kind: OptionKind::Bool,
		get: |o| OptionValue::Bool(o.modified),
		get_mut: |o| FieldMut::Bool(&mut o.modified),
	},
];

/// Client handle to one host buffer.
///
/// Holds only the connection and the opaque handle; every accessor asks the
/// host, so nothing here can go stale. The host may destroy the underlying
/// buffer at any time — check [`Buffer::is_valid`] rather than trusting the
/// handle. This layer never destroys buffers itself.
#[derive(Clone)]
pub struct Buffer {
	host: Arc<dyn Host>,
	handle: BufferHandle,
}

impl Buffer {
	/// Wraps a host-reported buffer handle.
	#[must_use]
	pub fn new(host: Arc<dyn Host>, handle: BufferHandle) -> Self {
		Self { host, handle }
	}

	/// The underlying host handle.
	#[must_use]
	pub fn handle(&self) -> BufferHandle {
		self.handle
	}

	/// Asks the host whether the underlying buffer still exists.
	pub fn is_valid(&self) -> Result<bool> {
		self.host.buffer_is_valid(self.handle)
	}

	/// The buffer's name as the host reports it.
	pub fn name(&self) -> Result<String> {
		self.host.buffer_name(self.handle)
	}

	/// Renames the buffer.
	pub fn set_name(&self, name: &str) -> Result<()> {
		self.host.set_buffer_name(self.handle, name)
	}

	/// Makes this buffer the host's current buffer.
	///
	/// This is the raw register write the scoped switch builds on; it does
	/// not remember or restore anything.
	pub fn focus(&self) -> Result<()> {
		self.host.set_current_buffer(self.handle)
	}

	/// Whether this buffer is the host's current buffer.
	pub fn is_focused(&self) -> Result<bool> {
		Ok(self.host.current_buffer()? == self.handle)
	}

	fn scoped<R>(&self, action: impl FnOnce() -> Result<R>) -> Result<R> {
		with_focus(&*self.host, self.handle, action)
	}

	/// Executes a host command with this buffer focused.
	pub fn command(&self, cmd: &str) -> Result<()> {
		self.scoped(|| self.host.command(cmd))
	}

	/// Executes a host command with this buffer focused and returns its
	/// whitespace-trimmed output.
	pub fn command_output(&self, cmd: &str) -> Result<String> {
		self.scoped(|| self.host.command_output(cmd))
			.map(|out| out.trim().to_string())
	}

	/// The buffer's cursor position (host mark `.`).
	pub fn cursor(&self) -> Result<Position> {
		let out = self.command_output("silent echo getpos('.')")?;
		Ok(Position::decode(&out)?)
	}

	/// Moves the buffer's cursor.
	pub fn set_cursor(&self, position: Position) -> Result<()> {
		self.command(&format!("call setpos('.', {position})"))
	}

	/// The visual-selection span (host marks `'<` and `'>`).
	///
	/// The two marks are fetched one after the other, not atomically; an
	/// external change landing between the fetches shows up in the result.
	pub fn selection(&self) -> Result<Range> {
		self.scoped(|| {
			let start = self.host.command_output(r#"silent echo getpos("'<")"#)?;
			let end = self.host.command_output(r#"silent echo getpos("'>")"#)?;
			Ok(Range {
				start: Position::decode(start.trim())?,
				end: Position::decode(end.trim())?,
			})
		})
	}

	/// The buffer's filetype.
	pub fn file_type(&self) -> Result<String> {
		match self.host.buffer_option(self.handle, "filetype")? {
			OptionValue::Str(t) => Ok(t),
			value => Err(Error::OptionType {
				option: "filetype",
				expected: OptionKind::Str,
				got: value.type_name(),
			}),
		}
	}

	/// Sets the buffer's filetype.
	///
	/// Issued as a `set filetype=` command, not a direct option write: the
	/// direct write skips the host's filetype-change notification chain, so
	/// host-side hooks would never see the new type.
	pub fn set_file_type(&self, file_type: &str) -> Result<()> {
		self.command(&format!("set filetype={file_type}"))
	}

	/// Replaces the buffer's entire content with `lines`.
	///
	/// The modifiable flag is forced on and the cursor is preserved for the
	/// duration; both are restored whether or not the replacement succeeds.
	pub fn write(&self, lines: &[String]) -> Result<()> {
		let was_modifiable = self.modifiable()?;
		self.set_modifiable(true)?;
		let result = self.write_with_cursor_guard(lines);
		if let Err(err) = self.set_modifiable(was_modifiable) {
			tracing::warn!(buffer = ?self.handle, %err, "failed to restore modifiable flag");
		}
		result
	}

	fn write_with_cursor_guard(&self, lines: &[String]) -> Result<()> {
		let cursor = self.cursor()?;
		let result = self.line_count().and_then(|count| {
			self.host
				.set_buffer_lines(self.handle, 0, count, true, lines)
		});
		if let Err(err) = self.set_cursor(cursor) {
			tracing::warn!(buffer = ?self.handle, %err, "failed to restore cursor");
		}
		result
	}

	/// Number of lines the host reports for this buffer.
	pub fn line_count(&self) -> Result<i64> {
		self.host.buffer_line_count(self.handle)
	}

	/// Empties the buffer.
	///
	/// Replaces lines `0..line_count - 1` with nothing. The last line is
	/// excluded deliberately: replacing the full range would still leave one
	/// empty trailing line behind, so the contract is "effectively empty,"
	/// not "zero stored lines."
	pub fn clear(&self) -> Result<()> {
		let count = self.line_count()?;
		self.host.set_buffer_lines(self.handle, 0, count - 1, true, &[])
	}

	/// The buffer's modifiable flag.
	pub fn modifiable(&self) -> Result<bool> {
		match self.host.buffer_option(self.handle, "modifiable")? {
			OptionValue::Bool(m) => Ok(m),
			value => Err(Error::OptionType {
				option: "modifiable",
				expected: OptionKind::Bool,
				got: value.type_name(),
			}),
		}
	}

	/// Sets the buffer's modifiable flag.
	pub fn set_modifiable(&self, modifiable: bool) -> Result<()> {
		self.host
			.set_buffer_option(self.handle, "modifiable", OptionValue::Bool(modifiable))
	}

	/// Reads the full buffer option set, in schema order.
	///
	/// The first failing row aborts the read.
	pub fn options(&self) -> Result<BufferOptions> {
		options::read_options(&*self.host, self.handle, BUFFER_OPTIONS)
	}

	/// Writes the full buffer option set, in schema order.
	///
	/// Best effort per the schema contract: on failure, rows already written
	/// stay applied on the host.
	pub fn set_options(&self, options: &BufferOptions) -> Result<()> {
		options::write_options(&*self.host, self.handle, BUFFER_OPTIONS, options)
	}
}

impl fmt::Debug for Buffer {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Buffer")
			.field("handle", &self.handle)
			.finish_non_exhaustive()
	}
}
