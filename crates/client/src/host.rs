//! The connection capability between entities and the remote host.
//!
//! A transport implements [`Host`] once; every entity in this crate speaks
//! through it. The trait is deliberately flat: each method maps to one
//! request/reply exchange on the control channel, with no batching and no
//! caching on either side of the seam.

use crate::error::Result;
use crate::options::OptionValue;

/// Opaque host-issued identifier for a buffer.
///
/// Possession proves nothing: the host can destroy the underlying buffer at
/// any time, so validity must be queried, never assumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BufferHandle(pub i64);

/// Opaque host-issued identifier for a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowHandle(pub i64);

/// A typed session-variable value.
///
/// Variable access is strictly typed; there is no implicit conversion
/// between kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
	/// Boolean variable.
	Bool(bool),
	/// Integer variable.
	Int(i64),
	/// String variable.
	Str(String),
}

impl Value {
	/// Name of the carried kind, for diagnostics.
	#[must_use]
	pub fn type_name(&self) -> &'static str {
		match self {
			Value::Bool(_) => "bool",
			Value::Int(_) => "int",
			Value::Str(_) => "string",
		}
	}
}

/// Synchronous connection capability to the host.
///
/// Every call blocks until the host replies. The host's current-buffer and
/// current-window registers are process-global on its side; methods touching
/// them are only correct under the single in-flight caller this layer
/// assumes (see the crate docs). Implementations translate transport and
/// host-side failures into [`Error`](crate::Error) variants unwrapped.
pub trait Host {
	/// Executes a host command, discarding any output.
	fn command(&self, cmd: &str) -> Result<()>;

	/// Executes a host command and captures its textual output verbatim.
	fn command_output(&self, cmd: &str) -> Result<String>;

	/// Reads the host's current-buffer register.
	fn current_buffer(&self) -> Result<BufferHandle>;

	/// Writes the host's current-buffer register.
	fn set_current_buffer(&self, buffer: BufferHandle) -> Result<()>;

	/// Reads the host's current-window register.
	fn current_window(&self) -> Result<WindowHandle>;

	/// Writes the host's current-window register.
	fn set_current_window(&self, window: WindowHandle) -> Result<()>;

	/// Every buffer the host knows about, in host enumeration order.
	fn buffers(&self) -> Result<Vec<BufferHandle>>;

	/// Whether the buffer behind `buffer` still exists.
	fn buffer_is_valid(&self, buffer: BufferHandle) -> Result<bool>;

	/// The buffer's name.
	fn buffer_name(&self, buffer: BufferHandle) -> Result<String>;

	/// Renames the buffer.
	fn set_buffer_name(&self, buffer: BufferHandle, name: &str) -> Result<()>;

	/// Number of lines in the buffer.
	fn buffer_line_count(&self, buffer: BufferHandle) -> Result<i64>;

	/// Replaces the line range `start..end` (0-based, end-exclusive) with
	/// `lines`. With `strict` set, out-of-bounds indices are an error rather
	/// than clamped.
	fn set_buffer_lines(
		&self,
		buffer: BufferHandle,
		start: i64,
		end: i64,
		strict: bool,
		lines: &[String],
	) -> Result<()>;

	/// Reads one buffer-scoped option by host-facing name.
	fn buffer_option(&self, buffer: BufferHandle, name: &str) -> Result<OptionValue>;

	/// Writes one buffer-scoped option by host-facing name.
	fn set_buffer_option(
		&self,
		buffer: BufferHandle,
		name: &str,
		value: OptionValue,
	) -> Result<()>;

	/// Every window the host knows about, in host enumeration order.
	fn windows(&self) -> Result<Vec<WindowHandle>>;

	/// Whether the window behind `window` still exists.
	fn window_is_valid(&self, window: WindowHandle) -> Result<bool>;

	/// The buffer currently displayed in the window.
	fn window_buffer(&self, window: WindowHandle) -> Result<BufferHandle>;

	/// Sets the window's width in columns.
	fn set_window_width(&self, window: WindowHandle, width: i64) -> Result<()>;

	/// Sets the window's height in rows.
	fn set_window_height(&self, window: WindowHandle, height: i64) -> Result<()>;

	/// Reads one window-scoped option by host-facing name.
	fn window_option(&self, window: WindowHandle, name: &str) -> Result<OptionValue>;

	/// Writes one window-scoped option by host-facing name.
	fn set_window_option(
		&self,
		window: WindowHandle,
		name: &str,
		value: OptionValue,
	) -> Result<()>;

	/// Reads a session variable.
	fn var(&self, name: &str) -> Result<Value>;

	/// Writes a session variable.
	fn set_var(&self, name: &str, value: Value) -> Result<()>;

	/// Changes the host's working directory.
	fn set_current_directory(&self, dir: &str) -> Result<()>;

	/// Writes informational text to the host's message area.
	fn write_out(&self, text: &str) -> Result<()>;

	/// Writes text to the host's error stream.
	fn write_err(&self, text: &str) -> Result<()>;
}
