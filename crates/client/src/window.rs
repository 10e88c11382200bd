//! The window entity: one host viewport onto a buffer.

use std::fmt;
use std::sync::Arc;

use crate::buffer::Buffer;
use crate::error::Result;
use crate::focus::with_focus;
use crate::host::{Host, WindowHandle};
use crate::options::{self, FieldMut, OptionField, OptionKind, OptionValue};

/// Window-scoped host options, one field per schema row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WindowOptions {
	/// Render whitespace placeholders (`list`).
	pub list: bool,
	/// Show absolute line numbers (`number`).
	pub number: bool,
	/// Show line numbers relative to the cursor (`relativenumber`).
	pub relative_number: bool,
	/// Keep the window's width across layout changes (`winfixwidth`).
	pub winfix_width: bool,
	/// Keep the window's height across layout changes (`winfixheight`).
	pub winfix_height: bool,
}

/// Schema for [`WindowOptions`], synchronized in this order.
pub const WINDOW_OPTIONS: &[OptionField<WindowOptions>] = &[
	OptionField {
		name: "list",
		host_name: "list",
		kind: OptionKind::Bool,
		get: |o| OptionValue::Bool(o.list),
		get_mut: |o| FieldMut::Bool(&mut o.list),
	},
	OptionField {
		name: "number",
		host_name: "number",
		kind: OptionKind::Bool,
		get: |o| OptionValue::Bool(o.number),
		get_mut: |o| FieldMut::Bool(&mut o.number),
	},
	OptionField {
		name: "relative_number",
		host_name: "relativenumber",
		kind: OptionKind::Bool,
		get: |o| OptionValue::Bool(o.relative_number),
		get_mut: |o| FieldMut::Bool(&mut o.relative_number),
	},
	OptionField {
		name: "winfix_width",
		host_name: "winfixwidth",
		kind: OptionKind::Bool,
		get: |o| OptionValue::Bool(o.winfix_width),
		get_mut: |o| FieldMut::Bool(&mut o.winfix_width),
	},
	OptionField {
		name: "winfix_height",
		host_name: "winfixheight",
		kind: OptionKind::Bool,
		get: |o| OptionValue::Bool(o.winfix_height),
		get_mut: |o| FieldMut::Bool(&mut o.winfix_height),
	},
];

/// Client handle to one host window.
///
/// [`Window::close`] is the only operation in this layer that actively
/// destroys a host entity; everything else leaves lifetimes to the host.
#[derive(Clone)]
pub struct Window {
	host: Arc<dyn Host>,
	handle: WindowHandle,
}

impl Window {
	/// Wraps a host-reported window handle.
	#[must_use]
	pub fn new(host: Arc<dyn Host>, handle: WindowHandle) -> Self {
		Self { host, handle }
	}

	/// The underlying host handle.
	#[must_use]
	pub fn handle(&self) -> WindowHandle {
		self.handle
	}

	/// Asks the host whether the underlying window still exists.
	pub fn is_valid(&self) -> Result<bool> {
		self.host.window_is_valid(self.handle)
	}

	/// Closes the underlying host window.
	///
	/// No-op when the window is already gone. The usual scoped restore is
	/// skipped by necessity, not oversight: the focused target ceases to
	/// exist mid-operation and the host moves its register to a neighboring
	/// window on its own.
	pub fn close(&self) -> Result<()> {
		if !self.is_valid()? {
			return Ok(());
		}
		self.focus()?;
		self.host.command("quit")
	}

	/// Resizes the window's width.
	///
	/// A non-positive width means "no explicit resize requested" and issues
	/// no host call.
	pub fn set_width(&self, width: i64) -> Result<()> {
		if width <= 0 {
			return Ok(());
		}
		self.host.set_window_width(self.handle, width)
	}

	/// Resizes the window's height.
	///
	/// A non-positive height means "no explicit resize requested" and issues
	/// no host call.
	pub fn set_height(&self, height: i64) -> Result<()> {
		if height <= 0 {
			return Ok(());
		}
		self.host.set_window_height(self.handle, height)
	}

	/// The buffer currently displayed in this window.
	pub fn buffer(&self) -> Result<Buffer> {
		let handle = self.host.window_buffer(self.handle)?;
		Ok(Buffer::new(self.host.clone(), handle))
	}

	/// Makes this window the host's current window (raw register write).
	pub fn focus(&self) -> Result<()> {
		self.host.set_current_window(self.handle)
	}

	fn scoped<R>(&self, action: impl FnOnce() -> Result<R>) -> Result<R> {
		with_focus(&*self.host, self.handle, action)
	}

	/// Loads the named file into this window.
	///
	/// The name is embedded in the host's literal-evaluation quoting form
	/// (`` `='<name>'` ``), which takes the string exactly as given;
	/// shell-style path escaping does not apply and callers must not
	/// pre-escape.
	pub fn open(&self, name: &str) -> Result<()> {
		self.scoped(|| self.host.command(&format!("edit `='{name}'`")))
	}

	/// Reads the full window option set, in schema order.
	///
	/// The first failing row aborts the read.
	pub fn options(&self) -> Result<WindowOptions> {
		options::read_options(&*self.host, self.handle, WINDOW_OPTIONS)
	}

	/// Writes the full window option set, in schema order.
	///
	/// Best effort per the schema contract: on failure, rows already written
	/// stay applied on the host.
	pub fn set_options(&self, options: &WindowOptions) -> Result<()> {
		options::write_options(&*self.host, self.handle, WINDOW_OPTIONS, options)
	}
}

impl fmt::Debug for Window {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Window")
			.field("handle", &self.handle)
			.finish_non_exhaustive()
	}
}
