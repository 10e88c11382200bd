//! Session: the top-level entry point over one host connection.
//!
//! A [`Session`] hands out [`Buffer`] and [`Window`] entities, owns the
//! session-level surface (typed variables, working directory, prompts,
//! message output), and creates windows by splitting. It has no lifecycle of
//! its own beyond the connection it wraps.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tether_proto::escape;

use crate::buffer::Buffer;
use crate::error::{Error, Result};
use crate::host::{Host, Value};
use crate::window::Window;

/// Axis of a window split.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowDirection {
	/// Split along the horizontal axis (stacked windows).
	Horizontal,
	/// Split along the vertical axis (side-by-side windows).
	Vertical,
}

impl WindowDirection {
	/// The host's spelling of this direction.
	#[must_use]
	pub fn as_str(self) -> &'static str {
		match self {
			WindowDirection::Horizontal => "horizontal",
			WindowDirection::Vertical => "vertical",
		}
	}
}

/// Anchor corner for a window split.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowPosition {
	/// Anchor the new window at the top-left.
	TopLeft,
	/// Anchor the new window at the bottom-right.
	BottomRight,
}

impl WindowPosition {
	/// The host's spelling of this anchor.
	#[must_use]
	pub fn as_str(self) -> &'static str {
		match self {
			WindowPosition::TopLeft => "topleft",
			WindowPosition::BottomRight => "botright",
		}
	}
}

/// Input-completion kinds the host offers for prompts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum Completion {
	#[default]
	None,
	Augroup,
	Buffer,
	Behave,
	Color,
	Command,
	Compiler,
	Cscope,
	Dir,
	Environment,
	Event,
	Expression,
	File,
	FileInPath,
	Filetype,
	Function,
	Help,
	Highlight,
	History,
	Locale,
	Mapping,
	Menu,
	Option,
	Shellcmd,
	Sign,
	Syntax,
	Syntime,
	Tag,
	TagListfiles,
	User,
	Var,
}

impl Completion {
	/// The host's spelling of this completion kind; empty for [`Self::None`].
	#[must_use]
	pub fn as_str(self) -> &'static str {
		match self {
			Completion::None => "",
			Completion::Augroup => "augroup",
			Completion::Buffer => "buffer",
			Completion::Behave => "behave",
			Completion::Color => "color",
			Completion::Command => "command",
			Completion::Compiler => "compiler",
			Completion::Cscope => "cscope",
			Completion::Dir => "dir",
			Completion::Environment => "environment",
			Completion::Event => "event",
			Completion::Expression => "expression",
			Completion::File => "file",
			Completion::FileInPath => "file_in_path",
			Completion::Filetype => "filetype",
			Completion::Function => "function",
			Completion::Help => "help",
			Completion::Highlight => "highlight",
			Completion::History => "history",
			Completion::Locale => "locale",
			Completion::Mapping => "mapping",
			Completion::Menu => "menu",
			Completion::Option => "option",
			Completion::Shellcmd => "shellcmd",
			Completion::Sign => "sign",
			Completion::Syntax => "syntax",
			Completion::Syntime => "syntime",
			Completion::Tag => "tag",
			Completion::TagListfiles => "tag_listfiles",
			Completion::User => "user",
			Completion::Var => "var",
		}
	}
}

/// Top-level client over one host connection.
#[derive(Clone)]
pub struct Session {
	host: Arc<dyn Host>,
}

impl Session {
	/// Wraps an established host connection.
	#[must_use]
	pub fn new(host: Arc<dyn Host>) -> Self {
		Self { host }
	}

	/// The shared connection capability, for wrapping handles obtained
	/// outside this session.
	#[must_use]
	pub fn host(&self) -> &Arc<dyn Host> {
		&self.host
	}

	/// Reads a boolean session variable.
	pub fn var_bool(&self, name: &str) -> Result<bool> {
		match self.host.var(name)? {
			Value::Bool(v) => Ok(v),
			value => Err(Self::var_type_error(name, "bool", &value)),
		}
	}

	/// Reads an integer session variable.
	pub fn var_int(&self, name: &str) -> Result<i64> {
		match self.host.var(name)? {
			Value::Int(v) => Ok(v),
			value => Err(Self::var_type_error(name, "int", &value)),
		}
	}

	/// Reads a string session variable.
	pub fn var_string(&self, name: &str) -> Result<String> {
		match self.host.var(name)? {
			Value::Str(v) => Ok(v),
			value => Err(Self::var_type_error(name, "string", &value)),
		}
	}

	fn var_type_error(name: &str, expected: &'static str, value: &Value) -> Error {
		Error::VarType {
			name: name.to_string(),
			expected,
			got: value.type_name(),
		}
	}

	/// Writes a boolean session variable.
	pub fn set_var_bool(&self, name: &str, value: bool) -> Result<()> {
		self.host.set_var(name, Value::Bool(value))
	}

	/// Writes an integer session variable.
	pub fn set_var_int(&self, name: &str, value: i64) -> Result<()> {
		self.host.set_var(name, Value::Int(value))
	}

	/// Writes a string session variable.
	pub fn set_var_string(&self, name: &str, value: &str) -> Result<()> {
		self.host.set_var(name, Value::Str(value.to_string()))
	}

	/// Executes a host command silently.
	pub fn command(&self, cmd: &str) -> Result<()> {
		self.host.command(&format!("silent {cmd}"))
	}

	/// Executes a host command and returns its whitespace-trimmed output.
	pub fn command_output(&self, cmd: &str) -> Result<String> {
		Ok(self.host.command_output(cmd)?.trim().to_string())
	}

	/// The host's working directory.
	pub fn current_directory(&self) -> Result<String> {
		self.command_output("silent pwd")
	}

	/// Changes the host's working directory.
	pub fn set_current_directory(&self, dir: &str) -> Result<()> {
		self.host.set_current_directory(dir)
	}

	/// Best-effort directory for new work; never fails.
	///
	/// Tries, in order: the focused buffer's parent directory, the host's
	/// working directory, the user's home directory, the filesystem root.
	/// A failing or empty step falls through to the next.
	#[must_use]
	pub fn nearest_directory(&self) -> PathBuf {
		if let Ok(name) = self.current_buffer_name()
			&& !name.is_empty()
			&& let Some(parent) = Path::new(&name).parent()
		{
			return parent.to_path_buf();
		}
		if let Ok(dir) = self.current_directory()
			&& !dir.is_empty()
		{
			return PathBuf::from(dir);
		}
		if let Some(home) = dirs::home_dir() {
			return home;
		}
		PathBuf::from("/")
	}

	/// Creates a window by splitting, loading `name` into it.
	///
	/// The host's inline split count only pins one axis reliably, so the new
	/// window is resized explicitly afterwards: width for vertical splits,
	/// height for horizontal ones (a non-positive `size` skips both the
	/// inline count and the resize). The split leaves the host focused on
	/// the new window; the previously current window is put back before
	/// returning.
	pub fn create_window(
		&self,
		direction: WindowDirection,
		position: WindowPosition,
		size: i64,
		name: &str,
	) -> Result<Window> {
		let prev = self.host.current_window()?;
		let count = if size > 0 {
			size.to_string()
		} else {
			String::new()
		};
		self.host.command(&format!(
			"{} {} {}split {}",
			direction.as_str(),
			position.as_str(),
			count,
			name
		))?;
		let window = Window::new(self.host.clone(), self.host.current_window()?);
		match direction {
			WindowDirection::Vertical => window.set_width(size)?,
			WindowDirection::Horizontal => window.set_height(size)?,
		}
		if let Err(err) = self.host.set_current_window(prev) {
			tracing::warn!(window = ?prev, %err, "failed to restore window focus after split");
		}
		Ok(window)
	}

	/// Creates a vertical split anchored top-left.
	pub fn create_window_left(&self, size: i64, name: &str) -> Result<Window> {
		self.create_window(WindowDirection::Vertical, WindowPosition::TopLeft, size, name)
	}

	/// Creates a vertical split anchored bottom-right.
	pub fn create_window_right(&self, size: i64, name: &str) -> Result<Window> {
		self.create_window(
			WindowDirection::Vertical,
			WindowPosition::BottomRight,
			size,
			name,
		)
	}

	/// Every window the host reports, in host enumeration order.
	pub fn windows(&self) -> Result<Vec<Window>> {
		Ok(self
			.host
			.windows()?
			.into_iter()
			.map(|handle| Window::new(self.host.clone(), handle))
			.collect())
	}

	/// Every buffer the host reports, in host enumeration order.
	pub fn buffers(&self) -> Result<Vec<Buffer>> {
		Ok(self
			.host
			.buffers()?
			.into_iter()
			.map(|handle| Buffer::new(self.host.clone(), handle))
			.collect())
	}

	/// The host's current window.
	pub fn current_window(&self) -> Result<Window> {
		Ok(Window::new(self.host.clone(), self.host.current_window()?))
	}

	/// The host's current buffer.
	pub fn current_buffer(&self) -> Result<Buffer> {
		Ok(Buffer::new(self.host.clone(), self.host.current_buffer()?))
	}

	/// Name of the host's current buffer.
	pub fn current_buffer_name(&self) -> Result<String> {
		let handle = self.host.current_buffer()?;
		self.host.buffer_name(handle)
	}

	/// Prompts the user for one line of input.
	///
	/// Prompt and default text are quote-escaped before interpolation.
	pub fn input_string(
		&self,
		prompt: &str,
		default: &str,
		completion: Completion,
	) -> Result<String> {
		let cmd = match completion {
			Completion::None => format!(
				r#"echo input("{}: ", "{}")"#,
				escape(prompt),
				escape(default)
			),
			completion => format!(
				r#"echo input("{}: ", "{}", "{}")"#,
				escape(prompt),
				escape(default),
				completion.as_str()
			),
		};
		self.command_output(&cmd)
	}

	/// Prompts for a comma-separated list; items come back trimmed.
	pub fn input_strings(
		&self,
		prompt: &str,
		defaults: &[String],
		completion: Completion,
	) -> Result<Vec<String>> {
		let default = defaults.join(", ");
		let out = self.input_string(
			&format!("{prompt}, separated by commas"),
			&default,
			completion,
		)?;
		Ok(out.split(',').map(|item| item.trim().to_string()).collect())
	}

	/// Prompts for a yes/no answer.
	///
	/// `y` or `yes` in any case is true; anything else, including an empty
	/// reply, is false.
	pub fn input_bool(&self, prompt: &str) -> Result<bool> {
		let out = self.input_string(&format!("{prompt} [y/n]"), "", Completion::None)?;
		Ok(matches!(out.to_lowercase().as_str(), "y" | "yes"))
	}

	/// Writes informational text to the host's message area.
	pub fn print(&self, text: &str) -> Result<()> {
		self.host.write_out(text)
	}

	/// Writes an error to the host's error stream; `None` is a no-op.
	pub fn print_error(&self, err: Option<&dyn fmt::Display>) -> Result<()> {
		match err {
			Some(err) => self.host.write_err(&format!("{err}\n")),
			None => Ok(()),
		}
	}

	/// Puts text into the host's yank register (`@+`), quote-escaped.
	pub fn set_register_yank(&self, text: &str) -> Result<()> {
		self.host
			.command(&format!("let @+ = \"{}\"", escape(text)))
	}
}

impl fmt::Debug for Session {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Session").finish_non_exhaustive()
	}
}
