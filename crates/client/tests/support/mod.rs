//! In-memory scripted host backing the integration tests.
//!
//! `MockHost` keeps real buffer/window/focus state behind the [`Host`] seam
//! and interprets the command strings this layer actually issues (`getpos`,
//! `setpos`, `set filetype=`, splits, `edit`, `input(...)`, `quit`, `pwd`).
//! Every seam call is appended to a log so tests can assert call counts and
//! ordering, and failures can be injected by command substring or option
//! name.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};

use parking_lot::Mutex;
use tether_client::{
	BufferHandle, Error, Host, OptionValue, Result, Value, WindowHandle,
};

const DEFAULT_WIDTH: i64 = 80;
const DEFAULT_HEIGHT: i64 = 24;

struct MockBuffer {
	handle: i64,
	name: String,
	lines: Vec<String>,
	options: HashMap<String, OptionValue>,
	/// 1-based (line, column), mark `.`.
	cursor: (i64, i64),
	/// 1-based (line, column), mark `'<`.
	select_start: (i64, i64),
	/// 1-based (line, column), mark `'>`.
	select_end: (i64, i64),
}

impl MockBuffer {
	fn new(handle: i64, name: &str, lines: &[&str]) -> Self {
		let lines = if lines.is_empty() {
			vec![String::new()]
		} else {
			lines.iter().map(|s| s.to_string()).collect()
		};
		Self {
			handle,
			name: name.to_string(),
			lines,
			options: default_buffer_options(),
			cursor: (1, 1),
			select_start: (1, 1),
			select_end: (1, 1),
		}
	}
}

fn default_buffer_options() -> HashMap<String, OptionValue> {
	HashMap::from([
		("bufhidden".to_string(), OptionValue::Str(String::new())),
		("buflisted".to_string(), OptionValue::Bool(true)),
		("buftype".to_string(), OptionValue::Str(String::new())),
		("readonly".to_string(), OptionValue::Bool(false)),
		("swapfile".to_string(), OptionValue::Bool(true)),
		("modifiable".to_string(), OptionValue::Bool(true)),
		("modified".to_string(), OptionValue::Bool(false)),
		("filetype".to_string(), OptionValue::Str(String::new())),
	])
}

fn default_window_options() -> HashMap<String, OptionValue> {
	HashMap::from([
		("list".to_string(), OptionValue::Bool(false)),
		("number".to_string(), OptionValue::Bool(false)),
		("relativenumber".to_string(), OptionValue::Bool(false)),
		("winfixwidth".to_string(), OptionValue::Bool(false)),
		("winfixheight".to_string(), OptionValue::Bool(false)),
	])
}

struct MockWindow {
	handle: i64,
	buffer: i64,
	width: i64,
	height: i64,
	options: HashMap<String, OptionValue>,
}

struct State {
	buffers: Vec<MockBuffer>,
	windows: Vec<MockWindow>,
	current_buffer: i64,
	current_window: i64,
	next_buffer: i64,
	next_window: i64,
	vars: HashMap<String, Value>,
	cwd: String,
	register: String,
	inputs: VecDeque<String>,
	messages: Vec<String>,
	error_messages: Vec<String>,
	calls: Vec<String>,
	fail_commands_containing: Option<String>,
	fail_option_named: Option<String>,
	fail_set_lines: bool,
}

pub struct MockHost {
	state: Mutex<State>,
}

impl MockHost {
	/// A host with one empty buffer displayed in one window, both current.
	pub fn new() -> Self {
		let buffer = MockBuffer::new(1, "", &[]);
		let window = MockWindow {
			handle: 1000,
			buffer: 1,
			width: DEFAULT_WIDTH,
			height: DEFAULT_HEIGHT,
			options: default_window_options(),
		};
		Self {
			state: Mutex::new(State {
				buffers: vec![buffer],
				windows: vec![window],
				current_buffer: 1,
				current_window: 1000,
				next_buffer: 2,
				next_window: 1001,
				vars: HashMap::new(),
				cwd: "/work".to_string(),
				register: String::new(),
				inputs: VecDeque::new(),
				messages: Vec::new(),
				error_messages: Vec::new(),
				calls: Vec::new(),
				fail_commands_containing: None,
				fail_option_named: None,
				fail_set_lines: false,
			}),
		}
	}

	pub fn add_buffer(&self, name: &str, lines: &[&str]) -> BufferHandle {
		let mut state = self.state.lock();
		let handle = state.next_buffer;
		state.next_buffer += 1;
		state.buffers.push(MockBuffer::new(handle, name, lines));
		BufferHandle(handle)
	}

	pub fn add_window(&self, buffer: BufferHandle) -> WindowHandle {
		let mut state = self.state.lock();
		let handle = state.next_window;
		state.next_window += 1;
		state.windows.push(MockWindow {
			handle,
			buffer: buffer.0,
			width: DEFAULT_WIDTH,
			height: DEFAULT_HEIGHT,
			options: default_window_options(),
		});
		WindowHandle(handle)
	}

	pub fn remove_buffer(&self, buffer: BufferHandle) {
		let mut state = self.state.lock();
		state.buffers.retain(|b| b.handle != buffer.0);
	}

	pub fn remove_window(&self, window: WindowHandle) {
		let mut state = self.state.lock();
		state.windows.retain(|w| w.handle != window.0);
	}

	pub fn set_cursor_state(&self, buffer: BufferHandle, line: i64, column: i64) {
		let mut state = self.state.lock();
		state.buffer_mut(buffer).unwrap().cursor = (line, column);
	}

	pub fn set_selection_state(
		&self,
		buffer: BufferHandle,
		start: (i64, i64),
		end: (i64, i64),
	) {
		let mut state = self.state.lock();
		let b = state.buffer_mut(buffer).unwrap();
		b.select_start = start;
		b.select_end = end;
	}

	/// Plants an option value directly, bypassing kind checks; used to make
	/// the host reply with an unexpected kind.
	pub fn plant_buffer_option(&self, buffer: BufferHandle, name: &str, value: OptionValue) {
		let mut state = self.state.lock();
		state
			.buffer_mut(buffer)
			.unwrap()
			.options
			.insert(name.to_string(), value);
	}

	pub fn push_input(&self, reply: &str) {
		self.state.lock().inputs.push_back(reply.to_string());
	}

	pub fn fail_commands_containing(&self, needle: &str) {
		self.state.lock().fail_commands_containing = Some(needle.to_string());
	}

	pub fn fail_option_named(&self, name: &str) {
		self.state.lock().fail_option_named = Some(name.to_string());
	}

	/// Makes every subsequent line replacement fail.
	pub fn fail_set_lines(&self) {
		self.state.lock().fail_set_lines = true;
	}

	pub fn calls(&self) -> Vec<String> {
		self.state.lock().calls.clone()
	}

	pub fn calls_matching(&self, prefix: &str) -> usize {
		self.state
			.lock()
			.calls
			.iter()
			.filter(|call| call.starts_with(prefix))
			.count()
	}

	pub fn buffer_lines(&self, buffer: BufferHandle) -> Vec<String> {
		self.state.lock().buffer(buffer).unwrap().lines.clone()
	}

	pub fn buffer_option_value(&self, buffer: BufferHandle, name: &str) -> OptionValue {
		self.state
			.lock()
			.buffer(buffer)
			.unwrap()
			.options
			.get(name)
			.unwrap()
			.clone()
	}

	pub fn window_size(&self, window: WindowHandle) -> (i64, i64) {
		let state = self.state.lock();
		let w = state.window(window).unwrap();
		(w.width, w.height)
	}

	pub fn window_name(&self, window: WindowHandle) -> String {
		let state = self.state.lock();
		let w = state.window(window).unwrap();
		state
			.buffers
			.iter()
			.find(|b| b.handle == w.buffer)
			.unwrap()
			.name
			.clone()
	}

	pub fn messages(&self) -> Vec<String> {
		self.state.lock().messages.clone()
	}

	pub fn error_messages(&self) -> Vec<String> {
		self.state.lock().error_messages.clone()
	}

	pub fn register(&self) -> String {
		self.state.lock().register.clone()
	}
}

impl State {
	fn buffer(&self, handle: BufferHandle) -> Result<&MockBuffer> {
		self.buffers
			.iter()
			.find(|b| b.handle == handle.0)
			.ok_or(Error::InvalidHandle)
	}

	fn buffer_mut(&mut self, handle: BufferHandle) -> Result<&mut MockBuffer> {
		self.buffers
			.iter_mut()
			.find(|b| b.handle == handle.0)
			.ok_or(Error::InvalidHandle)
	}

	fn window(&self, handle: WindowHandle) -> Result<&MockWindow> {
		self.windows
			.iter()
			.find(|w| w.handle == handle.0)
			.ok_or(Error::InvalidHandle)
	}

	fn window_mut(&mut self, handle: WindowHandle) -> Result<&mut MockWindow> {
		self.windows
			.iter_mut()
			.find(|w| w.handle == handle.0)
			.ok_or(Error::InvalidHandle)
	}

	fn current_buffer_mut(&mut self) -> Result<&mut MockBuffer> {
		let current = BufferHandle(self.current_buffer);
		self.buffer_mut(current)
	}

	fn interpret(&mut self, cmd: &str) -> Result<String> {
		if let Some(needle) = &self.fail_commands_containing
			&& cmd.contains(needle.as_str())
		{
			return Err(Error::Command(cmd.to_string()));
		}

		let cmd = cmd.strip_prefix("silent ").unwrap_or(cmd);

		if cmd == "pwd" {
			return Ok(format!("{}\n", self.cwd));
		}

		if let Some(rest) = cmd.strip_prefix("echo getpos(") {
			let mark = rest.trim_end_matches(')');
			let buffer = self.current_buffer_mut()?;
			let (line, column) = if mark.contains('.') {
				buffer.cursor
			} else if mark.contains("'<") {
				buffer.select_start
			} else if mark.contains("'>") {
				buffer.select_end
			} else {
				return Err(Error::Command(format!("unknown mark: {mark}")));
			};
			return Ok(format!("[{}, {line}, {column}, 0]\n", buffer.handle));
		}

		if let Some(rest) = cmd.strip_prefix("call setpos('.', [") {
			let fields: Vec<i64> = rest
				.trim_end_matches("])")
				.split(", ")
				.map(|f| f.parse().map_err(|_| Error::Command(cmd.to_string())))
				.collect::<Result<_>>()?;
			if fields.len() != 4 {
				return Err(Error::Command(cmd.to_string()));
			}
			let buffer = self.current_buffer_mut()?;
			buffer.cursor = (fields[1], fields[2]);
			return Ok(String::new());
		}

		if let Some(file_type) = cmd.strip_prefix("set filetype=") {
			let value = OptionValue::Str(file_type.to_string());
			self.current_buffer_mut()?
				.options
				.insert("filetype".to_string(), value);
			return Ok(String::new());
		}

		if let Some(rest) = cmd.strip_prefix("edit `='") {
			let name = rest.trim_end_matches("'`").to_string();
			let handle = self.next_buffer;
			self.next_buffer += 1;
			self.buffers.push(MockBuffer::new(handle, &name, &[]));
			let current = WindowHandle(self.current_window);
			self.window_mut(current)?.buffer = handle;
			self.current_buffer = handle;
			return Ok(String::new());
		}

		if cmd == "quit" {
			let current = self.current_window;
			self.windows.retain(|w| w.handle != current);
			let next = self
				.windows
				.first()
				.ok_or_else(|| Error::Command("cannot close last window".to_string()))?;
			self.current_window = next.handle;
			self.current_buffer = next.buffer;
			return Ok(String::new());
		}

		if cmd.starts_with("vertical ") || cmd.starts_with("horizontal ") {
			return self.interpret_split(cmd);
		}

		if cmd.starts_with("echo input(") {
			let reply = self.inputs.pop_front().unwrap_or_default();
			return Ok(format!("{reply}\n"));
		}

		if let Some(rest) = cmd.strip_prefix("let @+ = \"") {
			self.register = rest.trim_end_matches('"').to_string();
			return Ok(String::new());
		}

		Err(Error::Command(format!("unknown command: {cmd}")))
	}

	fn interpret_split(&mut self, cmd: &str) -> Result<String> {
		let mut parts = cmd.split_whitespace();
		let direction = parts.next().unwrap_or_default();
		let _anchor = parts.next().unwrap_or_default();
		let split = parts
			.next()
			.ok_or_else(|| Error::Command(cmd.to_string()))?;
		let count: i64 = split
			.strip_suffix("split")
			.ok_or_else(|| Error::Command(cmd.to_string()))?
			.parse()
			.unwrap_or(0);
		let name = parts.collect::<Vec<_>>().join(" ");

		let buffer = self.next_buffer;
		self.next_buffer += 1;
		self.buffers.push(MockBuffer::new(buffer, &name, &[]));

		let handle = self.next_window;
		self.next_window += 1;
		let (width, height) = match (direction, count) {
			("vertical", c) if c > 0 => (c, DEFAULT_HEIGHT),
			("horizontal", c) if c > 0 => (DEFAULT_WIDTH, c),
			_ => (DEFAULT_WIDTH, DEFAULT_HEIGHT),
		};
		self.windows.push(MockWindow {
			handle,
			buffer,
			width,
			height,
			options: default_window_options(),
		});
		self.current_window = handle;
		self.current_buffer = buffer;
		Ok(String::new())
	}
}

impl Host for MockHost {
	fn command(&self, cmd: &str) -> Result<()> {
		let mut state = self.state.lock();
		state.calls.push(format!("command({cmd})"));
		state.interpret(cmd).map(|_| ())
	}

	fn command_output(&self, cmd: &str) -> Result<String> {
		let mut state = self.state.lock();
		state.calls.push(format!("command_output({cmd})"));
		state.interpret(cmd)
	}

	fn current_buffer(&self) -> Result<BufferHandle> {
		Ok(BufferHandle(self.state.lock().current_buffer))
	}

	fn set_current_buffer(&self, buffer: BufferHandle) -> Result<()> {
		let mut state = self.state.lock();
		state.calls.push(format!("set_current_buffer({})", buffer.0));
		state.buffer(buffer)?;
		state.current_buffer = buffer.0;
		Ok(())
	}

	fn current_window(&self) -> Result<WindowHandle> {
		Ok(WindowHandle(self.state.lock().current_window))
	}

	fn set_current_window(&self, window: WindowHandle) -> Result<()> {
		let mut state = self.state.lock();
		state.calls.push(format!("set_current_window({})", window.0));
		state.window(window)?;
		state.current_window = window.0;
		state.current_buffer = state.window(window)?.buffer;
		Ok(())
	}

	fn buffers(&self) -> Result<Vec<BufferHandle>> {
		Ok(self
			.state
			.lock()
			.buffers
			.iter()
			.map(|b| BufferHandle(b.handle))
			.collect())
	}

	fn buffer_is_valid(&self, buffer: BufferHandle) -> Result<bool> {
		Ok(self.state.lock().buffer(buffer).is_ok())
	}

	fn buffer_name(&self, buffer: BufferHandle) -> Result<String> {
		Ok(self.state.lock().buffer(buffer)?.name.clone())
	}

	fn set_buffer_name(&self, buffer: BufferHandle, name: &str) -> Result<()> {
		let mut state = self.state.lock();
		state.buffer_mut(buffer)?.name = name.to_string();
		Ok(())
	}

	fn buffer_line_count(&self, buffer: BufferHandle) -> Result<i64> {
		Ok(self.state.lock().buffer(buffer)?.lines.len() as i64)
	}

	fn set_buffer_lines(
		&self,
		buffer: BufferHandle,
		start: i64,
		end: i64,
		strict: bool,
		lines: &[String],
	) -> Result<()> {
		let mut state = self.state.lock();
		state
			.calls
			.push(format!("set_buffer_lines({}, {start}, {end})", buffer.0));
		if state.fail_set_lines {
			return Err(Error::Command("line replacement rejected".to_string()));
		}
		let stored = &mut state.buffer_mut(buffer)?.lines;
		let len = stored.len() as i64;
		if strict && (start < 0 || end > len || start > end) {
			return Err(Error::Command(format!(
				"line range {start}..{end} out of bounds"
			)));
		}
		stored.splice(start as usize..end as usize, lines.iter().cloned());
		Ok(())
	}

	fn buffer_option(&self, buffer: BufferHandle, name: &str) -> Result<OptionValue> {
		let state = self.state.lock();
		state
			.buffer(buffer)?
			.options
			.get(name)
			.cloned()
			.ok_or_else(|| Error::Command(format!("unknown option: {name}")))
	}

	fn set_buffer_option(
		&self,
		buffer: BufferHandle,
		name: &str,
		value: OptionValue,
	) -> Result<()> {
		let mut state = self.state.lock();
		state
			.calls
			.push(format!("set_buffer_option({}, {name})", buffer.0));
		if state.fail_option_named.as_deref() == Some(name) {
			return Err(Error::Command(format!("option write rejected: {name}")));
		}
		state
			.buffer_mut(buffer)?
			.options
			.insert(name.to_string(), value);
		Ok(())
	}

	fn windows(&self) -> Result<Vec<WindowHandle>> {
		Ok(self
			.state
			.lock()
			.windows
			.iter()
			.map(|w| WindowHandle(w.handle))
			.collect())
	}

	fn window_is_valid(&self, window: WindowHandle) -> Result<bool> {
		Ok(self.state.lock().window(window).is_ok())
	}

	fn window_buffer(&self, window: WindowHandle) -> Result<BufferHandle> {
		Ok(BufferHandle(self.state.lock().window(window)?.buffer))
	}

	fn set_window_width(&self, window: WindowHandle, width: i64) -> Result<()> {
		let mut state = self.state.lock();
		state
			.calls
			.push(format!("set_window_width({}, {width})", window.0));
		state.window_mut(window)?.width = width;
		Ok(())
	}

	fn set_window_height(&self, window: WindowHandle, height: i64) -> Result<()> {
		let mut state = self.state.lock();
		state
			.calls
			.push(format!("set_window_height({}, {height})", window.0));
		state.window_mut(window)?.height = height;
		Ok(())
	}

	fn window_option(&self, window: WindowHandle, name: &str) -> Result<OptionValue> {
		let state = self.state.lock();
		state
			.window(window)?
			.options
			.get(name)
			.cloned()
			.ok_or_else(|| Error::Command(format!("unknown option: {name}")))
	}

	fn set_window_option(
		&self,
		window: WindowHandle,
		name: &str,
		value: OptionValue,
	) -> Result<()> {
		let mut state = self.state.lock();
		state
			.calls
			.push(format!("set_window_option({}, {name})", window.0));
		if state.fail_option_named.as_deref() == Some(name) {
			return Err(Error::Command(format!("option write rejected: {name}")));
		}
		state
			.window_mut(window)?
			.options
			.insert(name.to_string(), value);
		Ok(())
	}

	fn var(&self, name: &str) -> Result<Value> {
		self.state
			.lock()
			.vars
			.get(name)
			.cloned()
			.ok_or_else(|| Error::Command(format!("undefined variable: {name}")))
	}

	fn set_var(&self, name: &str, value: Value) -> Result<()> {
		self.state.lock().vars.insert(name.to_string(), value);
		Ok(())
	}

	fn set_current_directory(&self, dir: &str) -> Result<()> {
		self.state.lock().cwd = dir.to_string();
		Ok(())
	}

	fn write_out(&self, text: &str) -> Result<()> {
		self.state.lock().messages.push(text.to_string());
		Ok(())
	}

	fn write_err(&self, text: &str) -> Result<()> {
		self.state.lock().error_messages.push(text.to_string());
		Ok(())
	}
}
