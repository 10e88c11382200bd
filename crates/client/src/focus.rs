//! Scoped switching of the host's global focus registers.
//!
//! Host command execution is global: a command acts on whatever the
//! current-buffer/current-window registers point at. Targeting a specific
//! entity therefore means writing the register, acting, and putting the
//! register back — on every exit path. This module is the one place that
//! discipline lives; entities never hand-roll it.

use std::fmt;

use crate::error::Result;
use crate::host::{BufferHandle, Host, WindowHandle};

/// An entity kind the host tracks a current-focus register for.
///
/// Each implementation binds the generic switch to that kind's get-current
/// and set-current host calls.
pub trait FocusTarget: Copy + fmt::Debug {
	/// Human-readable kind tag for log lines.
	const KIND: &'static str;

	/// Reads the host register for this entity kind.
	fn current(host: &dyn Host) -> Result<Self>;

	/// Writes the host register for this entity kind.
	fn focus(self, host: &dyn Host) -> Result<()>;
}

impl FocusTarget for BufferHandle {
	const KIND: &'static str = "buffer";

	fn current(host: &dyn Host) -> Result<Self> {
		host.current_buffer()
	}

	fn focus(self, host: &dyn Host) -> Result<()> {
		host.set_current_buffer(self)
	}
}

impl FocusTarget for WindowHandle {
	const KIND: &'static str = "window";

	fn current(host: &dyn Host) -> Result<Self> {
		host.current_window()
	}

	fn focus(self, host: &dyn Host) -> Result<()> {
		host.set_current_window(self)
	}
}

/// Makes `target` current, runs `action`, then restores the focus recorded
/// on entry — whether the action succeeded or not.
///
/// Nested calls behave as a stack even though each level remembers a single
/// handle: an inner switch records and restores the focus its caller set, so
/// unwinding lands every level back where it started.
///
/// A failed restoration must not mask the action's own result; it is logged
/// at `warn` and swallowed. Whether it should instead surface as a secondary
/// error is an open question (see DESIGN.md).
pub fn with_focus<T, R>(
	host: &dyn Host,
	target: T,
	action: impl FnOnce() -> Result<R>,
) -> Result<R>
where
	T: FocusTarget,
{
	let prev = T::current(host)?;
	tracing::trace!(kind = T::KIND, ?target, ?prev, "switching focus");
	target.focus(host)?;
	let result = action();
	if let Err(err) = prev.focus(host) {
		tracing::warn!(kind = T::KIND, ?prev, %err, "failed to restore focus");
	}
	result
}
