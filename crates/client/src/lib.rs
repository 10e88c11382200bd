//! Entity layer over a remote text-editing host.
//!
//! The host executes commands against process-global "current buffer" and
//! "current window" registers, so targeting a specific entity means writing
//! those registers and writing them back afterwards. This crate hides that
//! discipline behind entities:
//!
//! * [`Host`] — the synchronous connection capability a transport implements
//! * [`focus::with_focus`] — the scoped focus switch every privileged
//!   operation goes through
//! * [`Buffer`] / [`Window`] — entities over opaque host handles
//! * [`Session`] — variables, prompts, window creation, enumeration
//! * [`options`] — ordered schema tables synchronizing typed settings
//!
//! Calls are strict request/reply on a single logical channel. The crate
//! introduces no concurrency of its own and assumes one in-flight caller:
//! two focus-dependent operations racing each other would corrupt the very
//! registers this layer exists to protect. Bounded waits and retries, where
//! needed, belong to the caller.

pub mod buffer;
pub mod error;
pub mod focus;
pub mod host;
pub mod options;
pub mod session;
pub mod window;

pub use buffer::{BUFFER_OPTIONS, Buffer, BufferOptions};
pub use error::{Error, Result};
pub use focus::{FocusTarget, with_focus};
pub use host::{BufferHandle, Host, Value, WindowHandle};
pub use options::{
	FieldMut, OptionField, OptionKind, OptionScope, OptionValue, read_options, write_options,
};
pub use session::{Completion, Session, WindowDirection, WindowPosition};
pub use window::{WINDOW_OPTIONS, Window, WindowOptions};
