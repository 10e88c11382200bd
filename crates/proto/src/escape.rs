//! Quoting helper for text interpolated into host commands.

/// Backslash-escapes embedded double and single quotes.
///
/// Any caller-supplied text that ends up inside a quoted argument of a host
/// command must pass through here first: an unescaped quote terminates the
/// argument early and the remainder is executed as command syntax.
#[must_use]
pub fn escape(text: &str) -> String {
	let mut out = String::with_capacity(text.len());
	for c in text.chars() {
		if c == '"' || c == '\'' {
			out.push('\\');
		}
		out.push(c);
	}
	out
}
