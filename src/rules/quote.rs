use crate::error::{ProtofixError, Result};
use regex::{Captures, Regex};

/// `example: {value: '{...}'};` at the end of a line.
///
/// The payload is taken up to the first `}'` that is followed by `};` at end
/// of line, so a payload containing `'};` itself is not supported.
const EXAMPLE_VALUE: &str = r"example:\s*\{value:\s*'(\{.*?\})'\s*\};$";

/// Rewrites a single-quoted JSON example option into a double-quoted string.
///
/// `example: {value: '{"a": "b"}'};` becomes `example: "{\"a\": \"b\"}";`.
#[derive(Debug)]
pub struct ExampleQuoter {
	pattern: Regex,
}

impl ExampleQuoter {
	pub fn new() -> Result<Self> {
		let pattern = Regex::new(EXAMPLE_VALUE).map_err(|source| ProtofixError::InvalidRegex {
			pattern: EXAMPLE_VALUE.to_string(),
			source,
		})?;
		Ok(ExampleQuoter { pattern })
	}

	/// Lines that don't end in the example shape are returned unchanged.
	pub fn apply(&self, line: &str) -> String {
		self.pattern
			.replace(line, |caps: &Captures| {
				format!("example: \"{}\";", escape_quotes(&caps[1]))
			})
			.into_owned()
	}
}

/// Backslash-escape single and double quotes.
fn escape_quotes(payload: &str) -> String {
	payload.replace('\'', "\\'").replace('"', "\\\"")
}
