use crate::error::{ProtofixError, Result};
use regex::Regex;

/// Parsed substitution command (sed-like syntax).
#[derive(Debug)]
pub struct Substitution {
	/// The pattern to match.
	pub pattern: Regex,

	/// The replacement string.
	pub replacement: String,

	/// Whether to replace all occurrences (global flag).
	pub global: bool,
}

impl Substitution {
	/// Parse a substitution string in sed-like format: "s/pattern/replacement/" or "s/pattern/replacement/g"
	pub fn parse(input: &str) -> Result<Self> {
		let invalid = |reason: &str| ProtofixError::InvalidSubstitution {
			input: input.to_string(),
			reason: reason.to_string(),
		};

		let Some(rest) = input.strip_prefix('s') else {
			return Err(invalid("substitution must start with 's'"));
		};

		// Get the delimiter (character after 's')
		let mut chars = rest.chars();
		let Some(delimiter) = chars.next() else {
			return Err(invalid("substitution too short"));
		};

		let parts = split_by_delimiter(chars.as_str(), delimiter);

		if parts.len() < 2 {
			return Err(invalid("substitution must have pattern and replacement"));
		}

		let pattern_str = &parts[0];
		let replacement = parts[1].clone();
		let flags = parts.get(2).map(String::as_str).unwrap_or("");

		if let Some(flag) = flags.chars().find(|c| *c != 'g') {
			return Err(invalid(&format!("unknown flag '{flag}'")));
		}

		let pattern = Regex::new(pattern_str).map_err(|source| ProtofixError::InvalidRegex {
			pattern: pattern_str.to_string(),
			source,
		})?;

		Ok(Substitution {
			pattern,
			replacement,
			global: flags.contains('g'),
		})
	}

	/// Apply this substitution to a string.
	pub fn apply(&self, input: &str) -> String {
		if self.global {
			self.pattern
				.replace_all(input, self.replacement.as_str())
				.into_owned()
		} else {
			self.pattern
				.replace(input, self.replacement.as_str())
				.into_owned()
		}
	}
}

/// Split a string by a delimiter, respecting backslash escapes.
fn split_by_delimiter(input: &str, delimiter: char) -> Vec<String> {
	let mut parts = Vec::new();
	let mut current = String::new();
	let mut chars = input.chars().peekable();

	while let Some(c) = chars.next() {
		if c == '\\' && chars.peek() == Some(&delimiter) {
			// Escaped delimiter is kept literally
			current.push(delimiter);
			chars.next();
		} else if c == delimiter {
			parts.push(std::mem::take(&mut current));
		} else {
			current.push(c);
		}
	}

	// Trailing delimiter leaves an empty flags part, same as sed
	parts.push(current);

	parts
}
