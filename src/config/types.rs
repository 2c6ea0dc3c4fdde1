use crate::error::ProtofixError;
use serde::Deserialize;

/// Top-level rule set, parsed from the built-in rule table.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RuleSet {
	/// Rules applied in order after the tree copy.
	#[serde(default)]
	pub rules: Vec<Rule>,
}

/// A named set of edits applied to a group of files.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Rule {
	/// Name shown in logs and `--list-rules`.
	pub name: String,

	/// Files relative to the destination root (mutually exclusive with glob).
	/// Every listed file must exist.
	#[serde(default)]
	pub files: Option<Vec<String>>,

	/// Glob matched against paths relative to the destination root (mutually exclusive with files).
	#[serde(default)]
	pub glob: Option<String>,

	/// Literal replacements, every occurrence, in order.
	#[serde(default)]
	pub replace: Vec<Replacement>,

	/// Regex substitutions in sed-like format: "s/pattern/replacement/" or "s/pattern/replacement/g".
	#[serde(default)]
	pub substitute: Vec<String>,

	/// Turn `example: {value: '{...}'};` into a double-quoted string literal.
	#[serde(default)]
	pub quote_examples: bool,
}

/// A literal substring replacement.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Replacement {
	pub from: String,
	pub to: String,
}

impl Rule {
	/// Validate the target selector and that the rule does something.
	pub fn validate(&self) -> Result<(), ProtofixError> {
		if self.name.trim().is_empty() {
			return Err(ProtofixError::BlankRuleName);
		}

		match (&self.files, &self.glob) {
			(Some(_), Some(_)) => {
				return Err(ProtofixError::MutuallyExclusive {
					rule: self.name.clone(),
					option1: "files".to_string(),
					option2: "glob".to_string(),
				});
			}
			(None, None) => {
				return Err(ProtofixError::MissingTarget {
					rule: self.name.clone(),
				});
			}
			_ => {}
		}

		if self.replace.is_empty() && self.substitute.is_empty() && !self.quote_examples {
			return Err(ProtofixError::EmptyRule {
				rule: self.name.clone(),
			});
		}

		Ok(())
	}
}

impl RuleSet {
	/// Validate all rules in this set.
	pub fn validate(&self) -> Result<(), ProtofixError> {
		for rule in &self.rules {
			rule.validate()?;
		}
		Ok(())
	}
}
