use crate::config::types::RuleSet;
use crate::error::{ProtofixError, Result};
use std::path::Path;

/// Built-in rules, compiled into the binary.
pub const DEFAULT_RULES: &str = include_str!("../../rules/default.toml");

/// Parse a rule set from a string; `path` only labels errors.
pub fn parse_rules_str(content: &str, path: &Path) -> Result<RuleSet> {
	let rule_set: RuleSet =
		toml::from_str(content).map_err(|source| ProtofixError::RulesParseError {
			path: path.to_path_buf(),
			source,
		})?;

	rule_set.validate()?;

	Ok(rule_set)
}

/// The built-in rule set.
pub fn default_rules() -> Result<RuleSet> {
	parse_rules_str(DEFAULT_RULES, Path::new("<built-in>"))
}
