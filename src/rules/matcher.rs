use crate::config::types::{Replacement, Rule, RuleSet};
use crate::error::{ProtofixError, Result};
use crate::rules::quote::ExampleQuoter;
use crate::rules::rewriter::Substitution;
use glob::Pattern;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Which files under the destination root a rule applies to.
#[derive(Debug)]
pub enum Target {
	/// Named files relative to the root, all required to exist.
	Files(Vec<PathBuf>),

	/// Every regular file whose root-relative path matches the pattern.
	Glob(Pattern),
}

/// A compiled rule ready for applying.
#[derive(Debug)]
pub struct CompiledRule {
	/// The rule's name (for logging).
	pub name: String,

	/// Files the rule applies to.
	pub target: Target,

	/// Literal replacements, applied first.
	pub replacements: Vec<Replacement>,

	/// Regex substitutions, applied after the literal replacements.
	pub substitutions: Vec<Substitution>,

	/// Example quoting, applied last when enabled.
	pub quoter: Option<ExampleQuoter>,
}

impl CompiledRule {
	/// Compile a rule, parsing its substitutions and glob.
	pub fn from_rule(rule: &Rule) -> Result<Self> {
		rule.validate()?;

		let target = match (&rule.files, &rule.glob) {
			(Some(files), None) => Target::Files(files.iter().map(PathBuf::from).collect()),
			(None, Some(pattern)) => Target::Glob(compile_glob(pattern)?),
			// validate() already rejected both and neither
			_ => {
				return Err(ProtofixError::MissingTarget {
					rule: rule.name.clone(),
				});
			}
		};

		let substitutions = rule
			.substitute
			.iter()
			.map(|s| Substitution::parse(s))
			.collect::<Result<Vec<_>>>()?;

		let quoter = rule
			.quote_examples
			.then(ExampleQuoter::new)
			.transpose()?;

		Ok(CompiledRule {
			name: rule.name.clone(),
			target,
			replacements: rule.replace.clone(),
			substitutions,
			quoter,
		})
	}

	/// Apply every edit of this rule to one line (without its terminator).
	pub fn apply_line(&self, line: &str) -> String {
		let mut line = line.to_string();

		for replacement in &self.replacements {
			if line.contains(&replacement.from) {
				line = line.replace(&replacement.from, &replacement.to);
			}
		}

		for substitution in &self.substitutions {
			line = substitution.apply(&line);
		}

		if let Some(ref quoter) = self.quoter {
			line = quoter.apply(&line);
		}

		line
	}

	/// Resolve the files this rule applies to under `root`.
	///
	/// Named files keep their listed order; glob matches come back sorted.
	pub fn resolve_targets(&self, root: &Path) -> Result<Vec<PathBuf>> {
		match &self.target {
			Target::Files(files) => files
				.iter()
				.map(|rel| {
					let path = root.join(rel);
					if path.is_file() {
						Ok(path)
					} else {
						Err(ProtofixError::TargetNotFound {
							rule: self.name.clone(),
							path,
						})
					}
				})
				.collect(),
			Target::Glob(pattern) => {
				let mut matched = Vec::new();
				for entry in WalkDir::new(root).follow_links(true).sort_by_file_name() {
					let entry = entry.map_err(|source| ProtofixError::WalkFailed {
						root: root.to_path_buf(),
						source,
					})?;
					if !entry.file_type().is_file() {
						continue;
					}
					let Ok(rel) = entry.path().strip_prefix(root) else {
						continue;
					};
					if pattern.matches_path(rel) {
						matched.push(entry.path().to_path_buf());
					}
				}
				debug!(rule = %self.name, count = matched.len(), "glob matched files");
				Ok(matched)
			}
		}
	}
}

/// Compile a glob pattern string.
fn compile_glob(pattern: &str) -> Result<Pattern> {
	Pattern::new(pattern).map_err(|source| ProtofixError::InvalidGlob {
		pattern: pattern.to_string(),
		source,
	})
}

/// Compile all rules in a rule set.
pub fn compile_rules(rule_set: &RuleSet) -> Result<Vec<CompiledRule>> {
	rule_set.rules.iter().map(CompiledRule::from_rule).collect()
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::fs;

	fn glob_rule(pattern: &str) -> Rule {
		Rule {
			name: "test".to_string(),
			glob: Some(pattern.to_string()),
			quote_examples: true,
			..Default::default()
		}
	}

	#[test]
	fn test_compile_invalid_glob() {
		match CompiledRule::from_rule(&glob_rule("[invalid")).unwrap_err() {
			ProtofixError::InvalidGlob { pattern, .. } => assert_eq!(pattern, "[invalid"),
			other => panic!("Expected InvalidGlob error, got {other:?}"),
		}
	}

	#[test]
	fn test_compile_invalid_substitution() {
		let rule = Rule {
			substitute: vec!["s/[bad/x/".to_string()],
			..glob_rule("**/*.proto")
		};
		assert!(matches!(
			CompiledRule::from_rule(&rule),
			Err(ProtofixError::InvalidRegex { .. })
		));
	}

	#[test]
	fn test_quoter_only_when_enabled() {
		let rule = Rule {
			quote_examples: false,
			replace: vec![Replacement {
				from: "a".to_string(),
				to: "b".to_string(),
			}],
			..glob_rule("**/*.proto")
		};
		let compiled = CompiledRule::from_rule(&rule).unwrap();
		assert!(compiled.quoter.is_none());
		assert!(CompiledRule::from_rule(&glob_rule("*")).unwrap().quoter.is_some());
	}

	#[test]
	fn test_apply_line_edit_order() {
		let rule = Rule {
			replace: vec![Replacement {
				from: r#"import "protoc-gen-swagger/options/annotations.proto";"#.to_string(),
				to: r#"import "protoc-gen-openapiv2/options/annotations.proto";"#.to_string(),
			}],
			substitute: vec![r"s/\.protoc_gen_swagger\./.protoc_gen_openapiv2./g".to_string()],
			..glob_rule("**/*.proto")
		};
		let compiled = CompiledRule::from_rule(&rule).unwrap();

		assert_eq!(
			compiled.apply_line(r#"import "protoc-gen-swagger/options/annotations.proto";"#),
			r#"import "protoc-gen-openapiv2/options/annotations.proto";"#
		);
		assert_eq!(
			compiled.apply_line("option (grpc.gateway.protoc_gen_swagger.options.openapiv2_operation) = {"),
			"option (grpc.gateway.protoc_gen_openapiv2.options.openapiv2_operation) = {"
		);
		assert_eq!(
			compiled.apply_line(r#"example: {value: '{"a": "b"}'};"#),
			r#"example: "{\"a\": \"b\"}";"#
		);
		assert_eq!(compiled.apply_line("string name = 1;"), "string name = 1;");
	}

	#[test]
	fn test_replacements_apply_in_order() {
		let rule = Rule {
			replace: vec![
				Replacement {
					from: "a".to_string(),
					to: "b".to_string(),
				},
				Replacement {
					from: "b".to_string(),
					to: "c".to_string(),
				},
			],
			quote_examples: false,
			..glob_rule("*")
		};
		let compiled = CompiledRule::from_rule(&rule).unwrap();
		assert_eq!(compiled.apply_line("ab"), "cc");
	}

	#[test]
	fn test_glob_matches_nested_and_top_level() {
		let temp_dir = tempfile::tempdir().unwrap();
		let root = temp_dir.path();
		fs::create_dir_all(root.join("a/b")).unwrap();
		fs::write(root.join("top.proto"), "").unwrap();
		fs::write(root.join("a/b/deep.proto"), "").unwrap();
		fs::write(root.join("a/readme.md"), "").unwrap();

		let compiled = CompiledRule::from_rule(&glob_rule("**/*.proto")).unwrap();
		let targets = compiled.resolve_targets(root).unwrap();

		assert_eq!(
			targets,
			vec![root.join("a/b/deep.proto"), root.join("top.proto")]
		);
	}

	#[test]
	fn test_files_target_missing() {
		let temp_dir = tempfile::tempdir().unwrap();
		let rule = Rule {
			name: "android-enum".to_string(),
			files: Some(vec!["domain/domain.proto".to_string()]),
			quote_examples: true,
			..Default::default()
		};
		let compiled = CompiledRule::from_rule(&rule).unwrap();

		match compiled.resolve_targets(temp_dir.path()).unwrap_err() {
			ProtofixError::TargetNotFound { rule, path } => {
				assert_eq!(rule, "android-enum");
				assert_eq!(path, temp_dir.path().join("domain/domain.proto"));
			}
			other => panic!("Expected TargetNotFound error, got {other:?}"),
		}
	}

	#[test]
	fn test_files_target_keeps_order() {
		let temp_dir = tempfile::tempdir().unwrap();
		let root = temp_dir.path();
		fs::write(root.join("types.proto"), "").unwrap();
		fs::write(root.join("methods.proto"), "").unwrap();
		let rule = Rule {
			name: "pkg".to_string(),
			files: Some(vec!["types.proto".to_string(), "methods.proto".to_string()]),
			quote_examples: true,
			..Default::default()
		};
		let compiled = CompiledRule::from_rule(&rule).unwrap();

		assert_eq!(
			compiled.resolve_targets(root).unwrap(),
			vec![root.join("types.proto"), root.join("methods.proto")]
		);
	}

	#[test]
	fn test_compile_default_rules() {
		let rule_set = crate::config::default_rules().unwrap();
		let compiled = compile_rules(&rule_set).unwrap();
		assert_eq!(compiled.len(), 4);
		assert!(matches!(compiled[3].target, Target::Glob(_)));
	}
}
