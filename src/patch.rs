//! Copy a proto tree and apply the rule set to the copy.
//!
//! The run order is fixed: argument validation, rule compilation, full tree
//! copy, then every rule in order. Nothing under the destination is touched
//! until validation and compilation have succeeded.

use crate::config::types::RuleSet;
use crate::copy::copy_tree;
use crate::error::{ProtofixError, Result};
use crate::rules::{CompiledRule, compile_rules};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Summary of a completed run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatchReport {
	/// Files copied from the source tree.
	pub files_copied: usize,

	/// Distinct destination files whose content changed.
	pub files_patched: BTreeSet<PathBuf>,
}

/// Check that both arguments are non-blank and name existing directories.
pub fn validate_dirs(source: &Path, destination: &Path) -> Result<()> {
	if is_blank(source) {
		return Err(ProtofixError::BlankArgument { role: "source" });
	}
	if is_blank(destination) {
		return Err(ProtofixError::BlankArgument {
			role: "destination",
		});
	}
	if !source.is_dir() {
		return Err(ProtofixError::SourceNotDirectory {
			path: source.to_path_buf(),
		});
	}
	if !destination.is_dir() {
		return Err(ProtofixError::DestinationNotDirectory {
			path: destination.to_path_buf(),
		});
	}
	Ok(())
}

fn is_blank(path: &Path) -> bool {
	path.as_os_str().to_string_lossy().trim().is_empty()
}

/// Copy `source` into `destination` and apply `rule_set` to the copy.
pub fn run(source: &Path, destination: &Path, rule_set: &RuleSet) -> Result<PatchReport> {
	validate_dirs(source, destination)?;
	let rules = compile_rules(rule_set)?;

	let files_copied = copy_tree(source, destination)?;
	info!(
		source = %source.display(),
		destination = %destination.display(),
		files = files_copied,
		"copied proto tree"
	);

	let files_patched = apply_rules(destination, &rules)?;

	Ok(PatchReport {
		files_copied,
		files_patched,
	})
}

/// Apply compiled rules in order to the tree under `root`.
///
/// Returns the set of files whose content changed.
pub fn apply_rules(root: &Path, rules: &[CompiledRule]) -> Result<BTreeSet<PathBuf>> {
	let mut patched = BTreeSet::new();

	for rule in rules {
		debug!(rule = %rule.name, "applying rule");
		for path in rule.resolve_targets(root)? {
			if patch_file(&path, rule)? {
				info!(rule = %rule.name, file = %path.display(), "patched");
				patched.insert(path);
			}
		}
	}

	Ok(patched)
}

/// Rewrite one file line by line with `rule`.
///
/// The file is written back only when its content changed. Returns whether it did.
pub fn patch_file(path: &Path, rule: &CompiledRule) -> Result<bool> {
	let content = fs::read_to_string(path).map_err(|source| ProtofixError::ReadFailed {
		path: path.to_path_buf(),
		source,
	})?;

	let rewritten = rewrite_lines(&content, |line| rule.apply_line(line));
	if rewritten == content {
		debug!(file = %path.display(), "unchanged");
		return Ok(false);
	}

	fs::write(path, rewritten).map_err(|source| ProtofixError::WriteFailed {
		path: path.to_path_buf(),
		source,
	})?;
	Ok(true)
}

/// Apply `edit` to every line body, keeping each line's terminator as-is.
pub fn rewrite_lines(content: &str, mut edit: impl FnMut(&str) -> String) -> String {
	let mut out = String::with_capacity(content.len());

	for line in content.split_inclusive('\n') {
		let (body, ending) = split_line_ending(line);
		out.push_str(&edit(body));
		out.push_str(ending);
	}

	out
}

fn split_line_ending(line: &str) -> (&str, &str) {
	if let Some(body) = line.strip_suffix("\r\n") {
		(body, "\r\n")
	} else if let Some(body) = line.strip_suffix('\n') {
		(body, "\n")
	} else {
		(line, "")
	}
}
