//! Recursive directory copy.
//!
//! Same-named files already in the destination are overwritten; anything else
//! already there is left alone.

use crate::error::{ProtofixError, Result};
use std::fs;
use std::path::Path;
use tracing::debug;
use walkdir::WalkDir;

/// Copy every file and directory under `source` into `destination`.
///
/// Symlinks are followed, so the destination receives regular files.
/// Returns the number of files copied.
pub fn copy_tree(source: &Path, destination: &Path) -> Result<usize> {
	let mut copied = 0;

	for entry in WalkDir::new(source)
		.follow_links(true)
		.sort_by_file_name()
		.min_depth(1)
	{
		let entry = entry.map_err(|source_err| ProtofixError::WalkFailed {
			root: source.to_path_buf(),
			source: source_err,
		})?;

		let Ok(rel) = entry.path().strip_prefix(source) else {
			continue;
		};
		let target = destination.join(rel);

		if entry.file_type().is_dir() {
			fs::create_dir_all(&target).map_err(|e| ProtofixError::CopyFailed {
				from: entry.path().to_path_buf(),
				to: target.clone(),
				source: e,
			})?;
			continue;
		}

		if let Some(parent) = target.parent() {
			fs::create_dir_all(parent).map_err(|e| ProtofixError::CopyFailed {
				from: entry.path().to_path_buf(),
				to: parent.to_path_buf(),
				source: e,
			})?;
		}

		debug!(from = %entry.path().display(), to = %target.display(), "copying file");
		fs::copy(entry.path(), &target).map_err(|e| ProtofixError::CopyFailed {
			from: entry.path().to_path_buf(),
			to: target.clone(),
			source: e,
		})?;
		copied += 1;
	}

	Ok(copied)
}
