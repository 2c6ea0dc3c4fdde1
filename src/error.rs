use std::path::PathBuf;

/// Library-level structured errors for protofix.
///
/// Use `thiserror` for structured errors that library consumers can match on.
/// The CLI binary wraps these with `anyhow` for rich context chains.
#[derive(Debug, thiserror::Error)]
pub enum ProtofixError {
	#[error("The {role} argument must not be blank")]
	BlankArgument { role: &'static str },

	#[error("The source protos directory not found: {path}")]
	SourceNotDirectory { path: PathBuf },

	#[error("The protos destination directory not found: {path}")]
	DestinationNotDirectory { path: PathBuf },

	#[error("Failed to copy {from} to {to}")]
	CopyFailed {
		from: PathBuf,
		to: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to walk directory: {root}")]
	WalkFailed {
		root: PathBuf,
		#[source]
		source: walkdir::Error,
	},

	#[error("Failed to read file: {path}")]
	ReadFailed {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to write file: {path}")]
	WriteFailed {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Rule '{rule}' targets a file that does not exist: {path}")]
	TargetNotFound { rule: String, path: PathBuf },

	#[error("Failed to parse rules: {path}")]
	RulesParseError {
		path: PathBuf,
		#[source]
		source: toml::de::Error,
	},

	#[error("Invalid regex pattern in rule: {pattern}")]
	InvalidRegex {
		pattern: String,
		#[source]
		source: regex::Error,
	},

	#[error("Invalid glob pattern in rule: {pattern}")]
	InvalidGlob {
		pattern: String,
		#[source]
		source: glob::PatternError,
	},

	#[error("Invalid substitution '{input}': {reason}")]
	InvalidSubstitution { input: String, reason: String },

	#[error("Mutually exclusive options in rule '{rule}': {option1} and {option2}")]
	MutuallyExclusive {
		rule: String,
		option1: String,
		option2: String,
	},

	#[error("Rule '{rule}' must set one of `files` or `glob`")]
	MissingTarget { rule: String },

	#[error("Rule '{rule}' has no edits")]
	EmptyRule { rule: String },

	#[error("Every rule needs a non-blank name")]
	BlankRuleName,
}

/// Result type alias using ProtofixError.
pub type Result<T> = std::result::Result<T, ProtofixError>;
