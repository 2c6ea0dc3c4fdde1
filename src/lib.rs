//! Protofix - copy a tree of `.proto` files and patch it before schema compilation.
//!
//! This library provides the core functionality for protofix, including:
//! - Rule set parsing, with a built-in set for the known proto workarounds
//! - Recursive tree copy into a scratch destination
//! - Line-oriented literal, regex, and JSON-example rewrites
//!
//! # Example
//!
//! ```no_run
//! use protofix::config::default_rules;
//! use protofix::patch::run;
//! use std::path::Path;
//!
//! let rules = default_rules().unwrap();
//! let report = run(Path::new("protos"), Path::new("/tmp/protos"), &rules).unwrap();
//!
//! for path in &report.files_patched {
//!     println!("patched {}", path.display());
//! }
//! ```

pub mod config;
pub mod copy;
pub mod error;
pub mod patch;
pub mod rules;

pub use error::{ProtofixError, Result};
