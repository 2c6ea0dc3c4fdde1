//! Rule compilation and line rewriting for protofix.
//!
//! This module handles:
//! - Resolving which files a rule targets under the destination root
//! - Literal and sed-like regex substitutions
//! - Quoting of JSON example options

pub mod matcher;
pub mod quote;
pub mod rewriter;

pub use matcher::{CompiledRule, Target, compile_rules};
pub use quote::ExampleQuoter;
pub use rewriter::Substitution;
