//! The built-in rule set for protofix.
//!
//! This module handles:
//! - TOML rule table parsing
//! - Rule validation
//! - The built-in rule set

pub mod parser;
pub mod types;

pub use parser::{DEFAULT_RULES, default_rules, parse_rules_str};
pub use types::{Replacement, Rule, RuleSet};
