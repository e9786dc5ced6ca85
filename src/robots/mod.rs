//! Robots.txt handling module
//!
//! This module provides the robots.txt rule reader, the rule types it
//! produces, and the cached snapshot a client keeps per site.

mod cache;
mod reader;
mod rules;

pub use cache::CachedRules;
pub use reader::{read_rules, read_rules_from, ReadError};
pub use rules::{DisallowRule, RuleSet};
