//! Disallow rule types
//!
//! A [`DisallowRule`] is a path fragment taken from a `Disallow:` line with its
//! leading slash removed. A [`RuleSet`] is the ordered list of those rules for
//! one site.

use std::fmt;

/// A normalized path fragment from a `Disallow:` directive
///
/// Rules never begin with `/`. A URL is disallowed by a rule when the rule
/// appears anywhere in the URL's path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DisallowRule(String);

impl DisallowRule {
    /// Creates a rule from a raw directive value
    ///
    /// Surrounding whitespace is trimmed and exactly one leading `/` is removed.
    ///
    /// # Examples
    ///
    /// ```
    /// use robots_scope::DisallowRule;
    ///
    /// assert_eq!(DisallowRule::new(" /cgi-bin/ ").as_str(), "cgi-bin/");
    /// assert_eq!(DisallowRule::new("//twice").as_str(), "/twice");
    /// ```
    pub fn new(value: &str) -> Self {
        let value = value.trim();
        let value = value.strip_prefix('/').unwrap_or(value);
        Self(value.to_string())
    }

    /// The rule that matches every path
    fn sentinel() -> Self {
        Self(String::new())
    }

    /// Returns the rule text
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if this rule disallows the given URL path
    pub fn matches(&self, target: &str) -> bool {
        target.contains(self.0.as_str())
    }
}

impl fmt::Display for DisallowRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for DisallowRule {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Ordered disallow rules for a single site
///
/// Rules keep the order they appeared in robots.txt and are not deduplicated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleSet {
    rules: Vec<DisallowRule>,
}

impl RuleSet {
    /// Creates an empty rule set, which allows everything
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a rule set that disallows every path
    ///
    /// This holds a single empty rule, which is a substring of any target.
    pub fn deny_all() -> Self {
        Self {
            rules: vec![DisallowRule::sentinel()],
        }
    }

    /// Appends a rule, keeping duplicates
    pub fn push(&mut self, rule: DisallowRule) {
        self.rules.push(rule);
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DisallowRule> {
        self.rules.iter()
    }

    /// Returns true if any rule matches the URL path
    pub fn disallows(&self, target: &str) -> bool {
        self.rules.iter().any(|rule| rule.matches(target))
    }

    /// Returns the rule strings in order
    pub fn paths(&self) -> Vec<String> {
        self.rules.iter().map(|r| r.as_str().to_string()).collect()
    }
}

impl FromIterator<DisallowRule> for RuleSet {
    fn from_iter<I: IntoIterator<Item = DisallowRule>>(iter: I) -> Self {
        Self {
            rules: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a DisallowRule;
    type IntoIter = std::slice::Iter<'a, DisallowRule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_strips_one_leading_slash() {
        assert_eq!(DisallowRule::new("/404.htm").as_str(), "404.htm");
        assert_eq!(DisallowRule::new("404.htm").as_str(), "404.htm");
        assert_eq!(DisallowRule::new("//a/b").as_str(), "/a/b");
    }

    #[test]
    fn test_rule_preserves_case_and_encoding() {
        assert_eq!(DisallowRule::new("/CV%20Old.htm").as_str(), "CV%20Old.htm");
    }

    #[test]
    fn test_rule_matches_substring() {
        let rule = DisallowRule::new("/cgi-bin/");
        assert!(rule.matches("/cgi-bin/script"));
        assert!(rule.matches("/nested/cgi-bin/x"));
        assert!(!rule.matches("/cgi-bin"));
    }

    #[test]
    fn test_empty_rule_set_allows_everything() {
        let rules = RuleSet::new();
        assert!(rules.is_empty());
        assert!(!rules.disallows("/anything"));
        assert!(!rules.disallows(""));
    }

    #[test]
    fn test_deny_all_disallows_everything() {
        let rules = RuleSet::deny_all();
        assert_eq!(rules.len(), 1);
        assert!(rules.disallows("/"));
        assert!(rules.disallows(""));
        assert!(rules.disallows("/about.htm?x=1"));
        assert_eq!(rules.paths(), vec![String::new()]);
    }

    #[test]
    fn test_rule_set_keeps_order_and_duplicates() {
        let rules: RuleSet = ["/b", "/a", "/b"].iter().map(|v| DisallowRule::new(v)).collect();
        assert_eq!(rules.paths(), vec!["b", "a", "b"]);
    }
}
