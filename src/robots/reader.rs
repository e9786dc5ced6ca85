//! Robots.txt rule reader
//!
//! Extracts the `Disallow:` rules that apply to a user agent. Directive
//! detection is plain substring containment on each line, so lines such as
//! `  User-agent: *  ` match without any key/value tokenizing.

use crate::robots::{DisallowRule, RuleSet};
use std::io::BufRead;
use thiserror::Error;

const USER_AGENT: &str = "User-agent:";
const WILDCARD_AGENT: &str = "User-agent: *";
const DISALLOW: &str = "Disallow:";
const COMMENT: char = '#';

/// Errors raised while reading robots.txt
#[derive(Debug, Error)]
pub enum ReadError {
    /// The active block contains `Disallow: /`
    #[error("robots.txt disallows all access")]
    DisallowedAll,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Parses robots.txt lines into the disallow rules for a user agent
///
/// Without a user agent only `User-agent: *` blocks apply. With one, blocks
/// whose line contains `User-agent: <agent>` apply as well.
///
/// An empty `Disallow:` value in an active block grants full access and ends
/// the read with an empty rule set. A value of exactly `/` ends the read with
/// [`ReadError::DisallowedAll`]. A `Disallow:` line containing `#` anywhere
/// is skipped entirely.
///
/// # Examples
///
/// ```
/// use robots_scope::read_rules;
///
/// let text = "User-agent: *\nDisallow: /cgi-bin/\nDisallow: /404.htm";
/// let rules = read_rules(text.lines(), None).unwrap();
/// assert_eq!(rules.paths(), vec!["cgi-bin/", "404.htm"]);
/// ```
pub fn read_rules<I, S>(lines: I, user_agent: Option<&str>) -> Result<RuleSet, ReadError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let agent_line = user_agent.map(|agent| format!("User-agent: {}", agent));
    let mut in_scope = false;
    let mut rules = RuleSet::new();

    for line in lines {
        let line = line.as_ref();

        if line.contains(WILDCARD_AGENT)
            || agent_line.as_deref().is_some_and(|a| line.contains(a))
        {
            in_scope = true;
            continue;
        }
        if line.contains(USER_AGENT) {
            in_scope = false;
            continue;
        }

        if !in_scope || line.contains(COMMENT) {
            continue;
        }
        let Some((_, value)) = line.split_once(DISALLOW) else {
            continue;
        };

        match value.trim() {
            "" => {
                tracing::debug!("Empty Disallow in active block, full access granted");
                return Ok(RuleSet::new());
            }
            "/" => {
                tracing::debug!("Disallow: / in active block");
                return Err(ReadError::DisallowedAll);
            }
            path => rules.push(DisallowRule::new(path)),
        }
    }

    Ok(rules)
}

/// Reads robots.txt from a buffered reader
///
/// Behaves like [`read_rules`] over the reader's lines. A failure while
/// reading a line is returned as [`ReadError::Io`].
pub fn read_rules_from<R: BufRead>(
    reader: R,
    user_agent: Option<&str>,
) -> Result<RuleSet, ReadError> {
    let lines = reader.lines().collect::<Result<Vec<_>, _>>()?;
    read_rules(lines, user_agent)
}
