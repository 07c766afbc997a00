//! Comment-based suppression directives.
//!
//! Supports directives like:
//! ```text
//! # client-lint: allow(missing-configuration-factory-method) reason="legacy shim"
//! ```
//!
//! A directive trailing code applies to its own line only. A directive on a
//! comment-only line also applies to the line below it. Messages are named
//! by symbol or code; `all` matches every message.
//!
//! `#` inside a single-line string literal does not start a comment.
//! Triple-quoted strings spanning lines are not tracked.

use std::collections::HashSet;

use crate::message::MessageId;

/// Result of checking for an allow directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllowCheck {
    /// Message is not suppressed.
    Denied,
    /// Message is suppressed, with optional reason.
    Allowed {
        /// The reason provided (if any).
        reason: Option<String>,
    },
}

impl AllowCheck {
    /// Returns true if allowed.
    #[must_use]
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed { .. })
    }

    /// Returns the reason if allowed.
    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Allowed { reason } => reason.as_deref(),
            Self::Denied => None,
        }
    }
}

/// Parsed allow directive.
#[derive(Debug, Clone)]
struct AllowDirective {
    keys: HashSet<String>,
    reason: Option<String>,
    /// Nothing but whitespace precedes the comment.
    standalone: bool,
}

impl AllowDirective {
    fn covers(&self, id: MessageId) -> bool {
        self.keys.contains("all") || self.keys.contains(id.symbol()) || self.keys.contains(id.code())
    }
}

/// Checks whether `id` is suppressed at `line` (1-indexed) of `content`.
#[must_use]
pub fn check_allow(content: &str, line: usize, id: MessageId) -> AllowCheck {
    let lines: Vec<&str> = content.lines().collect();

    for (check_line, own_line) in [(line.saturating_sub(1), false), (line, true)] {
        if check_line == 0 || check_line > lines.len() {
            continue;
        }

        if let Some(directive) = parse_allow_directive(lines[check_line - 1]) {
            if (own_line || directive.standalone) && directive.covers(id) {
                return AllowCheck::Allowed {
                    reason: directive.reason,
                };
            }
        }
    }

    AllowCheck::Denied
}

/// Parses a directive from a line, which may carry code before the comment.
fn parse_allow_directive(line: &str) -> Option<AllowDirective> {
    let hash = comment_start(line)?;
    let standalone = line[..hash].trim().is_empty();
    let comment = line[hash + 1..].trim();

    let directive = comment.strip_prefix("client-lint:")?.trim();
    let allow_content = directive.strip_prefix("allow(")?.trim();

    let paren_end = allow_content.find(')')?;
    let keys: HashSet<String> = allow_content[..paren_end]
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    if keys.is_empty() {
        return None;
    }

    let rest = allow_content[paren_end + 1..].trim();
    let reason = rest
        .strip_prefix("reason=")
        .map(str::trim)
        .and_then(|r| r.strip_prefix('"'))
        .and_then(|r| r.find('"').map(|end| r[..end].to_string()));

    Some(AllowDirective {
        keys,
        reason,
        standalone,
    })
}

/// Byte offset of the `#` that opens a comment, skipping string literals.
fn comment_start(line: &str) -> Option<usize> {
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for (i, c) in line.char_indices() {
        match quote {
            Some(_) if escaped => escaped = false,
            Some(_) if c == '\\' => escaped = true,
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None if c == '#' => return Some(i),
            None if c == '"' || c == '\'' => quote = Some(c),
            None => {}
        }
    }
    None
}
