//! Lexical candidate scanner.
//!
//! Proposes rough URL spans for the boundary resolver. Candidates are found
//! by three alternatives tried left to right (leftmost match wins):
//!
//! - `scheme://…`, expanded to the next stop character,
//! - `local@host.tld` mail addresses, never expanded,
//! - bare `host.tld`, expanded only when a path, query, fragment or port
//!   follows.
//!
//! There is no TLD list: a host is any dotted name whose last label is
//! 2 to 63 ASCII letters.

use std::ops::Range;
use std::sync::LazyLock;

use log::debug;
use regex::Regex;

static CANDIDATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    let label = r"[\p{L}\p{N}](?:[\p{L}\p{N}_\-]*[\p{L}\p{N}])?";
    let host = format!(r"(?:{label}\.)+[A-Za-z]{{2,63}}\b");
    let pattern = format!(
        r"(?P<scheme>[A-Za-z][A-Za-z0-9+.\-]*://)|(?P<email>[A-Za-z0-9.!#$%&'*+/=?^_`{{|}}~\-]+(?P<at>@){host})|(?P<host>{host})"
    );
    Regex::new(&pattern).unwrap()
});

/// Characters that always end a candidate on the right.
fn is_right_stop(c: char) -> bool {
    c.is_whitespace() || matches!(c, '"' | '<' | '>')
}

/// Prose punctuation that is never the last character of a URL.
fn is_trailing_punctuation(c: char) -> bool {
    matches!(c, '.' | ',' | ';' | ':' | '!' | '?')
}

/// How a candidate was recognised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CandidateKind {
    /// Starts with an explicit `scheme://`.
    Scheme,
    /// `local@host` mail address.
    Email,
    /// Bare host name, optionally followed by a path.
    Host,
}

/// A provisional URL span, before enclosure-aware adjustment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Byte range proposed as the URL.
    pub span: Range<usize>,
    /// Part of `span` that must survive resolution for the URL to count:
    /// the `scheme://`, the `@host`, or the host.
    pub core: Range<usize>,
    pub kind: CandidateKind,
}

/// Scan `text` for candidate URL spans, in order of appearance.
pub fn scan_candidates(text: &str) -> Vec<Candidate> {
    let mut candidates = Vec::new();
    let mut pos = 0;
    while let Some(caps) = CANDIDATE_RE.captures_at(text, pos) {
        let Some(whole) = caps.get(0) else {
            break;
        };
        let candidate = if caps.name("scheme").is_some() {
            Candidate {
                span: whole.start()..expand_right(text, whole.end()),
                core: whole.range(),
                kind: CandidateKind::Scheme,
            }
        } else if let Some(at) = caps.name("at") {
            Candidate {
                span: whole.range(),
                core: at.start()..whole.end(),
                kind: CandidateKind::Email,
            }
        } else {
            let end = match text[whole.end()..].chars().next() {
                Some('/' | '?' | '#' | ':') => expand_right(text, whole.end()),
                _ => whole.end(),
            };
            Candidate {
                span: whole.start()..end,
                core: whole.range(),
                kind: CandidateKind::Host,
            }
        };
        let span = trim_trailing_punctuation(text, candidate.span.clone(), candidate.core.end);
        pos = span.end.max(whole.end());
        candidates.push(Candidate { span, ..candidate });
    }
    debug!("scan: {} candidate(s) in {} bytes", candidates.len(), text.len());
    candidates
}

/// Extend from `from` to the next right-stop character (or end of text).
fn expand_right(text: &str, from: usize) -> usize {
    text[from..]
        .find(is_right_stop)
        .map_or(text.len(), |i| from + i)
}

/// Drop trailing prose punctuation from `span`, never cutting below `floor`.
pub fn trim_trailing_punctuation(text: &str, span: Range<usize>, floor: usize) -> Range<usize> {
    let trimmed = text[span.clone()].trim_end_matches(is_trailing_punctuation);
    let end = (span.start + trimmed.len()).max(floor.min(span.end));
    span.start..end
}
