//! Enclosure-aware URL boundary resolution.
//!
//! A scanner proposes a rough candidate span; [`resolve`] trims bracket and
//! quote characters that belong to the surrounding prose while keeping the
//! ones that are part of the URL itself, such as the balanced parentheses in
//! `https://en.wikipedia.org/wiki/Rust_(programming_language)`.
//!
//! Balance is counted per pair type. An opener is only ever matched by a
//! later closer of the same pair, so `(foo[bar)baz]` counts as balanced for
//! both `()` and `[]`.

use std::ops::Range;

use log::trace;

use crate::enclosure::{EnclosurePair, EnclosureRegistry};

/// Resolve the reported URL span for a candidate found in `text`.
///
/// `candidate` is a byte range. Ends past `text.len()` are clamped and ends
/// inside a multi-byte char are moved inward to the nearest char boundary.
/// The result always satisfies `start <= end <= text.len()` and lies on char
/// boundaries. Resolving an already-resolved span returns it unchanged.
pub fn resolve(text: &str, candidate: Range<usize>, registry: &EnclosureRegistry) -> Range<usize> {
    let span = snap_to_text(text, candidate);
    let (offsets, chars): (Vec<usize>, Vec<char>) = text[span.clone()]
        .char_indices()
        .map(|(i, c)| (span.start + i, c))
        .unzip();
    let outside_before = text[..span.start].chars().next_back();
    let outside_after = text[span.end..].chars().next();

    // Each step strictly shrinks the window, so `len + 1` passes always
    // reach the fixed point.
    let mut window = 0..chars.len();
    for _ in 0..=chars.len() {
        let neighbors = Neighbors {
            before: match window.start {
                0 => outside_before,
                i => Some(chars[i - 1]),
            },
            after: chars.get(window.end).copied().or(outside_after),
        };
        let Some((rule, next)) = strip_once(&chars[window.clone()], neighbors, registry) else {
            break;
        };
        window = window.start + next.start..window.start + next.end;
        trace!("boundary: {rule} -> chars {window:?}");
    }

    let byte_at = |i: usize| offsets.get(i).copied().unwrap_or(span.end);
    byte_at(window.start)..byte_at(window.end)
}

/// Characters of `text` directly around the window being resolved.
#[derive(Debug, Clone, Copy)]
struct Neighbors {
    before: Option<char>,
    after: Option<char>,
}

/// Clamp a byte range into `text` and onto char boundaries.
fn snap_to_text(text: &str, candidate: Range<usize>) -> Range<usize> {
    let mut end = candidate.end.min(text.len());
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    let mut start = candidate.start.min(end);
    while !text.is_char_boundary(start) {
        start += 1;
    }
    start.min(end)..end
}

type Step = (&'static str, Range<usize>);

/// Apply the first rule that changes `chars`, returning the kept sub-range.
fn strip_once(chars: &[char], neighbors: Neighbors, registry: &EnclosureRegistry) -> Option<Step> {
    let n = chars.len();
    let (&first, &last) = (chars.first()?, chars.last()?);

    // Outer wrap: the closer at the end balances the opener at the start.
    if n >= 2
        && asymmetric(registry)
            .filter(|p| p.open == first && p.close == last)
            .any(|p| matching_close(chars, p) == Some(n - 1))
    {
        return Some(("outer wrap", 1..n - 1));
    }

    // Symmetric wrap: same quote token on both ends.
    if n >= 2 && first == last && registry.is_symmetric_token(first) {
        return Some(("symmetric wrap", 1..n - 1));
    }

    // A closer with no opener before it ends the URL. A closer at index 0 is
    // a stray leading char and is handled below instead.
    if let Some(pos) = first_unmatched_closer(chars, registry).filter(|&pos| pos > 0) {
        return Some(("unmatched closer", 0..pos));
    }

    let run = unmatched_leading_run(chars, registry);
    if run > 0 {
        return Some(("unmatched leading enclosures", run..n));
    }

    // A quote at one end whose partner sits just outside the other end.
    if registry.is_symmetric_token(last) && neighbors.before == Some(last) {
        return Some(("trailing quote closes outer quote", 0..n - 1));
    }

    if registry.is_symmetric_token(first) && neighbors.after == Some(first) {
        return Some(("leading quote opens outer quote", 1..n));
    }

    if registry.is_symmetric_token(last) && is_odd_count(chars, last) {
        return Some(("unpaired trailing quote", 0..n - 1));
    }

    if registry.is_symmetric_token(first) && is_odd_count(chars, first) {
        return Some(("unpaired leading quote", 1..n));
    }

    None
}

fn asymmetric(registry: &EnclosureRegistry) -> impl Iterator<Item = &EnclosurePair> {
    registry.iter().filter(|p| !p.is_symmetric())
}

/// Index of the closer that balances the opener at `chars[0]`.
fn matching_close(chars: &[char], pair: &EnclosurePair) -> Option<usize> {
    let mut depth = 0usize;
    for (i, &c) in chars.iter().enumerate() {
        if c == pair.open {
            depth += 1;
        } else if c == pair.close {
            depth = depth.checked_sub(1)?;
            if depth == 0 {
                return Some(i);
            }
        }
    }
    None
}

/// Earliest position of a closer whose pair has no open opener before it.
fn first_unmatched_closer(chars: &[char], registry: &EnclosureRegistry) -> Option<usize> {
    asymmetric(registry)
        .filter_map(|pair| {
            let mut depth = 0usize;
            for (i, &c) in chars.iter().enumerate() {
                if c == pair.open {
                    depth += 1;
                } else if c == pair.close {
                    match depth.checked_sub(1) {
                        Some(d) => depth = d,
                        None => return Some(i),
                    }
                }
            }
            None
        })
        .min()
}

/// Length of the prefix made only of openers nothing closes and of stray
/// closers.
///
/// Dropping such a char never changes how the remaining chars pair up, so
/// the whole run goes in one step.
fn unmatched_leading_run(chars: &[char], registry: &EnclosureRegistry) -> usize {
    let mut closed = vec![false; chars.len()];
    let mut stack = Vec::new();
    for pair in asymmetric(registry) {
        stack.clear();
        for (i, &c) in chars.iter().enumerate() {
            if c == pair.open {
                stack.push(i);
            } else if c == pair.close
                && let Some(j) = stack.pop()
            {
                closed[j] = true;
            }
        }
    }
    chars
        .iter()
        .zip(&closed)
        .take_while(|&(&c, &paired)| !paired && (registry.is_opener(c) || registry.is_closer(c)))
        .count()
}

fn is_odd_count(chars: &[char], token: char) -> bool {
    chars.iter().filter(|&&c| c == token).count() % 2 == 1
}
