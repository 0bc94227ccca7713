//! URL extraction: scanner candidates resolved against an enclosure registry.

use std::collections::{BTreeSet, HashSet};
use std::ops::Range;

use log::{debug, trace};

use crate::boundary::resolve;
use crate::enclosure::{EnclosureError, EnclosurePair, EnclosureRegistry};
use crate::scan::{Candidate, CandidateKind, scan_candidates, trim_trailing_punctuation};

/// Behaviour switches for [`UrlExtractor`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Report each distinct URL once, at its first occurrence.
    pub unique: bool,
    /// Only report URLs written with an explicit `scheme://`.
    pub scheme_only: bool,
}

/// A URL found in a text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlMatch {
    /// Byte range of the URL in the scanned text.
    pub span: Range<usize>,
    pub kind: CandidateKind,
}

impl UrlMatch {
    /// The matched URL, sliced from the text it was found in.
    pub fn as_str<'a>(&self, text: &'a str) -> &'a str {
        &text[self.span.clone()]
    }
}

/// Finds URLs in free-form text.
///
/// Owns its enclosure registry: changes made through
/// [`add_enclosure`](Self::add_enclosure) affect only this extractor.
#[derive(Debug, Clone, Default)]
pub struct UrlExtractor {
    enclosures: EnclosureRegistry,
    options: ExtractOptions,
}

impl UrlExtractor {
    /// Extractor with the default enclosure set and default options.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_registry(enclosures: EnclosureRegistry) -> Self {
        Self {
            enclosures,
            options: ExtractOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ExtractOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> ExtractOptions {
        self.options
    }

    pub fn registry(&self) -> &EnclosureRegistry {
        &self.enclosures
    }

    pub fn registry_mut(&mut self) -> &mut EnclosureRegistry {
        &mut self.enclosures
    }

    /// Snapshot of the enclosure pairs in use.
    pub fn enclosures(&self) -> BTreeSet<EnclosurePair> {
        self.enclosures.snapshot()
    }

    pub fn add_enclosure(&mut self, open: char, close: char) {
        self.enclosures.add(open, close);
    }

    pub fn remove_enclosure(&mut self, open: char, close: char) -> Result<(), EnclosureError> {
        self.enclosures.remove(open, close)
    }

    /// All URLs in `text` with their byte spans, in order of appearance.
    pub fn find_matches(&self, text: &str) -> Vec<UrlMatch> {
        let mut seen = HashSet::new();
        let matches: Vec<UrlMatch> = scan_candidates(text)
            .into_iter()
            .filter(|c| !self.options.scheme_only || c.kind == CandidateKind::Scheme)
            .filter_map(|c| self.settle(text, c))
            .filter(|m| !self.options.unique || seen.insert(m.as_str(text)))
            .collect();
        debug!("extract: {} url(s) found", matches.len());
        matches
    }

    /// All URLs in `text` as owned strings.
    pub fn find_urls(&self, text: &str) -> Vec<String> {
        self.find_matches(text)
            .iter()
            .map(|m| m.as_str(text).to_string())
            .collect()
    }

    pub fn has_urls(&self, text: &str) -> bool {
        scan_candidates(text)
            .into_iter()
            .filter(|c| !self.options.scheme_only || c.kind == CandidateKind::Scheme)
            .any(|c| self.settle(text, c).is_some())
    }

    /// Resolve enclosures and trailing punctuation until neither moves the
    /// span, then check the candidate still holds a URL.
    fn settle(&self, text: &str, candidate: Candidate) -> Option<UrlMatch> {
        let Candidate { span, core, kind } = candidate;
        let mut current = span;
        loop {
            let resolved = resolve(text, current.clone(), &self.enclosures);
            let trimmed = trim_trailing_punctuation(text, resolved, core.end);
            if trimmed == current {
                break;
            }
            current = trimmed;
        }

        let holds_core = current.start <= core.start && core.end <= current.end;
        let has_body = kind != CandidateKind::Scheme || current.end > core.end;
        if !holds_core || !has_body {
            trace!("extract: dropped {kind:?} at {current:?}");
            return None;
        }
        Some(UrlMatch {
            span: current,
            kind,
        })
    }
}
