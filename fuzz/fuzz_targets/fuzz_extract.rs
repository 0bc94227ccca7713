#![no_main]

use libfuzzer_sys::fuzz_target;
use urlfence::extract::UrlExtractor;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    let extractor = UrlExtractor::new();
    let matches = extractor.find_matches(text);

    // Matches are in bounds, non-empty, and in order of appearance.
    for m in &matches {
        assert!(m.span.start < m.span.end && m.span.end <= text.len(), "bad span {:?}", m.span);
    }
    for pair in matches.windows(2) {
        assert!(
            pair[0].span.end <= pair[1].span.start,
            "overlapping matches: {:?} and {:?}",
            pair[0].span,
            pair[1].span,
        );
    }
    assert_eq!(extractor.has_urls(text), !matches.is_empty());
});
