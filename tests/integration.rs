use urlfence::boundary::resolve;
use urlfence::enclosure::{EnclosureError, EnclosurePair, EnclosureRegistry};
use urlfence::extract::{ExtractOptions, UrlExtractor};
use urlfence::scan::scan_candidates;

fn extractor() -> UrlExtractor {
    let _ = env_logger::try_init();
    UrlExtractor::new()
}

#[test]
fn test_prose_paragraph() {
    let text = "Docs live at https://docs.example.invalid/guide (see the \
                FAQ at https://example.invalid/wiki/Foo_(bar)). Mail \
                <team@example.invalid> or visit \"example.invalid/contact\".";
    assert_eq!(
        extractor().find_urls(text),
        vec![
            "https://docs.example.invalid/guide",
            "https://example.invalid/wiki/Foo_(bar)",
            "team@example.invalid",
            "example.invalid/contact",
        ]
    );
}

#[test]
fn test_markdown_style_links() {
    let text = "- [Rust](https://rust-lang.invalid) and https://crates.invalid\n\
                - `https://coala.io/200`\n";
    assert_eq!(
        extractor().find_urls(text),
        vec!["https://rust-lang.invalid", "https://crates.invalid", "https://coala.io/200"]
    );
}

#[test]
fn test_multiline_input() {
    let text = "first: (enclosure.net/bracket)\nsecond: [enclosure.net/square]\n";
    assert_eq!(
        extractor().find_urls(text),
        vec!["enclosure.net/bracket", "enclosure.net/square"]
    );
}

#[test]
fn test_every_match_is_resolver_fixed_point() {
    let ex = extractor();
    let text = "a(sa\"enclosure.net/bracketext\"as)asd <email@address.net> \
                asd(http://de.wikipedia.org/wiki/(Agilit%C3(%A4t_(Manag)ement))) Bar";
    let matches = ex.find_matches(text);
    assert_eq!(matches.len(), 3);
    for m in &matches {
        assert_eq!(resolve(text, m.span.clone(), ex.registry()), m.span);
    }
}

#[test]
fn test_candidates_then_resolution() {
    // The scanner leaves enclosure chars in; the resolver removes them.
    let text = "Foo (http://de.wikipedia.org/wiki/Agilit%C3%A4t_(Management)) Bar";
    let candidates = scan_candidates(text);
    assert_eq!(candidates.len(), 1);
    let raw = &text[candidates[0].span.clone()];
    assert!(raw.ends_with("))"));
    let resolved = resolve(text, candidates[0].span.clone(), &EnclosureRegistry::default());
    assert_eq!(&text[resolved], "http://de.wikipedia.org/wiki/Agilit%C3%A4t_(Management)");
}

#[test]
fn test_enclosure_registry_lifecycle() {
    let mut ex = extractor();

    let mut expected = ex.enclosures();
    expected.insert(EnclosurePair::new('%', '%'));
    ex.add_enclosure('%', '%');
    assert_eq!(ex.enclosures(), expected);

    assert!(matches!(
        ex.registry_mut().remove_str("aa", "ss"),
        Err(EnclosureError::NotRegistered { .. })
    ));
    assert!(matches!(
        ex.registry_mut().remove_str("", ""),
        Err(EnclosureError::NotRegistered { .. })
    ));
    assert_eq!(ex.enclosures(), expected);

    expected.remove(&EnclosurePair::new('%', '%'));
    ex.remove_enclosure('%', '%').unwrap();
    assert_eq!(ex.enclosures(), expected);

    assert!(ex.registry_mut().remove_str("asd", "dddsa").is_err());
    assert!(ex.registry_mut().remove_str("", "").is_err());
}

#[test]
fn test_parallel_resolution_with_shared_extractor() {
    let ex = extractor().with_options(ExtractOptions {
        unique: true,
        ..ExtractOptions::default()
    });
    let texts = [
        "(enclosure.net/bracket) (enclosure.net/bracket)",
        "{enclosure.net/curly}",
        "'enclosure.net/qoute'",
        "asd]enclosure.net",
    ];
    let results: Vec<Vec<String>> = std::thread::scope(|s| {
        let handles: Vec<_> = texts
            .iter()
            .map(|t| s.spawn(|| ex.find_urls(t)))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    assert_eq!(
        results,
        vec![
            vec!["enclosure.net/bracket".to_string()],
            vec!["enclosure.net/curly".to_string()],
            vec!["enclosure.net/qoute".to_string()],
            vec!["enclosure.net".to_string()],
        ]
    );
}

#[test]
fn test_long_brace_run_before_email() {
    let ex = extractor();
    for n in [1_000, 20_000] {
        let text = format!("{}a@x.net", "{".repeat(n));
        let start = std::time::Instant::now();
        assert_eq!(ex.find_urls(&text), vec!["a@x.net"]);
        assert!(
            start.elapsed() < std::time::Duration::from_secs(10),
            "n={n} took {:?}",
            start.elapsed()
        );
    }
}

#[test]
fn test_empty_and_whitespace_input() {
    let ex = extractor();
    assert!(ex.find_urls("").is_empty());
    assert!(ex.find_urls("   \n\t").is_empty());
    assert!(!ex.has_urls("()[]{}<>\"\"''``"));
}
