#![no_main]

use libfuzzer_sys::fuzz_target;
use urlfence::boundary::resolve;
use urlfence::enclosure::EnclosureRegistry;

fuzz_target!(|data: &[u8]| {
    // First four bytes pick the candidate; the rest is the text.
    if data.len() < 4 {
        return;
    }
    let Ok(text) = std::str::from_utf8(&data[4..]) else {
        return;
    };
    let a = usize::from(u16::from_le_bytes([data[0], data[1]]));
    let b = usize::from(u16::from_le_bytes([data[2], data[3]]));

    let registry = EnclosureRegistry::default();
    let span = resolve(text, a.min(b)..a.max(b), &registry);

    assert!(
        span.start <= span.end && span.end <= text.len(),
        "span {span:?} out of bounds (len={})",
        text.len(),
    );
    assert!(text.is_char_boundary(span.start) && text.is_char_boundary(span.end));

    // Resolving the result again must not move it.
    let again = resolve(text, span.clone(), &registry);
    assert_eq!(span, again, "resolution is not a fixed point");
});
