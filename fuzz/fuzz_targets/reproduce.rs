use std::time::Instant;

use log::info;
use urlfence::extract::UrlExtractor;

fn main() {
    env_logger::init();

    let path = std::env::args().nth(1).unwrap_or_else(|| {
        eprintln!("Usage: reproduce <artifact-file>");
        std::process::exit(1);
    });

    let data = std::fs::read(&path).unwrap_or_else(|e| {
        eprintln!("Failed to read {path}: {e}");
        std::process::exit(1);
    });

    let text = match std::str::from_utf8(&data) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Input is not valid UTF-8: {e}");
            std::process::exit(1);
        }
    };

    eprintln!("=== Input: {} ({} bytes) ===", path, text.len());

    let start = Instant::now();
    let matches = UrlExtractor::new().find_matches(text);
    info!("reproduce: extracted in {:.1}ms", start.elapsed().as_secs_f64() * 1000.0);

    for m in &matches {
        eprintln!("{:?} {:?}", m.span, m.as_str(text));
    }
    eprintln!("=== {} match(es) ===", matches.len());
}
