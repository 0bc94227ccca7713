//! Extract URLs from free-form text with enclosure-aware boundaries.
//!
//! A regex scanner proposes rough candidates; the boundary resolver then
//! trims brackets and quotes that belong to the surrounding prose while
//! keeping the ones that are part of the URL:
//!
//! ```
//! use urlfence::extract::UrlExtractor;
//!
//! let text = "Foo (http://de.wikipedia.org/wiki/Agilit%C3%A4t_(Management)) Bar";
//! let urls = UrlExtractor::new().find_urls(text);
//! assert_eq!(urls, vec!["http://de.wikipedia.org/wiki/Agilit%C3%A4t_(Management)"]);
//! ```

pub mod boundary;
pub mod config;
pub mod enclosure;
pub mod extract;
pub mod input;
pub mod scan;
