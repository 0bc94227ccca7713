//! Input source abstraction: a file path or stdin.

use std::io::{self, IsTerminal, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Where the text to scan comes from.
pub enum InputSource {
    File(PathBuf),
    Stdin,
}

impl InputSource {
    /// Pick the source for a CLI input argument, or `None` if there is
    /// nothing to read (no argument and stdin is a terminal).
    pub fn from_arg(input: Option<PathBuf>) -> Option<Self> {
        if is_stdin_input(input.as_deref()) {
            return Some(InputSource::Stdin);
        }
        input.map(InputSource::File)
    }

    /// Display name for messages.
    pub fn display_name(&self) -> &str {
        match self {
            InputSource::File(path) => path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("unknown"),
            InputSource::Stdin => "<stdin>",
        }
    }

    /// Read the whole input (blocking).
    pub fn read_to_string(&self) -> Result<String> {
        match self {
            InputSource::File(path) => std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display())),
            InputSource::Stdin => read_all(io::stdin()).context("failed to read stdin"),
        }
    }
}

/// Detect whether the given CLI input argument represents stdin.
///
/// Returns `true` if input is `Some("-")`, or if input is `None` and stdin is not a terminal.
pub fn is_stdin_input(input: Option<&Path>) -> bool {
    match input {
        Some(p) => p.as_os_str() == "-",
        None => !io::stdin().is_terminal(),
    }
}

/// Read everything from `reader`, replacing invalid UTF-8.
fn read_all<R: Read>(mut reader: R) -> io::Result<String> {
    let mut buf = Vec::new();
    loop {
        let mut chunk = [0u8; 8192];
        match reader.read(&mut chunk) {
            Ok(0) => break,
            Ok(n) => buf.extend_from_slice(&chunk[..n]),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    /// Reader that returns `Interrupted` on the first call, then delegates to inner.
    struct InterruptedReader {
        interrupted: bool,
        inner: Cursor<Vec<u8>>,
    }

    impl InterruptedReader {
        fn new(data: &[u8]) -> Self {
            Self {
                interrupted: false,
                inner: Cursor::new(data.to_vec()),
            }
        }
    }

    impl Read for InterruptedReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if !self.interrupted {
                self.interrupted = true;
                return Err(io::Error::new(io::ErrorKind::Interrupted, "interrupted"));
            }
            self.inner.read(buf)
        }
    }

    /// Reader that always returns a BrokenPipe error.
    struct ErrorReader;

    impl Read for ErrorReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "broken pipe"))
        }
    }

    // --- display_name tests ---

    #[test]
    fn display_name_simple_file() {
        let src = InputSource::File(PathBuf::from("notes.txt"));
        assert_eq!(src.display_name(), "notes.txt");
    }

    #[test]
    fn display_name_nested_path() {
        let src = InputSource::File(PathBuf::from("/home/user/docs/links.txt"));
        assert_eq!(src.display_name(), "links.txt");
    }

    #[test]
    fn display_name_no_filename() {
        let src = InputSource::File(PathBuf::from("/"));
        assert_eq!(src.display_name(), "unknown");
    }

    #[test]
    fn display_name_stdin() {
        assert_eq!(InputSource::Stdin.display_name(), "<stdin>");
    }

    // --- is_stdin_input tests ---
    // Note: `None` case depends on terminal state (`is_terminal()`), so we skip it.

    #[test]
    fn is_stdin_input_dash() {
        assert!(is_stdin_input(Some(Path::new("-"))));
    }

    #[test]
    fn is_stdin_input_file_path() {
        assert!(!is_stdin_input(Some(Path::new("file.txt"))));
    }

    #[test]
    fn is_stdin_input_empty_string() {
        assert!(!is_stdin_input(Some(Path::new(""))));
    }

    #[test]
    fn from_arg_file_and_dash() {
        assert!(matches!(
            InputSource::from_arg(Some(PathBuf::from("a.txt"))),
            Some(InputSource::File(p)) if p == Path::new("a.txt")
        ));
        assert!(matches!(
            InputSource::from_arg(Some(PathBuf::from("-"))),
            Some(InputSource::Stdin)
        ));
    }

    // --- read_all tests ---

    #[test]
    fn read_all_single_chunk() {
        assert_eq!(read_all(Cursor::new(b"hello world")).unwrap(), "hello world");
    }

    #[test]
    fn read_all_empty_input() {
        assert!(read_all(Cursor::new(b"")).unwrap().is_empty());
    }

    #[test]
    fn read_all_multiple_chunks() {
        // Data larger than the 8192 internal buffer → multiple reads
        let data = "y".repeat(8192 + 100);
        let out = read_all(Cursor::new(data.clone().into_bytes())).unwrap();
        assert_eq!(out.len(), 8292);
        assert_eq!(out, data);
    }

    #[test]
    fn read_all_retries_after_interrupted() {
        let out = read_all(InterruptedReader::new(b"after interrupt")).unwrap();
        assert_eq!(out, "after interrupt");
    }

    #[test]
    fn read_all_propagates_errors() {
        let err = read_all(ErrorReader).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }

    #[test]
    fn read_all_replaces_invalid_utf8() {
        let out = read_all(Cursor::new(vec![b'a', 0xff, b'b'])).unwrap();
        assert_eq!(out, "a\u{fffd}b");
    }

    #[test]
    fn read_missing_file_has_context() {
        let src = InputSource::File(PathBuf::from("/nonexistent/urlfence/input.txt"));
        let msg = format!("{:#}", src.read_to_string().unwrap_err());
        assert!(msg.starts_with("failed to read /nonexistent/urlfence/input.txt"), "{msg}");
    }
}
