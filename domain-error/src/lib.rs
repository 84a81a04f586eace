//! Contains the common [`ErrorKind`] trait used by all errors to display user-facing error
//! messages.

// allows `#[derive(ErrorKind)]` to be used inside this crate's own tests
extern crate self as domain_error;

use ariadne::{Color, Report, Source};
use std::{any::Any, fmt::Debug, io, ops::Range};

/// The color to use to highlight expressions.
pub const EXPR: Color = Color::RGB(52, 235, 152);

/// Represents any kind of error that can occur during some operation.
pub trait ErrorKind: Debug + Send + Sync {
    /// Returns the error as an [`Any`], so that callers can check which kind of error occurred.
    fn as_any(&self) -> &dyn Any;

    /// The short message of the error, without any source code context.
    fn message(&self) -> String;

    /// Builds the report for this error.
    fn build_report<'a>(
        &self,
        src_id: &'a str,
        spans: &[Range<usize>],
    ) -> Report<(&'a str, Range<usize>)>;
}

/// An error associated with regions of source code that can be highlighted.
#[derive(Debug)]
pub struct Error {
    /// The regions of the source code that this error originated from.
    pub spans: Vec<Range<usize>>,

    /// The kind of error that occurred.
    pub kind: Box<dyn ErrorKind>,
}

impl Error {
    /// Creates a new error with the given spans and kind.
    pub fn new(spans: Vec<Range<usize>>, kind: impl ErrorKind + 'static) -> Self {
        Self { spans, kind: Box::new(kind) }
    }

    /// Returns true if the kind of this error is `K`.
    pub fn is<K: ErrorKind + 'static>(&self) -> bool {
        self.kind.as_any().is::<K>()
    }

    /// Returns a reference to the kind of this error if it is `K`.
    pub fn downcast_ref<K: ErrorKind + 'static>(&self) -> Option<&K> {
        self.kind.as_any().downcast_ref::<K>()
    }

    /// The short message of the error.
    pub fn message(&self) -> String {
        self.kind.message()
    }

    /// Build a report from this error kind.
    pub fn build_report<'a>(&self, src_id: &'a str) -> Report<(&'a str, Range<usize>)> {
        self.kind.build_report(src_id, &self.spans)
    }

    /// Report this error to stderr, highlighting the given source code.
    ///
    /// The `ariadne` crate's [`Report`] type actually does not have a `Display` implementation, so
    /// we can only use its `eprint` method to print to stderr.
    pub fn report_to_stderr(&self, src_id: &str, input: &str) -> io::Result<()> {
        self.build_report(src_id).eprint((src_id, Source::from(input)))
    }

    /// Writes the report of this error into a string, highlighting the given source code.
    pub fn report_to_string(&self, src_id: &str, input: &str) -> io::Result<String> {
        let mut buf = Vec::new();
        self.build_report(src_id).write((src_id, Source::from(input)), &mut buf)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.kind.message())
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use domain_attrs::ErrorKind;
    use super::*;

    #[derive(Debug, ErrorKind)]
    #[error(
        message = format!("expected {} here", expected),
        labels = ["this part", ""],
        help = "try again",
    )]
    struct Expected {
        expected: &'static str,
    }

    #[test]
    fn downcast_kind() {
        let err = Error::new(vec![0..3], Expected { expected: "a number" });
        assert!(err.is::<Expected>());
        assert_eq!(err.downcast_ref::<Expected>().map(|e| e.expected), Some("a number"));
        assert_eq!(err.to_string(), "expected a number here");
    }

    #[test]
    fn report_mentions_message_and_label() {
        let err = Error::new(vec![0..3, 4..5], Expected { expected: "a number" });
        let report = err.report_to_string("input", "abc + d").unwrap();
        let plain = String::from_utf8(strip_ansi_escapes::strip(report)).unwrap();
        assert!(plain.contains("expected a number here"));
        assert!(plain.contains("this part"));
        assert!(plain.contains("try again"));
    }
}
