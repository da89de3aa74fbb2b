//! Review requests
//!
//! A review request is the code submitted by the user. It is captured once,
//! trimmed, and never changes afterwards.

use serde::Serialize;
use tracing::warn;

use crate::{Error, Result};

/// Code submitted for review
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewRequest {
    code: String,
}

impl ReviewRequest {
    /// Capture `code` for review
    ///
    /// Surrounding whitespace is stripped. Empty input is logged and
    /// rejected with [`Error::EmptyInput`]; every review surface goes
    /// through here, so nothing downstream sees blank code.
    pub fn new(code: impl AsRef<str>) -> Result<Self> {
        let code = code.as_ref().trim();
        if code.is_empty() {
            warn!("Empty code submitted, skipping review");
            return Err(Error::EmptyInput);
        }

        Ok(Self {
            code: code.to_string(),
        })
    }

    /// The code under review
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Number of lines submitted
    pub fn line_count(&self) -> usize {
        self.code.lines().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_trims() {
        let request = ReviewRequest::new("\n\n  def f(): pass  \n").unwrap();
        assert_eq!(request.code(), "def f(): pass");
        assert_eq!(request.line_count(), 1);
    }

    #[test]
    fn test_empty_rejected() {
        assert!(matches!(ReviewRequest::new(""), Err(Error::EmptyInput)));
        assert!(matches!(
            ReviewRequest::new(" \n\t \r\n"),
            Err(Error::EmptyInput)
        ));
    }

    #[test]
    fn test_inner_whitespace_preserved() {
        let code = "fn main() {\n    println!(\"hi\");\n}";
        let request = ReviewRequest::new(code).unwrap();
        assert_eq!(request.code(), code);
        assert_eq!(request.line_count(), 3);
    }
}
