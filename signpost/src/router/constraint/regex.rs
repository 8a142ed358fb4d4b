//! Defines the wrapping type for a segment-matching regex.

use std::fmt;

use regex::Regex;

/// A wrapper for `Regex` which only accepts a whole path segment.
#[derive(Clone)]
pub struct ConstrainedSegmentRegex {
    regex: Regex,
}

impl ConstrainedSegmentRegex {
    /// Creates a new `ConstrainedSegmentRegex` from a provided string.
    ///
    /// It wraps the string in begin and end of line anchors to prevent it from matching more than
    /// intended. Anchors already present in `regex` are harmless.
    pub fn new(regex: &str) -> Result<Self, regex::Error> {
        let regex = Regex::new(&format!("^(?:{})$", regex))?;
        Ok(ConstrainedSegmentRegex { regex })
    }

    /// Returns the anchored pattern backing this regex as a `&str`.
    #[inline]
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    /// Wraps `regex::Regex::is_match` to return true if and only if the regex matches the whole
    /// string given.
    #[inline]
    pub fn is_match(&self, s: &str) -> bool {
        self.regex.is_match(s)
    }
}

impl fmt::Debug for ConstrainedSegmentRegex {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_tuple("ConstrainedSegmentRegex")
            .field(&self.as_str())
            .finish()
    }
}
