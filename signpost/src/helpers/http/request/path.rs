//! Defines helper functions for processing the request path

use crate::helpers::http::percent_decode;

/// Holder for request path segments that have been split into individual segments.
///
/// Used internally by the `RouteTable` when binding a request path against compiled templates.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestPathSegments {
    segments: Vec<String>,
}

impl RequestPathSegments {
    /// Creates a new `RequestPathSegments` by splitting an already percent-decoded path.
    ///
    /// A single leading `/` is ignored. Empty segments are **kept**, so a trailing slash or a
    /// doubled slash is visible to the matcher. A request path of `/some/path//to/` is split into:
    ///
    /// ```plain
    /// ["some", "path", "", "to", ""]
    /// ```
    ///
    /// The empty path and `/` both produce no segments at all.
    pub fn new(path: &str) -> Self {
        let segments = split(path).map(str::to_owned).collect();
        RequestPathSegments { segments }
    }

    /// Creates a new `RequestPathSegments` from a raw URI path, percent-decoding each segment
    /// individually after splitting. An encoded slash (`%2F`) therefore stays inside its segment.
    ///
    /// Returns `None` when any segment does not decode to valid UTF-8.
    pub fn from_encoded(raw: &str) -> Option<Self> {
        let segments = split(raw)
            .map(percent_decode)
            .collect::<Option<Vec<String>>>()?;

        Some(RequestPathSegments { segments })
    }

    /// Provides the segments in path order.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// The number of segments in the path.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// True for the empty path (and for `/`).
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

fn split(path: &str) -> impl Iterator<Item = &str> {
    let path = path.strip_prefix('/').unwrap_or(path);
    // `"".split('/')` yields one empty item; the empty path has no segments.
    path.split('/').filter(move |_| !path.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segments(path: &str) -> Vec<String> {
        RequestPathSegments::new(path).segments().to_vec()
    }

    #[test]
    fn request_path_segments_tests() {
        // Validate the claim made in the doc comment above.
        assert_eq!(segments("/some/path//to/"), vec!["some", "path", "", "to", ""]);
        assert_eq!(segments("hello/World"), vec!["hello", "World"]);
    }

    #[test]
    fn empty_and_root_paths_have_no_segments() {
        assert!(RequestPathSegments::new("").is_empty());
        assert!(RequestPathSegments::new("/").is_empty());
        assert_eq!(segments("//"), vec!["", ""]);
    }

    #[test]
    fn trailing_slash_produces_empty_segment() {
        assert_eq!(segments("hello/"), vec!["hello", ""]);
    }

    #[test]
    fn encoded_segments_are_decoded_after_splitting() {
        let rps = RequestPathSegments::from_encoded("/%61ctiv%61te/a%2Fb").unwrap();
        assert_eq!(rps.segments(), ["activate", "a/b"]);
        assert_eq!(rps.len(), 2);

        assert!(RequestPathSegments::from_encoded("/bad/%FF").is_none());
    }
}
