//! Helpers for HTTP request data handed to the router by its host.

pub mod request;

use log::trace;
use percent_encoding::percent_decode_str;

/// Percent-decodes `raw`, returning `None` when the decoded bytes are not valid UTF-8.
pub(crate) fn percent_decode(raw: &str) -> Option<String> {
    match percent_decode_str(raw).decode_utf8() {
        Ok(pd) => {
            trace!(" percent_decode: {}, src: {}", pd, raw);
            Some(pd.into_owned())
        }
        Err(_) => {
            trace!(" percent_decode: error, src: {}", raw);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ensure_valid_percent_decode() {
        let pd = percent_decode("%41+%42%2B%63%20%64").unwrap();
        assert_eq!("A+B+c d", pd);
    }

    #[test]
    fn rejects_invalid_utf8() {
        assert!(percent_decode("%FF%FE").is_none());
    }
}
