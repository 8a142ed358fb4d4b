//! Router configuration.
//!
//! The embedding application owns configuration loading; `RouterConfig` only implements
//! `Deserialize` so that it can be embedded in whatever settings structure the application
//! already reads.
use serde::Deserialize;

/// Options which affect how a `RouteTable` compares request paths with its templates.
///
/// # Examples
///
/// ```rust
/// use signpost::config::RouterConfig;
///
/// let config = RouterConfig::default();
/// assert!(config.is_case_sensitive());
///
/// let config = RouterConfig::new().with_case_sensitive(false);
/// assert!(!config.is_case_sensitive());
/// ```
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RouterConfig {
    case_sensitive: bool,
}

impl RouterConfig {
    /// Creates a `RouterConfig` holding the default options.
    pub fn new() -> Self {
        RouterConfig::default()
    }

    /// Sets whether literal segments are compared case-sensitively. Parameter values are always
    /// captured exactly as they appear in the request path.
    pub fn with_case_sensitive(self, case_sensitive: bool) -> Self {
        RouterConfig { case_sensitive }
    }

    /// True when literal segments must match the request path exactly.
    pub fn is_case_sensitive(&self) -> bool {
        self.case_sensitive
    }
}

impl Default for RouterConfig {
    fn default() -> Self {
        RouterConfig {
            case_sensitive: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use serde::de::value::{Error, MapDeserializer};

    fn from_entries(entries: Vec<(&'static str, bool)>) -> RouterConfig {
        let deserializer = MapDeserializer::<_, Error>::new(entries.into_iter());
        RouterConfig::deserialize(deserializer).unwrap()
    }

    #[test]
    fn missing_fields_take_defaults() {
        let config = from_entries(vec![]);
        assert!(config.is_case_sensitive());
        assert_eq!(config, RouterConfig::default());
    }

    #[test]
    fn deserializes_case_sensitivity() {
        let config = from_entries(vec![("case_sensitive", false)]);
        assert!(!config.is_case_sensitive());
        assert_eq!(config, RouterConfig::new().with_case_sensitive(false));
    }
}
