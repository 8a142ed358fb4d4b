//! Defines `RouteParams`, the values captured from a request path.

use std::collections::hash_map::{self, HashMap};
use std::iter::FromIterator;
use std::ops::Index;

/// Mapping of parameter names to the raw values captured from the request path.
///
/// Values are exactly as captured; conversion to numbers, GUIDs and so on is left to the handler
/// even when a constraint already validated the shape of the value.
///
/// Every required parameter of the matched template is present. Indexing with a name that is not
/// present panics, which signals a routing bug; use `get` for parameters which may be absent,
/// such as an optional final parameter.
///
/// # Examples
///
/// ```rust
/// use signpost::router::params::RouteParams;
///
/// let params: RouteParams = vec![("name", "World")].into_iter().collect();
///
/// assert_eq!(&params["name"], "World");
/// assert_eq!(params.get("name"), Some("World"));
/// assert_eq!(params.get("missing"), None);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RouteParams {
    values: HashMap<String, String>,
}

impl RouteParams {
    /// Creates an empty `RouteParams`.
    pub fn new() -> Self {
        RouteParams::default()
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        RouteParams {
            values: HashMap::with_capacity(capacity),
        }
    }

    /// Inserts a value, replacing any previous value stored under `name`.
    pub fn insert<N, V>(&mut self, name: N, value: V)
    where
        N: Into<String>,
        V: Into<String>,
    {
        self.values.insert(name.into(), value.into());
    }

    /// Non-failing lookup of a captured value.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// True when a value was captured under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// The number of captured values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when no values were captured.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates over `(name, value)` pairs in arbitrary order.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.values.iter(),
        }
    }
}

impl<'a> Index<&'a str> for RouteParams {
    type Output = str;

    fn index(&self, name: &'a str) -> &str {
        match self.get(name) {
            Some(value) => value,
            None => panic!("route parameter `{}` was not captured", name),
        }
    }
}

impl<N, V> FromIterator<(N, V)> for RouteParams
where
    N: Into<String>,
    V: Into<String>,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = (N, V)>,
    {
        let mut params = RouteParams::new();
        for (name, value) in iter {
            params.insert(name, value);
        }
        params
    }
}

impl From<RouteParams> for HashMap<String, String> {
    fn from(params: RouteParams) -> Self {
        params.values
    }
}

/// Iterator over the entries of a `RouteParams`.
pub struct Iter<'a> {
    inner: hash_map::Iter<'a, String, String>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<'a> IntoIterator for &'a RouteParams {
    type Item = (&'a str, &'a str);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_replaces_existing_value() {
        let mut params = RouteParams::new();
        params.insert("id", "1");
        params.insert("id", "2");

        assert_eq!(params.len(), 1);
        assert_eq!(&params["id"], "2");
    }

    #[test]
    #[should_panic(expected = "route parameter `id` was not captured")]
    fn indexing_missing_parameter_panics() {
        let params = RouteParams::new();
        let _ = &params["id"];
    }

    #[test]
    fn iterates_entries() {
        let params: RouteParams = vec![("a", "1"), ("b", "2")].into_iter().collect();
        let mut entries: Vec<(&str, &str)> = params.iter().collect();
        entries.sort();
        assert_eq!(entries, vec![("a", "1"), ("b", "2")]);

        let map: HashMap<String, String> = params.into();
        assert_eq!(map.get("b").map(String::as_str), Some("2"));
    }
}
