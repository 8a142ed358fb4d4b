//! Defines `CompiledRoute`, one entry of a `RouteTable`.
//!
//! The `RouteTable` walks its routes in registration order and asks each one to bind the request
//! path via `CompiledRoute::bind`. The first route which binds successfully, and whose
//! `RouteMatcher` accepts the request, is selected.

pub mod matcher;

use std::fmt;
use std::sync::Arc;

use hyper::Method;
use log::{debug, trace};

use crate::error::Result;
use crate::handler::Handler;
use crate::router::constraint::{Constraint, ConstraintRegistry};
use crate::router::params::RouteParams;
use crate::router::route::matcher::RouteMatcher;
use crate::router::template::segment::Segment;
use crate::router::template::RouteTemplate;

/// A compiled template together with its resolved constraints, its `RouteMatcher` and a shared
/// reference to its `Handler`. Immutable once built.
pub struct CompiledRoute {
    template: RouteTemplate,
    // Parallel to `template.segments()`.
    constraints: Vec<Option<Constraint>>,
    matcher: Box<dyn RouteMatcher + Send + Sync>,
    handler: Arc<dyn Handler>,
    name: Option<String>,
}

impl CompiledRoute {
    /// Resolves every constraint named by `template` against `registry`.
    ///
    /// Fails with `RouteError::UnknownConstraint` for names missing from the registry, and with
    /// `RouteError::MalformedTemplate` for rejected constraint arguments.
    pub(crate) fn new(
        template: RouteTemplate,
        registry: &ConstraintRegistry,
        matcher: Box<dyn RouteMatcher + Send + Sync>,
        handler: Arc<dyn Handler>,
        name: Option<String>,
    ) -> Result<Self> {
        let constraints = template
            .segments()
            .iter()
            .map(|segment| match *segment {
                Segment::Parameter {
                    constraint: Some(ref reference),
                    ..
                } => registry
                    .resolve_ref(reference, template.as_str())
                    .map(Some),
                _ => Ok(None),
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(CompiledRoute {
            template,
            constraints,
            matcher,
            handler,
            name,
        })
    }

    /// The template this route was compiled from.
    pub fn template(&self) -> &RouteTemplate {
        &self.template
    }

    /// The handler invoked when this route is selected.
    pub fn handler(&self) -> &Arc<dyn Handler> {
        &self.handler
    }

    /// The name used for link generation, if the route was registered with one.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Determines whether the `RouteMatcher` of this route accepts a request made with `method`.
    pub fn accepts(&self, method: Option<&Method>) -> bool {
        self.matcher.is_match(method)
    }

    /// Attempts to bind request path segments against the template, positionally.
    ///
    /// The segment counts must be equal, except that the path may be one segment shorter when the
    /// final template segment is an optional parameter. An empty path segment (as produced by a
    /// trailing or doubled slash) satisfies only an optional parameter, which is then treated as
    /// absent. A required parameter always captures a non-empty value, so `a//b` never binds
    /// `a/{x}/b`. A failing constraint rejects the binding.
    pub fn bind<S>(&self, path: &[S], case_sensitive: bool) -> Option<RouteParams>
    where
        S: AsRef<str>,
    {
        let segments = self.template.segments();
        let arity = path.len() == segments.len()
            || (self.template.has_optional_tail() && path.len() + 1 == segments.len());

        if !arity {
            trace!(
                " `{}` expects {} segments, path has {}",
                self.template,
                segments.len(),
                path.len()
            );
            return None;
        }

        let mut params = RouteParams::with_capacity(segments.len());

        for (i, segment) in segments.iter().enumerate() {
            let value: Option<&str> = path.get(i).map(AsRef::as_ref);

            match *segment {
                Segment::Literal(ref text) => match value {
                    Some(value) if literal_eq(text, value, case_sensitive) => {}
                    _ => return None,
                },
                Segment::Parameter {
                    ref name, optional, ..
                } => match value {
                    None | Some("") if optional => {}
                    None | Some("") => return None,
                    Some(value) => {
                        if let Some(ref constraint) = self.constraints[i] {
                            if !constraint.is_match(value) {
                                debug!(
                                    " `{}` rejected by constraint `{}` on `{}`",
                                    value,
                                    constraint.name(),
                                    self.template
                                );
                                return None;
                            }
                        }
                        params.insert(name.as_str(), value);
                    }
                },
            }
        }

        trace!(" bound path to `{}`", self.template);
        Some(params)
    }

    /// Expands the template with `values`, producing a path beginning with `/`.
    ///
    /// Every required parameter must have a non-empty value which contains no `/` and satisfies
    /// its constraint. An optional final parameter without a value is omitted.
    pub fn expand(&self, values: &RouteParams) -> Option<String> {
        let mut path = String::new();

        for (segment, constraint) in self.template.segments().iter().zip(&self.constraints) {
            let piece = match *segment {
                Segment::Literal(ref text) => text.as_str(),
                Segment::Parameter {
                    ref name, optional, ..
                } => match values.get(name) {
                    Some(value) if !value.is_empty() && !value.contains('/') => {
                        if !constraint.as_ref().map_or(true, |c| c.is_match(value)) {
                            return None;
                        }
                        value
                    }
                    None if optional => continue,
                    _ => return None,
                },
            };

            path.push('/');
            path.push_str(piece);
        }

        if path.is_empty() {
            path.push('/');
        }

        Some(path)
    }
}

impl fmt::Debug for CompiledRoute {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("CompiledRoute")
            .field("template", &self.template.as_str())
            .field("constraints", &self.constraints)
            .field("name", &self.name)
            .finish()
    }
}

fn literal_eq(expected: &str, actual: &str, case_sensitive: bool) -> bool {
    if case_sensitive {
        expected == actual
    } else {
        expected
            .chars()
            .flat_map(char::to_lowercase)
            .eq(actual.chars().flat_map(char::to_lowercase))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::error::RouteError;
    use crate::handler::HandlingOutcome;
    use crate::router::route::matcher::{AnyRouteMatcher, MethodOnlyRouteMatcher};
    use crate::router::template::compile;

    fn route(template: &str) -> CompiledRoute {
        try_route(template).unwrap()
    }

    fn try_route(template: &str) -> Result<CompiledRoute> {
        let handler: Arc<dyn Handler> = Arc::new(|_: RouteParams| HandlingOutcome::Handled);
        CompiledRoute::new(
            compile(template)?,
            &ConstraintRegistry::new(),
            Box::new(AnyRouteMatcher::new()),
            handler,
            None,
        )
    }

    #[test]
    fn binds_constrained_parameter() {
        let r = route("hello/{name:alpha}");

        let params = r.bind(&["hello", "World"], true).unwrap();
        assert_eq!(params.get("name"), Some("World"));
        assert_eq!(params.len(), 1);

        assert!(r.bind(&["hello", "123"], true).is_none());
        assert!(r.bind(&["hello"], true).is_none());
        assert!(r.bind(&["hello", "World", "again"], true).is_none());
        assert!(r.bind(&["Hello", "World"], true).is_none());
    }

    #[test]
    fn literal_case_sensitivity_is_configurable() {
        let r = route("Hello/{name}");
        assert!(r.bind(&["hello", "x"], true).is_none());
        assert!(r.bind(&["hELLO", "x"], false).is_some());

        let params = r.bind(&["HELLO", "MiXeD"], false).unwrap();
        assert_eq!(params.get("name"), Some("MiXeD"));
    }

    #[test]
    fn optional_tail_may_be_absent_or_empty() {
        let r = route("posts/{id?}");

        assert_eq!(r.bind(&["posts", "7"], true).unwrap().get("id"), Some("7"));
        assert!(r.bind(&["posts"], true).unwrap().is_empty());
        assert!(r.bind(&["posts", ""], true).unwrap().is_empty());
    }

    #[test]
    fn empty_segment_never_satisfies_required_parameter() {
        let r = route("hello/{name}");
        assert!(r.bind(&["hello", ""], true).is_none());

        let r = route("a/{x}/b");
        assert!(r.bind(&["a", "", "b"], true).is_none());
        assert_eq!(r.bind(&["a", "x", "b"], true).unwrap().get("x"), Some("x"));
    }

    #[test]
    fn empty_template_binds_empty_path() {
        let r = route("");
        let empty: [&str; 0] = [];
        assert!(r.bind(&empty, true).unwrap().is_empty());
        assert!(r.bind(&[""], true).is_none());

        let r = route("{page?}");
        assert!(r.bind(&empty, true).unwrap().is_empty());
        assert_eq!(r.bind(&["about"], true).unwrap().get("page"), Some("about"));
    }

    #[test]
    fn unknown_constraint_fails_when_compiled() {
        assert_eq!(
            try_route("a/{x:slug}").unwrap_err(),
            RouteError::UnknownConstraint {
                name: "slug".to_owned()
            }
        );
    }

    #[test]
    fn method_matcher_is_consulted() {
        let handler: Arc<dyn Handler> = Arc::new(|_: RouteParams| HandlingOutcome::Handled);
        let r = CompiledRoute::new(
            compile("items").unwrap(),
            &ConstraintRegistry::new(),
            Box::new(MethodOnlyRouteMatcher::new(vec![Method::POST])),
            handler,
            None,
        )
        .unwrap();

        assert!(r.accepts(Some(&Method::POST)));
        assert!(!r.accepts(Some(&Method::GET)));
        assert!(!r.accepts(None));
    }

    #[test]
    fn expands_template() {
        let r = route("users/{id:int}/posts/{slug?}");

        let values: RouteParams = vec![("id", "42"), ("slug", "intro")].into_iter().collect();
        assert_eq!(r.expand(&values).as_deref(), Some("/users/42/posts/intro"));

        let values: RouteParams = vec![("id", "42")].into_iter().collect();
        assert_eq!(r.expand(&values).as_deref(), Some("/users/42/posts"));

        let values: RouteParams = vec![("id", "forty-two")].into_iter().collect();
        assert!(r.expand(&values).is_none());

        let values: RouteParams = vec![("slug", "intro")].into_iter().collect();
        assert!(r.expand(&values).is_none());

        assert_eq!(route("").expand(&RouteParams::new()).as_deref(), Some("/"));
    }
}
