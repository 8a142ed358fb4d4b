//! Compiles route template strings into ordered segments.
//!
//! A template is split on `/`. Each piece is either a literal, matched verbatim, or a parameter
//! written in braces:
//!
//! | piece                 | meaning                                              |
//! |-----------------------|------------------------------------------------------|
//! | `hello`               | literal                                              |
//! | `{name}`              | required parameter                                   |
//! | `{name:alpha}`        | required parameter, constrained by `alpha`           |
//! | `{id:range(1,10)}`    | required parameter, constraint with an argument list |
//! | `{name?}`             | optional parameter (final segment only)              |
//! | `{name:alpha?}`       | optional, constrained parameter                      |
//!
//! Compilation checks syntax only. Constraint names are resolved when the template is added to a
//! `RouteTable`.

pub mod segment;

use std::collections::HashSet;
use std::fmt;

use log::trace;

use crate::error::{Result, RouteError};
use crate::router::template::segment::{ConstraintRef, Segment};

/// An ordered, immutable sequence of `Segment` values compiled from a template string.
///
/// # Examples
///
/// ```rust
/// use signpost::router::template::compile;
/// use signpost::router::template::segment::Segment;
///
/// let template = compile("hello/{name:alpha}").unwrap();
/// assert_eq!(
///     template.segments(),
///     &[Segment::literal("hello"), Segment::parameter("name", Some("alpha"))]
/// );
///
/// assert!(compile("a/{x}/{x}").is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouteTemplate {
    source: String,
    segments: Vec<Segment>,
}

/// Compiles `template` into a `RouteTemplate`.
///
/// Fails with `RouteError::MalformedTemplate` when braces are unbalanced, a parameter name is
/// empty or repeated, an optional parameter is not the final segment, or a constraint reference
/// is not of the form `name` or `name(args)`.
pub fn compile(template: &str) -> Result<RouteTemplate> {
    RouteTemplate::compile(template)
}

impl RouteTemplate {
    /// See `compile`.
    pub fn compile(template: &str) -> Result<RouteTemplate> {
        trace!(" compiling template `{}`", template);

        let path = template.strip_prefix('/').unwrap_or(template);
        if path.is_empty() {
            return Ok(RouteTemplate {
                source: template.to_owned(),
                segments: vec![],
            });
        }

        let pieces: Vec<&str> = path.split('/').collect();
        let last = pieces.len() - 1;
        let mut names = HashSet::new();
        let mut segments = Vec::with_capacity(pieces.len());

        for (i, piece) in pieces.into_iter().enumerate() {
            let segment = parse_segment(template, piece)?;

            if let Segment::Parameter {
                ref name, optional, ..
            } = segment
            {
                if optional && i != last {
                    return Err(RouteError::malformed(
                        template,
                        format!("optional parameter `{}` must be the final segment", name),
                    ));
                }

                if !names.insert(name.clone()) {
                    return Err(RouteError::malformed(
                        template,
                        format!("duplicate parameter name `{}`", name),
                    ));
                }
            }

            segments.push(segment);
        }

        Ok(RouteTemplate {
            source: template.to_owned(),
            segments,
        })
    }

    /// The template text this was compiled from.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// The compiled segments, in path order.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Names of every parameter in the template, in path order.
    pub fn parameter_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(Segment::parameter_name)
    }

    /// True when the final segment is an optional parameter, so that request paths one segment
    /// shorter than the template can still match.
    pub fn has_optional_tail(&self) -> bool {
        self.segments.last().map_or(false, Segment::is_optional)
    }
}

impl fmt::Display for RouteTemplate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.source)
    }
}

fn parse_segment(template: &str, piece: &str) -> Result<Segment> {
    if piece.is_empty() {
        return Err(RouteError::malformed(template, "empty segment"));
    }

    match piece.strip_prefix('{') {
        Some(rest) => match rest.strip_suffix('}') {
            Some(inner) => parse_parameter(template, inner),
            None => Err(RouteError::malformed(
                template,
                format!("unbalanced braces in `{}`", piece),
            )),
        },
        None if piece.contains(|c| c == '{' || c == '}') => Err(RouteError::malformed(
            template,
            format!("unbalanced braces in `{}`", piece),
        )),
        None => Ok(Segment::Literal(piece.to_owned())),
    }
}

fn parse_parameter(template: &str, inner: &str) -> Result<Segment> {
    let (inner, optional) = match inner.strip_suffix('?') {
        Some(inner) => (inner, true),
        None => (inner, false),
    };

    let (name, constraint) = match inner.find(':') {
        Some(n) => (&inner[..n], Some(&inner[n + 1..])),
        None => (inner, None),
    };

    if name.is_empty() {
        return Err(RouteError::malformed(template, "empty parameter name"));
    }

    if !is_identifier(name) {
        return Err(RouteError::malformed(
            template,
            format!("invalid parameter name `{}`", name),
        ));
    }

    let constraint = match constraint {
        Some(c) => Some(parse_constraint_ref(template, c)?),
        None => None,
    };

    Ok(Segment::Parameter {
        name: name.to_owned(),
        constraint,
        optional,
    })
}

/// Parses `name` or `name(args)` into a `ConstraintRef`. `template` is only used for error
/// reporting.
pub(crate) fn parse_constraint_ref(template: &str, text: &str) -> Result<ConstraintRef> {
    let (name, args) = match text.find('(') {
        Some(open) => match text[open + 1..].strip_suffix(')') {
            Some(args) => (&text[..open], Some(args)),
            None => {
                return Err(RouteError::malformed(
                    template,
                    format!("unterminated argument list in constraint `{}`", text),
                ))
            }
        },
        None => (text, None),
    };

    if !is_identifier(name) {
        return Err(RouteError::malformed(
            template,
            format!("invalid constraint `{}`", text),
        ));
    }

    Ok(match args {
        Some(args) => ConstraintRef::with_args(name, args),
        None => ConstraintRef::new(name),
    })
}

fn is_identifier(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn malformed(template: &str) -> bool {
        matches!(compile(template), Err(RouteError::MalformedTemplate { .. }))
    }

    #[test]
    fn compiles_literal_and_constrained_parameter() {
        let template = compile("hello/{name:alpha}").unwrap();

        assert_eq!(
            template.segments(),
            &[
                Segment::literal("hello"),
                Segment::parameter("name", Some("alpha")),
            ]
        );
        assert_eq!(template.as_str(), "hello/{name:alpha}");
        assert!(!template.has_optional_tail());
    }

    #[test]
    fn leading_slash_is_ignored() {
        assert_eq!(
            compile("/hello/{name}").unwrap().segments(),
            compile("hello/{name}").unwrap().segments()
        );
    }

    #[test]
    fn empty_template_has_no_segments() {
        assert!(compile("").unwrap().segments().is_empty());
        assert!(compile("/").unwrap().segments().is_empty());
    }

    #[test]
    fn parses_optional_and_argument_constraints() {
        let template = compile("posts/{id:range(1,10)}/{slug:alpha?}").unwrap();
        let segments = template.segments();

        assert_eq!(
            segments[1],
            Segment::Parameter {
                name: "id".to_owned(),
                constraint: Some(ConstraintRef::with_args("range", "1,10")),
                optional: false,
            }
        );
        assert_eq!(
            segments[2],
            Segment::Parameter {
                name: "slug".to_owned(),
                constraint: Some(ConstraintRef::new("alpha")),
                optional: true,
            }
        );
        assert!(template.has_optional_tail());
        assert_eq!(template.parameter_names().collect::<Vec<_>>(), vec!["id", "slug"]);
    }

    #[test]
    fn regex_arguments_may_contain_braces() {
        let template = compile("codes/{code:regex(^[a-z]{2}$)}").unwrap();
        assert_eq!(
            template.segments()[1],
            Segment::Parameter {
                name: "code".to_owned(),
                constraint: Some(ConstraintRef::with_args("regex", "^[a-z]{2}$")),
                optional: false,
            }
        );
    }

    #[test]
    fn rejects_malformed_templates() {
        assert!(malformed("a/{x}/{x}"));
        assert!(malformed("a/{}"));
        assert!(malformed("a/{:int}"));
        assert!(malformed("a/{x"));
        assert!(malformed("a/x}"));
        assert!(malformed("a/b{x}"));
        assert!(malformed("a/{x:}"));
        assert!(malformed("a/{x:min(1}"));
        assert!(malformed("a/{x:in-t}"));
        assert!(malformed("a/{na me}"));
        assert!(malformed("a//b"));
        assert!(malformed("{x?}/a"));
    }

    #[test]
    fn segments_display_as_template_syntax() {
        let template = compile("a/{id:min(1)}/{rest?}").unwrap();
        let rendered: Vec<String> = template.segments().iter().map(|s| s.to_string()).collect();
        assert_eq!(rendered, vec!["a", "{id:min(1)}", "{rest?}"]);
    }
}
