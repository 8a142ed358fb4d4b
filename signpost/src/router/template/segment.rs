//! Defines `Segment` for `RouteTemplate`.
use std::fmt;

/// A reference from a parameter segment to a constraint held in the `ConstraintRegistry`.
///
/// Written inline in a template as `{name:constraint}` or, for constraints which accept an
/// argument list, `{name:constraint(args)}`. The argument text is kept verbatim and only
/// interpreted when the constraint is resolved.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ConstraintRef {
    name: String,
    args: Option<String>,
}

impl ConstraintRef {
    /// Creates a reference to a constraint which takes no arguments.
    pub fn new<N>(name: N) -> Self
    where
        N: Into<String>,
    {
        ConstraintRef {
            name: name.into(),
            args: None,
        }
    }

    /// Creates a reference to a constraint with an argument list, e.g. `min(1)`.
    pub fn with_args<N, A>(name: N, args: A) -> Self
    where
        N: Into<String>,
        A: Into<String>,
    {
        ConstraintRef {
            name: name.into(),
            args: Some(args.into()),
        }
    }

    /// The registered name of the constraint.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The raw argument text, without the surrounding parentheses.
    pub fn args(&self) -> Option<&str> {
        self.args.as_deref()
    }
}

impl fmt::Display for ConstraintRef {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.args {
            Some(ref args) => write!(f, "{}({})", self.name, args),
            None => f.write_str(&self.name),
        }
    }
}

/// Indicates the type of segment which is being represented at one position of a template.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Segment {
    /// Is matched exactly (string equality, subject to `RouterConfig`) to the corresponding
    /// segment of incoming request paths.
    ///
    /// Unlike `Parameter`, the matched value is **not** stored in the resulting `RouteParams`.
    Literal(String),

    /// Captures the corresponding request path segment under `name`.
    Parameter {
        /// Name the captured value is stored under. Unique within a template.
        name: String,

        /// Constraint the captured value must satisfy, if any.
        constraint: Option<ConstraintRef>,

        /// Optional parameters may only appear last, and may be absent from the request path.
        optional: bool,
    },
}

impl Segment {
    /// Creates a `Segment::Literal`.
    pub fn literal<S>(text: S) -> Self
    where
        S: Into<String>,
    {
        Segment::Literal(text.into())
    }

    /// Creates a required `Segment::Parameter`, optionally constrained by a plain constraint name.
    pub fn parameter<S>(name: S, constraint: Option<&str>) -> Self
    where
        S: Into<String>,
    {
        Segment::Parameter {
            name: name.into(),
            constraint: constraint.map(ConstraintRef::new),
            optional: false,
        }
    }

    /// The parameter name, for `Parameter` segments.
    pub fn parameter_name(&self) -> Option<&str> {
        match *self {
            Segment::Parameter { ref name, .. } => Some(name),
            Segment::Literal(_) => None,
        }
    }

    /// True for an optional `Parameter`.
    pub fn is_optional(&self) -> bool {
        match *self {
            Segment::Parameter { optional, .. } => optional,
            Segment::Literal(_) => false,
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Segment::Literal(ref text) => f.write_str(text),
            Segment::Parameter {
                ref name,
                ref constraint,
                optional,
            } => {
                write!(f, "{{{}", name)?;
                if let Some(c) = constraint {
                    write!(f, ":{}", c)?;
                }
                if optional {
                    f.write_str("?")?;
                }
                f.write_str("}")
            }
        }
    }
}
