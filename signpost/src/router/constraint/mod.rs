//! Defines the `ConstraintRegistry`, which maps constraint names used in route templates to
//! predicates over captured path segment values.
//!
//! The registry is populated explicitly before any route is registered and is read-only once it
//! has been handed to a `RouteTable`. Lookup by name happens when a route is added, so a
//! template naming an unknown constraint is rejected during setup rather than at request time.

mod builtin;
pub mod regex;

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use log::trace;

use crate::error::{Result, RouteError};
use crate::router::template::parse_constraint_ref;
use crate::router::template::segment::ConstraintRef;

/// A pure predicate over a single captured path segment.
pub type Predicate = dyn Fn(&str) -> bool + Send + Sync;

/// Builds a `Predicate` from the raw argument text of a constraint reference such as `min(1)`.
/// An `Err` carries a human readable reason and makes the referencing template malformed.
pub type PredicateFactory =
    dyn Fn(&str) -> ::std::result::Result<Box<Predicate>, String> + Send + Sync;

/// A resolved, named constraint ready to be applied to captured values.
#[derive(Clone)]
pub struct Constraint {
    name: String,
    predicate: Arc<Predicate>,
}

impl Constraint {
    /// Creates a `Constraint` from a name and a predicate.
    pub fn new<N, F>(name: N, predicate: F) -> Self
    where
        N: Into<String>,
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        Constraint {
            name: name.into(),
            predicate: Arc::new(predicate),
        }
    }

    /// The constraint as written in the template, e.g. `alpha` or `range(1,10)`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Applies the predicate to a captured value.
    pub fn is_match(&self, value: &str) -> bool {
        (self.predicate)(value)
    }
}

impl fmt::Debug for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Constraint")
            .field("name", &self.name)
            .finish()
    }
}

#[derive(Clone)]
enum Entry {
    Plain(Arc<Predicate>),
    WithArgs(Arc<PredicateFactory>),
}

/// Maps constraint names to predicates.
///
/// `ConstraintRegistry::new` includes the built-in constraints:
///
/// * `alpha` - one or more ASCII letters
/// * `int`, `long` - parses as a 32 / 64 bit signed integer
/// * `bool` - `true` or `false`, ignoring ASCII case
/// * `guid` - canonical hyphenated GUID form, e.g. `6f9619ff-8b86-d011-b42d-00c04fc964ff`
/// * `minlength(n)`, `maxlength(n)`, `length(n)`, `length(min,max)` - length in characters
/// * `min(n)`, `max(n)`, `range(min,max)` - 64 bit integer bounds, inclusive
/// * `regex(expr)` - the whole value matches `expr`
///
/// # Examples
///
/// ```rust
/// use signpost::router::constraint::ConstraintRegistry;
///
/// let mut registry = ConstraintRegistry::new();
/// registry.register("even", |v: &str| v.parse::<u64>().map_or(false, |n| n % 2 == 0));
///
/// let even = registry.resolve("even").unwrap();
/// assert!(even.is_match("42"));
/// assert!(!even.is_match("7"));
///
/// let range = registry.resolve("range(1,10)").unwrap();
/// assert!(range.is_match("10"));
/// assert!(!range.is_match("11"));
///
/// assert!(registry.resolve("slug").is_err());
/// ```
#[derive(Clone)]
pub struct ConstraintRegistry {
    entries: HashMap<String, Entry>,
}

impl ConstraintRegistry {
    /// Creates a registry holding the built-in constraints.
    pub fn new() -> Self {
        let mut registry = ConstraintRegistry::empty();
        builtin::register_builtins(&mut registry);
        registry
    }

    /// Creates a registry without any constraints.
    pub fn empty() -> Self {
        ConstraintRegistry {
            entries: HashMap::new(),
        }
    }

    /// Registers a constraint which takes no arguments. An existing constraint with the same name
    /// is replaced.
    pub fn register<F>(&mut self, name: &str, predicate: F)
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        trace!(" registering constraint `{}`", name);
        self.entries
            .insert(name.to_owned(), Entry::Plain(Arc::new(predicate)));
    }

    /// Registers a constraint which is written with an argument list, `name(args)`. The factory
    /// is called once per template referencing the constraint. An existing constraint with the
    /// same name is replaced.
    pub fn register_with_args<F>(&mut self, name: &str, factory: F)
    where
        F: Fn(&str) -> ::std::result::Result<Box<Predicate>, String> + Send + Sync + 'static,
    {
        trace!(" registering constraint `{}(..)`", name);
        self.entries
            .insert(name.to_owned(), Entry::WithArgs(Arc::new(factory)));
    }

    /// True when a constraint is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Resolves a constraint reference, written as in a template: `alpha` or `range(1,10)`.
    ///
    /// Fails with `RouteError::UnknownConstraint` when the name is not registered, and with
    /// `RouteError::MalformedTemplate` when the reference itself cannot be parsed or its
    /// arguments are rejected.
    pub fn resolve(&self, reference: &str) -> Result<Constraint> {
        let reference = parse_constraint_ref(reference, reference)?;
        self.resolve_ref(&reference, &reference.to_string())
    }

    /// Resolves a parsed `ConstraintRef`. `template` is used for error reporting only.
    pub(crate) fn resolve_ref(&self, reference: &ConstraintRef, template: &str) -> Result<Constraint> {
        let entry = self
            .entries
            .get(reference.name())
            .ok_or_else(|| RouteError::unknown_constraint(reference.name()))?;

        let predicate = match (entry, reference.args()) {
            (Entry::Plain(predicate), None) => predicate.clone(),
            (Entry::Plain(_), Some(_)) => {
                return Err(RouteError::malformed(
                    template,
                    format!("constraint `{}` does not take arguments", reference.name()),
                ))
            }
            (Entry::WithArgs(_), None) => {
                return Err(RouteError::malformed(
                    template,
                    format!("constraint `{}` requires an argument list", reference.name()),
                ))
            }
            (Entry::WithArgs(factory), Some(args)) => match factory(args) {
                Ok(predicate) => Arc::from(predicate),
                Err(reason) => {
                    return Err(RouteError::malformed(
                        template,
                        format!("invalid constraint `{}`: {}", reference, reason),
                    ))
                }
            },
        };

        Ok(Constraint {
            name: reference.to_string(),
            predicate,
        })
    }
}

impl Default for ConstraintRegistry {
    fn default() -> Self {
        ConstraintRegistry::new()
    }
}

impl fmt::Debug for ConstraintRegistry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut names: Vec<&String> = self.entries.keys().collect();
        names.sort();
        f.debug_struct("ConstraintRegistry")
            .field("constraints", &names)
            .finish()
    }
}
