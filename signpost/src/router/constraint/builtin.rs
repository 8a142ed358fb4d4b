//! Built-in constraints registered by `ConstraintRegistry::new`.

use std::str::FromStr;

use uuid::Uuid;

use crate::router::constraint::regex::ConstrainedSegmentRegex;
use crate::router::constraint::{ConstraintRegistry, Predicate};

type FactoryResult = Result<Box<Predicate>, String>;

pub(super) fn register_builtins(registry: &mut ConstraintRegistry) {
    registry.register("alpha", alpha);
    registry.register("int", |v: &str| v.parse::<i32>().is_ok());
    registry.register("long", |v: &str| v.parse::<i64>().is_ok());
    registry.register("bool", |v: &str| {
        v.eq_ignore_ascii_case("true") || v.eq_ignore_ascii_case("false")
    });
    registry.register("guid", guid);

    registry.register_with_args("minlength", min_length);
    registry.register_with_args("maxlength", max_length);
    registry.register_with_args("length", length);
    registry.register_with_args("min", min);
    registry.register_with_args("max", max);
    registry.register_with_args("range", range);
    registry.register_with_args("regex", regex);
}

fn alpha(v: &str) -> bool {
    !v.is_empty() && v.bytes().all(|b| b.is_ascii_alphabetic())
}

// 36 characters rules out the simple, braced and urn forms `Uuid::parse_str` also accepts.
fn guid(v: &str) -> bool {
    v.len() == 36 && Uuid::parse_str(v).is_ok()
}

fn min_length(args: &str) -> FactoryResult {
    let [min] = parse_args::<usize, 1>(args)?;
    Ok(Box::new(move |v: &str| v.chars().count() >= min))
}

fn max_length(args: &str) -> FactoryResult {
    let [max] = parse_args::<usize, 1>(args)?;
    Ok(Box::new(move |v: &str| v.chars().count() <= max))
}

fn length(args: &str) -> FactoryResult {
    if args.contains(',') {
        let [min, max] = parse_args::<usize, 2>(args)?;
        ordered(min, max)?;
        Ok(Box::new(move |v: &str| {
            let n = v.chars().count();
            n >= min && n <= max
        }))
    } else {
        let [exact] = parse_args::<usize, 1>(args)?;
        Ok(Box::new(move |v: &str| v.chars().count() == exact))
    }
}

fn min(args: &str) -> FactoryResult {
    let [min] = parse_args::<i64, 1>(args)?;
    Ok(Box::new(move |v: &str| {
        v.parse::<i64>().map_or(false, |n| n >= min)
    }))
}

fn max(args: &str) -> FactoryResult {
    let [max] = parse_args::<i64, 1>(args)?;
    Ok(Box::new(move |v: &str| {
        v.parse::<i64>().map_or(false, |n| n <= max)
    }))
}

fn range(args: &str) -> FactoryResult {
    let [min, max] = parse_args::<i64, 2>(args)?;
    ordered(min, max)?;
    Ok(Box::new(move |v: &str| {
        v.parse::<i64>().map_or(false, |n| n >= min && n <= max)
    }))
}

fn regex(args: &str) -> FactoryResult {
    let regex = ConstrainedSegmentRegex::new(args).map_err(|e| e.to_string())?;
    Ok(Box::new(move |v: &str| regex.is_match(v)))
}

fn parse_args<T, const N: usize>(args: &str) -> Result<[T; N], String>
where
    T: FromStr + Copy + Default,
{
    let parts: Vec<&str> = args.split(',').map(str::trim).collect();
    if parts.len() != N {
        return Err(format!(
            "expected {} argument(s), found {}",
            N,
            parts.len()
        ));
    }

    let mut values = [T::default(); N];
    for (value, part) in values.iter_mut().zip(parts) {
        *value = part
            .parse()
            .map_err(|_| format!("`{}` is not a valid argument", part))?;
    }
    Ok(values)
}

fn ordered<T>(min: T, max: T) -> Result<(), String>
where
    T: PartialOrd + std::fmt::Display,
{
    if min <= max {
        Ok(())
    } else {
        Err(format!("lower bound {} exceeds upper bound {}", min, max))
    }
}
