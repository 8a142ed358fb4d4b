//! Helpers for processing request data.

pub mod path;
