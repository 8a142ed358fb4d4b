//! Helpers shared by the router and by applications embedding it.

pub mod http;
