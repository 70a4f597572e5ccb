//! Command handlers.
//!
//! Handlers are synchronous: discovery blocks on filesystem checks and the
//! locator subprocess, so `main` runs them on the blocking pool. Each handler
//! renders to a `String` and prints it, so rendering can be tested directly.

pub mod decode_url;
pub mod explain;
pub mod find;
