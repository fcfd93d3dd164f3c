//! # Path Compiler
//!
//! Turns a raw path pattern such as `/users/{id}/files/file-{name}.json` into
//! a [`CompiledPath`]: an ordered list of `/`-separated [`Segment`]s, each made
//! of literal and placeholder [`Piece`]s.
//!
//! The same template drives both directions:
//!
//! - **Matching** - [`CompiledPath::regex_source`] builds one anchored regex
//!   with a named capture group per placeholder
//! - **Generation** - the generator walks the segments and substitutes values
//!
//! Compilation runs once per route at registration time. A route cache stores
//! the compiled template so production boots never call [`compile`].

mod core;
#[cfg(test)]
mod tests;

pub use self::core::{compile, CompiledPath, Piece, Segment};
