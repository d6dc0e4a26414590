//! Path mini-language front end: lexing and interpretation of SVG `d`
//! attribute data.

pub mod command;
pub mod interpreter;
pub mod lexer;

/// Error policy applied uniformly across lexing and interpretation.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize,
)]
pub enum ParseMode {
    /// Legacy-compatible: malformed numerics, stray characters and
    /// unsupported commands are dropped; the result reflects the subset
    /// of the path that was successfully interpreted.
    #[default]
    Lenient,
    /// Fail at the first malformed literal, truncated argument list or
    /// unsupported command, carrying the byte offset.
    Strict,
}
