//! Typed, fatal errors. The dialect is fatal-on-violation (unlike CommonMark,
//! which never rejects input), so every decode/encode surface is fallible;
//! `thiserror` gives each variant a `Display` impl that embeds the offending
//! fragment, favoring typed errors over ad hoc strings wherever a stage can
//! actually fail.

use thiserror::Error;

/// Errors raised while turning source text into an AST.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// An inline production was preceded or followed by disallowed
    /// whitespace (not preceded by two spaces, not immediately followed by
    /// one space, not followed by two trailing spaces).
    #[error("whitespace violation near {line:?}")]
    Whitespace { line: String },

    /// A heading's level skipped more than one deeper than the currently
    /// open section.
    #[error("heading level {level} cannot follow open section level {current} near {line:?}")]
    Sectioning { level: u8, current: u8, line: String },

    /// A line didn't fit any recognizer and couldn't be treated as
    /// paragraph text in the current context (e.g. a bare `:` outside a
    /// description list, a table row with no open table).
    #[error("{message} near {line:?}")]
    Structural { message: String, line: String },

    /// A list item's continuation line was indented by an odd number of
    /// spaces.
    #[error("odd indent near {line:?}")]
    OddIndent { line: String },

    /// An inline delimiter (`*`, `**`, `` ` ``, `[`, `<`) was opened but
    /// never closed.
    #[error("unmatched {delimiter} near {line:?}")]
    UnmatchedDelimiter {
        delimiter: &'static str,
        line: String,
    },
}

/// Errors raised while walking an AST into HTML.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EncodeError {
    /// The walker reached a node shape it has no rendering rule for.
    #[error("no encoding rule for node {name:?}")]
    UnknownNode { name: &'static str },
}

/// `format` is literally `decode` then `encode`; this just tags which stage
/// failed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error(transparent)]
    Encode(#[from] EncodeError),
}
