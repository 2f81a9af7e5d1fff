//! vellum: a bespoke Markdown-to-HTML engine.
//!
//! Two stages: [`parser::block::parse`] (with [`parser::inline`] handling
//! each line's text) decodes Markdown into an arena-allocated [`AstNode`]
//! tree; [`html::encode`] walks that tree back into indented HTML5. Both
//! directions are fatal-on-violation: see [`error`].

pub mod ctype;
pub mod error;
pub mod html;
pub mod nodes;
pub mod parser;
pub mod scanners;
pub mod strings;
pub mod toc;
pub mod traverse;

mod arena_tree;
mod dump;

#[cfg(test)]
mod tests;

use typed_arena::Arena;

pub use error::{DecodeError, EncodeError, FormatError};
pub use html::{encode, EncodeOptions};
pub use nodes::AstNode;
pub use toc::{to_toc, TocList, TocOptions};
pub use traverse::{traverse, TraversalPlugin};
pub use dump::dump;

/// Parses `markdown` into an AST rooted at a fresh node allocated in `arena`.
pub fn decode<'a>(arena: &'a Arena<AstNode<'a>>, markdown: &str) -> Result<&'a AstNode<'a>, DecodeError> {
    parser::block::parse(arena, markdown)
}

/// `decode` followed by `encode`, for callers with no need to inspect or
/// transform the tree in between.
pub fn format<'a>(arena: &'a Arena<AstNode<'a>>, markdown: &str) -> Result<String, FormatError> {
    let root = decode(arena, markdown)?;
    Ok(encode(root, EncodeOptions::default())?)
}
