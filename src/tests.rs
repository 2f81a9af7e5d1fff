//! Test aggregator: one file per concern under `src/tests/`.

use typed_arena::Arena;

use crate::nodes::AstNode;

/// Decodes then encodes `md` with default options, for tests that only
/// care about the resulting HTML.
fn render(md: &str) -> String {
    let arena = Arena::new();
    crate::format(&arena, md).expect("decode/encode should succeed")
}

/// Decodes `md` and hands the root to `f`, keeping the arena alive for the
/// duration of the closure.
fn with_ast<R>(md: &str, f: impl for<'a> FnOnce(&'a AstNode<'a>) -> R) -> R {
    let arena = Arena::new();
    let root = crate::decode(&arena, md).expect("decode should succeed");
    f(root)
}

mod blocks;
mod core;
mod errors;
mod inline;
mod lists;
mod tables;
mod toc;
