//! The document AST: one [`NodeValue`] tag per recognized element, wrapped
//! in the shared [`Ast`] envelope and linked into a tree via the arena-based
//! [`crate::arena_tree::Node`].
//!
//! Nodes are allocated in a `typed_arena::Arena<AstNode>` and linked by
//! `&'a` references; a `&'a AstNode<'a>` is as stable as an index for the
//! arena's lifetime, which is the "arena-plus-index" design a tree with
//! parent back-edges wants.

use std::cell::RefCell;
use std::fmt;

use indexmap::IndexMap;
use typed_arena::Arena;

use crate::arena_tree::Node;
use crate::ctype::is_escapable;

/// Per-column table alignment, derived from a table's separator row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

impl Align {
    pub fn as_str(self) -> &'static str {
        match self {
            Align::Left => "left",
            Align::Center => "center",
            Align::Right => "right",
        }
    }
}

impl fmt::Display for Align {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a node is formatted as a standalone, indented line (`Block`) or
/// inline within its parent's running line (`Inline`). Derived from the
/// node's [`NodeValue`] for every kind except [`NodeValue::Empty`], which a
/// caller may construct as either: the one node whose type isn't implied by
/// its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Block,
    Inline,
}

/// The AST node tag. Holds only the fields particular to that kind; shared
/// state (`level`, `attr`, `aligns`, the tree links) lives on [`Ast`].
#[derive(Debug, Clone)]
pub enum NodeValue {
    /// The tree root. Synthetic, `level == 0`, never has a parent.
    Root,
    /// A heading's sectioning container. `level` 1 renders as `<article>`,
    /// deeper as `<section>`.
    Section,
    /// `level` 1-6.
    Heading,
    Paragraph,
    UnorderedList,
    OrderedList,
    /// `level` mirrors its owning list's indentation depth.
    ListItem,
    DescriptionList,
    /// The wrapper a definition-list entry's `dt`+`dd` pair is placed in.
    Div,
    DescriptionTerm,
    DescriptionDetails,
    BlockQuote,
    /// Wraps the attribution link in a blockquote's `--- ` citation line.
    Cite,
    /// A fenced or custom-block code container; `lang`/`path` live in `attr`.
    Pre,
    /// An inline code span, always rendered with `translate="no"`.
    Code,
    Table,
    TableHead,
    /// `aligns` on the owning [`Ast`] carries the per-column alignment.
    TableBody,
    TableRow,
    TableHeaderCell,
    TableCell,
    Figure,
    /// Caption text for a `Figure`.
    FigureCaption(String),
    /// A `:::` custom block; its `class` attr is discarded at encode time.
    Details,
    Summary,
    /// A raw HTML block; each line is a literal, unescaped fragment.
    Html(String),
    /// `href` (and optional `title`) live in `attr`.
    Anchor,
    /// `src`, `alt`, optional `title` live in `attr`.
    Image,
    Emph,
    Strong,
    /// Leaf. The *unescaped* literal text.
    Text(String),
    /// Leaf. Emitted with no HTML-escaping at all.
    Raw(String),
    /// A transparent grouping container with no wrapping tag of its own.
    Empty,
}

impl NodeValue {
    /// The short lowercase tag used both in error messages and `dump`.
    pub fn name(&self) -> &'static str {
        match self {
            NodeValue::Root => "root",
            NodeValue::Section => "section",
            NodeValue::Heading => "heading",
            NodeValue::Paragraph => "p",
            NodeValue::UnorderedList => "ul",
            NodeValue::OrderedList => "ol",
            NodeValue::ListItem => "li",
            NodeValue::DescriptionList => "dl",
            NodeValue::Div => "div",
            NodeValue::DescriptionTerm => "dt",
            NodeValue::DescriptionDetails => "dd",
            NodeValue::BlockQuote => "blockquote",
            NodeValue::Cite => "cite",
            NodeValue::Pre => "pre",
            NodeValue::Code => "code",
            NodeValue::Table => "table",
            NodeValue::TableHead => "thead",
            NodeValue::TableBody => "tbody",
            NodeValue::TableRow => "tr",
            NodeValue::TableHeaderCell => "th",
            NodeValue::TableCell => "td",
            NodeValue::Figure => "figure",
            NodeValue::FigureCaption(_) => "figcaption",
            NodeValue::Details => "details",
            NodeValue::Summary => "summary",
            NodeValue::Html(_) => "html",
            NodeValue::Anchor => "a",
            NodeValue::Image => "img",
            NodeValue::Emph => "em",
            NodeValue::Strong => "strong",
            NodeValue::Text(_) => "text",
            NodeValue::Raw(_) => "raw",
            NodeValue::Empty => "empty",
        }
    }

    /// The kind a freshly constructed node of this value defaults to.
    pub fn default_kind(&self) -> NodeKind {
        match self {
            NodeValue::Anchor
            | NodeValue::Image
            | NodeValue::Emph
            | NodeValue::Strong
            | NodeValue::Code
            | NodeValue::Cite
            | NodeValue::Text(_)
            | NodeValue::Raw(_) => NodeKind::Inline,
            _ => NodeKind::Block,
        }
    }

    /// The literal text of a `text`/`raw`/`figcaption`/`html` node.
    pub fn text(&self) -> Option<&str> {
        match self {
            NodeValue::Text(t) | NodeValue::Raw(t) | NodeValue::FigureCaption(t) | NodeValue::Html(t) => {
                Some(t)
            }
            _ => None,
        }
    }

    pub fn text_mut(&mut self) -> Option<&mut String> {
        match self {
            NodeValue::Text(t) | NodeValue::Raw(t) | NodeValue::FigureCaption(t) | NodeValue::Html(t) => {
                Some(t)
            }
            _ => None,
        }
    }
}

/// An insertion-ordered attribute map. A plain `HashMap` can't express the
/// insertion-order-observable serialization the encoder requires, so this
/// wraps `indexmap::IndexMap`.
#[derive(Debug, Clone, Default)]
pub struct Attrs(IndexMap<String, Option<String>>);

impl Attrs {
    pub fn new() -> Self {
        Attrs(IndexMap::new())
    }

    /// Sets (or overwrites in place, preserving its original position) an
    /// attribute with a value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        let key = key.into();
        let value = value.into();
        match self.0.get_index_of(&key) {
            Some(i) => {
                self.0[i] = Some(value);
            }
            None => {
                self.0.insert(key, Some(value));
            }
        }
        self
    }

    /// Sets a valueless (boolean) attribute, e.g. `disabled`.
    pub fn set_flag(&mut self, key: impl Into<String>) -> &mut Self {
        let key = key.into();
        if !self.0.contains_key(&key) {
            self.0.insert(key, None);
        }
        self
    }

    pub fn get(&self, key: &str) -> Option<Option<&str>> {
        self.0.get(key).map(|v| v.as_deref())
    }

    pub fn remove(&mut self, key: &str) {
        self.0.shift_remove(key);
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_deref()))
    }
}

/// The shared envelope every [`NodeValue`] is wrapped in: the tag-specific
/// payload plus the fields every tag carries.
#[derive(Debug, Clone)]
pub struct Ast {
    pub value: NodeValue,
    pub kind: NodeKind,
    /// Depth used by headings/sections (1-6) and lists (indent/2). `0` when
    /// not meaningful for this node's kind.
    pub level: u8,
    pub attr: Attrs,
    /// Per-column alignment, set only on `tbody` nodes.
    pub aligns: Option<Vec<Align>>,
}

impl Ast {
    pub fn new(value: NodeValue) -> Self {
        let kind = value.default_kind();
        Ast {
            value,
            kind,
            level: 0,
            attr: Attrs::new(),
            aligns: None,
        }
    }

    pub fn with_level(value: NodeValue, level: u8) -> Self {
        let mut ast = Ast::new(value);
        ast.level = level;
        ast
    }

    /// Constructs an `empty` pseudo-container of the given kind.
    pub fn empty(kind: NodeKind) -> Self {
        Ast {
            value: NodeValue::Empty,
            kind,
            level: 0,
            attr: Attrs::new(),
            aligns: None,
        }
    }
}

/// A node in the document tree: [`Ast`] behind a `RefCell` for interior
/// mutability, bound to the arena's lifetime.
pub type AstNode<'a> = Node<'a, RefCell<Ast>>;

/// Allocates a new node in `arena`, detached from any parent.
pub fn make_node<'a>(arena: &'a Arena<AstNode<'a>>, ast: Ast) -> &'a AstNode<'a> {
    arena.alloc(Node::new(RefCell::new(ast)))
}

/// Removes the backslash before any escapable character, leaving everything
/// else untouched. Applied once, left to right.
pub fn unescape_inline(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut out = String::with_capacity(s.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'\\' && i + 1 < bytes.len() && is_escapable(bytes[i + 1]) {
            out.push(bytes[i + 1] as char);
            i += 2;
        } else {
            let start = i;
            i += 1;
            while i < bytes.len() && (bytes[i] & 0b1100_0000) == 0b1000_0000 {
                i += 1;
            }
            out.push_str(&s[start..i]);
        }
    }
    out
}

/// Appends a `text` child to `parent`, running the backslash-unescape rule.
/// Used for free-text inline runs; code/HTML block content is appended as
/// literal text directly, bypassing this unescape.
pub fn add_text<'a>(arena: &'a Arena<AstNode<'a>>, parent: &'a AstNode<'a>, s: &str) {
    if s.is_empty() {
        return;
    }
    let node = make_node(arena, Ast::new(NodeValue::Text(unescape_inline(s))));
    parent.append(node);
}

/// Appends a `text` child verbatim, with no unescaping (code blocks, raw
/// HTML lines).
pub fn add_literal_text<'a>(arena: &'a Arena<AstNode<'a>>, parent: &'a AstNode<'a>, s: &str) {
    let node = make_node(arena, Ast::new(NodeValue::Text(s.to_string())));
    parent.append(node);
}

/// Appends each of `children` to `parent`, in order.
pub fn append_children<'a, I>(parent: &'a AstNode<'a>, children: I)
where
    I: IntoIterator<Item = &'a AstNode<'a>>,
{
    for child in children {
        parent.append(child);
    }
}
