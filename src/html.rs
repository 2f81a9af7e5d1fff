//! The HTML encoder: walks the AST and emits indented HTML5 with per-node
//! formatting rules (attribute quoting, block/inline mixing, section
//! nesting).
//!
//! Recursion depth here tracks document nesting depth, not the size of the
//! input (unlike a line-at-a-time parse loop, which would blow the stack on
//! tail recursion over a large document) — a plain recursive walk is the
//! more obviously correct shape, so that's what this uses.

use crate::ctype::is_attr_unsafe;
use crate::error::EncodeError;
use crate::nodes::{AstNode, Attrs, NodeKind, NodeValue};

/// Options for [`encode`].
#[derive(Debug, Clone, Copy)]
pub struct EncodeOptions {
    /// The starting indentation column.
    pub indent: usize,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        EncodeOptions { indent: 0 }
    }
}

/// Walks `root` and serializes it to indented HTML5.
pub fn encode<'a>(root: &'a AstNode<'a>, options: EncodeOptions) -> Result<String, EncodeError> {
    let mut out = String::new();
    encode_node(root, options.indent, &mut out)?;
    Ok(out)
}

enum Group<'a> {
    Inline(Vec<&'a AstNode<'a>>),
    Block(&'a AstNode<'a>),
}

fn group_children<'a>(node: &'a AstNode<'a>) -> Vec<Group<'a>> {
    let mut groups = Vec::new();
    let mut pending = Vec::new();
    for child in node.children() {
        let is_inline = matches!(child.data.borrow().kind, NodeKind::Inline);
        if is_inline {
            pending.push(child);
        } else {
            if !pending.is_empty() {
                groups.push(Group::Inline(std::mem::take(&mut pending)));
            }
            groups.push(Group::Block(child));
        }
    }
    if !pending.is_empty() {
        groups.push(Group::Inline(pending));
    }
    groups
}

fn all_inline<'a>(node: &'a AstNode<'a>) -> bool {
    node.children()
        .all(|c| matches!(c.data.borrow().kind, NodeKind::Inline))
}

fn indent_str(indent: usize) -> String {
    " ".repeat(indent)
}

/// `&`, `<`, `>`, `"`, `'`, plus the exact whole-string match `"--- "`
/// becoming an em dash.
fn escape_text(s: &str) -> String {
    if s == "--- " {
        return "&mdash; ".to_string();
    }
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}

/// An attribute key is always double-quoted for these; everything else is
/// quoted only when it contains an attribute-unsafe character.
fn needs_quotes(key: &str, value: &str) -> bool {
    matches!(key, "title" | "alt" | "cite" | "href" | "id") || value.bytes().any(is_attr_unsafe)
}

fn write_attr_value(out: &mut String, key: &str, value: &str) {
    out.push('=');
    if needs_quotes(key, value) {
        out.push('"');
        out.push_str(&value.replace('"', "&quot;"));
        out.push('"');
    } else {
        out.push_str(value);
    }
}

/// Serializes `attrs`: `_`-prefixed keys are suppressed,
/// `align` is rewritten to `class=align-<value>`, a null value emits a bare
/// key. `extra_skip` additionally suppresses keys specific to one caller
/// (e.g. `details` discards `class`).
fn write_attrs(out: &mut String, attrs: &Attrs, extra_skip: &[&str]) {
    for (key, value) in attrs.iter() {
        if key.starts_with('_') || extra_skip.contains(&key) {
            continue;
        }
        if key == "align" {
            if let Some(value) = value {
                out.push_str(" class=align-");
                out.push_str(value);
            }
            continue;
        }
        out.push(' ');
        out.push_str(key);
        if let Some(value) = value {
            write_attr_value(out, key, value);
        }
    }
}

fn open_tag(out: &mut String, tag: &str, attrs: &Attrs, extra_skip: &[&str]) {
    out.push('<');
    out.push_str(tag);
    write_attrs(out, attrs, extra_skip);
    out.push('>');
}

fn encode_node<'a>(node: &'a AstNode<'a>, indent: usize, out: &mut String) -> Result<(), EncodeError> {
    let value = node.data.borrow().value.clone();
    match value {
        NodeValue::Root => {
            for child in node.children() {
                encode_node(child, indent, out)?;
            }
        }
        NodeValue::Section => encode_section(node, indent, out)?,
        NodeValue::Heading => encode_heading(node, indent, out)?,
        NodeValue::Paragraph => encode_mixed_inline(node, "p", indent, out)?,
        NodeValue::ListItem => encode_mixed_inline(node, "li", indent, out)?,
        NodeValue::Pre => encode_pre(node, indent, out),
        NodeValue::DescriptionTerm => encode_dt_dd(node, "dt", indent, out)?,
        NodeValue::DescriptionDetails => encode_dt_dd(node, "dd", indent, out)?,
        NodeValue::TableHeaderCell => encode_single_line(node, "th", indent, out)?,
        NodeValue::TableCell => encode_single_line(node, "td", indent, out)?,
        NodeValue::Summary => encode_single_line(node, "summary", indent, out)?,
        NodeValue::FigureCaption(text) => {
            out.push_str(&indent_str(indent));
            out.push_str("<figcaption>");
            out.push_str(&escape_text(&text));
            out.push_str("</figcaption>\n");
        }
        NodeValue::Details => encode_default_block(node, "details", indent, out, &["class"])?,
        NodeValue::Html(text) => {
            out.push_str(&indent_str(indent));
            out.push_str(&text);
            out.push('\n');
        }
        NodeValue::Text(text) => {
            out.push_str(&indent_str(indent));
            out.push_str(&escape_text(&text));
        }
        NodeValue::Raw(text) => {
            out.push_str(&indent_str(indent));
            out.push_str(&text);
        }
        NodeValue::Anchor => encode_anchor(node, out)?,
        NodeValue::Empty => {
            let kind = node.data.borrow().kind;
            let child_indent = match kind {
                NodeKind::Inline => 0,
                NodeKind::Block => indent,
            };
            for child in node.children() {
                encode_node(child, child_indent, out)?;
            }
        }
        other => encode_default(node, &other, indent, out)?,
    }
    Ok(())
}

fn encode_section<'a>(node: &'a AstNode<'a>, indent: usize, out: &mut String) -> Result<(), EncodeError> {
    let ast = node.data.borrow();
    let tag = match ast.attr.get("_forced_tag").flatten() {
        Some(tag) => tag.to_string(),
        None if ast.level == 1 => "article".to_string(),
        None => "section".to_string(),
    };
    let attrs = ast.attr.clone();
    drop(ast);
    encode_default_block_tag(node, &tag, indent, out, &["_forced_tag"], &attrs)
}

fn encode_heading<'a>(node: &'a AstNode<'a>, indent: usize, out: &mut String) -> Result<(), EncodeError> {
    let (level, attrs) = {
        let ast = node.data.borrow();
        (ast.level, ast.attr.clone())
    };
    let tag = format!("h{level}");
    out.push_str(&indent_str(indent));
    open_tag(out, &tag, &attrs, &[]);
    for child in node.children() {
        encode_node(child, 0, out)?;
    }
    out.push_str("</");
    out.push_str(&tag);
    out.push_str(">\n");
    Ok(())
}

/// `p`/`li`: group consecutive inline children into line-groups; block
/// children remain standalone indented blocks. Never emits a closing tag
/// (HTML5's optional-closing-tag rule for these elements), matching the
/// open-only form even when block children are also present.
fn encode_mixed_inline<'a>(
    node: &'a AstNode<'a>,
    tag: &str,
    indent: usize,
    out: &mut String,
) -> Result<(), EncodeError> {
    let attrs = node.data.borrow().attr.clone();
    out.push_str(&indent_str(indent));
    open_tag(out, tag, &attrs, &[]);

    let groups = group_children(node);
    if groups.is_empty() {
        out.push('\n');
        return Ok(());
    }

    let mut first = true;
    for group in groups {
        match group {
            Group::Inline(nodes) => {
                if !first {
                    out.push_str(&indent_str(indent + 2));
                }
                for n in nodes {
                    encode_node(n, 0, out)?;
                }
                out.push('\n');
            }
            Group::Block(child) => {
                if first {
                    out.push('\n');
                }
                encode_node(child, indent + 2, out)?;
            }
        }
        first = false;
    }
    Ok(())
}

/// `dt`/`dd`: open-only single line when every child is inline; full
/// open/indented-children/close otherwise.
fn encode_dt_dd<'a>(node: &'a AstNode<'a>, tag: &str, indent: usize, out: &mut String) -> Result<(), EncodeError> {
    let attrs = node.data.borrow().attr.clone();
    if all_inline(node) {
        out.push_str(&indent_str(indent));
        open_tag(out, tag, &attrs, &[]);
        for child in node.children() {
            encode_node(child, 0, out)?;
        }
        out.push('\n');
    } else {
        encode_default_block_tag(node, tag, indent, out, &[], &attrs)?;
    }
    Ok(())
}

fn encode_single_line<'a>(node: &'a AstNode<'a>, tag: &str, indent: usize, out: &mut String) -> Result<(), EncodeError> {
    let attrs = node.data.borrow().attr.clone();
    out.push_str(&indent_str(indent));
    open_tag(out, tag, &attrs, &[]);
    for child in node.children() {
        encode_node(child, 0, out)?;
    }
    out.push_str("</");
    out.push_str(tag);
    out.push_str(">\n");
    Ok(())
}

fn encode_pre<'a>(node: &'a AstNode<'a>, indent: usize, out: &mut String) {
    let ast = node.data.borrow();
    let lang = ast.attr.get("lang").flatten().map(str::to_string);
    let path = ast.attr.get("path").flatten().map(str::to_string);
    drop(ast);

    out.push_str(&indent_str(indent));
    out.push_str("<pre");
    if let Some(lang) = &lang {
        out.push_str(" class");
        write_attr_value(out, "class", lang);
        out.push_str(" data-code");
        write_attr_value(out, "data-code", lang);
    }
    if let Some(path) = &path {
        out.push_str(" data-path");
        write_attr_value(out, "data-path", path);
    }
    out.push('>');

    out.push_str("<code translate=no");
    if let Some(lang) = &lang {
        out.push_str(" class=language-");
        out.push_str(lang);
    }
    out.push('>');

    let mut first = true;
    for child in node.children() {
        if !first {
            out.push('\n');
        }
        first = false;
        if let NodeValue::Text(text) = &child.data.borrow().value {
            out.push_str(&escape_text(text));
        }
    }
    out.push_str("</code></pre>\n");
}

/// `a`: the inline parser stores `href` with its `(`/`)` escapes intact (it
/// needed them to find the closing paren without ending the link early);
/// those are stripped here, once, before emission.
fn encode_anchor<'a>(node: &'a AstNode<'a>, out: &mut String) -> Result<(), EncodeError> {
    let ast = node.data.borrow();
    let href = ast.attr.get("href").flatten().map(crate::nodes::unescape_inline);
    let mut attrs = ast.attr.clone();
    drop(ast);
    if let Some(href) = href {
        attrs.set("href", href);
    }
    open_tag(out, "a", &attrs, &[]);
    drop(attrs);
    for child in node.children() {
        encode_node(child, 0, out)?;
    }
    out.push_str("</a>");
    Ok(())
}

fn encode_default_block<'a>(
    node: &'a AstNode<'a>,
    tag: &str,
    indent: usize,
    out: &mut String,
    extra_skip: &[&str],
) -> Result<(), EncodeError> {
    let attrs = node.data.borrow().attr.clone();
    encode_default_block_tag(node, tag, indent, out, extra_skip, &attrs)
}

fn encode_default_block_tag<'a>(
    node: &'a AstNode<'a>,
    tag: &str,
    indent: usize,
    out: &mut String,
    extra_skip: &[&str],
    attrs: &Attrs,
) -> Result<(), EncodeError> {
    out.push_str(&indent_str(indent));
    open_tag(out, tag, attrs, extra_skip);
    out.push('\n');

    let mut any_children = false;
    for child in node.children() {
        any_children = true;
        encode_node(child, indent + 2, out)?;
    }
    if any_children {
        out.push_str(&indent_str(indent));
        out.push_str("</");
        out.push_str(tag);
        out.push_str(">\n");
    }
    Ok(())
}

/// The fallback dispatch for node shapes with no special-cased rule:
/// `ul`, `ol`, `dl`, `div`, `blockquote`, `table`, `thead`, `tbody`, `tr`,
/// `figure`, `cite`, `code`, `em`, `strong`, `img`.
fn encode_default<'a>(node: &'a AstNode<'a>, value: &NodeValue, indent: usize, out: &mut String) -> Result<(), EncodeError> {
    let kind = node.data.borrow().kind;
    match kind {
        NodeKind::Inline => {
            let attrs = node.data.borrow().attr.clone();
            open_tag(out, value.name(), &attrs, &[]);
            let has_children = node.children().next().is_some();
            if has_children {
                for child in node.children() {
                    encode_node(child, 0, out)?;
                }
                out.push_str("</");
                out.push_str(value.name());
                out.push('>');
            }
            Ok(())
        }
        NodeKind::Block => encode_default_block(node, value.name(), indent, out, &[]),
    }
}
