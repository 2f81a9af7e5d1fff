//! The inline parser: a hand-written, character-by-character cursor over a
//! single line, rather than a regex engine (the block scanners can afford
//! anchored regex-style matching; inline productions nest and backtrack
//! enough that hand-written scanning stays the clearer approach).

use typed_arena::Arena;

use crate::ctype::is_escapable;
use crate::error::DecodeError;
use crate::nodes::{make_node, unescape_inline, Ast, AstNode, NodeValue};
use crate::strings::trim;

/// Parses `line` into a flat list of inline nodes, in source order.
pub fn parse_inlines<'a>(
    arena: &'a Arena<AstNode<'a>>,
    line: &str,
) -> Result<Vec<&'a AstNode<'a>>, DecodeError> {
    let mut subject = Subject::new(arena, line);
    subject.parse_to_end()
}

/// Merges consecutive `text` nodes into one (the heading merge pass).
pub fn coalesce_text(nodes: Vec<&'_ AstNode<'_>>) -> Vec<&'_ AstNode<'_>> {
    let mut out: Vec<&AstNode> = Vec::with_capacity(nodes.len());
    for node in nodes {
        let is_text = matches!(node.data.borrow().value, NodeValue::Text(_));
        if is_text {
            if let Some(prev) = out.last() {
                let prev_is_text = matches!(prev.data.borrow().value, NodeValue::Text(_));
                if prev_is_text {
                    let addition = match &node.data.borrow().value {
                        NodeValue::Text(t) => t.clone(),
                        _ => unreachable!(),
                    };
                    if let NodeValue::Text(t) = &mut prev.data.borrow_mut().value {
                        t.push_str(&addition);
                    }
                    continue;
                }
            }
        }
        out.push(node);
    }
    out
}

struct Subject<'a, 'i> {
    arena: &'a Arena<AstNode<'a>>,
    input: &'i str,
    pos: usize,
}

impl<'a, 'i> Subject<'a, 'i> {
    fn new(arena: &'a Arena<AstNode<'a>>, input: &'i str) -> Self {
        Subject {
            arena,
            input,
            pos: 0,
        }
    }

    fn eof(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn peek_byte(&self) -> Option<u8> {
        self.input.as_bytes().get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.input.as_bytes().get(self.pos + offset).copied()
    }

    fn rest(&self) -> &'i str {
        &self.input[self.pos..]
    }

    fn whitespace_error(&self) -> DecodeError {
        DecodeError::Whitespace {
            line: self.input.to_string(),
        }
    }

    /// `pending` must not end with two spaces before a production starts.
    fn check_not_preceded_by_double_space(&self, pending_start: usize) -> Result<(), DecodeError> {
        let pending = &self.input[pending_start..self.pos];
        if pending.len() >= 2 && pending.as_bytes()[pending.len() - 1] == b' ' && pending.as_bytes()[pending.len() - 2] == b' ' {
            return Err(self.whitespace_error());
        }
        Ok(())
    }

    /// A production must not be immediately followed by two spaces. One
    /// ordinary separating space (`**bold** word`) is fine; a close
    /// delimiter hugging a double space is not.
    fn check_not_followed_by_double_space(&self) -> Result<(), DecodeError> {
        if self.peek_byte() == Some(b' ') && self.peek_at(1) == Some(b' ') {
            return Err(self.whitespace_error());
        }
        Ok(())
    }

    fn parse_to_end(&mut self) -> Result<Vec<&'a AstNode<'a>>, DecodeError> {
        let mut out = Vec::new();
        let mut pending_start = self.pos;

        while !self.eof() {
            let byte = self.peek_byte().unwrap();

            if byte == b'\\' {
                if let Some(next) = self.peek_at(1) {
                    if is_escapable(next) {
                        self.pos += 2;
                        continue;
                    }
                }
                self.pos += 1;
                continue;
            }

            let trigger_start = self.pos;
            let production = match byte {
                b'!' if self.peek_at(1) == Some(b'[') => self.try_image(pending_start)?,
                b'[' => self.try_link(pending_start)?,
                b'*' if self.peek_at(1) == Some(b'*') => self.try_strong(pending_start)?,
                b'*' => self.try_emph(pending_start)?,
                b'`' => self.try_code(pending_start)?,
                b'<' => self.try_autolink_angle(pending_start)?,
                b'h' if self.rest().starts_with("http://") || self.rest().starts_with("https://") => {
                    self.try_bare_autolink(pending_start)?
                }
                b'>' if self.peek_at(1) == Some(b' ') && (self.pos == 0 || self.input.as_bytes()[self.pos - 1] == b' ') => {
                    self.try_inline_blockquote(pending_start)?
                }
                _ => None,
            };

            match production {
                Some(node) => {
                    self.flush_pending_to(&mut out, pending_start, trigger_start);
                    out.push(node);
                    pending_start = self.pos;
                }
                None => {
                    // Not recognized as (or abandoned) a production: the
                    // trigger byte becomes ordinary pending text.
                    self.pos = trigger_start + char_len_at(self.input, trigger_start);
                }
            }
        }

        self.flush_pending_to(&mut out, pending_start, self.pos);
        Ok(out)
    }

    fn flush_pending_to(&self, out: &mut Vec<&'a AstNode<'a>>, start: usize, end: usize) {
        if end > start {
            let text = &self.input[start..end];
            if !text.is_empty() {
                out.push(make_text(self.arena, text));
            }
        }
    }

    fn try_strong(&mut self, pending_start: usize) -> Result<Option<&'a AstNode<'a>>, DecodeError> {
        self.check_not_preceded_by_double_space(pending_start)?;
        let start = self.pos + 2;
        let close = find_unescaped(&self.input[start..], "**")
            .ok_or(DecodeError::UnmatchedDelimiter {
                delimiter: "**",
                line: self.input.to_string(),
            })?;
        let inner = &self.input[start..start + close];
        self.pos = start + close + 2;
        self.check_not_followed_by_double_space()?;
        let children = parse_restricted(self.arena, inner, Restriction::NoEmphasis)?;
        let node = make_node(self.arena, Ast::new(NodeValue::Strong));
        for child in children {
            node.append(child);
        }
        Ok(Some(node))
    }

    fn try_emph(&mut self, pending_start: usize) -> Result<Option<&'a AstNode<'a>>, DecodeError> {
        self.check_not_preceded_by_double_space(pending_start)?;
        let start = self.pos + 1;
        let close = find_unescaped(&self.input[start..], "*")
            .ok_or(DecodeError::UnmatchedDelimiter {
                delimiter: "*",
                line: self.input.to_string(),
            })?;
        let inner = &self.input[start..start + close];
        self.pos = start + close + 1;
        self.check_not_followed_by_double_space()?;
        let children = parse_restricted(self.arena, inner, Restriction::NoStrong)?;
        let node = make_node(self.arena, Ast::new(NodeValue::Emph));
        for child in children {
            node.append(child);
        }
        Ok(Some(node))
    }

    fn try_code(&mut self, pending_start: usize) -> Result<Option<&'a AstNode<'a>>, DecodeError> {
        self.check_not_preceded_by_double_space(pending_start)?;
        let start = self.pos + 1;
        let close = self.input[start..].find('`').ok_or(DecodeError::UnmatchedDelimiter {
            delimiter: "`",
            line: self.input.to_string(),
        })?;
        let literal = &self.input[start..start + close];
        self.pos = start + close + 1;
        self.check_not_followed_by_double_space()?;
        let node = make_node(self.arena, Ast::new(NodeValue::Text(literal.to_string())));
        let wrapper = make_node(self.arena, Ast::new(NodeValue::Code));
        wrapper.data.borrow_mut().attr.set("translate", "no");
        wrapper.append(node);
        Ok(Some(wrapper))
    }

    fn try_link(&mut self, pending_start: usize) -> Result<Option<&'a AstNode<'a>>, DecodeError> {
        let Some(text_end) = find_balanced_bracket_close(&self.input[self.pos + 1..]) else {
            // No `](` before line end: the `[...]` is literal text, fall through.
            return Ok(None);
        };
        let text_end = self.pos + 1 + text_end;
        if self.input.as_bytes().get(text_end) != Some(&b']')
            || self.input.as_bytes().get(text_end + 1) != Some(&b'(')
        {
            return Ok(None);
        }
        self.check_not_preceded_by_double_space(pending_start)?;
        let link_text = &self.input[self.pos + 1..text_end];
        let url_start = text_end + 2;
        let Some(url_len) = find_unescaped(&self.input[url_start..], ")") else {
            return Ok(None);
        };
        let href = &self.input[url_start..url_start + url_len];
        self.pos = url_start + url_len + 1;
        self.check_not_followed_by_double_space()?;

        let children = parse_restricted(self.arena, link_text, Restriction::LinkText)?;
        let node = make_node(self.arena, Ast::new(NodeValue::Anchor));
        node.data.borrow_mut().attr.set("href", href);
        for child in children {
            node.append(child);
        }
        Ok(Some(node))
    }

    fn try_image(&mut self, pending_start: usize) -> Result<Option<&'a AstNode<'a>>, DecodeError> {
        self.check_not_preceded_by_double_space(pending_start)?;
        let bracket_start = self.pos + 1; // at '['
        let Some(alt_len) = self.input[bracket_start + 1..].find(']') else {
            return Ok(None);
        };
        let alt_end = bracket_start + 1 + alt_len;
        if self.input.as_bytes().get(alt_end + 1) != Some(&b'(') {
            return Ok(None);
        }
        let alt = &self.input[bracket_start + 1..alt_end];
        let paren_start = alt_end + 2;
        let Some(paren_len) = find_unescaped(&self.input[paren_start..], ")") else {
            return Ok(None);
        };
        let inside = &self.input[paren_start..paren_start + paren_len];
        self.pos = paren_start + paren_len + 1;
        self.check_not_followed_by_double_space()?;

        let (src, title) = split_image_src_title(inside)?;

        let node = make_node(self.arena, Ast::new(NodeValue::Image));
        {
            let mut ast = node.data.borrow_mut();
            ast.attr.set("loading", "lazy");
            ast.attr.set("decoding", "async");
            ast.attr.set("src", unescape_inline(&src));
            ast.attr.set("alt", unescape_inline(alt));
            if let Some(title) = title {
                ast.attr.set("title", title);
            }
        }
        Ok(Some(node))
    }

    fn try_autolink_angle(&mut self, pending_start: usize) -> Result<Option<&'a AstNode<'a>>, DecodeError> {
        let Some(close) = self.input[self.pos + 1..].find('>') else {
            // No `>`: emit `<` + rest as literal text.
            return Ok(None);
        };
        self.check_not_preceded_by_double_space(pending_start)?;
        let url = &self.input[self.pos + 1..self.pos + 1 + close];
        self.pos = self.pos + 1 + close + 1;
        self.check_not_followed_by_double_space()?;
        let node = make_node(self.arena, Ast::new(NodeValue::Anchor));
        node.data.borrow_mut().attr.set("href", url);
        let text = make_node(self.arena, Ast::new(NodeValue::Text(url.to_string())));
        node.append(text);
        Ok(Some(node))
    }

    fn try_bare_autolink(&mut self, pending_start: usize) -> Result<Option<&'a AstNode<'a>>, DecodeError> {
        self.check_not_preceded_by_double_space(pending_start)?;
        let len = self
            .rest()
            .bytes()
            .take_while(|&b| b != b' ' && b != b')' && b != b'\t')
            .count();
        let url = &self.input[self.pos..self.pos + len];
        self.pos += len;
        // A bare autolink has no closing delimiter of its own — it's
        // bounded by the space/tab/`)` that ends the scan above, so there's
        // nothing trailing left to police here.
        let node = make_node(self.arena, Ast::new(NodeValue::Anchor));
        node.data.borrow_mut().attr.set("href", url);
        let text = make_node(self.arena, Ast::new(NodeValue::Text(url.to_string())));
        node.append(text);
        Ok(Some(node))
    }

    fn try_inline_blockquote(&mut self, pending_start: usize) -> Result<Option<&'a AstNode<'a>>, DecodeError> {
        self.check_not_preceded_by_double_space(pending_start)?;
        let rest = &self.input[self.pos + 2..];
        self.pos = self.input.len();
        let blockquote = make_node(self.arena, Ast::new(NodeValue::BlockQuote));
        let p = make_node(self.arena, Ast::new(NodeValue::Paragraph));
        let children = parse_inlines(self.arena, rest)?;
        for child in children {
            p.append(child);
        }
        blockquote.append(p);
        Ok(Some(blockquote))
    }
}

/// Which productions are suppressed while parsing a nested content span.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Restriction {
    /// Inside `strong`: `em` may not nest.
    NoEmphasis,
    /// Inside `em`: `strong` may not nest (kept symmetric with `NoEmphasis`).
    NoStrong,
    /// Inside a link's text: brackets balance once, no nested links.
    LinkText,
}

/// Parses a nested content span with one production suppressed, per the
/// "code may nest, em/strong/links do not re-nest" rule.
fn parse_restricted<'a>(
    arena: &'a Arena<AstNode<'a>>,
    input: &str,
    restriction: Restriction,
) -> Result<Vec<&'a AstNode<'a>>, DecodeError> {
    let mut out = Vec::new();
    let mut pending_start = 0usize;
    let mut pos = 0usize;
    let bytes = input.as_bytes();

    while pos < bytes.len() {
        let byte = bytes[pos];

        if byte == b'\\' {
            if let Some(&next) = bytes.get(pos + 1) {
                if is_escapable(next) {
                    pos += 2;
                    continue;
                }
            }
            pos += 1;
            continue;
        }

        if byte == b'`' {
            if let Some(close) = input[pos + 1..].find('`') {
                if pending_start < pos {
                    out.push(make_text(arena, &input[pending_start..pos]));
                }
                let literal = &input[pos + 1..pos + 1 + close];
                let text = make_node(arena, Ast::new(NodeValue::Text(literal.to_string())));
                let code = make_node(arena, Ast::new(NodeValue::Code));
                code.data.borrow_mut().attr.set("translate", "no");
                code.append(text);
                out.push(code);
                pos = pos + 1 + close + 1;
                pending_start = pos;
                continue;
            }
            return Err(DecodeError::UnmatchedDelimiter {
                delimiter: "`",
                line: input.to_string(),
            });
        }

        if restriction == Restriction::LinkText && byte == b'[' {
            // Balanced once: a nested `[...]` is kept as literal text.
            if let Some(close) = input[pos + 1..].find(']') {
                pos = pos + 1 + close + 1;
                continue;
            }
        }

        match (restriction, byte) {
            (Restriction::NoEmphasis, b'*') => {
                pos += 1;
            }
            (Restriction::NoStrong, b'*') if bytes.get(pos + 1) == Some(&b'*') => {
                pos += 2;
            }
            _ => {
                pos += char_len_at(input, pos);
            }
        }
    }

    if pending_start < input.len() {
        out.push(make_text(arena, &input[pending_start..]));
    }
    Ok(out)
}

fn make_text<'a>(arena: &'a Arena<AstNode<'a>>, s: &str) -> &'a AstNode<'a> {
    make_node(arena, Ast::new(NodeValue::Text(unescape_inline(s))))
}

/// Finds `needle` in `s`, skipping escaped characters and backtick code
/// spans (so a `*` inside `` `a*b` `` never terminates an outer emphasis).
fn find_unescaped(s: &str, needle: &str) -> Option<usize> {
    let bytes = s.as_bytes();
    let nlen = needle.len();
    let mut i = 0;
    while i + nlen <= bytes.len() {
        if bytes[i] == b'\\' {
            i += 2;
            continue;
        }
        if bytes[i] == b'`' {
            if let Some(end) = s[i + 1..].find('`') {
                i = i + 1 + end + 1;
                continue;
            }
        }
        if &s[i..i + nlen] == needle {
            return Some(i);
        }
        i += 1;
    }
    None
}

/// Finds the `]` closing a link's text span, allowing one level of nested
/// balanced `[...]`.
fn find_balanced_bracket_close(s: &str) -> Option<usize> {
    let bytes = s.as_bytes();
    let mut depth = 0i32;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' if i + 1 < bytes.len() => i += 1,
            b'[' => depth += 1,
            b']' => {
                if depth == 0 {
                    return Some(i);
                }
                depth -= 1;
            }
            _ => {}
        }
        i += 1;
    }
    None
}

fn split_image_src_title(inside: &str) -> Result<(String, Option<String>), DecodeError> {
    let inside = trim(inside);
    let Some(space) = inside.find(' ') else {
        return Ok((inside.to_string(), None));
    };
    let src = &inside[..space];
    let rest = trim(&inside[space + 1..]);
    if rest.len() < 2 {
        return Ok((inside.to_string(), None));
    }
    let delim = rest.as_bytes()[0];
    if (delim != b'\'' && delim != b'"') || rest.as_bytes()[rest.len() - 1] != delim {
        return Ok((inside.to_string(), None));
    }
    let title = &rest[1..rest.len() - 1];
    Ok((src.to_string(), Some(title.to_string())))
}

fn char_len_at(s: &str, pos: usize) -> usize {
    s[pos..].chars().next().map_or(1, |c| c.len_utf8())
}
