//! The block parser: consumes the line stream, manages block context
//! (sections, lists, tables, code fences, custom blocks), and delegates
//! inline text to [`crate::parser::inline`].
//!
//! An explicit loop over lines with a single `current` cursor node, rather
//! than tail recursion, to avoid stack blow-up on large documents.

use typed_arena::Arena;

use crate::error::DecodeError;
use crate::nodes::{add_literal_text, add_text, make_node, Align, Ast, AstNode, NodeValue};
use crate::parser::inline::{coalesce_text, parse_inlines};
use crate::scanners::{self, CustomBlockMarker};

#[derive(Clone, Copy, PartialEq, Eq)]
enum ListKind {
    Ordered,
    Unordered,
}

impl ListKind {
    fn node_value(self) -> NodeValue {
        match self {
            ListKind::Ordered => NodeValue::OrderedList,
            ListKind::Unordered => NodeValue::UnorderedList,
        }
    }

    fn matches(self, value: &NodeValue) -> bool {
        matches!(
            (self, value),
            (ListKind::Ordered, NodeValue::OrderedList) | (ListKind::Unordered, NodeValue::UnorderedList)
        )
    }
}

/// Parses `markdown` into an AST rooted at a fresh `root` node allocated in
/// `arena`.
pub fn parse<'a>(arena: &'a Arena<AstNode<'a>>, markdown: &str) -> Result<&'a AstNode<'a>, DecodeError> {
    let root = make_node(arena, Ast::with_level(NodeValue::Root, 0));
    let mut parser = Parser {
        arena,
        cursor: root,
        html_lines: Vec::new(),
    };
    for line in markdown.split('\n') {
        parser.process_line(line)?;
    }
    parser.flush_html();
    Ok(root)
}

/// Holds the cursor — the block parser's current attachment point for new
/// nodes — plus the in-progress accumulation of a raw HTML block.
struct Parser<'a> {
    arena: &'a Arena<AstNode<'a>>,
    cursor: &'a AstNode<'a>,
    html_lines: Vec<String>,
}

impl<'a> Parser<'a> {
    fn process_line(&mut self, line: &str) -> Result<(), DecodeError> {
        // Inside an already-opened raw HTML block: capture every line
        // verbatim (it need not itself look like HTML) until a blank line
        // closes the block.
        if !self.html_lines.is_empty() {
            if scanners::is_empty_line(line) {
                self.flush_html();
                self.cursor = self.rise_to_section();
                return Ok(());
            }
            self.html_lines.push(line.to_string());
            return Ok(());
        }

        // Steps 1-2: code fence / inside a `pre`.
        if self.cursor_is(|v| matches!(v, NodeValue::Pre)) {
            if scanners::code_fence(line).is_some() {
                self.cursor = self.cursor.parent().expect("pre always has a parent");
                return Ok(());
            }
            add_literal_text(self.arena, self.cursor, line);
            return Ok(());
        }
        if let Some((lang, path)) = scanners::code_fence(line) {
            self.open_pre(lang, path);
            return Ok(());
        }

        // Step 3: custom block marker.
        if let Some(marker) = scanners::custom_block_marker(line) {
            return self.handle_custom_block(marker, line);
        }

        // Step 4: raw HTML.
        if scanners::html_block_start(line) {
            self.html_lines.push(line.to_string());
            return Ok(());
        }

        // Step 5: blank line.
        if scanners::is_empty_line(line) {
            self.cursor = self.rise_to_section();
            return Ok(());
        }

        // Step 6: heading.
        if let Some((level, text)) = scanners::atx_heading(line) {
            return self.handle_heading(level, text, line);
        }

        // Step 7: ordered list item.
        if let Some((indent, text)) = scanners::ordered_list_item(line) {
            return self.handle_list_item(ListKind::Ordered, indent, text, line);
        }

        // Step 8: unordered list item.
        if let Some((indent, text)) = scanners::unordered_list_item(line) {
            return self.handle_list_item(ListKind::Unordered, indent, text, line);
        }

        // Step 9: definition `dd`.
        if let Some(text) = scanners::description_detail(line) {
            return self.handle_definition(text, line);
        }

        // Step 10: blockquote line.
        if let Some(text) = scanners::blockquote_line(line) {
            return self.handle_blockquote_line(text);
        }

        // Step 11: table caption.
        if let Some(text) = scanners::table_caption(line) {
            return self.handle_caption(text);
        }

        // Step 12: table row.
        if let Some(inner) = scanners::table_row(line) {
            return self.handle_table_row(inner, line);
        }

        // Step 13: space-only line.
        if scanners::is_space_only_line(line) {
            return Err(DecodeError::Structural {
                message: "space-only line".into(),
                line: line.to_string(),
            });
        }

        // Step 14: fallthrough paragraph.
        self.handle_paragraph(line)
    }

    fn cursor_is(&self, f: impl Fn(&NodeValue) -> bool) -> bool {
        f(&self.cursor.data.borrow().value)
    }

    fn flush_html(&mut self) {
        if self.html_lines.is_empty() {
            return;
        }
        let text = self.html_lines.join("\n");
        self.html_lines.clear();
        let node = make_node(self.arena, Ast::new(NodeValue::Html(text)));
        self.cursor.append(node);
    }

    /// Rises the cursor to the nearest `section` (or `root`) ancestor,
    /// inclusive of the cursor itself.
    fn rise_to_section(&self) -> &'a AstNode<'a> {
        let mut node = self.cursor;
        loop {
            let is_section = matches!(node.data.borrow().value, NodeValue::Section | NodeValue::Root);
            if is_section {
                return node;
            }
            node = node.parent().expect("non-root node always has a parent");
        }
    }

    fn find_details_ancestor(&self) -> Option<&'a AstNode<'a>> {
        let mut node = self.cursor;
        loop {
            if matches!(node.data.borrow().value, NodeValue::Details) {
                return Some(node);
            }
            node = node.parent()?;
        }
    }

    fn open_pre(&mut self, lang: Option<String>, path: Option<String>) {
        let mut ast = Ast::new(NodeValue::Pre);
        if let Some(lang) = &lang {
            ast.attr.set("lang", lang.clone());
        }
        if let Some(path) = &path {
            ast.attr.set("path", path.clone());
        }
        let pre = make_node(self.arena, ast);
        self.cursor.append(pre);
        self.cursor = pre;
    }

    fn handle_custom_block(&mut self, marker: CustomBlockMarker, line: &str) -> Result<(), DecodeError> {
        match marker.name {
            None => {
                let details = self.find_details_ancestor().ok_or_else(|| DecodeError::Structural {
                    message: "`:::` with no open details block".into(),
                    line: line.to_string(),
                })?;
                self.cursor = details.parent().expect("details always has a parent");
                Ok(())
            }
            Some(name) => {
                let (class, summary_text) = match name.as_str() {
                    "message" if marker.text.as_deref() == Some("alert") => {
                        ("alert".to_string(), "alert".to_string())
                    }
                    "message" => ("message".to_string(), "message".to_string()),
                    _ => (name.clone(), marker.text.clone().unwrap_or(name)),
                };

                let mut details_ast = Ast::new(NodeValue::Details);
                details_ast.attr.set("class", class);
                let details = make_node(self.arena, details_ast);

                let summary = make_node(self.arena, Ast::new(NodeValue::Summary));
                add_text(self.arena, summary, &summary_text);
                details.append(summary);

                // This section is a nesting pass-through for heading
                // sectioning purposes: its level matches whatever section
                // level was open when the details block started, so headings
                // inside it are placed exactly as if typed at this point.
                // `_forced_tag` (an internal, `_`-prefixed attribute that the
                // attribute-serialization rule suppresses from output) pins
                // its rendered tag to `section` regardless of that level.
                let enclosing_level = self.rise_to_section().data.borrow().level;
                let mut section_ast = Ast::with_level(NodeValue::Section, enclosing_level);
                section_ast.attr.set("_forced_tag", "section");
                let section = make_node(self.arena, section_ast);
                details.append(section);

                self.cursor.append(details);
                self.cursor = section;
                Ok(())
            }
        }
    }

    fn handle_heading(&mut self, level: u8, text: &str, line: &str) -> Result<(), DecodeError> {
        let section_cursor = self.rise_to_section();
        let current = section_cursor.data.borrow().level;

        let new_section = make_node(self.arena, Ast::with_level(NodeValue::Section, level));
        if current < level {
            if level != current + 1 {
                return Err(DecodeError::Sectioning {
                    level,
                    current,
                    line: line.to_string(),
                });
            }
            section_cursor.append(new_section);
        } else if current == level {
            let parent = section_cursor.parent().ok_or_else(|| DecodeError::Sectioning {
                level,
                current,
                line: line.to_string(),
            })?;
            parent.append(new_section);
        } else {
            let mut ancestor = section_cursor;
            loop {
                let ancestor_level = ancestor.data.borrow().level;
                if ancestor_level == level - 1 {
                    break;
                }
                ancestor = ancestor.parent().ok_or_else(|| DecodeError::Sectioning {
                    level,
                    current,
                    line: line.to_string(),
                })?;
            }
            ancestor.append(new_section);
        }

        let heading = make_node(self.arena, Ast::with_level(NodeValue::Heading, level));
        let inline_nodes = coalesce_text(parse_inlines(self.arena, text)?);
        for node in inline_nodes {
            heading.append(node);
        }
        new_section.append(heading);

        self.cursor = new_section;
        Ok(())
    }

    fn handle_list_item(
        &mut self,
        kind: ListKind,
        indent: usize,
        text: &str,
        line: &str,
    ) -> Result<(), DecodeError> {
        if indent % 2 != 0 {
            return Err(DecodeError::OddIndent { line: line.to_string() });
        }
        let depth = (indent / 2) as u8;
        self.ensure_list_cursor(kind, depth, line)?;

        let li = make_node(self.arena, Ast::with_level(NodeValue::ListItem, depth));
        let inline_nodes = coalesce_text(parse_inlines(self.arena, text)?);
        for node in inline_nodes {
            li.append(node);
        }
        self.cursor.append(li);
        Ok(())
    }

    /// Walks/creates list nodes until `self.cursor` is a list of `kind` at
    /// `depth`, per the list nesting rule.
    fn ensure_list_cursor(&mut self, kind: ListKind, depth: u8, line: &str) -> Result<(), DecodeError> {
        loop {
            let is_list = self.cursor_is(|v| matches!(v, NodeValue::UnorderedList | NodeValue::OrderedList));
            if !is_list {
                let list = make_node(self.arena, Ast::with_level(kind.node_value(), depth));
                self.cursor.append(list);
                self.cursor = list;
                return Ok(());
            }

            let (cursor_level, cursor_matches) = {
                let ast = self.cursor.data.borrow();
                (ast.level, kind.matches(&ast.value))
            };

            if cursor_level == depth {
                if cursor_matches {
                    return Ok(());
                }
                let parent = self.cursor.parent().expect("list always has a parent");
                let list = make_node(self.arena, Ast::with_level(kind.node_value(), depth));
                parent.append(list);
                self.cursor = list;
                return Ok(());
            } else if cursor_level + 1 == depth {
                let last_li = self.cursor.last_child().ok_or_else(|| DecodeError::Structural {
                    message: "nested list with no preceding list item".into(),
                    line: line.to_string(),
                })?;
                let list = make_node(self.arena, Ast::with_level(kind.node_value(), depth));
                last_li.append(list);
                self.cursor = list;
                return Ok(());
            } else if cursor_level > depth {
                let li = self.cursor.parent().ok_or_else(|| DecodeError::Structural {
                    message: "invalid list nesting".into(),
                    line: line.to_string(),
                })?;
                self.cursor = li.parent().ok_or_else(|| DecodeError::Structural {
                    message: "invalid list nesting".into(),
                    line: line.to_string(),
                })?;
                continue;
            } else {
                return Err(DecodeError::Structural {
                    message: "list nested more than one level deeper than its parent".into(),
                    line: line.to_string(),
                });
            }
        }
    }

    fn handle_definition(&mut self, text: &str, line: &str) -> Result<(), DecodeError> {
        let last = self.cursor.last_child().ok_or_else(|| DecodeError::Structural {
            message: "`dd` without a preceding `p` or `dl`".into(),
            line: line.to_string(),
        })?;
        let last_is_dl = matches!(last.data.borrow().value, NodeValue::DescriptionList);
        let last_is_p = matches!(last.data.borrow().value, NodeValue::Paragraph);

        let dl = if last_is_dl {
            last
        } else if last_is_p {
            let dt = make_node(self.arena, Ast::new(NodeValue::DescriptionTerm));
            let children: Vec<&AstNode> = last.children().collect();
            for child in children {
                dt.append(child);
            }
            let dl = make_node(self.arena, Ast::new(NodeValue::DescriptionList));
            let div = make_node(self.arena, Ast::new(NodeValue::Div));
            div.append(dt);
            dl.append(div);
            last.insert_before(dl);
            last.detach();
            dl
        } else {
            return Err(DecodeError::Structural {
                message: "`dd` without a preceding `p` or `dl`".into(),
                line: line.to_string(),
            });
        };

        let div = dl.last_child().expect("dl always has at least one div");
        let dd = make_node(self.arena, Ast::new(NodeValue::DescriptionDetails));
        let inline_nodes = coalesce_text(parse_inlines(self.arena, text)?);
        for node in inline_nodes {
            dd.append(node);
        }
        div.append(dd);
        Ok(())
    }

    fn handle_blockquote_line(&mut self, text: &str) -> Result<(), DecodeError> {
        let already_open = self.cursor_is(|v| matches!(v, NodeValue::Paragraph))
            && self
                .cursor
                .parent()
                .map(|p| matches!(p.data.borrow().value, NodeValue::BlockQuote))
                .unwrap_or(false);

        let (blockquote, p) = if already_open {
            (self.cursor.parent().unwrap(), self.cursor)
        } else {
            let blockquote = make_node(self.arena, Ast::new(NodeValue::BlockQuote));
            let p = make_node(self.arena, Ast::new(NodeValue::Paragraph));
            blockquote.append(p);
            self.cursor.append(blockquote);
            (blockquote, p)
        };

        if already_open {
            add_literal_text(self.arena, p, "\n");
        }

        if let Some(rest) = scanners::blockquote_citation(text) {
            let nodes = coalesce_text(parse_inlines(self.arena, rest)?);
            if let Some(anchor) = nodes.iter().find(|n| matches!(n.data.borrow().value, NodeValue::Anchor)) {
                let href = anchor.data.borrow().attr.get("href").flatten().map(str::to_string);
                if let Some(href) = href {
                    blockquote.data.borrow_mut().attr.set("cite", href);
                }
            }
            let prefix = make_node(self.arena, Ast::new(NodeValue::Raw("--- ".to_string())));
            p.append(prefix);
            let cite = make_node(self.arena, Ast::new(NodeValue::Cite));
            for node in nodes {
                cite.append(node);
            }
            p.append(cite);
        } else {
            let nodes = coalesce_text(parse_inlines(self.arena, text)?);
            for node in nodes {
                p.append(node);
            }
        }

        self.cursor = p;
        Ok(())
    }

    fn handle_caption(&mut self, text: &str) -> Result<(), DecodeError> {
        let figure = make_node(self.arena, Ast::new(NodeValue::Figure));
        let figcaption = make_node(self.arena, Ast::new(NodeValue::FigureCaption(text.to_string())));
        figure.append(figcaption);
        let table = make_node(self.arena, Ast::new(NodeValue::Table));
        let thead = make_node(self.arena, Ast::new(NodeValue::TableHead));
        table.append(thead);
        figure.append(table);
        self.cursor.append(figure);
        self.cursor = thead;
        Ok(())
    }

    fn handle_table_row(&mut self, inner: &str, line: &str) -> Result<(), DecodeError> {
        if self.cursor_is(|v| matches!(v, NodeValue::TableHead)) {
            if scanners::is_alignment_separator(inner) {
                let aligns: Vec<Align> = scanners::split_table_cells(inner)
                    .into_iter()
                    .map(scanners::cell_alignment)
                    .collect();
                let header_row = self.cursor.last_child().ok_or_else(|| DecodeError::Structural {
                    message: "alignment row without a preceding header row".into(),
                    line: line.to_string(),
                })?;
                for (th, align) in header_row.children().zip(aligns.iter()) {
                    th.data.borrow_mut().attr.set("align", align.as_str());
                }
                let mut tbody_ast = Ast::new(NodeValue::TableBody);
                tbody_ast.aligns = Some(aligns);
                let tbody = make_node(self.arena, tbody_ast);
                let table = self.cursor.parent().expect("thead always has a table parent");
                table.append(tbody);
                self.cursor = tbody;
                return Ok(());
            }

            let tr = make_node(self.arena, Ast::new(NodeValue::TableRow));
            for cell in scanners::split_table_cells(inner) {
                let th = make_node(self.arena, Ast::new(NodeValue::TableHeaderCell));
                for node in coalesce_text(parse_inlines(self.arena, cell)?) {
                    th.append(node);
                }
                tr.append(th);
            }
            self.cursor.append(tr);
            Ok(())
        } else if self.cursor_is(|v| matches!(v, NodeValue::TableBody)) {
            let aligns = self.cursor.data.borrow().aligns.clone().unwrap_or_default();
            let tr = make_node(self.arena, Ast::new(NodeValue::TableRow));
            for (i, cell) in scanners::split_table_cells(inner).into_iter().enumerate() {
                let td = make_node(self.arena, Ast::new(NodeValue::TableCell));
                if let Some(align) = aligns.get(i) {
                    td.data.borrow_mut().attr.set("align", align.as_str());
                }
                for node in coalesce_text(parse_inlines(self.arena, cell)?) {
                    td.append(node);
                }
                tr.append(td);
            }
            self.cursor.append(tr);
            Ok(())
        } else {
            Err(DecodeError::Structural {
                message: "table row without a preceding caption".into(),
                line: line.to_string(),
            })
        }
    }

    fn handle_paragraph(&mut self, line: &str) -> Result<(), DecodeError> {
        let p = make_node(self.arena, Ast::new(NodeValue::Paragraph));
        let inline_nodes = coalesce_text(parse_inlines(self.arena, line)?);
        for node in inline_nodes {
            p.append(node);
        }
        self.cursor.append(p);
        Ok(())
    }
}
