//! Rebuilds a flat sequence of heading nodes into a nested table-of-contents
//! list, mirroring the heading `level` sequence the way the block parser's
//! own list-nesting rule mirrors indentation.

use typed_arena::Arena;

use crate::nodes::{make_node, Ast, AstNode, NodeValue};

/// Which list element wraps each TOC level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TocList {
    Ordered,
    Unordered,
}

impl TocList {
    fn node_value(self) -> NodeValue {
        match self {
            TocList::Ordered => NodeValue::OrderedList,
            TocList::Unordered => NodeValue::UnorderedList,
        }
    }
}

/// Options for [`crate::to_toc`].
#[derive(Debug, Clone, Copy)]
pub struct TocOptions {
    pub list: TocList,
}

impl Default for TocOptions {
    fn default() -> Self {
        TocOptions { list: TocList::Unordered }
    }
}

/// Deep-clones `node` (and its descendants) into fresh arena allocations,
/// detached from the original tree.
fn clone_node<'a>(arena: &'a Arena<AstNode<'a>>, node: &'a AstNode<'a>) -> &'a AstNode<'a> {
    let ast = node.data.borrow().clone();
    let clone = make_node(arena, ast);
    for child in node.children() {
        clone.append(clone_node(arena, child));
    }
    clone
}

fn append_heading_li<'a>(arena: &'a Arena<AstNode<'a>>, list: &'a AstNode<'a>, heading: &'a AstNode<'a>) {
    let li = make_node(arena, Ast::new(NodeValue::ListItem));
    for child in heading.children() {
        li.append(clone_node(arena, child));
    }
    list.append(li);
}

/// Reconstructs a nested list tree from `headings`, a flat sequence already
/// produced by another pass. A level one deeper than the current list
/// descends into a fresh nested list under that list's last `li`; an equal
/// level appends a sibling `li`; a shallower level rises back up the stack
/// first.
pub fn to_toc<'a>(
    arena: &'a Arena<AstNode<'a>>,
    headings: &[&'a AstNode<'a>],
    options: TocOptions,
) -> &'a AstNode<'a> {
    let root_list = make_node(arena, Ast::new(options.list.node_value()));
    let Some(first) = headings.first() else {
        return root_list;
    };

    let mut stack: Vec<(u8, &'a AstNode<'a>)> = vec![(first.data.borrow().level, root_list)];

    for heading in headings {
        let level = heading.data.borrow().level;
        while stack.len() > 1 && stack.last().unwrap().0 > level {
            stack.pop();
        }
        let (top_level, top_list) = *stack.last().unwrap();
        if level > top_level {
            let last_li = top_list
                .last_child()
                .expect("a list must hold a heading's li before a deeper heading can nest under it");
            let nested = make_node(arena, Ast::new(options.list.node_value()));
            last_li.append(nested);
            stack.push((level, nested));
            append_heading_li(arena, nested, heading);
        } else {
            append_heading_li(arena, top_list, heading);
        }
    }

    root_list
}
