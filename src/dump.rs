//! A `Debug`-style pretty-printer for the AST, used in test failure output
//! and ad hoc inspection. Not a stable, documented format.

use crate::nodes::AstNode;

/// One line per node: `name`, `level` when nonzero, attributes in
/// insertion order, and literal text for leaf nodes, indented by depth.
pub fn dump<'a>(root: &'a AstNode<'a>) -> String {
    let mut out = String::new();
    dump_node(root, 0, &mut out);
    out
}

fn dump_node<'a>(node: &'a AstNode<'a>, depth: usize, out: &mut String) {
    let ast = node.data.borrow();
    out.push_str(&"  ".repeat(depth));
    out.push_str(ast.value.name());
    if ast.level != 0 {
        out.push_str(&format!(" level={}", ast.level));
    }
    for (key, value) in ast.attr.iter() {
        out.push(' ');
        out.push_str(key);
        if let Some(value) = value {
            out.push('=');
            out.push_str(value);
        }
    }
    if let Some(text) = ast.value.text() {
        out.push(' ');
        out.push_str(&format!("{text:?}"));
    }
    out.push('\n');
    let children: Vec<&'a AstNode<'a>> = node.children().collect();
    drop(ast);
    for child in children {
        dump_node(child, depth + 1, out);
    }
}
