use pretty_assertions::assert_eq;

use super::{render, with_ast};
use crate::nodes::NodeValue;

#[test]
fn flat_unordered_list_items_never_close() {
    assert_eq!(render("- a\n- b"), "<ul>\n  <li>a\n  <li>b\n</ul>\n");
}

#[test]
fn nested_list_sits_inside_parent_li() {
    assert_eq!(
        render("- a\n  - b"),
        concat!(
            "<ul>\n",
            "  <li>a\n",
            "    <ul>\n",
            "      <li>b\n",
            "    </ul>\n",
            "</ul>\n",
        )
    );
}

#[test]
fn ordered_list_uses_ol() {
    assert_eq!(render("1. a\n2. b"), "<ol>\n  <li>a\n  <li>b\n</ol>\n");
}

#[test]
fn every_li_under_a_level_n_list_has_level_n() {
    with_ast("- a\n  - b\n  - c\n- d", |root| {
        fn check<'a>(node: &'a crate::nodes::AstNode<'a>) {
            let ast = node.data.borrow();
            if matches!(ast.value, NodeValue::UnorderedList | NodeValue::OrderedList) {
                let level = ast.level;
                for child in node.children() {
                    assert_eq!(child.data.borrow().level, level);
                }
            }
            drop(ast);
            for child in node.children() {
                check(child);
            }
        }
        check(root);
    });
}

#[test]
fn returning_to_a_shallower_indent_rises_back_to_that_list() {
    assert_eq!(
        render("- a\n  - b\n- c"),
        concat!(
            "<ul>\n",
            "  <li>a\n",
            "    <ul>\n",
            "      <li>b\n",
            "    </ul>\n",
            "  <li>c\n",
            "</ul>\n",
        )
    );
}
