use pretty_assertions::assert_eq;
use typed_arena::Arena;

use super::{render, with_ast};
use crate::nodes::{Attrs, NodeValue};

#[test]
fn heading_wraps_in_article() {
    assert_eq!(render("# Title"), "<article>\n  <h1>Title</h1>\n</article>\n");
}

#[test]
fn nested_heading_wraps_in_section() {
    assert_eq!(
        render("# Title\n\n## Sub"),
        concat!(
            "<article>\n",
            "  <h1>Title</h1>\n",
            "  <section>\n",
            "    <h2>Sub</h2>\n",
            "  </section>\n",
            "</article>\n",
        )
    );
}

#[test]
fn paragraph_with_strong_and_emph() {
    assert_eq!(
        render("# T\n\nHello **there** and *you*."),
        concat!(
            "<article>\n",
            "  <h1>T</h1>\n",
            "  <p>Hello <strong>there</strong> and <em>you</em>.\n",
            "</article>\n",
        )
    );
}

#[test]
fn inline_code_gets_translate_no() {
    assert_eq!(render("`x`"), "<p><code translate=no>x</code>\n");
}

#[test]
fn walking_children_from_root_reaches_every_node_once() {
    with_ast("# A\n\nBody **text**.", |root| {
        fn count<'a>(node: &'a crate::nodes::AstNode<'a>) -> usize {
            1 + node.children().map(count).sum::<usize>()
        }
        // root, section, heading, text("A"), p, text("Body "), strong, text("text"), text(".")
        assert_eq!(count(root), 9);
    });
}

#[test]
fn sectioning_levels_increase_by_one_along_any_path() {
    with_ast("# A\n\n## B\n\n### C", |root| {
        fn check<'a>(node: &'a crate::nodes::AstNode<'a>, parent_level: u8) {
            let ast = node.data.borrow();
            if matches!(ast.value, NodeValue::Section) {
                if parent_level != 0 {
                    assert_eq!(ast.level, parent_level + 1);
                }
                for child in node.children() {
                    check(child, ast.level);
                }
            } else {
                for child in node.children() {
                    check(child, parent_level);
                }
            }
        }
        check(root, 0);
    });
}

#[test]
fn format_is_decode_then_encode() {
    let arena = Arena::new();
    assert_eq!(crate::format(&arena, "# Title").unwrap(), render("# Title"));
}

#[test]
fn encode_honors_starting_indent_option() {
    let arena = Arena::new();
    let root = crate::decode(&arena, "# Title").unwrap();
    let html = crate::encode(root, crate::EncodeOptions { indent: 4 }).unwrap();
    assert_eq!(html, "    <article>\n      <h1>Title</h1>\n    </article>\n");
}

#[test]
fn attributes_serialize_in_insertion_order() {
    let mut attrs = Attrs::new();
    attrs.set("b", "2");
    attrs.set("a", "1");
    let keys: Vec<&str> = attrs.iter().map(|(k, _)| k).collect();
    assert_eq!(keys, vec!["b", "a"]);
}

#[test]
fn underscore_prefixed_attributes_never_serialize() {
    with_ast(":::details Notes\n\nbody\n\n:::", |root| {
        let details = root.children().next().unwrap();
        let section = details.children().nth(1).unwrap();
        assert!(section.data.borrow().attr.contains("_forced_tag"));
    });
    let html = render(":::details Notes\n\nbody\n\n:::");
    assert!(!html.contains("_forced_tag"));
}

#[test]
fn values_with_unsafe_characters_are_quoted_others_are_not() {
    use crate::nodes::{make_node, Ast};

    let arena = Arena::new();
    let node = make_node(&arena, Ast::new(NodeValue::Details));
    {
        let mut ast = node.data.borrow_mut();
        ast.attr.set("data-plain", "abc");
        ast.attr.set("data-spaced", "a b");
    }
    let html = crate::encode(node, Default::default()).unwrap();
    assert!(html.contains("data-plain=abc"));
    assert!(html.contains("data-spaced=\"a b\""));
}

#[test]
fn dump_reports_node_names_and_levels() {
    with_ast("# Title", |root| {
        let dump = crate::dump(root);
        assert!(dump.contains("root"));
        assert!(dump.contains("section level=1"));
        assert!(dump.contains("heading level=1"));
        assert!(dump.contains("\"Title\""));
    });
}
