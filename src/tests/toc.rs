use pretty_assertions::assert_eq;
use typed_arena::Arena;

use crate::nodes::{AstNode, NodeValue};
use crate::toc::{TocList, TocOptions};
use crate::traverse::{traverse, TraversalPlugin};

fn collect_headings<'a>(node: &'a AstNode<'a>, out: &mut Vec<&'a AstNode<'a>>) {
    if matches!(node.data.borrow().value, NodeValue::Heading) {
        out.push(node);
    }
    for child in node.children() {
        collect_headings(child, out);
    }
}

#[test]
fn to_toc_nests_by_heading_level() {
    let arena = Arena::new();
    let root = crate::decode(&arena, "# A\n\n## B\n\n## C\n\n### D\n\n# E").unwrap();
    let mut headings = Vec::new();
    collect_headings(root, &mut headings);
    assert_eq!(headings.len(), 5);

    let toc = crate::to_toc(&arena, &headings, TocOptions { list: TocList::Unordered });
    let html = crate::encode(toc, Default::default()).unwrap();
    assert_eq!(
        html,
        concat!(
            "<ul>\n",
            "  <li>A\n",
            "    <ul>\n",
            "      <li>B\n",
            "      <li>C\n",
            "        <ul>\n",
            "          <li>D\n",
            "        </ul>\n",
            "    </ul>\n",
            "  <li>E\n",
            "</ul>\n",
        )
    );
}

#[test]
fn to_toc_on_empty_headings_is_an_empty_list() {
    let arena = Arena::new();
    let headings: Vec<&AstNode> = Vec::new();
    let toc = crate::to_toc(&arena, &headings, TocOptions::default());
    assert_eq!(crate::encode(toc, Default::default()).unwrap(), "<ul>\n");
}

#[test]
fn to_toc_can_use_ordered_lists() {
    let arena = Arena::new();
    let root = crate::decode(&arena, "# A\n\n## B").unwrap();
    let mut headings = Vec::new();
    collect_headings(root, &mut headings);
    let toc = crate::to_toc(&arena, &headings, TocOptions { list: TocList::Ordered });
    assert_eq!(
        crate::encode(toc, Default::default()).unwrap(),
        concat!("<ol>\n", "  <li>A\n", "    <ol>\n", "      <li>B\n", "    </ol>\n", "</ol>\n",)
    );
}

struct Identity;
impl<'a> TraversalPlugin<'a> for Identity {}

#[test]
fn traverse_with_identity_plugin_is_the_identity() {
    let arena = Arena::new();
    let root = crate::decode(&arena, "# A\n\nBody **text**.\n\n- one\n- two").unwrap();
    let before = crate::dump(root);
    let mut plugin = Identity;
    traverse(root, &mut plugin);
    let after = crate::dump(root);
    assert_eq!(before, after);
}
