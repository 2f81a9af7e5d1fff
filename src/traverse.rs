//! AST transformation: a pre-order `enter` / post-order `leave` visitor that
//! may replace any node wholesale.

use crate::nodes::AstNode;

/// A transform applied to every node of a tree, innermost first. Both hooks
/// default to the identity, so a plugin only needs to override what it
/// actually changes.
pub trait TraversalPlugin<'a> {
    fn enter(&mut self, node: &'a AstNode<'a>) -> &'a AstNode<'a> {
        node
    }

    fn leave(&mut self, node: &'a AstNode<'a>) -> &'a AstNode<'a> {
        node
    }
}

/// Visits every child of `root`, replacing it with `leave(traverse(enter(child)))`.
/// Recursion depth tracks tree nesting depth, the same bound `html::encode`
/// relies on.
pub fn traverse<'a>(root: &'a AstNode<'a>, plugin: &mut dyn TraversalPlugin<'a>) -> &'a AstNode<'a> {
    let children: Vec<&'a AstNode<'a>> = root.children().collect();
    for child in children {
        let entered = plugin.enter(child);
        let visited = traverse(entered, plugin);
        let left = plugin.leave(visited);
        if !left.same_node(child) {
            child.insert_before(left);
            child.detach();
        }
    }
    root
}
