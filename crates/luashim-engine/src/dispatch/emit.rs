//! Dispatch code emission.
//!
//! Walks a planned trie and writes the nested type tests that select an
//! overload at run time. At each node the exhaustion guard comes first, then
//! one test per edge in insertion order, then the error fallback.

use crate::catalog::RuntimeCategory;
use crate::writer::CodeWriter;

use super::call::{emit_call, CallContext};
use super::{DispatchPlan, NodeShape, TrieNode};

/// Emit a complete registration: push the closure and store it under the
/// plan's name in the table on top of the stack.
pub fn emit_function(w: &mut CodeWriter, plan: &DispatchPlan<'_>, ctx: &CallContext<'_>) {
    w.line("lua_pushcfunction(L, [](auto L) {");
    w.indented(|w| {
        w.line("(void) L;");
        emit_dispatch(w, plan, ctx);
    });
    w.line("});");
    w.line(format!("lua_setfield(L, -2, \"{}\");", plan.name));
    w.blank();
}

/// Emit the closure body.
pub fn emit_dispatch(w: &mut CodeWriter, plan: &DispatchPlan<'_>, ctx: &CallContext<'_>) {
    emit_node(w, plan, &plan.root, ctx);
}

fn emit_node(w: &mut CodeWriter, plan: &DispatchPlan<'_>, node: &TrieNode, ctx: &CallContext<'_>) {
    match node.shape() {
        NodeShape::Empty => emit_fallback(w, plan, node),
        NodeShape::Leaf(terminal) => emit_call(w, plan, terminal, ctx),
        NodeShape::Passthrough(_, child) => emit_node(w, plan, child, ctx),
        NodeShape::Branch(children) => {
            emit_branches(w, plan, node, children, ctx);
            emit_fallback(w, plan, node);
        }
        NodeShape::Guarded(terminal, children) => {
            w.line(format!("if ({}) {{", RuntimeCategory::Absent.check_expr(node.depth + 1)));
            w.indented(|w| emit_call(w, plan, terminal, ctx));
            w.line("}");
            emit_branches(w, plan, node, children, ctx);
            emit_fallback(w, plan, node);
        }
    }
}

fn emit_branches(
    w: &mut CodeWriter,
    plan: &DispatchPlan<'_>,
    node: &TrieNode,
    children: &[(RuntimeCategory, TrieNode)],
    ctx: &CallContext<'_>,
) {
    for (category, child) in children {
        w.line(format!("if ({}) {{", category.check_expr(node.depth + 1)));
        w.indented(|w| emit_node(w, plan, child, ctx));
        w.line("}");
    }
}

fn emit_fallback(w: &mut CodeWriter, plan: &DispatchPlan<'_>, node: &TrieNode) {
    w.line(format!(
        "return luaL_error(L, \"{}: parameter {} has unexpected type\");",
        plan.name,
        node.depth + 1
    ));
}
