//! Overload dispatch.
//!
//! The [`Planner`] marshals every overload of one name, decides which of them
//! can be bound, and inserts their slot categories into a [`TrieNode`]. The
//! resulting [`DispatchPlan`] is consumed by the emitter (generated C++) and
//! by the resolver (the same decisions, evaluated in Rust).

pub mod call;
pub mod emit;
pub mod resolve;
pub mod trie;

pub use call::CallContext;
pub use emit::{emit_dispatch, emit_function};
pub use resolve::{DispatchFailure, Resolution};
pub use trie::{NodeShape, Terminal, TrieNode};

use crate::ast::Decl;
use crate::catalog::TypeCatalog;
use crate::config::UnsupportedPolicy;
use crate::diagnostic::{Diagnostic, UNBOUND_FUNCTION, UNSUPPORTED_PARAMETER, UNSUPPORTED_RETURN};
use crate::marshal::OverloadSignature;

/// Dispatch decisions for one exported name.
#[derive(Debug, Clone)]
pub struct DispatchPlan<'d> {
    /// Exported name
    pub name: String,
    /// Struct the name is a method of
    pub receiver: Option<String>,
    /// Overloads that take part in dispatch; terminals index into this
    pub overloads: Vec<OverloadSignature<'d>>,
    /// Trie root; its depth is the number of reserved receiver slots
    pub root: TrieNode,
}

impl<'d> DispatchPlan<'d> {
    /// Slots reserved before the first parameter.
    pub fn base(&self) -> usize {
        self.root.depth
    }

    /// `Name` or `Struct::Name`.
    pub fn binding(&self) -> String {
        binding_name(&self.name, self.receiver.as_deref())
    }

    /// Overload selected by `terminal`.
    pub fn overload(&self, terminal: Terminal) -> &OverloadSignature<'d> {
        &self.overloads[terminal.overload]
    }

    /// Values left on the Lua stack by the call at `terminal`: return pushes
    /// followed by out-parameter push-backs.
    pub fn return_count(&self, terminal: Terminal) -> usize {
        let overload = self.overload(terminal);
        let push_backs = overload
            .bound_params(terminal.slots)
            .filter(|p| p.push_back.is_some())
            .count();
        overload.pushes().len() + push_backs
    }

    /// Whether at least one overload can be called.
    pub fn is_bound(&self) -> bool {
        !self.root.terminals().is_empty()
    }
}

fn binding_name(name: &str, receiver: Option<&str>) -> String {
    match receiver {
        Some(receiver) => format!("{}::{}", receiver, name),
        None => name.to_string(),
    }
}

/// Builds [`DispatchPlan`]s against a catalog.
#[derive(Debug, Clone, Copy)]
pub struct Planner<'a> {
    catalog: &'a TypeCatalog,
    policy: UnsupportedPolicy,
}

impl<'a> Planner<'a> {
    /// Create a planner.
    pub fn new(catalog: &'a TypeCatalog, policy: UnsupportedPolicy) -> Self {
        Self { catalog, policy }
    }

    /// Plan dispatch for the overloads of `name`, in registration order.
    /// `receiver` names the struct when these are methods.
    pub fn plan<'d>(
        &self,
        name: &str,
        receiver: Option<&str>,
        decls: &[&'d Decl],
        diagnostics: &mut Vec<Diagnostic>,
    ) -> DispatchPlan<'d> {
        let base = usize::from(receiver.is_some());
        let binding = binding_name(name, receiver);
        let mut root = TrieNode::root(base);
        let mut overloads = Vec::new();

        for decl in decls {
            let signature = OverloadSignature::marshal(self.catalog, decl, base);
            if !self.admit(&binding, &signature, diagnostics) {
                continue;
            }
            let index = overloads.len();
            insert(&mut root, &signature, index, &binding);
            overloads.push(signature);
        }

        if root.terminals().is_empty() {
            diagnostics.push(
                Diagnostic::new(
                    &UNBOUND_FUNCTION,
                    binding.as_str(),
                    format!("no overload of `{}` could be bound", binding),
                )
                .with_note(format!("{} declaration(s) considered", decls.len())),
            );
        }

        DispatchPlan {
            name: name.to_string(),
            receiver: receiver.map(str::to_string),
            overloads,
            root,
        }
    }

    /// Apply the unsupported-type policy. Returns whether the overload joins
    /// the trie.
    fn admit(&self, binding: &str, signature: &OverloadSignature<'_>, diagnostics: &mut Vec<Diagnostic>) -> bool {
        let mut admitted = true;

        if let Some(stop) = &signature.stop {
            let diagnostic = Diagnostic::new(
                &UNSUPPORTED_PARAMETER,
                binding,
                format!(
                    "parameter {} (`{}`) of {} has unsupported type `{}`",
                    stop.index + 1,
                    stop.name,
                    signature.display(),
                    stop.error.type_name
                ),
            )
            .with_type(stop.error.type_name.as_str());

            let note = match self.policy {
                UnsupportedPolicy::Skip if stop.has_default => format!(
                    "bound with the first {} parameter(s); native defaults supply the rest",
                    stop.index
                ),
                UnsupportedPolicy::Skip => {
                    admitted = false;
                    "overload excluded from dispatch".to_string()
                }
                UnsupportedPolicy::Truncate => {
                    format!("overload truncated to {} parameter(s)", stop.index)
                }
            };
            diagnostics.push(diagnostic.with_note(note));
        }

        if let Err(error) = &signature.returns {
            let diagnostic = Diagnostic::new(
                &UNSUPPORTED_RETURN,
                binding,
                format!(
                    "return type `{}` of {} is unsupported",
                    error.type_name,
                    signature.display()
                ),
            )
            .with_type(error.type_name.as_str());

            let note = match self.policy {
                UnsupportedPolicy::Skip => {
                    admitted = false;
                    "overload excluded from dispatch"
                }
                UnsupportedPolicy::Truncate => "return value discarded",
            };
            diagnostics.push(diagnostic.with_note(note));
        }

        admitted
    }
}

/// Insert one overload's slot path. A defaulted parameter makes the node
/// before it a terminal too.
fn insert(root: &mut TrieNode, signature: &OverloadSignature<'_>, index: usize, binding: &str) {
    let mut node = root;
    for param in &signature.params {
        if param.has_default {
            mark(node, index, binding);
        }
        for category in &param.categories {
            node = node.descend(*category);
        }
    }
    mark(node, index, binding);
}

fn mark(node: &mut TrieNode, index: usize, binding: &str) {
    if let Some(previous) = node.mark_terminal(index) {
        if previous.overload != index {
            log::debug!(
                "{}: overload #{} shadows overload #{} at {} slot(s)",
                binding,
                index,
                previous.overload,
                node.depth
            );
        }
    }
}
