//! Overload dispatch trie.
//!
//! Each edge is the runtime category required at the next stack slot. A node
//! carries a terminal when some overload can be called with exactly the slots
//! consumed so far. A node may hold a terminal and children at the same time
//! when one overload's slot list is a prefix of another's.

use crate::catalog::RuntimeCategory;

/// An overload selected once `slots` slots have been consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Terminal {
    /// Total slots consumed, receiver included
    pub slots: usize,
    /// Index of the overload in the planned overload set
    pub overload: usize,
}

/// Decision state after consuming `depth` slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrieNode {
    /// Slots consumed on the path to this node
    pub depth: usize,
    /// Outgoing edges, in first-insertion order
    pub children: Vec<(RuntimeCategory, TrieNode)>,
    /// Overload callable at this node
    pub terminal: Option<Terminal>,
}

/// What the emitter and resolver do at a node.
#[derive(Debug, Clone, Copy)]
pub enum NodeShape<'a> {
    /// Nothing reachable; dispatch fails at the next slot
    Empty,
    /// Call the terminal
    Leaf(Terminal),
    /// Single edge and no terminal: descend without a runtime check
    Passthrough(RuntimeCategory, &'a TrieNode),
    /// Test each edge, fail if none matches
    Branch(&'a [(RuntimeCategory, TrieNode)]),
    /// Call the terminal if the arguments end here, otherwise branch
    Guarded(Terminal, &'a [(RuntimeCategory, TrieNode)]),
}

impl TrieNode {
    /// Create an empty root for `depth` reserved slots.
    pub fn root(depth: usize) -> Self {
        Self {
            depth,
            children: Vec::new(),
            terminal: None,
        }
    }

    /// The node's dispatch shape.
    pub fn shape(&self) -> NodeShape<'_> {
        match (self.terminal, self.children.as_slice()) {
            (None, []) => NodeShape::Empty,
            (Some(terminal), []) => NodeShape::Leaf(terminal),
            (None, [(category, child)]) => NodeShape::Passthrough(*category, child),
            (None, children) => NodeShape::Branch(children),
            (Some(terminal), children) => NodeShape::Guarded(terminal, children),
        }
    }

    /// Follow (or create) the edge for `category`.
    pub fn descend(&mut self, category: RuntimeCategory) -> &mut TrieNode {
        let index = match self.children.iter().position(|(c, _)| *c == category) {
            Some(index) => index,
            None => {
                self.children.push((category, TrieNode::root(self.depth + 1)));
                self.children.len() - 1
            }
        };
        &mut self.children[index].1
    }

    /// Follow the edge for `category`, if present.
    pub fn child(&self, category: RuntimeCategory) -> Option<&TrieNode> {
        self.children
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, node)| node)
    }

    /// Make this node a terminal for `overload`. A previous terminal is
    /// replaced: the last registered overload wins.
    pub fn mark_terminal(&mut self, overload: usize) -> Option<Terminal> {
        self.terminal.replace(Terminal {
            slots: self.depth,
            overload,
        })
    }

    /// Terminals reachable from this node, depth-first in edge order.
    pub fn terminals(&self) -> Vec<Terminal> {
        let mut out = Vec::new();
        self.collect_terminals(&mut out);
        out
    }

    fn collect_terminals(&self, out: &mut Vec<Terminal>) {
        if let Some(terminal) = self.terminal {
            out.push(terminal);
        }
        for (_, child) in &self.children {
            child.collect_terminals(out);
        }
    }
}
