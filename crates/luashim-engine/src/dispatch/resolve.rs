//! Dispatch resolution in Rust.
//!
//! [`DispatchPlan::resolve`] makes the same decisions as the emitted C++ for
//! a given sequence of argument categories: which overload runs, how many
//! values it returns, or at which stack slot dispatch fails.
//!
//! At a passthrough node the emitted code has no type test; the failure comes
//! from the extraction's `luaL_checktype` on the same slot instead of the
//! dispatch fallback.

use thiserror::Error;

use crate::catalog::RuntimeCategory;

use super::{DispatchPlan, NodeShape, Terminal};

/// The overload a call dispatches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    /// Selected terminal
    pub terminal: Terminal,
    /// Values returned to Lua
    pub returns: usize,
}

/// Dispatch failed: no overload accepts the value at `slot`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("parameter {slot} has unexpected type")]
pub struct DispatchFailure {
    /// 1-based Lua stack index, receiver included
    pub slot: usize,
}

impl DispatchPlan<'_> {
    /// Resolve a call whose arguments (receiver excluded) have the given
    /// categories. [`RuntimeCategory::Absent`] ends the argument list.
    pub fn resolve(&self, args: &[RuntimeCategory]) -> Result<Resolution, DispatchFailure> {
        let base = self.base();
        let mut node = &self.root;

        loop {
            let next = args
                .get(node.depth - base)
                .copied()
                .filter(|c| *c != RuntimeCategory::Absent);
            let fail = DispatchFailure { slot: node.depth + 1 };

            let child = match node.shape() {
                NodeShape::Empty => return Err(fail),
                NodeShape::Leaf(terminal) => return Ok(self.resolution(terminal)),
                NodeShape::Passthrough(category, child) => {
                    if next != Some(category) {
                        return Err(fail);
                    }
                    child
                }
                NodeShape::Branch(_) => match next {
                    Some(category) => node.child(category).ok_or(fail)?,
                    None => return Err(fail),
                },
                NodeShape::Guarded(terminal, _) => match next {
                    None => return Ok(self.resolution(terminal)),
                    Some(category) => node.child(category).ok_or(fail)?,
                },
            };
            node = child;
        }
    }

    fn resolution(&self, terminal: Terminal) -> Resolution {
        Resolution {
            terminal,
            returns: self.return_count(terminal),
        }
    }
}
