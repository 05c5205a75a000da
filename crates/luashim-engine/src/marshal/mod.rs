//! Marshaling between native values and Lua stack slots.
//!
//! [`ArgumentMarshaler`] handles one parameter, [`ReturnMarshaler`] one
//! return type. [`OverloadSignature`] runs both over a whole declaration and
//! records where marshaling stopped instead of printing anything; the
//! dispatch planner turns those stops into diagnostics.

pub mod argument;
pub mod returns;
pub mod template;

pub use argument::{ArgumentMarshaler, MarshaledParam};
pub use returns::{ReturnMarshaler, RESULT_VAR};

use thiserror::Error;

use crate::ast::Decl;
use crate::catalog::TypeCatalog;

/// A canonical type with no catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported type `{type_name}`")]
pub struct UnsupportedType {
    /// The canonical type that was looked up
    pub type_name: String,
}

impl UnsupportedType {
    /// Create from a type name.
    pub fn new(type_name: &str) -> Self {
        Self {
            type_name: type_name.to_string(),
        }
    }
}

/// The parameter at which marshaling of an overload stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamStop {
    /// 0-based parameter index
    pub index: usize,
    /// Parameter name
    pub name: String,
    /// Whether this parameter (and so every later one) has a default argument
    pub has_default: bool,
    /// The lookup failure
    pub error: UnsupportedType,
}

/// One overload, marshaled as far as the catalog allows.
#[derive(Debug, Clone)]
pub struct OverloadSignature<'d> {
    /// The declaration
    pub decl: &'d Decl,
    /// Slots reserved before the first parameter (1 for a bound receiver)
    pub base: usize,
    /// Parameters marshaled before any stop, in declaration order
    pub params: Vec<MarshaledParam>,
    /// Where parameter marshaling stopped, if it did
    pub stop: Option<ParamStop>,
    /// Return pushes, or the unsupported return type
    pub returns: Result<Vec<String>, UnsupportedType>,
}

impl<'d> OverloadSignature<'d> {
    /// Marshal every parameter and the return type of `decl`.
    pub fn marshal(catalog: &TypeCatalog, decl: &'d Decl, base: usize) -> Self {
        let args = ArgumentMarshaler::new(catalog);
        let mut params = Vec::new();
        let mut stop = None;
        let mut next_slot = base;

        for (index, param) in decl.params().enumerate() {
            match args.marshal(param, next_slot) {
                Ok(marshaled) => {
                    next_slot = marshaled.end_slot();
                    params.push(marshaled);
                }
                Err(error) => {
                    stop = Some(ParamStop {
                        index,
                        name: param.name().to_string(),
                        has_default: param.has_default(),
                        error,
                    });
                    break;
                }
            }
        }

        let returns = ReturnMarshaler::new(catalog).pushes_for(decl.return_type().unwrap_or(""));

        Self {
            decl,
            base,
            params,
            stop,
            returns,
        }
    }

    /// Slot count after every marshaled parameter.
    pub fn end_slot(&self) -> usize {
        self.params.last().map_or(self.base, MarshaledParam::end_slot)
    }

    /// Parameters bound by a call that consumes `slots` slots.
    pub fn bound_params(&self, slots: usize) -> impl Iterator<Item = &MarshaledParam> {
        self.params.iter().take_while(move |p| p.end_slot() <= slots)
    }

    /// Return pushes; empty when the return type is unsupported.
    pub fn pushes(&self) -> &[String] {
        self.returns.as_deref().unwrap_or(&[])
    }

    /// `Name(type, type, ...)`, for messages.
    pub fn display(&self) -> String {
        let types: Vec<&str> = self
            .decl
            .params()
            .map(|p| p.canonical_type().unwrap_or("?"))
            .collect();
        format!("{}({})", self.decl.name(), types.join(", "))
    }
}
