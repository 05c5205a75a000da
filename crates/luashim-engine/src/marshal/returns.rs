//! Return marshaling: one return type → ordered push statements.

use crate::catalog::{ReturnRule, TypeCatalog};

use super::template::{render, TemplateVars};
use super::UnsupportedType;

/// Name of the C++ variable holding the native result.
pub const RESULT_VAR: &str = "r";

/// Produces push statements for return types.
#[derive(Debug, Clone, Copy)]
pub struct ReturnMarshaler<'a> {
    catalog: &'a TypeCatalog,
}

impl<'a> ReturnMarshaler<'a> {
    /// Create a marshaler over `catalog`.
    pub fn new(catalog: &'a TypeCatalog) -> Self {
        Self { catalog }
    }

    /// Push statements for a value of type `ty` held in [`RESULT_VAR`].
    pub fn pushes_for(&self, ty: &str) -> Result<Vec<String>, UnsupportedType> {
        let rule = self.catalog.returns(ty).ok_or_else(|| UnsupportedType::new(ty))?;
        let vars = TemplateVars {
            var: RESULT_VAR,
            ty,
            first_slot: 1,
        };
        Ok(match rule {
            ReturnRule::Void => Vec::new(),
            ReturnRule::Values { pushes } => pushes.iter().map(|t| render(t, &vars)).collect(),
            ReturnRule::Handle { name } => vec![format!("Push{}(L, {});", name, RESULT_VAR)],
        })
    }
}
