//! Argument marshaling: one declared parameter → Lua stack slots.

use crate::ast::Decl;
use crate::catalog::{RuntimeCategory, TypeCatalog};

use super::template::{render, TemplateVars};
use super::UnsupportedType;

/// One parameter, ready to be bound at a call site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarshaledParam {
    /// Slots consumed before this parameter (0-based position of its first slot)
    pub first_slot: usize,
    /// Category required at each consumed slot
    pub categories: Vec<RuntimeCategory>,
    /// Extraction statements
    pub extract: Vec<String>,
    /// Expression passed to the native call
    pub argument: String,
    /// Push-back statement for out-parameters
    pub push_back: Option<String>,
    /// Whether the declaration carries a default argument
    pub has_default: bool,
}

impl MarshaledParam {
    /// Number of slots consumed.
    pub fn slots(&self) -> usize {
        self.categories.len()
    }

    /// Slot count after this parameter has been consumed.
    pub fn end_slot(&self) -> usize {
        self.first_slot + self.slots()
    }
}

/// Marshals parameters against a catalog.
#[derive(Debug, Clone, Copy)]
pub struct ArgumentMarshaler<'a> {
    catalog: &'a TypeCatalog,
}

impl<'a> ArgumentMarshaler<'a> {
    /// Create a marshaler over `catalog`.
    pub fn new(catalog: &'a TypeCatalog) -> Self {
        Self { catalog }
    }

    /// Marshal `param`, whose first slot follows `first_slot` already-consumed
    /// slots. The C++ variable is named after that position (`p<first_slot>`).
    pub fn marshal(&self, param: &Decl, first_slot: usize) -> Result<MarshaledParam, UnsupportedType> {
        let ty = param.canonical_type().unwrap_or("");
        let rule = self.catalog.param(ty).ok_or_else(|| UnsupportedType::new(ty))?;

        let var = format!("p{}", first_slot);
        let vars = TemplateVars {
            var: &var,
            ty,
            first_slot: first_slot + 1,
        };

        Ok(MarshaledParam {
            first_slot,
            categories: rule.categories.clone(),
            extract: rule.extract.iter().map(|t| render(t, &vars)).collect(),
            argument: render(&rule.argument, &vars),
            push_back: rule.push_back.as_deref().map(|t| render(t, &vars)),
            has_default: param.has_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marshal_scalar() {
        let catalog = TypeCatalog::imgui();
        let marshaler = ArgumentMarshaler::new(&catalog);
        let p = marshaler.marshal(&Decl::param("alpha", "float"), 0).unwrap();
        assert_eq!(p.categories, vec![RuntimeCategory::Number]);
        assert_eq!(
            p.extract,
            vec![
                "luaL_checktype(L, 1, LUA_TNUMBER);",
                "const float p0 = static_cast<float>(luaL_checknumber(L, 1));",
            ]
        );
        assert_eq!(p.argument, "p0");
        assert_eq!(p.end_slot(), 1);
    }

    #[test]
    fn test_marshal_vector_after_receiver() {
        let catalog = TypeCatalog::imgui();
        let marshaler = ArgumentMarshaler::new(&catalog);
        let p = marshaler.marshal(&Decl::param("p1", "const ImVec2 &"), 1).unwrap();
        assert_eq!(p.slots(), 2);
        assert_eq!(
            p.extract,
            vec![
                "luaL_checktype(L, 2, LUA_TNUMBER);",
                "const float p1_1 = static_cast<float>(lua_tonumber(L, 2));",
                "luaL_checktype(L, 3, LUA_TNUMBER);",
                "const float p1_2 = static_cast<float>(lua_tonumber(L, 3));",
            ]
        );
        assert_eq!(p.argument, "ImVec2 {p1_1, p1_2}");
        assert_eq!(p.end_slot(), 3);
    }

    #[test]
    fn test_marshal_out_param() {
        let catalog = TypeCatalog::imgui();
        let marshaler = ArgumentMarshaler::new(&catalog);
        let p = marshaler.marshal(&Decl::param("p_open", "bool *").with_default(), 1).unwrap();
        assert_eq!(p.argument, "&p1");
        assert_eq!(p.push_back.as_deref(), Some("lua_pushboolean(L, p1);"));
        assert!(p.has_default);
    }

    #[test]
    fn test_marshal_uses_desugared_type() {
        let catalog = TypeCatalog::imgui();
        let marshaler = ArgumentMarshaler::new(&catalog);
        let param = Decl::param("flags", "ImGuiWindowFlags").with_desugared("int");
        let p = marshaler.marshal(&param, 2).unwrap();
        assert_eq!(
            p.extract,
            vec![
                "luaL_checktype(L, 3, LUA_TNUMBER);",
                "const int p2 = static_cast<int>(luaL_checkinteger(L, 3));",
            ]
        );
    }

    #[test]
    fn test_marshal_unsupported() {
        let catalog = TypeCatalog::imgui();
        let marshaler = ArgumentMarshaler::new(&catalog);
        let err = marshaler.marshal(&Decl::param("fmt", "const char *, ..."), 0).unwrap_err();
        assert_eq!(err.type_name, "const char *, ...");
    }
}
