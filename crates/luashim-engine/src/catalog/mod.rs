//! Type catalog
//!
//! Maps canonical C++ types to marshaling rules. Parameter rules and return
//! rules live in separate tables because the same type is usually spelled
//! differently in each position (`const ImVec2 &` vs `ImVec2`).
//!
//! Lookups are by exact canonical type string; callers desugar first.

mod builtin;

use std::fmt;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::config::BindingConfig;

/// Value kinds distinguishable on the Lua stack without conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeCategory {
    /// `LUA_TBOOLEAN`
    Boolean,
    /// `LUA_TNUMBER`
    Number,
    /// `LUA_TSTRING`
    String,
    /// No value at this stack index
    Absent,
}

impl RuntimeCategory {
    /// C++ expression testing that stack index `slot` holds this category.
    pub fn check_expr(self, slot: usize) -> String {
        match self {
            RuntimeCategory::Boolean => format!("LUA_TBOOLEAN == lua_type(L, {})", slot),
            RuntimeCategory::Number => format!("LUA_TNUMBER == lua_type(L, {})", slot),
            RuntimeCategory::String => format!("LUA_TSTRING == lua_type(L, {})", slot),
            RuntimeCategory::Absent => format!("lua_isnone(L, {})", slot),
        }
    }
}

impl fmt::Display for RuntimeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuntimeCategory::Boolean => write!(f, "boolean"),
            RuntimeCategory::Number => write!(f, "number"),
            RuntimeCategory::String => write!(f, "string"),
            RuntimeCategory::Absent => write!(f, "absent"),
        }
    }
}

/// How one parameter type is read from the Lua stack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamRule {
    /// Category required at each consumed slot, in slot order
    pub categories: Vec<RuntimeCategory>,
    /// Statements that extract the native value(s)
    pub extract: Vec<String>,
    /// Expression passed to the native call
    pub argument: String,
    /// Statement pushing the value back after the call (out-parameters)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub push_back: Option<String>,
}

impl ParamRule {
    /// Build a rule from string slices.
    pub fn new(categories: &[RuntimeCategory], extract: &[&str], argument: &str) -> Self {
        Self {
            categories: categories.to_vec(),
            extract: extract.iter().map(|s| s.to_string()).collect(),
            argument: argument.to_string(),
            push_back: None,
        }
    }

    /// Attach a push-back statement.
    pub fn with_push_back(mut self, push_back: &str) -> Self {
        self.push_back = Some(push_back.to_string());
        self
    }

    /// Number of stack slots consumed.
    pub fn slots(&self) -> usize {
        self.categories.len()
    }
}

/// How one return type is pushed onto the Lua stack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ReturnRule {
    /// Nothing is pushed
    Void,
    /// One push per component, in field order
    Values {
        /// Push statements; `{var}` is the result variable
        pushes: Vec<String>,
    },
    /// The pointer is wrapped in a handle object by `Push<name>`
    Handle {
        /// Struct whose handle constructor is used
        name: String,
    },
}

impl ReturnRule {
    /// Build a `Values` rule from string slices.
    pub fn values(pushes: &[&str]) -> Self {
        ReturnRule::Values {
            pushes: pushes.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Canonical type → marshaling rule tables.
#[derive(Debug, Clone, Default)]
pub struct TypeCatalog {
    params: FxHashMap<String, ParamRule>,
    returns: FxHashMap<String, ReturnRule>,
}

impl TypeCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog with the built-in C/ImGui scalar and vector types.
    pub fn imgui() -> Self {
        let mut catalog = Self::new();
        builtin::install(&mut catalog);
        catalog
    }

    /// Built-ins, plus handles for every whitelisted struct, plus the
    /// configured extensions (which may replace built-ins).
    pub fn for_config(config: &BindingConfig) -> Self {
        let mut catalog = Self::imgui();
        for name in config.structs.keys() {
            catalog.register_handle(name);
        }
        for (ty, rule) in &config.params {
            catalog.insert_param(ty, rule.clone());
        }
        for (ty, rule) in &config.returns {
            catalog.insert_return(ty, rule.clone());
        }
        catalog
    }

    /// Add or replace a parameter rule.
    pub fn insert_param(&mut self, ty: &str, rule: ParamRule) {
        self.params.insert(ty.to_string(), rule);
    }

    /// Add or replace a return rule.
    pub fn insert_return(&mut self, ty: &str, rule: ReturnRule) {
        self.returns.insert(ty.to_string(), rule);
    }

    /// Make `<name> *` returnable as a handle.
    pub fn register_handle(&mut self, name: &str) {
        self.insert_return(
            &format!("{} *", name),
            ReturnRule::Handle {
                name: name.to_string(),
            },
        );
    }

    /// Drop every handle rule whose struct fails `keep`.
    pub fn retain_handles(&mut self, mut keep: impl FnMut(&str) -> bool) {
        self.returns.retain(|_, rule| match rule {
            ReturnRule::Handle { name } => keep(name),
            _ => true,
        });
    }

    /// Rule for a parameter type.
    pub fn param(&self, ty: &str) -> Option<&ParamRule> {
        self.params.get(ty)
    }

    /// Rule for a return type.
    pub fn returns(&self, ty: &str) -> Option<&ReturnRule> {
        self.returns.get(ty)
    }

    /// Supported parameter types, sorted.
    pub fn param_types(&self) -> Vec<&str> {
        let mut types: Vec<&str> = self.params.keys().map(String::as_str).collect();
        types.sort_unstable();
        types
    }

    /// Supported return types, sorted.
    pub fn return_types(&self) -> Vec<&str> {
        let mut types: Vec<&str> = self.returns.keys().map(String::as_str).collect();
        types.sort_unstable();
        types
    }
}
