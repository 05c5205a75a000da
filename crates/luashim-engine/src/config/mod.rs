//! Binding configuration (luashim.toml)
//!
//! Whitelists, naming conventions, catalog extensions and diagnostic
//! severity overrides. A configuration is an explicit value handed to the
//! generator; nothing is read from global state.

mod imgui;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::ast::Decl;
use crate::catalog::{ParamRule, ReturnRule, RuntimeCategory};
use crate::diagnostic::{self, Severity};
use crate::marshal::template;

/// File name searched for by [`find_config`].
pub const CONFIG_FILE_NAME: &str = "luashim.toml";

/// Errors that can occur while loading a configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Validation error
    #[error("Invalid config: {0}")]
    ValidationError(String),
}

/// What to do with an overload whose types the catalog cannot marshal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnsupportedPolicy {
    /// Exclude the overload, unless the unsupported parameter is defaulted,
    /// in which case bind it without that parameter.
    #[default]
    Skip,
    /// Register the overload with the parameters before the unsupported one
    /// and treat an unsupported return as void.
    Truncate,
}

/// Inclusion predicate for a whitelisted function name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionRule {
    /// Minimum number of declared parameters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_params: Option<usize>,
    /// Maximum number of declared parameters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_params: Option<usize>,
    /// Declarations with a parameter of any of these canonical types are skipped
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclude_param_types: Vec<String>,
}

impl FunctionRule {
    /// Whether `decl` should join the overload set.
    pub fn accepts(&self, decl: &Decl) -> bool {
        let count = decl.params().count();
        if self.min_params.is_some_and(|min| count < min) {
            return false;
        }
        if self.max_params.is_some_and(|max| count > max) {
            return false;
        }
        !decl.params().any(|p| {
            let ty = p.canonical_type().unwrap_or("");
            self.exclude_param_types.iter().any(|excluded| excluded == ty)
        })
    }
}

/// Naming for a whitelisted enum.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumRule {
    /// Short name used as the constant prefix; empty registers bare
    /// enumerator suffixes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
}

/// How to invoke the compiler that produces the AST.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompilerConfig {
    /// Compiler executable (default: "clang++")
    #[serde(default = "default_program")]
    pub program: String,
    /// Language standard passed as `-std=` (default: "c++2b")
    #[serde(default = "default_std")]
    pub std: String,
    /// Extra arguments (include paths, defines)
    #[serde(default)]
    pub args: Vec<String>,
}

fn default_program() -> String {
    "clang++".to_string()
}

fn default_std() -> String {
    "c++2b".to_string()
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
            std: default_std(),
            args: Vec::new(),
        }
    }
}

/// Binding configuration (luashim.toml)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BindingConfig {
    /// Namespace holding the free functions; also the callee prefix
    #[serde(default = "default_namespace")]
    pub namespace: String,

    /// Prefix of the metatable names registered for struct handles
    #[serde(default = "default_handle_prefix")]
    pub handle_prefix: String,

    /// Prefix stripped from enum names to build constant names
    #[serde(default = "default_enum_prefix")]
    pub enum_prefix: String,

    /// Policy for overloads with unsupported types
    #[serde(default)]
    pub on_unsupported: UnsupportedPolicy,

    /// Frontend settings
    #[serde(default)]
    pub compiler: CompilerConfig,

    /// Whitelisted free functions
    #[serde(default)]
    pub functions: BTreeMap<String, FunctionRule>,

    /// Whitelisted enums
    #[serde(default)]
    pub enums: BTreeMap<String, EnumRule>,

    /// Whitelisted structs and their whitelisted methods
    #[serde(default)]
    pub structs: BTreeMap<String, Vec<String>>,

    /// Additional parameter marshaling rules
    #[serde(default)]
    pub params: BTreeMap<String, ParamRule>,

    /// Additional return marshaling rules
    #[serde(default)]
    pub returns: BTreeMap<String, ReturnRule>,

    /// Per-rule severity overrides, keyed by rule name
    #[serde(default)]
    pub diagnostics: BTreeMap<String, Severity>,
}

fn default_namespace() -> String {
    "ImGui".to_string()
}

fn default_handle_prefix() -> String {
    "imgui4lua".to_string()
}

fn default_enum_prefix() -> String {
    "ImGui".to_string()
}

impl Default for BindingConfig {
    fn default() -> Self {
        Self {
            namespace: default_namespace(),
            handle_prefix: default_handle_prefix(),
            enum_prefix: default_enum_prefix(),
            on_unsupported: UnsupportedPolicy::default(),
            compiler: CompilerConfig::default(),
            functions: BTreeMap::new(),
            enums: BTreeMap::new(),
            structs: BTreeMap::new(),
            params: BTreeMap::new(),
            returns: BTreeMap::new(),
            diagnostics: BTreeMap::new(),
        }
    }
}

impl BindingConfig {
    /// The built-in Dear ImGui whitelist.
    pub fn imgui() -> Self {
        imgui::preset()
    }

    /// Parse a config from a file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Parse a config from a string
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let config: BindingConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize back to TOML.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Validate the config
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.namespace.is_empty() && !self.namespace.split("::").all(is_identifier) {
            return Err(ConfigError::ValidationError(format!(
                "Invalid namespace: {}",
                self.namespace
            )));
        }

        for (name, rule) in &self.functions {
            if let (Some(min), Some(max)) = (rule.min_params, rule.max_params) {
                if min > max {
                    return Err(ConfigError::ValidationError(format!(
                        "Function {}: min_params ({}) exceeds max_params ({})",
                        name, min, max
                    )));
                }
            }
        }

        for (ty, rule) in &self.params {
            if rule.categories.is_empty() {
                return Err(ConfigError::ValidationError(format!(
                    "Parameter type `{}` must consume at least one slot",
                    ty
                )));
            }
            if rule.categories.contains(&RuntimeCategory::Absent) {
                return Err(ConfigError::ValidationError(format!(
                    "Parameter type `{}` cannot require the absent category",
                    ty
                )));
            }
            if rule.argument.trim().is_empty() {
                return Err(ConfigError::ValidationError(format!(
                    "Parameter type `{}` has an empty argument expression",
                    ty
                )));
            }
            let slots = rule.categories.len();
            let out_of_range = rule
                .extract
                .iter()
                .chain(std::iter::once(&rule.argument))
                .chain(rule.push_back.iter())
                .flat_map(|t| template::slot_placeholders(t))
                .find(|digits| digits.parse::<usize>().map_or(true, |n| n >= slots));
            if let Some(digits) = out_of_range {
                return Err(ConfigError::ValidationError(format!(
                    "Parameter type `{}` uses {{slot{}}} but consumes {} slot(s)",
                    ty, digits, slots
                )));
            }
        }

        for (name, methods) in &self.structs {
            if !is_identifier(name) {
                return Err(ConfigError::ValidationError(format!("Invalid struct name: {}", name)));
            }
            if let Some(bad) = methods.iter().find(|m| !is_identifier(m)) {
                return Err(ConfigError::ValidationError(format!(
                    "Invalid method name in {}: {:?}",
                    name, bad
                )));
            }
        }

        for rule in self.diagnostics.keys() {
            if diagnostic::lookup(rule).is_none() {
                return Err(ConfigError::ValidationError(format!("Unknown diagnostic rule: {}", rule)));
            }
        }

        Ok(())
    }

    /// Effective severity for a rule, falling back to its default.
    pub fn effective_severity(&self, rule: &str, default: Severity) -> Severity {
        self.diagnostics.get(rule).copied().unwrap_or(default)
    }
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Walk up from `start` to find `luashim.toml`.
pub fn find_config(start: &Path) -> Option<PathBuf> {
    let mut dir = start.to_path_buf();
    loop {
        let candidate = dir.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            return Some(candidate);
        }
        if !dir.pop() {
            return None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal() {
        let config = BindingConfig::from_str("").unwrap();
        assert_eq!(config.namespace, "ImGui");
        assert_eq!(config.handle_prefix, "imgui4lua");
        assert_eq!(config.on_unsupported, UnsupportedPolicy::Skip);
        assert_eq!(config.compiler.program, "clang++");
        assert!(config.functions.is_empty());
    }

    #[test]
    fn test_parse_full() {
        let toml = r#"
namespace = "Gui"
on_unsupported = "truncate"

[compiler]
args = ["-Ithird_party/imgui"]

[functions]
Begin = {}
Text = { max_params = 1 }

[enums]
ImGuiWindowFlags_ = { alias = "WF" }

[structs]
ImDrawList = ["AddLine", "PathClear"]

[params."double"]
categories = ["number"]
extract = ["const double {var} = luaL_checknumber(L, {slot0});"]
argument = "{var}"

[returns."double"]
kind = "values"
pushes = ["lua_pushnumber(L, {var});"]

[returns."ImFont *"]
kind = "void"

[diagnostics]
unsupported-return = "error"
unmatched-whitelist = "off"
"#;
        let config = BindingConfig::from_str(toml).unwrap();
        assert_eq!(config.namespace, "Gui");
        assert_eq!(config.on_unsupported, UnsupportedPolicy::Truncate);
        assert_eq!(config.compiler.std, "c++2b");
        assert_eq!(config.compiler.args, vec!["-Ithird_party/imgui"]);
        assert_eq!(config.functions["Text"].max_params, Some(1));
        assert_eq!(config.enums["ImGuiWindowFlags_"].alias.as_deref(), Some("WF"));
        assert_eq!(config.structs["ImDrawList"].len(), 2);
        assert_eq!(config.params["double"].categories, vec![RuntimeCategory::Number]);
        assert_eq!(config.returns["ImFont *"], ReturnRule::Void);
        assert_eq!(
            config.effective_severity("unsupported-return", Severity::Warn),
            Severity::Error
        );
        assert_eq!(
            config.effective_severity("unmatched-whitelist", Severity::Warn),
            Severity::Off
        );
    }

    #[test]
    fn test_reject_absent_category() {
        let toml = r#"
[params."void *"]
categories = ["absent"]
extract = []
argument = "nullptr"
"#;
        let err = BindingConfig::from_str(toml).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_reject_slot_beyond_categories() {
        let toml = r#"
[params."ImVec2"]
categories = ["number", "number"]
extract = ["const float {var}_x = lua_tonumber(L, {slot0});", "const float {var}_y = lua_tonumber(L, {slot2});"]
argument = "ImVec2 {{var}_x, {var}_y}"
"#;
        let err = BindingConfig::from_str(toml).unwrap_err();
        assert!(err.to_string().contains("uses {slot2} but consumes 2 slot(s)"));

        let huge = format!(
            "[params.\"int\"]\ncategories = [\"number\"]\nextract = []\nargument = \"{{slot{}0}}\"\n",
            usize::MAX
        );
        assert!(matches!(
            BindingConfig::from_str(&huge),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_reject_unknown_rule() {
        let err = BindingConfig::from_str("[diagnostics]\nno-such-rule = \"off\"\n").unwrap_err();
        assert!(err.to_string().contains("no-such-rule"));
    }

    #[test]
    fn test_reject_bad_namespace() {
        assert!(BindingConfig::from_str("namespace = \"Im Gui\"").is_err());
        assert!(BindingConfig::from_str("namespace = \"outer::inner\"").is_ok());
        assert!(BindingConfig::from_str("namespace = \"\"").is_ok());
    }

    #[test]
    fn test_reject_inverted_param_bounds() {
        let toml = "[functions]\nText = { min_params = 3, max_params = 1 }\n";
        assert!(BindingConfig::from_str(toml).is_err());
    }

    #[test]
    fn test_parse_error() {
        let err = BindingConfig::from_str("namespace = ").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn test_function_rule_accepts() {
        let decl = Decl::function(
            "Text",
            "void",
            vec![Decl::param("fmt", "const char *"), Decl::param("", "...")],
        );
        assert!(FunctionRule::default().accepts(&decl));
        let rule = FunctionRule {
            max_params: Some(1),
            ..FunctionRule::default()
        };
        assert!(!rule.accepts(&decl));
        let rule = FunctionRule {
            exclude_param_types: vec!["...".to_string()],
            ..FunctionRule::default()
        };
        assert!(!rule.accepts(&decl));
        let rule = FunctionRule {
            min_params: Some(2),
            ..FunctionRule::default()
        };
        assert!(rule.accepts(&decl));
    }

    #[test]
    fn test_preset_roundtrips_through_toml() {
        let preset = BindingConfig::imgui();
        let text = preset.to_toml().unwrap();
        let parsed = BindingConfig::from_str(&text).unwrap();
        assert_eq!(parsed, preset);
    }

    #[test]
    fn test_find_config_walks_up() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a/b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "").unwrap();
        assert_eq!(find_config(&nested), Some(dir.path().join(CONFIG_FILE_NAME)));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "handle_prefix = \"ui\"\n").unwrap();
        assert_eq!(BindingConfig::from_file(&path).unwrap().handle_prefix, "ui");
        assert!(matches!(
            BindingConfig::from_file(&dir.path().join("missing.toml")),
            Err(ConfigError::IoError(_))
        ));
    }
}
