//! Declaration walker: a single-pass visitor that collects whitelisted
//! enums, structs and free-function overload sets.

use rustc_hash::FxHashMap;

use crate::ast::{Decl, DeclKind};
use crate::config::BindingConfig;

/// All overloads of one name, in discovery order.
#[derive(Debug, Clone)]
pub struct OverloadGroup<'d> {
    /// Function or method name
    pub name: String,
    /// Declarations, in discovery order
    pub decls: Vec<&'d Decl>,
}

/// A whitelisted struct and its collected methods.
#[derive(Debug, Clone)]
pub struct StructBinding<'d> {
    /// Struct name
    pub name: String,
    /// Method overload sets, in discovery order
    pub methods: Vec<OverloadGroup<'d>>,
}

/// Everything the walker found.
#[derive(Debug, Clone, Default)]
pub struct Collected<'d> {
    /// Whitelisted enums
    pub enums: Vec<&'d Decl>,
    /// Whitelisted structs with a definition
    pub structs: Vec<StructBinding<'d>>,
    /// Free-function overload sets
    pub functions: Vec<OverloadGroup<'d>>,
}

/// Ordered groups with a name index.
#[derive(Debug, Default)]
struct Groups<'d> {
    groups: Vec<OverloadGroup<'d>>,
    index: FxHashMap<String, usize>,
}

impl<'d> Groups<'d> {
    fn push(&mut self, decl: &'d Decl) {
        let name = decl.name();
        match self.index.get(name) {
            Some(&i) => self.groups[i].decls.push(decl),
            None => {
                self.index.insert(name.to_string(), self.groups.len());
                self.groups.push(OverloadGroup {
                    name: name.to_string(),
                    decls: vec![decl],
                });
            }
        }
    }
}

/// Walks a translation unit once and collects what the config whitelists.
pub struct RootWalker<'c, 'd> {
    config: &'c BindingConfig,
    scope: Vec<&'d str>,
    enums: Vec<&'d Decl>,
    enum_index: FxHashMap<&'d str, usize>,
    structs: Vec<StructBinding<'d>>,
    struct_index: FxHashMap<&'d str, usize>,
    functions: Groups<'d>,
}

impl<'c, 'd> RootWalker<'c, 'd> {
    /// Create a walker for `config`.
    pub fn new(config: &'c BindingConfig) -> Self {
        Self {
            config,
            scope: Vec::new(),
            enums: Vec::new(),
            enum_index: FxHashMap::default(),
            structs: Vec::new(),
            struct_index: FxHashMap::default(),
            functions: Groups::default(),
        }
    }

    /// Walk `root` and return the collected declarations.
    pub fn walk(mut self, root: &'d Decl) -> Collected<'d> {
        self.visit(root);
        Collected {
            enums: self.enums,
            structs: self.structs,
            functions: self.functions.groups,
        }
    }

    fn visit(&mut self, item: &'d Decl) {
        match item.kind {
            DeclKind::EnumDecl if self.config.enums.contains_key(item.name()) => self.visit_enum(item),
            DeclKind::CxxRecordDecl if self.config.structs.contains_key(item.name()) => {
                if !item.inner.is_empty() {
                    self.visit_struct(item);
                }
            }
            DeclKind::NamespaceDecl => {
                self.scope.push(item.name());
                for child in &item.inner {
                    self.visit(child);
                }
                self.scope.pop();
            }
            DeclKind::FunctionDecl => self.visit_function(item),
            _ => {
                for child in &item.inner {
                    self.visit(child);
                }
            }
        }
    }

    fn visit_enum(&mut self, item: &'d Decl) {
        match self.enum_index.get(item.name()) {
            Some(&i) => {
                // A later declaration only wins if it carries enumerators.
                if !item.inner.is_empty() {
                    self.enums[i] = item;
                }
            }
            None => {
                self.enum_index.insert(item.name(), self.enums.len());
                self.enums.push(item);
            }
        }
    }

    fn visit_struct(&mut self, item: &'d Decl) {
        let Some(whitelist) = self.config.structs.get(item.name()) else {
            return;
        };
        let mut methods = Groups::default();
        collect_methods(item, whitelist, &mut methods);
        log::debug!(
            "struct {}: {} whitelisted method name(s) found",
            item.name(),
            methods.groups.len()
        );

        let binding = StructBinding {
            name: item.name().to_string(),
            methods: methods.groups,
        };
        match self.struct_index.get(item.name()) {
            Some(&i) => self.structs[i] = binding,
            None => {
                self.struct_index.insert(item.name(), self.structs.len());
                self.structs.push(binding);
            }
        }
    }

    fn visit_function(&mut self, item: &'d Decl) {
        if !self.in_namespace() {
            return;
        }
        let Some(rule) = self.config.functions.get(item.name()) else {
            return;
        };
        if rule.accepts(item) {
            self.functions.push(item);
        } else {
            log::debug!("function {}: declaration rejected by its rule", item.name());
        }
    }

    fn in_namespace(&self) -> bool {
        let wanted = self.config.namespace.as_str();
        if wanted.is_empty() {
            return true;
        }
        let current = self.scope.join("::");
        current == wanted
            || current
                .strip_prefix(wanted)
                .is_some_and(|rest| rest.starts_with("::"))
    }
}

fn collect_methods<'d>(item: &'d Decl, whitelist: &[String], out: &mut Groups<'d>) {
    for child in &item.inner {
        if child.kind == DeclKind::CxxMethodDecl {
            if whitelist.iter().any(|m| m == child.name()) {
                out.push(child);
            }
        } else {
            collect_methods(child, whitelist, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{EnumRule, FunctionRule};

    fn config() -> BindingConfig {
        let mut config = BindingConfig::default();
        config.functions.insert("Button".to_string(), FunctionRule::default());
        config.functions.insert(
            "Text".to_string(),
            FunctionRule {
                max_params: Some(1),
                ..FunctionRule::default()
            },
        );
        config.enums.insert("ImGuiDir_".to_string(), EnumRule::default());
        config
            .structs
            .insert("ImDrawList".to_string(), vec!["PathClear".to_string()]);
        config
    }

    fn namespace(name: &str, children: Vec<Decl>) -> Decl {
        children
            .into_iter()
            .fold(Decl::new(DeclKind::NamespaceDecl, name), Decl::with_child)
    }

    #[test]
    fn test_collects_functions_in_namespace_only() {
        let config = config();
        let root = Decl::new(DeclKind::TranslationUnitDecl, "")
            .with_child(Decl::function("Button", "bool", vec![]))
            .with_child(namespace(
                "ImGui",
                vec![
                    Decl::function("Button", "bool", vec![Decl::param("label", "const char *")]),
                    Decl::function("Unlisted", "void", vec![]),
                    Decl::function("Button", "bool", vec![]),
                ],
            ));
        let collected = RootWalker::new(&config).walk(&root);
        assert_eq!(collected.functions.len(), 1);
        assert_eq!(collected.functions[0].name, "Button");
        assert_eq!(collected.functions[0].decls.len(), 2);
        assert_eq!(collected.functions[0].decls[0].params().count(), 1);
    }

    #[test]
    fn test_nested_namespace_inherits() {
        let config = config();
        let root = namespace(
            "ImGui",
            vec![namespace("detail", vec![Decl::function("Button", "bool", vec![])])],
        );
        let collected = RootWalker::new(&config).walk(&root);
        assert_eq!(collected.functions.len(), 1);

        let other = namespace("ImGuiExt", vec![Decl::function("Button", "bool", vec![])]);
        assert!(RootWalker::new(&config).walk(&other).functions.is_empty());
    }

    #[test]
    fn test_empty_namespace_accepts_all() {
        let mut config = config();
        config.namespace = String::new();
        let root = Decl::new(DeclKind::TranslationUnitDecl, "").with_child(Decl::function("Button", "bool", vec![]));
        assert_eq!(RootWalker::new(&config).walk(&root).functions.len(), 1);
    }

    #[test]
    fn test_function_rule_filters() {
        let config = config();
        let root = namespace(
            "ImGui",
            vec![
                Decl::function("Text", "void", vec![Decl::param("fmt", "const char *")]),
                Decl::function(
                    "Text",
                    "void",
                    vec![Decl::param("fmt", "const char *"), Decl::param("", "...")],
                ),
            ],
        );
        let collected = RootWalker::new(&config).walk(&root);
        assert_eq!(collected.functions[0].decls.len(), 1);
    }

    #[test]
    fn test_enum_definition_replaces_forward_declaration() {
        let config = config();
        let root = Decl::new(DeclKind::TranslationUnitDecl, "")
            .with_child(Decl::new(DeclKind::EnumDecl, "ImGuiDir_"))
            .with_child(
                Decl::new(DeclKind::EnumDecl, "ImGuiDir_")
                    .with_child(Decl::new(DeclKind::EnumConstantDecl, "ImGuiDir_Left")),
            );
        let collected = RootWalker::new(&config).walk(&root);
        assert_eq!(collected.enums.len(), 1);
        assert_eq!(collected.enums[0].inner.len(), 1);
    }

    #[test]
    fn test_struct_needs_definition() {
        let config = config();
        let definition = Decl::new(DeclKind::CxxRecordDecl, "ImDrawList")
            .with_child(Decl::method("PathClear", "void", vec![]))
            .with_child(Decl::method("PathStroke", "void", vec![]))
            .with_child(Decl::method("PathClear", "void", vec![Decl::param("n", "int")]));
        let root = Decl::new(DeclKind::TranslationUnitDecl, "")
            .with_child(Decl::new(DeclKind::CxxRecordDecl, "ImDrawList"))
            .with_child(definition);
        let collected = RootWalker::new(&config).walk(&root);
        assert_eq!(collected.structs.len(), 1);
        let methods = &collected.structs[0].methods;
        assert_eq!(methods.len(), 1);
        assert_eq!(methods[0].name, "PathClear");
        assert_eq!(methods[0].decls.len(), 2);
    }
}
