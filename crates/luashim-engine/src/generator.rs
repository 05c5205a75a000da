//! Generator facade
//!
//! [`Generator`] is the public entry point: create one from a
//! [`BindingConfig`], then call [`generate`](Generator::generate) on a parsed
//! AST or [`generate_json`](Generator::generate_json) on a dump.

use rustc_hash::FxHashSet;

use crate::ast::Decl;
use crate::catalog::TypeCatalog;
use crate::config::BindingConfig;
use crate::diagnostic::{Diagnostic, Severity, UNMATCHED_WHITELIST};
use crate::dispatch::{emit_function, CallContext, DispatchPlan, Planner};
use crate::enums::{emit_enum, short_name};
use crate::error::GenError;
use crate::structs::{declare_handle, emit_struct};
use crate::walker::{Collected, RootWalker};
use crate::writer::CodeWriter;

/// Counts of what was emitted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerationStats {
    /// Struct handle constructors
    pub structs: usize,
    /// Method closures across all structs
    pub methods: usize,
    /// Enum blocks
    pub enums: usize,
    /// Enum constants
    pub constants: usize,
    /// Free-function closures
    pub functions: usize,
    /// Overloads taking part in dispatch, methods included
    pub overloads: usize,
}

/// Result of one generation run.
#[derive(Debug)]
pub struct Generation {
    /// Generated C++ source
    pub source: String,
    /// Diagnostics after severity overrides
    pub diagnostics: Vec<Diagnostic>,
    /// Emission counts
    pub stats: GenerationStats,
}

impl Generation {
    /// Number of error-severity diagnostics.
    pub fn error_count(&self) -> usize {
        self.count(Severity::Error)
    }

    /// Number of warning-severity diagnostics.
    pub fn warning_count(&self) -> usize {
        self.count(Severity::Warn)
    }

    fn count(&self, severity: Severity) -> usize {
        self.diagnostics.iter().filter(|d| d.severity == severity).count()
    }
}

/// Binding generator. Holds a configuration and the catalog derived from it.
#[derive(Debug, Clone)]
pub struct Generator {
    config: BindingConfig,
    catalog: TypeCatalog,
}

impl Generator {
    /// Create a generator; the catalog is built from the config.
    pub fn new(config: BindingConfig) -> Self {
        let catalog = TypeCatalog::for_config(&config);
        Self { config, catalog }
    }

    /// Create a generator with an explicit catalog.
    pub fn with_catalog(config: BindingConfig, catalog: TypeCatalog) -> Self {
        Self { config, catalog }
    }

    /// The configuration in use.
    pub fn config(&self) -> &BindingConfig {
        &self.config
    }

    /// The catalog in use.
    pub fn catalog(&self) -> &TypeCatalog {
        &self.catalog
    }

    /// Parse a JSON AST dump and generate from it.
    pub fn generate_json(&self, text: &str) -> Result<Generation, GenError> {
        let root = Decl::from_json(text)?;
        Ok(self.generate(&root))
    }

    /// Generate bindings for everything whitelisted under `root`: struct
    /// handles first, then enum tables, then free functions.
    pub fn generate(&self, root: &Decl) -> Generation {
        let collected = RootWalker::new(&self.config).walk(root);

        // Pointer returns are only marshalable for structs whose constructor is emitted.
        let emitted: FxHashSet<&str> = collected.structs.iter().map(|s| s.name.as_str()).collect();
        let mut catalog = self.catalog.clone();
        catalog.retain_handles(|name| {
            let keep = emitted.contains(name);
            if !keep {
                log::debug!("struct {}: no handle constructor emitted; `{} *` returns are unsupported", name, name);
            }
            keep
        });
        let planner = Planner::new(&catalog, self.config.on_unsupported);
        let ctx = CallContext {
            namespace: &self.config.namespace,
            handle_prefix: &self.config.handle_prefix,
        };

        let mut w = CodeWriter::new();
        let mut diagnostics = Vec::new();
        let mut stats = GenerationStats::default();

        for binding in &collected.structs {
            declare_handle(&mut w, &binding.name);
        }
        if !collected.structs.is_empty() {
            w.blank();
        }

        for binding in &collected.structs {
            let plans: Vec<DispatchPlan<'_>> = binding
                .methods
                .iter()
                .map(|group| planner.plan(&group.name, Some(binding.name.as_str()), &group.decls, &mut diagnostics))
                .collect();
            emit_struct(&mut w, &binding.name, &plans, &ctx);
            stats.structs += 1;
            stats.methods += plans.len();
            stats.overloads += plans.iter().map(|p| p.overloads.len()).sum::<usize>();
        }

        for decl in &collected.enums {
            let short = short_name(&self.config, decl.name());
            stats.constants += emit_enum(&mut w, decl, &short);
            stats.enums += 1;
        }

        for group in &collected.functions {
            let plan = planner.plan(&group.name, None, &group.decls, &mut diagnostics);
            emit_function(&mut w, &plan, &ctx);
            stats.functions += 1;
            stats.overloads += plan.overloads.len();
        }

        self.report_unmatched(&collected, &mut diagnostics);

        diagnostics.retain_mut(|d| {
            let eff = self.config.effective_severity(d.rule, d.severity);
            if eff == Severity::Off {
                return false;
            }
            d.severity = eff;
            true
        });

        log::info!(
            "generated {} struct(s) with {} method(s), {} enum(s) with {} constant(s), {} function(s); {} overload(s) bound",
            stats.structs,
            stats.methods,
            stats.enums,
            stats.constants,
            stats.functions,
            stats.overloads
        );

        Generation {
            source: w.finish(),
            diagnostics,
            stats,
        }
    }

    fn report_unmatched(&self, collected: &Collected<'_>, diagnostics: &mut Vec<Diagnostic>) {
        let unmatched = |binding: String, what: &str| {
            Diagnostic::new(
                &UNMATCHED_WHITELIST,
                binding.as_str(),
                format!("whitelisted {} `{}` was not found", what, binding),
            )
        };

        let functions: FxHashSet<&str> = collected.functions.iter().map(|g| g.name.as_str()).collect();
        for name in self.config.functions.keys() {
            if !functions.contains(name.as_str()) {
                diagnostics.push(
                    unmatched(name.clone(), "function")
                        .with_note(format!("looked in namespace `{}`", self.config.namespace)),
                );
            }
        }

        let enums: FxHashSet<&str> = collected.enums.iter().map(|d| d.name()).collect();
        for name in self.config.enums.keys() {
            if !enums.contains(name.as_str()) {
                diagnostics.push(unmatched(name.clone(), "enum"));
            }
        }

        for (name, methods) in &self.config.structs {
            let Some(binding) = collected.structs.iter().find(|s| &s.name == name) else {
                diagnostics.push(unmatched(name.clone(), "struct").with_note("no definition with members"));
                continue;
            };
            let found: FxHashSet<&str> = binding.methods.iter().map(|g| g.name.as_str()).collect();
            let mut reported = FxHashSet::default();
            for method in methods {
                if !found.contains(method.as_str()) && reported.insert(method.as_str()) {
                    diagnostics.push(unmatched(format!("{}::{}", name, method), "method"));
                }
            }
        }
    }
}
