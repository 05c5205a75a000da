//! Luashim Engine
//!
//! Generates Lua C-API bindings for overloaded C++ declarations:
//! - **AST**: serde model of clang's `-ast-dump=json` output (`ast` module)
//! - **Catalog**: canonical C++ type → marshaling rule (`catalog` module)
//! - **Marshaling**: argument extraction and return pushes (`marshal` module)
//! - **Dispatch**: overload trie, code emission and a resolver that models the
//!   generated code (`dispatch` module)
//! - **Adjuncts**: enum constant tables and struct handle tables (`enums`, `structs`)
//! - **Generator**: walker plus emission for a whole translation unit (`generator` module)
//!
//! # Example
//!
//! ```rust,ignore
//! use luashim_engine::{BindingConfig, Generator, ClangFrontend};
//!
//! let config = BindingConfig::imgui();
//! let ast = ClangFrontend::from_config(&config.compiler).dump("imgui.h".as_ref())?;
//! let generation = Generator::new(config).generate(&ast);
//! print!("{}", generation.source);
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

// ============================================================================
// Core Modules
// ============================================================================

/// Clang JSON AST model
pub mod ast;

/// Type catalog: marshaling rules per canonical type
pub mod catalog;

/// Argument and return marshaling
pub mod marshal;

/// Overload dispatch: trie, emission, resolution
pub mod dispatch;

/// Enum constant tables
pub mod enums;

/// Struct handle tables
pub mod structs;

/// Declaration walker
pub mod walker;

/// Generator facade
pub mod generator;

/// Clang frontend
pub mod frontend;

/// Binding configuration
pub mod config;

/// Generation diagnostics
pub mod diagnostic;

/// Error types
pub mod error;

/// Indented source writer
pub mod writer;

// ============================================================================
// Re-exports
// ============================================================================

pub use ast::{Decl, DeclKind, TypeDesc};
pub use catalog::{ParamRule, ReturnRule, RuntimeCategory, TypeCatalog};
pub use config::{find_config, BindingConfig, CompilerConfig, ConfigError, EnumRule, FunctionRule, UnsupportedPolicy};
pub use diagnostic::{Diagnostic, DiagnosticMeta, Severity};
pub use dispatch::{CallContext, DispatchFailure, DispatchPlan, Planner, Resolution, TrieNode};
pub use error::GenError;
pub use frontend::{read_dump, ClangFrontend};
pub use generator::{Generation, GenerationStats, Generator};
