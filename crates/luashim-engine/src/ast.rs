//! Clang JSON AST model
//!
//! Only the fields the generator reads are modeled. Everything else in the
//! dump (locations, ranges, expression payloads) is ignored during
//! deserialization.

use serde::Deserialize;

/// Declaration kind, as reported by clang's `kind` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
pub enum DeclKind {
    /// Root of the dump
    TranslationUnitDecl,
    /// `namespace X { ... }`
    NamespaceDecl,
    /// Free function
    FunctionDecl,
    /// Member function
    #[serde(rename = "CXXMethodDecl")]
    CxxMethodDecl,
    /// Function or method parameter
    ParmVarDecl,
    /// `enum X { ... }`
    EnumDecl,
    /// Enumerator
    EnumConstantDecl,
    /// `struct`/`class`
    #[serde(rename = "CXXRecordDecl")]
    CxxRecordDecl,
    /// Data member
    FieldDecl,
    /// Anything else (expressions, typedefs, attributes, ...)
    #[default]
    #[serde(other)]
    Other,
}

/// Type descriptor attached to a declaration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TypeDesc {
    /// Type as spelled in the source
    #[serde(rename = "qualType")]
    pub qual_type: String,
    /// Type with aliases resolved, when it differs from `qual_type`
    #[serde(rename = "desugaredQualType", default)]
    pub desugared_qual_type: Option<String>,
}

impl TypeDesc {
    /// Canonical type string used as the catalog key.
    pub fn canonical(&self) -> &str {
        self.desugared_qual_type.as_deref().unwrap_or(&self.qual_type)
    }
}

/// A node of the clang AST.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Decl {
    /// Node kind
    #[serde(default)]
    pub kind: DeclKind,
    /// Declared name, if any
    #[serde(default)]
    pub name: Option<String>,
    /// Declared type, if any
    #[serde(rename = "type", default)]
    pub ty: Option<TypeDesc>,
    /// Initialization style; present on parameters with a default argument
    #[serde(default)]
    pub init: Option<String>,
    /// Child nodes
    #[serde(default)]
    pub inner: Vec<Decl>,
}

impl Decl {
    /// Parse a JSON AST dump.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Parse a JSON AST dump from raw bytes (compiler stdout).
    pub fn from_json_slice(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }

    /// Create a bare node.
    pub fn new(kind: DeclKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Create a parameter of the given canonical type.
    pub fn param(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self::new(DeclKind::ParmVarDecl, name).with_type(ty)
    }

    /// Create a free function. The function type string is assembled from the
    /// return type and the parameter types, the way clang spells it.
    pub fn function(name: impl Into<String>, ret: &str, params: Vec<Decl>) -> Self {
        Self::callable(DeclKind::FunctionDecl, name, ret, params)
    }

    /// Create a member function.
    pub fn method(name: impl Into<String>, ret: &str, params: Vec<Decl>) -> Self {
        Self::callable(DeclKind::CxxMethodDecl, name, ret, params)
    }

    fn callable(kind: DeclKind, name: impl Into<String>, ret: &str, params: Vec<Decl>) -> Self {
        let param_types: Vec<&str> = params.iter().filter_map(|p| p.canonical_type()).collect();
        let signature = format!("{} ({})", ret, param_types.join(", "));
        let mut decl = Self::new(kind, name).with_type(signature);
        decl.inner = params;
        decl
    }

    /// Set the type.
    pub fn with_type(mut self, qual_type: impl Into<String>) -> Self {
        self.ty = Some(TypeDesc {
            qual_type: qual_type.into(),
            desugared_qual_type: None,
        });
        self
    }

    /// Set the desugared type (keeps the spelled type).
    pub fn with_desugared(mut self, desugared: impl Into<String>) -> Self {
        let qual_type = self.ty.take().map(|t| t.qual_type).unwrap_or_default();
        self.ty = Some(TypeDesc {
            qual_type,
            desugared_qual_type: Some(desugared.into()),
        });
        self
    }

    /// Mark a parameter as carrying a default argument.
    pub fn with_default(mut self) -> Self {
        self.init = Some("c".to_string());
        self
    }

    /// Append a child node.
    pub fn with_child(mut self, child: Decl) -> Self {
        self.inner.push(child);
        self
    }

    /// Declared name, or `""` for anonymous nodes.
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }

    /// Canonical type of this declaration.
    pub fn canonical_type(&self) -> Option<&str> {
        self.ty.as_ref().map(TypeDesc::canonical)
    }

    /// Parameters of a function or method, in declaration order.
    pub fn params(&self) -> impl Iterator<Item = &Decl> {
        self.inner.iter().filter(|d| d.kind == DeclKind::ParmVarDecl)
    }

    /// Whether a parameter carries a default argument.
    pub fn has_default(&self) -> bool {
        self.init.is_some() || !self.inner.is_empty()
    }

    /// Canonical return type of a function or method: the function type up to
    /// its parameter list.
    pub fn return_type(&self) -> Option<&str> {
        let ty = self.canonical_type()?;
        let end = ty.find('(').unwrap_or(ty.len());
        Some(ty[..end].trim())
    }
}
