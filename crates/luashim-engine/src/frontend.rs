//! Clang frontend: runs the compiler in AST-dump mode and parses its output.

use std::path::Path;
use std::process::Command;

use crate::ast::Decl;
use crate::config::CompilerConfig;
use crate::error::GenError;

/// Invokes a clang-compatible compiler to dump a header's AST as JSON.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClangFrontend {
    /// Compiler executable
    pub program: String,
    /// Language standard (`-std=`)
    pub std: String,
    /// Extra arguments placed before the input file
    pub args: Vec<String>,
}

impl Default for ClangFrontend {
    fn default() -> Self {
        Self::from_config(&CompilerConfig::default())
    }
}

impl ClangFrontend {
    /// Create from the `[compiler]` table.
    pub fn from_config(config: &CompilerConfig) -> Self {
        Self {
            program: config.program.clone(),
            std: config.std.clone(),
            args: config.args.clone(),
        }
    }

    /// Command-line arguments for `path`.
    pub fn args(&self, path: &Path) -> Vec<String> {
        let mut args = vec![
            "-x".to_string(),
            "c++".to_string(),
            format!("-std={}", self.std),
            "-Xclang".to_string(),
            "-ast-dump=json".to_string(),
            "-fsyntax-only".to_string(),
        ];
        args.extend(self.args.iter().cloned());
        args.push(path.display().to_string());
        args
    }

    /// Run the compiler on `path` and parse the dump.
    pub fn dump(&self, path: &Path) -> Result<Decl, GenError> {
        let args = self.args(path);
        log::debug!("running {} {}", self.program, args.join(" "));

        let output = Command::new(&self.program)
            .args(&args)
            .output()
            .map_err(|source| GenError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(GenError::Compiler {
                status: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        log::debug!("parsing {} byte(s) of AST JSON", output.stdout.len());
        Ok(Decl::from_json_slice(&output.stdout)?)
    }
}

/// Read a pre-dumped JSON AST from disk.
pub fn read_dump(path: &Path) -> Result<Decl, GenError> {
    let bytes = std::fs::read(path).map_err(|source| GenError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Decl::from_json_slice(&bytes)?)
}
