//! `luashim generate`: emit bindings for a header or AST dump.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use luashim_engine::{read_dump, ClangFrontend, Diagnostic, GenError, Generation, Generator, Severity};
use termcolor::ColorChoice;

use crate::output::StyledOutput;

/// Arguments of `luashim generate`.
pub struct GenerateArgs {
    pub file: PathBuf,
    pub config: Option<PathBuf>,
    pub ast: bool,
    pub output: Option<PathBuf>,
    pub compiler: Option<String>,
    pub std: Option<String>,
    pub format: String,
    pub deny_warnings: bool,
}

pub fn execute(args: GenerateArgs, color: ColorChoice) -> anyhow::Result<()> {
    // 1. Load config and apply flag overrides
    let mut config = super::load_config(args.config.as_deref())?;
    if let Some(program) = args.compiler {
        config.compiler.program = program;
    }
    if let Some(std) = args.std {
        config.compiler.std = std;
    }

    // 2. Obtain the AST
    let root = if args.ast {
        read_dump(&args.file)?
    } else {
        match ClangFrontend::from_config(&config.compiler).dump(&args.file) {
            Ok(root) => root,
            Err(GenError::Compiler { stderr, .. }) => {
                eprint!("{}", stderr);
                std::process::exit(1);
            }
            Err(e) => return Err(e.into()),
        }
    };

    // 3. Generate
    let generation = Generator::new(config).generate(&root);

    // 4. Write the source
    match &args.output {
        Some(path) => std::fs::write(path, &generation.source)
            .with_context(|| format!("writing {}", path.display()))?,
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(generation.source.as_bytes())?;
            stdout.flush()?;
        }
    }

    // 5. Report diagnostics
    let mut out = StyledOutput::new(color);
    match args.format.as_str() {
        "json" => emit_json(&generation.diagnostics)?,
        _ => {
            emit_pretty(&mut out, &generation.diagnostics);
            print_summary(&mut out, &generation);
        }
    }

    // 6. Exit code
    let mut failing = generation.error_count();
    if args.deny_warnings {
        failing += generation.warning_count();
    }
    if failing > 0 {
        std::process::exit(1);
    }
    Ok(())
}

// ── Pretty output ──────────────────────────────────────────────────────────

fn emit_pretty(out: &mut StyledOutput, diagnostics: &[Diagnostic]) {
    for d in diagnostics {
        match d.severity {
            Severity::Error => out.error(&format!("error[{}]", d.code)),
            Severity::Warn => out.warning(&format!("warning[{}]", d.code)),
            Severity::Off => continue,
        }
        out.bold(&format!(": {}", d.message));
        out.newline();

        out.location("  --> ");
        out.plain(&format!("{} ({})", d.binding, d.rule));
        out.newline();

        for note in &d.notes {
            out.location("   = ");
            out.bold("note");
            out.plain(&format!(": {}", note));
            out.newline();
        }
        out.newline();
    }
    out.flush();
}

// ── JSON output ────────────────────────────────────────────────────────────

fn emit_json(diagnostics: &[Diagnostic]) -> anyhow::Result<()> {
    let json = serde_json::to_string(diagnostics)?;
    eprintln!("{}", json);
    Ok(())
}

// ── Colored summary ────────────────────────────────────────────────────────

fn print_summary(out: &mut StyledOutput, generation: &Generation) {
    let stats = &generation.stats;
    let errors = generation.error_count();
    let warnings = generation.warning_count();

    out.plain(&format!(
        "Bound {} function{}, {} struct{} and {} enum{}",
        stats.functions,
        plural(stats.functions),
        stats.structs,
        plural(stats.structs),
        stats.enums,
        plural(stats.enums)
    ));
    if errors == 0 && warnings == 0 {
        out.plain(": ");
        out.success("no issues found.");
        out.newline();
        out.flush();
        return;
    }

    out.plain(": ");
    if errors > 0 {
        out.error(&format!("{} error{}", errors, plural(errors)));
    }
    if errors > 0 && warnings > 0 {
        out.plain(", ");
    }
    if warnings > 0 {
        out.warning(&format!("{} warning{}", warnings, plural(warnings)));
    }
    out.plain(".");
    out.newline();
    out.flush();
}

fn plural(n: usize) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}
