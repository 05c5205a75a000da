//! `luashim config`: print the effective configuration, followed by the
//! diagnostic rules and their effective severities as TOML comments.

use std::path::Path;

use luashim_engine::diagnostic;

pub fn execute(config: Option<&Path>) -> anyhow::Result<()> {
    let config = super::load_config(config)?;
    print!("{}", config.to_toml()?);

    println!();
    println!("# Diagnostic rules:");
    for meta in diagnostic::all() {
        let severity = config.effective_severity(meta.name, meta.default_severity);
        println!("#   {} {:<22} {:<5}  {}", meta.code, meta.name, severity, meta.description);
    }
    Ok(())
}
