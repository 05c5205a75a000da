//! `luashim types`: list the marshalable types of the effective catalog.

use std::path::Path;

use luashim_engine::{ReturnRule, TypeCatalog};

pub fn execute(config: Option<&Path>) -> anyhow::Result<()> {
    let config = super::load_config(config)?;
    let catalog = TypeCatalog::for_config(&config);

    let width = catalog
        .param_types()
        .into_iter()
        .chain(catalog.return_types())
        .map(str::len)
        .max()
        .unwrap_or(0);

    println!("Parameter types:");
    for ty in catalog.param_types() {
        if let Some(rule) = catalog.param(ty) {
            let categories: Vec<String> = rule.categories.iter().map(ToString::to_string).collect();
            let out = if rule.push_back.is_some() { " (in/out)" } else { "" };
            println!("  {:<width$}  {}{}", ty, categories.join(", "), out, width = width);
        }
    }

    println!();
    println!("Return types:");
    for ty in catalog.return_types() {
        let shape = match catalog.returns(ty) {
            Some(ReturnRule::Void) => "nothing".to_string(),
            Some(ReturnRule::Values { pushes }) => format!("{} value(s)", pushes.len()),
            Some(ReturnRule::Handle { name }) => format!("{} handle", name),
            None => continue,
        };
        println!("  {:<width$}  {}", ty, shape, width = width);
    }
    Ok(())
}
