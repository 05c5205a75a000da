//! Enum constant tables.

use crate::ast::{Decl, DeclKind};
use crate::config::BindingConfig;
use crate::writer::CodeWriter;

/// Prefix used for the constants of `enum_name`: the configured alias, or
/// the name with the enum prefix stripped and trailing underscores trimmed.
pub fn short_name(config: &BindingConfig, enum_name: &str) -> String {
    if let Some(alias) = config.enums.get(enum_name).and_then(|rule| rule.alias.as_deref()) {
        return alias.to_string();
    }
    enum_name
        .strip_prefix(config.enum_prefix.as_str())
        .unwrap_or(enum_name)
        .trim_end_matches('_')
        .to_string()
}

/// Enumerators of `decl` whose names start with the enum's name, paired
/// with the remaining suffix.
pub fn members(decl: &Decl) -> impl Iterator<Item = (&str, &str)> {
    let prefix = decl.name();
    decl.inner
        .iter()
        .filter(|child| child.kind == DeclKind::EnumConstantDecl)
        .filter_map(move |child| {
            let name = child.name();
            let suffix = name.strip_prefix(prefix)?;
            (!suffix.is_empty()).then_some((name, suffix))
        })
}

/// Emit one block that sets an integer field per member on the table at the
/// top of the stack. Returns the number of constants registered.
pub fn emit_enum(w: &mut CodeWriter, decl: &Decl, short: &str) -> usize {
    let mut count = 0;
    w.line(format!("{{  // {}", decl.name()));
    w.indented(|w| {
        for (member, suffix) in members(decl) {
            let field = if short.is_empty() {
                suffix.to_string()
            } else {
                format!("{}_{}", short, suffix)
            };
            w.line(format!(
                "lua_pushinteger(L, static_cast<lua_Integer>({})); lua_setfield(L, -2, \"{}\");",
                member, field
            ));
            count += 1;
        }
    });
    w.line(format!("}}  // {}", decl.name()));
    w.blank();
    count
}
