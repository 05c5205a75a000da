//! Placeholder substitution for catalog templates.
//!
//! Recognized placeholders are `{var}`, `{type}` and `{slotN}`. Any other
//! brace is copied through, so C++ brace initializers such as
//! `ImVec2 {{var}_1, {var}_2}` render as `ImVec2 {p0_1, p0_2}`.

/// Values substituted into one template.
#[derive(Debug, Clone, Copy)]
pub struct TemplateVars<'a> {
    /// C++ variable name
    pub var: &'a str,
    /// Canonical C++ type
    pub ty: &'a str,
    /// 1-based stack index of the first consumed slot
    pub first_slot: usize,
}

impl TemplateVars<'_> {
    fn lookup(&self, key: &str) -> Option<String> {
        match key {
            "var" => Some(self.var.to_string()),
            "type" => Some(self.ty.to_string()),
            _ => {
                let offset: usize = slot_digits(key)?.parse().ok()?;
                Some(self.first_slot.checked_add(offset)?.to_string())
            }
        }
    }
}

fn slot_digits(key: &str) -> Option<&str> {
    let digits = key.strip_prefix("slot")?;
    (!digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())).then_some(digits)
}

/// The `N` of every `{slotN}` placeholder in `template`, as written.
pub fn slot_placeholders(template: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        let after = &rest[open + 1..];
        if let Some(digits) = after.find('}').and_then(|close| slot_digits(&after[..close])) {
            out.push(digits);
        }
        rest = after;
    }
    out
}

/// Render a template.
pub fn render(template: &str, vars: &TemplateVars<'_>) -> String {
    let mut out = String::with_capacity(template.len() + 16);
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let substituted = after
            .find('}')
            .and_then(|close| vars.lookup(&after[..close]).map(|value| (close, value)));
        match substituted {
            Some((close, value)) => {
                out.push_str(&value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}
