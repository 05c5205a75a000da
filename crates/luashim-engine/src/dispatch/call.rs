//! Call-site emission for a selected overload.

use crate::writer::CodeWriter;

use super::{DispatchPlan, Terminal};

/// Naming needed to spell a native call.
#[derive(Debug, Clone, Copy)]
pub struct CallContext<'a> {
    /// Namespace qualifying free functions; empty for none
    pub namespace: &'a str,
    /// Prefix of handle metatable names
    pub handle_prefix: &'a str,
}

impl<'a> CallContext<'a> {
    fn callee(&self, plan: &DispatchPlan<'_>) -> String {
        match (&plan.receiver, self.namespace) {
            (Some(_), _) => format!("p0->{}", plan.name),
            (None, "") => plan.name.clone(),
            (None, namespace) => format!("{}::{}", namespace, plan.name),
        }
    }
}

/// Emit the statements that extract the bound arguments, call the overload
/// at `terminal`, push its results and return their count.
pub fn emit_call(w: &mut CodeWriter, plan: &DispatchPlan<'_>, terminal: Terminal, ctx: &CallContext<'_>) {
    let overload = plan.overload(terminal);

    if let Some(receiver) = &plan.receiver {
        w.line(format!(
            "{r}* const p0 = *reinterpret_cast<{r}* const*>(luaL_checkudata(L, 1, \"{prefix}::{r}\"));",
            r = receiver,
            prefix = ctx.handle_prefix
        ));
    }

    let mut arguments = Vec::new();
    let mut push_backs = Vec::new();
    for param in overload.bound_params(terminal.slots) {
        for statement in &param.extract {
            w.line(statement);
        }
        arguments.push(param.argument.as_str());
        if let Some(push_back) = &param.push_back {
            push_backs.push(push_back.as_str());
        }
    }

    let call = format!("{}({})", ctx.callee(plan), arguments.join(", "));
    let pushes = overload.pushes();
    if pushes.is_empty() {
        w.line(format!("{};", call));
    } else {
        w.line(format!("const auto r = {};", call));
    }
    for push in pushes.iter().map(String::as_str).chain(push_backs) {
        w.line(push);
    }
    w.line(format!("return {};", plan.return_count(terminal)));
}
