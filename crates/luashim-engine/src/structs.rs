//! Struct handle tables.
//!
//! A whitelisted struct gets a `Push<S>` handle constructor that wraps a raw
//! pointer in userdata and attaches a metatable whose `__index` table holds
//! one dispatching closure per whitelisted method. The metatable is built the
//! first time a handle of that struct is pushed.
//!
//! The constructor is a function-local static function pointer, declared for
//! every struct before any is assigned. Closures refer to it without a capture,
//! so a method may return a handle of its own struct or of one emitted later.

use crate::dispatch::{emit_function, CallContext, DispatchPlan};
use crate::writer::CodeWriter;

/// Declare the `Push<name>` handle constructor.
pub fn declare_handle(w: &mut CodeWriter, name: &str) {
    w.line(format!("static void (*Push{n})(lua_State*, {n}*) = nullptr;", n = name));
}

/// Assign the `Push<name>` handle constructor with its method table.
pub fn emit_struct(w: &mut CodeWriter, name: &str, methods: &[DispatchPlan<'_>], ctx: &CallContext<'_>) {
    w.line(format!("Push{n} = [](lua_State* L, {n}* ctxptr) {{", n = name));
    w.indented(|w| {
        w.line(format!(
            "*reinterpret_cast<{n}**>(lua_newuserdata(L, sizeof({n}*))) = ctxptr;",
            n = name
        ));
        w.line(format!(
            "if (luaL_newmetatable(L, \"{}::{}\")) {{",
            ctx.handle_prefix, name
        ));
        w.indented(|w| {
            w.line("lua_createtable(L, 0, 0);");
            w.blank();
            for plan in methods {
                emit_function(w, plan, ctx);
            }
            w.line("lua_setfield(L, -2, \"__index\");");
        });
        w.line("}");
        w.line("lua_setmetatable(L, -2);");
    });
    w.line("};");
    w.blank();
}
