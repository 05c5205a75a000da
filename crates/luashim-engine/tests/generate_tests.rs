//! End-to-end generation from a recorded clang AST dump.

use std::path::PathBuf;

use luashim_engine::walker::RootWalker;
use luashim_engine::{
    read_dump, BindingConfig, Decl, DispatchFailure, Generation, Generator, Planner, RuntimeCategory::*,
    Severity, UnsupportedPolicy,
};

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn load() -> (BindingConfig, Decl) {
    let config = BindingConfig::from_file(&fixtures_dir().join("widgets.toml")).expect("config");
    let root = read_dump(&fixtures_dir().join("widgets.json")).expect("ast");
    (config, root)
}

fn generate(policy: UnsupportedPolicy) -> Generation {
    let (mut config, root) = load();
    config.on_unsupported = policy;
    Generator::new(config).generate(&root)
}

fn codes(generation: &Generation) -> Vec<(&str, &str)> {
    generation
        .diagnostics
        .iter()
        .map(|d| (d.code, d.binding.as_str()))
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Output layout
// ────────────────────────────────────────────────────────────────────────────

#[test]
fn test_sections_in_order() {
    let generation = generate(UnsupportedPolicy::Skip);
    let source = &generation.source;

    assert!(source.starts_with("static void (*PushImDrawList)(lua_State*, ImDrawList*) = nullptr;\n\n"));
    let handle = source.find("PushImDrawList = [](lua_State* L, ImDrawList* ctxptr) {").unwrap();
    let flags = source.find("{  // ImGuiWindowFlags_").unwrap();
    let begin = source.find("lua_setfield(L, -2, \"Begin\");").unwrap();
    let value = source.find("lua_setfield(L, -2, \"Value\");").unwrap();
    assert!(handle < flags && flags < begin && begin < value);
}

#[test]
fn test_stats() {
    let generation = generate(UnsupportedPolicy::Skip);
    let stats = generation.stats;
    assert_eq!(stats.structs, 1);
    assert_eq!(stats.methods, 5);
    assert_eq!(stats.enums, 1);
    assert_eq!(stats.constants, 4);
    assert_eq!(stats.functions, 13);
    assert_eq!(stats.overloads, 19);
}

#[test]
fn test_enum_constants() {
    let generation = generate(UnsupportedPolicy::Skip);
    let source = &generation.source;
    assert!(source.contains(
        "  lua_pushinteger(L, static_cast<lua_Integer>(ImGuiWindowFlags_NoTitleBar)); lua_setfield(L, -2, \"WindowFlags_NoTitleBar\");\n"
    ));
    assert!(!source.contains("ImGuiChildWindow"));
    assert!(!source.contains("\"WindowFlags_\""));
}

#[test]
fn test_functions_outside_namespace_ignored() {
    let (config, root) = load();
    let collected = RootWalker::new(&config).walk(&root);
    let button = collected.functions.iter().find(|g| g.name == "Button").unwrap();
    assert_eq!(button.decls.len(), 1);
    assert_eq!(button.decls[0].params().count(), 2);
}

// ────────────────────────────────────────────────────────────────────────────
// Handles
// ────────────────────────────────────────────────────────────────────────────

#[test]
fn test_struct_handle_used_for_pointer_return() {
    let generation = generate(UnsupportedPolicy::Skip);
    let source = &generation.source;
    assert_eq!(source.matches("luaL_newmetatable(L, \"imgui4lua::ImDrawList\")").count(), 1);
    assert!(source.contains("const auto r = ImGui::GetWindowDrawList();\n  PushImDrawList(L, r);\n  return 1;\n"));
}

#[test]
fn test_methods_take_receiver() {
    let generation = generate(UnsupportedPolicy::Skip);
    let source = &generation.source;
    assert!(source.contains(
        "ImDrawList* const p0 = *reinterpret_cast<ImDrawList* const*>(luaL_checkudata(L, 1, \"imgui4lua::ImDrawList\"));"
    ));
    assert!(source.contains("const unsigned int p5 = static_cast<unsigned int>(luaL_checkinteger(L, 6));"));
    assert!(source.contains("p0->AddLine(ImVec2 {p1_1, p1_2}, ImVec2 {p3_1, p3_2}, p5);"));
    assert!(source.contains("p0->AddLine(ImVec2 {p1_1, p1_2}, ImVec2 {p3_1, p3_2}, p5, p6);"));
    assert!(source.contains("const auto r = p0->GetClipRectMin();"));
}

#[test]
fn test_method_dispatch() {
    let (config, root) = load();
    let collected = RootWalker::new(&config).walk(&root);
    let draw_list = &collected.structs[0];
    let stroke = draw_list.methods.iter().find(|g| g.name == "PathStroke").unwrap();

    let catalog = luashim_engine::TypeCatalog::for_config(&config);
    let plan = Planner::new(&catalog, config.on_unsupported).plan(
        &stroke.name,
        Some(draw_list.name.as_str()),
        &stroke.decls,
        &mut Vec::new(),
    );
    let slots: Vec<usize> = plan.root.terminals().iter().map(|t| t.slots).collect();
    assert_eq!(slots, vec![2, 3, 4]);
    assert_eq!(plan.resolve(&[Number]).unwrap().terminal.slots, 2);
    assert_eq!(plan.resolve(&[Number, Number, Number]).unwrap().terminal.slots, 4);
    assert_eq!(plan.resolve(&[Number, String]), Err(DispatchFailure { slot: 3 }));
}

// ────────────────────────────────────────────────────────────────────────────
// Free-function dispatch
// ────────────────────────────────────────────────────────────────────────────

fn function_plan<'d>(
    config: &BindingConfig,
    root: &'d Decl,
    name: &str,
) -> luashim_engine::DispatchPlan<'d> {
    let collected = RootWalker::new(config).walk(root);
    let group = collected.functions.iter().find(|g| g.name == name).unwrap();
    let catalog = luashim_engine::TypeCatalog::for_config(config);
    Planner::new(&catalog, config.on_unsupported).plan(name, None, &group.decls, &mut Vec::new())
}

#[test]
fn test_begin_defaults_and_out_param() {
    let (config, root) = load();
    let plan = function_plan(&config, &root, "Begin");

    assert_eq!(plan.resolve(&[String]).unwrap().returns, 1);
    assert_eq!(plan.resolve(&[String, Boolean]).unwrap().returns, 2);
    let full = plan.resolve(&[String, Boolean, Number]).unwrap();
    assert_eq!((full.terminal.slots, full.returns), (3, 2));
    assert_eq!(plan.resolve(&[String, Number]), Err(DispatchFailure { slot: 2 }));
}

#[test]
fn test_value_overloads() {
    let (config, root) = load();
    let plan = function_plan(&config, &root, "Value");

    assert_eq!(plan.resolve(&[String, Boolean]).unwrap().terminal.overload, 0);
    // `Value(const char *, float, ...)` shadows `Value(const char *, int)`.
    assert_eq!(plan.resolve(&[String, Number]).unwrap().terminal.overload, 2);
    assert_eq!(plan.resolve(&[String, Number, String]).unwrap().terminal.slots, 3);
    assert_eq!(plan.resolve(&[String, String]), Err(DispatchFailure { slot: 2 }));
}

#[test]
fn test_push_style_var_vector_overload() {
    let (config, root) = load();
    let plan = function_plan(&config, &root, "PushStyleVar");

    assert_eq!(plan.resolve(&[Number, Number]).unwrap().terminal.overload, 0);
    assert_eq!(plan.resolve(&[Number, Number, Number]).unwrap().terminal.overload, 1);
    assert_eq!(plan.resolve(&[Number]), Err(DispatchFailure { slot: 2 }));
}

#[test]
fn test_progress_bar_partial_vector_fails() {
    let (config, root) = load();
    let plan = function_plan(&config, &root, "ProgressBar");

    assert_eq!(plan.resolve(&[Number]).unwrap().terminal.slots, 1);
    assert_eq!(plan.resolve(&[Number, Number]), Err(DispatchFailure { slot: 3 }));
    assert_eq!(plan.resolve(&[Number, Number, Number, String]).unwrap().terminal.slots, 4);
}

#[test]
fn test_same_line_all_defaults() {
    let (config, root) = load();
    let plan = function_plan(&config, &root, "SameLine");

    assert_eq!(plan.resolve(&[]).unwrap().terminal.slots, 0);
    assert_eq!(plan.resolve(&[Number]).unwrap().terminal.slots, 1);
    assert_eq!(plan.resolve(&[Boolean]), Err(DispatchFailure { slot: 1 }));
}

// ────────────────────────────────────────────────────────────────────────────
// Diagnostics
// ────────────────────────────────────────────────────────────────────────────

#[test]
fn test_diagnostics_skip() {
    let generation = generate(UnsupportedPolicy::Skip);
    assert_eq!(
        codes(&generation),
        vec![
            ("B1002", "GetStyleColorVec4"),
            ("B1003", "GetStyleColorVec4"),
            ("B1001", "ColorEdit4"),
            ("B1003", "ColorEdit4"),
            ("B2001", "Spacing"),
            ("B2001", "ImDrawList::AddText"),
        ]
    );
    assert_eq!(generation.warning_count(), 6);
    assert!(generation.source.contains("return luaL_error(L, \"ColorEdit4: parameter 1 has unexpected type\");"));
}

#[test]
fn test_diagnostics_truncate() {
    let generation = generate(UnsupportedPolicy::Truncate);
    assert_eq!(
        codes(&generation),
        vec![
            ("B1002", "GetStyleColorVec4"),
            ("B1001", "ColorEdit4"),
            ("B2001", "Spacing"),
            ("B2001", "ImDrawList::AddText"),
        ]
    );
    assert!(generation.source.contains("ImGui::GetStyleColorVec4(p0);\n  return 0;\n"));
    assert!(generation.source.contains("const auto r = ImGui::ColorEdit4(p0);"));
}

#[test]
fn test_severity_overrides_from_config() {
    let (mut config, root) = load();
    config
        .diagnostics
        .insert("unbound-function".to_string(), Severity::Error);
    config
        .diagnostics
        .insert("unmatched-whitelist".to_string(), Severity::Off);
    let generation = Generator::new(config).generate(&root);
    assert_eq!(generation.error_count(), 2);
    assert_eq!(generation.warning_count(), 2);
}

#[test]
fn test_generate_json_matches_generate() {
    let (config, root) = load();
    let text = std::fs::read_to_string(fixtures_dir().join("widgets.json")).unwrap();
    let generator = Generator::new(config);
    assert_eq!(generator.generate_json(&text).unwrap().source, generator.generate(&root).source);
}
