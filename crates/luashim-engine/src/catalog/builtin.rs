//! Built-in marshaling rules.
//!
//! Every extraction checks the exact Lua type of its slots with
//! `luaL_checktype` before converting. Passthrough dispatch nodes emit no
//! type test of their own and rely on this.

use super::{ParamRule, ReturnRule, RuntimeCategory::*, TypeCatalog};

const EXPECT_NUMBER: &str = "luaL_checktype(L, {slot0}, LUA_TNUMBER);";
const CHECK_INTEGER: &str = "const {type} {var} = static_cast<{type}>(luaL_checkinteger(L, {slot0}));";

pub(super) fn install(catalog: &mut TypeCatalog) {
    // Parameters
    catalog.insert_param("int", ParamRule::new(&[Number], &[EXPECT_NUMBER, CHECK_INTEGER], "{var}"));
    catalog.insert_param("unsigned int", ParamRule::new(&[Number], &[EXPECT_NUMBER, CHECK_INTEGER], "{var}"));
    catalog.insert_param(
        "float",
        ParamRule::new(
            &[Number],
            &[
                EXPECT_NUMBER,
                "const float {var} = static_cast<float>(luaL_checknumber(L, {slot0}));",
            ],
            "{var}",
        ),
    );
    catalog.insert_param(
        "bool",
        ParamRule::new(
            &[Boolean],
            &[
                "luaL_checktype(L, {slot0}, LUA_TBOOLEAN);",
                "const bool {var} = lua_toboolean(L, {slot0});",
            ],
            "{var}",
        ),
    );
    catalog.insert_param(
        "const char *",
        ParamRule::new(
            &[String],
            &[
                "luaL_checktype(L, {slot0}, LUA_TSTRING);",
                "const char* {var} = lua_tostring(L, {slot0});",
            ],
            "{var}",
        ),
    );
    catalog.insert_param(
        "const ImVec2 &",
        ParamRule::new(
            &[Number, Number],
            &[
                "luaL_checktype(L, {slot0}, LUA_TNUMBER);",
                "const float {var}_1 = static_cast<float>(lua_tonumber(L, {slot0}));",
                "luaL_checktype(L, {slot1}, LUA_TNUMBER);",
                "const float {var}_2 = static_cast<float>(lua_tonumber(L, {slot1}));",
            ],
            "ImVec2 {{var}_1, {var}_2}",
        ),
    );
    catalog.insert_param(
        "const ImVec4 &",
        ParamRule::new(
            &[Number, Number, Number, Number],
            &[
                "luaL_checktype(L, {slot0}, LUA_TNUMBER);",
                "const float {var}_1 = static_cast<float>(lua_tonumber(L, {slot0}));",
                "luaL_checktype(L, {slot1}, LUA_TNUMBER);",
                "const float {var}_2 = static_cast<float>(lua_tonumber(L, {slot1}));",
                "luaL_checktype(L, {slot2}, LUA_TNUMBER);",
                "const float {var}_3 = static_cast<float>(lua_tonumber(L, {slot2}));",
                "luaL_checktype(L, {slot3}, LUA_TNUMBER);",
                "const float {var}_4 = static_cast<float>(lua_tonumber(L, {slot3}));",
            ],
            "ImVec4 {{var}_1, {var}_2, {var}_3, {var}_4}",
        ),
    );
    catalog.insert_param(
        "bool *",
        ParamRule::new(
            &[Boolean],
            &[
                "luaL_checktype(L, {slot0}, LUA_TBOOLEAN);",
                "bool {var} = lua_toboolean(L, {slot0});",
            ],
            "&{var}",
        )
        .with_push_back("lua_pushboolean(L, {var});"),
    );

    // Returns
    let integer = ReturnRule::values(&["lua_pushinteger(L, static_cast<lua_Integer>({var}));"]);
    catalog.insert_return("void", ReturnRule::Void);
    catalog.insert_return("bool", ReturnRule::values(&["lua_pushboolean(L, {var});"]));
    catalog.insert_return("int", integer.clone());
    catalog.insert_return("unsigned int", integer.clone());
    catalog.insert_return("ImU32", integer);
    catalog.insert_return(
        "float",
        ReturnRule::values(&["lua_pushnumber(L, static_cast<lua_Number>({var}));"]),
    );
    catalog.insert_return(
        "ImVec2",
        ReturnRule::values(&[
            "lua_pushnumber(L, static_cast<lua_Number>({var}.x));",
            "lua_pushnumber(L, static_cast<lua_Number>({var}.y));",
        ]),
    );
    catalog.insert_return(
        "ImVec4",
        ReturnRule::values(&[
            "lua_pushnumber(L, static_cast<lua_Number>({var}.x));",
            "lua_pushnumber(L, static_cast<lua_Number>({var}.y));",
            "lua_pushnumber(L, static_cast<lua_Number>({var}.z));",
            "lua_pushnumber(L, static_cast<lua_Number>({var}.w));",
        ]),
    );
}
