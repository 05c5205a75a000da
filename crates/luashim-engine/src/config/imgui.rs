//! Built-in Dear ImGui preset.

use std::collections::BTreeMap;

use super::{BindingConfig, EnumRule, FunctionRule};

const FUNCTIONS: &[&str] = &[
    "Begin",
    "End",
    "BeginChild",
    "EndChild",
    "IsWindowAppearing",
    "IsWindowCollapsed",
    "IsWindowFocused",
    "IsWindowHovered",
    "GetWindowDrawList",
    "GetWindowPos",
    "GetWindowSize",
    "GetWindowWidth",
    "GetWindowHeight",
    "SetNextWindowPos",
    "SetNextWindowSize",
    "SetNextWindowSizeConstraints",
    "SetNextWindowContentSize",
    "SetNextWindowCollapsed",
    "SetNextWindowFocus",
    "SetNextWindowScroll",
    "SetNextWindowBgAlpha",
    "SetWindowPos",
    "SetWindowSize",
    "SetWindowSizeConstraints",
    "SetWindowContentSize",
    "SetWindowCollapsed",
    "SetWindowFocus",
    "SetWindowFontScale",
    "GetContentRegionAvail",
    "GetContentRegionMax",
    "GetWindowContentRegionMin",
    "GetWindowContentRegionMax",
    "GetBackgroundDrawList",
    "GetForegroundDrawList",
    "GetScrollX",
    "GetScrollY",
    "SetScrollX",
    "SetScrollY",
    "GetScrollMaxX",
    "GetScrollMaxY",
    "SetScrollHereX",
    "SetScrollHereY",
    "SetScrollFromPosX",
    "SetScrollFromPosY",
    "PushStyleVar",
    "PopStyleVar",
    "PushTabStop",
    "PopTabStop",
    "PushButtonRepeat",
    "PopButtonRepeat",
    "PushItemWidth",
    "PopItemWidth",
    "SetNextItemWidth",
    "CalcItemWidth",
    "PushTextWrapPos",
    "PopTextWrapPos",
    "GetFontSize",
    "GetColorU32",
    "GetCursorScreenPos",
    "SetCursorScreenPos",
    "GetCursorPos",
    "GetCursorPosX",
    "GetCursorPosY",
    "SetCursorPos",
    "SetCursorPosX",
    "SetCursorPosY",
    "GetCursorStartPos",
    "Separator",
    "SameLine",
    "NewLine",
    "Spacing",
    "Dummy",
    "Indent",
    "Unindent",
    "BeginGroup",
    "EndGroup",
    "AlignTextToFramePadding",
    "GetTextLineHeight",
    "GetTextLineHeightWithSpacing",
    "GetFrameHeight",
    "GetFrameHeightWithSpacing",
    "Text",
    "TextColored",
    "TextDisabled",
    "TextWrapped",
    "LabelText",
    "BulletText",
    "SeparatorText",
    "Button",
    "SmallButton",
    "InvisibleButton",
    "ArrowButton",
    "ProgressBar",
    "Bullet",
    "BeginCombo",
    "EndCombo",
];

const ENUMS: &[&str] = &["ImGuiWindowFlags_"];

const DRAW_LIST_METHODS: &[&str] = &[
    "PushClipRect",
    "PushClipRectFullScreen",
    "PopClipRect",
    "GetClipRectMin",
    "GetClipRectMax",
    "PopTextureID",
    "AddLine",
    "AddRect",
    "AddRectFilled",
    "AddRectFilledMultiColor",
    "AddQuad",
    "AddQuadFilled",
    "AddTriangle",
    "AddTriangleFilled",
    "AddCircle",
    "AddCircleFilled",
    "AddNgon",
    "AddNgonFilled",
    "AddEllipse",
    "AddEllipseFilled",
    "AddBezierCubic",
    "AddBezierQuadratic",
    "PathClear",
    "PathLineTo",
    "PathLineToMergeDuplicate",
    "PathFillConvex",
    "PathStroke",
    "PathArcTo",
    "PathArcToFast",
    "PathEllipticalArcTo",
    "PathBezierCubicCurveTo",
    "PathBezierQuadraticCurveTo",
    "PathRect",
    "AddDrawCmd",
    "ChannelsSplit",
    "ChannelsMerge",
    "ChannelsSetCurrent",
];

pub(super) fn preset() -> BindingConfig {
    let functions: BTreeMap<String, FunctionRule> = FUNCTIONS
        .iter()
        .map(|name| (name.to_string(), FunctionRule::default()))
        .collect();
    let enums = ENUMS
        .iter()
        .map(|name| (name.to_string(), EnumRule::default()))
        .collect();
    let mut structs = BTreeMap::new();
    structs.insert(
        "ImDrawList".to_string(),
        DRAW_LIST_METHODS.iter().map(|m| m.to_string()).collect(),
    );

    BindingConfig {
        functions,
        enums,
        structs,
        ..BindingConfig::default()
    }
}
