//! # Classification Rules
//!
//! Maps a file name to exactly one [`CategoryKey`]. Evaluation order is fixed:
//!
//! ```text
//! base name ──► OVERRIDES (exact match) ──► PREFIX_RULES (first rule wins) ──► Misc
//! ```
//!
//! Rule order matters: a name that starts with prefixes from two rules lands
//! in whichever rule is declared first. There is no longest-prefix tiebreak.
//!
//! Category display metadata and document display names also live here so the
//! whole naming convention is in one place.

use serde::Serialize;

/// Icon used for categories that aren't a known [`CategoryKey`].
pub const DEFAULT_ICON: &str = "folder";
/// Color used for categories that aren't a known [`CategoryKey`].
pub const DEFAULT_COLOR: &str = "gray";

/// The closed set of buckets the flat scan sorts files into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryKey {
    Basics,
    State,
    Layout,
    Controls,
    Shapes,
    Combine,
    Animation,
    Navigation,
    Misc,
}

/// Display metadata for a known category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryMeta {
    pub display_name: &'static str,
    pub icon: &'static str,
    pub color: &'static str,
}

impl CategoryKey {
    pub const ALL: [CategoryKey; 9] = [
        CategoryKey::Basics,
        CategoryKey::State,
        CategoryKey::Layout,
        CategoryKey::Controls,
        CategoryKey::Shapes,
        CategoryKey::Combine,
        CategoryKey::Animation,
        CategoryKey::Navigation,
        CategoryKey::Misc,
    ];

    /// Internal key, also used as the category `name`.
    pub fn as_str(self) -> &'static str {
        match self {
            CategoryKey::Basics => "basics",
            CategoryKey::State => "state",
            CategoryKey::Layout => "layout",
            CategoryKey::Controls => "controls",
            CategoryKey::Shapes => "shapes",
            CategoryKey::Combine => "combine",
            CategoryKey::Animation => "animation",
            CategoryKey::Navigation => "navigation",
            CategoryKey::Misc => "misc",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.as_str() == name)
    }

    pub fn meta(self) -> CategoryMeta {
        let (display_name, icon, color) = match self {
            CategoryKey::Basics => ("SwiftUI 基础", "swift", "orange"),
            CategoryKey::State => ("状态管理", "arrow.triangle.2.circlepath", "blue"),
            CategoryKey::Layout => ("布局容器", "square.grid.2x2", "green"),
            CategoryKey::Controls => ("交互控件", "slider.horizontal.3", "purple"),
            CategoryKey::Shapes => ("形状与绘图", "circle.hexagongrid", "pink"),
            CategoryKey::Combine => ("Combine 响应式", "link", "red"),
            CategoryKey::Animation => ("动画与手势", "wand.and.stars", "yellow"),
            CategoryKey::Navigation => ("导航与列表", "list.bullet", "teal"),
            CategoryKey::Misc => ("其他文档", "doc.text", DEFAULT_COLOR),
        };
        CategoryMeta {
            display_name,
            icon,
            color,
        }
    }
}

/// Resolved appearance for any category name, known key or not.
pub fn category_appearance(name: &str) -> (String, &'static str, &'static str) {
    match CategoryKey::from_name(name) {
        Some(key) => {
            let meta = key.meta();
            (meta.display_name.to_string(), meta.icon, meta.color)
        }
        None => (name.to_string(), DEFAULT_ICON, DEFAULT_COLOR),
    }
}

// ============================================================================
// Rule Tables
// ============================================================================

/// Files that don't follow any prefix convention.
const OVERRIDES: &[(&str, CategoryKey)] = &[
    ("说明", CategoryKey::Misc),
    ("README", CategoryKey::Misc),
    ("SwiftUI_Changelog", CategoryKey::Misc),
    ("Learning_Path", CategoryKey::Basics),
    ("Combine操作符速查", CategoryKey::Combine),
];

/// Declared order is the precedence order.
const PREFIX_RULES: &[(&[&str], CategoryKey)] = &[
    (
        &[
            "State_",
            "StateManagement",
            "Binding_",
            "Observable",
            "Environment_",
            "Form_Validation",
        ],
        CategoryKey::State,
    ),
    (
        &["Combine_", "Publisher_", "Operator_", "Subscriber_"],
        CategoryKey::Combine,
    ),
    (
        &["Layout_", "Stack_", "Grid_", "GeometryReader", "Spacer_"],
        CategoryKey::Layout,
    ),
    (
        &["Shape_", "Path_", "Canvas_", "Gradient_"],
        CategoryKey::Shapes,
    ),
    (
        &[
            "Control_", "Picker_", "Stepper_", "Slider_", "Toggle_", "Button_", "Form_",
        ],
        CategoryKey::Controls,
    ),
    (
        &["Animation_", "Transition_", "Gesture_"],
        CategoryKey::Animation,
    ),
    (
        &["Navigation_", "List_", "TabView_", "Sheet_"],
        CategoryKey::Navigation,
    ),
    (
        &["SwiftUI_", "View_", "Modifier_", "Text_", "Image_"],
        CategoryKey::Basics,
    ),
];

/// Human titles for known documents, keyed by extension-stripped file name.
const DOCUMENT_TITLES: &[(&str, &str)] = &[
    ("SwiftUI_Guide", "SwiftUI 入门指南"),
    ("State_Management_TodoList", "状态管理：待办清单示例"),
    ("说明", "使用说明"),
    ("README", "项目说明"),
    ("Learning_Path", "学习路线"),
    ("Combine_Operators", "Combine 操作符详解"),
    ("Combine操作符速查", "Combine 操作符速查表"),
    ("Layout_Stacks", "Stack 布局"),
    ("Shape_Basics", "形状基础"),
    ("Picker_Guide", "Picker 使用指南"),
    ("Form_Validation", "表单校验"),
    ("Animation_Basics", "动画基础"),
    ("Navigation_Stack", "NavigationStack 导航"),
];

// ============================================================================
// Classification
// ============================================================================

/// Strips the last extension. A leading-dot name like `.md` strips to `""`.
pub fn strip_extension(file_name: &str) -> &str {
    match file_name.rsplit_once('.') {
        Some((stem, _)) => stem,
        None => file_name,
    }
}

/// Lowercased extension, if the name has one.
pub fn extension(file_name: &str) -> Option<String> {
    file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .filter(|ext| !ext.is_empty())
}

/// Classifies an extension-stripped base name. Empty input lands in `Misc`.
pub fn classify(base_name: &str) -> CategoryKey {
    if base_name.is_empty() {
        return CategoryKey::Misc;
    }

    if let Some((_, key)) = OVERRIDES.iter().find(|(name, _)| *name == base_name) {
        return *key;
    }

    PREFIX_RULES
        .iter()
        .find(|(prefixes, _)| prefixes.iter().any(|p| base_name.starts_with(p)))
        .map(|(_, key)| *key)
        .unwrap_or(CategoryKey::Misc)
}

/// Classifies a raw file name (extension included).
pub fn classify_file_name(file_name: &str) -> CategoryKey {
    classify(strip_extension(file_name))
}

/// Display title for a document, falling back to the stripped name.
pub fn document_display_name(file_name: &str) -> String {
    let stem = strip_extension(file_name);
    DOCUMENT_TITLES
        .iter()
        .find(|(name, _)| *name == stem)
        .map(|(_, title)| title.to_string())
        .unwrap_or_else(|| stem.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_is_deterministic() {
        for name in ["SwiftUI_Guide", "Random_File", "说明", "Form_Basics", ""] {
            assert_eq!(classify(name), classify(name));
        }
    }

    #[test]
    fn test_override_wins_over_prefix() {
        // "SwiftUI_" would route this to Basics.
        assert_eq!(classify("SwiftUI_Changelog"), CategoryKey::Misc);
        assert_eq!(classify("说明"), CategoryKey::Misc);
        assert_eq!(classify("Learning_Path"), CategoryKey::Basics);
        assert_eq!(classify("Combine操作符速查"), CategoryKey::Combine);
    }

    #[test]
    fn test_prefix_rules() {
        assert_eq!(classify("SwiftUI_Guide"), CategoryKey::Basics);
        assert_eq!(classify("State_Management_TodoList"), CategoryKey::State);
        assert_eq!(classify("Combine_Operators"), CategoryKey::Combine);
        assert_eq!(classify("Stack_Alignment"), CategoryKey::Layout);
        assert_eq!(classify("Canvas_Drawing"), CategoryKey::Shapes);
        assert_eq!(classify("Picker_Guide"), CategoryKey::Controls);
        assert_eq!(classify("Gesture_Drag"), CategoryKey::Animation);
        assert_eq!(classify("TabView_Basics"), CategoryKey::Navigation);
    }

    #[test]
    fn test_first_declared_rule_wins_on_overlap() {
        // Both the state rule ("Form_Validation") and the controls rule
        // ("Form_") match; state is declared first.
        assert_eq!(classify("Form_Validation_Demo"), CategoryKey::State);
        assert_eq!(classify("Form_Basics"), CategoryKey::Controls);
    }

    #[test]
    fn test_prefixes_are_case_sensitive() {
        assert_eq!(classify("swiftui_guide"), CategoryKey::Misc);
    }

    #[test]
    fn test_fallback_and_empty_input() {
        assert_eq!(classify("Random_File"), CategoryKey::Misc);
        assert_eq!(classify(""), CategoryKey::Misc);
        assert_eq!(classify_file_name(".md"), CategoryKey::Misc);
    }

    #[test]
    fn test_strip_extension() {
        assert_eq!(strip_extension("说明.md"), "说明");
        assert_eq!(strip_extension("a.b.md"), "a.b");
        assert_eq!(strip_extension("README"), "README");
        assert_eq!(strip_extension(".md"), "");
    }

    #[test]
    fn test_extension_is_lowercased() {
        assert_eq!(extension("Notes.MD").as_deref(), Some("md"));
        assert_eq!(extension("README"), None);
        assert_eq!(extension("trailing."), None);
    }

    #[test]
    fn test_document_display_name_fallback() {
        assert_eq!(document_display_name("SwiftUI_Guide.md"), "SwiftUI 入门指南");
        assert_eq!(document_display_name("Random_File.md"), "Random_File");
    }

    #[test]
    fn test_category_appearance_defaults_for_unknown_names() {
        let (display, icon, color) = category_appearance("Tutorials");
        assert_eq!(display, "Tutorials");
        assert_eq!(icon, DEFAULT_ICON);
        assert_eq!(color, DEFAULT_COLOR);

        let (display, icon, _) = category_appearance("state");
        assert_eq!(display, "状态管理");
        assert_eq!(icon, "arrow.triangle.2.circlepath");
    }

    #[test]
    fn test_key_names_round_trip() {
        for key in CategoryKey::ALL {
            assert_eq!(CategoryKey::from_name(key.as_str()), Some(key));
        }
    }
}
