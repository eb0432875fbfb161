//! Shipped themes.
//!
//! Each builtin is expressed as four group base colors expanded through
//! [`groups`](crate::groups), plus status colors and a few editor details.
//! A richer definition for any of them may arrive later through enhancement.

use crate::theme::{EditorSpec, SyntaxStyle, Theme, ThemeType};

/// Builtin ids in shipped order.
pub const BUILTIN_IDS: [&str; 5] = ["midnight", "daylight", "dracula", "nord", "sakura"];

/// Theme used when nothing else is selected or a lookup fails.
pub const DEFAULT_THEME_ID: &str = "midnight";

const AUTHOR: &str = "tinct";

/// Base colors for the four color groups.
struct Bases {
    background: &'static str,
    text: &'static str,
    accent: &'static str,
    border: &'static str,
}

/// Status colors.
struct Status {
    success: &'static str,
    warning: &'static str,
    error: &'static str,
    info: &'static str,
}

fn palette(theme: Theme, bases: &Bases, status: &Status) -> Theme {
    theme
        .with_author(AUTHOR)
        .with_group("background", bases.background)
        .with_group("text", bases.text)
        .with_group("accent", bases.accent)
        .with_group("border", bases.border)
        .with_color("success", status.success)
        .with_color("warning", status.warning)
        .with_color("error", status.error)
        .with_color("info", status.info)
        .with_color("bg-opacity", 100)
        .with_color("panel-opacity", 100)
        .with_color("panel-blur", 0)
}

/// Syntax colors in role order: comment, keyword, string, number, type,
/// function, variable, operator, bracket.
fn syntax(theme: Theme, colors: [&str; 9], italic_comments: bool) -> Theme {
    let roles = crate::editor::SYNTAX_ROLES;
    roles
        .iter()
        .zip(colors)
        .fold(theme, |theme, (role, color)| {
            let style = SyntaxStyle::new(color);
            let style = if italic_comments && *role == "comment" {
                style.with_font_style("italic")
            } else {
                style
            };
            theme.with_syntax(*role, style)
        })
}

fn midnight() -> Theme {
    let theme = Theme::new("midnight", "Midnight", ThemeType::Dark)
        .with_description("Deep blue-black with a violet accent")
        .with_tags(["dark", "default"]);
    palette(
        theme,
        &Bases {
            background: "#0f111a",
            text: "#e4e6f0",
            accent: "#7c6cf0",
            border: "#2a2d3d",
        },
        &Status {
            success: "#4ade80",
            warning: "#fbbf24",
            error: "#f87171",
            info: "#60a5fa",
        },
    )
    .with_color("selection", "#7c6cf04d")
    .with_color("shadow", "0 8px 24px rgba(0, 0, 0, 0.45)")
    .with_color("radius", "8px")
}

fn daylight() -> Theme {
    let theme = Theme::new("daylight", "Daylight", ThemeType::Light)
        .with_description("Clean light theme with a blue accent")
        .with_tags(["light"]);
    palette(
        theme,
        &Bases {
            background: "#ffffff",
            text: "#1f2328",
            accent: "#0969da",
            border: "#d0d7de",
        },
        &Status {
            success: "#1a7f37",
            warning: "#9a6700",
            error: "#cf222e",
            info: "#0550ae",
        },
    )
    .with_color("selection", "#0969da33")
    .with_color("shadow", "0 4px 12px rgba(31, 35, 40, 0.12)")
    .with_color("radius", "6px")
}

fn dracula() -> Theme {
    // Dracula colors from https://draculatheme.com
    let theme = Theme::new("dracula", "Dracula", ThemeType::Dark)
        .with_description("Dark theme with vivid pastel syntax colors")
        .with_tags(["dark", "popular"]);
    let theme = palette(
        theme,
        &Bases {
            background: "#282a36", // Background
            text: "#f8f8f2",       // Foreground
            accent: "#bd93f9",     // Purple
            border: "#44475a",     // Current Line
        },
        &Status {
            success: "#50fa7b", // Green
            warning: "#f1fa8c", // Yellow
            error: "#ff5555",   // Red
            info: "#8be9fd",    // Cyan
        },
    )
    .with_color("selection", "#44475a")
    .with_color("radius", "6px")
    .with_editor(EditorSpec {
        background: Some("#282a36".into()),
        foreground: Some("#f8f8f2".into()),
        line_highlight: Some("#44475a".into()),
        selection: Some("#44475a".into()),
        cursor: Some("#f8f8f2".into()),
        line_number: Some("#6272a4".into()),
        line_number_active: Some("#f8f8f2".into()),
        ..EditorSpec::default()
    });
    syntax(
        theme,
        [
            "#6272a4", // Comment
            "#ff79c6", // Pink
            "#f1fa8c", // Yellow
            "#bd93f9", // Purple
            "#8be9fd", // Cyan
            "#50fa7b", // Green
            "#f8f8f2", // Foreground
            "#ff79c6", // Pink
            "#f8f8f2", // Foreground
        ],
        true,
    )
}

fn nord() -> Theme {
    // Nord colors from https://www.nordtheme.com
    let theme = Theme::new("nord", "Nord", ThemeType::Dark)
        .with_description("Arctic, north-bluish palette")
        .with_tags(["dark", "cool"]);
    let theme = palette(
        theme,
        &Bases {
            background: "#2e3440", // Nord0
            text: "#eceff4",       // Nord6
            accent: "#88c0d0",     // Nord8
            border: "#4c566a",     // Nord3
        },
        &Status {
            success: "#a3be8c", // Nord14
            warning: "#ebcb8b", // Nord13
            error: "#bf616a",   // Nord11
            info: "#5e81ac",    // Nord10
        },
    )
    .with_color("selection", "#434c5e");
    syntax(
        theme,
        [
            "#616e88", // Muted Nord
            "#81a1c1", // Nord9
            "#a3be8c", // Nord14
            "#b48ead", // Nord15
            "#8fbcbb", // Nord7
            "#88c0d0", // Nord8
            "#d8dee9", // Nord4
            "#81a1c1", // Nord9
            "#eceff4", // Nord6
        ],
        true,
    )
}

fn sakura() -> Theme {
    let theme = Theme::new("sakura", "Sakura", ThemeType::Light)
        .with_description("Soft pink light theme with frosted panels")
        .with_tags(["light", "pink"]);
    palette(
        theme,
        &Bases {
            background: "#fff5f7",
            text: "#4a3b40",
            accent: "#e85d8a",
            border: "#f3cdd8",
        },
        &Status {
            success: "#5a9e6f",
            warning: "#c98a2b",
            error: "#d64545",
            info: "#6a8fd8",
        },
    )
    .with_color("selection", "#e85d8a33")
    .with_color("panel-opacity", 92)
    .with_color("panel-blur", 12)
    .with_color("radius", "10px")
}

/// Shipped definition of one builtin.
pub fn seed(id: &str) -> Option<Theme> {
    match id {
        "midnight" => Some(midnight()),
        "daylight" => Some(daylight()),
        "dracula" => Some(dracula()),
        "nord" => Some(nord()),
        "sakura" => Some(sakura()),
        _ => None,
    }
}

/// All builtins in shipped order.
pub fn seeds() -> Vec<Theme> {
    BUILTIN_IDS.iter().filter_map(|id| seed(id)).collect()
}

pub fn is_builtin_id(id: &str) -> bool {
    BUILTIN_IDS.contains(&id)
}
