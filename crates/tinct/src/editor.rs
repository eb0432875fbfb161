//! Editor theme generation.
//!
//! Turns a theme's editor block into the rule list and chrome-color map the
//! embedded editor understands. Every missing field resolves through the
//! theme's own tokens first and then a fixed per-type default, so a theme
//! with an empty editor block still produces a complete editor theme.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::host::EditorHost;
use crate::theme::{Theme, ThemeType};

/// Syntax roles, in rule order.
pub const SYNTAX_ROLES: [&str; 9] = [
    "comment", "keyword", "string", "number", "type", "function", "variable", "operator",
    "bracket",
];

/// One syntax rule for the editor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyntaxRule {
    pub token: String,
    /// Hex color without the leading `#`.
    pub foreground: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_style: Option<String>,
}

/// A complete editor theme definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditorTheme {
    pub base: String,
    pub inherit: bool,
    pub rules: Vec<SyntaxRule>,
    pub colors: BTreeMap<String, String>,
}

impl EditorTheme {
    pub fn rule(&self, token: &str) -> Option<&SyntaxRule> {
        self.rules.iter().find(|r| r.token == token)
    }

    pub fn color(&self, key: &str) -> Option<&str> {
        self.colors.get(key).map(String::as_str)
    }
}

struct Palette {
    syntax: [(&'static str, Option<&'static str>); 9],
    background: &'static str,
    foreground: &'static str,
    line_highlight: &'static str,
    selection: &'static str,
    cursor: &'static str,
    line_number: &'static str,
    line_number_active: &'static str,
    scrollbar: [&'static str; 3],
}

static DARK: Palette = Palette {
    syntax: [
        ("#6a9955", Some("italic")),
        ("#569cd6", None),
        ("#ce9178", None),
        ("#b5cea8", None),
        ("#4ec9b0", None),
        ("#dcdcaa", None),
        ("#9cdcfe", None),
        ("#d4d4d4", None),
        ("#ffd700", None),
    ],
    background: "#1e1e1e",
    foreground: "#d4d4d4",
    line_highlight: "#2a2d2e",
    selection: "#264f78",
    cursor: "#aeafad",
    line_number: "#858585",
    line_number_active: "#c6c6c6",
    scrollbar: ["#79797966", "#646464b3", "#bfbfbf66"],
};

static LIGHT: Palette = Palette {
    syntax: [
        ("#008000", Some("italic")),
        ("#0000ff", None),
        ("#a31515", None),
        ("#098658", None),
        ("#267f99", None),
        ("#795e26", None),
        ("#001080", None),
        ("#000000", None),
        ("#0431fa", None),
    ],
    background: "#ffffff",
    foreground: "#000000",
    line_highlight: "#f3f3f3",
    selection: "#add6ff",
    cursor: "#000000",
    line_number: "#237893",
    line_number_active: "#0b216f",
    scrollbar: ["#64646466", "#646464b3", "#00000099"],
};

fn palette(theme_type: ThemeType) -> &'static Palette {
    match theme_type {
        ThemeType::Dark => &DARK,
        ThemeType::Light => &LIGHT,
    }
}

/// Build the editor theme for `theme`.
pub fn build_editor_theme(theme: &Theme) -> EditorTheme {
    let spec = theme.editor();
    let defaults = palette(theme.theme_type());

    let rules = SYNTAX_ROLES
        .iter()
        .zip(defaults.syntax.iter())
        .map(|(role, &(default_color, default_style))| {
            let style = spec.syntax.get(*role);
            let color = style
                .and_then(|s| s.color.as_deref())
                .unwrap_or(default_color);
            let font_style = match style {
                Some(s) => s.font_style.clone(),
                None => default_style.map(str::to_string),
            };
            SyntaxRule {
                token: (*role).to_string(),
                foreground: color.trim_start_matches('#').to_string(),
                font_style,
            }
        })
        .collect();

    let pick = |field: &Option<String>, token: &str, fallback: &'static str| -> String {
        field
            .clone()
            .or_else(|| theme.color(token).map(|c| c.into_owned()))
            .unwrap_or_else(|| fallback.to_string())
    };

    let mut colors = BTreeMap::new();
    colors.insert(
        "editor.background".to_string(),
        pick(&spec.background, "bg-primary", defaults.background),
    );
    colors.insert(
        "editor.foreground".to_string(),
        pick(&spec.foreground, "text-primary", defaults.foreground),
    );
    colors.insert(
        "editor.lineHighlightBackground".to_string(),
        pick(&spec.line_highlight, "bg-hover", defaults.line_highlight),
    );
    colors.insert(
        "editor.selectionBackground".to_string(),
        pick(&spec.selection, "selection", defaults.selection),
    );
    colors.insert(
        "editorCursor.foreground".to_string(),
        pick(&spec.cursor, "accent", defaults.cursor),
    );
    colors.insert(
        "editorLineNumber.foreground".to_string(),
        pick(&spec.line_number, "text-muted", defaults.line_number),
    );
    colors.insert(
        "editorLineNumber.activeForeground".to_string(),
        pick(
            &spec.line_number_active,
            "text-primary",
            defaults.line_number_active,
        ),
    );
    let [idle, hover, active] = defaults.scrollbar;
    colors.insert("scrollbarSlider.background".to_string(), idle.to_string());
    colors.insert("scrollbarSlider.hoverBackground".to_string(), hover.to_string());
    colors.insert("scrollbarSlider.activeBackground".to_string(), active.to_string());

    EditorTheme {
        base: spec
            .base
            .clone()
            .unwrap_or_else(|| theme.theme_type().editor_base().to_string()),
        inherit: spec.inherit.unwrap_or(true),
        rules,
        colors,
    }
}

/// Define `theme` in the editor host without activating it.
///
/// Returns `false` when no host is attached.
pub fn define(host: &mut Option<Box<dyn EditorHost>>, theme: &Theme) -> bool {
    let Some(host) = host.as_mut() else {
        warn!(theme.id = %theme.id(), "Editor host not available, skipping definition");
        return false;
    };
    host.define_theme(theme.id(), &build_editor_theme(theme));
    debug!(theme.id = %theme.id(), "Editor theme defined");
    true
}

/// Define `theme`, make it the default and switch every open editor to it.
///
/// Returns `false` when no host is attached. Nothing is retried later.
pub fn activate(host: &mut Option<Box<dyn EditorHost>>, theme: &Theme) -> bool {
    let Some(host) = host.as_mut() else {
        warn!(theme.id = %theme.id(), "Editor host not available, skipping activation");
        return false;
    };
    host.define_theme(theme.id(), &build_editor_theme(theme));
    host.activate_theme(theme.id());
    let editors = host.open_editors();
    for editor in &editors {
        host.update_editor_theme(*editor, theme.id());
    }
    debug!(
        theme.id = %theme.id(),
        editor.count = editors.len(),
        "Editor theme activated"
    );
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::HeadlessEditorHost;
    use crate::theme::{EditorSpec, SyntaxStyle};

    #[test]
    fn empty_editor_block_uses_defaults() {
        let theme = Theme::new("plain", "Plain", ThemeType::Dark);
        let editor = build_editor_theme(&theme);
        assert_eq!(editor.base, "vs-dark");
        assert!(editor.inherit);
        assert_eq!(editor.rules.len(), SYNTAX_ROLES.len());
        assert_eq!(editor.rules[0].token, "comment");
        assert_eq!(editor.rules[0].foreground, "6a9955");
        assert_eq!(editor.rules[0].font_style.as_deref(), Some("italic"));
        assert_eq!(editor.color("editor.background"), Some("#1e1e1e"));
        assert_eq!(editor.colors.len(), 10);
    }

    #[test]
    fn light_themes_use_light_base() {
        let theme = Theme::new("paper", "Paper", ThemeType::Light);
        let editor = build_editor_theme(&theme);
        assert_eq!(editor.base, "vs");
        assert_eq!(editor.color("editor.background"), Some("#ffffff"));
    }

    #[test]
    fn explicit_fields_win_then_tokens() {
        let theme = Theme::new("t", "T", ThemeType::Dark)
            .with_color("bg-primary", "#101010")
            .with_color("accent", "#ff0088")
            .with_editor(EditorSpec {
                base: Some("hc-black".into()),
                inherit: Some(false),
                foreground: Some("#eeeeee".into()),
                ..EditorSpec::default()
            })
            .with_syntax("keyword", SyntaxStyle::new("#FF79C6").with_font_style("bold"))
            .with_syntax("comment", SyntaxStyle::new("#6272a4"));
        let editor = build_editor_theme(&theme);

        assert_eq!(editor.base, "hc-black");
        assert!(!editor.inherit);
        assert_eq!(editor.color("editor.background"), Some("#101010"));
        assert_eq!(editor.color("editor.foreground"), Some("#eeeeee"));
        assert_eq!(editor.color("editorCursor.foreground"), Some("#ff0088"));

        let keyword = editor.rule("keyword").unwrap();
        assert_eq!(keyword.foreground, "FF79C6");
        assert_eq!(keyword.font_style.as_deref(), Some("bold"));
        // an explicit role replaces the default font style too
        assert_eq!(editor.rule("comment").unwrap().font_style, None);
    }

    #[test]
    fn activation_without_host_is_a_no_op() {
        let theme = Theme::new("t", "T", ThemeType::Dark);
        let mut host: Option<Box<dyn EditorHost>> = None;
        assert!(!define(&mut host, &theme));
        assert!(!activate(&mut host, &theme));
    }

    #[test]
    fn activation_with_host() {
        let theme = Theme::new("t", "T", ThemeType::Dark);
        let mut host: Option<Box<dyn EditorHost>> = Some(Box::new(HeadlessEditorHost::new()));
        assert!(activate(&mut host, &theme));
    }
}
