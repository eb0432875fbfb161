//! Token registry.
//!
//! Every token is a named semantic design value bound to exactly one style
//! variable. The table is a compile-time constant and is never mutated, so
//! lookups are safe from any thread.
//!
//! # Example
//!
//! ```rust
//! use tinct::tokens::{self, TokenKind};
//!
//! assert_eq!(tokens::var_name("bg-primary"), Some("--bg-primary"));
//! assert_eq!(tokens::kind("panel-blur"), Some(TokenKind::Blur));
//! assert!(tokens::lookup("not-a-token").is_none());
//! ```

use serde::{Deserialize, Serialize};

/// How a token's raw value is turned into a style value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    /// Any CSS color, written verbatim.
    Color,
    /// A 0–100 percentage written as a 0–1 decimal.
    Opacity,
    /// An integer written as a pixel length.
    Blur,
    /// A file path or data reference wrapped in `url(...)`.
    Image,
    /// A background position, `center center` when unset.
    Position,
    /// Anything else, written verbatim.
    Raw,
}

/// A single entry of the token registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenDef {
    /// Key used in theme documents.
    pub key: &'static str,
    /// Style variable the token drives.
    pub var: &'static str,
    /// Value transform applied before writing.
    pub kind: TokenKind,
    /// Color group that derives this token, if any.
    pub group: Option<&'static str>,
}

const fn token(
    key: &'static str,
    var: &'static str,
    kind: TokenKind,
    group: Option<&'static str>,
) -> TokenDef {
    TokenDef {
        key,
        var,
        kind,
        group,
    }
}

use TokenKind::{Blur, Color, Image, Opacity, Position, Raw};

const BACKGROUND: Option<&str> = Some("background");
const TEXT: Option<&str> = Some("text");
const ACCENT: Option<&str> = Some("accent");
const BORDER: Option<&str> = Some("border");

/// All known tokens, in application order.
pub static TOKENS: &[TokenDef] = &[
    // Background
    token("bg-primary", "--bg-primary", Color, BACKGROUND),
    token("bg-secondary", "--bg-secondary", Color, BACKGROUND),
    token("bg-tertiary", "--bg-tertiary", Color, BACKGROUND),
    token("bg-hover", "--bg-hover", Color, BACKGROUND),
    token("bg-overlay", "--bg-overlay", Color, BACKGROUND),
    // Text
    token("text-primary", "--text-primary", Color, TEXT),
    token("text-secondary", "--text-secondary", Color, TEXT),
    token("text-muted", "--text-muted", Color, TEXT),
    // Accent
    token("accent", "--accent", Color, ACCENT),
    token("accent-hover", "--accent-hover", Color, ACCENT),
    token("accent-active", "--accent-active", Color, ACCENT),
    token("accent-subtle", "--accent-subtle", Color, ACCENT),
    token("accent-muted", "--accent-muted", Color, ACCENT),
    // Border
    token("border", "--border", Color, BORDER),
    token("border-subtle", "--border-subtle", Color, BORDER),
    token("border-strong", "--border-strong", Color, BORDER),
    // Status
    token("success", "--success", Color, None),
    token("warning", "--warning", Color, None),
    token("error", "--error", Color, None),
    token("info", "--info", Color, None),
    // Surfaces
    token("selection", "--selection", Color, None),
    token("scrollbar", "--scrollbar", Color, None),
    token("sidebar-bg", "--sidebar-bg", Color, None),
    token("titlebar-bg", "--titlebar-bg", Color, None),
    token("statusbar-bg", "--statusbar-bg", Color, None),
    token("input-bg", "--input-bg", Color, None),
    token("preview-bg", "--preview-bg", Color, None),
    token("text-link", "--text-link", Color, None),
    token("focus-ring", "--focus-ring", Color, None),
    // Background media and effects
    token("bg-image", "--bg-image", Image, None),
    token("bg-position", "--bg-position", Position, None),
    token("bg-opacity", "--bg-opacity", Opacity, None),
    token("panel-opacity", "--panel-opacity", Opacity, None),
    token("panel-blur", "--panel-blur", Blur, None),
    token("shadow", "--shadow", Raw, None),
    token("radius", "--radius", Raw, None),
];

/// Declared `(child, parent)` pairs, resolved in this order.
///
/// A child without an explicit value takes its parent's resolved value.
pub static INHERITANCE: &[(&str, &str)] = &[
    ("sidebar-bg", "bg-secondary"),
    ("titlebar-bg", "bg-secondary"),
    ("statusbar-bg", "bg-tertiary"),
    ("input-bg", "bg-tertiary"),
    ("preview-bg", "bg-primary"),
    ("text-link", "accent"),
    ("focus-ring", "accent"),
    ("scrollbar", "border-strong"),
];

/// Look up a token definition by key.
pub fn lookup(key: &str) -> Option<&'static TokenDef> {
    TOKENS.iter().find(|def| def.key == key)
}

/// Style variable name for a token key.
pub fn var_name(key: &str) -> Option<&'static str> {
    lookup(key).map(|def| def.var)
}

/// Value type for a token key.
pub fn kind(key: &str) -> Option<TokenKind> {
    lookup(key).map(|def| def.kind)
}

/// All token keys in registry order.
pub fn keys() -> impl Iterator<Item = &'static str> {
    TOKENS.iter().map(|def| def.key)
}

/// Token keys belonging to a color group.
pub fn keys_in_group(group: &str) -> impl Iterator<Item = &'static str> + '_ {
    TOKENS
        .iter()
        .filter(move |def| def.group == Some(group))
        .map(|def| def.key)
}

/// Parent token declared for `child`, if any.
pub fn parent_of(child: &str) -> Option<&'static str> {
    INHERITANCE
        .iter()
        .find(|(c, _)| *c == child)
        .map(|(_, parent)| *parent)
}
