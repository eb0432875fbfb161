//! Theme records and the theme document format.
//!
//! A [`Theme`] is the canonical, normalized record kept by the store. It is
//! produced from either of the two accepted document shapes (see
//! [`validate`](crate::validate)) and exported back as a nested
//! [`ThemeDocument`].
//!
//! # Example
//!
//! ```rust
//! use tinct::theme::{Theme, ThemeType};
//!
//! let theme = Theme::from_json(r##"{
//!     "id": "ember",
//!     "name": "Ember",
//!     "colors": { "accent": "#ff6a00", "panel-opacity": 90 }
//! }"##).unwrap();
//!
//! assert_eq!(theme.theme_type(), ThemeType::Dark);
//! assert_eq!(theme.author(), "Unknown");
//! assert_eq!(theme.version(), "1.0.0");
//! ```

use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{trace, warn};

use crate::error::{StoreError, ValidationError};
use crate::groups;
use crate::validate::{self, DocumentShape};

/// Version assigned when a document omits one.
pub const DEFAULT_VERSION: &str = "1.0.0";
/// Author assigned when a document omits one.
pub const DEFAULT_AUTHOR: &str = "Unknown";

/// Light or dark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeType {
    #[default]
    Dark,
    Light,
}

impl ThemeType {
    /// Parse `"dark"` or `"light"` (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dark" => Some(Self::Dark),
            "light" => Some(Self::Light),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }

    /// Editor base palette used when a theme names none.
    pub fn editor_base(self) -> &'static str {
        match self {
            Self::Dark => "vs-dark",
            Self::Light => "vs",
        }
    }
}

impl fmt::Display for ThemeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A raw token value as written in a theme document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TokenValue {
    Null,
    Flag(bool),
    Number(serde_json::Number),
    Text(String),
}

impl TokenValue {
    /// Null, `false`, zero and the empty string are falsy.
    pub fn is_falsy(&self) -> bool {
        match self {
            TokenValue::Null => true,
            TokenValue::Flag(b) => !b,
            TokenValue::Number(n) => n.as_f64() == Some(0.0),
            TokenValue::Text(s) => s.is_empty(),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, TokenValue::Null)
    }

    /// Textual form, or `None` for null.
    pub fn as_text(&self) -> Option<Cow<'_, str>> {
        match self {
            TokenValue::Null => None,
            TokenValue::Flag(b) => Some(Cow::Borrowed(if *b { "true" } else { "false" })),
            TokenValue::Number(n) => Some(Cow::Owned(n.to_string())),
            TokenValue::Text(s) => Some(Cow::Borrowed(s)),
        }
    }

    /// Numeric form; numeric strings are accepted.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            TokenValue::Number(n) => n.as_f64(),
            TokenValue::Text(s) => s.trim().parse().ok(),
            TokenValue::Null | TokenValue::Flag(_) => None,
        }
    }
}

impl From<&str> for TokenValue {
    fn from(s: &str) -> Self {
        TokenValue::Text(s.to_string())
    }
}

impl From<String> for TokenValue {
    fn from(s: String) -> Self {
        TokenValue::Text(s)
    }
}

impl From<i64> for TokenValue {
    fn from(n: i64) -> Self {
        TokenValue::Number(n.into())
    }
}

impl From<i32> for TokenValue {
    fn from(n: i32) -> Self {
        TokenValue::Number(n.into())
    }
}

impl From<f64> for TokenValue {
    fn from(n: f64) -> Self {
        serde_json::Number::from_f64(n).map_or(TokenValue::Null, TokenValue::Number)
    }
}

impl From<bool> for TokenValue {
    fn from(b: bool) -> Self {
        TokenValue::Flag(b)
    }
}

/// Foreground color and optional font style for one syntax role.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyntaxStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_style: Option<String>,
}

impl SyntaxStyle {
    pub fn new(color: impl Into<String>) -> Self {
        Self {
            color: Some(color.into()),
            font_style: None,
        }
    }

    pub fn with_font_style(mut self, font_style: impl Into<String>) -> Self {
        self.font_style = Some(font_style.into());
        self
    }
}

/// The editor block of a theme.
///
/// Every field is optional; missing values are resolved when the editor
/// theme is generated, so exports reproduce exactly what was imported.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inherit: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foreground: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_highlight: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selection: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_number_active: Option<String>,
    #[serde(
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub syntax: BTreeMap<String, SyntaxStyle>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<BTreeMap<String, SyntaxStyle>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Option::<BTreeMap<String, SyntaxStyle>>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// A normalized theme record.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    id: String,
    name: String,
    theme_type: ThemeType,
    author: String,
    version: String,
    description: String,
    tags: BTreeSet<String>,
    colors: BTreeMap<String, TokenValue>,
    editor: EditorSpec,
    terminal: Option<BTreeMap<String, TokenValue>>,
}

/// Metadata block of a [`ThemeDocument`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentMeta {
    pub id: String,
    pub name: String,
    pub author: String,
    pub version: String,
    pub description: String,
    #[serde(rename = "type")]
    pub theme_type: ThemeType,
    pub tags: Vec<String>,
}

/// Canonical exported document shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeDocument {
    pub meta: DocumentMeta,
    #[serde(default)]
    pub colors: BTreeMap<String, TokenValue>,
    #[serde(default)]
    pub editor: EditorSpec,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terminal: Option<BTreeMap<String, TokenValue>>,
}

/// Metadata fields shared by both input shapes.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct MetaFields {
    id: String,
    name: String,
    author: Option<String>,
    version: Option<String>,
    description: Option<String>,
    #[serde(rename = "type")]
    theme_type: Option<String>,
    tags: Option<Vec<String>>,
}

fn field<T: serde::de::DeserializeOwned>(
    root: &serde_json::Map<String, Value>,
    key: &str,
) -> Result<Option<T>, ValidationError> {
    match root.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => serde_json::from_value(value.clone())
            .map(Some)
            .map_err(malformed),
    }
}

// A document that passed `validate::check` is valid JSON, so anything serde
// still rejects is a structural problem.
fn malformed(error: serde_json::Error) -> ValidationError {
    ValidationError::Malformed(error.to_string())
}

impl Theme {
    /// Creates an empty theme with default metadata.
    pub fn new(id: impl Into<String>, name: impl Into<String>, theme_type: ThemeType) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            theme_type,
            author: DEFAULT_AUTHOR.to_string(),
            version: DEFAULT_VERSION.to_string(),
            description: String::new(),
            tags: BTreeSet::new(),
            colors: BTreeMap::new(),
            editor: EditorSpec::default(),
            terminal: None,
        }
    }

    /// Normalize a parsed document of either accepted shape.
    ///
    /// # Errors
    /// Returns [`StoreError::InvalidStructure`] for structural problems.
    pub fn from_value(value: &Value) -> Result<Self, StoreError> {
        let shape = validate::check(value)?;
        let root = value.as_object().ok_or(ValidationError::NotAnObject)?;
        let meta_value = match shape {
            DocumentShape::Nested => root.get("meta").cloned().unwrap_or(Value::Null),
            DocumentShape::Flat => value.clone(),
        };
        trace!(theme.shape = ?shape, "Normalizing theme document");

        let meta: MetaFields = serde_json::from_value(meta_value).map_err(malformed)?;
        let theme_type = match meta.theme_type.as_deref() {
            None => ThemeType::default(),
            Some(raw) => ThemeType::parse(raw).unwrap_or_else(|| {
                warn!(theme.id = %meta.id, theme.type_name = %raw, "Unknown theme type, using dark");
                ThemeType::Dark
            }),
        };

        let colors = field(root, "colors")?.unwrap_or_default();
        let editor = field(root, "editor")?.unwrap_or_default();
        let terminal = field(root, "terminal")?;

        Ok(Self {
            id: meta.id.trim().to_string(),
            name: meta.name,
            theme_type,
            author: meta
                .author
                .filter(|a| !a.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_AUTHOR.to_string()),
            version: meta
                .version
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_VERSION.to_string()),
            description: meta.description.unwrap_or_default(),
            tags: meta.tags.unwrap_or_default().into_iter().collect(),
            colors,
            editor,
            terminal,
        })
    }

    /// Parse and normalize JSON text.
    ///
    /// # Errors
    /// Returns [`StoreError::Parse`] or [`StoreError::InvalidStructure`].
    pub fn from_json(json: &str) -> Result<Self, StoreError> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(&value)
    }

    /// The canonical nested document for this theme.
    pub fn to_document(&self) -> ThemeDocument {
        ThemeDocument {
            meta: DocumentMeta {
                id: self.id.clone(),
                name: self.name.clone(),
                author: self.author.clone(),
                version: self.version.clone(),
                description: self.description.clone(),
                theme_type: self.theme_type,
                tags: self.tags.iter().cloned().collect(),
            },
            colors: self.colors.clone(),
            editor: self.editor.clone(),
            terminal: self.terminal.clone(),
        }
    }

    /// Serialize the canonical document as pretty JSON.
    ///
    /// # Errors
    /// Returns [`StoreError::Serialize`] if serialization fails.
    pub fn to_json(&self) -> Result<String, StoreError> {
        serde_json::to_string_pretty(&self.to_document()).map_err(StoreError::Serialize)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn theme_type(&self) -> ThemeType {
        self.theme_type
    }

    pub fn is_dark(&self) -> bool {
        self.theme_type == ThemeType::Dark
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn tags(&self) -> &BTreeSet<String> {
        &self.tags
    }

    /// Raw token values keyed by token key.
    pub fn colors(&self) -> &BTreeMap<String, TokenValue> {
        &self.colors
    }

    pub fn colors_mut(&mut self) -> &mut BTreeMap<String, TokenValue> {
        &mut self.colors
    }

    /// A color token's text, if set and not null.
    pub fn color(&self, key: &str) -> Option<Cow<'_, str>> {
        self.colors.get(key).and_then(TokenValue::as_text)
    }

    pub fn editor(&self) -> &EditorSpec {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut EditorSpec {
        &mut self.editor
    }

    pub fn terminal(&self) -> Option<&BTreeMap<String, TokenValue>> {
        self.terminal.as_ref()
    }

    // ========================
    // Builder Methods
    // ========================

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_tags<I, T>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Sets a single token value.
    pub fn with_color(mut self, key: impl Into<String>, value: impl Into<TokenValue>) -> Self {
        self.colors.insert(key.into(), value.into());
        self
    }

    /// Sets a group's base token and every token derived from it.
    ///
    /// An unknown group or malformed base only sets the base token.
    pub fn with_group(mut self, group_id: &str, base: &str) -> Self {
        let Some(group) = groups::group(group_id) else {
            warn!(theme.id = %self.id, theme.group = %group_id, "Unknown color group");
            return self;
        };
        self.colors
            .insert(group.base.to_string(), TokenValue::from(base));
        match group.derive(base) {
            Ok(derived) => {
                for (key, value) in derived {
                    self.colors.insert(key.to_string(), TokenValue::Text(value));
                }
            }
            Err(error) => {
                warn!(theme.id = %self.id, theme.group = %group_id, %error, "Group not derived");
            }
        }
        self
    }

    pub fn with_editor(mut self, editor: EditorSpec) -> Self {
        self.editor = editor;
        self
    }

    pub fn with_syntax(mut self, role: impl Into<String>, style: SyntaxStyle) -> Self {
        self.editor.syntax.insert(role.into(), style);
        self
    }

    pub fn with_terminal(mut self, terminal: BTreeMap<String, TokenValue>) -> Self {
        self.terminal = Some(terminal);
        self
    }
}
