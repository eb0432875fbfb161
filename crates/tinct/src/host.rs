//! Capabilities the engine consumes from its rendering host.
//!
//! The engine never assumes a concrete root or editor component. It writes
//! through these traits, and headless implementations are provided for tests
//! and command-line use.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::Path;

use tracing::trace;

use crate::editor::EditorTheme;
use crate::theme::TokenValue;

/// A target that holds named style variables.
pub trait StyleScope {
    /// Set a named style variable.
    fn set_var(&mut self, name: &str, value: &str);

    /// Remove a named style variable.
    fn remove_var(&mut self, name: &str);
}

/// An ordered in-memory style scope.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryScope {
    vars: BTreeMap<String, String>,
}

impl MemoryScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value of a variable.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Render all variables as a `:root { ... }` block.
    pub fn to_css(&self) -> String {
        let mut css = String::from(":root {\n");
        for (name, value) in &self.vars {
            let _ = writeln!(css, "  {name}: {value};");
        }
        css.push('}');
        css.push('\n');
        css
    }
}

impl StyleScope for MemoryScope {
    fn set_var(&mut self, name: &str, value: &str) {
        trace!(scope.var = %name, scope.value = %value, "Style variable set");
        self.vars.insert(name.to_string(), value.to_string());
    }

    fn remove_var(&mut self, name: &str) {
        self.vars.remove(name);
    }
}

/// Identifier of an open editor instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EditorHandle(pub u64);

/// The embedded code editor's theming surface.
pub trait EditorHost {
    /// Define (or redefine) a named theme.
    fn define_theme(&mut self, name: &str, theme: &EditorTheme);

    /// Make a defined theme the default for new editors.
    fn activate_theme(&mut self, name: &str);

    /// Editors currently open.
    fn open_editors(&self) -> Vec<EditorHandle>;

    /// Switch one open editor to a defined theme.
    fn update_editor_theme(&mut self, editor: EditorHandle, name: &str);
}

/// An editor host that records definitions in memory.
#[derive(Debug, Clone, Default)]
pub struct HeadlessEditorHost {
    themes: BTreeMap<String, EditorTheme>,
    active: Option<String>,
    editors: BTreeMap<EditorHandle, String>,
    next_editor: u64,
}

impl HeadlessEditorHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a new editor using the active theme.
    pub fn open_editor(&mut self) -> EditorHandle {
        self.next_editor += 1;
        let handle = EditorHandle(self.next_editor);
        self.editors
            .insert(handle, self.active.clone().unwrap_or_default());
        handle
    }

    pub fn close_editor(&mut self, editor: EditorHandle) {
        self.editors.remove(&editor);
    }

    pub fn theme(&self, name: &str) -> Option<&EditorTheme> {
        self.themes.get(name)
    }

    pub fn active_theme(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Theme currently shown by one editor.
    pub fn editor_theme(&self, editor: EditorHandle) -> Option<&str> {
        self.editors.get(&editor).map(String::as_str)
    }
}

impl EditorHost for HeadlessEditorHost {
    fn define_theme(&mut self, name: &str, theme: &EditorTheme) {
        self.themes.insert(name.to_string(), theme.clone());
    }

    fn activate_theme(&mut self, name: &str) {
        self.active = Some(name.to_string());
    }

    fn open_editors(&self) -> Vec<EditorHandle> {
        self.editors.keys().copied().collect()
    }

    fn update_editor_theme(&mut self, editor: EditorHandle, name: &str) {
        if let Some(current) = self.editors.get_mut(&editor) {
            *current = name.to_string();
        }
    }
}

/// Background reference emitted on activation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Background {
    None,
    /// A file path.
    File(String),
    /// An embedded `data:` reference.
    Data(String),
}

/// Still or motion media.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
}

const VIDEO_EXTENSIONS: &[&str] = &["mp4", "webm", "ogg", "ogv", "mov", "m4v"];

impl Background {
    /// Build from a theme's raw `bg-image` value.
    pub fn from_token(value: Option<&TokenValue>) -> Self {
        let Some(text) = value
            .filter(|v| !v.is_falsy())
            .and_then(TokenValue::as_text)
        else {
            return Self::None;
        };
        let text = text.trim();
        if text.is_empty() || text == "none" {
            Self::None
        } else if text.starts_with("data:") {
            Self::Data(text.to_string())
        } else {
            Self::File(text.to_string())
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Classify the referenced media, `None` when there is no background.
    pub fn media_kind(&self) -> Option<MediaKind> {
        match self {
            Self::None => None,
            Self::Data(data) => Some(if data.starts_with("data:video/") {
                MediaKind::Video
            } else {
                MediaKind::Image
            }),
            Self::File(path) => {
                let ext = Path::new(path)
                    .extension()
                    .and_then(|e| e.to_str())
                    .map(str::to_ascii_lowercase);
                Some(match ext {
                    Some(ext) if VIDEO_EXTENSIONS.contains(&ext.as_str()) => MediaKind::Video,
                    _ => MediaKind::Image,
                })
            }
        }
    }
}

/// The element that displays background media.
///
/// Implementations show the referenced media (still or motion) and must
/// hide it and release any held resources when given [`Background::None`].
pub trait BackgroundSink {
    fn show(&mut self, background: &Background);
}
