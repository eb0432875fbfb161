//! The theme registry and activation.
//!
//! [`ThemeStore`] owns every registered theme, the active-theme pointer and
//! the collaborators activation writes to: a style scope, an optional editor
//! host and an optional background sink. All mutations are synchronous and
//! leave the registry and the applied style state consistent on return.
//!
//! # Lifecycle
//!
//! ```text
//! user theme:  unregistered -> registered <-> active -> deleted
//! builtin:     registered <-> active, restore re-seeds the shipped definition
//! ```

use std::collections::HashMap;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error, info, warn};

use crate::apply::{ApplyOptions, apply_to_scope};
use crate::builtin::{self, BUILTIN_IDS};
use crate::config::EngineConfig;
use crate::editor;
use crate::error::StoreError;
use crate::host::{Background, BackgroundSink, EditorHost, StyleScope};
use crate::storage::ThemeStorage;
use crate::theme::{DEFAULT_VERSION, Theme, ThemeDocument, ThemeType};

/// Author recorded on duplicated themes.
pub const DUPLICATE_AUTHOR: &str = "User";

/// Result of [`ThemeStore::set_theme`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Activation {
    /// The requested theme was applied.
    Applied { id: String },
    /// The requested theme was unknown; the default was applied instead.
    FellBack { requested: String, id: String },
    /// Neither the requested theme nor the default exists. Nothing changed.
    Unavailable { requested: String },
}

impl Activation {
    /// Id of the theme that ended up applied.
    pub fn applied_id(&self) -> Option<&str> {
        match self {
            Self::Applied { id } | Self::FellBack { id, .. } => Some(id),
            Self::Unavailable { .. } => None,
        }
    }

    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied { .. })
    }
}

/// Structured result handed to callers of user-facing operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Outcome {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme_id: Option<String>,
}

impl Outcome {
    pub fn ok(theme_id: Option<String>) -> Self {
        Self {
            success: true,
            message: None,
            theme_id,
        }
    }

    pub fn failed(error: &StoreError) -> Self {
        Self {
            success: false,
            message: Some(error.to_string()),
            theme_id: None,
        }
    }
}

impl From<Result<String, StoreError>> for Outcome {
    fn from(result: Result<String, StoreError>) -> Self {
        match result {
            Ok(id) => Self::ok(Some(id)),
            Err(error) => Self::failed(&error),
        }
    }
}

impl From<Result<(), StoreError>> for Outcome {
    fn from(result: Result<(), StoreError>) -> Self {
        match result {
            Ok(()) => Self::ok(None),
            Err(error) => Self::failed(&error),
        }
    }
}

/// One row of [`ThemeStore::list`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeSummary {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub theme_type: ThemeType,
    pub author: String,
    pub builtin: bool,
    pub active: bool,
}

/// Registry of builtin and user themes.
pub struct ThemeStore<S: StyleScope> {
    config: EngineConfig,
    themes: HashMap<String, Theme>,
    active_id: Option<String>,
    scope: S,
    storage: Box<dyn ThemeStorage>,
    editor: Option<Box<dyn EditorHost>>,
    background: Option<Box<dyn BackgroundSink>>,
}

impl<S: StyleScope> std::fmt::Debug for ThemeStore<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeStore")
            .field("themes", &self.themes.len())
            .field("active_id", &self.active_id)
            .field("editor", &self.editor.is_some())
            .field("background", &self.background.is_some())
            .finish_non_exhaustive()
    }
}

impl<S: StyleScope> ThemeStore<S> {
    /// Seed the builtins and load persisted user themes.
    ///
    /// Nothing is applied until [`start`](Self::start) or
    /// [`set_theme`](Self::set_theme) is called.
    pub fn new(scope: S, storage: Box<dyn ThemeStorage>, config: EngineConfig) -> Self {
        let mut store = Self {
            config,
            themes: HashMap::new(),
            active_id: None,
            scope,
            storage,
            editor: None,
            background: None,
        };
        for theme in builtin::seeds() {
            store.register(theme, true);
        }
        store.load_user_themes();
        debug!(theme.count = store.themes.len(), "Theme store initialized");
        store
    }

    pub fn with_editor_host(mut self, host: Box<dyn EditorHost>) -> Self {
        self.attach_editor_host(host);
        self
    }

    pub fn with_background(mut self, sink: Box<dyn BackgroundSink>) -> Self {
        self.attach_background(sink);
        self
    }

    /// Attach the editor host once it becomes ready.
    ///
    /// Every registered theme is defined and the active one is activated.
    pub fn attach_editor_host(&mut self, host: Box<dyn EditorHost>) {
        self.editor = Some(host);
        for theme in self.themes.values() {
            editor::define(&mut self.editor, theme);
        }
        if let Some(theme) = self.active_id.as_ref().and_then(|id| self.themes.get(id)) {
            editor::activate(&mut self.editor, theme);
        }
        debug!("Editor host attached");
    }

    /// Attach the background sink and show the active theme's background.
    pub fn attach_background(&mut self, mut sink: Box<dyn BackgroundSink>) {
        if let Some(theme) = self.active_id.as_ref().and_then(|id| self.themes.get(id)) {
            sink.show(&Background::from_token(theme.colors().get("bg-image")));
        }
        self.background = Some(sink);
    }

    /// Activate the initial theme.
    ///
    /// Preference order: the configured initial theme, the remembered active
    /// id, then the default.
    pub fn start(&mut self) -> Activation {
        let remembered = if self.config.remember_active {
            match self.storage.load(&self.config.active_key) {
                Ok(id) => id.map(|id| id.trim().to_string()).filter(|id| !id.is_empty()),
                Err(error) => {
                    warn!(%error, "Could not read remembered theme");
                    None
                }
            }
        } else {
            None
        };
        let id = self
            .config
            .initial_theme
            .clone()
            .or(remembered)
            .unwrap_or_else(|| self.config.default_theme.clone());
        self.set_theme(&id)
    }

    fn load_user_themes(&mut self) {
        let raw = match self.storage.load(&self.config.storage_key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return,
            Err(error) => {
                error!(%error, "Failed to read user themes");
                return;
            }
        };
        let entries: Vec<Value> = match serde_json::from_str(&raw) {
            Ok(entries) => entries,
            Err(error) => {
                warn!(%error, "Stored user themes are unreadable, starting without them");
                return;
            }
        };
        for entry in &entries {
            match Theme::from_value(entry) {
                Ok(theme) if builtin::is_builtin_id(theme.id()) => {
                    warn!(theme.id = %theme.id(), "Stored theme shadows a builtin, skipping");
                }
                Ok(theme) => {
                    self.themes.insert(theme.id().to_string(), theme);
                }
                Err(error) => warn!(%error, "Skipping invalid stored theme"),
            }
        }
        debug!(theme.count = entries.len(), "User themes loaded");
    }

    /// Store `theme` under its id, replacing any previous record.
    ///
    /// The editor theme is (re)defined. If the id is active and
    /// `skip_reapply` is false, the theme is re-applied.
    pub fn register(&mut self, theme: Theme, skip_reapply: bool) -> String {
        let id = theme.id().to_string();
        if self.editor.is_some() {
            editor::define(&mut self.editor, &theme);
        } else {
            debug!(theme.id = %id, "Editor host not attached, definition deferred until attach");
        }
        let replaced = self.themes.insert(id.clone(), theme).is_some();
        debug!(theme.id = %id, theme.replaced = replaced, "Theme registered");
        if !skip_reapply && self.active_id.as_deref() == Some(id.as_str()) {
            self.set_theme(&id);
        }
        id
    }

    /// Normalize a document of either accepted shape and register it.
    pub fn register_theme(&mut self, document: &Value, skip_reapply: bool) -> Result<String, StoreError> {
        let theme = Theme::from_value(document)?;
        Ok(self.register(theme, skip_reapply))
    }

    /// Apply a theme to every collaborator.
    ///
    /// Unknown ids fall back to the configured default. Applying the same
    /// theme twice leaves the scope in the same state.
    pub fn set_theme(&mut self, id: &str) -> Activation {
        let default_id = self.config.default_theme.as_str();
        let Some(theme) = self.themes.get(id).or_else(|| self.themes.get(default_id)) else {
            error!(theme.id = %id, theme.default = %default_id, "Neither theme nor default is registered");
            return Activation::Unavailable {
                requested: id.to_string(),
            };
        };
        let theme_id = theme.id().to_string();
        if theme_id != id {
            warn!(theme.id = %id, theme.fallback = %theme_id, "Theme not found, using default");
        }

        let options = ApplyOptions {
            clear_first: self.config.clear_first,
        };
        let report = apply_to_scope(&mut self.scope, theme.colors(), options);

        if let Some(sink) = self.background.as_mut() {
            sink.show(&Background::from_token(theme.colors().get("bg-image")));
        }
        editor::activate(&mut self.editor, theme);

        self.active_id = Some(theme_id.clone());
        if self.config.remember_active {
            if let Err(error) = self.storage.save(&self.config.active_key, &theme_id) {
                error!(%error, theme.id = %theme_id, "Failed to remember active theme");
            }
        }
        info!(
            theme.id = %theme_id,
            apply.set = report.set,
            apply.inherited = report.inherited,
            "Theme applied"
        );

        if theme_id == id {
            Activation::Applied { id: theme_id }
        } else {
            Activation::FellBack {
                requested: id.to_string(),
                id: theme_id,
            }
        }
    }

    /// Import a theme from JSON text and persist it.
    pub fn import_theme(&mut self, text: &str) -> Result<String, StoreError> {
        let value: Value = serde_json::from_str(text)?;
        let theme = Theme::from_value(&value)?;
        if builtin::is_builtin_id(theme.id()) {
            return Err(StoreError::BuiltinOverwrite(theme.id().to_string()));
        }
        let id = self.register(theme, false);
        self.persist();
        info!(theme.id = %id, "Theme imported");
        Ok(id)
    }

    /// Export a theme as a pretty-printed canonical document.
    pub fn export_theme(&self, id: &str) -> Result<String, StoreError> {
        self.themes
            .get(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?
            .to_json()
    }

    /// Delete a user theme. Deleting the active theme activates the default.
    pub fn delete_theme(&mut self, id: &str) -> Result<(), StoreError> {
        if builtin::is_builtin_id(id) {
            return Err(StoreError::BuiltinDelete(id.to_string()));
        }
        if self.themes.remove(id).is_none() {
            return Err(StoreError::NotFound(id.to_string()));
        }
        self.persist();
        info!(theme.id = %id, "Theme deleted");
        if self.active_id.as_deref() == Some(id) {
            let default_id = self.config.default_theme.clone();
            self.set_theme(&default_id);
        }
        Ok(())
    }

    /// Copy a theme under a new name.
    ///
    /// The new id is `new_name` lowercased with whitespace runs replaced by
    /// `-`. The copy's author is always [`DUPLICATE_AUTHOR`]. An id that is
    /// already registered is refused.
    pub fn duplicate_theme(&mut self, source_id: &str, new_name: &str) -> Result<String, StoreError> {
        let source = self
            .themes
            .get(source_id)
            .ok_or_else(|| StoreError::NotFound(source_id.to_string()))?;
        let id = slugify(new_name);
        if id.is_empty() {
            return Err(StoreError::InvalidName(new_name.to_string()));
        }
        if builtin::is_builtin_id(&id) {
            return Err(StoreError::BuiltinOverwrite(id));
        }
        if self.themes.contains_key(&id) {
            return Err(StoreError::AlreadyExists(id));
        }
        let copy = source
            .clone()
            .with_id(id.as_str())
            .with_name(new_name.trim())
            .with_author(DUPLICATE_AUTHOR)
            .with_version(DEFAULT_VERSION);
        let id = self.register(copy, false);
        self.persist();
        info!(theme.id = %id, theme.source = %source_id, "Theme duplicated");
        Ok(id)
    }

    /// Reset a builtin to its shipped definition.
    pub fn restore_theme(&mut self, id: &str) -> Result<(), StoreError> {
        let seed = builtin::seed(id).ok_or_else(|| StoreError::NotBuiltin(id.to_string()))?;
        self.register(seed, false);
        info!(theme.id = %id, "Builtin theme restored");
        Ok(())
    }

    /// Builtins in shipped order, then user themes sorted by id.
    pub fn list(&self) -> Vec<ThemeSummary> {
        let mut users: Vec<&Theme> = self
            .themes
            .values()
            .filter(|t| !builtin::is_builtin_id(t.id()))
            .collect();
        users.sort_by(|a, b| a.id().cmp(b.id()));

        BUILTIN_IDS
            .iter()
            .filter_map(|id| self.themes.get(*id))
            .chain(users)
            .map(|theme| ThemeSummary {
                id: theme.id().to_string(),
                name: theme.name().to_string(),
                theme_type: theme.theme_type(),
                author: theme.author().to_string(),
                builtin: builtin::is_builtin_id(theme.id()),
                active: self.active_id.as_deref() == Some(theme.id()),
            })
            .collect()
    }

    pub fn get(&self, id: &str) -> Option<&Theme> {
        self.themes.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.themes.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.themes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.themes.is_empty()
    }

    pub fn active_id(&self) -> Option<&str> {
        self.active_id.as_deref()
    }

    pub fn active_theme(&self) -> Option<&Theme> {
        self.active_id.as_ref().and_then(|id| self.themes.get(id))
    }

    pub fn is_builtin(&self, id: &str) -> bool {
        builtin::is_builtin_id(id)
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn scope(&self) -> &S {
        &self.scope
    }

    pub fn scope_mut(&mut self) -> &mut S {
        &mut self.scope
    }

    pub fn storage(&self) -> &dyn ThemeStorage {
        self.storage.as_ref()
    }

    /// Write every user theme to storage, replacing what was there.
    ///
    /// Failures are logged; the in-memory registry stays authoritative.
    fn persist(&mut self) {
        let mut documents: Vec<ThemeDocument> = self
            .themes
            .values()
            .filter(|t| !builtin::is_builtin_id(t.id()))
            .map(Theme::to_document)
            .collect();
        documents.sort_by(|a, b| a.meta.id.cmp(&b.meta.id));

        let json = match serde_json::to_string(&documents) {
            Ok(json) => json,
            Err(error) => {
                error!(%error, "Failed to serialize user themes");
                return;
            }
        };
        match self.storage.save(&self.config.storage_key, &json) {
            Ok(()) => debug!(theme.count = documents.len(), "User themes persisted"),
            Err(error) => error!(%error, storage.key = %self.config.storage_key, "Failed to persist user themes"),
        }
    }
}

/// Lowercase `name` and join its whitespace-separated words with `-`.
pub fn slugify(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::MemoryScope;
    use crate::storage::MemoryStorage;

    fn store() -> ThemeStore<MemoryScope> {
        ThemeStore::new(
            MemoryScope::new(),
            Box::new(MemoryStorage::new()),
            EngineConfig::default(),
        )
    }

    #[test]
    fn slugs() {
        assert_eq!(slugify("My Pink"), "my-pink");
        assert_eq!(slugify("  Late\tNight  Blue "), "late-night-blue");
        assert_eq!(slugify("   "), "");
    }

    #[test]
    fn new_store_has_builtins_and_nothing_active() {
        let store = store();
        assert_eq!(store.len(), BUILTIN_IDS.len());
        assert_eq!(store.active_id(), None);
        assert!(store.scope().is_empty());
    }

    #[test]
    fn start_uses_default() {
        let mut store = store();
        assert_eq!(
            store.start(),
            Activation::Applied {
                id: "midnight".into()
            }
        );
        assert_eq!(store.scope().get("--bg-primary"), Some("#0f111a"));
    }

    #[test]
    fn start_prefers_remembered_then_initial() {
        let storage = MemoryStorage::new().with_entry("tinct.active-theme", "nord");
        let mut remembered = ThemeStore::new(
            MemoryScope::new(),
            Box::new(storage.clone()),
            EngineConfig::default(),
        );
        assert_eq!(remembered.start().applied_id(), Some("nord"));

        let mut initial = ThemeStore::new(
            MemoryScope::new(),
            Box::new(storage),
            EngineConfig::default().with_initial_theme("sakura"),
        );
        assert_eq!(initial.start().applied_id(), Some("sakura"));
    }

    #[test]
    fn unavailable_when_default_is_missing() {
        let config = EngineConfig {
            default_theme: "gone".into(),
            ..EngineConfig::default()
        };
        let mut store = ThemeStore::new(MemoryScope::new(), Box::new(MemoryStorage::new()), config);
        assert_eq!(
            store.set_theme("also-gone"),
            Activation::Unavailable {
                requested: "also-gone".into()
            }
        );
        assert!(store.scope().is_empty());
        assert_eq!(store.active_id(), None);
    }

    #[test]
    fn outcome_from_results() {
        let ok: Outcome = Ok::<_, StoreError>("x".to_string()).into();
        assert!(ok.success);
        assert_eq!(ok.theme_id.as_deref(), Some("x"));

        let failed: Outcome = Err::<(), _>(StoreError::NotFound("y".into())).into();
        assert!(!failed.success);
        assert_eq!(failed.message.as_deref(), Some("Theme 'y' not found"));

        let json = serde_json::to_value(&ok).unwrap();
        assert_eq!(json, serde_json::json!({"success": true, "themeId": "x"}));
    }

    #[test]
    fn list_orders_builtins_first() {
        let mut store = store();
        store.import_theme(r#"{"id": "zeta", "name": "Zeta"}"#).unwrap();
        store.import_theme(r#"{"id": "alpha", "name": "Alpha"}"#).unwrap();
        store.set_theme("nord");
        let ids: Vec<_> = store.list().into_iter().map(|s| s.id).collect();
        assert_eq!(
            ids,
            ["midnight", "daylight", "dracula", "nord", "sakura", "alpha", "zeta"]
        );
        let nord = store.list().into_iter().find(|s| s.id == "nord").unwrap();
        assert!(nord.active && nord.builtin);
    }

    #[test]
    fn restore_rejects_user_themes() {
        let mut store = store();
        assert!(matches!(
            store.restore_theme("mine"),
            Err(StoreError::NotBuiltin(_))
        ));
        assert!(store.restore_theme("nord").is_ok());
    }
}
