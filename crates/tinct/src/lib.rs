#![forbid(unsafe_code)]
// Allow these clippy lints for API ergonomics and color math
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::option_if_let_else)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::items_after_test_module)]

//! # Tinct
//!
//! A theming engine for desktop applications that paint their chrome from
//! named style variables and host an embedded code editor.
//!
//! Tinct provides:
//! - **Tokens**: a frozen registry of semantic design values and the style
//!   variable each one drives
//! - **Derivation**: deterministic hex color math and group rules that expand
//!   one base color into a full palette
//! - **Themes**: a registry of builtin and user themes with import, export,
//!   duplicate, delete and restore
//! - **Application**: type-directed writes onto any style scope, with stale
//!   value clearing and token inheritance
//! - **Editor themes**: syntax rules and chrome colors for the embedded editor
//!
//! ## Quick Start
//!
//! ```rust
//! use tinct::{EngineConfig, MemoryScope, MemoryStorage, ThemeStore};
//!
//! let mut store = ThemeStore::new(
//!     MemoryScope::new(),
//!     Box::new(MemoryStorage::new()),
//!     EngineConfig::default(),
//! );
//! store.set_theme("dracula");
//!
//! assert_eq!(store.active_id(), Some("dracula"));
//! assert_eq!(store.scope().get("--bg-primary"), Some("#282a36"));
//! ```

pub mod apply;
pub mod builtin;
pub mod color;
pub mod config;
pub mod editor;
#[cfg(feature = "tokio")]
pub mod enhance;
pub mod error;
pub mod groups;
pub mod host;
pub mod storage;
pub mod store;
pub mod theme;
pub mod tokens;
pub mod validate;

pub use apply::{ApplyOptions, ApplyReport, apply_to_scope};
pub use builtin::{BUILTIN_IDS, DEFAULT_THEME_ID};
pub use color::Rgb;
pub use config::EngineConfig;
pub use editor::{EditorTheme, SyntaxRule, build_editor_theme};
#[cfg(feature = "tokio")]
pub use enhance::{DefinitionSource, DirectorySource, Enhancement, spawn_enhancements};
pub use error::{
    ConfigError, DeriveError, FetchError, StorageError, StoreError, ValidationError,
};
pub use groups::ColorGroup;
pub use host::{
    Background, BackgroundSink, EditorHandle, EditorHost, HeadlessEditorHost, MediaKind,
    MemoryScope, StyleScope,
};
pub use storage::{FileStorage, MemoryStorage, ThemeStorage};
pub use store::{Activation, Outcome, ThemeStore, ThemeSummary};
pub use theme::{EditorSpec, SyntaxStyle, Theme, ThemeDocument, ThemeType, TokenValue};
pub use tokens::{TokenDef, TokenKind};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::apply::{ApplyOptions, apply_to_scope};
    pub use crate::config::EngineConfig;
    pub use crate::host::{EditorHost, MemoryScope, StyleScope};
    pub use crate::storage::{MemoryStorage, ThemeStorage};
    pub use crate::store::{Activation, Outcome, ThemeStore};
    pub use crate::theme::{Theme, ThemeType, TokenValue};
}
