//! Background enhancement of builtin themes.
//!
//! Builtins are seeded synchronously from compact definitions. Richer
//! definitions can be fetched afterwards: one task per builtin id, each
//! independent and fire-and-forget. Arrived definitions travel over a
//! channel to whoever owns the [`ThemeStore`], which registers them on its
//! own thread. The last definition to arrive for an id wins, and the theme is
//! re-applied only if it is active at that moment.
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use tinct::{DirectorySource, EngineConfig, MemoryScope, MemoryStorage, ThemeStore, BUILTIN_IDS};
//!
//! # async fn run() {
//! let mut store = ThemeStore::new(MemoryScope::new(), Box::new(MemoryStorage::new()), EngineConfig::default());
//! store.start();
//!
//! let source = Arc::new(DirectorySource::new("/usr/share/tinct/themes"));
//! let rx = tinct::spawn_enhancements(source, BUILTIN_IDS.iter().copied());
//! store.receive_enhancements(rx).await;
//! # }
//! ```

use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;

use serde_json::Value;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::error::{FetchError, StoreError};
use crate::host::StyleScope;
use crate::store::ThemeStore;
use crate::theme::Theme;

/// A fetched definition for one builtin id.
#[derive(Debug, Clone, PartialEq)]
pub struct Enhancement {
    pub id: String,
    pub definition: Value,
}

/// Where richer builtin definitions come from.
pub trait DefinitionSource: Send + Sync + 'static {
    /// Fetch the full definition for `id`.
    fn fetch(&self, id: &str) -> impl Future<Output = Result<Value, FetchError>> + Send;
}

/// Reads `<dir>/<id>.json`.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    dir: PathBuf,
}

impl DirectorySource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl DefinitionSource for DirectorySource {
    async fn fetch(&self, id: &str) -> Result<Value, FetchError> {
        let path = self.dir.join(format!("{id}.json"));
        let text = match tokio::fs::read_to_string(&path).await {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(FetchError::Missing(id.to_string()));
            }
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_str(&text)?)
    }
}

/// Fetch every id on its own task.
///
/// Must be called from within a tokio runtime. Failures are logged per id and
/// never reach the receiver. The channel closes once every task finished.
pub fn spawn_enhancements<D, I, T>(source: Arc<D>, ids: I) -> mpsc::UnboundedReceiver<Enhancement>
where
    D: DefinitionSource,
    I: IntoIterator<Item = T>,
    T: Into<String>,
{
    let (tx, rx) = mpsc::unbounded_channel();
    for id in ids {
        let id: String = id.into();
        let source = Arc::clone(&source);
        let tx = tx.clone();
        tokio::spawn(async move {
            match source.fetch(&id).await {
                Ok(definition) => {
                    debug!(theme.id = %id, "Enhanced definition fetched");
                    if let Err(mpsc::error::SendError(dropped)) =
                        tx.send(Enhancement { id, definition })
                    {
                        debug!(theme.id = %dropped.id, "Receiver dropped, definition discarded");
                    }
                }
                Err(error) => warn!(theme.id = %id, %error, "Enhanced definition unavailable"),
            }
        });
    }
    rx
}

impl<S: StyleScope> ThemeStore<S> {
    /// Register a fetched definition for a builtin.
    ///
    /// The definition must carry the id it was fetched for.
    pub fn apply_enhancement(&mut self, enhancement: &Enhancement) -> Result<String, StoreError> {
        if !self.is_builtin(&enhancement.id) {
            return Err(StoreError::NotBuiltin(enhancement.id.clone()));
        }
        let theme = Theme::from_value(&enhancement.definition)?;
        if theme.id() != enhancement.id {
            return Err(StoreError::IdMismatch {
                expected: enhancement.id.clone(),
                found: theme.id().to_string(),
            });
        }
        let id = self.register(theme, false);
        info!(theme.id = %id, "Builtin theme enhanced");
        Ok(id)
    }

    /// Register every enhancement already waiting on `rx` without blocking.
    ///
    /// Returns how many were registered.
    pub fn drain_enhancements(&mut self, rx: &mut mpsc::UnboundedReceiver<Enhancement>) -> usize {
        let mut applied = 0;
        while let Ok(enhancement) = rx.try_recv() {
            applied += usize::from(self.accept(&enhancement));
        }
        applied
    }

    /// Register enhancements as they arrive until every task has finished.
    pub async fn receive_enhancements(&mut self, mut rx: mpsc::UnboundedReceiver<Enhancement>) -> usize {
        let mut applied = 0;
        while let Some(enhancement) = rx.recv().await {
            applied += usize::from(self.accept(&enhancement));
        }
        applied
    }

    fn accept(&mut self, enhancement: &Enhancement) -> bool {
        match self.apply_enhancement(enhancement) {
            Ok(_) => true,
            Err(error) => {
                warn!(theme.id = %enhancement.id, %error, "Enhanced definition rejected");
                false
            }
        }
    }
}
