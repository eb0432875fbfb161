#![forbid(unsafe_code)]

//! # Tinct CLI
//!
//! Manage the theme registry from a terminal: list, switch, import, export,
//! duplicate and inspect themes, and preview derived palettes.
//!
//! ## Usage
//!
//! ```bash
//! tinct list
//! tinct use dracula
//! tinct import ./ember.json
//! tinct duplicate sakura "My Pink"
//! ```

mod cli;

use std::fs;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use tinct::groups;
use tinct::{
    Activation, ApplyOptions, BUILTIN_IDS, DirectorySource, EngineConfig, FileStorage,
    HeadlessEditorHost, MemoryScope, MemoryStorage, StoreError, ThemeStorage, ThemeStore,
    apply_to_scope, build_editor_theme, spawn_enhancements,
};

use cli::{Cli, Command};

fn init_tracing(cli: &Cli) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_level()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_config(cli: &Cli) -> Result<EngineConfig> {
    match cli.config_path() {
        Some(path) => EngineConfig::from_file(&path)
            .with_context(|| format!("failed to load config from {}", path.display())),
        None => Ok(EngineConfig::default()),
    }
}

fn open_store(cli: &Cli, config: EngineConfig) -> ThemeStore<MemoryScope> {
    let storage: Box<dyn ThemeStorage> = match cli.data_dir() {
        Some(dir) => {
            debug!(storage.dir = %dir.display(), "Using file storage");
            Box::new(FileStorage::new(dir))
        }
        None => Box::new(MemoryStorage::new()),
    };
    ThemeStore::new(MemoryScope::new(), storage, config)
        .with_editor_host(Box::new(HeadlessEditorHost::new()))
}

fn found<T>(value: Option<T>, id: &str) -> Result<T, StoreError> {
    value.ok_or_else(|| StoreError::NotFound(id.to_string()))
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli);

    let config = load_config(&cli)?;

    // Pure commands need no registry.
    match &cli.command {
        Command::Derive { group, base } => {
            let group_def = groups::group(group)
                .ok_or_else(|| tinct::DeriveError::UnknownGroup(group.clone()))?;
            let derived = group_def.derive(base)?;
            println!("{}: {}", group_def.base, base);
            for (key, value) in derived {
                println!("{key}: {value}");
            }
            return Ok(());
        }
        Command::Config => {
            print!("{}", config.to_toml()?);
            return Ok(());
        }
        _ => {}
    }

    let mut store = open_store(&cli, config);
    if let Some(dir) = &cli.themes_dir {
        let rx = spawn_enhancements(Arc::new(DirectorySource::new(dir)), BUILTIN_IDS);
        let applied = store.receive_enhancements(rx).await;
        debug!(theme.count = applied, "Builtin enhancements applied");
    }
    store.start();

    match cli.command {
        Command::List { json } => {
            let themes = store.list();
            if json {
                println!("{}", serde_json::to_string_pretty(&themes)?);
            } else {
                for theme in themes {
                    let marker = if theme.active { "*" } else { " " };
                    let origin = if theme.builtin { "builtin" } else { "user" };
                    println!(
                        "{marker} {:<16} {:<24} {:<5} {origin}",
                        theme.id,
                        theme.name,
                        theme.theme_type.as_str()
                    );
                }
            }
        }
        Command::Show { id } => {
            let theme = found(store.get(&id), &id)?;
            let mut scope = MemoryScope::new();
            apply_to_scope(&mut scope, theme.colors(), ApplyOptions::clearing());
            print!("{}", scope.to_css());
        }
        Command::Use { id } => match store.set_theme(&id) {
            Activation::Applied { id } => println!("Applied '{id}'"),
            Activation::FellBack { requested, id } => {
                println!("Theme '{requested}' not found, using '{id}'");
            }
            Activation::Unavailable { requested } => {
                bail!("Theme '{requested}' not found and no default theme is registered")
            }
        },
        Command::Export { id, output } => {
            let json = store.export_theme(&id)?;
            match output {
                Some(path) => {
                    fs::write(&path, json + "\n")
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    println!("Exported '{id}' to {}", path.display());
                }
                None => println!("{json}"),
            }
        }
        Command::Import { file } => {
            let text = fs::read_to_string(&file)
                .with_context(|| format!("failed to read {}", file.display()))?;
            let id = store.import_theme(&text)?;
            println!("Imported '{id}'");
        }
        Command::Delete { id } => {
            store.delete_theme(&id)?;
            println!("Deleted '{id}'");
        }
        Command::Duplicate { source, name } => {
            let id = store.duplicate_theme(&source, &name)?;
            println!("Created '{id}' from '{source}'");
        }
        Command::Restore { id } => {
            store.restore_theme(&id)?;
            println!("Restored '{id}'");
        }
        Command::Editor { id } => {
            let theme = found(store.get(&id), &id)?;
            println!("{}", serde_json::to_string_pretty(&build_editor_theme(theme))?);
        }
        Command::Derive { .. } | Command::Config => {}
    }

    Ok(())
}
