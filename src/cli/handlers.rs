//! Subcommand handlers
//!
//! Each handler returns the process exit code: 0 on success, 1 on runtime
//! failure, 2 on configuration errors.

use crate::cache::SnapshotCache;
use crate::cli::commands::{GenerateArgs, InferArgs, SourceArgs, WatchArgs};
use crate::config::{ConfigError, TypegenConfig};
use crate::declaration::TypeTemplate;
use crate::infer::{interface_body, MessageTree};
use crate::lifecycle::{LifecycleHooks, RELOAD_EVENT};
use crate::render::{RenderTrigger, TemplateWriter};
use crate::session::{prepare_type_generation, PreparedSession};
use crate::source::{FileMergedOptionsSource, HttpMergedOptionsSource, MergedOptionsSource};
use crate::watch::{discover_locale_files, spawn_fs_feed, WatchedPathSet};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

/// Failures surfaced to the command line
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to watch {path}: {source}")]
    Watch {
        path: String,
        #[source]
        source: notify::Error,
    },
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Config(_) => 2,
            CliError::Watch { .. } => 1,
        }
    }
}

/// Maps an error chain onto an exit code
pub fn exit_code_for(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<CliError>() {
        Some(cli_err) => cli_err.exit_code(),
        None if err.downcast_ref::<ConfigError>().is_some() => 2,
        None => 1,
    }
}

fn report(err: anyhow::Error) -> i32 {
    error!("{:#}", err);
    eprintln!("Error: {:#}", err);
    exit_code_for(&err)
}

/// Loads configuration from the environment and applies flag overrides
pub fn load_config(overrides: &SourceArgs) -> Result<TypegenConfig, CliError> {
    let mut config = TypegenConfig::from_env()?;
    if let Some(url) = &overrides.dev_server_url {
        config.dev_server_url = url.clone();
    }
    if let Some(out_dir) = &overrides.out_dir {
        config.out_dir = out_dir.clone();
    }
    config.validate()?;
    debug!(config = %config, "Configuration loaded");
    Ok(config)
}

pub async fn handle_infer(args: &InferArgs) -> i32 {
    match infer_file(&args.file).await {
        Ok(body) => {
            println!("{}", body);
            0
        }
        Err(err) => report(err),
    }
}

async fn infer_file(path: &Path) -> Result<String> {
    let contents = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let tree: MessageTree = serde_json::from_slice(&contents)
        .with_context(|| format!("{} is not valid JSON", path.display()))?;
    debug!(nodes = tree.node_count(), "Parsed message tree");
    Ok(interface_body(&tree))
}

pub async fn handle_generate(args: &GenerateArgs, quiet: bool) -> i32 {
    match generate(args).await {
        Ok(Some(path)) => {
            if !quiet {
                println!("{}", path.display());
            }
            0
        }
        Ok(None) => 0,
        Err(err) => report(err),
    }
}

async fn generate(args: &GenerateArgs) -> Result<Option<PathBuf>> {
    let config = load_config(&args.source)?;
    if !config.typed_options_and_messages {
        warn!("Type generation disabled by I18N_TYPEGEN_TYPED_OPTIONS");
        return Ok(None);
    }

    let source: Arc<dyn MergedOptionsSource> = match &args.from_file {
        Some(path) => Arc::new(FileMergedOptionsSource::new(path)),
        None => Arc::new(HttpMergedOptionsSource::new(
            &config.dev_server_url,
            config.request_timeout(),
        )?),
    };

    let options = source
        .fetch_merged_options()
        .await
        .with_context(|| format!("Failed to fetch merged options from {}", source.name()))?;

    let cache = SnapshotCache::new();
    cache.store(options);
    let writer = TemplateWriter::new(TypeTemplate::new(cache), &config.out_dir);
    let path = writer.output_path();
    tokio::task::spawn_blocking(move || writer.write())
        .await
        .context("Declaration writer task failed")?
        .with_context(|| format!("Failed to write {}", path.display()))?;

    Ok(Some(path))
}

pub async fn handle_watch(args: &WatchArgs) -> i32 {
    match watch(args).await {
        Ok(()) => 0,
        Err(err) => report(err),
    }
}

async fn watch(args: &WatchArgs) -> Result<()> {
    let config = load_config(&args.source)?;
    let root = args
        .root
        .canonicalize()
        .with_context(|| format!("Project root {} does not exist", args.root.display()))?;

    let locale_files: Vec<PathBuf> = args
        .locale_dirs
        .iter()
        .flat_map(|dir| discover_locale_files(&root.join(dir)))
        .collect();
    if locale_files.is_empty() {
        warn!(root = %root.display(), "No locale files found; only config changes will regenerate");
    }
    let watched = WatchedPathSet::new(&root, &locale_files, &args.config_files);

    let source = Arc::new(HttpMergedOptionsSource::new(
        &config.dev_server_url,
        config.request_timeout(),
    )?);
    let out_dir = root.join(&config.out_dir);

    let Some(session) = prepare_type_generation(&config, source, watched, |template| {
        let writer: Arc<dyn RenderTrigger> =
            Arc::new(TemplateWriter::new(template.clone(), out_dir.clone()));
        writer
    }) else {
        info!(mode = %config.mode, "Type generation disabled for this session");
        return Ok(());
    };
    let PreparedSession { mut coordinator, .. } = session;

    let hooks = LifecycleHooks::new();
    let subscription = coordinator.start(&hooks);

    let (tx, rx) = mpsc::unbounded_channel();
    let watcher = spawn_fs_feed(&root, tx).map_err(|source| CliError::Watch {
        path: root.display().to_string(),
        source,
    })?;

    let ticker = tokio::spawn(emit_reload_ticks(
        hooks,
        Duration::from_secs(args.reload_interval.max(1)),
    ));

    info!(
        root = %root.display(),
        locale_files = locale_files.len(),
        out_dir = %out_dir.display(),
        "Watching for changes"
    );

    tokio::select! {
        state = coordinator.run(subscription, rx) => {
            debug!(?state, "Coordinator stopped");
        }
        signal = tokio::signal::ctrl_c() => {
            signal.context("Failed to listen for interrupt")?;
            info!("Interrupted, stopping");
        }
    }

    ticker.abort();
    drop(watcher);
    Ok(())
}

/// Emits `reload` periodically until nobody listens any more
async fn emit_reload_ticks(hooks: LifecycleHooks, period: Duration) {
    let mut interval = tokio::time::interval(period);
    loop {
        interval.tick().await;
        if hooks.emit(RELOAD_EVENT) == 0 {
            debug!("Reload signals no longer observed");
            break;
        }
    }
}
