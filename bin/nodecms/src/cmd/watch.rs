//! Watch command - development server with live reload
//!
//! One rebuild task owns every build: it runs the initial full build, then
//! handles file changes one batch at a time. Changes that arrive while a
//! build runs are queued and merged into the next batch, so builds never
//! overlap.

use std::{
    collections::BTreeSet,
    path::{Path, PathBuf},
    sync::Arc,
    time::{Duration, Instant},
};

use color_eyre::eyre::{Result, WrapErr};
use nodecms_core::Config;
use nodecms_generator::{BuildReport, Builder};
use notify::{
    EventKind, RecommendedWatcher, RecursiveMode, Watcher,
    event::{MetadataKind, ModifyKind},
};
use tokio::{net::TcpListener, sync::mpsc};

use super::{build::print_report, load_config};
use crate::server::{ServerState, create_router};

/// Quiet period used to gather a burst of file events into one batch.
const DEBOUNCE_MS: u64 = 200;

/// Work for one rebuild.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Job {
    /// Rebuild these content files only.
    Pages(Vec<PathBuf>),
    /// Rewrite the stylesheet.
    Stylesheet,
    /// Rebuild the whole site.
    Full,
}

impl Job {
    fn run(&self, builder: &Builder) -> BuildReport {
        let start = Instant::now();
        let mut report = match self {
            Self::Full => builder.build_report(),
            Self::Pages(paths) => {
                let mut report = BuildReport::default();
                for path in paths {
                    match builder.build_file(path) {
                        Ok(output) => report.outputs.push(output),
                        Err(e) => report.errors.push(e),
                    }
                }
                report
            }
            Self::Stylesheet => {
                let mut report = BuildReport::default();
                match builder.write_assets() {
                    Ok(path) => report.assets.push(path),
                    Err(e) => report.errors.push(e),
                }
                report
            }
        };
        report.duration_ms = start.elapsed().as_millis() as u64;
        report
    }
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

fn is_within(path: &Path, dir: &Path) -> bool {
    if path.starts_with(dir) {
        return true;
    }
    match (path.canonicalize(), dir.canonicalize()) {
        (Ok(path), Ok(dir)) => path.starts_with(dir),
        // Removed files cannot be canonicalized; compare their parent.
        (Err(_), Ok(dir)) => path
            .parent()
            .and_then(|p| p.canonicalize().ok())
            .is_some_and(|p| p.starts_with(dir)),
        _ => false,
    }
}

/// Decide what a batch of changed paths requires.
fn plan(builder: &Builder, paths: impl IntoIterator<Item = PathBuf>) -> Option<Job> {
    let config = builder.config();
    let stylesheet_source = config.build.stylesheet_source.as_deref().map(Path::new);
    let collections_dir = config.collections_dir();

    let mut pages = BTreeSet::new();
    let mut stylesheet = false;

    for path in paths {
        if stylesheet_source.is_some_and(|source| same_file(&path, source)) {
            stylesheet = true;
        } else if !config.collections.names.is_empty() && is_within(&path, &collections_dir) {
            return Some(Job::Full);
        } else if builder.matches(&path) {
            if path.is_file() {
                pages.insert(path);
            } else {
                tracing::debug!(path = %path.display(), "Ignoring removed content file");
            }
        }
    }

    match (pages.is_empty(), stylesheet) {
        (true, false) => None,
        (true, true) => Some(Job::Stylesheet),
        (false, false) => Some(Job::Pages(pages.into_iter().collect())),
        (false, true) => Some(Job::Full),
    }
}

fn is_relevant(kind: &EventKind) -> bool {
    match kind {
        EventKind::Create(_) | EventKind::Remove(_) => true,
        EventKind::Modify(ModifyKind::Metadata(MetadataKind::AccessTime)) => false,
        EventKind::Modify(_) => true,
        _ => false,
    }
}

/// Run one job off the async runtime and report the outcome. Returns
/// whether the build succeeded.
async fn execute(builder: &Arc<Builder>, state: &ServerState, job: Job) -> bool {
    let worker = Arc::clone(builder);
    let task = job.clone();
    let report = match tokio::task::spawn_blocking(move || task.run(&worker)).await {
        Ok(report) => report,
        Err(e) => {
            tracing::error!("Rebuild task failed: {e}");
            eprintln!("  ✗ Rebuild failed: {e}");
            return false;
        }
    };

    if report.is_success() {
        println!(
            "  ✓ Rebuilt {} page(s) in {}ms",
            report.outputs.len(),
            report.duration_ms
        );
        match job {
            Job::Stylesheet => state.notify_css_reload(),
            _ => state.notify_reload(),
        }
        true
    } else {
        eprintln!("  ✗ Rebuild failed with {} error(s)", report.errors.len());
        for err in &report.errors {
            tracing::error!("{}", err.report());
        }
        false
    }
}

/// Own the build queue: initial build, then one batch of changes at a time.
async fn rebuild_loop(
    builder: Arc<Builder>,
    state: Arc<ServerState>,
    mut rx: mpsc::Receiver<Vec<PathBuf>>,
) {
    tracing::info!("Running initial build...");
    let worker = Arc::clone(&builder);
    match tokio::task::spawn_blocking(move || worker.build_report()).await {
        Ok(report) => {
            print_report(&report);
            for err in &report.errors {
                tracing::error!("{}", err.report());
            }
        }
        Err(e) => tracing::error!("Initial build task failed: {e}"),
    }

    while let Some(paths) = rx.recv().await {
        tokio::time::sleep(Duration::from_millis(DEBOUNCE_MS)).await;

        let mut batch: BTreeSet<PathBuf> = paths.into_iter().collect();
        while let Ok(more) = rx.try_recv() {
            batch.extend(more);
        }

        let Some(job) = plan(&builder, batch) else {
            continue;
        };

        println!();
        println!("  File change detected, rebuilding...");
        tracing::debug!(?job, "Rebuilding");
        execute(&builder, &state, job).await;
    }
}

fn watch_path(watcher: &mut RecommendedWatcher, path: &Path, mode: RecursiveMode) -> Result<()> {
    if path.exists() {
        watcher
            .watch(path, mode)
            .wrap_err_with(|| format!("Failed to watch {}", path.display()))?;
        tracing::debug!(path = %path.display(), "Watching");
    }
    Ok(())
}

/// Run the watch command.
///
/// Starts a development server with live reload support.
pub async fn run(
    config_path: &Path,
    host: Option<&str>,
    port: Option<u16>,
    open_browser: bool,
) -> Result<()> {
    tracing::info!(?config_path, ?host, ?port, "Starting watch mode");

    let mut config: Config = load_config(config_path)?;
    if let Some(host) = host {
        config.server.host = host.to_string();
    }
    if let Some(port) = port {
        config.server.port = port;
    }

    let output_dir = config.output_dir();
    let content_dir = config.content_dir();
    let collections_dir = config.collections_dir();
    let stylesheet_source = config.build.stylesheet_source.clone().map(PathBuf::from);
    let addr = config.server_addr();

    let builder = Arc::new(Builder::from_config(config).with_live_reload(true));
    let state = Arc::new(ServerState::new(&content_dir, &collections_dir));

    // Setup file watcher
    let (tx, rx) = mpsc::channel::<Vec<PathBuf>>(64);
    let mut watcher = RecommendedWatcher::new(
        move |res: Result<notify::Event, notify::Error>| match res {
            Ok(event) if is_relevant(&event.kind) => {
                let _ = tx.blocking_send(event.paths);
            }
            Ok(_) => {}
            Err(e) => tracing::warn!("Watch error: {e}"),
        },
        notify::Config::default(),
    )
    .wrap_err("Failed to create file watcher")?;

    watch_path(&mut watcher, &content_dir, RecursiveMode::Recursive)?;
    watch_path(&mut watcher, &collections_dir, RecursiveMode::Recursive)?;
    if let Some(source) = &stylesheet_source {
        watch_path(&mut watcher, source, RecursiveMode::NonRecursive)?;
    }

    tokio::spawn(rebuild_loop(Arc::clone(&builder), Arc::clone(&state), rx));

    // Start server
    let app = create_router(&output_dir, state);
    let listener = TcpListener::bind(&addr)
        .await
        .wrap_err_with(|| format!("Failed to bind to {addr}"))?;

    println!();
    println!("  Dev server running at http://{addr}");
    println!("  Press Ctrl+C to stop");
    println!();

    if open_browser && let Err(e) = open::that(format!("http://{addr}")) {
        tracing::warn!("Failed to open browser: {e}");
    }

    // Keep watcher alive
    let _watcher = watcher;

    axum::serve(listener, app).await.wrap_err("Server error")?;

    Ok(())
}
