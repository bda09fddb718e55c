//! Generate static files

use anyhow::Result;
use notify_debouncer_mini::{new_debouncer, notify::RecursiveMode};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::content::loader::ContentLoader;
use crate::generator::Generator;
use crate::Folio;

/// Load, validate and render the whole site
pub fn run(folio: &Folio) -> Result<()> {
    let start = Instant::now();

    let articles = ContentLoader::new(folio).load_articles()?;
    let drafts = articles.iter().filter(|a| a.draft).count();
    tracing::info!("Loaded {} articles ({} drafts)", articles.len(), drafts);

    let generator = Generator::new(folio)?;
    generator.generate(&articles)?;

    tracing::info!("Generated in {:.2}s", start.elapsed().as_secs_f64());
    Ok(())
}

/// Re-open the site, picking up config changes, and generate it
pub fn regenerate(base_dir: &Path) -> Result<()> {
    let folio = Folio::new(base_dir)?;
    run(&folio)
}

/// Watch for file changes and regenerate until interrupted
pub async fn watch(folio: &Folio) -> Result<()> {
    let folio = folio.clone();
    tokio::task::spawn_blocking(move || {
        watch_blocking(&folio, |changed| {
            for path in changed {
                tracing::info!("File changed: {}", path.display());
            }
            if let Err(e) = regenerate(&folio.base_dir) {
                tracing::error!("Generation failed: {:#}", e);
            }
        })
    })
    .await?
}

/// Block the current thread and call `on_change` for each debounced batch
/// of relevant changes
pub fn watch_blocking<F>(folio: &Folio, mut on_change: F) -> Result<()>
where
    F: FnMut(&[PathBuf]),
{
    let (tx, rx) = std::sync::mpsc::channel();
    let mut debouncer = new_debouncer(Duration::from_millis(500), tx)?;

    let targets = [
        (folio.source_dir.clone(), RecursiveMode::Recursive),
        (folio.languages_dir(), RecursiveMode::Recursive),
        (folio.base_dir.join("_config.yml"), RecursiveMode::NonRecursive),
    ];
    for (path, mode) in targets {
        if path.exists() {
            debouncer.watcher().watch(&path, mode)?;
            tracing::debug!("Watching: {:?}", path);
        }
    }

    tracing::info!("Watching for changes. Press Ctrl+C to stop.");

    for result in rx {
        match result {
            Ok(events) => {
                let changed: Vec<PathBuf> = events
                    .into_iter()
                    .map(|e| e.path)
                    .filter(|p| is_relevant(p))
                    .collect();
                if !changed.is_empty() {
                    on_change(&changed);
                }
            }
            Err(e) => tracing::error!("Watch error: {:?}", e),
        }
    }

    Ok(())
}

/// Editor droppings and VCS internals never trigger a rebuild
fn is_relevant(path: &Path) -> bool {
    if path.components().any(|c| c.as_os_str() == ".git") {
        return false;
    }
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy())
        .unwrap_or_default();
    name != ".DS_Store" && !name.ends_with('~') && !name.ends_with(".swp")
}
