//! marksort - AI-assisted bookmark organizer
//!
//! Main entry point for the marksort CLI.

mod cli;

use std::collections::HashSet;
use std::io::Write;
use std::path::Path;

use clap::Parser;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use marksort_classify::{Classifier, ClassifierConfig};
use marksort_config::{Config, ConfigLoader};
use marksort_core::{codec, persist, BookmarkStore, FileBlobStore, ImportError, ALL_BOOKMARKS};
use marksort_organizer::{run_organize, OrganizeEvent, OrganizeOptions, OrganizeOutcome};

use cli::{confirm, CategoryAction, Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("marksort=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Cli::parse();
    let config = ConfigLoader::load(&args.config)?;

    let data_dir = ConfigLoader::expand_path(&config.storage.data_dir);
    let blobs = FileBlobStore::new(&data_dir).await?;

    // Malformed or missing persisted state never blocks startup.
    let mut store = persist::load_snapshot(&blobs).await.into_store();
    debug!("Loaded {} bookmarks from {}", store.len(), data_dir);

    let mutated = match args.command {
        Commands::Import { file } => cmd_import(&mut store, &file)?,
        Commands::Export { output } => cmd_export(&store, &output)?,
        Commands::List { category, search } => cmd_list(&store, category, search),
        Commands::Organize => cmd_organize(&mut store, &config).await,
        Commands::Category { action } => cmd_category(&mut store, action),
        Commands::Delete { ids, yes } => cmd_delete(&mut store, ids, yes),
        Commands::Move { target, ids } => cmd_move(&mut store, target, ids),
    };

    if mutated {
        persist::save_snapshot(&blobs, &store).await?;
    }
    Ok(())
}

fn cmd_import(store: &mut BookmarkStore, file: &Path) -> anyhow::Result<bool> {
    let is_html = file
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("html") || ext.eq_ignore_ascii_case("htm"));
    if !is_html {
        return Err(ImportError::NotHtml(file.display().to_string()).into());
    }

    let content = std::fs::read_to_string(file).map_err(ImportError::Io)?;
    let parsed = codec::parse(&content);
    if parsed.is_empty() {
        return Err(ImportError::NoBookmarks.into());
    }

    let total = parsed.len();
    let imported = store.import(parsed);
    println!(
        "Imported {} bookmarks ({} duplicates skipped, {} total)",
        imported,
        total - imported,
        store.len()
    );
    Ok(true)
}

fn cmd_export(store: &BookmarkStore, output: &Path) -> anyhow::Result<bool> {
    let html = codec::generate(store.bookmarks());
    std::fs::write(output, html)?;
    println!("Exported {} bookmarks to {}", store.len(), output.display());
    Ok(false)
}

fn cmd_list(store: &BookmarkStore, category: Option<String>, search: Option<String>) -> bool {
    let selected = category.as_deref().unwrap_or(ALL_BOOKMARKS);
    let query = search.as_deref().unwrap_or("");
    let bookmarks = store.filtered(selected, query);

    for b in &bookmarks {
        println!("{}  [{}]  {}  {}", b.id, b.category, b.title, b.url);
    }
    println!("{} of {} bookmarks", bookmarks.len(), store.len());

    let categories = store.categories();
    if !categories.is_empty() {
        let counts = store.counts();
        let summary: Vec<String> = categories
            .iter()
            .map(|c| format!("{} ({})", c, counts.get(c).copied().unwrap_or(0)))
            .collect();
        println!("Categories: {}", summary.join(", "));
    }
    false
}

async fn cmd_organize(store: &mut BookmarkStore, config: &Config) -> bool {
    if store.len() == 0 {
        println!("Nothing to organize: the store is empty.");
        return false;
    }

    let settings = &config.classifier;
    let classifier = Classifier::new(ClassifierConfig {
        api_key: settings.api_key.clone(),
        base_url: (!settings.base_url.is_empty()).then(|| settings.base_url.clone()),
        model: (!settings.model.is_empty()).then(|| settings.model.clone()),
    });

    let batch = store.bookmarks().to_vec();
    let classification = classifier.categorize(&batch);

    let outcome = run_organize(store, classification, OrganizeOptions::default(), |event| {
        match event {
            OrganizeEvent::Progress { percent, label } => {
                eprint!("\r[{percent:3}%] {label}          ");
                let _ = std::io::stderr().flush();
            }
            OrganizeEvent::Completed { applied, unmatched, batch } => {
                eprintln!();
                println!("AI organization complete: {applied} of {batch} bookmarks categorized.");
                if unmatched > 0 {
                    warn!("{} classifier tokens matched no bookmark", unmatched);
                }
            }
            OrganizeEvent::Failed { message } => {
                eprintln!();
                eprintln!("{message}");
            }
        }
    })
    .await;

    matches!(outcome, OrganizeOutcome::Applied { .. })
}

fn cmd_category(store: &mut BookmarkStore, action: CategoryAction) -> bool {
    match action {
        CategoryAction::Create { name } => {
            store.create_category(&name);
            println!("Category {name:?} created.");
            true
        }
        CategoryAction::Delete { name, yes } => {
            if !yes
                && !confirm(&format!(
                    "Delete category {name:?}? Its bookmarks become uncategorized."
                ))
            {
                println!("Cancelled.");
                return false;
            }
            store.delete_category(&name);
            println!("Category {name:?} removed.");
            true
        }
    }
}

fn cmd_delete(store: &mut BookmarkStore, ids: Vec<String>, yes: bool) -> bool {
    if ids.is_empty() {
        println!("No ids given.");
        return false;
    }
    if !yes && !confirm(&format!("Delete {} bookmark(s)?", ids.len())) {
        println!("Cancelled.");
        return false;
    }
    let ids: HashSet<String> = ids.into_iter().collect();
    let before = store.len();
    store.delete_many(&ids);
    println!("Deleted {} bookmark(s).", before - store.len());
    true
}

fn cmd_move(store: &mut BookmarkStore, target: String, ids: Vec<String>) -> bool {
    if ids.is_empty() {
        println!("No ids given.");
        return false;
    }
    let ids: HashSet<String> = ids.into_iter().collect();
    store.move_many(&ids, &target);
    println!("Moved {} bookmark(s) to {target:?}.", ids.len());
    true
}
