mod app;
mod data;
mod speech;
mod store;
mod ui;

use anyhow::{Context, Result};
use app::App;
use std::path::PathBuf;
use store::JsonFileStore;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vocab_core::{parse_word_list, Level};

const USAGE: &str = "\
magic-word - illustrated vocabulary trainer

USAGE:
    magic-word [OPTIONS]

OPTIONS:
    --data-dir <path>    Directory for persisted progress
    --import <file>      Add a custom level from a JSON array of words
    -h, --help           Show this help";

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args: Vec<String> = std::env::args().collect();
    let mut data_dir: Option<PathBuf> = None;
    let mut import: Option<PathBuf> = None;
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--data-dir" => {
                let value = args.get(i + 1).context("--data-dir requires a path")?;
                data_dir = Some(PathBuf::from(value));
                i += 2;
            }
            "--import" => {
                let value = args.get(i + 1).context("--import requires a file")?;
                import = Some(PathBuf::from(value));
                i += 2;
            }
            "--help" | "-h" => {
                println!("{USAGE}");
                return Ok(());
            }
            other => anyhow::bail!("unrecognized argument '{other}' (try --help)"),
        }
    }

    let mut dict = data::bundled_dictionary()?;
    if let Some(path) = import {
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        match parse_word_list(&content) {
            Ok(words) => {
                tracing::info!(count = words.len(), "imported custom word list");
                dict.add_level(Level::from_words("custom", "Custom list", words))?;
            }
            // A bad word list is rejected with a message; the bundled
            // levels are unaffected.
            Err(err) => println!("Import rejected: {err}"),
        }
    }

    let store = JsonFileStore::open(data_dir.unwrap_or_else(JsonFileStore::default_dir))?;
    App::new(dict, store).run()
}
