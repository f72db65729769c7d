use std::path::PathBuf;
use std::time::Instant;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use katalog_core::{AppConfig, BookCardView, Catalog, JsonFileSource, KatalogError};

// ─── CLI Definition ─────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "katalog",
    about = "Library catalog browser — normalized book records from any schema",
    version,
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Output in JSON format (for scripts and front ends).
    /// Also enabled by setting KATALOG_JSON=1.
    #[arg(long, global = true)]
    json: bool,

    /// Catalog file to read instead of the configured one.
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Home screen: totals, featured books and category tiles.
    Home,

    /// Featured books (first N in catalog order).
    Featured {
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Book count per category.
    Categories,

    /// List books, optionally only one category.
    List {
        #[arg(long)]
        category: Option<String>,
        #[arg(long, default_value = "50")]
        limit: usize,
    },

    /// Show a single book by identifier.
    Show { id: String },

    /// Dump every normalized record, including the original fields.
    Normalize,

    /// Config management.
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Show version information.
    Version,
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show all config values.
    List,
    /// Print the config file path.
    Path,
    /// Set a config key and save the config file.
    Set { key: String, value: String },
}

// ─── Main ────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let start = Instant::now();
    let cli = Cli::parse();

    // ── Env var overrides ──────────────────────────────────────────────────
    let json_output = cli.json || std::env::var("KATALOG_JSON").as_deref() == Ok("1");

    let mut config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => fail(&e, json_output, start.elapsed().as_millis()),
    };
    if let Ok(path) = std::env::var("KATALOG_CATALOG_PATH") {
        config.set_catalog_path(path.into());
    }
    if let Some(path) = cli.catalog {
        config.set_catalog_path(path);
    }

    init_logging(&config);

    match cli.command {
        None | Some(Commands::Home) => {
            let catalog = load_catalog(&config, json_output, start);
            let home = catalog.home(&config);
            let dur = start.elapsed().as_millis();

            if json_output {
                print_json(&serde_json::json!({"status":"ok","data":home,"meta":{"duration_ms":dur}}))?;
            } else {
                println!("Total books: {}   Borrowed: {}   History: {}", home.total_books, home.borrowed, home.history);
                println!("\nFeatured:");
                if home.featured.is_empty() {
                    println!("  (catalog is empty)");
                }
                for card in &home.featured {
                    print_card(card);
                }
                println!("\nCategories:");
                for tile in &home.categories {
                    println!("  {:<20} {} books", tile.name, tile.count);
                }
            }
        }

        Some(Commands::Featured { limit }) => {
            let catalog = load_catalog(&config, json_output, start);
            let limit = limit.unwrap_or(config.catalog.featured_limit);
            let cards: Vec<BookCardView> = catalog
                .featured(limit)
                .iter()
                .map(|b| BookCardView::new(b, &config.aliases))
                .collect();
            let dur = start.elapsed().as_millis();

            if json_output {
                print_json(&serde_json::json!({
                    "status": "ok",
                    "data": { "items": cards, "total": catalog.len(), "limit": limit },
                    "meta": { "duration_ms": dur }
                }))?;
            } else if cards.is_empty() {
                println!("No featured books.");
            } else {
                for card in &cards {
                    print_card(card);
                }
            }
        }

        Some(Commands::Categories) => {
            let catalog = load_catalog(&config, json_output, start);
            let counts = catalog.category_counts();
            let dur = start.elapsed().as_millis();

            if json_output {
                print_json(&serde_json::json!({"status":"ok","data":counts,"meta":{"duration_ms":dur}}))?;
            } else if counts.is_empty() {
                println!("No categorized books.");
            } else {
                for (name, count) in &counts {
                    println!("  {name:<20} {count}");
                }
            }
        }

        Some(Commands::List { category, limit }) => {
            let catalog = load_catalog(&config, json_output, start);
            let (books, total) = list_cards(&catalog, category.as_deref(), limit, &config);
            let dur = start.elapsed().as_millis();

            if json_output {
                print_json(&serde_json::json!({
                    "status": "ok",
                    "data": { "items": books, "total": total, "limit": limit, "category": category },
                    "meta": { "duration_ms": dur }
                }))?;
            } else if books.is_empty() {
                match category {
                    Some(name) => println!("No books in category: {name}"),
                    None => println!("No books in catalog."),
                }
            } else {
                for card in &books {
                    print_card(card);
                }
            }
        }

        Some(Commands::Show { id }) => {
            let catalog = load_catalog(&config, json_output, start);
            let dur = start.elapsed().as_millis();
            match catalog.find(&id) {
                Some(book) => {
                    let card = BookCardView::new(book, &config.aliases);
                    if json_output {
                        print_json(&serde_json::json!({"status":"ok","data":card,"meta":{"duration_ms":dur}}))?;
                    } else {
                        println!("{}", serde_json::to_string_pretty(&card)?);
                    }
                }
                None => fail(&KatalogError::BookNotFound(id), json_output, dur),
            }
        }

        Some(Commands::Normalize) => {
            let catalog = load_catalog(&config, json_output, start);
            let dur = start.elapsed().as_millis();
            if json_output {
                print_json(&serde_json::json!({
                    "status": "ok",
                    "data": { "items": catalog.books(), "total": catalog.len() },
                    "meta": { "duration_ms": dur }
                }))?;
            } else {
                println!("{}", serde_json::to_string_pretty(catalog.books())?);
            }
        }

        // ── Config ─────────────────────────────────────────────────────────

        Some(Commands::Config { action }) => match action {
            ConfigAction::List => {
                let dur = start.elapsed().as_millis();
                if json_output {
                    print_json(&serde_json::json!({"status":"ok","data":config,"meta":{"duration_ms":dur}}))?;
                } else {
                    for (key, value) in config_key_values(&config) {
                        println!("{key:<22} {value}");
                    }
                }
            }
            ConfigAction::Set { key, value } => {
                // Start from the file on disk so env and flag overrides are not persisted.
                let mut stored = match AppConfig::load() {
                    Ok(stored) => stored,
                    Err(e) => fail(&e, json_output, start.elapsed().as_millis()),
                };
                if let Err(e) = stored.set_value(&key, &value).and_then(|()| stored.save()) {
                    fail(&e, json_output, start.elapsed().as_millis());
                }
                let dur = start.elapsed().as_millis();
                if json_output {
                    print_json(&serde_json::json!({"status":"ok","data":{"key":key,"value":value},"meta":{"duration_ms":dur}}))?;
                } else {
                    println!("Set {key} = {value}");
                }
            }
            ConfigAction::Path => {
                let path = AppConfig::config_path();
                if json_output {
                    print_json(&serde_json::json!({"status":"ok","data":{"path":path}}))?;
                } else {
                    println!("{}", path.display());
                }
            }
        },

        // ── Version ────────────────────────────────────────────────────────

        Some(Commands::Version) => {
            let version = env!("CARGO_PKG_VERSION");
            let dur = start.elapsed().as_millis();
            if json_output {
                print_json(&serde_json::json!({"status":"ok","data":{"version":version},"meta":{"duration_ms":dur}}))?;
            } else {
                println!("katalog v{version}");
            }
        }
    }

    Ok(())
}

// ─── Helpers ────────────────────────────────────────────────────────────────

/// Logs go to stderr so JSON on stdout stays clean.
/// `KATALOG_LOG` wins over `[log] level`.
fn init_logging(config: &AppConfig) {
    let filter = EnvFilter::try_from_env("KATALOG_LOG")
        .or_else(|_| EnvFilter::try_new(&config.log.level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Load and normalize the configured catalog. A failed load is reported as
/// "catalog unavailable" and ends the process; the core never sees it.
fn load_catalog(config: &AppConfig, json_output: bool, start: Instant) -> Catalog {
    let source = JsonFileSource::new(config.catalog_path());
    match Catalog::load(&source, &config.normalizer()) {
        Ok(catalog) => catalog,
        Err(e) => fail(&e, json_output, start.elapsed().as_millis()),
    }
}

/// Card views for `list`, at most `limit` of them, plus the number of books
/// that matched before truncation.
fn list_cards(
    catalog: &Catalog,
    category: Option<&str>,
    limit: usize,
    config: &AppConfig,
) -> (Vec<BookCardView>, usize) {
    let matched = match category {
        Some(name) => catalog.by_category(name),
        None => catalog.books().iter().collect(),
    };
    let cards = matched
        .iter()
        .take(limit)
        .map(|b| BookCardView::new(b, &config.aliases))
        .collect();
    (cards, matched.len())
}

fn fail(err: &KatalogError, json_output: bool, dur: u128) -> ! {
    tracing::error!(error = %err, "command failed");
    if json_output {
        let envelope = error_envelope(err, dur);
        println!("{}", serde_json::to_string_pretty(&envelope).unwrap_or_default());
    } else {
        eprintln!("{err}");
    }
    std::process::exit(err.exit_code() as i32);
}

fn error_envelope(err: &KatalogError, dur: u128) -> serde_json::Value {
    serde_json::json!({
        "status": "error",
        "error": err.kind(),
        "message": err.to_string(),
        "meta": { "duration_ms": dur }
    })
}

fn print_card(card: &BookCardView) {
    let badge = if card.available {
        format!("[{} available]", card.available_count)
    } else {
        String::new()
    };
    let category = card.category.as_deref().unwrap_or("-");
    println!(
        "  {id:<8}  {title:<40}  {author:<25}  {category:<12}  {badge}",
        id = card.identifier.to_string(),
        title = card.title,
        author = card.author,
    );
}

fn print_json(val: &serde_json::Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(val)?);
    Ok(())
}

fn config_key_values(config: &AppConfig) -> Vec<(&'static str, String)> {
    vec![
        ("config_path", AppConfig::config_path().to_string_lossy().to_string()),
        ("catalog.path", config.catalog.path.clone()),
        ("catalog.featured_limit", config.catalog.featured_limit.to_string()),
        ("display.category_tiles", config.display.category_tiles.join(", ")),
        ("log.level", config.log.level.clone()),
    ]
}
