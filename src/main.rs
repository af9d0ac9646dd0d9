use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::{Path, PathBuf};
use tailgate::catalog::Catalog;
use tailgate::config::Config;
use tailgate::server::{serve, AppState, RngSource};
use tailgate::telemetry::init_tracing;

#[derive(Debug, Parser)]
#[command(name = "tailgate")]
#[command(about = "Game-day drinking call service", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Serve the HTTP API and the game page.
    Serve {
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(long)]
        host: Option<String>,
        #[arg(short, long)]
        port: Option<u16>,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long)]
        catalog: Option<PathBuf>,
        #[arg(long)]
        dry_run: bool,
    },
    /// Print every category with its events and severities.
    Categories {
        #[arg(long)]
        catalog: Option<PathBuf>,
    },
    /// Draw a random event and outcome from a category.
    Event {
        category: String,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long)]
        catalog: Option<PathBuf>,
    },
    /// Draw a random outcome for a severity.
    Outcome {
        severity: String,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long)]
        catalog: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() {
    init_tracing();
    let cli = Cli::parse();

    if let Err(err) = run(cli).await {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Serve {
            config,
            host,
            port,
            seed,
            catalog,
            dry_run,
        } => {
            let mut loaded = match config {
                Some(path) => Config::from_path(&path)?,
                None => Config::default(),
            };
            if let Some(host) = host {
                loaded.server.host = host;
            }
            if let Some(port) = port {
                loaded.server.port = port;
            }
            if seed.is_some() {
                loaded.seed = seed;
            }
            if let Some(path) = catalog {
                loaded.catalog.path = Some(path.to_string_lossy().to_string());
            }

            let addr = loaded.server.socket_addr()?;
            let catalog = load_catalog(loaded.catalog.path.as_deref().map(Path::new))?;
            tracing::info!(
                categories = catalog.categories().count(),
                events = catalog.event_count(),
                severities = catalog.severities().count(),
                seeded = loaded.seed.is_some(),
                "catalog loaded"
            );

            if dry_run {
                println!("{}", toml::to_string_pretty(&loaded)?);
                println!("catalog: {}", serde_json::to_string_pretty(&catalog.list_categories())?);
                return Ok(());
            }

            let state = AppState::new(catalog, RngSource::from_seed(loaded.seed));
            serve(addr, state).await?;
        }
        Commands::Categories { catalog } => {
            let catalog = load_catalog(catalog.as_deref())?;
            println!("{}", serde_json::to_string_pretty(&catalog.list_categories())?);
        }
        Commands::Event {
            category,
            seed,
            catalog,
        } => {
            let catalog = load_catalog(catalog.as_deref())?;
            let mut rng = cli_rng(seed);
            let draw = catalog.random_event(&category, &mut rng)?;
            println!("{}", serde_json::to_string_pretty(&draw)?);
        }
        Commands::Outcome {
            severity,
            seed,
            catalog,
        } => {
            let catalog = load_catalog(catalog.as_deref())?;
            let mut rng = cli_rng(seed);
            let outcome = catalog.random_outcome(&severity, &mut rng)?;
            println!("{}", serde_json::json!({ "outcome": outcome }));
        }
    }

    Ok(())
}

fn load_catalog(path: Option<&Path>) -> Result<Catalog, Box<dyn std::error::Error>> {
    let catalog = match path {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading catalog file");
            Catalog::from_path(path)?
        }
        None => Catalog::builtin()?,
    };
    Ok(catalog)
}

fn cli_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}
