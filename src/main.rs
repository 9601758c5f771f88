use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use colorgorical::api;
use colorgorical::assets::AssetLoader;
use colorgorical::models::{self, AppConfig, ColorInput, Palette, PaletteReport};
use colorgorical::server;
use colorgorical::services::{format_rows, parse_rows, ScoringService};
use colorgorical_scores::{TableLoader, GRID_CELLS, PAIR_WIDTH, PENALTY_WIDTH};

#[derive(Parser)]
#[command(name = "colorgorical")]
#[command(about = "Colorgorical - perceptual, name and preference scores for color palettes")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Score a palette
    Score {
        /// Colors as "L,a,b" or sRGB ("#e41a1c", "#f00", "rgb(228,26,28)")
        #[arg(required = true)]
        colors: Vec<ColorInput>,

        /// Print the full report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Run the pair kernel over a file of "L1,a1,b1,L2,a2,b2" rows
    Pairs {
        /// Input file
        #[arg(short, long)]
        input: PathBuf,
    },
    /// Run the region penalty kernel over a file of "L,a,b" rows
    Penalty {
        /// Input file
        #[arg(short, long)]
        input: PathBuf,
    },
    /// Load and validate the score tables
    Tables,
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Colorgorical API",
        description = "Perceptual, name and preference scores for color palettes",
        version = "0.1.0",
        license(name = "MIT")
    ),
    paths(
        api::handle_score,
        api::handle_batch_pairs,
        api::handle_batch_penalty,
    ),
    components(schemas(
        api::ScoreRequest,
        api::ScoreResponse,
        api::PairBatchRequest,
        api::PenaltyBatchRequest,
        api::BatchResponse,
        models::WeightOverrides,
        models::PaletteReport,
        models::ColorReport,
        models::PairScores,
        models::MinScores,
        models::NormalizedScores,
    )),
    tags(
        (name = "Scoring", description = "Palette scoring"),
        (name = "Batch", description = "Raw pair and penalty kernels")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Serve) => run_server().await,
        Some(Commands::Score { colors, json }) => {
            init_cli_tracing();
            run_score_command(&colors, json)
        }
        Some(Commands::Pairs { input }) => {
            init_cli_tracing();
            run_batch_command::<PAIR_WIDTH>(&input, |scoring, rows| scoring.score_pair_rows(rows))
        }
        Some(Commands::Penalty { input }) => {
            init_cli_tracing();
            run_batch_command::<PENALTY_WIDTH>(&input, |scoring, rows| {
                scoring.score_penalty_rows(rows)
            })
        }
        Some(Commands::Tables) => {
            init_cli_tracing();
            run_tables_command()
        }
        None => {
            run_status_command();
            Ok(())
        }
    }
}

/// Minimal logging for CLI commands
fn init_cli_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "colorgorical=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();
}

/// Load config from `CONFIG_FILE` (or the embedded default) and apply env overrides
fn load_config() -> anyhow::Result<AppConfig> {
    let loader = AssetLoader::from_env();
    if let Err(e) = loader.seed_if_configured() {
        tracing::warn!(%e, "Failed to seed config file");
    }
    Ok(AppConfig::load_from_assets(&loader)?.with_env_overrides())
}

fn load_scoring(config: &AppConfig) -> anyhow::Result<ScoringService> {
    ScoringService::load(&config.data_dir, config.parallel_threshold).map_err(|e| {
        anyhow::anyhow!(
            "Failed to load score tables from {}: {e}",
            config.data_dir.display()
        )
    })
}

/// Score a palette given on the command line
fn run_score_command(colors: &[ColorInput], json: bool) -> anyhow::Result<()> {
    let config = load_config()?;
    let palette = Palette::from_inputs(colors)?;
    let scoring = load_scoring(&config)?;
    let report = scoring.score_palette(&palette, &config.weights)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }
    Ok(())
}

fn print_report(report: &PaletteReport) {
    println!("Colors:");
    for (i, color) in report.colors.iter().enumerate() {
        let [l, a, b] = color.lab;
        println!(
            "  {i:>2}  {:<16} Lab({l:>4}, {a:>4}, {b:>4})  {}  nu={:.4}  penalty={:.2}",
            color.input.to_string(),
            color.hex,
            color.name_uniqueness,
            color.penalty
        );
    }

    if report.pairs.is_empty() {
        println!("\nFewer than two colors, no pairs to score.");
        return;
    }

    println!("\nPairs:");
    for pair in &report.pairs {
        let [i, j] = pair.pair;
        println!(
            "  {i:>2}-{j:<2}  de={:>8.3}  nd={:.4}  pp={:>8.3}",
            pair.de, pair.nd, pair.pp
        );
    }

    let min = report.min_scores;
    println!("\nWeighted minima:");
    println!("  de = {:.4}", min.de);
    println!("  nd = {:.4}", min.nd);
    println!("  pp = {:.4}", min.pp);
    println!("  nu = {:.4}", min.nu);
    if let Some(normalized) = report.normalized {
        println!(
            "\nNormalized: distance = {:.4}, preference = {:.4}",
            normalized.distance, normalized.preference
        );
    }
}

/// Run a batch kernel over a file and write CSV to stdout
fn run_batch_command<const W: usize>(
    input: &Path,
    kernel: impl Fn(
        &ScoringService,
        &[[f64; W]],
    ) -> Result<Vec<[f64; W]>, colorgorical_scores::BatchError>,
) -> anyhow::Result<()> {
    let text = std::fs::read_to_string(input)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {e}", input.display()))?;
    let rows = parse_rows::<W>(&text)?;

    let config = load_config()?;
    let scoring = load_scoring(&config)?;
    let scored = kernel(&scoring, &rows)?;

    tracing::info!(rows = scored.len(), "Batch scored");
    print!("{}", format_rows(&scored));
    Ok(())
}

/// Load the score tables and print their sizes
fn run_tables_command() -> anyhow::Result<()> {
    let config = load_config()?;
    let scoring = load_scoring(&config)?;
    let tables = scoring.tables();

    println!("Tables in {}:", config.data_dir.display());
    for name in TableLoader::file_names() {
        println!("  {name}");
    }
    println!("\nGrid cells:    {GRID_CELLS}");
    println!("Named colors:  {}", tables.names());
    println!("\nAll tables valid.");
    Ok(())
}

/// Display status and configuration information
fn run_status_command() {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    // Read environment variables
    let bind_addr = std::env::var("BIND_ADDR").ok();
    let config_file = std::env::var("CONFIG_FILE").ok();
    let data_dir = std::env::var("DATA_DIR").ok();

    // Header
    println!("Colorgorical v{VERSION}");
    println!("Perceptual, name and preference scores for color palettes\n");

    // Environment variables section
    println!("Environment Variables:");
    println!(
        "  BIND_ADDR   = {}",
        bind_addr.as_deref().unwrap_or("0.0.0.0:3000 (default)")
    );
    println!(
        "  CONFIG_FILE = {}",
        config_file.as_deref().unwrap_or("(not set)")
    );
    println!(
        "  DATA_DIR    = {}",
        data_dir.as_deref().unwrap_or("(not set)")
    );

    let loader = AssetLoader::from_env();
    println!("\nConfig:  {}", loader.config_source());

    match AppConfig::load_from_assets(&loader) {
        Ok(config) => {
            let config = config.with_env_overrides();
            let present = TableLoader::file_names()
                .iter()
                .filter(|name| config.data_dir.join(name).exists())
                .count();
            println!(
                "Tables:  {} ({present}/{} files present)",
                config.data_dir.display(),
                TableLoader::file_names().len()
            );
        }
        Err(e) => println!("Config error: {e}"),
    }

    // Commands section
    println!("\nCommands:");
    println!("  colorgorical serve     Start the HTTP server");
    println!("  colorgorical score     Score a palette");
    println!("  colorgorical pairs     Run the pair kernel over a file");
    println!("  colorgorical penalty   Run the penalty kernel over a file");
    println!("  colorgorical tables    Validate the score tables");
    println!("\nRun 'colorgorical --help' for more details.");
}

/// Run the HTTP server
async fn run_server() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "colorgorical=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

    let loader = AssetLoader::from_env();
    tracing::info!(config = %loader.config_source(), "Config source");
    match loader.seed_if_configured() {
        Ok(Some(path)) => {
            tracing::info!(path = %path.display(), "Seeded config file");
        }
        Err(e) => {
            tracing::warn!(%e, "Failed to seed config file");
        }
        Ok(None) => {}
    }

    let config = AppConfig::load_from_assets(&loader)?.with_env_overrides();

    // Create application state using shared server module
    let state = server::create_app_state(config)?;

    let app = server::build_router(state)
        // OpenAPI documentation (production only)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "Colorgorical server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
