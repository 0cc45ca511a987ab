use clap::Parser;
use kitx::loader::{load_catalog_file, load_config_file, parse_profile, parse_weights};
use kitx::{EngineConfig, RecommendRequest, RecommendationEngine, VarietyOptions};
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

/// Pick the best accessory combination for a preference profile
#[derive(Parser, Debug)]
#[command(name = "kitx")]
#[command(about = "Pick the best accessory combination for a profile", long_about = None)]
struct Args {
    /// Catalog JSON file (array of records, or {"axes": [...], "items": [...]})
    #[arg(short, long)]
    catalog: PathBuf,

    /// Profile as comma-separated numbers, one per feature axis
    #[arg(short, long, allow_hyphen_values = true)]
    profile: String,

    /// Categories to fill, in order
    #[arg(long, value_delimiter = ',', default_value = "Head,Torso,Face")]
    categories: Vec<String>,

    /// Engine configuration JSON file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Shortlist size per category
    #[arg(long)]
    top_n: Option<usize>,

    /// Four comma-separated score weights: global, error, min-sim, min-corr
    #[arg(long)]
    weights: Option<String>,

    /// Refuse searches with more combinations than this
    #[arg(long)]
    max_combinations: Option<u64>,

    /// Draw from this many top combinations instead of always taking the best
    #[arg(long)]
    variety_pool: Option<usize>,

    /// Seed for --variety-pool
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Include a per-axis comparison in the output
    #[arg(long)]
    explain: bool,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let mut config = match &args.config {
        Some(path) => load_config_file(path)?,
        None => EngineConfig::default(),
    };
    if let Some(top_n) = args.top_n {
        config.top_n = top_n;
    }
    if let Some(weights) = &args.weights {
        config.weights = parse_weights(weights)?;
    }
    if let Some(limit) = args.max_combinations {
        config.max_combinations = Some(limit);
    }

    let engine = RecommendationEngine::new(config)?;
    let catalog = load_catalog_file(&args.catalog)?;
    info!("Catalog: {:?}", args.catalog);

    let profile = parse_profile(&args.profile)?;
    let request = RecommendRequest::new(args.categories.iter().map(|c| c.trim()));

    let scored = match args.variety_pool {
        Some(pool) => {
            engine.recommend_varied(&catalog, &profile, &request, VarietyOptions::new(pool, args.seed))?
        }
        None => engine.recommend(&catalog, &profile, &request)?,
    };

    for (category, identifier) in scored.combination.pairs() {
        info!("{}: {}", category, identifier);
    }
    info!("Score: {}", scored.score);

    let output = if args.explain {
        let axes = engine.explain(&catalog, &profile, &scored)?;
        serde_json::json!({ "recommendation": scored, "axes": axes })
    } else {
        serde_json::to_value(&scored)?
    };
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}
