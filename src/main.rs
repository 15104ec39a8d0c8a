use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing::info;

use markupmatrix::configuration::Configuration;
use markupmatrix::markup::markupcache::MultiThreadedMarkupCache;
use markupmatrix::pricing::partquote::PartQuote;

#[derive(Parser, Debug)]
#[command(name = "markupmatrix")]
#[command(about = "Quote marked-up part prices from the shop markup matrix")]
#[command(version)]
struct Args {
    /// JSON configuration with `markup_matrix` and `price_digits`
    #[arg(short, long, env = "MARKUP_CONFIG")]
    config: Option<PathBuf>,

    /// Quantity quoted for every unit cost
    #[arg(short, long, default_value_t = 1.0)]
    quantity: f64,

    /// Unit costs to quote
    #[arg(required = true)]
    costs: Vec<f64>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => {
            info!("Loading configuration from {}", path.display());
            Configuration::from_reader(path)?
        }
        None => Configuration::default(),
    };
    let store = Arc::new(config.markup_store()?);
    let cache = MultiThreadedMarkupCache::new_threadsafe(store);

    let snapshot = cache.snapshot()?;
    for cost in args.costs.iter() {
        let quote = PartQuote::new(snapshot.table(), *cost, args.quantity, config.price_digits())?;
        println!(
            "{:>10.2} x {:<6} multiplier {:.4}  unit {:>10}  extended {:>10}",
            quote.unit_cost(),
            quote.quantity(),
            quote.multiplier(),
            quote.unit_price().to_string(),
            quote.extended_price().to_string(),
        );
    }
    Ok(())
}
