use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use trendwatch::report;
use trendwatch::services::{reanalyze, AnalysisPipeline, CsvStore};
use trendwatch::{Config, ProviderRegistry, Result};

#[derive(Parser)]
#[command(name = "trendwatch")]
#[command(about = "Sampled price trend analysis", version, arg_required_else_help = true)]
#[command(
    after_help = "Examples:\n  trendwatch analyze --symbol BTCUSDT --period 10min --samples 3 --periods 5\n  trendwatch analyze --provider yahoo --symbol AAPL --period 1hora\n  trendwatch list\n  trendwatch reanalyze 2025-01-01_00-20-00.csv\n"
)]
struct Cli {
    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Subcommand)]
enum CliCommand {
    /// Sample prices over past periods and classify the trend.
    Analyze {
        #[arg(long)]
        symbol: Option<String>,
        /// Period length, e.g. 10min, 1hora, 2dia, 1semana.
        #[arg(long)]
        period: Option<String>,
        /// Sample queries per period.
        #[arg(long)]
        samples: Option<usize>,
        /// Number of periods to look back.
        #[arg(long)]
        periods: Option<usize>,
        /// Price provider: binance, yahoo or mock.
        #[arg(long)]
        provider: Option<String>,
        #[arg(long)]
        data_dir: Option<PathBuf>,
        /// Print the result as JSON.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Re-run the analysis on a saved CSV.
    Reanalyze {
        /// File path, or a file name inside the data directory.
        path: PathBuf,
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// List saved CSV files, newest first.
    List,
    /// Show the active configuration.
    Config,
}

#[tokio::main]
async fn main() {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "trendwatch=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    if let Err(err) = run(cli.command, Config::from_env()).await {
        eprintln!("error: {}", err);
        std::process::exit(if err.is_input_error() { 2 } else { 1 });
    }
}

async fn run(command: CliCommand, mut config: Config) -> Result<()> {
    match command {
        CliCommand::Analyze {
            symbol,
            period,
            samples,
            periods,
            provider,
            data_dir,
            json,
        } => {
            if let Some(symbol) = symbol {
                config.symbol = symbol;
            }
            if let Some(period) = period {
                config.period = period;
            }
            if let Some(samples) = samples {
                config.samples_per_period = samples;
            }
            if let Some(periods) = periods {
                config.period_count = periods;
            }
            if let Some(provider) = provider {
                config.provider = provider;
            }
            if let Some(data_dir) = data_dir {
                config.data_dir = data_dir;
            }

            config.validate()?;
            let provider = ProviderRegistry::with_defaults(&config).resolve(&config.provider)?;
            let store = Arc::new(CsvStore::new(&config.data_dir));
            let pipeline = AnalysisPipeline::new(config, provider, store)?;

            info!(
                "Analyzing {} over {} periods of {}",
                pipeline.config().symbol,
                pipeline.config().period_count,
                pipeline.config().period
            );
            let run = pipeline.run().await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&run.result)?);
            } else {
                println!("{}", report::render_run(&run));
            }
        }
        CliCommand::Reanalyze { path, json } => {
            let store = CsvStore::new(&config.data_dir);
            let path = if path.exists() {
                path
            } else {
                store.path_of(&path.to_string_lossy())
            };

            let result = reanalyze(&store, &path)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                println!("{}", report::render_result(&result));
            }
        }
        CliCommand::List => {
            let store = CsvStore::new(&config.data_dir);
            println!("{}", report::render_file_list(&store.list()?));
        }
        CliCommand::Config => {
            println!("{}", report::render_table(&config.summary()));
        }
    }

    Ok(())
}
