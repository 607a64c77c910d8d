mod logging;
mod render;

use clap::{Parser, Subcommand, ValueEnum};
use hd_core::pipeline::DEFAULT_CLOUD_SIZE;
use hd_core::{run, DashboardConfig, RecordStore, Result, RunOptions, RunOutcome};
use hd_storage::JsonFileStorage;
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(author, version, about = "Health article dashboard", long_about = None)]
pub struct Cli {
    /// JSON config file (topics, stopwords, store URL)
    #[arg(long, env = "HD_CONFIG")]
    config: Option<PathBuf>,
    /// Record store URL, e.g. memory://, json:articles.json, sqlite:articles.db
    #[arg(long, env = "HD_STORE_URL")]
    store: Option<String>,
    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render the dashboard in the terminal
    Report {
        /// Topic keyword, or "all"
        #[arg(short, long, default_value = "all")]
        topic: String,
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
        /// Number of words shown in the word cloud
        #[arg(long, default_value_t = DEFAULT_CLOUD_SIZE)]
        cloud_size: usize,
    },
    /// List the topic selection
    Topics,
    /// Copy a JSON document dump into the configured store
    Import {
        dump: PathBuf,
    },
    /// Serve the dashboard as a JSON API
    Serve {
        #[arg(long, default_value = "127.0.0.1:8080")]
        addr: String,
    },
}

fn load_config(cli: &Cli) -> Result<DashboardConfig> {
    let config = match &cli.config {
        Some(path) => {
            info!("⚙️ Loading config from {}", path.display());
            DashboardConfig::load(path)?
        }
        None => DashboardConfig::default(),
    };
    Ok(match &cli.store {
        Some(url) => config.with_store_url(url),
        None => config,
    })
}

async fn report(config: &DashboardConfig, topic: &str, format: OutputFormat, cloud_size: usize) -> Result<()> {
    let options = RunOptions {
        topic: config.parse_topic(topic),
        cleaner: config.cleaner(),
        cloud_size,
    };

    // The store lives for this run only
    let outcome = {
        let store = hd_storage::create_store(&config.store_url).await?;
        run(store.as_ref(), &options).await?
    };

    match (outcome, format) {
        (RunOutcome::Rendered(dashboard), OutputFormat::Text) => {
            print!("{}", render::render_dashboard(&dashboard));
        }
        (RunOutcome::Rendered(dashboard), OutputFormat::Json) => {
            println!("{}", serde_json::to_string_pretty(&dashboard)?);
        }
        (RunOutcome::Halted(notice), OutputFormat::Text) => {
            println!("❌ {}", notice);
        }
        (RunOutcome::Halted(notice), OutputFormat::Json) => {
            println!("{}", serde_json::json!({ "notice": notice.to_string() }));
        }
    }
    Ok(())
}

async fn import(config: &DashboardConfig, dump: PathBuf) -> Result<()> {
    let source = JsonFileStorage::new(dump);
    let records = source.fetch_all().await?;
    if records.is_empty() {
        warn!("No documents found in {}", source.get_path().display());
        return Ok(());
    }

    let target = hd_storage::create_store(&config.store_url).await?;
    if target.name() == "memory" {
        warn!("Importing into a memory store; records are discarded on exit");
    }
    for record in &records {
        target.store_record(record).await?;
    }
    info!("📦 Imported {} records into {} store", records.len(), target.name());
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    let config = load_config(&cli)?;

    match cli.command {
        Commands::Report { topic, format, cloud_size } => {
            report(&config, &topic, format, cloud_size).await?;
        }
        Commands::Topics => {
            for topic in config.topic_choices() {
                println!("{}", topic);
            }
        }
        Commands::Import { dump } => {
            import(&config, dump).await?;
        }
        Commands::Serve { addr } => {
            hd_web::serve(hd_web::AppState::new(config), &addr).await?;
        }
    }

    Ok(())
}
