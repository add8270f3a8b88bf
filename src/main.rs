use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing::error;

use dae_cleaner::acquirer::{self, ReqwestFetch};
use dae_cleaner::config::Config;
use dae_cleaner::logging;
use dae_cleaner::pipeline::Pipeline;

#[derive(Parser)]
#[command(name = "dae_cleaner")]
#[command(about = "Montpellier defibrillator registry cleaning pipeline")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct SourceArgs {
    /// Source URL or local path of the raw registry table
    #[arg(long)]
    url: Option<String>,

    /// Directory the raw download is cached under
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Where the cleaned table is written
    #[arg(long)]
    output: Option<PathBuf>,

    /// Re-download even when a cached copy exists
    #[arg(long)]
    force: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Download and cache the raw registry table
    Fetch {
        #[command(flatten)]
        source: SourceArgs,
    },
    /// Run the full cleaning pipeline
    Run {
        #[command(flatten)]
        source: SourceArgs,
    },
}

fn apply_overrides(config: &mut Config, args: &SourceArgs) {
    if let Some(url) = &args.url {
        config.source.url = url.clone();
    }
    if let Some(data_dir) = &args.data_dir {
        config.source.data_dir = data_dir.clone();
    }
    if let Some(output) = &args.output {
        config.source.output = output.clone();
    }
    if args.force {
        config.source.force_refresh = true;
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    logging::init_logging();

    let cli = Cli::parse();
    let mut config = Config::load()?;

    match cli.command {
        Commands::Fetch { source } => {
            apply_overrides(&mut config, &source);
            println!("🔄 Fetching raw registry table...");

            let src = &config.source;
            match acquirer::fetch(&ReqwestFetch, &src.url, &src.data_dir, src.force_refresh).await
            {
                Ok(path) => {
                    println!("✅ Raw table cached at {}", path.display());
                }
                Err(e) => {
                    error!("Fetch failed: {}", e);
                    println!("❌ Fetch failed: {}", e);
                }
            }
        }
        Commands::Run { source } => {
            apply_overrides(&mut config, &source);
            println!("🚀 Running cleaning pipeline...");

            match Pipeline::run(&config, &ReqwestFetch).await {
                Ok(report) => {
                    println!("\n📊 Pipeline results:");
                    println!("   Total records: {}", report.total_records);
                    println!("   Output file: {}", report.output_path.display());
                }
                Err(e) => {
                    error!("Pipeline failed: {}", e);
                    println!("❌ Pipeline failed: {}", e);
                }
            }
        }
    }
    Ok(())
}
