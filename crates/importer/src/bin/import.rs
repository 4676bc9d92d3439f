use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use importer::{DEFAULT_BASE_URL, SnapshotExporter, WushuJudgesClient, WushuJudgesImporter};

#[derive(Parser)]
#[command(name = "wushu-import", about = "Import wushu competition results")]
struct Cli {
    /// Base URL of the results site
    #[arg(long, env = "WUSHU_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Directory snapshots are written to
    #[arg(long, default_value = "./snapshots")]
    output: String,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the competitions listing
    List,
    /// Fetch a single competition by id
    Fetch {
        competition_id: String,
        /// Competition start date (YYYY-MM-DD)
        #[arg(long)]
        start_date: NaiveDate,
    },
    /// Fetch every competition in the listing
    All,
    /// Fetch competitions starting within a date range (inclusive)
    Range {
        #[arg(long)]
        from: NaiveDate,
        #[arg(long)]
        to: NaiveDate,
    },
    /// Run the pipeline on a saved HTML page
    File {
        path: std::path::PathBuf,
        /// Competition start date (YYYY-MM-DD)
        #[arg(long)]
        start_date: NaiveDate,
    },
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = run(cli).await {
        error!(error = %e, "Import failed");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> importer::Result<()> {
    let client = WushuJudgesClient::new()?;
    let importer = WushuJudgesImporter::new(client, cli.base_url);
    let exporter = SnapshotExporter::new(&cli.output);

    match cli.command {
        Command::List => {
            let summaries = importer.fetch_listing().await?;
            for summary in &summaries {
                println!(
                    "{}\t{}\t{}",
                    summary.competition_id().unwrap_or("-"),
                    summary
                        .start_date
                        .map(|d| d.to_string())
                        .unwrap_or_else(|| "-".to_string()),
                    summary.name
                );
            }
        }
        Command::Fetch {
            competition_id,
            start_date,
        } => {
            let snapshot = importer.import_by_id(&competition_id, start_date).await?;
            let path = exporter.export(&snapshot)?;
            info!(path = %path.display(), "Done");
        }
        Command::All => {
            let snapshots = importer.sync_all().await?;
            let paths = exporter.export_all(&snapshots)?;
            info!(count = paths.len(), "Done");
        }
        Command::Range { from, to } => {
            let snapshots = importer.sync_range(from, to).await?;
            let paths = exporter.export_all(&snapshots)?;
            info!(count = paths.len(), "Done");
        }
        Command::File { path, start_date } => {
            let html = std::fs::read_to_string(&path)?;
            let snapshot = parser::parse_competition_page(&html, start_date);
            let out = exporter.export(&snapshot)?;
            info!(path = %out.display(), "Done");
        }
    }

    Ok(())
}
