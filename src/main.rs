use clap::Parser;
use coinlist::core::config::{self, CliOverrides};
use coinlist::core::projector::SortKey;
use coinlist::core::store::RequestOrdering;
use coinlist::tui;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

#[derive(Parser)]
#[command(name = "coinlist", about = "Browse cryptocurrency market data")]
struct Args {
    /// Market data API base URL
    #[arg(long)]
    base_url: Option<String>,

    /// Initial sort order
    #[arg(short, long, value_enum)]
    sort: Option<SortKey>,

    /// How overlapping loads are resolved
    #[arg(long, value_enum)]
    ordering: Option<RequestOrdering>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to coinlist.log in current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("coinlist.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = match config::load_config() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Warning: {e}. Using defaults.");
            log::warn!("Config load failed: {}", e);
            config::CoinlistConfig::default()
        }
    };
    let resolved = config::resolve(
        &file_config,
        &CliOverrides {
            base_url: args.base_url,
            sort: args.sort,
            ordering: args.ordering,
        },
    );

    log::info!("coinlist starting up: {:?}", resolved);

    tui::run(resolved)
}
