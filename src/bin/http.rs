use std::path::PathBuf;

use clap::Parser;
use vop_calendar::{AppConfig, Exporter, http_api, logging};

#[derive(Parser)]
#[command(name = "http", about = "Serve the VOP 2026 H1 sprint calendar page")]
struct Args {
    /// JSON config file (falls back to VOP_CALENDAR_CONFIG)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Listen address, overrides the config value
    #[arg(long)]
    addr: Option<String>,

    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    logging::init(args.verbose.max(1));

    let mut config = AppConfig::load(args.config.as_deref())?;
    if let Some(addr) = args.addr {
        config.http_addr = addr;
    }
    let addr = config.socket_addr()?;

    let table = config.load_sprint_table()?;
    let state = http_api::AppState::new(
        table,
        config.holiday_table(),
        Exporter::new(config.backup.clone()),
        config.export_reset_delay(),
    )
    .with_fallback_host(config.display_host());

    println!("vop-calendar listening on http://{addr}");
    http_api::serve(addr, state).await?;
    Ok(())
}
