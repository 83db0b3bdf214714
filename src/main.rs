mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Args, LogFormat};
use tracing_subscriber::EnvFilter;

use record_merge::{run, MergeError, WebHdfsClient};

fn init_logging(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match format {
        LogFormat::Text => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .json()
            .init(),
    }
}

fn main() {
    // .env is optional
    dotenvy::dotenv().ok();

    let args = Args::parse();
    init_logging(args.log_format);

    if let Err(err) = run_merge(args) {
        let kind = err
            .downcast_ref::<MergeError>()
            .map(MergeError::kind)
            .unwrap_or("other");
        tracing::error!(kind, "merge aborted");

        eprintln!("❌ An error occurred:");
        eprintln!("   {err}");
        // Debug output carries the full cause chain
        eprintln!("{err:?}");
        std::process::exit(1);
    }
}

fn run_merge(args: Args) -> Result<()> {
    let config = args.into_config();

    println!("🔀 Customer record merge");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("   Store:    {}", config.base_address);
    println!("   Base:     {}", config.base_path());
    println!("   Incoming: {}", config.incoming_path());

    let client = WebHdfsClient::new(&config)?;
    let summary = run(&config, &client)?;

    println!("\n✓ {}", summary.report.summary());
    println!("Updated CSV file path: {}", summary.output_path.display());

    Ok(())
}
