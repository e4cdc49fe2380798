use clap::Parser;
use loot_ledger::{Ledger, ScrapeConfig};

mod args;
use args::Args;

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::init();

    // Parse command-line arguments
    let args = Args::parse();

    ::log::info!("Starting loot scrape for {}{}", args.base_url, args.loot_path);

    // FORCE_REFETCH in the environment overrides the CLI flag
    let force = match std::env::var("FORCE_REFETCH") {
        Ok(value) => matches!(value.as_str(), "1" | "true" | "yes"),
        Err(_) => args.force,
    };

    let mut config = ScrapeConfig::new(&args.base_url);
    config.loot_path = args.loot_path.clone();
    config.cache_dir = args.cache_dir.clone();

    let report = match Ledger::new(config).with_force_refetch(force).run().await {
        Ok(report) => report,
        Err(e) => {
            ::log::error!("Run failed: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) =
        loot_ledger::output::write_reports(&report, &args.out_json, &args.out_csv, &args.out_md)
    {
        ::log::error!("Failed to write outputs: {}", e);
        std::process::exit(1);
    }

    println!(
        "Wrote {}, {} and {}",
        args.out_json.display(),
        args.out_csv.display(),
        args.out_md.display()
    );
}
