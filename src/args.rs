use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "loot-ledger")]
#[command(about = "Scrapes a wiki loot table and recommends recycle vs sell per item")]
#[command(version)]
pub struct Args {
    /// Base URL of the wiki, e.g. https://wiki.example.com
    pub base_url: String,

    /// Path of the loot table page, relative to the base URL
    #[arg(long, default_value = "/wiki/Loot")]
    pub loot_path: String,

    /// Destination for the JSON report
    #[arg(long, default_value = "out/loot.json")]
    pub out_json: PathBuf,

    /// Destination for the CSV report
    #[arg(long, default_value = "out/loot.csv")]
    pub out_csv: PathBuf,

    /// Destination for the Markdown report
    #[arg(long, default_value = "out/loot.md")]
    pub out_md: PathBuf,

    /// Directory for the on-disk page cache
    #[arg(long, default_value = ".page_cache")]
    pub cache_dir: String,

    /// Re-fetch pages even when a cached copy exists
    #[arg(long, default_value_t = false)]
    pub force: bool,
}
