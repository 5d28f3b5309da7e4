mod platform;

use platform::ScraperConfig;
use scrape_logging::{scrape_info, scrape_warn};

fn main() -> anyhow::Result<()> {
    let (config, config_error) = match ScraperConfig::load() {
        Ok(config) => (config, None),
        Err(err) => (ScraperConfig::default(), Some(err)),
    };

    platform::initialize_logging(config.log_destination, &config.log_file);
    if let Some(err) = config_error {
        scrape_warn!("{}; using defaults", err);
        eprintln!("Warning: {err}; using defaults");
    }
    scrape_info!("tagscrape {} starting", env!("CARGO_PKG_VERSION"));

    platform::run_app(config)
}
