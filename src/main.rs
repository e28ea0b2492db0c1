use anyhow::Result;
use log::info;

use bookvault::config::Config;
use bookvault::constants::{ERROR_STORAGE_OPEN_FAILED, REPORT_EMPTY, REPORT_HEADER};
use bookvault::logger;
use bookvault::repositories::SeriesRepository;
use bookvault::storage::LocalStorage;

#[tokio::main]
async fn main() -> Result<()> {
    // `bookvault --init-config` writes a default config file and exits
    if std::env::args().skip(1).any(|arg| arg == "--init-config") {
        return Config::generate_default_config(Config::get_default_config_path()?);
    }

    let config = Config::load()?;
    let logger = logger::init(&config.logging)?;

    let storage = match LocalStorage::from_config(&config.storage).await {
        Ok(storage) => storage,
        Err(e) => {
            eprintln!("{}: {:#}", ERROR_STORAGE_OPEN_FAILED, e);
            return Err(e);
        }
    };

    let counts = SeriesRepository::count_grouped_by_library_id(&storage.conn).await?;
    info!("Reporting on {} library(ies)", counts.len());

    if counts.is_empty() {
        println!("{}", REPORT_EMPTY);
    } else {
        let mut libraries: Vec<_> = counts.into_iter().collect();
        libraries.sort();

        println!("{}", REPORT_HEADER);
        for (library_id, count) in &libraries {
            println!("  {}: {} series", library_id, count);
        }
        println!("Total: {}", SeriesRepository::count(&storage.conn).await?);
    }

    logger.flush();
    Ok(())
}
