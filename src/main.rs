use anyhow::Result;
use log::{error, info, warn};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs;

use f1_dataset_fetcher::{default_provider, report, DatasetFetcher, FetchConfig};

fn setup_logging() -> Result<()> {
    let log_dir = directories::BaseDirs::new()
        .ok_or_else(|| anyhow::anyhow!("Failed to get base directories"))?
        .data_local_dir()
        .join("f1-dataset-fetcher")
        .join("logs");

    fs::create_dir_all(&log_dir)?;

    let log_file = log_dir.join(format!(
        "fetcher_{}.log",
        chrono::Local::now().format("%Y%m%d_%H%M%S")
    ));

    let config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .set_location_level(LevelFilter::Debug)
        .build();

    WriteLogger::init(LevelFilter::Info, config, fs::File::create(log_file)?)?;

    Ok(())
}

fn main() -> Result<()> {
    if let Err(e) = setup_logging() {
        eprintln!("warning: file logging disabled: {:#}", e);
    }

    let config = FetchConfig::for_current_exe()?;
    info!("F1 dataset fetcher starting");
    info!("Dataset: {}", config.dataset);
    info!("Destination: {:?}", config.destination);

    let result = default_provider().and_then(|provider| {
        println!("{}", report::banner());
        DatasetFetcher::new(config.clone(), provider)
            .run_with(|progress| println!("{}", report::progress_line(&progress)))
    });

    match result {
        Ok(fetched) => {
            info!(
                "Fetch completed: {} copied, {} available",
                fetched.copied.len(),
                fetched.available.len()
            );
            println!("{}", report::success_message(&fetched));
            Ok(())
        }
        Err(e) => {
            if e.is_provider_unavailable() {
                warn!("Provider unavailable: {}", e);
            } else {
                error!("Fetch failed: {:#}", e);
            }
            println!("{}", report::failure_message(&e, &config));
            std::process::exit(1);
        }
    }
}
