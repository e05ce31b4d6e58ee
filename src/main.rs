use clap::Parser;
use rewards_etl::utils::{logger, validation::Validate};
use rewards_etl::{CliConfig, EtlEngine, LocalStorage, RewardsPipeline};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut config = CliConfig::parse();
    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting rewards-etl");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.load_view_file() {
        tracing::error!("Failed to load view definition: {}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    let today = chrono::Local::now().date_naive();
    let storage = LocalStorage::new(config.output_path.clone());
    let pipeline = RewardsPipeline::new(storage, config, today);
    let engine = EtlEngine::new(pipeline);

    match engine.run().await {
        Ok(output_path) => {
            println!("Report written to: {}", output_path);
        }
        Err(e) => {
            tracing::error!("Run failed: {}", e);
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }

    Ok(())
}
