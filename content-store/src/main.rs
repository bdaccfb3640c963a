use clap::Parser;
use content_store::cli::{self, Cli};
use content_store::{ContentStore, setup_logging};

fn main() -> anyhow::Result<()> {
    // 1. Environment (.env is optional)
    dotenv::dotenv().ok();

    // 2. Config from env, then command line overrides
    let cli = Cli::parse();
    let config = cli.config();
    setup_logging(&config);
    config.validate()?;
    tracing::debug!(
        work_dir = %config.work_dir,
        backend = ?config.store_backend,
        environment = %config.environment,
        "Configuration loaded"
    );

    // 3. Open the store (runs the legacy id migration when enabled)
    let content = ContentStore::open(&config)?;

    // 4. Run the command
    if let Err(e) = cli::run(cli, &config, &content) {
        tracing::error!("content-admin failed: {:#}", e);
        return Err(e);
    }
    Ok(())
}
