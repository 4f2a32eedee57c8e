use anyhow::Result;
use ecourts_archiver::utils::logging;
use ecourts_archiver::{App, Config};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::load()?;
    logging::init(&config.log_dir)?;

    let app = App::initialize(config).await?;
    let stats = app.run().await;
    app.shutdown().await?;

    if stats.passes > 0 && stats.aborted == stats.passes {
        anyhow::bail!("all {} search passes aborted", stats.passes);
    }
    Ok(())
}
