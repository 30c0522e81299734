use cointrade::{ AppError, Config, Result };
use migration::{ Migrator, MigratorTrait };

#[tokio::main]
async fn main() -> Result<()> {
    cointrade::init_tracing();

    let config = Config::from_env().map_err(|e| AppError::Config(e.to_string()))?;
    let db = cointrade::db::connect(&config.database_url).await?;

    tracing::info!("Creating tables...");
    Migrator::up(&db, None).await?;
    tracing::info!("All tables have been created successfully");

    Ok(())
}
