use std::path::PathBuf;

use cointrade::{ backup::BackupWriter, AppError, Config, Result };

#[tokio::main]
async fn main() {
    cointrade::init_tracing();

    // One-shot maintenance command. It always exits 0, even on
    // failure; callers must inspect the log output.
    match run().await {
        Ok(file_path) => tracing::info!("Backup completed: {}", file_path.display()),
        Err(e) => tracing::error!("Backup failed: {}", e),
    }
}

async fn run() -> Result<PathBuf> {
    let config = Config::from_env().map_err(|e| AppError::Config(e.to_string()))?;
    let db = cointrade::db::connect(&config.database_url).await?;

    BackupWriter::new(db, config.backup_dir).create_backup().await
}
