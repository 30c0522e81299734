use std::env;
use std::process;

use cointrade::{ restore::{ RestoreEngine, RestoreSummary }, AppError, Config, Result };

#[tokio::main]
async fn main() {
    cointrade::init_tracing();

    let Some(file_name) = env::args().nth(1) else {
        tracing::error!("Usage: restore <backup-file-name>, e.g. restore backup-2024-05-09.json");
        process::exit(1);
    };

    match run(&file_name).await {
        Ok(summary) =>
            tracing::info!(
                "Restore succeeded ({} rows deleted, {} rows inserted)",
                summary.rows_deleted,
                summary.rows_inserted
            ),
        // Missing snapshot is the one failure shell callers can detect
        Err(e @ AppError::NotFound(_)) => {
            tracing::error!("{}", e);
            process::exit(1);
        }
        Err(e) => tracing::error!("Restore failed, database left unchanged: {}", e),
    }
}

async fn run(file_name: &str) -> Result<RestoreSummary> {
    let config = Config::from_env().map_err(|e| AppError::Config(e.to_string()))?;
    let db = cointrade::db::connect(&config.database_url).await?;

    RestoreEngine::new(db, config.backup_dir).restore_backup(file_name).await
}
