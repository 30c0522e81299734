use std::fs;
use std::path::PathBuf;

use sea_orm::{ DatabaseConnection, DatabaseTransaction, TransactionTrait };

use crate::error::{ AppError, Result };
use crate::registry::REGISTRY;
use crate::snapshot::Snapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RestoreSummary {
    pub rows_deleted: u64,
    pub rows_inserted: u64,
}

/// Replaces the full database state with the contents of one snapshot
/// file, all inside a single transaction.
pub struct RestoreEngine {
    db: DatabaseConnection,
    backup_dir: PathBuf,
}

impl RestoreEngine {
    pub fn new(db: DatabaseConnection, backup_dir: impl Into<PathBuf>) -> Self {
        Self { db, backup_dir: backup_dir.into() }
    }

    /// Restore from `file_name` inside the backup directory. The file
    /// check and snapshot parse both happen before any transactional
    /// work, so those failures leave the database untouched; a failure
    /// partway through the delete/insert sequence rolls the whole
    /// transaction back to the exact pre-restore state.
    pub async fn restore_backup(&self, file_name: &str) -> Result<RestoreSummary> {
        let file_path = self.backup_dir.join(file_name);
        if !file_path.exists() {
            return Err(
                AppError::NotFound(format!("Backup file not found: {}", file_path.display()))
            );
        }

        tracing::info!("Restoring database from {}", file_path.display());

        let snapshot: Snapshot = serde_json::from_str(&fs::read_to_string(&file_path)?)?;

        let txn = self.db.begin().await?;
        match Self::apply(&txn, &snapshot).await {
            Ok(summary) => {
                txn.commit().await?;
                tracing::info!(
                    "Restore completed: {} rows deleted, {} rows inserted",
                    summary.rows_deleted,
                    summary.rows_inserted
                );
                Ok(summary)
            }
            Err(e) => {
                txn.rollback().await?;
                Err(e)
            }
        }
    }

    async fn apply(txn: &DatabaseTransaction, snapshot: &Snapshot) -> Result<RestoreSummary> {
        // Wipe children before parents
        tracing::info!("Clearing existing rows");
        let mut rows_deleted = 0;
        for table in REGISTRY.iter().rev() {
            rows_deleted += table.wipe(txn).await?;
        }

        // Reload parents before children; a table with no captured
        // rows stays empty
        let mut rows_inserted = 0;
        for table in REGISTRY {
            let rows = snapshot.rows(table);
            if rows.is_empty() {
                continue;
            }

            tracing::info!("Restoring table {} ({} rows)", table.as_str(), rows.len());
            rows_inserted += table.load(txn, rows).await?;
        }

        Ok(RestoreSummary { rows_deleted, rows_inserted })
    }
}
