use std::fs;
use std::path::{ Path, PathBuf };

use chrono::{ DateTime, Utc };
use sea_orm::DatabaseConnection;

use crate::db::SettingRepository;
use crate::error::Result;
use crate::registry::REGISTRY;
use crate::snapshot::Snapshot;

/// Settings key holding the JSON-encoded list of snapshot file names.
pub const BACKUPS_LIST_KEY: &str = "backups_list";

pub const BACKUP_FILE_PREFIX: &str = "backup-";

/// Dumps every registered table into one timestamped snapshot file.
pub struct BackupWriter {
    db: DatabaseConnection,
    backup_dir: PathBuf,
}

impl BackupWriter {
    pub fn new(db: DatabaseConnection, backup_dir: impl Into<PathBuf>) -> Self {
        Self { db, backup_dir: backup_dir.into() }
    }

    /// Capture the full database state into a new snapshot file and
    /// refresh the `backups_list` catalog. Any table read failure
    /// aborts the run before a snapshot file is written. The reads are
    /// not wrapped in a transaction, so a concurrently mutated
    /// database can yield a snapshot that is not one consistent
    /// point-in-time view.
    pub async fn create_backup(&self) -> Result<PathBuf> {
        fs::create_dir_all(&self.backup_dir)?;

        tracing::info!("Starting database backup");

        let mut snapshot = Snapshot::default();
        for table in REGISTRY {
            tracing::info!("Backing up table {}", table.as_str());
            let rows = table.dump(&self.db).await?;
            snapshot.set_rows(table, rows);
        }

        let file_path = self.backup_dir.join(snapshot_file_name(Utc::now()));
        fs::write(&file_path, serde_json::to_string_pretty(&snapshot)?)?;

        tracing::info!(
            "Backup written: {} ({} rows)",
            file_path.display(),
            snapshot.total_rows()
        );

        self.refresh_catalog().await?;

        Ok(file_path)
    }

    /// Re-list the backup directory and store the full file-name list
    /// under the `backups_list` setting. The filesystem stays
    /// authoritative; the catalog is only refreshed here and goes
    /// stale when files are removed out-of-band.
    async fn refresh_catalog(&self) -> Result<()> {
        let names = list_backup_files(&self.backup_dir)?;
        let value = serde_json::to_string(&names)?;

        SettingRepository::new(self.db.clone()).upsert(BACKUPS_LIST_KEY, &value).await?;

        tracing::info!("Backup catalog refreshed ({} files)", names.len());
        Ok(())
    }
}

/// `backup-<ISO8601>.json` with ':' and '.' flattened to '-' so the
/// name stays filesystem safe.
pub fn snapshot_file_name(at: DateTime<Utc>) -> String {
    format!("{}{}.json", BACKUP_FILE_PREFIX, at.format("%Y-%m-%dT%H-%M-%S-%3fZ"))
}

/// All `backup-`-prefixed file names in the backup directory, sorted.
pub fn list_backup_files(dir: &Path) -> Result<Vec<String>> {
    let mut names = Vec::new();
    for dent in fs::read_dir(dir)? {
        let name = dent?.file_name().to_string_lossy().into_owned();
        if name.starts_with(BACKUP_FILE_PREFIX) {
            names.push(name);
        }
    }
    names.sort();

    Ok(names)
}
