use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub backup_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenv::dotenv().ok();

        let database_url = env::var("DATABASE_URL")?;

        // Snapshots land in <cwd>/backups unless overridden
        let backup_dir = match env::var("BACKUP_DIR") {
            Ok(dir) => PathBuf::from(dir),
            Err(_) => env::current_dir()?.join("backups"),
        };

        Ok(Config {
            database_url,
            backup_dir,
        })
    }
}
