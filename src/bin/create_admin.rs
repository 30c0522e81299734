use std::env;

use cointrade::{ db::UserRepository, password, AppError, Config, Result };

const ADMIN_USERNAME: &str = "admin";
const ADMIN_EMAIL: &str = "admin@example.com";
const ADMIN_FULL_NAME: &str = "System Administrator";
const ADMIN_BALANCE: &str = "10000";

#[tokio::main]
async fn main() {
    cointrade::init_tracing();

    if let Err(e) = run().await {
        tracing::error!("Error creating admin user: {}", e);
    }
}

async fn run() -> Result<()> {
    let config = Config::from_env().map_err(|e| AppError::Config(e.to_string()))?;
    let db = cointrade::db::connect(&config.database_url).await?;

    tracing::info!("Creating admin user...");

    let users = UserRepository::new(db);
    if users.find_by_username(ADMIN_USERNAME).await?.is_some() {
        tracing::info!("Admin user already exists");
        return Ok(());
    }

    let admin_password = env::var("ADMIN_PASSWORD").unwrap_or_else(|_| "admin123".to_string());
    let password_hash = password::hash_password(&admin_password)?;

    let admin = users.create(
        ADMIN_USERNAME.to_string(),
        password_hash,
        ADMIN_EMAIL.to_string(),
        ADMIN_FULL_NAME.to_string(),
        "admin".to_string(),
        ADMIN_BALANCE.to_string()
    ).await?;

    tracing::info!(
        "Admin user created: id={} username={} email={} role={} balance={}",
        admin.id,
        admin.username,
        admin.email,
        admin.role,
        admin.balance
    );

    Ok(())
}
