use std::fs;
use std::time::Duration;

use cointrade::backup::{ list_backup_files, BackupWriter, BACKUPS_LIST_KEY };
use cointrade::db::entity;
use cointrade::db::SettingRepository;
use cointrade::registry::REGISTRY;
use cointrade::restore::RestoreEngine;
use cointrade::AppError;
use migration::{ Migrator, MigratorTrait };
use sea_orm::{
    ActiveModelTrait,
    ActiveValue::NotSet,
    Database,
    DatabaseConnection,
    EntityTrait,
    PaginatorTrait,
    Set,
};
use serde_json::Value as JsonValue;
use tempfile::TempDir;

async fn setup_db(dir: &TempDir) -> DatabaseConnection {
    let db_path = dir.path().join("cointrade-test.sqlite");
    let url = format!("sqlite://{}?mode=rwc", db_path.display());
    let db = Database::connect(&url).await.expect("connect sqlite");
    Migrator::up(&db, None).await.expect("run migrations");
    db
}

fn ts(h: u32, m: u32, s: u32) -> chrono::NaiveDateTime {
    chrono::NaiveDate
        ::from_ymd_opt(2024, 5, 9)
        .unwrap()
        .and_hms_opt(h, m, s)
        .unwrap()
}

/// Two users, a default bank account, a trade, a linked transaction,
/// one setting, and a session row.
async fn seed(db: &DatabaseConnection) {
    let alice = (entity::user::ActiveModel {
        id: NotSet,
        username: Set("alice".to_string()),
        password: Set("hash-a".to_string()),
        email: Set("alice@example.com".to_string()),
        full_name: Set("Alice A".to_string()),
        role: Set("user".to_string()),
        balance: Set("1250.50".to_string()),
        display_name: Set(Some("alice".to_string())),
        phone_number: Set(None),
        avatar_url: Set(None),
        created_at: Set(Some(ts(8, 0, 0))),
    })
        .insert(db).await
        .expect("insert alice");

    (entity::user::ActiveModel {
        id: NotSet,
        username: Set("bob".to_string()),
        password: Set("hash-b".to_string()),
        email: Set("bob@example.com".to_string()),
        full_name: Set("Bob B".to_string()),
        role: Set("admin".to_string()),
        balance: Set("0".to_string()),
        display_name: Set(None),
        phone_number: Set(Some("0800000000".to_string())),
        avatar_url: Set(None),
        created_at: Set(Some(ts(8, 5, 0))),
    })
        .insert(db).await
        .expect("insert bob");

    let account = (entity::bank_account::ActiveModel {
        id: NotSet,
        user_id: Set(alice.id),
        bank_name: Set("Kasikorn".to_string()),
        account_number: Set("123-4-56789-0".to_string()),
        account_name: Set("Alice A".to_string()),
        is_default: Set(true),
        created_at: Set(ts(9, 0, 0)),
        updated_at: Set(ts(9, 0, 0)),
    })
        .insert(db).await
        .expect("insert bank account");

    (entity::trade::ActiveModel {
        id: NotSet,
        user_id: Set(alice.id),
        crypto_id: Set("bitcoin".to_string()),
        amount: Set("100".to_string()),
        direction: Set("up".to_string()),
        entry_price: Set("63125.12".to_string()),
        duration: Set("60S".to_string()),
        status: Set("active".to_string()),
        created_at: Set(Some(ts(10, 0, 0))),
        closed_at: Set(None),
        result: Set(None),
        predetermined_result: Set(Some("win".to_string())),
    })
        .insert(db).await
        .expect("insert trade");

    (entity::transaction::ActiveModel {
        id: NotSet,
        user_id: Set(alice.id),
        r#type: Set("withdraw".to_string()),
        amount: Set("500".to_string()),
        fee: Set(Some("15".to_string())),
        method: Set("bank".to_string()),
        bank_name: Set(Some("Kasikorn".to_string())),
        bank_account: Set(Some("123-4-56789-0".to_string())),
        account_name: Set(Some("Alice A".to_string())),
        bank_account_id: Set(Some(account.id)),
        status: Set("pending".to_string()),
        payment_proof: Set(None),
        note: Set(None),
        created_at: Set(ts(11, 0, 0)),
        updated_at: Set(ts(11, 0, 0)),
    })
        .insert(db).await
        .expect("insert transaction");

    (entity::setting::ActiveModel {
        id: NotSet,
        key: Set("announcement".to_string()),
        value: Set(Some("maintenance window tonight".to_string())),
        created_at: Set(ts(7, 0, 0)),
        updated_at: Set(ts(7, 0, 0)),
    })
        .insert(db).await
        .expect("insert setting");

    (entity::session::ActiveModel {
        sid: Set("sess-alice-1".to_string()),
        sess: Set(serde_json::json!({ "cookie": { "path": "/" }, "userId": alice.id })),
        expire: Set(ts(23, 59, 59)),
    })
        .insert(db).await
        .expect("insert session");
}

/// Row sets for every registered table, in registry order.
async fn dump_all(db: &DatabaseConnection) -> Vec<(&'static str, Vec<JsonValue>)> {
    let mut out = Vec::new();
    for table in REGISTRY {
        out.push((table.as_str(), table.dump(db).await.expect("dump table")));
    }
    out
}

fn file_name_of(path: &std::path::Path) -> String {
    path.file_name().unwrap().to_str().unwrap().to_string()
}

#[tokio::test]
async fn backup_then_restore_round_trips_every_table() {
    let dir = TempDir::new().unwrap();
    let db = setup_db(&dir).await;
    seed(&db).await;

    // Captured before the backup runs: create_backup itself writes
    // the backups_list setting after dumping, so the snapshot (and
    // the restored state) reflect this exact point in time
    let before = dump_all(&db).await;

    let writer = BackupWriter::new(db.clone(), dir.path().join("backups"));
    let path = writer.create_backup().await.expect("create backup");

    // Mutate every table so restore has real work to do
    entity::Transaction::delete_many().exec(&db).await.unwrap();
    entity::Trade::delete_many().exec(&db).await.unwrap();
    entity::Session::delete_many().exec(&db).await.unwrap();
    let alice = entity::User::find().one(&db).await.unwrap().unwrap();
    let mut alice_active: entity::user::ActiveModel = alice.into();
    alice_active.balance = Set("0".to_string());
    alice_active.update(&db).await.unwrap();

    let engine = RestoreEngine::new(db.clone(), dir.path().join("backups"));
    engine.restore_backup(&file_name_of(&path)).await.expect("restore");

    let after = dump_all(&db).await;
    assert_eq!(before, after);
}

#[tokio::test]
async fn restore_missing_file_fails_without_touching_data() {
    let dir = TempDir::new().unwrap();
    let db = setup_db(&dir).await;
    seed(&db).await;

    let before = dump_all(&db).await;

    let engine = RestoreEngine::new(db.clone(), dir.path().join("backups"));
    let err = engine.restore_backup("does-not-exist.json").await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    let after = dump_all(&db).await;
    assert_eq!(before, after);
}

#[tokio::test]
async fn table_missing_from_snapshot_restores_to_empty() {
    let dir = TempDir::new().unwrap();
    let db = setup_db(&dir).await;
    seed(&db).await;

    let writer = BackupWriter::new(db.clone(), dir.path().join("backups"));
    let path = writer.create_backup().await.expect("create backup");

    // Strip bank_accounts (and its dependent transactions) from the
    // snapshot; restore must treat the absence as "empty", not error
    let mut doc: JsonValue = serde_json
        ::from_str(&fs::read_to_string(&path).unwrap())
        .unwrap();
    doc.as_object_mut().unwrap().remove("bank_accounts");
    doc.as_object_mut().unwrap().remove("transactions");
    let edited = path.with_file_name("backup-edited.json");
    fs::write(&edited, serde_json::to_string(&doc).unwrap()).unwrap();

    let engine = RestoreEngine::new(db.clone(), dir.path().join("backups"));
    engine.restore_backup("backup-edited.json").await.expect("restore edited snapshot");

    assert_eq!(entity::BankAccount::find().count(&db).await.unwrap(), 0);
    assert_eq!(entity::Transaction::find().count(&db).await.unwrap(), 0);
    assert_eq!(entity::User::find().count(&db).await.unwrap(), 2);
}

#[tokio::test]
async fn failed_restore_rolls_back_to_pre_restore_state() {
    let dir = TempDir::new().unwrap();
    let db = setup_db(&dir).await;
    seed(&db).await;

    let writer = BackupWriter::new(db.clone(), dir.path().join("backups"));
    let path = writer.create_backup().await.expect("create backup");

    // Duplicate the first user so the second insert collides on the
    // primary key after earlier statements already succeeded
    let mut doc: JsonValue = serde_json
        ::from_str(&fs::read_to_string(&path).unwrap())
        .unwrap();
    let users = doc["users"].as_array_mut().unwrap();
    let dup = users[0].clone();
    users.push(dup);
    let tampered = path.with_file_name("backup-tampered.json");
    fs::write(&tampered, serde_json::to_string(&doc).unwrap()).unwrap();

    let before = dump_all(&db).await;

    let engine = RestoreEngine::new(db.clone(), dir.path().join("backups"));
    let result = engine.restore_backup("backup-tampered.json").await;
    assert!(result.is_err());

    let after = dump_all(&db).await;
    assert_eq!(before, after);
}

#[tokio::test]
async fn malformed_snapshot_aborts_before_any_mutation() {
    let dir = TempDir::new().unwrap();
    let db = setup_db(&dir).await;
    seed(&db).await;

    let backups = dir.path().join("backups");
    fs::create_dir_all(&backups).unwrap();
    fs::write(backups.join("backup-broken.json"), "{ not json").unwrap();

    let before = dump_all(&db).await;

    let engine = RestoreEngine::new(db.clone(), backups);
    let err = engine.restore_backup("backup-broken.json").await.unwrap_err();
    assert!(matches!(err, AppError::Snapshot(_)));

    let after = dump_all(&db).await;
    assert_eq!(before, after);
}

#[tokio::test]
async fn catalog_tracks_backups_and_goes_stale_on_out_of_band_delete() {
    let dir = TempDir::new().unwrap();
    let db = setup_db(&dir).await;
    seed(&db).await;

    let backups = dir.path().join("backups");
    let writer = BackupWriter::new(db.clone(), &backups);

    let first = file_name_of(&writer.create_backup().await.expect("first backup"));
    tokio::time::sleep(Duration::from_millis(5)).await;
    let second = file_name_of(&writer.create_backup().await.expect("second backup"));

    let settings = SettingRepository::new(db.clone());
    let value = settings
        .get(BACKUPS_LIST_KEY).await
        .unwrap()
        .and_then(|s| s.value)
        .expect("catalog setting");
    let catalog: Vec<String> = serde_json::from_str(&value).unwrap();
    assert!(catalog.contains(&first));
    assert!(catalog.contains(&second));

    // Out-of-band deletion: filesystem moves on, catalog does not
    fs::remove_file(backups.join(&first)).unwrap();
    assert!(!list_backup_files(&backups).unwrap().contains(&first));

    let value = settings
        .get(BACKUPS_LIST_KEY).await
        .unwrap()
        .and_then(|s| s.value)
        .expect("catalog setting");
    let stale: Vec<String> = serde_json::from_str(&value).unwrap();
    assert!(stale.contains(&first));
}
