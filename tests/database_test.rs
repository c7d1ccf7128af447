//! Database functionality tests
//!
//! Tests for database migrations and config entity operations

use anyhow::Result;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Database, DatabaseConnection, EntityTrait, QueryFilter, Set,
};
use sea_orm_migration::MigratorTrait;
use tempfile::NamedTempFile;
use unbrake::database::entities::configs;
use unbrake::database::migrations::Migrator;
use unbrake::database::setup_database;

/// Create a test database connection with migrations
async fn setup_test_db() -> Result<(DatabaseConnection, NamedTempFile)> {
    let temp_file = NamedTempFile::new()?;
    let db_url = format!("sqlite://{}?mode=rwc", temp_file.path().display());

    let db = Database::connect(&db_url).await?;
    setup_database(&db).await?;

    Ok((db, temp_file))
}

fn bench_config(name: &str) -> configs::ActiveModel {
    configs::ActiveModel {
        name: Set(name.to_string()),
        is_default: Set(false),
        number: Set(10),
        time_between_cycles: Set(60),
        upper_limit: Set(100),
        inferior_limit: Set(30),
        upper_time: Set(5),
        inferior_time: Set(5),
        disable_shutdown: Set(false),
        enable_output: Set(true),
        temperature: Set(180.5),
        time: Set(12.25),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_database_migrations() -> Result<()> {
    let (db, _temp_file) = setup_test_db().await?;

    let configs = configs::Entity::find().all(&db).await?;
    assert_eq!(configs.len(), 0);

    // Running again is a no-op
    setup_database(&db).await?;

    Ok(())
}

#[tokio::test]
async fn test_migrate_down_drops_configs() -> Result<()> {
    let (db, _temp_file) = setup_test_db().await?;

    Migrator::down(&db, None).await?;
    assert!(configs::Entity::find().all(&db).await.is_err());

    Migrator::up(&db, None).await?;
    assert!(configs::Entity::find().all(&db).await?.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_config_crud_operations() -> Result<()> {
    let (db, _temp_file) = setup_test_db().await?;

    // Create
    let config = bench_config("Padrao").insert(&db).await?;
    assert_eq!(config.name, "Padrao");
    assert_eq!(config.temperature, 180.5);
    assert_eq!(config.time, 12.25);

    // Read
    let found = configs::Entity::find_by_id(config.id)
        .one(&db)
        .await?
        .expect("Config should exist");
    assert_eq!(found.id, config.id);
    assert!(found.enable_output);
    assert!(!found.disable_shutdown);

    // Update
    let mut update: configs::ActiveModel = found.into();
    update.upper_limit = Set(120);
    update.is_default = Set(true);
    let updated = update.update(&db).await?;
    assert_eq!(updated.upper_limit, 120);
    assert!(updated.is_default);

    // Delete
    configs::Entity::delete_by_id(config.id).exec(&db).await?;
    let deleted = configs::Entity::find_by_id(config.id).one(&db).await?;
    assert!(deleted.is_none());

    Ok(())
}

#[tokio::test]
async fn test_names_are_not_unique() -> Result<()> {
    let (db, _temp_file) = setup_test_db().await?;

    bench_config("Repetido").insert(&db).await?;
    bench_config("Repetido").insert(&db).await?;

    let matches = configs::Entity::find()
        .filter(configs::Column::Name.eq("Repetido"))
        .all(&db)
        .await?;
    assert_eq!(matches.len(), 2);

    Ok(())
}
