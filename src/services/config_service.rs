use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::bench_file::{self, BenchSettings};
use crate::database::entities::configs;
use crate::errors::ConfigError;

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Everything needed to store a new configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewConfig {
    pub name: String,
    pub is_default: bool,
    #[serde(flatten)]
    pub settings: BenchSettings,
}

/// Partial update; `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigPatch {
    pub name: Option<String>,
    pub is_default: Option<bool>,
    pub number: Option<i32>,
    pub time_between_cycles: Option<i32>,
    pub upper_limit: Option<i32>,
    pub inferior_limit: Option<i32>,
    pub upper_time: Option<i32>,
    pub inferior_time: Option<i32>,
    pub disable_shutdown: Option<bool>,
    pub enable_output: Option<bool>,
    pub temperature: Option<f64>,
    pub time: Option<f64>,
}

impl ConfigPatch {
    fn apply(self, name: &mut String, is_default: &mut bool, s: &mut BenchSettings) {
        if let Some(v) = self.name {
            *name = v;
        }
        if let Some(v) = self.is_default {
            *is_default = v;
        }
        if let Some(v) = self.number {
            s.number = v;
        }
        if let Some(v) = self.time_between_cycles {
            s.time_between_cycles = v;
        }
        if let Some(v) = self.upper_limit {
            s.upper_limit = v;
        }
        if let Some(v) = self.inferior_limit {
            s.inferior_limit = v;
        }
        if let Some(v) = self.upper_time {
            s.upper_time = v;
        }
        if let Some(v) = self.inferior_time {
            s.inferior_time = v;
        }
        if let Some(v) = self.disable_shutdown {
            s.disable_shutdown = v;
        }
        if let Some(v) = self.enable_output {
            s.enable_output = v;
        }
        if let Some(v) = self.temperature {
            s.temperature = v;
        }
        if let Some(v) = self.time {
            s.time = v;
        }
    }
}

pub struct ConfigService {
    db: DatabaseConnection,
}

impl ConfigService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// All configurations, oldest first
    pub async fn list(&self) -> ConfigResult<Vec<configs::Model>> {
        let rows = configs::Entity::find()
            .order_by_asc(configs::Column::Id)
            .all(&self.db)
            .await?;
        Ok(rows)
    }

    pub async fn get(&self, id: i32) -> ConfigResult<configs::Model> {
        configs::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(ConfigError::NotFound(id))
    }

    /// The single configuration with this name.
    pub async fn get_by_name(&self, name: &str) -> ConfigResult<configs::Model> {
        // Two rows are enough to tell "unique" from "ambiguous"
        let mut rows = configs::Entity::find()
            .filter(configs::Column::Name.eq(name))
            .order_by_asc(configs::Column::Id)
            .limit(2)
            .all(&self.db)
            .await?;

        match rows.len() {
            0 => Err(ConfigError::NameNotFound(name.to_string())),
            1 => Ok(rows.remove(0)),
            _ => {
                let count = configs::Entity::find()
                    .filter(configs::Column::Name.eq(name))
                    .count(&self.db)
                    .await? as usize;
                warn!("Lookup by name '{}' matched {} configs", name, count);
                Err(ConfigError::DuplicateName {
                    name: name.to_string(),
                    count,
                })
            }
        }
    }

    /// The newest configuration flagged as default, if any
    pub async fn default_config(&self) -> ConfigResult<Option<configs::Model>> {
        let row = configs::Entity::find()
            .filter(configs::Column::IsDefault.eq(true))
            .order_by_desc(configs::Column::Id)
            .one(&self.db)
            .await?;
        Ok(row)
    }

    pub async fn create(&self, input: NewConfig) -> ConfigResult<configs::Model> {
        let NewConfig {
            name,
            is_default,
            settings,
        } = input;

        let config = configs::ActiveModel {
            name: Set(name),
            is_default: Set(is_default),
            number: Set(settings.number),
            time_between_cycles: Set(settings.time_between_cycles),
            upper_limit: Set(settings.upper_limit),
            inferior_limit: Set(settings.inferior_limit),
            upper_time: Set(settings.upper_time),
            inferior_time: Set(settings.inferior_time),
            disable_shutdown: Set(settings.disable_shutdown),
            enable_output: Set(settings.enable_output),
            temperature: Set(settings.temperature),
            time: Set(settings.time),
            created_at: Set(chrono::Utc::now()),
            ..Default::default()
        };

        let config = config.insert(&self.db).await?;
        info!("Created config {} '{}'", config.id, config.name);
        Ok(config)
    }

    /// Parse a bench file and store it under `name`.
    pub async fn import(
        &self,
        name: String,
        is_default: bool,
        content: &str,
    ) -> ConfigResult<configs::Model> {
        let settings = bench_file::parse(content)?;
        debug!("Parsed bench file for '{}': {:?}", name, settings);
        self.create(NewConfig {
            name,
            is_default,
            settings,
        })
        .await
    }

    /// Render a stored configuration as a bench file.
    pub async fn export(&self, id: i32) -> ConfigResult<String> {
        let config = self.get(id).await?;
        Ok(bench_file::render(&BenchSettings::from(&config)))
    }

    pub async fn update(&self, id: i32, patch: ConfigPatch) -> ConfigResult<configs::Model> {
        let existing = self.get(id).await?;

        let mut name = existing.name.clone();
        let mut is_default = existing.is_default;
        let mut settings = BenchSettings::from(&existing);
        patch.apply(&mut name, &mut is_default, &mut settings);

        let mut config: configs::ActiveModel = existing.into();
        config.name = Set(name);
        config.is_default = Set(is_default);
        config.number = Set(settings.number);
        config.time_between_cycles = Set(settings.time_between_cycles);
        config.upper_limit = Set(settings.upper_limit);
        config.inferior_limit = Set(settings.inferior_limit);
        config.upper_time = Set(settings.upper_time);
        config.inferior_time = Set(settings.inferior_time);
        config.disable_shutdown = Set(settings.disable_shutdown);
        config.enable_output = Set(settings.enable_output);
        config.temperature = Set(settings.temperature);
        config.time = Set(settings.time);

        let config = config.update(&self.db).await?;
        info!("Updated config {}", config.id);
        Ok(config)
    }

    pub async fn delete(&self, id: i32) -> ConfigResult<()> {
        let result = configs::Entity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(ConfigError::NotFound(id));
        }
        info!("Deleted config {}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::connection::setup_database;
    use sea_orm::Database;

    async fn setup_service() -> ConfigService {
        let db = Database::connect("sqlite::memory:")
            .await
            .expect("Failed to connect to test database");
        setup_database(&db).await.expect("Failed to run migrations");
        ConfigService::new(db)
    }

    fn settings() -> BenchSettings {
        BenchSettings {
            number: 10,
            time_between_cycles: 60,
            upper_limit: 100,
            inferior_limit: 30,
            upper_time: 5,
            inferior_time: 5,
            disable_shutdown: false,
            enable_output: true,
            temperature: 200.0,
            time: 10.0,
        }
    }

    fn new_config(name: &str) -> NewConfig {
        NewConfig {
            name: name.to_string(),
            is_default: false,
            settings: settings(),
        }
    }

    #[tokio::test]
    async fn test_create_stores_values_as_given() {
        let service = setup_service().await;

        let mut input = new_config("");
        input.settings.upper_limit = 10;
        input.settings.inferior_limit = 20;
        input.settings.number = -1;
        input.settings.time = -0.5;
        let created = service.create(input.clone()).await.unwrap();

        let stored = service.get(created.id).await.unwrap();
        assert_eq!(stored.name, "");
        assert_eq!(BenchSettings::from(&stored), input.settings);
    }

    #[tokio::test]
    async fn test_create_get_and_list() {
        let service = setup_service().await;

        let first = service.create(new_config("padrao")).await.unwrap();
        let second = service.create(new_config("longo")).await.unwrap();
        assert_ne!(first.id, second.id);

        let fetched = service.get(first.id).await.unwrap();
        assert_eq!(fetched.name, "padrao");
        assert_eq!(fetched.upper_limit, 100);

        let all = service.list().await.unwrap();
        assert_eq!(
            all.iter().map(|c| c.id).collect::<Vec<_>>(),
            vec![first.id, second.id]
        );
    }

    #[tokio::test]
    async fn test_get_missing_is_not_found() {
        let service = setup_service().await;
        let err = service.get(42).await.unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(42)));
    }

    #[tokio::test]
    async fn test_get_by_name_handles_duplicates() {
        let service = setup_service().await;
        service.create(new_config("padrao")).await.unwrap();

        let found = service.get_by_name("padrao").await.unwrap();
        assert_eq!(found.name, "padrao");

        assert!(service.get_by_name("outro").await.unwrap_err().is_not_found());

        service.create(new_config("padrao")).await.unwrap();
        service.create(new_config("padrao")).await.unwrap();
        let err = service.get_by_name("padrao").await.unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateName { count: 3, .. }));
    }

    #[tokio::test]
    async fn test_default_config_picks_newest_flagged() {
        let service = setup_service().await;
        assert!(service.default_config().await.unwrap().is_none());

        let mut flagged = new_config("a");
        flagged.is_default = true;
        service.create(flagged.clone()).await.unwrap();
        flagged.name = "b".to_string();
        let newest = service.create(flagged).await.unwrap();
        service.create(new_config("c")).await.unwrap();

        let default = service.default_config().await.unwrap().unwrap();
        assert_eq!(default.id, newest.id);
    }

    #[tokio::test]
    async fn test_update_applies_only_given_fields() {
        let service = setup_service().await;
        let created = service.create(new_config("padrao")).await.unwrap();

        let updated = service
            .update(
                created.id,
                ConfigPatch {
                    upper_limit: Some(120),
                    disable_shutdown: Some(true),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.upper_limit, 120);
        assert!(updated.disable_shutdown);
        assert_eq!(updated.name, "padrao");
        assert_eq!(updated.inferior_limit, 30);
    }

    #[tokio::test]
    async fn test_update_stores_merged_values_as_given() {
        let service = setup_service().await;
        let created = service.create(new_config("padrao")).await.unwrap();

        let updated = service
            .update(
                created.id,
                ConfigPatch {
                    upper_limit: Some(10),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.upper_limit, 10);
        assert_eq!(updated.inferior_limit, 30);
        assert_eq!(service.get(created.id).await.unwrap().upper_limit, 10);
    }

    #[tokio::test]
    async fn test_delete() {
        let service = setup_service().await;
        let created = service.create(new_config("padrao")).await.unwrap();

        service.delete(created.id).await.unwrap();
        assert!(service.get(created.id).await.unwrap_err().is_not_found());
        assert!(service.delete(created.id).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_import_and_export_bench_file() {
        let service = setup_service().await;
        let text = bench_file::render(&settings());

        let imported = service.import("bancada".to_string(), true, &text).await.unwrap();
        assert_eq!(BenchSettings::from(&imported), settings());
        assert!(imported.is_default);

        assert_eq!(service.export(imported.id).await.unwrap(), text);

        let err = service
            .import("vazio".to_string(), false, "")
            .await
            .unwrap_err();
        assert!(matches!(err, ConfigError::BenchFile(_)));
    }
}
