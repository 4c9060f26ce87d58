//! `SQLite` implementation of [`ConfigRepository`].

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use purgehub_app::ports::ConfigRepository;
use purgehub_domain::config::{ConfigDraft, PurgeConfig, Region};
use purgehub_domain::error::PurgeHubError;
use purgehub_domain::id::ConfigId;
use purgehub_domain::time::{self, Timestamp};

use crate::error::StorageError;

/// Wrapper for converting database rows into domain types without polluting
/// domain structs with database concerns.
struct Wrapper(PurgeConfig);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<PurgeConfig> {
        value.map(|w| w.0)
    }
}

fn timestamp(row: &SqliteRow, column: &str) -> Result<Timestamp, sqlx::Error> {
    let text: String = row.try_get(column)?;
    time::parse(&text).map_err(|err| sqlx::Error::Decode(Box::new(err)))
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: i64 = row.try_get("id")?;
        let name: Option<String> = row.try_get("name")?;
        let region: String = row.try_get("region")?;

        Ok(Self(PurgeConfig {
            id: ConfigId::new(id),
            name,
            secret_id: row.try_get("secret_id")?,
            secret_key: row.try_get("secret_key")?,
            zone_id: row.try_get("zone_id")?,
            region: Region::from(region),
            created_at: timestamp(row, "created_at")?,
            updated_at: timestamp(row, "updated_at")?,
        }))
    }
}

const INSERT: &str = r"
    INSERT INTO configs (name, secret_id, secret_key, zone_id, region, created_at, updated_at)
    VALUES (?, ?, ?, ?, ?, ?, ?)
    RETURNING *
";

const SELECT_BY_ID: &str = "SELECT * FROM configs WHERE id = ?";
const SELECT_ALL: &str = "SELECT * FROM configs ORDER BY updated_at DESC, id DESC";

const UPDATE: &str = r"
    UPDATE configs
    SET name = ?, secret_id = ?, secret_key = ?, zone_id = ?, region = ?, updated_at = ?
    WHERE id = ?
    RETURNING *
";

const DELETE_BY_ID: &str = "DELETE FROM configs WHERE id = ?";

/// `SQLite`-backed configuration repository.
pub struct SqliteConfigRepository {
    pool: SqlitePool,
}

impl SqliteConfigRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl ConfigRepository for SqliteConfigRepository {
    async fn create(&self, draft: ConfigDraft, at: Timestamp) -> Result<PurgeConfig, PurgeHubError> {
        let stamp = time::format(at);
        let row: Wrapper = sqlx::query_as(INSERT)
            .bind(&draft.name)
            .bind(&draft.secret_id)
            .bind(&draft.secret_key)
            .bind(&draft.zone_id)
            .bind(draft.region.as_str())
            .bind(&stamp)
            .bind(&stamp)
            .fetch_one(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(row.0)
    }

    async fn get_by_id(&self, id: ConfigId) -> Result<Option<PurgeConfig>, PurgeHubError> {
        let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
            .bind(id.get())
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(Wrapper::maybe(row))
    }

    async fn get_all(&self) -> Result<Vec<PurgeConfig>, PurgeHubError> {
        let rows: Vec<Wrapper> = sqlx::query_as(SELECT_ALL)
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(rows.into_iter().map(|w| w.0).collect())
    }

    async fn update(&self, config: PurgeConfig) -> Result<PurgeConfig, PurgeHubError> {
        let row: Wrapper = sqlx::query_as(UPDATE)
            .bind(&config.name)
            .bind(&config.secret_id)
            .bind(&config.secret_key)
            .bind(&config.zone_id)
            .bind(config.region.as_str())
            .bind(time::format(config.updated_at))
            .bind(config.id.get())
            .fetch_one(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(row.0)
    }

    async fn delete(&self, id: ConfigId) -> Result<bool, PurgeHubError> {
        let result = sqlx::query(DELETE_BY_ID)
            .bind(id.get())
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::Config;

    async fn setup() -> SqliteConfigRepository {
        let db = Config {
            database_url: "sqlite::memory:".to_string(),
        }
        .build()
        .await
        .unwrap();
        SqliteConfigRepository::new(db.pool().clone())
    }

    fn draft(zone: &str) -> ConfigDraft {
        ConfigDraft {
            name: Some("prod".to_string()),
            secret_id: "AKIDexample".to_string(),
            secret_key: "secret".to_string(),
            zone_id: zone.to_string(),
            region: Region::International,
        }
    }

    #[tokio::test]
    async fn should_assign_increasing_ids_on_create() {
        let repo = setup().await;
        let a = repo.create(draft("zone-a"), time::now()).await.unwrap();
        let b = repo.create(draft("zone-b"), time::now()).await.unwrap();
        assert!(b.id > a.id);
    }

    #[tokio::test]
    async fn should_create_and_retrieve_config() {
        let repo = setup().await;
        let created = repo.create(draft("zone-a"), time::now()).await.unwrap();

        let fetched = repo.get_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(fetched, created);
        assert_eq!(fetched.region, Region::International);
        assert_eq!(fetched.secret_key, "secret");
    }

    #[tokio::test]
    async fn should_store_absent_name_as_null() {
        let repo = setup().await;
        let mut input = draft("zone-a");
        input.name = None;
        let created = repo.create(input, time::now()).await.unwrap();

        let fetched = repo.get_by_id(created.id).await.unwrap().unwrap();
        assert!(fetched.name.is_none());
    }

    #[tokio::test]
    async fn should_return_none_when_config_not_found() {
        let repo = setup().await;
        let result = repo.get_by_id(ConfigId::new(404)).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn should_list_most_recently_updated_first() {
        let repo = setup().await;
        let older = time::parse("2024-01-01T00:00:00Z").unwrap();
        let newer = time::parse("2024-02-01T00:00:00Z").unwrap();
        repo.create(draft("old"), older).await.unwrap();
        repo.create(draft("new"), newer).await.unwrap();

        let all = repo.get_all().await.unwrap();
        let zones: Vec<&str> = all.iter().map(|c| c.zone_id.as_str()).collect();
        assert_eq!(zones, vec!["new", "old"]);
    }

    #[tokio::test]
    async fn should_update_config_when_exists() {
        let repo = setup().await;
        let mut config = repo.create(draft("zone-a"), time::now()).await.unwrap();
        config.zone_id = "zone-z".to_string();
        config.region = Region::Domestic;
        config.updated_at = time::parse("2030-01-01T00:00:00Z").unwrap();

        repo.update(config.clone()).await.unwrap();

        let fetched = repo.get_by_id(config.id).await.unwrap().unwrap();
        assert_eq!(fetched.zone_id, "zone-z");
        assert_eq!(fetched.region, Region::Domestic);
        assert_eq!(fetched.updated_at, config.updated_at);
        assert_eq!(fetched.created_at, config.created_at);
    }

    #[tokio::test]
    async fn should_report_whether_delete_removed_a_row() {
        let repo = setup().await;
        let created = repo.create(draft("zone-a"), time::now()).await.unwrap();

        assert!(repo.delete(created.id).await.unwrap());
        assert!(!repo.delete(created.id).await.unwrap());
        assert!(repo.get_by_id(created.id).await.unwrap().is_none());
    }
}
