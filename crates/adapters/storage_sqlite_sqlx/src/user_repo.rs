//! `SQLite` implementation of [`UserRepository`].

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use purgehub_app::ports::UserRepository;
use purgehub_domain::error::PurgeHubError;
use purgehub_domain::id::UserId;
use purgehub_domain::user::User;

use crate::error::StorageError;

struct Wrapper(User);

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: i64 = row.try_get("id")?;
        Ok(Self(User {
            id: UserId::new(id),
            username: row.try_get("username")?,
            password_hash: row.try_get("password_hash")?,
        }))
    }
}

const INSERT: &str = "INSERT INTO users (username, password_hash) VALUES (?, ?) RETURNING *";
const SELECT_BY_USERNAME: &str = "SELECT * FROM users WHERE username = ?";

/// `SQLite`-backed operator account repository.
pub struct SqliteUserRepository {
    pool: SqlitePool,
}

impl SqliteUserRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl UserRepository for SqliteUserRepository {
    async fn create(&self, username: &str, password_hash: &str) -> Result<User, PurgeHubError> {
        let row: Wrapper = sqlx::query_as(INSERT)
            .bind(username)
            .bind(password_hash)
            .fetch_one(&self.pool)
            .await
            .map_err(StorageError::from)?;
        Ok(row.0)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, PurgeHubError> {
        let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_USERNAME)
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::from)?;
        Ok(row.map(|w| w.0))
    }
}
