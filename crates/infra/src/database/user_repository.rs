//! SQLite implementation of the UserRepository port.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use reserva_core::UserRepository;
use reserva_domain::{ReservaError, Result, TokenSet, User};
use rusqlite::{params, Row};
use tracing::{debug, instrument};
use uuid::Uuid;

use super::manager::{datetime_from_ts, DbManager};
use crate::errors::InfraError;

const SELECT_COLUMNS: &str = "id, email, name, avatar_url, role, google_sub,
        access_token, refresh_token, token_expiry, created_at, updated_at";

/// SQLite implementation of UserRepository
pub struct SqliteUserRepository {
    db: Arc<DbManager>,
}

impl SqliteUserRepository {
    /// Create a new user repository.
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }

    fn find_by(&self, predicate: &str, value: &dyn rusqlite::ToSql) -> Result<Option<User>> {
        let conn = self.db.get_connection()?;
        let result = conn.query_row(
            &format!("SELECT {SELECT_COLUMNS} FROM users WHERE {predicate} = ?1"),
            [value],
            UserRow::from_row,
        );

        match result {
            Ok(row) => Ok(Some(row.into_domain()?)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(InfraError::from(e).into()),
        }
    }
}

struct UserRow {
    id: String,
    email: String,
    name: Option<String>,
    avatar_url: Option<String>,
    role: String,
    google_sub: Option<String>,
    access_token: Option<String>,
    refresh_token: Option<String>,
    token_expiry: Option<i64>,
    created_at: i64,
    updated_at: i64,
}

impl UserRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            email: row.get(1)?,
            name: row.get(2)?,
            avatar_url: row.get(3)?,
            role: row.get(4)?,
            google_sub: row.get(5)?,
            access_token: row.get(6)?,
            refresh_token: row.get(7)?,
            token_expiry: row.get(8)?,
            created_at: row.get(9)?,
            updated_at: row.get(10)?,
        })
    }

    fn into_domain(self) -> Result<User> {
        Ok(User {
            id: self
                .id
                .parse()
                .map_err(|e| ReservaError::Database(format!("malformed uuid in store: {e}")))?,
            email: self.email,
            name: self.name,
            avatar_url: self.avatar_url,
            role: self.role.parse()?,
            google_sub: self.google_sub,
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            token_expiry: self.token_expiry.map(datetime_from_ts).transpose()?,
            created_at: datetime_from_ts(self.created_at)?,
            updated_at: datetime_from_ts(self.updated_at)?,
        })
    }
}

#[async_trait]
impl UserRepository for SqliteUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>> {
        self.find_by("id", &id.to_string())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        self.find_by("email", &email)
    }

    #[instrument(skip(self, user), fields(user_email = %user.email))]
    async fn upsert(&self, user: &User) -> Result<()> {
        let conn = self.db.get_connection()?;

        // Profile fields only: token columns are owned by update_tokens /
        // clear_tokens so a profile refresh can never tear the pair.
        conn.execute(
            "INSERT INTO users (
                id, email, name, avatar_url, role, google_sub, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            ON CONFLICT(email) DO UPDATE SET
                name = excluded.name,
                avatar_url = excluded.avatar_url,
                google_sub = excluded.google_sub,
                updated_at = excluded.updated_at",
            params![
                user.id.to_string(),
                user.email,
                user.name,
                user.avatar_url,
                user.role.as_str(),
                user.google_sub,
                user.created_at.timestamp(),
                user.updated_at.timestamp(),
            ],
        )
        .map_err(InfraError::from)?;

        debug!(user_email = %user.email, "user upserted");
        Ok(())
    }

    #[instrument(skip(self, tokens))]
    async fn update_tokens(&self, user_id: Uuid, tokens: &TokenSet) -> Result<()> {
        let conn = self.db.get_connection()?;

        // COALESCE keeps the stored refresh token when the provider did not
        // rotate one. Concurrent refreshes are last-write-wins by design.
        let changed = conn
            .execute(
                "UPDATE users
                 SET access_token = ?2,
                     refresh_token = COALESCE(?3, refresh_token),
                     token_expiry = ?4,
                     updated_at = ?5
                 WHERE id = ?1",
                params![
                    user_id.to_string(),
                    tokens.access_token,
                    tokens.refresh_token,
                    tokens.expires_at.map(|t| t.timestamp()),
                    Utc::now().timestamp(),
                ],
            )
            .map_err(InfraError::from)?;

        if changed == 0 {
            return Err(ReservaError::NotFound(format!("user {user_id}")));
        }
        Ok(())
    }

    #[instrument(skip(self))]
    async fn clear_tokens(&self, user_id: Uuid) -> Result<()> {
        let conn = self.db.get_connection()?;
        let changed = conn
            .execute(
                "UPDATE users
                 SET access_token = NULL, refresh_token = NULL, token_expiry = NULL,
                     updated_at = ?2
                 WHERE id = ?1",
                params![user_id.to_string(), Utc::now().timestamp()],
            )
            .map_err(InfraError::from)?;

        if changed == 0 {
            return Err(ReservaError::NotFound(format!("user {user_id}")));
        }
        Ok(())
    }
}
