use super::{parse_timestamp, ArmoryStore};
use crate::error::Result;
use crate::types::{Account, Session};
use chrono::Utc;
use sqlx::Row;
use tracing::debug;
use uuid::Uuid;

impl ArmoryStore {
    // ── Sessions ────────────────────────────────────────────────

    /// Open a session for an account and return its token.
    pub async fn create_session(&self, account_id: i64) -> Result<Session> {
        let session = Session {
            token: Uuid::new_v4().as_simple().to_string(),
            account_id,
            created_at: Utc::now(),
        };

        sqlx::query("INSERT INTO sessions (token, account_id, created_at) VALUES (?1, ?2, ?3)")
            .bind(&session.token)
            .bind(session.account_id)
            .bind(session.created_at.to_rfc3339())
            .execute(&self.pool)
            .await?;

        debug!(account_id, "Session opened");
        Ok(session)
    }

    /// Look up a session record by token.
    pub async fn get_session(&self, token: &str) -> Result<Option<Session>> {
        let row = sqlx::query("SELECT token, account_id, created_at FROM sessions WHERE token = ?1")
            .bind(token)
            .fetch_optional(&self.pool)
            .await?;

        row.map(|row| -> Result<Session> {
            let created: String = row.try_get("created_at")?;
            Ok(Session {
                token: row.try_get("token")?,
                account_id: row.try_get("account_id")?,
                created_at: parse_timestamp(&created),
            })
        })
        .transpose()
    }

    /// Resolve the account signed in with a session token.
    pub async fn session_account(&self, token: &str) -> Result<Option<Account>> {
        let row = sqlx::query(
            "SELECT L.id, L.name, L.email, L.role, L.created_at
             FROM sessions AS S
             JOIN logins AS L ON L.id = S.account_id
             WHERE S.token = ?1",
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(Self::row_to_account).transpose()
    }

    /// Close a session. Returns whether a session was removed.
    pub async fn delete_session(&self, token: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM sessions WHERE token = ?1")
            .bind(token)
            .execute(&self.pool)
            .await?;

        let deleted = result.rows_affected() > 0;
        debug!(deleted, "Session closed");
        Ok(deleted)
    }
}
