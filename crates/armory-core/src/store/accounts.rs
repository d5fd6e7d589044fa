use super::{parse_timestamp, ArmoryStore};
use crate::error::{Error, Result};
use crate::password::{hash_password, verify_password};
use crate::types::{Account, NewAccount, Role};
use chrono::Utc;
use sqlx::Row;
use tracing::{debug, info};

const ACCOUNT_COLUMNS: &str = "id, name, email, role, created_at";

impl ArmoryStore {
    // ── Accounts ────────────────────────────────────────────────

    /// Register an account.
    ///
    /// The password is salted and hashed before storage. A second account
    /// with the same email is rejected with [`Error::DuplicateEmail`] by the
    /// table's unique constraint.
    pub async fn create_account(&self, new: &NewAccount) -> Result<Account> {
        if new.email.is_empty() {
            return Err(Error::Validation("email is required".to_string()));
        }
        if new.password.is_empty() {
            return Err(Error::Validation("password is required".to_string()));
        }

        let hashed = hash_password(&new.password);
        let now = Utc::now();

        let result = sqlx::query(
            "INSERT INTO logins (name, email, password_hash, salt, role, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        )
        .bind(&new.name)
        .bind(&new.email)
        .bind(&hashed.hash)
        .bind(&hashed.salt)
        .bind(new.role.to_string())
        .bind(now.to_rfc3339())
        .execute(&self.pool)
        .await;

        let id = match result {
            Ok(done) => done.last_insert_rowid(),
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                debug!(email = %new.email, "Registration rejected: duplicate email");
                return Err(Error::DuplicateEmail(new.email.clone()));
            }
            Err(e) => return Err(e.into()),
        };

        info!(account_id = id, role = %new.role, "Account registered");
        Ok(Account {
            id,
            name: new.name.clone(),
            email: new.email.clone(),
            role: new.role,
            created_at: now,
        })
    }

    /// Get an account by id.
    pub async fn get_account(&self, id: i64) -> Result<Option<Account>> {
        let row = sqlx::query(&format!("SELECT {ACCOUNT_COLUMNS} FROM logins WHERE id = ?1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(Self::row_to_account).transpose()
    }

    /// Find an account by email.
    pub async fn find_account_by_email(&self, email: &str) -> Result<Option<Account>> {
        let row = sqlx::query(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM logins WHERE email = ?1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(Self::row_to_account).transpose()
    }

    /// Check an email/password pair.
    ///
    /// Returns [`Error::InvalidCredentials`] for an unknown email or a wrong
    /// password alike.
    pub async fn verify_credentials(&self, email: &str, password: &str) -> Result<Account> {
        let row = sqlx::query(&format!(
            "SELECT {ACCOUNT_COLUMNS}, password_hash, salt FROM logins WHERE email = ?1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Err(Error::InvalidCredentials);
        };

        let hash: String = row.try_get("password_hash")?;
        let salt: String = row.try_get("salt")?;
        if !verify_password(password, &salt, &hash) {
            return Err(Error::InvalidCredentials);
        }

        Self::row_to_account(&row)
    }

    /// Number of registered accounts.
    pub async fn account_count(&self) -> Result<u32> {
        let row = sqlx::query("SELECT COUNT(*) AS n FROM logins")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.try_get::<i64, _>("n")? as u32)
    }

    pub(crate) fn row_to_account(row: &sqlx::sqlite::SqliteRow) -> Result<Account> {
        let role: String = row.try_get("role")?;
        let created: String = row.try_get("created_at")?;
        Ok(Account {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            email: row.try_get("email")?,
            role: Role::from_str_lossy(&role),
            created_at: parse_timestamp(&created),
        })
    }
}
