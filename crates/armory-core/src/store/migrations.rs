use super::ArmoryStore;
use crate::error::Result;

impl ArmoryStore {
    // ── Schema bootstrap ────────────────────────────────────────

    pub(crate) async fn run_migrations(&self) -> Result<()> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS Country (
                id      INTEGER PRIMARY KEY,
                country TEXT NOT NULL
            )",
        )
        .execute(&self.pool)
        .await?;

        // Ability columns live on the operator row; the Ability and
        // Operator_Ability tables hold rows from the older join-table layout.
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS Operator (
                id            INTEGER PRIMARY KEY,
                name          TEXT NOT NULL,
                info          TEXT,
                country       INTEGER REFERENCES Country(id),
                trait         TEXT,
                tactical_gear TEXT,
                gadget1       TEXT,
                gadget2       TEXT
            )",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS Ability (
                ability_id    INTEGER PRIMARY KEY,
                trait         TEXT,
                tactical_gear TEXT,
                gadget1       TEXT,
                gadget2       TEXT
            )",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS Operator_Ability (
                operator_id INTEGER NOT NULL REFERENCES Operator(id),
                ability_id  INTEGER NOT NULL REFERENCES Ability(ability_id),
                PRIMARY KEY (operator_id, ability_id)
            )",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS Weapon (
                id        INTEGER PRIMARY KEY,
                name      TEXT NOT NULL,
                category  TEXT,
                damage    INTEGER NOT NULL,
                fire_rate INTEGER,
                info      TEXT
            )",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_weapon_category ON Weapon(category)")
            .execute(&self.pool)
            .await?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS Ammo (
                id   INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                info TEXT
            )",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS Weapon_Ammo (
                weapon_id INTEGER NOT NULL REFERENCES Weapon(id),
                ammo_id   INTEGER NOT NULL REFERENCES Ammo(id),
                PRIMARY KEY (weapon_id, ammo_id)
            )",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS logins (
                id            INTEGER PRIMARY KEY AUTOINCREMENT,
                name          TEXT NOT NULL,
                email         TEXT NOT NULL UNIQUE,
                password_hash TEXT NOT NULL,
                salt          TEXT NOT NULL,
                role          TEXT NOT NULL DEFAULT 'user',
                created_at    TEXT NOT NULL
            )",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS sessions (
                token      TEXT PRIMARY KEY,
                account_id INTEGER NOT NULL REFERENCES logins(id) ON DELETE CASCADE,
                created_at TEXT NOT NULL
            )",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_sessions_account ON sessions(account_id)")
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
