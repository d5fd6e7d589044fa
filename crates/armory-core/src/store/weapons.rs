use super::ArmoryStore;
use crate::category::WeaponCategory;
use crate::error::Result;
use crate::types::{Ammo, Weapon, WeaponDetail};
use sqlx::{Row, SqliteConnection};
use tracing::debug;

const WEAPON_COLUMNS: &str = "id, name, category, damage, fire_rate, info";

impl ArmoryStore {
    // ── Weapons ─────────────────────────────────────────────────

    /// All weapons, ordered by id.
    pub async fn list_weapons(&self) -> Result<Vec<Weapon>> {
        let rows = sqlx::query(&format!("SELECT {WEAPON_COLUMNS} FROM Weapon ORDER BY id"))
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(Self::row_to_weapon).collect()
    }

    /// Get a weapon by id.
    pub async fn get_weapon(&self, id: i64) -> Result<Option<Weapon>> {
        let row = sqlx::query(&format!("SELECT {WEAPON_COLUMNS} FROM Weapon WHERE id = ?1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(Self::row_to_weapon).transpose()
    }

    /// Ammunition linked to a weapon, ordered by ammo id.
    pub async fn ammo_for_weapon(&self, weapon_id: i64) -> Result<Vec<Ammo>> {
        let rows = sqlx::query(
            "SELECT A.id, A.name, A.info
             FROM Ammo AS A
             JOIN Weapon_Ammo AS WA ON WA.ammo_id = A.id
             WHERE WA.weapon_id = ?1
             ORDER BY A.id",
        )
        .bind(weapon_id)
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| -> Result<Ammo> {
                Ok(Ammo {
                    id: row.try_get("id")?,
                    name: row.try_get("name")?,
                    info: row.try_get("info")?,
                })
            })
            .collect()
    }

    /// Weapon plus ammo. An unknown id yields an empty detail, not an error.
    pub async fn weapon_detail(&self, id: i64) -> Result<WeaponDetail> {
        let Some(weapon) = self.get_weapon(id).await? else {
            debug!(weapon_id = id, "Weapon not found");
            return Ok(WeaponDetail {
                weapon: None,
                category: None,
                ammo: Vec::new(),
            });
        };

        let ammo = self.ammo_for_weapon(id).await?;
        Ok(WeaponDetail {
            category: weapon.effective_category(),
            weapon: Some(weapon),
            ammo,
        })
    }

    /// Weapons in a category.
    ///
    /// Matches rows whose explicit category equals the key, plus rows with no
    /// category whose id falls in the category's legacy range.
    pub async fn weapons_by_category(&self, category: WeaponCategory) -> Result<Vec<Weapon>> {
        let range = category.id_range();
        let rows = sqlx::query(&format!(
            "SELECT {WEAPON_COLUMNS} FROM Weapon
             WHERE TRIM(category) = ?1
                OR (COALESCE(TRIM(category), '') = '' AND id BETWEEN ?2 AND ?3)
             ORDER BY id"
        ))
        .bind(category.as_str())
        .bind(*range.start())
        .bind(*range.end())
        .fetch_all(&self.pool)
        .await?;

        let weapons: Vec<Weapon> = rows.iter().map(Self::row_to_weapon).collect::<Result<_>>()?;
        debug!(category = %category, count = weapons.len(), "Weapons by category");
        Ok(weapons)
    }

    /// Weapons for a raw category key. Unknown keys match nothing.
    pub async fn weapons_by_category_key(&self, key: &str) -> Result<Vec<Weapon>> {
        match WeaponCategory::parse(key) {
            Some(category) => self.weapons_by_category(category).await,
            None => {
                debug!(key, "Unknown weapon category");
                Ok(Vec::new())
            }
        }
    }

    /// Insert or replace a weapon.
    pub async fn upsert_weapon(&self, weapon: &Weapon) -> Result<()> {
        let mut conn = self.pool.acquire().await?;
        write_weapon(&mut conn, weapon).await
    }

    /// Insert or replace an ammo type.
    pub async fn upsert_ammo(&self, ammo: &Ammo) -> Result<()> {
        let mut conn = self.pool.acquire().await?;
        write_ammo(&mut conn, ammo).await
    }

    /// Link an ammo type to a weapon. No-op if already linked.
    pub async fn link_ammo(&self, weapon_id: i64, ammo_id: i64) -> Result<()> {
        let mut conn = self.pool.acquire().await?;
        write_ammo_link(&mut conn, weapon_id, ammo_id).await
    }

    pub(crate) fn row_to_weapon(row: &sqlx::sqlite::SqliteRow) -> Result<Weapon> {
        Ok(Weapon {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            category: row.try_get("category")?,
            damage: row.try_get("damage")?,
            fire_rate: row.try_get("fire_rate")?,
            info: row.try_get("info")?,
        })
    }
}

pub(super) async fn write_weapon(conn: &mut SqliteConnection, weapon: &Weapon) -> Result<()> {
    sqlx::query(
        "INSERT INTO Weapon (id, name, category, damage, fire_rate, info)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)
         ON CONFLICT(id) DO UPDATE SET
            name = excluded.name,
            category = excluded.category,
            damage = excluded.damage,
            fire_rate = excluded.fire_rate,
            info = excluded.info",
    )
    .bind(weapon.id)
    .bind(&weapon.name)
    .bind(&weapon.category)
    .bind(weapon.damage)
    .bind(weapon.fire_rate)
    .bind(&weapon.info)
    .execute(&mut *conn)
    .await?;
    Ok(())
}

pub(super) async fn write_ammo(conn: &mut SqliteConnection, ammo: &Ammo) -> Result<()> {
    sqlx::query(
        "INSERT INTO Ammo (id, name, info) VALUES (?1, ?2, ?3)
         ON CONFLICT(id) DO UPDATE SET name = excluded.name, info = excluded.info",
    )
    .bind(ammo.id)
    .bind(&ammo.name)
    .bind(&ammo.info)
    .execute(&mut *conn)
    .await?;
    Ok(())
}

pub(super) async fn write_ammo_link(
    conn: &mut SqliteConnection,
    weapon_id: i64,
    ammo_id: i64,
) -> Result<()> {
    sqlx::query("INSERT OR IGNORE INTO Weapon_Ammo (weapon_id, ammo_id) VALUES (?1, ?2)")
        .bind(weapon_id)
        .bind(ammo_id)
        .execute(&mut *conn)
        .await?;
    Ok(())
}
