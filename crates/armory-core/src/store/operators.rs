use super::ArmoryStore;
use crate::aggregate::aggregate_operators;
use crate::error::Result;
use crate::types::{Operator, OperatorRow};
use sqlx::{Row, SqliteConnection};
use tracing::debug;

/// Flattened operator rows followed by legacy join-table ability rows.
///
/// Every operator contributes its own row first (so operators without any
/// abilities still appear), then one row per linked `Ability`.
const OPERATOR_ROWS_SQL: &str = "
    SELECT id, name, info, country_name, trait, tactical_gear, gadget1, gadget2
    FROM (
        SELECT O.id, O.name, O.info, C.country AS country_name,
               O.trait, O.tactical_gear, O.gadget1, O.gadget2,
               0 AS source, 0 AS seq
        FROM Operator AS O
        LEFT JOIN Country AS C ON O.country = C.id

        UNION ALL

        SELECT O.id, O.name, O.info, C.country AS country_name,
               A.trait, A.tactical_gear, A.gadget1, A.gadget2,
               1 AS source, OA.rowid AS seq
        FROM Operator AS O
        LEFT JOIN Country AS C ON O.country = C.id
        JOIN Operator_Ability AS OA ON O.id = OA.operator_id
        JOIN Ability AS A ON OA.ability_id = A.ability_id
    )
    WHERE ?1 IS NULL OR id = ?1
    ORDER BY id, source, seq";

impl ArmoryStore {
    // ── Operators ───────────────────────────────────────────────

    /// Raw operator/ability rows, optionally restricted to one operator.
    pub async fn operator_rows(&self, operator_id: Option<i64>) -> Result<Vec<OperatorRow>> {
        let rows = sqlx::query(OPERATOR_ROWS_SQL)
            .bind(operator_id)
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(Self::row_to_operator_row).collect()
    }

    /// All operators with abilities folded in.
    pub async fn list_operators(&self) -> Result<Vec<Operator>> {
        let operators = aggregate_operators(self.operator_rows(None).await?);
        debug!(count = operators.len(), "Listed operators");
        Ok(operators)
    }

    /// A single operator with abilities folded in.
    pub async fn get_operator(&self, id: i64) -> Result<Option<Operator>> {
        let operator = aggregate_operators(self.operator_rows(Some(id)).await?)
            .into_iter()
            .next();
        if operator.is_none() {
            debug!(operator_id = id, "Operator not found");
        }
        Ok(operator)
    }

    /// Insert or replace a country.
    pub async fn upsert_country(&self, id: i64, country: &str) -> Result<()> {
        let mut conn = self.pool.acquire().await?;
        write_country(&mut conn, id, country).await
    }

    /// Insert or replace an operator row (flattened ability columns).
    pub async fn upsert_operator(&self, row: &OperatorRow, country_id: Option<i64>) -> Result<()> {
        let mut conn = self.pool.acquire().await?;
        write_operator(&mut conn, row, country_id).await
    }

    /// Attach a legacy `Ability` row to an operator.
    pub async fn insert_legacy_ability(
        &self,
        operator_id: i64,
        ability_id: i64,
        ability: &OperatorRow,
    ) -> Result<()> {
        let mut conn = self.pool.acquire().await?;
        write_legacy_ability(&mut conn, operator_id, ability_id, ability).await
    }

    fn row_to_operator_row(row: &sqlx::sqlite::SqliteRow) -> Result<OperatorRow> {
        Ok(OperatorRow {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            info: row.try_get("info")?,
            country_name: row.try_get("country_name")?,
            trait_name: row.try_get("trait")?,
            tactical_gear: row.try_get("tactical_gear")?,
            gadget1: row.try_get("gadget1")?,
            gadget2: row.try_get("gadget2")?,
        })
    }
}

pub(super) async fn write_country(conn: &mut SqliteConnection, id: i64, country: &str) -> Result<()> {
    sqlx::query(
        "INSERT INTO Country (id, country) VALUES (?1, ?2)
         ON CONFLICT(id) DO UPDATE SET country = excluded.country",
    )
    .bind(id)
    .bind(country)
    .execute(&mut *conn)
    .await?;
    Ok(())
}

pub(super) async fn write_operator(
    conn: &mut SqliteConnection,
    row: &OperatorRow,
    country_id: Option<i64>,
) -> Result<()> {
    sqlx::query(
        "INSERT INTO Operator (id, name, info, country, trait, tactical_gear, gadget1, gadget2)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
         ON CONFLICT(id) DO UPDATE SET
            name = excluded.name,
            info = excluded.info,
            country = excluded.country,
            trait = excluded.trait,
            tactical_gear = excluded.tactical_gear,
            gadget1 = excluded.gadget1,
            gadget2 = excluded.gadget2",
    )
    .bind(row.id)
    .bind(&row.name)
    .bind(&row.info)
    .bind(country_id)
    .bind(&row.trait_name)
    .bind(&row.tactical_gear)
    .bind(&row.gadget1)
    .bind(&row.gadget2)
    .execute(&mut *conn)
    .await?;
    Ok(())
}

pub(super) async fn write_legacy_ability(
    conn: &mut SqliteConnection,
    operator_id: i64,
    ability_id: i64,
    ability: &OperatorRow,
) -> Result<()> {
    sqlx::query(
        "INSERT INTO Ability (ability_id, trait, tactical_gear, gadget1, gadget2)
         VALUES (?1, ?2, ?3, ?4, ?5)
         ON CONFLICT(ability_id) DO UPDATE SET
            trait = excluded.trait,
            tactical_gear = excluded.tactical_gear,
            gadget1 = excluded.gadget1,
            gadget2 = excluded.gadget2",
    )
    .bind(ability_id)
    .bind(&ability.trait_name)
    .bind(&ability.tactical_gear)
    .bind(&ability.gadget1)
    .bind(&ability.gadget2)
    .execute(&mut *conn)
    .await?;

    sqlx::query("INSERT OR IGNORE INTO Operator_Ability (operator_id, ability_id) VALUES (?1, ?2)")
        .bind(operator_id)
        .bind(ability_id)
        .execute(&mut *conn)
        .await?;
    Ok(())
}
