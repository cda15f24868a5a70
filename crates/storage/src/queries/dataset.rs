use model::{Dataset, DatasetCounts};
use sqlx::{Executor, Postgres};

use crate::{
    error::{convert_error, Result, StorageError},
    rows::dataset::DatasetRow,
};

pub async fn latest<'c, E>(executor: E) -> Result<Option<Dataset>>
where
    E: Executor<'c, Database = Postgres>,
{
    sqlx::query_as::<_, DatasetRow>(
        "SELECT * FROM datasets ORDER BY created_at DESC LIMIT 1;",
    )
    .fetch_optional(executor)
    .await
    .map_err(convert_error)
    .map(|row| row.map(DatasetRow::into_model))
}

pub async fn by_version<'c, E>(executor: E, version: &str) -> Result<Option<Dataset>>
where
    E: Executor<'c, Database = Postgres>,
{
    sqlx::query_as::<_, DatasetRow>("SELECT * FROM datasets WHERE version = $1;")
        .bind(version)
        .fetch_optional(executor)
        .await
        .map_err(convert_error)
        .map(|row| row.map(DatasetRow::into_model))
}

/// Single atomic statement: clears `active` everywhere and sets it on the
/// matching `version`, but only touches any row at all if that version
/// exists — so a missing target leaves the table untouched rather than
/// silently clearing the active flag with no replacement.
pub async fn set_active<'c, E>(executor: E, version: &str) -> Result<()>
where
    E: Executor<'c, Database = Postgres>,
{
    let result = sqlx::query(
        "
        UPDATE datasets
        SET active = (version = $1)
        WHERE (active = true OR version = $1)
          AND EXISTS (SELECT 1 FROM datasets WHERE version = $1);
        ",
    )
    .bind(version)
    .execute(executor)
    .await
    .map_err(convert_error)?;

    if result.rows_affected() == 0 {
        return Err(StorageError::ActivationTargetMissing);
    }
    Ok(())
}

pub async fn delete<'c, E>(executor: E, id: i64) -> Result<()>
where
    E: Executor<'c, Database = Postgres>,
{
    let result = sqlx::query("DELETE FROM datasets WHERE id = $1 AND active = false;")
        .bind(id)
        .execute(executor)
        .await
        .map_err(convert_error)?;

    if result.rows_affected() == 0 {
        return Err(StorageError::ActiveRowProtected);
    }
    Ok(())
}

pub async fn exists_by_odata_hash<'c, E>(executor: E, hash: &str) -> Result<bool>
where
    E: Executor<'c, Database = Postgres>,
{
    let row: (bool,) =
        sqlx::query_as("SELECT EXISTS(SELECT 1 FROM datasets WHERE content_hash = $1);")
            .bind(hash)
            .fetch_one(executor)
            .await
            .map_err(convert_error)?;
    Ok(row.0)
}

pub async fn update_counts<'c, E>(
    executor: E,
    version: &str,
    counts: DatasetCounts,
) -> Result<()>
where
    E: Executor<'c, Database = Postgres>,
{
    sqlx::query(
        "
        UPDATE datasets
        SET stops_count = $2, routes_count = $3, flights_count = $4,
            virtual_stops_count = $5, virtual_routes_count = $6
        WHERE version = $1;
        ",
    )
    .bind(version)
    .bind(counts.stops as i64)
    .bind(counts.routes as i64)
    .bind(counts.flights as i64)
    .bind(counts.virtual_stops as i64)
    .bind(counts.virtual_routes as i64)
    .execute(executor)
    .await
    .map_err(convert_error)?;
    Ok(())
}

/// Deletes inactive datasets beyond the `keep_count` most recent, never
/// touching the active row regardless of its age.
pub async fn delete_old<'c, E>(executor: E, keep_count: i64) -> Result<u64>
where
    E: Executor<'c, Database = Postgres>,
{
    let result = sqlx::query(
        "
        DELETE FROM datasets
        WHERE active = false
          AND id NOT IN (
              SELECT id FROM datasets ORDER BY created_at DESC LIMIT $1
          );
        ",
    )
    .bind(keep_count)
    .execute(executor)
    .await
    .map_err(convert_error)?;
    Ok(result.rows_affected())
}
