use model::GraphMetadata;
use sqlx::{Executor, Postgres};

use crate::{
    error::{convert_error, Result, StorageError},
    rows::graph_metadata::GraphMetadataRow,
};

pub async fn insert<'c, E>(executor: E, metadata: GraphMetadata) -> Result<GraphMetadata>
where
    E: Executor<'c, Database = Postgres>,
{
    sqlx::query_as::<_, GraphMetadataRow>(
        "
        INSERT INTO graphs (version, dataset_version, total_nodes, total_edges, build_duration_ms, store_key, backup_path, created_at, active)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, false)
        RETURNING *;
        ",
    )
    .bind(&metadata.version)
    .bind(&metadata.dataset_version)
    .bind(metadata.total_nodes as i64)
    .bind(metadata.total_edges as i64)
    .bind(metadata.build_duration_ms as i64)
    .bind(&metadata.store_key)
    .bind(&metadata.backup_path)
    .bind(metadata.created_at)
    .fetch_one(executor)
    .await
    .map_err(convert_error)
    .map(GraphMetadataRow::into_model)
}

/// Same atomic clear-then-set pattern as `datasets::set_active`.
pub async fn set_active<'c, E>(executor: E, version: &str) -> Result<()>
where
    E: Executor<'c, Database = Postgres>,
{
    let result = sqlx::query(
        "
        UPDATE graphs
        SET active = (version = $1)
        WHERE (active = true OR version = $1)
          AND EXISTS (SELECT 1 FROM graphs WHERE version = $1);
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

pub async fn active<'c, E>(executor: E) -> Result<Option<GraphMetadata>>
where
    E: Executor<'c, Database = Postgres>,
{
    sqlx::query_as::<_, GraphMetadataRow>("SELECT * FROM graphs WHERE active = true LIMIT 1;")
        .fetch_optional(executor)
        .await
        .map_err(convert_error)
        .map(|row| row.map(GraphMetadataRow::into_model))
}

pub async fn for_dataset_version<'c, E>(
    executor: E,
    dataset_version: &str,
) -> Result<Option<GraphMetadata>>
where
    E: Executor<'c, Database = Postgres>,
{
    sqlx::query_as::<_, GraphMetadataRow>("SELECT * FROM graphs WHERE dataset_version = $1 LIMIT 1;")
        .bind(dataset_version)
        .fetch_optional(executor)
        .await
        .map_err(convert_error)
        .map(|row| row.map(GraphMetadataRow::into_model))
}

/// Deletes old graph metadata rows beyond the retention count, never the
/// active one, matching `deleteOldGraphMetadata(keepCount)`.
pub async fn delete_old<'c, E>(executor: E, keep_count: i64) -> Result<u64>
where
    E: Executor<'c, Database = Postgres>,
{
    let result = sqlx::query(
        "
        DELETE FROM graphs
        WHERE active = false
          AND id NOT IN (
              SELECT id FROM graphs ORDER BY created_at DESC LIMIT $1
          );
        ",
    )
    .bind(keep_count)
    .execute(executor)
    .await
    .map_err(convert_error)?;
    Ok(result.rows_affected())
}
