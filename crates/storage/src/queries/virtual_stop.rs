use model::VirtualStop;
use sqlx::{types::Json, Executor, Postgres, QueryBuilder};

use crate::{
    error::{convert_error, Result},
    rows::virtual_stop::{grid_type_tag, VirtualStopRow},
};

pub async fn save_batch<'c, E>(executor: E, stops: &[VirtualStop]) -> Result<u64>
where
    E: Executor<'c, Database = Postgres>,
{
    if stops.is_empty() {
        return Ok(0);
    }

    let mut builder = QueryBuilder::new(
        "INSERT INTO virtual_stops (id, name, latitude, longitude, grid_type, city_id, grid_position_x, grid_position_y, nearby_real_stops, created_at) ",
    );
    builder.push_values(stops, |mut row, stop| {
        row.push_bind(&stop.id)
            .push_bind(&stop.name)
            .push_bind(stop.latitude)
            .push_bind(stop.longitude)
            .push_bind(grid_type_tag(stop.grid_type))
            .push_bind(&stop.city_id)
            .push_bind(stop.grid_position.map(|(x, _)| x))
            .push_bind(stop.grid_position.map(|(_, y)| y))
            .push_bind(Json(stop.nearby_real_stops.clone()))
            .push_bind(stop.created_at);
    });
    builder.push(" ON CONFLICT (id) DO NOTHING;");

    let result = builder.build().execute(executor).await.map_err(convert_error)?;
    Ok(result.rows_affected())
}

pub async fn get_by_city_name<'c, E>(executor: E, name: &str) -> Result<Vec<VirtualStop>>
where
    E: Executor<'c, Database = Postgres>,
{
    let normalized = utility::normalize::normalize_city_name(name);
    sqlx::query_as::<_, VirtualStopRow>("SELECT * FROM virtual_stops WHERE city_id = $1;")
        .bind(&normalized)
        .fetch_all(executor)
        .await
        .map_err(convert_error)
        .map(|rows| rows.into_iter().map(VirtualStopRow::into_model).collect())
}

pub async fn get_all<'c, E>(executor: E) -> Result<Vec<VirtualStop>>
where
    E: Executor<'c, Database = Postgres>,
{
    sqlx::query_as::<_, VirtualStopRow>("SELECT * FROM virtual_stops;")
        .fetch_all(executor)
        .await
        .map_err(convert_error)
        .map(|rows| rows.into_iter().map(VirtualStopRow::into_model).collect())
}

pub async fn find_by_id<'c, E>(executor: E, id: &str) -> Result<Option<VirtualStop>>
where
    E: Executor<'c, Database = Postgres>,
{
    sqlx::query_as::<_, VirtualStopRow>("SELECT * FROM virtual_stops WHERE id = $1;")
        .bind(id)
        .fetch_optional(executor)
        .await
        .map_err(convert_error)
        .map(|row| row.map(VirtualStopRow::into_model))
}

pub async fn count<'c, E>(executor: E) -> Result<u64>
where
    E: Executor<'c, Database = Postgres>,
{
    let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM virtual_stops;")
        .fetch_one(executor)
        .await
        .map_err(convert_error)?;
    Ok(row.0.max(0) as u64)
}

/// Virtual stops are never updated in place; regeneration means dropping
/// the whole set first. Used by the idempotence precondition's complement —
/// an operator who wants to force a re-run clears the set before retrying.
pub async fn delete_all<'c, E>(executor: E) -> Result<u64>
where
    E: Executor<'c, Database = Postgres>,
{
    let result = sqlx::query("DELETE FROM virtual_stops;")
        .execute(executor)
        .await
        .map_err(convert_error)?;
    Ok(result.rows_affected())
}
