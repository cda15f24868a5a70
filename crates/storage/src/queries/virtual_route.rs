use model::VirtualRoute;
use sqlx::{types::Json, Executor, Postgres, QueryBuilder};

use crate::{
    error::{convert_error, Result},
    rows::virtual_route::{route_type_tag, transport_mode_tag, VirtualRouteRow},
};

pub async fn save_batch<'c, E>(executor: E, routes: &[VirtualRoute]) -> Result<u64>
where
    E: Executor<'c, Database = Postgres>,
{
    if routes.is_empty() {
        return Ok(0);
    }

    let mut builder = QueryBuilder::new(
        "INSERT INTO virtual_routes (id, route_type, from_stop_id, to_stop_id, distance_km, duration_minutes, transport_mode, metadata, created_at) ",
    );
    builder.push_values(routes, |mut row, route| {
        row.push_bind(&route.id)
            .push_bind(route_type_tag(route.route_type))
            .push_bind(&route.from_stop_id)
            .push_bind(&route.to_stop_id)
            .push_bind(route.distance_km)
            .push_bind(route.duration_minutes)
            .push_bind(transport_mode_tag(route.transport_mode))
            .push_bind(Json(route.metadata.clone()))
            .push_bind(route.created_at);
    });
    builder.push(" ON CONFLICT (id) DO NOTHING;");

    let result = builder.build().execute(executor).await.map_err(convert_error)?;
    Ok(result.rows_affected())
}

pub async fn get_all<'c, E>(executor: E) -> Result<Vec<VirtualRoute>>
where
    E: Executor<'c, Database = Postgres>,
{
    sqlx::query_as::<_, VirtualRouteRow>("SELECT * FROM virtual_routes;")
        .fetch_all(executor)
        .await
        .map_err(convert_error)
        .map(|rows| rows.into_iter().map(VirtualRouteRow::into_model).collect())
}

pub async fn find_direct<'c, E>(
    executor: E,
    from_stop_id: &str,
    to_stop_id: &str,
) -> Result<Option<VirtualRoute>>
where
    E: Executor<'c, Database = Postgres>,
{
    sqlx::query_as::<_, VirtualRouteRow>(
        "SELECT * FROM virtual_routes WHERE from_stop_id = $1 AND to_stop_id = $2 LIMIT 1;",
    )
    .bind(from_stop_id)
    .bind(to_stop_id)
    .fetch_optional(executor)
    .await
    .map_err(convert_error)
    .map(|row| row.map(VirtualRouteRow::into_model))
}

pub async fn delete_all<'c, E>(executor: E) -> Result<u64>
where
    E: Executor<'c, Database = Postgres>,
{
    let result = sqlx::query("DELETE FROM virtual_routes;")
        .execute(executor)
        .await
        .map_err(convert_error)?;
    Ok(result.rows_affected())
}
