use model::Route;
use sqlx::{types::Json, Executor, Postgres, QueryBuilder};

use crate::{
    error::{convert_error, Result},
    rows::route::{transport_type_tag, RouteRow},
};

pub async fn save_batch<'c, E>(executor: E, routes: &[Route]) -> Result<u64>
where
    E: Executor<'c, Database = Postgres>,
{
    if routes.is_empty() {
        return Ok(0);
    }

    let mut builder = QueryBuilder::new(
        "INSERT INTO routes (id, transport_type, from_stop_id, to_stop_id, stops, duration_minutes, distance_km, operator, route_number, metadata, created_at, updated_at) ",
    );
    builder.push_values(routes, |mut row, route| {
        row.push_bind(&route.id)
            .push_bind(transport_type_tag(route.transport_type))
            .push_bind(&route.from_stop_id)
            .push_bind(&route.to_stop_id)
            .push_bind(Json(route.stops.clone()))
            .push_bind(route.duration_minutes)
            .push_bind(route.distance_km)
            .push_bind(&route.operator)
            .push_bind(&route.route_number)
            .push_bind(Json(route.metadata.clone()))
            .push_bind(route.created_at)
            .push_bind(route.updated_at);
    });
    builder.push(
        "
        ON CONFLICT (id) DO UPDATE SET
            transport_type = EXCLUDED.transport_type,
            from_stop_id = EXCLUDED.from_stop_id,
            to_stop_id = EXCLUDED.to_stop_id,
            stops = EXCLUDED.stops,
            duration_minutes = EXCLUDED.duration_minutes,
            distance_km = EXCLUDED.distance_km,
            operator = EXCLUDED.operator,
            route_number = EXCLUDED.route_number,
            metadata = EXCLUDED.metadata,
            updated_at = EXCLUDED.updated_at;
        ",
    );

    let result = builder.build().execute(executor).await.map_err(convert_error)?;
    Ok(result.rows_affected())
}

pub async fn get_all<'c, E>(executor: E) -> Result<Vec<Route>>
where
    E: Executor<'c, Database = Postgres>,
{
    sqlx::query_as::<_, RouteRow>("SELECT * FROM routes;")
        .fetch_all(executor)
        .await
        .map_err(convert_error)
        .map(|rows| rows.into_iter().map(RouteRow::into_model).collect())
}

pub async fn find_direct<'c, E>(
    executor: E,
    from_stop_id: &str,
    to_stop_id: &str,
) -> Result<Option<Route>>
where
    E: Executor<'c, Database = Postgres>,
{
    sqlx::query_as::<_, RouteRow>(
        "SELECT * FROM routes WHERE from_stop_id = $1 AND to_stop_id = $2 LIMIT 1;",
    )
    .bind(from_stop_id)
    .bind(to_stop_id)
    .fetch_optional(executor)
    .await
    .map_err(convert_error)
    .map(|row| row.map(RouteRow::into_model))
}
