use model::RealStop;
use sqlx::{types::Json, Executor, Postgres, QueryBuilder};

use crate::{
    error::{convert_error, Result},
    rows::stop::RealStopRow,
};

/// Upserts every stop in one multi-row `INSERT ... ON CONFLICT` statement, so
/// the whole batch commits or none of it does: a single SQL statement is
/// atomic regardless of whether the caller is inside an explicit transaction.
pub async fn save_batch<'c, E>(executor: E, stops: &[RealStop]) -> Result<u64>
where
    E: Executor<'c, Database = Postgres>,
{
    if stops.is_empty() {
        return Ok(0);
    }

    let mut builder = QueryBuilder::new(
        "INSERT INTO stops (id, name, latitude, longitude, city_id, is_airport, is_railway_station, metadata, created_at, updated_at) ",
    );
    builder.push_values(stops, |mut row, stop| {
        row.push_bind(&stop.id)
            .push_bind(&stop.name)
            .push_bind(stop.latitude)
            .push_bind(stop.longitude)
            .push_bind(&stop.city_id)
            .push_bind(stop.is_airport)
            .push_bind(stop.is_railway_station)
            .push_bind(Json(stop.metadata.clone()))
            .push_bind(stop.created_at)
            .push_bind(stop.updated_at);
    });
    builder.push(
        "
        ON CONFLICT (id) DO UPDATE SET
            name = EXCLUDED.name,
            latitude = EXCLUDED.latitude,
            longitude = EXCLUDED.longitude,
            city_id = EXCLUDED.city_id,
            is_airport = EXCLUDED.is_airport,
            is_railway_station = EXCLUDED.is_railway_station,
            metadata = EXCLUDED.metadata,
            updated_at = EXCLUDED.updated_at;
        ",
    );

    let result = builder.build().execute(executor).await.map_err(convert_error)?;
    Ok(result.rows_affected())
}

/// Great-circle radius search using the spherical law of cosines with
/// R = 6371 km, evaluated at the database level so it agrees with
/// `utility::geo::spherical_law_of_cosines_km` for in-memory callers.
pub async fn find_nearby<'c, E>(
    executor: E,
    latitude: f64,
    longitude: f64,
    radius_km: f64,
) -> Result<Vec<RealStop>>
where
    E: Executor<'c, Database = Postgres>,
{
    sqlx::query_as::<_, RealStopRow>(
        "
        SELECT *,
            6371 * acos(
                LEAST(1.0, GREATEST(-1.0,
                    sin(radians($1)) * sin(radians(latitude))
                    + cos(radians($1)) * cos(radians(latitude)) * cos(radians(longitude - $2))
                ))
            ) AS distance_km
        FROM stops
        WHERE 6371 * acos(
            LEAST(1.0, GREATEST(-1.0,
                sin(radians($1)) * sin(radians(latitude))
                + cos(radians($1)) * cos(radians(latitude)) * cos(radians(longitude - $2))
            ))
        ) <= $3
        ORDER BY distance_km ASC;
        ",
    )
    .bind(latitude)
    .bind(longitude)
    .bind(radius_km)
    .fetch_all(executor)
    .await
    .map_err(convert_error)
    .map(|rows| rows.into_iter().map(RealStopRow::into_model).collect())
}

/// Matches, in priority order: exact equality on normalized `city_id`,
/// prefix/substring on `city_id`, full-text match on `name`, and a
/// normalized (`ё→е`) substring match — with exact-`city_id` rows sorted
/// first. Capped at 100 rows per spec.
pub async fn get_by_city_name<'c, E>(executor: E, name: &str) -> Result<Vec<RealStop>>
where
    E: Executor<'c, Database = Postgres>,
{
    let normalized = utility::normalize::normalize_city_name(name);
    let folded = normalized.replace('ё', "е");
    let pattern = format!("%{normalized}%");
    let folded_pattern = format!("%{folded}%");

    sqlx::query_as::<_, RealStopRow>(
        "
        SELECT * FROM stops
        WHERE city_id = $1
           OR city_id ILIKE $2
           OR to_tsvector('russian', name) @@ plainto_tsquery('russian', $1)
           OR replace(city_id, 'ё', 'е') ILIKE $3
        ORDER BY (city_id = $1) DESC, name ASC
        LIMIT 100;
        ",
    )
    .bind(&normalized)
    .bind(&pattern)
    .bind(&folded_pattern)
    .fetch_all(executor)
    .await
    .map_err(convert_error)
    .map(|rows| rows.into_iter().map(RealStopRow::into_model).collect())
}

pub async fn get_all<'c, E>(executor: E) -> Result<Vec<RealStop>>
where
    E: Executor<'c, Database = Postgres>,
{
    sqlx::query_as::<_, RealStopRow>("SELECT * FROM stops;")
        .fetch_all(executor)
        .await
        .map_err(convert_error)
        .map(|rows| rows.into_iter().map(RealStopRow::into_model).collect())
}

pub async fn find_by_id<'c, E>(executor: E, id: &str) -> Result<Option<RealStop>>
where
    E: Executor<'c, Database = Postgres>,
{
    sqlx::query_as::<_, RealStopRow>("SELECT * FROM stops WHERE id = $1;")
        .bind(id)
        .fetch_optional(executor)
        .await
        .map_err(convert_error)
        .map(|row| row.map(RealStopRow::into_model))
}
