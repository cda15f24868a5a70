use chrono::{Datelike, NaiveDate};
use model::Flight;
use sqlx::{types::Json, Executor, Postgres, QueryBuilder};

use crate::{
    error::{convert_error, Result},
    rows::flight::{transport_type_tag, FlightRow},
};

pub async fn save_batch<'c, E>(executor: E, flights: &[Flight]) -> Result<u64>
where
    E: Executor<'c, Database = Postgres>,
{
    if flights.is_empty() {
        return Ok(0);
    }

    let mut builder = QueryBuilder::new(
        "INSERT INTO flights (id, from_stop_id, to_stop_id, departure_time, arrival_time, days_of_week, route_id, price_rub, is_virtual, transport_type, metadata) ",
    );
    builder.push_values(flights, |mut row, flight| {
        let days: Vec<i16> = flight.days_of_week.iter().map(|d| *d as i16).collect();
        row.push_bind(&flight.id)
            .push_bind(&flight.from_stop_id)
            .push_bind(&flight.to_stop_id)
            .push_bind(&flight.departure_time)
            .push_bind(&flight.arrival_time)
            .push_bind(days)
            .push_bind(&flight.route_id)
            .push_bind(flight.price_rub)
            .push_bind(flight.is_virtual)
            .push_bind(transport_type_tag(flight.transport_type))
            .push_bind(Json(flight.metadata.clone()));
    });
    builder.push(" ON CONFLICT (id) DO NOTHING;");

    let result = builder.build().execute(executor).await.map_err(convert_error)?;
    Ok(result.rows_affected())
}

/// Returns flights between two stops that run on `date`'s day of week,
/// ordered deterministically (by departure time) so segment hydration's
/// "pick the first" policy is stable across calls.
pub async fn get_between_stops<'c, E>(
    executor: E,
    from_stop_id: &str,
    to_stop_id: &str,
    date: NaiveDate,
) -> Result<Vec<Flight>>
where
    E: Executor<'c, Database = Postgres>,
{
    let iso_weekday = date.weekday().number_from_monday() as i16;

    sqlx::query_as::<_, FlightRow>(
        "
        SELECT * FROM flights
        WHERE from_stop_id = $1 AND to_stop_id = $2 AND $3 = ANY(days_of_week)
        ORDER BY departure_time ASC;
        ",
    )
    .bind(from_stop_id)
    .bind(to_stop_id)
    .bind(iso_weekday)
    .fetch_all(executor)
    .await
    .map_err(convert_error)
    .map(|rows| rows.into_iter().map(FlightRow::into_model).collect())
}

pub async fn get_all<'c, E>(executor: E) -> Result<Vec<Flight>>
where
    E: Executor<'c, Database = Postgres>,
{
    sqlx::query_as::<_, FlightRow>("SELECT * FROM flights;")
        .fetch_all(executor)
        .await
        .map_err(convert_error)
        .map(|rows| rows.into_iter().map(FlightRow::into_model).collect())
}

pub async fn delete_all_virtual<'c, E>(executor: E) -> Result<u64>
where
    E: Executor<'c, Database = Postgres>,
{
    let result = sqlx::query("DELETE FROM flights WHERE is_virtual = true;")
        .execute(executor)
        .await
        .map_err(convert_error)?;
    Ok(result.rows_affected())
}
