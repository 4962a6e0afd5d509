//! Authenticated proxy to the maps provider

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    response::IntoResponse,
    Json,
};
use sportsconnect_web::AuthContext;
use tracing::debug;

use crate::{
    context::AppContext,
    errors::{RestError, RestResult},
    models::{required, CoordinatesQuery, CoordinatesResponse, DistanceQuery, SuggestionsQuery},
};

fn parse_query<T>(query: Result<Query<T>, QueryRejection>) -> RestResult<T> {
    query
        .map(|Query(inner)| inner)
        .map_err(|rejection| RestError::bad_request(rejection.body_text()))
}

pub async fn get_coordinates(
    State(ctx): State<AppContext>,
    _auth: AuthContext,
    query: Result<Query<CoordinatesQuery>, QueryRejection>,
) -> RestResult<impl IntoResponse> {
    let query = parse_query(query)?;
    let address = required(&query.address).ok_or_else(|| RestError::bad_request("Address is required"))?;

    debug!("Geocoding address: {}", address);
    let point = ctx.geocoder.coordinates(address).await?;
    Ok(Json(CoordinatesResponse::from(point)))
}

pub async fn get_distance(
    State(ctx): State<AppContext>,
    _auth: AuthContext,
    query: Result<Query<DistanceQuery>, QueryRejection>,
) -> RestResult<impl IntoResponse> {
    let query = parse_query(query)?;
    let (Some(origin), Some(destination)) = (required(&query.origin), required(&query.destination)) else {
        return Err(RestError::bad_request("Origin and destination are required"));
    };

    let estimate = ctx.geocoder.distance_and_time(origin, destination).await?;
    Ok(Json(estimate))
}

pub async fn get_place_suggestions(
    State(ctx): State<AppContext>,
    _auth: AuthContext,
    query: Result<Query<SuggestionsQuery>, QueryRejection>,
) -> RestResult<impl IntoResponse> {
    let query = parse_query(query)?;
    let input = required(&query.input).ok_or_else(|| RestError::bad_request("Input is required"))?;

    let suggestions = ctx.geocoder.place_suggestions(input).await?;
    Ok(Json(suggestions))
}
