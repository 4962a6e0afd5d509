//! Tournament endpoints. Listing is public; writes belong to the hosting coach.

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use sportsconnect_api_types::{Coach, NewTournament, Tournament, TournamentUpdate};
use sportsconnect_web::{created, AuthContext, JsonBody, MessageResponse};
use tracing::{info, warn};

use super::path_id;
use crate::{
    context::AppContext,
    errors::{RestError, RestResult},
    models::{non_blank, parse_tournament_date, required, CreateTournamentRequest, UpdateTournamentRequest},
};

const INVALID_DATE: &str = "Invalid tournament date";

pub async fn create_tournament(
    State(ctx): State<AppContext>,
    auth: AuthContext,
    JsonBody(request): JsonBody<CreateTournamentRequest>,
) -> RestResult<impl IntoResponse> {
    let coach = ctx.current_coach(&auth).await?;

    let (Some(title), Some(description), Some(location), Some(date), Some(banner)) = (
        required(&request.title),
        required(&request.description),
        required(&request.location),
        required(&request.date),
        required(&request.banner),
    ) else {
        return Err(RestError::bad_request("All fields are required"));
    };
    let date = parse_tournament_date(date).ok_or_else(|| RestError::bad_request(INVALID_DATE))?;

    let tournament = ctx
        .repositories
        .tournament_repository()
        .create(NewTournament {
            title: title.to_string(),
            description: description.to_string(),
            location: location.to_string(),
            date,
            banner: banner.to_string(),
            hosted_by: coach.id.clone(),
        })
        .await?;

    info!("Coach {} created tournament {}", coach.id, tournament.id);
    Ok(created(tournament))
}

pub async fn list_tournaments(State(ctx): State<AppContext>) -> RestResult<impl IntoResponse> {
    let tournaments = ctx.repositories.tournament_repository().list().await?;
    Ok(Json(tournaments))
}

pub async fn list_my_tournaments(State(ctx): State<AppContext>, auth: AuthContext) -> RestResult<impl IntoResponse> {
    let coach = ctx.current_coach(&auth).await?;
    let tournaments = ctx.repositories.tournament_repository().list_by_host(&coach.id).await?;
    Ok(Json(tournaments))
}

pub async fn get_tournament(State(ctx): State<AppContext>, Path(id): Path<String>) -> RestResult<impl IntoResponse> {
    let tournament = find_tournament(&ctx, id).await?;
    Ok(Json(tournament))
}

pub async fn update_tournament(
    State(ctx): State<AppContext>,
    auth: AuthContext,
    Path(id): Path<String>,
    JsonBody(request): JsonBody<UpdateTournamentRequest>,
) -> RestResult<impl IntoResponse> {
    let coach = ctx.current_coach(&auth).await?;
    let tournament = find_tournament(&ctx, id).await?;
    ensure_host(&coach, &tournament, "Not authorized to update this tournament")?;

    let date = match non_blank(request.date) {
        Some(raw) => Some(parse_tournament_date(&raw).ok_or_else(|| RestError::bad_request(INVALID_DATE))?),
        None => None,
    };

    let updated = ctx
        .repositories
        .tournament_repository()
        .update(
            &tournament.id,
            TournamentUpdate {
                title: non_blank(request.title),
                description: non_blank(request.description),
                location: non_blank(request.location),
                date,
                banner: non_blank(request.banner),
            },
        )
        .await?;

    info!("Tournament {} updated by coach {}", updated.id, coach.id);
    Ok(Json(updated))
}

pub async fn delete_tournament(
    State(ctx): State<AppContext>,
    auth: AuthContext,
    Path(id): Path<String>,
) -> RestResult<impl IntoResponse> {
    let coach = ctx.current_coach(&auth).await?;
    let tournament = find_tournament(&ctx, id).await?;
    ensure_host(&coach, &tournament, "Not authorized to delete this tournament")?;

    ctx.repositories.tournament_repository().delete(&tournament.id).await?;

    info!("Tournament {} deleted by coach {}", tournament.id, coach.id);
    Ok(MessageResponse::new("Tournament deleted successfully"))
}

async fn find_tournament(ctx: &AppContext, id: String) -> RestResult<Tournament> {
    ctx.repositories
        .tournament_repository()
        .find_by_id(&path_id(id))
        .await?
        .ok_or_else(|| RestError::not_found("Tournament not found"))
}

fn ensure_host(coach: &Coach, tournament: &Tournament, message: &str) -> RestResult<()> {
    if tournament.hosted_by != coach.id {
        warn!("Coach {} is not the host of tournament {}", coach.id, tournament.id);
        return Err(RestError::forbidden(message));
    }
    Ok(())
}
