//! Nearby-player search, notification and chat room endpoints

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    response::IntoResponse,
    Json,
};
use sportsconnect_api_types::{BoundingBox, GeoPoint, NewChatRoom, NewInvitation, PublicProfile, UserUpdate};
use sportsconnect_web::{AuthContext, JsonBody};
use tracing::{debug, info};

use super::path_id;
use crate::{
    context::AppContext,
    errors::{RestError, RestResult},
    matchmaking::{find_nearby, notify_players, GameDetails},
    models::{
        required, NearbyPlayersQuery, NearbyPlayersResponse, NotifyPlayersRequest, NotifyPlayersResponse,
        ProfileResponse, UpdateLocationRequest,
    },
};

pub async fn notify_nearby_players(
    State(ctx): State<AppContext>,
    auth: AuthContext,
    JsonBody(request): JsonBody<NotifyPlayersRequest>,
) -> RestResult<impl IntoResponse> {
    let host = ctx.current_user(&auth).await?;

    let (Some(latitude), Some(longitude), Some(game), Some(time), Some(address)) = (
        request.latitude,
        request.longitude,
        required(&request.game),
        required(&request.time),
        required(&request.address),
    ) else {
        return Err(RestError::bad_request(
            "latitude, longitude, game, time, and address are required",
        ));
    };
    let origin = GeoPoint::new(latitude, longitude)?;

    let matchmaking = &ctx.settings.matchmaking;
    let radii = matchmaking.search_radii();
    let widest = radii.last().copied().unwrap_or(matchmaking.fallback_radius_km);

    let users = ctx.repositories.user_repository();
    let candidates = users.find_within(&BoundingBox::around(&origin, widest)).await?;
    debug!("{} candidates inside the {} km box", candidates.len(), widest);

    let found = find_nearby(&candidates, &origin, Some(game), &radii, Some(&host.id));
    if found.is_empty() {
        return Err(RestError::not_found(format!(
            "No players found within {} km for this game",
            widest
        )));
    }

    let details = GameDetails { game, time, address };
    let outcome = notify_players(ctx.mailer.as_ref(), &found.matches, &details).await?;

    let notified: Vec<_> = found
        .matches
        .iter()
        .filter(|m| outcome.delivered.contains(&m.user.id))
        .collect();

    let invitation = ctx
        .repositories
        .invitation_repository()
        .create(NewInvitation {
            host_id: host.id.clone(),
            game: game.to_string(),
            time: time.to_string(),
            address: address.to_string(),
            location: origin,
            radius_km: found.radius_km,
            invitees: outcome.delivered.clone(),
        })
        .await?;

    info!(
        "User {} invited {} players to {} (invitation {})",
        host.id,
        notified.len(),
        game,
        invitation.id
    );

    Ok(Json(NotifyPlayersResponse {
        message: format!("Notifications sent to {} players.", notified.len()),
        invitation_id: invitation.id,
        radius_km: found.radius_km,
        players: notified.iter().map(|m| m.to_response()).collect(),
    }))
}

pub async fn get_nearby_players(
    State(ctx): State<AppContext>,
    auth: AuthContext,
    query: Result<Query<NearbyPlayersQuery>, QueryRejection>,
) -> RestResult<impl IntoResponse> {
    let Query(query) = query.map_err(|rejection| RestError::bad_request(rejection.body_text()))?;
    let user = ctx.current_user(&auth).await?;

    let origin = match (query.latitude, query.longitude) {
        (Some(latitude), Some(longitude)) => GeoPoint::new(latitude, longitude)?,
        (None, None) => user.coordinates.ok_or_else(|| {
            RestError::bad_request("No stored location; pass latitude and longitude or update your location")
        })?,
        _ => return Err(RestError::bad_request("latitude and longitude must be given together")),
    };

    let matchmaking = &ctx.settings.matchmaking;
    let radius = query.radius.unwrap_or(matchmaking.initial_radius_km);
    if !radius.is_finite() || radius <= 0.0 {
        return Err(RestError::bad_request("radius must be a positive number of kilometres"));
    }
    let radius = radius.min(matchmaking.max_radius_km);

    let candidates = ctx
        .repositories
        .user_repository()
        .find_within(&BoundingBox::around(&origin, radius))
        .await?;
    let found = find_nearby(&candidates, &origin, query.game.as_deref(), &[radius], Some(&user.id));

    Ok(Json(NearbyPlayersResponse {
        radius_km: radius,
        players: found.matches.iter().map(|m| m.to_response()).collect(),
    }))
}

pub async fn update_player_location(
    State(ctx): State<AppContext>,
    auth: AuthContext,
    JsonBody(request): JsonBody<UpdateLocationRequest>,
) -> RestResult<impl IntoResponse> {
    let user = ctx.current_user(&auth).await?;
    let address = required(&request.address);

    let point = match (request.latitude, request.longitude, address) {
        (Some(latitude), Some(longitude), _) => GeoPoint::new(latitude, longitude)?,
        (None, None, Some(address)) => ctx.geocoder.coordinates(address).await?,
        _ => {
            return Err(RestError::bad_request(
                "Provide latitude and longitude, or an address",
            ))
        }
    };

    let updated = ctx
        .repositories
        .user_repository()
        .update_profile(
            &user.id,
            UserUpdate {
                location: address.map(str::to_string),
                coordinates: Some(point),
                ..UserUpdate::default()
            },
        )
        .await?;

    info!("Location updated for user {}", updated.id);
    Ok(Json(ProfileResponse::from(updated)))
}

pub async fn get_players_by_game(
    State(ctx): State<AppContext>,
    auth: AuthContext,
    Path(game_type): Path<String>,
) -> RestResult<impl IntoResponse> {
    let user = ctx.current_user(&auth).await?;
    let players: Vec<PublicProfile> = ctx
        .repositories
        .user_repository()
        .find_by_game(&game_type)
        .await?
        .iter()
        .filter(|p| p.id != user.id)
        .map(|p| p.public_profile())
        .collect();
    Ok(Json(players))
}

pub async fn accept_invitation(
    State(ctx): State<AppContext>,
    auth: AuthContext,
    Path(id): Path<String>,
) -> RestResult<impl IntoResponse> {
    let user = ctx.current_user(&auth).await?;
    let invitation = ctx
        .repositories
        .invitation_repository()
        .find_by_id(&path_id(id))
        .await?
        .ok_or_else(|| RestError::not_found("Invitation not found"))?;

    if !invitation.is_invited(&user.id) {
        return Err(RestError::forbidden("Not invited to this game"));
    }

    let rooms = ctx.repositories.chat_room_repository();
    let room = match &invitation.chat_room_id {
        Some(room_id) => rooms.add_participant(room_id, &user.id).await?,
        None => {
            let room = rooms
                .create(NewChatRoom {
                    participants: vec![invitation.host_id.clone(), user.id.clone()],
                    game: invitation.game.clone(),
                    time: Some(invitation.time.clone()),
                    location: invitation.location,
                })
                .await?;
            let linked = ctx
                .repositories
                .invitation_repository()
                .attach_chat_room(&invitation.id, &room.id)
                .await?;

            if linked == room.id {
                info!("Chat room {} opened for invitation {}", room.id, invitation.id);
                room
            } else {
                // Another acceptance linked its room first; join that one instead
                debug!(
                    "Invitation {} already has chat room {}, discarding room {}",
                    invitation.id, linked, room.id
                );
                rooms.delete(&room.id).await?;
                rooms.add_participant(&linked, &user.id).await?
            }
        }
    };

    Ok(Json(room))
}

pub async fn list_chat_rooms(State(ctx): State<AppContext>, auth: AuthContext) -> RestResult<impl IntoResponse> {
    let user = ctx.current_user(&auth).await?;
    let rooms = ctx.repositories.chat_room_repository().list_for_user(&user.id).await?;
    Ok(Json(rooms))
}
