//! Coach account endpoints

use axum::{extract::State, response::IntoResponse, Json};
use sportsconnect_api_types::{AccountKind, CoachUpdate, NewCoach, UserRole};
use sportsconnect_web::{created, AuthContext, JsonBody};
use tracing::{info, warn};

use super::duplicate_as;
use crate::{
    context::AppContext,
    errors::{RestError, RestResult},
    models::{
        non_blank, normalize_email, required, CoachAuthResponse, CoachProfileResponse, LoginRequest,
        RegisterCoachRequest, UpdateCoachRequest,
    },
    security::{hash_password, verify_password},
};

pub async fn register_coach(
    State(ctx): State<AppContext>,
    JsonBody(request): JsonBody<RegisterCoachRequest>,
) -> RestResult<impl IntoResponse> {
    let (Some(name), Some(email), Some(password), Some(phone), Some(specialization), Some(experience)) = (
        required(&request.name),
        required(&request.email),
        request.password.as_deref().filter(|p| !p.is_empty()),
        required(&request.phone),
        required(&request.specialization),
        required(&request.experience),
    ) else {
        return Err(RestError::bad_request("All fields are required"));
    };
    let email = normalize_email(email);

    let coaches = ctx.repositories.coach_repository();
    if coaches.find_by_email(&email).await?.is_some() {
        warn!("Coach registration rejected, email already registered: {}", email);
        return Err(RestError::bad_request("Coach already exists"));
    }

    let password_hash = hash_password(password, ctx.settings.bcrypt_cost).await?;
    let coach = coaches
        .create_coach(NewCoach {
            name: name.to_string(),
            email,
            password_hash,
            phone: phone.to_string(),
            specialization: specialization.to_string(),
            experience: experience.to_string(),
        })
        .await
        .map_err(duplicate_as("Coach already exists"))?;

    let token = ctx.jwt.generate_token(&coach.id, UserRole::Coach, AccountKind::Coach)?;
    info!("Coach registered: {} (ID: {})", coach.email, coach.id);
    Ok(created(CoachAuthResponse::new(&coach, token)))
}

pub async fn login_coach(
    State(ctx): State<AppContext>,
    JsonBody(request): JsonBody<LoginRequest>,
) -> RestResult<impl IntoResponse> {
    let (Some(email), Some(password)) = (required(&request.email), request.password.as_deref()) else {
        return Err(RestError::bad_request("Email and password are required"));
    };
    let email = normalize_email(email);

    let credentials = ctx.repositories.coach_repository().find_credentials(&email).await?;
    let verified = match &credentials {
        Some(c) => verify_password(password, &c.password_hash).await?,
        None => false,
    };
    let Some(coach) = credentials.filter(|_| verified).map(|c| c.coach) else {
        warn!("Coach login failed for {}", email);
        return Err(RestError::unauthorized("Invalid email or password"));
    };

    let token = ctx.jwt.generate_token(&coach.id, UserRole::Coach, AccountKind::Coach)?;
    info!("Coach login successful: {} (ID: {})", coach.email, coach.id);
    Ok(Json(CoachAuthResponse::new(&coach, token)))
}

pub async fn get_coach_profile(State(ctx): State<AppContext>, auth: AuthContext) -> RestResult<impl IntoResponse> {
    let coach = ctx.current_coach(&auth).await?;
    Ok(Json(CoachProfileResponse::from(coach)))
}

pub async fn update_coach_profile(
    State(ctx): State<AppContext>,
    auth: AuthContext,
    JsonBody(request): JsonBody<UpdateCoachRequest>,
) -> RestResult<impl IntoResponse> {
    let coach = ctx.current_coach(&auth).await?;
    let coaches = ctx.repositories.coach_repository();

    let email = non_blank(request.email)
        .map(|e| normalize_email(&e))
        .filter(|e| *e != coach.email);
    if let Some(email) = &email {
        if coaches.find_by_email(email).await?.is_some() {
            return Err(RestError::bad_request("Email is already in use"));
        }
    }

    let updated = coaches
        .update_profile(
            &coach.id,
            CoachUpdate {
                name: non_blank(request.name),
                email,
                phone: non_blank(request.phone),
                specialization: non_blank(request.specialization),
                experience: non_blank(request.experience),
            },
        )
        .await
        .map_err(duplicate_as("Email is already in use"))?;

    info!("Coach profile updated: {}", updated.id);
    Ok(Json(updated))
}
