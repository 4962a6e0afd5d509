//! User account endpoints: registration, login, password reset, Google
//! sign-in, profile and leaderboard

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use sportsconnect_api_types::{AccountKind, NewUser, PublicProfile, UserRole, UserUpdate};
use sportsconnect_interfaces::{DatabaseError, EmailMessage};
use sportsconnect_web::{created, AuthContext, JsonBody, MessageResponse};
use tracing::{info, warn};

use super::duplicate_as;
use crate::{
    context::AppContext,
    errors::{RestError, RestResult},
    models::{
        non_blank, normalize_email, required, AuthResponse, ForgotPasswordRequest, ForgotPasswordResponse,
        GoogleLoginRequest, LoginRequest, ProfileResponse, RegisterUserRequest, ResetPasswordRequest,
        UpdateProfileRequest,
    },
    security::{hash_password, hash_reset_token, random_hex, verify_password, ResetToken},
};

/// Number of users on the leaderboard
pub const LEADERBOARD_SIZE: u64 = 10;

const INVALID_CREDENTIALS: &str = "Invalid email or password";

pub async fn register_user(
    State(ctx): State<AppContext>,
    JsonBody(request): JsonBody<RegisterUserRequest>,
) -> RestResult<impl IntoResponse> {
    let (Some(name), Some(email), Some(password)) = (
        required(&request.name),
        required(&request.email),
        request.password.as_deref().filter(|p| !p.is_empty()),
    ) else {
        return Err(RestError::bad_request("Name, email and password are required"));
    };
    let email = normalize_email(email);
    info!("Registration attempt for user: {}", email);

    let role = match required(&request.role) {
        Some(role) => role.parse::<UserRole>().map_err(RestError::bad_request)?,
        None => UserRole::Player,
    };

    let users = ctx.repositories.user_repository();
    if users.find_by_email(&email).await?.is_some() {
        warn!("Registration rejected, email already registered: {}", email);
        return Err(RestError::bad_request("User already exists"));
    }

    let password_hash = hash_password(password, ctx.settings.bcrypt_cost).await?;
    let user = users
        .create_user(NewUser {
            name: name.to_string(),
            email,
            password_hash,
            phone: non_blank(request.phone),
            specialization: non_blank(request.specialization),
            experience: non_blank(request.experience),
            role,
        })
        .await
        .map_err(duplicate_as("User already exists"))?;

    let token = ctx.jwt.generate_token(&user.id, user.role, AccountKind::User)?;
    info!("Registration successful for user: {} (ID: {})", user.email, user.id);
    Ok(created(AuthResponse::new(&user, token)))
}

pub async fn login_user(
    State(ctx): State<AppContext>,
    JsonBody(request): JsonBody<LoginRequest>,
) -> RestResult<impl IntoResponse> {
    let (Some(email), Some(password)) = (required(&request.email), request.password.as_deref()) else {
        return Err(RestError::bad_request("Email and password are required"));
    };
    let email = normalize_email(email);
    info!("Login attempt for user: {}", email);

    let Some(credentials) = ctx.repositories.user_repository().find_credentials(&email).await? else {
        warn!("Login failed: user not found: {}", email);
        return Err(RestError::unauthorized(INVALID_CREDENTIALS));
    };

    if !verify_password(password, &credentials.password_hash).await? {
        warn!("Login failed: invalid password for user: {}", email);
        return Err(RestError::unauthorized(INVALID_CREDENTIALS));
    }

    let user = credentials.user;
    let token = ctx.jwt.generate_token(&user.id, user.role, AccountKind::User)?;
    info!("Login successful for user: {} (ID: {})", user.email, user.id);
    Ok(Json(AuthResponse::new(&user, token)))
}

pub async fn forgot_password(
    State(ctx): State<AppContext>,
    JsonBody(request): JsonBody<ForgotPasswordRequest>,
) -> RestResult<impl IntoResponse> {
    let email = required(&request.email)
        .map(normalize_email)
        .ok_or_else(|| RestError::bad_request("Email is required"))?;

    let users = ctx.repositories.user_repository();
    let user = users
        .find_by_email(&email)
        .await?
        .ok_or_else(|| RestError::not_found("User not found"))?;

    let reset = ResetToken::generate();
    let expires_at = Utc::now() + ctx.settings.reset_token_ttl;
    users.set_reset_token(&user.id, &reset.token_hash, expires_at).await?;

    let reset_url = format!(
        "{}/api/users/reset-password/{}",
        ctx.settings.public_base_url, reset.token
    );
    ctx.mailer
        .send(&EmailMessage::password_reset(&user.email, &reset_url))
        .await?;
    info!("Password reset requested for user {}", user.id);

    Ok(Json(ForgotPasswordResponse {
        message: format!("Password reset link sent to {}", user.email),
        reset_url: ctx.settings.expose_reset_url.then_some(reset_url),
    }))
}

pub async fn reset_password(
    State(ctx): State<AppContext>,
    Path(token): Path<String>,
    JsonBody(request): JsonBody<ResetPasswordRequest>,
) -> RestResult<impl IntoResponse> {
    let password = request
        .password
        .as_deref()
        .filter(|p| !p.is_empty())
        .ok_or_else(|| RestError::bad_request("Password is required"))?;

    let users = ctx.repositories.user_repository();
    let user = users
        .find_by_reset_token(&hash_reset_token(&token), Utc::now())
        .await?
        .ok_or_else(|| RestError::bad_request("Invalid or expired token"))?;

    let password_hash = hash_password(password, ctx.settings.bcrypt_cost).await?;
    users.complete_password_reset(&user.id, &password_hash).await?;

    info!("Password reset completed for user {}", user.id);
    Ok(MessageResponse::new("Password reset successfully"))
}

pub async fn google_login(
    State(ctx): State<AppContext>,
    JsonBody(request): JsonBody<GoogleLoginRequest>,
) -> RestResult<impl IntoResponse> {
    let id_token = required(&request.id_token).ok_or_else(|| RestError::bad_request("Google login failed"))?;
    let identity = ctx.identity.verify(id_token).await?;
    let email = normalize_email(&identity.email);

    let users = ctx.repositories.user_repository();
    let user = match users.find_by_email(&email).await? {
        Some(user) => user,
        None => {
            // Google accounts never log in with a password
            let password_hash = hash_password(&random_hex(32), ctx.settings.bcrypt_cost).await?;
            let name = identity
                .name
                .clone()
                .filter(|n| !n.trim().is_empty())
                .unwrap_or_else(|| email.split('@').next().unwrap_or_default().to_string());

            match users
                .create_user(NewUser {
                    name,
                    email: email.clone(),
                    password_hash,
                    role: UserRole::Player,
                    ..NewUser::default()
                })
                .await
            {
                Ok(user) => {
                    info!("Created user {} from Google sign-in", user.id);
                    user
                }
                // Lost a race with a concurrent first sign-in
                Err(DatabaseError::Constraint { .. }) => users
                    .find_by_email(&email)
                    .await?
                    .ok_or_else(|| RestError::internal_error("User vanished after constraint violation"))?,
                Err(e) => return Err(e.into()),
            }
        }
    };

    let token = ctx.jwt.generate_token(&user.id, user.role, AccountKind::User)?;
    Ok(Json(AuthResponse::new(&user, token)))
}

pub async fn get_user_profile(State(ctx): State<AppContext>, auth: AuthContext) -> RestResult<impl IntoResponse> {
    let user = ctx.current_user(&auth).await?;
    Ok(Json(ProfileResponse::from(user)))
}

pub async fn update_user_profile(
    State(ctx): State<AppContext>,
    auth: AuthContext,
    JsonBody(request): JsonBody<UpdateProfileRequest>,
) -> RestResult<impl IntoResponse> {
    let user = ctx.current_user(&auth).await?;
    let users = ctx.repositories.user_repository();

    let email = non_blank(request.email)
        .map(|e| normalize_email(&e))
        .filter(|e| *e != user.email);
    if let Some(email) = &email {
        if users.find_by_email(email).await?.is_some() {
            return Err(RestError::bad_request("Email is already in use"));
        }
    }

    let favorite_games = request.favorite_games.map(|games| {
        games
            .into_iter()
            .map(|g| g.trim().to_string())
            .filter(|g| !g.is_empty())
            .collect::<Vec<_>>()
    });

    let update = UserUpdate {
        name: non_blank(request.name),
        email,
        phone: non_blank(request.phone),
        profile_image: non_blank(request.profile_image),
        favorite_games,
        location: non_blank(request.location),
        coordinates: None,
    };

    let updated = users
        .update_profile(&user.id, update)
        .await
        .map_err(duplicate_as("Email is already in use"))?;
    info!("Profile updated for user {}", updated.id);
    Ok(Json(ProfileResponse::from(updated)))
}

pub async fn get_leaderboard(State(ctx): State<AppContext>) -> RestResult<impl IntoResponse> {
    let leaders: Vec<PublicProfile> = ctx
        .repositories
        .user_repository()
        .leaderboard(LEADERBOARD_SIZE)
        .await?
        .iter()
        .map(|user| user.public_profile())
        .collect();
    Ok(Json(leaders))
}
