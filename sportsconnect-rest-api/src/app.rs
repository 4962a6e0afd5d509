//! Main application configuration and router setup

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use sportsconnect_config::CorsConfig;
use sportsconnect_web::{auth_middleware, cors_layer, error_logging_middleware, handle_not_found, request_id_middleware};
use std::time::Duration;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::{context::AppContext, handlers};

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// CORS policy; `None` disables the layer
    pub cors: Option<CorsConfig>,
    /// Enable request ID tracking
    pub enable_request_id: bool,
    /// Enable request tracing
    pub enable_tracing: bool,
    /// Abort requests that run longer than this
    pub request_timeout: Option<Duration>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            cors: Some(CorsConfig::default()),
            enable_request_id: true,
            enable_tracing: true,
            request_timeout: Some(Duration::from_secs(30)),
        }
    }
}

/// Create the complete REST API application
pub fn create_rest_app(context: AppContext, config: AppConfig) -> Router {
    let app = Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health_check))
        .route("/health/ready", get(handlers::readiness_check))
        .nest("/api/users", user_routes(&context))
        .nest("/api/coaches", coach_routes(&context))
        .nest("/api/tournaments", tournament_routes(&context))
        .nest("/api/players", player_routes(&context))
        .nest("/api/maps", map_routes(&context))
        .nest("/api", venue_routes(&context))
        .fallback(handle_not_found)
        .with_state(context);

    // Add middleware layers (applied in reverse order)
    let mut app = app.layer(middleware::from_fn(error_logging_middleware));

    if let Some(timeout) = config.request_timeout {
        app = app.layer(TimeoutLayer::new(timeout));
    }

    if let Some(cors) = &config.cors {
        app = app.layer(cors_layer(cors));
    }

    if config.enable_tracing {
        app = app.layer(TraceLayer::new_for_http());
    }

    if config.enable_request_id {
        app = app.layer(middleware::from_fn(request_id_middleware));
    }

    app
}

fn user_routes(ctx: &AppContext) -> Router<AppContext> {
    let auth = middleware::from_fn_with_state(ctx.jwt.clone(), auth_middleware);

    Router::new()
        .route("/register", post(handlers::register_user))
        .route("/login", post(handlers::login_user))
        .route("/forgot-password", post(handlers::forgot_password))
        .route("/reset-password/{token}", post(handlers::reset_password))
        .route("/google-login", post(handlers::google_login))
        .route("/leaderboard", get(handlers::get_leaderboard))
        .route(
            "/profile",
            get(handlers::get_user_profile)
                .put(handlers::update_user_profile)
                .route_layer(auth),
        )
}

fn coach_routes(ctx: &AppContext) -> Router<AppContext> {
    let auth = middleware::from_fn_with_state(ctx.jwt.clone(), auth_middleware);

    Router::new()
        .route("/register", post(handlers::register_coach))
        .route("/login", post(handlers::login_coach))
        .route(
            "/profile",
            get(handlers::get_coach_profile)
                .put(handlers::update_coach_profile)
                .route_layer(auth),
        )
}

fn tournament_routes(ctx: &AppContext) -> Router<AppContext> {
    let auth = middleware::from_fn_with_state(ctx.jwt.clone(), auth_middleware);

    Router::new()
        .route(
            "/",
            get(handlers::list_tournaments).merge(post(handlers::create_tournament).route_layer(auth.clone())),
        )
        .route(
            "/my/tournaments",
            get(handlers::list_my_tournaments).route_layer(auth.clone()),
        )
        .route(
            "/{id}",
            get(handlers::get_tournament).merge(
                put(handlers::update_tournament)
                    .delete(handlers::delete_tournament)
                    .route_layer(auth),
            ),
        )
}

fn venue_routes(ctx: &AppContext) -> Router<AppContext> {
    let auth = middleware::from_fn_with_state(ctx.jwt.clone(), auth_middleware);

    Router::new()
        .route(
            "/venues",
            get(handlers::list_venues).merge(post(handlers::create_venue).route_layer(auth.clone())),
        )
        .route(
            "/venues/{id}",
            get(handlers::get_venue).merge(
                put(handlers::update_venue)
                    .delete(handlers::delete_venue)
                    .route_layer(auth.clone()),
            ),
        )
        .route("/book", post(handlers::book_venue).route_layer(auth))
}

fn player_routes(ctx: &AppContext) -> Router<AppContext> {
    let auth = middleware::from_fn_with_state(ctx.jwt.clone(), auth_middleware);

    Router::new()
        .route("/notify", post(handlers::notify_nearby_players))
        .route("/nearby", get(handlers::get_nearby_players))
        .route("/location", put(handlers::update_player_location))
        .route("/game/{game_type}", get(handlers::get_players_by_game))
        .route("/invitations/{id}/accept", post(handlers::accept_invitation))
        .route("/chat-rooms", get(handlers::list_chat_rooms))
        .route_layer(auth)
}

fn map_routes(ctx: &AppContext) -> Router<AppContext> {
    let auth = middleware::from_fn_with_state(ctx.jwt.clone(), auth_middleware);

    Router::new()
        .route("/coordinates", get(handlers::get_coordinates))
        .route("/distance", get(handlers::get_distance))
        .route("/suggestions", get(handlers::get_place_suggestions))
        .route_layer(auth)
}
