//! Nearby-player matching and invitation fan-out
//!
//! Candidates come from a coarse bounding-box query; the exact test is the
//! Haversine distance. Radii are tried in order and the first radius with at
//! least one match wins.

use futures::future::join_all;
use serde::Serialize;
use sportsconnect_api_types::{ApiId, GeoPoint, PublicProfile, User};
use sportsconnect_interfaces::{EmailMessage, Mailer};
use std::cmp::Ordering;
use std::collections::HashSet;
use tracing::{debug, info, warn};

use crate::errors::{RestError, RestResult};

/// A matched player and how far they are from the search origin
#[derive(Debug, Clone)]
pub struct PlayerDistance {
    pub user: User,
    pub distance_km: f64,
}

impl PlayerDistance {
    pub fn to_response(&self) -> NearbyPlayer {
        NearbyPlayer {
            player: self.user.public_profile(),
            distance_km: round_km(self.distance_km),
        }
    }
}

/// Wire shape of one match
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NearbyPlayer {
    pub player: PublicProfile,
    pub distance_km: f64,
}

/// Outcome of a radius search
#[derive(Debug, Clone)]
pub struct NearbyMatch {
    /// Radius that produced `matches`, or the last radius tried when empty
    pub radius_km: f64,
    /// Sorted by ascending distance
    pub matches: Vec<PlayerDistance>,
}

impl NearbyMatch {
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}

/// Search `candidates` around `origin`, widening through `radii` until someone matches.
///
/// Users without coordinates, users that do not play `game` and `exclude`
/// itself are never returned; duplicate candidates are collapsed.
pub fn find_nearby(
    candidates: &[User],
    origin: &GeoPoint,
    game: Option<&str>,
    radii: &[f64],
    exclude: Option<&ApiId>,
) -> NearbyMatch {
    let game = game.map(str::trim).filter(|g| !g.is_empty());
    let mut seen = HashSet::new();

    let eligible: Vec<(&User, f64)> = candidates
        .iter()
        .filter(|user| exclude != Some(&user.id))
        .filter(|user| game.is_none_or(|g| user.plays(g)))
        .filter_map(|user| user.coordinates.map(|point| (user, origin.distance_km(&point))))
        .filter(|(user, _)| seen.insert(user.id.clone()))
        .collect();

    let mut radius_km = 0.0;
    for &radius in radii {
        radius_km = radius;
        let mut matches: Vec<PlayerDistance> = eligible
            .iter()
            .filter(|(_, distance)| *distance <= radius)
            .map(|(user, distance)| PlayerDistance {
                user: (*user).clone(),
                distance_km: *distance,
            })
            .collect();

        if !matches.is_empty() {
            matches.sort_by(|a, b| {
                a.distance_km
                    .partial_cmp(&b.distance_km)
                    .unwrap_or(Ordering::Equal)
                    .then_with(|| a.user.id.as_str().cmp(b.user.id.as_str()))
            });
            debug!("{} players matched within {} km", matches.len(), radius);
            return NearbyMatch { radius_km, matches };
        }
    }

    NearbyMatch {
        radius_km,
        matches: Vec::new(),
    }
}

/// Invitation details shared by every email in one fan-out
#[derive(Debug, Clone)]
pub struct GameDetails<'a> {
    pub game: &'a str,
    pub time: &'a str,
    pub address: &'a str,
}

/// Result of one notification fan-out
#[derive(Debug, Clone, Default)]
pub struct NotifyOutcome {
    pub delivered: Vec<ApiId>,
    pub failed: Vec<ApiId>,
}

/// Email every matched player concurrently.
///
/// Individual failures are logged and skipped; the call only fails when not a
/// single email went out.
pub async fn notify_players(
    mailer: &dyn Mailer,
    players: &[PlayerDistance],
    details: &GameDetails<'_>,
) -> RestResult<NotifyOutcome> {
    let sends = players.iter().map(|p| async move {
        let message = EmailMessage::game_invitation(&p.user.email, details.game, details.time, details.address);
        (p.user.id.clone(), mailer.send(&message).await)
    });

    let mut outcome = NotifyOutcome::default();
    for (user_id, result) in join_all(sends).await {
        match result {
            Ok(()) => outcome.delivered.push(user_id),
            Err(e) => {
                warn!("Failed to notify player {}: {}", user_id, e);
                outcome.failed.push(user_id);
            }
        }
    }

    if outcome.delivered.is_empty() && !outcome.failed.is_empty() {
        return Err(RestError::bad_gateway("Failed to send notifications"));
    }

    info!(
        "Sent {} game invitations for {} ({} failed)",
        outcome.delivered.len(),
        details.game,
        outcome.failed.len()
    );
    Ok(outcome)
}

fn round_km(km: f64) -> f64 {
    (km * 100.0).round() / 100.0
}
