//! Venue catalogue and slot booking

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use sportsconnect_api_types::{NewVenue, VenueUpdate};
use sportsconnect_web::{created, AuthContext, JsonBody, MessageResponse};
use tracing::{info, warn};

use super::path_id;
use crate::{
    context::AppContext,
    errors::{RestError, RestResult},
    models::{non_blank, required, BookVenueRequest, BookingResponse, CreateVenueRequest, UpdateVenueRequest},
};

const SLOT_UNAVAILABLE: &str = "Selected time is not available";

pub async fn list_venues(State(ctx): State<AppContext>) -> RestResult<impl IntoResponse> {
    let venues = ctx.repositories.venue_repository().list().await?;
    Ok(Json(venues))
}

pub async fn get_venue(State(ctx): State<AppContext>, Path(id): Path<String>) -> RestResult<impl IntoResponse> {
    let venue = ctx
        .repositories
        .venue_repository()
        .find_by_id(&path_id(id))
        .await?
        .ok_or_else(|| RestError::not_found("Venue not found"))?;
    Ok(Json(venue))
}

pub async fn create_venue(
    State(ctx): State<AppContext>,
    auth: AuthContext,
    JsonBody(request): JsonBody<CreateVenueRequest>,
) -> RestResult<impl IntoResponse> {
    let admin = ctx.current_admin(&auth).await?;

    let (Some(name), Some(image), Some(location), Some(price)) = (
        required(&request.name),
        required(&request.image),
        required(&request.location),
        required(&request.price),
    ) else {
        return Err(RestError::bad_request("All fields are required"));
    };
    let (Some(facilities), Some(rating), Some(reviews), Some(available_slots)) = (
        request.facilities,
        request.rating,
        request.reviews,
        request.available_slots,
    ) else {
        return Err(RestError::bad_request("All fields are required"));
    };
    validate_rating(rating)?;

    let venue = ctx
        .repositories
        .venue_repository()
        .create(NewVenue {
            name: name.to_string(),
            image: image.to_string(),
            location: location.to_string(),
            price: price.to_string(),
            facilities,
            rating,
            reviews,
            available_slots: clean_slots(available_slots),
        })
        .await?;

    info!("Admin {} created venue {}", admin.id, venue.id);
    Ok(created(venue))
}

pub async fn update_venue(
    State(ctx): State<AppContext>,
    auth: AuthContext,
    Path(id): Path<String>,
    JsonBody(request): JsonBody<UpdateVenueRequest>,
) -> RestResult<impl IntoResponse> {
    let admin = ctx.current_admin(&auth).await?;
    if let Some(rating) = request.rating {
        validate_rating(rating)?;
    }

    let update = VenueUpdate {
        name: non_blank(request.name),
        image: non_blank(request.image),
        location: non_blank(request.location),
        price: non_blank(request.price),
        facilities: request.facilities,
        rating: request.rating,
        reviews: request.reviews,
        available_slots: request.available_slots.map(clean_slots),
    };

    let venue = ctx.repositories.venue_repository().update(&path_id(id), update).await?;
    info!("Admin {} updated venue {}", admin.id, venue.id);
    Ok(Json(venue))
}

pub async fn delete_venue(
    State(ctx): State<AppContext>,
    auth: AuthContext,
    Path(id): Path<String>,
) -> RestResult<impl IntoResponse> {
    let admin = ctx.current_admin(&auth).await?;
    let id = path_id(id);
    ctx.repositories.venue_repository().delete(&id).await?;

    info!("Admin {} deleted venue {}", admin.id, id);
    Ok(MessageResponse::new("Venue deleted successfully"))
}

pub async fn book_venue(
    State(ctx): State<AppContext>,
    auth: AuthContext,
    JsonBody(request): JsonBody<BookVenueRequest>,
) -> RestResult<impl IntoResponse> {
    let user = ctx.current_user(&auth).await?;
    let (Some(venue_id), Some(slot)) = (required(&request.venue_id), required(&request.selected_time)) else {
        return Err(RestError::bad_request("venueId and selectedTime are required"));
    };
    let venue_id = path_id(venue_id.to_string());

    let venues = ctx.repositories.venue_repository();
    let venue = venues
        .find_by_id(&venue_id)
        .await?
        .ok_or_else(|| RestError::not_found("Venue not found"))?;
    if !venue.available_slots.iter().any(|s| s == slot) {
        return Err(RestError::bad_request(SLOT_UNAVAILABLE));
    }

    // Someone else may have taken the slot since the read above
    let Some(venue) = venues.take_slot(&venue.id, slot).await? else {
        warn!("Slot {} at venue {} was taken concurrently", slot, venue.id);
        return Err(RestError::bad_request(SLOT_UNAVAILABLE));
    };

    let booking = ctx
        .repositories
        .booking_repository()
        .record(&venue.id, &user.id, slot)
        .await?;

    info!("User {} booked {} at venue {}", user.id, slot, venue.id);
    Ok(Json(BookingResponse {
        message: "Booking confirmed".to_string(),
        venue,
        booking,
    }))
}

fn validate_rating(rating: f64) -> RestResult<()> {
    if !rating.is_finite() || !(0.0..=5.0).contains(&rating) {
        return Err(RestError::bad_request("Rating must be between 0 and 5"));
    }
    Ok(())
}

/// Trim slots and drop blanks and duplicates, keeping the given order
fn clean_slots(slots: Vec<String>) -> Vec<String> {
    let mut cleaned: Vec<String> = Vec::with_capacity(slots.len());
    for slot in slots {
        let slot = slot.trim().to_string();
        if !slot.is_empty() && !cleaned.contains(&slot) {
            cleaned.push(slot);
        }
    }
    cleaned
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_slots() {
        let slots = vec![" 10:00 ".to_string(), "".to_string(), "10:00".to_string(), "11:00".to_string()];
        assert_eq!(clean_slots(slots), vec!["10:00", "11:00"]);
    }

    #[test]
    fn test_rating_bounds() {
        assert!(validate_rating(4.5).is_ok());
        assert!(validate_rating(5.1).is_err());
        assert!(validate_rating(f64::NAN).is_err());
    }
}
