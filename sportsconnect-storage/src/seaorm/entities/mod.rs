//! SeaORM entities

pub mod bookings;
pub mod chat_room_participants;
pub mod chat_rooms;
pub mod coaches;
pub mod invitations;
pub mod tournaments;
pub mod users;
pub mod venues;

pub use bookings::Entity as Bookings;
pub use chat_room_participants::Entity as ChatRoomParticipants;
pub use chat_rooms::Entity as ChatRooms;
pub use coaches::Entity as Coaches;
pub use invitations::Entity as Invitations;
pub use tournaments::Entity as Tournaments;
pub use users::Entity as Users;
pub use venues::Entity as Venues;

use sea_orm::entity::prelude::Json;

/// Decode a JSON array column into strings, skipping anything that is not a string
pub(crate) fn json_to_strings(value: &Json) -> Vec<String> {
    value
        .as_array()
        .map(|items| items.iter().filter_map(|v| v.as_str().map(str::to_string)).collect())
        .unwrap_or_default()
}

pub(crate) fn strings_to_json(values: &[String]) -> Json {
    Json::Array(values.iter().cloned().map(Json::String).collect())
}

/// Decode a JSON array column of integer ids
pub(crate) fn json_to_ids(value: &Json) -> Vec<i32> {
    value
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|v| v.as_i64().and_then(|n| i32::try_from(n).ok()))
                .collect()
        })
        .unwrap_or_default()
}

pub(crate) fn ids_to_json(values: &[i32]) -> Json {
    Json::Array(values.iter().map(|id| Json::from(*id)).collect())
}
