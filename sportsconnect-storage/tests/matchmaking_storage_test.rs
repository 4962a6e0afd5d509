//! Invitation, chat room and booking persistence through the repository factory

use sportsconnect_api_types::{ApiId, GeoPoint, NewChatRoom, NewInvitation, NewUser, NewVenue};
use sportsconnect_interfaces::RepositoryFactory;
use sportsconnect_storage::{DatabaseConnection, SeaOrmRepositoryFactory};

async fn factory() -> SeaOrmRepositoryFactory {
    SeaOrmRepositoryFactory::new(DatabaseConnection::in_memory().await.unwrap())
}

async fn player(factory: &SeaOrmRepositoryFactory, email: &str) -> ApiId {
    factory
        .user_repository()
        .create_user(NewUser {
            name: email.to_string(),
            email: email.to_string(),
            password_hash: "hash".to_string(),
            ..NewUser::default()
        })
        .await
        .unwrap()
        .id
}

fn pune() -> GeoPoint {
    GeoPoint::new(18.5204, 73.8567).unwrap()
}

#[tokio::test]
async fn test_invitation_round_trip_and_chat_room_attach() {
    let factory = factory().await;
    let host = player(&factory, "host@example.com").await;
    let guest = player(&factory, "guest@example.com").await;
    let outsider = player(&factory, "outsider@example.com").await;

    let invitation = factory
        .invitation_repository()
        .create(NewInvitation {
            host_id: host.clone(),
            game: "Football".to_string(),
            time: "6 PM".to_string(),
            address: "Baner, Pune".to_string(),
            location: pune(),
            radius_km: 3.0,
            invitees: vec![guest.clone()],
        })
        .await
        .unwrap();

    assert!(invitation.is_invited(&guest));
    assert!(!invitation.is_invited(&outsider));
    assert!(invitation.chat_room_id.is_none());

    let room = factory
        .chat_room_repository()
        .create(NewChatRoom {
            participants: vec![host.clone(), guest.clone()],
            game: "Football".to_string(),
            time: Some("6 PM".to_string()),
            location: pune(),
        })
        .await
        .unwrap();
    assert_eq!(room.participants.len(), 2);

    let linked = factory
        .invitation_repository()
        .attach_chat_room(&invitation.id, &room.id)
        .await
        .unwrap();
    assert_eq!(linked, room.id);

    let stored = factory
        .invitation_repository()
        .find_by_id(&invitation.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.chat_room_id, Some(room.id.clone()));
    assert_eq!(stored.invitees, vec![guest]);
}

#[tokio::test]
async fn test_add_participant_is_idempotent() {
    let factory = factory().await;
    let host = player(&factory, "host@example.com").await;
    let guest = player(&factory, "guest@example.com").await;
    let rooms = factory.chat_room_repository();

    let room = rooms
        .create(NewChatRoom {
            participants: vec![host.clone(), host.clone()],
            game: "Chess".to_string(),
            time: None,
            location: pune(),
        })
        .await
        .unwrap();
    assert_eq!(room.participants, vec![host.clone()]);

    let once = rooms.add_participant(&room.id, &guest).await.unwrap();
    let twice = rooms.add_participant(&room.id, &guest).await.unwrap();
    assert_eq!(once.participants.len(), 2);
    assert_eq!(twice.participants.len(), 2);
    assert!(twice.participants.contains(&guest));
}

#[tokio::test]
async fn test_chat_rooms_listed_newest_first_per_user() {
    let factory = factory().await;
    let host = player(&factory, "host@example.com").await;
    let guest = player(&factory, "guest@example.com").await;
    let rooms = factory.chat_room_repository();

    let mut created = Vec::new();
    for game in ["Football", "Cricket"] {
        let room = rooms
            .create(NewChatRoom {
                participants: vec![host.clone()],
                game: game.to_string(),
                time: None,
                location: pune(),
            })
            .await
            .unwrap();
        created.push(room.id);
    }
    rooms.add_participant(&created[0], &guest).await.unwrap();

    let host_rooms: Vec<_> = rooms
        .list_for_user(&host)
        .await
        .unwrap()
        .into_iter()
        .map(|r| r.game)
        .collect();
    assert_eq!(host_rooms, vec!["Cricket", "Football"]);

    let guest_rooms = rooms.list_for_user(&guest).await.unwrap();
    assert_eq!(guest_rooms.len(), 1);
    assert_eq!(guest_rooms[0].game, "Football");
    assert!(rooms.list_for_user(&ApiId::from(404)).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_booking_recorded_for_user() {
    let factory = factory().await;
    let user = player(&factory, "booker@example.com").await;
    let venue = factory
        .venue_repository()
        .create(NewVenue {
            name: "Arena".to_string(),
            available_slots: vec!["5-6 PM".to_string()],
            ..NewVenue::default()
        })
        .await
        .unwrap();

    let taken = factory
        .venue_repository()
        .take_slot(&venue.id, "5-6 PM")
        .await
        .unwrap()
        .unwrap();
    assert!(taken.available_slots.is_empty());

    let booking = factory
        .booking_repository()
        .record(&venue.id, &user, "5-6 PM")
        .await
        .unwrap();
    assert_eq!(booking.venue_id, venue.id);

    let bookings = factory.booking_repository().list_for_user(&user).await.unwrap();
    assert_eq!(bookings.len(), 1);
    assert_eq!(bookings[0].slot, "5-6 PM");
    assert!(factory.health_check().await.is_ok());
}

#[tokio::test]
async fn test_later_attach_keeps_the_first_room() {
    let factory = factory().await;
    let host = player(&factory, "host@example.com").await;
    let first_guest = player(&factory, "first@example.com").await;
    let second_guest = player(&factory, "second@example.com").await;

    let invitation = factory
        .invitation_repository()
        .create(NewInvitation {
            host_id: host.clone(),
            game: "Cricket".to_string(),
            time: "7 AM".to_string(),
            address: "Aundh, Pune".to_string(),
            location: pune(),
            radius_km: 7.0,
            invitees: vec![first_guest.clone(), second_guest.clone()],
        })
        .await
        .unwrap();

    let rooms = factory.chat_room_repository();
    let room_for = |guest: ApiId| NewChatRoom {
        participants: vec![host.clone(), guest],
        game: "Cricket".to_string(),
        time: Some("7 AM".to_string()),
        location: pune(),
    };
    let first = rooms.create(room_for(first_guest)).await.unwrap();
    let second = rooms.create(room_for(second_guest)).await.unwrap();

    let invitations = factory.invitation_repository();
    assert_eq!(invitations.attach_chat_room(&invitation.id, &first.id).await.unwrap(), first.id);
    assert_eq!(invitations.attach_chat_room(&invitation.id, &second.id).await.unwrap(), first.id);

    let stored = invitations.find_by_id(&invitation.id).await.unwrap().unwrap();
    assert_eq!(stored.chat_room_id, Some(first.id.clone()));

    rooms.delete(&second.id).await.unwrap();
    assert!(rooms.find_by_id(&second.id).await.unwrap().is_none());
    assert_eq!(rooms.list_for_user(&host).await.unwrap().len(), 1);
    assert!(rooms.delete(&second.id).await.is_err());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_concurrent_joins_of_one_user_are_idempotent() {
    let factory = factory().await;
    let host = player(&factory, "host@example.com").await;
    let guest = player(&factory, "guest@example.com").await;
    let rooms = factory.chat_room_repository();

    let room = rooms
        .create(NewChatRoom {
            participants: vec![host.clone()],
            game: "Football".to_string(),
            time: None,
            location: pune(),
        })
        .await
        .unwrap();

    let (a, b) = tokio::join!(
        rooms.add_participant(&room.id, &guest),
        rooms.add_participant(&room.id, &guest)
    );
    assert_eq!(a.unwrap().participants, vec![host.clone(), guest.clone()]);
    assert_eq!(b.unwrap().participants, vec![host, guest]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_concurrent_take_slot_has_one_winner() {
    let factory = factory().await;
    let venue = factory
        .venue_repository()
        .create(NewVenue {
            name: "Arena".to_string(),
            available_slots: vec!["5-6 PM".to_string(), "6-7 PM".to_string()],
            ..NewVenue::default()
        })
        .await
        .unwrap();

    let venues = factory.venue_repository();
    let (a, b) = tokio::join!(venues.take_slot(&venue.id, "5-6 PM"), venues.take_slot(&venue.id, "5-6 PM"));
    let winners = [a.unwrap(), b.unwrap()].into_iter().flatten().count();
    assert_eq!(winners, 1);

    let stored = venues.find_by_id(&venue.id).await.unwrap().unwrap();
    assert_eq!(stored.available_slots, vec!["6-7 PM".to_string()]);
}
