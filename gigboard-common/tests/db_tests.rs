//! Integration tests for the data layer
//!
//! Each test runs against its own in-memory database.

use chrono::{Duration, TimeZone, Utc};
use gigboard_common::db::{self, artists, shows, venues, ArtistFields, NewShow, VenueFields};
use gigboard_common::listing::{group_by_area, search_by_name, split_shows, upcoming_counts};
use gigboard_common::seed::seed_if_empty;
use gigboard_common::{Error, Genres};
use sqlx::SqlitePool;
use std::path::PathBuf;

async fn seeded_pool() -> SqlitePool {
    let pool = db::init_memory_database().await.unwrap();
    seed_if_empty(&pool).await.unwrap();
    pool
}

fn sample_venue() -> VenueFields {
    VenueFields {
        name: "The Velvet Room".to_string(),
        website: Some("https://velvet.example.com".to_string()),
        genres: Genres::new(["Blues", "Soul, Northern", "Funk"]),
        city: "Chicago".to_string(),
        state: "IL".to_string(),
        address: "12 Wacker Dr".to_string(),
        phone: Some("312-555-0100".to_string()),
        image_link: None,
        facebook_link: Some("https://www.facebook.com/velvetroom".to_string()),
        seeking_talent: true,
        seeking_description: Some("Weekend residencies".to_string()),
    }
}

#[tokio::test]
async fn test_database_file_created() {
    let dir = tempfile::tempdir().unwrap();
    let db_path: PathBuf = dir.path().join("nested").join("gigboard.db");

    let pool = db::init_database(&db_path).await.unwrap();
    assert!(db_path.exists(), "Database file was not created");
    drop(pool);

    // Reopening an existing database succeeds
    let reopened = db::init_database(&db_path).await;
    assert!(reopened.is_ok(), "Failed to open existing database: {:?}", reopened.err());
}

#[tokio::test]
async fn test_create_then_fetch_returns_submitted_fields() {
    let pool = db::init_memory_database().await.unwrap();
    let fields = sample_venue();

    let id = venues::create(&pool, &fields).await.unwrap();
    let venue = venues::get(&pool, id).await.unwrap();

    assert_eq!(venue.id, id);
    assert_eq!(VenueFields::from(venue), fields);
}

#[tokio::test]
async fn test_update_replaces_fields() {
    let pool = db::init_memory_database().await.unwrap();
    let id = venues::create(&pool, &sample_venue()).await.unwrap();

    let mut changed = sample_venue();
    changed.name = "The Velvet Lounge".to_string();
    changed.genres = Genres::new(["Jazz"]);
    changed.seeking_talent = false;
    changed.phone = None;
    venues::update(&pool, id, &changed).await.unwrap();

    assert_eq!(VenueFields::from(venues::get(&pool, id).await.unwrap()), changed);
}

#[tokio::test]
async fn test_update_missing_is_not_found() {
    let pool = db::init_memory_database().await.unwrap();
    let err = venues::update(&pool, 42, &sample_venue()).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_delete_missing_venue_is_not_found() {
    let pool = seeded_pool().await;
    let err = venues::delete(&pool, 9999).await.unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
}

#[tokio::test]
async fn test_delete_venue_cascades_to_shows() {
    let pool = seeded_pool().await;
    let park_square = venues::list_names(&pool)
        .await
        .unwrap()
        .into_iter()
        .find(|v| v.name.starts_with("Park Square"))
        .unwrap();

    venues::delete(&pool, park_square.id).await.unwrap();

    assert!(venues::find(&pool, park_square.id).await.unwrap().is_none());
    assert_eq!(shows::list_all(&pool).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_delete_artist() {
    let pool = seeded_pool().await;
    artists::delete(&pool, 6).await.unwrap();
    assert!(artists::find(&pool, 6).await.unwrap().is_none());
    assert!(artists::delete(&pool, 6).await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn test_show_requires_existing_parents() {
    let pool = seeded_pool().await;
    let start_time = Utc.with_ymd_and_hms(2030, 1, 1, 20, 0, 0).unwrap();

    let missing_venue = NewShow {
        venue_id: 999,
        artist_id: 4,
        start_time,
    };
    assert!(matches!(
        shows::create(&pool, &missing_venue).await,
        Err(Error::InvalidInput(_))
    ));

    let missing_artist = NewShow {
        venue_id: 1,
        artist_id: 999,
        start_time,
    };
    assert!(shows::create(&pool, &missing_artist).await.is_err());

    // Nothing was written
    assert_eq!(shows::list_all(&pool).await.unwrap().len(), 5);
}

#[tokio::test]
async fn test_foreign_keys_enforced_by_storage() {
    let pool = seeded_pool().await;
    let result = sqlx::query("INSERT INTO shows (venue_id, artist_id, start_time) VALUES (999, 4, ?)")
        .bind(Utc::now())
        .execute(&pool)
        .await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_show_round_trip() {
    let pool = seeded_pool().await;
    let start_time = Utc.with_ymd_and_hms(2031, 7, 4, 19, 45, 0).unwrap();
    let id = shows::create(
        &pool,
        &NewShow {
            venue_id: 2,
            artist_id: 5,
            start_time,
        },
    )
    .await
    .unwrap();

    let show = shows::find(&pool, id).await.unwrap().unwrap();
    assert_eq!(show.venue_id, 2);
    assert_eq!(show.artist_id, 5);
    assert_eq!(show.start_time, start_time);
}

#[tokio::test]
async fn test_seeded_areas() {
    let pool = seeded_pool().await;
    let now = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();

    let venue_rows = venues::list_by_area(&pool).await.unwrap();
    let starts = shows::start_times(&pool, shows::ShowSide::Venue).await.unwrap();
    let areas = group_by_area(&venue_rows, &upcoming_counts(&starts, &now));

    assert_eq!(areas.len(), 2);
    assert_eq!(areas[0].state, "CA");
    let ca: Vec<&str> = areas[0].venues.iter().map(|v| v.name.as_str()).collect();
    assert_eq!(ca, vec!["Park Square Live Music & Coffee", "The Musical Hop"]);
    assert_eq!(areas[0].venues[0].num_upcoming_shows, 3);
    assert_eq!(areas[1].state, "NY");
    assert_eq!(areas[1].venues[0].name, "The Dueling Pianos Bar");
}

#[tokio::test]
async fn test_artist_show_split() {
    let pool = seeded_pool().await;
    let now = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();

    let split = split_shows(shows::for_artist(&pool, 6).await.unwrap(), &now);
    assert_eq!(split.upcoming_count(), 3);
    assert_eq!(split.past_count(), 0);
    assert!(split
        .upcoming
        .iter()
        .all(|s| s.partner_name == "Park Square Live Music & Coffee"));

    // Moving the boundary past every show flips them all to past
    let later = Utc.with_ymd_and_hms(2040, 1, 1, 0, 0, 0).unwrap();
    let split = split_shows(shows::for_artist(&pool, 6).await.unwrap(), &later);
    assert_eq!(split.upcoming_count(), 0);
    assert_eq!(split.past_count(), 3);
}

#[tokio::test]
async fn test_venue_show_split_resolves_artists() {
    let pool = seeded_pool().await;
    let now = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
    let park_square_id = venues::list_by_area(&pool)
        .await
        .unwrap()
        .into_iter()
        .find(|v| v.name.starts_with("Park Square"))
        .unwrap()
        .id;

    let split = split_shows(shows::for_venue(&pool, park_square_id).await.unwrap(), &now);
    assert_eq!(split.past_count(), 1);
    assert_eq!(split.past[0].partner_name, "Matt Quevedo");
    assert_eq!(split.upcoming_count(), 3);
    assert!(split.upcoming.windows(2).all(|w| w[0].start_time <= w[1].start_time));
}

#[tokio::test]
async fn test_artist_search() {
    let pool = seeded_pool().await;
    let now = Utc::now() - Duration::days(1);
    let starts = shows::start_times(&pool, shows::ShowSide::Artist).await.unwrap();
    let counts = upcoming_counts(&starts, &now);

    let all = search_by_name(artists::list_names(&pool).await.unwrap(), "", &counts);
    assert_eq!(all.count, 3);

    let none = search_by_name(artists::list_names(&pool).await.unwrap(), "xyz", &counts);
    assert_eq!(none.count, 0);
    assert!(none.data.is_empty());
}

#[tokio::test]
async fn test_artists_listed_by_name() {
    let pool = seeded_pool().await;
    let names: Vec<String> = artists::list_by_name(&pool)
        .await
        .unwrap()
        .into_iter()
        .map(|a| a.name)
        .collect();
    assert_eq!(names, vec!["Guns N Petals", "Matt Quevedo", "The Wild Sax Band"]);
}

#[tokio::test]
async fn test_artist_create_round_trip() {
    let pool = db::init_memory_database().await.unwrap();
    let fields = ArtistFields {
        name: "Quiet Storm".to_string(),
        website: None,
        city: "Memphis".to_string(),
        state: "TN".to_string(),
        phone: None,
        genres: Genres::new(["Soul", "R&B"]),
        image_link: Some("https://img.example.com/qs.jpg".to_string()),
        facebook_link: None,
        seeking_venue: true,
        seeking_description: None,
    };

    let id = artists::create(&pool, &fields).await.unwrap();
    assert_eq!(ArtistFields::from(artists::get(&pool, id).await.unwrap()), fields);
}
