//! Sample data loader
//!
//! Populates each of the venue, artist, and show tables with fixed sample
//! rows, but only when that table is empty. Safe to call on every startup.
//! Sample shows whose venue or artist has since been deleted are skipped.

use crate::db::models::{ArtistFields, NewShow, VenueFields};
use crate::db::{artists, shows, venues};
use crate::genres::Genres;
use crate::Result;
use chrono::{DateTime, TimeZone, Utc};
use sqlx::SqlitePool;
use tracing::{debug, info};

/// Rows inserted by one seeding pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub venues: usize,
    pub artists: usize,
    pub shows: usize,
}

pub async fn seed_if_empty(pool: &SqlitePool) -> Result<SeedReport> {
    let mut report = SeedReport::default();

    if table_is_empty(pool, "venues").await? {
        for fields in sample_venues() {
            venues::create(pool, &fields).await?;
            report.venues += 1;
        }
    }

    if table_is_empty(pool, "artists").await? {
        for (id, fields) in sample_artists() {
            artists::create_with_id(pool, id, &fields).await?;
            report.artists += 1;
        }
    }

    if table_is_empty(pool, "shows").await? {
        for (venue_name, artist_name, start_time) in sample_shows() {
            let venue_id = id_by_name(pool, "venues", venue_name).await?;
            let artist_id = id_by_name(pool, "artists", artist_name).await?;
            let (Some(venue_id), Some(artist_id)) = (venue_id, artist_id) else {
                debug!(
                    "Skipping sample show {} at {}: venue or artist no longer listed",
                    artist_name, venue_name
                );
                continue;
            };
            let show = NewShow {
                venue_id,
                artist_id,
                start_time,
            };
            shows::create(pool, &show).await?;
            report.shows += 1;
        }
    }

    if report != SeedReport::default() {
        info!(
            "Seeded {} venues, {} artists, {} shows",
            report.venues, report.artists, report.shows
        );
    }

    Ok(report)
}

async fn table_is_empty(pool: &SqlitePool, table: &str) -> Result<bool> {
    let count: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", table))
        .fetch_one(pool)
        .await?;
    Ok(count == 0)
}

async fn id_by_name(pool: &SqlitePool, table: &str, name: &str) -> Result<Option<i64>> {
    let id = sqlx::query_scalar(&format!(
        "SELECT id FROM {} WHERE name = ? ORDER BY id LIMIT 1",
        table
    ))
    .bind(name)
    .fetch_optional(pool)
    .await?;
    Ok(id)
}

fn text(s: &str) -> Option<String> {
    Some(s.to_string())
}

fn sample_venues() -> Vec<VenueFields> {
    vec![
        VenueFields {
            name: "The Musical Hop".to_string(),
            genres: Genres::new(["Jazz", "Reggae", "Swing", "Classical", "Folk"]),
            address: "1015 Folsom Street".to_string(),
            city: "San Francisco".to_string(),
            state: "CA".to_string(),
            phone: text("123-123-1234"),
            website: text("https://www.themusicalhop.com"),
            facebook_link: text("https://www.facebook.com/TheMusicalHop"),
            seeking_talent: true,
            seeking_description: text(
                "We are on the lookout for a local artist to play every two weeks. Please call us.",
            ),
            image_link: text("https://images.unsplash.com/photo-1543900694-133f37abaaa5?ixlib=rb-1.2.1&ixid=eyJhcHBfaWQiOjEyMDd9&auto=format&fit=crop&w=400&q=60"),
        },
        VenueFields {
            name: "The Dueling Pianos Bar".to_string(),
            genres: Genres::new(["Classical", "R&B", "Hip-Hop"]),
            address: "335 Delancey Street".to_string(),
            city: "New York".to_string(),
            state: "NY".to_string(),
            phone: text("914-003-1132"),
            website: text("https://www.theduelingpianos.com"),
            facebook_link: text("https://www.facebook.com/theduelingpianos"),
            seeking_talent: false,
            seeking_description: None,
            image_link: text("https://images.unsplash.com/photo-1497032205916-ac775f0649ae?ixlib=rb-1.2.1&ixid=eyJhcHBfaWQiOjEyMDd9&auto=format&fit=crop&w=750&q=80"),
        },
        VenueFields {
            name: "Park Square Live Music & Coffee".to_string(),
            genres: Genres::new(["Rock n Roll", "Jazz", "Classical", "Folk"]),
            address: "34 Whiskey Moore Ave".to_string(),
            city: "San Francisco".to_string(),
            state: "CA".to_string(),
            phone: text("415-000-1234"),
            website: text("https://www.parksquarelivemusicandcoffee.com"),
            facebook_link: text("https://www.facebook.com/ParkSquareLiveMusicAndCoffee"),
            seeking_talent: false,
            seeking_description: None,
            image_link: text("https://images.unsplash.com/photo-1485686531765-ba63b07845a7?ixlib=rb-1.2.1&ixid=eyJhcHBfaWQiOjEyMDd9&auto=format&fit=crop&w=747&q=80"),
        },
    ]
}

fn sample_artists() -> Vec<(i64, ArtistFields)> {
    vec![
        (
            4,
            ArtistFields {
                name: "Guns N Petals".to_string(),
                genres: Genres::new(["Rock n Roll"]),
                city: "San Francisco".to_string(),
                state: "CA".to_string(),
                phone: text("326-123-5000"),
                website: text("https://www.gunsnpetalsband.com"),
                facebook_link: text("https://www.facebook.com/GunsNPetals"),
                seeking_venue: true,
                seeking_description: text(
                    "Looking for shows to perform at in the San Francisco Bay Area!",
                ),
                image_link: text("https://images.unsplash.com/photo-1549213783-8284d0336c4f?ixlib=rb-1.2.1&ixid=eyJhcHBfaWQiOjEyMDd9&auto=format&fit=crop&w=300&q=80"),
            },
        ),
        (
            5,
            ArtistFields {
                name: "Matt Quevedo".to_string(),
                genres: Genres::new(["Jazz"]),
                city: "New York".to_string(),
                state: "NY".to_string(),
                phone: text("300-400-5000"),
                website: None,
                facebook_link: text("https://www.facebook.com/mattquevedo923251523"),
                seeking_venue: false,
                seeking_description: None,
                image_link: text("https://images.unsplash.com/photo-1495223153807-b916f75de8c5?ixlib=rb-1.2.1&ixid=eyJhcHBfaWQiOjEyMDd9&auto=format&fit=crop&w=334&q=80"),
            },
        ),
        (
            6,
            ArtistFields {
                name: "The Wild Sax Band".to_string(),
                genres: Genres::new(["Jazz", "Classical"]),
                city: "San Francisco".to_string(),
                state: "CA".to_string(),
                phone: text("432-325-5432"),
                website: None,
                facebook_link: None,
                seeking_venue: false,
                seeking_description: None,
                image_link: text("https://images.unsplash.com/photo-1558369981-f9ca78462e61?ixlib=rb-1.2.1&ixid=eyJhcHBfaWQiOjEyMDd9&auto=format&fit=crop&w=794&q=80"),
            },
        ),
    ]
}

fn at(year: i32, month: u32, day: u32, hour: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, min, 0)
        .single()
        .unwrap_or_default()
}

fn sample_shows() -> Vec<(&'static str, &'static str, DateTime<Utc>)> {
    vec![
        ("The Musical Hop", "Guns N Petals", at(2019, 5, 21, 21, 30)),
        ("Park Square Live Music & Coffee", "Matt Quevedo", at(2019, 6, 15, 23, 0)),
        ("Park Square Live Music & Coffee", "The Wild Sax Band", at(2035, 4, 1, 20, 0)),
        ("Park Square Live Music & Coffee", "The Wild Sax Band", at(2035, 4, 8, 20, 0)),
        ("Park Square Live Music & Coffee", "The Wild Sax Band", at(2035, 4, 15, 20, 0)),
    ]
}
