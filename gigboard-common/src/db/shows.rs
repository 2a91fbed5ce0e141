//! Show queries
//!
//! Counterpart names and images come from joins, one query per listing,
//! rather than a lookup per show.

use crate::db::models::{Appearance, NewShow, Show, ShowListing};
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::info;

/// Which parent a show is grouped under
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShowSide {
    Venue,
    Artist,
}

impl ShowSide {
    fn column(self) -> &'static str {
        match self {
            ShowSide::Venue => "venue_id",
            ShowSide::Artist => "artist_id",
        }
    }
}

/// (parent id, start time) for every show, keyed by the given side
pub async fn start_times(pool: &SqlitePool, side: ShowSide) -> Result<Vec<(i64, DateTime<Utc>)>> {
    let rows = sqlx::query_as::<_, (i64, DateTime<Utc>)>(&format!(
        "SELECT {}, start_time FROM shows",
        side.column()
    ))
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Shows at a venue, each with its artist
pub async fn for_venue(pool: &SqlitePool, venue_id: i64) -> Result<Vec<Appearance>> {
    let rows = sqlx::query_as::<_, Appearance>(
        r#"
        SELECT s.id AS show_id, a.id AS partner_id, a.name AS partner_name,
               a.image_link AS partner_image_link, s.start_time
        FROM shows s
        JOIN artists a ON a.id = s.artist_id
        WHERE s.venue_id = ?
        ORDER BY s.start_time, s.id
        "#,
    )
    .bind(venue_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Shows by an artist, each with its venue
pub async fn for_artist(pool: &SqlitePool, artist_id: i64) -> Result<Vec<Appearance>> {
    let rows = sqlx::query_as::<_, Appearance>(
        r#"
        SELECT s.id AS show_id, v.id AS partner_id, v.name AS partner_name,
               v.image_link AS partner_image_link, s.start_time
        FROM shows s
        JOIN venues v ON v.id = s.venue_id
        WHERE s.artist_id = ?
        ORDER BY s.start_time, s.id
        "#,
    )
    .bind(artist_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Every show with venue and artist resolved, ordered by start time
pub async fn list_all(pool: &SqlitePool) -> Result<Vec<ShowListing>> {
    let rows = sqlx::query_as::<_, ShowListing>(
        r#"
        SELECT s.id AS show_id, v.id AS venue_id, v.name AS venue_name,
               a.id AS artist_id, a.name AS artist_name, a.image_link AS artist_image_link,
               s.start_time
        FROM shows s
        JOIN venues v ON v.id = s.venue_id
        JOIN artists a ON a.id = s.artist_id
        ORDER BY s.start_time, s.id
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

pub async fn find(pool: &SqlitePool, id: i64) -> Result<Option<Show>> {
    let show = sqlx::query_as::<_, Show>(
        "SELECT id, venue_id, artist_id, start_time FROM shows WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(show)
}

/// Insert a show linking an existing venue and artist
///
/// Both parents are checked inside the transaction; the foreign keys
/// enforce the same rule at the storage level.
pub async fn create(pool: &SqlitePool, show: &NewShow) -> Result<i64> {
    let mut tx = pool.begin().await?;

    let venue_exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM venues WHERE id = ?)")
        .bind(show.venue_id)
        .fetch_one(&mut *tx)
        .await?;
    if !venue_exists {
        return Err(Error::InvalidInput(format!("venue {} does not exist", show.venue_id)));
    }

    let artist_exists: bool =
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM artists WHERE id = ?)")
            .bind(show.artist_id)
            .fetch_one(&mut *tx)
            .await?;
    if !artist_exists {
        return Err(Error::InvalidInput(format!("artist {} does not exist", show.artist_id)));
    }

    let result = sqlx::query("INSERT INTO shows (venue_id, artist_id, start_time) VALUES (?, ?, ?)")
        .bind(show.venue_id)
        .bind(show.artist_id)
        .bind(show.start_time)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    let id = result.last_insert_rowid();
    info!(
        "Created show {} (venue {}, artist {}, {})",
        id, show.venue_id, show.artist_id, show.start_time
    );
    Ok(id)
}
