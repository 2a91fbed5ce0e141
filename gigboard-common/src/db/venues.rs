//! Venue queries

use crate::db::models::{NameRef, Venue, VenueFields};
use crate::{Error, Result};
use sqlx::SqlitePool;
use tracing::info;

const VENUE_COLUMNS: &str = "id, name, website, genres, city, state, address, phone, \
     image_link, facebook_link, seeking_talent, seeking_description";

/// All venues ordered by (state, city), the input order for area grouping
pub async fn list_by_area(pool: &SqlitePool) -> Result<Vec<Venue>> {
    let venues = sqlx::query_as::<_, Venue>(&format!(
        "SELECT {} FROM venues ORDER BY state, city, id",
        VENUE_COLUMNS
    ))
    .fetch_all(pool)
    .await?;

    Ok(venues)
}

/// Id and name of every venue, ordered by id
pub async fn list_names(pool: &SqlitePool) -> Result<Vec<NameRef>> {
    let rows = sqlx::query_as::<_, NameRef>("SELECT id, name FROM venues ORDER BY id")
        .fetch_all(pool)
        .await?;

    Ok(rows)
}

/// Most recently created venues
pub async fn list_recent(pool: &SqlitePool, limit: i64) -> Result<Vec<NameRef>> {
    let rows = sqlx::query_as::<_, NameRef>("SELECT id, name FROM venues ORDER BY id DESC LIMIT ?")
        .bind(limit)
        .fetch_all(pool)
        .await?;

    Ok(rows)
}

pub async fn find(pool: &SqlitePool, id: i64) -> Result<Option<Venue>> {
    let venue = sqlx::query_as::<_, Venue>(&format!(
        "SELECT {} FROM venues WHERE id = ?",
        VENUE_COLUMNS
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(venue)
}

/// Fetch a venue, mapping a missing row to `Error::NotFound`
pub async fn get(pool: &SqlitePool, id: i64) -> Result<Venue> {
    find(pool, id)
        .await?
        .ok_or_else(|| Error::NotFound(format!("venue {}", id)))
}

/// Insert a venue and return its generated id
pub async fn create(pool: &SqlitePool, fields: &VenueFields) -> Result<i64> {
    let mut tx = pool.begin().await?;

    let result = sqlx::query(
        r#"
        INSERT INTO venues (name, website, genres, city, state, address, phone,
                            image_link, facebook_link, seeking_talent, seeking_description)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&fields.name)
    .bind(&fields.website)
    .bind(fields.genres.to_stored())
    .bind(&fields.city)
    .bind(&fields.state)
    .bind(&fields.address)
    .bind(&fields.phone)
    .bind(&fields.image_link)
    .bind(&fields.facebook_link)
    .bind(fields.seeking_talent)
    .bind(&fields.seeking_description)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    let id = result.last_insert_rowid();
    info!("Created venue {} ({})", id, fields.name);
    Ok(id)
}

/// Replace every writable column of an existing venue
pub async fn update(pool: &SqlitePool, id: i64, fields: &VenueFields) -> Result<()> {
    let mut tx = pool.begin().await?;

    let result = sqlx::query(
        r#"
        UPDATE venues
        SET name = ?, website = ?, genres = ?, city = ?, state = ?, address = ?, phone = ?,
            image_link = ?, facebook_link = ?, seeking_talent = ?, seeking_description = ?
        WHERE id = ?
        "#,
    )
    .bind(&fields.name)
    .bind(&fields.website)
    .bind(fields.genres.to_stored())
    .bind(&fields.city)
    .bind(&fields.state)
    .bind(&fields.address)
    .bind(&fields.phone)
    .bind(&fields.image_link)
    .bind(&fields.facebook_link)
    .bind(fields.seeking_talent)
    .bind(&fields.seeking_description)
    .bind(id)
    .execute(&mut *tx)
    .await?;

    if result.rows_affected() == 0 {
        // Dropping the transaction rolls it back
        return Err(Error::NotFound(format!("venue {}", id)));
    }

    tx.commit().await?;
    info!("Updated venue {} ({})", id, fields.name);
    Ok(())
}

/// Delete a venue; its shows go with it via ON DELETE CASCADE
pub async fn delete(pool: &SqlitePool, id: i64) -> Result<()> {
    let result = sqlx::query("DELETE FROM venues WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(Error::NotFound(format!("venue {}", id)));
    }

    info!("Deleted venue {}", id);
    Ok(())
}
