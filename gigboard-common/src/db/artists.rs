//! Artist queries

use crate::db::models::{Artist, ArtistFields, NameRef};
use crate::{Error, Result};
use sqlx::SqlitePool;
use tracing::info;

const ARTIST_COLUMNS: &str = "id, name, website, city, state, phone, genres, \
     image_link, facebook_link, seeking_venue, seeking_description";

/// Id and name of every artist, ordered by name
pub async fn list_by_name(pool: &SqlitePool) -> Result<Vec<NameRef>> {
    let rows = sqlx::query_as::<_, NameRef>("SELECT id, name FROM artists ORDER BY name, id")
        .fetch_all(pool)
        .await?;

    Ok(rows)
}

/// Id and name of every artist, ordered by id
pub async fn list_names(pool: &SqlitePool) -> Result<Vec<NameRef>> {
    let rows = sqlx::query_as::<_, NameRef>("SELECT id, name FROM artists ORDER BY id")
        .fetch_all(pool)
        .await?;

    Ok(rows)
}

/// Most recently created artists
pub async fn list_recent(pool: &SqlitePool, limit: i64) -> Result<Vec<NameRef>> {
    let rows = sqlx::query_as::<_, NameRef>("SELECT id, name FROM artists ORDER BY id DESC LIMIT ?")
        .bind(limit)
        .fetch_all(pool)
        .await?;

    Ok(rows)
}

pub async fn find(pool: &SqlitePool, id: i64) -> Result<Option<Artist>> {
    let artist = sqlx::query_as::<_, Artist>(&format!(
        "SELECT {} FROM artists WHERE id = ?",
        ARTIST_COLUMNS
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(artist)
}

/// Fetch an artist, mapping a missing row to `Error::NotFound`
pub async fn get(pool: &SqlitePool, id: i64) -> Result<Artist> {
    find(pool, id)
        .await?
        .ok_or_else(|| Error::NotFound(format!("artist {}", id)))
}

/// Insert an artist and return its generated id
pub async fn create(pool: &SqlitePool, fields: &ArtistFields) -> Result<i64> {
    let mut tx = pool.begin().await?;

    let result = sqlx::query(
        r#"
        INSERT INTO artists (name, website, city, state, phone, genres,
                             image_link, facebook_link, seeking_venue, seeking_description)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&fields.name)
    .bind(&fields.website)
    .bind(&fields.city)
    .bind(&fields.state)
    .bind(&fields.phone)
    .bind(fields.genres.to_stored())
    .bind(&fields.image_link)
    .bind(&fields.facebook_link)
    .bind(fields.seeking_venue)
    .bind(&fields.seeking_description)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    let id = result.last_insert_rowid();
    info!("Created artist {} ({})", id, fields.name);
    Ok(id)
}

/// Insert an artist under a caller-chosen id (seed data)
pub async fn create_with_id(pool: &SqlitePool, id: i64, fields: &ArtistFields) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO artists (id, name, website, city, state, phone, genres,
                             image_link, facebook_link, seeking_venue, seeking_description)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(id)
    .bind(&fields.name)
    .bind(&fields.website)
    .bind(&fields.city)
    .bind(&fields.state)
    .bind(&fields.phone)
    .bind(fields.genres.to_stored())
    .bind(&fields.image_link)
    .bind(&fields.facebook_link)
    .bind(fields.seeking_venue)
    .bind(&fields.seeking_description)
    .execute(pool)
    .await?;

    Ok(())
}

/// Replace every writable column of an existing artist
pub async fn update(pool: &SqlitePool, id: i64, fields: &ArtistFields) -> Result<()> {
    let mut tx = pool.begin().await?;

    let result = sqlx::query(
        r#"
        UPDATE artists
        SET name = ?, website = ?, city = ?, state = ?, phone = ?, genres = ?,
            image_link = ?, facebook_link = ?, seeking_venue = ?, seeking_description = ?
        WHERE id = ?
        "#,
    )
    .bind(&fields.name)
    .bind(&fields.website)
    .bind(&fields.city)
    .bind(&fields.state)
    .bind(&fields.phone)
    .bind(fields.genres.to_stored())
    .bind(&fields.image_link)
    .bind(&fields.facebook_link)
    .bind(fields.seeking_venue)
    .bind(&fields.seeking_description)
    .bind(id)
    .execute(&mut *tx)
    .await?;

    if result.rows_affected() == 0 {
        return Err(Error::NotFound(format!("artist {}", id)));
    }

    tx.commit().await?;
    info!("Updated artist {} ({})", id, fields.name);
    Ok(())
}

/// Delete an artist; its shows go with it via ON DELETE CASCADE
pub async fn delete(pool: &SqlitePool, id: i64) -> Result<()> {
    let result = sqlx::query("DELETE FROM artists WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(Error::NotFound(format!("artist {}", id)));
    }

    info!("Deleted artist {}", id);
    Ok(())
}
