//! Database models

use crate::genres::Genres;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Venue {
    pub id: i64,
    pub name: String,
    pub website: Option<String>,
    #[sqlx(try_from = "String")]
    pub genres: Genres,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
}

/// Writable venue columns, used for both insert and update
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VenueFields {
    pub name: String,
    pub website: Option<String>,
    pub genres: Genres,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
}

impl From<Venue> for VenueFields {
    fn from(v: Venue) -> Self {
        VenueFields {
            name: v.name,
            website: v.website,
            genres: v.genres,
            city: v.city,
            state: v.state,
            address: v.address,
            phone: v.phone,
            image_link: v.image_link,
            facebook_link: v.facebook_link,
            seeking_talent: v.seeking_talent,
            seeking_description: v.seeking_description,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Artist {
    pub id: i64,
    pub name: String,
    pub website: Option<String>,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    #[sqlx(try_from = "String")]
    pub genres: Genres,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
}

/// Writable artist columns, used for both insert and update
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtistFields {
    pub name: String,
    pub website: Option<String>,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub genres: Genres,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
}

impl From<Artist> for ArtistFields {
    fn from(a: Artist) -> Self {
        ArtistFields {
            name: a.name,
            website: a.website,
            city: a.city,
            state: a.state,
            phone: a.phone,
            genres: a.genres,
            image_link: a.image_link,
            facebook_link: a.facebook_link,
            seeking_venue: a.seeking_venue,
            seeking_description: a.seeking_description,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Show {
    pub id: i64,
    pub venue_id: i64,
    pub artist_id: i64,
    pub start_time: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewShow {
    pub venue_id: i64,
    pub artist_id: i64,
    pub start_time: DateTime<Utc>,
}

/// Id and name of a venue or artist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct NameRef {
    pub id: i64,
    pub name: String,
}

/// A show seen from one side: the venue's artist, or the artist's venue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Appearance {
    pub show_id: i64,
    pub partner_id: i64,
    pub partner_name: String,
    pub partner_image_link: Option<String>,
    pub start_time: DateTime<Utc>,
}

/// One row of the show listing, with both sides resolved
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct ShowListing {
    pub show_id: i64,
    pub venue_id: i64,
    pub venue_name: String,
    pub artist_id: i64,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: DateTime<Utc>,
}
