//! Home page

use axum::extract::State;
use axum::response::Html;
use gigboard_common::db::{artists, venues};

use crate::error::Result;
use crate::render::{self, Flash};
use crate::AppState;

/// How many recent venues/artists the home page lists
const RECENT_LIMIT: i64 = 10;

/// GET /
pub async fn index(State(state): State<AppState>) -> Result<Html<String>> {
    home_page(&state, None).await
}

/// Home page, optionally carrying the flash for a just-handled submission
pub(crate) async fn home_page(state: &AppState, flash: Option<Flash>) -> Result<Html<String>> {
    let recent_venues = venues::list_recent(&state.db, RECENT_LIMIT).await?;
    let recent_artists = artists::list_recent(&state.db, RECENT_LIMIT).await?;
    Ok(Html(render::home(&recent_venues, &recent_artists, flash.as_ref())))
}
