//! Venue pages: grouped listing, search, detail, create, edit, delete

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Form, Json,
};
use gigboard_common::db::shows::{self, ShowSide};
use gigboard_common::db::{venues, VenueFields};
use gigboard_common::{listing, time};
use serde_json::{json, Value};
use tracing::{info, warn};

use super::failure_flash;
use super::home::home_page;
use crate::error::{parse_id, Result};
use crate::forms::{self, FormData, FormErrors, SearchForm};
use crate::render::{self, Flash, FormMode, SearchKind};
use crate::AppState;

/// GET /venues
///
/// Venues grouped by (city, state); each group sorted by upcoming shows.
pub async fn list_venues(State(state): State<AppState>) -> Result<Html<String>> {
    let now = time::now();
    let rows = venues::list_by_area(&state.db).await?;
    let starts = shows::start_times(&state.db, ShowSide::Venue).await?;
    let areas = listing::group_by_area(&rows, &listing::upcoming_counts(&starts, &now));
    Ok(Html(render::venue_list(&areas)))
}

/// POST /venues/search
pub async fn search_venues(
    State(state): State<AppState>,
    Form(form): Form<SearchForm>,
) -> Result<Html<String>> {
    run_search(&state, &form.search_term).await
}

/// GET /venues/search?search_term=...
pub async fn search_venues_query(
    State(state): State<AppState>,
    Query(form): Query<SearchForm>,
) -> Result<Html<String>> {
    run_search(&state, &form.search_term).await
}

async fn run_search(state: &AppState, term: &str) -> Result<Html<String>> {
    let now = time::now();
    let candidates = venues::list_names(&state.db).await?;
    let starts = shows::start_times(&state.db, ShowSide::Venue).await?;
    let results = listing::search_by_name(candidates, term, &listing::upcoming_counts(&starts, &now));
    info!("Venue search {:?}: {} matches", term, results.count);
    Ok(Html(render::search_results(SearchKind::Venues, term, &results)))
}

/// GET /venues/:venue_id
pub async fn show_venue(
    State(state): State<AppState>,
    Path(venue_id): Path<String>,
) -> Result<Html<String>> {
    let id = parse_id(&venue_id, "venue")?;
    venue_page(&state, id, None).await
}

async fn venue_page(state: &AppState, id: i64, flash: Option<Flash>) -> Result<Html<String>> {
    let venue = venues::get(&state.db, id).await?;
    let split = listing::split_shows(shows::for_venue(&state.db, id).await?, &time::now());
    Ok(Html(render::venue_detail(&venue, &split, flash.as_ref())))
}

/// GET /venues/create
pub async fn create_venue_form() -> Html<String> {
    Html(render::venue_form(
        FormMode::Create,
        &VenueFields::default(),
        &FormErrors::default(),
        None,
    ))
}

/// POST /venues/create
pub async fn create_venue_submission(
    State(state): State<AppState>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Response> {
    let (fields, errors) = forms::venue_fields(&FormData::new(pairs));
    if !errors.is_empty() {
        let flash = failure_flash("Venue", &fields.name, "listed");
        let page = render::venue_form(FormMode::Create, &fields, &errors, Some(&flash));
        return Ok((StatusCode::UNPROCESSABLE_ENTITY, Html(page)).into_response());
    }

    let flash = match venues::create(&state.db, &fields).await {
        Ok(_) => Flash::Success(format!("Venue {} was successfully listed!", fields.name)),
        Err(e) => {
            warn!("Failed to create venue {}: {}", fields.name, e);
            failure_flash("Venue", &fields.name, "listed")
        }
    };

    Ok(home_page(&state, Some(flash)).await?.into_response())
}

/// GET /venues/:venue_id/edit
pub async fn edit_venue(
    State(state): State<AppState>,
    Path(venue_id): Path<String>,
) -> Result<Html<String>> {
    let id = parse_id(&venue_id, "venue")?;
    let venue = venues::get(&state.db, id).await?;
    Ok(Html(render::venue_form(
        FormMode::Edit(id),
        &VenueFields::from(venue),
        &FormErrors::default(),
        None,
    )))
}

/// POST /venues/:venue_id/edit
pub async fn edit_venue_submission(
    State(state): State<AppState>,
    Path(venue_id): Path<String>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Response> {
    let id = parse_id(&venue_id, "venue")?;
    venues::get(&state.db, id).await?;

    let (fields, errors) = forms::venue_fields(&FormData::new(pairs));
    if !errors.is_empty() {
        let flash = failure_flash("Venue", &fields.name, "updated");
        let page = render::venue_form(FormMode::Edit(id), &fields, &errors, Some(&flash));
        return Ok((StatusCode::UNPROCESSABLE_ENTITY, Html(page)).into_response());
    }

    let flash = match venues::update(&state.db, id, &fields).await {
        Ok(()) => Flash::Success(format!("Venue {} was successfully updated!", fields.name)),
        Err(e) if e.is_not_found() => return Err(e.into()),
        Err(e) => {
            warn!("Failed to update venue {}: {}", id, e);
            failure_flash("Venue", &fields.name, "updated")
        }
    };

    Ok(venue_page(&state, id, Some(flash)).await?.into_response())
}

/// DELETE /venues/:venue_id
///
/// Removes the venue and its shows. A missing id is a 404, not a 500.
pub async fn delete_venue(
    State(state): State<AppState>,
    Path(venue_id): Path<String>,
) -> Result<Json<Value>> {
    let id = parse_id(&venue_id, "venue")?;
    venues::delete(&state.db, id).await?;
    Ok(Json(json!({ "success": true })))
}
