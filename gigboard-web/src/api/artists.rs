//! Artist pages: listing, search, detail, create, edit, delete

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Form, Json,
};
use gigboard_common::db::shows::{self, ShowSide};
use gigboard_common::db::{artists, ArtistFields};
use gigboard_common::{listing, time};
use serde_json::{json, Value};
use tracing::{info, warn};

use super::failure_flash;
use super::home::home_page;
use crate::error::{parse_id, Result};
use crate::forms::{self, FormData, FormErrors, SearchForm};
use crate::render::{self, Flash, FormMode, SearchKind};
use crate::AppState;

/// GET /artists
pub async fn list_artists(State(state): State<AppState>) -> Result<Html<String>> {
    let rows = artists::list_by_name(&state.db).await?;
    Ok(Html(render::artist_list(&rows)))
}

/// POST /artists/search
pub async fn search_artists(
    State(state): State<AppState>,
    Form(form): Form<SearchForm>,
) -> Result<Html<String>> {
    run_search(&state, &form.search_term).await
}

/// GET /artists/search?search_term=...
pub async fn search_artists_query(
    State(state): State<AppState>,
    Query(form): Query<SearchForm>,
) -> Result<Html<String>> {
    run_search(&state, &form.search_term).await
}

async fn run_search(state: &AppState, term: &str) -> Result<Html<String>> {
    let now = time::now();
    let candidates = artists::list_names(&state.db).await?;
    let starts = shows::start_times(&state.db, ShowSide::Artist).await?;
    let results = listing::search_by_name(candidates, term, &listing::upcoming_counts(&starts, &now));
    info!("Artist search {:?}: {} matches", term, results.count);
    Ok(Html(render::search_results(SearchKind::Artists, term, &results)))
}

/// GET /artists/:artist_id
pub async fn show_artist(
    State(state): State<AppState>,
    Path(artist_id): Path<String>,
) -> Result<Html<String>> {
    let id = parse_id(&artist_id, "artist")?;
    artist_page(&state, id, None).await
}

async fn artist_page(state: &AppState, id: i64, flash: Option<Flash>) -> Result<Html<String>> {
    let artist = artists::get(&state.db, id).await?;
    let split = listing::split_shows(shows::for_artist(&state.db, id).await?, &time::now());
    Ok(Html(render::artist_detail(&artist, &split, flash.as_ref())))
}

/// GET /artists/create
pub async fn create_artist_form() -> Html<String> {
    Html(render::artist_form(
        FormMode::Create,
        &ArtistFields::default(),
        &FormErrors::default(),
        None,
    ))
}

/// POST /artists/create
pub async fn create_artist_submission(
    State(state): State<AppState>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Response> {
    let (fields, errors) = forms::artist_fields(&FormData::new(pairs));
    if !errors.is_empty() {
        let flash = failure_flash("Artist", &fields.name, "listed");
        let page = render::artist_form(FormMode::Create, &fields, &errors, Some(&flash));
        return Ok((StatusCode::UNPROCESSABLE_ENTITY, Html(page)).into_response());
    }

    let flash = match artists::create(&state.db, &fields).await {
        Ok(_) => Flash::Success(format!("Artist {} was successfully listed!", fields.name)),
        Err(e) => {
            warn!("Failed to create artist {}: {}", fields.name, e);
            failure_flash("Artist", &fields.name, "listed")
        }
    };

    Ok(home_page(&state, Some(flash)).await?.into_response())
}

/// GET /artists/:artist_id/edit
pub async fn edit_artist(
    State(state): State<AppState>,
    Path(artist_id): Path<String>,
) -> Result<Html<String>> {
    let id = parse_id(&artist_id, "artist")?;
    let artist = artists::get(&state.db, id).await?;
    Ok(Html(render::artist_form(
        FormMode::Edit(id),
        &ArtistFields::from(artist),
        &FormErrors::default(),
        None,
    )))
}

/// POST /artists/:artist_id/edit
pub async fn edit_artist_submission(
    State(state): State<AppState>,
    Path(artist_id): Path<String>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Response> {
    let id = parse_id(&artist_id, "artist")?;
    artists::get(&state.db, id).await?;

    let (fields, errors) = forms::artist_fields(&FormData::new(pairs));
    if !errors.is_empty() {
        let flash = failure_flash("Artist", &fields.name, "updated");
        let page = render::artist_form(FormMode::Edit(id), &fields, &errors, Some(&flash));
        return Ok((StatusCode::UNPROCESSABLE_ENTITY, Html(page)).into_response());
    }

    let flash = match artists::update(&state.db, id, &fields).await {
        Ok(()) => Flash::Success(format!("Artist {} was successfully updated!", fields.name)),
        Err(e) if e.is_not_found() => return Err(e.into()),
        Err(e) => {
            warn!("Failed to update artist {}: {}", id, e);
            failure_flash("Artist", &fields.name, "updated")
        }
    };

    Ok(artist_page(&state, id, Some(flash)).await?.into_response())
}

/// DELETE /artists/:artist_id
pub async fn delete_artist(
    State(state): State<AppState>,
    Path(artist_id): Path<String>,
) -> Result<Json<Value>> {
    let id = parse_id(&artist_id, "artist")?;
    artists::delete(&state.db, id).await?;
    Ok(Json(json!({ "success": true })))
}
