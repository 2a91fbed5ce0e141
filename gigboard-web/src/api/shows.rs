//! Show pages: listing and creation

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Form,
};
use gigboard_common::db::shows;
use tracing::warn;

use super::failure_flash;
use super::home::home_page;
use crate::error::Result;
use crate::forms::{self, FormData, FormErrors};
use crate::render::{self, Flash};
use crate::AppState;

/// GET /shows
pub async fn list_shows(State(state): State<AppState>) -> Result<Html<String>> {
    let rows = shows::list_all(&state.db).await?;
    Ok(Html(render::show_list(&rows)))
}

/// GET /shows/create
pub async fn create_show_form() -> Html<String> {
    Html(render::show_form(&FormData::default(), &FormErrors::default(), None))
}

/// POST /shows/create
///
/// Any failure writing the show, including an unknown venue or artist,
/// is reported with the same generic message.
pub async fn create_show_submission(
    State(state): State<AppState>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Response> {
    let form = FormData::new(pairs);
    let show = match forms::new_show(&form) {
        Ok(show) => show,
        Err(errors) => {
            let flash = failure_flash("Show", "", "listed");
            let page = render::show_form(&form, &errors, Some(&flash));
            return Ok((StatusCode::UNPROCESSABLE_ENTITY, Html(page)).into_response());
        }
    };

    let flash = match shows::create(&state.db, &show).await {
        Ok(_) => Flash::Success("Show was successfully listed!".to_string()),
        Err(e) => {
            warn!("Failed to create show: {}", e);
            failure_flash("Show", "", "listed")
        }
    };

    Ok(home_page(&state, Some(flash)).await?.into_response())
}
