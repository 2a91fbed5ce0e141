//! Create/edit form pages

use gigboard_common::db::{ArtistFields, VenueFields};
use gigboard_common::genres::GENRE_CHOICES;
use gigboard_common::Genres;

use super::{escape, layout, Flash};
use crate::forms::{FormData, FormErrors, STATE_CHOICES};

/// Whether a form creates a new record or edits record `id`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(i64),
}

impl FormMode {
    fn action(self, base: &str) -> String {
        match self {
            FormMode::Create => format!("{}/create", base),
            FormMode::Edit(id) => format!("{}/{}/edit", base, id),
        }
    }
}

fn field_error(errors: &FormErrors, field: &str) -> String {
    errors
        .get(field)
        .map(|m| format!(r#"<div class="error">{}</div>"#, escape(m)))
        .unwrap_or_default()
}

fn text_input(name: &str, label: &str, value: &str, errors: &FormErrors) -> String {
    format!(
        r#"<div class="field"><label for="{name}">{label}</label><input type="text" id="{name}" name="{name}" value="{value}">{error}</div>"#,
        name = name,
        label = label,
        value = escape(value),
        error = field_error(errors, name),
    )
}

fn optional_input(name: &str, label: &str, value: &Option<String>, errors: &FormErrors) -> String {
    text_input(name, label, value.as_deref().unwrap_or(""), errors)
}

fn state_select(selected: &str, errors: &FormErrors) -> String {
    let options: String = STATE_CHOICES
        .iter()
        .map(|s| {
            let mark = if *s == selected { " selected" } else { "" };
            format!(r#"<option value="{0}"{1}>{0}</option>"#, s, mark)
        })
        .collect();
    format!(
        r#"<div class="field"><label for="state">State</label><select id="state" name="state"><option value=""></option>{}</select>{}</div>"#,
        options,
        field_error(errors, "state")
    )
}

fn genre_select(selected: &Genres, errors: &FormErrors) -> String {
    let options: String = GENRE_CHOICES
        .iter()
        .map(|g| {
            let mark = if selected.contains(g) { " selected" } else { "" };
            format!(r#"<option value="{0}"{1}>{0}</option>"#, escape(g), mark)
        })
        .collect();
    format!(
        r#"<div class="field"><label for="genres">Genres</label><select id="genres" name="genres" multiple size="8">{}</select>{}</div>"#,
        options,
        field_error(errors, "genres")
    )
}

fn checkbox(name: &str, label: &str, checked: bool) -> String {
    format!(
        r#"<div class="field"><label><input type="checkbox" name="{}" value="y"{}> {}</label></div>"#,
        name,
        if checked { " checked" } else { "" },
        label
    )
}

fn heading(mode: FormMode, noun: &str, name: &str) -> String {
    match mode {
        FormMode::Create => format!("List a new {}", noun),
        FormMode::Edit(_) => format!("Edit {} {}", noun, escape(name)),
    }
}

pub fn venue_form(
    mode: FormMode,
    fields: &VenueFields,
    errors: &FormErrors,
    flash: Option<&Flash>,
) -> String {
    let content = format!(
        r#"<h1>{heading}</h1>
<form method="post" action="{action}">
{name}{city}{state}{address}{phone}{genres}{image}{facebook}{website}{seeking}{description}
<button type="submit">{submit}</button>
</form>"#,
        heading = heading(mode, "venue", &fields.name),
        action = mode.action("/venues"),
        name = text_input("name", "Name", &fields.name, errors),
        city = text_input("city", "City", &fields.city, errors),
        state = state_select(&fields.state, errors),
        address = text_input("address", "Address", &fields.address, errors),
        phone = optional_input("phone", "Phone", &fields.phone, errors),
        genres = genre_select(&fields.genres, errors),
        image = optional_input("image_link", "Image link", &fields.image_link, errors),
        facebook = optional_input("facebook_link", "Facebook link", &fields.facebook_link, errors),
        website = optional_input("website", "Website", &fields.website, errors),
        seeking = checkbox("seeking_talent", "Seeking talent", fields.seeking_talent),
        description = optional_input(
            "seeking_description",
            "Seeking description",
            &fields.seeking_description,
            errors
        ),
        submit = if mode == FormMode::Create { "Create Venue" } else { "Save" },
    );
    layout("Venue", flash, &content)
}

pub fn artist_form(
    mode: FormMode,
    fields: &ArtistFields,
    errors: &FormErrors,
    flash: Option<&Flash>,
) -> String {
    let content = format!(
        r#"<h1>{heading}</h1>
<form method="post" action="{action}">
{name}{city}{state}{phone}{genres}{image}{facebook}{website}{seeking}{description}
<button type="submit">{submit}</button>
</form>"#,
        heading = heading(mode, "artist", &fields.name),
        action = mode.action("/artists"),
        name = text_input("name", "Name", &fields.name, errors),
        city = text_input("city", "City", &fields.city, errors),
        state = state_select(&fields.state, errors),
        phone = optional_input("phone", "Phone", &fields.phone, errors),
        genres = genre_select(&fields.genres, errors),
        image = optional_input("image_link", "Image link", &fields.image_link, errors),
        facebook = optional_input("facebook_link", "Facebook link", &fields.facebook_link, errors),
        website = optional_input("website", "Website", &fields.website, errors),
        seeking = checkbox("seeking_venue", "Seeking venue", fields.seeking_venue),
        description = optional_input(
            "seeking_description",
            "Seeking description",
            &fields.seeking_description,
            errors
        ),
        submit = if mode == FormMode::Create { "Create Artist" } else { "Save" },
    );
    layout("Artist", flash, &content)
}

pub fn show_form(values: &FormData, errors: &FormErrors, flash: Option<&Flash>) -> String {
    let content = format!(
        r#"<h1>Post a new show</h1>
<form method="post" action="/shows/create">
{artist}{venue}{start}
<button type="submit">Create Show</button>
</form>"#,
        artist = text_input("artist_id", "Artist ID", &values.text("artist_id"), errors),
        venue = text_input("venue_id", "Venue ID", &values.text("venue_id"), errors),
        start = text_input(
            "start_time",
            "Start time (YYYY-MM-DD HH:MM)",
            &values.text("start_time"),
            errors
        ),
    );
    layout("New show", flash, &content)
}
