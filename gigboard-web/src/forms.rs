//! Form decoding and validation
//!
//! Submissions arrive as urlencoded key/value pairs. Multi-select fields
//! (genres) repeat their key, so the raw pairs are kept rather than
//! deserializing straight into a struct.
//!
//! Text is stored exactly as submitted. Whitespace is only ignored when
//! deciding whether a field is blank.

use gigboard_common::db::{ArtistFields, NewShow, VenueFields};
use gigboard_common::genres::{Genres, GENRE_CHOICES};
use gigboard_common::time::parse_start_time;
use serde::Deserialize;

/// US state codes offered by the venue and artist forms
pub const STATE_CHOICES: &[&str] = &[
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "DC", "FL", "GA", "HI", "ID", "IL", "IN",
    "IA", "KS", "KY", "LA", "ME", "MT", "NE", "NV", "NH", "NJ", "NM", "NY", "NC", "ND", "OH",
    "OK", "OR", "MD", "MA", "MI", "MN", "MS", "MO", "PA", "RI", "SC", "SD", "TN", "TX", "UT",
    "VT", "VA", "WA", "WV", "WI", "WY",
];

/// Search box submission
#[derive(Debug, Default, Deserialize)]
pub struct SearchForm {
    #[serde(default)]
    pub search_term: String,
}

/// Raw urlencoded submission
#[derive(Debug, Clone, Default)]
pub struct FormData {
    pairs: Vec<(String, String)>,
}

impl FormData {
    pub fn new(pairs: Vec<(String, String)>) -> Self {
        Self { pairs }
    }

    /// First value for `key` as submitted; empty when absent
    pub fn text(&self, key: &str) -> String {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
            .unwrap_or_default()
    }

    /// First value for `key`, or None when absent or whitespace only
    pub fn optional(&self, key: &str) -> Option<String> {
        Some(self.text(key)).filter(|v| !v.trim().is_empty())
    }

    /// Every value submitted under `key`, in order
    pub fn all(&self, key: &str) -> Vec<String> {
        self.pairs
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
            .collect()
    }

    /// Checkbox state: HTML sends `y`/`on` (or nothing when unchecked)
    pub fn checked(&self, key: &str) -> bool {
        matches!(
            self.text(key).trim().to_ascii_lowercase().as_str(),
            "y" | "yes" | "on" | "true" | "1"
        )
    }
}

/// Per-field validation messages
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    errors: Vec<(&'static str, String)>,
}

impl FormErrors {
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push((field, message.into()));
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, m)| m.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.errors.iter().map(|(f, m)| (*f, m.as_str()))
    }
}

fn require(errors: &mut FormErrors, field: &'static str, value: &str) {
    if value.trim().is_empty() {
        errors.add(field, "This field is required.");
    }
}

fn check_state(errors: &mut FormErrors, state: &str) {
    if state.trim().is_empty() {
        errors.add("state", "This field is required.");
    } else if !STATE_CHOICES.contains(&state) {
        errors.add("state", "Not a valid choice.");
    }
}

fn check_genres(errors: &mut FormErrors, genres: &Genres) {
    if genres.is_empty() {
        errors.add("genres", "Pick at least one genre.");
    } else if let Some(bad) = genres.iter().find(|g| !GENRE_CHOICES.contains(&g.as_str())) {
        errors.add("genres", format!("'{}' is not a valid choice.", bad));
    }
}

fn check_url(errors: &mut FormErrors, field: &'static str, value: &Option<String>) {
    if let Some(url) = value {
        let url = url.trim();
        let rest = url
            .strip_prefix("https://")
            .or_else(|| url.strip_prefix("http://"));
        if rest.map_or(true, |r| r.is_empty() || r.contains(char::is_whitespace)) {
            errors.add(field, "Invalid URL.");
        }
    }
}

fn check_phone(errors: &mut FormErrors, value: &Option<String>) {
    if let Some(phone) = value {
        let allowed = |c: char| c.is_ascii_digit() || " -+().".contains(c);
        if !phone.chars().all(allowed) || !phone.chars().any(|c| c.is_ascii_digit()) {
            errors.add("phone", "Invalid phone number.");
        }
    }
}

/// Decode a venue submission
///
/// The fields are returned even when invalid so the form can be redisplayed
/// with what the user typed.
pub fn venue_fields(form: &FormData) -> (VenueFields, FormErrors) {
    let fields = VenueFields {
        name: form.text("name"),
        website: form.optional("website"),
        genres: Genres::new(form.all("genres")),
        city: form.text("city"),
        state: form.text("state"),
        address: form.text("address"),
        phone: form.optional("phone"),
        image_link: form.optional("image_link"),
        facebook_link: form.optional("facebook_link"),
        seeking_talent: form.checked("seeking_talent"),
        seeking_description: form.optional("seeking_description"),
    };

    let mut errors = FormErrors::default();
    require(&mut errors, "name", &fields.name);
    require(&mut errors, "city", &fields.city);
    check_state(&mut errors, &fields.state);
    require(&mut errors, "address", &fields.address);
    check_phone(&mut errors, &fields.phone);
    check_genres(&mut errors, &fields.genres);
    check_url(&mut errors, "website", &fields.website);
    check_url(&mut errors, "image_link", &fields.image_link);
    check_url(&mut errors, "facebook_link", &fields.facebook_link);

    (fields, errors)
}

/// Decode an artist submission; see [`venue_fields`]
pub fn artist_fields(form: &FormData) -> (ArtistFields, FormErrors) {
    let fields = ArtistFields {
        name: form.text("name"),
        website: form.optional("website"),
        city: form.text("city"),
        state: form.text("state"),
        phone: form.optional("phone"),
        genres: Genres::new(form.all("genres")),
        image_link: form.optional("image_link"),
        facebook_link: form.optional("facebook_link"),
        seeking_venue: form.checked("seeking_venue"),
        seeking_description: form.optional("seeking_description"),
    };

    let mut errors = FormErrors::default();
    require(&mut errors, "name", &fields.name);
    require(&mut errors, "city", &fields.city);
    check_state(&mut errors, &fields.state);
    check_phone(&mut errors, &fields.phone);
    check_genres(&mut errors, &fields.genres);
    check_url(&mut errors, "website", &fields.website);
    check_url(&mut errors, "image_link", &fields.image_link);
    check_url(&mut errors, "facebook_link", &fields.facebook_link);

    (fields, errors)
}

fn parse_parent_id(errors: &mut FormErrors, field: &'static str, raw: &str) -> i64 {
    match raw.trim().parse::<i64>() {
        Ok(id) if id > 0 => id,
        _ => {
            errors.add(field, "Must be a positive whole number.");
            0
        }
    }
}

/// Decode a show submission
pub fn new_show(form: &FormData) -> Result<NewShow, FormErrors> {
    let mut errors = FormErrors::default();
    let artist_id = parse_parent_id(&mut errors, "artist_id", &form.text("artist_id"));
    let venue_id = parse_parent_id(&mut errors, "venue_id", &form.text("venue_id"));
    let start_time = match parse_start_time(&form.text("start_time")) {
        Ok(t) => Some(t),
        Err(e) => {
            errors.add("start_time", e.to_string());
            None
        }
    };

    match start_time {
        Some(start_time) if errors.is_empty() => Ok(NewShow {
            venue_id,
            artist_id,
            start_time,
        }),
        _ => Err(errors),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(pairs: &[(&str, &str)]) -> FormData {
        FormData::new(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    fn valid_venue() -> Vec<(&'static str, &'static str)> {
        vec![
            ("name", "The Blue Door"),
            ("city", "Austin"),
            ("state", "TX"),
            ("address", "100 Congress Ave"),
            ("phone", "512-555-0101"),
            ("genres", "Blues"),
            ("genres", "R&B"),
            ("website", "https://bluedoor.example.com"),
            ("seeking_talent", "y"),
        ]
    }

    #[test]
    fn test_valid_venue() {
        let (fields, errors) = venue_fields(&form(&valid_venue()));
        assert!(errors.is_empty(), "{:?}", errors);
        assert_eq!(fields.genres.as_slice(), &["Blues", "R&B"]);
        assert!(fields.seeking_talent);
        assert_eq!(fields.image_link, None);
        assert_eq!(fields.facebook_link, None);
    }

    #[test]
    fn test_text_is_stored_as_submitted() {
        let mut pairs = valid_venue();
        pairs.retain(|(k, _)| *k != "name" && *k != "address");
        pairs.push(("name", "  The Blue Door "));
        pairs.push(("address", "100 Congress Ave\n"));
        pairs.push(("seeking_description", "  "));
        let (fields, errors) = venue_fields(&form(&pairs));
        assert!(errors.is_empty(), "{:?}", errors);
        assert_eq!(fields.name, "  The Blue Door ");
        assert_eq!(fields.address, "100 Congress Ave\n");
        assert_eq!(fields.seeking_description, None);
    }

    #[test]
    fn test_unchecked_box_is_false() {
        let mut pairs = valid_venue();
        pairs.retain(|(k, _)| *k != "seeking_talent");
        let (fields, _) = venue_fields(&form(&pairs));
        assert!(!fields.seeking_talent);
    }

    #[test]
    fn test_missing_required_fields() {
        let (_, errors) = venue_fields(&form(&[("name", "  ")]));
        for field in ["name", "city", "state", "address", "genres"] {
            assert!(errors.get(field).is_some(), "expected error for {}", field);
        }
    }

    #[test]
    fn test_bad_choices_and_links() {
        let (_, errors) = artist_fields(&form(&[
            ("name", "X"),
            ("city", "Y"),
            ("state", "ZZ"),
            ("genres", "Polka"),
            ("facebook_link", "facebook.com/x"),
            ("phone", "call me"),
        ]));
        assert_eq!(errors.get("state"), Some("Not a valid choice."));
        assert!(errors.get("genres").unwrap().contains("Polka"));
        assert_eq!(errors.get("facebook_link"), Some("Invalid URL."));
        assert_eq!(errors.get("phone"), Some("Invalid phone number."));
    }

    #[test]
    fn test_new_show() {
        let show = new_show(&form(&[
            ("artist_id", "4"),
            ("venue_id", "1"),
            ("start_time", "2030-02-03 20:00:00"),
        ]))
        .unwrap();
        assert_eq!(show.artist_id, 4);
        assert_eq!(show.venue_id, 1);
        assert_eq!(show.start_time.to_rfc3339(), "2030-02-03T20:00:00+00:00");
    }

    #[test]
    fn test_new_show_errors() {
        let errors = new_show(&form(&[("artist_id", "x"), ("venue_id", "-1")])).unwrap_err();
        assert!(errors.get("artist_id").is_some());
        assert!(errors.get("venue_id").is_some());
        assert!(errors.get("start_time").is_some());
    }
}
