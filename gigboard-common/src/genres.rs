//! Genre tag lists
//!
//! Genres are an ordered list of free-text tags. They are stored as a JSON
//! array in a TEXT column, so any tag text survives a write/read cycle,
//! including commas and quotes.
//!
//! Rows written by older deployments hold a brace-delimited array literal
//! (`{Jazz,"R&B",Swing}`). [`Genres::from_stored`] falls back to reading that
//! form so those rows still display as clean tags.

use serde::{Deserialize, Serialize};

/// Ordered, de-duplicated list of genre tags
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Genres(Vec<String>);

impl Genres {
    /// Build from submitted tags.
    ///
    /// Tags are trimmed; blank tags and repeats are dropped (first wins).
    pub fn new<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut out: Vec<String> = Vec::new();
        for tag in tags {
            let tag = tag.as_ref().trim();
            if tag.is_empty() || out.iter().any(|t| t == tag) {
                continue;
            }
            out.push(tag.to_string());
        }
        Genres(out)
    }

    /// Decode a stored column value (JSON array, or legacy array literal)
    pub fn from_stored(raw: &str) -> Self {
        match serde_json::from_str::<Vec<String>>(raw) {
            Ok(tags) => Genres::new(tags),
            Err(_) => Genres::new(parse_array_literal(raw)),
        }
    }

    /// Encode for storage as a JSON array
    pub fn to_stored(&self) -> String {
        // Serializing a Vec<String> cannot fail
        serde_json::to_string(&self.0).unwrap_or_else(|_| "[]".to_string())
    }

    /// True when the stored value is not in the JSON list encoding
    pub fn is_legacy_encoding(raw: &str) -> bool {
        serde_json::from_str::<Vec<String>>(raw).is_err()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.0.iter().any(|t| t == tag)
    }
}

// Lets FromRow decode the column with `#[sqlx(try_from = "String")]`
impl From<String> for Genres {
    fn from(raw: String) -> Self {
        Genres::from_stored(&raw)
    }
}

impl<'a> IntoIterator for &'a Genres {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Strip `{`, `}` and `"` from an array literal and split on commas
fn parse_array_literal(raw: &str) -> Vec<String> {
    raw.chars()
        .filter(|c| !matches!(c, '{' | '}' | '"'))
        .collect::<String>()
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Genre choices offered by the venue and artist forms
pub const GENRE_CHOICES: &[&str] = &[
    "Alternative",
    "Blues",
    "Classical",
    "Country",
    "Electronic",
    "Folk",
    "Funk",
    "Hip-Hop",
    "Heavy Metal",
    "Instrumental",
    "Jazz",
    "Musical Theatre",
    "Pop",
    "Punk",
    "R&B",
    "Reggae",
    "Rock n Roll",
    "Soul",
    "Swing",
    "Other",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stored_json_round_trip() {
        let genres = Genres::new(["Jazz", "Reggae", "Swing"]);
        let stored = genres.to_stored();
        assert_eq!(stored, r#"["Jazz","Reggae","Swing"]"#);
        assert_eq!(Genres::from_stored(&stored), genres);
    }

    #[test]
    fn test_tags_with_delimiters_survive() {
        let genres = Genres::new(["Rock, Paper", "\"Quoted\"", "{braced}"]);
        let back = Genres::from_stored(&genres.to_stored());
        assert_eq!(back.as_slice(), genres.as_slice());
    }

    #[test]
    fn test_legacy_literal_is_cleaned() {
        let back = Genres::from_stored(r#"{Jazz,"R&B","Rock n Roll"}"#);
        assert_eq!(back.as_slice(), &["Jazz", "R&B", "Rock n Roll"]);
        assert!(Genres::is_legacy_encoding(r#"{Jazz,"R&B"}"#));
        assert!(!Genres::is_legacy_encoding(r#"["Jazz"]"#));
    }

    #[test]
    fn test_empty_legacy_literal() {
        assert!(Genres::from_stored("{}").is_empty());
        assert!(Genres::from_stored("").is_empty());
    }

    #[test]
    fn test_new_drops_blanks_and_duplicates() {
        let genres = Genres::new(["Jazz", "  ", "Folk", "Jazz", " Folk "]);
        assert_eq!(genres.as_slice(), &["Jazz", "Folk"]);
    }
}
