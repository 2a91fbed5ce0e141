//! Listing logic: area grouping, upcoming/past split, and name search
//!
//! These functions take rows already fetched from the database plus a single
//! `now` captured by the caller. A show is upcoming when its start time is at
//! or after `now`, and past otherwise.

use crate::db::models::{Appearance, NameRef, Venue};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;

/// The single boundary rule for upcoming vs. past
pub fn is_upcoming(start_time: &DateTime<Utc>, now: &DateTime<Utc>) -> bool {
    start_time >= now
}

/// Venue or artist with its upcoming-show count
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpcomingSummary {
    pub id: i64,
    pub name: String,
    pub num_upcoming_shows: usize,
}

/// Venues sharing one (city, state) pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Area {
    pub city: String,
    pub state: String,
    pub venues: Vec<UpcomingSummary>,
}

/// Count upcoming shows per parent id from (parent id, start time) pairs
pub fn upcoming_counts(
    starts: &[(i64, DateTime<Utc>)],
    now: &DateTime<Utc>,
) -> HashMap<i64, usize> {
    let mut counts = HashMap::new();
    for (parent_id, start_time) in starts {
        if is_upcoming(start_time, now) {
            *counts.entry(*parent_id).or_insert(0) += 1;
        }
    }
    counts
}

/// Group venues into areas by (city, state)
///
/// Every venue with the same (city, state) lands in one area, even when the
/// input is not sorted. Areas come out in order of first appearance, so
/// feeding venues ordered by (state, city) yields areas in that order.
/// Within an area, venues are sorted by upcoming-show count descending;
/// ties keep input order.
pub fn group_by_area(venues: &[Venue], counts: &HashMap<i64, usize>) -> Vec<Area> {
    let mut areas: Vec<Area> = Vec::new();
    let mut index: HashMap<(&str, &str), usize> = HashMap::new();

    for venue in venues {
        let key = (venue.city.as_str(), venue.state.as_str());
        let slot = *index.entry(key).or_insert_with(|| {
            areas.push(Area {
                city: venue.city.clone(),
                state: venue.state.clone(),
                venues: Vec::new(),
            });
            areas.len() - 1
        });

        areas[slot].venues.push(UpcomingSummary {
            id: venue.id,
            name: venue.name.clone(),
            num_upcoming_shows: counts.get(&venue.id).copied().unwrap_or(0),
        });
    }

    for area in &mut areas {
        // sort_by is stable
        area.venues
            .sort_by(|a, b| b.num_upcoming_shows.cmp(&a.num_upcoming_shows));
    }

    areas
}

/// Shows of one venue or artist partitioned around `now`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShowSplit {
    pub upcoming: Vec<Appearance>,
    pub past: Vec<Appearance>,
}

impl ShowSplit {
    pub fn upcoming_count(&self) -> usize {
        self.upcoming.len()
    }

    pub fn past_count(&self) -> usize {
        self.past.len()
    }
}

/// Partition shows into upcoming and past, preserving input order
pub fn split_shows(shows: Vec<Appearance>, now: &DateTime<Utc>) -> ShowSplit {
    let (upcoming, past): (Vec<Appearance>, Vec<Appearance>) = shows
        .into_iter()
        .partition(|show| is_upcoming(&show.start_time, now));
    ShowSplit { upcoming, past }
}

/// Search response: total match count plus one summary per match
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResults {
    pub count: usize,
    pub data: Vec<UpcomingSummary>,
}

/// Case-insensitive substring test; an empty term matches everything
pub fn name_matches(name: &str, term: &str) -> bool {
    name.to_lowercase().contains(&term.to_lowercase())
}

/// Filter candidates by name and attach upcoming-show counts
///
/// The term is matched as given, whitespace included.
pub fn search_by_name(
    candidates: Vec<NameRef>,
    term: &str,
    counts: &HashMap<i64, usize>,
) -> SearchResults {
    let data: Vec<UpcomingSummary> = candidates
        .into_iter()
        .filter(|c| name_matches(&c.name, term))
        .map(|c| UpcomingSummary {
            num_upcoming_shows: counts.get(&c.id).copied().unwrap_or(0),
            id: c.id,
            name: c.name,
        })
        .collect();

    SearchResults {
        count: data.len(),
        data,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genres::Genres;
    use chrono::{Duration, TimeZone};

    fn venue(id: i64, name: &str, city: &str, state: &str) -> Venue {
        Venue {
            id,
            name: name.to_string(),
            website: None,
            genres: Genres::default(),
            city: city.to_string(),
            state: state.to_string(),
            address: "1 Main St".to_string(),
            phone: None,
            image_link: None,
            facebook_link: None,
            seeking_talent: false,
            seeking_description: None,
        }
    }

    fn appearance(show_id: i64, start_time: DateTime<Utc>) -> Appearance {
        Appearance {
            show_id,
            partner_id: 1,
            partner_name: "Partner".to_string(),
            partner_image_link: None,
            start_time,
        }
    }

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_boundary_is_upcoming() {
        let now = fixed_now();
        assert!(is_upcoming(&now, &now));
        assert!(!is_upcoming(&(now - Duration::seconds(1)), &now));
    }

    #[test]
    fn test_seed_venues_group_by_area() {
        // Ordered by (state, city) as the query returns them
        let venues = vec![
            venue(1, "The Musical Hop", "San Francisco", "CA"),
            venue(3, "Park Square Live Music & Coffee", "San Francisco", "CA"),
            venue(2, "The Dueling Pianos Bar", "New York", "NY"),
        ];
        let counts = HashMap::from([(3, 1)]);

        let areas = group_by_area(&venues, &counts);

        assert_eq!(areas.len(), 2);
        assert_eq!((areas[0].city.as_str(), areas[0].state.as_str()), ("San Francisco", "CA"));
        let names: Vec<&str> = areas[0].venues.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, vec!["Park Square Live Music & Coffee", "The Musical Hop"]);
        assert_eq!(areas[0].venues[0].num_upcoming_shows, 1);
        assert_eq!(areas[1].state, "NY");
        assert_eq!(areas[1].venues.len(), 1);
    }

    #[test]
    fn test_unsorted_input_still_one_area_per_key() {
        let venues = vec![
            venue(1, "A", "Austin", "TX"),
            venue(2, "B", "Boston", "MA"),
            venue(3, "C", "Austin", "TX"),
        ];
        let areas = group_by_area(&venues, &HashMap::new());
        assert_eq!(areas.len(), 2);
        assert_eq!(areas[0].venues.len(), 2);
        assert_eq!(areas[1].venues.len(), 1);
    }

    #[test]
    fn test_same_city_different_state_are_separate() {
        let venues = vec![
            venue(1, "A", "Portland", "ME"),
            venue(2, "B", "Portland", "OR"),
        ];
        assert_eq!(group_by_area(&venues, &HashMap::new()).len(), 2);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let venues = vec![
            venue(1, "First", "Austin", "TX"),
            venue(2, "Second", "Austin", "TX"),
            venue(3, "Third", "Austin", "TX"),
        ];
        let counts = HashMap::from([(3, 2)]);
        let ids: Vec<i64> = group_by_area(&venues, &counts)[0]
            .venues
            .iter()
            .map(|v| v.id)
            .collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn test_upcoming_counts() {
        let now = fixed_now();
        let starts = vec![
            (1, now + Duration::days(1)),
            (1, now - Duration::days(1)),
            (1, now),
            (2, now - Duration::days(30)),
        ];
        let counts = upcoming_counts(&starts, &now);
        assert_eq!(counts.get(&1), Some(&2));
        assert_eq!(counts.get(&2), None);
    }

    #[test]
    fn test_split_is_exhaustive_and_disjoint() {
        let now = fixed_now();
        let shows = vec![
            appearance(1, now - Duration::days(400)),
            appearance(2, now + Duration::days(3)),
            appearance(3, now),
            appearance(4, now - Duration::minutes(1)),
            appearance(5, now + Duration::days(3650)),
        ];

        let split = split_shows(shows, &now);

        assert_eq!(split.upcoming_count(), 3);
        assert_eq!(split.past_count(), 2);
        let mut ids: Vec<i64> = split
            .upcoming
            .iter()
            .chain(split.past.iter())
            .map(|s| s.show_id)
            .collect();
        ids.sort();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
        assert!(split.upcoming.iter().all(|s| s.start_time >= now));
        assert!(split.past.iter().all(|s| s.start_time < now));
    }

    #[test]
    fn test_split_empty() {
        let split = split_shows(Vec::new(), &fixed_now());
        assert_eq!(split.upcoming_count(), 0);
        assert_eq!(split.past_count(), 0);
    }

    fn names() -> Vec<NameRef> {
        ["Guns N Petals", "Matt Quevedo", "The Wild Sax Band"]
            .iter()
            .enumerate()
            .map(|(i, n)| NameRef {
                id: i as i64 + 4,
                name: n.to_string(),
            })
            .collect()
    }

    #[test]
    fn test_search_empty_term_matches_all() {
        let results = search_by_name(names(), "", &HashMap::new());
        assert_eq!(results.count, 3);
        assert_eq!(results.data.len(), 3);
    }

    #[test]
    fn test_search_case_insensitive_substring() {
        let counts = HashMap::from([(6, 3)]);
        let results = search_by_name(names(), "BaNd", &counts);
        assert_eq!(results.count, 1);
        assert_eq!(results.data[0].name, "The Wild Sax Band");
        assert_eq!(results.data[0].num_upcoming_shows, 3);

        assert_eq!(search_by_name(names(), "a", &HashMap::new()).count, 3);
    }

    #[test]
    fn test_search_no_match() {
        let results = search_by_name(names(), "zzz", &HashMap::new());
        assert_eq!(results.count, 0);
        assert!(results.data.is_empty());
    }

    #[test]
    fn test_search_keeps_whitespace_in_term() {
        let found = search_by_name(names(), "n p", &HashMap::new());
        assert_eq!(found.count, 1);
        assert_eq!(found.data[0].name, "Guns N Petals");
        assert_eq!(search_by_name(names(), "  matt ", &HashMap::new()).count, 0);
    }
}
