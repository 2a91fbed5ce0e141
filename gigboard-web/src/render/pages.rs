//! Listing and detail pages

use gigboard_common::db::{Appearance, Artist, NameRef, ShowListing, Venue};
use gigboard_common::listing::{Area, SearchResults, ShowSplit};
use gigboard_common::time::{format_datetime, DateFormat};
use gigboard_common::Genres;

use super::{escape, layout, or_dash, Flash};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchKind {
    Venues,
    Artists,
}

impl SearchKind {
    fn base(self) -> &'static str {
        match self {
            SearchKind::Venues => "/venues",
            SearchKind::Artists => "/artists",
        }
    }

    fn label(self) -> &'static str {
        match self {
            SearchKind::Venues => "venues",
            SearchKind::Artists => "artists",
        }
    }
}

fn search_box(kind: SearchKind, term: &str) -> String {
    format!(
        r#"<form method="post" action="{}/search">
    <input type="search" name="search_term" value="{}" placeholder="Find {}">
    <button type="submit">Search</button>
</form>"#,
        kind.base(),
        escape(term),
        kind.label()
    )
}

fn name_links(base: &str, items: &[NameRef]) -> String {
    if items.is_empty() {
        return "<p>Nothing listed yet.</p>".to_string();
    }
    let rows: String = items
        .iter()
        .map(|i| format!(r#"<li><a href="{}/{}">{}</a></li>"#, base, i.id, escape(&i.name)))
        .collect();
    format!(r#"<ul class="items">{}</ul>"#, rows)
}

fn genre_tags(genres: &Genres) -> String {
    let tags: String = genres
        .iter()
        .map(|g| format!("<span>{}</span>", escape(g)))
        .collect();
    format!(r#"<div class="genres">{}</div>"#, tags)
}

fn link_or_dash(value: &Option<String>) -> String {
    match value {
        Some(url) => format!(r#"<a href="{0}">{0}</a>"#, escape(url)),
        None => "-".to_string(),
    }
}

fn image(src: &Option<String>, alt: &str) -> String {
    match src {
        Some(src) => format!(r#"<img src="{}" alt="{}">"#, escape(src), escape(alt)),
        None => String::new(),
    }
}

/// Upcoming/past sections for a detail page; `partner_base` is where the
/// counterpart links point ("/artists" on a venue page, "/venues" on an artist page)
fn show_sections(split: &ShowSplit, partner_base: &str) -> String {
    let cards = |shows: &[Appearance]| -> String {
        shows
            .iter()
            .map(|s| {
                format!(
                    r#"<div class="show-card">{img}<a href="{base}/{id}">{name}</a><br><span class="count">{when}</span></div>"#,
                    img = image(&s.partner_image_link, &s.partner_name),
                    base = partner_base,
                    id = s.partner_id,
                    name = escape(&s.partner_name),
                    when = format_datetime(&s.start_time, DateFormat::Full),
                )
            })
            .collect()
    };

    format!(
        r#"<h2>{} Upcoming Show{}</h2>
<div>{}</div>
<h2>{} Past Show{}</h2>
<div>{}</div>"#,
        split.upcoming_count(),
        if split.upcoming_count() == 1 { "" } else { "s" },
        cards(&split.upcoming),
        split.past_count(),
        if split.past_count() == 1 { "" } else { "s" },
        cards(&split.past),
    )
}

pub fn home(venues: &[NameRef], artists: &[NameRef], flash: Option<&Flash>) -> String {
    let content = format!(
        r#"<h1>gigboard</h1>
<p>Find venues and artists, and book the next show.</p>
<p><a href="/venues/create">List a venue</a> · <a href="/artists/create">List an artist</a> · <a href="/shows/create">Post a show</a></p>
<h2>Recently listed venues</h2>
{}
<h2>Recently listed artists</h2>
{}"#,
        name_links("/venues", venues),
        name_links("/artists", artists),
    );
    layout("Home", flash, &content)
}

pub fn venue_list(areas: &[Area]) -> String {
    let sections: String = areas
        .iter()
        .map(|area| {
            let rows: String = area
                .venues
                .iter()
                .map(|v| {
                    format!(
                        r#"<li><a href="/venues/{}">{}</a> <span class="count">{} upcoming</span></li>"#,
                        v.id,
                        escape(&v.name),
                        v.num_upcoming_shows
                    )
                })
                .collect();
            format!(
                r#"<h3>{}, {}</h3>
<ul class="items">{}</ul>"#,
                escape(&area.city),
                escape(&area.state),
                rows
            )
        })
        .collect();

    let content = format!(
        r#"<h1>Venues</h1>
{}
<p><a href="/venues/create">List a venue</a></p>
{}"#,
        search_box(SearchKind::Venues, ""),
        sections
    );
    layout("Venues", None, &content)
}

pub fn artist_list(artists: &[NameRef]) -> String {
    let content = format!(
        r#"<h1>Artists</h1>
{}
<p><a href="/artists/create">List an artist</a></p>
{}"#,
        search_box(SearchKind::Artists, ""),
        name_links("/artists", artists)
    );
    layout("Artists", None, &content)
}

pub fn search_results(kind: SearchKind, term: &str, results: &SearchResults) -> String {
    let rows: String = results
        .data
        .iter()
        .map(|r| {
            format!(
                r#"<li><a href="{}/{}">{}</a> <span class="count">{} upcoming</span></li>"#,
                kind.base(),
                r.id,
                escape(&r.name),
                r.num_upcoming_shows
            )
        })
        .collect();

    let content = format!(
        r#"{}
<h2>Number of search results for "{}": {}</h2>
<ul class="items">{}</ul>"#,
        search_box(kind, term),
        escape(term),
        results.count,
        rows
    );
    layout("Search", None, &content)
}

pub fn venue_detail(venue: &Venue, split: &ShowSplit, flash: Option<&Flash>) -> String {
    let seeking = if venue.seeking_talent {
        format!(
            "<p><strong>Currently seeking talent</strong><br>{}</p>",
            or_dash(&venue.seeking_description)
        )
    } else {
        "<p>Not currently seeking talent</p>".to_string()
    };

    let content = format!(
        r#"<h1>{name}</h1>
<p class="count">ID: {id}</p>
{genres}
<p>{address}<br>{city}, {state}</p>
<p>Phone: {phone}<br>Website: {website}<br>Facebook: {facebook}</p>
{seeking}
{image}
<p><a href="/venues/{id}/edit">Edit venue</a></p>
{shows}"#,
        name = escape(&venue.name),
        id = venue.id,
        genres = genre_tags(&venue.genres),
        address = escape(&venue.address),
        city = escape(&venue.city),
        state = escape(&venue.state),
        phone = or_dash(&venue.phone),
        website = link_or_dash(&venue.website),
        facebook = link_or_dash(&venue.facebook_link),
        seeking = seeking,
        image = image(&venue.image_link, &venue.name),
        shows = show_sections(split, "/artists"),
    );
    layout(&venue.name, flash, &content)
}

pub fn artist_detail(artist: &Artist, split: &ShowSplit, flash: Option<&Flash>) -> String {
    let seeking = if artist.seeking_venue {
        format!(
            "<p><strong>Currently seeking performance venues</strong><br>{}</p>",
            or_dash(&artist.seeking_description)
        )
    } else {
        "<p>Not currently seeking performance venues</p>".to_string()
    };

    let content = format!(
        r#"<h1>{name}</h1>
<p class="count">ID: {id}</p>
{genres}
<p>{city}, {state}</p>
<p>Phone: {phone}<br>Website: {website}<br>Facebook: {facebook}</p>
{seeking}
{image}
<p><a href="/artists/{id}/edit">Edit artist</a></p>
{shows}"#,
        name = escape(&artist.name),
        id = artist.id,
        genres = genre_tags(&artist.genres),
        city = escape(&artist.city),
        state = escape(&artist.state),
        phone = or_dash(&artist.phone),
        website = link_or_dash(&artist.website),
        facebook = link_or_dash(&artist.facebook_link),
        seeking = seeking,
        image = image(&artist.image_link, &artist.name),
        shows = show_sections(split, "/venues"),
    );
    layout(&artist.name, flash, &content)
}

pub fn show_list(shows: &[ShowListing]) -> String {
    let cards: String = shows
        .iter()
        .map(|s| {
            format!(
                r#"<div class="show-card">{img}<span class="count">{when}</span><br><a href="/artists/{artist_id}">{artist}</a><br>playing at <a href="/venues/{venue_id}">{venue}</a></div>"#,
                img = image(&s.artist_image_link, &s.artist_name),
                when = format_datetime(&s.start_time, DateFormat::Medium),
                artist_id = s.artist_id,
                artist = escape(&s.artist_name),
                venue_id = s.venue_id,
                venue = escape(&s.venue_name),
            )
        })
        .collect();

    let content = format!(
        r#"<h1>Shows</h1>
<p><a href="/shows/create">Post a show</a></p>
<div>{}</div>"#,
        cards
    );
    layout("Shows", None, &content)
}
