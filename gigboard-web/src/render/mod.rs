//! Server-rendered HTML
//!
//! Pages are assembled with `format!` around a shared layout. Every value
//! that came from the database or a form goes through [`escape`].

use axum::http::StatusCode;

mod forms;
mod pages;

pub use forms::{artist_form, show_form, venue_form, FormMode};
pub use pages::{
    artist_detail, artist_list, home, search_results, show_list, venue_detail, venue_list,
    SearchKind,
};

/// One-shot status message shown at the top of the page answering a submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flash {
    Success(String),
    Error(String),
}

impl Flash {
    pub fn message(&self) -> &str {
        match self {
            Flash::Success(m) | Flash::Error(m) => m,
        }
    }

    fn class(&self) -> &'static str {
        match self {
            Flash::Success(_) => "flash flash-success",
            Flash::Error(_) => "flash flash-error",
        }
    }
}

/// Escape text for use in HTML element content and quoted attributes
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

const STYLE: &str = r#"
    * { box-sizing: border-box; }
    body { font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif; margin: 0;
           background-color: #1a1a1a; color: #e0e0e0; line-height: 1.6; }
    header { background-color: #2a2a2a; border-bottom: 1px solid #3a3a3a; padding: 12px 20px;
             display: flex; gap: 20px; align-items: center; }
    header a { color: #4a9eff; text-decoration: none; }
    header .brand { font-size: 22px; font-weight: 600; }
    main { padding: 20px; max-width: 960px; margin: 0 auto; }
    h1, h2, h3 { color: #4a9eff; }
    a { color: #7ab8ff; }
    .flash { padding: 10px 14px; border-radius: 4px; margin-bottom: 20px; }
    .flash-success { background: #10b981; color: #fff; }
    .flash-error { background: #ef4444; color: #fff; }
    .genres span { display: inline-block; background: #333; border-radius: 10px;
                   padding: 2px 10px; margin: 2px; font-size: 13px; }
    .items { list-style: none; padding: 0; }
    .items li { padding: 6px 0; border-bottom: 1px solid #2a2a2a; }
    .count { color: #888; font-size: 13px; }
    .show-card { display: inline-block; width: 200px; margin: 8px; vertical-align: top; }
    .show-card img { width: 100%; height: 120px; object-fit: cover; }
    .field { margin-bottom: 12px; }
    .field label { display: block; font-weight: 600; }
    .field input, .field select, .field textarea { width: 100%; padding: 6px; }
    .field .error { color: #ef4444; font-size: 13px; }
    button { background: #4a9eff; color: #fff; border: 0; padding: 8px 16px; cursor: pointer; }
"#;

/// Wrap page content in the site layout
pub fn layout(title: &str, flash: Option<&Flash>, content: &str) -> String {
    let flash_html = flash
        .map(|f| format!(r#"<div class="{}">{}</div>"#, f.class(), escape(f.message())))
        .unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title} | gigboard</title>
    <style>{style}</style>
</head>
<body>
<header>
    <a class="brand" href="/">gigboard</a>
    <a href="/venues">Venues</a>
    <a href="/artists">Artists</a>
    <a href="/shows">Shows</a>
    <a href="/shows/create">Post a show</a>
</header>
<main>
{flash}
{content}
</main>
</body>
</html>
"#,
        title = escape(title),
        style = STYLE,
        flash = flash_html,
        content = content,
    )
}

/// Dedicated page for 404 / 500 and other error statuses
pub fn error_page(status: StatusCode) -> String {
    let (heading, text) = match status {
        StatusCode::NOT_FOUND => ("404 Not Found", "The page you requested does not exist."),
        StatusCode::BAD_REQUEST => ("400 Bad Request", "The request could not be understood."),
        _ => (
            "500 Server Error",
            "Something went wrong on our end. Please try again.",
        ),
    };

    layout(
        heading,
        None,
        &format!(
            r#"<h1>{}</h1>
<p>{}</p>
<p><a href="/">Back to home</a></p>"#,
            heading, text
        ),
    )
}

/// Optional text, escaped, with a fallback for missing values
pub(crate) fn or_dash(value: &Option<String>) -> String {
    value.as_deref().map(escape).unwrap_or_else(|| "-".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(
            escape(r#"<b>"Rock" & 'Roll'</b>"#),
            "&lt;b&gt;&quot;Rock&quot; &amp; &#x27;Roll&#x27;&lt;/b&gt;"
        );
    }

    #[test]
    fn test_layout_shows_flash() {
        let html = layout("Home", Some(&Flash::Success("Saved <ok>".into())), "<p>x</p>");
        assert!(html.contains("flash-success"));
        assert!(html.contains("Saved &lt;ok&gt;"));
        assert!(html.contains("<p>x</p>"));
    }

    #[test]
    fn test_error_page_headings() {
        assert!(error_page(StatusCode::NOT_FOUND).contains("404 Not Found"));
        assert!(error_page(StatusCode::INTERNAL_SERVER_ERROR).contains("500 Server Error"));
    }
}
