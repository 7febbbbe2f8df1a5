use crate::models::Listing;
use std::fmt::Write;

const STYLE: &str = r#"
    body { font-family: system-ui, sans-serif; max-width: 960px; margin: 2rem auto; padding: 0 1rem; color: #222; }
    form { display: flex; gap: .75rem; flex-wrap: wrap; align-items: end; }
    label { display: flex; flex-direction: column; font-size: .9rem; gap: .25rem; }
    input { padding: .5rem; font-size: 1rem; }
    button { padding: .55rem 1.2rem; font-size: 1rem; cursor: pointer; }
    table { border-collapse: collapse; width: 100%; margin-top: 1rem; }
    th, td { text-align: left; padding: .5rem; border-bottom: 1px solid #ddd; }
    .muted { color: #777; }
"#;

/// Escape text for use inside HTML element content and quoted attributes
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{title}</title>
  <style>{STYLE}</style>
</head>
<body>
{body}
</body>
</html>
"#,
        title = escape_html(title),
    )
}

/// Search form
pub fn index_page() -> String {
    layout(
        "Listing Scout",
        r#"<h1>Listing Scout</h1>
<p class="muted">Find businesses on the map and rank them by rating. A search takes up to a minute.</p>
<form method="post" action="/">
  <label>City <input type="text" name="city" placeholder="New York" required></label>
  <label>Category <input type="text" name="category" placeholder="restaurants" required></label>
  <button type="submit">Search</button>
</form>"#,
    )
}

/// Results table for one search, in the order given
pub fn results_page(city: &str, category: &str, listings: &[Listing]) -> String {
    let mut body = format!(
        "<h1>{} in {}</h1>\n<p class=\"muted\">{} listing{} found</p>\n",
        escape_html(category),
        escape_html(city),
        listings.len(),
        if listings.len() == 1 { "" } else { "s" }
    );

    if listings.is_empty() {
        body.push_str("<p>No listings found. The map may have returned nothing, or the search timed out.</p>\n");
    } else {
        body.push_str(
            "<table>\n<thead><tr><th>#</th><th>Name</th><th>Address</th><th>Phone</th><th>Rating</th></tr></thead>\n<tbody>\n",
        );
        for listing in listings {
            let _ = writeln!(
                body,
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
                listing.position,
                escape_html(&listing.name),
                escape_html(&listing.address),
                listing
                    .phone
                    .as_deref()
                    .map(escape_html)
                    .unwrap_or_else(|| "&ndash;".to_string()),
                listing
                    .rating
                    .map(|r| format!("{:.1} &#9733;", r))
                    .unwrap_or_else(|| "&ndash;".to_string()),
            );
        }
        body.push_str("</tbody>\n</table>\n");
    }

    body.push_str("<p><a href=\"/\">New search</a></p>");
    layout(&format!("{} in {}", category, city), &body)
}
