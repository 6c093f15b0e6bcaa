use chrono::NaiveDateTime;

/// Combines a `YYYY-MM-DD` date and a 24h `HH:MM` time.
pub fn parse_date_time(date: &str, time: &str) -> Result<NaiveDateTime, String> {
    let buf = format!("{} {}", date.trim(), time.trim());
    match NaiveDateTime::parse_from_str(&buf, "%Y-%m-%d %H:%M") {
        Ok(dt) => Ok(dt),
        Err(e) => Err(format!("Unable to parse date time {}: {}", buf, e)),
    }
}

/// Lowercases a tag and drops every whitespace character, so that
/// `" Hard Ware"` and `"HARDWARE"` become the same token.
pub fn normalize_tag(tag: &str) -> String {
    tag.trim()
        .to_lowercase()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect()
}

/// Builds a URL-friendly slug out of a free-text title.
pub fn slug_from_title(title: &str) -> String {
    let ascii = unidecode::unidecode(title);
    let mut slug = String::new();
    let mut prev_dash = true;

    for c in ascii.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
            prev_dash = false;
        } else if !prev_dash {
            slug.push('-');
            prev_dash = true;
        }
    }

    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

/// A slug ends up as `{slug}.html` inside the output directory, so it must not
/// be able to name anything outside of it.
pub fn is_safe_slug(slug: &str) -> bool {
    !slug.is_empty()
        && !slug.starts_with('.')
        && !slug.contains('/')
        && !slug.contains('\\')
        && !slug.contains("..")
}
