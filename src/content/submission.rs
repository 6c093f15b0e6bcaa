//! Labeled plain-text submissions.
//!
//! A submission is a sequence of label lines, each followed by the lines of its
//! value:
//!
//! ```text
//! Title:
//! Nuevo chip de Apple
//! Tags (comma-separated):
//! hardware, apple
//! Date Created (YYYY-MM-DD):
//! 2024-03-05
//! ...
//! ```
//!
//! Labels are matched against the whole trimmed line. A value line that is
//! textually identical to a label is read as that label; there is no escaping.

use std::collections::HashMap;

use crate::content::{Post, SubmissionRef};
use crate::error::BuildError;
use crate::text_utils::{is_safe_slug, parse_date_time, slug_from_title};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Title,
    Body,
    Tags,
    Date,
    Time,
    Author,
    Summary,
    FeaturedImage,
    FeaturedImageAlt,
    Slug,
    Category,
    Status,
    Notes,
}

/// Every recognized label, in the order submissions are written.
pub const FIELD_LABELS: [(&str, Field); 13] = [
    ("Title:", Field::Title),
    ("Body:", Field::Body),
    ("Tags (comma-separated):", Field::Tags),
    ("Date Created (YYYY-MM-DD):", Field::Date),
    ("Time Created (HH:MM, 24h):", Field::Time),
    ("Author:", Field::Author),
    ("Summary/Excerpt:", Field::Summary),
    ("Featured Image URL:", Field::FeaturedImage),
    ("Featured Image Alt:", Field::FeaturedImageAlt),
    ("Slug (URL-friendly title):", Field::Slug),
    ("Category:", Field::Category),
    ("Status (draft/published):", Field::Status),
    ("Additional Notes:", Field::Notes),
];

impl Field {
    pub fn from_label(line: &str) -> Option<Field> {
        let line = line.trim();
        FIELD_LABELS
            .iter()
            .find(|(label, _)| *label == line)
            .map(|(_, field)| *field)
    }

    pub fn label(self) -> &'static str {
        FIELD_LABELS
            .iter()
            .find(|(_, field)| *field == self)
            .map(|(label, _)| *label)
            .unwrap_or_default()
    }
}

/// Trimmed values of a submission. Fields that never appeared read as `""`.
#[derive(Debug, Default)]
pub struct FieldMap {
    values: HashMap<Field, String>,
}

impl FieldMap {
    pub fn get(&self, field: Field) -> &str {
        self.values.get(&field).map(|v| v.as_str()).unwrap_or("")
    }

    pub fn tags(&self) -> Vec<String> {
        extract_tags(self.get(Field::Tags))
    }
}

pub fn parse_fields(raw: &str) -> FieldMap {
    let mut lines_by_field: HashMap<Field, Vec<&str>> = HashMap::new();
    let mut current: Option<Field> = None;

    for line in raw.lines() {
        if let Some(field) = Field::from_label(line) {
            current = Some(field);
            continue;
        }

        // Anything before the first label is dropped
        if let Some(field) = current {
            lines_by_field.entry(field).or_default().push(line);
        }
    }

    let values = lines_by_field
        .into_iter()
        .map(|(field, lines)| (field, lines.join("\n").trim().to_string()))
        .collect();

    FieldMap { values }
}

fn extract_tags(tags_str: &str) -> Vec<String> {
    tags_str
        .split(',')
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .map(|t| t.to_string())
        .collect()
}

/// Parses a submission into a [`Post`].
///
/// Missing fields become empty strings. The only hard requirements are a valid
/// date/time and a slug usable as a file name; a blank slug is derived from the
/// title, or from the submission name when the title is blank too.
pub fn parse_submission(source: SubmissionRef, raw: &str) -> Result<Post, BuildError> {
    let fields = parse_fields(raw);

    let title = fields.get(Field::Title).to_string();
    let date = fields.get(Field::Date).to_string();
    let time = fields.get(Field::Time).to_string();

    let datetime = parse_date_time(&date, &time).map_err(|_| BuildError::InvalidDateTime {
        submission: source.0.clone(),
        value: format!("{} {}", date, time),
    })?;

    let slug = match fields.get(Field::Slug) {
        "" => match slug_from_title(&title) {
            s if s.is_empty() => source.stem().to_string(),
            s => s,
        },
        s => s.to_string(),
    };
    if !is_safe_slug(&slug) {
        return Err(BuildError::InvalidSlug {
            submission: source.0.clone(),
            slug,
        });
    }

    let featured_image_alt = match fields.get(Field::FeaturedImageAlt) {
        "" => format!("Featured image of {}", title),
        alt => alt.to_string(),
    };

    Ok(Post {
        body: fields.get(Field::Body).to_string(),
        tags: fields.tags(),
        author: fields.get(Field::Author).to_string(),
        summary: fields.get(Field::Summary).to_string(),
        featured_image: fields.get(Field::FeaturedImage).to_string(),
        featured_image_alt,
        slug,
        category: fields.get(Field::Category).to_string(),
        status: fields.get(Field::Status).to_string(),
        notes: fields.get(Field::Notes).to_string(),
        title,
        date,
        time,
        source,
        datetime,
    })
}
