//! Fatal conditions of a build run.
//!
//! Anything that can be resolved by a fallback (unknown author, missing alt
//! text, no related posts) never becomes an error.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum BuildError {
    /// The homepage document lacks one of the sentinel markers of a region
    /// that was asked to be replaced.
    #[error("Missing marker `{marker}` in the homepage document")]
    MissingMarker { marker: String },

    /// Date and time of a submission do not form a valid point in time.
    #[error("Invalid date/time `{value}` in submission {submission}")]
    InvalidDateTime { submission: String, value: String },

    /// The slug cannot be used as a file name inside the output directory.
    #[error("Invalid slug `{slug}` in submission {submission}")]
    InvalidSlug { submission: String, slug: String },

    #[error("Slug `{slug}` is used by both {first} and {second}")]
    SlugCollision {
        slug: String,
        first: String,
        second: String,
    },

    #[error("Error parsing author store: {0}")]
    AuthorStore(String),

    #[error("Error parsing {name} template: {reason}")]
    Template { name: String, reason: String },
}
