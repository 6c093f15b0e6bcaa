use chrono::NaiveDateTime;

pub mod authors;
pub mod body;
pub mod submission;

const PUBLISHED: &str = "published";

/// Name of a submission inside the repository it was listed from.
#[derive(Debug, Clone, Eq, Hash, PartialEq, Ord, PartialOrd)]
pub struct SubmissionRef(pub String);

impl SubmissionRef {
    /// File name without its extension.
    pub fn stem(&self) -> &str {
        match self.0.rsplit_once('.') {
            Some((stem, _ext)) if !stem.is_empty() => stem,
            _ => self.0.as_str(),
        }
    }
}

/// One article, built once per run from its submission and never changed
/// afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    pub title: String,
    pub body: String,
    pub tags: Vec<String>,
    pub date: String,
    pub time: String,
    /// Key into the author store, not a display name.
    pub author: String,
    pub summary: String,
    pub featured_image: String,
    pub featured_image_alt: String,
    pub slug: String,
    pub category: String,
    pub status: String,
    /// Author-facing notes. Never rendered.
    pub notes: String,
    pub source: SubmissionRef,
    /// `date` + `time`, the only ordering key.
    pub datetime: NaiveDateTime,
}

impl Post {
    pub fn is_published(&self) -> bool {
        self.status.to_lowercase() == PUBLISHED
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Author {
    pub key: String,
    pub name: String,
    pub title: String,
    pub bio: String,
    pub image: String,
    pub image_alt: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stem() {
        assert_eq!(SubmissionRef("nuevo-chip.txt".to_string()).stem(), "nuevo-chip");
        assert_eq!(SubmissionRef("archive.tar.txt".to_string()).stem(), "archive.tar");
        assert_eq!(SubmissionRef("README".to_string()).stem(), "README");
        assert_eq!(SubmissionRef(".txt".to_string()).stem(), ".txt");
    }
}
