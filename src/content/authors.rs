use std::collections::HashMap;

use serde::Deserialize;

use crate::content::Author;
use crate::error::BuildError;

#[derive(Deserialize, Default)]
struct AuthorRecord {
    name: Option<String>,
    title: Option<String>,
    bio: Option<String>,
    image: Option<String>,
    image_alt: Option<String>,
}

/// Read-only author profiles, loaded once per run.
#[derive(Debug, Default)]
pub struct AuthorStore {
    authors: HashMap<String, Author>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

impl AuthorStore {
    pub fn empty() -> Self {
        AuthorStore::default()
    }

    /// Parses a JSON object keyed by author key.
    pub fn from_json(src: &str) -> Result<Self, BuildError> {
        let records: HashMap<String, AuthorRecord> =
            serde_json::from_str(src).map_err(|e| BuildError::AuthorStore(e.to_string()))?;

        let authors = records
            .into_iter()
            .map(|(key, record)| {
                let name = non_blank(record.name).unwrap_or_else(|| key.clone());
                let image_alt = non_blank(record.image_alt).unwrap_or_else(|| format!("Portrait of {}", name));
                let author = Author {
                    key: key.clone(),
                    title: record.title.unwrap_or_default(),
                    bio: record.bio.unwrap_or_default(),
                    image: non_blank(record.image).unwrap_or_default(),
                    image_alt,
                    name,
                };
                (key, author)
            })
            .collect();

        Ok(AuthorStore { authors })
    }

    pub fn resolve(&self, key: &str) -> Option<&Author> {
        self.authors.get(key)
    }

    /// Name to show for an author key; the key itself when nobody matches.
    pub fn display_name<'a>(&'a self, key: &'a str) -> &'a str {
        match self.resolve(key) {
            Some(author) => author.name.as_str(),
            None => key,
        }
    }

    pub fn len(&self) -> usize {
        self.authors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.authors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use crate::test_data::AUTHORS_JSON;

    use super::*;

    #[test]
    fn test_resolve() {
        let store = AuthorStore::from_json(AUTHORS_JSON).unwrap();
        assert_eq!(store.len(), 2);

        let ana = store.resolve("ana").unwrap();
        assert_eq!(ana.name, "Ana Torres");
        assert_eq!(ana.title, "Editora de hardware");
        assert_eq!(ana.image, "authors/ana.jpg");
        assert_eq!(ana.image_alt, "Portrait of Ana Torres");

        let luis = store.resolve("luis").unwrap();
        assert_eq!(luis.name, "luis");
        assert_eq!(luis.bio, "");
        assert_eq!(luis.image, "");
        assert_eq!(luis.image_alt, "Portrait of luis");

        assert!(store.resolve("nadie").is_none());
        assert!(store.resolve("Ana").is_none());
    }

    #[test]
    fn test_display_name() {
        let store = AuthorStore::from_json(AUTHORS_JSON).unwrap();
        assert_eq!(store.display_name("ana"), "Ana Torres");
        assert_eq!(store.display_name("Redacción"), "Redacción");
        assert_eq!(AuthorStore::empty().display_name("ana"), "ana");
    }

    #[test]
    fn test_invalid_json() {
        let err = AuthorStore::from_json("[1, 2]").unwrap_err();
        assert!(matches!(err, BuildError::AuthorStore(_)));
    }
}
