//! Storage the build reads from and writes to.
//!
//! The pipeline never touches the filesystem directly; it goes through a
//! [`ContentRepository`], so the same run can be driven against directories
//! on disk ([`FsRepository`]) or in memory ([`MemoryRepository`]).

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::{fs, io};

use crate::config::Config;
use crate::content::SubmissionRef;

pub trait ContentRepository {
    /// Every pending submission, in a stable order.
    fn list_submissions(&self) -> io::Result<Vec<SubmissionRef>>;

    fn read_submission(&self, submission: &SubmissionRef) -> io::Result<String>;

    /// Removes a submission. Removing one that is already gone is not an error.
    fn delete_submission(&mut self, submission: &SubmissionRef) -> io::Result<()>;

    /// Writes the page of a post, replacing any previous version.
    fn write_page(&mut self, slug: &str, html: &str) -> io::Result<()>;

    fn read_index(&self) -> io::Result<String>;

    fn write_index(&mut self, html: &str) -> io::Result<()>;

    /// Raw author store, `None` when there is none.
    fn read_authors(&self) -> io::Result<Option<String>>;
}

pub struct FsRepository {
    pub posts_dir: PathBuf,
    pub output_dir: PathBuf,
    pub index_file: PathBuf,
    pub authors_file: PathBuf,
    pub extension: String,
}

impl FsRepository {
    pub fn from_config(config: &Config) -> FsRepository {
        FsRepository {
            posts_dir: config.paths.posts_dir.clone(),
            output_dir: config.paths.output_dir.clone(),
            index_file: config.paths.index_file.clone(),
            authors_file: config.paths.authors_file.clone(),
            extension: config.defaults.submission_extension.clone(),
        }
    }

    fn is_submission(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext == self.extension.trim_start_matches('.'))
            .unwrap_or(false)
    }
}

impl ContentRepository for FsRepository {
    fn list_submissions(&self) -> io::Result<Vec<SubmissionRef>> {
        let mut submissions = vec![];
        for entry in fs::read_dir(&self.posts_dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() || !self.is_submission(&entry.path()) {
                continue;
            }
            if let Some(file_name) = entry.file_name().to_str() {
                submissions.push(SubmissionRef(file_name.to_string()));
            }
        }
        submissions.sort();
        Ok(submissions)
    }

    fn read_submission(&self, submission: &SubmissionRef) -> io::Result<String> {
        fs::read_to_string(self.posts_dir.join(&submission.0))
    }

    fn delete_submission(&mut self, submission: &SubmissionRef) -> io::Result<()> {
        match fs::remove_file(self.posts_dir.join(&submission.0)) {
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            res => res,
        }
    }

    fn write_page(&mut self, slug: &str, html: &str) -> io::Result<()> {
        fs::create_dir_all(&self.output_dir)?;
        fs::write(self.output_dir.join(format!("{}.html", slug)), html)
    }

    fn read_index(&self) -> io::Result<String> {
        match fs::read_to_string(&self.index_file) {
            Ok(content) => Ok(content),
            Err(e) => Err(io::Error::new(
                e.kind(),
                format!("Error opening homepage document {}: {}", self.index_file.display(), e),
            )),
        }
    }

    fn write_index(&mut self, html: &str) -> io::Result<()> {
        fs::write(&self.index_file, html)
    }

    fn read_authors(&self) -> io::Result<Option<String>> {
        match fs::read_to_string(&self.authors_file) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }
}

/// Keeps everything in maps. Submissions are listed by name.
#[derive(Debug, Default, Clone)]
pub struct MemoryRepository {
    submissions: BTreeMap<SubmissionRef, String>,
    pages: BTreeMap<String, String>,
    index: Option<String>,
    authors: Option<String>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        MemoryRepository::default()
    }

    pub fn with_submission(mut self, name: &str, raw: &str) -> Self {
        self.submissions.insert(SubmissionRef(name.to_string()), raw.to_string());
        self
    }

    pub fn with_index(mut self, html: &str) -> Self {
        self.index = Some(html.to_string());
        self
    }

    pub fn with_authors(mut self, json: &str) -> Self {
        self.authors = Some(json.to_string());
        self
    }

    pub fn has_submission(&self, name: &str) -> bool {
        self.submissions.contains_key(&SubmissionRef(name.to_string()))
    }

    pub fn page(&self, slug: &str) -> Option<&str> {
        self.pages.get(slug).map(|p| p.as_str())
    }

    pub fn pages(&self) -> &BTreeMap<String, String> {
        &self.pages
    }

    pub fn index(&self) -> Option<&str> {
        self.index.as_deref()
    }
}

fn not_found(what: &str) -> io::Error {
    io::Error::new(ErrorKind::NotFound, format!("{} not found", what))
}

impl ContentRepository for MemoryRepository {
    fn list_submissions(&self) -> io::Result<Vec<SubmissionRef>> {
        Ok(self.submissions.keys().cloned().collect())
    }

    fn read_submission(&self, submission: &SubmissionRef) -> io::Result<String> {
        self.submissions
            .get(submission)
            .cloned()
            .ok_or_else(|| not_found(&submission.0))
    }

    fn delete_submission(&mut self, submission: &SubmissionRef) -> io::Result<()> {
        self.submissions.remove(submission);
        Ok(())
    }

    fn write_page(&mut self, slug: &str, html: &str) -> io::Result<()> {
        self.pages.insert(slug.to_string(), html.to_string());
        Ok(())
    }

    fn read_index(&self) -> io::Result<String> {
        self.index.clone().ok_or_else(|| not_found("Homepage document"))
    }

    fn write_index(&mut self, html: &str) -> io::Result<()> {
        self.index = Some(html.to_string());
        Ok(())
    }

    fn read_authors(&self) -> io::Result<Option<String>> {
        Ok(self.authors.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fs_repository(root: &Path) -> FsRepository {
        FsRepository {
            posts_dir: root.join("posts"),
            output_dir: root.join("posts"),
            index_file: root.join("index.html"),
            authors_file: root.join("data").join("authors.json"),
            extension: "txt".to_string(),
        }
    }

    #[test]
    fn test_fs_repository() -> io::Result<()> {
        let dir = tempfile::tempdir()?;
        let posts = dir.path().join("posts");
        fs::create_dir_all(posts.join("drafts.txt"))?;
        fs::write(posts.join("b.txt"), "Title:\nB")?;
        fs::write(posts.join("a.txt"), "Title:\nA")?;
        fs::write(posts.join("a.html"), "<html></html>")?;
        fs::write(posts.join("notes.md"), "# notes")?;
        fs::write(dir.path().join("index.html"), "<!-- stream:begin --><!-- stream:end -->")?;

        let mut repo = fs_repository(dir.path());
        let submissions = repo.list_submissions()?;
        assert_eq!(submissions, [SubmissionRef("a.txt".to_string()), SubmissionRef("b.txt".to_string())]);
        assert_eq!(repo.read_submission(&submissions[1])?, "Title:\nB");

        assert_eq!(repo.read_authors()?, None);
        fs::create_dir_all(dir.path().join("data"))?;
        fs::write(dir.path().join("data").join("authors.json"), "{}")?;
        assert_eq!(repo.read_authors()?, Some("{}".to_string()));

        repo.write_page("nuevo-chip", "<p>hola</p>")?;
        assert_eq!(fs::read_to_string(posts.join("nuevo-chip.html"))?, "<p>hola</p>");

        repo.delete_submission(&submissions[0])?;
        repo.delete_submission(&submissions[0])?;
        assert!(!posts.join("a.txt").exists());

        repo.write_index("new")?;
        assert_eq!(repo.read_index()?, "new");
        Ok(())
    }

    #[test]
    fn test_fs_repository_missing_index() {
        let dir = tempfile::tempdir().unwrap();
        let repo = fs_repository(dir.path());
        let err = repo.read_index().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert!(repo.list_submissions().is_err());
    }

    #[test]
    fn test_memory_repository() -> io::Result<()> {
        let mut repo = MemoryRepository::new()
            .with_submission("b.txt", "B")
            .with_submission("a.txt", "A");

        let submissions = repo.list_submissions()?;
        assert_eq!(submissions, [SubmissionRef("a.txt".to_string()), SubmissionRef("b.txt".to_string())]);
        assert!(repo.read_index().is_err());
        assert_eq!(repo.read_authors()?, None);

        repo.delete_submission(&submissions[0])?;
        assert!(!repo.has_submission("a.txt"));
        assert!(repo.has_submission("b.txt"));

        repo.write_page("b", "<p>B</p>")?;
        assert_eq!(repo.page("b"), Some("<p>B</p>"));
        Ok(())
    }
}
