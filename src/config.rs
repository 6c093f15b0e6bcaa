use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::{env, fs, io};

use serde::Deserialize;

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Paths {
    /// Pending submissions.
    pub posts_dir: PathBuf,
    /// Generated post pages.
    pub output_dir: PathBuf,
    pub index_file: PathBuf,
    pub authors_file: PathBuf,
    pub template_dir: Option<PathBuf>,
}

impl Default for Paths {
    fn default() -> Self {
        Paths {
            posts_dir: PathBuf::from("posts"),
            output_dir: PathBuf::from("posts"),
            index_file: PathBuf::from("index.html"),
            authors_file: PathBuf::from("data").join("authors.json"),
            template_dir: None,
        }
    }
}

/// What happens to a submission whose date/time does not parse or whose slug
/// is unusable.
#[derive(Deserialize, Debug, Copy, Clone, PartialEq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum InvalidSubmissionPolicy {
    #[default]
    Abort,
    Skip,
}

/// What happens when two submissions map to the same page.
#[derive(Deserialize, Debug, Copy, Clone, PartialEq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SlugCollisionPolicy {
    #[default]
    Reject,
    LastWriteWins,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Defaults {
    pub submission_extension: String,
    pub stream_size: usize,
    pub related_count: usize,
    pub card_tag_count: usize,
    pub invalid_submission: InvalidSubmissionPolicy,
    pub slug_collision: SlugCollisionPolicy,
}

impl Default for Defaults {
    fn default() -> Self {
        Defaults {
            submission_extension: "txt".to_string(),
            stream_size: 10,
            related_count: 3,
            card_tag_count: 2,
            invalid_submission: InvalidSubmissionPolicy::default(),
            slug_collision: SlugCollisionPolicy::default(),
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Markers {
    pub featured_begin: String,
    pub featured_end: String,
    pub stream_begin: String,
    pub stream_end: String,
}

impl Default for Markers {
    fn default() -> Self {
        Markers {
            featured_begin: "<!-- featured:begin -->".to_string(),
            featured_end: "<!-- featured:end -->".to_string(),
            stream_begin: "<!-- stream:begin -->".to_string(),
            stream_end: "<!-- stream:end -->".to_string(),
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Site {
    pub name: String,
    pub tagline: String,
    pub lang: String,
    /// Post pages directory as linked from the homepage.
    pub posts_url: String,
}

impl Default for Site {
    fn default() -> Self {
        Site {
            name: "Newsroom".to_string(),
            tagline: String::new(),
            lang: "en".to_string(),
            posts_url: "posts".to_string(),
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct Log {
    pub level: LogLevel,
    #[serde(default)]
    pub log_to_console: bool,
    pub location: Option<PathBuf>,
}

#[derive(Deserialize, Debug, Copy, Clone, PartialEq)]
pub enum LogLevel {
    Critical = 0,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub paths: Paths,
    pub defaults: Defaults,
    pub markers: Markers,
    pub site: Site,
    pub log: Option<Log>,
}

fn parse_path(path: PathBuf) -> PathBuf {
    let Some(str_path) = path.to_str() else {
        return path;
    };
    if !str_path.starts_with("${exe_dir}") {
        return path;
    }

    let exe_dir = env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.to_path_buf()));
    match exe_dir.as_ref().and_then(|dir| dir.to_str()) {
        Some(exe_dir) => PathBuf::from(str_path.replace("${exe_dir}", exe_dir)),
        None => path,
    }
}

fn resolve(root: &Path, path: PathBuf) -> PathBuf {
    let path = parse_path(path);
    if path.is_absolute() {
        path
    } else {
        root.join(path)
    }
}

impl Config {
    /// Anchors every relative path at `root`.
    pub fn resolve_paths(mut self, root: &Path) -> Config {
        self.paths = Paths {
            posts_dir: resolve(root, self.paths.posts_dir),
            output_dir: resolve(root, self.paths.output_dir),
            index_file: resolve(root, self.paths.index_file),
            authors_file: resolve(root, self.paths.authors_file),
            template_dir: self.paths.template_dir.map(|dir| resolve(root, dir)),
        };
        if let Some(ref mut log) = self.log {
            log.location = log.location.take().map(|location| resolve(root, location));
        }
        self
    }
}

pub fn parse_config(cfg_content: &str) -> io::Result<Config> {
    match toml::from_str::<Config>(cfg_content) {
        Ok(cfg) => Ok(cfg),
        Err(e) => Err(io::Error::new(
            ErrorKind::InvalidData, format!("Error parsing configuration file: {}", e))),
    }
}

pub fn read_config(cfg_path: &Path) -> io::Result<Config> {
    let cfg_content = match fs::read_to_string(cfg_path) {
        Ok(content) => content,
        Err(e) => return Err(io::Error::new(e.kind(), format!("Error opening configuration file {}: {}", cfg_path.display(), e))),
    };

    parse_config(&cfg_content)
}
