//! One build run: submissions in, post pages and homepage regions out.

use std::collections::HashMap;

use anyhow::{Context, Result};
use spdlog::{debug, info, warn};

use crate::config::{Config, InvalidSubmissionPolicy, SlugCollisionPolicy};
use crate::content::authors::AuthorStore;
use crate::content::submission::parse_submission;
use crate::content::{Post, SubmissionRef};
use crate::error::BuildError;
use crate::index_splicer::{splice, Region};
use crate::related::select_related;
use crate::repository::ContentRepository;
use crate::view::fragment::FragmentSerializer;
use crate::view::page_renderer::PageRenderer;

/// What a run did, newest post first.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct BuildReport {
    pub pages_written: Vec<String>,
    pub retired: Vec<SubmissionRef>,
    pub skipped: Vec<SubmissionRef>,
    pub featured: Option<String>,
    pub stream: Vec<String>,
}

fn load_authors<R: ContentRepository>(repo: &R) -> Result<AuthorStore> {
    let authors = match repo.read_authors().context("Error reading author store")? {
        Some(src) => AuthorStore::from_json(&src)?,
        None => {
            info!("No author store found, authors will show as their keys");
            AuthorStore::empty()
        }
    };
    debug!("Loaded {} authors", authors.len());
    Ok(authors)
}

fn is_invalid_submission(err: &BuildError) -> bool {
    matches!(err, BuildError::InvalidDateTime { .. } | BuildError::InvalidSlug { .. })
}

/// Parses every pending submission. Invalid ones either abort the run or are
/// left out, depending on `policy`.
fn load_posts<R: ContentRepository>(repo: &R, policy: InvalidSubmissionPolicy) -> Result<(Vec<Post>, Vec<SubmissionRef>)> {
    let mut posts = vec![];
    let mut skipped = vec![];

    for submission in repo.list_submissions().context("Error listing submissions")? {
        info!("Reading submission {}", submission.0);
        let raw = repo
            .read_submission(&submission)
            .with_context(|| format!("Error reading submission {}", submission.0))?;

        match parse_submission(submission.clone(), &raw) {
            Ok(post) => posts.push(post),
            Err(e) if policy == InvalidSubmissionPolicy::Skip && is_invalid_submission(&e) => {
                warn!("Skipping submission: {}", e);
                skipped.push(submission);
            }
            Err(e) => return Err(e.into()),
        }
    }

    Ok((posts, skipped))
}

/// Newest first. Posts at the same minute keep their listing order.
fn sort_posts(posts: &mut [Post]) {
    posts.sort_by(|a, b| b.datetime.cmp(&a.datetime));
}

fn check_slugs(posts: &[Post], policy: SlugCollisionPolicy) -> Result<(), BuildError> {
    let mut owners: HashMap<&str, &SubmissionRef> = HashMap::new();
    for post in posts {
        let Some(first) = owners.insert(&post.slug, &post.source) else {
            continue;
        };
        match policy {
            SlugCollisionPolicy::Reject => {
                return Err(BuildError::SlugCollision {
                    slug: post.slug.clone(),
                    first: first.0.clone(),
                    second: post.source.0.clone(),
                });
            }
            SlugCollisionPolicy::LastWriteWins => {
                warn!("Slug {} is used by {} and {}, the page of {} wins", post.slug, first.0, post.source.0, post.source.0);
            }
        }
    }
    Ok(())
}

fn region_content(html: &str) -> String {
    if html.is_empty() {
        "\n".to_string()
    } else {
        format!("\n{}\n", html)
    }
}

/// Runs a full build against `repo`.
///
/// The homepage splice is computed before anything is written, so a
/// homepage without its markers stops the run before any page is written or
/// any submission retired. The homepage itself is written last.
pub fn build_site<R, S>(repo: &mut R, config: &Config, serializer: &S) -> Result<BuildReport>
where
    R: ContentRepository,
    S: FragmentSerializer,
{
    let defaults = &config.defaults;
    let markers = &config.markers;

    let authors = load_authors(repo)?;
    let (mut posts, skipped) = load_posts(repo, defaults.invalid_submission)?;
    sort_posts(&mut posts);
    check_slugs(&posts, defaults.slug_collision)?;

    let published: Vec<&Post> = posts.iter().filter(|post| post.is_published()).collect();
    info!("Found {} submissions, {} published", posts.len(), published.len());

    let renderer = PageRenderer::new(serializer, &authors, &config.site.posts_url, defaults.card_tag_count);

    let featured = published.first().copied();
    let stream: Vec<&Post> = published.iter().skip(1).take(defaults.stream_size).copied().collect();

    let hero_html = featured.map(|post| region_content(&renderer.hero(post)));
    let stream_html = region_content(&renderer.stream(&stream));

    let mut regions = vec![];
    match hero_html {
        Some(ref content) => regions.push(Region {
            begin: &markers.featured_begin,
            end: &markers.featured_end,
            content,
        }),
        None => info!("No published posts, featured region left as is"),
    }
    regions.push(Region {
        begin: &markers.stream_begin,
        end: &markers.stream_end,
        content: &stream_html,
    });

    let index = repo.read_index().context("Error reading homepage document")?;
    let index = splice(&index, &regions)?;

    let mut report = BuildReport {
        skipped,
        featured: featured.map(|post| post.slug.clone()),
        stream: stream.iter().map(|post| post.slug.clone()).collect(),
        ..BuildReport::default()
    };

    for post in &posts {
        if authors.resolve(&post.author).is_none() {
            warn!("Unknown author {} in {}", post.author, post.source.0);
        }

        let related = select_related(post, &published, defaults.related_count);
        let html = renderer.post_page(post, &related);
        repo.write_page(&post.slug, &html)
            .with_context(|| format!("Error writing page {}", post.slug))?;
        info!("Page {} written ({} related)", post.slug, related.len());
        report.pages_written.push(post.slug.clone());
    }

    for post in &published {
        repo.delete_submission(&post.source)
            .with_context(|| format!("Error retiring submission {}", post.source.0))?;
        info!("Submission {} retired", post.source.0);
        report.retired.push(post.source.clone());
    }

    repo.write_index(&index).context("Error writing homepage document")?;
    info!("Homepage updated with {} stream posts", report.stream.len());

    Ok(report)
}
