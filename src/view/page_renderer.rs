use crate::content::authors::AuthorStore;
use crate::content::body::render_body;
use crate::content::Post;
use crate::text_utils::normalize_tag;
use crate::view::fragment::{AuthorCard, Card, CardKind, FragmentSerializer, PostPage};
use crate::view::image_path::{normalize_image, PageLocation};

/// Builds pages and homepage fragments out of posts.
pub struct PageRenderer<'a, S: FragmentSerializer> {
    serializer: &'a S,
    authors: &'a AuthorStore,
    /// Post pages directory as seen from the homepage.
    posts_url: &'a str,
    /// Badges shown on stream and related cards.
    card_tag_count: usize,
}

/// Tag badges show the normalized form of each tag.
fn badge_tags(tags: &[String], limit: Option<usize>) -> Vec<String> {
    let badges = tags.iter().map(|t| normalize_tag(t)).filter(|t| !t.is_empty());
    match limit {
        Some(limit) => badges.take(limit).collect(),
        None => badges.collect(),
    }
}

impl<'a, S: FragmentSerializer> PageRenderer<'a, S> {
    pub fn new(serializer: &'a S, authors: &'a AuthorStore, posts_url: &'a str, card_tag_count: usize) -> Self {
        PageRenderer {
            serializer,
            authors,
            posts_url,
            card_tag_count,
        }
    }

    fn link(&self, kind: CardKind, post: &Post) -> String {
        let posts_url = self.posts_url.trim_end_matches('/');
        match kind {
            CardKind::Related => format!("{}.html", post.slug),
            _ if posts_url.is_empty() => format!("{}.html", post.slug),
            _ => format!("{}/{}.html", posts_url, post.slug),
        }
    }

    fn card(&self, kind: CardKind, post: &Post) -> Card {
        let location = match kind {
            CardKind::Related => PageLocation::PostPage,
            CardKind::Stream | CardKind::Hero => PageLocation::SiteRoot,
        };

        Card {
            kind,
            link: self.link(kind, post),
            image: normalize_image(&post.featured_image, location),
            image_alt: post.featured_image_alt.clone(),
            title: post.title.clone(),
            date: post.date.clone(),
            author: self.authors.display_name(&post.author).to_string(),
            category: post.category.clone(),
            summary: post.summary.clone(),
            tags: badge_tags(&post.tags, Some(self.card_tag_count)),
        }
    }

    fn cards(&self, kind: CardKind, posts: &[&Post]) -> Vec<Card> {
        posts.iter().map(|post| self.card(kind, post)).collect()
    }

    /// Full page of a post, with its related posts already selected.
    pub fn post_page(&self, post: &Post, related: &[&Post]) -> String {
        let author = self.authors.resolve(&post.author).map(|author| AuthorCard {
            image: normalize_image(&author.image, PageLocation::PostPage),
            author,
        });

        let page = PostPage {
            title: &post.title,
            category: &post.category,
            date: &post.date,
            time: &post.time,
            author_name: self.authors.display_name(&post.author),
            image: normalize_image(&post.featured_image, PageLocation::PostPage),
            image_alt: &post.featured_image_alt,
            body: render_body(&post.body),
            tags: badge_tags(&post.tags, None),
            author,
            related: self.cards(CardKind::Related, related),
        };

        self.serializer.post_page(&page)
    }

    pub fn stream(&self, posts: &[&Post]) -> String {
        self.serializer.cards(CardKind::Stream, &self.cards(CardKind::Stream, posts))
    }

    pub fn hero(&self, post: &Post) -> String {
        self.serializer.cards(CardKind::Hero, &[self.card(CardKind::Hero, post)])
    }

    pub fn related(&self, posts: &[&Post]) -> String {
        self.serializer.cards(CardKind::Related, &self.cards(CardKind::Related, posts))
    }
}

#[cfg(test)]
mod tests {
    use crate::config::Site;
    use crate::content::submission::parse_submission;
    use crate::content::SubmissionRef;
    use crate::test_data::{submission, AUTHORS_JSON, SUBMISSION_PUBLISHED};
    use crate::view::html_serializer::HtmlSerializer;

    use super::*;

    fn published() -> Post {
        parse_submission(SubmissionRef("nuevo-chip.txt".to_string()), SUBMISSION_PUBLISHED).unwrap()
    }

    fn post(title: &str, slug: &str, tags: &str) -> Post {
        let raw = submission(title, slug, tags, "2024-03-01", "10:00", "published");
        parse_submission(SubmissionRef(format!("{}.txt", slug)), &raw).unwrap()
    }

    fn serializer() -> HtmlSerializer {
        HtmlSerializer::load(Site::default(), None).unwrap()
    }

    #[test]
    fn test_badge_tags() {
        let tags = vec!["Hardware ".to_string(), " Inteligencia Artificial".to_string(), " ".to_string(), "apple".to_string()];
        assert_eq!(badge_tags(&tags, None), ["hardware", "inteligenciaartificial", "apple"]);
        assert_eq!(badge_tags(&tags, Some(2)), ["hardware", "inteligenciaartificial"]);
    }

    #[test]
    fn test_cards_per_kind() {
        let serializer = serializer();
        let authors = AuthorStore::from_json(AUTHORS_JSON).unwrap();
        let renderer = PageRenderer::new(&serializer, &authors, "posts", 2);
        let post = published();

        let stream = renderer.card(CardKind::Stream, &post);
        assert_eq!(stream.link, "posts/nuevo-chip.html");
        assert_eq!(stream.image, "assets/img/chip.jpg");
        assert_eq!(stream.author, "Ana Torres");
        assert_eq!(stream.tags, ["hardware", "apple"]);
        assert_eq!(stream.summary, "El nuevo chip promete el doble de rendimiento.");

        let hero = renderer.card(CardKind::Hero, &post);
        assert_eq!(hero.link, "posts/nuevo-chip.html");
        assert_eq!(hero.image, "assets/img/chip.jpg");

        let related = renderer.card(CardKind::Related, &post);
        assert_eq!(related.link, "nuevo-chip.html");
        assert_eq!(related.image, "../assets/img/chip.jpg");
    }

    #[test]
    fn test_unknown_author_falls_back_to_key() {
        let serializer = serializer();
        let authors = AuthorStore::empty();
        let renderer = PageRenderer::new(&serializer, &authors, "posts/", 2);
        let post = published();

        let card = renderer.card(CardKind::Stream, &post);
        assert_eq!(card.author, "ana");
        assert_eq!(card.link, "posts/nuevo-chip.html");

        let html = renderer.post_page(&post, &[]);
        assert!(html.contains("<span>ana</span>"));
        assert!(!html.contains("author-card"));
        assert!(!html.contains("class=\"related\""));
    }

    #[test]
    fn test_post_page() {
        let serializer = serializer();
        let authors = AuthorStore::from_json(AUTHORS_JSON).unwrap();
        let renderer = PageRenderer::new(&serializer, &authors, "posts", 2);
        let other = post("Otro chip", "otro-chip", "hardware, amd, gpu");
        let chip = published();

        let html = renderer.post_page(&chip, &[&other]);
        assert!(html.contains("<h1>Nuevo chip de Apple</h1>"));
        assert!(html.contains("<h1>Un salto enorme</h1>"));
        assert!(html.contains("<p>Apple presentó hoy su nuevo chip. Promete el doble de rendimiento.</p>"));
        assert!(html.contains("<li>Más núcleos</li>"));
        assert!(html.contains("<span>#chips</span>"));
        assert!(html.contains("src=\"../assets/img/chip.jpg\""));
        assert!(html.contains("<span>Ana Torres</span>"));
        assert!(!html.contains("Revisar cifras"));
        assert!(html.contains("<section class=\"author-card\">"));
        assert!(html.contains("src=\"../assets/img/authors/ana.jpg\""));
        assert!(html.contains("<section class=\"related\">"));
        assert!(html.contains("href=\"otro-chip.html\""));
        // related cards only carry the first badges
        assert!(html.contains("<span>#amd</span>"));
        assert!(!html.contains("#gpu"));
    }

    #[test]
    fn test_homepage_fragments() {
        let serializer = serializer();
        let authors = AuthorStore::empty();
        let renderer = PageRenderer::new(&serializer, &authors, "posts", 1);
        let a = post("Uno", "uno", "a, b");
        let b = post("Dos", "dos", "c");

        let stream = renderer.stream(&[&a, &b]);
        assert_eq!(stream.matches("post--compact").count(), 2);
        assert!(stream.contains("<span>#a</span>"));
        assert!(!stream.contains("<span>#b</span>"));
        assert!(stream.find("posts/uno.html").unwrap() < stream.find("posts/dos.html").unwrap());
        assert_eq!(renderer.stream(&[]), "");

        let hero = renderer.hero(&a);
        assert!(hero.contains("hero__card"));
        assert!(hero.contains("href=\"posts/uno.html\""));

        let related = renderer.related(&[&b]);
        assert!(related.contains("href=\"dos.html\""));
        assert!(related.contains("src=\"../assets/img/dos.jpg\""));
    }
}
