use std::fs;
use std::path::Path;

use ramhorns::Template;
use spdlog::debug;

use crate::config::Site;
use crate::error::BuildError;
use crate::view::fragment::{Block, Card, CardKind, FragmentSerializer, PostPage};

const POST_TPL: (&str, &str) = ("post.tpl", include_str!("../../res/template/post.tpl"));
const BODY_TPL: (&str, &str) = ("body.tpl", include_str!("../../res/template/body.tpl"));
const STREAM_CARD_TPL: (&str, &str) = ("stream_card.tpl", include_str!("../../res/template/stream_card.tpl"));
const HERO_CARD_TPL: (&str, &str) = ("hero_card.tpl", include_str!("../../res/template/hero_card.tpl"));
const RELATED_CARD_TPL: (&str, &str) = ("related_card.tpl", include_str!("../../res/template/related_card.tpl"));

#[derive(ramhorns::Content)]
struct ViewTag<'a> {
    tag: &'a str,
}

#[derive(ramhorns::Content)]
struct TextView<'a> {
    text: &'a str,
}

#[derive(ramhorns::Content)]
struct HeadingView<'a> {
    level: u8,
    text: &'a str,
}

#[derive(ramhorns::Content)]
struct ListView<'a> {
    items: Vec<TextView<'a>>,
}

#[derive(ramhorns::Content)]
struct BlockView<'a> {
    heading: Option<HeadingView<'a>>,
    paragraph: Option<TextView<'a>>,
    list: Option<ListView<'a>>,
}

#[derive(ramhorns::Content)]
struct BodyView<'a> {
    blocks: Vec<BlockView<'a>>,
}

#[derive(ramhorns::Content)]
struct CardView<'a> {
    link: &'a str,
    image: &'a str,
    image_alt: &'a str,
    title: &'a str,
    date: &'a str,
    author: &'a str,
    category: &'a str,
    summary: &'a str,
    tags: Vec<ViewTag<'a>>,
}

#[derive(ramhorns::Content)]
struct AuthorView<'a> {
    has_image: bool,
    image: &'a str,
    image_alt: &'a str,
    name: &'a str,
    title: &'a str,
    bio: &'a str,
}

#[derive(ramhorns::Content)]
struct PostView<'a> {
    lang: &'a str,
    site_name: &'a str,
    site_tagline: &'a str,
    title: &'a str,
    category: &'a str,
    date: &'a str,
    time: &'a str,
    author_name: &'a str,
    has_image: bool,
    image: &'a str,
    image_alt: &'a str,
    body: String,
    tags: Vec<ViewTag<'a>>,
    author_card: Option<AuthorView<'a>>,
    has_related: bool,
    related_cards: String,
}

fn view_tags(tags: &[String]) -> Vec<ViewTag> {
    tags.iter().map(|t| ViewTag { tag: t.as_str() }).collect()
}

fn block_view(block: &Block) -> BlockView {
    match block {
        Block::Heading { level, text } => BlockView {
            heading: Some(HeadingView { level: *level, text }),
            paragraph: None,
            list: None,
        },
        Block::Paragraph(text) => BlockView {
            heading: None,
            paragraph: Some(TextView { text }),
            list: None,
        },
        Block::List(items) => BlockView {
            heading: None,
            paragraph: None,
            list: Some(ListView {
                items: items.iter().map(|text| TextView { text }).collect(),
            }),
        },
    }
}

fn card_view(card: &Card) -> CardView {
    CardView {
        link: &card.link,
        image: &card.image,
        image_alt: &card.image_alt,
        title: &card.title,
        date: &card.date,
        author: &card.author,
        category: &card.category,
        summary: &card.summary,
        tags: view_tags(&card.tags),
    }
}

/// HTML output through mustache templates. Every piece of user text goes
/// through `{{...}}` and is escaped by the template engine; `{{{...}}}` is
/// reserved for fragments this serializer produced itself.
pub struct HtmlSerializer {
    site: Site,
    post: Template<'static>,
    body: Template<'static>,
    stream_card: Template<'static>,
    hero_card: Template<'static>,
    related_card: Template<'static>,
}

fn parse_template(name: &str, src: String) -> Result<Template<'static>, BuildError> {
    Template::new(src).map_err(|e| BuildError::Template {
        name: name.to_string(),
        reason: e.to_string(),
    })
}

/// Reads `name` from `template_dir` when it exists there, otherwise takes the
/// built-in template.
fn load_template(template_dir: Option<&Path>, (name, builtin): (&str, &str)) -> anyhow::Result<Template<'static>> {
    let src = match template_dir.map(|dir| dir.join(name)) {
        Some(path) if path.is_file() => {
            debug!("Using template {}", path.display());
            fs::read_to_string(&path)?
        }
        _ => builtin.to_string(),
    };
    Ok(parse_template(name, src)?)
}

impl HtmlSerializer {
    pub fn load(site: Site, template_dir: Option<&Path>) -> anyhow::Result<HtmlSerializer> {
        Ok(HtmlSerializer {
            site,
            post: load_template(template_dir, POST_TPL)?,
            body: load_template(template_dir, BODY_TPL)?,
            stream_card: load_template(template_dir, STREAM_CARD_TPL)?,
            hero_card: load_template(template_dir, HERO_CARD_TPL)?,
            related_card: load_template(template_dir, RELATED_CARD_TPL)?,
        })
    }

    fn card_template(&self, kind: CardKind) -> &Template<'static> {
        match kind {
            CardKind::Stream => &self.stream_card,
            CardKind::Hero => &self.hero_card,
            CardKind::Related => &self.related_card,
        }
    }
}

impl FragmentSerializer for HtmlSerializer {
    fn blocks(&self, blocks: &[Block]) -> String {
        self.body.render(&BodyView {
            blocks: blocks.iter().map(block_view).collect(),
        })
    }

    fn cards(&self, kind: CardKind, cards: &[Card]) -> String {
        let template = self.card_template(kind);
        cards
            .iter()
            .map(|card| template.render(&card_view(card)))
            .map(|html| html.trim_end().to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn post_page(&self, page: &PostPage) -> String {
        let author_card = page.author.as_ref().map(|card| AuthorView {
            has_image: !card.image.is_empty(),
            image: &card.image,
            image_alt: &card.author.image_alt,
            name: &card.author.name,
            title: &card.author.title,
            bio: &card.author.bio,
        });

        self.post.render(&PostView {
            lang: &self.site.lang,
            site_name: &self.site.name,
            site_tagline: &self.site.tagline,
            title: page.title,
            category: page.category,
            date: page.date,
            time: page.time,
            author_name: page.author_name,
            has_image: !page.image.is_empty(),
            image: &page.image,
            image_alt: page.image_alt,
            body: self.blocks(&page.body).trim_end().to_string(),
            tags: view_tags(&page.tags),
            author_card,
            has_related: !page.related.is_empty(),
            related_cards: self.cards(CardKind::Related, &page.related),
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::content::Author;
    use crate::view::fragment::AuthorCard;

    use super::*;

    fn serializer() -> HtmlSerializer {
        HtmlSerializer::load(Site::default(), None).unwrap()
    }

    fn card(kind: CardKind, title: &str) -> Card {
        Card {
            kind,
            link: "posts/nuevo-chip.html".to_string(),
            image: "assets/img/chip.jpg".to_string(),
            image_alt: "Chip <M4>".to_string(),
            title: title.to_string(),
            date: "2024-03-05".to_string(),
            author: "Ana Torres".to_string(),
            category: "Hardware".to_string(),
            summary: "Doble de rendimiento & menos consumo".to_string(),
            tags: vec!["hardware".to_string(), "apple".to_string()],
        }
    }

    fn page<'a>(author: Option<AuthorCard<'a>>, related: Vec<Card>) -> PostPage<'a> {
        PostPage {
            title: "Nuevo <chip>",
            category: "Hardware",
            date: "2024-03-05",
            time: "09:41",
            author_name: "Ana Torres",
            image: "../assets/img/chip.jpg".to_string(),
            image_alt: "Featured image of Nuevo <chip>",
            body: vec![Block::Paragraph("Texto".to_string())],
            tags: vec!["hardware".to_string()],
            author,
            related,
        }
    }

    #[test]
    fn test_blocks_are_escaped() {
        let html = serializer().blocks(&[
            Block::Heading { level: 2, text: "A & B".to_string() },
            Block::Paragraph("<script>alert(1)</script>".to_string()),
            Block::List(vec!["uno".to_string(), "<b>dos</b>".to_string()]),
        ]);

        assert!(html.contains("<h2>A &amp; B</h2>"));
        assert!(html.contains("<p>&lt;script&gt;alert(1)&lt;/script&gt;</p>"));
        assert!(html.contains("<ul>"));
        assert!(html.contains("<li>uno</li>"));
        assert!(html.contains("<li>&lt;b&gt;dos&lt;/b&gt;</li>"));
        assert!(!html.contains("<script>"));

        let heading = html.find("<h2>").unwrap();
        let paragraph = html.find("<p>").unwrap();
        let list = html.find("<ul>").unwrap();
        assert!(heading < paragraph && paragraph < list);
    }

    #[test]
    fn test_cards() {
        let html = serializer().cards(CardKind::Stream, &[card(CardKind::Stream, "Uno"), card(CardKind::Stream, "Dos")]);
        assert_eq!(html.matches("<article class=\"post post--compact\">").count(), 2);
        assert!(html.contains("href=\"posts/nuevo-chip.html\""));
        assert!(html.contains("src=\"assets/img/chip.jpg\""));
        assert!(html.contains("Chip &lt;M4&gt;"));
        assert!(html.contains("<span>#hardware</span>"));
        assert!(html.contains("Doble de rendimiento &amp; menos consumo"));
        assert!(html.find("Uno").unwrap() < html.find("Dos").unwrap());

        let html = serializer().cards(CardKind::Hero, &[card(CardKind::Hero, "Uno")]);
        assert!(html.contains("hero__card"));
        assert!(!html.contains("#hardware"));

        assert_eq!(serializer().cards(CardKind::Stream, &[]), "");
    }

    #[test]
    fn test_post_page_without_optional_blocks() {
        let html = serializer().post_page(&page(None, vec![]));
        assert!(html.contains("<h1>Nuevo &lt;chip&gt;</h1>"));
        assert!(html.contains("<p>Texto</p>"));
        assert!(html.contains("<span>#hardware</span>"));
        assert!(html.contains("src=\"../assets/img/chip.jpg\""));
        assert!(!html.contains("author-card"));
        assert!(!html.contains("class=\"related\""));
    }

    #[test]
    fn test_post_page_with_author_and_related() {
        let author = Author {
            key: "ana".to_string(),
            name: "Ana Torres".to_string(),
            title: "Editora".to_string(),
            bio: "Chips & silicio".to_string(),
            image: "authors/ana.jpg".to_string(),
            image_alt: "Portrait of Ana Torres".to_string(),
        };
        let author_card = AuthorCard {
            author: &author,
            image: "../assets/img/authors/ana.jpg".to_string(),
        };
        let html = serializer().post_page(&page(Some(author_card), vec![card(CardKind::Related, "Relacionado")]));

        assert!(html.contains("<section class=\"author-card\">"));
        assert!(html.contains("src=\"../assets/img/authors/ana.jpg\""));
        assert!(html.contains("<p class=\"author-card__bio\">Chips &amp; silicio</p>"));
        assert!(html.contains("<section class=\"related\">"));
        assert!(html.contains("Relacionado"));
    }

    #[test]
    fn test_template_dir_override() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("hero_card.tpl"), "HERO {{title}}").unwrap();

        let serializer = HtmlSerializer::load(Site::default(), Some(dir.path())).unwrap();
        assert_eq!(serializer.cards(CardKind::Hero, &[card(CardKind::Hero, "A<B")]), "HERO A&lt;B");
        assert!(serializer.cards(CardKind::Stream, &[card(CardKind::Stream, "X")]).contains("post--compact"));
    }
}
