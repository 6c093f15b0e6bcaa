//! What a page is made of, independent of how it is marked up.
//!
//! Renderers build these nodes with raw, unescaped text; a
//! [`FragmentSerializer`] turns them into markup and owns all escaping.

use crate::content::Author;

#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Heading { level: u8, text: String },
    Paragraph(String),
    List(Vec<String>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardKind {
    /// Compact homepage card.
    Stream,
    /// The single featured card at the top of the homepage.
    Hero,
    /// Card in the related articles section of a post page.
    Related,
}

/// A post summarized for a listing. Paths are already relative to the
/// document the card ends up in.
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    pub kind: CardKind,
    pub link: String,
    pub image: String,
    pub image_alt: String,
    pub title: String,
    pub date: String,
    pub author: String,
    pub category: String,
    pub summary: String,
    pub tags: Vec<String>,
}

/// Everything a full post page shows.
#[derive(Debug, Clone, PartialEq)]
pub struct PostPage<'a> {
    pub title: &'a str,
    pub category: &'a str,
    pub date: &'a str,
    pub time: &'a str,
    pub author_name: &'a str,
    pub image: String,
    pub image_alt: &'a str,
    pub body: Vec<Block>,
    pub tags: Vec<String>,
    /// Profile block, only when the author key resolved.
    pub author: Option<AuthorCard<'a>>,
    /// Related section, omitted when empty.
    pub related: Vec<Card>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AuthorCard<'a> {
    pub author: &'a Author,
    pub image: String,
}

pub trait FragmentSerializer {
    fn blocks(&self, blocks: &[Block]) -> String;

    /// Serializes a run of cards of the same kind.
    fn cards(&self, kind: CardKind, cards: &[Card]) -> String;

    fn post_page(&self, page: &PostPage) -> String;
}
