//! Block structure of a post body.
//!
//! Only three constructs exist: `#`..`###` headings, flat `- ` lists and
//! paragraphs. Text is kept raw here; escaping is the serializer's job.

use std::mem;

use lazy_static::lazy_static;
use regex::Regex;

use crate::view::fragment::Block;

enum State<'a> {
    Neutral,
    Paragraph(Vec<&'a str>),
    List(Vec<String>),
}

struct BodyRenderer<'a> {
    state: State<'a>,
    blocks: Vec<Block>,
}

impl<'a> BodyRenderer<'a> {
    fn close(&mut self) {
        match mem::replace(&mut self.state, State::Neutral) {
            State::Neutral => {}
            State::Paragraph(lines) => self.blocks.push(Block::Paragraph(lines.join(" "))),
            State::List(items) => self.blocks.push(Block::List(items)),
        }
    }

    fn list_item(&mut self, item: &str) {
        if !matches!(self.state, State::List(_)) {
            self.close();
            self.state = State::List(vec![]);
        }
        if let State::List(ref mut items) = self.state {
            items.push(item.to_string());
        }
    }

    fn paragraph_line(&mut self, line: &'a str) {
        if !matches!(self.state, State::Paragraph(_)) {
            self.close();
            self.state = State::Paragraph(vec![]);
        }
        if let State::Paragraph(ref mut lines) = self.state {
            lines.push(line);
        }
    }

    fn line(&mut self, line: &'a str) {
        let line = line.trim();

        if line.is_empty() {
            self.close();
            return;
        }

        if let Some((level, text)) = extract_heading(line) {
            self.close();
            self.blocks.push(Block::Heading {
                level,
                text: text.to_string(),
            });
            return;
        }

        if let Some(item) = line.strip_prefix("- ") {
            self.list_item(item.trim());
            return;
        }

        self.paragraph_line(line);
    }
}

fn extract_heading(line: &str) -> Option<(u8, &str)> {
    lazy_static! {
        static ref HEADING_REGEX: Regex = Regex::new(r"^(?P<marks>#{1,3})\s+(?P<text>.*)$").unwrap();
    }

    HEADING_REGEX.captures(line).and_then(|cap| {
        let marks = cap.name("marks")?;
        let text = cap.name("text")?;
        Some((marks.as_str().len() as u8, text.as_str()))
    })
}

/// Splits a body into headings, lists and paragraphs.
///
/// Lines of a paragraph are joined with single spaces. A paragraph line right
/// after a list item ends the list, and a list item right after paragraph text
/// ends the paragraph.
pub fn render_body(text: &str) -> Vec<Block> {
    let mut renderer = BodyRenderer {
        state: State::Neutral,
        blocks: vec![],
    };

    for line in text.lines() {
        renderer.line(line);
    }
    renderer.close();

    renderer.blocks
}
