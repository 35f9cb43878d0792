use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Padding, Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

use pokedex_core::view::ViewNode;

/// Marker drawn before each list item.
const BULLET: &str = "• ";

/// Border columns plus one column of padding on each side.
const CHROME_WIDTH: u16 = 4;

/// Border rows.
const CHROME_HEIGHT: u16 = 2;

/// Bordered card that paints a Pokémon view tree.
///
/// The card is sized to its widest line and centred horizontally in the
/// target area. The border title is the record's identifier (`#25`) unless
/// overridden. The first paragraph (the name) is drawn bold; list items get
/// a bullet.
pub struct PokemonCard<'a> {
    view: &'a ViewNode,
    title: Option<&'a str>,
}

impl<'a> PokemonCard<'a> {
    pub fn new(view: &'a ViewNode) -> Self {
        Self { view, title: None }
    }

    pub fn title(mut self, title: &'a str) -> Self {
        self.title = Some(title);
        self
    }
}

impl Widget for PokemonCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let lines = card_lines(self.view);
        let rect = card_rect(area, &lines);

        let title = match self.title {
            Some(title) => title.to_string(),
            None => self
                .view
                .identifier()
                .map(|id| id.display_text().into_owned())
                .unwrap_or_default(),
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .title(title)
            .padding(Padding::horizontal(1));

        Paragraph::new(lines).block(block).render(rect, buf);
    }
}

/// Flatten a view tree into styled lines.
fn card_lines(view: &ViewNode) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    push_lines(view, &mut lines);
    lines
}

fn push_lines(node: &ViewNode, out: &mut Vec<Line<'static>>) {
    match node {
        ViewNode::Block(children) => {
            for child in children {
                push_lines(child, out);
            }
        }
        ViewNode::Paragraph(text) => {
            let text = text.display_text().into_owned();
            if out.is_empty() {
                out.push(Line::styled(
                    text,
                    Style::default().add_modifier(Modifier::BOLD),
                ));
            } else {
                out.push(Line::from(text));
            }
        }
        ViewNode::List(items) => {
            out.extend(
                items
                    .iter()
                    .map(|item| Line::from(format!("{BULLET}{}", item.content.display_text()))),
            );
        }
    }
}

/// Size the card to its content, clamp to `area`, centre horizontally.
fn card_rect(area: Rect, lines: &[Line<'_>]) -> Rect {
    let content_width = lines
        .iter()
        .map(|line| line.spans.iter().map(|span| span.content.width()).sum::<usize>())
        .max()
        .unwrap_or(0);

    let width = u16::try_from(content_width)
        .unwrap_or(u16::MAX)
        .saturating_add(CHROME_WIDTH)
        .min(area.width);
    let height = (lines.len() as u16)
        .saturating_add(CHROME_HEIGHT)
        .min(area.height);

    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y,
        width,
        height,
    }
}
