use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Text},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::layout::PokedexRects;

/// Everything the chrome around the card needs for one frame.
pub struct ShellView<'a> {
    /// `"<n>/<count>"` of the record on screen.
    pub position: &'a str,
    pub status_line: &'a str,
    pub footer_lines: Vec<String>,
}

/// Key hints shown on the first footer line.
pub const KEY_HINTS: &str = "Tab/→: next  Shift-Tab/←: prev  q: quit";

/// Draw the top bar and footer, delegating the card area to `card`.
pub fn render_shell(
    f: &mut Frame,
    rects: PokedexRects,
    view: ShellView<'_>,
    card: impl FnOnce(&mut Frame, Rect),
) {
    let top = Paragraph::new(Line::from(format!(
        "POKEDEX | {} | {}",
        view.position, view.status_line
    )))
    .style(Style::default().fg(Color::Black).bg(Color::Yellow));
    f.render_widget(top, rects.top);

    card(f, rects.card);

    let mut lines = vec![Line::styled(KEY_HINTS, Style::default().fg(Color::DarkGray))];
    lines.extend(view.footer_lines.into_iter().map(Line::from));
    let footer = Paragraph::new(Text::from(lines))
        .block(Block::default().borders(Borders::ALL).title("LOG"));
    f.render_widget(footer, rects.footer);
}
