use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Screen regions: a one-line top bar, the card area and a footer panel.
#[derive(Debug, Clone, Copy)]
pub struct PokedexRects {
    pub top: Rect,
    pub card: Rect,
    pub footer: Rect,
}

/// Split `area` into top bar, card and footer.
///
/// The footer is at least 3 rows (borders plus one line) and never takes the
/// row reserved for the top bar or the last row of the card.
pub fn pokedex_layout(area: Rect, footer_height: u16) -> PokedexRects {
    let footer_height = footer_height
        .max(3)
        .min(area.height.saturating_sub(2).max(3));
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),             // top bar
            Constraint::Min(1),                // card
            Constraint::Length(footer_height), // footer
        ])
        .split(area);

    PokedexRects {
        top: chunks[0],
        card: chunks[1],
        footer: chunks[2],
    }
}
