//! TUI rendering layer for the Pokédex viewer.
//!
//! Paints [`pokedex_core::view::ViewNode`] trees with [`ratatui`]: the card
//! widget, the screen layout and the shell chrome around it. This crate owns
//! the visual presentation while [`pokedex_core`] owns the data.

pub mod card;
pub mod layout;
pub mod shell;
