//! Core types for the Pokédex card viewer.
//!
//! This crate owns the Pokémon record shape, its JSON boundary, the pure
//! display component that turns a record into a view tree, and the logging
//! subsystem shared by the application. It has no terminal dependencies.

pub mod logging;
pub mod pokemon;
pub mod state;
pub mod text;
pub mod view;

pub use pokemon::{load_records, Pokemon, TypeEntry, TypeRef};
pub use view::{
    render_pokemon, render_pokemon_with, Capitalization, KeyPolicy, ListItem, RenderOptions,
    TextNode, TextTransform, ViewNode,
};
