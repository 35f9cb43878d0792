//! Configuration types and loaders for the Pokédex viewer.
//!
//! This crate owns the on-disk configuration schema so the app and renderers
//! share a single source of truth.

pub mod settings;

pub use settings::{config_path, DisplayConfig, PokedexConfig, UiConfig};
