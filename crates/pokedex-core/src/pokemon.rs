use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

/// A Pokémon record as produced by the data layer.
///
/// Field names follow the PokeAPI payload, so a raw `/pokemon/{id}` response
/// deserializes directly. Fields the display does not need are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pokemon {
    pub id: u32,
    pub name: String,
    pub height: u32,
    /// Sort order; PokeAPI reports `-1` for some alternate forms.
    pub order: i64,
    pub weight: u32,
    pub types: Vec<TypeEntry>,
}

/// One element of [`Pokemon::types`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeEntry {
    #[serde(rename = "type")]
    pub kind: TypeRef,
}

/// The named elemental type inside a [`TypeEntry`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeRef {
    pub name: String,
}

impl TypeEntry {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            kind: TypeRef { name: name.into() },
        }
    }

    pub fn name(&self) -> &str {
        &self.kind.name
    }
}

/// A file holds either one record or a list of them.
#[derive(Deserialize)]
#[serde(untagged)]
enum RecordFile {
    Many(Vec<serde_json::Value>),
    One(serde_json::Value),
}

impl Pokemon {
    /// Parse and validate a single record from JSON.
    pub fn from_json_str(input: &str) -> Result<Self> {
        let pokemon: Self =
            serde_json::from_str(input).context("failed to parse pokemon record JSON")?;
        pokemon.validate()?;
        Ok(pokemon)
    }

    /// Validate the constraints the display relies on.
    ///
    /// Only the name is checked; empty type names are tolerated and render as
    /// empty text.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            bail!("pokemon #{} has an empty name", self.id);
        }
        Ok(())
    }

    /// Type names that appear more than once, in first-seen order.
    pub fn duplicate_type_names(&self) -> Vec<&str> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        let mut order = Vec::new();
        for entry in &self.types {
            let count = counts.entry(entry.name()).or_insert(0);
            *count += 1;
            if *count == 2 {
                order.push(entry.name());
            }
        }
        order
    }
}

/// Load every record from a JSON file.
///
/// The file may contain a single record object or an array of records. Each
/// record is validated; the error names the offending array index.
pub fn load_records(path: &Path) -> Result<Vec<Pokemon>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read pokemon data at {}", path.display()))?;

    parse_records(&raw).with_context(|| format!("invalid pokemon data at {}", path.display()))
}

fn parse_records(raw: &str) -> Result<Vec<Pokemon>> {
    let file: RecordFile = serde_json::from_str(raw).context("failed to parse pokemon JSON")?;

    match file {
        RecordFile::One(value) => Ok(vec![record_from_value(value)?]),
        RecordFile::Many(values) => values
            .into_iter()
            .enumerate()
            .map(|(idx, value)| {
                record_from_value(value).with_context(|| format!("record at index {idx}"))
            })
            .collect(),
    }
}

fn record_from_value(value: serde_json::Value) -> Result<Pokemon> {
    let pokemon: Pokemon =
        serde_json::from_value(value).context("failed to parse pokemon record JSON")?;
    pokemon.validate()?;
    Ok(pokemon)
}
