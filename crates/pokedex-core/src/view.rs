//! The Pokémon display component.
//!
//! [`render_pokemon`] is a pure function from a [`Pokemon`] record to a
//! [`ViewNode`] tree. Host renderers (the ratatui card in `pokedex-ui`, or the
//! plain-text printer in the app) walk the tree; nothing here knows about
//! terminals.

use std::borrow::Cow;
use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::pokemon::Pokemon;
use crate::text::{capitalize_first, capitalize_words};

/// Label introducing the types list.
pub const TYPES_LABEL: &str = "Types:";

/// How capitalized text nodes are display-cased.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Capitalization {
    /// First letter of every word (`"mr-mime"` → `"Mr-Mime"`).
    #[default]
    Words,
    /// First letter of the string only (`"mr-mime"` → `"Mr-mime"`).
    First,
}

/// Identity keys for type list items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum KeyPolicy {
    /// Key is the type name verbatim; duplicate names produce duplicate keys.
    Name,
    /// Key is the type name, with later duplicates suffixed by `#<position>`.
    #[default]
    Disambiguate,
}

/// Knobs for [`render_pokemon_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderOptions {
    pub capitalization: Capitalization,
    pub type_keys: KeyPolicy,
}

/// Presentation transform attached to a text node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextTransform {
    None,
    Capitalize(Capitalization),
}

/// A run of text plus the transform applied when it is displayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextNode {
    /// The stored value, never modified by rendering.
    pub text: String,
    pub transform: TextTransform,
}

impl TextNode {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            transform: TextTransform::None,
        }
    }

    pub fn capitalized(text: impl Into<String>, style: Capitalization) -> Self {
        Self {
            text: text.into(),
            transform: TextTransform::Capitalize(style),
        }
    }

    /// The text as it should appear on screen.
    pub fn display_text(&self) -> Cow<'_, str> {
        match self.transform {
            TextTransform::None => Cow::Borrowed(&self.text),
            TextTransform::Capitalize(Capitalization::Words) => {
                Cow::Owned(capitalize_words(&self.text))
            }
            TextTransform::Capitalize(Capitalization::First) => {
                Cow::Owned(capitalize_first(&self.text))
            }
        }
    }
}

/// One keyed entry of a [`ViewNode::List`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItem {
    pub key: String,
    pub content: TextNode,
}

/// A node of the display tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewNode {
    /// Vertical container.
    Block(Vec<ViewNode>),
    Paragraph(TextNode),
    /// Ordered list, rendered top to bottom.
    List(Vec<ListItem>),
}

impl ViewNode {
    /// Flatten the tree into display lines in tree order.
    ///
    /// List items are prefixed with `"- "`.
    pub fn display_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        self.collect_lines(&mut lines);
        lines
    }

    fn collect_lines(&self, out: &mut Vec<String>) {
        match self {
            ViewNode::Block(children) => {
                for child in children {
                    child.collect_lines(out);
                }
            }
            ViewNode::Paragraph(text) => out.push(text.display_text().into_owned()),
            ViewNode::List(items) => {
                out.extend(items.iter().map(|i| format!("- {}", i.content.display_text())));
            }
        }
    }

    /// Items of the first list in the tree, or an empty slice.
    pub fn list_items(&self) -> &[ListItem] {
        match self {
            ViewNode::List(items) => items,
            ViewNode::Block(children) => children
                .iter()
                .map(ViewNode::list_items)
                .find(|items| !items.is_empty())
                .unwrap_or(&[]),
            ViewNode::Paragraph(_) => &[],
        }
    }

    /// Paragraphs in tree order (lists are skipped).
    pub fn paragraphs(&self) -> Vec<&TextNode> {
        match self {
            ViewNode::Paragraph(text) => vec![text],
            ViewNode::Block(children) => children.iter().flat_map(ViewNode::paragraphs).collect(),
            ViewNode::List(_) => Vec::new(),
        }
    }

    /// The identifier paragraph (`#<id>`), second in a rendered card.
    pub fn identifier(&self) -> Option<&TextNode> {
        self.paragraphs().get(1).copied()
    }
}

/// Format an identifier as `#<id>` with no padding.
pub fn format_id(id: u32) -> String {
    format!("#{id}")
}

/// Render a record with the default [`RenderOptions`].
pub fn render_pokemon(pokemon: &Pokemon) -> ViewNode {
    render_pokemon_with(pokemon, &RenderOptions::default())
}

/// Render a record into a view tree.
///
/// The tree is a block holding, in order: the capitalized name, the `#id`
/// line, the [`TYPES_LABEL`], and a list with one item per type entry.
pub fn render_pokemon_with(pokemon: &Pokemon, opts: &RenderOptions) -> ViewNode {
    let names = pokemon.types.iter().map(|t| t.name());
    let keys = type_keys(names.clone(), opts.type_keys);

    let items = names
        .zip(keys)
        .map(|(name, key)| ListItem {
            key,
            content: TextNode::capitalized(name, opts.capitalization),
        })
        .collect();

    ViewNode::Block(vec![
        ViewNode::Paragraph(TextNode::capitalized(&pokemon.name, opts.capitalization)),
        ViewNode::Paragraph(TextNode::plain(format_id(pokemon.id))),
        ViewNode::Paragraph(TextNode::plain(TYPES_LABEL)),
        ViewNode::List(items),
    ])
}

fn type_keys<'a>(names: impl Iterator<Item = &'a str>, policy: KeyPolicy) -> Vec<String> {
    match policy {
        KeyPolicy::Name => names.map(str::to_string).collect(),
        KeyPolicy::Disambiguate => {
            let names: Vec<&str> = names.collect();
            // Reserve every verbatim name up front so a suffixed key can never
            // shadow a later real name.
            let mut used: HashSet<String> = names.iter().map(|n| n.to_string()).collect();
            let mut seen: HashSet<&str> = HashSet::new();
            names
                .iter()
                .enumerate()
                .map(|(pos, &name)| {
                    if seen.insert(name) {
                        return name.to_string();
                    }
                    let mut key = format!("{name}#{pos}");
                    let mut bump = 1;
                    while !used.insert(key.clone()) {
                        key = format!("{name}#{pos}.{bump}");
                        bump += 1;
                    }
                    key
                })
                .collect()
        }
    }
}
