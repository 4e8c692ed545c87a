//! The closed set of known creature type tags and their display attributes.

use ratatui::style::Color;
use serde::{Deserialize, Serialize};

/// One of the 18 known type tags. Tag names outside this set can appear on
/// the wire; lookups for those degrade to empty/transparent instead of
/// panicking (see [`glyph_for`] and [`color_for`]).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PokeType {
    Normal,
    Fire,
    Water,
    Electric,
    Grass,
    Ice,
    Fighting,
    Poison,
    Ground,
    Flying,
    Psychic,
    Bug,
    Rock,
    Ghost,
    Dragon,
    Dark,
    Steel,
    Fairy,
}

impl PokeType {
    pub const ALL: [PokeType; 18] = [
        PokeType::Normal,
        PokeType::Fire,
        PokeType::Water,
        PokeType::Electric,
        PokeType::Grass,
        PokeType::Ice,
        PokeType::Fighting,
        PokeType::Poison,
        PokeType::Ground,
        PokeType::Flying,
        PokeType::Psychic,
        PokeType::Bug,
        PokeType::Rock,
        PokeType::Ghost,
        PokeType::Dragon,
        PokeType::Dark,
        PokeType::Steel,
        PokeType::Fairy,
    ];

    pub fn parse(tag: &str) -> Option<PokeType> {
        PokeType::ALL.iter().copied().find(|t| t.name() == tag)
    }

    pub fn name(&self) -> &'static str {
        match self {
            PokeType::Normal => "normal",
            PokeType::Fire => "fire",
            PokeType::Water => "water",
            PokeType::Electric => "electric",
            PokeType::Grass => "grass",
            PokeType::Ice => "ice",
            PokeType::Fighting => "fighting",
            PokeType::Poison => "poison",
            PokeType::Ground => "ground",
            PokeType::Flying => "flying",
            PokeType::Psychic => "psychic",
            PokeType::Bug => "bug",
            PokeType::Rock => "rock",
            PokeType::Ghost => "ghost",
            PokeType::Dragon => "dragon",
            PokeType::Dark => "dark",
            PokeType::Steel => "steel",
            PokeType::Fairy => "fairy",
        }
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            PokeType::Normal => "\u{1f518}",
            PokeType::Fire => "\u{1f525}",
            PokeType::Water => "\u{1f4a7}",
            PokeType::Electric => "\u{26a1}",
            PokeType::Grass => "\u{1f33f}",
            PokeType::Ice => "\u{2744}\u{fe0f}",
            PokeType::Fighting => "\u{1f94a}",
            PokeType::Poison => "\u{2620}\u{fe0f}",
            PokeType::Ground => "\u{26f0}\u{fe0f}",
            PokeType::Flying => "\u{1f985}",
            PokeType::Psychic => "\u{1f52e}",
            PokeType::Bug => "\u{1f41b}",
            PokeType::Rock => "\u{1faa8}",
            PokeType::Ghost => "\u{1f47b}",
            PokeType::Dragon => "\u{1f409}",
            PokeType::Dark => "\u{26ab}",
            PokeType::Steel => "\u{1f529}",
            PokeType::Fairy => "\u{1f9da}",
        }
    }

    pub fn color(&self) -> Color {
        match self {
            PokeType::Normal => Color::Rgb(0xa8, 0xa8, 0x78),
            PokeType::Fire => Color::Rgb(0xf0, 0x80, 0x30),
            PokeType::Water => Color::Rgb(0x68, 0x90, 0xf0),
            PokeType::Electric => Color::Rgb(0xf8, 0xd0, 0x30),
            PokeType::Grass => Color::Rgb(0x78, 0xc8, 0x50),
            PokeType::Ice => Color::Rgb(0x98, 0xd8, 0xd8),
            PokeType::Fighting => Color::Rgb(0xc0, 0x30, 0x28),
            PokeType::Poison => Color::Rgb(0xa0, 0x40, 0xa0),
            PokeType::Ground => Color::Rgb(0xe0, 0xc0, 0x68),
            PokeType::Flying => Color::Rgb(0xa8, 0x90, 0xf0),
            PokeType::Psychic => Color::Rgb(0xf8, 0x58, 0x88),
            PokeType::Bug => Color::Rgb(0xa8, 0xb8, 0x20),
            PokeType::Rock => Color::Rgb(0xb8, 0xa0, 0x38),
            PokeType::Ghost => Color::Rgb(0x70, 0x58, 0x98),
            PokeType::Dragon => Color::Rgb(0x70, 0x38, 0xf8),
            PokeType::Dark => Color::Rgb(0x70, 0x58, 0x48),
            PokeType::Steel => Color::Rgb(0xb8, 0xb8, 0xd0),
            PokeType::Fairy => Color::Rgb(0xee, 0x99, 0xac),
        }
    }
}

/// Glyph for a raw wire tag; empty for tags outside the known set.
pub fn glyph_for(tag: &str) -> &'static str {
    PokeType::parse(tag).map(|t| t.glyph()).unwrap_or("")
}

/// Color for a raw wire tag; `None` (transparent) for unknown tags.
pub fn color_for(tag: &str) -> Option<Color> {
    PokeType::parse(tag).map(|t| t.color())
}
