//! Event categories and their default colors.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::types::ValidationError;

/// Household event categories. Only used to pick a default color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Category {
    Birthday,
    Holiday,
    Appointment,
    School,
    Chore,
    Meal,
    Travel,
    #[default]
    Custom,
}

impl Category {
    pub const ALL: [Self; 8] = [
        Self::Birthday,
        Self::Holiday,
        Self::Appointment,
        Self::School,
        Self::Chore,
        Self::Meal,
        Self::Travel,
        Self::Custom,
    ];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Birthday => "birthday",
            Self::Holiday => "holiday",
            Self::Appointment => "appointment",
            Self::School => "school",
            Self::Chore => "chore",
            Self::Meal => "meal",
            Self::Travel => "travel",
            Self::Custom => "custom",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Category {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| ValidationError::UnknownCategory {
                value: s.to_string(),
            })
    }
}

impl Serialize for Category {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// An sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses `#rrggbb` (the leading `#` is optional).
    pub fn from_hex(value: &str) -> Result<Self, ValidationError> {
        let invalid = || ValidationError::InvalidColor {
            value: value.to_string(),
        };
        let hex = value.strip_prefix('#').unwrap_or(value);
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
        Ok(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Color {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl Serialize for Color {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Fallback for categories without a dedicated color.
pub const DEFAULT_COLOR: Color = Color::rgb(0x64, 0x74, 0x8b);

/// Default color for a category.
pub const fn color_for(category: Category) -> Color {
    match category {
        Category::Birthday => Color::rgb(0xec, 0x48, 0x99),
        Category::Holiday => Color::rgb(0x22, 0xc5, 0x5e),
        Category::Appointment => Color::rgb(0x3b, 0x82, 0xf6),
        Category::School => Color::rgb(0xf5, 0x9e, 0x0b),
        Category::Chore => Color::rgb(0x8b, 0x5c, 0xf6),
        Category::Meal => Color::rgb(0xef, 0x44, 0x44),
        Category::Travel => Color::rgb(0x06, 0xb6, 0xd4),
        Category::Custom => DEFAULT_COLOR,
    }
}
