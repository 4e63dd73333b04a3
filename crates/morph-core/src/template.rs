//! Template identifiers: the closed set of shapes the field can morph into.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[repr(u8)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Template {
    /// Fallback for anything unrecognised.
    #[default]
    Sphere    = 0,
    Heart     = 1,
    Flower    = 2,
    Saturn    = 3,
    Spirit    = 4,
    Fireworks = 5,
}

impl Template {
    pub const ALL: [Template; 6] = [
        Template::Sphere,
        Template::Heart,
        Template::Flower,
        Template::Saturn,
        Template::Spirit,
        Template::Fireworks,
    ];

    /// User-selectable templates, in picker order.
    pub const PICKER: [Template; 5] = [
        Template::Heart,
        Template::Flower,
        Template::Saturn,
        Template::Spirit,
        Template::Fireworks,
    ];

    /// Resolve a numeric id. Anything outside the known range is `Sphere`.
    pub fn from_id(id: u32) -> Template {
        match id {
            1 => Template::Heart,
            2 => Template::Flower,
            3 => Template::Saturn,
            4 => Template::Spirit,
            5 => Template::Fireworks,
            _ => Template::Sphere,
        }
    }

    /// Whether `id` names a template rather than falling back.
    pub fn is_known_id(id: u32) -> bool {
        id < Self::ALL.len() as u32
    }

    pub fn id(self) -> u32 {
        self as u32
    }

    /// Canonical lowercase name, accepted by `FromStr`.
    pub fn name(self) -> &'static str {
        match self {
            Template::Sphere => "sphere",
            Template::Heart => "heart",
            Template::Flower => "flower",
            Template::Saturn => "saturn",
            Template::Spirit => "spirit",
            Template::Fireworks => "fireworks",
        }
    }

    /// Display label for pickers.
    pub fn label(self) -> &'static str {
        match self {
            Template::Sphere => "Sphere",
            Template::Heart => "Heart",
            Template::Flower => "Flower",
            Template::Saturn => "Saturn",
            Template::Spirit => "Spirit",
            Template::Fireworks => "Fireworks",
        }
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown template: {0:?}")]
pub struct ParseTemplateError(pub String);

impl FromStr for Template {
    type Err = ParseTemplateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        match name.as_str() {
            "sphere" => Ok(Template::Sphere),
            "heart" => Ok(Template::Heart),
            "flower" => Ok(Template::Flower),
            "saturn" => Ok(Template::Saturn),
            // "buddha" is the legacy id for the seated figure.
            "spirit" | "buddha" => Ok(Template::Spirit),
            "fireworks" => Ok(Template::Fireworks),
            _ => Err(ParseTemplateError(s.to_string())),
        }
    }
}
