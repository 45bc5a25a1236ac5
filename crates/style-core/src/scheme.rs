//! Style kinds and color schemes
//!
//! The two closed axes a built-in bundle is resolved from. Both serialize to
//! stable camelCase identifiers used for persistence.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// =============================================================================
// Style Kind
// =============================================================================

/// Family of visual treatment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum StyleKind {
    /// Flat surfaces, no shadow
    #[default]
    Minimal,
    /// Translucent, blurred surfaces
    LiquidGlass,
    /// Tactile, embossed surfaces
    Skeuomorphic,
}

impl StyleKind {
    /// Every built-in kind in declaration order
    pub const ALL: [StyleKind; 3] = [StyleKind::Minimal, StyleKind::LiquidGlass, StyleKind::Skeuomorphic];

    /// Stable identifier used for persistence
    pub fn id(&self) -> &'static str {
        match self {
            StyleKind::Minimal => "minimal",
            StyleKind::LiquidGlass => "liquidGlass",
            StyleKind::Skeuomorphic => "skeuomorphic",
        }
    }

    /// Human readable name
    pub fn display_name(&self) -> &'static str {
        match self {
            StyleKind::Minimal => "Minimal",
            StyleKind::LiquidGlass => "Liquid Glass",
            StyleKind::Skeuomorphic => "Skeuomorphic",
        }
    }
}

impl fmt::Display for StyleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for StyleKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StyleKind::ALL
            .into_iter()
            .find(|kind| kind.id().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown style kind: {}", s))
    }
}

// =============================================================================
// Duotone Pairs
// =============================================================================

/// Light or dark half of a duotone pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    /// Paper background, ink foreground
    Light,
    /// Ink background, paper foreground
    Dark,
}

/// Named two-color moods, each offered in a light and a dark variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Duotone {
    /// Blue-grey slate
    StormyMorning,
    /// Warm peach and cocoa
    PeachSkyline,
    /// Seafoam and deep teal
    MintLagoon,
    /// Parchment and charred olive
    EmberForest,
    /// Pale lilac and twilight violet
    LavenderDusk,
    /// Cream and burnt umber
    GoldenHour,
}

impl Duotone {
    /// Every duotone pair in declaration order
    pub const ALL: [Duotone; 6] = [
        Duotone::StormyMorning,
        Duotone::PeachSkyline,
        Duotone::MintLagoon,
        Duotone::EmberForest,
        Duotone::LavenderDusk,
        Duotone::GoldenHour,
    ];

    /// The scheme for one tone of this pair
    pub fn scheme(&self, tone: Tone) -> ColorScheme {
        use ColorScheme::*;
        match (self, tone) {
            (Duotone::StormyMorning, Tone::Light) => StormyMorningLight,
            (Duotone::StormyMorning, Tone::Dark) => StormyMorningDark,
            (Duotone::PeachSkyline, Tone::Light) => PeachSkylineLight,
            (Duotone::PeachSkyline, Tone::Dark) => PeachSkylineDark,
            (Duotone::MintLagoon, Tone::Light) => MintLagoonLight,
            (Duotone::MintLagoon, Tone::Dark) => MintLagoonDark,
            (Duotone::EmberForest, Tone::Light) => EmberForestLight,
            (Duotone::EmberForest, Tone::Dark) => EmberForestDark,
            (Duotone::LavenderDusk, Tone::Light) => LavenderDuskLight,
            (Duotone::LavenderDusk, Tone::Dark) => LavenderDuskDark,
            (Duotone::GoldenHour, Tone::Light) => GoldenHourLight,
            (Duotone::GoldenHour, Tone::Dark) => GoldenHourDark,
        }
    }
}

// =============================================================================
// Color Scheme
// =============================================================================

/// Named visual mood / light-dark pairing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum ColorScheme {
    /// Standard light appearance
    #[default]
    Light,
    /// Standard dark appearance
    Dark,
    /// Saturated, high-energy palette
    Vibrant,
    /// Maximum legibility
    HighContrast,
    /// Stormy morning on paper
    StormyMorningLight,
    /// Stormy morning on ink
    StormyMorningDark,
    /// Peach skyline on paper
    PeachSkylineLight,
    /// Peach skyline on ink
    PeachSkylineDark,
    /// Mint lagoon on paper
    MintLagoonLight,
    /// Mint lagoon on ink
    MintLagoonDark,
    /// Ember forest on paper
    EmberForestLight,
    /// Ember forest on ink
    EmberForestDark,
    /// Lavender dusk on paper
    LavenderDuskLight,
    /// Lavender dusk on ink
    LavenderDuskDark,
    /// Golden hour on paper
    GoldenHourLight,
    /// Golden hour on ink
    GoldenHourDark,
}

impl ColorScheme {
    /// Every scheme in declaration order
    pub const ALL: [ColorScheme; 16] = [
        ColorScheme::Light,
        ColorScheme::Dark,
        ColorScheme::Vibrant,
        ColorScheme::HighContrast,
        ColorScheme::StormyMorningLight,
        ColorScheme::StormyMorningDark,
        ColorScheme::PeachSkylineLight,
        ColorScheme::PeachSkylineDark,
        ColorScheme::MintLagoonLight,
        ColorScheme::MintLagoonDark,
        ColorScheme::EmberForestLight,
        ColorScheme::EmberForestDark,
        ColorScheme::LavenderDuskLight,
        ColorScheme::LavenderDuskDark,
        ColorScheme::GoldenHourLight,
        ColorScheme::GoldenHourDark,
    ];

    /// Stable identifier used for persistence
    pub fn id(&self) -> &'static str {
        match self {
            ColorScheme::Light => "light",
            ColorScheme::Dark => "dark",
            ColorScheme::Vibrant => "vibrant",
            ColorScheme::HighContrast => "highContrast",
            ColorScheme::StormyMorningLight => "stormyMorningLight",
            ColorScheme::StormyMorningDark => "stormyMorningDark",
            ColorScheme::PeachSkylineLight => "peachSkylineLight",
            ColorScheme::PeachSkylineDark => "peachSkylineDark",
            ColorScheme::MintLagoonLight => "mintLagoonLight",
            ColorScheme::MintLagoonDark => "mintLagoonDark",
            ColorScheme::EmberForestLight => "emberForestLight",
            ColorScheme::EmberForestDark => "emberForestDark",
            ColorScheme::LavenderDuskLight => "lavenderDuskLight",
            ColorScheme::LavenderDuskDark => "lavenderDuskDark",
            ColorScheme::GoldenHourLight => "goldenHourLight",
            ColorScheme::GoldenHourDark => "goldenHourDark",
        }
    }

    /// Human readable name
    pub fn display_name(&self) -> &'static str {
        match self {
            ColorScheme::Light => "Light",
            ColorScheme::Dark => "Dark",
            ColorScheme::Vibrant => "Vibrant",
            ColorScheme::HighContrast => "High Contrast",
            ColorScheme::StormyMorningLight => "Stormy Morning Light",
            ColorScheme::StormyMorningDark => "Stormy Morning Dark",
            ColorScheme::PeachSkylineLight => "Peach Skyline Light",
            ColorScheme::PeachSkylineDark => "Peach Skyline Dark",
            ColorScheme::MintLagoonLight => "Mint Lagoon Light",
            ColorScheme::MintLagoonDark => "Mint Lagoon Dark",
            ColorScheme::EmberForestLight => "Ember Forest Light",
            ColorScheme::EmberForestDark => "Ember Forest Dark",
            ColorScheme::LavenderDuskLight => "Lavender Dusk Light",
            ColorScheme::LavenderDuskDark => "Lavender Dusk Dark",
            ColorScheme::GoldenHourLight => "Golden Hour Light",
            ColorScheme::GoldenHourDark => "Golden Hour Dark",
        }
    }

    /// The duotone pair and tone this scheme belongs to, if any
    pub fn duotone(&self) -> Option<(Duotone, Tone)> {
        use ColorScheme::*;
        let pair = match self {
            Light | Dark | Vibrant | HighContrast => return None,
            StormyMorningLight | StormyMorningDark => Duotone::StormyMorning,
            PeachSkylineLight | PeachSkylineDark => Duotone::PeachSkyline,
            MintLagoonLight | MintLagoonDark => Duotone::MintLagoon,
            EmberForestLight | EmberForestDark => Duotone::EmberForest,
            LavenderDuskLight | LavenderDuskDark => Duotone::LavenderDusk,
            GoldenHourLight | GoldenHourDark => Duotone::GoldenHour,
        };
        let tone = if pair.scheme(Tone::Light) == *self { Tone::Light } else { Tone::Dark };
        Some((pair, tone))
    }

    /// The other half of a light/dark pairing
    ///
    /// `Light` and `Dark` pair with each other; `Vibrant` and `HighContrast`
    /// have no counterpart.
    pub fn counterpart(&self) -> Option<ColorScheme> {
        match self {
            ColorScheme::Light => Some(ColorScheme::Dark),
            ColorScheme::Dark => Some(ColorScheme::Light),
            ColorScheme::Vibrant | ColorScheme::HighContrast => None,
            _ => self.duotone().map(|(pair, tone)| match tone {
                Tone::Light => pair.scheme(Tone::Dark),
                Tone::Dark => pair.scheme(Tone::Light),
            }),
        }
    }

    /// Whether surfaces are dark in this scheme
    pub fn is_dark(&self) -> bool {
        match self {
            ColorScheme::Dark | ColorScheme::HighContrast => true,
            ColorScheme::Light | ColorScheme::Vibrant => false,
            _ => matches!(self.duotone(), Some((_, Tone::Dark))),
        }
    }
}

impl fmt::Display for ColorScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for ColorScheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ColorScheme::ALL
            .into_iter()
            .find(|scheme| scheme.id().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown color scheme: {}", s))
    }
}
