//! The built-in token table
//!
//! Built-in bundles are derived from two declarative tables instead of one
//! hand-written bundle per pair:
//!
//! - a palette per [`ColorScheme`] (colors only)
//! - a treatment per [`StyleKind`] (radius, shadow, translucency, font)
//!
//! Both lookups are exhaustive `match`es, so every (kind, scheme) pair
//! resolves. Duotone palettes are generated from a single [`DuotoneSpec`] per
//! pair, which keeps the light and dark halves complementary by construction.

use crate::bundle::{BadgeColors, TokenBundle};
use crate::color::Color;
use crate::scheme::{ColorScheme, Duotone, StyleKind, Tone};
use crate::tokens::{radius, FontDescriptor, FontDesign, FontWeight, Shadow};

/// Fixed hue for the `critical` log level
pub const CRITICAL: Color = Color::hex(0xAF52DE);

// =============================================================================
// Palettes
// =============================================================================

/// Colors for one scheme, before a style treatment is applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchemePalette {
    /// Surface color
    pub background: Color,
    /// Primary text color
    pub foreground: Color,
    /// Muted text color
    pub secondary: Color,
    /// Interactive tint
    pub accent: Color,
    /// Status colors
    pub semantic: Semantic,
    /// Badge hues for vlm, embedding, diffusion (llm follows the accent)
    pub badges: [Color; 3],
}

/// Error / warning / success / info colors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Semantic {
    /// Error color
    pub error: Color,
    /// Warning color
    pub warning: Color,
    /// Success color
    pub success: Color,
    /// Info color
    pub info: Color,
}

const LIGHT_SEMANTIC: Semantic = Semantic {
    error: Color::hex(0xFF3B30),
    warning: Color::hex(0xFF9500),
    success: Color::hex(0x34C759),
    info: Color::hex(0x5AC8FA),
};

const DARK_SEMANTIC: Semantic = Semantic {
    error: Color::hex(0xFF453A),
    warning: Color::hex(0xFF9F0A),
    success: Color::hex(0x30D158),
    info: Color::hex(0x64D2FF),
};

const LIGHT: SchemePalette = SchemePalette {
    background: Color::hex(0xFFFFFF),
    foreground: Color::hex(0x1C1C1E),
    secondary: Color::hex(0x8E8E93),
    accent: Color::hex(0x007AFF),
    semantic: LIGHT_SEMANTIC,
    badges: [Color::hex(0x5856D6), Color::hex(0x30B0C7), Color::hex(0xFF2D55)],
};

const DARK: SchemePalette = SchemePalette {
    background: Color::hex(0x1C1C1E),
    foreground: Color::hex(0xF2F2F7),
    secondary: Color::hex(0x98989D),
    accent: Color::hex(0x0A84FF),
    semantic: DARK_SEMANTIC,
    badges: [Color::hex(0x5E5CE6), Color::hex(0x40C8E0), Color::hex(0xFF375F)],
};

const VIBRANT: SchemePalette = SchemePalette {
    background: Color::hex(0xFFF5FB),
    foreground: Color::hex(0x1A1033),
    secondary: Color::hex(0x7A6A99),
    accent: Color::hex(0xFF2E93),
    semantic: Semantic {
        error: Color::hex(0xE5143C),
        warning: Color::hex(0xFF8A00),
        success: Color::hex(0x00B86B),
        info: Color::hex(0x00A3FF),
    },
    badges: [Color::hex(0x7B2FF7), Color::hex(0x00C2B8), Color::hex(0xFFB800)],
};

const HIGH_CONTRAST: SchemePalette = SchemePalette {
    background: Color::hex(0x000000),
    foreground: Color::hex(0xFFFFFF),
    secondary: Color::hex(0xC7C7CC),
    accent: Color::hex(0xFFD60A),
    semantic: Semantic {
        error: Color::hex(0xFF6961),
        warning: Color::hex(0xFFB340),
        success: Color::hex(0x30DB5B),
        info: Color::hex(0x70D7FF),
    },
    badges: [Color::hex(0xDA8FFF), Color::hex(0x66D4CF), Color::hex(0xFF6482)],
};

/// One duotone pair: two surface colors that swap roles between tones
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DuotoneSpec {
    /// Light background / dark foreground
    pub paper: Color,
    /// Dark background / light foreground
    pub ink: Color,
    /// Accent on paper
    pub light_accent: Color,
    /// Accent on ink, same hue family as `light_accent`
    pub dark_accent: Color,
    /// Muted text on paper
    pub muted_on_paper: Color,
    /// Muted text on ink
    pub muted_on_ink: Color,
    /// Badge hues for vlm, embedding, diffusion
    pub badges: [Color; 3],
}

impl DuotoneSpec {
    /// Palette for one tone of the pair
    pub fn palette(&self, tone: Tone) -> SchemePalette {
        match tone {
            Tone::Light => SchemePalette {
                background: self.paper,
                foreground: self.ink,
                secondary: self.muted_on_paper,
                accent: self.light_accent,
                semantic: LIGHT_SEMANTIC,
                badges: self.badges,
            },
            Tone::Dark => SchemePalette {
                background: self.ink,
                foreground: self.paper,
                secondary: self.muted_on_ink,
                accent: self.dark_accent,
                semantic: DARK_SEMANTIC,
                badges: self.badges,
            },
        }
    }
}

/// The definition of a duotone pair
pub fn duotone_spec(pair: Duotone) -> DuotoneSpec {
    match pair {
        Duotone::StormyMorning => DuotoneSpec {
            paper: Color::hex(0xE8EEF2),
            ink: Color::hex(0x2B3A47),
            light_accent: Color::hex(0x4A7A9C),
            dark_accent: Color::hex(0x7FA7C4),
            muted_on_paper: Color::hex(0x6B7F8E),
            muted_on_ink: Color::hex(0xA3B4C1),
            badges: [Color::hex(0x6C63A8), Color::hex(0x3F8F8A), Color::hex(0xB5677D)],
        },
        Duotone::PeachSkyline => DuotoneSpec {
            paper: Color::hex(0xFFF1E6),
            ink: Color::hex(0x3D2C2E),
            light_accent: Color::hex(0xE0785A),
            dark_accent: Color::hex(0xFFA384),
            muted_on_paper: Color::hex(0x8C7370),
            muted_on_ink: Color::hex(0xC9AFA8),
            badges: [Color::hex(0x9A6FB0), Color::hex(0x4E9E94), Color::hex(0xD9577A)],
        },
        Duotone::MintLagoon => DuotoneSpec {
            paper: Color::hex(0xE9F7F1),
            ink: Color::hex(0x1F3B36),
            light_accent: Color::hex(0x2E9C80),
            dark_accent: Color::hex(0x5FD3B3),
            muted_on_paper: Color::hex(0x5F7D76),
            muted_on_ink: Color::hex(0x9FC2B9),
            badges: [Color::hex(0x5B6FC2), Color::hex(0x2A8FB8), Color::hex(0xD0648A)],
        },
        Duotone::EmberForest => DuotoneSpec {
            paper: Color::hex(0xF3EEE4),
            ink: Color::hex(0x2A2B22),
            light_accent: Color::hex(0xC2562B),
            dark_accent: Color::hex(0xE88354),
            muted_on_paper: Color::hex(0x7A7564),
            muted_on_ink: Color::hex(0xB3AE9B),
            badges: [Color::hex(0x7D6A9E), Color::hex(0x5C8A5A), Color::hex(0xB8475F)],
        },
        Duotone::LavenderDusk => DuotoneSpec {
            paper: Color::hex(0xF2EEFA),
            ink: Color::hex(0x2D2640),
            light_accent: Color::hex(0x7B61C4),
            dark_accent: Color::hex(0xA993E8),
            muted_on_paper: Color::hex(0x7C7591),
            muted_on_ink: Color::hex(0xB5ADCB),
            badges: [Color::hex(0x4F79C7), Color::hex(0x3E9B9B), Color::hex(0xD0679B)],
        },
        Duotone::GoldenHour => DuotoneSpec {
            paper: Color::hex(0xFFF8E1),
            ink: Color::hex(0x3B2F1A),
            light_accent: Color::hex(0xC98A12),
            dark_accent: Color::hex(0xF2B84B),
            muted_on_paper: Color::hex(0x8A7A58),
            muted_on_ink: Color::hex(0xC8B88F),
            badges: [Color::hex(0x8E63B5), Color::hex(0x4C8F7A), Color::hex(0xD15B4A)],
        },
    }
}

/// The palette for a scheme
pub fn palette(scheme: ColorScheme) -> SchemePalette {
    match scheme {
        ColorScheme::Light => LIGHT,
        ColorScheme::Dark => DARK,
        ColorScheme::Vibrant => VIBRANT,
        ColorScheme::HighContrast => HIGH_CONTRAST,
        duotone => match duotone.duotone() {
            Some((pair, tone)) => duotone_spec(pair).palette(tone),
            None => LIGHT,
        },
    }
}

// =============================================================================
// Treatments
// =============================================================================

/// Shadow parameters with opacity chosen by surface darkness
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadowRule {
    /// Blur radius
    pub blur_radius: f32,
    /// Horizontal offset
    pub offset_x: f32,
    /// Vertical offset
    pub offset_y: f32,
    /// Black opacity on light surfaces
    pub light_opacity: f32,
    /// Black opacity on dark surfaces
    pub dark_opacity: f32,
}

impl ShadowRule {
    fn for_scheme(&self, scheme: ColorScheme) -> Shadow {
        let opacity = if scheme.is_dark() { self.dark_opacity } else { self.light_opacity };
        Shadow::new(Color::BLACK.with_opacity(opacity), self.blur_radius, self.offset_x, self.offset_y)
    }
}

/// Non-color tokens for one style kind
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Treatment {
    /// Corner radius in points
    pub corner_radius: f32,
    /// Opacity applied to the scheme background
    pub background_opacity: f32,
    /// `None` for flat styles
    pub shadow: Option<ShadowRule>,
    /// Body font weight
    pub font_weight: FontWeight,
    /// Body font design
    pub font_design: FontDesign,
}

/// The treatment for a style kind
pub fn treatment(kind: StyleKind) -> Treatment {
    match kind {
        StyleKind::Minimal => Treatment {
            corner_radius: radius::CARD,
            background_opacity: 1.0,
            shadow: None,
            font_weight: FontWeight::Regular,
            font_design: FontDesign::Default,
        },
        StyleKind::LiquidGlass => Treatment {
            corner_radius: radius::PANEL,
            background_opacity: 0.72,
            shadow: Some(ShadowRule {
                blur_radius: 20.0,
                offset_x: 0.0,
                offset_y: 8.0,
                light_opacity: 0.18,
                dark_opacity: 0.45,
            }),
            font_weight: FontWeight::Medium,
            font_design: FontDesign::Rounded,
        },
        StyleKind::Skeuomorphic => Treatment {
            corner_radius: radius::TACTILE,
            background_opacity: 1.0,
            shadow: Some(ShadowRule {
                blur_radius: 6.0,
                offset_x: 0.0,
                offset_y: 3.0,
                light_opacity: 0.30,
                dark_opacity: 0.60,
            }),
            font_weight: FontWeight::Semibold,
            font_design: FontDesign::Serif,
        },
    }
}

// =============================================================================
// Resolution
// =============================================================================

/// Resolve the built-in bundle for a (kind, scheme) pair
///
/// Pure and total: equal inputs always produce equal bundles.
pub fn resolve(kind: StyleKind, scheme: ColorScheme) -> TokenBundle {
    let palette = palette(scheme);
    let treatment = treatment(kind);
    let [vlm, embedding, diffusion] = palette.badges;

    TokenBundle {
        color_scheme: scheme,
        background_color: palette.background.with_opacity(treatment.background_opacity),
        foreground_color: palette.foreground,
        accent_color: palette.accent,
        secondary_foreground_color: palette.secondary,
        error_color: palette.semantic.error,
        warning_color: palette.semantic.warning,
        success_color: palette.semantic.success,
        info_color: palette.semantic.info,
        critical_color: CRITICAL,
        badge_colors: BadgeColors { llm: palette.accent, vlm, embedding, diffusion },
        corner_radius: treatment.corner_radius,
        shadow: treatment.shadow.map(|rule| rule.for_scheme(scheme)),
        font: FontDescriptor::new(
            FontDescriptor::BODY_SIZE,
            treatment.font_weight,
            treatment.font_design,
        ),
        logo: None,
    }
}

/// Every built-in bundle, kinds outer, schemes inner
pub fn all_bundles() -> impl Iterator<Item = (StyleKind, ColorScheme, TokenBundle)> {
    StyleKind::ALL.into_iter().flat_map(|kind| {
        ColorScheme::ALL
            .into_iter()
            .map(move |scheme| (kind, scheme, resolve(kind, scheme)))
    })
}
