//! Token bundles
//!
//! A [`TokenBundle`] is the fully resolved set of visual tokens for one
//! (style kind, color scheme) pair, or for one custom style. Components read
//! categorical colors through [`TokenBundle::badge_color`],
//! [`TokenBundle::quantization_color`] and [`TokenBundle::log_level_color`]
//! so that swapping the active bundle re-themes them.

use crate::color::Color;
use crate::scheme::{ColorScheme, StyleKind};
use crate::tokens::{scalar_bits, FontDescriptor, Shadow};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use thiserror::Error;

/// Bundle validation errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BundleError {
    /// Corner radius below zero
    #[error("Negative corner radius: {0}")]
    NegativeCornerRadius(f32),

    /// NaN or infinite scalar
    #[error("Non-finite value in {0}")]
    NonFiniteValue(&'static str),

    /// Font size must be positive
    #[error("Invalid font size: {0}")]
    InvalidFontSize(f32),
}

// =============================================================================
// Semantic Categories
// =============================================================================

/// Model categories shown as badges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeCategory {
    /// Large language model
    Llm,
    /// Vision-language model
    Vlm,
    /// Embedding model
    Embedding,
    /// Diffusion model
    Diffusion,
}

impl FromStr for BadgeCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "llm" => Ok(BadgeCategory::Llm),
            "vlm" => Ok(BadgeCategory::Vlm),
            "embedding" => Ok(BadgeCategory::Embedding),
            "diffusion" => Ok(BadgeCategory::Diffusion),
            _ => Err(format!("Unknown badge category: {}", s)),
        }
    }
}

/// Log severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Diagnostic detail
    Debug,
    /// Routine events
    Info,
    /// Recoverable problems
    Warning,
    /// Failed operations
    Error,
    /// Failures needing immediate attention
    Critical,
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warning" => Ok(LogLevel::Warning),
            "error" => Ok(LogLevel::Error),
            "critical" => Ok(LogLevel::Critical),
            _ => Err(format!("Unknown log level: {}", s)),
        }
    }
}

/// Quantization labels highlighted with the accent color
pub const QUANTIZATION_LABELS: [&str; 4] = ["4bit", "8bit", "fp16", "fp32"];

/// Per-category badge colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BadgeColors {
    /// Large language model badge
    pub llm: Color,
    /// Vision-language model badge
    pub vlm: Color,
    /// Embedding model badge
    pub embedding: Color,
    /// Diffusion model badge
    pub diffusion: Color,
}

impl BadgeColors {
    /// Color for a category
    pub fn get(&self, category: BadgeCategory) -> Color {
        match category {
            BadgeCategory::Llm => self.llm,
            BadgeCategory::Vlm => self.vlm,
            BadgeCategory::Embedding => self.embedding,
            BadgeCategory::Diffusion => self.diffusion,
        }
    }
}

// =============================================================================
// Token Bundle
// =============================================================================

/// One fully resolved, immutable set of visual tokens
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenBundle {
    /// The scheme this bundle was resolved for
    pub color_scheme: ColorScheme,
    /// Main surface color
    pub background_color: Color,
    /// Primary text color
    pub foreground_color: Color,
    /// Tint for interactive elements
    pub accent_color: Color,
    /// Muted text, also the neutral fallback for unknown categories
    pub secondary_foreground_color: Color,
    /// Errors and destructive actions
    pub error_color: Color,
    /// Warnings
    pub warning_color: Color,
    /// Success states
    pub success_color: Color,
    /// Informational notices
    pub info_color: Color,
    /// Color for the `critical` log level
    pub critical_color: Color,
    /// Model category badge colors
    pub badge_colors: BadgeColors,
    /// Corner radius in points, never negative
    pub corner_radius: f32,
    /// Drop shadow; `None` means no shadow at all
    #[serde(default)]
    pub shadow: Option<Shadow>,
    /// Body font
    pub font: FontDescriptor,
    /// Optional branding image reference
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
}

impl TokenBundle {
    /// Resolve the built-in bundle for a pair
    pub fn builtin(kind: StyleKind, scheme: ColorScheme) -> Self {
        crate::table::resolve(kind, scheme)
    }

    /// Whether surfaces are dark
    pub fn is_dark(&self) -> bool {
        self.background_color.luminance() < self.foreground_color.luminance()
    }

    /// Whether a shadow is drawn
    pub fn has_shadow(&self) -> bool {
        self.shadow.is_some()
    }

    /// Badge color for a free-form category, matched case-insensitively
    ///
    /// Unrecognized categories get the secondary foreground color.
    pub fn badge_color(&self, category: &str) -> Color {
        category
            .parse::<BadgeCategory>()
            .map(|category| self.badge_colors.get(category))
            .unwrap_or(self.secondary_foreground_color)
    }

    /// Accent for known quantization labels, secondary otherwise
    pub fn quantization_color(&self, label: &str) -> Color {
        if QUANTIZATION_LABELS.iter().any(|known| known.eq_ignore_ascii_case(label)) {
            self.accent_color
        } else {
            self.secondary_foreground_color
        }
    }

    /// Color for a free-form log level, secondary when unrecognized
    pub fn log_level_color(&self, level: &str) -> Color {
        level
            .parse::<LogLevel>()
            .map(|level| self.level_color(level))
            .unwrap_or(self.secondary_foreground_color)
    }

    /// Color for a typed log level
    pub fn level_color(&self, level: LogLevel) -> Color {
        match level {
            LogLevel::Debug => self.secondary_foreground_color,
            LogLevel::Info => self.accent_color,
            LogLevel::Warning => self.warning_color,
            LogLevel::Error => self.error_color,
            LogLevel::Critical => self.critical_color,
        }
    }

    /// Replace the logo reference
    pub fn with_logo(mut self, logo: impl Into<String>) -> Self {
        self.logo = Some(logo.into());
        self
    }

    /// Replace the accent color; `llm` badges follow the accent
    pub fn with_accent(mut self, accent: Color) -> Self {
        if self.badge_colors.llm == self.accent_color {
            self.badge_colors.llm = accent;
        }
        self.accent_color = accent;
        self
    }

    /// Check scalar fields of an externally supplied bundle
    pub fn validate(&self) -> Result<(), BundleError> {
        if !self.corner_radius.is_finite() {
            return Err(BundleError::NonFiniteValue("cornerRadius"));
        }
        if self.corner_radius < 0.0 {
            return Err(BundleError::NegativeCornerRadius(self.corner_radius));
        }
        if let Some(shadow) = &self.shadow {
            if !shadow.is_finite() {
                return Err(BundleError::NonFiniteValue("shadow"));
            }
        }
        if !self.font.size.is_finite() {
            return Err(BundleError::NonFiniteValue("font.size"));
        }
        if self.font.size <= 0.0 {
            return Err(BundleError::InvalidFontSize(self.font.size));
        }
        Ok(())
    }
}

impl Default for TokenBundle {
    /// Minimal / light, the bundle consumers see when nothing is provided
    fn default() -> Self {
        Self::builtin(StyleKind::Minimal, ColorScheme::Light)
    }
}

impl PartialEq for TokenBundle {
    fn eq(&self, other: &Self) -> bool {
        self.color_scheme == other.color_scheme
            && self.background_color == other.background_color
            && self.foreground_color == other.foreground_color
            && self.accent_color == other.accent_color
            && self.secondary_foreground_color == other.secondary_foreground_color
            && self.error_color == other.error_color
            && self.warning_color == other.warning_color
            && self.success_color == other.success_color
            && self.info_color == other.info_color
            && self.critical_color == other.critical_color
            && self.badge_colors == other.badge_colors
            && scalar_bits(self.corner_radius) == scalar_bits(other.corner_radius)
            && self.shadow == other.shadow
            && self.font == other.font
            && self.logo == other.logo
    }
}

impl Eq for TokenBundle {}

impl Hash for TokenBundle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.color_scheme.hash(state);
        self.background_color.hash(state);
        self.foreground_color.hash(state);
        self.accent_color.hash(state);
        self.secondary_foreground_color.hash(state);
        self.error_color.hash(state);
        self.warning_color.hash(state);
        self.success_color.hash(state);
        self.info_color.hash(state);
        self.critical_color.hash(state);
        self.badge_colors.hash(state);
        scalar_bits(self.corner_radius).hash(state);
        self.shadow.hash(state);
        self.font.hash(state);
        self.logo.hash(state);
    }
}

impl fmt::Display for TokenBundle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (bg {}, fg {}, accent {}, radius {})",
            self.color_scheme.id(),
            self.background_color,
            self.foreground_color,
            self.accent_color,
            self.corner_radius
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::all_bundles;
    use std::collections::HashSet;

    fn bundle() -> TokenBundle {
        TokenBundle::builtin(StyleKind::Minimal, ColorScheme::Dark)
    }

    // ==========================================================================
    // Lookup Tests
    // ==========================================================================

    #[test]
    fn test_badge_color_known_categories() {
        let b = bundle();
        assert_eq!(b.badge_color("llm"), b.badge_colors.llm);
        assert_eq!(b.badge_color("LLM"), b.badge_colors.llm);
        assert_eq!(b.badge_color("Vlm"), b.badge_colors.vlm);
        assert_eq!(b.badge_color("embedding"), b.badge_colors.embedding);
        assert_eq!(b.badge_color("DIFFUSION"), b.badge_colors.diffusion);
    }

    #[test]
    fn test_badge_color_fallback_every_builtin() {
        for (kind, scheme, b) in all_bundles() {
            assert_eq!(b.badge_color("unknown-category"), b.secondary_foreground_color, "{}/{}", kind, scheme);
            assert_eq!(b.badge_color(""), b.secondary_foreground_color, "{}/{}", kind, scheme);
        }
    }

    #[test]
    fn test_quantization_color() {
        let b = bundle();
        for label in ["4bit", "8BIT", "fp16", "FP32"] {
            assert_eq!(b.quantization_color(label), b.accent_color, "{}", label);
        }
        assert_eq!(b.quantization_color("q5_k_m"), b.secondary_foreground_color);
        assert_eq!(b.quantization_color("4 bit"), b.secondary_foreground_color);
    }

    #[test]
    fn test_log_level_color() {
        let b = bundle();
        assert_eq!(b.log_level_color("debug"), b.secondary_foreground_color);
        assert_eq!(b.log_level_color("Info"), b.accent_color);
        assert_eq!(b.log_level_color("WARNING"), b.warning_color);
        assert_eq!(b.log_level_color("error"), b.error_color);
        assert_eq!(b.log_level_color("critical"), b.critical_color);
    }

    #[test]
    fn test_log_level_fallback_every_builtin() {
        for (kind, scheme, b) in all_bundles() {
            assert_eq!(b.log_level_color("trace"), b.secondary_foreground_color, "{}/{}", kind, scheme);
            assert_eq!(b.quantization_color("q5_k_m"), b.secondary_foreground_color, "{}/{}", kind, scheme);
        }
    }

    #[test]
    fn test_log_level_ordering() {
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Error < LogLevel::Critical);
    }

    // ==========================================================================
    // Value Semantics Tests
    // ==========================================================================

    #[test]
    fn test_structural_equality_and_hash() {
        let a = bundle();
        let b = bundle();
        let c = bundle().with_logo("brand/mark.png");

        assert_eq!(a, b);
        assert_ne!(a, c);

        let set: HashSet<_> = [a, b, c].into_iter().collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_signed_zero_radius_hashes_alike() {
        let mut a = bundle();
        a.corner_radius = 0.0;
        let mut b = bundle();
        b.corner_radius = -0.0;

        assert_eq!(a, b);
        let set: HashSet<_> = [a, b].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_nan_bundle_equals_its_clone() {
        let mut b = bundle();
        b.corner_radius = f32::NAN;
        b.shadow = Some(Shadow::new(Color::BLACK, f32::NAN, 0.0, 2.0));

        assert_eq!(b, b.clone());
        assert_ne!(b, bundle());
    }

    #[test]
    fn test_with_accent_moves_llm_badge() {
        let accent = Color::hex(0x123456);
        let b = bundle().with_accent(accent);
        assert_eq!(b.accent_color, accent);
        assert_eq!(b.badge_color("llm"), accent);
        assert_eq!(b.quantization_color("fp16"), accent);
    }

    #[test]
    fn test_default_is_minimal_light() {
        let b = TokenBundle::default();
        assert_eq!(b.color_scheme, ColorScheme::Light);
        assert!(b.shadow.is_none());
        assert!(!b.is_dark());
    }

    // ==========================================================================
    // Validation Tests
    // ==========================================================================

    #[test]
    fn test_builtin_bundles_validate() {
        for kind in StyleKind::ALL {
            for scheme in ColorScheme::ALL {
                assert!(TokenBundle::builtin(kind, scheme).validate().is_ok());
            }
        }
    }

    #[test]
    fn test_validate_rejects_bad_scalars() {
        let mut b = bundle();
        b.corner_radius = -1.0;
        assert_eq!(b.validate(), Err(BundleError::NegativeCornerRadius(-1.0)));

        let mut b = bundle();
        b.corner_radius = f32::NAN;
        assert_eq!(b.validate(), Err(BundleError::NonFiniteValue("cornerRadius")));

        let mut b = bundle();
        b.font.size = 0.0;
        assert_eq!(b.validate(), Err(BundleError::InvalidFontSize(0.0)));

        let mut b = bundle();
        b.shadow = Some(Shadow::new(Color::BLACK, f32::INFINITY, 0.0, 0.0));
        assert_eq!(b.validate(), Err(BundleError::NonFiniteValue("shadow")));
    }

    // ==========================================================================
    // Serialization Tests
    // ==========================================================================

    #[test]
    fn test_bundle_json_shape() {
        let json = serde_json::to_value(bundle()).unwrap();
        assert_eq!(json["colorScheme"], "dark");
        assert!(json["shadow"].is_null());
        assert!(json.get("logo").is_none());
        assert_eq!(json["font"]["weight"], "regular");
    }

    #[test]
    fn test_bundle_deserializes_without_optional_fields() {
        let mut json = serde_json::to_value(bundle()).unwrap();
        json.as_object_mut().unwrap().remove("shadow");

        let back: TokenBundle = serde_json::from_value(json).unwrap();
        assert_eq!(back, bundle());
    }
}
