//! Scalar design tokens: radii, shadows, and font descriptors
//!
//! These carry `f32` fields, so equality and hashing are implemented on
//! canonical bit patterns (see [`scalar_bits`]). Bundles are compared
//! structurally in registries, tests and theme propagation.

use crate::color::Color;
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// Bit pattern used for equality and hashing of scalar tokens
///
/// `-0.0` maps to `0.0` and every NaN maps to one canonical NaN, so equal
/// values always hash alike and a bundle always equals itself.
pub(crate) fn scalar_bits(value: f32) -> u32 {
    if value.is_nan() {
        f32::NAN.to_bits()
    } else if value == 0.0 {
        0
    } else {
        value.to_bits()
    }
}

// =============================================================================
// Corner Radius Tokens
// =============================================================================

/// Corner radius tokens in points
pub mod radius {
    /// No radius
    pub const NONE: f32 = 0.0;
    /// Tactile controls (10pt)
    pub const TACTILE: f32 = 10.0;
    /// Flat cards (12pt)
    pub const CARD: f32 = 12.0;
    /// Glass panels (20pt)
    pub const PANEL: f32 = 20.0;
}

// =============================================================================
// Shadow Tokens
// =============================================================================

/// Drop shadow parameters
///
/// An absent shadow (`Option::<Shadow>::None`) is distinct from a shadow with
/// zero blur.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shadow {
    /// Shadow color (with alpha)
    pub color: Color,
    /// Blur radius
    pub blur_radius: f32,
    /// Horizontal offset
    pub offset_x: f32,
    /// Vertical offset
    pub offset_y: f32,
}

impl Shadow {
    /// Create a new shadow
    pub fn new(color: Color, blur_radius: f32, offset_x: f32, offset_y: f32) -> Self {
        Self { color, blur_radius, offset_x, offset_y }
    }

    pub(crate) fn is_finite(&self) -> bool {
        self.blur_radius.is_finite() && self.offset_x.is_finite() && self.offset_y.is_finite()
    }
}

impl PartialEq for Shadow {
    fn eq(&self, other: &Self) -> bool {
        self.color == other.color
            && scalar_bits(self.blur_radius) == scalar_bits(other.blur_radius)
            && scalar_bits(self.offset_x) == scalar_bits(other.offset_x)
            && scalar_bits(self.offset_y) == scalar_bits(other.offset_y)
    }
}

impl Eq for Shadow {}

impl Hash for Shadow {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.color.hash(state);
        scalar_bits(self.blur_radius).hash(state);
        scalar_bits(self.offset_x).hash(state);
        scalar_bits(self.offset_y).hash(state);
    }
}

// =============================================================================
// Font Tokens
// =============================================================================

/// Font weight scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    /// 300
    Light,
    /// 400
    #[default]
    Regular,
    /// 500
    Medium,
    /// 600
    Semibold,
    /// 700
    Bold,
}

impl FontWeight {
    /// Numeric CSS-style weight
    pub fn value(&self) -> u16 {
        match self {
            FontWeight::Light => 300,
            FontWeight::Regular => 400,
            FontWeight::Medium => 500,
            FontWeight::Semibold => 600,
            FontWeight::Bold => 700,
        }
    }
}

/// Font design family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FontDesign {
    /// Platform system face
    #[default]
    Default,
    /// Rounded system face
    Rounded,
    /// Serif face
    Serif,
    /// Monospaced face
    Monospaced,
}

/// Body font for a bundle
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FontDescriptor {
    /// Point size
    pub size: f32,
    /// Weight
    pub weight: FontWeight,
    /// Design family
    pub design: FontDesign,
}

impl FontDescriptor {
    /// Body text size shared by the built-in styles
    pub const BODY_SIZE: f32 = 16.0;

    /// Create a new font descriptor
    pub fn new(size: f32, weight: FontWeight, design: FontDesign) -> Self {
        Self { size, weight, design }
    }

    /// Same descriptor at a different size
    pub fn with_size(self, size: f32) -> Self {
        Self { size, ..self }
    }
}

impl Default for FontDescriptor {
    fn default() -> Self {
        Self::new(Self::BODY_SIZE, FontWeight::Regular, FontDesign::Default)
    }
}

impl PartialEq for FontDescriptor {
    fn eq(&self, other: &Self) -> bool {
        scalar_bits(self.size) == scalar_bits(other.size)
            && self.weight == other.weight
            && self.design == other.design
    }
}

impl Eq for FontDescriptor {}

impl Hash for FontDescriptor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        scalar_bits(self.size).hash(state);
        self.weight.hash(state);
        self.design.hash(state);
    }
}
