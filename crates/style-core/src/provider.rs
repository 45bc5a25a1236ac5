//! Extension point for style families defined outside this crate
//!
//! A [`StyleProvider`] produces bundles for the schemes it special-cases and
//! must name an explicit fallback for every other scheme, which keeps
//! [`StyleProvider::resolve`] total.
//!
//! ```rust
//! use style_core::{ColorScheme, CustomStyle, StyleKind, StyleProvider, TokenBundle};
//!
//! let base = TokenBundle::builtin(StyleKind::Minimal, ColorScheme::Light);
//! let night = TokenBundle::builtin(StyleKind::Minimal, ColorScheme::Dark);
//!
//! let brand = CustomStyle::new(base.clone()).with_scheme(night.clone());
//! assert_eq!(brand.resolve(ColorScheme::Dark), night);
//! assert_eq!(brand.resolve(ColorScheme::Vibrant), base);
//! ```

use crate::bundle::TokenBundle;
use crate::scheme::{ColorScheme, StyleKind};
use crate::table;
use std::collections::HashMap;
use std::fmt;

/// Capability contract for a style family
pub trait StyleProvider: Send + Sync {
    /// Bundle for a scheme this provider special-cases, `None` otherwise
    fn bundle(&self, scheme: ColorScheme) -> Option<TokenBundle>;

    /// Bundle used for every scheme `bundle` does not cover
    fn fallback(&self) -> TokenBundle;

    /// Total resolution: the special-cased bundle or the fallback
    fn resolve(&self, scheme: ColorScheme) -> TokenBundle {
        self.bundle(scheme).unwrap_or_else(|| self.fallback())
    }
}

impl fmt::Debug for dyn StyleProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StyleProvider").field("fallback", &self.fallback().color_scheme).finish()
    }
}

impl StyleProvider for StyleKind {
    fn bundle(&self, scheme: ColorScheme) -> Option<TokenBundle> {
        Some(table::resolve(*self, scheme))
    }

    fn fallback(&self) -> TokenBundle {
        table::resolve(*self, ColorScheme::default())
    }
}

/// A single bundle used for every scheme
#[derive(Debug, Clone, PartialEq)]
pub struct FixedStyle(pub TokenBundle);

impl StyleProvider for FixedStyle {
    fn bundle(&self, scheme: ColorScheme) -> Option<TokenBundle> {
        (self.0.color_scheme == scheme).then(|| self.0.clone())
    }

    fn fallback(&self) -> TokenBundle {
        self.0.clone()
    }
}

/// Bundles keyed by scheme, plus a fallback
#[derive(Debug, Clone, PartialEq)]
pub struct CustomStyle {
    fallback: TokenBundle,
    schemes: HashMap<ColorScheme, TokenBundle>,
}

impl CustomStyle {
    /// Create a style whose fallback is also registered for its own scheme
    pub fn new(fallback: TokenBundle) -> Self {
        let mut schemes = HashMap::new();
        schemes.insert(fallback.color_scheme, fallback.clone());
        Self { fallback, schemes }
    }

    /// Add or replace the bundle for `bundle.color_scheme`
    pub fn with_scheme(mut self, bundle: TokenBundle) -> Self {
        self.schemes.insert(bundle.color_scheme, bundle);
        self
    }

    /// Derive a style from a built-in kind, replacing the accent everywhere
    pub fn tinted(kind: StyleKind, accent: crate::Color) -> Self {
        let fallback = table::resolve(kind, ColorScheme::default()).with_accent(accent);
        ColorScheme::ALL
            .into_iter()
            .fold(Self::new(fallback), |style, scheme| {
                style.with_scheme(table::resolve(kind, scheme).with_accent(accent))
            })
    }

    /// Schemes with a dedicated bundle
    pub fn schemes(&self) -> impl Iterator<Item = ColorScheme> + '_ {
        self.schemes.keys().copied()
    }
}

impl StyleProvider for CustomStyle {
    fn bundle(&self, scheme: ColorScheme) -> Option<TokenBundle> {
        self.schemes.get(&scheme).cloned()
    }

    fn fallback(&self) -> TokenBundle {
        self.fallback.clone()
    }
}
