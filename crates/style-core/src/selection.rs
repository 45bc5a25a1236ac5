//! The user's persisted (style kind, color scheme) choice

use crate::bundle::TokenBundle;
use crate::scheme::{ColorScheme, StyleKind};
use crate::table;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A (style kind, color scheme) pair, defaulting to minimal / light
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ThemeSelection {
    /// Style family
    pub kind: StyleKind,
    /// Color scheme
    pub scheme: ColorScheme,
}

impl ThemeSelection {
    /// Create a selection
    pub fn new(kind: StyleKind, scheme: ColorScheme) -> Self {
        Self { kind, scheme }
    }

    /// Build a selection from raw persisted identifiers
    ///
    /// Each side falls back to its default on its own when missing or
    /// unparseable, so a corrupt scheme never discards a valid kind.
    pub fn from_raw(kind: Option<&str>, scheme: Option<&str>) -> Self {
        let kind = kind
            .and_then(|raw| match raw.parse() {
                Ok(kind) => Some(kind),
                Err(e) => {
                    tracing::warn!("Ignoring persisted style kind: {}", e);
                    None
                }
            })
            .unwrap_or_default();

        let scheme = scheme
            .and_then(|raw| match raw.parse() {
                Ok(scheme) => Some(scheme),
                Err(e) => {
                    tracing::warn!("Ignoring persisted color scheme: {}", e);
                    None
                }
            })
            .unwrap_or_default();

        Self { kind, scheme }
    }

    /// Raw identifiers suitable for persistence
    pub fn raw(&self) -> (&'static str, &'static str) {
        (self.kind.id(), self.scheme.id())
    }

    /// Same kind, different scheme
    pub fn with_scheme(self, scheme: ColorScheme) -> Self {
        Self { scheme, ..self }
    }

    /// Same scheme, different kind
    pub fn with_kind(self, kind: StyleKind) -> Self {
        Self { kind, ..self }
    }

    /// Resolve the built-in bundle for this selection
    pub fn resolve(&self) -> TokenBundle {
        table::resolve(self.kind, self.scheme)
    }
}

impl fmt::Display for ThemeSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.kind.id(), self.scheme.id())
    }
}
