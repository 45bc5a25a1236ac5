//! Style registry
//!
//! Owns the custom-style map and fronts built-in resolution. A registry is
//! created by the application root and shared (usually behind an `Arc`);
//! there is no process-global instance.
//!
//! Custom keys live in one flat namespace and the last registration wins.

use crate::bundle::{BundleError, TokenBundle};
use crate::provider::{FixedStyle, StyleProvider};
use crate::scheme::{ColorScheme, StyleKind};
use crate::selection::ThemeSelection;
use crate::table;
use parking_lot::RwLock;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use thiserror::Error;

/// Registry error types
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Malformed JSON
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// A custom bundle failed validation
    #[error("Invalid bundle for key {key}: {source}")]
    InvalidBundle {
        /// Registry key
        key: String,
        /// Validation failure
        source: BundleError,
    },
}

/// Result type for registry operations
pub type Result<T> = std::result::Result<T, RegistryError>;

/// Built-in resolution plus custom styles under string keys
#[derive(Debug, Default)]
pub struct StyleRegistry {
    custom: RwLock<HashMap<String, Arc<dyn StyleProvider>>>,
}

impl StyleRegistry {
    /// Create a registry with no custom styles
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve a built-in bundle; custom registrations never affect this
    pub fn resolve(&self, kind: StyleKind, scheme: ColorScheme) -> TokenBundle {
        table::resolve(kind, scheme)
    }

    /// Register a single bundle under `key`, replacing any previous entry
    ///
    /// Invalid bundles are stored as given and logged.
    pub fn register(&self, bundle: TokenBundle, key: impl Into<String>) {
        let key = key.into();
        if let Err(e) = bundle.validate() {
            tracing::warn!("Registering invalid custom style {}: {}", key, e);
        }
        self.register_provider(key, Arc::new(FixedStyle(bundle)));
    }

    /// Register a multi-scheme provider under `key`
    pub fn register_provider(&self, key: impl Into<String>, provider: Arc<dyn StyleProvider>) {
        let key = key.into();
        let replaced = self.custom.write().insert(key.clone(), provider).is_some();
        tracing::debug!(key = %key, replaced, "Registered custom style");
    }

    /// The bundle registered under `key`, if any
    pub fn custom_style(&self, key: &str) -> Option<TokenBundle> {
        self.custom.read().get(key).map(|provider| provider.fallback())
    }

    /// The custom style under `key` resolved for a scheme
    pub fn custom_style_for(&self, key: &str, scheme: ColorScheme) -> Option<TokenBundle> {
        self.custom.read().get(key).map(|provider| provider.resolve(scheme))
    }

    /// The custom style under `key` when registered, else the built-in bundle
    pub fn resolve_or_custom(&self, selection: ThemeSelection, key: Option<&str>) -> TokenBundle {
        key.and_then(|key| self.custom_style_for(key, selection.scheme))
            .unwrap_or_else(|| selection.resolve())
    }

    /// Remove a custom style, returning whether one was registered
    pub fn unregister(&self, key: &str) -> bool {
        self.custom.write().remove(key).is_some()
    }

    /// Whether a custom style is registered under `key`
    pub fn contains(&self, key: &str) -> bool {
        self.custom.read().contains_key(key)
    }

    /// Registered keys, sorted
    pub fn custom_keys(&self) -> Vec<String> {
        let mut keys: Vec<_> = self.custom.read().keys().cloned().collect();
        keys.sort();
        keys
    }

    /// Number of custom styles
    pub fn len(&self) -> usize {
        self.custom.read().len()
    }

    /// Whether no custom styles are registered
    pub fn is_empty(&self) -> bool {
        self.custom.read().is_empty()
    }

    /// Register every bundle in a JSON object of `key -> bundle`
    ///
    /// The whole document is validated before anything is registered.
    pub fn import_json(&self, json: &str) -> Result<usize> {
        let bundles: BTreeMap<String, TokenBundle> = serde_json::from_str(json)?;

        for (key, bundle) in &bundles {
            bundle
                .validate()
                .map_err(|source| RegistryError::InvalidBundle { key: key.clone(), source })?;
        }

        let count = bundles.len();
        for (key, bundle) in bundles {
            self.register(bundle, key);
        }
        Ok(count)
    }

    /// Export the fallback bundle of every custom style as a JSON object
    pub fn export_json(&self) -> Result<String> {
        let bundles: BTreeMap<String, TokenBundle> = self
            .custom
            .read()
            .iter()
            .map(|(key, provider)| (key.clone(), provider.fallback()))
            .collect();
        Ok(serde_json::to_string_pretty(&bundles)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::CustomStyle;
    use crate::table::all_bundles;
    use crate::Color;

    fn brand() -> TokenBundle {
        TokenBundle::builtin(StyleKind::Minimal, ColorScheme::Vibrant)
            .with_accent(Color::hex(0x00A86B))
            .with_logo("brand/logo.png")
    }

    // ==========================================================================
    // Custom Registration Tests
    // ==========================================================================

    #[test]
    fn test_register_and_lookup() {
        let registry = StyleRegistry::new();
        registry.register(brand(), "brand");

        assert_eq!(registry.custom_style("brand"), Some(brand()));
        assert!(registry.contains("brand"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_missing_key_is_none() {
        let registry = StyleRegistry::new();
        assert_eq!(registry.custom_style("missing"), None);
        assert_eq!(registry.custom_style_for("missing", ColorScheme::Dark), None);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_last_write_wins() {
        let registry = StyleRegistry::new();
        registry.register(TokenBundle::default(), "x");
        registry.register(brand(), "x");

        assert_eq!(registry.custom_style("x"), Some(brand()));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_custom_registration_isolated_from_builtins() {
        let registry = StyleRegistry::new();
        let before: Vec<_> = all_bundles().collect();

        registry.register(brand(), "x");
        registry.register(brand(), "minimal");

        for (kind, scheme, bundle) in before {
            assert_eq!(registry.resolve(kind, scheme), bundle);
        }
    }

    #[test]
    fn test_unregister() {
        let registry = StyleRegistry::new();
        registry.register(brand(), "brand");

        assert!(registry.unregister("brand"));
        assert!(!registry.unregister("brand"));
        assert_eq!(registry.custom_style("brand"), None);
    }

    #[test]
    fn test_invalid_bundle_still_registered() {
        let registry = StyleRegistry::new();
        let mut bundle = brand();
        bundle.corner_radius = -4.0;

        registry.register(bundle.clone(), "odd");
        assert_eq!(registry.custom_style("odd"), Some(bundle));
    }

    #[test]
    fn test_custom_keys_sorted() {
        let registry = StyleRegistry::new();
        registry.register(brand(), "zeta");
        registry.register(brand(), "alpha");
        assert_eq!(registry.custom_keys(), vec!["alpha".to_string(), "zeta".to_string()]);
    }

    // ==========================================================================
    // Provider Tests
    // ==========================================================================

    #[test]
    fn test_register_provider_resolves_per_scheme() {
        let registry = StyleRegistry::new();
        let night = TokenBundle::builtin(StyleKind::LiquidGlass, ColorScheme::Dark);
        registry.register_provider(
            "brand",
            Arc::new(CustomStyle::new(brand()).with_scheme(night.clone())),
        );

        assert_eq!(registry.custom_style_for("brand", ColorScheme::Dark), Some(night));
        assert_eq!(registry.custom_style_for("brand", ColorScheme::Light), Some(brand()));
        assert_eq!(registry.custom_style("brand"), Some(brand()));
    }

    #[test]
    fn test_resolve_or_custom() {
        let registry = StyleRegistry::new();
        registry.register(brand(), "brand");
        let selection = ThemeSelection::new(StyleKind::Skeuomorphic, ColorScheme::Dark);

        assert_eq!(registry.resolve_or_custom(selection, Some("brand")), brand());
        assert_eq!(registry.resolve_or_custom(selection, Some("missing")), selection.resolve());
        assert_eq!(registry.resolve_or_custom(selection, None), selection.resolve());
    }

    // ==========================================================================
    // JSON Tests
    // ==========================================================================

    #[test]
    fn test_export_import() {
        let source = StyleRegistry::new();
        source.register(brand(), "brand");
        source.register(TokenBundle::builtin(StyleKind::Skeuomorphic, ColorScheme::EmberForestDark), "ember");

        let json = source.export_json().unwrap();

        let target = StyleRegistry::new();
        assert_eq!(target.import_json(&json).unwrap(), 2);
        assert_eq!(target.custom_style("brand"), Some(brand()));
        assert_eq!(target.custom_keys(), source.custom_keys());
    }

    #[test]
    fn test_import_rejects_invalid_bundle_atomically() {
        let mut bad = serde_json::to_value(brand()).unwrap();
        bad["cornerRadius"] = serde_json::json!(-2.0);
        let doc = serde_json::json!({ "good": brand(), "bad": bad }).to_string();

        let registry = StyleRegistry::new();
        let err = registry.import_json(&doc).unwrap_err();
        assert!(matches!(err, RegistryError::InvalidBundle { ref key, .. } if key == "bad"));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_import_malformed_json() {
        let registry = StyleRegistry::new();
        assert!(matches!(registry.import_json("{ nope"), Err(RegistryError::Json(_))));
    }

    // ==========================================================================
    // Concurrency Tests
    // ==========================================================================

    #[test]
    fn test_concurrent_register_and_lookup() {
        let registry = Arc::new(StyleRegistry::new());

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let registry = Arc::clone(&registry);
                std::thread::spawn(move || {
                    for j in 0..50 {
                        registry.register(brand(), format!("style-{}-{}", i, j));
                        assert!(registry.custom_style(&format!("style-{}-{}", i, j)).is_some());
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(registry.len(), 400);
    }
}
