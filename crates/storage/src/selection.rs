//! Persisted theme selection
//!
//! Two string entries, style kind and color scheme, stored under stable
//! scoped keys (by default `appearance:styleKind` and
//! `appearance:colorScheme`). Loading never fails: missing, unreadable or
//! unrecognized values fall back to their defaults independently.

use crate::kv::{KvStore, Result};
use std::sync::Arc;
use style_core::ThemeSelection;

/// Key layout for the persisted selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionKeys {
    /// Scope prefix shared by both keys
    pub scope: String,
    /// Style kind entry name
    pub kind: String,
    /// Color scheme entry name
    pub scheme: String,
}

impl Default for SelectionKeys {
    fn default() -> Self {
        Self {
            scope: "appearance".to_string(),
            kind: "styleKind".to_string(),
            scheme: "colorScheme".to_string(),
        }
    }
}

impl SelectionKeys {
    /// Default key names under a custom scope
    pub fn new(scope: impl Into<String>) -> Self {
        Self { scope: scope.into(), ..Default::default() }
    }

    /// Set the style kind entry name
    pub fn kind(mut self, name: impl Into<String>) -> Self {
        self.kind = name.into();
        self
    }

    /// Set the color scheme entry name
    pub fn scheme(mut self, name: impl Into<String>) -> Self {
        self.scheme = name.into();
        self
    }
}

/// Load/save access to the persisted selection
pub struct SelectionStore {
    kv: Arc<KvStore>,
    kind_key: String,
    scheme_key: String,
    prefix: String,
    flush_on_save: bool,
}

impl SelectionStore {
    /// Create a store with the given key layout
    pub fn new(kv: Arc<KvStore>, keys: SelectionKeys) -> Result<Self> {
        let kind_key = kv.scoped_key(&[&keys.scope, &keys.kind])?;
        let scheme_key = kv.scoped_key(&[&keys.scope, &keys.scheme])?;
        let prefix = kv.scope_prefix(&[&keys.scope])?;

        Ok(Self { kv, kind_key, scheme_key, prefix, flush_on_save: true })
    }

    /// Create a store with the default key layout
    pub fn with_default_keys(kv: Arc<KvStore>) -> Result<Self> {
        Self::new(kv, SelectionKeys::default())
    }

    /// Whether each save is flushed to disk before returning (default: true)
    pub fn flush_on_save(mut self, enabled: bool) -> Self {
        self.flush_on_save = enabled;
        self
    }

    /// The full style kind key
    pub fn kind_key(&self) -> &str {
        &self.kind_key
    }

    /// The full color scheme key
    pub fn scheme_key(&self) -> &str {
        &self.scheme_key
    }

    /// The underlying key-value store
    pub fn kv(&self) -> &Arc<KvStore> {
        &self.kv
    }

    /// Load the selection, substituting defaults for anything unusable
    ///
    /// Both entries come from one snapshot, so a concurrent save is seen
    /// entirely or not at all.
    pub fn load(&self) -> ThemeSelection {
        let keys = [self.kind_key.as_str(), self.scheme_key.as_str()];
        let (kind, scheme) = match self.kv.get_many::<String>(&keys) {
            Ok(values) => {
                let mut values = keys.iter().zip(values).map(|(key, value)| Self::decoded(key, value));
                (values.next().flatten(), values.next().flatten())
            }
            Err(e) => {
                tracing::warn!("Unreadable theme preferences, using defaults: {}", e);
                (None, None)
            }
        };
        ThemeSelection::from_raw(kind.as_deref(), scheme.as_deref())
    }

    /// Write both identifiers as one atomic batch
    pub fn save(&self, selection: &ThemeSelection) -> Result<()> {
        let (kind, scheme) = selection.raw();
        self.kv.set_many(&[(self.kind_key.as_str(), kind), (self.scheme_key.as_str(), scheme)])?;
        if self.flush_on_save {
            self.kv.flush()?;
        }
        tracing::debug!(%selection, "Saved theme selection");
        Ok(())
    }

    /// Remove both entries, so the next load returns the default
    pub fn clear(&self) -> Result<()> {
        self.kv.remove(&self.kind_key)?;
        self.kv.remove(&self.scheme_key)?;
        Ok(())
    }

    /// Subscribe to writes of either entry
    pub fn watch(&self) -> sled::Subscriber {
        self.kv.watch(&self.prefix)
    }

    fn decoded(key: &str, value: Result<Option<String>>) -> Option<String> {
        match value {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(key, "Unreadable theme preference, using default: {}", e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use style_core::{ColorScheme, StyleKind};

    fn store() -> SelectionStore {
        let kv = Arc::new(KvStore::in_memory().unwrap());
        SelectionStore::with_default_keys(kv).unwrap().flush_on_save(false)
    }

    #[test]
    fn test_default_keys() {
        let store = store();
        assert_eq!(store.kind_key(), "appearance:styleKind");
        assert_eq!(store.scheme_key(), "appearance:colorScheme");
    }

    #[test]
    fn test_custom_keys() {
        let kv = Arc::new(KvStore::in_memory().unwrap());
        let store = SelectionStore::new(kv, SelectionKeys::new("demo").kind("style").scheme("palette")).unwrap();
        assert_eq!(store.kind_key(), "demo:style");
        assert_eq!(store.scheme_key(), "demo:palette");
    }

    #[test]
    fn test_empty_scope_rejected() {
        let kv = Arc::new(KvStore::in_memory().unwrap());
        assert!(SelectionStore::new(kv, SelectionKeys::new("")).is_err());
    }

    #[test]
    fn test_load_empty_store() {
        assert_eq!(store().load(), ThemeSelection::default());
    }

    #[test]
    fn test_save_load_every_pair() {
        let store = store();
        for kind in StyleKind::ALL {
            for scheme in ColorScheme::ALL {
                let selection = ThemeSelection::new(kind, scheme);
                store.save(&selection).unwrap();
                assert_eq!(store.load(), selection);
            }
        }
    }

    #[test]
    fn test_values_stored_as_identifiers() {
        let store = store();
        store
            .save(&ThemeSelection::new(StyleKind::LiquidGlass, ColorScheme::StormyMorningDark))
            .unwrap();

        let kind: Option<String> = store.kv().get("appearance:styleKind").unwrap();
        let scheme: Option<String> = store.kv().get("appearance:colorScheme").unwrap();
        assert_eq!(kind.as_deref(), Some("liquidGlass"));
        assert_eq!(scheme.as_deref(), Some("stormyMorningDark"));
    }

    #[test]
    fn test_garbage_scheme_keeps_kind() {
        let store = store();
        store.kv().set(store.kind_key(), "skeuomorphic").unwrap();
        store.kv().set(store.scheme_key(), "plaid").unwrap();

        assert_eq!(
            store.load(),
            ThemeSelection::new(StyleKind::Skeuomorphic, ColorScheme::Light)
        );
    }

    #[test]
    fn test_garbage_kind_keeps_scheme() {
        let store = store();
        store.kv().set(store.kind_key(), "brutalist").unwrap();
        store.kv().set(store.scheme_key(), "vibrant").unwrap();

        assert_eq!(store.load(), ThemeSelection::new(StyleKind::Minimal, ColorScheme::Vibrant));
    }

    #[test]
    fn test_non_string_and_corrupt_values() {
        let store = store();
        store.kv().set(store.kind_key(), &7).unwrap();
        store.kv().set_raw(store.scheme_key(), b"\x00\x01").unwrap();

        assert_eq!(store.load(), ThemeSelection::default());
    }

    #[test]
    fn test_clear_restores_default() {
        let store = store();
        store.save(&ThemeSelection::new(StyleKind::LiquidGlass, ColorScheme::Dark)).unwrap();
        store.clear().unwrap();
        assert_eq!(store.load(), ThemeSelection::default());
    }

    #[test]
    fn test_watch_sees_saves() {
        let store = store();
        let mut subscriber = store.watch();

        store.kv().set("unrelated", "x").unwrap();
        store.save(&ThemeSelection::new(StyleKind::Skeuomorphic, ColorScheme::Dark)).unwrap();

        assert!(subscriber.next_timeout(Duration::from_secs(5)).is_ok());
    }

    #[test]
    fn test_concurrent_saves_never_tear() {
        let store = Arc::new(store());
        let a = ThemeSelection::new(StyleKind::LiquidGlass, ColorScheme::MintLagoonDark);
        let b = ThemeSelection::new(StyleKind::Skeuomorphic, ColorScheme::GoldenHourLight);

        store.save(&a).unwrap();

        let writer = {
            let store = Arc::clone(&store);
            std::thread::spawn(move || {
                for i in 0..2000 {
                    store.save(if i % 2 == 0 { &b } else { &a }).unwrap();
                }
            })
        };

        while !writer.is_finished() {
            let loaded = store.load();
            assert!(loaded == a || loaded == b, "torn load: {}", loaded);
        }
        writer.join().unwrap();
        assert_eq!(store.load(), a);
    }
}
