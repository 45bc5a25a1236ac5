//! Theme Switching Integration Tests
//!
//! End-to-end tests for switching themes at runtime: selection through the
//! controller, propagation to scoped consumers, custom styles, and changes
//! written by another handle on the same store.

use app_state::{ambient, ControllerConfig, ThemeController};
use std::sync::Arc;
use std::time::Duration;
use storage::{KvConfig, KvStore, SelectionStore};
use style_core::{Color, ColorScheme, CustomStyle, StyleKind, StyleRegistry, ThemeSelection, TokenBundle};
use tempfile::TempDir;

/// Helper to create a controller over an in-memory store
fn create_controller() -> Arc<ThemeController> {
    let kv = Arc::new(KvStore::in_memory().unwrap());
    let config = ControllerConfig::default().watch_poll(Duration::from_millis(20)).flush_on_save(false);
    Arc::new(ThemeController::open(kv, Arc::new(StyleRegistry::new()), config).unwrap())
}

/// Test a selection reaches every consumer outside overrides
#[tokio::test]
async fn test_switch_propagates_to_consumers() {
    let controller = create_controller();
    let tree = controller.tree();
    let sidebar = tree.add_child(tree.root()).unwrap();
    let row = tree.add_child(sidebar).unwrap();
    let mut watcher = tree.watch(row).unwrap();

    let selection = ThemeSelection::new(StyleKind::LiquidGlass, ColorScheme::Dark);
    controller.select(selection).unwrap();

    assert!(watcher.changed().await);
    let bundle = watcher.current();
    assert_eq!(bundle.corner_radius, 20.0);
    assert_eq!(bundle.shadow.map(|s| s.blur_radius), Some(20.0));
    assert!(bundle.background_color.opacity() < 1.0);
}

/// Test a subtree override survives global switches
#[tokio::test]
async fn test_override_isolated_from_global_switch() {
    let controller = create_controller();
    let tree = controller.tree();
    let preview = tree.add_child(tree.root()).unwrap();
    let card = tree.add_child(preview).unwrap();
    let pinned = TokenBundle::builtin(StyleKind::Skeuomorphic, ColorScheme::EmberForestLight);
    tree.provide(preview, pinned.clone()).unwrap();

    for scheme in ColorScheme::ALL {
        controller.select_scheme(scheme).unwrap();
        assert_eq!(tree.theme(card), pinned);
    }

    tree.clear(preview).unwrap();
    assert_eq!(tree.theme(card), controller.current_bundle());
}

/// Test toggling a duotone pair between its tones
#[test]
fn test_duotone_toggle() {
    let controller = create_controller();
    controller.select_scheme(ColorScheme::StormyMorningLight).unwrap();
    let light = controller.current_bundle();

    let counterpart = controller.selection().scheme.counterpart().unwrap();
    controller.select_scheme(counterpart).unwrap();
    let dark = controller.current_bundle();

    assert_eq!(dark.color_scheme, ColorScheme::StormyMorningDark);
    assert_eq!(light.background_color, dark.foreground_color);
    assert_eq!(light.foreground_color, dark.background_color);
    assert_eq!(light.accent_color, Color::hex(0x4A7A9C));
    assert_eq!(dark.accent_color, Color::hex(0x7FA7C4));
}

/// Test ambient access for code below a tree node
#[test]
fn test_ambient_scope_from_tree() {
    let controller = create_controller();
    controller.select_kind(StyleKind::Skeuomorphic).unwrap();
    let tree = controller.tree();
    let panel = tree.add_child(tree.root()).unwrap();

    let level = ambient::with_theme(tree.theme(panel), || ambient::current().log_level_color("error"));
    assert_eq!(level, controller.current_bundle().error_color);
    assert_eq!(ambient::current(), TokenBundle::default());
}

/// Test a custom brand style with per-scheme variants
#[test]
fn test_custom_brand_style() {
    let controller = create_controller();
    let brand = CustomStyle::tinted(StyleKind::LiquidGlass, Color::hex(0x00A86B));
    controller.registry().register_provider("brand", Arc::new(brand));

    assert!(controller.use_custom_style(Some("brand")).unwrap());
    controller.select_scheme(ColorScheme::LavenderDuskDark).unwrap();

    let bundle = controller.current_bundle();
    assert_eq!(bundle.accent_color, Color::hex(0x00A86B));
    assert_eq!(bundle.color_scheme, ColorScheme::LavenderDuskDark);
    assert_eq!(bundle.corner_radius, 20.0);

    // Built-in resolution is untouched by the registration
    assert_eq!(
        controller.registry().resolve(StyleKind::LiquidGlass, ColorScheme::LavenderDuskDark),
        ThemeSelection::new(StyleKind::LiquidGlass, ColorScheme::LavenderDuskDark).resolve()
    );
}

/// Test a save from another handle reaches a watching controller
#[tokio::test]
async fn test_external_save_reaches_watching_controller() {
    let controller = create_controller();
    let tree = controller.tree();
    let leaf = tree.add_child(tree.root()).unwrap();
    let mut watcher = tree.watch(leaf).unwrap();
    let _handle = controller.watch_store().unwrap();

    let settings = SelectionStore::with_default_keys(Arc::clone(controller.store().kv())).unwrap();
    let selection = ThemeSelection::new(StyleKind::Minimal, ColorScheme::HighContrast);
    settings.save(&selection).unwrap();

    let changed = tokio::time::timeout(Duration::from_secs(5), watcher.changed()).await.unwrap();
    assert!(changed);
    assert_eq!(watcher.current(), selection.resolve());
    assert_eq!(controller.selection(), selection);
}

/// Test a restarted controller comes back with the last selection
#[test]
fn test_controller_restart_restores_theme() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("prefs").to_string_lossy().to_string();
    let selection = ThemeSelection::new(StyleKind::LiquidGlass, ColorScheme::MintLagoonDark);

    {
        let kv = Arc::new(KvStore::new(KvConfig::new(&path)).unwrap());
        let controller = ThemeController::open(kv, Arc::new(StyleRegistry::new()), ControllerConfig::default()).unwrap();
        controller.select(selection).unwrap();
    }

    let kv = Arc::new(KvStore::new(KvConfig::new(&path)).unwrap());
    let controller = ThemeController::open(kv, Arc::new(StyleRegistry::new()), ControllerConfig::default()).unwrap();
    assert_eq!(controller.selection(), selection);
    assert_eq!(controller.current_bundle(), selection.resolve());
}
