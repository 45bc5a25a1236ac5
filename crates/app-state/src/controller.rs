//! Theme controller
//!
//! The [`ThemeController`] is created once at the application root. It owns
//! the current [`ThemeSelection`], persists it through a [`SelectionStore`],
//! resolves it (built-in or custom) and provides the result at the root of a
//! [`ThemeTree`], from where every consumer observes it.
//!
//! Selections written by another handle on the same store (another window,
//! a settings process) are picked up by [`ThemeController::refresh`], or
//! continuously with [`ThemeController::watch_store`].

use crate::context::{ContextError, ThemeTree};
use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::RecvTimeoutError;
use std::sync::{Arc, Weak};
use std::thread::JoinHandle;
use std::time::Duration;
use storage::{KvError, KvStore, SelectionKeys, SelectionStore};
use style_core::{ColorScheme, StyleKind, StyleRegistry, ThemeSelection, TokenBundle};
use thiserror::Error;

/// Controller error types
#[derive(Debug, Error)]
pub enum ControllerError {
    /// Persisting or reading the selection failed
    #[error("Storage error: {0}")]
    Storage(#[from] KvError),

    /// Theme tree error
    #[error("Theme context error: {0}")]
    Context(#[from] ContextError),

    /// The store watcher thread could not be started
    #[error("Failed to start store watcher: {0}")]
    Watch(#[from] std::io::Error),
}

/// Result type for controller operations
pub type Result<T> = std::result::Result<T, ControllerError>;

/// Controller configuration
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    /// Key layout of the persisted selection
    pub keys: SelectionKeys,
    /// How often the store watcher checks for shutdown while idle
    pub watch_poll: Duration,
    /// Flush each saved selection to disk before returning
    pub flush_on_save: bool,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            keys: SelectionKeys::default(),
            watch_poll: Duration::from_millis(250),
            flush_on_save: true,
        }
    }
}

impl ControllerConfig {
    /// Set the key layout
    pub fn keys(mut self, keys: SelectionKeys) -> Self {
        self.keys = keys;
        self
    }

    /// Set the watcher poll interval
    pub fn watch_poll(mut self, poll: Duration) -> Self {
        self.watch_poll = poll;
        self
    }

    /// Enable or disable flushing on save
    pub fn flush_on_save(mut self, enabled: bool) -> Self {
        self.flush_on_save = enabled;
        self
    }
}

#[derive(Debug, Clone, Default)]
struct State {
    selection: ThemeSelection,
    custom_key: Option<String>,
}

/// Owner of the active theme
pub struct ThemeController {
    registry: Arc<StyleRegistry>,
    store: SelectionStore,
    tree: ThemeTree,
    state: RwLock<State>,
    config: ControllerConfig,
}

impl ThemeController {
    /// Open a controller on a key-value store
    ///
    /// The persisted selection is loaded (falling back to minimal / light)
    /// and is observable at the tree root immediately.
    pub fn open(kv: Arc<KvStore>, registry: Arc<StyleRegistry>, config: ControllerConfig) -> Result<Self> {
        let store = SelectionStore::new(kv, config.keys.clone())?.flush_on_save(config.flush_on_save);
        Ok(Self::new(store, registry, config))
    }

    /// Create a controller over an existing selection store
    pub fn new(store: SelectionStore, registry: Arc<StyleRegistry>, config: ControllerConfig) -> Self {
        let selection = store.load();
        let tree = ThemeTree::with_default(registry.resolve_or_custom(selection, None));

        tracing::info!(%selection, "Theme controller ready");

        Self {
            registry,
            store,
            tree,
            state: RwLock::new(State { selection, custom_key: None }),
            config,
        }
    }

    /// The theme tree rooted at this controller
    pub fn tree(&self) -> &ThemeTree {
        &self.tree
    }

    /// The style registry
    pub fn registry(&self) -> &Arc<StyleRegistry> {
        &self.registry
    }

    /// The selection store
    pub fn store(&self) -> &SelectionStore {
        &self.store
    }

    /// The active selection
    pub fn selection(&self) -> ThemeSelection {
        self.state.read().selection
    }

    /// The active custom style key, if one is in use
    pub fn custom_key(&self) -> Option<String> {
        self.state.read().custom_key.clone()
    }

    /// The bundle provided at the tree root
    pub fn current_bundle(&self) -> TokenBundle {
        self.tree.theme(self.tree.root())
    }

    /// Persist and apply a new selection
    ///
    /// The selection is applied even when saving fails; the storage error is
    /// still returned so the caller can surface it.
    pub fn select(&self, selection: ThemeSelection) -> Result<()> {
        let mut state = self.state.write();
        let saved = self.store.save(&selection);
        if let Err(e) = &saved {
            tracing::warn!(%selection, "Failed to persist theme selection: {}", e);
        }

        state.selection = selection;
        self.apply(&state)?;
        saved.map_err(ControllerError::from)
    }

    /// Change the style kind, keeping the scheme
    pub fn select_kind(&self, kind: StyleKind) -> Result<()> {
        let selection = self.selection().with_kind(kind);
        self.select(selection)
    }

    /// Change the color scheme, keeping the kind
    pub fn select_scheme(&self, scheme: ColorScheme) -> Result<()> {
        let selection = self.selection().with_scheme(scheme);
        self.select(selection)
    }

    /// Switch to the custom style under `key`, or back to built-ins with `None`
    ///
    /// Returns false, leaving the theme unchanged, when `key` is not
    /// registered. The custom key is not persisted.
    pub fn use_custom_style(&self, key: Option<&str>) -> Result<bool> {
        if let Some(key) = key {
            if !self.registry.contains(key) {
                tracing::warn!(key, "Unknown custom style");
                return Ok(false);
            }
        }

        let mut state = self.state.write();
        state.custom_key = key.map(str::to_string);
        self.apply(&state)?;
        Ok(true)
    }

    /// Re-read the persisted selection and apply it if it changed
    pub fn refresh(&self) -> Result<bool> {
        let mut state = self.state.write();
        let stored = self.store.load();
        if stored == state.selection {
            return Ok(false);
        }

        tracing::debug!(from = %state.selection, to = %stored, "Persisted theme changed");
        state.selection = stored;
        self.apply(&state)?;
        Ok(true)
    }

    /// Re-resolve the active selection, e.g. after the registry changed
    pub fn reapply(&self) -> Result<()> {
        let state = self.state.read();
        self.apply(&state)
    }

    /// Follow writes to the persisted selection on a background thread
    ///
    /// The watcher stops when the returned handle is dropped or when the
    /// controller itself is dropped.
    pub fn watch_store(self: &Arc<Self>) -> Result<WatchHandle> {
        let mut subscriber = self.store.watch();
        let controller: Weak<Self> = Arc::downgrade(self);
        let stop = Arc::new(AtomicBool::new(false));
        let poll = self.config.watch_poll;

        let flag = Arc::clone(&stop);
        let thread = std::thread::Builder::new()
            .name("theme-store-watch".to_string())
            .spawn(move || {
                while !flag.load(Ordering::Acquire) {
                    match subscriber.next_timeout(poll) {
                        Ok(_) => {
                            let Some(controller) = controller.upgrade() else { break };
                            if let Err(e) = controller.refresh() {
                                tracing::warn!("Failed to apply persisted theme: {}", e);
                            }
                        }
                        Err(RecvTimeoutError::Timeout) => {
                            if controller.strong_count() == 0 {
                                break;
                            }
                        }
                        Err(RecvTimeoutError::Disconnected) => break,
                    }
                }
                tracing::debug!("Theme store watcher stopped");
            })?;

        Ok(WatchHandle { stop, thread: Some(thread) })
    }

    fn apply(&self, state: &State) -> Result<()> {
        let bundle = self.registry.resolve_or_custom(state.selection, state.custom_key.as_deref());
        tracing::debug!(selection = %state.selection, custom = ?state.custom_key, "Applying theme");
        self.tree.provide(self.tree.root(), bundle)?;
        Ok(())
    }
}

impl std::fmt::Debug for ThemeController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.read();
        f.debug_struct("ThemeController")
            .field("selection", &state.selection)
            .field("custom_key", &state.custom_key)
            .field("tree", &self.tree)
            .finish()
    }
}

/// Handle to a running store watcher; stops it when dropped
#[derive(Debug)]
pub struct WatchHandle {
    stop: Arc<AtomicBool>,
    thread: Option<JoinHandle<()>>,
}

impl WatchHandle {
    /// Stop the watcher and wait for its thread to exit
    pub fn stop(mut self) {
        self.shutdown();
    }

    /// Whether the watcher thread is still running
    pub fn is_running(&self) -> bool {
        self.thread.as_ref().is_some_and(|thread| !thread.is_finished())
    }

    fn shutdown(&mut self) {
        self.stop.store(true, Ordering::Release);
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                tracing::error!("Theme store watcher panicked");
            }
        }
    }
}

impl Drop for WatchHandle {
    fn drop(&mut self) {
        self.shutdown();
    }
}
