//! Thread-local access to the theme in scope
//!
//! Rendering code often runs deep below the node that owns its bundle.
//! Instead of threading a `&TokenBundle` through every call, a caller enters
//! a scope and anything below reads [`current`].
//!
//! ```rust
//! use app_state::ambient;
//! use style_core::{ColorScheme, StyleKind, TokenBundle};
//!
//! let glass = TokenBundle::builtin(StyleKind::LiquidGlass, ColorScheme::Dark);
//! {
//!     let _scope = ambient::enter(glass.clone());
//!     assert_eq!(ambient::current(), glass);
//! }
//! assert_eq!(ambient::current(), TokenBundle::default());
//! ```

use std::cell::RefCell;
use std::marker::PhantomData;
use style_core::TokenBundle;

thread_local! {
    static SCOPES: RefCell<Vec<TokenBundle>> = const { RefCell::new(Vec::new()) };
}

/// Keeps a bundle in scope until dropped
///
/// Guards are tied to the thread that created them.
#[must_use = "the bundle leaves scope as soon as the guard is dropped"]
#[derive(Debug)]
pub struct ScopeGuard {
    depth: usize,
    _not_send: PhantomData<*const ()>,
}

impl Drop for ScopeGuard {
    fn drop(&mut self) {
        // Also pops scopes leaked by guards dropped out of order
        SCOPES.with(|scopes| scopes.borrow_mut().truncate(self.depth));
    }
}

/// Put `bundle` in scope for the current thread
pub fn enter(bundle: TokenBundle) -> ScopeGuard {
    let depth = SCOPES.with(|scopes| {
        let mut scopes = scopes.borrow_mut();
        let depth = scopes.len();
        scopes.push(bundle);
        depth
    });
    ScopeGuard { depth, _not_send: PhantomData }
}

/// The innermost bundle in scope, or the minimal / light default
pub fn current() -> TokenBundle {
    SCOPES.with(|scopes| scopes.borrow().last().cloned().unwrap_or_default())
}

/// Whether dark colors are in scope
pub fn is_dark() -> bool {
    SCOPES.with(|scopes| scopes.borrow().last().map(TokenBundle::is_dark).unwrap_or(false))
}

/// Number of nested scopes on this thread
pub fn depth() -> usize {
    SCOPES.with(|scopes| scopes.borrow().len())
}

/// Run `f` with `bundle` in scope
pub fn with_theme<R>(bundle: TokenBundle, f: impl FnOnce() -> R) -> R {
    let _scope = enter(bundle);
    f()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::ThemeTree;
    use style_core::{ColorScheme, StyleKind};

    #[test]
    fn test_default_when_nothing_entered() {
        assert_eq!(current(), TokenBundle::default());
        assert!(!is_dark());
        assert_eq!(depth(), 0);
    }

    #[test]
    fn test_nested_scopes() {
        let outer = TokenBundle::builtin(StyleKind::Minimal, ColorScheme::Dark);
        let inner = TokenBundle::builtin(StyleKind::Skeuomorphic, ColorScheme::PeachSkylineLight);

        let _a = enter(outer.clone());
        assert!(is_dark());
        {
            let _b = enter(inner.clone());
            assert_eq!(current(), inner);
            assert_eq!(depth(), 2);
        }
        assert_eq!(current(), outer);
    }

    #[test]
    fn test_out_of_order_drop() {
        let a = enter(TokenBundle::builtin(StyleKind::Minimal, ColorScheme::Dark));
        let b = enter(TokenBundle::builtin(StyleKind::LiquidGlass, ColorScheme::Vibrant));

        drop(a);
        assert_eq!(depth(), 0);
        drop(b);
        assert_eq!(current(), TokenBundle::default());
    }

    #[test]
    fn test_with_theme() {
        let glass = TokenBundle::builtin(StyleKind::LiquidGlass, ColorScheme::Light);
        let radius = with_theme(glass, || current().corner_radius);
        assert_eq!(radius, 20.0);
        assert_eq!(depth(), 0);
    }

    #[test]
    fn test_scopes_are_per_thread() {
        let _scope = enter(TokenBundle::builtin(StyleKind::Minimal, ColorScheme::Dark));

        let other = std::thread::spawn(current).join().unwrap();
        assert_eq!(other, TokenBundle::default());
    }

    #[test]
    fn test_enter_tree_scope() {
        let tree = ThemeTree::new();
        let panel = tree.add_child(tree.root()).unwrap();
        let ember = TokenBundle::builtin(StyleKind::Skeuomorphic, ColorScheme::EmberForestDark);
        tree.provide(panel, ember.clone()).unwrap();

        let _scope = tree.enter_scope(panel);
        assert_eq!(current(), ember);
    }
}
