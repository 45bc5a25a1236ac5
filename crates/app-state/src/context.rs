//! Tree-scoped theme propagation
//!
//! A [`ThemeTree`] mirrors the host's composition tree. Any node may provide
//! a [`TokenBundle`]; every descendant that does not provide its own observes
//! it. Consumers hold a [`ThemeWatcher`] on their node and are notified when
//! the effective bundle changes, whether through a new value at an ancestor,
//! a cleared override, or the node being moved.
//!
//! With nothing provided anywhere, every node observes the tree's default
//! bundle (minimal / light unless configured otherwise).

use parking_lot::RwLock;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use style_core::TokenBundle;
use thiserror::Error;
use tokio::sync::watch;

/// Theme context error types
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContextError {
    /// Node is not (or no longer) part of the tree
    #[error("Unknown node: {0}")]
    UnknownNode(NodeId),

    /// The root cannot be removed or moved
    #[error("The root node cannot be removed or moved")]
    RootRemoval,

    /// Moving a node under its own descendant
    #[error("Moving {node} under {parent} would create a cycle")]
    Cycle {
        /// Node being moved
        node: NodeId,
        /// Requested parent
        parent: NodeId,
    },
}

/// Result type for theme context operations
pub type Result<T> = std::result::Result<T, ContextError>;

/// Identifier of a node in a [`ThemeTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

struct Node {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    provided: Option<TokenBundle>,
    effective: watch::Sender<TokenBundle>,
}

struct Tree {
    nodes: HashMap<NodeId, Node>,
    root: NodeId,
    next_id: u64,
    default: TokenBundle,
}

impl Tree {
    fn node(&self, id: NodeId) -> Result<&Node> {
        self.nodes.get(&id).ok_or(ContextError::UnknownNode(id))
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut Node> {
        self.nodes.get_mut(&id).ok_or(ContextError::UnknownNode(id))
    }

    fn inherited(&self, id: NodeId) -> TokenBundle {
        self.nodes
            .get(&id)
            .and_then(|node| node.parent)
            .and_then(|parent| self.nodes.get(&parent))
            .map(|parent| parent.effective.borrow().clone())
            .unwrap_or_else(|| self.default.clone())
    }

    /// Recompute effective bundles from `start` down, stopping at nodes that
    /// provide their own bundle
    fn propagate(&mut self, start: NodeId) {
        let mut stack = vec![start];
        let mut notified = 0usize;

        while let Some(id) = stack.pop() {
            let value = match self.nodes.get(&id) {
                Some(node) => match &node.provided {
                    Some(bundle) => bundle.clone(),
                    None => self.inherited(id),
                },
                None => continue,
            };

            let Some(node) = self.nodes.get(&id) else { continue };
            let changed = node.effective.send_if_modified(|current| {
                if *current == value {
                    false
                } else {
                    *current = value;
                    true
                }
            });
            if changed {
                notified += 1;
            }

            stack.extend(
                node.children
                    .iter()
                    .copied()
                    .filter(|child| self.nodes.get(child).is_some_and(|c| c.provided.is_none())),
            );
        }

        tracing::debug!(start = %start, notified, "Propagated theme");
    }

    fn is_ancestor(&self, ancestor: NodeId, mut id: NodeId) -> bool {
        while let Some(parent) = self.nodes.get(&id).and_then(|node| node.parent) {
            if parent == ancestor {
                return true;
            }
            id = parent;
        }
        false
    }

    fn detach(&mut self, id: NodeId) {
        if let Some(parent) = self.nodes.get(&id).and_then(|node| node.parent) {
            if let Some(parent) = self.nodes.get_mut(&parent) {
                parent.children.retain(|child| *child != id);
            }
        }
    }
}

/// A composition tree carrying inherited theme bundles
///
/// Cloning yields another handle to the same tree.
#[derive(Clone)]
pub struct ThemeTree {
    inner: Arc<RwLock<Tree>>,
}

impl Default for ThemeTree {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ThemeTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tree = self.inner.read();
        f.debug_struct("ThemeTree")
            .field("root", &tree.root)
            .field("nodes", &tree.nodes.len())
            .finish()
    }
}

impl ThemeTree {
    /// Create a tree whose fallback is the minimal / light bundle
    pub fn new() -> Self {
        Self::with_default(TokenBundle::default())
    }

    /// Create a tree with a custom fallback bundle
    pub fn with_default(default: TokenBundle) -> Self {
        let root = NodeId(0);
        let (effective, _) = watch::channel(default.clone());
        let mut nodes = HashMap::new();
        nodes.insert(root, Node { parent: None, children: Vec::new(), provided: None, effective });

        Self { inner: Arc::new(RwLock::new(Tree { nodes, root, next_id: 1, default })) }
    }

    /// The root node
    pub fn root(&self) -> NodeId {
        self.inner.read().root
    }

    /// Number of live nodes, root included
    pub fn len(&self) -> usize {
        self.inner.read().nodes.len()
    }

    /// Always false: the root cannot be removed
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Whether `id` is part of the tree
    pub fn contains(&self, id: NodeId) -> bool {
        self.inner.read().nodes.contains_key(&id)
    }

    /// The parent of a node (`None` for the root)
    pub fn parent(&self, id: NodeId) -> Result<Option<NodeId>> {
        Ok(self.inner.read().node(id)?.parent)
    }

    /// Add a node under `parent`; it inherits the parent's bundle
    pub fn add_child(&self, parent: NodeId) -> Result<NodeId> {
        let mut tree = self.inner.write();
        let inherited = tree.node(parent)?.effective.borrow().clone();

        let id = NodeId(tree.next_id);
        tree.next_id += 1;

        let (effective, _) = watch::channel(inherited);
        tree.nodes.insert(
            id,
            Node { parent: Some(parent), children: Vec::new(), provided: None, effective },
        );
        tree.node_mut(parent)?.children.push(id);
        Ok(id)
    }

    /// Provide a bundle at `id` for its whole subtree
    pub fn provide(&self, id: NodeId, bundle: TokenBundle) -> Result<()> {
        let mut tree = self.inner.write();
        tree.node_mut(id)?.provided = Some(bundle);
        tree.propagate(id);
        Ok(())
    }

    /// Stop providing at `id`; the subtree inherits from above again
    pub fn clear(&self, id: NodeId) -> Result<()> {
        let mut tree = self.inner.write();
        if tree.node_mut(id)?.provided.take().is_some() {
            tree.propagate(id);
        }
        Ok(())
    }

    /// The bundle provided at exactly this node, if any
    pub fn provided(&self, id: NodeId) -> Result<Option<TokenBundle>> {
        Ok(self.inner.read().node(id)?.provided.clone())
    }

    /// Remove a node and its subtree
    ///
    /// Watchers on removed nodes keep their last value and stop receiving
    /// updates.
    pub fn remove(&self, id: NodeId) -> Result<()> {
        let mut tree = self.inner.write();
        if id == tree.root {
            return Err(ContextError::RootRemoval);
        }
        tree.node(id)?;
        tree.detach(id);

        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if let Some(node) = tree.nodes.remove(&current) {
                stack.extend(node.children);
            }
        }
        Ok(())
    }

    /// Re-attach a node (and its subtree) under a new parent
    pub fn move_node(&self, id: NodeId, new_parent: NodeId) -> Result<()> {
        let mut tree = self.inner.write();
        if id == tree.root {
            return Err(ContextError::RootRemoval);
        }
        tree.node(id)?;
        tree.node(new_parent)?;
        if id == new_parent || tree.is_ancestor(id, new_parent) {
            return Err(ContextError::Cycle { node: id, parent: new_parent });
        }

        tree.detach(id);
        tree.node_mut(id)?.parent = Some(new_parent);
        tree.node_mut(new_parent)?.children.push(id);
        tree.propagate(id);
        Ok(())
    }

    /// The effective bundle at a node
    ///
    /// Unknown nodes observe the tree default; theming never blocks a read.
    pub fn theme(&self, id: NodeId) -> TokenBundle {
        let tree = self.inner.read();
        match tree.nodes.get(&id) {
            Some(node) => node.effective.borrow().clone(),
            None => {
                tracing::warn!(node = %id, "Theme read on unknown node, using default");
                tree.default.clone()
            }
        }
    }

    /// Subscribe to the effective bundle at a node
    pub fn watch(&self, id: NodeId) -> Result<ThemeWatcher> {
        let tree = self.inner.read();
        Ok(ThemeWatcher { rx: tree.node(id)?.effective.subscribe() })
    }

    /// Make the effective bundle at `id` ambient for the current thread
    /// until the returned guard is dropped
    pub fn enter_scope(&self, id: NodeId) -> crate::ambient::ScopeGuard {
        crate::ambient::enter(self.theme(id))
    }
}

/// Read access to the effective bundle of one node, with change notification
#[derive(Debug, Clone)]
pub struct ThemeWatcher {
    rx: watch::Receiver<TokenBundle>,
}

impl ThemeWatcher {
    /// The current effective bundle
    pub fn current(&self) -> TokenBundle {
        self.rx.borrow().clone()
    }

    /// The current bundle, marking it as seen
    pub fn current_and_mark_seen(&mut self) -> TokenBundle {
        self.rx.borrow_and_update().clone()
    }

    /// Whether the bundle changed since it was last seen
    ///
    /// Returns false once the node has been removed.
    pub fn has_changed(&self) -> bool {
        self.rx.has_changed().unwrap_or(false)
    }

    /// Wait for the next change
    ///
    /// Returns false if the node was removed instead.
    pub async fn changed(&mut self) -> bool {
        self.rx.changed().await.is_ok()
    }
}
