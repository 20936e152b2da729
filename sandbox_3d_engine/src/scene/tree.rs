/// NodeTree - the owning node hierarchy.
///
/// Nodes live in a `SlotMap` arena; a node's membership in the arena is its
/// link to the owning tree. Each node records its parent key and its ordered
/// child keys, and the tree keeps both sides consistent: a non-root node
/// appears in exactly one child list, the one of its parent.
///
/// A detached subtree is itself a `NodeTree`. Moving a subtree from one tree
/// into another (`attach`, `release`) re-keys every node in it, so keys from
/// the source tree can never reach into the destination. Moves inside one
/// tree (`transfer`, `delete_and_transfer_children`) keep keys stable.

use std::collections::VecDeque;
use glam::Mat4;
use rustc_hash::{FxHashMap, FxHashSet};
use slotmap::SlotMap;
use crate::error::Result;
use crate::engine_err;
use super::bounds::Bounds;
use super::node::{Node, NodeKey};

pub struct NodeTree {
    nodes: SlotMap<NodeKey, Node>,
    root: NodeKey,
}

impl NodeTree {
    /// Create a tree whose root is `root`
    pub fn new(root: Node) -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(Self::detached(root));
        Self { nodes, root }
    }

    /// Create a tree with an empty group as root
    pub fn with_root_name(name: impl Into<String>) -> Self {
        Self::new(Node::group(name))
    }

    pub fn root(&self) -> NodeKey {
        self.root
    }

    /// Number of nodes, root included
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: a tree has at least its root
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, key: NodeKey) -> bool {
        self.nodes.contains_key(key)
    }

    pub fn get(&self, key: NodeKey) -> Option<&Node> {
        self.nodes.get(key)
    }

    /// Mutable access to a node's data (not its place in the hierarchy)
    pub fn get_mut(&mut self, key: NodeKey) -> Option<&mut Node> {
        self.nodes.get_mut(key)
    }

    /// Like `get`, but an unknown key is an error
    pub fn node(&self, key: NodeKey) -> Result<&Node> {
        self.nodes.get(key).ok_or_else(|| engine_err!(InvalidNode => "sandbox3d::NodeTree",
            "Node {:?} is not part of this tree", key))
    }

    pub fn keys(&self) -> impl Iterator<Item = NodeKey> + '_ {
        self.nodes.keys()
    }

    // ===== STRUCTURE =====

    /// Take ownership of `node` as the last child of `parent`
    pub fn add_child(&mut self, parent: NodeKey, node: Node) -> Result<NodeKey> {
        self.node(parent)?;
        let mut node = Self::detached(node);
        node.parent = Some(parent);
        let key = self.nodes.insert(node);
        self.children_of_mut(parent).push(key);
        Ok(key)
    }

    /// Move every node of `subtree` under `parent`, returning the new key of its root
    ///
    /// The subtree is consumed; its keys are meaningless in this tree.
    pub fn attach(&mut self, parent: NodeKey, mut subtree: NodeTree) -> Result<NodeKey> {
        self.node(parent)?;
        let count = subtree.len();
        let key = Self::move_subtree(&mut subtree.nodes, subtree.root, &mut self.nodes, Some(parent));
        crate::engine_debug!("sandbox3d::NodeTree", "Attached {} node(s) under '{}'",
            count, self.nodes[parent].name());
        Ok(key)
    }

    /// Detach `key` and its descendants, handing them back as their own tree
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown key or for the root, which has no parent to detach from.
    pub fn release(&mut self, key: NodeKey) -> Result<NodeTree> {
        let parent = self.parent_for_edit(key, "release")?;
        self.children_of_mut(parent).retain(|&child| child != key);

        let mut nodes = SlotMap::with_key();
        let root = Self::move_subtree(&mut self.nodes, key, &mut nodes, None);
        let released = NodeTree { nodes, root };
        crate::engine_debug!("sandbox3d::NodeTree", "Released '{}' ({} node(s))",
            released.nodes[root].name(), released.len());
        Ok(released)
    }

    /// Detach `key` and drop it with its whole subtree
    pub fn remove(&mut self, key: NodeKey) -> Result<()> {
        self.release(key).map(drop)
    }

    /// Remove a staged set of nodes
    ///
    /// Duplicates are ignored, as are keys already removed as part of an
    /// earlier entry's subtree. The root is never removed. Returns the number
    /// of subtrees actually removed.
    pub fn remove_all<I>(&mut self, keys: I) -> usize
    where
        I: IntoIterator<Item = NodeKey>,
    {
        let mut seen = FxHashSet::default();
        let mut removed = 0;
        for key in keys {
            if !seen.insert(key) || !self.contains(key) {
                continue;
            }
            if key == self.root {
                crate::engine_warn!("sandbox3d::NodeTree", "Ignoring request to remove the root node");
                continue;
            }
            if self.remove(key).is_ok() {
                removed += 1;
            }
        }
        removed
    }

    /// Re-parent `key` as the last child of `new_parent` within this tree
    ///
    /// # Errors
    ///
    /// Fails for unknown keys, for the root, and when `new_parent` is `key`
    /// itself or one of its descendants (the move would create a cycle).
    pub fn transfer(&mut self, key: NodeKey, new_parent: NodeKey) -> Result<()> {
        let old_parent = self.parent_for_edit(key, "transfer")?;
        self.node(new_parent)?;
        if self.is_ancestor_or_self(key, new_parent) {
            return Err(engine_err!(InvalidOperation => "sandbox3d::NodeTree",
                "Cannot move '{}' under itself or one of its descendants", self.nodes[key].name()));
        }

        self.children_of_mut(old_parent).retain(|&child| child != key);
        self.children_of_mut(new_parent).push(key);
        if let Some(node) = self.nodes.get_mut(key) {
            node.parent = Some(new_parent);
        }
        crate::engine_debug!("sandbox3d::NodeTree", "Moved '{}' under '{}'",
            self.nodes[key].name(), self.nodes[new_parent].name());
        Ok(())
    }

    /// Remove `key`, splicing its children into its parent at its position
    ///
    /// Children keep their keys and local transforms. Returns them in order.
    ///
    /// # Errors
    ///
    /// Fails for the root: its children would be left without an owner.
    pub fn delete_and_transfer_children(&mut self, key: NodeKey) -> Result<Vec<NodeKey>> {
        let parent = self.parent_for_edit(key, "flatten")?;
        let Some(mut node) = self.nodes.remove(key) else {
            return Ok(Vec::new());
        };
        let children = std::mem::take(&mut node.children);
        for &child in &children {
            if let Some(child_node) = self.nodes.get_mut(child) {
                child_node.parent = Some(parent);
            }
        }

        let siblings = self.children_of_mut(parent);
        let position = siblings.iter().position(|&k| k == key).unwrap_or(siblings.len());
        siblings.splice(position..(position + 1).min(siblings.len()), children.iter().copied());

        crate::engine_debug!("sandbox3d::NodeTree", "Flattened '{}' ({} child(ren) moved up)",
            node.name(), children.len());
        Ok(children)
    }

    // ===== FLAGS =====

    /// Set the enabled flag of `key` and every descendant
    pub fn set_enabled(&mut self, key: NodeKey, enabled: bool) -> Result<()> {
        for k in self.descendants(key)? {
            if let Some(node) = self.nodes.get_mut(k) {
                node.set_enabled_flag(enabled);
            }
        }
        Ok(())
    }

    /// Set the highlighted flag of `key` and every descendant
    pub fn set_highlighted(&mut self, key: NodeKey, highlighted: bool) -> Result<()> {
        for k in self.descendants(key)? {
            if let Some(node) = self.nodes.get_mut(k) {
                node.set_highlighted_flag(highlighted);
            }
        }
        Ok(())
    }

    /// Whether `key` and all of its ancestors are enabled
    pub fn is_active(&self, key: NodeKey) -> bool {
        let mut current = Some(key);
        while let Some(k) = current {
            match self.nodes.get(k) {
                Some(node) if node.is_enabled() => current = node.parent,
                _ => return false,
            }
        }
        true
    }

    // ===== TRAVERSAL =====

    /// Visit `key`'s subtree post-order (children first, then the node)
    ///
    /// Traversal is read-only: collect keys during the visit and apply
    /// structural edits afterwards (see `remove_all`).
    pub fn recursive<F>(&self, key: NodeKey, mut visit: F) -> Result<()>
    where
        F: FnMut(NodeKey, &Node),
    {
        self.recursive_with_activity(key, |k, node, _| visit(k, node))
    }

    /// Like `recursive`, also passing whether each node is active
    ///
    /// Activity is inherited down the walk, so the whole visit is linear in
    /// the subtree size.
    pub fn recursive_with_activity<F>(&self, key: NodeKey, mut visit: F) -> Result<()>
    where
        F: FnMut(NodeKey, &Node, bool),
    {
        let node = self.node(key)?;
        let inherited = node.parent.map_or(true, |parent| self.is_active(parent));
        // (key, active, children already pushed)
        let mut stack = vec![(key, inherited && node.is_enabled(), false)];
        while let Some((k, active, expanded)) = stack.pop() {
            let Some(node) = self.nodes.get(k) else { continue };
            if expanded {
                visit(k, node, active);
                continue;
            }
            stack.push((k, active, true));
            stack.extend(node.children.iter().rev().map(|&child| {
                let child_active = active && self.nodes.get(child).is_some_and(|c| c.is_enabled());
                (child, child_active, false)
            }));
        }
        Ok(())
    }

    /// `key` followed by all of its descendants, pre-order
    pub fn descendants(&self, key: NodeKey) -> Result<Vec<NodeKey>> {
        self.node(key)?;
        let mut out = Vec::new();
        let mut stack = vec![key];
        while let Some(k) = stack.pop() {
            out.push(k);
            if let Some(node) = self.nodes.get(k) {
                stack.extend(node.children.iter().rev());
            }
        }
        Ok(out)
    }

    /// Active nodes in pre-order; a disabled node hides its whole subtree
    pub fn enabled_nodes(&self) -> Vec<NodeKey> {
        let mut out = Vec::new();
        let mut stack = vec![self.root];
        while let Some(k) = stack.pop() {
            if let Some(node) = self.nodes.get(k) {
                if node.is_enabled() {
                    out.push(k);
                    stack.extend(node.children.iter().rev());
                }
            }
        }
        out
    }

    /// First node named `name`, pre-order from the root
    pub fn find_by_name(&self, name: &str) -> Option<NodeKey> {
        self.descendants(self.root)
            .ok()?
            .into_iter()
            .find(|&k| self.nodes[k].name() == name)
    }

    /// Number of edges between `key` and the root
    pub fn depth(&self, key: NodeKey) -> Result<usize> {
        Ok(self.path_to_root(key)?.len() - 1)
    }

    /// `key`, its parent, ..., the root
    pub fn path_to_root(&self, key: NodeKey) -> Result<Vec<NodeKey>> {
        self.node(key)?;
        let mut path = vec![key];
        let mut current = self.nodes[key].parent;
        while let Some(k) = current {
            path.push(k);
            current = self.nodes.get(k).and_then(|n| n.parent);
        }
        Ok(path)
    }

    // ===== TRANSFORMS AND BOUNDS =====

    /// Global transform: product of local transforms from the root down to `key`
    ///
    /// Not cached; parents multiply on the left.
    pub fn global_transform(&self, key: NodeKey) -> Result<Mat4> {
        let path = self.path_to_root(key)?;
        Ok(path
            .iter()
            .rev()
            .fold(Mat4::IDENTITY, |acc, &k| acc * self.nodes[k].local_transform()))
    }

    /// Bounds of `key`'s content in its own space (own local transform not applied)
    ///
    /// Union of the node's prop bounds and of each child's `bounds`.
    pub fn local_bounds(&self, key: NodeKey) -> Result<Bounds> {
        // Parent-space bounds of visited children, consumed by their parent
        let mut child_bounds: FxHashMap<NodeKey, Bounds> = FxHashMap::default();
        let mut local = Bounds::default();
        self.recursive(key, |k, node| {
            let mut content = node.as_prop().map(|p| p.bounds).unwrap_or_default();
            for child in &node.children {
                if let Some(bounds) = child_bounds.remove(child) {
                    content = content.union(bounds);
                }
            }
            if k == key {
                local = content;
            } else {
                child_bounds.insert(k, content.transformed(&node.local_transform()));
            }
        })?;
        Ok(local)
    }

    /// Bounds of `key`'s subtree in its parent's space
    pub fn bounds(&self, key: NodeKey) -> Result<Bounds> {
        let local = self.node(key)?.local_transform();
        Ok(self.local_bounds(key)?.transformed(&local))
    }

    /// Bounds of `key`'s subtree in world space
    pub fn world_bounds(&self, key: NodeKey) -> Result<Bounds> {
        let global = self.global_transform(key)?;
        Ok(self.local_bounds(key)?.transformed(&global))
    }

    // ===== INTERNALS =====

    /// Strip any hierarchy links a node may still carry
    fn detached(mut node: Node) -> Node {
        node.parent = None;
        node.children.clear();
        node
    }

    fn children_of_mut(&mut self, key: NodeKey) -> &mut Vec<NodeKey> {
        &mut self.nodes[key].children
    }

    /// Parent of a node about to be moved or removed
    fn parent_for_edit(&self, key: NodeKey, action: &str) -> Result<NodeKey> {
        let node = self.node(key)?;
        node.parent.ok_or_else(|| engine_err!(InvalidOperation => "sandbox3d::NodeTree",
            "Cannot {} the root node '{}'", action, node.name()))
    }

    /// Whether `ancestor` lies on the path from `key` to the root
    fn is_ancestor_or_self(&self, ancestor: NodeKey, key: NodeKey) -> bool {
        let mut current = Some(key);
        while let Some(k) = current {
            if k == ancestor {
                return true;
            }
            current = self.nodes.get(k).and_then(|n| n.parent);
        }
        false
    }

    /// Move the subtree rooted at `root` from `src` into `dst`
    ///
    /// Breadth-first, so each new child list is rebuilt in its original order.
    fn move_subtree(
        src: &mut SlotMap<NodeKey, Node>,
        root: NodeKey,
        dst: &mut SlotMap<NodeKey, Node>,
        dst_parent: Option<NodeKey>,
    ) -> NodeKey {
        let mut new_root = None;
        let mut queue = VecDeque::from([(root, dst_parent)]);
        while let Some((old_key, parent)) = queue.pop_front() {
            let Some(mut node) = src.remove(old_key) else { continue };
            let old_children = std::mem::take(&mut node.children);
            node.parent = parent;
            let new_key = dst.insert(node);
            if let Some(parent_node) = parent.and_then(|p| dst.get_mut(p)) {
                parent_node.children.push(new_key);
            }
            new_root.get_or_insert(new_key);
            queue.extend(old_children.into_iter().map(|child| (child, Some(new_key))));
        }
        new_root.unwrap_or_default()
    }
}

impl std::fmt::Debug for NodeTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NodeTree")
            .field("root", &self.nodes.get(self.root).map(|n| n.name()))
            .field("len", &self.nodes.len())
            .finish()
    }
}

#[cfg(test)]
#[path = "tree_tests.rs"]
mod tests;
