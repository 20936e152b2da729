/// Scene - a node hierarchy plus typed lookup caches.
///
/// The scene owns one `NodeTree` whose root is always present and always
/// enabled. Typed queries (`get_all::<Prop>()`, ...) are served from a cache
/// built by one full walk of the tree. Every structural or flag mutation goes
/// through `tree_mut()`, which drops the cache before handing out the tree, so
/// a populated cache always matches a fresh walk.

use std::cell::{Cell, OnceCell};
use glam::{Mat4, Vec3};
use rustc_hash::FxHashSet;
use crate::config::SceneConfig;
use crate::error::Result;
use crate::engine_bail;
use crate::preview::PreviewUi;
use super::bounds::Bounds;
use super::cache::TypedCache;
use super::capability::{NodeCapability, NodeCategory};
use super::node::{Node, NodeKey};
use super::tree::NodeTree;

/// Edits collected while drawing or traversing, applied afterwards
#[derive(Debug, Default)]
pub struct SceneEdits {
    pub enable: Vec<(NodeKey, bool)>,
    pub highlight: Vec<(NodeKey, bool)>,
    pub flatten: Vec<NodeKey>,
    pub remove: FxHashSet<NodeKey>,
}

impl SceneEdits {
    pub fn is_empty(&self) -> bool {
        self.enable.is_empty() && self.highlight.is_empty() && self.flatten.is_empty() && self.remove.is_empty()
    }
}

pub struct Scene {
    tree: NodeTree,
    config: SceneConfig,
    cache: OnceCell<TypedCache>,
    cache_rebuilds: Cell<u64>,
}

impl Scene {
    /// Take ownership of a finished hierarchy (importer output, procedural build, ...)
    pub fn new(tree: NodeTree) -> Self {
        Self::with_config(tree, SceneConfig::default())
    }

    pub fn with_config(mut tree: NodeTree, config: SceneConfig) -> Self {
        let root = tree.root();
        if let Some(node) = tree.get_mut(root) {
            node.set_enabled_flag(true);
        }
        Self {
            tree,
            config,
            cache: OnceCell::new(),
            cache_rebuilds: Cell::new(0),
        }
    }

    /// Empty scene with a root group named "Root"
    pub fn empty() -> Self {
        Self::new(NodeTree::with_root_name("Root"))
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn root(&self) -> NodeKey {
        self.tree.root()
    }

    /// Read-only view of the hierarchy
    pub fn tree(&self) -> &NodeTree {
        &self.tree
    }

    /// Mutable hierarchy; invalidates the typed cache
    ///
    /// Every mutator of `Scene` funnels through here. Kept inside the crate so
    /// the root can only be reached through the guarded mutators.
    pub(crate) fn tree_mut(&mut self) -> &mut NodeTree {
        self.cache.take();
        &mut self.tree
    }

    /// Give the hierarchy back, dropping the scene
    pub fn into_tree(self) -> NodeTree {
        self.tree
    }

    pub fn get(&self, key: NodeKey) -> Option<&Node> {
        self.tree.get(key)
    }

    /// Mutable node data; invalidates the typed cache (capabilities may change)
    pub fn get_mut(&mut self, key: NodeKey) -> Option<&mut Node> {
        self.tree_mut().get_mut(key)
    }

    // ===== TYPED QUERIES =====

    /// Every non-root node whose category is `T`'s
    ///
    /// Served from the cache; the first call after a mutation rebuilds it.
    pub fn get_all<T: NodeCapability>(&self) -> &[NodeKey] {
        self.typed_cache().all(T::CATEGORY)
    }

    /// Like `get_all`, limited to nodes whose ancestors are all enabled
    pub fn get_active<T: NodeCapability>(&self) -> &[NodeKey] {
        self.typed_cache().active(T::CATEGORY)
    }

    /// Nodes of `category`
    pub fn get_category(&self, category: NodeCategory) -> &[NodeKey] {
        self.typed_cache().all(category)
    }

    /// Whether the next typed query will walk the tree
    pub fn is_dirty(&self) -> bool {
        self.cache.get().is_none()
    }

    /// How many times the typed cache has been rebuilt
    pub fn cache_rebuild_count(&self) -> u64 {
        self.cache_rebuilds.get()
    }

    fn typed_cache(&self) -> &TypedCache {
        self.cache.get_or_init(|| {
            self.cache_rebuilds.set(self.cache_rebuilds.get() + 1);
            let cache = TypedCache::build(&self.tree);
            crate::engine_trace!("sandbox3d::Scene", "Rebuilt typed cache ({} nodes)", self.tree.len());
            cache
        })
    }

    // ===== STRUCTURE =====

    pub fn add_child(&mut self, parent: NodeKey, node: Node) -> Result<NodeKey> {
        self.tree_mut().add_child(parent, node)
    }

    pub fn attach(&mut self, parent: NodeKey, subtree: NodeTree) -> Result<NodeKey> {
        self.tree_mut().attach(parent, subtree)
    }

    pub fn release(&mut self, key: NodeKey) -> Result<NodeTree> {
        self.tree_mut().release(key)
    }

    pub fn remove(&mut self, key: NodeKey) -> Result<()> {
        self.tree_mut().remove(key)
    }

    pub fn remove_all<I>(&mut self, keys: I) -> usize
    where
        I: IntoIterator<Item = NodeKey>,
    {
        self.tree_mut().remove_all(keys)
    }

    pub fn transfer(&mut self, key: NodeKey, new_parent: NodeKey) -> Result<()> {
        self.tree_mut().transfer(key, new_parent)
    }

    pub fn delete_and_transfer_children(&mut self, key: NodeKey) -> Result<Vec<NodeKey>> {
        self.tree_mut().delete_and_transfer_children(key)
    }

    // ===== FLAGS =====

    /// Enable or disable `key` and its whole subtree
    ///
    /// # Errors
    ///
    /// Disabling the root is refused: the root is always enabled.
    pub fn set_enabled(&mut self, key: NodeKey, enabled: bool) -> Result<()> {
        if key == self.root() && !enabled {
            engine_bail!("sandbox3d::Scene", "The scene root cannot be disabled");
        }
        self.tree_mut().set_enabled(key, enabled)
    }

    pub fn enable(&mut self, key: NodeKey) -> Result<()> {
        self.set_enabled(key, true)
    }

    pub fn disable(&mut self, key: NodeKey) -> Result<()> {
        self.set_enabled(key, false)
    }

    pub fn set_highlighted(&mut self, key: NodeKey, highlighted: bool) -> Result<()> {
        self.tree_mut().set_highlighted(key, highlighted)
    }

    // ===== TRANSFORMS AND BOUNDS =====

    pub fn set_local_transform(&mut self, key: NodeKey, local: Mat4) -> Result<()> {
        let tree = self.tree_mut();
        tree.node(key)?;
        if let Some(node) = tree.get_mut(key) {
            node.set_local_transform(local);
        }
        Ok(())
    }

    pub fn global_transform(&self, key: NodeKey) -> Result<Mat4> {
        self.tree.global_transform(key)
    }

    /// World-space bounds of the whole scene (root transform applied)
    pub fn bounds(&self) -> Bounds {
        self.tree.bounds(self.root()).unwrap_or_default()
    }

    /// Normalize the content: center it at the origin, largest half-extent = `ideal_half_size`
    ///
    /// Overwrites the root transform with `scale * translate(-center)`, where
    /// center and extents come from the content without the root transform,
    /// so repeated calls give the same result. Returns false (and changes
    /// nothing) when the scene has no bounded content.
    pub fn fit_to_ideal_size(&mut self) -> bool {
        let root = self.root();
        let content = self.tree.local_bounds(root).unwrap_or_default();
        if content.is_empty() {
            crate::engine_debug!("sandbox3d::Scene", "Nothing to fit: scene has no bounded content");
            return false;
        }

        let largest = content.largest_half_extent();
        let scale = if largest > f32::EPSILON {
            self.config.ideal_half_size / largest
        } else {
            1.0
        };
        let fit = Mat4::from_scale(Vec3::splat(scale)) * Mat4::from_translation(-content.center());
        if let Some(node) = self.tree_mut().get_mut(root) {
            node.set_local_transform(fit);
        }
        crate::engine_debug!("sandbox3d::Scene", "Fitted scene (scale {:.4})", scale);
        true
    }

    // ===== UI =====

    /// Draw the hierarchy panel, then apply whatever the user asked for
    ///
    /// Drawing only reads the tree; clicks are staged into `SceneEdits` and
    /// applied once the traversal is over.
    pub fn draw_ui(&mut self, ui: &mut dyn PreviewUi) {
        let mut edits = SceneEdits::default();
        self.draw_outline(ui, &mut edits);
        self.apply_edits(edits);
    }

    /// Pre-order outline; `None` on the stack closes an open tree node
    fn draw_outline(&self, ui: &mut dyn PreviewUi, edits: &mut SceneEdits) {
        let mut stack = vec![Some(self.root())];
        while let Some(entry) = stack.pop() {
            let Some(key) = entry else {
                ui.tree_pop();
                continue;
            };
            if self.draw_node_ui(key, ui, edits) {
                stack.push(None);
                if let Some(node) = self.tree.get(key) {
                    stack.extend(node.children().iter().rev().map(|&child| Some(child)));
                }
            }
        }
    }

    /// Widgets of one outline row; returns whether its tree node is open
    fn draw_node_ui(&self, key: NodeKey, ui: &mut dyn PreviewUi, edits: &mut SceneEdits) -> bool {
        let Some(node) = self.tree.get(key) else { return false };
        let is_root = key == self.root();

        // Labels carry the key so same-named siblings stay distinct widgets
        let open = ui.tree_node(&format!("{}##{:?}", node.name(), key), node.children().is_empty());
        ui.label(&format!("{:?}", NodeCategory::classify(node)));

        let mut enabled = node.is_enabled();
        if !is_root && ui.checkbox(&format!("Enabled##{:?}", key), &mut enabled) {
            edits.enable.push((key, enabled));
        }
        let mut highlighted = node.is_highlighted();
        if ui.checkbox(&format!("Highlight##{:?}", key), &mut highlighted) {
            edits.highlight.push((key, highlighted));
        }
        if !is_root {
            if ui.button(&format!("Flatten##{:?}", key)) {
                edits.flatten.push(key);
            }
            if ui.button(&format!("Remove##{:?}", key)) {
                edits.remove.insert(key);
            }
        }
        open
    }

    /// Apply staged edits: flags first, then flattening, then removals
    ///
    /// Entries whose node is already gone are skipped.
    pub fn apply_edits(&mut self, edits: SceneEdits) {
        if edits.is_empty() {
            return;
        }
        let root = self.root();
        let tree = self.tree_mut();
        for (key, enabled) in edits.enable {
            if tree.contains(key) && (key != root || enabled) {
                let _ = tree.set_enabled(key, enabled);
            }
        }
        for (key, highlighted) in edits.highlight {
            if tree.contains(key) {
                let _ = tree.set_highlighted(key, highlighted);
            }
        }
        for key in edits.flatten {
            if tree.contains(key) && !edits.remove.contains(&key) {
                let _ = tree.delete_and_transfer_children(key);
            }
        }
        let removed = tree.remove_all(edits.remove);
        if removed > 0 {
            crate::engine_debug!("sandbox3d::Scene", "Removed {} subtree(s)", removed);
        }
    }
}

impl std::fmt::Debug for Scene {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scene")
            .field("tree", &self.tree)
            .field("dirty", &self.is_dirty())
            .finish()
    }
}

#[cfg(test)]
#[path = "scene_tests.rs"]
mod tests;
