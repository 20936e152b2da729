/// Typed node lists, rebuilt from a full tree walk.

use super::capability::NodeCategory;
use super::node::NodeKey;
use super::tree::NodeTree;

/// One bucket per category, for all nodes and for active (enabled) nodes
#[derive(Debug, Default)]
pub(crate) struct TypedCache {
    all: [Vec<NodeKey>; NodeCategory::COUNT],
    active: [Vec<NodeKey>; NodeCategory::COUNT],
}

impl TypedCache {
    /// Classify every descendant of the root in a single walk
    ///
    /// The root itself is the scene container and is not listed.
    pub(crate) fn build(tree: &NodeTree) -> Self {
        let mut cache = Self::default();
        let root = tree.root();
        // The root always exists, so the walk cannot fail
        let _ = tree.recursive_with_activity(root, |key, node, active| {
            if key == root {
                return;
            }
            let index = NodeCategory::classify(node).index();
            cache.all[index].push(key);
            if active {
                cache.active[index].push(key);
            }
        });
        cache
    }

    pub(crate) fn all(&self, category: NodeCategory) -> &[NodeKey] {
        &self.all[category.index()]
    }

    pub(crate) fn active(&self, category: NodeCategory) -> &[NodeKey] {
        &self.active[category.index()]
    }
}
