/// Capability classification for typed node queries.
///
/// Each node lands in exactly one category: the first entry of
/// `CLASSIFICATION_ORDER` whose capability the node carries. A camera with a
/// `Trs` is a Camera, a prop with a `Trs` is a Prop, a node with nothing is a Group.

use super::components::{Camera, Light, Prop, Trs};
use super::node::Node;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeCategory {
    Camera,
    Light,
    Prop,
    Transformed,
    Group,
}

/// Order in which capabilities are tested, first match wins
pub const CLASSIFICATION_ORDER: [NodeCategory; 5] = [
    NodeCategory::Camera,
    NodeCategory::Light,
    NodeCategory::Prop,
    NodeCategory::Transformed,
    NodeCategory::Group,
];

impl NodeCategory {
    pub const COUNT: usize = CLASSIFICATION_ORDER.len();

    /// Dense index, used to address cache buckets
    pub fn index(self) -> usize {
        self as usize
    }

    /// Whether `node` carries this category's capability
    pub fn matches(self, node: &Node) -> bool {
        match self {
            NodeCategory::Camera => node.as_camera().is_some(),
            NodeCategory::Light => node.as_light().is_some(),
            NodeCategory::Prop => node.as_prop().is_some(),
            NodeCategory::Transformed => node.as_trs().is_some(),
            NodeCategory::Group => true,
        }
    }

    /// The single category `node` belongs to
    pub fn classify(node: &Node) -> NodeCategory {
        CLASSIFICATION_ORDER
            .iter()
            .copied()
            .find(|category| category.matches(node))
            .unwrap_or(NodeCategory::Group)
    }
}

/// Marker for types usable with `Scene::get_all::<T>()`
pub trait NodeCapability {
    const CATEGORY: NodeCategory;
}

/// Query marker for nodes with no other capability
pub struct Group;

impl NodeCapability for Camera {
    const CATEGORY: NodeCategory = NodeCategory::Camera;
}

impl NodeCapability for Light {
    const CATEGORY: NodeCategory = NodeCategory::Light;
}

impl NodeCapability for Prop {
    const CATEGORY: NodeCategory = NodeCategory::Prop;
}

impl NodeCapability for Trs {
    const CATEGORY: NodeCategory = NodeCategory::Transformed;
}

impl NodeCapability for Group {
    const CATEGORY: NodeCategory = NodeCategory::Group;
}
