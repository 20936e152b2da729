//! Scene graph module
//!
//! Node hierarchy (`NodeTree`), node capabilities, bounds, and the `Scene`
//! that serves typed node queries from an invalidating cache.

mod bounds;
mod cache;
mod capability;
mod components;
mod node;
mod tree;
mod scene;

pub use bounds::Bounds;
pub use capability::{NodeCapability, NodeCategory, Group, CLASSIFICATION_ORDER};
pub use components::{Trs, Prop, Camera, Light, LightKind};
pub use node::{Node, NodeKey};
pub use tree::NodeTree;
pub use scene::{Scene, SceneEdits};
