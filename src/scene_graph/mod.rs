pub mod node;
pub mod scene;
pub mod transform;

pub use node::{Node, NodeId};
pub use scene::Scene;
pub use transform::Transform;
