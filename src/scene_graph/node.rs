use glam::Vec2;
use id_arena::Id;

use crate::parts::Part;
use crate::scene_graph::scene::Scene;
use crate::scene_graph::transform::Transform;

pub type NodeId = Id<Node>;

pub struct Node {
    pub name: String,
    pub transform: Transform,
    pub part: Part,
    pub parent_id: Option<NodeId>,
    pub child_ids: Vec<NodeId>,
}

impl Node {
    pub fn new(name: impl Into<String>, part: Part) -> Self {
        Self {
            name: name.into(),
            transform: Transform::from_translation(Vec2::ZERO),
            part,
            parent_id: None,
            child_ids: Vec::new(),
        }
    }

    pub fn with_translation(mut self, translation: Vec2) -> Self {
        self.transform.set_translation(translation);
        self
    }

    pub fn parent<'a>(&self, scene: &'a Scene) -> Option<&'a Node> {
        self.parent_id.and_then(|id| scene.get_node(id))
    }
}
