use glam::{Affine2, Vec2};
use id_arena::Arena;

use crate::painting::painter::Painter;
use crate::parts::interaction::{Interaction, Reply};
use crate::scene_graph::node::{Node, NodeId};
use crate::scene_graph::transform::Transform;

pub struct Scene {
    pub nodes: Arena<Node>,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            nodes: Arena::new(),
        }
    }

    pub fn add_node(&mut self, node: Node) -> NodeId {
        self.nodes.alloc(node)
    }

    /// Allocates `node` and attaches it under `parent` in one step.
    pub fn add_child(&mut self, parent_id: NodeId, node: Node) -> NodeId {
        let node_id = self.add_node(node);
        self.set_node_parent(node_id, Some(parent_id));
        node_id
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 0
    }

    pub fn get_node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn get_node_by_name(&self, name: &str) -> Option<NodeId> {
        self.nodes
            .iter()
            .find(|(_, node)| node.name == name)
            .map(|(id, _)| id)
    }

    pub fn root_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes
            .iter()
            .filter(|(_, node)| node.parent_id.is_none())
            .map(|(id, _)| id)
    }

    /// All nodes below `node_id`, depth-first with parents before children.
    pub fn descendants(&self, node_id: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();

        if let Some(node) = self.nodes.get(node_id) {
            for &child_id in &node.child_ids {
                result.push(child_id);
                result.extend(self.descendants(child_id));
            }
        }

        result
    }

    /// Every node in the order it is painted: roots in insertion order, each followed by
    /// its subtree.
    pub fn paint_order(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.nodes.len());

        for root_id in self.root_ids() {
            order.push(root_id);
            order.extend(self.descendants(root_id));
        }

        order
    }

    /// Updates all node transforms in hierarchical order
    fn update_transforms(&self) {
        for root_id in self.root_ids() {
            self.update_node_transform_recursive(root_id, Affine2::IDENTITY);
        }
    }

    /// Recursively updates a node's world transform and its children
    fn update_node_transform_recursive(&self, node_id: NodeId, parent_world_matrix: Affine2) {
        if let Some(node) = self.nodes.get(node_id) {
            if node.transform.is_world_dirty() {
                let local_matrix = *node.transform.get_local_matrix();
                node.transform
                    .set_world_matrix(parent_world_matrix * local_matrix);
            }

            let world_matrix = *node.transform.get_world_matrix();
            for &child_id in &node.child_ids {
                self.update_node_transform_recursive(child_id, world_matrix);
            }
        }
    }

    /// Invalidates world transforms for a node and all its descendants
    pub fn invalidate_node_hierarchy(&self, node_id: NodeId) {
        if let Some(node) = self.nodes.get(node_id) {
            node.transform.invalidate_world();

            for &child_id in &node.child_ids {
                self.invalidate_node_hierarchy(child_id);
            }
        }
    }

    /// Sets the parent of a node and updates child relationships
    pub fn set_node_parent(&mut self, child_id: NodeId, new_parent_id: Option<NodeId>) {
        if let Some(child) = self.nodes.get(child_id) {
            if let Some(old_parent_id) = child.parent_id {
                if let Some(old_parent) = self.nodes.get_mut(old_parent_id) {
                    old_parent.child_ids.retain(|&id| id != child_id);
                }
            }
        }

        if let Some(child) = self.nodes.get_mut(child_id) {
            child.parent_id = new_parent_id;

            if let Some(new_parent_id) = new_parent_id {
                if let Some(new_parent) = self.nodes.get_mut(new_parent_id) {
                    new_parent.child_ids.push(child_id);
                }
            }
        }

        self.invalidate_node_hierarchy(child_id);
    }

    pub fn set_node_rotation(&mut self, node_id: NodeId, rotation: f32) {
        if let Some(node) = self.nodes.get_mut(node_id) {
            node.transform.set_rotation(rotation);
        }
        self.invalidate_node_hierarchy(node_id);
    }

    pub fn set_node_scale(&mut self, node_id: NodeId, scale: f32) {
        if let Some(node) = self.nodes.get_mut(node_id) {
            node.transform.set_scale(scale);
        }
        self.invalidate_node_hierarchy(node_id);
    }

    pub fn set_node_transform(
        &mut self,
        node_id: NodeId,
        translation: Vec2,
        rotation: f32,
        scale: f32,
    ) {
        if let Some(node) = self.nodes.get_mut(node_id) {
            node.transform.set_transform(translation, rotation, scale);
        }
        self.invalidate_node_hierarchy(node_id);
    }

    pub fn get_node_transform(&self, node_id: NodeId) -> Option<&Transform> {
        self.nodes.get(node_id).map(|node| &node.transform)
    }

    /// Scene-space matrix of a node, bringing cached transforms up to date first.
    pub fn world_matrix(&self, node_id: NodeId) -> Option<Affine2> {
        self.update_transforms();
        self.nodes
            .get(node_id)
            .map(|node| *node.transform.get_world_matrix())
    }

    /// Paints every node on top of whatever transform `painter` currently holds.
    pub fn paint(&self, painter: &mut dyn Painter) {
        self.update_transforms();
        let base = painter.transform();

        for node_id in self.paint_order() {
            let Some(node) = self.nodes.get(node_id) else {
                continue;
            };

            painter.save();
            painter.set_transform(base * *node.transform.get_world_matrix());
            node.part.paint(painter);
            painter.restore();
        }
    }

    /// Nodes whose bounds contain `point`, topmost first.
    pub fn items_at(&self, point: Vec2) -> Vec<NodeId> {
        self.update_transforms();

        self.paint_order()
            .into_iter()
            .rev()
            .filter(|&node_id| {
                let Some(node) = self.nodes.get(node_id) else {
                    return false;
                };

                let bounds = node.part.bounding_rect();
                let world = *node.transform.get_world_matrix();

                if bounds.is_empty() {
                    return false;
                }

                if world.matrix2.determinant().abs() < f32::EPSILON {
                    return false;
                }

                bounds.contains_point(world.inverse().transform_point2(point))
            })
            .collect()
    }

    pub fn hit_test(&self, point: Vec2) -> Option<NodeId> {
        self.items_at(point).into_iter().next()
    }

    /// Delivers `interaction` to one node and applies the state change it asks for.
    pub fn dispatch(&mut self, node_id: NodeId, interaction: Interaction) -> Reply {
        let Some(node) = self.nodes.get_mut(node_id) else {
            log::warn!("Dropping {} for a node that is not in the scene", interaction.name());
            return Reply::default();
        };

        let reply = node.part.handle(&interaction);

        log::debug!(
            "{} on {}: {}",
            interaction.name(),
            node.name,
            if reply.accepted { "accepted" } else { "declined" }
        );

        if !reply.delta.is_empty() {
            node.part.apply(reply.delta.clone());
        }

        reply
    }

    pub fn late_update(&mut self) {
        self.update_transforms();
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::painting::color::Color;
    use crate::painting::display_list::DisplayList;
    use crate::parts::Part;

    fn arm_scene() -> (Scene, NodeId, NodeId, NodeId) {
        let mut scene = Scene::new();
        let torso = scene.add_node(Node::new("torso", Part::torso()));
        let upper = scene.add_child(
            torso,
            Node::new("upper", Part::limb()).with_translation(Vec2::new(-15.0, -10.0)),
        );
        let lower = scene.add_child(
            upper,
            Node::new("lower", Part::limb()).with_translation(Vec2::new(30.0, 0.0)),
        );
        (scene, torso, upper, lower)
    }

    #[test]
    fn test_world_transform_composes_down_the_tree() {
        let (mut scene, _, upper, lower) = arm_scene();

        let origin = scene.world_matrix(lower).unwrap().transform_point2(Vec2::ZERO);
        assert!((origin - Vec2::new(15.0, -10.0)).length() < 0.001);

        // Rotating the upper segment swings the lower one around the shoulder.
        scene.set_node_rotation(upper, 90.0);
        let origin = scene.world_matrix(lower).unwrap().transform_point2(Vec2::ZERO);
        assert!((origin - Vec2::new(-15.0, 20.0)).length() < 0.001);
    }

    #[test]
    fn test_set_node_parent_moves_child() {
        let (mut scene, torso, upper, lower) = arm_scene();

        scene.set_node_parent(lower, Some(torso));

        assert!(scene.get_node(upper).unwrap().child_ids.is_empty());
        assert_eq!(scene.get_node(torso).unwrap().child_ids, vec![upper, lower]);
        assert_eq!(scene.get_node(lower).unwrap().parent(&scene).unwrap().name, "torso");
    }

    #[test]
    fn test_paint_order_parents_first() {
        let (scene, torso, upper, lower) = arm_scene();

        assert_eq!(scene.paint_order(), vec![torso, upper, lower]);
        assert_eq!(scene.descendants(torso), vec![upper, lower]);
        assert_eq!(scene.get_node_by_name("lower"), Some(lower));
    }

    #[test]
    fn test_items_at_topmost_first() {
        let (scene, torso, upper, _) = arm_scene();

        // The upper arm starts at the shoulder and overlaps the torso bounds there.
        let shoulder = Vec2::new(-12.0, -10.0);
        assert_eq!(scene.items_at(shoulder), vec![upper, torso]);
        assert_eq!(scene.hit_test(shoulder), Some(upper));
        assert_eq!(scene.hit_test(Vec2::new(500.0, 500.0)), None);
    }

    #[test]
    fn test_items_at_skips_parts_without_contents() {
        let mut scene = Scene::new();
        let robot = scene.add_node(Node::new("robot", Part::robot()));
        let torso = scene.add_child(robot, Node::new("torso", Part::torso()));

        assert_eq!(scene.items_at(Vec2::ZERO), vec![torso]);
        assert_eq!(scene.items_at(Vec2::new(0.0, -30.0)), Vec::<NodeId>::new());
    }

    #[test]
    fn test_dispatch_applies_delta() {
        let (mut scene, torso, _, _) = arm_scene();
        let blue = Color::rgb(0, 0, 255);

        let reply = scene.dispatch(torso, Interaction::Drop(blue.into()));

        assert!(reply.accepted);
        assert_eq!(scene.get_node(torso).unwrap().part.color(), blue);
    }

    #[test]
    fn test_paint_uses_world_transforms() {
        let (scene, _, _, _) = arm_scene();
        let mut list = DisplayList::new();
        scene.paint(&mut list);

        // torso: rounded rect + four joints, each limb: body + cap
        assert_eq!(list.len(), 9);
        let lower_origin = list.commands()[7].state.transform.translation;
        assert!((lower_origin - Vec2::new(15.0, -10.0)).length() < 0.001);
    }
}
