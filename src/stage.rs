use std::time::Duration;

use glam::{Affine2, Vec2};
use image::RgbaImage;

use crate::config::StageConfig;
use crate::painting::display_list::DisplayList;
use crate::painting::painter::Painter;
use crate::painting::raster::Rasterizer;
use crate::parts::interaction::Interaction;
use crate::parts::payload::Payload;
use crate::robot::Robot;
use crate::scene_graph::{NodeId, Scene};

/// Hosts the robot: owns the scene, advances the animation, routes drags and renders.
pub struct Stage {
    config: StageConfig,
    pub scene: Scene,
    robot: Robot,
    drag_target: Option<NodeId>,
}

impl Stage {
    pub fn new(config: StageConfig) -> Self {
        let mut scene = Scene::new();
        let robot = Robot::build(&mut scene);

        scene.set_node_transform(robot.root(), config.robot_position, 0.0, config.robot_scale);
        scene.late_update();

        log::info!(
            "{}: {}x{} px, scene rect {:?}",
            config.title,
            config.width,
            config.height,
            config.scene_rect
        );

        Self {
            config,
            scene,
            robot,
            drag_target: None,
        }
    }

    pub fn config(&self) -> &StageConfig {
        &self.config
    }

    pub fn robot(&self) -> &Robot {
        &self.robot
    }

    /// Part currently highlighted by an ongoing drag.
    pub fn drag_target(&self) -> Option<NodeId> {
        self.drag_target
    }

    /// Maps scene coordinates to output pixels, fitting the scene rect and centering it.
    pub fn view_transform(&self) -> Affine2 {
        let size = Vec2::new(self.config.width as f32, self.config.height as f32);
        let scene_size = self.config.scene_rect.size();
        let scale = (size.x / scene_size.x).min(size.y / scene_size.y);

        Affine2::from_translation(size * 0.5)
            * Affine2::from_scale(Vec2::splat(scale))
            * Affine2::from_translation(-self.config.scene_rect.center())
    }

    pub fn map_to_scene(&self, pixel: Vec2) -> Vec2 {
        self.view_transform().inverse().transform_point2(pixel)
    }

    /// Moves a drag carrying `payload` to `point` (scene coordinates).
    ///
    /// Parts under the point are offered the drag topmost first; the first to accept
    /// becomes the target and the previous target, if different, gets a leave.
    pub fn drag_move(&mut self, point: Vec2, payload: &Payload) -> bool {
        let mut new_target = None;

        for node_id in self.scene.items_at(point) {
            if Some(node_id) == self.drag_target {
                return true;
            }

            if self
                .scene
                .dispatch(node_id, Interaction::DragEnter(payload.clone()))
                .accepted
            {
                new_target = Some(node_id);
                break;
            }
        }

        if let Some(old_target) = self.drag_target.take() {
            self.scene.dispatch(old_target, Interaction::DragLeave);
        }

        self.drag_target = new_target;
        new_target.is_some()
    }

    /// Drops `payload` at `point`. Returns whether a part took it.
    pub fn drop(&mut self, point: Vec2, payload: Payload) -> bool {
        self.drag_move(point, &payload);

        match self.drag_target.take() {
            Some(target) => self.scene.dispatch(target, Interaction::Drop(payload)).accepted,
            None => {
                log::debug!("Drop at ({}, {}) landed on nothing", point.x, point.y);
                false
            }
        }
    }

    pub fn drag_cancel(&mut self) {
        if let Some(target) = self.drag_target.take() {
            self.scene.dispatch(target, Interaction::DragLeave);
        }
    }

    pub fn tick(&mut self, delta: Duration) {
        self.robot.advance(delta, &mut self.scene);
        self.scene.late_update();
    }

    pub fn render(&self, painter: &mut dyn Painter) {
        let view = painter.transform() * self.view_transform();
        painter.save();
        painter.set_transform(view);
        self.scene.paint(painter);
        painter.restore();
    }

    pub fn render_image(&self) -> RgbaImage {
        let mut rasterizer = Rasterizer::new(
            self.config.width,
            self.config.height,
            self.config.background,
        );
        self.render(&mut rasterizer);
        rasterizer.into_image()
    }

    pub fn display_list(&self) -> DisplayList {
        let mut list = DisplayList::new();
        self.render(&mut list);
        list
    }
}

impl Default for Stage {
    fn default() -> Self {
        Self::new(StageConfig::default())
    }
}
