use glam::Vec2;

use crate::math::bounds::Rect;
use crate::painting::color::Color;

#[derive(Debug, Clone)]
pub struct StageConfig {
    pub title: String,
    /// Visible area in scene coordinates.
    pub scene_rect: Rect,
    pub background: Color,
    pub robot_position: Vec2,
    pub robot_scale: f32,
    /// Output size in pixels. The scene rect is fitted and centered inside it.
    pub width: u32,
    pub height: u32,
}

impl Default for StageConfig {
    fn default() -> Self {
        Self {
            title: "Drag and Drop Robot".to_string(),
            scene_rect: Rect::from_xywh(-200.0, -200.0, 400.0, 400.0),
            background: Color::rgb(230, 200, 167),
            robot_position: Vec2::new(0.0, -20.0),
            robot_scale: 1.2,
            width: 400,
            height: 400,
        }
    }
}
