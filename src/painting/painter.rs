use glam::{Affine2, Vec2};

use crate::math::bounds::Rect;
use crate::painting::color::Color;
use crate::parts::payload::Bitmap;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pen {
    pub color: Color,
    pub width: f32,
}

impl Pen {
    pub fn new(color: Color, width: f32) -> Self {
        Self { color, width }
    }
}

impl Default for Pen {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            width: 1.0,
        }
    }
}

/// Transform, brush and pen in effect for the next draw call.
#[derive(Debug, Clone, PartialEq)]
pub struct PainterState {
    pub transform: Affine2,
    pub brush: Option<Color>,
    pub pen: Option<Pen>,
}

impl Default for PainterState {
    fn default() -> Self {
        Self {
            transform: Affine2::IDENTITY,
            brush: None,
            pen: Some(Pen::default()),
        }
    }
}

/// Primitive vector drawing operations used by the robot parts.
///
/// Coordinates are in the current item space; implementations map them through the
/// current transform. Angles are in degrees, counter-clockwise on screen starting at
/// three o'clock. Rounded rect radii are percentages of half the rect size.
pub trait Painter {
    fn state(&self) -> &PainterState;
    fn state_mut(&mut self) -> &mut PainterState;

    fn save(&mut self);
    fn restore(&mut self);

    fn draw_rounded_rect(&mut self, rect: Rect, x_radius: f32, y_radius: f32);
    fn draw_ellipse(&mut self, rect: Rect);
    fn draw_arc(&mut self, rect: Rect, start_angle: f32, span_angle: f32);
    fn draw_image(&mut self, top_left: Vec2, image: &Bitmap);

    fn transform(&self) -> Affine2 {
        self.state().transform
    }

    fn set_transform(&mut self, transform: Affine2) {
        self.state_mut().transform = transform;
    }

    fn scale(&mut self, sx: f32, sy: f32) {
        let state = self.state_mut();
        state.transform = state.transform * Affine2::from_scale(Vec2::new(sx, sy));
    }

    fn set_brush(&mut self, brush: Option<Color>) {
        self.state_mut().brush = brush;
    }

    fn set_pen(&mut self, pen: Option<Pen>) {
        self.state_mut().pen = pen;
    }
}

/// Save/restore stack shared by the painter implementations.
#[derive(Debug, Default)]
pub struct StateStack {
    current: PainterState,
    saved: Vec<PainterState>,
}

impl StateStack {
    pub fn current(&self) -> &PainterState {
        &self.current
    }

    pub fn current_mut(&mut self) -> &mut PainterState {
        &mut self.current
    }

    pub fn save(&mut self) {
        self.saved.push(self.current.clone());
    }

    pub fn restore(&mut self) {
        match self.saved.pop() {
            Some(state) => self.current = state,
            None => log::warn!("Painter::restore called without a matching save"),
        }
    }
}

/// Corner radii in item units for a rounded rect whose radii are given relative to its size.
pub fn relative_radii(rect: &Rect, x_radius: f32, y_radius: f32) -> Vec2 {
    let x = x_radius.clamp(0.0, 100.0) / 100.0 * rect.width() * 0.5;
    let y = y_radius.clamp(0.0, 100.0) / 100.0 * rect.height() * 0.5;
    Vec2::new(x, y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_radii() {
        let radii = relative_radii(&Rect::from_xywh(-20.0, -20.0, 40.0, 60.0), 25.0, 25.0);

        assert!((radii.x - 5.0).abs() < 0.001);
        assert!((radii.y - 7.5).abs() < 0.001);
    }

    #[test]
    fn test_state_stack_restore() {
        let mut stack = StateStack::default();
        stack.current_mut().brush = Some(Color::WHITE);
        stack.save();
        stack.current_mut().brush = None;
        stack.restore();

        assert_eq!(stack.current().brush, Some(Color::WHITE));
    }
}
