use glam::{Affine2, Vec2};

use crate::math::bounds::Rect;
use crate::painting::painter::{Painter, PainterState, StateStack};
use crate::parts::payload::Bitmap;

#[derive(Debug, Clone)]
pub enum DrawKind {
    RoundedRect {
        rect: Rect,
        x_radius: f32,
        y_radius: f32,
    },
    Ellipse {
        rect: Rect,
    },
    Arc {
        rect: Rect,
        start_angle: f32,
        span_angle: f32,
    },
    Image {
        top_left: Vec2,
        image: Bitmap,
    },
}

#[derive(Debug, Clone)]
pub struct DrawCommand {
    pub kind: DrawKind,
    pub state: PainterState,
}

/// Painter that records draw calls instead of producing pixels.
#[derive(Debug, Default)]
pub struct DisplayList {
    stack: StateStack,
    commands: Vec<DrawCommand>,
}

impl DisplayList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Plays the recorded commands into another painter, on top of its current transform.
    pub fn replay(&self, painter: &mut dyn Painter) {
        let base = painter.transform();

        for command in &self.commands {
            painter.save();
            painter.set_transform(base * command.state.transform);
            painter.set_brush(command.state.brush);
            painter.set_pen(command.state.pen);

            match &command.kind {
                DrawKind::RoundedRect {
                    rect,
                    x_radius,
                    y_radius,
                } => painter.draw_rounded_rect(*rect, *x_radius, *y_radius),
                DrawKind::Ellipse { rect } => painter.draw_ellipse(*rect),
                DrawKind::Arc {
                    rect,
                    start_angle,
                    span_angle,
                } => painter.draw_arc(*rect, *start_angle, *span_angle),
                DrawKind::Image { top_left, image } => painter.draw_image(*top_left, image),
            }

            painter.restore();
        }
    }

    fn push(&mut self, kind: DrawKind) {
        self.commands.push(DrawCommand {
            kind,
            state: self.stack.current().clone(),
        });
    }
}

impl Painter for DisplayList {
    fn state(&self) -> &PainterState {
        self.stack.current()
    }

    fn state_mut(&mut self) -> &mut PainterState {
        self.stack.current_mut()
    }

    fn save(&mut self) {
        self.stack.save();
    }

    fn restore(&mut self) {
        self.stack.restore();
    }

    fn draw_rounded_rect(&mut self, rect: Rect, x_radius: f32, y_radius: f32) {
        self.push(DrawKind::RoundedRect {
            rect,
            x_radius,
            y_radius,
        });
    }

    fn draw_ellipse(&mut self, rect: Rect) {
        self.push(DrawKind::Ellipse { rect });
    }

    fn draw_arc(&mut self, rect: Rect, start_angle: f32, span_angle: f32) {
        self.push(DrawKind::Arc {
            rect,
            start_angle,
            span_angle,
        });
    }

    fn draw_image(&mut self, top_left: Vec2, image: &Bitmap) {
        self.push(DrawKind::Image {
            top_left,
            image: image.clone(),
        });
    }
}

impl std::fmt::Display for DrawCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let origin = self.state.transform.translation;

        match &self.kind {
            DrawKind::RoundedRect { rect, .. } => write!(f, "rounded_rect {:?}", rect_tuple(rect))?,
            DrawKind::Ellipse { rect } => write!(f, "ellipse {:?}", rect_tuple(rect))?,
            DrawKind::Arc {
                rect,
                start_angle,
                span_angle,
            } => write!(
                f,
                "arc {:?} start={} span={}",
                rect_tuple(rect),
                start_angle,
                span_angle
            )?,
            DrawKind::Image { top_left, image } => write!(
                f,
                "image {}x{} at ({}, {})",
                image.width(),
                image.height(),
                top_left.x,
                top_left.y
            )?,
        }

        write!(f, " origin=({:.1}, {:.1})", origin.x, origin.y)?;

        if let Some(brush) = self.state.brush {
            write!(f, " brush=#{:02x}{:02x}{:02x}", brush.r, brush.g, brush.b)?;
        }

        Ok(())
    }
}

fn rect_tuple(rect: &Rect) -> (f32, f32, f32, f32) {
    (rect.x(), rect.y(), rect.width(), rect.height())
}

/// Scale factors of an affine, for assertions on recorded transforms.
pub fn transform_scale(transform: &Affine2) -> Vec2 {
    Vec2::new(
        transform.matrix2.x_axis.length(),
        transform.matrix2.y_axis.length(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::painting::color::Color;

    #[test]
    fn test_records_state_per_command() {
        let mut list = DisplayList::new();
        list.set_brush(Some(Color::WHITE));
        list.draw_ellipse(Rect::from_xywh(0.0, 0.0, 2.0, 2.0));
        list.save();
        list.scale(2.0, 3.0);
        list.set_brush(None);
        list.draw_ellipse(Rect::from_xywh(0.0, 0.0, 2.0, 2.0));
        list.restore();

        assert_eq!(list.len(), 2);
        assert_eq!(list.commands()[0].state.brush, Some(Color::WHITE));
        assert_eq!(list.commands()[1].state.brush, None);
        assert_eq!(
            transform_scale(&list.commands()[1].state.transform),
            Vec2::new(2.0, 3.0)
        );
        assert_eq!(list.state().transform, Affine2::IDENTITY);
    }

    #[test]
    fn test_replay_applies_base_transform() {
        let mut source = DisplayList::new();
        source.draw_ellipse(Rect::from_xywh(0.0, 0.0, 1.0, 1.0));

        let mut target = DisplayList::new();
        target.set_transform(Affine2::from_translation(Vec2::new(5.0, 6.0)));
        source.replay(&mut target);

        assert_eq!(target.len(), 1);
        assert_eq!(
            target.commands()[0].state.transform.translation,
            Vec2::new(5.0, 6.0)
        );
    }
}
