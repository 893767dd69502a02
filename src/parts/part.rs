use glam::Vec2;

use crate::math::bounds::Rect;
use crate::painting::color::Color;
use crate::painting::painter::{Painter, Pen};
use crate::parts::interaction::{Interaction, PartDelta, Reply};
use crate::parts::payload::{Bitmap, Payload};

/// Percentage used to brighten a part while a drag hovers over it.
const DRAG_OVER_LIGHTNESS: u32 = 130;

/// Factors that fit a dropped photo into the head outline.
const HEAD_IMAGE_SCALE: Vec2 = Vec2::new(0.2272, 0.2824);
const HEAD_IMAGE_OFFSET: Vec2 = Vec2::new(-15.0 * 4.4, -50.0 * 3.54);

#[derive(Debug, Clone)]
pub enum PartKind {
    /// Grouping node that owns the rest of the figure. Draws nothing.
    Robot,
    Torso,
    Head { image: Option<Bitmap> },
    Limb,
}

impl PartKind {
    pub fn name(&self) -> &'static str {
        match self {
            PartKind::Robot => "robot",
            PartKind::Torso => "torso",
            PartKind::Head { .. } => "head",
            PartKind::Limb => "limb",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Part {
    kind: PartKind,
    color: Color,
    drag_over: bool,
}

impl Part {
    pub fn new(kind: PartKind) -> Self {
        Self {
            kind,
            color: Color::LIGHT_GRAY,
            drag_over: false,
        }
    }

    pub fn robot() -> Self {
        Self::new(PartKind::Robot)
    }

    pub fn torso() -> Self {
        Self::new(PartKind::Torso)
    }

    pub fn head() -> Self {
        Self::new(PartKind::Head { image: None })
    }

    pub fn limb() -> Self {
        Self::new(PartKind::Limb)
    }

    pub fn kind(&self) -> &PartKind {
        &self.kind
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn is_drag_over(&self) -> bool {
        self.drag_over
    }

    pub fn image(&self) -> Option<&Bitmap> {
        match &self.kind {
            PartKind::Head { image } => image.as_ref(),
            _ => None,
        }
    }

    pub fn bounding_rect(&self) -> Rect {
        match self.kind {
            PartKind::Robot => Rect::EMPTY,
            PartKind::Torso => Rect::from_xywh(-30.0, -20.0, 60.0, 60.0),
            PartKind::Head { .. } => Rect::from_xywh(-15.0, -50.0, 30.0, 50.0),
            PartKind::Limb => Rect::from_xywh(-5.0, -5.0, 40.0, 10.0),
        }
    }

    /// Decides how to respond to `interaction` without touching state.
    ///
    /// The head takes image payloads itself and hands everything else to the color path.
    pub fn handle(&self, interaction: &Interaction) -> Reply {
        match (&self.kind, interaction) {
            (PartKind::Head { .. }, Interaction::DragEnter(Payload::Image(_))) => {
                Reply::accept(PartDelta::highlight(true))
            }
            (PartKind::Head { .. }, Interaction::Drop(Payload::Image(image))) => {
                Reply::accept(PartDelta {
                    drag_over: Some(false),
                    image: Some(image.clone()),
                    ..Default::default()
                })
            }
            _ => self.handle_color(interaction),
        }
    }

    fn handle_color(&self, interaction: &Interaction) -> Reply {
        match interaction {
            Interaction::DragEnter(payload) if payload.has_color() => {
                Reply::accept(PartDelta::highlight(true))
            }
            Interaction::DragEnter(_) => Reply::decline(PartDelta::default()),
            Interaction::DragLeave => Reply::accept(PartDelta::highlight(false)),
            Interaction::Drop(payload) => {
                let delta = PartDelta {
                    drag_over: Some(false),
                    color: payload.color(),
                    ..Default::default()
                };

                if payload.has_color() {
                    Reply::accept(delta)
                } else {
                    Reply::decline(delta)
                }
            }
        }
    }

    pub fn apply(&mut self, delta: PartDelta) {
        if let Some(drag_over) = delta.drag_over {
            self.drag_over = drag_over;
        }

        if let Some(color) = delta.color {
            self.color = color;
        }

        if let Some(new_image) = delta.image {
            match &mut self.kind {
                PartKind::Head { image } => *image = Some(new_image),
                other => log::warn!("Ignoring image for {} part", other.name()),
            }
        }
    }

    fn fill(&self) -> Color {
        if self.drag_over {
            self.color.lighter(DRAG_OVER_LIGHTNESS)
        } else {
            self.color
        }
    }

    pub fn paint(&self, painter: &mut dyn Painter) {
        match &self.kind {
            PartKind::Robot => {}
            PartKind::Head { image: Some(image) } => {
                painter.scale(HEAD_IMAGE_SCALE.x, HEAD_IMAGE_SCALE.y);
                painter.draw_image(HEAD_IMAGE_OFFSET, image);
            }
            PartKind::Head { image: None } => {
                painter.set_brush(Some(self.fill()));
                painter.draw_rounded_rect(Rect::from_xywh(-10.0, -30.0, 20.0, 30.0), 25.0, 25.0);

                painter.set_brush(Some(Color::WHITE));
                painter.draw_ellipse(Rect::from_xywh(-7.0, -3.0 - 20.0, 7.0, 7.0));
                painter.draw_ellipse(Rect::from_xywh(0.0, -3.0 - 20.0, 7.0, 7.0));

                painter.set_brush(Some(Color::BLACK));
                painter.draw_ellipse(Rect::from_xywh(-5.0, -1.0 - 20.0, 2.0, 2.0));
                painter.draw_ellipse(Rect::from_xywh(2.0, -1.0 - 20.0, 2.0, 2.0));

                painter.set_pen(Some(Pen::new(Color::BLACK, 2.0)));
                painter.set_brush(None);
                painter.draw_arc(Rect::from_xywh(-6.0, -2.0 - 20.0, 12.0, 15.0), 190.0, 160.0);
            }
            PartKind::Torso => {
                painter.set_brush(Some(self.fill()));
                painter.draw_rounded_rect(Rect::from_xywh(-20.0, -20.0, 40.0, 60.0), 25.0, 25.0);
                painter.draw_ellipse(Rect::from_xywh(-25.0, -20.0, 20.0, 20.0));
                painter.draw_ellipse(Rect::from_xywh(5.0, -20.0, 20.0, 20.0));
                painter.draw_ellipse(Rect::from_xywh(-20.0, 22.0, 20.0, 20.0));
                painter.draw_ellipse(Rect::from_xywh(0.0, 22.0, 20.0, 20.0));
            }
            PartKind::Limb => {
                painter.set_brush(Some(self.fill()));
                painter.draw_rounded_rect(self.bounding_rect(), 50.0, 50.0);
                painter.draw_ellipse(Rect::from_xywh(-5.0, -5.0, 10.0, 10.0));
            }
        }
    }
}
