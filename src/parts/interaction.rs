use crate::painting::color::Color;
use crate::parts::payload::{Bitmap, Payload};

/// Drag-and-drop message delivered to a single part.
#[derive(Debug, Clone)]
pub enum Interaction {
    DragEnter(Payload),
    DragLeave,
    Drop(Payload),
}

impl Interaction {
    pub fn name(&self) -> &'static str {
        match self {
            Interaction::DragEnter(_) => "drag-enter",
            Interaction::DragLeave => "drag-leave",
            Interaction::Drop(_) => "drop",
        }
    }
}

/// State change a part asks for in response to an interaction. `None` fields are left alone.
#[derive(Debug, Clone, Default)]
pub struct PartDelta {
    pub drag_over: Option<bool>,
    pub color: Option<Color>,
    pub image: Option<Bitmap>,
}

impl PartDelta {
    pub fn highlight(drag_over: bool) -> Self {
        Self {
            drag_over: Some(drag_over),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.drag_over.is_none() && self.color.is_none() && self.image.is_none()
    }
}

#[derive(Debug, Clone, Default)]
pub struct Reply {
    pub accepted: bool,
    pub delta: PartDelta,
}

impl Reply {
    pub fn accept(delta: PartDelta) -> Self {
        Self {
            accepted: true,
            delta,
        }
    }

    /// Declines the interaction, optionally still changing state (a rejected drop clears
    /// the highlight).
    pub fn decline(delta: PartDelta) -> Self {
        Self {
            accepted: false,
            delta,
        }
    }
}
