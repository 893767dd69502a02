use std::time::Duration;

use crate::animation::easing::Easing;
use crate::scene_graph::{NodeId, Scene, Transform};

/// Node property a tween drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Property {
    /// Rotation in degrees.
    Rotation,
    Scale,
}

impl Property {
    pub fn read(&self, transform: &Transform) -> f32 {
        match self {
            Property::Rotation => transform.rotation(),
            Property::Scale => transform.scale(),
        }
    }

    pub fn write(&self, scene: &mut Scene, node_id: NodeId, value: f32) {
        match self {
            Property::Rotation => scene.set_node_rotation(node_id, value),
            Property::Scale => scene.set_node_scale(node_id, value),
        }
    }
}

/// Interpolates one property of one node between two values.
///
/// Without an explicit start value the tween starts from whatever the property holds
/// when its group is started.
#[derive(Debug, Clone)]
pub struct Tween {
    target: NodeId,
    property: Property,
    start: Option<f32>,
    end: f32,
    duration: Duration,
    easing: Easing,
    captured_start: Option<f32>,
}

impl Tween {
    pub fn new(target: NodeId, property: Property, start: Option<f32>, end: f32) -> Self {
        Self {
            target,
            property,
            start,
            end,
            duration: Duration::from_millis(250),
            easing: Easing::Linear,
            captured_start: None,
        }
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn target(&self) -> NodeId {
        self.target
    }

    pub fn property(&self) -> Property {
        self.property
    }

    /// The start value the tween was configured with, if any.
    pub fn start_value(&self) -> Option<f32> {
        self.start
    }

    pub fn end_value(&self) -> f32 {
        self.end
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn easing(&self) -> Easing {
        self.easing
    }

    /// Start value actually interpolated from: the configured one, else the captured one.
    pub fn effective_start(&self) -> f32 {
        self.start.or(self.captured_start).unwrap_or(self.end)
    }

    /// Records the current property value for tweens without a start value.
    pub(crate) fn capture_start(&mut self, scene: &Scene) {
        if self.start.is_some() {
            return;
        }

        self.captured_start = scene
            .get_node_transform(self.target)
            .map(|transform| self.property.read(transform));
    }

    pub fn value_at(&self, elapsed: Duration) -> f32 {
        let progress = if self.duration.is_zero() {
            1.0
        } else {
            elapsed.as_secs_f32() / self.duration.as_secs_f32()
        };

        let start = self.effective_start();
        start + (self.end - start) * self.easing.value(progress)
    }

    pub(crate) fn apply(&self, scene: &mut Scene, elapsed: Duration) {
        let value = self.value_at(elapsed.min(self.duration));
        self.property.write(scene, self.target, value);
    }
}
