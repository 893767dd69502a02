pub mod easing;
pub mod group;
pub mod tween;

pub use easing::Easing;
pub use group::{AnimationState, LoopCount, ParallelGroup};
pub use tween::{Property, Tween};
