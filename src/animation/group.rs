use std::time::Duration;

use crate::animation::tween::Tween;
use crate::scene_graph::Scene;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopCount {
    Finite(u32),
    Infinite,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationState {
    Stopped,
    Paused,
    Running,
}

/// Tweens that start together and run side by side.
///
/// One loop lasts as long as the longest member; shorter members hold their end value
/// until every member has finished, then the whole group starts over.
#[derive(Debug, Clone)]
pub struct ParallelGroup {
    tweens: Vec<Tween>,
    loop_count: LoopCount,
    state: AnimationState,
    current_time: Duration,
    current_loop: u32,
}

impl ParallelGroup {
    pub fn new() -> Self {
        Self {
            tweens: Vec::new(),
            loop_count: LoopCount::Finite(1),
            state: AnimationState::Stopped,
            current_time: Duration::ZERO,
            current_loop: 0,
        }
    }

    pub fn add_tween(&mut self, tween: Tween) {
        self.tweens.push(tween);
    }

    pub fn tweens(&self) -> &[Tween] {
        &self.tweens
    }

    pub fn len(&self) -> usize {
        self.tweens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tweens.is_empty()
    }

    pub fn set_loop_count(&mut self, loop_count: LoopCount) {
        self.loop_count = loop_count;
    }

    pub fn loop_count(&self) -> LoopCount {
        self.loop_count
    }

    pub fn state(&self) -> AnimationState {
        self.state
    }

    /// Time into the current loop.
    pub fn current_time(&self) -> Duration {
        self.current_time
    }

    pub fn current_loop(&self) -> u32 {
        self.current_loop
    }

    /// Length of one loop: the longest member duration.
    pub fn duration(&self) -> Duration {
        self.tweens
            .iter()
            .map(Tween::duration)
            .max()
            .unwrap_or(Duration::ZERO)
    }

    /// Starts from the beginning, capturing missing start values and applying the first frame.
    pub fn start(&mut self, scene: &mut Scene) {
        for tween in &mut self.tweens {
            tween.capture_start(scene);
        }

        self.current_time = Duration::ZERO;
        self.current_loop = 0;
        self.state = AnimationState::Running;

        log::debug!(
            "Starting parallel group: {} tweens, {:?} per loop, {:?}",
            self.tweens.len(),
            self.duration(),
            self.loop_count
        );

        self.apply(scene);
    }

    pub fn pause(&mut self) {
        if self.state == AnimationState::Running {
            self.state = AnimationState::Paused;
        }
    }

    pub fn resume(&mut self) {
        if self.state == AnimationState::Paused {
            self.state = AnimationState::Running;
        }
    }

    /// Halts the group where it is. Node properties keep their last animated values.
    pub fn stop(&mut self) {
        self.state = AnimationState::Stopped;
    }

    /// Loop boundaries the group may still cross before it has to stop.
    fn remaining_wraps(&self) -> u128 {
        match self.loop_count {
            LoopCount::Infinite => u128::MAX,
            LoopCount::Finite(count) => {
                u128::from(count.saturating_sub(1).saturating_sub(self.current_loop))
            }
        }
    }

    /// Moves the group forward by `delta` and writes the new property values into `scene`.
    pub fn advance(&mut self, delta: Duration, scene: &mut Scene) {
        if self.state != AnimationState::Running {
            return;
        }

        let loop_duration = self.duration();

        if loop_duration.is_zero() {
            self.apply(scene);
            self.state = AnimationState::Stopped;
            return;
        }

        self.current_time = self.current_time.saturating_add(delta);

        if self.current_time >= loop_duration {
            let loop_nanos = loop_duration.as_nanos();
            let elapsed = self.current_time.as_nanos();
            let wraps = elapsed / loop_nanos;
            let remaining = self.remaining_wraps();

            if wraps <= remaining {
                let wraps = u32::try_from(wraps).unwrap_or(u32::MAX);
                self.current_loop = self.current_loop.saturating_add(wraps);
                self.current_time = duration_from_nanos(elapsed % loop_nanos);
            } else {
                let wraps = u32::try_from(remaining).unwrap_or(u32::MAX);
                self.current_loop = self.current_loop.saturating_add(wraps);
                self.current_time = loop_duration;
                self.state = AnimationState::Stopped;
                log::debug!(
                    "Parallel group finished after {} loops",
                    self.current_loop.saturating_add(1)
                );
            }
        }

        self.apply(scene);
    }

    fn apply(&self, scene: &mut Scene) {
        for tween in &self.tweens {
            tween.apply(scene, self.current_time);
        }
    }
}

fn duration_from_nanos(nanos: u128) -> Duration {
    const NANOS_PER_SEC: u128 = 1_000_000_000;

    let secs = u64::try_from(nanos / NANOS_PER_SEC).unwrap_or(u64::MAX);
    // Always below one second, so it fits.
    let subsec = (nanos % NANOS_PER_SEC) as u32;

    Duration::new(secs, subsec)
}

impl Default for ParallelGroup {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::tween::Property;
    use crate::parts::Part;
    use crate::scene_graph::{Node, NodeId};

    fn two_tween_group() -> (Scene, NodeId, NodeId, ParallelGroup) {
        let mut scene = Scene::new();
        let a = scene.add_node(Node::new("a", Part::limb()));
        let b = scene.add_node(Node::new("b", Part::limb()));

        let mut group = ParallelGroup::new();
        group.add_tween(
            Tween::new(a, Property::Rotation, Some(0.0), 100.0)
                .with_duration(Duration::from_millis(1000)),
        );
        group.add_tween(
            Tween::new(b, Property::Rotation, Some(0.0), 10.0)
                .with_duration(Duration::from_millis(500)),
        );

        (scene, a, b, group)
    }

    fn rotation(scene: &Scene, node: NodeId) -> f32 {
        scene.get_node_transform(node).unwrap().rotation()
    }

    #[test]
    fn test_shorter_member_holds_until_group_loops() {
        let (mut scene, a, b, mut group) = two_tween_group();
        group.set_loop_count(LoopCount::Finite(2));
        group.start(&mut scene);

        group.advance(Duration::from_millis(750), &mut scene);
        assert!((rotation(&scene, a) - 75.0).abs() < 0.001);
        assert_eq!(rotation(&scene, b), 10.0);

        group.advance(Duration::from_millis(500), &mut scene);
        assert_eq!(group.current_loop(), 1);
        assert!((rotation(&scene, a) - 25.0).abs() < 0.001);
        assert!((rotation(&scene, b) - 5.0).abs() < 0.001);
        assert_eq!(group.state(), AnimationState::Running);

        group.advance(Duration::from_millis(5000), &mut scene);
        assert_eq!(group.state(), AnimationState::Stopped);
        assert_eq!(rotation(&scene, a), 100.0);
    }

    #[test]
    fn test_infinite_loop_keeps_running() {
        let (mut scene, _, _, mut group) = two_tween_group();
        group.set_loop_count(LoopCount::Infinite);
        group.start(&mut scene);

        for _ in 0..100 {
            group.advance(Duration::from_millis(333), &mut scene);
        }

        assert_eq!(group.state(), AnimationState::Running);
        assert_eq!(group.current_loop(), 33);
        assert!(group.current_time() < group.duration());
    }

    #[test]
    fn test_pause_and_stop_freeze_values() {
        let (mut scene, a, _, mut group) = two_tween_group();
        group.start(&mut scene);
        group.advance(Duration::from_millis(200), &mut scene);

        group.pause();
        group.advance(Duration::from_millis(200), &mut scene);
        assert!((rotation(&scene, a) - 20.0).abs() < 0.001);

        group.resume();
        group.advance(Duration::from_millis(200), &mut scene);
        assert!((rotation(&scene, a) - 40.0).abs() < 0.001);

        group.stop();
        group.advance(Duration::from_millis(200), &mut scene);
        assert!((rotation(&scene, a) - 40.0).abs() < 0.001);
        assert_eq!(group.tweens()[0].start_value(), Some(0.0));
        assert_eq!(group.tweens()[0].end_value(), 100.0);
    }

    #[test]
    fn test_huge_step_wraps_without_counting_each_loop() {
        let mut scene = Scene::new();
        let node = scene.add_node(Node::new("a", Part::limb()));
        let mut group = ParallelGroup::new();
        group.add_tween(
            Tween::new(node, Property::Rotation, Some(0.0), 10.0)
                .with_duration(Duration::from_millis(1)),
        );
        group.set_loop_count(LoopCount::Infinite);
        group.start(&mut scene);

        group.advance(Duration::from_millis(u32::MAX as u64 + 5), &mut scene);

        assert_eq!(group.state(), AnimationState::Running);
        assert_eq!(group.current_loop(), u32::MAX);
        assert_eq!(group.current_time(), Duration::ZERO);

        // Saturated counter keeps running.
        group.advance(Duration::from_micros(2500), &mut scene);
        assert_eq!(group.current_loop(), u32::MAX);
        assert_eq!(group.current_time(), Duration::from_micros(500));
        assert!((rotation(&scene, node) - 5.0).abs() < 0.001);
    }

    #[test]
    fn test_year_long_step_lands_mid_loop() {
        let (mut scene, a, _, mut group) = two_tween_group();
        group.set_loop_count(LoopCount::Infinite);
        group.start(&mut scene);

        let year = Duration::from_secs(365 * 24 * 60 * 60);
        group.advance(year + Duration::from_millis(250), &mut scene);

        assert_eq!(group.current_loop(), 31_536_000);
        assert_eq!(group.current_time(), Duration::from_millis(250));
        assert!((rotation(&scene, a) - 25.0).abs() < 0.001);
    }

    #[test]
    fn test_finite_group_stops_after_last_loop_in_one_step() {
        let (mut scene, a, _, mut group) = two_tween_group();
        group.set_loop_count(LoopCount::Finite(3));
        group.start(&mut scene);

        group.advance(Duration::from_secs(3600), &mut scene);

        assert_eq!(group.state(), AnimationState::Stopped);
        assert_eq!(group.current_loop(), 2);
        assert_eq!(group.current_time(), group.duration());
        assert_eq!(rotation(&scene, a), 100.0);
    }
}
