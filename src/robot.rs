use std::time::Duration;

use glam::Vec2;

use crate::animation::{Easing, LoopCount, ParallelGroup, Property, Tween};
use crate::parts::Part;
use crate::scene_graph::{Node, NodeId, Scene};

/// Length of one swing of the walk cycle.
pub const ANIMATION_DURATION: Duration = Duration::from_millis(2000);
pub const ANIMATION_EASING: Easing = Easing::SineCurve;

const HEAD_OFFSET: Vec2 = Vec2::new(0.0, -18.0);
/// Every lower segment hangs off the far end of its upper segment.
const LOWER_SEGMENT_OFFSET: Vec2 = Vec2::new(30.0, 0.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Limb {
    LeftArm,
    RightArm,
    RightLeg,
    LeftLeg,
}

impl Limb {
    /// In construction order.
    pub const ALL: [Limb; 4] = [Limb::LeftArm, Limb::RightArm, Limb::RightLeg, Limb::LeftLeg];

    pub fn name(&self) -> &'static str {
        match self {
            Limb::LeftArm => "left_arm",
            Limb::RightArm => "right_arm",
            Limb::RightLeg => "right_leg",
            Limb::LeftLeg => "left_leg",
        }
    }

    /// Where the upper segment attaches to the torso.
    pub fn shoulder_offset(&self) -> Vec2 {
        match self {
            Limb::LeftArm => Vec2::new(-15.0, -10.0),
            Limb::RightArm => Vec2::new(15.0, -10.0),
            Limb::RightLeg => Vec2::new(10.0, 32.0),
            Limb::LeftLeg => Vec2::new(-10.0, 32.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Segment {
    Torso,
    Head,
    Upper(Limb),
    Lower(Limb),
}

impl Segment {
    pub fn name(&self) -> String {
        match self {
            Segment::Torso => "torso".to_string(),
            Segment::Head => "head".to_string(),
            Segment::Upper(limb) => format!("upper_{}", limb.name()),
            Segment::Lower(limb) => format!("lower_{}", limb.name()),
        }
    }
}

struct TweenSpec {
    segment: Segment,
    property: Property,
    start: Option<f32>,
    end: f32,
}

const fn rotate(segment: Segment, start: f32, end: f32) -> TweenSpec {
    TweenSpec {
        segment,
        property: Property::Rotation,
        start: Some(start),
        end,
    }
}

const WALK_CYCLE: [TweenSpec; 11] = [
    rotate(Segment::Head, 20.0, -20.0),
    // Starts from the head's current scale.
    TweenSpec {
        segment: Segment::Head,
        property: Property::Scale,
        start: None,
        end: 1.1,
    },
    rotate(Segment::Upper(Limb::LeftArm), 190.0, 180.0),
    rotate(Segment::Lower(Limb::LeftArm), 50.0, 10.0),
    rotate(Segment::Upper(Limb::RightArm), 300.0, 310.0),
    rotate(Segment::Lower(Limb::RightArm), 0.0, -70.0),
    rotate(Segment::Upper(Limb::LeftLeg), 150.0, 80.0),
    rotate(Segment::Lower(Limb::LeftLeg), 70.0, 10.0),
    rotate(Segment::Upper(Limb::RightLeg), 40.0, 120.0),
    rotate(Segment::Lower(Limb::RightLeg), 10.0, 50.0),
    rotate(Segment::Torso, 5.0, -20.0),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LimbNodes {
    pub upper: NodeId,
    pub lower: NodeId,
}

/// The assembled figure: node ids for every segment plus the looping walk animation.
pub struct Robot {
    root: NodeId,
    torso: NodeId,
    head: NodeId,
    limbs: [LimbNodes; 4],
    animation: ParallelGroup,
}

impl Robot {
    /// Adds the robot to `scene` as a new root and starts its animation.
    pub fn build(scene: &mut Scene) -> Robot {
        let root = scene.add_node(Node::new("robot", Part::robot()));
        let torso = scene.add_child(root, Node::new(Segment::Torso.name(), Part::torso()));
        let head = scene.add_child(
            torso,
            Node::new(Segment::Head.name(), Part::head()).with_translation(HEAD_OFFSET),
        );

        let limbs = Limb::ALL.map(|limb| {
            let upper = scene.add_child(
                torso,
                Node::new(Segment::Upper(limb).name(), Part::limb())
                    .with_translation(limb.shoulder_offset()),
            );
            let lower = scene.add_child(
                upper,
                Node::new(Segment::Lower(limb).name(), Part::limb())
                    .with_translation(LOWER_SEGMENT_OFFSET),
            );
            LimbNodes { upper, lower }
        });

        let mut robot = Robot {
            root,
            torso,
            head,
            limbs,
            animation: ParallelGroup::new(),
        };

        for entry in &WALK_CYCLE {
            let target = robot.node(entry.segment);
            robot.animation.add_tween(
                Tween::new(target, entry.property, entry.start, entry.end)
                    .with_duration(ANIMATION_DURATION)
                    .with_easing(ANIMATION_EASING),
            );
        }

        robot.animation.set_loop_count(LoopCount::Infinite);
        robot.animation.start(scene);

        log::info!(
            "Built robot with {} parts and {} tweens",
            scene.descendants(root).len(),
            robot.animation.len()
        );

        robot
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn torso(&self) -> NodeId {
        self.torso
    }

    pub fn head(&self) -> NodeId {
        self.head
    }

    pub fn limb(&self, limb: Limb) -> LimbNodes {
        self.limbs[limb as usize]
    }

    pub fn node(&self, segment: Segment) -> NodeId {
        match segment {
            Segment::Torso => self.torso,
            Segment::Head => self.head,
            Segment::Upper(limb) => self.limb(limb).upper,
            Segment::Lower(limb) => self.limb(limb).lower,
        }
    }

    pub fn animation(&self) -> &ParallelGroup {
        &self.animation
    }

    pub fn animation_mut(&mut self) -> &mut ParallelGroup {
        &mut self.animation
    }

    pub fn tween(&self, segment: Segment, property: Property) -> Option<&Tween> {
        let target = self.node(segment);
        self.animation
            .tweens()
            .iter()
            .find(|tween| tween.target() == target && tween.property() == property)
    }

    pub fn advance(&mut self, delta: Duration, scene: &mut Scene) {
        self.animation.advance(delta, scene);
    }
}
