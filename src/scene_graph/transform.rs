use glam::{Affine2, Vec2};
use std::cell::{Cell, Ref, RefCell};

/// Local placement of a node relative to its parent: offset, rotation in degrees and uniform scale.
///
/// Local and world matrices are cached and recomputed lazily when the dirty flags say so.
#[derive(Debug, Clone)]
pub struct Transform {
    translation: Vec2,
    rotation: f32,
    scale: f32,

    local_matrix: RefCell<Affine2>,
    world_matrix: RefCell<Affine2>,
    local_dirty: Cell<bool>,
    world_dirty: Cell<bool>,
}

impl Transform {
    pub fn from_translation(translation: Vec2) -> Self {
        Self {
            translation,
            rotation: 0.0,
            scale: 1.0,
            local_matrix: RefCell::new(Affine2::IDENTITY),
            world_matrix: RefCell::new(Affine2::IDENTITY),
            local_dirty: Cell::new(true),
            world_dirty: Cell::new(true),
        }
    }

    pub fn get_local_matrix(&self) -> Ref<Affine2> {
        if self.local_dirty.get() {
            let matrix = Affine2::from_scale_angle_translation(
                Vec2::splat(self.scale),
                self.rotation.to_radians(),
                self.translation,
            );

            self.local_matrix.replace(matrix);
            self.local_dirty.set(false);
            self.invalidate_world();
        }

        self.local_matrix.borrow()
    }

    pub fn get_world_matrix(&self) -> Ref<Affine2> {
        self.world_matrix.borrow()
    }

    pub fn set_world_matrix(&self, world_matrix: Affine2) {
        self.world_matrix.replace(world_matrix);
        self.world_dirty.set(false);
    }

    pub fn invalidate_local(&self) {
        self.local_dirty.set(true);
        self.world_dirty.set(true);
    }

    pub fn invalidate_world(&self) {
        self.world_dirty.set(true);
    }

    pub fn is_world_dirty(&self) -> bool {
        self.world_dirty.get()
    }

    /// Sets the rotation in degrees, clockwise on screen.
    pub fn set_rotation(&mut self, rotation: f32) {
        self.rotation = rotation;
        self.invalidate_local();
    }

    pub fn set_translation(&mut self, translation: Vec2) {
        self.translation = translation;
        self.invalidate_local();
    }

    pub fn set_scale(&mut self, scale: f32) {
        self.scale = scale;
        self.invalidate_local();
    }

    pub fn set_transform(&mut self, translation: Vec2, rotation: f32, scale: f32) {
        self.translation = translation;
        self.rotation = rotation;
        self.scale = scale;
        self.invalidate_local();
    }

    pub fn translation(&self) -> Vec2 {
        self.translation
    }

    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::from_translation(Vec2::ZERO)
    }
}
