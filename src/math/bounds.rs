use glam::{Affine2, Vec2};

/// Axis-aligned rectangle in item coordinates, stored as min/max corners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub const EMPTY: Rect = Rect {
        min: Vec2::ZERO,
        max: Vec2::ZERO,
    };

    pub fn new(point1: Vec2, point2: Vec2) -> Rect {
        let min = point1.min(point2);
        let max = point1.max(point2);
        Rect { min, max }
    }

    /// Builds a rect from its top-left corner and size, the way drawing calls are written.
    pub fn from_xywh(x: f32, y: f32, width: f32, height: f32) -> Rect {
        Rect::new(Vec2::new(x, y), Vec2::new(x + width, y + height))
    }

    pub fn x(&self) -> f32 {
        self.min.x
    }

    pub fn y(&self) -> f32 {
        self.min.y
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    pub fn is_empty(&self) -> bool {
        self.width() <= 0.0 || self.height() <= 0.0
    }

    pub fn corners(&self) -> [Vec2; 4] {
        [
            Vec2::new(self.min.x, self.min.y),
            Vec2::new(self.max.x, self.min.y),
            Vec2::new(self.min.x, self.max.y),
            Vec2::new(self.max.x, self.max.y),
        ]
    }

    /// Bounding box of this rect after mapping all four corners through `transform`.
    pub fn transformed(&self, transform: &Affine2) -> Rect {
        let corners = self.corners().map(|corner| transform.transform_point2(corner));

        let mut min = corners[0];
        let mut max = corners[0];

        for corner in &corners[1..] {
            min = min.min(*corner);
            max = max.max(*corner);
        }

        Rect { min, max }
    }

    pub fn contains_point(&self, point: Vec2) -> bool {
        !self.is_empty()
            && point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_xywh() {
        let rect = Rect::from_xywh(-15.0, -50.0, 30.0, 50.0);

        assert_eq!(rect.min, Vec2::new(-15.0, -50.0));
        assert_eq!(rect.max, Vec2::new(15.0, 0.0));
        assert_eq!(rect.center(), Vec2::new(0.0, -25.0));
    }

    #[test]
    fn test_empty_rect_contains_nothing() {
        assert!(Rect::EMPTY.is_empty());
        assert!(!Rect::EMPTY.contains_point(Vec2::ZERO));
    }

    #[test]
    fn test_transformed_rotation() {
        let rect = Rect::from_xywh(0.0, 0.0, 10.0, 2.0);
        let rotated = rect.transformed(&Affine2::from_angle(std::f32::consts::FRAC_PI_2));

        assert!((rotated.width() - 2.0).abs() < 0.001);
        assert!((rotated.height() - 10.0).abs() < 0.001);
    }
}
