use glam::{Affine2, Vec2};
use image::{Rgba, RgbaImage};
use kurbo::{BezPath, Ellipse, Point, RoundedRect, Shape, Stroke, StrokeOpts};

use crate::math::bounds::Rect;
use crate::painting::color::Color;
use crate::painting::painter::{relative_radii, Painter, PainterState, Pen, StateStack};
use crate::parts::payload::Bitmap;

const TOLERANCE: f64 = 0.05;
const SUBSAMPLES: u32 = 4;

fn glam_to_kurbo(transform: Affine2) -> kurbo::Affine {
    kurbo::Affine::new(transform.to_cols_array().map(f64::from))
}

fn to_kurbo_rect(rect: &Rect) -> kurbo::Rect {
    kurbo::Rect::new(
        rect.min.x as f64,
        rect.min.y as f64,
        rect.max.x as f64,
        rect.max.y as f64,
    )
}

/// Rounded rect with elliptical corners.
///
/// kurbo only rounds with circular radii, so the rect is built squashed along y and then
/// stretched back by `ry / rx`.
pub fn rounded_rect_path(rect: &Rect, x_radius: f32, y_radius: f32) -> BezPath {
    let radii = relative_radii(rect, x_radius, y_radius);

    if radii.x <= 0.0 || radii.y <= 0.0 {
        return to_kurbo_rect(rect).to_path(TOLERANCE);
    }

    let stretch = (radii.y / radii.x) as f64;
    let squashed = RoundedRect::new(
        rect.min.x as f64,
        rect.min.y as f64 / stretch,
        rect.max.x as f64,
        rect.max.y as f64 / stretch,
        radii.x as f64,
    );

    kurbo::Affine::scale_non_uniform(1.0, stretch) * squashed.to_path(TOLERANCE)
}

pub fn ellipse_path(rect: &Rect) -> BezPath {
    Ellipse::from_rect(to_kurbo_rect(rect)).to_path(TOLERANCE)
}

/// Open arc along the ellipse inscribed in `rect`. Angles in degrees, counter-clockwise on screen.
pub fn arc_path(rect: &Rect, start_angle: f32, span_angle: f32) -> BezPath {
    let center = rect.center();
    let arc = kurbo::Arc {
        center: Point::new(center.x as f64, center.y as f64),
        radii: kurbo::Vec2::new(rect.width() as f64 * 0.5, rect.height() as f64 * 0.5),
        // y points down, so screen counter-clockwise is a negative angle.
        start_angle: -(start_angle as f64).to_radians(),
        sweep_angle: -(span_angle as f64).to_radians(),
        x_rotation: 0.0,
    };

    arc.to_path(TOLERANCE)
}

/// Software painter that fills and strokes into an RGBA image with supersampled coverage.
pub struct Rasterizer {
    image: RgbaImage,
    stack: StateStack,
}

impl Rasterizer {
    pub fn new(width: u32, height: u32, background: Color) -> Self {
        Self {
            image: RgbaImage::from_pixel(width, height, background.to_rgba()),
            stack: StateStack::default(),
        }
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    fn draw_path(&mut self, path: &BezPath, fill: bool) {
        let state = self.stack.current().clone();
        let device_transform = glam_to_kurbo(state.transform);

        if fill {
            if let Some(brush) = state.brush {
                self.fill_device_path(&(device_transform * path.clone()), brush);
            }
        }

        if let Some(pen) = state.pen {
            self.stroke_path(path, pen, device_transform);
        }
    }

    fn stroke_path(&mut self, path: &BezPath, pen: Pen, device_transform: kurbo::Affine) {
        let outline = kurbo::stroke(
            path.iter(),
            &Stroke::new(pen.width.max(0.5) as f64),
            &StrokeOpts::default(),
            TOLERANCE,
        );

        self.fill_device_path(&(device_transform * outline), pen.color);
    }

    fn fill_device_path(&mut self, path: &BezPath, color: Color) {
        let bbox = path.bounding_box();

        if !(bbox.x0.is_finite()
            && bbox.y0.is_finite()
            && bbox.x1.is_finite()
            && bbox.y1.is_finite())
        {
            return;
        }

        let x0 = bbox.x0.floor().max(0.0) as u32;
        let y0 = bbox.y0.floor().max(0.0) as u32;
        let x1 = (bbox.x1.ceil().max(0.0) as u32).min(self.image.width());
        let y1 = (bbox.y1.ceil().max(0.0) as u32).min(self.image.height());

        let step = 1.0 / SUBSAMPLES as f64;
        let total = (SUBSAMPLES * SUBSAMPLES) as f32;

        for y in y0..y1 {
            for x in x0..x1 {
                let mut covered = 0;

                for sy in 0..SUBSAMPLES {
                    for sx in 0..SUBSAMPLES {
                        let sample = Point::new(
                            x as f64 + (sx as f64 + 0.5) * step,
                            y as f64 + (sy as f64 + 0.5) * step,
                        );

                        // Non-zero fill rule
                        if path.winding(sample) != 0 {
                            covered += 1;
                        }
                    }
                }

                if covered > 0 {
                    blend(self.image.get_pixel_mut(x, y), color.to_rgba(), covered as f32 / total);
                }
            }
        }
    }
}

fn blend(destination: &mut Rgba<u8>, source: Rgba<u8>, coverage: f32) {
    let alpha = coverage * source[3] as f32 / 255.0;

    for channel in 0..3 {
        let mixed = destination[channel] as f32 * (1.0 - alpha) + source[channel] as f32 * alpha;
        destination[channel] = mixed.round().clamp(0.0, 255.0) as u8;
    }

    destination[3] = destination[3].max((alpha * 255.0).round() as u8);
}

impl Painter for Rasterizer {
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
        self.draw_path(&rounded_rect_path(&rect, x_radius, y_radius), true);
    }

    fn draw_ellipse(&mut self, rect: Rect) {
        self.draw_path(&ellipse_path(&rect), true);
    }

    fn draw_arc(&mut self, rect: Rect, start_angle: f32, span_angle: f32) {
        self.draw_path(&arc_path(&rect, start_angle, span_angle), false);
    }

    fn draw_image(&mut self, top_left: Vec2, image: &Bitmap) {
        let transform = self.transform() * Affine2::from_translation(top_left);

        if transform.matrix2.determinant().abs() < f32::EPSILON {
            return;
        }

        let inverse = transform.inverse();
        let source_size = Vec2::new(image.width() as f32, image.height() as f32);
        let bounds = Rect::new(Vec2::ZERO, source_size).transformed(&transform);

        let x0 = bounds.min.x.floor().max(0.0) as u32;
        let y0 = bounds.min.y.floor().max(0.0) as u32;
        let x1 = (bounds.max.x.ceil().max(0.0) as u32).min(self.image.width());
        let y1 = (bounds.max.y.ceil().max(0.0) as u32).min(self.image.height());

        for y in y0..y1 {
            for x in x0..x1 {
                let source = inverse.transform_point2(Vec2::new(x as f32 + 0.5, y as f32 + 0.5));

                if source.x < 0.0
                    || source.y < 0.0
                    || source.x >= source_size.x
                    || source.y >= source_size.y
                {
                    continue;
                }

                let texel = *image.get_pixel(source.x as u32, source.y as u32);
                blend(self.image.get_pixel_mut(x, y), texel, 1.0);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_background_fill() {
        let rasterizer = Rasterizer::new(4, 4, Color::rgb(230, 200, 167));

        assert_eq!(*rasterizer.image().get_pixel(2, 2), Rgba([230, 200, 167, 255]));
    }

    #[test]
    fn test_ellipse_fills_center_not_corner() {
        let mut rasterizer = Rasterizer::new(20, 20, Color::WHITE);
        rasterizer.set_pen(None);
        rasterizer.set_brush(Some(Color::rgb(255, 0, 0)));
        rasterizer.draw_ellipse(Rect::from_xywh(0.0, 0.0, 20.0, 20.0));

        assert_eq!(*rasterizer.image().get_pixel(10, 10), Rgba([255, 0, 0, 255]));
        assert_eq!(*rasterizer.image().get_pixel(0, 0), Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn test_transform_moves_shape() {
        let mut rasterizer = Rasterizer::new(40, 40, Color::WHITE);
        rasterizer.set_pen(None);
        rasterizer.set_brush(Some(Color::BLACK));
        rasterizer.set_transform(Affine2::from_translation(Vec2::new(20.0, 20.0)));
        rasterizer.draw_rounded_rect(Rect::from_xywh(-5.0, -5.0, 10.0, 10.0), 25.0, 25.0);

        assert_eq!(*rasterizer.image().get_pixel(20, 20), Rgba([0, 0, 0, 255]));
        assert_eq!(*rasterizer.image().get_pixel(5, 5), Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn test_arc_is_stroked_only() {
        let mut rasterizer = Rasterizer::new(40, 40, Color::WHITE);
        rasterizer.set_brush(Some(Color::rgb(255, 0, 0)));
        rasterizer.set_pen(Some(Pen::new(Color::BLACK, 2.0)));
        rasterizer.draw_arc(Rect::from_xywh(0.0, 0.0, 40.0, 40.0), 190.0, 160.0);

        // Center of the circle is untouched, the bottom of the smile is inked.
        assert_eq!(*rasterizer.image().get_pixel(20, 20), Rgba([255, 255, 255, 255]));
        assert_ne!(*rasterizer.image().get_pixel(20, 39), Rgba([255, 255, 255, 255]));
        // The top half is outside the span.
        assert_eq!(*rasterizer.image().get_pixel(20, 0), Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn test_draw_image_scaled() {
        let bitmap: Bitmap = Arc::new(RgbaImage::from_pixel(2, 2, Rgba([0, 0, 255, 255])));
        let mut rasterizer = Rasterizer::new(10, 10, Color::WHITE);
        rasterizer.scale(2.0, 2.0);
        rasterizer.draw_image(Vec2::new(1.0, 1.0), &bitmap);

        assert_eq!(*rasterizer.image().get_pixel(3, 3), Rgba([0, 0, 255, 255]));
        assert_eq!(*rasterizer.image().get_pixel(6, 6), Rgba([255, 255, 255, 255]));
        assert_eq!(*rasterizer.image().get_pixel(1, 1), Rgba([255, 255, 255, 255]));
    }
}
