use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use image::RgbaImage;

use crate::painting::color::Color;

/// Shared, immutable RGBA bitmap. Cloning only bumps the reference count.
pub type Bitmap = Arc<RgbaImage>;

/// Data carried by a drag interaction.
#[derive(Debug, Clone)]
pub enum Payload {
    Color(Color),
    Image(Bitmap),
    /// Anything else, e.g. plain text or a file name. No part accepts it.
    Text(String),
}

impl Payload {
    pub fn load_image(path: impl AsRef<Path>) -> anyhow::Result<Payload> {
        let path = path.as_ref();
        let image = image::open(path)
            .with_context(|| format!("Failed to load image {}", path.display()))?
            .into_rgba8();

        log::debug!(
            "Loaded image payload {} ({}x{})",
            path.display(),
            image.width(),
            image.height()
        );

        Ok(Payload::Image(Arc::new(image)))
    }

    pub fn color(&self) -> Option<Color> {
        match self {
            Payload::Color(color) => Some(*color),
            _ => None,
        }
    }

    pub fn image(&self) -> Option<&Bitmap> {
        match self {
            Payload::Image(image) => Some(image),
            _ => None,
        }
    }

    pub fn has_color(&self) -> bool {
        self.color().is_some()
    }

    pub fn has_image(&self) -> bool {
        self.image().is_some()
    }
}

impl From<Color> for Payload {
    fn from(color: Color) -> Self {
        Payload::Color(color)
    }
}

impl From<RgbaImage> for Payload {
    fn from(image: RgbaImage) -> Self {
        Payload::Image(Arc::new(image))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        let color = Payload::from(Color::WHITE);
        let image = Payload::from(RgbaImage::new(1, 1));
        let text = Payload::Text("hello".to_string());

        assert!(color.has_color() && !color.has_image());
        assert!(image.has_image() && !image.has_color());
        assert!(!text.has_color() && !text.has_image());
    }

    #[test]
    fn test_load_image_converts_to_rgba() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gray.png");
        image::GrayImage::from_pixel(3, 2, image::Luma([90])).save(&path).unwrap();

        let payload = Payload::load_image(&path).unwrap();
        let bitmap = payload.image().unwrap();

        assert_eq!(bitmap.dimensions(), (3, 2));
        assert_eq!(*bitmap.get_pixel(1, 1), image::Rgba([90, 90, 90, 255]));
    }

    #[test]
    fn test_load_missing_image_fails() {
        assert!(Payload::load_image("does/not/exist.png").is_err());
    }
}
