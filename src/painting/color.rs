use image::Rgba;

/// Opaque 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const LIGHT_GRAY: Color = Color::rgb(192, 192, 192);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Brightens the color by `percent` (130 means 30% brighter) in HSV space.
    ///
    /// When the value channel would overflow, the excess is taken out of the saturation
    /// instead, so saturated colors wash out towards white. Factors below 100 darken.
    pub fn lighter(&self, percent: u32) -> Color {
        if percent == 0 {
            return *self;
        }

        let (hue, mut saturation, mut value) = self.to_hsv();
        value *= percent as f32 / 100.0;

        if value > 1.0 {
            saturation = (saturation - (value - 1.0)).max(0.0);
            value = 1.0;
        }

        Color::from_hsv(hue, saturation, value)
    }

    /// Returns hue in degrees, saturation and value in `0.0..=1.0`.
    fn to_hsv(&self) -> (f32, f32, f32) {
        let r = self.r as f32 / 255.0;
        let g = self.g as f32 / 255.0;
        let b = self.b as f32 / 255.0;

        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let delta = max - min;

        let hue = if delta == 0.0 {
            0.0
        } else if max == r {
            60.0 * ((g - b) / delta).rem_euclid(6.0)
        } else if max == g {
            60.0 * ((b - r) / delta + 2.0)
        } else {
            60.0 * ((r - g) / delta + 4.0)
        };

        let saturation = if max == 0.0 { 0.0 } else { delta / max };

        (hue, saturation, max)
    }

    fn from_hsv(hue: f32, saturation: f32, value: f32) -> Color {
        let chroma = value * saturation;
        let sector = hue / 60.0;
        let x = chroma * (1.0 - (sector.rem_euclid(2.0) - 1.0).abs());

        let (r, g, b) = match sector as u32 {
            0 => (chroma, x, 0.0),
            1 => (x, chroma, 0.0),
            2 => (0.0, chroma, x),
            3 => (0.0, x, chroma),
            4 => (x, 0.0, chroma),
            _ => (chroma, 0.0, x),
        };

        let m = value - chroma;
        let to_channel = |c: f32| ((c + m) * 255.0).round().clamp(0.0, 255.0) as u8;

        Color::rgb(to_channel(r), to_channel(g), to_channel(b))
    }

    pub fn to_rgba(&self) -> Rgba<u8> {
        Rgba([self.r, self.g, self.b, 255])
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::LIGHT_GRAY
    }
}
