use palette::{FromColor, Hsv, Srgb};
use rand::seq::SliceRandom;
use rand::Rng;

/// A packed 24-bit RGB value, 0xRRGGBB.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Color(u32);

pub const BLACK: Color = Color(0x000000);

impl Color {
    /// Packs three channel values into one color. Out-of-range channels
    /// saturate to [0, 255] instead of erroring.
    pub fn rgb(r: i32, g: i32, b: i32) -> Color {
        let clamp = |channel: i32| channel.clamp(0, 255) as u32;
        Color((clamp(r) << 16) | (clamp(g) << 8) | clamp(b))
    }

    pub fn split(self) -> (u8, u8, u8) {
        let r = ((self.0 >> 16) & 0xFF) as u8;
        let g = ((self.0 >> 8) & 0xFF) as u8;
        let b = (self.0 & 0xFF) as u8;
        (r, g, b)
    }

    /// Converts hue, saturation and value (each in [0, 1]) to a packed color.
    /// Channels are rounded to the nearest integer.
    pub fn hsv(h: f32, s: f32, v: f32) -> Color {
        let rgb: Srgb<u8> = Srgb::from_color(Hsv::new(h * 360.0, s, v)).into_format();
        Color::rgb(i32::from(rgb.red), i32::from(rgb.green), i32::from(rgb.blue))
    }

    /// Per-channel linear interpolation towards `other` by `t`.
    ///
    /// `t` is intentionally not clamped: callers may pass values beyond
    /// [0, 1] to overshoot, the result saturates per channel.
    pub fn translate(self, other: Color, t: f32) -> Color {
        let (r1, g1, b1) = self.split();
        let (r2, g2, b2) = other.split();
        let lerp =
            |a: u8, b: u8| (f32::from(a) + (t * (f32::from(b) - f32::from(a))).round()) as i32;
        Color::rgb(lerp(r1, r2), lerp(g1, g2), lerp(b1, b2))
    }

    pub fn packed(self) -> u32 {
        self.0
    }
}

impl From<u32> for Color {
    fn from(raw: u32) -> Color {
        Color(raw & 0xFFFFFF)
    }
}

pub fn random_color() -> Color {
    Color(rand::thread_rng().gen_range(0..=0xFFFFFF))
}

pub fn random_hue() -> Color {
    Color::hsv(rand::thread_rng().gen(), 1.0, 1.0)
}

pub fn random_festive() -> Color {
    let palette = [Color(0xFFFFFF), Color(0xFF0000), Color(0x00FF00)];
    *palette.choose(&mut rand::thread_rng()).unwrap()
}

/// Picks one random hue on first use and keeps returning it until reset.
pub struct FixedColor {
    cached: Option<Color>,
}

impl FixedColor {
    pub fn new() -> FixedColor {
        FixedColor { cached: None }
    }

    pub fn color(&mut self) -> Color {
        *self.cached.get_or_insert_with(random_hue)
    }

    pub fn reset(&mut self) {
        self.cached = None;
    }
}
