use crate::animations::{check_width, Animation, ColorSource};
use crate::color::Color;

/// Fills its whole width with one (possibly dynamic) color every tick.
/// Never finishes on its own, so it works as a permanent background layer
/// until the caller removes it.
pub struct Wash {
    color: ColorSource,
    width: usize,
}

impl Wash {
    pub fn new(color: ColorSource, width: usize) -> Result<Wash, String> {
        let width = check_width("Wash", width)?;
        Ok(Wash { color, width })
    }
}

impl Animation for Wash {
    fn tick(&mut self, write: &mut dyn FnMut(i32, Color), _frame_length: f64) -> bool {
        let color = self.color.resolve();
        for i in 0..self.width {
            write(i as i32, color);
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wash_never_finishes() {
        let mut wash = Wash::new(ColorSource::fixed(0x123456u32), 20).unwrap();
        let mut write = |_: i32, _: Color| {};
        for _ in 0..10_000 {
            assert!(!wash.tick(&mut write, 0.01666));
        }
    }

    #[test]
    fn wash_covers_every_pixel_in_its_width() {
        let color = Color::from(0x654321);
        let mut wash = Wash::new(ColorSource::fixed(color), 7).unwrap();
        let mut writes = Vec::new();
        wash.tick(
            &mut |index, color| {
                writes.push((index, color));
            },
            0.01,
        );
        assert_eq!(writes.len(), 7);
        for (expected, (index, written)) in writes.iter().enumerate() {
            assert_eq!(*index, expected as i32);
            assert_eq!(*written, color);
        }
    }

    #[test]
    fn wash_rejects_zero_width() {
        assert!(Wash::new(ColorSource::fixed(0u32), 0).is_err());
    }
}
