use crate::animations::{check_duration, check_width, Animation, ColorSource};
use crate::color::Color;

/// A symmetric pair of dots expanding outward from the midpoint until the
/// right edge leaves the animation width.
pub struct Boom {
    color: ColorSource,
    duration: f64,
    width: usize,
    left: f64,
    right: f64,
}

impl Boom {
    pub fn new(color: ColorSource, duration: f64, width: usize) -> Result<Boom, String> {
        let duration = check_duration("Boom", duration)?;
        let width = check_width("Boom", width)?;
        Ok(Boom {
            color,
            duration,
            width,
            left: (width as f64 / 2.0).floor(),
            right: (width as f64 / 2.0).ceil(),
        })
    }
}

impl Animation for Boom {
    fn tick(&mut self, write: &mut dyn FnMut(i32, Color), frame_length: f64) -> bool {
        let color = self.color.resolve();
        write(self.left.round() as i32, color);
        write(self.right.round() as i32, color);
        let dx = frame_length / self.duration * (self.width as f64 / 2.0);
        self.right += dx;
        self.left -= dx;
        self.right >= self.width as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boom_edges_cover_the_width_after_duration() {
        let mut boom = Boom::new(ColorSource::fixed(0xFFFFFFu32), 1.0, 50).unwrap();
        let mut write = |_: i32, _: Color| {};
        let mut done = false;
        // 100 ticks of 0.01s cover the 1.0s duration exactly.
        for _ in 0..100 {
            done = boom.tick(&mut write, 0.01);
        }
        assert!(done);
        assert!(boom.left <= 0.0, "left edge at {}", boom.left);
        assert!(boom.right >= 50.0, "right edge at {}", boom.right);
    }

    #[test]
    fn boom_starts_at_the_midpoint() {
        let mut boom = Boom::new(ColorSource::fixed(0xFF00FFu32), 2.0, 51).unwrap();
        let mut writes = Vec::new();
        boom.tick(
            &mut |index, _| {
                writes.push(index);
            },
            0.01,
        );
        assert_eq!(writes, vec![25, 26]);
    }

    #[test]
    fn boom_rejects_degenerate_duration() {
        assert!(Boom::new(ColorSource::fixed(0u32), 0.0, 50).is_err());
        assert!(Boom::new(ColorSource::fixed(0u32), -1.0, 50).is_err());
    }
}
