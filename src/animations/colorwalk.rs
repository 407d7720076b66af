use std::collections::VecDeque;

use rand::Rng;

use crate::animations::{check_width, Animation};
use crate::color::Color;

/// A hue trail: every tick draws the stored hues front to back, then
/// prepends a new hue a small random step away from the current front,
/// wrapped into [0, 1). Never finishes; the duration parameter is accepted
/// but unused, matching its historical signature.
pub struct ColorWalk {
    width: usize,
    strength: f32,
    hues: VecDeque<f32>,
}

impl ColorWalk {
    pub fn new(_duration: f64, strength: f32, start: f32, width: usize) -> Result<ColorWalk, String> {
        let width = check_width("ColorWalk", width)?;
        let mut hues = VecDeque::with_capacity(width);
        hues.push_front(start);
        Ok(ColorWalk {
            width,
            strength,
            hues,
        })
    }
}

impl Animation for ColorWalk {
    fn tick(&mut self, write: &mut dyn FnMut(i32, Color), _frame_length: f64) -> bool {
        for (i, hue) in self.hues.iter().enumerate().take(self.width) {
            write(i as i32, Color::hsv(*hue, 1.0, 1.0));
        }
        let front = self.hues.front().copied().unwrap_or(0.0);
        let direction = if rand::thread_rng().gen_bool(0.5) {
            1.0
        } else {
            -1.0
        };
        let next = (front + self.strength / 255.0 * direction).rem_euclid(1.0);
        self.hues.push_front(next);
        // Cap the history at the drawable width so long sessions don't grow
        // the trail without bound.
        self.hues.truncate(self.width);
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colorwalk_never_finishes_and_caps_its_history() {
        let mut walk = ColorWalk::new(4.0, 4.0, 0.0, 16).unwrap();
        let mut write = |_: i32, _: Color| {};
        for _ in 0..1_000 {
            assert!(!walk.tick(&mut write, 0.01666));
        }
        assert_eq!(walk.hues.len(), 16);
    }

    #[test]
    fn colorwalk_grows_one_pixel_per_tick() {
        let mut walk = ColorWalk::new(4.0, 4.0, 0.25, 16).unwrap();
        for expected in 1..=5 {
            let mut writes = 0;
            walk.tick(
                &mut |index, _| {
                    assert!(index < 16);
                    writes += 1;
                },
                0.01666,
            );
            assert_eq!(writes, expected);
        }
    }

    #[test]
    fn colorwalk_hues_stay_wrapped() {
        let mut walk = ColorWalk::new(4.0, 200.0, 0.9, 8).unwrap();
        let mut write = |_: i32, _: Color| {};
        for _ in 0..100 {
            walk.tick(&mut write, 0.01666);
        }
        for hue in &walk.hues {
            assert!((0.0..1.0).contains(hue), "hue {hue} escaped [0, 1)");
        }
    }
}
