use rand::seq::SliceRandom;

use crate::animations::{check_duration, check_width, Animation};
use crate::color::Color;

/// Fades from one color to another in a random pixel order: a shuffled
/// permutation of the width is painted with the target color up to the
/// current progress, the rest keeps the source color.
///
/// Completion is intentionally reported only at twice the duration, so the
/// fully faded frame keeps redrawing for a second duration.
pub struct RandFade {
    color_one: Color,
    color_two: Color,
    duration: f64,
    width: usize,
    elapsed: f64,
    order: Vec<usize>,
}

impl RandFade {
    pub fn new(
        color_one: Color,
        color_two: Color,
        duration: f64,
        width: usize,
    ) -> Result<RandFade, String> {
        let duration = check_duration("RandFade", duration)?;
        let width = check_width("RandFade", width)?;
        let mut order: Vec<usize> = (0..width).collect();
        order.shuffle(&mut rand::thread_rng());
        Ok(RandFade {
            color_one,
            color_two,
            duration,
            width,
            elapsed: 0.0,
            order,
        })
    }
}

impl Animation for RandFade {
    fn tick(&mut self, write: &mut dyn FnMut(i32, Color), frame_length: f64) -> bool {
        self.elapsed += frame_length;
        let progress = (self.elapsed / self.duration * self.width as f64) as i32;
        for (i, &target) in self.order.iter().enumerate() {
            let color = if i as i32 <= progress {
                self.color_two
            } else {
                self.color_one
            };
            write(target as i32, color);
        }
        self.elapsed >= 2.0 * self.duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn randfade_paints_every_pixel_each_tick() {
        let source = Color::from(0x101010);
        let target = Color::from(0xF0F0F0);
        let mut fade = RandFade::new(source, target, 1.0, 30).unwrap();
        let mut writes = HashMap::new();
        fade.tick(
            &mut |index, color| {
                writes.insert(index, color);
            },
            0.01,
        );
        assert_eq!(writes.len(), 30);
        for i in 0..30 {
            assert!(writes.contains_key(&i));
        }
    }

    #[test]
    fn randfade_shows_only_target_after_one_duration() {
        let source = Color::from(0x101010);
        let target = Color::from(0xF0F0F0);
        let mut fade = RandFade::new(source, target, 0.5, 20).unwrap();
        let mut writes = HashMap::new();
        // 60 ticks of 0.01s: past one duration, before two.
        for _ in 0..60 {
            writes.clear();
            let done = fade.tick(
                &mut |index, color| {
                    writes.insert(index, color);
                },
                0.01,
            );
            assert!(!done);
        }
        assert!(writes.values().all(|color| *color == target));
    }

    #[test]
    fn randfade_completes_at_double_duration() {
        let mut fade =
            RandFade::new(Color::from(0), Color::from(0xFFFFFF), 0.5, 10).unwrap();
        let mut write = |_: i32, _: Color| {};
        let mut ticks = 0;
        while !fade.tick(&mut write, 0.01) {
            ticks += 1;
            assert!(ticks < 1_000, "fade never finished");
        }
        // 0.5s duration at 0.01s frames: done once elapsed reaches 1.0s.
        assert_eq!(ticks, 99);
    }

    #[test]
    fn randfade_rejects_degenerate_parameters() {
        let black = Color::from(0);
        assert!(RandFade::new(black, black, 0.0, 10).is_err());
        assert!(RandFade::new(black, black, 1.0, 0).is_err());
    }
}
