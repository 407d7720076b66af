use crate::animations::{check_duration, check_width, Animation, ColorSource};
use crate::color::Color;

/// A single dot travelling across the animation width. Starts at pixel 0
/// when moving up, at `width - 1` when moving down, and covers the whole
/// width in `duration` seconds.
pub struct Pew {
    color: ColorSource,
    duration: f64,
    width: usize,
    up: bool,
    pos: f64,
}

impl Pew {
    pub fn new(color: ColorSource, duration: f64, width: usize, up: bool) -> Result<Pew, String> {
        let duration = check_duration("Pew", duration)?;
        let width = check_width("Pew", width)?;
        let pos = if up { 0.0 } else { width as f64 - 1.0 };
        Ok(Pew {
            color,
            duration,
            width,
            up,
            pos,
        })
    }

    fn in_range(&self) -> bool {
        if self.up {
            self.pos < self.width as f64
        } else {
            self.pos >= 0.0
        }
    }

    fn step(&mut self, write: &mut dyn FnMut(i32, Color), frame_length: f64) {
        if !self.in_range() {
            return;
        }
        write(self.pos.round() as i32, self.color.resolve());
        let mut dx = frame_length / self.duration * self.width as f64;
        if !self.up {
            dx = -dx;
        }
        self.pos += dx;
    }

    fn finished(&self) -> bool {
        if self.up {
            self.pos >= self.width as f64
        } else {
            self.pos < 0.0
        }
    }
}

impl Animation for Pew {
    fn tick(&mut self, write: &mut dyn FnMut(i32, Color), frame_length: f64) -> bool {
        self.step(write, frame_length);
        self.finished()
    }
}

/// A Pew that additionally fills everything behind the moving edge with
/// its color and, when a second color is given, everything ahead of the
/// edge with that one. Completion comes from the underlying Pew.
pub struct Wipe {
    pew: Pew,
    color_two: Option<ColorSource>,
}

impl Wipe {
    pub fn new(
        color: ColorSource,
        duration: f64,
        width: usize,
        up: bool,
        color_two: Option<ColorSource>,
    ) -> Result<Wipe, String> {
        Ok(Wipe {
            pew: Pew::new(color, duration, width, up)?,
            color_two,
        })
    }
}

impl Animation for Wipe {
    fn tick(&mut self, write: &mut dyn FnMut(i32, Color), frame_length: f64) -> bool {
        let done = self.pew.tick(write, frame_length);
        let primary = self.pew.color.resolve();
        let secondary = self.color_two.as_mut().map(ColorSource::resolve);
        for i in 0..self.pew.width {
            let passed = if self.pew.up {
                (i as f64) < self.pew.pos
            } else {
                (i as f64) > self.pew.pos
            };
            if passed {
                write(i as i32, primary);
            } else if let Some(color) = secondary {
                write(i as i32, color);
            }
        }
        done
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn drive(animation: &mut dyn Animation, frame_length: f64) -> (HashMap<i32, Color>, bool) {
        let mut writes = HashMap::new();
        let done = animation.tick(
            &mut |index, color| {
                writes.insert(index, color);
            },
            frame_length,
        );
        (writes, done)
    }

    #[test]
    fn pew_up_completes_after_exactly_crossing_the_width() {
        // Width 100 at 2.0s duration and 0.01s frames advances half a pixel
        // per tick, so the position crosses 100 on tick 200.
        let mut pew = Pew::new(ColorSource::fixed(0xFF0000u32), 2.0, 100, true).unwrap();
        for tick in 1..200 {
            let (_, done) = drive(&mut pew, 0.01);
            assert!(!done, "finished early at tick {tick}");
        }
        let (_, done) = drive(&mut pew, 0.01);
        assert!(done);
    }

    #[test]
    fn pew_down_starts_at_far_end_and_completes_below_zero() {
        let mut pew = Pew::new(ColorSource::fixed(0x00FF00u32), 1.0, 10, false).unwrap();
        let (writes, done) = drive(&mut pew, 0.01);
        assert!(!done);
        assert_eq!(writes.len(), 1);
        assert!(writes.contains_key(&9));

        let mut done = false;
        for _ in 0..100 {
            done = drive(&mut pew, 0.01).1;
        }
        assert!(done);
    }

    #[test]
    fn pew_writes_one_dot_per_tick_at_advancing_positions() {
        let mut pew = Pew::new(ColorSource::fixed(0x0000FFu32), 1.0, 10, true).unwrap();
        let (first, _) = drive(&mut pew, 0.05);
        assert_eq!(first.keys().copied().collect::<Vec<_>>(), vec![0]);
        let (second, _) = drive(&mut pew, 0.05);
        assert!(second.contains_key(&1), "got {:?}", second.keys());
    }

    #[test]
    fn pew_rejects_degenerate_parameters() {
        assert!(Pew::new(ColorSource::fixed(0u32), 0.0, 10, true).is_err());
        assert!(Pew::new(ColorSource::fixed(0u32), -2.0, 10, true).is_err());
        assert!(Pew::new(ColorSource::fixed(0u32), 1.0, 0, true).is_err());
    }

    #[test]
    fn wipe_fills_passed_pixels_with_primary() {
        let primary = Color::from(0xAA0000);
        let mut wipe = Wipe::new(ColorSource::fixed(primary), 1.0, 10, true, None).unwrap();
        // Advance to the middle of the strip: pos = 5 after this tick.
        let (_, _) = drive(&mut wipe, 0.5);
        let (writes, _) = drive(&mut wipe, 0.0);
        for i in 0..5 {
            assert_eq!(writes.get(&i), Some(&primary), "pixel {i}");
        }
        assert!(!writes.contains_key(&7));
    }

    #[test]
    fn wipe_fills_remaining_pixels_with_secondary() {
        let primary = Color::from(0xAA0000);
        let secondary = Color::from(0x0000AA);
        let mut wipe = Wipe::new(
            ColorSource::fixed(primary),
            1.0,
            10,
            true,
            Some(ColorSource::fixed(secondary)),
        )
        .unwrap();
        let (_, _) = drive(&mut wipe, 0.5);
        let (writes, _) = drive(&mut wipe, 0.0);
        assert_eq!(writes.get(&2), Some(&primary));
        assert_eq!(writes.get(&8), Some(&secondary));
    }

    #[test]
    fn wipe_inherits_pew_completion() {
        // One pixel per tick: dx = 0.05 / 0.5 * 10 = 1.0.
        let mut wipe = Wipe::new(ColorSource::fixed(0x111111u32), 0.5, 10, true, None).unwrap();
        let mut ticks = 0;
        while !drive(&mut wipe, 0.05).1 {
            ticks += 1;
            assert!(ticks < 1_000, "wipe never finished");
        }
        assert_eq!(ticks, 9);
    }
}
