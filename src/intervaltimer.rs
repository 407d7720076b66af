use std::thread;
use std::time::{Duration, Instant};

/// Paces a loop to a fixed interval. Deadlines derive from the previous
/// deadline instead of "now", so the work done inside a frame does not
/// accumulate as drift.
pub struct IntervalTimer {
    interval: Duration,
    last_tick: Instant,
    measure_fps: bool,
    last_fps_report: Instant,
    frames: u32,
}

impl IntervalTimer {
    pub fn new(interval_secs: f64, measure_fps: bool) -> IntervalTimer {
        IntervalTimer {
            interval: Duration::from_secs_f64(interval_secs),
            last_tick: Instant::now(),
            measure_fps,
            last_fps_report: Instant::now(),
            frames: 0,
        }
    }

    pub fn sleep_until_next_tick(&mut self) {
        if self.measure_fps {
            self.update_fps();
        }

        let now = Instant::now();
        let next_tick = if self.last_tick + self.interval > now {
            self.last_tick + self.interval
        } else {
            log::debug!("Frame pacing fell behind, skipping ahead");
            now + self.interval
        };

        thread::sleep(next_tick.saturating_duration_since(Instant::now()));
        self.last_tick = next_tick;
    }

    fn update_fps(&mut self) {
        self.frames += 1;

        if Instant::now() - self.last_fps_report > Duration::from_secs(1) {
            log::debug!("FPS: {}", self.frames);
            self.frames = 0;
            self.last_fps_report = Instant::now();
        }
    }
}
