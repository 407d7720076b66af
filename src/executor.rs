use crate::animations::Animation;
use crate::color::{Color, BLACK};
use crate::intervaltimer::IntervalTimer;
use crate::strip::Strip;

/// Identity handle for a registered layer.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct LayerId(u64);

struct Layer {
    id: LayerId,
    animation: Box<dyn Animation>,
    offset: i32,
}

/// Advances active animation layers once per frame, merges their writes
/// into a shared output buffer and flushes the result to the strip.
///
/// Layers draw in insertion order, so for any pixel written by more than
/// one layer in a frame the later-added layer wins. Unwritten pixels go
/// black. The buffer only lives for one frame: persistent layers must
/// redraw themselves on every tick.
pub struct Executor<'a, S: Strip> {
    strip: &'a mut S,
    layers: Vec<Layer>,
    out_buffer: Vec<Option<Color>>,
    refresh: f64,
    override_func: Box<dyn Fn() -> bool>,
    timer: IntervalTimer,
    next_id: u64,
}

impl<'a, S: Strip> Executor<'a, S> {
    pub fn new(strip: &'a mut S, refresh: f64) -> Result<Executor<'a, S>, String> {
        if refresh <= 0.0 {
            return Err(format!("refresh interval must be positive, got {refresh}"));
        }
        let length = strip.len();
        Ok(Executor {
            strip,
            layers: Vec::new(),
            out_buffer: vec![None; length],
            refresh,
            override_func: Box::new(|| true),
            timer: IntervalTimer::new(refresh, false),
            next_id: 0,
        })
    }

    /// Installs a gating predicate consulted per buffered pixel during
    /// `show`; pixels whose gate fails are flushed as black.
    pub fn set_override(&mut self, func: impl Fn() -> bool + 'static) {
        self.override_func = Box::new(func);
    }

    /// Registers an animation drawing at the given pixel offset and
    /// returns its handle.
    pub fn add(&mut self, animation: Box<dyn Animation>, offset: i32) -> LayerId {
        let id = LayerId(self.next_id);
        self.next_id += 1;
        self.layers.push(Layer {
            id,
            animation,
            offset,
        });
        id
    }

    /// Deregisters a layer. Removing an unknown or already-finished layer
    /// is a no-op.
    pub fn remove(&mut self, id: LayerId) {
        self.layers.retain(|layer| layer.id != id);
    }

    /// Drops all layers without touching the output buffer or the strip.
    pub fn clear(&mut self) {
        self.layers.clear();
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Produces one frame: advances every layer, drops finished ones,
    /// flushes the buffer and paces to the refresh interval.
    pub fn tick(&mut self) -> Result<(), String> {
        self.advance_layers();
        self.show(true)?;
        self.timer.sleep_until_next_tick();
        Ok(())
    }

    fn advance_layers(&mut self) {
        let refresh = self.refresh;
        let mut finished = Vec::new();
        for layer in &mut self.layers {
            let offset = layer.offset;
            let buffer = &mut self.out_buffer;
            let mut write = |index: i32, color: Color| {
                let index = index + offset;
                // Writes that land outside the strip after applying the
                // offset are dropped, they could never be displayed.
                if index >= 0 && (index as usize) < buffer.len() {
                    buffer[index as usize] = Some(color);
                }
            };
            if layer.animation.tick(&mut write, refresh) {
                finished.push(layer.id);
            }
        }
        for id in finished {
            self.remove(id);
        }
    }

    /// Flushes the assembled frame: buffered pixels passing the gate keep
    /// their color, everything else goes black. Clears the buffer
    /// afterwards unless asked to retain it.
    pub fn show(&mut self, clear_buffer: bool) -> Result<(), String> {
        for index in 0..self.out_buffer.len() {
            match self.out_buffer[index] {
                Some(color) if (self.override_func)() => self.strip.set_pixel(index, color),
                _ => self.strip.set_pixel(index, BLACK),
            }
        }
        self.strip.show()?;
        if clear_buffer {
            self.out_buffer.fill(None);
        }
        Ok(())
    }

    /// Runs whole ticks for approximately `period` seconds. The count
    /// truncates: a period below one refresh interval runs zero ticks and
    /// flushes nothing.
    pub fn play(&mut self, period: f64) -> Result<(), String> {
        let ticks = (period / self.refresh) as usize;
        for _ in 0..ticks {
            self.tick()?;
        }
        Ok(())
    }
}
