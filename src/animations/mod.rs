pub(crate) mod boom;
pub(crate) mod colorwalk;
pub(crate) mod pew;
pub(crate) mod randfade;
pub(crate) mod wash;

use crate::color::Color;

/// A time-driven layer advancing once per frame.
///
/// `tick` writes zero or more pixel updates through `write` and returns
/// true once the animation is finished and should be dropped. Indices are
/// local to the animation; the executor applies the layer offset.
pub trait Animation {
    fn tick(&mut self, write: &mut dyn FnMut(i32, Color), frame_length: f64) -> bool;
}

/// A fixed color or a closure producing one, resolved once per tick.
/// The closure form enables per-frame dynamic colors such as a cycling hue.
pub enum ColorSource {
    Fixed(Color),
    Dynamic(Box<dyn FnMut() -> Color>),
}

impl ColorSource {
    pub fn fixed(color: impl Into<Color>) -> ColorSource {
        ColorSource::Fixed(color.into())
    }

    pub fn dynamic(func: impl FnMut() -> Color + 'static) -> ColorSource {
        ColorSource::Dynamic(Box::new(func))
    }

    pub fn resolve(&mut self) -> Color {
        match self {
            ColorSource::Fixed(color) => *color,
            ColorSource::Dynamic(func) => func(),
        }
    }
}

pub(crate) fn check_duration(name: &str, duration: f64) -> Result<f64, String> {
    if duration > 0.0 {
        Ok(duration)
    } else {
        Err(format!("{name}: duration must be positive, got {duration}"))
    }
}

pub(crate) fn check_width(name: &str, width: usize) -> Result<usize, String> {
    if width > 0 {
        Ok(width)
    } else {
        Err(format!("{name}: width must be at least one pixel"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn fixed_source_resolves_to_its_color() {
        let mut source = ColorSource::fixed(0xAA55AAu32);
        assert_eq!(source.resolve(), Color::from(0xAA55AA));
        assert_eq!(source.resolve(), Color::from(0xAA55AA));
    }

    #[test]
    fn dynamic_source_is_reevaluated_on_every_resolve() {
        let calls = Rc::new(Cell::new(0u8));
        let counter = Rc::clone(&calls);
        let mut source = ColorSource::dynamic(move || {
            counter.set(counter.get() + 1);
            Color::rgb(i32::from(counter.get()), 0, 0)
        });
        assert_eq!(source.resolve(), Color::rgb(1, 0, 0));
        assert_eq!(source.resolve(), Color::rgb(2, 0, 0));
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn degenerate_parameters_are_rejected() {
        assert!(check_duration("test", 0.0).is_err());
        assert!(check_duration("test", -1.0).is_err());
        assert!(check_duration("test", 0.5).is_ok());
        assert!(check_width("test", 0).is_err());
        assert!(check_width("test", 1).is_ok());
    }
}
