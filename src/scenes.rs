use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use rand::seq::SliceRandom;
use rand::Rng;

use crate::animations::boom::Boom;
use crate::animations::colorwalk::ColorWalk;
use crate::animations::pew::{Pew, Wipe};
use crate::animations::randfade::RandFade;
use crate::animations::wash::Wash;
use crate::animations::ColorSource;
use crate::color::{self, Color, FixedColor};
use crate::executor::{Executor, LayerId};
use crate::intervaltimer::IntervalTimer;
use crate::strip::Strip;

pub type SceneFn<S> = fn(&mut S, &AtomicBool, f64) -> Result<(), String>;

pub fn all<S: Strip>() -> Vec<(&'static str, SceneFn<S>)> {
    vec![
        ("pew_pew", pew_pew::<S> as SceneFn<S>),
        ("xmas_pew", xmas_pew::<S>),
        ("morph_pew", morph_pew::<S>),
        ("starfall", starfall::<S>),
        ("random_fades", random_fades::<S>),
        ("random_booms", random_booms::<S>),
        ("random_wipes", random_wipes::<S>),
        ("color_walk", color_walk::<S>),
        ("flame", flame::<S>),
        ("blinkenlights", blinkenlights::<S>),
    ]
}

pub fn by_name<S: Strip>(name: &str) -> Option<SceneFn<S>> {
    all::<S>()
        .into_iter()
        .find(|(scene_name, _)| *scene_name == name)
        .map(|(_, scene)| scene)
}

/// Plays randomly picked scenes until the stop flag is raised.
pub fn run_random<S: Strip>(strip: &mut S, stop: &AtomicBool, refresh: f64) -> Result<(), String> {
    let scenes = all::<S>();
    while !interrupted(stop) {
        let (name, scene) = *scenes.choose(&mut rand::thread_rng()).unwrap();
        log::info!("Playing scene {name}");
        scene(strip, stop, refresh)?;
    }
    Ok(())
}

fn interrupted(stop: &AtomicBool) -> bool {
    stop.load(Ordering::Relaxed)
}

/// Fraction [0, 1) of the way through a repeating wall-clock cycle,
/// shifted by `offset_ms`.
fn cycle_fraction(cycle_ms: u64, offset_ms: u64) -> f32 {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64;
    ((now + offset_ms) % cycle_ms) as f32 / cycle_ms as f32
}

/// Shared chase loop: keeps adding pews from the factory over an optional
/// background wash, playing `period` seconds between launches.
fn run_pews<S: Strip>(
    strip: &mut S,
    stop: &AtomicBool,
    refresh: f64,
    period: f64,
    cycles: u32,
    background: Option<Wash>,
    pew_factory: &mut dyn FnMut(usize) -> Result<Pew, String>,
) -> Result<(), String> {
    let width = strip.len();
    let mut executor = Executor::new(strip, refresh)?;
    if let Some(wash) = background {
        executor.add(Box::new(wash), 0);
    }
    for _ in 0..cycles {
        if interrupted(stop) {
            break;
        }
        executor.add(Box::new(pew_factory(width)?), 0);
        executor.play(period)?;
    }
    Ok(())
}

/// Rapid-fire random hue chases.
pub fn pew_pew<S: Strip>(strip: &mut S, stop: &AtomicBool, refresh: f64) -> Result<(), String> {
    run_pews(strip, stop, refresh, 0.125, 480, None, &mut |width| {
        let duration = rand::thread_rng().gen_range(2.0..3.0);
        Pew::new(ColorSource::fixed(color::random_hue()), duration, width, true)
    })
}

/// Slow red chases over a dim green background.
pub fn xmas_pew<S: Strip>(strip: &mut S, stop: &AtomicBool, refresh: f64) -> Result<(), String> {
    let background = Wash::new(ColorSource::fixed(0x085500u32), strip.len())?;
    run_pews(strip, stop, refresh, 0.5, 120, Some(background), &mut |width| {
        Pew::new(ColorSource::fixed(0xFF0000u32), 4.0, width, true)
    })
}

/// Chases whose hue cycles with wall-clock time over a complementary,
/// dimmer background hue half a cycle away.
pub fn morph_pew<S: Strip>(strip: &mut S, stop: &AtomicBool, refresh: f64) -> Result<(), String> {
    const CYCLE_MS: u64 = 4000;

    let up = rand::thread_rng().gen_bool(0.5);
    let background = Wash::new(
        // Half a cycle ahead of the foreground hue, dimmed way down.
        ColorSource::dynamic(|| Color::hsv(cycle_fraction(CYCLE_MS, CYCLE_MS / 2), 1.0, 0.2)),
        strip.len(),
    )?;
    run_pews(
        strip,
        stop,
        refresh * 2.0,
        0.25,
        480,
        Some(background),
        &mut move |width| {
            Pew::new(
                ColorSource::dynamic(|| Color::hsv(cycle_fraction(CYCLE_MS, 0), 1.0, 1.0)),
                4.0,
                width,
                up,
            )
        },
    )
}

/// Muted falling dots, spawned probabilistically.
pub fn starfall<S: Strip>(strip: &mut S, stop: &AtomicBool, refresh: f64) -> Result<(), String> {
    const DURATION: f64 = 60.0;
    const CHECK_PERIOD: f64 = 0.1;
    const CHANCE: f64 = 0.75;

    let width = strip.len();
    let mut executor = Executor::new(strip, refresh / 2.0)?;
    let cycles = (DURATION / CHECK_PERIOD) as u32;
    for _ in 0..cycles {
        if interrupted(stop) {
            break;
        }
        let mut rng = rand::thread_rng();
        if rng.gen_bool(CHANCE) {
            let star = Color::hsv(rng.gen(), rng.gen::<f32>() / 2.0, rng.gen());
            let duration = f64::from(rng.gen_range(1..=4)) / 2.0;
            executor.add(
                Box::new(Pew::new(ColorSource::fixed(star), duration, width, false)?),
                0,
            );
        }
        executor.play(CHECK_PERIOD)?;
    }
    Ok(())
}

/// Fades between random hues, one pixel at a time in random order.
pub fn random_fades<S: Strip>(strip: &mut S, stop: &AtomicBool, refresh: f64) -> Result<(), String> {
    const FADE_DURATION: f64 = 1.25;
    const CYCLES: u32 = 24;

    let width = strip.len();
    let mut executor = Executor::new(strip, refresh)?;
    let mut last_hue = color::random_hue();
    for _ in 0..CYCLES {
        if interrupted(stop) {
            break;
        }
        let next_hue = color::random_hue();
        executor.add(
            Box::new(RandFade::new(last_hue, next_hue, FADE_DURATION, width)?),
            0,
        );
        last_hue = next_hue;
        executor.play(FADE_DURATION)?;
    }
    Ok(())
}

/// Random-hue booms expanding from random strip positions.
pub fn random_booms<S: Strip>(strip: &mut S, stop: &AtomicBool, refresh: f64) -> Result<(), String> {
    const DURATION: f64 = 60.0;
    const BOOM_LENGTH: f64 = 2.5;
    const BOOM_WIDTH: usize = 50;

    let width = strip.len();
    let mut executor = Executor::new(strip, refresh)?;
    let cycles = (DURATION / BOOM_LENGTH) as u32;
    for _ in 0..cycles {
        if interrupted(stop) {
            break;
        }
        let offset = rand::thread_rng().gen_range(0..width) as i32 - (BOOM_WIDTH as i32 / 2);
        executor.add(
            Box::new(Boom::new(
                ColorSource::fixed(color::random_hue()),
                BOOM_LENGTH,
                BOOM_WIDTH,
            )?),
            offset,
        );
        executor.play(BOOM_LENGTH)?;
    }
    Ok(())
}

/// Segmented color wipes sweeping up and down in alternation. Spent wipes
/// from the previous half-cycle are removed explicitly, since a finished
/// Wipe keeps repainting its fill.
pub fn random_wipes<S: Strip>(strip: &mut S, stop: &AtomicBool, refresh: f64) -> Result<(), String> {
    const WIPE_DURATION: f64 = 2.0;
    const CYCLES: u32 = 15;

    let width = strip.len();
    let step = WIPE_DURATION / 4.0;
    let mut executor = Executor::new(strip, refresh)?;
    let mut spent: Vec<LayerId> = Vec::new();
    'cycles: for _ in 0..CYCLES {
        for up in [true, false] {
            if interrupted(stop) {
                break 'cycles;
            }
            let segments = rand::thread_rng().gen_range(1..=6);
            let segment_width = (width / segments).max(1);
            let hue = color::random_hue();
            let mut fresh = Vec::new();
            for segment in 0..segments {
                let wipe = Wipe::new(ColorSource::fixed(hue), step, segment_width, up, None)?;
                fresh.push(executor.add(Box::new(wipe), (segment * segment_width) as i32));
            }
            executor.play(step)?;
            for id in spent.drain(..) {
                executor.remove(id);
            }
            spent = fresh;
            // Idle half-step: the fresh wipes keep their fill on screen.
            executor.play(step)?;
        }
    }
    Ok(())
}

/// A single slowly wandering hue trail.
pub fn color_walk<S: Strip>(strip: &mut S, stop: &AtomicBool, refresh: f64) -> Result<(), String> {
    const DURATION_SECS: u32 = 60;

    let width = strip.len();
    let mut executor = Executor::new(strip, refresh)?;
    executor.add(Box::new(ColorWalk::new(4.0, 4.0, 0.0, width)?), 0);
    for _ in 0..DURATION_SECS {
        if interrupted(stop) {
            break;
        }
        executor.play(1.0)?;
    }
    Ok(())
}

/// Candle flicker: full-strip washes dipping from the base hue towards a
/// darker one and back, in a fixed sequence of burn depths.
pub fn flame<S: Strip>(strip: &mut S, stop: &AtomicBool, _refresh: f64) -> Result<(), String> {
    let base = Color::rgb(255, 120, 10);
    let burn = Color::rgb(255, 110, 10);
    let flicker = Color::rgb(255, 105, 10);
    let flutter = Color::rgb(255, 95, 10);

    let plan = [
        (10.0, burn),
        (5.0, flicker),
        (8.0, burn),
        (3.0, flutter),
        (6.0, burn),
        (10.0, burn),
        (10.0, flicker),
    ];
    for (duration, dip_hue) in plan {
        if interrupted(stop) {
            break;
        }
        play_dips(strip, stop, duration, dip_hue, base)?;
    }
    Ok(())
}

const FLAME_TICK: f64 = 0.0025;
const DIP_SECS: f64 = 0.125;

fn play_dips<S: Strip>(
    strip: &mut S,
    stop: &AtomicBool,
    duration: f64,
    dip_hue: Color,
    base: Color,
) -> Result<(), String> {
    let mut timer = IntervalTimer::new(FLAME_TICK, false);
    let mut elapsed = 0.0;
    while elapsed < duration {
        if interrupted(stop) {
            break;
        }
        fade_wash(strip, &mut timer, base, dip_hue, DIP_SECS / 2.0)?;
        fade_wash(strip, &mut timer, dip_hue, base, DIP_SECS / 2.0)?;
        elapsed += DIP_SECS;
    }
    Ok(())
}

fn fade_wash<S: Strip>(
    strip: &mut S,
    timer: &mut IntervalTimer,
    from: Color,
    to: Color,
    duration: f64,
) -> Result<(), String> {
    let mut elapsed = 0.0;
    while elapsed < duration {
        let current = from.translate(to, (elapsed / duration) as f32);
        for i in 0..strip.len() {
            strip.set_pixel(i, current);
        }
        strip.show()?;
        timer.sleep_until_next_tick();
        elapsed += FLAME_TICK;
    }
    Ok(())
}

/// Spaced lights sliding through their spacing, a few rounds per randomly
/// picked color scheme.
pub fn blinkenlights<S: Strip>(
    strip: &mut S,
    stop: &AtomicBool,
    _refresh: f64,
) -> Result<(), String> {
    const ROUNDS: u32 = 10;
    const SLIDES_PER_SCHEME: u32 = 3;
    const SPACING: usize = 1;

    for _ in 0..ROUNDS {
        if interrupted(stop) {
            break;
        }
        let mut scheme = ColorScheme::pick();
        for _ in 0..SLIDES_PER_SCHEME {
            slide_spaced(strip, stop, SPACING, &mut scheme)?;
        }
    }
    Ok(())
}

fn slide_spaced<S: Strip>(
    strip: &mut S,
    stop: &AtomicBool,
    spacing: usize,
    scheme: &mut ColorScheme,
) -> Result<(), String> {
    for phase in 0..=spacing {
        if interrupted(stop) {
            break;
        }
        strip.clear();
        let mut i = phase;
        while i < strip.len() {
            strip.set_pixel(i, scheme.next_color());
            i += spacing + 1;
        }
        strip.show()?;
        thread::sleep(Duration::from_millis(500));
    }
    Ok(())
}

/// How blinkenlights pick their colors. `Fixed` keeps one hue for the
/// scheme's whole lifetime; the others draw fresh on every pixel.
enum ColorScheme {
    Festive,
    Uniform,
    Hue,
    Fixed(FixedColor),
}

impl ColorScheme {
    fn pick() -> ColorScheme {
        match rand::thread_rng().gen_range(0..4) {
            0 => ColorScheme::Festive,
            1 => ColorScheme::Uniform,
            2 => ColorScheme::Hue,
            _ => ColorScheme::Fixed(FixedColor::new()),
        }
    }

    fn next_color(&mut self) -> Color {
        match self {
            ColorScheme::Festive => color::random_festive(),
            ColorScheme::Uniform => color::random_color(),
            ColorScheme::Hue => color::random_hue(),
            ColorScheme::Fixed(fixed) => fixed.color(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strip::OlaStrip;

    #[test]
    fn every_listed_scene_resolves_by_name() {
        for (name, _) in all::<OlaStrip>() {
            assert!(by_name::<OlaStrip>(name).is_some(), "{name} missing");
        }
        assert!(by_name::<OlaStrip>("does_not_exist").is_none());
    }

    #[test]
    fn fixed_scheme_repeats_one_color() {
        let mut scheme = ColorScheme::Fixed(FixedColor::new());
        let first = scheme.next_color();
        for _ in 0..20 {
            assert_eq!(scheme.next_color(), first);
        }
    }
}
