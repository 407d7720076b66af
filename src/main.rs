pub(crate) mod animations;
pub(crate) mod color;
pub(crate) mod config;
pub(crate) mod executor;
pub(crate) mod intervaltimer;
pub(crate) mod scenes;
pub(crate) mod strip;

use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use clap::Parser;

use crate::config::Config;
use crate::strip::{OlaStrip, Strip};

#[derive(Parser)]
struct Cli {
    /// Scene to play; scenes are picked at random when omitted
    #[arg(short, long, value_name = "NAME")]
    scene: Option<String>,

    /// TOML config file
    #[arg(short, long, value_name = "FILE")]
    config: Option<std::path::PathBuf>,

    /// Number of pixels on the strip
    #[arg(short, long)]
    pixels: Option<usize>,

    /// Global brightness (0-255)
    #[arg(short, long)]
    brightness: Option<u8>,

    /// Address of the OLA daemon's OSC input
    #[arg(short, long, value_name = "ADDR")]
    ola_addr: Option<String>,

    /// List available scenes and exit
    #[arg(long)]
    list: bool,
}

fn load_config(args: &Cli) -> Config {
    let mut config = match args.config.as_deref() {
        Some(path) => match Config::load(path) {
            Ok(config) => config,
            Err(msg) => panic!("{}", msg),
        },
        None => Config::default(),
    };
    if let Some(pixels) = args.pixels {
        config.pixel_count = pixels;
    }
    if let Some(brightness) = args.brightness {
        config.brightness = brightness;
    }
    if let Some(ola_addr) = &args.ola_addr {
        config.ola_addr = ola_addr.clone();
    }
    config
}

fn main() {
    env_logger::init();
    let args = Cli::parse();

    if args.list {
        for (name, _) in scenes::all::<OlaStrip>() {
            println!("{name}");
        }
        return;
    }

    let config = load_config(&args);

    let ola_addr = match SocketAddr::from_str(&config.ola_addr) {
        Ok(addr) => addr,
        Err(err) => panic!("Bad OLA address {}: {}", config.ola_addr, err),
    };

    let mut strip = match OlaStrip::new(ola_addr, config.universe, config.pixel_count) {
        Ok(strip) => strip,
        Err(msg) => panic!("Cannot set up OLA output: {}", msg),
    };
    if let Err(msg) = strip.begin() {
        panic!("Cannot initialize strip: {}", msg);
    }
    strip.set_brightness(config.brightness);

    let stop = Arc::new(AtomicBool::new(false));
    {
        let stop = Arc::clone(&stop);
        if let Err(err) = ctrlc::set_handler(move || stop.store(true, Ordering::Relaxed)) {
            panic!("Cannot install signal handler: {}", err);
        }
    }

    log::info!(
        "Driving {} pixels at {} (universe {})",
        config.pixel_count,
        config.ola_addr,
        config.universe
    );

    let result = match args.scene.as_deref() {
        Some(name) => match scenes::by_name::<OlaStrip>(name) {
            Some(scene) => scene(&mut strip, &stop, config.refresh),
            None => panic!("Unknown scene: {}", name),
        },
        None => scenes::run_random(&mut strip, &stop, config.refresh),
    };

    if let Err(msg) = result {
        log::error!("{}", msg);
        std::process::exit(1);
    }

    // Leave the strip dark on the way out.
    strip.clear();
    if let Err(msg) = strip.show() {
        log::warn!("Final blackout failed: {}", msg);
    }
}
