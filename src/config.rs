use std::path::Path;

use config_file::FromConfigFile;
use serde::Deserialize;

/// Session settings. Every field has a default so a config file only needs
/// to name what it changes; CLI flags override the file.
#[derive(Deserialize, Clone, Debug)]
pub struct Config {
    /// Number of pixels on the strip.
    #[serde(default = "default_pixel_count")]
    pub pixel_count: usize,

    /// Refresh interval in seconds (one frame per interval).
    #[serde(default = "default_refresh")]
    pub refresh: f64,

    /// Global brightness, 0-255.
    #[serde(default = "default_brightness")]
    pub brightness: u8,

    /// Address of the OLA daemon's OSC input.
    #[serde(default = "default_ola_addr")]
    pub ola_addr: String,

    /// DMX universe to render into.
    #[serde(default)]
    pub universe: u32,
}

fn default_pixel_count() -> usize {
    120
}

fn default_refresh() -> f64 {
    0.01666
}

fn default_brightness() -> u8 {
    // Roughly a quarter duty cycle, plenty for indoor use.
    64
}

fn default_ola_addr() -> String {
    "127.0.0.1:7770".to_string()
}

impl Default for Config {
    fn default() -> Config {
        Config {
            pixel_count: default_pixel_count(),
            refresh: default_refresh(),
            brightness: default_brightness(),
            ola_addr: default_ola_addr(),
            universe: 0,
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Config, String> {
        match Config::from_config_file(path) {
            Ok(config) => Ok(config),
            Err(error) => Err(format!("Cannot read config {}: {}", path.display(), error)),
        }
    }
}
