use std::net::{SocketAddr, UdpSocket};
use std::str::FromStr;

use rosc::{encoder, OscMessage, OscPacket, OscType};

use crate::color::Color;

/// An addressable LED strip. Pixel writes are buffered until `show`.
pub trait Strip {
    /// One-time hardware/bus initialization, called once before first use.
    fn begin(&mut self) -> Result<(), String>;

    /// Buffers one pixel change. Panics on an out-of-range index.
    fn set_pixel(&mut self, index: usize, color: Color);

    /// Flushes all buffered pixel changes to the physical strip.
    fn show(&mut self) -> Result<(), String>;

    /// Sets all pixels to off without flushing.
    fn clear(&mut self);

    /// Global brightness scaling, independent of per-pixel colors.
    fn set_brightness(&mut self, level: u8);

    fn len(&self) -> usize;
}

const DMX_CHANNELS: usize = 512;

/// One DMX universe fits 170 RGB pixels.
pub const MAX_PIXELS: usize = DMX_CHANNELS / 3;

/// Strip driven through an OLA daemon: frames go out as an OSC blob of one
/// DMX universe over UDP, three channels per pixel.
pub struct OlaStrip {
    sock: UdpSocket,
    target_addr: SocketAddr,
    universe: u32,
    pixel_count: usize,
    brightness: u8,
    buffer: Vec<u8>,
}

impl OlaStrip {
    pub fn new(
        target_addr: SocketAddr,
        universe: u32,
        pixel_count: usize,
    ) -> Result<OlaStrip, String> {
        if pixel_count == 0 || pixel_count > MAX_PIXELS {
            return Err(format!(
                "pixel count must be in 1..={MAX_PIXELS}, got {pixel_count}"
            ));
        }

        let our_addr = SocketAddr::from_str("0.0.0.0:0").unwrap();
        let sock = match UdpSocket::bind(our_addr) {
            Ok(sock) => sock,
            Err(error) => return Err(error.to_string()),
        };

        Ok(OlaStrip {
            sock,
            target_addr,
            universe,
            pixel_count,
            brightness: 255,
            buffer: vec![0; DMX_CHANNELS],
        })
    }

    fn scale(&self, value: u8) -> u8 {
        (u16::from(value) * u16::from(self.brightness) / 255) as u8
    }
}

impl Strip for OlaStrip {
    fn begin(&mut self) -> Result<(), String> {
        // Blackout first so leftovers from a previous session don't light up.
        self.clear();
        self.show()
    }

    fn set_pixel(&mut self, index: usize, color: Color) {
        assert!(
            index < self.pixel_count,
            "pixel index {index} out of range 0..{}",
            self.pixel_count
        );
        let (r, g, b) = color.split();
        let base = index * 3;
        self.buffer[base] = self.scale(r);
        self.buffer[base + 1] = self.scale(g);
        self.buffer[base + 2] = self.scale(b);
    }

    fn show(&mut self) -> Result<(), String> {
        let packet = OscPacket::Message(OscMessage {
            addr: format!("/dmx/universe/{}", self.universe),
            args: vec![OscType::Blob(self.buffer.clone())],
        });
        let msg_buf = match encoder::encode(&packet) {
            Ok(msg_buf) => msg_buf,
            Err(error) => return Err(format!("OSC encoding failed: {error:?}")),
        };
        if let Err(error) = self.sock.send_to(&msg_buf, self.target_addr) {
            return Err(format!("Cannot reach OLA at {}: {error}", self.target_addr));
        }
        Ok(())
    }

    fn clear(&mut self) {
        self.buffer.fill(0);
    }

    fn set_brightness(&mut self, level: u8) {
        self.brightness = level;
    }

    fn len(&self) -> usize {
        self.pixel_count
    }
}
