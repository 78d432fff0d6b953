//! Graph color attached to a sensor.
//!
//! The display layer draws each sensor's history in its own color; the
//! core only stores it.

use serde::{Deserialize, Serialize};

/// RGBA color with alpha channel
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Color {
    pub fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: r as f64 / 255.0,
            g: g as f64 / 255.0,
            b: b as f64 / 255.0,
            a: a as f64 / 255.0,
        }
    }

    pub fn to_rgba8(&self) -> (u8, u8, u8, u8) {
        (
            (self.r * 255.0).round() as u8,
            (self.g * 255.0).round() as u8,
            (self.b * 255.0).round() as u8,
            (self.a * 255.0).round() as u8,
        )
    }

    /// Parse "#rrggbb" or "#rrggbbaa"
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#')?;
        if !digits.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(digits.get(i..i + 2)?, 16).ok();

        match digits.len() {
            6 => Some(Self::from_rgba8(channel(0)?, channel(2)?, channel(4)?, 255)),
            8 => Some(Self::from_rgba8(channel(0)?, channel(2)?, channel(4)?, channel(6)?)),
            _ => None,
        }
    }

    /// Format as "#rrggbb", dropping alpha
    pub fn to_hex(&self) -> String {
        let (r, g, b, _) = self.to_rgba8();
        format!("#{:02x}{:02x}{:02x}", r, g, b)
    }

    /// Pick a color from a fixed palette, cycling by index
    pub fn palette(index: usize) -> Self {
        const PALETTE: [(u8, u8, u8); 8] = [
            (0xe6, 0x19, 0x4b),
            (0x3c, 0xb4, 0x4b),
            (0x43, 0x63, 0xd8),
            (0xf5, 0x82, 0x31),
            (0x91, 0x1e, 0xb4),
            (0x42, 0xd4, 0xf4),
            (0xf0, 0x32, 0xe6),
            (0xbf, 0xef, 0x45),
        ];
        let (r, g, b) = PALETTE[index % PALETTE.len()];
        Self::from_rgba8(r, g, b, 255)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0, 1.0)
    }
}
